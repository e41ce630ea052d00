//! Procedural macro for printing Rust types as s-expressions.
//! See the `sexpdata` crate for more details on s-expressions and on how
//! to use the derive macro.
use syn::{parse_macro_input, DeriveInput};

pub(crate) mod common;
mod print;

/// Derive the `Print` trait.
///
/// Structs with named fields print as a list of keywords and values,
/// tuple structs print as a tuple and unit structs print as their name.
#[proc_macro_derive(Print, attributes(sexpr))]
pub fn derive_print(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let derive_input = parse_macro_input!(input as DeriveInput);
    print::derive_print_impl(derive_input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
