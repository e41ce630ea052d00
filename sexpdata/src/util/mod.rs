//! Value types produced by the parser and accepted by the printer.
mod quoted;
mod spanned;
mod value;

pub use quoted::Quoted;
pub use spanned::Spanned;
pub use value::{Delimited, Symbol, Value};
