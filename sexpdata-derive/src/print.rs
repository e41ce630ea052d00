use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_quote, spanned::Spanned, DataStruct, DeriveInput, Fields, GenericParam, Index};

use crate::common::parse_sexpr_attributes;

pub fn derive_print_impl(derive_input: DeriveInput) -> syn::Result<TokenStream> {
    match &derive_input.data {
        syn::Data::Struct(data_struct) => derive_print_struct(&derive_input, data_struct),
        syn::Data::Enum(_) => Err(syn::Error::new(
            derive_input.span(),
            "Can not derive Print for enums.",
        )),
        syn::Data::Union(_) => Err(syn::Error::new(
            derive_input.span(),
            "Can not derive Print for unions.",
        )),
    }
}

/// The closure that prints the contents of a container.
fn contents(code_fields: Vec<TokenStream>) -> TokenStream {
    if code_fields.is_empty() {
        return quote! { |_| ::std::result::Result::Ok(()) };
    }

    quote! {
        |printer| {
            #(#code_fields)*
            ::std::result::Result::Ok(())
        }
    }
}

fn derive_print_struct(
    derive_input: &DeriveInput,
    data_struct: &DataStruct,
) -> syn::Result<TokenStream> {
    let struct_ident = &derive_input.ident;

    let code_body = match &data_struct.fields {
        Fields::Named(fields) => {
            let mut code_fields = Vec::new();

            for field in &fields.named {
                let field_data = parse_sexpr_attributes(&field.attrs)?;
                if field_data.skip {
                    continue;
                }

                let Some(field_ident) = &field.ident else {
                    return Err(syn::Error::new_spanned(field, "Expected a named field."));
                };

                let field_name = field_data
                    .rename
                    .unwrap_or_else(|| field_ident.unraw().to_string());

                code_fields.push(quote! {
                    ::sexpdata::printer::Printer::keyword(printer, #field_name)?;
                    ::sexpdata::printer::Printer::print(printer, &self.#field_ident)?;
                });
            }

            let code_contents = contents(code_fields);
            quote! {
                ::sexpdata::printer::Printer::delimited(
                    printer,
                    ::sexpdata::delimiter::DelimiterKind::PARENS,
                    #code_contents,
                )
            }
        }
        Fields::Unnamed(fields) => {
            let mut code_fields = Vec::new();

            for (index, field) in fields.unnamed.iter().enumerate() {
                let field_data = parse_sexpr_attributes(&field.attrs)?;
                if field_data.rename.is_some() {
                    return Err(syn::Error::new_spanned(
                        field,
                        "Positional fields can not be renamed.",
                    ));
                }
                if field_data.skip {
                    continue;
                }

                let index = Index::from(index);
                code_fields.push(quote! {
                    ::sexpdata::printer::Printer::print(printer, &self.#index)?;
                });
            }

            let code_contents = contents(code_fields);
            quote! {
                ::sexpdata::printer::Printer::tuple(printer, #code_contents)
            }
        }
        Fields::Unit => {
            let name = struct_ident.to_string();
            quote! {
                ::sexpdata::printer::Printer::symbol(printer, #name)
            }
        }
    };

    // Add a `Print` bound to every generic type argument.
    let mut modified_generics = derive_input.generics.clone();
    let where_clause = modified_generics.make_where_clause();

    for param in &derive_input.generics.params {
        if let GenericParam::Type(param) = param {
            let ident = &param.ident;
            where_clause
                .predicates
                .push(parse_quote!(#ident: ::sexpdata::printer::Print));
        }
    }

    let (impl_generics, ty_generics, where_clause) = modified_generics.split_for_impl();

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::sexpdata::printer::Print for #struct_ident #ty_generics
        #where_clause {
            fn print<__P: ::sexpdata::printer::Printer>(
                &self,
                printer: &mut __P,
            ) -> ::std::result::Result<(), __P::Error> {
                #code_body
            }
        }
    })
}
