use syn::{Attribute, LitStr};

#[derive(Debug, Clone, Default)]
pub struct FieldData {
    pub skip: bool,
    pub rename: Option<String>,
}

/// Parse the `sexpr` attributes on a field.
pub fn parse_sexpr_attributes(attrs: &[Attribute]) -> syn::Result<FieldData> {
    let mut field_data = FieldData::default();

    for attr in attrs {
        if !attr.path().is_ident("sexpr") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            let path = &meta.path;
            if path.is_ident("skip") {
                field_data.skip = true;
                Ok(())
            } else if path.is_ident("rename") {
                let value = meta.value()?;
                let name: LitStr = value.parse()?;
                field_data.rename = Some(name.value());
                Ok(())
            } else {
                Err(meta.error("unrecognized sexpr attribute"))
            }
        })?;
    }

    Ok(field_data)
}
