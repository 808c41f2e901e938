//! Attribute parsing for `#[setting(...)]` annotations.
//!
//! This module extracts and validates schema attributes from struct fields
//! and from the struct itself during macro expansion.

use syn::{Attribute, Field, Lit};

/// Parsed `#[setting(...)]` attributes from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// Custom setting name override.
    ///
    /// If `None`, the field name is converted to UPPER_SNAKE_CASE.
    pub name: Option<String>,

    /// Default value strategy:
    /// - `None`: no default (reads yield the absent value)
    /// - `Some(None)`: use `Default::default()`
    /// - `Some(Some(tokens))`: use explicit token stream as default value
    pub default: Option<Option<proc_macro2::TokenStream>>,

    /// Explicit type tag expression, overriding type-based inference.
    ///
    /// Escape hatch for union and custom tags that have no corresponding
    /// Rust field type (e.g. `tag = TypeTag::Union(vec![...])`).
    pub tag: Option<proc_macro2::TokenStream>,
}

impl FieldAttrs {
    /// Extract and parse `#[setting(...)]` attributes from a struct field.
    ///
    /// Silently ignores unrecognized attributes to allow other macros to
    /// process them.
    pub fn from_field(field: &Field) -> Self {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("setting") {
                continue;
            }

            let _ = attr.parse_nested_meta(|meta| {
                // name = "..."
                if meta.path.is_ident("name") {
                    let value = meta.value()?;
                    let name: Lit = value.parse()?;
                    if let Lit::Str(s) = name {
                        attrs.name = Some(s.value());
                    }
                    return Ok(());
                }

                // default or default = value
                if meta.path.is_ident("default") {
                    if meta.input.peek(syn::Token![=]) {
                        let value = meta.value()?;
                        let tokens: proc_macro2::TokenStream = value.parse()?;
                        attrs.default = Some(Some(tokens));
                    } else {
                        attrs.default = Some(None);
                    }
                    return Ok(());
                }

                // tag = TypeTag expression
                if meta.path.is_ident("tag") {
                    let value = meta.value()?;
                    let tokens: proc_macro2::TokenStream = value.parse()?;
                    attrs.tag = Some(tokens);
                    return Ok(());
                }

                Err(meta.error("unsupported setting attribute"))
            });
        }

        attrs
    }
}

/// Parsed struct-level `#[setting(...)]` attributes.
#[derive(Debug, Default)]
pub struct StructAttrs {
    /// Base schema whose declarations are inserted before this struct's.
    ///
    /// Declarations of the same name in this struct override the base's,
    /// standard override-by-name inheritance.
    pub extend: Option<syn::Path>,
}

impl StructAttrs {
    /// Extract and parse struct-level `#[setting(...)]` attributes.
    pub fn from_attrs(attrs: &[Attribute]) -> Self {
        let mut parsed = Self::default();

        for attr in attrs {
            if !attr.path().is_ident("setting") {
                continue;
            }

            let _ = attr.parse_nested_meta(|meta| {
                // extend = BaseSchema
                if meta.path.is_ident("extend") {
                    let value = meta.value()?;
                    parsed.extend = Some(value.parse()?);
                    return Ok(());
                }

                Err(meta.error("unsupported struct-level setting attribute"))
            });
        }

        parsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn test_parse_name_attribute() {
        let field: Field = parse_quote! {
            #[setting(name = "CUSTOM_NAME")]
            pub field_name: String
        };

        let attrs = FieldAttrs::from_field(&field);
        assert_eq!(attrs.name, Some("CUSTOM_NAME".to_string()));
    }

    #[test]
    fn test_parse_default_string() {
        let field: Field = parse_quote! {
            #[setting(default = "default_value")]
            pub field_name: String
        };

        let attrs = FieldAttrs::from_field(&field);
        assert!(matches!(attrs.default, Some(Some(_))));
    }

    #[test]
    fn test_parse_default_number() {
        let field: Field = parse_quote! {
            #[setting(default = 8080)]
            pub port: u16
        };

        let attrs = FieldAttrs::from_field(&field);
        assert!(matches!(attrs.default, Some(Some(_))));
    }

    #[test]
    fn test_parse_default_no_value() {
        let field: Field = parse_quote! {
            #[setting(default)]
            pub field_name: String
        };

        let attrs = FieldAttrs::from_field(&field);
        assert!(matches!(attrs.default, Some(None)));
    }

    #[test]
    fn test_parse_tag_expression() {
        let field: Field = parse_quote! {
            #[setting(tag = TypeTag::Union(vec![TypeTag::Int, TypeTag::Str]))]
            pub port_or_name: String
        };

        let attrs = FieldAttrs::from_field(&field);
        assert!(attrs.tag.is_some());
    }

    #[test]
    fn test_parse_multiple_attributes() {
        let field: Field = parse_quote! {
            #[setting(name = "DB_URL", default = "localhost")]
            pub database_url: String
        };

        let attrs = FieldAttrs::from_field(&field);
        assert_eq!(attrs.name, Some("DB_URL".to_string()));
        assert!(matches!(attrs.default, Some(Some(_))));
    }

    #[test]
    fn test_parse_struct_extend() {
        let attrs: Vec<Attribute> = vec![parse_quote!(#[setting(extend = BaseConfig)])];

        let parsed = StructAttrs::from_attrs(&attrs);
        let extend = parsed.extend.expect("extend path");
        assert!(extend.is_ident("BaseConfig"));
    }

    #[test]
    fn test_no_attributes() {
        let field: Field = parse_quote! {
            pub plain: bool
        };

        let attrs = FieldAttrs::from_field(&field);
        assert!(attrs.name.is_none());
        assert!(attrs.default.is_none());
        assert!(attrs.tag.is_none());
    }
}
