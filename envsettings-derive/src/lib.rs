//! Derive macro implementation for envsettings

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, GenericArgument, PathArguments, Type};

mod attrs;

use attrs::{FieldAttrs, StructAttrs};

/// How a field's default expression is wrapped into a `Value`.
///
/// The wrappers force the expression to the tag's Rust type so that a
/// wrong-typed default fails to compile instead of failing when the
/// registry is built.
#[derive(Clone, Copy)]
enum TagKind {
    Bool,
    Int,
    Float,
    Str,
    Other,
}

/// Infer a type tag expression from a field type.
///
/// Returns the tag tokens and the wrapping kind, or `None` for types the
/// macro does not recognize (those need an explicit `tag = ...` attribute).
fn infer_tag(ty: &Type) -> Option<(TokenStream2, TagKind)> {
    let Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    let tag = match segment.ident.to_string().as_str() {
        "bool" => (quote!(::envsettings::TypeTag::Bool), TagKind::Bool),
        "i8" | "i16" | "i32" | "i64" | "isize" | "u8" | "u16" | "u32" | "u64" | "usize" => {
            (quote!(::envsettings::TypeTag::Int), TagKind::Int)
        }
        "f32" | "f64" => (quote!(::envsettings::TypeTag::Float), TagKind::Float),
        "String" => (quote!(::envsettings::TypeTag::Str), TagKind::Str),
        "Vec" => (quote!(::envsettings::TypeTag::List), TagKind::Other),
        "HashMap" | "BTreeMap" | "IndexMap" => {
            (quote!(::envsettings::TypeTag::Map), TagKind::Other)
        }
        "NaiveDateTime" => (quote!(::envsettings::TypeTag::DateTime), TagKind::Other),
        "NaiveDate" => (quote!(::envsettings::TypeTag::Date), TagKind::Other),
        "NaiveTime" => (quote!(::envsettings::TypeTag::Time), TagKind::Other),
        "Decimal" => (quote!(::envsettings::TypeTag::Decimal), TagKind::Other),
        "Uuid" => (quote!(::envsettings::TypeTag::Uuid), TagKind::Other),
        "Option" => {
            let inner = extract_generic_inner(segment)?;
            let (inner_tag, _) = infer_tag(inner)?;
            (
                quote!(::envsettings::TypeTag::Optional(::std::boxed::Box::new(#inner_tag))),
                TagKind::Other,
            )
        }
        _ => return None,
    };
    Some(tag)
}

/// Extract `T` from a generic segment like `Option<T>`.
fn extract_generic_inner(segment: &syn::PathSegment) -> Option<&Type> {
    if let PathArguments::AngleBracketed(args) = &segment.arguments {
        if let Some(GenericArgument::Type(inner)) = args.args.first() {
            return Some(inner);
        }
    }
    None
}

fn is_option(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty {
        type_path
            .path
            .segments
            .last()
            .map(|segment| segment.ident == "Option")
            .unwrap_or(false)
    } else {
        false
    }
}

/// Wrap a default expression so it type-checks against the declared tag.
fn wrap_default(kind: TagKind, expr: &TokenStream2) -> TokenStream2 {
    match kind {
        TagKind::Bool => quote!(::envsettings::Value::Bool(#expr)),
        TagKind::Int => quote!(::envsettings::Value::Int((#expr) as i64)),
        TagKind::Float => quote!(::envsettings::Value::Float((#expr) as f64)),
        TagKind::Str => quote!(::envsettings::Value::Str(::std::string::String::from(#expr))),
        TagKind::Other => quote!(::envsettings::Value::from(#expr)),
    }
}

/// `EnvSettings` derive macro
///
/// Turns a struct declaration into a settings schema: every named field
/// becomes a declaration in the generated registry, with the type tag
/// inferred from the field type and the setting name taken from the field
/// name in UPPER_SNAKE_CASE.
///
/// # Supported Attributes
///
/// **Struct-level**:
/// - `#[setting(extend = BaseSchema)]`: inherit the base schema's
///   declarations; this struct's declarations override by name
///
/// **Field-level**:
/// - `#[setting(name = "CUSTOM_NAME")]`: custom setting name
/// - `#[setting(default)]`: use `Default::default()` as the default value
/// - `#[setting(default = value)]`: use an explicit default value
/// - `#[setting(tag = ...)]`: explicit `TypeTag` expression, for union and
///   custom tags that have no corresponding Rust field type
///
/// # Generated Items
///
/// - `impl SettingsSchema` with the declaration list
/// - `fn builder() -> SettingsBuilder` seeded with the declarations
/// - `fn settings() -> Result<&'static Settings, SettingsError>`, a
///   process-wide registry built once on first use
///
/// # Example
///
/// See the `envsettings` crate documentation for usage examples.
#[proc_macro_derive(EnvSettings, attributes(setting))]
pub fn derive_envsettings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;
    let struct_attrs = StructAttrs::from_attrs(&input.attrs);

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "EnvSettings only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "EnvSettings only supports structs")
                .to_compile_error()
                .into();
        }
    };

    let declarations = fields.iter().map(|field| {
        let field_name = field.ident.as_ref().unwrap();
        let field_type = &field.ty;
        let attrs = FieldAttrs::from_field(field);

        let setting_name = attrs
            .name
            .unwrap_or_else(|| field_name.to_string().to_uppercase());

        let (tag, kind) = if let Some(tag) = attrs.tag {
            (tag, TagKind::Other)
        } else {
            match infer_tag(field_type) {
                Some(inferred) => inferred,
                None => {
                    return syn::Error::new_spanned(
                        field_type,
                        "cannot infer a type tag for this field type; \
                         annotate the field with #[setting(tag = ...)]",
                    )
                    .to_compile_error();
                }
            }
        };

        if is_option(field_type) {
            if attrs.default.is_some() {
                return syn::Error::new_spanned(
                    field,
                    "Option<T> fields cannot have default attribute \
                     (they default to the absent value automatically)",
                )
                .to_compile_error();
            }
            return quote! {
                decls.push(::envsettings::Declaration::new(
                    #setting_name,
                    #tag,
                    ::envsettings::Value::None,
                ));
            };
        }

        match attrs.default {
            Some(Some(expr)) => {
                let default_value = wrap_default(kind, &expr);
                quote! {
                    decls.push(::envsettings::Declaration::new(
                        #setting_name,
                        #tag,
                        #default_value,
                    ));
                }
            }
            Some(None) => {
                let default_expr =
                    quote!(<#field_type as ::core::default::Default>::default());
                let default_value = wrap_default(kind, &default_expr);
                quote! {
                    decls.push(::envsettings::Declaration::new(
                        #setting_name,
                        #tag,
                        #default_value,
                    ));
                }
            }
            None => {
                quote! {
                    decls.push(::envsettings::Declaration::required(#setting_name, #tag));
                }
            }
        }
    });

    let extend_base = struct_attrs.extend.map(|base| {
        quote! {
            decls.extend(<#base as ::envsettings::SettingsSchema>::declarations());
        }
    });

    let expanded = quote! {
        impl ::envsettings::SettingsSchema for #struct_name {
            fn declarations() -> ::std::vec::Vec<::envsettings::Declaration> {
                let mut decls: ::std::vec::Vec<::envsettings::Declaration> =
                    ::std::vec::Vec::new();
                #extend_base
                #(#declarations)*
                decls
            }
        }

        impl #struct_name {
            /// Registry builder seeded with this schema's declarations.
            ///
            /// Use this to attach a custom override provider or adjust
            /// registry behavior before building.
            pub fn builder() -> ::envsettings::SettingsBuilder {
                let mut builder = ::envsettings::Settings::builder();
                for decl in <Self as ::envsettings::SettingsSchema>::declarations() {
                    builder = builder.declaration(decl);
                }
                builder
            }

            /// Process-wide registry for this schema, built once on first use.
            ///
            /// Construction is idempotent; concurrent first calls may race
            /// to build but only one result is ever published.
            ///
            /// # Errors
            ///
            /// Returns an error when a declared default does not match its
            /// declared type.
            pub fn settings() -> ::std::result::Result<
                &'static ::envsettings::Settings,
                ::envsettings::SettingsError,
            > {
                static SETTINGS: ::std::sync::OnceLock<::envsettings::Settings> =
                    ::std::sync::OnceLock::new();
                if let ::std::option::Option::Some(existing) = SETTINGS.get() {
                    return ::std::result::Result::Ok(existing);
                }
                let built = Self::builder().build()?;
                ::std::result::Result::Ok(SETTINGS.get_or_init(|| built))
            }
        }
    };

    TokenStream::from(expanded)
}
