use proc_macro::TokenStream;
use quote::quote;
use std::collections::HashMap;
use syn::{parse_macro_input, Attribute, Data, DeriveInput, Fields, Meta, Token};

/// Helper enum for parsed attribute values
enum MetaValue {
    Str(syn::LitStr),
    Flag,
}

/// Check if the struct has #[allow(missing_docs)] attribute
fn is_allow_missing_docs(attr: &Attribute) -> bool {
    attr.path().is_ident("allow")
        && attr
            .parse_args::<syn::Ident>()
            .map(|ident| ident == "missing_docs")
            .unwrap_or(false)
}

/// Defines a configuration struct whose fields are resolved from the
/// environment, a `.env` file and defaults.
///
/// ```rust,ignore
/// define_config! {
///     #[derive(Debug, Default)]
///     pub struct Config {
///         #[field(env = "PORT", doc = "Server port", default = "8080")]
///         pub port: u16,
///     }
/// }
/// ```
#[proc_macro]
pub fn define_config(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match generate_config(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn generate_config(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let struct_name = &input.ident;
    let vis = &input.vis;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();
    let generics = &input.generics;

    // Check for struct-level attributes
    let allow_missing_docs = input.attrs.iter().any(is_allow_missing_docs);

    // Extract fields from the struct
    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "define_config! only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "define_config! only supports structs",
            ));
        }
    };

    let mut field_defs = Vec::new();
    let mut descriptor_items = Vec::new();
    let mut resolve_items = Vec::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let field_vis = &field.vis;
        let field_type = &field.ty;

        // Everything except our helper attribute stays on the generated field
        let kept_attrs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| !attr.path().is_ident("field"))
            .collect();
        field_defs.push(quote! {
            #(#kept_attrs)*
            #field_vis #field_name: #field_type
        });

        // Fields without #[field(...)] are not resolved
        let Some(config) = parse_field_config(&field.attrs, allow_missing_docs)? else {
            continue;
        };

        // Extract cfg attributes for feature gating
        let cfg_attrs: Vec<&Attribute> = field
            .attrs
            .iter()
            .filter(|attr| attr.path().is_ident("cfg"))
            .collect();

        let env_var = &config.env_var;
        let description = &config.description;
        let default = match &config.default {
            Some(lit) => quote! { ::core::option::Option::Some(#lit) },
            None => quote! { ::core::option::Option::None },
        };
        let descriptor = quote! {
            ::layered_env::FieldDescriptor {
                key: #env_var,
                default: #default,
                description: #description,
                kind: <#field_type as ::layered_env::Coerce>::KIND,
            }
        };

        descriptor_items.push(quote! {
            #(#cfg_attrs)*
            descriptors.push(#descriptor);
        });
        resolve_items.push(quote! {
            #(#cfg_attrs)*
            resolver.resolve_into(&#descriptor, &mut self.#field_name)?;
        });
    }

    // Filter out our custom attributes (allow(missing_docs)) from struct definition
    let filtered_attrs: Vec<&Attribute> = input
        .attrs
        .iter()
        .filter(|attr| !is_allow_missing_docs(attr))
        .collect();

    // Generate the struct definition
    let struct_def = quote! {
        #(#filtered_attrs)*
        #vis struct #struct_name #generics #where_clause {
            #(#field_defs),*
        }
    };

    // Generate Resolve trait implementation
    let resolve_impl = quote! {
        impl #impl_generics ::layered_env::Resolve for #struct_name #ty_generics #where_clause {
            #[allow(unused_mut)]
            fn descriptors() -> ::std::vec::Vec<::layered_env::FieldDescriptor> {
                let mut descriptors = ::std::vec::Vec::new();

                #(#descriptor_items)*

                descriptors
            }

            #[allow(unused_variables)]
            fn resolve_fields(
                &mut self,
                resolver: &::layered_env::Resolver<'_>,
            ) -> ::core::result::Result<(), ::layered_env::ConfigError> {
                #(#resolve_items)*

                ::core::result::Result::Ok(())
            }
        }
    };

    Ok(quote! {
        #struct_def
        #resolve_impl
    })
}

#[derive(Debug)]
struct FieldConfig {
    env_var: syn::LitStr,
    description: String,
    default: Option<syn::LitStr>,
}

/// Parse #[field(env = "X", doc = "Y", default = "Z")] syntax
fn parse_field_list(meta_list: &syn::MetaList) -> syn::Result<HashMap<String, MetaValue>> {
    let mut values = HashMap::new();

    meta_list.parse_nested_meta(|meta| {
        let key = meta
            .path
            .get_ident()
            .ok_or_else(|| meta.error("expected identifier"))?
            .to_string();

        if !matches!(key.as_str(), "env" | "doc" | "default") {
            return Err(meta.error(format!(
                "unknown field option `{}`, expected env, doc or default",
                key
            )));
        }

        if meta.input.peek(Token![=]) {
            meta.input.parse::<Token![=]>()?;
            let value: syn::LitStr = meta.input.parse().map_err(|_| {
                meta.error(format!("{} must be a string literal", key))
            })?;
            values.insert(key, MetaValue::Str(value));
        } else {
            values.insert(key, MetaValue::Flag);
        }

        Ok(())
    })?;

    Ok(values)
}

fn parse_field_config(
    attrs: &[Attribute],
    allow_missing_docs: bool,
) -> syn::Result<Option<FieldConfig>> {
    // Find the #[field(...)] attribute
    let Some(field_attr) = attrs.iter().find(|attr| attr.path().is_ident("field")) else {
        return Ok(None);
    };

    // Parse it as a Meta::List
    let parsed = match &field_attr.meta {
        Meta::List(list) => parse_field_list(list)?,
        _ => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "field attribute must be a list: #[field(env = \"...\", ...)]",
            ));
        }
    };

    // Extract env (required, may be empty to skip the field)
    let env_var = match parsed.get("env") {
        Some(MetaValue::Str(s)) => s.clone(),
        _ => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "field must have env = \"VAR_NAME\"",
            ));
        }
    };

    // Extract doc (conditionally required)
    let description = match parsed.get("doc") {
        Some(MetaValue::Str(s)) => s.value().trim().to_string(),
        None if allow_missing_docs => String::new(),
        None => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "field must have doc = \"description\" (or use #[allow(missing_docs)] on struct)",
            ));
        }
        Some(MetaValue::Flag) => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "doc must be a string literal",
            ));
        }
    };

    // Extract default (optional, absent means the field is required)
    let default = match parsed.get("default") {
        Some(MetaValue::Str(s)) => Some(s.clone()),
        None => None,
        Some(MetaValue::Flag) => {
            return Err(syn::Error::new_spanned(
                field_attr,
                "default must be a string literal: default = \"value\"",
            ));
        }
    };

    Ok(Some(FieldConfig {
        env_var,
        description,
        default,
    }))
}
