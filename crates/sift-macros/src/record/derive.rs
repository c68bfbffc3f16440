//! Code generation for `#[derive(Record)]`.

use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{spanned::Spanned, Data, DeriveInput, Error, Fields, Result};

use super::attrs::parse_record_attrs;

/// Generates the `Record` impl and field name constants for a struct.
pub fn record_derive_impl(input: DeriveInput) -> Result<TokenStream> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(Error::new(
                    input.span(),
                    "Record can only be derived for structs with named fields",
                ))
            }
        },
        _ => {
            return Err(Error::new(
                input.span(),
                "Record can only be derived for structs",
            ))
        }
    };

    let mut field_arms: Vec<TokenStream> = Vec::new();
    let mut field_constants: Vec<TokenStream> = Vec::new();
    let mut seen_keys = HashSet::new();
    let mut seen_constants = HashSet::new();

    for field in fields {
        let field_name = field
            .ident
            .as_ref()
            .ok_or_else(|| Error::new(field.span(), "expected named field"))?;

        let attrs = parse_record_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let key = attrs.rename.unwrap_or_else(|| field_name.to_string());
        if !seen_keys.insert(key.clone()) {
            return Err(Error::new(
                field.span(),
                format!("duplicate record field name '{key}'"),
            ));
        }

        let constant = to_constant_name(&key);
        if !seen_constants.insert(constant.clone()) {
            return Err(Error::new(
                field.span(),
                format!(
                    "record field name '{key}' maps to constant `{constant}`, \
                     which another field already uses; rename one of them"
                ),
            ));
        }
        let const_name = format_ident!("{}", constant);
        field_constants.push(quote! {
            /// Record field name.
            pub const #const_name: &'static str = #key;
        });
        field_arms.push(quote! {
            #key => ::sift::ToValue::to_value(&self.#field_name),
        });
    }

    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics #struct_name #ty_generics #where_clause {
            #(#field_constants)*
        }

        impl #impl_generics ::sift::Record for #struct_name #ty_generics #where_clause {
            fn field(&self, key: &str) -> ::sift::Value<'_> {
                match key {
                    #(#field_arms)*
                    _ => ::sift::Value::Empty,
                }
            }
        }
    })
}

/// Converts a field name to a `SCREAMING_SNAKE_CASE` identifier.
///
/// Word breaks come from `_`, `-`, any other non-alphanumeric character,
/// and lower-to-upper case transitions. A leading digit gets a `_` prefix.
fn to_constant_name(name: &str) -> String {
    let mut result = String::with_capacity(name.len() + 4);
    let mut prev_was_lower = false;

    for c in name.chars() {
        if c.is_uppercase() {
            if prev_was_lower {
                result.push('_');
            }
            result.extend(c.to_uppercase());
            prev_was_lower = false;
        } else if c.is_alphanumeric() {
            result.extend(c.to_uppercase());
            prev_was_lower = true;
        } else {
            result.push('_');
            prev_was_lower = false;
        }
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) {
        result.insert(0, '_');
    }
    result
}
