//! Parsing of `#[record(...)]` field attributes.

use proc_macro2::Span;
use syn::{
    parse::{Parse, ParseStream},
    punctuated::Punctuated,
    spanned::Spanned,
    Attribute, Error, Expr, ExprLit, Lit, Meta, Result, Token,
};

/// Field-level options from `#[record(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordAttr {
    /// Hide the field from queries.
    pub skip: bool,
    /// Name the field is queried by (default: the Rust field name).
    pub rename: Option<String>,
}

impl Parse for RecordAttr {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut attr = RecordAttr::default();
        let content: Punctuated<Meta, Token![,]> = Punctuated::parse_terminated(input)?;

        for meta in content {
            match &meta {
                Meta::Path(p) if p.is_ident("skip") => attr.skip = true,
                Meta::NameValue(nv) if nv.path.is_ident("rename") => match &nv.value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) => {
                        let name = s.value();
                        if name.is_empty() {
                            return Err(Error::new(s.span(), "rename must not be empty"));
                        }
                        attr.rename = Some(name);
                    }
                    other => {
                        return Err(Error::new(other.span(), "rename must be a string literal"))
                    }
                },
                _ => {
                    return Err(Error::new(
                        meta.span(),
                        "unknown record attribute. Expected: skip or rename = \"...\"",
                    ))
                }
            }
        }

        if attr.skip && attr.rename.is_some() {
            return Err(input.error("a skipped field cannot be renamed"));
        }
        Ok(attr)
    }
}

/// Merges every `#[record(...)]` attribute on a field.
pub fn parse_record_attrs(attrs: &[Attribute]) -> Result<RecordAttr> {
    let mut merged = RecordAttr::default();
    for attr in attrs.iter().filter(|a| a.path().is_ident("record")) {
        let parsed = attr.parse_args::<RecordAttr>()?;
        merged.skip |= parsed.skip;
        if let Some(name) = parsed.rename {
            if merged.rename.is_some() {
                return Err(Error::new(attr.span(), "duplicate rename"));
            }
            merged.rename = Some(name);
        }
    }
    if merged.skip && merged.rename.is_some() {
        return Err(Error::new(Span::call_site(), "a skipped field cannot be renamed"));
    }
    Ok(merged)
}
