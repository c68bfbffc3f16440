//! Derive macros for sift.
//!
//! - [`Record`] - Expose a struct's named fields to the sift query engine

mod record;

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

/// Derives `sift::Record` for a struct with named fields.
///
/// Every field is exposed under its own name and converted with
/// `sift::ToValue`, so field types must implement that trait. `Option`
/// fields read as empty when `None`.
///
/// # Field Attributes
///
/// | Attribute | Description |
/// |-----------|-------------|
/// | `skip` | Hide this field from queries; it reads as empty |
/// | `rename = "..."` | Expose the field under another name |
///
/// # Generated Code
///
/// 1. Field name constants (e.g., `Post::TITLE`, `Post::CREATED_AT`)
/// 2. An implementation of `Record::field()`
///
/// # Example
///
/// ```ignore
/// use sift::{Predicate, Query, QueryEngine, Record};
///
/// #[derive(Record)]
/// struct Post {
///     title: String,
///     #[record(rename = "createdAt")]
///     created_at: String,
///     draft: bool,
///     #[record(skip)]
///     body: String,
/// }
///
/// let engine = QueryEngine::builder().register_dates(Post::CREATED_AT).build();
/// let query = Query::new()
///     .filter(Predicate::eq(Post::DRAFT, false))
///     .order_desc(Post::CREATED_AT);
/// let published = engine.execute(&posts, &query)?;
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn record_derive(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    record::record_derive_impl(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
