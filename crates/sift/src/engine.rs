//! The collection query engine.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::comparator::{Comparator, ComparatorContext, NullOrdering};
use crate::error::Result;
use crate::matcher::Matcher;
use crate::ordering::{compare_by_order, OrderEntry};
use crate::predicate::Predicate;
use crate::query::Query;
use crate::record::Record;
use crate::registry::ComparatorRegistry;

/// Engine configuration.
///
/// ```
/// use sift::{EngineOptions, NullOrdering};
///
/// let options: EngineOptions = serde_json::from_str(r#"{"nullOrdering": "first"}"#).unwrap();
/// assert_eq!(options.null_ordering, NullOrdering::First);
///
/// let options: EngineOptions = serde_json::from_str("{}").unwrap();
/// assert_eq!(options.null_ordering, NullOrdering::Throw);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineOptions {
    /// Null-ordering policy for predicate evaluation. Sorting always places
    /// empty values first.
    pub null_ordering: NullOrdering,
}

/// Filters, orders and paginates in-memory collections.
///
/// The engine owns its [`ComparatorRegistry`] and never mutates it, so one
/// instance can serve concurrent callers.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use sift::{Predicate, Query, QueryEngine};
///
/// let records = vec![
///     json!({"lel": "hallo1"}),
///     json!({"lel": "hallo2"}),
///     json!({"lel": "hallo3"}),
/// ];
///
/// let engine = QueryEngine::new();
/// let query = Query::new().filter(Predicate::ne("lel", "hallo3")).order_desc("lel");
/// let found = engine.execute(&records, &query).unwrap();
/// assert_eq!(found, vec![&records[1], &records[0]]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryEngine {
    registry: ComparatorRegistry,
    options: EngineOptions,
}

impl QueryEngine {
    /// Creates an engine with no comparator overrides and default options.
    pub fn new() -> Self {
        QueryEngine::default()
    }

    pub fn with_registry(registry: ComparatorRegistry) -> Self {
        QueryEngine {
            registry,
            options: EngineOptions::default(),
        }
    }

    pub fn builder() -> QueryEngineBuilder {
        QueryEngineBuilder::default()
    }

    pub fn registry(&self) -> &ComparatorRegistry {
        &self.registry
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Resolves the comparator the engine uses for `field` when filtering.
    pub fn comparator<'a>(&self, field: &'a str) -> Box<dyn Comparator + 'a> {
        self.registry
            .resolve(ComparatorContext::new(field, self.options.null_ordering))
    }

    fn matcher(&self) -> Matcher<'_> {
        Matcher::new(&self.registry, self.options.null_ordering)
    }

    /// Returns whether `record` satisfies `predicate`.
    ///
    /// A relational comparison against an empty field under
    /// [`NullOrdering::Throw`] makes the whole predicate a non-match rather
    /// than an error.
    pub fn matches<R: Record + ?Sized>(&self, record: &R, predicate: &Predicate) -> Result<bool> {
        self.matcher().matches(record, predicate)
    }

    /// Runs `query` over `records`: filter, order, skip, limit.
    ///
    /// Returns references into `records`. Records that tie on every order
    /// entry keep their input order.
    pub fn execute<'r, R: Record>(&self, records: &'r [R], query: &Query) -> Result<Vec<&'r R>> {
        debug!(
            records = records.len(),
            order_keys = query.order_by.len(),
            "executing query"
        );

        let matcher = self.matcher();
        let mut results = Vec::new();
        for record in records {
            if matcher.matches(record, &query.filter)? {
                results.push(record);
            }
        }
        let matched = results.len();

        if !query.order_by.is_empty() {
            results = merge_sort(&results, &mut |a: &R, b: &R| {
                compare_by_order(a, b, &query.order_by, &self.registry)
            })?;
        }

        let results: Vec<&'r R> = results
            .into_iter()
            .skip(query.skip_len())
            .take(query.limit_len())
            .collect();

        debug!(matched, returned = results.len(), "query executed");
        Ok(results)
    }

    /// Like [`execute`](Self::execute), returning clones.
    pub fn execute_cloned<R: Record + Clone>(&self, records: &[R], query: &Query) -> Result<Vec<R>> {
        Ok(self
            .execute(records, query)?
            .into_iter()
            .cloned()
            .collect())
    }

    /// Counts the records matching `predicate`.
    pub fn count<R: Record>(&self, records: &[R], predicate: &Predicate) -> Result<usize> {
        let matcher = self.matcher();
        let mut count = 0;
        for record in records {
            if matcher.matches(record, predicate)? {
                count += 1;
            }
        }
        Ok(count)
    }

    /// Returns the first record, in input order, matching `predicate`.
    pub fn find<'r, R: Record>(&self, records: &'r [R], predicate: &Predicate) -> Result<Option<&'r R>> {
        let matcher = self.matcher();
        for record in records {
            if matcher.matches(record, predicate)? {
                return Ok(Some(record));
            }
        }
        Ok(None)
    }

    /// Compares two records by a cascading order directive, as the sort
    /// phase of [`execute`](Self::execute) does.
    pub fn compare_records<R: Record + ?Sized>(
        &self,
        a: &R,
        b: &R,
        order: &[OrderEntry],
    ) -> Result<Ordering> {
        compare_by_order(a, b, order, &self.registry)
    }
}

/// Stable merge sort that stops at the first comparison error.
fn merge_sort<'r, R, F>(items: &[&'r R], compare: &mut F) -> Result<Vec<&'r R>>
where
    R: ?Sized,
    F: FnMut(&R, &R) -> Result<Ordering>,
{
    if items.len() <= 1 {
        return Ok(items.to_vec());
    }
    let (left, right) = items.split_at(items.len() / 2);
    let left = merge_sort(left, compare)?;
    let right = merge_sort(right, compare)?;

    let mut merged = Vec::with_capacity(items.len());
    let (mut i, mut j) = (0, 0);
    while i < left.len() && j < right.len() {
        // Ties take from the left half.
        if compare(right[j], left[i])?.is_lt() {
            merged.push(right[j]);
            j += 1;
        } else {
            merged.push(left[i]);
            i += 1;
        }
    }
    merged.extend_from_slice(&left[i..]);
    merged.extend_from_slice(&right[j..]);
    Ok(merged)
}

/// Builder for [`QueryEngine`].
///
/// ```
/// use sift::{NullOrdering, QueryEngine};
///
/// let engine = QueryEngine::builder()
///     .null_ordering(NullOrdering::First)
///     .register_dates("createdAt")
///     .build();
/// assert!(engine.registry().contains("createdAt"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct QueryEngineBuilder {
    registry: ComparatorRegistry,
    options: EngineOptions,
}

impl QueryEngineBuilder {
    pub fn options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    pub fn null_ordering(mut self, null_ordering: NullOrdering) -> Self {
        self.options.null_ordering = null_ordering;
        self
    }

    /// Replaces the registry wholesale.
    pub fn registry(mut self, registry: ComparatorRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn register<F>(mut self, field: impl Into<String>, constructor: F) -> Self
    where
        F: for<'a> Fn(ComparatorContext<'a>) -> Box<dyn Comparator + 'a> + Send + Sync + 'static,
    {
        self.registry.register(field, constructor);
        self
    }

    pub fn register_dates(mut self, field: impl Into<String>) -> Self {
        self.registry.register_dates(field);
        self
    }

    pub fn build(self) -> QueryEngine {
        QueryEngine {
            registry: self.registry,
            options: self.options,
        }
    }
}
