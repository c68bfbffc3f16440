//! Sift - declarative queries over in-memory record collections.
//!
//! Sift decides whether a record satisfies a predicate tree, and turns a
//! predicate plus ordering and pagination directives into a filtered,
//! sorted, paginated result. It supports:
//!
//! - Predicate trees of `_and`, `_or`, `_not` and leaf comparisons
//! - Operators `==`, `!=`, `<`, `<=`, `>`, `>=` and `in`
//! - A configurable policy for empty (absent or null) values
//! - Per-field comparator overrides, e.g. dates stored as strings
//! - Cascading multi-key ordering with stable tie-breaks
//! - `skip` and `limit`, including infinite and negative amounts
//!
//! # Quick Start
//!
//! ```rust
//! use serde_json::json;
//! use sift::{Predicate, Query, QueryEngine};
//!
//! let tasks = vec![
//!     json!({"name": "Write docs", "priority": 3, "archived": false}),
//!     json!({"name": "Fix bug", "priority": 5, "archived": false}),
//!     json!({"name": "Old task", "priority": 1, "archived": true}),
//! ];
//!
//! let query = Query::new()
//!     .filter(Predicate::and(vec![
//!         Predicate::gte("priority", 3),
//!         Predicate::not(Predicate::eq("archived", true)),
//!     ]))
//!     .order_desc("priority")
//!     .build();
//!
//! let engine = QueryEngine::new();
//! let results = engine.execute(&tasks, &query).unwrap();
//! assert_eq!(results.len(), 2);
//! assert_eq!(results[0]["name"], "Fix bug");
//! ```
//!
//! # Empty Values
//!
//! A field that is missing or null reads as [`Value::Empty`]. Empty equals
//! only empty. For `<`, `>`, `<=` and `>=` the engine's [`NullOrdering`]
//! decides: `First` ranks empty below everything, `Last` above, and `Throw`
//! (the default) excludes the record from the result. Sorting always uses
//! `First`, so empty values lead ascending results and trail descending
//! ones.
//!
//! # Records
//!
//! Anything implementing [`Record`] can be queried. JSON values and
//! string-keyed maps work as-is; structs can derive it with the `derive`
//! feature:
//!
//! ```rust,ignore
//! #[derive(sift::Record)]
//! struct Task {
//!     name: String,
//!     #[record(rename = "createdAt")]
//!     created_at: i64,
//! }
//! ```

mod comparator;
mod engine;
mod error;
mod matcher;
mod op;
mod ordering;
mod predicate;
mod query;
mod record;
mod registry;
mod value;

pub use comparator::{
    parse_date, Comparator, ComparatorContext, ComparatorOptions, DateComparator,
    DefaultComparator, HookResult, NullOrdering, OperandError,
};
pub use engine::{EngineOptions, QueryEngine, QueryEngineBuilder};
pub use error::{QueryError, Result};
pub use matcher::Matcher;
pub use op::{Op, UnknownOp};
pub use ordering::{compare_by_order, Direction, OrderEntry};
pub use predicate::{Condition, Predicate};
pub use query::{Count, Query};
pub use record::{Record, ToValue};
pub use registry::{ComparatorConstructor, ComparatorRegistry};
pub use value::{Number, OwnedValue, Timestamp, Value, ValueKind};

#[cfg(feature = "derive")]
pub use sift_macros::Record;
