//! Field name to comparator resolution.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::comparator::{Comparator, ComparatorContext, DateComparator, DefaultComparator};

/// Builds a comparator for a given context.
pub type ComparatorConstructor =
    Arc<dyn for<'a> Fn(ComparatorContext<'a>) -> Box<dyn Comparator + 'a> + Send + Sync>;

/// Per-field comparator overrides.
///
/// Fields without a registration resolve to [`DefaultComparator`]; resolving
/// never fails. Configure the registry before handing it to a
/// [`QueryEngine`](crate::QueryEngine); the engine never mutates it.
///
/// # Example
///
/// ```
/// use sift::{ComparatorContext, ComparatorRegistry, NullOrdering, Op, Value};
///
/// let registry = ComparatorRegistry::new().with_dates("createdAt");
///
/// let cmp = registry.resolve(ComparatorContext::new("createdAt", NullOrdering::First));
/// assert!(cmp
///     .compare(&Value::from("2021-04-09T10:00:00Z"), Op::Gt, &Value::from("2021-04-09"))
///     .unwrap());
///
/// // Unregistered fields compare strictly: these are two different strings.
/// let cmp = registry.resolve(ComparatorContext::new("title", NullOrdering::First));
/// assert!(!cmp
///     .compare(&Value::from("2021-04-09T00:00:00Z"), Op::Eq, &Value::from("2021-04-09"))
///     .unwrap());
/// ```
#[derive(Clone, Default)]
pub struct ComparatorRegistry {
    constructors: HashMap<String, ComparatorConstructor>,
}

impl ComparatorRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        ComparatorRegistry::default()
    }

    /// Registers a comparator constructor for `field`, replacing any
    /// previous registration.
    pub fn register<F>(&mut self, field: impl Into<String>, constructor: F) -> &mut Self
    where
        F: for<'a> Fn(ComparatorContext<'a>) -> Box<dyn Comparator + 'a> + Send + Sync + 'static,
    {
        self.constructors.insert(field.into(), Arc::new(constructor));
        self
    }

    /// Registers [`DateComparator`] for `field`.
    pub fn register_dates(&mut self, field: impl Into<String>) -> &mut Self {
        self.register(field, |ctx| Box::new(DateComparator::new(ctx)))
    }

    /// Builder form of [`register`](Self::register).
    pub fn with<F>(mut self, field: impl Into<String>, constructor: F) -> Self
    where
        F: for<'a> Fn(ComparatorContext<'a>) -> Box<dyn Comparator + 'a> + Send + Sync + 'static,
    {
        self.register(field, constructor);
        self
    }

    /// Builder form of [`register_dates`](Self::register_dates).
    pub fn with_dates(mut self, field: impl Into<String>) -> Self {
        self.register_dates(field);
        self
    }

    /// Returns `true` if `field` has a registered comparator.
    pub fn contains(&self, field: &str) -> bool {
        self.constructors.contains_key(field)
    }

    /// Returns the number of registered fields.
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Returns `true` if no field has a registered comparator.
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Returns the comparator for `context.target`.
    pub fn resolve<'a>(&self, context: ComparatorContext<'a>) -> Box<dyn Comparator + 'a> {
        match self.constructors.get(context.target) {
            Some(constructor) => constructor(context),
            None => Box::new(DefaultComparator::new(context)),
        }
    }
}

impl fmt::Debug for ComparatorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        fields.sort_unstable();
        f.debug_struct("ComparatorRegistry")
            .field("fields", &fields)
            .finish()
    }
}
