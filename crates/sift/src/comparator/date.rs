//! Comparator for fields holding dates encoded as strings.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::{Comparator, ComparatorContext, HookResult, OperandError};
use crate::value::{Timestamp, Value};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%b %d %Y %H:%M:%S",
    "%B %d %Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%b %d %Y", "%B %d %Y"];

const WEEKDAYS: &[&str] = &[
    "mon", "tue", "wed", "thu", "fri", "sat", "sun", "monday", "tuesday", "wednesday",
    "thursday", "friday", "saturday", "sunday",
];

/// Parses a string-encoded date into a [`Timestamp`].
///
/// Accepted forms, tried in order:
/// - RFC 3339 (`2021-04-09T22:28:29.954Z`)
/// - RFC 2822 (`Fri, 09 Apr 2021 22:28:29 +0000`)
/// - naive date-times (`2021-04-09T22:28:29`, `2021-04-09 22:28:29.5`)
/// - `Apr 9 2021 22:28:29`, optionally led by a weekday name
/// - dates (`2021-04-09`, `Apr 9 2021`, `Sat Apr 9 2021`)
///
/// Inputs without an offset are read as UTC; date-only inputs mean midnight
/// UTC. A leading weekday name is ignored rather than checked against the
/// date.
///
/// ```
/// use sift::{parse_date, Timestamp};
///
/// assert_eq!(parse_date("1970-01-02"), Some(Timestamp::from_secs(86_400)));
/// assert_eq!(parse_date("Fri Jan 2 1970"), Some(Timestamp::from_secs(86_400)));
/// assert_eq!(parse_date("yesterday"), None);
/// ```
pub fn parse_date(input: &str) -> Option<Timestamp> {
    let input = input.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(Timestamp::from(dt));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(Timestamp::from(dt));
    }

    let input = strip_weekday(input);
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(input, format) {
            return Some(Timestamp::from(dt.and_utc()));
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|dt| Timestamp::from(dt.and_utc()));
        }
    }
    None
}

fn strip_weekday(input: &str) -> &str {
    match input.split_once(char::is_whitespace) {
        Some((head, rest))
            if WEEKDAYS
                .iter()
                .any(|day| head.trim_end_matches(',').eq_ignore_ascii_case(day)) =>
        {
            rest.trim_start()
        }
        _ => input,
    }
}

/// Compares dates given as strings, timestamps, or epoch milliseconds.
///
/// Both operands are converted to a [`Timestamp`] before `==`, `<` or `>`
/// is applied, so `"2021-04-09T22:28:29.954Z" > "Sat Apr 9 2021"` holds.
/// Any other operand fails the comparison with
/// [`QueryError::Comparison`](crate::QueryError::Comparison).
///
/// ```
/// use sift::{ComparatorRegistry, DateComparator};
///
/// let mut registry = ComparatorRegistry::new();
/// registry.register("createdAt", |ctx| Box::new(DateComparator::new(ctx)));
/// assert!(registry.contains("createdAt"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DateComparator<'a> {
    context: ComparatorContext<'a>,
}

impl<'a> DateComparator<'a> {
    pub fn new(context: ComparatorContext<'a>) -> Self {
        DateComparator { context }
    }

    fn timestamp(&self, value: &Value<'_>) -> Result<Timestamp, OperandError> {
        match value {
            Value::Timestamp(t) => Ok(*t),
            Value::Number(n) => n
                .as_i64()
                .map(Timestamp::from_millis)
                .ok_or_else(|| OperandError::new(value, "not a whole number of milliseconds")),
            Value::String(s) => {
                parse_date(s).ok_or_else(|| OperandError::new(value, "unrecognized date format"))
            }
            other => Err(OperandError::new(
                other,
                format!("expected a date, got a {} value", other.kind()),
            )),
        }
    }
}

impl Comparator for DateComparator<'_> {
    fn context(&self) -> &ComparatorContext<'_> {
        &self.context
    }

    fn equals(&self, left: &Value<'_>, right: &Value<'_>) -> HookResult {
        Ok(self.timestamp(left)? == self.timestamp(right)?)
    }

    fn less_than(&self, left: &Value<'_>, right: &Value<'_>) -> HookResult {
        Ok(self.timestamp(left)? < self.timestamp(right)?)
    }

    fn greater_than(&self, left: &Value<'_>, right: &Value<'_>) -> HookResult {
        Ok(self.timestamp(left)? > self.timestamp(right)?)
    }
}
