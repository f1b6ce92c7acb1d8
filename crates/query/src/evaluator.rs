//! Predicate evaluation over one record's flat entries
//!
//! ## Field matching
//!
//! The field pattern selects an entry when its segments equal the leading or
//! the trailing segments of the entry path. A plain pattern segment selects a
//! key at any list index; an indexed one selects only that element:
//!
//! | Pattern | Entry | Selected |
//! |---------|-------|----------|
//! | `workflow.name` | `workflow.name` | yes |
//! | `codes` | `codes#2.commit` | yes (leading) |
//! | `commit` | `codes#2.commit` | yes (trailing) |
//! | `codes#1.commit` | `codes#2.commit` | no |
//!
//! ## Comparison
//!
//! A predicate holds when any selected entry satisfies it. `Missing` entries
//! never satisfy a comparison and never raise.
//!
//! - `eq`/`ne`: case-insensitive against the canonical string form for
//!   strings, numbers and booleans (`1500` is not `1500.0`); exact for UUIDs
//!   (hyphenated or simple lowercase form)
//! - `in`/`ni`: case-insensitive substring of the canonical string form
//! - `gt`/`ge`/`lt`/`le`: numeric only; a non-numeric operand or selected
//!   value is a `TypeMismatch`
//! - `exist`: some selected entry is present

use crate::constraint::{Modifier, PredicateDescriptor};
use simdb_meta_core::{Error, FlatEntry, Path, Result, Value};
use std::cmp::Ordering;
use tracing::trace;

/// Entries selected by a field pattern, in input order
pub fn matching_entries<'a>(
    field: &'a Path,
    entries: &'a [FlatEntry],
) -> impl Iterator<Item = &'a FlatEntry> + 'a {
    entries
        .iter()
        .filter(move |e| e.path.starts_with_pattern(field) || e.path.ends_with_pattern(field))
}

/// Evaluate one predicate against a record's entries
///
/// # Errors
///
/// `TypeMismatch` for an ordering modifier whose operand is not a number or
/// whose selected entries include a present non-numeric value.
pub fn evaluate(predicate: &PredicateDescriptor, entries: &[FlatEntry]) -> Result<bool> {
    let present: Vec<&FlatEntry> = matching_entries(&predicate.field, entries)
        .filter(|e| !e.value.is_missing())
        .collect();
    let operand = predicate.operand_str();

    let result = match predicate.modifier {
        Modifier::Exists => !present.is_empty(),
        Modifier::Eq => present.iter().any(|e| equals(&e.value, operand)),
        Modifier::Ne => present.iter().any(|e| !equals(&e.value, operand)),
        Modifier::Contains => present.iter().any(|e| contains(&e.value, operand)),
        Modifier::NotContains => present.iter().any(|e| !contains(&e.value, operand)),
        Modifier::Gt | Modifier::Ge | Modifier::Lt | Modifier::Le => {
            let number = Number::parse(operand).ok_or_else(|| {
                Error::type_mismatch(
                    predicate.field.encode(),
                    format!("operand '{}' is not a number", operand),
                )
            })?;
            // every selected value must be numeric before answering
            let mut orderings = Vec::with_capacity(present.len());
            for entry in &present {
                match number.compare(&entry.value) {
                    Some(ordering) => orderings.push(ordering),
                    None if entry.value.is_numeric() => {}
                    None => {
                        return Err(Error::type_mismatch(
                            predicate.field.encode(),
                            format!(
                                "{} value at '{}' cannot be compared numerically",
                                entry.value.type_name(),
                                entry.path
                            ),
                        ))
                    }
                }
            }
            orderings
                .into_iter()
                .any(|ordering| ordering_satisfies(predicate.modifier, ordering))
        }
    };

    trace!(predicate = %predicate, selected = present.len(), result, "evaluated predicate");
    Ok(result)
}

fn ordering_satisfies(modifier: Modifier, ordering: Ordering) -> bool {
    match modifier {
        Modifier::Gt => ordering == Ordering::Greater,
        Modifier::Ge => ordering != Ordering::Less,
        Modifier::Lt => ordering == Ordering::Less,
        Modifier::Le => ordering != Ordering::Greater,
        _ => false,
    }
}

fn equals(value: &Value, operand: &str) -> bool {
    match value {
        Value::String(_) | Value::Integer(_) | Value::Float(_) | Value::Boolean(_) => value
            .canonical_string()
            .is_some_and(|s| s.to_lowercase() == operand.to_lowercase()),
        Value::Uuid(u) => {
            operand == u.hyphenated().to_string() || operand == u.simple().to_string()
        }
        Value::Missing => false,
    }
}

fn contains(value: &Value, operand: &str) -> bool {
    value
        .canonical_string()
        .is_some_and(|s| s.to_lowercase().contains(&operand.to_lowercase()))
}

/// Numeric operand, keeping the exact integer when there is one
#[derive(Debug, Clone, Copy)]
struct Number {
    int: Option<i64>,
    float: f64,
}

impl Number {
    /// Parse a finite number; `nan` and `inf` are not numbers here
    fn parse(text: &str) -> Option<Number> {
        if let Ok(i) = text.parse::<i64>() {
            return Some(Number {
                int: Some(i),
                float: i as f64,
            });
        }
        text.parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(|f| Number { int: None, float: f })
    }

    /// Order `value` relative to this operand; `None` if not numeric or NaN
    fn compare(&self, value: &Value) -> Option<Ordering> {
        match (value, self.int) {
            (Value::Integer(v), Some(i)) => Some(v.cmp(&i)),
            (Value::Integer(v), None) => (*v as f64).partial_cmp(&self.float),
            (Value::Float(v), _) => v.partial_cmp(&self.float),
            _ => None,
        }
    }
}
