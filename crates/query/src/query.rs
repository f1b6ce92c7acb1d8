//! Query composition and record filtering

use crate::constraint::{parse, PredicateDescriptor};
use crate::evaluator::evaluate;
use serde::{Deserialize, Serialize};
use simdb_meta_core::{FlatEntry, Result};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

/// Conjunction of predicates
///
/// An empty query matches every record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    predicates: Vec<PredicateDescriptor>,
}

impl Query {
    /// Create an empty query
    pub fn new() -> Self {
        Query {
            predicates: Vec::new(),
        }
    }

    /// Add a predicate (builder pattern)
    pub fn with(mut self, predicate: PredicateDescriptor) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Add a predicate
    pub fn push(&mut self, predicate: PredicateDescriptor) {
        self.predicates.push(predicate);
    }

    /// The predicates, in evaluation order
    pub fn predicates(&self) -> &[PredicateDescriptor] {
        &self.predicates
    }

    /// Number of predicates
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    /// Check if the query has no predicates
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluate against one record's entries
    ///
    /// Stops at the first predicate that does not hold; later predicates are
    /// not evaluated and cannot raise.
    pub fn matches(&self, entries: &[FlatEntry]) -> Result<bool> {
        for predicate in &self.predicates {
            if !evaluate(predicate, entries)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl FromIterator<PredicateDescriptor> for Query {
    fn from_iter<I: IntoIterator<Item = PredicateDescriptor>>(iter: I) -> Self {
        Query {
            predicates: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, predicate) in self.predicates.iter().enumerate() {
            if i > 0 {
                f.write_str(" & ")?;
            }
            write!(f, "{}", predicate)?;
        }
        Ok(())
    }
}

/// Parse every constraint into one query
///
/// Fails on the first malformed constraint.
pub fn parse_all<I, S>(raws: I) -> Result<Query>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raws.into_iter().map(|raw| parse(raw.as_ref())).collect()
}

/// Ids of the records whose entries satisfy `query`, in input order
///
/// # Errors
///
/// Any evaluation error aborts the whole call; no partial result is returned.
pub fn filter_records<'a, I>(query: &Query, records: I) -> Result<Vec<Uuid>>
where
    I: IntoIterator<Item = (Uuid, &'a [FlatEntry])>,
{
    let mut matched = Vec::new();
    let mut scanned = 0usize;
    for (id, entries) in records {
        scanned += 1;
        if query.matches(entries)? {
            matched.push(id);
        }
    }
    debug!(query = %query, scanned, matched = matched.len(), "filtered records");
    Ok(matched)
}
