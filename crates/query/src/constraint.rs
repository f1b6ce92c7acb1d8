//! Constraint parsing
//!
//! A constraint is the text `field=[modifier:]operand`:
//!
//! | Token | Modifier | Meaning |
//! |-------|----------|---------|
//! | `eq` (default) | [`Modifier::Eq`] | equal |
//! | `ne` | [`Modifier::Ne`] | not equal |
//! | `in` | [`Modifier::Contains`] | operand is a substring |
//! | `ni` | [`Modifier::NotContains`] | operand is not a substring |
//! | `gt` `ge` `lt` `le` | ordering | numeric comparison |
//! | `exist` | [`Modifier::Exists`] | field present; operand ignored |
//!
//! The text is split at the first `=`. What precedes the first `:` of the
//! remainder is a modifier only when it is a known token, so operands may
//! contain colons (`date=2020-01-01T10:00`). An alphabetic prefix that is not
//! a token is an error rather than a silent equality test.

use serde::{Deserialize, Serialize};
use simdb_meta_core::{Error, Path, Result};
use std::fmt;

/// Comparison operator of a constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Modifier {
    /// Equal
    Eq,
    /// Not equal
    Ne,
    /// Substring match
    Contains,
    /// Negated substring match
    NotContains,
    /// Greater than
    Gt,
    /// Greater than or equal
    Ge,
    /// Less than
    Lt,
    /// Less than or equal
    Le,
    /// Field is present and not missing
    Exists,
}

impl Modifier {
    /// All modifiers in declaration order
    pub const ALL: [Modifier; 9] = [
        Modifier::Eq,
        Modifier::Ne,
        Modifier::Contains,
        Modifier::NotContains,
        Modifier::Gt,
        Modifier::Ge,
        Modifier::Lt,
        Modifier::Le,
        Modifier::Exists,
    ];

    /// Token used in constraint text
    pub fn token(&self) -> &'static str {
        match self {
            Modifier::Eq => "eq",
            Modifier::Ne => "ne",
            Modifier::Contains => "in",
            Modifier::NotContains => "ni",
            Modifier::Gt => "gt",
            Modifier::Ge => "ge",
            Modifier::Lt => "lt",
            Modifier::Le => "le",
            Modifier::Exists => "exist",
        }
    }

    /// Look up a modifier by its token (case-sensitive)
    pub fn from_token(token: &str) -> Option<Modifier> {
        Modifier::ALL.into_iter().find(|m| m.token() == token)
    }

    /// Check if this is one of the numeric ordering modifiers
    pub fn is_ordering(&self) -> bool {
        matches!(self, Modifier::Gt | Modifier::Ge | Modifier::Lt | Modifier::Le)
    }

    /// Check if this modifier uses an operand
    pub fn takes_operand(&self) -> bool {
        !matches!(self, Modifier::Exists)
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Parsed, typed form of one constraint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredicateDescriptor {
    /// Field pattern, matched against entry paths
    pub field: Path,
    /// Comparison operator
    pub modifier: Modifier,
    /// Operand text; `None` for `Exists`
    pub operand: Option<String>,
}

impl PredicateDescriptor {
    /// Build a descriptor directly
    ///
    /// The operand is dropped for `Exists`.
    pub fn new(field: Path, modifier: Modifier, operand: impl Into<String>) -> Self {
        let operand = modifier.takes_operand().then(|| operand.into());
        PredicateDescriptor {
            field,
            modifier,
            operand,
        }
    }

    /// Build an `Exists` descriptor
    pub fn exists(field: Path) -> Self {
        PredicateDescriptor {
            field,
            modifier: Modifier::Exists,
            operand: None,
        }
    }

    /// Operand text, empty when absent
    pub fn operand_str(&self) -> &str {
        self.operand.as_deref().unwrap_or("")
    }
}

impl fmt::Display for PredicateDescriptor {
    /// Canonical constraint text; parses back to the same descriptor
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}:{}", self.field, self.modifier, self.operand_str())
    }
}

impl std::str::FromStr for PredicateDescriptor {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        parse(s)
    }
}

/// Parse one constraint
///
/// # Examples
///
/// ```
/// use simdb_meta_query::{parse, Modifier};
///
/// let p = parse("pulse=gt:1000").unwrap();
/// assert_eq!(p.modifier, Modifier::Gt);
/// assert_eq!(p.operand.as_deref(), Some("1000"));
///
/// let p = parse("workflow.name=Test-Run").unwrap();
/// assert_eq!(p.modifier, Modifier::Eq);
/// ```
///
/// # Errors
///
/// `MalformedConstraint` when there is no `=`, the field is empty or not a
/// valid path, or the modifier prefix is alphabetic but unknown.
pub fn parse(raw: &str) -> Result<PredicateDescriptor> {
    let Some((field, rest)) = raw.split_once('=') else {
        return Err(Error::malformed(raw, "missing '=' separator"));
    };
    if field.is_empty() {
        return Err(Error::malformed(raw, "empty field name"));
    }
    let field = Path::decode(field)
        .map_err(|e| Error::malformed(raw, format!("invalid field name: {}", e)))?;

    let (modifier, operand) = match rest.split_once(':') {
        Some((token, operand)) => match Modifier::from_token(token) {
            Some(modifier) => (modifier, operand),
            None if is_word(token) => {
                return Err(Error::malformed(
                    raw,
                    format!("unknown modifier '{}'", token),
                ))
            }
            None => (Modifier::Eq, rest),
        },
        None => (Modifier::Eq, rest),
    };

    Ok(PredicateDescriptor::new(field, modifier, operand))
}

fn is_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic())
}
