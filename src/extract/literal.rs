use std::fmt;

use crate::error::{validation::validate_range_order, FermiResult};

/// A numeric literal found in the source expression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiteralSpec {
    /// A fixed value, e.g. `365`
    Scalar(f64),
    /// An uncertainty range `low,high` with `low <= high`
    Range { low: f64, high: f64 },
}

impl LiteralSpec {
    /// Build a range literal, rejecting `low > high`.
    ///
    /// `source` is the literal text as written and only appears in the
    /// error message.
    pub fn range(low: f64, high: f64, source: &str) -> FermiResult<Self> {
        validate_range_order(low, high, source)?;
        Ok(LiteralSpec::Range { low, high })
    }

    pub fn is_range(&self) -> bool {
        matches!(self, LiteralSpec::Range { .. })
    }
}

impl fmt::Display for LiteralSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralSpec::Scalar(v) => write!(f, "{v}"),
            LiteralSpec::Range { low, high } => write!(f, "[{low}, {high}]"),
        }
    }
}

/// One row of a [`PlaceholderTable`].
#[derive(Debug, Clone, PartialEq)]
pub struct Placeholder {
    /// Synthetic identifier substituted into the rewritten expression
    pub name: String,
    /// The literal it stands for
    pub literal: LiteralSpec,
    /// The literal text as it appeared in the input
    pub source: String,
}

/// Placeholders in order of appearance, scanned left to right.
///
/// Every literal occurrence gets its own entry, even when two occurrences
/// share the same text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceholderTable {
    entries: Vec<Placeholder>,
}

impl PlaceholderTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, name: String, literal: LiteralSpec, source: String) {
        self.entries.push(Placeholder {
            name,
            literal,
            source,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placeholder> {
        self.entries.iter()
    }

    pub fn get(&self, name: &str) -> Option<&LiteralSpec> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.literal)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.name.as_str())
    }

    /// Number of range literals, i.e. points of actual uncertainty.
    pub fn range_count(&self) -> usize {
        self.entries.iter().filter(|e| e.literal.is_range()).count()
    }
}
