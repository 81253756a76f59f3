// src/error.rs
use std::fmt;

/// Errors raised while evaluating a rewritten expression.
///
/// These never reach the user directly; they are wrapped in
/// [`FermiError::Evaluation`] so that every evaluation failure shares one
/// message prefix.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    /// The lexer could not make sense of a piece of input
    InvalidCharacter { text: String },

    /// A token appeared where the grammar does not allow it
    UnexpectedToken { token: String },

    /// The expression ended in the middle of a construct
    UnexpectedEnd,

    /// A name that is neither a placeholder nor a builtin
    UnknownIdentifier { name: String },

    /// A call to something outside the builtin function set
    UnknownFunction { name: String },

    /// Two sample arrays of different lengths met in one operation
    LengthMismatch { left: usize, right: usize },

    /// Parentheses, signs or operators nested beyond the parser's limit
    TooDeep { limit: usize },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::InvalidCharacter { text } => {
                write!(f, "invalid syntax near '{}'", text)
            }
            EvalError::UnexpectedToken { token } => {
                write!(f, "invalid syntax: unexpected '{}'", token)
            }
            EvalError::UnexpectedEnd => write!(f, "unexpected end of expression"),
            EvalError::UnknownIdentifier { name } => write!(f, "name '{}' is not defined", name),
            EvalError::UnknownFunction { name } => write!(f, "function '{}' is not defined", name),
            EvalError::LengthMismatch { left, right } => write!(
                f,
                "operands could not be broadcast together with lengths {} and {}",
                left, right
            ),
            EvalError::TooDeep { limit } => {
                write!(f, "expression is nested more than {} levels deep", limit)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Custom error types for the fermi library
#[derive(Debug, Clone, PartialEq)]
pub enum FermiError {
    /// A range literal whose lower bound exceeds its upper bound
    RangeOrder {
        low: f64,
        high: f64,
        literal: String,
    },

    /// A comma survived literal extraction (e.g. a range with three values)
    MalformedRange,

    /// The spread derived from a non-degenerate range is not usable
    InvalidDistribution {
        variable: String,
        distribution: String,
    },

    /// The rewritten expression could not be parsed or evaluated
    Evaluation { cause: EvalError },

    /// Evaluation produced a single scalar instead of a sample array
    NotVectorized { expression: String },

    /// Invalid run configuration
    InvalidConfiguration { field: String, reason: String },

    /// A sample array does not have the requested length
    SampleLength { expected: usize, found: usize },
}

impl fmt::Display for FermiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FermiError::RangeOrder { low, high, literal } => write!(
                f,
                "lower bound {:?} is greater than upper bound {:?} in range '{}'",
                low, high, literal
            ),
            FermiError::MalformedRange => write!(
                f,
                "invalid character ',' in expression. Perhaps you provided a range with too many values?"
            ),
            FermiError::InvalidDistribution {
                variable,
                distribution,
            } => write!(
                f,
                "invalid range for {} distribution in variable '{}'",
                distribution, variable
            ),
            FermiError::Evaluation { cause } => {
                write!(f, "Error evaluating expression: {}", cause)
            }
            FermiError::NotVectorized { expression } => write!(
                f,
                "expression '{}' must evaluate to a sample array",
                expression
            ),
            FermiError::InvalidConfiguration { field, reason } => {
                write!(f, "Invalid configuration for '{}': {}", field, reason)
            }
            FermiError::SampleLength { expected, found } => write!(
                f,
                "expected {} samples per variable, found {}",
                expected, found
            ),
        }
    }
}

impl std::error::Error for FermiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FermiError::Evaluation { cause } => Some(cause),
            _ => None,
        }
    }
}

impl From<EvalError> for FermiError {
    fn from(cause: EvalError) -> Self {
        FermiError::Evaluation { cause }
    }
}

/// Result type alias for fermi operations
pub type FermiResult<T> = Result<T, FermiError>;

/// Validation utilities
pub mod validation {
    use super::{FermiError, FermiResult};

    /// Upper bound on the sample count; keeps memory use bounded.
    pub const MAX_SAMPLES: usize = 1_000_000_000;

    /// Validate the sample count
    pub fn validate_samples(samples: usize) -> FermiResult<()> {
        if samples == 0 {
            Err(FermiError::InvalidConfiguration {
                field: "samples".to_string(),
                reason: "must be greater than 0".to_string(),
            })
        } else if samples > MAX_SAMPLES {
            Err(FermiError::InvalidConfiguration {
                field: "samples".to_string(),
                reason: "exceeds maximum allowed (1 billion)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a range literal is ordered (`low <= high`)
    pub fn validate_range_order(low: f64, high: f64, literal: &str) -> FermiResult<()> {
        if low > high {
            Err(FermiError::RangeOrder {
                low,
                high,
                literal: literal.to_string(),
            })
        } else {
            Ok(())
        }
    }
}
