//! Vectorized Evaluation
//!
//! Evaluates a rewritten expression once, with every placeholder bound to
//! its whole sample array, instead of once per sample:
//!
//! ```text
//! "var0 * var1"   var0 = [x₀, x₁, …]   var1 = [y₀, y₁, …]
//!              -> [x₀·y₀, x₁·y₁, …]
//! ```
//!
//! The only names an expression can reach are the placeholders of the
//! current run and a handful of element-wise builtins (`sqrt`, `exp`,
//! `log`, `log10`, `abs`). There is no general call mechanism and nothing
//! else to resolve, so the untrusted input cannot touch anything outside
//! the arithmetic.

pub mod ast;
pub mod parser;
pub mod value;

use log::debug;
use ndarray::Array1;

use crate::error::{EvalError, FermiError, FermiResult};
use crate::sampler::SampleSet;
use ast::{Expr, UnaryOperator};
pub use value::Value;

/// Rewrite the caret operator into the native power operator `**`.
pub fn rewrite_power(expression: &str) -> String {
    expression.replace('^', "**")
}

/// Evaluate `rewritten` element-wise over `samples`.
///
/// Non-finite results (division by zero, overflow) are kept as they are.
///
/// # Errors
///
/// - [`FermiError::Evaluation`] if the expression cannot be lexed or parsed,
///   or names something other than a placeholder or builtin.
/// - [`FermiError::NotVectorized`] if the result is a single scalar.
pub fn evaluate(rewritten: &str, samples: &SampleSet) -> FermiResult<Array1<f64>> {
    let source = rewrite_power(rewritten);
    let tokens = parser::tokenize(&source)?;
    let expr = parser::parse(&tokens)?;
    debug!("evaluating '{}' over {} sample(s)", source, samples.samples());

    match Interpreter::new(samples).eval(&expr)? {
        Value::Array(result) => Ok(result),
        Value::Scalar(_) => Err(FermiError::NotVectorized {
            expression: rewritten.to_string(),
        }),
    }
}

/// Tree-walking interpreter over one [`SampleSet`].
pub struct Interpreter<'a> {
    samples: &'a SampleSet,
}

impl<'a> Interpreter<'a> {
    pub fn new(samples: &'a SampleSet) -> Self {
        Self { samples }
    }

    pub fn eval(&self, expr: &Expr) -> Result<Value, EvalError> {
        match expr {
            Expr::Number(v) => Ok(Value::Scalar(*v)),
            Expr::Placeholder(name) => self
                .samples
                .get(name)
                .map(|array| Value::Array(array.clone()))
                .ok_or_else(|| EvalError::UnknownIdentifier { name: name.clone() }),
            Expr::Unary { op, operand } => {
                let value = self.eval(operand)?;
                Ok(match op {
                    UnaryOperator::Neg => value.map(|x| -x),
                    UnaryOperator::Plus => value,
                })
            }
            Expr::Binary { left, op, right } => {
                Value::binary(*op, self.eval(left)?, self.eval(right)?)
            }
            Expr::Call { function, argument } => {
                Ok(self.eval(argument)?.map(|x| function.apply(x)))
            }
        }
    }
}
