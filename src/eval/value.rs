use ndarray::{Array1, Zip};

use crate::{error::EvalError, eval::ast::BinaryOperator};

/// An intermediate evaluation result.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A constant, broadcast against arrays when combined with them
    Scalar(f64),
    /// One value per Monte Carlo sample
    Array(Array1<f64>),
}

impl Value {
    /// Applies `op` element-wise, broadcasting scalars over arrays.
    ///
    /// # Errors
    /// `LengthMismatch` if both operands are arrays of different lengths.
    pub fn binary(op: BinaryOperator, left: Self, right: Self) -> Result<Self, EvalError> {
        match (left, right) {
            (Value::Scalar(a), Value::Scalar(b)) => Ok(Value::Scalar(op.apply(a, b))),
            (Value::Array(a), Value::Scalar(b)) => Ok(Value::Array(a.mapv_into(|x| op.apply(x, b)))),
            (Value::Scalar(a), Value::Array(b)) => Ok(Value::Array(b.mapv_into(|y| op.apply(a, y)))),
            (Value::Array(mut a), Value::Array(b)) => {
                if a.len() != b.len() {
                    return Err(EvalError::LengthMismatch {
                        left: a.len(),
                        right: b.len(),
                    });
                }
                Zip::from(&mut a)
                    .and(&b)
                    .for_each(|x, &y| *x = op.apply(*x, y));
                Ok(Value::Array(a))
            }
        }
    }

    /// Applies `f` to every element.
    pub fn map<F>(self, f: F) -> Self
    where
        F: Fn(f64) -> f64,
    {
        match self {
            Value::Scalar(x) => Value::Scalar(f(x)),
            Value::Array(a) => Value::Array(a.mapv_into(f)),
        }
    }
}
