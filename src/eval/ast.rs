use std::fmt;

/// Binary arithmetic operators, applied element-wise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    /// Floored modulo; the result takes the sign of the divisor.
    Mod,
    Pow,
}

impl BinaryOperator {
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            BinaryOperator::Add => left + right,
            BinaryOperator::Sub => left - right,
            BinaryOperator::Mul => left * right,
            BinaryOperator::Div => left / right,
            BinaryOperator::Mod => {
                let r = left % right;
                if r != 0.0 && (r < 0.0) != (right < 0.0) {
                    r + right
                } else {
                    r
                }
            }
            BinaryOperator::Pow => left.powf(right),
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Mod => "%",
            BinaryOperator::Pow => "**",
        };
        write!(f, "{symbol}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    Neg,
    Plus,
}

/// The fixed set of element-wise functions an expression may call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Sqrt,
    Exp,
    /// Natural logarithm
    Log,
    Log10,
    Abs,
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(Builtin::Sqrt),
            "exp" => Some(Builtin::Exp),
            "log" => Some(Builtin::Log),
            "log10" => Some(Builtin::Log10),
            "abs" => Some(Builtin::Abs),
            _ => None,
        }
    }

    pub fn apply(self, x: f64) -> f64 {
        match self {
            Builtin::Sqrt => x.sqrt(),
            Builtin::Exp => x.exp(),
            Builtin::Log => x.ln(),
            Builtin::Log10 => x.log10(),
            Builtin::Abs => x.abs(),
        }
    }
}

/// Parsed form of a rewritten expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A numeric constant left in the expression
    Number(f64),
    /// Reference to a placeholder's sample array
    Placeholder(String),
    Unary {
        op: UnaryOperator,
        operand: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        op: BinaryOperator,
        right: Box<Expr>,
    },
    Call {
        function: Builtin,
        argument: Box<Expr>,
    },
}
