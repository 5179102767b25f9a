//! Tree-walking evaluator.
//!
//! Operations that are undefined somewhere go through the operation library
//! so that expressions and direct calculations fail the same way.

use super::parser::{BinOp, Expr, Function};
use crate::error::CalcError;
use crate::operations::arithmetic;

impl Expr {
    /// Evaluate with `x` bound to the given value.
    pub fn eval(&self, x: f64) -> Result<f64, CalcError> {
        match self {
            Self::Number(n) => Ok(*n),
            Self::Variable => Ok(x),
            Self::Constant(c) => Ok(c.value()),
            Self::Neg(inner) => Ok(-inner.eval(x)?),
            Self::Binary { op, left, right } => {
                let l = left.eval(x)?;
                let r = right.eval(x)?;
                match op {
                    BinOp::Add => Ok(arithmetic::add(l, r)),
                    BinOp::Sub => Ok(arithmetic::subtract(l, r)),
                    BinOp::Mul => Ok(arithmetic::multiply(l, r)),
                    BinOp::Div => arithmetic::divide(l, r),
                    BinOp::Mod => arithmetic::modulus(l, r),
                    BinOp::Pow => Ok(arithmetic::power(l, r)),
                }
            }
            Self::Call { func, arg } => {
                let v = arg.eval(x)?;
                match func {
                    Function::Sin => Ok(v.sin()),
                    Function::Cos => Ok(v.cos()),
                    Function::Tan => Ok(v.tan()),
                    Function::Sqrt => arithmetic::square_root(v),
                    Function::Abs => Ok(arithmetic::absolute(v)),
                    Function::Ln => arithmetic::logarithm(v),
                    Function::Exp => Ok(v.exp()),
                }
            }
        }
    }
}
