//! Errors raised by the operation library and the input boundary.

use thiserror::Error;

/// Why a calculation could not be carried out.
///
/// All variants are recoverable: the caller reports the message and the
/// session carries on unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Non-numeric or wrong-arity user input, caught before any operation runs.
    #[error("Input error: {0}")]
    Input(String),

    /// The operation is mathematically undefined for the given input.
    #[error("Math error: {0}")]
    Domain(String),

    /// A divisor (or percentage total) was zero.
    #[error("Math error: {0}")]
    DivisionByZero(String),
}

impl CalcError {
    pub(crate) fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    pub(crate) fn domain(msg: impl Into<String>) -> Self {
        Self::Domain(msg.into())
    }

    pub(crate) fn division_by_zero(msg: impl Into<String>) -> Self {
        Self::DivisionByZero(msg.into())
    }

    /// Whether this error came from the operation library rather than the input boundary.
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_) | Self::DivisionByZero(_))
    }
}

pub type Result<T, E = CalcError> = std::result::Result<T, E>;
