//! Operation library.
//!
//! Pure functions live in [`arithmetic`] and [`number_theory`]. [`Operation`]
//! names every user-facing operation and dispatches raw operands to them.

pub mod arithmetic;
pub mod number_theory;

use std::fmt;

use clap::ValueEnum;
use dashu::integer::UBig;
use serde::{Serialize, Serializer};

use crate::error::{CalcError, Result};
use crate::format::{format_clipboard, format_display, format_real, group_digits};

pub use arithmetic::Trig;

/// Result of one operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Real(f64),
    /// Exact integer result (factorial, GCD, LCM).
    Integer(#[serde(serialize_with = "serialize_display")] UBig),
    /// A ratio expressed in percent.
    Percent(f64),
    Flag(bool),
    Trig(Trig),
}

impl Value {
    /// Text shown as the current result, with thousand separators.
    pub fn display(&self) -> String {
        match self {
            Self::Real(v) => format_display(*v),
            Self::Integer(n) => group_digits(&n.to_string()),
            Self::Percent(v) => format!("{}%", format_display(*v)),
            Self::Flag(true) => "∞ Infinite".to_string(),
            Self::Flag(false) => "Finite".to_string(),
            Self::Trig(t) => format!(
                "sin = {:.6}, cos = {:.6}, tan = {:.6}",
                t.sin, t.cos, t.tan
            ),
        }
    }

    /// Text copied to the clipboard (raw numbers, no separators).
    pub fn clipboard(&self) -> String {
        match self {
            Self::Real(v) => format_clipboard(*v),
            Self::Integer(n) => n.to_string(),
            Self::Percent(v) => format!("{}%", format_clipboard(*v)),
            Self::Flag(_) => self.display(),
            Self::Trig(t) => format!(
                "{}\t{}\t{}",
                format_clipboard(t.sin),
                format_clipboard(t.cos),
                format_clipboard(t.tan)
            ),
        }
    }
}

/// Text used inside history entries.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(v) => f.write_str(&format_real(*v)),
            Self::Integer(n) => write!(f, "{}", n),
            Self::Percent(v) => write!(f, "{}%", format_real(*v)),
            Self::Flag(_) => f.write_str(&self.display()),
            Self::Trig(t) => write!(
                f,
                "sin: {}, cos: {}, tan: {}",
                format_real(t.sin),
                format_real(t.cos),
                format_real(t.tan)
            ),
        }
    }
}

fn serialize_display<S: Serializer>(value: &UBig, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

/// Every operation a front-end can invoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    #[value(alias = "mod")]
    Modulus,
    #[value(alias = "pow")]
    Power,
    Sqrt,
    /// Natural logarithm.
    #[value(alias = "ln")]
    Log,
    Factorial,
    Abs,
    Round,
    Percentage,
    /// Sine, cosine and tangent of an angle in radians.
    Trig,
    IsInf,
    Gcd,
    Lcm,
    Pi,
    E,
}

impl Operation {
    pub const ALL: [Operation; 18] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulus,
        Self::Power,
        Self::Sqrt,
        Self::Log,
        Self::Factorial,
        Self::Abs,
        Self::Round,
        Self::Percentage,
        Self::Trig,
        Self::IsInf,
        Self::Gcd,
        Self::Lcm,
        Self::Pi,
        Self::E,
    ];

    /// Look an operation up by its command name or alias.
    pub fn from_name(name: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(name, true).ok()
    }

    /// Command name, as accepted by [`Operation::from_name`].
    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Modulus => "modulus",
            Self::Power => "power",
            Self::Sqrt => "sqrt",
            Self::Log => "log",
            Self::Factorial => "factorial",
            Self::Abs => "abs",
            Self::Round => "round",
            Self::Percentage => "percentage",
            Self::Trig => "trig",
            Self::IsInf => "is-inf",
            Self::Gcd => "gcd",
            Self::Lcm => "lcm",
            Self::Pi => "pi",
            Self::E => "e",
        }
    }

    /// Human-readable label used in results and history entries.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Add => "Addition",
            Self::Subtract => "Subtraction",
            Self::Multiply => "Multiplication",
            Self::Divide => "Division",
            Self::Modulus => "Modulus",
            Self::Power => "Power",
            Self::Sqrt => "Square Root",
            Self::Log => "Natural Logarithm",
            Self::Factorial => "Factorial",
            Self::Abs => "Absolute Value",
            Self::Round => "Rounded Value",
            Self::Percentage => "Percentage",
            Self::Trig => "Trig functions",
            Self::IsInf => "Infinity Check",
            Self::Gcd => "GCD",
            Self::Lcm => "LCM",
            Self::Pi => "π",
            Self::E => "e",
        }
    }

    /// Number of operands the operation takes.
    pub fn arity(&self) -> usize {
        match self {
            Self::Pi | Self::E => 0,
            Self::Sqrt
            | Self::Log
            | Self::Factorial
            | Self::Abs
            | Self::Round
            | Self::Trig
            | Self::IsInf => 1,
            Self::Add
            | Self::Subtract
            | Self::Multiply
            | Self::Divide
            | Self::Modulus
            | Self::Power
            | Self::Percentage
            | Self::Gcd
            | Self::Lcm => 2,
        }
    }

    /// Run the operation on already-parsed operands.
    pub fn apply(&self, operands: &[f64]) -> Result<Value> {
        if operands.len() != self.arity() {
            return Err(CalcError::input(format!(
                "{} expects {} operand(s), got {}",
                self.label(),
                self.arity(),
                operands.len()
            )));
        }
        tracing::debug!(operation = self.name(), ?operands, "applying operation");

        let a = operands.first().copied().unwrap_or_default();
        let b = operands.get(1).copied().unwrap_or_default();

        let value = match self {
            Self::Add => Value::Real(arithmetic::add(a, b)),
            Self::Subtract => Value::Real(arithmetic::subtract(a, b)),
            Self::Multiply => Value::Real(arithmetic::multiply(a, b)),
            Self::Divide => Value::Real(arithmetic::divide(a, b)?),
            Self::Modulus => Value::Real(arithmetic::modulus(a, b)?),
            Self::Power => Value::Real(arithmetic::power(a, b)),
            Self::Sqrt => Value::Real(arithmetic::square_root(a)?),
            Self::Log => Value::Real(arithmetic::logarithm(a)?),
            Self::Factorial => Value::Integer(number_theory::factorial(a)?),
            Self::Abs => Value::Real(arithmetic::absolute(a)),
            Self::Round => Value::Real(arithmetic::round(a)),
            Self::Percentage => Value::Percent(arithmetic::percentage(a, b)?),
            Self::Trig => Value::Trig(arithmetic::trig_functions(a)),
            Self::IsInf => Value::Flag(arithmetic::is_infinity(a)),
            Self::Gcd => Value::Integer(number_theory::gcd(a, b)?),
            Self::Lcm => Value::Integer(number_theory::lcm(a, b)?),
            Self::Pi => Value::Real(std::f64::consts::PI),
            Self::E => Value::Real(std::f64::consts::E),
        };
        Ok(value)
    }

    /// Describe one successful invocation as a history entry.
    pub fn describe(&self, operands: &[f64], value: &Value) -> String {
        let result = match (self, value) {
            (Self::Log, Value::Real(v)) => format!("{:.6}", v),
            (Self::Pi | Self::E, Value::Real(v)) => format!("{:.10}", v),
            _ => value.to_string(),
        };

        match (self, operands) {
            (Self::Pi | Self::E, _) => format!("{} constant = {}", self.label(), result),
            // Integer operations show the operands they actually used.
            (Self::Gcd | Self::Lcm, [a, b]) => {
                format!("{} {} {} = {}", a.trunc(), self.label(), b.trunc(), result)
            }
            (Self::Factorial, [a]) => format!("{}({}) = {}", self.label(), a, result),
            (_, [a, b]) => format!(
                "{} {} {} = {}",
                format_real(*a),
                self.label(),
                format_real(*b),
                result
            ),
            (_, [a]) => format!("{}({}) = {}", self.label(), format_real(*a), result),
            _ => format!("{} = {}", self.label(), result),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
