//! Function plotter.
//!
//! This module provides functionality to:
//! - Parse `f(x)` expressions against a fixed arithmetic grammar
//! - Sample them over a range
//! - Render the samples as a text chart, CSV or JSON

mod eval;
mod parser;
mod render;
mod token;

pub use parser::{BinOp, Constant, Expr, Function, parse};
pub use render::{PlotStyle, Renderer};
pub(crate) use token::{Token, tokenize};

use serde::Serialize;
use thiserror::Error;

use crate::error::CalcError;

/// Default number of samples per plot.
pub const DEFAULT_SAMPLES: usize = 400;

/// Upper bound on samples per plot.
pub const MAX_SAMPLES: usize = 100_000;

/// Deepest nesting of parentheses and unary signs an expression may use.
pub const MAX_DEPTH: usize = 256;


#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlotError {
    #[error("unexpected character '{ch}' at position {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{0}'")]
    InvalidNumber(String),

    #[error("unexpected {found} at position {pos}, expected {expected}")]
    UnexpectedToken {
        found: String,
        expected: String,
        pos: usize,
    },

    #[error("unknown name '{0}' (only x, pi and e are defined)")]
    UnknownIdentifier(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("{name}() takes exactly 1 argument, got {got}")]
    Arity { name: String, got: usize },

    #[error("expression depends on x")]
    FreeVariable,

    #[error("invalid range: from {start} to {end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("at least 2 samples are required, got {0}")]
    TooFewSamples(usize),

    #[error("at most {max} samples are allowed, got {got}")]
    TooManySamples { got: usize, max: usize },

    #[error("expression is nested more than {limit} levels deep")]
    TooDeep { limit: usize },

    #[error(transparent)]
    Eval(#[from] CalcError),
}

impl PlotError {
    /// Convert into the error kind reported at the calculator boundary.
    pub fn into_calc_error(self) -> CalcError {
        match self {
            Self::Eval(err) => err,
            other => CalcError::Input(other.to_string()),
        }
    }
}

/// One `(x, f(x))` pair. `y` is `None` where `f` is undefined or not finite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub x: f64,
    pub y: Option<f64>,
}

/// A sampled function.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plot {
    pub expression: String,
    pub start: f64,
    pub end: f64,
    pub samples: Vec<Sample>,
    /// First evaluation failure, if any sample was undefined.
    pub first_error: Option<String>,
}

impl Plot {
    /// Samples where the function is defined.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.samples.iter().filter_map(|s| s.y.map(|y| (s.x, y)))
    }

    /// Number of samples where the function is undefined.
    pub fn gaps(&self) -> usize {
        self.samples.iter().filter(|s| s.y.is_none()).count()
    }

    /// Samples as `x,y` lines under a header; gaps leave `y` empty.
    pub fn to_csv(&self) -> String {
        let mut out = String::from("x,y\n");
        for sample in &self.samples {
            match sample.y {
                Some(y) => out.push_str(&format!("{},{}\n", sample.x, y)),
                None => out.push_str(&format!("{},\n", sample.x)),
            }
        }
        out
    }
}

/// `count` evenly spaced values from `start` to `end`, both included.
pub fn linspace(start: f64, end: f64, count: usize) -> impl Iterator<Item = f64> {
    let step = if count > 1 {
        (end - start) / (count - 1) as f64
    } else {
        0.0
    };
    (0..count).map(move |i| {
        if i + 1 == count && count > 1 {
            end
        } else {
            start + step * i as f64
        }
    })
}

/// Sample `expression` over `[start, end]`.
///
/// Parse errors abort the whole plot. Evaluation failures at individual
/// samples leave a gap there instead.
pub fn sample(expression: &str, start: f64, end: f64, count: usize) -> Result<Plot, PlotError> {
    if !start.is_finite() || !end.is_finite() || start == end {
        return Err(PlotError::InvalidRange { start, end });
    }
    if count < 2 {
        return Err(PlotError::TooFewSamples(count));
    }
    if count > MAX_SAMPLES {
        return Err(PlotError::TooManySamples {
            got: count,
            max: MAX_SAMPLES,
        });
    }

    let expr = parse(expression)?;
    let mut first_error = None;
    let samples = linspace(start, end, count)
        .map(|x| {
            let y = match expr.eval(x) {
                Ok(y) if y.is_finite() => Some(y),
                Ok(_) => None,
                Err(err) => {
                    first_error.get_or_insert_with(|| format!("at x = {}: {}", x, err));
                    None
                }
            };
            Sample { x, y }
        })
        .collect();

    let plot = Plot {
        expression: expression.trim().to_string(),
        start,
        end,
        samples,
        first_error,
    };
    tracing::debug!(
        expression = %plot.expression,
        samples = plot.samples.len(),
        gaps = plot.gaps(),
        "sampled function"
    );
    Ok(plot)
}

/// Evaluate an expression that does not mention `x`.
pub fn evaluate(expression: &str) -> Result<f64, PlotError> {
    let expr = parse(expression)?;
    if expr.has_variable() {
        return Err(PlotError::FreeVariable);
    }
    Ok(expr.eval(0.0)?)
}
