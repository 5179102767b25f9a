//! Session state: the history log plus the current result.
//!
//! A failed calculation leaves both untouched.

use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Serialize;

use crate::clipboard::ClipboardSink;
use crate::config::{Config, HistoryConfig, PlotConfig};
use crate::error::CalcError;
use crate::history::{History, HistoryEntry};
use crate::input::parse_operands;
use crate::operations::{Operation, Value};
use crate::plot::{self, Plot, PlotError, Renderer};

/// What produced a calculation.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Operation {
        operation: Operation,
        operands: Vec<f64>,
    },
    Expression(String),
}

/// A successful calculation: the result currently on display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Calculation {
    pub source: Source,
    pub value: Value,
    /// The history entry recorded for this calculation.
    pub description: String,
}

impl Calculation {
    fn from_operation(operation: Operation, operands: Vec<f64>, value: Value) -> Self {
        let description = operation.describe(&operands, &value);
        Self {
            source: Source::Operation {
                operation,
                operands,
            },
            value,
            description,
        }
    }

    fn from_expression(expression: &str, result: f64) -> Self {
        let value = Value::Real(result);
        let expression = expression.trim().to_string();
        Self {
            description: format!("{} = {}", expression, value),
            source: Source::Expression(expression),
            value,
        }
    }

    /// Heading shown above the result.
    pub fn title(&self) -> &str {
        match &self.source {
            Source::Operation { operation, .. } => operation.label(),
            Source::Expression(expression) => expression,
        }
    }

    /// The result formatted for display (with thousand separators).
    pub fn display_result(&self) -> String {
        self.value.display()
    }

    /// The result formatted for clipboard (raw number).
    pub fn text_for_clipboard(&self) -> String {
        self.value.clipboard()
    }
}

pub struct Session {
    history_config: HistoryConfig,
    plot_config: PlotConfig,
    history: History,
    current: Option<Calculation>,
}

impl Session {
    pub fn new(config: &Config) -> Self {
        Self {
            history_config: config.history.clone(),
            plot_config: config.plot.clone(),
            history: History::new(),
            current: None,
        }
    }

    /// Parse raw operands, run the operation and record the result.
    pub fn calculate(&mut self, operation: Operation, raw: &[&str]) -> Result<&Calculation, CalcError> {
        let operands = parse_operands(raw, operation.arity())?;
        self.calculate_values(operation, operands)
    }

    /// Run the operation on already-parsed operands and record the result.
    pub fn calculate_values(
        &mut self,
        operation: Operation,
        operands: Vec<f64>,
    ) -> Result<&Calculation, CalcError> {
        let value = operation.apply(&operands)?;
        Ok(self.record(Calculation::from_operation(operation, operands, value)))
    }

    /// Evaluate a free-form arithmetic expression and record the result.
    pub fn evaluate_expression(&mut self, expression: &str) -> Result<&Calculation, CalcError> {
        let result = plot::evaluate(expression).map_err(PlotError::into_calc_error)?;
        Ok(self.record(Calculation::from_expression(expression, result)))
    }

    fn record(&mut self, calculation: Calculation) -> &Calculation {
        tracing::debug!(entry = %calculation.description, "recording calculation");
        self.history
            .append(HistoryEntry::new(calculation.description.clone()));
        self.current.insert(calculation)
    }

    /// The most recent successful calculation, if any.
    pub fn current(&self) -> Option<&Calculation> {
        self.current.as_ref()
    }

    /// Forget the current result. The history is kept.
    pub fn clear_result(&mut self) {
        self.current = None;
    }

    /// The full calculation log.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Numbered history lines for display, newest first.
    pub fn recent(&self) -> Vec<String> {
        self.history.render_recent(self.history_config.display_limit)
    }

    /// Empty the history. The current result is kept.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Export the full history to `path`, or to the configured default.
    pub fn export_history(&self, path: Option<&Path>) -> Result<PathBuf> {
        let path = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.history_config.export_path.clone());
        self.history.export_to_file(&path)?;
        Ok(path)
    }

    /// Copy the current result; returns the copied text.
    pub fn copy_result(&self, clipboard: &mut impl ClipboardSink) -> Result<String> {
        let Some(current) = &self.current else {
            anyhow::bail!("No result to copy");
        };
        let text = current.text_for_clipboard();
        clipboard.set_text(&text)?;
        Ok(text)
    }

    /// Current plot range.
    pub fn plot_range(&self) -> (f64, f64) {
        (self.plot_config.start, self.plot_config.end)
    }

    pub fn set_plot_range(&mut self, start: f64, end: f64) -> Result<(), PlotError> {
        if !start.is_finite() || !end.is_finite() || start == end {
            return Err(PlotError::InvalidRange { start, end });
        }
        self.plot_config.start = start;
        self.plot_config.end = end;
        Ok(())
    }

    /// Sample `expression` (or the configured default) over the current range.
    /// Plots are not recorded in the history.
    pub fn plot(&self, expression: Option<&str>) -> Result<Plot, PlotError> {
        let expression = expression.unwrap_or(&self.plot_config.function);
        plot::sample(
            expression,
            self.plot_config.start,
            self.plot_config.end,
            self.plot_config.samples,
        )
    }

    pub fn renderer(&self) -> Renderer {
        Renderer::new(self.plot_config.style())
    }
}
