//! MathMaster: a calculator with a calculation history and a function plotter.
//!
//! The [`operations`] library does the math, [`session::Session`] keeps the
//! history and current result, and [`plot`] samples user-supplied functions
//! through a restricted arithmetic grammar.

pub mod clipboard;
pub mod config;
pub mod error;
pub mod format;
pub mod history;
pub mod input;
pub mod operations;
pub mod plot;
pub mod repl;
pub mod session;

pub use error::CalcError;
pub use history::{History, HistoryEntry};
pub use operations::{Operation, Value};
pub use session::{Calculation, Session};
