//! Interactive line session.
//!
//! Each input line is one user action. Errors are reported and the session
//! carries on.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use crate::clipboard::ClipboardSink;
use crate::error::CalcError;
use crate::input::{looks_like_expression, parse_operand};
use crate::operations::Operation;
use crate::session::{Calculation, Session};

const PROMPT: &str = "> ";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Calculate {
        operation: Operation,
        operands: Vec<String>,
    },
    Expression(String),
    History,
    Clear,
    Export(Option<PathBuf>),
    Copy,
    Plot(Option<String>),
    Range(String, String),
    Reset,
    Help,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CalcError> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Ok(Self::Empty);
        };
        let rest: Vec<&str> = words.collect();
        let tail = line[first.len()..].trim();

        let command = match first.to_lowercase().as_str() {
            "history" => Self::History,
            "clear" => Self::Clear,
            "export" => Self::Export((!tail.is_empty()).then(|| PathBuf::from(tail))),
            "copy" => Self::Copy,
            "plot" => Self::Plot((!tail.is_empty()).then(|| tail.to_string())),
            "range" => match rest.as_slice() {
                [start, end] => Self::Range(start.to_string(), end.to_string()),
                _ => return Err(CalcError::input("usage: range <start> <end>")),
            },
            "reset" => Self::Reset,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            name => {
                let operation = Operation::from_name(name);
                let numeric_args = rest.iter().all(|w| parse_operand(w).is_ok());
                match operation {
                    Some(operation) if numeric_args => Self::Calculate {
                        operation,
                        operands: rest.iter().map(|w| w.to_string()).collect(),
                    },
                    _ if looks_like_expression(line) => Self::Expression(line.to_string()),
                    Some(operation) => Self::Calculate {
                        operation,
                        operands: rest.iter().map(|w| w.to_string()).collect(),
                    },
                    None => {
                        return Err(CalcError::input(format!(
                            "unknown command '{}', type 'help' for a list",
                            first
                        )));
                    }
                }
            }
        };
        Ok(command)
    }
}

/// Run the session until end of input or `quit`.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    input: R,
    mut output: W,
    clipboard: &mut impl ClipboardSink,
) -> io::Result<()> {
    writeln!(output, "MathMaster - type 'help' for commands")?;
    write!(output, "{}", PROMPT)?;
    output.flush()?;

    for line in input.lines() {
        let line = line?;
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(session, command, &mut output, clipboard)?,
            Err(err) => writeln!(output, "{}", err)?,
        }
        write!(output, "{}", PROMPT)?;
        output.flush()?;
    }
    writeln!(output)?;
    Ok(())
}

fn execute<W: Write>(
    session: &mut Session,
    command: Command,
    output: &mut W,
    clipboard: &mut impl ClipboardSink,
) -> io::Result<()> {
    match command {
        Command::Calculate {
            operation,
            operands,
        } => {
            let raw: Vec<&str> = operands.iter().map(String::as_str).collect();
            match session.calculate(operation, &raw) {
                Ok(calc) => write_calculation(output, calc)?,
                Err(err) => write_error(output, &err)?,
            }
        }
        Command::Expression(expression) => match session.evaluate_expression(&expression) {
            Ok(calc) => write_calculation(output, calc)?,
            Err(err) => write_error(output, &err)?,
        },
        Command::History => {
            let lines = session.recent();
            if lines.is_empty() {
                writeln!(output, "(history is empty)")?;
            }
            for line in lines {
                writeln!(output, "{}", line)?;
            }
        }
        Command::Clear => {
            session.clear_history();
            writeln!(output, "History cleared")?;
        }
        Command::Export(path) => match session.export_history(path.as_deref()) {
            Ok(path) => writeln!(output, "History exported to '{}'", path.display())?,
            Err(err) => {
                tracing::warn!("history export failed: {:#}", err);
                writeln!(output, "Could not export history: {:#}", err)?;
            }
        },
        Command::Copy => match session.copy_result(clipboard) {
            Ok(text) => writeln!(output, "Copied {}", text)?,
            Err(err) => {
                tracing::warn!("copy failed: {:#}", err);
                writeln!(output, "Could not copy result: {:#}", err)?;
            }
        },
        Command::Plot(expression) => match session.plot(expression.as_deref()) {
            Ok(plot) => {
                write!(output, "{}", session.renderer().render(&plot))?;
                if let Some(err) = &plot.first_error {
                    writeln!(output, "note: undefined {}", err)?;
                }
            }
            Err(err) => writeln!(output, "Error plotting function: {}", err)?,
        },
        Command::Range(start, end) => {
            let range = parse_operand(&start).and_then(|s| parse_operand(&end).map(|e| (s, e)));
            match range {
                Ok((start, end)) => match session.set_plot_range(start, end) {
                    Ok(()) => writeln!(output, "Plot range set to [{}, {}]", start, end)?,
                    Err(err) => writeln!(output, "{}", err)?,
                },
                Err(err) => writeln!(output, "{}", err)?,
            }
        }
        Command::Reset => {
            session.clear_result();
            writeln!(output, "Result cleared")?;
        }
        Command::Help => write_help(output)?,
        Command::Quit | Command::Empty => {}
    }
    Ok(())
}

fn write_calculation<W: Write>(output: &mut W, calc: &Calculation) -> io::Result<()> {
    writeln!(output, "{}", calc.title())?;
    writeln!(output, "= {}", calc.display_result())
}

fn write_error<W: Write>(output: &mut W, err: &CalcError) -> io::Result<()> {
    if err.is_domain() {
        tracing::debug!("calculation undefined: {}", err);
    } else {
        tracing::debug!("rejected input: {}", err);
    }
    writeln!(output, "{}", err)
}

fn write_help<W: Write>(output: &mut W) -> io::Result<()> {
    writeln!(output, "Operations:")?;
    for op in Operation::ALL {
        let args = match op.arity() {
            0 => "",
            1 => " <a>",
            _ => " <a> <b>",
        };
        let usage = format!("{}{}", op.name(), args);
        writeln!(output, "  {:<18} {}", usage, op.label())?;
    }
    writeln!(output, "Expressions such as 2 * (3 + 4) or sqrt(2) are evaluated directly.")?;
    writeln!(output, "Commands:")?;
    writeln!(output, "  history          show recent calculations")?;
    writeln!(output, "  clear            clear the history")?;
    writeln!(output, "  export [path]    write the history to a file")?;
    writeln!(output, "  copy             copy the current result")?;
    writeln!(output, "  plot [f(x)]      plot a function of x")?;
    writeln!(output, "  range <a> <b>    set the plot range")?;
    writeln!(output, "  reset            clear the current result")?;
    writeln!(output, "  quit             leave the session")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::MemoryClipboard;
    use crate::config::Config;

    fn run_lines(lines: &str) -> (Session, String, MemoryClipboard) {
        let mut config = Config::default();
        config.plot.width = 20;
        config.plot.height = 5;
        let mut session = Session::new(&config);
        let mut clipboard = MemoryClipboard::default();
        let mut out = Vec::new();
        run(&mut session, lines.as_bytes(), &mut out, &mut clipboard).unwrap();
        (session, String::from_utf8(out).unwrap(), clipboard)
    }

    #[test]
    fn test_parse_operation_commands() {
        assert_eq!(
            Command::parse("add 1 -2"),
            Ok(Command::Calculate {
                operation: Operation::Add,
                operands: vec!["1".into(), "-2".into()],
            })
        );
        assert_eq!(
            Command::parse("PI"),
            Ok(Command::Calculate {
                operation: Operation::Pi,
                operands: vec![],
            })
        );
    }

    #[test]
    fn test_parse_expressions() {
        assert_eq!(
            Command::parse("2 * (3 + 4)"),
            Ok(Command::Expression("2 * (3 + 4)".into()))
        );
        assert_eq!(
            Command::parse("e * 2"),
            Ok(Command::Expression("e * 2".into()))
        );
        assert_eq!(
            Command::parse("sqrt(16)"),
            Ok(Command::Expression("sqrt(16)".into()))
        );
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(Command::parse("   "), Ok(Command::Empty));
        assert_eq!(Command::parse("history"), Ok(Command::History));
        assert_eq!(Command::parse("export"), Ok(Command::Export(None)));
        assert_eq!(
            Command::parse("export my file.txt"),
            Ok(Command::Export(Some(PathBuf::from("my file.txt"))))
        );
        assert_eq!(
            Command::parse("plot x ** 2 + 1"),
            Ok(Command::Plot(Some("x ** 2 + 1".into())))
        );
        assert_eq!(
            Command::parse("range -5 5"),
            Ok(Command::Range("-5".into(), "5".into()))
        );
        assert!(Command::parse("range 1").is_err());
        assert!(Command::parse("launch firefox").is_err());
    }

    #[test]
    fn test_bad_operands_still_reach_the_operation() {
        assert_eq!(
            Command::parse("add 1 x"),
            Ok(Command::Calculate {
                operation: Operation::Add,
                operands: vec!["1".into(), "x".into()],
            })
        );
    }

    #[test]
    fn test_session_flow() {
        let (session, out, _) = run_lines("add 3 4\ndivide 1 0\nhistory\nquit\nadd 5 5\n");
        assert!(out.contains("Addition\n= 7\n"));
        assert!(out.contains("Division by zero is not allowed!"));
        assert!(out.contains("1. 3.0 Addition 4.0 = 7.0"));
        // Nothing after quit runs.
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_errors_do_not_stop_the_session() {
        let (session, out, _) = run_lines("bogus\nsqrt -1\nfactorial 5\n");
        assert!(out.contains("unknown command 'bogus'"));
        assert!(out.contains("Square root of negative number is not real!"));
        assert!(out.contains("= 120"));
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_copy_and_clear() {
        let (session, out, clipboard) = run_lines("multiply 1500 2\ncopy\nclear\nhistory\n");
        assert_eq!(clipboard.contents.as_deref(), Some("3000"));
        assert!(out.contains("= 3,000"));
        assert!(out.contains("(history is empty)"));
        assert!(session.current().is_some());
    }

    #[test]
    fn test_plot_command() {
        let (_, out, _) = run_lines("range -1 1\nplot 1 / x\nplot x +\n");
        assert!(out.contains("Plot range set to [-1, 1]"));
        assert!(out.contains("f(x) = 1 / x"));
        assert!(out.contains("Error plotting function"));
    }

    #[test]
    fn test_help_lists_operations() {
        let (_, out, _) = run_lines("help\n");
        for op in Operation::ALL {
            assert!(out.contains(op.label()), "missing {}", op.label());
        }
    }
}
