use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use mathmaster::clipboard::{SystemClipboard, copy_to_clipboard};
use mathmaster::config::Config;
use mathmaster::operations::Operation;
use mathmaster::plot::{self, Renderer};
use mathmaster::{Session, repl};

#[derive(Parser, Debug)]
#[command(name = "mathmaster", version, about = "Calculator with history and function plotting")]
struct Cli {
    /// Path to a config file (default: $XDG_CONFIG_HOME/mathmaster/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one operation and print the result
    Calc {
        operation: Operation,
        /// Operands, as many as the operation takes
        #[arg(allow_negative_numbers = true)]
        operands: Vec<String>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
        /// Also copy the result to the clipboard
        #[arg(long)]
        copy: bool,
    },
    /// Evaluate an arithmetic expression such as "2 * (3 + 4)"
    Eval {
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        expression: Vec<String>,
    },
    /// Plot a function of x
    Plot {
        /// Expression in x (default from config, "x**2")
        expression: Option<String>,
        #[arg(long, allow_negative_numbers = true)]
        from: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        to: Option<f64>,
        #[arg(long)]
        samples: Option<usize>,
        #[arg(long, value_enum, default_value_t = PlotFormat::Chart)]
        format: PlotFormat,
    },
    /// Print pi and Euler's number
    Constants,
    /// Start an interactive session (default)
    Session,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum PlotFormat {
    Chart,
    Csv,
    Json,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    tracing::debug!(?config, "loaded config");

    match cli.command.unwrap_or(Command::Session) {
        Command::Calc {
            operation,
            operands,
            json,
            copy,
        } => {
            let mut session = Session::new(&config);
            let raw: Vec<&str> = operands.iter().map(String::as_str).collect();
            let calc = session.calculate(operation, &raw)?;
            if json {
                println!("{}", serde_json::to_string_pretty(calc)?);
            } else {
                println!("{}", calc.description);
            }
            if copy {
                copy_to_clipboard(&calc.text_for_clipboard())?;
            }
        }
        Command::Eval { expression } => {
            let expression = expression.join(" ");
            let mut session = Session::new(&config);
            let calc = session.evaluate_expression(&expression)?;
            println!("{}", calc.display_result());
        }
        Command::Plot {
            expression,
            from,
            to,
            samples,
            format,
        } => {
            let expression = expression.unwrap_or_else(|| config.plot.function.clone());
            let plot = plot::sample(
                &expression,
                from.unwrap_or(config.plot.start),
                to.unwrap_or(config.plot.end),
                samples.unwrap_or(config.plot.samples),
            )
            .with_context(|| format!("Error plotting function '{}'", expression))?;
            if let Some(err) = &plot.first_error {
                tracing::warn!("function undefined {}", err);
            }
            match format {
                PlotFormat::Chart => print!("{}", Renderer::new(config.plot.style()).render(&plot)),
                PlotFormat::Csv => print!("{}", plot.to_csv()),
                PlotFormat::Json => println!("{}", serde_json::to_string_pretty(&plot)?),
            }
        }
        Command::Constants => {
            let mut session = Session::new(&config);
            for op in [Operation::Pi, Operation::E] {
                println!("{}", session.calculate(op, &[])?.description);
            }
        }
        Command::Session => {
            let mut session = Session::new(&config);
            let mut clipboard = SystemClipboard::new();
            let stdin = io::stdin();
            repl::run(&mut session, stdin.lock(), io::stdout(), &mut clipboard)?;
            io::stdout().flush()?;
        }
    }

    Ok(())
}
