//! Core application

use std::io::{self, IsTerminal, Write};
use std::path::Path;
use std::process::ExitCode;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::{ErrorBody, FilterEnvelope};
use crate::core::cli::{self, Commands};
use crate::core::config::{AppConfig, LogFormat, OutputConfig};
use crate::core::constants::{DEFAULT_LOG_FILTER, ENV_LOG, EXIT_FILTER_REJECTED};
use crate::domain::filters::{operator_table, parse_filter_state, translate};
use crate::utils::file::{is_stdin, read_input};

pub struct CoreApp {
    pub config: AppConfig,
}

/// Serialized result of translating one input document
#[derive(Debug)]
pub struct Rendered {
    pub json: String,
    /// The filter state was rejected and `json` holds an error body
    pub rejected: bool,
}

impl CoreApp {
    /// Run the application with CLI argument parsing
    pub fn run() -> Result<ExitCode> {
        dotenvy::dotenv().ok();

        let (cli_config, command) = cli::parse();
        Self::init_logging(cli_config.log_format.unwrap_or_default());

        tracing::debug!("Application starting");
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self {
            config: AppConfig::load(&cli_config)?,
        };

        match command {
            Some(Commands::Translate { input }) => app.run_translate(input.as_deref()),
            None => app.run_translate(None),
            Some(Commands::Operators) => app.print_operators(),
            Some(Commands::Schema) => app.print_schema(),
        }
    }

    /// Logs go to stderr; stdout is reserved for JSON output
    fn init_logging(format: LogFormat) {
        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string());

        match format {
            LogFormat::Compact => tracing_subscriber::fmt()
                .with_writer(io::stderr)
                .with_target(false)
                .with_thread_ids(false)
                .with_level(true)
                .with_ansi(io::stderr().is_terminal())
                .compact()
                .with_env_filter(filter)
                .init(),
            LogFormat::Json => tracing_subscriber::fmt()
                .with_writer(io::stderr)
                .json()
                .with_env_filter(filter)
                .init(),
        }
    }

    fn run_translate(&self, input: Option<&Path>) -> Result<ExitCode> {
        let raw = read_input(input, self.config.input.max_bytes)?;
        tracing::debug!(bytes = raw.len(), stdin = is_stdin(input), "Read filter state");

        let rendered = render_translation(&raw, &self.config.output)?;
        emit(&rendered.json)?;

        if rendered.rejected {
            Ok(ExitCode::from(EXIT_FILTER_REJECTED))
        } else {
            Ok(ExitCode::SUCCESS)
        }
    }

    fn print_operators(&self) -> Result<ExitCode> {
        emit(&to_json(&operators_json(), self.config.output.pretty)?)?;
        Ok(ExitCode::SUCCESS)
    }

    fn print_schema(&self) -> Result<ExitCode> {
        let schema = schemars::schema_for!(FilterEnvelope);
        emit(&to_json(&schema, self.config.output.pretty)?)?;
        Ok(ExitCode::SUCCESS)
    }
}

/// Translate one filter state document into its JSON output.
///
/// Filter errors are not `Err`: they render as an [`ErrorBody`] with
/// `rejected` set. `Err` is reserved for serialization failures.
pub fn render_translation(raw: &str, output: &OutputConfig) -> Result<Rendered> {
    match parse_filter_state(raw).and_then(|state| translate(&state)) {
        Ok(request) => {
            let json = if output.envelope {
                to_json(&FilterEnvelope::from(request), output.pretty)?
            } else {
                to_json(&request, output.pretty)?
            };
            Ok(Rendered {
                json,
                rejected: false,
            })
        }
        Err(e) => Ok(Rendered {
            json: to_json(&ErrorBody::from(&e), output.pretty)?,
            rejected: true,
        }),
    }
}

/// `{"contains": "Like", ...}` in vocabulary order
fn operators_json() -> Value {
    let table: Map<String, Value> = operator_table()
        .map(|(token, api)| (token.as_str().to_string(), Value::from(api.as_str())))
        .collect();
    Value::Object(table)
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("Failed to serialize output")
}

fn emit(json: &str) -> Result<()> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", json).context("Failed to write output")
}
