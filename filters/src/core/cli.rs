use clap::builder::BoolishValueParser;
use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};

use std::path::PathBuf;

use super::config::LogFormat;
use super::constants::{
    APP_NAME_LOWER, ENV_CONFIG, ENV_ENVELOPE, ENV_LOG_FORMAT, ENV_MAX_INPUT_BYTES, ENV_PRETTY,
};

#[derive(Parser, Debug)]
#[command(name = APP_NAME_LOWER)]
#[command(
    version,
    about = "Translate data grid column filters into query API criteria",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Input file for the default translate command; stdin when omitted or "-"
    pub input: Option<PathBuf>,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,

    /// Pretty-print JSON output (--pretty=false turns a config file setting off)
    #[arg(
        long,
        global = true,
        env = ENV_PRETTY,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub pretty: Option<bool>,

    /// Wrap the translated filter in a search envelope ({"filter": ...})
    #[arg(
        long,
        global = true,
        env = ENV_ENVELOPE,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub envelope: Option<bool>,

    /// Reject input documents larger than this many bytes
    #[arg(long, global = true, env = ENV_MAX_INPUT_BYTES)]
    pub max_input_bytes: Option<usize>,

    /// Log output format (compact or json)
    #[arg(long, global = true, env = ENV_LOG_FORMAT, value_parser = parse_log_format)]
    pub log_format: Option<LogFormat>,
}

/// Parse log format from CLI/env string
fn parse_log_format(s: &str) -> Result<LogFormat, String> {
    match s.to_lowercase().as_str() {
        "compact" => Ok(LogFormat::Compact),
        "json" => Ok(LogFormat::Json),
        _ => Err(format!(
            "Invalid log format '{}'. Valid options: compact, json",
            s
        )),
    }
}

#[derive(Subcommand, Clone, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Translate a column filter state document (default command)
    Translate {
        /// Input file; stdin when omitted or "-"
        input: Option<PathBuf>,
    },
    /// Print the grid operator to API operator mapping
    Operators,
    /// Print the JSON Schema of the translated output
    Schema,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    pub pretty: Option<bool>,
    pub envelope: Option<bool>,
    pub max_input_bytes: Option<usize>,
    pub log_format: Option<LogFormat>,
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Option<Commands>) {
    split(Cli::parse()).unwrap_or_else(|e| e.exit())
}

/// A bare INPUT means the default translate command
fn split(cli: Cli) -> Result<(CliConfig, Option<Commands>), clap::Error> {
    let command = match (cli.command, cli.input) {
        (Some(_), Some(input)) => {
            return Err(Cli::command().error(
                ErrorKind::ArgumentConflict,
                format!(
                    "input '{}' cannot be used with a subcommand",
                    input.display()
                ),
            ));
        }
        (None, Some(input)) => Some(Commands::Translate { input: Some(input) }),
        (command, None) => command,
    };

    let config = CliConfig {
        config: cli.config,
        pretty: cli.pretty,
        envelope: cli.envelope,
        max_input_bytes: cli.max_input_bytes,
        log_format: cli.log_format,
    };
    Ok((config, command))
}
