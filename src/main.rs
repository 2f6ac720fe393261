//! argtable - Inspect and query permissive command-line flag tables.

use anyhow::{Context, Result};
use argtable::{render, ArgTable, Format, ParserConfig};
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

/// Stands in for argument 0, which the table builder discards.
const PROGRAM_NAME: &str = "argtable";

/// Parse flags into a table and query them with typed defaults.
#[derive(Parser, Debug)]
#[command(name = "argtable", version, about, disable_help_subcommand = true)]
struct Cli {
    /// JSON parser configuration
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print every entry of the parsed table
    Dump {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Arguments to parse
        #[arg(last = true)]
        args: Vec<String>,
    },

    /// Print the typed value of a single key
    Get {
        /// Key to query, including its leading dash (e.g. -verbose)
        #[arg(long, allow_hyphen_values = true)]
        key: String,

        /// Type to read the value as
        #[arg(long = "type", value_enum, default_value_t = ValueKind::String)]
        kind: ValueKind,

        /// Value returned when the key is absent (bool accepts true/false/1/0)
        #[arg(long, allow_hyphen_values = true)]
        default: Option<String>,

        /// Arguments to parse
        #[arg(last = true)]
        args: Vec<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Text,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Format::Text,
            OutputFormat::Json => Format::Json,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum ValueKind {
    Bool,
    String,
    Int,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Dump { format, args } => {
            let table = build_table(&config, &args);
            let rendered = render(&table, format.into()).context("failed to render table")?;
            print!("{}", rendered);
            if format == OutputFormat::Json {
                println!();
            }
        }
        Commands::Get {
            key,
            kind,
            default,
            args,
        } => {
            let table = build_table(&config, &args);
            println!("{}", query(&table, &key, kind, default.as_deref())?);
        }
    }

    Ok(())
}

fn load_config(json: Option<&str>) -> Result<ParserConfig> {
    let Some(json) = json else {
        return Ok(ParserConfig::default());
    };
    let cfg = ParserConfig::from_json(json).context("failed to parse config JSON")?;
    cfg.validate().context("invalid config")?;
    Ok(cfg)
}

fn build_table(config: &ParserConfig, args: &[String]) -> ArgTable {
    let tokens = std::iter::once(PROGRAM_NAME).chain(args.iter().map(String::as_str));
    ArgTable::parse_with(config, tokens)
}

/// Resolve `key` as `kind`, parsing the CLI-supplied default for that type.
fn query(table: &ArgTable, key: &str, kind: ValueKind, default: Option<&str>) -> Result<String> {
    let value = match kind {
        ValueKind::Bool => {
            let default = match default {
                Some(d) => parse_bool_default(d)?,
                None => false,
            };
            table.get_bool_arg(key, default).to_string()
        }
        ValueKind::String => table.get_arg(key, default.unwrap_or("")),
        ValueKind::Int => {
            let default = match default {
                Some(d) => d
                    .parse::<i64>()
                    .with_context(|| format!("invalid int default: {}", d))?,
                None => 0,
            };
            table.get_int_arg(key, default).to_string()
        }
    };
    Ok(value)
}

/// Parse a bool default, accepting the `1`/`0` spelling the table itself uses.
fn parse_bool_default(text: &str) -> Result<bool> {
    match text {
        "1" => Ok(true),
        "0" => Ok(false),
        _ => text
            .parse::<bool>()
            .with_context(|| format!("invalid bool default: {}", text)),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}
