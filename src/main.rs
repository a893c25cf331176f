//! paramws CLI - query seismic web-service responses by path

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::Value;
use std::fs;
use std::io::Read;

use paramws::feltreport::decode_text;
use paramws::resolve::{resolve, Mode};
use paramws::{FeltReportEvent, FieldMap, FixSuggestion, ParamwsError};

#[derive(Parser)]
#[command(name = "paramws")]
#[command(about = "Query seismic web-service responses by nested path")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve a path such as features[0].properties.mag
    Get {
        /// JSON response file, or - for stdin
        input: String,

        /// Dotted/bracketed path
        path: String,

        /// Value printed when the path does not resolve (JSON, or a plain string)
        #[arg(short, long, allow_hyphen_values = true)]
        default: Option<String>,

        /// Fail instead of falling back to the default
        #[arg(short, long)]
        required: bool,
    },

    /// Print every normalized field of an event response
    Extract {
        /// JSON response file, or - for stdin
        input: String,

        /// YAML field map (defaults to the built-in EMSC felt-report table)
        #[arg(short, long)]
        map: Option<String>,
    },
}

fn main() {
    // Load .env file (ignore if not present)
    let _ = dotenvy::dotenv();

    // Logs go to stderr; stdout carries JSON
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Get {
            input,
            path,
            default,
            required,
        } => get_path(&input, &path, default.as_deref(), required),
        Commands::Extract { input, map } => extract_fields(&input, map.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "Error:".red().bold(), e);
        if let Some(suggestion) = e.fix_suggestion() {
            eprintln!("  {} {}", "Fix:".yellow(), suggestion);
        }
        std::process::exit(1);
    }
}

fn read_input(input: &str) -> Result<Vec<u8>, ParamwsError> {
    if input == "-" {
        let mut body = Vec::new();
        std::io::stdin().read_to_end(&mut body)?;
        Ok(body)
    } else {
        Ok(fs::read(input)?)
    }
}

fn parse_default(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

fn get_path(
    input: &str,
    path: &str,
    default: Option<&str>,
    required: bool,
) -> Result<(), ParamwsError> {
    let body = read_input(input)?;
    let data: Value = serde_json::from_str(&decode_text(&body))?;
    let default = default.map(parse_default);

    tracing::debug!(path, required, "resolving path");
    let value = resolve(&data, path, default.as_ref(), Mode::from_required(required))?;

    println!("{}", serde_json::to_string_pretty(value.unwrap_or(&Value::Null))?);
    Ok(())
}

fn extract_fields(input: &str, map_file: Option<&str>) -> Result<(), ParamwsError> {
    let map = match map_file {
        Some(file) => FieldMap::from_yaml(&fs::read_to_string(file)?)?,
        None => FieldMap::felt_report_event(),
    };

    let event = FeltReportEvent::from_bytes(&read_input(input)?)?;
    tracing::debug!(service = %map.service, fields = map.fields.len(), "extracting fields");

    let fields = Value::Object(map.extract(event.record()));
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}
