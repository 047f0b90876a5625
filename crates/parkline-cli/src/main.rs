use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use glob::glob;
use parkline_core::{DecodeError, DecodedRecord, Report};
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("PARKLINE_BUILD_COMMIT"),
    " ",
    env!("PARKLINE_BUILD_DATE"),
    ")"
);

const EXAMPLES: &str = "Examples:\n  parkline decode --port 1 --hex 0117\n  parkline decode --port 6 --base64 ZUobAAAAAZQABQ== --pretty\n  parkline log analyse uplinks.jsonl -o report.json\n  parkline log analyze 'logs/*.jsonl' --stdout";

#[derive(Parser, Debug)]
#[command(name = "parkline")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for parking-lot sensor LoRaWAN uplinks.",
    long_about = None,
    after_help = EXAMPLES
)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a single uplink payload and print the record as JSON.
    Decode(DecodeArgs),
    /// Operations on JSON Lines uplink logs.
    Log {
        #[command(subcommand)]
        command: LogCommands,
    },
}

#[derive(Args, Debug)]
struct DecodeArgs {
    /// LoRaWAN FPort the uplink arrived on
    #[arg(short, long)]
    port: u8,

    /// Payload as a hex string
    #[arg(long, required_unless_present = "base64", conflicts_with = "base64")]
    hex: Option<String>,

    /// Payload as a base64 string (as found in frm_payload)
    #[arg(long)]
    base64: Option<String>,

    /// Pretty-print JSON output
    #[arg(long)]
    pretty: bool,
}

#[derive(Subcommand, Debug)]
enum LogCommands {
    /// Decode every uplink in a log and generate a versioned JSON report.
    #[command(alias = "analyze")]
    #[command(after_help = EXAMPLES)]
    Analyse(AnalyseArgs),
}

#[derive(Args, Debug)]
struct AnalyseArgs {
    /// Path (or glob pattern) to a .jsonl uplink log
    input: PathBuf,

    /// Output report path (JSON)
    #[arg(short = 'o', long, required_unless_present = "stdout")]
    report: Option<PathBuf>,

    /// Write JSON report to stdout
    #[arg(long, conflicts_with = "report")]
    stdout: bool,

    /// Pretty-print JSON output
    #[arg(long, conflicts_with = "compact")]
    pretty: bool,

    /// Compact JSON output (default)
    #[arg(long)]
    compact: bool,

    /// Suppress non-error output
    #[arg(long)]
    quiet: bool,

    /// Exit with a non-zero code if any uplink failed to decode
    #[arg(long)]
    strict: bool,

    /// List decode failures after analysis
    #[arg(long)]
    list_failures: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Decode(args) => cmd_decode(args),
        Commands::Log { command } => match command {
            LogCommands::Analyse(args) => cmd_log_analyse(args),
        },
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err.message);
            if let Some(hint) = err.hint {
                eprintln!("hint: {}", hint);
            }
            ExitCode::from(2)
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let fmt_layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

#[derive(Debug)]
struct CliError {
    message: String,
    hint: Option<String>,
}

impl CliError {
    fn new(message: impl Into<String>, hint: Option<String>) -> Self {
        Self {
            message: message.into(),
            hint,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<anyhow::Error> for CliError {
    fn from(err: anyhow::Error) -> Self {
        CliError::new(format!("{:#}", err), None)
    }
}

impl From<DecodeError> for CliError {
    fn from(err: DecodeError) -> Self {
        let hint = match err {
            DecodeError::OutOfRange { .. } => "check the payload length for the given --port",
            DecodeError::Hex(_) => "expected an even number of hex digits, e.g. 0117",
            DecodeError::Base64(_) => "expected standard base64 with padding, e.g. ARc=",
        };
        CliError::new(err.to_string(), Some(hint.to_string()))
    }
}

fn cmd_decode(args: DecodeArgs) -> Result<(), CliError> {
    let record = match (args.hex.as_deref(), args.base64.as_deref()) {
        (Some(hex), _) => parkline_core::decode_hex(hex, args.port)?,
        (None, Some(b64)) => parkline_core::decode_base64(b64, args.port)?,
        (None, None) => {
            return Err(CliError::new(
                "missing payload",
                Some("use --hex or --base64".to_string()),
            ));
        }
    };
    println!("{}", serialize_record(&record, args.pretty)?);
    Ok(())
}

fn serialize_record(record: &DecodedRecord, pretty: bool) -> Result<String, CliError> {
    let json = if pretty {
        serde_json::to_string_pretty(record)
    } else {
        serde_json::to_string(record)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn cmd_log_analyse(args: AnalyseArgs) -> Result<(), CliError> {
    let AnalyseArgs {
        input,
        report,
        stdout,
        pretty,
        compact,
        quiet,
        strict,
        list_failures,
    } = args;

    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;
    let input_abs = fs::canonicalize(&resolved_input)
        .with_context(|| format!("Failed to resolve input path: {}", resolved_input.display()))?;

    let report_path = if stdout {
        None
    } else {
        let path = report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?;
        ensure_distinct_output(&path, &input_abs)?;
        Some(path)
    };

    debug!(input = %resolved_input.display(), "analysing uplink log");
    let rep = parkline_core::analyze_uplink_log(&resolved_input)
        .context("uplink log analysis failed")?;
    let json = serialize_report(&rep, pretty, compact)?;

    match report_path {
        None => print!("{}", json),
        Some(path) => {
            write_report(&path, &json)?;
            if !quiet {
                eprintln!("OK: report written -> {}", path.display());
            }
        }
    }

    if list_failures && !quiet {
        print_failures(&rep);
    }
    if strict && !rep.failures.is_empty() {
        return Err(CliError::new(
            format!("{} uplink(s) failed to decode", rep.failures.len()),
            Some("use --list-failures to inspect".to_string()),
        ));
    }
    Ok(())
}

fn ensure_distinct_output(report_path: &Path, input_abs: &Path) -> Result<(), CliError> {
    let parent = match report_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    // The output directory may not exist yet; it is created on write.
    let Ok(report_dir) = fs::canonicalize(parent) else {
        return Ok(());
    };
    let file_name = report_path
        .file_name()
        .ok_or_else(|| anyhow::anyhow!("Invalid report path: {}", report_path.display()))?;
    if report_dir.join(file_name) == input_abs {
        return Err(CliError::new(
            format!(
                "report path must differ from input: {}",
                report_path.display()
            ),
            Some("choose a different output path".to_string()),
        ));
    }
    Ok(())
}

fn write_report(path: &Path, json: &str) -> Result<(), CliError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
    }
    fs::write(path, json).with_context(|| format!("Failed to write report: {}", path.display()))?;
    Ok(())
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    let json = if pretty {
        serde_json::to_string_pretty(rep)
    } else {
        serde_json::to_string(rep)
    };
    json.context("JSON serialization failed").map_err(Into::into)
}

fn print_failures(rep: &Report) {
    eprintln!("Decode failures:");
    if rep.failures.is_empty() {
        eprintln!("  none");
        return;
    }
    for failure in &rep.failures {
        eprintln!(
            "  line {} (port {}): {}",
            failure.line, failure.port, failure.message
        );
    }
}

fn validate_input_file(input: &Path) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .jsonl uplink log".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .jsonl uplink log".to_string()),
        ));
    }
    let ext = input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    if ext != "jsonl" && ext != "json" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .jsonl or .json file with one uplink per line".to_string()),
        ));
    }
    Ok(())
}

fn resolve_input_path(input: &Path) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.to_path_buf());
    }

    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
    let mut matches = Vec::new();
    for entry in paths {
        let path = entry.map_err(|err| {
            CliError::new(
                format!("invalid input pattern '{}'", pattern),
                Some(format!("pattern error: {}", err)),
            )
        })?;
        if path.is_file() {
            matches.push(path);
        }
    }

    match matches.len() {
        0 => Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .jsonl".to_string()),
        )),
        1 => Ok(matches.remove(0)),
        count => {
            let mut listed = matches
                .iter()
                .take(3)
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ");
            if count > 3 {
                listed.push_str(", ...");
            }
            Err(CliError::new(
                format!(
                    "multiple files match pattern '{}' ({} matches); matches: {}",
                    pattern, count, listed
                ),
                Some("pass a single uplink log, or run once per file".to_string()),
            ))
        }
    }
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
