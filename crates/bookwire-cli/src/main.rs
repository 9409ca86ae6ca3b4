use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use glob::glob;

use bookwire_core::{
    DecodeEvent, DecodeSink, EntryAction, FieldDef, InMemoryDictionary, MapDecoder, Report,
    make_report,
};

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("BOOKWIRE_BUILD_COMMIT"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "bookwire")]
#[command(version, long_version = LONG_VERSION)]
#[command(
    about = "Decoder for order-level market-depth map messages.",
    long_about = None,
    after_help = "Examples:\n  bookwire msg decode update.bin -d fields.json -o report.json\n  bookwire msg decode update.hex --stdout --pretty"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Operations on encoded map messages.
    Msg {
        #[command(subcommand)]
        command: MsgCommands,
    },
}

#[derive(Subcommand, Debug)]
enum MsgCommands {
    /// Decode one message file and generate a versioned JSON report.
    #[command(
        after_help = "Examples:\n  bookwire msg decode update.bin -d fields.json -o report.json\n  bookwire msg decode update.hex --stdout"
    )]
    Decode {
        /// Path to a .bin (raw bytes) or .hex (hex text) message file
        input: PathBuf,

        /// Field dictionary (JSON array of field definitions)
        #[arg(short = 'd', long)]
        dict: Option<PathBuf>,

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

        /// Exit with a non-zero code if unresolved fields or unknown
        /// actions are present
        #[arg(long)]
        strict: bool,

        /// List unresolved fields and unknown actions after decoding
        #[arg(long)]
        list_unresolved: bool,

        /// Print decode events to stderr
        #[arg(long)]
        trace: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Msg { command } => match command {
            MsgCommands::Decode {
                input,
                dict,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_unresolved,
                trace,
            } => cmd_msg_decode(
                input,
                dict,
                report,
                stdout,
                pretty,
                compact,
                quiet,
                strict,
                list_unresolved,
                trace,
            ),
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
        CliError::new(err.to_string(), None)
    }
}

struct TraceSink;

impl DecodeSink for TraceSink {
    fn on_event(&mut self, event: DecodeEvent) {
        match event {
            DecodeEvent::SetDefinitionsDecoded { sets } => {
                eprintln!("trace: set definitions ({sets} sets)");
            }
            DecodeEvent::SummaryDecoded { fields } => {
                eprintln!("trace: summary ({fields} fields)");
            }
            DecodeEvent::EntryDecoded { action, fields } => {
                eprintln!("trace: entry {action} ({fields} fields)");
            }
        }
    }
}

fn cmd_msg_decode(
    input: PathBuf,
    dict: Option<PathBuf>,
    report: Option<PathBuf>,
    stdout: bool,
    pretty: bool,
    compact: bool,
    quiet: bool,
    strict: bool,
    list_unresolved: bool,
    trace: bool,
) -> Result<(), CliError> {
    let resolved_input = resolve_input_path(&input)?;
    validate_input_file(&resolved_input)?;

    let report = if stdout {
        None
    } else {
        Some(report.ok_or_else(|| {
            CliError::new(
                "missing output path",
                Some("use -o/--report or --stdout".to_string()),
            )
        })?)
    };

    let message = read_message(&resolved_input)?;
    let dictionary = load_dictionary(dict.as_deref())?;

    let mut decoder = MapDecoder::new();
    let decoded = if trace {
        decoder.decode_with_sink(&message, &dictionary, &mut TraceSink)
    } else {
        decoder.decode(&message, &dictionary)
    }
    .map_err(|err| {
        CliError::new(
            format!("decode failed: {err}"),
            Some("the message may be truncated or malformed".to_string()),
        )
    })?;

    let rep = make_report(
        &resolved_input.display().to_string(),
        message.len() as u64,
        decoded,
    );
    let json = serialize_report(&rep, pretty, compact)?;

    if stdout {
        print!("{}", json);
    } else {
        let report = report.expect("report required when not using stdout");
        if let Some(parent) = report.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create output directory: {}", parent.display())
                })?;
            }
        }
        fs::write(&report, json)
            .with_context(|| format!("Failed to write report: {}", report.display()))?;
        if !quiet {
            eprintln!("OK: report written -> {}", report.display());
        }
    }

    let anomalies = decode_anomalies(&rep);
    if list_unresolved && !quiet && !anomalies.is_empty() {
        eprintln!("Unresolved:");
        for line in &anomalies {
            eprintln!("  {}", line);
        }
    }
    if strict && !anomalies.is_empty() {
        return Err(CliError::new(
            "unresolved fields detected",
            Some("use --list-unresolved to inspect".to_string()),
        ));
    }
    Ok(())
}

fn read_message(input: &PathBuf) -> Result<Vec<u8>, CliError> {
    let bytes = fs::read(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))
        .map_err(CliError::from)?;

    if file_extension(input) == "hex" {
        let text = String::from_utf8_lossy(&bytes);
        parse_hex(&text).map_err(|reason| {
            CliError::new(
                format!("invalid hex input '{}': {}", input.display(), reason),
                Some("expected whitespace-separated hex byte pairs".to_string()),
            )
        })
    } else {
        Ok(bytes)
    }
}

fn parse_hex(text: &str) -> Result<Vec<u8>, String> {
    let digits: Vec<char> = text.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", digits.len()));
    }

    let mut out = Vec::with_capacity(digits.len() / 2);
    for pair in digits.chunks(2) {
        let hi = pair[0]
            .to_digit(16)
            .ok_or_else(|| format!("invalid hex digit '{}'", pair[0]))?;
        let lo = pair[1]
            .to_digit(16)
            .ok_or_else(|| format!("invalid hex digit '{}'", pair[1]))?;
        out.push(((hi << 4) | lo) as u8);
    }
    Ok(out)
}

fn load_dictionary(dict: Option<&std::path::Path>) -> Result<InMemoryDictionary, CliError> {
    let Some(path) = dict else {
        return Ok(InMemoryDictionary::new());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dictionary: {}", path.display()))
        .map_err(CliError::from)?;
    let defs: Vec<FieldDef> = serde_json::from_str(&text).map_err(|err| {
        CliError::new(
            format!("invalid dictionary '{}': {}", path.display(), err),
            Some("expected a JSON array of field definitions".to_string()),
        )
    })?;
    Ok(InMemoryDictionary::from_defs(defs))
}

fn serialize_report(rep: &Report, pretty: bool, compact: bool) -> Result<String, CliError> {
    if pretty && compact {
        return Err(CliError::new(
            "cannot use --pretty and --compact together",
            Some("choose one output format".to_string()),
        ));
    }
    if pretty {
        serde_json::to_string_pretty(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    } else {
        serde_json::to_string(rep)
            .context("JSON serialization failed")
            .map_err(Into::into)
    }
}

fn decode_anomalies(rep: &Report) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(summary) = &rep.summary {
        for field in &summary.fields {
            if !field.is_resolved() {
                lines.push(format!("summary field {} {}", field.field_id, field.name));
            }
        }
    }
    for entry in &rep.entries {
        if let EntryAction::Unknown(code) = entry.action {
            lines.push(format!("entry {} action UNKNOWN({})", entry.key, code));
        }
        for field in &entry.fields {
            if !field.is_resolved() {
                lines.push(format!(
                    "entry {} field {} {}",
                    entry.key, field.field_id, field.name
                ));
            }
        }
    }
    lines
}

fn validate_input_file(input: &PathBuf) -> Result<(), CliError> {
    if !input.exists() {
        return Err(CliError::new(
            format!("input file not found: {}", input.display()),
            Some("use a .bin or .hex message file".to_string()),
        ));
    }
    if !input.is_file() {
        return Err(CliError::new(
            format!("input is not a file: {}", input.display()),
            Some("use a .bin or .hex message file".to_string()),
        ));
    }
    let ext = file_extension(input);
    if ext != "bin" && ext != "hex" {
        return Err(CliError::new(
            format!("unsupported input format '{}'", input.display()),
            Some("expected a .bin or .hex file".to_string()),
        ));
    }
    Ok(())
}

fn file_extension(input: &PathBuf) -> String {
    input
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn resolve_input_path(input: &PathBuf) -> Result<PathBuf, CliError> {
    let pattern = input.to_string_lossy();
    if !is_glob_pattern(&pattern) {
        return Ok(input.clone());
    }

    let mut matches = Vec::new();
    let paths = glob(&pattern).map_err(|err| {
        CliError::new(
            format!("invalid input pattern '{}'", pattern),
            Some(format!("pattern error: {}", err.msg)),
        )
    })?;
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

    if matches.is_empty() {
        return Err(CliError::new(
            format!("no files match pattern '{}'", pattern),
            Some("check the path or quote the pattern; expected .bin or .hex".to_string()),
        ));
    }
    if matches.len() > 1 {
        return Err(CliError::new(
            format!(
                "multiple files match pattern '{}' ({} matches)",
                pattern,
                matches.len()
            ),
            Some("pass a single message file, or run once per file".to_string()),
        ));
    }

    Ok(matches.remove(0))
}

fn is_glob_pattern(input: &str) -> bool {
    input.contains('*') || input.contains('?') || input.contains('[')
}
