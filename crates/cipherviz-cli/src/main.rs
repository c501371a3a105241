//! cipherviz command-line shell.
//!
//! Runs the Caesar and rail fence engines from `cipherviz-core`, prints the
//! result with its step trace, and optionally animates the trace one record
//! per frame. Saved JSON traces can be replayed with `replay`.
//!
//! Exit codes: 0 = success, 1 = invalid configuration (the error trace is
//! still printed), 2 = I/O error, 3 = invalid trace file.

mod render;
mod settings;

use std::path::{Path, PathBuf};
use std::process;
use std::thread;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use cipherviz_core::{
    CaesarEngine, CipherOutput, Mode, Playback, RailFenceConfig, RailFenceEngine, StepTrace,
    TraceEngine,
};

use crate::settings::{Settings, LOG_ENV};

/// Classic ciphers with step-by-step traces.
#[derive(Parser)]
#[command(name = "cipherviz", about = "Classic ciphers with step-by-step traces")]
struct Cli {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text, global = true)]
    format: Format,

    /// Play the trace back one record per frame.
    #[arg(long, global = true)]
    animate: bool,

    /// Frame delay in milliseconds (default: $CIPHERVIZ_FRAME_MS or 400).
    #[arg(long, global = true)]
    frame_ms: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Shift letters by a fixed offset.
    Caesar {
        #[arg(value_enum)]
        mode: ModeArg,

        /// Shift amount; any integer, taken modulo 26.
        #[arg(short, long, allow_negative_numbers = true)]
        shift: i64,

        text: String,
    },

    /// Zig-zag transposition over a number of rails.
    RailFence {
        #[arg(value_enum)]
        mode: ModeArg,

        /// Number of rails (at least 2).
        #[arg(short, long, allow_negative_numbers = true)]
        rails: i64,

        /// Emit a decrypt fill record every K cells (default: automatic).
        #[arg(long)]
        fill_stride: Option<usize>,

        text: String,
    },

    /// Replay a trace saved with `--format json`.
    Replay {
        /// Path to the JSON file (an output object or a bare trace).
        file: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Encrypt,
    Decrypt,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Mode {
        match arg {
            ModeArg::Encrypt => Mode::Encrypt,
            ModeArg::Decrypt => Mode::Decrypt,
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

fn main() {
    init_logging();
    let cli = Cli::parse();
    let settings = Settings::from_env().with_frame_ms(cli.frame_ms);
    let view = View {
        format: cli.format,
        animate: cli.animate,
        settings,
    };

    let exit_code = match cli.command {
        Commands::Caesar { mode, shift, text } => {
            run_engine(&CaesarEngine::new(), mode.into(), &text, shift, &view)
        }
        Commands::RailFence {
            mode,
            rails,
            fill_stride,
            text,
        } => {
            let engine = RailFenceEngine::new(RailFenceConfig { fill_stride });
            run_engine(&engine, mode.into(), &text, rails, &view)
        }
        Commands::Replay { file } => run_replay(&file, &view),
    };
    process::exit(exit_code);
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// How results are shown.
struct View {
    format: Format,
    animate: bool,
    settings: Settings,
}

/// Execute an engine subcommand.
///
/// Returns exit code: 0 = success, 1 = invalid configuration.
fn run_engine(engine: &dyn TraceEngine, mode: Mode, text: &str, key: i64, view: &View) -> i32 {
    tracing::info!(engine = engine.name(), %mode, key, chars = text.chars().count(), "running");
    let output = engine.run(mode, text, key);

    if view.animate {
        animate(&output.trace, view);
    }
    match view.format {
        Format::Json if !view.animate => println!("{}", to_json(&output)),
        // The animated records are followed by one line carrying the result.
        Format::Json => println!("{}", text_line(&output.text)),
        Format::Text => {
            if !view.animate {
                for record in &output.trace {
                    print!("{}", render::render_record(record));
                }
            }
            println!("{}", output.text);
        }
    }

    if output.trace.is_error() {
        if let Some(record) = output.trace.last() {
            eprintln!("Error: {}", record.description);
        }
        return 1;
    }
    0
}

/// Execute the replay subcommand.
///
/// Returns exit code: 0 = success, 2 = I/O error, 3 = invalid trace.
fn run_replay(path: &Path, view: &View) -> i32 {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) => {
            eprintln!("Error: failed to read '{}': {}", path.display(), e);
            return 2;
        }
    };
    let trace = match parse_saved(&json) {
        Ok(trace) => trace,
        Err(e) => {
            eprintln!("Error: '{}' is not a valid trace: {}", path.display(), e);
            return 3;
        }
    };
    tracing::info!(path = %path.display(), records = trace.len(), "replaying trace");

    if view.animate {
        animate(&trace, view);
    } else if view.format == Format::Json {
        println!("{}", to_json(&trace));
    } else {
        for record in &trace {
            print!("{}", render::render_record(record));
        }
    }
    0
}

/// Accepts either a full `{ "text", "trace" }` output or a bare trace.
fn parse_saved(json: &str) -> Result<StepTrace, cipherviz_core::TraceError> {
    match serde_json::from_str::<CipherOutput>(json) {
        Ok(output) => {
            output.validate()?;
            Ok(output.trace)
        }
        Err(_) => StepTrace::from_json(json),
    }
}

/// Shows one record per frame, sleeping between frames.
fn animate(trace: &StepTrace, view: &View) {
    let mut playback = Playback::new(trace);
    while let Some(record) = playback.advance() {
        match view.format {
            Format::Text => print!("{}", render::render_record(record)),
            Format::Json => println!("{}", to_json_line(record)),
        }
        if !playback.is_finished() {
            thread::sleep(view.settings.frame_delay);
        }
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize result: {}\"}}", e))
}

fn text_line(text: &str) -> String {
    to_json_line(&serde_json::json!({ "text": text }))
}

fn to_json_line<T: serde::Serialize>(value: &T) -> String {
    serde_json::to_string(value)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize record: {}\"}}", e))
}
