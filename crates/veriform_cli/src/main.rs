//! Veriform CLI, the command-line front end for formal-verification setup.
//!
//! Provides `veriform ast` for producing the unified module document from a
//! VHDL file and/or a Yosys netlist, and `veriform gen` for generating the
//! wrapper, proof configuration and harness for a batch of designs.

#![warn(missing_docs)]

mod ast;
mod gen;
mod pipeline;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Veriform: VHDL to formal-verification artifacts.
#[derive(Parser, Debug)]
#[command(name = "veriform", version, about = "Formal verification scaffolding for VHDL designs")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `veriform.toml` settings file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the unified module document for one design.
    Ast(AstArgs),
    /// Generate verification artifacts for one or more VHDL files.
    Gen(GenArgs),
}

/// Arguments for the `veriform ast` subcommand.
#[derive(Parser, Debug)]
pub struct AstArgs {
    /// VHDL source file.
    #[arg(long)]
    pub vhdl: Option<PathBuf>,

    /// Yosys `write_json` netlist.
    #[arg(long)]
    pub yosys_json: Option<PathBuf>,

    /// Netlist module to select (default: the VHDL entity, else the first module).
    #[arg(long)]
    pub design_name: Option<String>,

    /// Output path for the module document.
    #[arg(short, long)]
    pub out: PathBuf,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `veriform gen` subcommand.
#[derive(Parser, Debug)]
pub struct GenArgs {
    /// VHDL source files, one design each.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output root; each design gets `<out>/<design>/`.
    #[arg(short, long)]
    pub out: PathBuf,

    /// Directory holding `<design>.json` netlists to merge.
    #[arg(long)]
    pub netlist_dir: Option<PathBuf>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Number of designs processed in parallel (default: all cores).
    #[arg(short, long)]
    pub jobs: Option<usize>,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// One JSON object per line.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a settings file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Ast(ref args) => ast::run(args, &global),
        Command::Gen(ref args) => gen::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the log subscriber. `-v` and `-q` override `RUST_LOG`.
fn init_tracing(global: &GlobalArgs) {
    let filter = if global.verbose {
        EnvFilter::new("debug")
    } else if global.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .try_init();
}
