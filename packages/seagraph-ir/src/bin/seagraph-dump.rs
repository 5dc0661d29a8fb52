//! seagraph-dump
//!
//! Lowers a JSON-serialized, resolved AST to sea-of-nodes IR and prints it.
//!
//! # Usage
//!
//! ```bash
//! seagraph-dump program.json                      # DOT for every function
//! seagraph-dump program.json --function main      # one function
//! seagraph-dump program.json --format json -o ir.json
//! seagraph-dump program.json --config seagraph.yaml -v
//! cat program.json | seagraph-dump -
//! ```
//!
//! Exit status: 0 on success, 1 for errors in the input program or its
//! configuration, 2 for internal compiler errors.

use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

use seagraph_ir::config::{GeneratorConfig, Preset};
use seagraph_ir::features::ir_generation::GenerateIRUseCase;
use seagraph_ir::features::ir_graph::IRModule;
use seagraph_ir::{GraphExporter, IRGenerator, Program, SeagraphError};

#[derive(Parser)]
#[command(name = "seagraph-dump")]
#[command(about = "Dump the sea-of-nodes IR of a resolved AST", long_about = None)]
struct Cli {
    /// JSON-serialized program, or `-` for stdin
    input: PathBuf,

    /// Generator configuration (YAML schema v1)
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Generator preset: reference, balanced or optimizing
    #[arg(short, long)]
    preset: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Dot)]
    format: OutputFormat,

    /// Only dump this function
    #[arg(long)]
    function: Option<String>,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// More logging (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Dot,
    Json,
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn,seagraph_ir=info",
        1 => "info,seagraph_ir=debug",
        _ => "debug,seagraph_ir=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.is_internal() => {
            error!("internal compiler error: {err}");
            eprintln!("internal compiler error: {err}");
            ExitCode::from(2)
        }
        Err(err) => {
            error!("{err}");
            eprintln!("error: {err}");
            ExitCode::from(1)
        }
    }
}

fn run(cli: &Cli) -> Result<(), SeagraphError> {
    let config = load_config(cli)?;
    let program = read_program(&cli.input)?;

    let module = GenerateIRUseCase::new(IRGenerator::new(config)).execute(&program)?;
    let rendered = render(&module, cli)?;

    match &cli.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!(path = %path.display(), "IR written");
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<GeneratorConfig, SeagraphError> {
    let config = match (&cli.config, &cli.preset) {
        (Some(path), _) => GeneratorConfig::from_yaml(path)?,
        (None, Some(name)) => GeneratorConfig::preset(Preset::from_str(name)?).validated()?,
        (None, None) => GeneratorConfig::default(),
    };
    info!(config = %config.describe(), "configuration loaded");
    Ok(config)
}

fn read_program(input: &Path) -> Result<Program, SeagraphError> {
    let text = if input.as_os_str() == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(input)?
    };
    Ok(serde_json::from_str(&text)?)
}

fn render(module: &IRModule, cli: &Cli) -> Result<String, SeagraphError> {
    match &cli.function {
        Some(name) => {
            let function = module.functions().find(|f| &f.name == name).ok_or_else(|| {
                SeagraphError::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no function named '{name}'"),
                ))
            })?;
            match cli.format {
                OutputFormat::Dot => Ok(GraphExporter::to_dot(&function.graph)),
                OutputFormat::Json => Ok(serde_json::to_string_pretty(function)? + "\n"),
            }
        }
        None => match cli.format {
            OutputFormat::Dot => Ok(GraphExporter::module_to_dot(module)),
            OutputFormat::Json => Ok(serde_json::to_string_pretty(module)? + "\n"),
        },
    }
}
