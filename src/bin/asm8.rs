use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use asm8::emit::{write_program, Format};
use asm8::{assemble, AsmConfig, MnemonicPolicy};

#[derive(Parser, Debug)]
#[command(author, version, about = "Assemble a program for the 8-bit CPU into a memory image")]
struct Opts {
    /// Program source (`.text` / `.data` sections)
    #[arg(value_name = "PROGRAM")]
    input: PathBuf,
    /// Assembler configuration as JSON ({ "capacity": .., "unknown_mnemonic": "reject" | "nop" })
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Encode unknown mnemonics as nop instead of failing
    #[arg(long)]
    lenient: bool,
    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Hex)]
    format: OutputFormat,
    /// Write output to file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Hex,
    Bin,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(f: OutputFormat) -> Self {
        match f {
            OutputFormat::Hex => Format::Hex,
            OutputFormat::Bin => Format::Bin,
            OutputFormat::Json => Format::Json,
        }
    }
}

fn load_config(opts: &Opts) -> Result<AsmConfig> {
    let mut cfg = match &opts.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => AsmConfig::default(),
    };
    if opts.lenient {
        cfg.unknown_mnemonic = MnemonicPolicy::Nop;
    }
    Ok(cfg)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let opts = Opts::parse();
    let cfg = load_config(&opts)?;

    let source = fs::read_to_string(&opts.input)
        .with_context(|| format!("reading {}", opts.input.display()))?;
    let program = assemble(&source, &cfg)
        .with_context(|| format!("assembling {}", opts.input.display()))?;

    for diag in &program.diagnostics {
        eprintln!("warning: {diag}");
    }

    let format = opts.format.into();
    match &opts.output {
        Some(path) => {
            let mut file = fs::File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_program(&mut file, &program, format)?;
        }
        None => {
            write_program(&mut io::stdout().lock(), &program, format)?;
        }
    }
    Ok(())
}
