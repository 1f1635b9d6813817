//! quantforge CLI - batch GGUF conversion and quantization.
//!
//! Two entry points over the same pipeline: `run` converts downloaded model
//! directories to GGUF and quantizes them; `quantize` re-quantizes existing
//! GGUF files. Both exit 0 on success (including "nothing found") and 1 on
//! bad input or external tool failure.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use quantforge_core::{Pipeline, PipelineConfig};

#[derive(Parser, Debug)]
#[command(name = "quantforge")]
#[command(about = "Convert and quantize models with the llama.cpp toolchain")]
struct Args {
    /// Install root containing input/, output/ and the llama.cpp checkout
    /// (defaults to the executable's directory)
    #[arg(long)]
    root: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Convert each model directory under input/ to GGUF and quantize it
    Run {
        /// Quantization type: Q8, Q6, Q5, Q4 (default), Q3, Q2
        #[arg(default_value = "Q4")]
        quant_type: String,
    },
    /// Quantize each .gguf file under input/ directly
    Quantize {
        /// Quantization type: Q8, Q6, Q5, Q4 (default), Q3, Q2
        #[arg(default_value = "Q4")]
        quant_type: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.debug { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .compact()
        .init();

    let root = match args.root {
        Some(path) => path,
        None => default_root()?,
    };
    info!("install root: {}", root.display());

    let pipeline = Pipeline::new(PipelineConfig::for_root(&root));
    let summary = match args.command {
        Command::Run { quant_type } => pipeline.run_models(&quant_type).await?,
        Command::Quantize { quant_type } => pipeline.run_gguf(&quant_type).await?,
    };

    if summary.total() == 0 {
        info!(
            "no eligible input found in {}",
            pipeline.config().input_dir.display()
        );
    }
    Ok(())
}

/// The directory the binary lives in, falling back to the current directory.
fn default_root() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    match exe.parent() {
        Some(dir) => Ok(dir.to_path_buf()),
        None => Ok(std::env::current_dir()?),
    }
}
