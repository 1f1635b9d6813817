//! quantforge core - headless GGUF conversion and quantization pipeline.
//!
//! Turns downloaded Hugging Face model directories into quantized GGUF
//! artifacts by orchestrating the external llama.cpp toolchain: build the
//! `llama-quantize` binary on demand (with a fallback to its historical
//! target name), convert model directories to intermediate F16 GGUF files
//! via `convert_hf_to_gguf.py`, quantize to the requested level, and clean
//! up intermediates once the final artifact is confirmed.
//!
//! The pipeline is deliberately sequential: one logical thread of control,
//! every external command awaited to completion before the next starts.
//!
//! # Example
//!
//! ```rust,ignore
//! use quantforge_core::{Pipeline, PipelineConfig};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> quantforge_core::Result<()> {
//!     let config = PipelineConfig::for_root(std::path::Path::new("/opt/quantforge"));
//!     let summary = Pipeline::new(config).run_models("Q4").await?;
//!     println!("{} models quantized", summary.processed);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod convert;
pub mod discover;
pub mod error;
pub mod pipeline;
pub mod process;
pub mod quant;
pub mod quantize;
pub mod toolchain;

// Re-export commonly used types
pub use config::{BuildTarget, PipelineConfig, ToolchainConfig};
pub use discover::{DiscoveryMode, WorkItem};
pub use error::{ForgeError, Result};
pub use pipeline::{Pipeline, RunSummary};
pub use quant::{QuantLevel, QuantLevelTable};
