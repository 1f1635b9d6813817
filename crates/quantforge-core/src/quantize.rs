//! GGUF quantization stage.
//!
//! Invokes the quantizer binary with the llama-quantize argument order:
//! input path, output path, canonical level. The binary name is resolved at
//! invocation time (primary first, then the historical fallback) because a
//! pre-built checkout may carry either name regardless of what this run
//! built.

use std::path::Path;

use tracing::info;

use crate::config::PipelineConfig;
use crate::error::{ForgeError, Result};
use crate::process::run_command;
use crate::toolchain;

/// Quantize `input` to `output` at the given canonical level.
pub async fn quantize(
    config: &PipelineConfig,
    input: &Path,
    output: &Path,
    canonical_level: &str,
) -> Result<()> {
    let binary = toolchain::resolve_binary(&config.toolchain).ok_or_else(|| {
        ForgeError::QuantizerMissing {
            primary: config.toolchain.primary_binary(),
            fallback: config.toolchain.fallback_binary(),
        }
    })?;

    info!(
        "quantizing {} -> {} ({})",
        input.display(),
        output.display(),
        canonical_level
    );
    run_command(
        &binary,
        [input.as_os_str(), output.as_os_str(), canonical_level.as_ref()],
        None,
    )
    .await
}
