//! HF-to-GGUF conversion stage.
//!
//! Wraps llama.cpp's `convert_hf_to_gguf.py` to turn a model directory into
//! a full-precision F16 GGUF. Existence of the output file is the only
//! idempotency signal: a present intermediate skips the stage entirely.

use std::path::Path;

use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::process::run_command;

/// Convert a model directory to an F16 GGUF at `out_path`.
///
/// The model directory is not validated here; a missing `config.json` or
/// weight files surface as the converter's own failure.
pub async fn convert(config: &PipelineConfig, model_dir: &Path, out_path: &Path) -> Result<()> {
    if out_path.exists() {
        debug!(
            "skipping conversion, intermediate already exists: {}",
            out_path.display()
        );
        return Ok(());
    }

    info!("converting {} to F16 GGUF", model_dir.display());
    let script = config.toolchain.convert_script();
    run_command(
        &config.python,
        [
            script.as_os_str(),
            model_dir.as_os_str(),
            "--outtype".as_ref(),
            "f16".as_ref(),
            "--outfile".as_ref(),
            out_path.as_os_str(),
        ],
        None,
    )
    .await
}
