//! Pipeline orchestrator.
//!
//! Owns the per-run sequence: resolve the quantization level, make sure the
//! quantizer binary exists, snapshot the work items, then walk each item
//! through its stages strictly in order. Each item's progress is probed from
//! the filesystem exactly once, at item start; every stage failure aborts
//! the whole run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::convert;
use crate::discover::{self, DiscoveryMode, WorkItem};
use crate::error::{ForgeError, Result};
use crate::quantize;
use crate::toolchain;

/// Where an item already is when a run picks it up, derived from one
/// filesystem probe of its intermediate and final artifact paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ItemState {
    NotStarted,
    Converted,
    Quantized,
}

impl ItemState {
    fn probe(intermediate: Option<&Path>, final_path: &Path) -> Self {
        if final_path.exists() {
            ItemState::Quantized
        } else if intermediate.is_some_and(Path::exists) {
            ItemState::Converted
        } else {
            ItemState::NotStarted
        }
    }
}

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Items whose quantization actually ran.
    pub processed: usize,
    /// Items skipped because their final artifact already existed.
    pub skipped: usize,
}

impl RunSummary {
    /// Total number of discovered work items.
    pub fn total(&self) -> usize {
        self.processed + self.skipped
    }
}

/// The convert-and-quantize pipeline.
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Directory-mode run: each subdirectory of `input/` is a downloaded
    /// model, converted to F16 GGUF and then quantized.
    pub async fn run_models(&self, quant_short: &str) -> Result<RunSummary> {
        self.run(quant_short, DiscoveryMode::ModelDirs).await
    }

    /// File-mode run: each `.gguf` file in `input/` is quantized directly.
    pub async fn run_gguf(&self, quant_short: &str) -> Result<RunSummary> {
        self.run(quant_short, DiscoveryMode::GgufFiles).await
    }

    async fn run(&self, quant_short: &str, mode: DiscoveryMode) -> Result<RunSummary> {
        let canonical = self.config.levels.resolve(quant_short)?.to_string();
        info!("using quantization: {}", canonical);

        self.config.ensure_dirs()?;
        toolchain::ensure_quantizer(&self.config.toolchain).await?;

        let items = discover::discover(&self.config.input_dir, mode)?;
        if items.is_empty() {
            info!(
                "nothing to do: place a model in {} and rerun",
                self.config.input_dir.display()
            );
            return Ok(RunSummary::default());
        }

        let mut summary = RunSummary::default();
        for item in &items {
            info!("=== processing: {} ===", item.label());
            let ran = match item {
                WorkItem::ModelDir { path, name } => {
                    self.process_model_dir(path, name, &canonical).await?
                }
                WorkItem::GgufFile { path } => self.process_gguf_file(path, &canonical).await?,
            };
            if ran {
                summary.processed += 1;
            } else {
                summary.skipped += 1;
            }
        }

        info!(
            "run complete: {} quantized, {} already up to date",
            summary.processed, summary.skipped
        );
        Ok(summary)
    }

    /// Convert + quantize one model directory. Returns whether quantization
    /// actually ran.
    async fn process_model_dir(
        &self,
        model_dir: &Path,
        name: &str,
        canonical: &str,
    ) -> Result<bool> {
        let intermediate = self.config.output_dir.join(format!("{name}_f16.gguf"));
        let final_path = self
            .config
            .output_dir
            .join(format!("{name}_{canonical}.gguf"));

        let state = ItemState::probe(Some(&intermediate), &final_path);
        debug!("item state for {}: {:?}", name, state);

        let ran = if state == ItemState::Quantized {
            info!("already quantized: {}", final_path.display());
            false
        } else {
            // convert() itself skips when the intermediate exists; the probe
            // only decides whether to log the skip up front.
            convert::convert(&self.config, model_dir, &intermediate).await?;
            quantize::quantize(&self.config, &intermediate, &final_path, canonical).await?;
            true
        };

        // Cleanup: never delete the intermediate unless the final artifact
        // is confirmed on disk. Also reaps leftovers next to an existing
        // final artifact from an interrupted earlier run.
        if intermediate.exists() && final_path.exists() {
            std::fs::remove_file(&intermediate)
                .map_err(|e| ForgeError::io("removing intermediate artifact", &intermediate, e))?;
            info!("removed intermediate: {}", intermediate.display());
        }

        if ran {
            info!("model ready: {}", final_path.display());
        }
        Ok(ran)
    }

    /// Quantize one standalone GGUF file. The input is operator-owned and is
    /// never deleted. Returns whether quantization actually ran.
    async fn process_gguf_file(&self, input: &Path, canonical: &str) -> Result<bool> {
        let final_path = self.gguf_output_path(input, canonical)?;

        if ItemState::probe(None, &final_path) == ItemState::Quantized {
            info!("already quantized: {}", final_path.display());
            return Ok(false);
        }

        quantize::quantize(&self.config, input, &final_path, canonical).await?;
        info!("model ready: {}", final_path.display());
        Ok(true)
    }

    /// `model.gguf` -> `{output_dir}/model_{CANONICAL}.gguf`.
    fn gguf_output_path(&self, input: &Path, canonical: &str) -> Result<PathBuf> {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| ForgeError::InvalidWorkItem {
                path: input.to_path_buf(),
                message: "no usable file name".to_string(),
            })?;
        Ok(self
            .config
            .output_dir
            .join(format!("{stem}_{canonical}.gguf")))
    }
}
