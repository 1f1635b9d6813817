//! Pipeline configuration.
//!
//! All paths, program names, and the quantization catalog are carried in an
//! explicit `PipelineConfig` handed to the orchestrator, so tests can point
//! the pipeline at temporary directories and fake tools.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};
use crate::quant::QuantLevelTable;

/// Conventional directory names under the install root.
pub const INPUT_DIR_NAME: &str = "input";
pub const OUTPUT_DIR_NAME: &str = "output";
pub const TOOLCHAIN_DIR_NAME: &str = "llama.cpp";
pub const BUILD_DIR_NAME: &str = "build";
pub const CONVERT_SCRIPT_NAME: &str = "convert_hf_to_gguf.py";

/// The cmake target the quantizer binary is built from, with the
/// pre-rename fallback kept for older llama.cpp checkouts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildTarget {
    pub primary: String,
    pub fallback: String,
}

impl Default for BuildTarget {
    fn default() -> Self {
        Self {
            primary: "llama-quantize".to_string(),
            fallback: "quantize".to_string(),
        }
    }
}

/// Where the llama.cpp checkout lives and how to build it.
#[derive(Debug, Clone)]
pub struct ToolchainConfig {
    /// llama.cpp source checkout (operator-provided).
    pub source_dir: PathBuf,
    /// cmake build directory under the checkout.
    pub build_dir: PathBuf,
    /// cmake program; tests substitute a fake.
    pub cmake: PathBuf,
    /// Quantizer build target names.
    pub target: BuildTarget,
}

impl ToolchainConfig {
    pub fn for_source_dir(source_dir: PathBuf) -> Self {
        let build_dir = source_dir.join(BUILD_DIR_NAME);
        Self {
            source_dir,
            build_dir,
            cmake: PathBuf::from("cmake"),
            target: BuildTarget::default(),
        }
    }

    /// Binary path a given cmake target produces (`{build}/bin/{target}`).
    pub fn binary_for_target(&self, target: &str) -> PathBuf {
        self.build_dir.join("bin").join(target)
    }

    /// Path of the primary-named quantizer binary.
    pub fn primary_binary(&self) -> PathBuf {
        self.binary_for_target(&self.target.primary)
    }

    /// Path of the fallback-named quantizer binary.
    pub fn fallback_binary(&self) -> PathBuf {
        self.binary_for_target(&self.target.fallback)
    }

    /// Path to `convert_hf_to_gguf.py` inside the checkout.
    pub fn convert_script(&self) -> PathBuf {
        self.source_dir.join(CONVERT_SCRIPT_NAME)
    }
}

/// Full configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Operator-populated input directory.
    pub input_dir: PathBuf,
    /// Destination for intermediate and final artifacts.
    pub output_dir: PathBuf,
    /// llama.cpp toolchain layout.
    pub toolchain: ToolchainConfig,
    /// Python interpreter used for the conversion script.
    pub python: PathBuf,
    /// Quantization level catalog.
    pub levels: QuantLevelTable,
}

impl PipelineConfig {
    /// Conventional layout relative to an install root: `input/`, `output/`
    /// and a `llama.cpp/` checkout side by side.
    pub fn for_root(root: &Path) -> Self {
        Self {
            input_dir: root.join(INPUT_DIR_NAME),
            output_dir: root.join(OUTPUT_DIR_NAME),
            toolchain: ToolchainConfig::for_source_dir(root.join(TOOLCHAIN_DIR_NAME)),
            python: PathBuf::from("python3"),
            levels: QuantLevelTable::default(),
        }
    }

    /// Create the input and output directories if missing.
    pub fn ensure_dirs(&self) -> Result<()> {
        for dir in [&self.input_dir, &self.output_dir] {
            std::fs::create_dir_all(dir)
                .map_err(|e| ForgeError::io("creating pipeline directory", dir, e))?;
        }
        Ok(())
    }
}
