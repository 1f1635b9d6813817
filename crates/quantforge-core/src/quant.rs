//! Quantization level catalog.
//!
//! Maps the short user-facing codes (`Q4`, `Q8`, ...) to the canonical
//! identifiers the `llama-quantize` binary expects (`Q4_K_M`, `Q8_0`, ...).
//! The table travels inside `PipelineConfig` so tests can substitute a
//! reduced catalog.

use serde::{Deserialize, Serialize};

use crate::error::{ForgeError, Result};

/// One entry of the quantization catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct QuantLevel {
    /// Short user-facing code (e.g. "Q4")
    pub short_code: String,
    /// Canonical identifier consumed by llama-quantize (e.g. "Q4_K_M")
    pub canonical_id: String,
}

impl QuantLevel {
    fn new(short_code: &str, canonical_id: &str) -> Self {
        Self {
            short_code: short_code.to_string(),
            canonical_id: canonical_id.to_string(),
        }
    }
}

/// Ordered, fixed catalog of supported quantization levels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantLevelTable {
    levels: Vec<QuantLevel>,
}

impl QuantLevelTable {
    /// Build a table from an explicit set of levels.
    pub fn new(levels: Vec<QuantLevel>) -> Self {
        Self { levels }
    }

    /// Resolve a short code (case-insensitive) to its canonical identifier.
    pub fn resolve(&self, short_code: &str) -> Result<&str> {
        self.levels
            .iter()
            .find(|l| l.short_code.eq_ignore_ascii_case(short_code))
            .map(|l| l.canonical_id.as_str())
            .ok_or_else(|| ForgeError::UnknownQuantLevel {
                value: short_code.to_string(),
                valid: self.short_codes().join(", "),
            })
    }

    /// Short codes in table order, for error messages and help text.
    pub fn short_codes(&self) -> Vec<&str> {
        self.levels.iter().map(|l| l.short_code.as_str()).collect()
    }

    pub fn levels(&self) -> &[QuantLevel] {
        &self.levels
    }
}

impl Default for QuantLevelTable {
    /// The six llama.cpp K-quant presets exposed by the pipeline.
    fn default() -> Self {
        Self::new(vec![
            QuantLevel::new("Q8", "Q8_0"),
            QuantLevel::new("Q6", "Q6_K"),
            QuantLevel::new("Q5", "Q5_K_M"),
            QuantLevel::new("Q4", "Q4_K_M"),
            QuantLevel::new("Q3", "Q3_K_M"),
            QuantLevel::new("Q2", "Q2_K"),
        ])
    }
}
