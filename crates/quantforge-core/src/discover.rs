//! Work discovery.
//!
//! Scans the input directory once at the start of a run and materializes a
//! sorted snapshot of work items. Files or directories added afterwards are
//! picked up by the next run, not this one.

use std::path::{Path, PathBuf};

use crate::error::{ForgeError, Result};

/// How the input directory is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiscoveryMode {
    /// Immediate `.gguf` files, quantized in place (no conversion).
    GgufFiles,
    /// Immediate subdirectories, each a downloaded model to convert.
    ModelDirs,
}

/// One unit of work for the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkItem {
    /// A standalone GGUF file to quantize.
    GgufFile { path: PathBuf },
    /// A model directory; `name` drives the output filenames.
    ModelDir { path: PathBuf, name: String },
}

impl WorkItem {
    /// Display label for logs.
    pub fn label(&self) -> String {
        match self {
            WorkItem::GgufFile { path } => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
            WorkItem::ModelDir { name, .. } => name.clone(),
        }
    }
}

/// List eligible work items under `input_dir`.
///
/// An empty result is not an error; the orchestrator reports it and ends
/// the run successfully.
pub fn discover(input_dir: &Path, mode: DiscoveryMode) -> Result<Vec<WorkItem>> {
    let entries = std::fs::read_dir(input_dir)
        .map_err(|e| ForgeError::io("reading input directory", input_dir, e))?;

    let mut items = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ForgeError::io("reading input entry", input_dir, e))?;
        let path = entry.path();
        match mode {
            DiscoveryMode::GgufFiles => {
                let is_gguf = path.is_file()
                    && path.extension().and_then(|e| e.to_str()) == Some("gguf");
                if is_gguf {
                    items.push(WorkItem::GgufFile { path });
                }
            }
            DiscoveryMode::ModelDirs => {
                if path.is_dir() {
                    let name = entry.file_name().to_string_lossy().into_owned();
                    items.push(WorkItem::ModelDir { path, name });
                }
            }
        }
    }

    // Deterministic processing order regardless of read_dir ordering.
    items.sort_by_key(|item| match item {
        WorkItem::GgufFile { path } => path.clone(),
        WorkItem::ModelDir { path, .. } => path.clone(),
    });
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gguf_file_mode_filters_by_suffix() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("b.gguf"), b"").unwrap();
        std::fs::write(tmp.path().join("a.gguf"), b"").unwrap();
        std::fs::write(tmp.path().join("notes.txt"), b"").unwrap();
        std::fs::create_dir(tmp.path().join("model.gguf.d")).unwrap();

        let items = discover(tmp.path(), DiscoveryMode::GgufFiles).unwrap();
        let labels: Vec<String> = items.iter().map(|i| i.label()).collect();
        assert_eq!(labels, vec!["a.gguf", "b.gguf"]);
    }

    #[test]
    fn test_model_dir_mode_lists_subdirectories() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("Qwen_Qwen3-0.5B")).unwrap();
        std::fs::create_dir(tmp.path().join("another-model")).unwrap();
        std::fs::write(tmp.path().join("stray.gguf"), b"").unwrap();

        let items = discover(tmp.path(), DiscoveryMode::ModelDirs).unwrap();
        assert_eq!(items.len(), 2);
        // Sorted by path; uppercase sorts before lowercase.
        assert!(matches!(
            &items[0],
            WorkItem::ModelDir { name, .. } if name == "Qwen_Qwen3-0.5B"
        ));
        assert!(matches!(
            &items[1],
            WorkItem::ModelDir { name, .. } if name == "another-model"
        ));
    }

    #[test]
    fn test_empty_input_is_ok() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(discover(tmp.path(), DiscoveryMode::GgufFiles)
            .unwrap()
            .is_empty());
        assert!(discover(tmp.path(), DiscoveryMode::ModelDirs)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_missing_input_dir_is_io_error() {
        let err = discover(Path::new("/nonexistent/input"), DiscoveryMode::GgufFiles).unwrap_err();
        assert!(matches!(err, ForgeError::Io { .. }));
    }
}
