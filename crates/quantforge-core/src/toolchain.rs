//! Quantizer toolchain builder.
//!
//! Ensures the `llama-quantize` binary exists before any quantization runs,
//! building it with cmake on demand. The build target was renamed upstream
//! (`quantize` → `llama-quantize`), so a failed primary-target build is
//! retried once against the old name.

use std::path::PathBuf;

use tracing::{info, warn};

use crate::config::ToolchainConfig;
use crate::error::{ForgeError, Result};
use crate::process::run_command;

/// Ensure the quantizer binary exists, building it if necessary.
///
/// Returns the path of the binary that is actually on disk. Building only
/// happens when neither the primary- nor fallback-named binary is present;
/// the check makes reruns cheap.
pub async fn ensure_quantizer(toolchain: &ToolchainConfig) -> Result<PathBuf> {
    if let Some(existing) = resolve_binary(toolchain) {
        info!("quantizer already built: {}", existing.display());
        return Ok(existing);
    }

    info!(
        "quantizer binary missing, building target '{}' with cmake",
        toolchain.target.primary
    );

    std::fs::create_dir_all(&toolchain.build_dir)
        .map_err(|e| ForgeError::io("creating toolchain build dir", &toolchain.build_dir, e))?;

    configure(toolchain).await?;

    if let Err(primary_err) = build_target(toolchain, &toolchain.target.primary).await {
        warn!(
            "build target '{}' failed, retrying with '{}': {}",
            toolchain.target.primary, toolchain.target.fallback, primary_err
        );
        build_target(toolchain, &toolchain.target.fallback).await?;
    }

    resolve_binary(toolchain).ok_or_else(|| ForgeError::QuantizerMissing {
        primary: toolchain.primary_binary(),
        fallback: toolchain.fallback_binary(),
    })
}

/// Resolve the on-disk quantizer binary, primary name first.
///
/// Also used at quantization time: the naming uncertainty exists whether or
/// not a build just happened.
pub fn resolve_binary(toolchain: &ToolchainConfig) -> Option<PathBuf> {
    let primary = toolchain.primary_binary();
    if primary.exists() {
        return Some(primary);
    }
    let fallback = toolchain.fallback_binary();
    if fallback.exists() {
        return Some(fallback);
    }
    None
}

async fn configure(toolchain: &ToolchainConfig) -> Result<()> {
    run_command(
        &toolchain.cmake,
        ["-B", "build"],
        Some(&toolchain.source_dir),
    )
    .await
}

async fn build_target(toolchain: &ToolchainConfig, target: &str) -> Result<()> {
    run_command(
        &toolchain.cmake,
        [
            "--build",
            "build",
            "--config",
            "Release",
            "--target",
            target,
            "-j",
        ],
        Some(&toolchain.source_dir),
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn toolchain_at(root: &Path) -> ToolchainConfig {
        ToolchainConfig::for_source_dir(root.join("llama.cpp"))
    }

    #[test]
    fn test_resolve_prefers_primary() {
        let tmp = tempfile::tempdir().unwrap();
        let toolchain = toolchain_at(tmp.path());
        let bin_dir = toolchain.build_dir.join("bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        std::fs::write(bin_dir.join("llama-quantize"), b"").unwrap();
        std::fs::write(bin_dir.join("quantize"), b"").unwrap();

        let resolved = resolve_binary(&toolchain).unwrap();
        assert_eq!(resolved, toolchain.primary_binary());
    }

    #[test]
    fn test_resolve_falls_back_to_old_name() {
        let tmp = tempfile::tempdir().unwrap();
        let toolchain = toolchain_at(tmp.path());
        let bin_dir = toolchain.build_dir.join("bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        std::fs::write(bin_dir.join("quantize"), b"").unwrap();

        let resolved = resolve_binary(&toolchain).unwrap();
        assert_eq!(resolved, toolchain.fallback_binary());
    }

    #[test]
    fn test_resolve_none_when_unbuilt() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(resolve_binary(&toolchain_at(tmp.path())).is_none());
    }

    #[tokio::test]
    async fn test_ensure_short_circuits_on_existing_binary() {
        let tmp = tempfile::tempdir().unwrap();
        let mut toolchain = toolchain_at(tmp.path());
        // A cmake that can never run: if ensure_quantizer tried to build,
        // the spawn would fail and so would the test.
        toolchain.cmake = PathBuf::from("/nonexistent/cmake");

        let bin_dir = toolchain.build_dir.join("bin");
        std::fs::create_dir_all(&bin_dir).unwrap();
        std::fs::write(bin_dir.join("llama-quantize"), b"").unwrap();

        let resolved = ensure_quantizer(&toolchain).await.unwrap();
        assert_eq!(resolved, toolchain.primary_binary());
    }
}
