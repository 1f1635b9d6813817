//! External command execution.
//!
//! One blocking-until-exit helper shared by every stage. Stdout/stderr are
//! inherited so the operator sees the external tool's own output; the
//! pipeline never parses it.

use std::ffi::OsStr;
use std::path::Path;

use tokio::process::Command;
use tracing::info;

use crate::error::{ForgeError, Result};

/// Run an external command to completion.
///
/// The child inherits the parent's stdout/stderr. A spawn failure or a
/// non-zero exit status maps to `ForgeError::CommandFailed`; callers treat
/// that as fatal for the whole run.
pub async fn run_command<I, S>(program: &Path, args: I, cwd: Option<&Path>) -> Result<()>
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<String> = args
        .into_iter()
        .map(|a| a.as_ref().to_string_lossy().into_owned())
        .collect();
    let rendered = render_command(program, &args);
    info!(">>> running: {}", rendered);

    let mut cmd = Command::new(program);
    cmd.args(&args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let status = cmd.status().await.map_err(|e| ForgeError::CommandFailed {
        command: rendered.clone(),
        reason: format!("failed to start: {e}"),
    })?;

    if !status.success() {
        return Err(ForgeError::CommandFailed {
            command: rendered,
            reason: format!("exited with status {}", status.code().unwrap_or(-1)),
        });
    }
    Ok(())
}

/// Render a command line for logs and error messages.
fn render_command(program: &Path, args: &[String]) -> String {
    let mut parts = vec![program.to_string_lossy().into_owned()];
    parts.extend(args.iter().cloned());
    parts.join(" ")
}
