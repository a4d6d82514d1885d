// src/render.rs

//! Hand DOT text to the external GraphViz renderer.

use std::fmt;
use std::io::ErrorKind;
use std::process::Stdio;
use std::str::FromStr;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{Result, TriggerGraphError};

/// What to produce: the DOT text itself, or anything the renderer accepts
/// for `-T` (`svg`, `png`, `png:cairo`, ...).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    Dot,
    Rendered(String),
}

impl OutputFormat {
    /// Format requested by a path such as `/graph.svg`.
    ///
    /// Only paths starting with `/graph.` are graph requests; the format is
    /// whatever follows the last dot.
    pub fn from_request_path(path: &str) -> Option<Self> {
        if !path.starts_with("/graph.") {
            return None;
        }
        let (_, extension) = path.rsplit_once('.')?;
        extension.parse().ok()
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let format = s.trim().to_lowercase();
        match format.as_str() {
            "" => Err("output format must not be empty".to_string()),
            "dot" | "gv" => Ok(OutputFormat::Dot),
            other
                if other
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == ':') =>
            {
                Ok(OutputFormat::Rendered(other.to_string()))
            }
            other => Err(format!("invalid output format: {other}")),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Dot => f.write_str("dot"),
            OutputFormat::Rendered(format) => f.write_str(format),
        }
    }
}

/// Produce the bytes for `format`: DOT passes straight through, everything
/// else goes through [`run_dot`].
pub async fn render(dot_exe: &str, dot: &str, format: &OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Dot => Ok(dot.as_bytes().to_vec()),
        OutputFormat::Rendered(format) => run_dot(dot_exe, dot, format).await,
    }
}

/// Run `dot_exe -q -T<format> -Kdot` with `dot` on stdin and return stdout.
pub async fn run_dot(dot_exe: &str, dot: &str, format: &str) -> Result<Vec<u8>> {
    info!(renderer = %dot_exe, format = %format, "starting renderer");

    let mut child = Command::new(dot_exe)
        .arg("-q")
        .arg(format!("-T{format}"))
        .arg("-Kdot")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .map_err(|e| {
            TriggerGraphError::RenderError(format!("spawning renderer '{dot_exe}': {e}"))
        })?;

    // Feed stdin from its own task so a large diagram cannot deadlock against
    // a full stdout pipe. Dropping stdin closes the pipe (EOF for the renderer).
    let stdin = child.stdin.take();
    let input = dot.as_bytes().to_vec();
    let writer = tokio::spawn(async move {
        match stdin {
            Some(mut stdin) => stdin.write_all(&input).await,
            None => Ok(()),
        }
    });

    let output = child.wait_with_output().await?;
    let written = writer
        .await
        .map_err(|e| TriggerGraphError::RenderError(format!("writing renderer input: {e}")))?;
    let stderr = String::from_utf8_lossy(&output.stderr);

    if !output.status.success() {
        let code = output.status.code().unwrap_or(-1);
        warn!(renderer = %dot_exe, exit_code = code, stderr = %stderr.trim(), "renderer failed");
        return Err(TriggerGraphError::RenderError(format!(
            "'{dot_exe}' exited with code {code}: {}",
            stderr.trim()
        )));
    }

    match written {
        Err(e) if e.kind() == ErrorKind::BrokenPipe => {
            debug!(renderer = %dot_exe, "renderer closed stdin before reading all input");
        }
        other => other?,
    }

    if !stderr.trim().is_empty() {
        debug!(renderer = %dot_exe, "stderr: {}", stderr.trim());
    }
    debug!(bytes = output.stdout.len(), "renderer finished");

    Ok(output.stdout)
}
