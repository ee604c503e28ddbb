//! FFprobe-based [`dm_probe::Prober`] implementation.
//!
//! Shells out to `ffprobe -v quiet -print_format json -show_format -show_streams`
//! and parses the output with [`dm_probe::parse_ffprobe_json`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use dm_probe::{parse_ffprobe_json, ProbeData, Prober};

use crate::command::{ToolCommand, DEFAULT_TIMEOUT};
use crate::tools::ToolConfig;

/// A prober backed by the `ffprobe` CLI.
#[derive(Debug, Clone)]
pub struct FfprobeProber {
    ffprobe_path: PathBuf,
    timeout: Duration,
}

impl FfprobeProber {
    /// Create a new prober using the given ffprobe path.
    pub fn new(ffprobe_path: PathBuf) -> Self {
        Self {
            ffprobe_path,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Create a prober from a discovered tool entry.
    pub fn from_tool(tool: &ToolConfig) -> Self {
        Self {
            ffprobe_path: tool.path.clone(),
            timeout: tool.timeout,
        }
    }

    /// Probe asynchronously; the sync [`Prober::probe`] wraps this.
    pub async fn probe_async(&self, path: &Path) -> dm_core::Result<ProbeData> {
        let mut cmd = ToolCommand::new(self.ffprobe_path.clone());
        cmd.args([
            "-v", "quiet",
            "-print_format", "json",
            "-show_format",
            "-show_streams",
        ]);
        cmd.arg(path.to_string_lossy().as_ref());
        cmd.timeout(self.timeout);

        let output = cmd.execute().await?;
        let mut data = parse_ffprobe_json(&output.stdout)?;
        if data.file_path.is_none() {
            data.file_path = Some(path.to_path_buf());
        }
        tracing::debug!(
            "probed {}: {} streams, {} audio",
            path.display(),
            data.streams.len(),
            data.count(dm_core::StreamKind::Audio)
        );
        Ok(data)
    }
}

impl Prober for FfprobeProber {
    fn name(&self) -> &'static str {
        "ffprobe"
    }

    fn probe(&self, path: &Path) -> dm_core::Result<ProbeData> {
        // The Prober trait is sync, but ToolCommand is async.
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => tokio::task::block_in_place(|| handle.block_on(self.probe_async(path))),
            Err(_) => {
                let rt = tokio::runtime::Runtime::new().map_err(|e| {
                    dm_core::Error::tool("ffprobe", format!("failed to create tokio runtime: {e}"))
                })?;
                rt.block_on(self.probe_async(path))
            }
        }
    }

    fn supports(&self, path: &Path) -> bool {
        // ffprobe handles basically every media container.
        path.extension().is_some()
    }
}
