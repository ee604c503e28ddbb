//! Core types for probe snapshots.

use std::collections::BTreeMap;
use std::path::PathBuf;

use dm_core::StreamKind;
use serde::{Deserialize, Serialize};

/// Format-level tag holding the id of the last job that processed the file.
pub const JOB_ID_TAG: &str = "JOB_ID";

/// Read-only metadata snapshot of one container.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeData {
    /// Path of the probed file, when known.
    pub file_path: Option<PathBuf>,
    /// Container-level information and tags.
    pub format: FormatInfo,
    /// Elementary streams in source order.
    pub streams: Vec<StreamInfo>,
}

impl ProbeData {
    /// All audio streams, in ascending source order.
    pub fn audio_streams(&self) -> Vec<AudioStream> {
        let mut audio: Vec<AudioStream> = self
            .streams
            .iter()
            .filter(|s| s.kind == StreamKind::Audio)
            .map(AudioStream::from)
            .collect();
        audio.sort_by_key(|s| s.index);
        audio
    }

    /// Number of streams of the given kind.
    pub fn count(&self, kind: StreamKind) -> usize {
        self.streams.iter().filter(|s| s.kind == kind).count()
    }

    /// File extension of the probed container (without the dot).
    ///
    /// Taken from the file path, or derived from the ffprobe format name when
    /// the document carries no filename.
    pub fn container_extension(&self) -> Option<String> {
        self.file_path
            .as_ref()
            .and_then(|p| p.extension())
            .map(|e| e.to_string_lossy().to_string())
            .or_else(|| self.format.default_extension().map(str::to_string))
    }
}

/// Container-level information.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FormatInfo {
    /// ffprobe format name (e.g. "matroska,webm").
    pub format_name: Option<String>,
    /// Format-level metadata tags, keyed exactly as ffprobe reports them.
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl FormatInfo {
    /// Look up a format-level tag by exact key.
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// The previously applied job marker, if any.
    pub fn job_id_marker(&self) -> Option<&str> {
        self.tag(JOB_ID_TAG)
    }

    /// Usual file extension for the demuxer named first in `format_name`.
    pub fn default_extension(&self) -> Option<&'static str> {
        let demuxer = self.format_name.as_deref()?.split(',').next()?.trim();
        let ext = match demuxer {
            "matroska" => "mkv",
            "webm" => "webm",
            "mov" | "mp4" => "mp4",
            "avi" => "avi",
            "mpegts" => "ts",
            "flv" => "flv",
            "asf" => "wmv",
            "ogg" => "ogv",
            _ => return None,
        };
        Some(ext)
    }
}

/// One elementary stream of any kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamInfo {
    /// Global stream index within the container.
    pub index: u32,
    /// Stream type.
    pub kind: StreamKind,
    /// Codec short name (e.g. "truehd", "hevc").
    pub codec_name: Option<String>,
    /// Channel count (audio only).
    pub channels: Option<u32>,
    /// `title` tag.
    pub title: Option<String>,
    /// `language` tag.
    pub language: Option<String>,
}

/// An audio elementary stream as seen by the downmix planner.
///
/// A missing channel count is reported as `0`, which never qualifies as
/// multi-channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioStream {
    /// Global stream index within the container.
    pub index: u32,
    /// Number of channels (0 when unknown).
    pub channels: u32,
    /// `title` tag.
    pub title: Option<String>,
    /// `language` tag.
    pub language: Option<String>,
    /// Codec short name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codec_name: Option<String>,
}

impl AudioStream {
    /// Create an audio stream with no codec information.
    pub fn new(
        index: u32,
        channels: u32,
        title: Option<&str>,
        language: Option<&str>,
    ) -> Self {
        Self {
            index,
            channels,
            title: title.map(str::to_string),
            language: language.map(str::to_string),
            codec_name: None,
        }
    }

    /// Whether this stream carries more than two channels.
    pub fn is_multichannel(&self) -> bool {
        self.channels > 2
    }
}

impl From<&StreamInfo> for AudioStream {
    fn from(stream: &StreamInfo) -> Self {
        Self {
            index: stream.index,
            channels: stream.channels.unwrap_or(0),
            title: stream.title.clone(),
            language: stream.language.clone(),
            codec_name: stream.codec_name.clone(),
        }
    }
}
