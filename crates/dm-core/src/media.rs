//! Media-domain enums for stream kinds and speaker positions.
//!
//! All enums serialize in lowercase (via `serde(rename_all = "lowercase")`) and
//! implement `Display` manually for consistent string representation.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// StreamKind
// ---------------------------------------------------------------------------

/// Elementary stream type discriminator, as reported by ffprobe `codec_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamKind {
    Video,
    Audio,
    Subtitle,
    Data,
    Attachment,
    /// Anything ffprobe reports that we do not model.
    Unknown,
}

impl StreamKind {
    /// Map an ffprobe `codec_type` value to a [`StreamKind`].
    pub fn from_codec_type(codec_type: &str) -> Self {
        match codec_type {
            "video" => Self::Video,
            "audio" => Self::Audio,
            "subtitle" => Self::Subtitle,
            "data" => Self::Data,
            "attachment" => Self::Attachment,
            _ => Self::Unknown,
        }
    }

    /// ffmpeg stream specifier letter used in `-map 0:<x>` clauses.
    pub fn specifier(&self) -> Option<char> {
        match self {
            Self::Video => Some('v'),
            Self::Audio => Some('a'),
            Self::Subtitle => Some('s'),
            Self::Data => Some('d'),
            Self::Attachment => Some('t'),
            Self::Unknown => None,
        }
    }
}

impl fmt::Display for StreamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Video => write!(f, "video"),
            Self::Audio => write!(f, "audio"),
            Self::Subtitle => write!(f, "subtitle"),
            Self::Data => write!(f, "data"),
            Self::Attachment => write!(f, "attachment"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

// ---------------------------------------------------------------------------
// Speaker
// ---------------------------------------------------------------------------

/// Speaker positions of the assumed 5.x source layout.
///
/// Channels that a given source does not carry are treated as silent by the
/// ffmpeg `pan` filter, so a 4.0 or 3.0 source mixes without error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    FrontLeft,
    FrontRight,
    FrontCenter,
    BackLeft,
    BackRight,
}

impl Speaker {
    /// ffmpeg channel label (`FL`, `FR`, `FC`, `BL`, `BR`).
    pub fn label(&self) -> &'static str {
        match self {
            Self::FrontLeft => "FL",
            Self::FrontRight => "FR",
            Self::FrontCenter => "FC",
            Self::BackLeft => "BL",
            Self::BackRight => "BR",
        }
    }
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stream_kind_from_codec_type() {
        assert_eq!(StreamKind::from_codec_type("audio"), StreamKind::Audio);
        assert_eq!(StreamKind::from_codec_type("video"), StreamKind::Video);
        assert_eq!(StreamKind::from_codec_type("attachment"), StreamKind::Attachment);
        assert_eq!(StreamKind::from_codec_type("weird"), StreamKind::Unknown);
    }

    #[test]
    fn stream_kind_specifiers() {
        assert_eq!(StreamKind::Subtitle.specifier(), Some('s'));
        assert_eq!(StreamKind::Attachment.specifier(), Some('t'));
        assert_eq!(StreamKind::Unknown.specifier(), None);
    }

    #[test]
    fn stream_kind_serde_lowercase() {
        let json = serde_json::to_string(&StreamKind::Subtitle).unwrap();
        assert_eq!(json, "\"subtitle\"");
        let back: StreamKind = serde_json::from_str("\"data\"").unwrap();
        assert_eq!(back, StreamKind::Data);
    }

    #[test]
    fn speaker_labels() {
        assert_eq!(Speaker::FrontCenter.to_string(), "FC");
        assert_eq!(Speaker::BackRight.label(), "BR");
    }
}
