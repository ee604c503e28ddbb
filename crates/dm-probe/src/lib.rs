//! # dm-probe
//!
//! Probe snapshot types for downmix planning.
//!
//! The planner works on a read-only snapshot of a container's metadata: the
//! format-level tags (which carry the `JOB_ID` idempotency marker) and the
//! ordered list of elementary streams. This crate defines that snapshot,
//! parses it from `ffprobe -show_format -show_streams` JSON, and provides the
//! [`Prober`] seam that collaborators implement.
//!
//! ## Quick start
//!
//! ```
//! use dm_probe::parse_ffprobe_json;
//!
//! let json = r#"{
//!     "format": { "filename": "movie.mkv", "tags": { "JOB_ID": "42" } },
//!     "streams": [
//!         { "index": 0, "codec_type": "video", "codec_name": "hevc" },
//!         { "index": 1, "codec_type": "audio", "channels": 6,
//!           "tags": { "title": "Main", "language": "eng" } }
//!     ]
//! }"#;
//!
//! let probe = parse_ffprobe_json(json).unwrap();
//! assert_eq!(probe.format.job_id_marker(), Some("42"));
//! assert_eq!(probe.audio_streams()[0].channels, 6);
//! ```

pub mod ffprobe;
pub mod prober;
pub mod types;

// Re-export key types at crate root for convenience.
pub use ffprobe::parse_ffprobe_json;
pub use prober::{JsonProber, Prober};
pub use types::{AudioStream, FormatInfo, ProbeData, StreamInfo, JOB_ID_TAG};
