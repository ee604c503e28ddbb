//! Parsing of `ffprobe -print_format json -show_format -show_streams` output.
//!
//! Only the fields the downmix planner needs are mapped; everything else in
//! the ffprobe document is ignored.

use std::collections::BTreeMap;
use std::path::PathBuf;

use dm_core::StreamKind;
use serde::Deserialize;

use crate::types::{FormatInfo, ProbeData, StreamInfo};

// ---------------------------------------------------------------------------
// JSON structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    format: FfprobeFormat,
    #[serde(default)]
    streams: Vec<FfprobeStream>,
}

#[derive(Debug, Default, Deserialize)]
struct FfprobeFormat {
    filename: Option<String>,
    format_name: Option<String>,
    #[serde(default)]
    tags: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    index: u32,
    codec_type: Option<String>,
    codec_name: Option<String>,
    channels: Option<u32>,
    #[serde(default)]
    tags: BTreeMap<String, serde_json::Value>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse an ffprobe JSON document into a [`ProbeData`] snapshot.
///
/// # Errors
///
/// Returns [`dm_core::Error::Probe`] if the document is not valid JSON or a
/// stream lacks its `index`.
pub fn parse_ffprobe_json(json: &str) -> dm_core::Result<ProbeData> {
    let output: FfprobeOutput = serde_json::from_str(json)
        .map_err(|e| dm_core::Error::probe(format!("ffprobe JSON parse error: {e}")))?;
    Ok(from_ffprobe_output(output))
}

fn from_ffprobe_output(output: FfprobeOutput) -> ProbeData {
    let format = FormatInfo {
        format_name: output.format.format_name,
        tags: stringify_tags(output.format.tags),
    };

    let streams = output
        .streams
        .into_iter()
        .map(|stream| {
            let kind = StreamKind::from_codec_type(stream.codec_type.as_deref().unwrap_or(""));
            if kind == StreamKind::Unknown {
                tracing::debug!(
                    "stream {} has unrecognized codec_type {:?}",
                    stream.index,
                    stream.codec_type
                );
            }
            let tags = stringify_tags(stream.tags);
            StreamInfo {
                index: stream.index,
                kind,
                codec_name: stream.codec_name,
                channels: stream.channels,
                title: tags.get("title").cloned(),
                language: tags.get("language").cloned(),
            }
        })
        .collect();

    ProbeData {
        file_path: output.format.filename.map(PathBuf::from),
        format,
        streams,
    }
}

/// ffprobe emits tag values as strings, but hand-written snapshots sometimes
/// carry numbers (e.g. a numeric `JOB_ID`).
fn stringify_tags(tags: BTreeMap<String, serde_json::Value>) -> BTreeMap<String, String> {
    tags.into_iter()
        .filter_map(|(key, value)| match value {
            serde_json::Value::String(s) => Some((key, s)),
            serde_json::Value::Number(n) => Some((key, n.to_string())),
            serde_json::Value::Bool(b) => Some((key, b.to_string())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_streams_and_tags() {
        let json = r#"{
            "streams": [
                { "index": 0, "codec_type": "video", "codec_name": "hevc" },
                { "index": 1, "codec_type": "audio", "codec_name": "truehd",
                  "channels": 8, "tags": { "title": "Atmos", "language": "eng" } },
                { "index": 2, "codec_type": "subtitle", "codec_name": "hdmv_pgs_subtitle" }
            ],
            "format": {
                "filename": "/media/movie.mkv",
                "format_name": "matroska,webm",
                "tags": { "JOB_ID": "job-1", "ENCODER": "libmatroska" }
            }
        }"#;

        let probe = parse_ffprobe_json(json).unwrap();
        assert_eq!(probe.streams.len(), 3);
        assert_eq!(probe.streams[1].kind, StreamKind::Audio);
        assert_eq!(probe.streams[1].channels, Some(8));
        assert_eq!(probe.streams[1].title.as_deref(), Some("Atmos"));
        assert_eq!(probe.streams[1].language.as_deref(), Some("eng"));
        assert_eq!(probe.format.job_id_marker(), Some("job-1"));
        assert_eq!(probe.format.format_name.as_deref(), Some("matroska,webm"));
        assert_eq!(probe.container_extension().as_deref(), Some("mkv"));
    }

    #[test]
    fn missing_format_and_tags_default() {
        let json = r#"{ "streams": [ { "index": 0, "codec_type": "audio" } ] }"#;
        let probe = parse_ffprobe_json(json).unwrap();
        assert!(probe.format.tags.is_empty());
        assert!(probe.file_path.is_none());
        assert_eq!(probe.streams[0].channels, None);
        assert_eq!(probe.streams[0].title, None);
    }

    #[test]
    fn numeric_tag_values_are_stringified() {
        let json = r#"{ "format": { "tags": { "JOB_ID": 1234 } }, "streams": [] }"#;
        let probe = parse_ffprobe_json(json).unwrap();
        assert_eq!(probe.format.job_id_marker(), Some("1234"));
    }

    #[test]
    fn unknown_codec_type_is_kept() {
        let json = r#"{ "streams": [ { "index": 4, "codec_type": "mystery" } ] }"#;
        let probe = parse_ffprobe_json(json).unwrap();
        assert_eq!(probe.streams[0].kind, StreamKind::Unknown);
    }

    #[test]
    fn invalid_json_is_probe_error() {
        let err = parse_ffprobe_json("not json").unwrap_err();
        assert!(matches!(err, dm_core::Error::Probe(_)));
    }

    #[test]
    fn stream_without_index_is_rejected() {
        let json = r#"{ "streams": [ { "codec_type": "audio" } ] }"#;
        assert!(parse_ffprobe_json(json).is_err());
    }
}
