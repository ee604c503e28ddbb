//! A structured ffmpeg output-option list.
//!
//! Clauses are kept typed until the boundary, where they serialize either to
//! an argv list for direct execution or to the host's `<io>`-prefixed preset
//! string.

use std::fmt;

use dm_core::StreamKind;
use serde::Serialize;

use crate::filter::DownmixFilter;

/// Placeholder the host replaces with its input/output arguments.
pub const IO_PLACEHOLDER: &str = "<io>";

/// Source selector of a `-map` clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MapSource {
    /// `0:<kind>` or `0:<kind>:<position>`, with a trailing `?` when optional.
    Stream {
        kind: StreamKind,
        position: Option<usize>,
        optional: bool,
    },
    /// A filter graph output pad such as `[a0]`.
    Pad(String),
    /// Any other specifier, rendered verbatim.
    Literal(String),
}

impl fmt::Display for MapSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stream { kind, position, optional } => {
                let spec = kind.specifier().unwrap_or('?');
                write!(f, "0:{spec}")?;
                if let Some(position) = position {
                    write!(f, ":{position}")?;
                }
                if *optional {
                    f.write_str("?")?;
                }
                Ok(())
            }
            Self::Pad(label) | Self::Literal(label) => f.write_str(label),
        }
    }
}

/// One option of the output command.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Clause {
    Map(MapSource),
    /// `-vcodec copy`, `-scodec copy`, ...
    Copy(StreamKind),
    /// `-metadata KEY=value` on the container.
    GlobalMetadata { key: String, value: String },
    FilterComplex(DownmixFilter),
    /// `-codec:a:<output_index> <codec>`.
    AudioCodec { output_index: usize, codec: String },
    /// `-metadata:s:a:<output_index> key=value`.
    AudioMetadata {
        output_index: usize,
        key: String,
        value: String,
    },
}

impl Clause {
    /// Flag, value, and whether the value is quoted in the preset form.
    fn parts(&self) -> (String, String, bool) {
        match self {
            Self::Map(source) => (
                "-map".into(),
                source.to_string(),
                matches!(source, MapSource::Pad(_)),
            ),
            Self::Copy(kind) => {
                let spec = kind.specifier().unwrap_or('?');
                (format!("-{spec}codec"), "copy".into(), false)
            }
            Self::GlobalMetadata { key, value } => {
                let pair = format!("{key}={value}");
                let quoted = needs_quoting(&pair);
                ("-metadata".into(), pair, quoted)
            }
            Self::FilterComplex(filter) => ("-filter_complex".into(), filter.to_string(), true),
            Self::AudioCodec { output_index, codec } => {
                (format!("-codec:a:{output_index}"), codec.clone(), false)
            }
            Self::AudioMetadata {
                output_index,
                key,
                value,
            } => (
                format!("-metadata:s:a:{output_index}"),
                format!("{key}={value}"),
                true,
            ),
        }
    }
}

/// Ordered output options of one ffmpeg invocation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FfmpegCommand {
    clauses: Vec<Clause>,
}

impl FfmpegCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, clause: Clause) {
        self.clauses.push(clause);
    }

    pub fn extend(&mut self, clauses: impl IntoIterator<Item = Clause>) {
        self.clauses.extend(clauses);
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Arguments for direct process execution, without shell quoting.
    pub fn to_args(&self) -> Vec<String> {
        self.clauses
            .iter()
            .flat_map(|clause| {
                let (flag, value, _) = clause.parts();
                [flag, value]
            })
            .collect()
    }

    /// Host preset string: `<io>` followed by the options, with filter graphs,
    /// pads and stream metadata wrapped in double quotes. Container tags are
    /// quoted only when they contain whitespace, quotes or backslashes.
    pub fn to_preset(&self) -> String {
        let mut out = String::from(IO_PLACEHOLDER);
        for clause in &self.clauses {
            let (flag, value, quoted) = clause.parts();
            out.push(' ');
            out.push_str(&flag);
            out.push(' ');
            if quoted {
                out.push('"');
                out.push_str(&escape_quoted(&value));
                out.push('"');
            } else {
                out.push_str(&value);
            }
        }
        out
    }

    /// Audio output indices, in the order ffmpeg assigns them from `-map`.
    pub fn mapped_audio_outputs(&self) -> usize {
        self.clauses
            .iter()
            .filter(|c| match c {
                Clause::Map(MapSource::Pad(_)) => true,
                Clause::Map(MapSource::Stream { kind, .. }) => *kind == StreamKind::Audio,
                _ => false,
            })
            .count()
    }

    /// Audio output indices that carry a codec clause, in clause order.
    pub fn encoded_audio_outputs(&self) -> Vec<usize> {
        self.clauses
            .iter()
            .filter_map(|c| match c {
                Clause::AudioCodec { output_index, .. } => Some(*output_index),
                _ => None,
            })
            .collect()
    }

    /// Whether every mapped audio output has exactly one codec clause and the
    /// indices are contiguous from zero.
    pub fn is_consistent(&self) -> bool {
        let encoded = self.encoded_audio_outputs();
        encoded.len() == self.mapped_audio_outputs()
            && encoded.iter().enumerate().all(|(i, idx)| i == *idx)
    }
}

impl fmt::Display for FfmpegCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_preset())
    }
}

/// Container tags stay bare unless they would split or break the preset.
fn needs_quoting(value: &str) -> bool {
    value.chars().any(|c| c.is_whitespace() || c == '"' || c == '\\')
}

fn escape_quoted(value: &str) -> String {
    if value.contains(['"', '\\']) {
        value.replace('\\', "\\\\").replace('"', "\\\"")
    } else {
        value.to_string()
    }
}
