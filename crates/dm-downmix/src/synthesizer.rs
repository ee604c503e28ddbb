//! Turns a [`Classification`] into an ordered ffmpeg plan.
//!
//! Output audio indices are positional: synthesized tracks occupy
//! `[0, candidates)` and pass-through tracks follow in source order.

use dm_core::{JobId, StreamKind};
use dm_probe::JOB_ID_TAG;
use serde::Serialize;

use crate::classifier::{Classification, SourceTrack};
use crate::command::{Clause, FfmpegCommand, MapSource};
use crate::filter::DownmixFilter;
use crate::params::DownmixParams;
use crate::track_name::{DownmixTrackName, MISSING};

/// Non-audio stream kinds mapped through unchanged; all but video are optional.
const COPIED_KINDS: [(StreamKind, bool); 4] = [
    (StreamKind::Video, false),
    (StreamKind::Subtitle, true),
    (StreamKind::Data, true),
    (StreamKind::Attachment, true),
];

/// A new stereo track generated from one surround source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SynthesizedTrackUnit {
    pub output_index: usize,
    pub source: SourceTrack,
    pub filter: DownmixFilter,
    pub codec: String,
}

impl SynthesizedTrackUnit {
    pub fn title(&self) -> &DownmixTrackName {
        &self.source.downmix_name
    }

    pub fn clauses(&self) -> Vec<Clause> {
        let i = self.output_index;
        let meta = |key: &str, value: String| Clause::AudioMetadata {
            output_index: i,
            key: key.to_string(),
            value,
        };

        let mut clauses = vec![
            Clause::FilterComplex(self.filter.clone()),
            Clause::Map(MapSource::Pad(self.filter.output_pad())),
            Clause::AudioCodec {
                output_index: i,
                codec: self.codec.clone(),
            },
            meta("title", self.title().to_string()),
            meta("codec", self.codec.clone()),
            meta("channels", "2".into()),
            meta("channel_layout", "stereo".into()),
            meta("index", i.to_string()),
        ];
        if let Some(language) = self.source.stream.language.as_deref().filter(|l| !l.is_empty()) {
            clauses.push(meta("language", language.to_string()));
        }
        clauses
    }
}

/// An original audio track carried into the output, re-encoded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PassthroughTrackUnit {
    pub output_index: usize,
    pub source: SourceTrack,
    pub codec: String,
}

impl PassthroughTrackUnit {
    pub fn clauses(&self) -> Vec<Clause> {
        vec![
            Clause::Map(MapSource::Stream {
                kind: StreamKind::Audio,
                position: Some(self.source.audio_position),
                optional: false,
            }),
            Clause::AudioCodec {
                output_index: self.output_index,
                codec: self.codec.clone(),
            },
        ]
    }
}

/// Everything needed to render the command for one container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessPlan {
    pub job_id: JobId,
    pub synthesized: Vec<SynthesizedTrackUnit>,
    pub passthrough: Vec<PassthroughTrackUnit>,
    /// Global index of the first audio stream; `0:a:0` refers to it.
    pub base_index: Option<u32>,
}

impl ProcessPlan {
    /// Render the plan: global copies and the job marker, then the synthesized
    /// units, then the pass-through units.
    pub fn command(&self) -> FfmpegCommand {
        let mut cmd = FfmpegCommand::new();

        for (kind, optional) in COPIED_KINDS {
            cmd.push(Clause::Map(MapSource::Stream {
                kind,
                position: None,
                optional,
            }));
        }
        cmd.push(Clause::Map(MapSource::Literal("0:m?".into())));
        cmd.push(Clause::Copy(StreamKind::Video));
        cmd.push(Clause::Copy(StreamKind::Subtitle));
        cmd.push(Clause::GlobalMetadata {
            key: JOB_ID_TAG.to_string(),
            value: self.job_id.to_string(),
        });

        for unit in &self.synthesized {
            cmd.extend(unit.clauses());
        }
        for unit in &self.passthrough {
            cmd.extend(unit.clauses());
        }
        cmd
    }

    /// Titles of the surround sources being downmixed.
    pub fn source_titles(&self) -> Vec<&str> {
        self.synthesized
            .iter()
            .map(|u| u.source.stream.title.as_deref().unwrap_or(MISSING))
            .collect()
    }
}

/// Assign positional output indices and build the per-track units.
pub fn synthesize(
    classification: &Classification,
    params: &DownmixParams,
    job_id: &JobId,
) -> ProcessPlan {
    let synthesized: Vec<SynthesizedTrackUnit> = classification
        .candidates
        .iter()
        .enumerate()
        .map(|(i, source)| SynthesizedTrackUnit {
            output_index: i,
            source: source.clone(),
            filter: DownmixFilter::new(source.audio_position, i, params),
            codec: params.codec.clone(),
        })
        .collect();

    let offset = synthesized.len();
    let passthrough = classification
        .retained
        .iter()
        .enumerate()
        .map(|(j, source)| PassthroughTrackUnit {
            output_index: offset + j,
            source: source.clone(),
            codec: params.codec.clone(),
        })
        .collect();

    ProcessPlan {
        job_id: job_id.clone(),
        synthesized,
        passthrough,
        base_index: classification.base_index,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::classify;
    use dm_probe::AudioStream;

    fn plan_for(streams: &[AudioStream], params: &DownmixParams) -> ProcessPlan {
        synthesize(&classify(streams, params.remove_stereo_tracks), params, &JobId::from("job-1"))
    }

    #[test]
    fn global_prefix() {
        let plan = plan_for(&[AudioStream::new(1, 6, None, None)], &DownmixParams::default());
        let preset = plan.command().to_preset();
        assert!(preset.starts_with(
            "<io> -map 0:v -map 0:s? -map 0:d? -map 0:t? -map 0:m? -vcodec copy -scodec copy -metadata JOB_ID=job-1 "
        ));
    }

    #[test]
    fn language_clause_only_when_present() {
        let plan = plan_for(
            &[
                AudioStream::new(1, 6, Some("Main"), Some("eng")),
                AudioStream::new(2, 6, Some("Alt"), None),
            ],
            &DownmixParams::default(),
        );
        let with = plan.synthesized[0].clauses();
        let without = plan.synthesized[1].clauses();
        assert_eq!(with.len(), without.len() + 1);
        assert!(with.contains(&Clause::AudioMetadata {
            output_index: 0,
            key: "language".into(),
            value: "eng".into(),
        }));
    }

    #[test]
    fn output_indices_are_contiguous() {
        let plan = plan_for(
            &[
                AudioStream::new(1, 6, Some("A"), None),
                AudioStream::new(2, 2, Some("B"), None),
                AudioStream::new(3, 8, Some("C"), None),
            ],
            &DownmixParams::default(),
        );
        let synth: Vec<usize> = plan.synthesized.iter().map(|u| u.output_index).collect();
        let pass: Vec<usize> = plan.passthrough.iter().map(|u| u.output_index).collect();
        assert_eq!(synth, vec![0, 1]);
        assert_eq!(pass, vec![2, 3, 4]);
        assert!(plan.command().is_consistent());
    }

    #[test]
    fn passthrough_maps_by_audio_position() {
        let plan = plan_for(
            &[
                AudioStream::new(4, 6, Some("A"), None),
                AudioStream::new(5, 2, Some("B"), None),
            ],
            &DownmixParams::default(),
        );
        let preset = plan.command().to_preset();
        assert!(preset.contains("[0:a:0]dynaudnorm"));
        assert!(preset.ends_with("-map 0:a:0 -codec:a:1 aac -map 0:a:1 -codec:a:2 aac"));
        assert_eq!(plan.base_index, Some(4));
    }
}
