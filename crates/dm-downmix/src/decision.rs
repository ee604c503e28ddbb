//! The record handed back to the host after planning one container.

use std::fmt;

use dm_probe::AudioStream;
use serde::Serialize;

use crate::command::FfmpegCommand;
use crate::synthesizer::ProcessPlan;

/// Why the container is or is not being processed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Process,
    NoSurroundTracks,
    AlreadyTagged,
}

impl Outcome {
    pub fn should_process(&self) -> bool {
        matches!(self, Self::Process)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Process => write!(f, "process"),
            Self::NoSurroundTracks => write!(f, "no surround tracks"),
            Self::AlreadyTagged => write!(f, "already tagged"),
        }
    }
}

/// Host response for one container.
#[derive(Debug, Clone, Serialize)]
pub struct Decision {
    pub outcome: Outcome,
    pub process_file: bool,
    /// Rendered command with the `<io>` placeholder; empty when skipping.
    pub preset: String,
    /// Output container extension including the dot, same as the input.
    pub container: String,
    pub ffmpeg_mode: bool,
    pub handbrake_mode: bool,
    pub requeue_after: bool,
    pub info_log: String,
    pub process_message: String,
    #[serde(skip)]
    pub plan: Option<ProcessPlan>,
}

impl Decision {
    pub(crate) fn skip(outcome: Outcome, container: String, audio: &[AudioStream]) -> Self {
        let message = match outcome {
            Outcome::AlreadyTagged => "job_id tag already exists, skipping",
            _ => "No surround sound tracks found, skipping",
        };
        Self {
            outcome,
            process_file: false,
            preset: String::new(),
            container,
            ffmpeg_mode: true,
            handbrake_mode: false,
            requeue_after: true,
            info_log: info_log(message, &[], audio),
            process_message: message.to_string(),
            plan: None,
        }
    }

    pub(crate) fn process(plan: ProcessPlan, container: String, audio: &[AudioStream]) -> Self {
        let count = plan.synthesized.len();
        let message = format!(
            "Found {count} surround sound track{}, downmixing to stereo",
            if count == 1 { "" } else { "s" }
        );
        let preset = plan.command().to_preset();
        let info_log = info_log(&message, &plan.source_titles(), audio);
        Self {
            outcome: Outcome::Process,
            process_file: true,
            preset,
            container,
            ffmpeg_mode: true,
            handbrake_mode: false,
            requeue_after: true,
            info_log,
            process_message: message,
            plan: Some(plan),
        }
    }

    /// The structured command, when processing.
    pub fn command(&self) -> Option<FfmpegCommand> {
        self.plan.as_ref().map(ProcessPlan::command)
    }
}

fn info_log(message: &str, titles: &[&str], audio: &[AudioStream]) -> String {
    let tracks = serde_json::to_string_pretty(audio).unwrap_or_default();
    format!(
        "{message}\nprocess_audio_tracks: {}\naudio_tracks: {tracks}\n",
        titles.join(", ")
    )
}
