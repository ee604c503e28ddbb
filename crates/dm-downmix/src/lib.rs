//! dm-downmix: decides whether a container needs stereo downmixes and plans
//! the ffmpeg command that produces them.
//!
//! The crate is pure: it never probes files or spawns processes. Feed it a
//! [`ProbeData`] snapshot and get back a [`Decision`].
//!
//! ```
//! use dm_core::JobId;
//! use dm_downmix::{plan, DownmixParams, Outcome};
//!
//! let probe = dm_probe::parse_ffprobe_json(r#"{
//!     "format": { "filename": "movie.mkv" },
//!     "streams": [
//!         { "index": 0, "codec_type": "video" },
//!         { "index": 1, "codec_type": "audio", "channels": 6,
//!           "tags": { "title": "Main", "language": "eng" } }
//!     ]
//! }"#).unwrap();
//!
//! let decision = plan(&probe, &JobId::from("42"), &DownmixParams::default());
//! assert_eq!(decision.outcome, Outcome::Process);
//! assert!(decision.preset.contains("title=Main_6_eng_stereo"));
//! ```

pub mod classifier;
pub mod command;
pub mod decision;
pub mod filter;
pub mod params;
pub mod synthesizer;
pub mod track_name;

pub use classifier::{classify, Classification, SourceTrack};
pub use command::{Clause, FfmpegCommand, MapSource, IO_PLACEHOLDER};
pub use decision::{Decision, Outcome};
pub use filter::DownmixFilter;
pub use params::DownmixParams;
pub use synthesizer::{synthesize, PassthroughTrackUnit, ProcessPlan, SynthesizedTrackUnit};
pub use track_name::DownmixTrackName;

use dm_core::JobId;
use dm_probe::ProbeData;

/// Classify the container's audio, check the job marker, and plan the command.
///
/// A container with no surround candidates is skipped before the marker is
/// consulted, so the two skip reasons are never merged.
pub fn plan(probe: &ProbeData, job_id: &JobId, params: &DownmixParams) -> Decision {
    let audio = probe.audio_streams();
    let container = match probe.container_extension() {
        Some(ext) => format!(".{ext}"),
        None => {
            tracing::warn!(
                format_name = probe.format.format_name.as_deref().unwrap_or("unknown"),
                "output container extension is unknown"
            );
            String::new()
        }
    };

    let classification = classify(&audio, params.remove_stereo_tracks);
    if classification.is_noop() {
        tracing::info!("no surround sound tracks found in {} audio streams", audio.len());
        return Decision::skip(Outcome::NoSurroundTracks, container, &audio);
    }

    if job_id.matches_marker(probe.format.job_id_marker()) {
        tracing::info!("container already tagged with job {job_id}");
        return Decision::skip(Outcome::AlreadyTagged, container, &audio);
    }

    let plan = synthesize(&classification, params, job_id);
    tracing::info!(
        synthesized = plan.synthesized.len(),
        passthrough = plan.passthrough.len(),
        "planned downmix"
    );
    Decision::process(plan, container, &audio)
}
