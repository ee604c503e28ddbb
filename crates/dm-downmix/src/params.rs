//! User-configurable downmix parameters.

use serde::{Deserialize, Serialize};

/// Default gain for the front left/right channels.
pub const DEFAULT_BASE: f64 = 1.0;
/// Default gain for the rear left/right channels.
pub const DEFAULT_REAR: f64 = 0.75;
/// Default gain for the center (speech) channel.
pub const DEFAULT_SPEECH: f64 = 1.25;
/// Default codec for every emitted audio stream.
pub const DEFAULT_CODEC: &str = "aac";

/// Gains and codec applied by the downmix plan.
///
/// Values are passed through to ffmpeg verbatim; [`DownmixParams::warnings`]
/// reports suspicious values but nothing here rejects them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DownmixParams {
    /// Gain for FL/FR.
    pub base: f64,
    /// Gain for BL/BR.
    pub rear: f64,
    /// Gain for FC.
    pub speech: f64,
    /// ffmpeg encoder name for all audio outputs.
    pub codec: String,
    /// Regenerate downmixes even when one exists and drop the superseded copies.
    pub remove_stereo_tracks: bool,
}

impl Default for DownmixParams {
    fn default() -> Self {
        Self {
            base: DEFAULT_BASE,
            rear: DEFAULT_REAR,
            speech: DEFAULT_SPEECH,
            codec: DEFAULT_CODEC.to_string(),
            remove_stereo_tracks: false,
        }
    }
}

impl DownmixParams {
    /// Return a list of non-fatal issues with the configured values.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        for (name, gain) in [
            ("base", self.base),
            ("rear", self.rear),
            ("speech", self.speech),
        ] {
            if !gain.is_finite() {
                warnings.push(format!("{name} gain {gain} is not a finite number"));
            } else if gain < 0.0 {
                warnings.push(format!("{name} gain {gain} is negative and inverts phase"));
            }
        }

        if self.codec.trim().is_empty() {
            warnings.push("codec is empty; ffmpeg will reject the command".into());
        } else if self.codec.chars().any(char::is_whitespace) {
            warnings.push(format!("codec '{}' contains whitespace", self.codec));
        }

        warnings
    }
}
