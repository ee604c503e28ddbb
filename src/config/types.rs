use dm_av::ToolsConfig;
use dm_downmix::DownmixParams;
use serde::{Deserialize, Serialize};

/// Contents of `downmixer.toml`.
///
/// ```toml
/// [downmix]
/// base = 1.0
/// rear = 0.75
/// speech = 1.25
/// codec = "aac"
/// remove_stereo_tracks = false
///
/// [tools]
/// ffmpeg_path = "/usr/local/bin/ffmpeg"
/// timeout_secs = 3600
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub downmix: DownmixParams,

    #[serde(default)]
    pub tools: ToolsConfig,
}
