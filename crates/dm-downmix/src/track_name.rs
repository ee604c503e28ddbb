//! Content-addressed names for generated stereo tracks.
//!
//! The name doubles as the identity used to decide whether a surround track
//! was already downmixed: a stereo track whose `title` tag equals the name is
//! taken to be that downmix. This is a coarse heuristic keyed on exact tag
//! equality. Retitling a track, or two surround tracks sharing title, channel
//! count and language, defeats it.

use std::fmt;

use dm_probe::AudioStream;
use serde::{Deserialize, Serialize};

/// Placeholder for a missing title, channel count or language.
pub const MISSING: &str = "na";

/// `{title}_{channels}_{language}_stereo` for one source stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DownmixTrackName(String);

impl DownmixTrackName {
    /// Compute the name for a source stream.
    ///
    /// Empty tags and a zero channel count count as missing.
    pub fn for_stream(stream: &AudioStream) -> Self {
        let title = present(stream.title.as_deref()).unwrap_or(MISSING);
        let language = present(stream.language.as_deref()).unwrap_or(MISSING);
        let channels = if stream.channels > 0 {
            stream.channels.to_string()
        } else {
            MISSING.to_string()
        };
        Self(format!("{title}_{channels}_{language}_stereo"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether `stream` carries this name as its title.
    pub fn is_title_of(&self, stream: &AudioStream) -> bool {
        stream.title.as_deref() == Some(self.0.as_str())
    }
}

fn present(tag: Option<&str>) -> Option<&str> {
    tag.filter(|t| !t.is_empty())
}

impl fmt::Display for DownmixTrackName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_tags() {
        let stream = AudioStream::new(1, 6, Some("Main"), Some("eng"));
        assert_eq!(
            DownmixTrackName::for_stream(&stream).as_str(),
            "Main_6_eng_stereo"
        );
    }

    #[test]
    fn missing_tags_use_placeholder() {
        let stream = AudioStream::new(1, 8, None, None);
        assert_eq!(
            DownmixTrackName::for_stream(&stream).as_str(),
            "na_8_na_stereo"
        );

        let stream = AudioStream::new(1, 0, Some(""), Some("ger"));
        assert_eq!(
            DownmixTrackName::for_stream(&stream).as_str(),
            "na_na_ger_stereo"
        );
    }

    #[test]
    fn same_tags_same_name_regardless_of_index() {
        let a = AudioStream::new(1, 6, Some("Main"), Some("eng"));
        let b = AudioStream::new(7, 6, Some("Main"), Some("eng"));
        assert_eq!(
            DownmixTrackName::for_stream(&a),
            DownmixTrackName::for_stream(&b)
        );
    }

    #[test]
    fn is_title_of_is_exact() {
        let name = DownmixTrackName::for_stream(&AudioStream::new(1, 6, Some("Main"), Some("eng")));
        assert!(name.is_title_of(&AudioStream::new(2, 2, Some("Main_6_eng_stereo"), None)));
        assert!(!name.is_title_of(&AudioStream::new(2, 2, Some("main_6_eng_stereo"), None)));
        assert!(!name.is_title_of(&AudioStream::new(2, 2, None, None)));
    }
}
