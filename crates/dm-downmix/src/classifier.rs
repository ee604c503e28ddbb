//! Track classification: which audio streams to downmix and which to keep.

use std::collections::HashSet;

use dm_probe::AudioStream;
use serde::Serialize;

use crate::track_name::DownmixTrackName;

/// One source audio stream together with its ffmpeg audio-relative position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceTrack {
    /// The probed stream.
    pub stream: AudioStream,
    /// Zero-based position among the container's audio streams (`0:a:N`).
    pub audio_position: usize,
    /// Name a stereo downmix of this stream would carry.
    pub downmix_name: DownmixTrackName,
}

/// Result of [`classify`]. Both lists keep source order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Classification {
    /// Multi-channel streams that get a fresh stereo downmix.
    pub candidates: Vec<SourceTrack>,
    /// Streams copied into the output (re-encoded).
    pub retained: Vec<SourceTrack>,
    /// Lowest global index among the audio streams, if any exist.
    pub base_index: Option<u32>,
}

impl Classification {
    /// True when there is nothing to downmix.
    pub fn is_noop(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Classify the container's audio streams.
///
/// `streams` must be the container's complete audio stream list in ascending
/// index order; a stream's position in the slice is its `0:a:N` position.
pub fn classify(streams: &[AudioStream], remove_stereo_tracks: bool) -> Classification {
    let tracks: Vec<SourceTrack> = streams
        .iter()
        .enumerate()
        .map(|(position, stream)| SourceTrack {
            stream: stream.clone(),
            audio_position: position,
            downmix_name: DownmixTrackName::for_stream(stream),
        })
        .collect();

    let candidates: Vec<SourceTrack> = tracks
        .iter()
        .filter(|track| track.stream.is_multichannel())
        .filter(|track| {
            tracing::debug!("searching for track name: {}", track.downmix_name);
            let existing = tracks.iter().find(|other| {
                other.stream.index != track.stream.index
                    && track.downmix_name.is_title_of(&other.stream)
            });
            match existing {
                Some(other) if !remove_stereo_tracks => {
                    tracing::debug!(
                        "stream {} already downmixed as stream {}, skipping",
                        track.stream.index,
                        other.stream.index
                    );
                    false
                }
                Some(other) => {
                    tracing::debug!(
                        "stream {} supersedes existing downmix at stream {}",
                        track.stream.index,
                        other.stream.index
                    );
                    true
                }
                None => true,
            }
        })
        .cloned()
        .collect();

    let retained = if remove_stereo_tracks {
        let superseded: HashSet<&str> = tracks
            .iter()
            .filter(|t| t.stream.is_multichannel())
            .map(|t| t.downmix_name.as_str())
            .collect();
        tracks
            .iter()
            .filter(|t| {
                t.stream.is_multichannel()
                    || !t
                        .stream
                        .title
                        .as_deref()
                        .is_some_and(|title| superseded.contains(title))
            })
            .cloned()
            .collect()
    } else {
        tracks.clone()
    };

    Classification {
        candidates,
        retained,
        base_index: streams.iter().map(|s| s.index).min(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn indices(tracks: &[SourceTrack]) -> Vec<u32> {
        tracks.iter().map(|t| t.stream.index).collect()
    }

    #[test]
    fn empty_input_is_noop() {
        let c = classify(&[], false);
        assert!(c.is_noop());
        assert!(c.retained.is_empty());
        assert_eq!(c.base_index, None);
    }

    #[test]
    fn stereo_only_is_noop() {
        let streams = vec![
            AudioStream::new(1, 2, Some("Stereo"), Some("eng")),
            AudioStream::new(2, 1, Some("Mono"), None),
        ];
        let c = classify(&streams, false);
        assert!(c.is_noop());
        assert_eq!(indices(&c.retained), vec![1, 2]);
    }

    #[test]
    fn existing_downmix_excludes_candidate() {
        let streams = vec![
            AudioStream::new(1, 6, Some("Main"), Some("eng")),
            AudioStream::new(2, 8, Some("Atmos"), Some("eng")),
            AudioStream::new(3, 2, Some("Main_6_eng_stereo"), Some("eng")),
        ];
        let c = classify(&streams, false);
        assert_eq!(indices(&c.candidates), vec![2]);
        assert_eq!(indices(&c.retained), vec![1, 2, 3]);
    }

    #[test]
    fn remove_mode_supersedes_existing_downmix() {
        let streams = vec![
            AudioStream::new(1, 6, Some("Main"), Some("eng")),
            AudioStream::new(2, 2, Some("Main_6_eng_stereo"), Some("eng")),
            AudioStream::new(3, 2, Some("Commentary"), Some("eng")),
        ];
        let c = classify(&streams, true);
        assert_eq!(indices(&c.candidates), vec![1]);
        assert_eq!(indices(&c.retained), vec![1, 3]);
    }

    #[test]
    fn positions_are_relative_to_audio() {
        let streams = vec![
            AudioStream::new(2, 6, None, None),
            AudioStream::new(3, 2, None, None),
            AudioStream::new(5, 6, Some("Alt"), None),
        ];
        let c = classify(&streams, false);
        assert_eq!(c.base_index, Some(2));
        let positions: Vec<usize> = c.candidates.iter().map(|t| t.audio_position).collect();
        assert_eq!(positions, vec![0, 2]);
    }

    #[test]
    fn matching_own_title_does_not_count() {
        // A surround stream can never be its own downmix.
        let streams = vec![AudioStream::new(1, 6, Some("x"), None)];
        let c = classify(&streams, false);
        assert_eq!(c.candidates.len(), 1);
    }

    #[test]
    fn classification_is_idempotent() {
        let streams = vec![
            AudioStream::new(1, 6, Some("Main"), Some("eng")),
            AudioStream::new(2, 2, Some("Main_6_eng_stereo"), Some("eng")),
            AudioStream::new(3, 6, Some("Other"), None),
        ];
        for remove in [false, true] {
            assert_eq!(classify(&streams, remove), classify(&streams, remove));
        }
    }
}
