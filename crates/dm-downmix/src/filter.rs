//! The `dynaudnorm` + `pan` filter graph that folds a surround stream to stereo.

use std::fmt;

use dm_core::Speaker;
use serde::Serialize;

use crate::params::DownmixParams;

/// One weighted input channel of a pan expression.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PanTerm {
    pub gain: f64,
    pub speaker: Speaker,
}

/// One output channel of a pan expression, e.g. `FL=1*FL+1.25*FC+0.75*BL`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanChannel {
    pub output: Speaker,
    pub terms: Vec<PanTerm>,
}

impl PanChannel {
    fn side(front: Speaker, back: Speaker, params: &DownmixParams) -> Self {
        Self {
            output: front,
            terms: vec![
                PanTerm { gain: params.base, speaker: front },
                PanTerm { gain: params.speech, speaker: Speaker::FrontCenter },
                PanTerm { gain: params.rear, speaker: back },
            ],
        }
    }
}

impl fmt::Display for PanChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.output)?;
        for (i, term) in self.terms.iter().enumerate() {
            if i > 0 {
                f.write_str("+")?;
            }
            // f64 Display is the shortest round-tripping form: 1.0 -> "1".
            write!(f, "{}*{}", term.gain, term.speaker)?;
        }
        Ok(())
    }
}

/// Filter graph for one synthesized stereo track.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DownmixFilter {
    /// `0:a:N` position of the source stream.
    pub source_position: usize,
    /// Output pad label, without brackets.
    pub output_label: String,
    pub left: PanChannel,
    pub right: PanChannel,
}

impl DownmixFilter {
    /// Build the filter reading `0:a:<source_position>` into pad `a<output_index>`.
    pub fn new(source_position: usize, output_index: usize, params: &DownmixParams) -> Self {
        Self {
            source_position,
            output_label: format!("a{output_index}"),
            left: PanChannel::side(Speaker::FrontLeft, Speaker::BackLeft, params),
            right: PanChannel::side(Speaker::FrontRight, Speaker::BackRight, params),
        }
    }

    /// The bracketed output pad, as used by `-map`.
    pub fn output_pad(&self) -> String {
        format!("[{}]", self.output_label)
    }
}

impl fmt::Display for DownmixFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[0:a:{}]dynaudnorm,pan=stereo|{}|{}[{}]",
            self.source_position, self.left, self.right, self.output_label
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gains_render_shortest() {
        let filter = DownmixFilter::new(0, 0, &DownmixParams::default());
        assert_eq!(
            filter.to_string(),
            "[0:a:0]dynaudnorm,pan=stereo|FL=1*FL+1.25*FC+0.75*BL|FR=1*FR+1.25*FC+0.75*BR[a0]"
        );
        assert_eq!(filter.output_pad(), "[a0]");
    }

    #[test]
    fn custom_gains_and_positions() {
        let params = DownmixParams {
            base: 0.5,
            rear: 2.0,
            speech: 1.0,
            ..DownmixParams::default()
        };
        let filter = DownmixFilter::new(3, 1, &params);
        assert_eq!(
            filter.to_string(),
            "[0:a:3]dynaudnorm,pan=stereo|FL=0.5*FL+1*FC+2*BL|FR=0.5*FR+1*FC+2*BR[a1]"
        );
    }
}
