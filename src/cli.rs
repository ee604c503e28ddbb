use clap::{Args, Parser, Subcommand};
use dm_downmix::DownmixParams;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "downmixer")]
#[command(author, version, about = "Adds stereo downmixes of surround audio tracks")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decide whether a file needs downmixing and print the ffmpeg plan
    Plan {
        /// Media file to probe with ffprobe
        #[arg(required_unless_present = "probe_json")]
        input: Option<PathBuf>,

        /// Use a saved `ffprobe -show_format -show_streams -print_format json` document
        #[arg(long, conflicts_with = "input")]
        probe_json: Option<PathBuf>,

        #[command(flatten)]
        job: JobArgs,

        #[command(flatten)]
        downmix: DownmixArgs,

        /// Output the decision as JSON
        #[arg(long)]
        json: bool,
    },

    /// Probe, plan, and run ffmpeg, replacing the input on success
    Run {
        /// Input file to process
        #[arg(required = true)]
        input: PathBuf,

        #[command(flatten)]
        job: JobArgs,

        #[command(flatten)]
        downmix: DownmixArgs,

        /// Show what would be done without executing
        #[arg(long)]
        dry_run: bool,

        /// Keep the original as `<input>.<EXT>`
        #[arg(long, value_name = "EXT")]
        backup: Option<String>,
    },

    /// Probe a media file and display its streams
    Probe {
        /// File to probe
        #[arg(required = true)]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that ffmpeg and ffprobe are available
    CheckTools,

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}

#[derive(Args, Debug, Clone, Default)]
pub struct JobArgs {
    /// Job id written to the JOB_ID tag (random UUID if omitted)
    #[arg(long)]
    pub job_id: Option<String>,
}

impl JobArgs {
    pub fn resolve(&self) -> dm_core::JobId {
        self.job_id
            .as_deref()
            .map(dm_core::JobId::from)
            .unwrap_or_default()
    }
}

/// Per-invocation overrides of the `[downmix]` config section.
#[derive(Args, Debug, Clone, Default)]
pub struct DownmixArgs {
    /// Gain for front left/right
    #[arg(long)]
    pub base: Option<f64>,

    /// Gain for rear left/right
    #[arg(long)]
    pub rear: Option<f64>,

    /// Gain for the center channel
    #[arg(long)]
    pub speech: Option<f64>,

    /// Audio codec for every output audio track
    #[arg(long)]
    pub codec: Option<String>,

    /// Regenerate existing downmixes and drop the old copies
    /// (`--remove-stereo-tracks=false` overrides the config)
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub remove_stereo_tracks: Option<bool>,
}

impl DownmixArgs {
    pub fn apply(&self, params: &mut DownmixParams) {
        if let Some(base) = self.base {
            params.base = base;
        }
        if let Some(rear) = self.rear {
            params.rear = rear;
        }
        if let Some(speech) = self.speech {
            params.speech = speech;
        }
        if let Some(codec) = &self.codec {
            params.codec = codec.clone();
        }
        if let Some(remove) = self.remove_stereo_tracks {
            params.remove_stereo_tracks = remove;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn overrides_only_touch_given_values() {
        let mut params = DownmixParams::default();
        DownmixArgs {
            rear: Some(0.5),
            codec: Some("opus".into()),
            ..DownmixArgs::default()
        }
        .apply(&mut params);
        assert_eq!(params.rear, 0.5);
        assert_eq!(params.codec, "opus");
        assert_eq!(params.base, 1.0);
        assert!(!params.remove_stereo_tracks);
    }

    #[test]
    fn remove_stereo_tracks_can_be_turned_off() {
        let parse = |extra: &[&str]| {
            let mut argv = vec!["downmixer", "plan", "movie.mkv"];
            argv.extend_from_slice(extra);
            match Cli::try_parse_from(argv).unwrap().command {
                Commands::Plan { downmix, .. } => downmix,
                _ => unreachable!(),
            }
        };

        let mut params = DownmixParams {
            remove_stereo_tracks: true,
            ..DownmixParams::default()
        };
        parse(&[]).apply(&mut params);
        assert!(params.remove_stereo_tracks);
        parse(&["--remove-stereo-tracks=false"]).apply(&mut params);
        assert!(!params.remove_stereo_tracks);
        parse(&["--remove-stereo-tracks"]).apply(&mut params);
        assert!(params.remove_stereo_tracks);
    }

    #[test]
    fn plan_requires_input_or_probe_json() {
        assert!(Cli::try_parse_from(["downmixer", "plan"]).is_err());
        assert!(Cli::try_parse_from(["downmixer", "plan", "movie.mkv"]).is_ok());
        assert!(Cli::try_parse_from(["downmixer", "plan", "--probe-json", "p.json"]).is_ok());
        assert!(
            Cli::try_parse_from(["downmixer", "plan", "movie.mkv", "--probe-json", "p.json"])
                .is_err()
        );
    }

    #[test]
    fn job_id_defaults_to_random() {
        let a = JobArgs::default().resolve();
        let b = JobArgs::default().resolve();
        assert_ne!(a, b);
        let fixed = JobArgs {
            job_id: Some("42".into()),
        };
        assert_eq!(fixed.resolve().as_str(), "42");
    }
}
