mod types;

pub use types::*;

use anyhow::{Context, Result};
use std::path::Path;

/// Locations searched when no `--config` is given, in order.
pub const DEFAULT_CONFIG_PATHS: &[&str] = &[
    "./downmixer.toml",
    "~/.config/downmixer/config.toml",
    "/etc/downmixer/config.toml",
];

/// Load configuration from a TOML file
pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;

    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;

    for warning in validate_config(&config) {
        tracing::warn!("{}: {}", path.display(), warning);
    }

    Ok(config)
}

/// Load config from default locations or return default config
pub fn load_config_or_default(custom_path: Option<&Path>) -> Result<Config> {
    if let Some(path) = custom_path {
        return load_config(path);
    }

    for path_str in DEFAULT_CONFIG_PATHS {
        let path = shellexpand::tilde(path_str);
        let path = Path::new(path.as_ref());
        if path.exists() {
            tracing::debug!("using config {}", path.display());
            return load_config(path);
        }
    }

    Ok(Config::default())
}

/// Report questionable settings. Nothing here is fatal: downmix values are
/// handed to ffmpeg as written.
pub fn validate_config(config: &Config) -> Vec<String> {
    let mut warnings = config.downmix.warnings();

    for (name, path) in [
        ("ffmpeg_path", &config.tools.ffmpeg_path),
        ("ffprobe_path", &config.tools.ffprobe_path),
    ] {
        if let Some(p) = path {
            if !p.exists() {
                warnings.push(format!(
                    "tools.{name} {} does not exist; PATH will be searched",
                    p.display()
                ));
            }
        }
    }

    if config.tools.timeout_secs == 0 {
        warnings.push("tools.timeout_secs is 0; every tool run will time out".into());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_file_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert!(validate_config(&config).is_empty());
    }

    #[test]
    fn partial_sections_keep_defaults() {
        let config: Config = toml::from_str(
            r#"
            [downmix]
            codec = "opus"
            remove_stereo_tracks = true

            [tools]
            timeout_secs = 60
            "#,
        )
        .unwrap();
        assert_eq!(config.downmix.codec, "opus");
        assert!(config.downmix.remove_stereo_tracks);
        assert_eq!(config.downmix.rear, 0.75);
        assert_eq!(config.tools.timeout_secs, 60);
        assert!(config.tools.ffmpeg_path.is_none());
    }

    #[test]
    fn load_config_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[downmix]\nspeech = 1.5").unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.downmix.speech, 1.5);
    }

    #[test]
    fn load_config_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[downmix\ncodec = ").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }

    #[test]
    fn explicit_missing_path_is_an_error() {
        assert!(load_config_or_default(Some(Path::new("/nonexistent/downmixer.toml"))).is_err());
    }

    #[test]
    fn questionable_values_are_warnings() {
        let mut config = Config::default();
        config.downmix.rear = -0.5;
        config.tools.timeout_secs = 0;
        config.tools.ffprobe_path = Some("/nonexistent/ffprobe".into());
        let warnings = validate_config(&config);
        assert_eq!(warnings.len(), 3);
    }
}
