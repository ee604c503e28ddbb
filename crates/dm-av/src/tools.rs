//! External tool detection and management.
//!
//! The [`ToolRegistry`] discovers and caches the locations of ffmpeg and
//! ffprobe and provides lookup methods for the rest of the crate.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::command::DEFAULT_TIMEOUT;

/// Known tool names that the registry manages.
pub const KNOWN_TOOLS: &[&str] = &["ffmpeg", "ffprobe"];

/// User overrides for tool locations and limits (`[tools]` config section).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub ffmpeg_path: Option<PathBuf>,
    pub ffprobe_path: Option<PathBuf>,
    /// Maximum run time of a single tool invocation, in seconds.
    pub timeout_secs: u64,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: None,
            ffprobe_path: None,
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
        }
    }
}

impl ToolsConfig {
    fn custom_path(&self, name: &str) -> Option<&Path> {
        match name {
            "ffmpeg" => self.ffmpeg_path.as_deref(),
            "ffprobe" => self.ffprobe_path.as_deref(),
            _ => None,
        }
    }
}

/// Configuration for a single external tool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolConfig {
    /// Human-readable tool name (e.g. "ffmpeg").
    pub name: String,
    /// Resolved path to the executable.
    pub path: PathBuf,
    /// Maximum execution time before the tool is killed.
    #[serde(default = "default_timeout", with = "duration_secs")]
    pub timeout: Duration,
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

/// Serde helpers to (de)serialize `Duration` as whole seconds.
mod duration_secs {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

/// Availability information for a tool, returned by [`ToolRegistry::check_all`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub available: bool,
    /// First line of `-version` output, if available.
    pub version: Option<String>,
    pub path: Option<PathBuf>,
}

/// Registry holding discovered tool configurations.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: HashMap<String, ToolConfig>,
}

impl ToolRegistry {
    /// Discover tools by searching `PATH` (or using overrides from config).
    ///
    /// A configured path is used when it exists; otherwise [`which::which`]
    /// locates the tool in `PATH`. Tools that are not found are omitted.
    pub fn discover(config: &ToolsConfig) -> Self {
        let timeout = Duration::from_secs(config.timeout_secs);
        let mut tools = HashMap::new();

        for &name in KNOWN_TOOLS {
            let resolved = match config.custom_path(name) {
                Some(p) if p.exists() => Some(p.to_path_buf()),
                Some(p) => {
                    tracing::warn!(
                        "configured {name} path {} does not exist, searching PATH",
                        p.display()
                    );
                    which::which(name).ok()
                }
                None => which::which(name).ok(),
            };

            match resolved {
                Some(path) => {
                    tracing::debug!("found {name} at {}", path.display());
                    tools.insert(
                        name.to_string(),
                        ToolConfig {
                            name: name.to_string(),
                            path,
                            timeout,
                        },
                    );
                }
                None => tracing::debug!("{name} not found"),
            }
        }

        Self { tools }
    }

    /// Return the [`ToolConfig`] for the given tool, or a
    /// [`dm_core::Error::Tool`] if it was not found during discovery.
    pub fn require(&self, name: &str) -> dm_core::Result<&ToolConfig> {
        self.tools.get(name).ok_or_else(|| {
            dm_core::Error::tool(name, format!("{name} not found; is it installed and in PATH?"))
        })
    }

    /// Check all known tools and return availability information.
    pub fn check_all(&self) -> Vec<ToolInfo> {
        KNOWN_TOOLS
            .iter()
            .map(|&name| match self.tools.get(name) {
                Some(cfg) => ToolInfo {
                    name: name.to_string(),
                    available: true,
                    version: detect_version(&cfg.path),
                    path: Some(cfg.path.clone()),
                },
                None => ToolInfo {
                    name: name.to_string(),
                    available: false,
                    version: None,
                    path: None,
                },
            })
            .collect()
    }
}

/// Run `<tool> -version` and return the first line of stdout.
fn detect_version(path: &Path) -> Option<String> {
    let output = std::process::Command::new(path)
        .arg("-version")
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    String::from_utf8_lossy(&output.stdout)
        .lines()
        .next()
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discover_with_default_config() {
        let registry = ToolRegistry::discover(&ToolsConfig::default());
        // No tool is guaranteed to be installed; the call must not panic.
        let _ = registry.check_all();
    }

    #[test]
    fn require_missing_tool_returns_error() {
        let registry = ToolRegistry::discover(&ToolsConfig::default());
        let err = registry.require("nonexistent_tool_xyz").unwrap_err();
        assert!(err.to_string().contains("nonexistent_tool_xyz not found"));
    }

    #[test]
    fn check_all_returns_known_tools() {
        let registry = ToolRegistry::discover(&ToolsConfig::default());
        let names: Vec<String> = registry.check_all().into_iter().map(|i| i.name).collect();
        assert_eq!(names, vec!["ffmpeg", "ffprobe"]);
    }

    #[test]
    fn configured_path_wins_when_it_exists() {
        let fake = tempfile::NamedTempFile::new().unwrap();
        let config = ToolsConfig {
            ffprobe_path: Some(fake.path().to_path_buf()),
            timeout_secs: 7,
            ..ToolsConfig::default()
        };
        let registry = ToolRegistry::discover(&config);
        let tool = registry.require("ffprobe").unwrap();
        assert_eq!(tool.path, fake.path());
        assert_eq!(tool.timeout, Duration::from_secs(7));
    }

    #[test]
    fn tools_config_from_partial_json() {
        let cfg: ToolsConfig = serde_json::from_str(r#"{ "ffmpeg_path": "/opt/ffmpeg" }"#).unwrap();
        assert_eq!(cfg.ffmpeg_path.as_deref(), Some(Path::new("/opt/ffmpeg")));
        assert_eq!(cfg.timeout_secs, 300);
    }

    #[test]
    fn tool_config_serialization() {
        let cfg = ToolConfig {
            name: "ffmpeg".to_string(),
            path: PathBuf::from("/usr/bin/ffmpeg"),
            timeout: DEFAULT_TIMEOUT,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        assert!(json.contains("\"timeout\":300"));
        let back: ToolConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, "ffmpeg");
    }
}
