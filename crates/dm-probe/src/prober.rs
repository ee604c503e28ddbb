//! The [`Prober`] trait defining the interface for obtaining probe snapshots.

use std::path::Path;

use crate::ffprobe::parse_ffprobe_json;
use crate::types::ProbeData;

/// A source of [`ProbeData`] snapshots.
///
/// Implementations must be safe to share across threads (`Send + Sync`).
pub trait Prober: Send + Sync {
    /// Human-readable name identifying this prober implementation.
    fn name(&self) -> &'static str;

    /// Produce a snapshot for the file at the given path.
    fn probe(&self, path: &Path) -> dm_core::Result<ProbeData>;

    /// Check whether this prober supports the given file path.
    ///
    /// A return value of `true` does not guarantee that [`Prober::probe`]
    /// will succeed.
    fn supports(&self, path: &Path) -> bool;
}

/// Reads a previously saved ffprobe JSON document from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonProber;

impl JsonProber {
    pub fn new() -> Self {
        Self
    }
}

impl Prober for JsonProber {
    fn name(&self) -> &'static str {
        "ffprobe-json"
    }

    fn probe(&self, path: &Path) -> dm_core::Result<ProbeData> {
        let contents = std::fs::read_to_string(path)?;
        parse_ffprobe_json(&contents)
    }

    fn supports(&self, path: &Path) -> bool {
        path.extension()
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn supports_json_extension_only() {
        let prober = JsonProber::new();
        assert!(prober.supports(Path::new("probe.json")));
        assert!(prober.supports(Path::new("PROBE.JSON")));
        assert!(!prober.supports(Path::new("movie.mkv")));
        assert!(!prober.supports(Path::new("noext")));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = JsonProber::new()
            .probe(&PathBuf::from("/nonexistent/probe_xyz.json"))
            .unwrap_err();
        assert!(matches!(err, dm_core::Error::Io { .. }));
    }
}
