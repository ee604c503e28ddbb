//! Unified error type for the downmixer crates.
//!
//! The planning core never fails; errors only come from parsing probe output,
//! locating and running external tools, and workspace file handling.

use std::fmt;

/// Unified error type covering all failure modes in downmixer.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Probe output could not be obtained or parsed.
    #[error("Probe error: {0}")]
    Probe(String),

    /// An external tool (ffmpeg, ffprobe) returned an error.
    #[error("Tool error [{tool}]: {message}")]
    Tool {
        /// Name of the tool that failed.
        tool: String,
        /// Human-readable error description.
        message: String,
    },

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Temporary workspace handling failed.
    #[error("Workspace error: {0}")]
    Workspace(String),
}

impl Error {
    /// Convenience constructor for [`Error::Tool`].
    pub fn tool(tool: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Tool {
            tool: tool.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Probe`].
    pub fn probe(message: impl fmt::Display) -> Self {
        Error::Probe(message.to_string())
    }

    /// Process exit code the CLI reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Probe(_) => 3,
            Error::Tool { .. } => 4,
            Error::Io { .. } | Error::Workspace(_) => 5,
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Probe(format!("JSON parse error: {err}"))
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_display() {
        let err = Error::tool("ffmpeg", "exit code 1");
        assert_eq!(err.to_string(), "Tool error [ffmpeg]: exit code 1");
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn probe_display() {
        let err = Error::probe("missing streams array");
        assert_eq!(err.to_string(), "Probe error: missing streams array");
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert!(matches!(err, Error::Io { .. }));
        assert!(err.to_string().contains("file missing"));
    }

    #[test]
    fn json_error_maps_to_probe() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err = Error::from(json_err);
        assert!(matches!(err, Error::Probe(_)));
        assert!(err.to_string().starts_with("Probe error: JSON parse error"));
    }

    #[test]
    fn workspace_display() {
        let err = Error::Workspace("output file does not exist".into());
        assert_eq!(err.to_string(), "Workspace error: output file does not exist");
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn result_alias() {
        fn ok_fn() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(ok_fn().unwrap(), 42);

        fn err_fn() -> Result<i32> {
            Err(Error::Workspace("boom".into()))
        }
        assert!(err_fn().is_err());
    }
}
