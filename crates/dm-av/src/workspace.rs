//! Temporary output location for one ffmpeg run.
//!
//! ffmpeg writes into a [`Workspace`]; only a finished output replaces the
//! input, optionally keeping the original as a backup.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Workspace for one container.
///
/// The temporary directory is created next to the input when possible so
/// that finalization is a same-filesystem rename. It is removed on drop.
///
/// # Example
///
/// ```no_run
/// use dm_av::Workspace;
///
/// let workspace = Workspace::new(std::path::Path::new("/path/to/input.mkv")).unwrap();
/// // ... ffmpeg writes to workspace.output() ...
/// workspace.finalize(Some("bak")).unwrap();
/// ```
#[derive(Debug)]
pub struct Workspace {
    temp_dir: TempDir,
    input_path: PathBuf,
}

impl Workspace {
    /// Create a new workspace for processing a file.
    pub fn new(input: &Path) -> dm_core::Result<Self> {
        let sibling = input
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .and_then(|parent| {
                tempfile::Builder::new()
                    .prefix(".downmixer-")
                    .tempdir_in(parent)
                    .ok()
            });

        let temp_dir = match sibling {
            Some(dir) => dir,
            None => TempDir::new().map_err(|e| {
                dm_core::Error::Workspace(format!("failed to create temp dir: {e}"))
            })?,
        };

        Ok(Self {
            temp_dir,
            input_path: input.to_path_buf(),
        })
    }

    /// The original input file path.
    pub fn input(&self) -> &Path {
        &self.input_path
    }

    /// The output file path (same filename as input, inside the temp dir).
    pub fn output(&self) -> PathBuf {
        let file_name = self
            .input_path
            .file_name()
            .unwrap_or_else(|| std::ffi::OsStr::new("output"));
        self.temp_dir.path().join(file_name)
    }

    /// Path to the temporary directory.
    pub fn temp_dir(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Move the output over the input.
    ///
    /// With `backup_ext = Some("bak")` the original is first renamed to
    /// `<original>.bak` (e.g. `movie.mkv.bak`). Returns the final path.
    ///
    /// # Errors
    ///
    /// Returns [`dm_core::Error::Workspace`] if the output file does not exist
    /// or if any rename or copy fails.
    pub fn finalize(self, backup_ext: Option<&str>) -> dm_core::Result<PathBuf> {
        let output = self.output();
        let dest = &self.input_path;

        if !output.exists() {
            return Err(dm_core::Error::Workspace(format!(
                "output file does not exist: {}",
                output.display()
            )));
        }

        if let Some(ext) = backup_ext {
            if dest.exists() {
                let backup = backup_path(dest, ext);
                std::fs::rename(dest, &backup).map_err(|e| {
                    dm_core::Error::Workspace(format!("failed to create backup: {e}"))
                })?;
                tracing::info!("original kept at {}", backup.display());
            }
        }

        // Rename first (same filesystem), fall back to copy + remove.
        if let Err(rename_err) = std::fs::rename(&output, dest) {
            tracing::debug!("rename failed ({rename_err}), copying instead");
            std::fs::copy(&output, dest).map_err(|e| {
                dm_core::Error::Workspace(format!("failed to copy output to destination: {e}"))
            })?;
            let _ = std::fs::remove_file(&output);
        }

        Ok(dest.clone())
    }
}

fn backup_path(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}
