//! # dm-av
//!
//! External tool plumbing for the downmixer.
//!
//! - **Tool discovery** ([`ToolRegistry`]) -- find and cache paths to ffmpeg
//!   and ffprobe, honoring configured overrides.
//! - **Command execution** ([`ToolCommand`]) -- async builder with timeout
//!   support for running external processes.
//! - **Probing** ([`FfprobeProber`]) -- implements [`dm_probe::Prober`] by
//!   shelling out to ffprobe.
//! - **Workspace management** ([`Workspace`]) -- temporary output directory
//!   with safe finalization.
//! - **Execution** ([`apply_decision`], [`run_plan`]) -- run a planned
//!   downmix and replace the input.

pub mod command;
pub mod probe;
pub mod tools;
pub mod transcode;
pub mod workspace;

pub use command::{ToolCommand, ToolOutput};
pub use probe::FfprobeProber;
pub use tools::{ToolConfig, ToolInfo, ToolRegistry, ToolsConfig};
pub use transcode::{apply_decision, ffmpeg_args, run_plan, ApplyOptions};
pub use workspace::Workspace;
