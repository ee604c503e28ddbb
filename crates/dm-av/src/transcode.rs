//! Executing a planned downmix with ffmpeg.

use std::path::{Path, PathBuf};

use dm_downmix::{Decision, FfmpegCommand};

use crate::command::ToolCommand;
use crate::tools::ToolRegistry;
use crate::workspace::Workspace;

/// How a processed file replaces its input.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Keep the original as `<input>.<ext>` when set.
    pub backup_ext: Option<String>,
}

/// Full ffmpeg argv: `-y -hide_banner -i <input> <plan> <output>`.
pub fn ffmpeg_args(input: &Path, output: &Path, command: &FfmpegCommand) -> Vec<String> {
    let mut args = vec![
        "-y".to_string(),
        "-hide_banner".to_string(),
        "-i".to_string(),
        input.to_string_lossy().to_string(),
    ];
    args.extend(command.to_args());
    args.push(output.to_string_lossy().to_string());
    args
}

/// Run ffmpeg for a planned command, writing into the workspace output.
pub async fn run_plan(
    workspace: &Workspace,
    tools: &ToolRegistry,
    command: &FfmpegCommand,
) -> dm_core::Result<()> {
    let ffmpeg = tools.require("ffmpeg")?;
    let mut cmd = ToolCommand::new(ffmpeg.path.clone());
    cmd.args(ffmpeg_args(workspace.input(), &workspace.output(), command));
    cmd.timeout(ffmpeg.timeout);

    tracing::info!("downmixing {}", workspace.input().display());
    cmd.execute().await?;
    Ok(())
}

/// Carry out a [`Decision`] on `input`.
///
/// Returns `Ok(None)` when the decision says not to process, otherwise the
/// path of the replaced file.
pub async fn apply_decision(
    input: &Path,
    decision: &Decision,
    tools: &ToolRegistry,
    options: &ApplyOptions,
) -> dm_core::Result<Option<PathBuf>> {
    let Some(command) = decision.command().filter(|_| decision.process_file) else {
        tracing::info!("{}", decision.process_message);
        return Ok(None);
    };

    let workspace = Workspace::new(input)?;
    run_plan(&workspace, tools, &command).await?;
    let finished = workspace.finalize(options.backup_ext.as_deref())?;
    tracing::info!("finished {}", finished.display());
    Ok(Some(finished))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dm_downmix::{Clause, MapSource};

    #[test]
    fn argv_wraps_plan_between_input_and_output() {
        let mut command = FfmpegCommand::new();
        command.push(Clause::Map(MapSource::Pad("[a0]".into())));
        command.push(Clause::AudioCodec {
            output_index: 0,
            codec: "aac".into(),
        });

        let args = ffmpeg_args(Path::new("/in/movie.mkv"), Path::new("/tmp/x/movie.mkv"), &command);
        assert_eq!(
            args,
            vec![
                "-y", "-hide_banner", "-i", "/in/movie.mkv",
                "-map", "[a0]", "-codec:a:0", "aac",
                "/tmp/x/movie.mkv",
            ]
        );
    }
}
