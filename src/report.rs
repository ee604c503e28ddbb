//! Human-readable rendering of probe snapshots and decisions.

use std::fmt::Write;

use dm_core::StreamKind;
use dm_downmix::Decision;
use dm_probe::ProbeData;

/// Multi-line summary of a probe snapshot.
pub fn probe_summary(probe: &ProbeData) -> String {
    let mut out = String::new();
    if let Some(path) = &probe.file_path {
        let _ = writeln!(out, "File: {}", path.display());
    }
    if let Some(name) = &probe.format.format_name {
        let _ = writeln!(out, "Format: {name}");
    }
    if let Some(marker) = probe.format.job_id_marker() {
        let _ = writeln!(out, "JOB_ID: {marker}");
    }

    let audio = probe.audio_streams();
    let _ = writeln!(out, "\nAudio Tracks: {}", audio.len());
    for (position, track) in audio.iter().enumerate() {
        let _ = write!(
            out,
            "  [a:{position}] #{} {} {}ch",
            track.index,
            track.codec_name.as_deref().unwrap_or("unknown"),
            track.channels
        );
        if let Some(title) = &track.title {
            let _ = write!(out, " \"{title}\"");
        }
        if let Some(lang) = &track.language {
            let _ = write!(out, " ({lang})");
        }
        if track.is_multichannel() {
            out.push_str(" [surround]");
        }
        out.push('\n');
    }

    let _ = writeln!(
        out,
        "\nOther streams: {} video, {} subtitle, {} data, {} attachment",
        probe.count(StreamKind::Video),
        probe.count(StreamKind::Subtitle),
        probe.count(StreamKind::Data),
        probe.count(StreamKind::Attachment)
    );
    out
}

/// Multi-line summary of a decision.
pub fn decision_summary(decision: &Decision) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Outcome: {}", decision.outcome);
    let _ = writeln!(out, "Message: {}", decision.process_message);
    if !decision.container.is_empty() {
        let _ = writeln!(out, "Container: {}", decision.container);
    }

    if let Some(plan) = &decision.plan {
        if let Some(base) = plan.base_index {
            let _ = writeln!(out, "\nAudio positions count from stream #{base} (0:a:0)");
        }
        let _ = writeln!(out, "\nStereo tracks to create: {}", plan.synthesized.len());
        for unit in &plan.synthesized {
            let _ = writeln!(
                out,
                "  a:{} <- 0:a:{} ({}ch) as {}",
                unit.output_index,
                unit.source.audio_position,
                unit.source.stream.channels,
                unit.title()
            );
        }
        let _ = writeln!(out, "Tracks kept: {}", plan.passthrough.len());
        for unit in &plan.passthrough {
            let _ = writeln!(
                out,
                "  a:{} <- 0:a:{} ({}ch) re-encoded to {}",
                unit.output_index,
                unit.source.audio_position,
                unit.source.stream.channels,
                unit.codec
            );
        }
        let _ = writeln!(out, "\nPreset: {}", decision.preset);
    }
    out
}
