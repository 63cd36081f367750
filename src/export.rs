//! JSON export of computed frames.

use crate::dsp::engine::SweepOutput;
use anyhow::{Context, Result};
use std::{
    fs,
    io::{self, Write},
    path::Path,
};
use tracing::info;

/// Destination that means "write to stdout".
pub const STDOUT: &str = "-";

/// Writes `frame` as pretty JSON. File writes go through a sibling temp file
/// and a rename so readers never observe a partial document.
pub fn write_frame(dest: &Path, frame: &SweepOutput) -> Result<()> {
    let json = serde_json::to_string_pretty(frame).context("failed to serialize frame")?;

    if dest == Path::new(STDOUT) {
        let mut out = io::stdout().lock();
        out.write_all(json.as_bytes())
            .and_then(|()| out.write_all(b"\n"))
            .context("failed to write frame to stdout")?;
        return Ok(());
    }

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create export directory {parent:?}"))?;
    }
    let temp_path = dest.with_extension("json.tmp");
    fs::write(&temp_path, &json)
        .and_then(|()| fs::rename(&temp_path, dest))
        .with_context(|| format!("failed to write frame to {dest:?}"))?;

    info!(
        "[export] wrote {} samples, {} segments to {dest:?}",
        frame.sample_count(),
        frame.segments.len()
    );
    Ok(())
}
