//! Reading input documents and writing results.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diagnostics::DiagnosticLog;
use crate::error::Result;
use crate::models::{ScheduleContext, ScheduleResult};

/// Reads a timetable document from a JSON file.
pub fn load_context(path: impl AsRef<Path>) -> Result<ScheduleContext> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    let ctx: ScheduleContext = serde_json::from_reader(reader)?;
    debug!(
        path = %path.display(),
        rooms = ctx.rooms.len(),
        time_slots = ctx.time_slots.len(),
        sessions = ctx.sessions.len(),
        events = ctx.events.len(),
        "document loaded"
    );
    Ok(ctx)
}

/// Writes the result projection as JSON.
pub fn write_result(path: impl AsRef<Path>, result: &ScheduleResult) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut writer, result)?;
    writer.flush()?;
    Ok(())
}

/// Writes the diagnostic log, one line per failed condition check.
pub fn write_log(path: impl AsRef<Path>, log: &DiagnosticLog) -> Result<()> {
    std::fs::write(path, log.render())?;
    Ok(())
}

/// Output paths for an input document: `<stem>-result.json` and
/// `<stem>-result-log.txt`, in `output_dir` or the working directory.
pub fn output_paths(input: &Path, output_dir: Option<&Path>) -> (PathBuf, PathBuf) {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "timetable".to_owned());
    let dir = output_dir.map(Path::to_path_buf).unwrap_or_default();
    (
        dir.join(format!("{stem}-result.json")),
        dir.join(format!("{stem}-result-log.txt")),
    )
}
