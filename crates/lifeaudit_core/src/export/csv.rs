//! CSV rendering and file export.

use crate::model::entry::{EntryField, EntryRecord};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

const LINE_END: &str = "\r\n";

/// Export failure.
#[derive(Debug)]
pub enum ExportError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl Display for ExportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to export to `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for ExportError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Renders the header row plus one row per record.
pub fn render_csv(records: &[EntryRecord]) -> String {
    let mut out = String::new();
    push_row(&mut out, EntryField::ALL.map(EntryField::display_name));
    for record in records {
        push_row(&mut out, record.entry.values());
    }
    out
}

/// Writes `records` to `path` as CSV and returns the number of data rows.
///
/// # Errors
/// - `ExportError::Io` when the file cannot be written; the target path is
///   left as it was.
pub fn export_csv(records: &[EntryRecord], path: impl AsRef<Path>) -> Result<usize, ExportError> {
    let path = path.as_ref();
    let started_at = Instant::now();
    let text = render_csv(records);

    match crate::fs_util::atomic_write(path, text.as_bytes()) {
        Ok(()) => {
            info!(
                "event=export_csv module=export status=ok rows={} duration_ms={}",
                records.len(),
                started_at.elapsed().as_millis()
            );
            Ok(records.len())
        }
        Err(source) => {
            error!(
                "event=export_csv module=export status=error rows={} duration_ms={} error={}",
                records.len(),
                started_at.elapsed().as_millis(),
                source
            );
            Err(ExportError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

fn push_row<'a>(out: &mut String, cells: impl IntoIterator<Item = &'a str>) {
    let line = cells
        .into_iter()
        .map(csv_escape)
        .collect::<Vec<_>>()
        .join(",");
    out.push_str(&line);
    out.push_str(LINE_END);
}

fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
