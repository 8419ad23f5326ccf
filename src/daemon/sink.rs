// License: MIT

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::core::logbook::LogRow;

/// Writing the exported log failed. The in-memory log is untouched; the
/// caller may retry or pick another path.
#[derive(Debug)]
pub struct SinkError {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to write {}: {}", self.path.display(), self.source)
    }
}

impl std::error::Error for SinkError {}

/// Suffixes the base path with the export time so repeated flushes land in
/// distinct files instead of overwriting the previous one.
pub fn export_path(base: &Path, at: &DateTime<Local>) -> PathBuf {
    let mut name = base
        .file_name()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| "activity_log".into());
    name.push(format!("_{}.csv", at.format("%H-%M-%S")));
    base.with_file_name(name)
}

/// Writes the rows as a two-column CSV and returns the file it created.
pub fn write_log(base: &Path, rows: &[LogRow]) -> Result<PathBuf, SinkError> {
    let path = export_path(base, &Local::now());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SinkError {
            path: path.clone(),
            source,
        })?;
    }

    let mut out = String::from("application,time\n");
    for row in rows {
        out.push_str(&csv_escape(&row.application));
        out.push(',');
        out.push_str(&csv_escape(&row.time));
        out.push('\n');
    }

    fs::write(&path, out).map_err(|source| SinkError {
        path: path.clone(),
        source,
    })?;

    Ok(path)
}

/// Browser tab titles routinely carry commas and quotes.
fn csv_escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn rows(pairs: &[(&str, &str)]) -> Vec<LogRow> {
        pairs
            .iter()
            .map(|(application, time)| LogRow {
                application: application.to_string(),
                time: time.to_string(),
            })
            .collect()
    }

    #[test]
    fn writes_header_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("activity_log");

        let path = write_log(&base, &rows(&[("editor", "0:00:10"), ("browser", "0:00:05")]))
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "application,time\neditor,0:00:10\nbrowser,0:00:05\n");
    }

    #[test]
    fn empty_log_still_writes_header() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("activity_log");

        let path = write_log(&base, &[]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "application,time\n");
    }

    #[test]
    fn quotes_fields_with_commas_and_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("activity_log");

        let path = write_log(&base, &rows(&[("Tabs, tabs \"everywhere\"", "0:01:00")]))
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "application,time\n\"Tabs, tabs \"\"everywhere\"\"\",0:01:00\n"
        );
    }

    #[test]
    fn export_path_carries_timestamp_suffix() {
        let at = Local.with_ymd_and_hms(2024, 5, 4, 9, 7, 3).unwrap();
        let path = export_path(Path::new("/tmp/out/activity_log"), &at);
        assert_eq!(path, PathBuf::from("/tmp/out/activity_log_09-07-03.csv"));
    }

    #[test]
    fn write_failure_reports_path_and_keeps_rows_usable() {
        let dir = tempfile::tempdir().unwrap();
        // A base whose parent is a regular file cannot be created.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let base = blocker.join("nested").join("activity_log");
        let exported = rows(&[("editor", "0:00:10")]);

        let err = write_log(&base, &exported).unwrap_err();
        assert!(err.to_string().contains("failed to write"));
        assert_eq!(exported.len(), 1);
    }
}
