//! Append-only winner log

use chrono::{Local, NaiveDateTime};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::GameError;
use crate::game::Winner;

/// One log line, newline included
pub fn format_record(winner: Winner, at: NaiveDateTime) -> String {
    format!(
        "{} won at {} in the date {}\n",
        winner.label(),
        at.format("%H:%M:%S"),
        at.format("%d/%m/%Y")
    )
}

#[derive(Debug, Clone)]
pub struct WinnerLog {
    path: PathBuf,
}

impl WinnerLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append a record stamped with the local time
    pub fn append(&self, winner: Winner) -> Result<(), GameError> {
        self.append_at(winner, Local::now().naive_local())
    }

    pub fn append_at(&self, winner: Winner, at: NaiveDateTime) -> Result<(), GameError> {
        let resource = |source| GameError::Resource {
            what: self.path.display().to_string(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(resource)?;
        file.write_all(format_record(winner, at).as_bytes())
            .map_err(resource)?;

        info!(%winner, path = %self.path.display(), "winner recorded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    #[test]
    fn test_record_format() {
        assert_eq!(
            format_record(Winner::Snake, at(9, 5, 3)),
            "Snake won at 09:05:03 in the date 07/03/2024\n"
        );
        assert_eq!(
            format_record(Winner::Pointer, at(23, 59, 59)),
            "Mouse won at 23:59:59 in the date 07/03/2024\n"
        );
    }

    #[test]
    fn test_append_keeps_previous_records() {
        let dir = tempfile::tempdir().unwrap();
        let log = WinnerLog::new(dir.path().join("winners.txt"));

        log.append_at(Winner::Snake, at(10, 0, 0)).unwrap();
        log.append_at(Winner::Pointer, at(10, 1, 0)).unwrap();

        let content = std::fs::read_to_string(log.path()).unwrap();
        assert_eq!(
            content,
            "Snake won at 10:00:00 in the date 07/03/2024\n\
             Mouse won at 10:01:00 in the date 07/03/2024\n"
        );
    }

    #[test]
    fn test_append_to_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let log = WinnerLog::new(dir.path().join("no").join("such").join("winners.txt"));

        assert!(matches!(
            log.append(Winner::Snake),
            Err(GameError::Resource { .. })
        ));
    }
}
