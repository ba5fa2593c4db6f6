use chrono::Local;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::mapping::{DiscKey, SeasonKey};

pub const DEFAULT_LOG_FILE_NAME: &str = "rename_log.txt";

pub const RENAMED_PREFIX: &str = "✅ Renamed:";
pub const MISSING_PREFIX: &str = "⚠️ Missing:";
pub const DELETED_PREFIX: &str = "🗑️ Deleted:";
pub const FINISHED_LINE: &str = "✅ Finished.";

/// Per-run record of what happened in the target folder.
///
/// Created fresh (truncated) for every run. The buffered writer is flushed
/// when the log is dropped, so an aborted run still leaves what was written.
pub struct RenameLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl RenameLog {
    /// Create the log inside `folder` and write the header
    pub fn create(folder: &Path, file_name: &str, season: SeasonKey, disc: DiscKey) -> io::Result<Self> {
        let path = folder.join(file_name);
        let file = File::create(&path)?;
        let mut log = Self {
            path,
            writer: BufWriter::new(file),
        };

        writeln!(log.writer, "Rename Log - {}", Local::now().format("%Y-%m-%d %H:%M:%S"))?;
        writeln!(log.writer, "Season: {}, Disc: {}", season, disc)?;
        writeln!(log.writer)?;
        Ok(log)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn renamed(&mut self, old: &str, new: &str) -> io::Result<()> {
        writeln!(self.writer, "{} {} ➜ {}", RENAMED_PREFIX, old, new)
    }

    pub fn missing(&mut self, old: &str) -> io::Result<()> {
        writeln!(self.writer, "{} {}", MISSING_PREFIX, old)
    }

    pub fn deleted(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.writer, "{} {}", DELETED_PREFIX, name)
    }

    /// Write the trailer and flush, handing back the log's location
    pub fn finish(mut self) -> io::Result<PathBuf> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", FINISHED_LINE)?;
        self.writer.flush()?;
        Ok(self.path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_full_log_layout() {
        let temp_dir = TempDir::new().unwrap();
        let mut log = RenameLog::create(temp_dir.path(), DEFAULT_LOG_FILE_NAME, SeasonKey(2), DiscKey(2)).unwrap();
        log.renamed("Friends_Season_2_Disc_2_t05.mkv", "Friends S02E03.mkv").unwrap();
        log.missing("Friends_Season_2_Disc_2_t06.mkv").unwrap();
        log.deleted("Friends_Season_2_Disc_2_t09.mkv").unwrap();
        let path = log.finish().unwrap();

        assert_eq!(path, temp_dir.path().join("rename_log.txt"));
        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();

        assert!(lines[0].starts_with("Rename Log - "));
        assert_eq!(lines[1], "Season: S02, Disc: D2");
        assert_eq!(lines[2], "");
        assert_eq!(lines[3], "✅ Renamed: Friends_Season_2_Disc_2_t05.mkv ➜ Friends S02E03.mkv");
        assert_eq!(lines[4], "⚠️ Missing: Friends_Season_2_Disc_2_t06.mkv");
        assert_eq!(lines[5], "🗑️ Deleted: Friends_Season_2_Disc_2_t09.mkv");
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "✅ Finished.");
    }

    #[test]
    fn test_log_overwrites_previous_run() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(DEFAULT_LOG_FILE_NAME);
        fs::write(&path, "old run\nold run\nold run\n").unwrap();

        let log = RenameLog::create(temp_dir.path(), DEFAULT_LOG_FILE_NAME, SeasonKey(1), DiscKey(3)).unwrap();
        log.finish().unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(!contents.contains("old run"));
        assert!(contents.contains("Season: S01, Disc: D3"));
    }

    #[test]
    fn test_dropped_log_keeps_partial_output() {
        let temp_dir = TempDir::new().unwrap();
        {
            let mut log = RenameLog::create(temp_dir.path(), "partial.txt", SeasonKey(4), DiscKey(1)).unwrap();
            log.missing("Friends_Season_4_Disc_1_t00.mkv").unwrap();
        }

        let contents = fs::read_to_string(temp_dir.path().join("partial.txt")).unwrap();
        assert!(contents.contains("⚠️ Missing: Friends_Season_4_Disc_1_t00.mkv"));
        assert!(!contents.contains(FINISHED_LINE));
    }
}
