//! Daily record log.
//!
//! Records are appended to a JSONL (JSON Lines) file with file locking
//! so overlapping CLI invocations never interleave partial lines.

use crate::{DailyRecord, Result};
use fs2::FileExt;
use std::collections::HashMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Sink for logged daily records
pub trait RecordSink {
    fn append(&mut self, record: &DailyRecord) -> Result<()>;
}

/// JSONL-based record log with file locking
pub struct JsonlRecordLog {
    path: PathBuf,
}

impl JsonlRecordLog {
    /// Create a new record log for the given path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn ensure_parent_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl RecordSink for JsonlRecordLog {
    fn append(&mut self, record: &DailyRecord) -> Result<()> {
        self.ensure_parent_dir()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        file.lock_exclusive()?;

        let mut line = serde_json::to_string(record)?;
        line.push('\n');

        let result = (&file).write_all(line.as_bytes()).and_then(|_| file.sync_data());
        file.unlock()?;
        result?;

        tracing::debug!("Logged record {} for {}", record.id, record.date);
        Ok(())
    }
}

/// Read every record in a log, skipping lines that fail to parse
pub fn read_records(path: &Path) -> Result<Vec<DailyRecord>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    file.lock_shared()?;

    let reader = BufReader::new(&file);
    let mut records = Vec::new();

    for (line_num, line_result) in reader.lines().enumerate() {
        let line = line_result?;
        if line.trim().is_empty() {
            continue;
        }

        match serde_json::from_str::<DailyRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!("Failed to parse record at line {}: {}", line_num + 1, e);
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}

/// One record per date, sorted oldest first.
///
/// Logging the same date again replaces the earlier entry: the record with
/// the latest `logged_at` wins, ties going to the later line.
pub fn load_records(path: &Path) -> Result<Vec<DailyRecord>> {
    let mut latest: HashMap<_, DailyRecord> = HashMap::new();

    for record in read_records(path)? {
        match latest.get(&record.date) {
            Some(existing) if existing.logged_at > record.logged_at => {}
            _ => {
                latest.insert(record.date, record);
            }
        }
    }

    let mut records: Vec<DailyRecord> = latest.into_values().collect();
    records.sort_by_key(|r| r.date);

    tracing::debug!("Loaded {} distinct days of records", records.len());
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, Utc};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    #[test]
    fn test_append_and_read_back() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("records.jsonl");

        let mut log = JsonlRecordLog::new(&path);
        for day in 1..=5 {
            log.append(&DailyRecord::new(date(day), day, 1)).unwrap();
        }

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records[2].cigarettes_smoked, 3);
    }

    #[test]
    fn test_read_missing_log() {
        let temp_dir = tempfile::tempdir().unwrap();
        let records = read_records(&temp_dir.path().join("nonexistent.jsonl")).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("records.jsonl");

        let mut log = JsonlRecordLog::new(&path);
        log.append(&DailyRecord::new(date(1), 4, 0)).unwrap();
        let mut file = OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(file, "{{ not a record").unwrap();
        writeln!(file).unwrap();
        drop(file);
        log.append(&DailyRecord::new(date(2), 3, 0)).unwrap();

        let records = read_records(&path).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_latest_entry_per_date_wins() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("records.jsonl");
        let mut log = JsonlRecordLog::new(&path);

        let mut first = DailyRecord::new(date(3), 9, 0);
        first.logged_at = Utc::now() - Duration::hours(2);
        let correction = DailyRecord::new(date(3), 2, 0);

        log.append(&DailyRecord::new(date(4), 1, 0)).unwrap();
        log.append(&correction).unwrap();
        // An older entry appended later must not override the correction
        log.append(&first).unwrap();
        log.append(&DailyRecord::new(date(1), 5, 0)).unwrap();

        let records = load_records(&path).unwrap();
        let dates: Vec<_> = records.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![date(1), date(3), date(4)]);
        assert_eq!(records[1].cigarettes_smoked, 2);
    }
}
