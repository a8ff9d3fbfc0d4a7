//! CSV export of a plan's schedule alongside what was logged.

use crate::allowance::schedule;
use crate::{DailyRecord, QuitPlanParameters, Result};
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct ScheduleRow {
    day_index: u32,
    date: String,
    allowance: u32,
    smoked: Option<u32>,
    within_allowance: Option<bool>,
}

/// Write the full schedule to `path`, replacing any existing file.
///
/// Days without a record leave `smoked` and `within_allowance` empty.
/// Returns the number of rows written.
pub fn write_schedule_csv(
    plan: &QuitPlanParameters,
    records: &[DailyRecord],
    path: &Path,
) -> Result<usize> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let smoked_by_date: HashMap<_, _> = records
        .iter()
        .map(|r| (r.date, r.cigarettes_smoked))
        .collect();

    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);

    let days = schedule(plan);
    for day in &days {
        let smoked = smoked_by_date.get(&day.date).copied();
        writer.serialize(ScheduleRow {
            day_index: day.day_index,
            date: day.date.to_string(),
            allowance: day.recommended_count,
            smoked,
            within_allowance: smoked.map(|s| s <= day.recommended_count),
        })?;
    }

    writer.flush()?;
    let file = writer
        .into_inner()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;
    file.sync_all()?;

    tracing::info!("Wrote {} schedule rows to {:?}", days.len(), path);
    Ok(days.len())
}
