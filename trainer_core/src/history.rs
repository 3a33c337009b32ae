//! Completed workout history.
//!
//! Completions are appended to a JSONL log. History for the recovery
//! estimator is loaded from that log and, optionally, a CSV export from the
//! record store, deduplicated by id.

use crate::records::{append_json_line, read_json_lines};
use crate::{CompletedWorkout, Error, Result, SessionLocation};
use chrono::{DateTime, Duration, Utc};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Destination for completed workouts
pub trait HistorySink {
    fn append(&mut self, workout: &CompletedWorkout) -> Result<()>;
}

/// JSONL history log with file locking
pub struct JsonlHistorySink {
    path: PathBuf,
}

impl JsonlHistorySink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl HistorySink for JsonlHistorySink {
    fn append(&mut self, workout: &CompletedWorkout) -> Result<()> {
        append_json_line(&self.path, workout)?;
        tracing::debug!("Appended completed workout {} to history", workout.id);
        Ok(())
    }
}

/// Read every completed workout from a JSONL log
pub fn read_history(path: &Path) -> Result<Vec<CompletedWorkout>> {
    read_json_lines(path)
}

/// CSV export row from the record store
#[derive(Debug, Deserialize)]
struct CsvRow {
    id: String,
    #[serde(default)]
    name: String,
    location: String,
    duration_minutes: u32,
    date: String,
    completed_at: Option<String>,
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s.trim())
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| Error::Other(format!("Invalid date '{}': {}", s, e)))
}

impl TryFrom<CsvRow> for CompletedWorkout {
    type Error = Error;

    fn try_from(row: CsvRow) -> Result<Self> {
        let id = Uuid::parse_str(row.id.trim())
            .map_err(|e| Error::Other(format!("Invalid UUID: {}", e)))?;
        let date = parse_timestamp(&row.date)?;

        // A blank or malformed completion time falls back to the date
        let completed_at = row
            .completed_at
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .and_then(|s| parse_timestamp(s).ok());

        Ok(CompletedWorkout {
            id,
            name: row.name,
            location: SessionLocation::from(row.location),
            duration_minutes: row.duration_minutes,
            date,
            completed_at,
        })
    }
}

fn load_history_from_csv(path: &Path) -> Result<Vec<CompletedWorkout>> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)?;

    let mut workouts = Vec::new();
    for result in reader.deserialize::<CsvRow>() {
        match result {
            Ok(row) => match CompletedWorkout::try_from(row) {
                Ok(workout) => workouts.push(workout),
                Err(e) => tracing::warn!("Skipping CSV history row: {}", e),
            },
            Err(e) => tracing::warn!("Failed to deserialize CSV history row: {}", e),
        }
    }

    Ok(workouts)
}

/// When a workout counts as done
fn finished_at(workout: &CompletedWorkout) -> DateTime<Utc> {
    workout.completed_at.unwrap_or(workout.date)
}

/// Load workouts finished within the last `days` days as of `now`
///
/// The JSONL log is read first; CSV rows whose id was already seen are
/// skipped. Either file may be missing. Returned newest first.
pub fn load_history(
    jsonl_path: &Path,
    csv_path: &Path,
    days: i64,
    now: DateTime<Utc>,
) -> Result<Vec<CompletedWorkout>> {
    let cutoff = Duration::try_days(days)
        .and_then(|window| now.checked_sub_signed(window))
        .ok_or_else(|| {
            Error::Validation(format!("history window of {} days is out of range", days))
        })?;
    let mut workouts = Vec::new();
    let mut seen_ids = HashSet::new();

    for workout in read_history(jsonl_path)? {
        if finished_at(&workout) >= cutoff && seen_ids.insert(workout.id) {
            workouts.push(workout);
        }
    }
    let from_log = workouts.len();

    if csv_path.exists() {
        for workout in load_history_from_csv(csv_path)? {
            if finished_at(&workout) >= cutoff && seen_ids.insert(workout.id) {
                workouts.push(workout);
            }
        }
    }
    tracing::debug!(
        "History: {} from log, {} from CSV",
        from_log,
        workouts.len() - from_log
    );

    workouts.sort_by_key(|w| std::cmp::Reverse(finished_at(w)));

    tracing::info!(
        "Loaded {} completed workouts from the last {} days",
        workouts.len(),
        days
    );
    Ok(workouts)
}
