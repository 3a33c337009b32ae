//! Plan records handed to the record store.
//!
//! An accepted workout becomes one `WorkoutPlanRecord` with a
//! `PlannedExerciseRecord` per entry. Plans are appended to a JSONL log
//! under an exclusive file lock.

use crate::{GeneratedWorkout, Phase, Result, WorkoutLocation};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// One exercise row of a stored plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlannedExerciseRecord {
    pub exercise_id: String,
    pub phase: Phase,
    pub order_index: u32,
    pub sets: u32,
    pub target_reps: Option<u32>,
    pub target_duration_seconds: Option<u32>,
    pub rest_seconds: u32,
}

/// A stored workout plan
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WorkoutPlanRecord {
    pub id: Uuid,
    pub name: String,
    pub location: WorkoutLocation,
    pub duration_minutes: u32,
    pub created_at: DateTime<Utc>,
    pub exercises: Vec<PlannedExerciseRecord>,
}

impl WorkoutPlanRecord {
    /// Convert a generated workout into a plan record, in phase order
    pub fn from_generated(workout: &GeneratedWorkout, now: DateTime<Utc>) -> Self {
        let exercises = workout
            .all_exercises()
            .map(|(phase, entry)| PlannedExerciseRecord {
                exercise_id: entry.exercise.id.clone(),
                phase,
                order_index: entry.order_index,
                sets: entry.sets,
                target_reps: entry.target_reps,
                target_duration_seconds: entry.target_duration_seconds,
                rest_seconds: entry.rest_seconds,
            })
            .collect();

        Self {
            id: Uuid::new_v4(),
            name: workout.name.clone(),
            location: workout.location,
            duration_minutes: workout.total_duration_minutes,
            created_at: now,
            exercises,
        }
    }
}

/// Destination for accepted plans
pub trait PlanSink {
    fn append(&mut self, plan: &WorkoutPlanRecord) -> Result<()>;
}

/// JSONL plan log with file locking
pub struct JsonlPlanSink {
    path: PathBuf,
}

impl JsonlPlanSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PlanSink for JsonlPlanSink {
    fn append(&mut self, plan: &WorkoutPlanRecord) -> Result<()> {
        append_json_line(&self.path, plan)?;
        tracing::debug!(
            "Appended plan {} ({} exercises) to {:?}",
            plan.id,
            plan.exercises.len(),
            self.path
        );
        Ok(())
    }
}

/// Read every plan from a JSONL log, skipping lines that fail to parse
pub fn read_plans(path: &Path) -> Result<Vec<WorkoutPlanRecord>> {
    read_json_lines(path)
}

/// Append one JSON line under an exclusive lock, creating parent dirs
pub(crate) fn append_json_line<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    file.lock_exclusive()?;

    let mut writer = std::io::BufWriter::new(&file);
    let line = serde_json::to_string(value)?;
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    drop(writer);

    file.unlock()?;
    Ok(())
}

/// Read a JSONL file under a shared lock; a missing file reads as empty
pub(crate) fn read_json_lines<T: serde::de::DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
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

        match serde_json::from_str::<T>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    "Skipping unreadable record in {:?} at line {}: {}",
                    path,
                    line_num + 1,
                    e
                );
            }
        }
    }

    file.unlock()?;
    tracing::debug!("Read {} records from {:?}", records.len(), path);
    Ok(records)
}
