//! Pending review state between generation and acceptance.
//!
//! A generated workout stays under review (and may be edited by
//! substitution) until it is committed or discarded. The review is kept in
//! a single JSON file written atomically with file locking.

use crate::{Error, GeneratedWorkout, Result, WorkoutGenerationOptions};
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// A generated workout awaiting acceptance, with the request that made it
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReviewSession {
    pub options: WorkoutGenerationOptions,
    pub workout: GeneratedWorkout,
    pub generated_at: DateTime<Utc>,
}

impl ReviewSession {
    pub fn new(
        options: WorkoutGenerationOptions,
        workout: GeneratedWorkout,
        generated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            options,
            workout,
            generated_at,
        }
    }

    /// Load the pending review
    ///
    /// Returns `None` if there is no review. An unreadable or corrupted file
    /// is logged and also treated as no review.
    pub fn load(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            tracing::debug!("No review file at {:?}", path);
            return Ok(None);
        }

        let file = match File::open(path) {
            Ok(f) => f,
            Err(e) => {
                tracing::warn!("Unable to open review file {:?}: {}", path, e);
                return Ok(None);
            }
        };

        if let Err(e) = file.lock_shared() {
            tracing::warn!("Unable to lock review file {:?}: {}", path, e);
            return Ok(None);
        }

        let mut contents = String::new();
        let mut reader = std::io::BufReader::new(&file);
        if let Err(e) = reader.read_to_string(&mut contents) {
            let _ = file.unlock();
            tracing::warn!("Failed to read review file {:?}: {}", path, e);
            return Ok(None);
        }

        file.unlock()?;

        match serde_json::from_str::<ReviewSession>(&contents) {
            Ok(review) => {
                tracing::debug!("Loaded review from {:?}", path);
                Ok(Some(review))
            }
            Err(e) => {
                tracing::warn!("Discarding unreadable review file {:?}: {}", path, e);
                Ok(None)
            }
        }
    }

    /// Save the review, replacing any previous one atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path
            .parent()
            .ok_or_else(|| Error::State(format!("review path {:?} has no parent", path)))?;
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        temp.as_file().lock_exclusive()?;

        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let contents = serde_json::to_string(self)?;
            writer.write_all(contents.as_bytes())?;
            writer.flush()?;
        }

        temp.as_file().sync_all()?;
        temp.as_file().unlock()?;

        temp.persist(path).map_err(|e| Error::Io(e.error))?;

        tracing::debug!("Saved review to {:?}", path);
        Ok(())
    }

    /// Remove the pending review; a missing file is not an error
    pub fn clear(path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => {
                tracing::debug!("Cleared review at {:?}", path);
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    /// Load the review, modify it, and save it back
    ///
    /// Fails with `Error::State` when there is nothing under review.
    pub fn update<F>(path: &Path, f: F) -> Result<Self>
    where
        F: FnOnce(&mut ReviewSession) -> Result<()>,
    {
        let mut review = Self::load(path)?
            .ok_or_else(|| Error::State("no workout is under review".into()))?;
        f(&mut review)?;
        review.save(path)?;
        Ok(review)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Difficulty, Equipment, ExerciseCategory, WorkoutLocation};
    use chrono::TimeZone;

    fn review() -> ReviewSession {
        let options = WorkoutGenerationOptions {
            duration_minutes: 20,
            difficulty: Some(Difficulty::Beginner),
            categories: vec![ExerciseCategory::Core],
            location: WorkoutLocation::Home,
            available_equipment: vec![Equipment::BodyweightOnly],
            include_warmup: false,
            include_cooldown: false,
        };
        let workout = GeneratedWorkout {
            name: "Core Workout (Beginner)".into(),
            location: WorkoutLocation::Home,
            warmup: vec![],
            main_work: vec![],
            cooldown: vec![],
            total_duration_minutes: 20,
        };
        ReviewSession::new(
            options,
            workout,
            Utc.with_ymd_and_hms(2024, 6, 2, 18, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("review.json");

        let original = review();
        original.save(&path).unwrap();

        let loaded = ReviewSession::load(&path).unwrap();
        assert_eq!(loaded, Some(original));
    }

    #[test]
    fn test_load_missing_is_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let loaded = ReviewSession::load(&temp_dir.path().join("review.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_corrupted_review_is_none() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("review.json");
        std::fs::write(&path, "{ invalid json }").unwrap();

        let loaded = ReviewSession::load(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_clear() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("review.json");

        review().save(&path).unwrap();
        ReviewSession::clear(&path).unwrap();
        assert!(!path.exists());

        // Clearing twice is fine
        ReviewSession::clear(&path).unwrap();
    }

    #[test]
    fn test_update_requires_pending_review() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("review.json");

        let result = ReviewSession::update(&path, |_| Ok(()));
        assert!(matches!(result, Err(Error::State(_))));

        review().save(&path).unwrap();
        ReviewSession::update(&path, |r| {
            r.workout.name = "Renamed".into();
            Ok(())
        })
        .unwrap();

        let loaded = ReviewSession::load(&path).unwrap().unwrap();
        assert_eq!(loaded.workout.name, "Renamed");
    }

    #[test]
    fn test_atomic_save_leaves_no_temp_files() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("review.json");

        review().save(&path).unwrap();
        review().save(&path).unwrap();

        let extras: Vec<_> = std::fs::read_dir(temp_dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name() != "review.json")
            .collect();
        assert!(extras.is_empty(), "unexpected files: {:?}", extras);
    }
}
