//! Configuration file support for Trainer.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/trainer/config.toml`.

use crate::{
    Difficulty, Equipment, Error, ExerciseCategory, Result, WorkoutGenerationOptions,
    WorkoutLocation,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Shortest workout the config accepts as a default
pub const MIN_DURATION_MINUTES: u32 = 15;

/// Longest workout the config accepts as a default
pub const MAX_DURATION_MINUTES: u32 = 90;

/// Longest history window the recovery estimate may look back over
pub const MAX_HISTORY_DAYS: i64 = 365;

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub generation: GenerationConfig,

    #[serde(default)]
    pub recovery: RecoveryConfig,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Defaults for a generation request
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_duration_minutes")]
    pub duration_minutes: u32,

    #[serde(default = "default_difficulty")]
    pub difficulty: Difficulty,

    #[serde(default = "default_location")]
    pub location: WorkoutLocation,

    #[serde(default = "default_equipment")]
    pub equipment: Vec<Equipment>,

    #[serde(default = "default_categories")]
    pub categories: Vec<ExerciseCategory>,

    #[serde(default = "default_true")]
    pub include_warmup: bool,

    #[serde(default = "default_true")]
    pub include_cooldown: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            duration_minutes: default_duration_minutes(),
            difficulty: default_difficulty(),
            location: default_location(),
            equipment: default_equipment(),
            categories: default_categories(),
            include_warmup: true,
            include_cooldown: true,
        }
    }
}

impl GenerationConfig {
    /// Build a generation request from these defaults
    pub fn to_options(&self) -> WorkoutGenerationOptions {
        WorkoutGenerationOptions {
            duration_minutes: self.duration_minutes,
            difficulty: Some(self.difficulty),
            categories: self.categories.clone(),
            location: self.location,
            available_equipment: self.equipment.clone(),
            include_warmup: self.include_warmup,
            include_cooldown: self.include_cooldown,
        }
    }
}

/// Recovery-aware category filtering
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecoveryConfig {
    #[serde(default = "default_true")]
    pub respect_recovery: bool,

    #[serde(default = "default_history_days")]
    pub history_days: i64,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            respect_recovery: true,
            history_days: default_history_days(),
        }
    }
}

/// Exercise catalog source
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON catalog export; the built-in catalog is used when unset
    #[serde(default)]
    pub path: Option<PathBuf>,
}

// Default value functions
fn default_data_dir() -> PathBuf {
    let base = dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));
    base.join("trainer")
}

fn default_duration_minutes() -> u32 {
    30
}

fn default_difficulty() -> Difficulty {
    Difficulty::Intermediate
}

fn default_location() -> WorkoutLocation {
    WorkoutLocation::Home
}

fn default_equipment() -> Vec<Equipment> {
    vec![Equipment::BodyweightOnly]
}

fn default_categories() -> Vec<ExerciseCategory> {
    vec![
        ExerciseCategory::UpperPush,
        ExerciseCategory::UpperPull,
        ExerciseCategory::LowerBody,
        ExerciseCategory::Core,
    ]
}

fn default_true() -> bool {
    true
}

fn default_history_days() -> i64 {
    14
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        let base = dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."));
        base.join("trainer").join("config.toml")
    }

    /// Check that the generation defaults describe a usable request
    pub fn validate(&self) -> Result<()> {
        let duration = self.generation.duration_minutes;
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration) {
            return Err(Error::Config(format!(
                "generation.duration_minutes must be between {} and {}, got {}",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, duration
            )));
        }
        if self.generation.equipment.is_empty() {
            return Err(Error::Config(
                "generation.equipment must list at least one item".into(),
            ));
        }
        if self.generation.categories.is_empty() {
            return Err(Error::Config(
                "generation.categories must list at least one category".into(),
            ));
        }
        if !(1..=MAX_HISTORY_DAYS).contains(&self.recovery.history_days) {
            return Err(Error::Config(format!(
                "recovery.history_days must be between 1 and {}, got {}",
                MAX_HISTORY_DAYS, self.recovery.history_days
            )));
        }
        Ok(())
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.generation.duration_minutes, 30);
        assert_eq!(config.generation.difficulty, Difficulty::Intermediate);
        assert_eq!(config.generation.equipment, vec![Equipment::BodyweightOnly]);
        assert_eq!(config.generation.categories.len(), 4);
        assert!(config.recovery.respect_recovery);
        assert_eq!(config.recovery.history_days, 14);
        assert!(config.catalog.path.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(
            config.generation.duration_minutes,
            parsed.generation.duration_minutes
        );
        assert_eq!(config.generation.equipment, parsed.generation.equipment);
        assert_eq!(config.generation.categories, parsed.generation.categories);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[generation]
duration_minutes = 45
location = "gym"
equipment = ["barbell", "bench"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.generation.duration_minutes, 45);
        assert_eq!(config.generation.location, WorkoutLocation::Gym);
        assert_eq!(
            config.generation.equipment,
            vec![Equipment::Barbell, Equipment::Bench]
        );
        assert_eq!(config.generation.difficulty, Difficulty::Intermediate); // default
        assert!(config.generation.include_warmup); // default
    }

    #[test]
    fn test_validate_rejects_out_of_range_duration() {
        let mut config = Config::default();
        config.generation.duration_minutes = 10;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.generation.duration_minutes = 120;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.generation.duration_minutes = 90;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_lists() {
        let mut config = Config::default();
        config.generation.equipment.clear();
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.generation.categories.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bounds_history_days() {
        let mut config = Config::default();
        config.recovery.history_days = 200_000_000;
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        config.recovery.history_days = 0;
        assert!(config.validate().is_err());

        config.recovery.history_days = MAX_HISTORY_DAYS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_to_options() {
        let options = GenerationConfig::default().to_options();
        assert_eq!(options.duration_minutes, 30);
        assert_eq!(options.difficulty, Some(Difficulty::Intermediate));
        assert_eq!(options.location, WorkoutLocation::Home);
        assert!(options.include_warmup && options.include_cooldown);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.generation.duration_minutes = 60;
        config.recovery.respect_recovery = false;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.generation.duration_minutes, 60);
        assert!(!loaded.recovery.respect_recovery);
    }

    #[test]
    fn test_load_rejects_invalid_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[generation]\nduration_minutes = 5\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }
}
