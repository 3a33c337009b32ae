use chrono::Utc;
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::{Path, PathBuf};
use trainer_core::recovery::fatigued_muscles;
use trainer_core::*;

#[derive(Parser)]
#[command(name = "trainer")]
#[command(about = "Strength and mobility workout generator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Use a specific config file instead of the standard location
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a workout and hold it for review
    Generate {
        /// Total length in minutes
        #[arg(long)]
        duration: Option<u32>,

        /// beginner, intermediate or advanced
        #[arg(long)]
        difficulty: Option<Difficulty>,

        /// home or gym
        #[arg(long)]
        location: Option<WorkoutLocation>,

        /// Category to train (repeatable, in priority order)
        #[arg(long = "category")]
        categories: Vec<ExerciseCategory>,

        /// Available equipment (repeatable)
        #[arg(long = "equipment")]
        equipment: Vec<Equipment>,

        /// Skip the warmup phase
        #[arg(long)]
        no_warmup: bool,

        /// Skip the cooldown phase
        #[arg(long)]
        no_cooldown: bool,

        /// Train selected categories even if their muscles are recovering
        #[arg(long)]
        ignore_recovery: bool,

        /// Seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Replace one exercise in the workout under review
    Swap {
        /// warmup, main or cooldown
        phase: Phase,

        /// Position within the phase, as shown by `generate`
        index: usize,

        /// Seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Accept the workout under review and store it as a plan
    Commit {
        /// Also record the workout as completed now
        #[arg(long)]
        completed: bool,
    },

    /// Show estimated muscle recovery and recommended categories
    Recovery,

    /// List catalog exercises
    Catalog {
        /// Only list one category
        #[arg(long)]
        category: Option<ExerciseCategory>,
    },
}

/// File layout under the data directory
struct DataPaths {
    review: PathBuf,
    plans: PathBuf,
    history: PathBuf,
    history_csv: PathBuf,
}

impl DataPaths {
    fn new(data_dir: &Path) -> Self {
        Self {
            review: data_dir.join("review.json"),
            plans: data_dir.join("plans.jsonl"),
            history: data_dir.join("history.jsonl"),
            history_csv: data_dir.join("history.csv"),
        }
    }
}

fn main() -> Result<()> {
    trainer_core::logging::init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let data_dir = cli
        .data_dir
        .unwrap_or_else(|| config.data.data_dir.clone());
    std::fs::create_dir_all(&data_dir)?;
    let paths = DataPaths::new(&data_dir);

    match cli.command {
        Commands::Generate {
            duration,
            difficulty,
            location,
            categories,
            equipment,
            no_warmup,
            no_cooldown,
            ignore_recovery,
            seed,
        } => {
            let mut options = config.generation.to_options();
            if let Some(duration) = duration {
                options.duration_minutes = duration;
            }
            if let Some(difficulty) = difficulty {
                options.difficulty = Some(difficulty);
            }
            if let Some(location) = location {
                options.location = location;
            }
            if !categories.is_empty() {
                options.categories = categories;
            }
            if !equipment.is_empty() {
                options.available_equipment = equipment;
            }
            options.include_warmup &= !no_warmup;
            options.include_cooldown &= !no_cooldown;

            let respect_recovery = config.recovery.respect_recovery && !ignore_recovery;
            cmd_generate(&paths, &config, options, respect_recovery, seed)
        }
        Commands::Swap { phase, index, seed } => cmd_swap(&paths, &config, phase, index, seed),
        Commands::Commit { completed } => cmd_commit(&paths, completed),
        Commands::Recovery => cmd_recovery(&paths, &config),
        Commands::Catalog { category } => cmd_catalog(&config, category),
    }
}

fn make_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

/// Built-in catalog, or the configured export if one is set
fn load_catalog(config: &Config) -> Result<Catalog> {
    let catalog = match &config.catalog.path {
        Some(path) => Catalog::load_from(path)?,
        None => get_default_catalog().clone(),
    };
    catalog.ensure_valid()?;
    Ok(catalog)
}

fn cmd_generate(
    paths: &DataPaths,
    config: &Config,
    mut options: WorkoutGenerationOptions,
    respect_recovery: bool,
    seed: Option<u64>,
) -> Result<()> {
    let now = Utc::now();
    let catalog = load_catalog(config)?;

    if respect_recovery {
        let history = load_history(
            &paths.history,
            &paths.history_csv,
            config.recovery.history_days,
            now,
        )?;
        let recommended = recommend_categories(&history, now);

        match filter_selected_categories(&options.categories, &recommended) {
            Some(kept) => {
                for skipped in options.categories.iter().filter(|c| !kept.contains(c)) {
                    println!("Skipping {}: still recovering", skipped.display_name());
                }
                options.categories = kept;
            }
            None => {
                eprintln!(
                    "Warning: every selected category is still recovering. Continuing anyway."
                );
            }
        }
    }

    let mut rng = make_rng(seed);
    let workout = generate_workout(&catalog.default_exercises(), &options, &mut rng)?;
    tracing::debug!(
        "Generated {} exercises for {} minutes",
        workout.all_exercises().count(),
        options.duration_minutes
    );

    display_workout(&workout);

    ReviewSession::new(options, workout, now).save(&paths.review)?;
    println!();
    println!("Use `trainer swap <phase> <index>` to change an exercise,");
    println!("or `trainer commit` to save this plan.");
    Ok(())
}

fn pending_review(paths: &DataPaths) -> Result<ReviewSession> {
    ReviewSession::load(&paths.review)?.ok_or_else(|| {
        Error::State("no workout is under review; run `trainer generate` first".into())
    })
}

fn cmd_swap(
    paths: &DataPaths,
    config: &Config,
    phase: Phase,
    index: usize,
    seed: Option<u64>,
) -> Result<()> {
    let catalog = load_catalog(config)?;
    let exercises = catalog.default_exercises();
    let mut rng = make_rng(seed);

    let mut old_name = String::new();
    let mut new_name = None;
    let review = ReviewSession::update(&paths.review, |review| {
        let outcome = substitute_exercise(
            &review.workout,
            phase,
            index,
            &exercises,
            &review.options,
            &mut rng,
        )?;

        old_name = review.workout.phase(phase)[index].exercise.name.clone();
        if let SubstitutionOutcome::Replaced(workout) = outcome {
            new_name = Some(workout.phase(phase)[index].exercise.name.clone());
            review.workout = workout;
        }
        Ok(())
    })?;

    match new_name {
        Some(new_name) => {
            println!("✓ Swapped {} for {}", old_name, new_name);
            display_workout(&review.workout);
        }
        None => {
            println!("No alternative available for {}. Workout unchanged.", old_name);
        }
    }
    Ok(())
}

fn cmd_commit(paths: &DataPaths, completed: bool) -> Result<()> {
    let review = pending_review(paths)?;
    let now = Utc::now();

    let plan = WorkoutPlanRecord::from_generated(&review.workout, now);
    JsonlPlanSink::new(&paths.plans).append(&plan)?;
    println!(
        "✓ Saved plan \"{}\" ({} exercises)",
        plan.name,
        plan.exercises.len()
    );

    if completed {
        let done = CompletedWorkout {
            id: uuid::Uuid::new_v4(),
            name: review.workout.name.clone(),
            location: review.workout.location.into(),
            duration_minutes: review.workout.total_duration_minutes,
            date: now,
            completed_at: Some(now),
        };
        JsonlHistorySink::new(&paths.history).append(&done)?;
        println!("✓ Logged as completed");
    }

    ReviewSession::clear(&paths.review)?;
    Ok(())
}

fn cmd_recovery(paths: &DataPaths, config: &Config) -> Result<()> {
    let now = Utc::now();
    let history = load_history(
        &paths.history,
        &paths.history_csv,
        config.recovery.history_days,
        now,
    )?;
    let statuses = estimate_recovery(&history, now);

    println!(
        "Muscle recovery ({} workouts in the last {} days)",
        history.len(),
        config.recovery.history_days
    );
    println!();
    for status in &statuses {
        println!(
            "  {:<16} {:>4.0}%  {}",
            status.muscle.as_str(),
            status.percent_recovered,
            recovery_message(status)
        );
    }

    let fatigued = fatigued_muscles(&statuses);
    if !fatigued.is_empty() {
        println!();
        println!("{} muscle groups still recovering", fatigued.len());
    }

    let recommended: Vec<_> = recommend_from_status(&statuses)
        .into_iter()
        .map(|c| c.display_name())
        .collect();
    println!();
    println!("Recommended categories: {}", recommended.join(", "));
    Ok(())
}

fn cmd_catalog(config: &Config, category: Option<ExerciseCategory>) -> Result<()> {
    let catalog = load_catalog(config)?;

    for current in ExerciseCategory::ALL {
        if category.is_some_and(|c| c != current) {
            continue;
        }

        println!("{}", current.display_name());
        for exercise in catalog.exercises().iter().filter(|e| e.category == current) {
            let equipment: Vec<_> = exercise.equipment.iter().map(|e| e.as_str()).collect();
            println!(
                "  {:<28} {} [{}, {}] ({})",
                exercise.id,
                exercise.name,
                exercise.difficulty,
                exercise.location,
                equipment.join(", ")
            );
        }
        println!();
    }
    Ok(())
}

fn display_workout(workout: &GeneratedWorkout) {
    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", workout.name);
    println!("╰─────────────────────────────────────────╯");
    println!(
        "  {} minutes at {} (estimated {})",
        workout.total_duration_minutes,
        workout.location,
        format_duration(workout.estimated_seconds())
    );

    for phase in Phase::ALL {
        let entries = workout.phase(phase);
        if entries.is_empty() {
            continue;
        }

        let title = match phase {
            Phase::Warmup => "Warmup",
            Phase::MainWork => "Main work",
            Phase::Cooldown => "Cooldown",
        };
        println!();
        println!(
            "  {} (~{})",
            title,
            format_duration(total_duration_seconds(entries))
        );

        for (index, entry) in entries.iter().enumerate() {
            let target = match (entry.target_reps, entry.target_duration_seconds) {
                (Some(reps), _) => format!("{} x {} reps", entry.sets, reps),
                (None, Some(seconds)) => format!("{} x {}", entry.sets, format_clock(seconds)),
                (None, None) => format!("{} sets", entry.sets),
            };
            println!(
                "  [{}] {:<28} {}, rest {}",
                index,
                entry.exercise.name,
                target,
                format_duration(entry.rest_seconds)
            );
        }
    }
}
