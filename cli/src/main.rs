mod commands;
mod config;

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process;
use tracing::debug;

use crate::commands::{
    cmd_clear, cmd_comply, cmd_export, cmd_history, cmd_import, cmd_meal_add, cmd_meal_notes,
    cmd_meal_remove, cmd_meal_suggest, cmd_meal_time, cmd_observe, cmd_profile_clear,
    cmd_profile_set, cmd_profile_show, cmd_seed, cmd_show, cmd_sleep, cmd_theme, cmd_water_add,
    cmd_water_goal, cmd_water_remove, cmd_water_show, cmd_weight_convert, cmd_weight_set,
    cmd_weight_show, cmd_workout,
};
use crate::config::Config;
use healthbook_core::models::{MealSlot, SleepPatch, WorkoutPatch};
use healthbook_core::service::Tracker;
use healthbook_core::transfer::ExportFormat;
use healthbook_core::units::WeightUnit;

#[derive(Parser)]
#[command(
    name = "healthbook",
    version,
    about = "A daily health log: meals, sleep, water, workouts and weight"
)]
struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Directory holding healthbook.db (default: platform data dir)
    #[arg(long, env = "HEALTHBOOK_DATA_DIR", global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    /// Keep day records separately for this profile
    #[arg(long, global = true)]
    profile: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show everything logged for a day (defaults to today)
    Show {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow)
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// List recorded days, oldest first
    History {
        /// Only the most recent N days
        #[arg(short, long)]
        days: Option<usize>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Mark a day on or off plan (toggles when neither flag is given)
    Comply {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow)
        date: Option<String>,
        /// Mark on plan
        #[arg(long, conflicts_with = "no")]
        yes: bool,
        /// Mark off plan
        #[arg(long)]
        no: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log meals
    Meal {
        #[command(subcommand)]
        command: MealCommands,
    },
    /// Show or update the workout for a day
    Workout {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow)
        date: Option<String>,
        /// Worked out
        #[arg(long, conflicts_with = "skip")]
        done: bool,
        /// Did not work out
        #[arg(long)]
        skip: bool,
        /// Cardio duration (e.g. "60")
        #[arg(long)]
        cardio: Option<String>,
        /// Weight training duration
        #[arg(long)]
        weights: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or update sleep times for a day
    Sleep {
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow)
        date: Option<String>,
        /// Wake time
        #[arg(long)]
        wake: Option<String>,
        /// Nap time
        #[arg(long)]
        nap: Option<String>,
        /// Bed time
        #[arg(long)]
        bed: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Track glasses of water
    Water {
        #[command(subcommand)]
        command: WaterCommands,
    },
    /// Track body weight (stored in lbs)
    Weight {
        #[command(subcommand)]
        command: WeightCommands,
    },
    /// Write the day's observations (an empty string clears them)
    Observe {
        /// Observation text
        text: String,
        /// Add to the existing text instead of replacing it
        #[arg(short, long)]
        append: bool,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Export every day record
    Export {
        /// Export format
        #[arg(value_enum)]
        format: FormatArg,
        /// File or directory to write to (default: stdout)
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
        /// Output a JSON status line when writing a file
        #[arg(long)]
        json: bool,
    },
    /// Replace all day records with a JSON export
    Import {
        /// Path to the JSON file
        file: PathBuf,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Load the two-week sample history (only once unless --force)
    Seed {
        /// Load again, overwriting those dates
        #[arg(long)]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Delete every day record (preferences are kept)
    Clear {
        /// Confirm deletion
        #[arg(long)]
        yes: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remember who is logging
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Show or set the theme preference
    Theme {
        #[arg(value_enum)]
        theme: Option<ThemeArg>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum MealCommands {
    /// Add one or more foods to a meal
    Add {
        /// Meal: early-morning, breakfast, mid-morning, lunch, tea, dinner, supper
        #[arg(value_parser = parse_slot)]
        slot: MealSlot,
        /// Food items
        #[arg(required = true)]
        foods: Vec<String>,
        /// Date (YYYY-MM-DD or today/yesterday/tomorrow, default: today)
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Remove a food by its position (as listed by `show`)
    Remove {
        #[arg(value_parser = parse_slot)]
        slot: MealSlot,
        /// Position, starting at 1
        position: usize,
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set notes for a meal
    Notes {
        #[arg(value_parser = parse_slot)]
        slot: MealSlot,
        notes: String,
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the time a meal was eaten (HH:MM, empty to clear)
    Time {
        #[arg(value_parser = parse_slot)]
        slot: MealSlot,
        time: String,
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the diet plan's suggested foods
    Suggest {
        #[arg(value_parser = parse_slot)]
        slot: Option<MealSlot>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum WaterCommands {
    /// Show intake against the goal
    Show {
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Log glasses of water
    Add {
        /// Number of glasses
        #[arg(default_value = "1")]
        glasses: u32,
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Take back the last glass
    Remove {
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the daily goal (1-20 glasses)
    Goal {
        goal: u32,
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum WeightCommands {
    /// Record a weight
    Set {
        /// Weight value (number)
        value: String,
        /// Unit: lbs or kg
        #[arg(short, long, default_value = "lbs", value_parser = parse_unit)]
        unit: WeightUnit,
        /// Profile to record for (default: selected profile)
        #[arg(long)]
        user: Option<String>,
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show recorded weights for a day
    Show {
        #[arg(long)]
        date: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Convert between lbs and kg
    Convert {
        value: String,
        /// Unit of the given value
        #[arg(short, long, default_value = "lbs", value_parser = parse_unit)]
        unit: WeightUnit,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Select a profile
    Set {
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show the selected profile
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Forget the selected profile
    Clear {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for ExportFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Json => ExportFormat::Json,
            FormatArg::Csv => ExportFormat::Csv,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

fn parse_slot(s: &str) -> Result<MealSlot, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn parse_unit(s: &str) -> Result<WeightUnit, String> {
    s.parse().map_err(|e| format!("{e}"))
}

fn flag_pair(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

fn setup_logging(verbosity: u8) {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    let level = match verbosity {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

fn main() {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

#[allow(clippy::too_many_lines)]
fn run(cli: Cli) -> Result<()> {
    let config = Config::load(cli.data_dir)?;
    debug!(data_dir = %config.data_dir.display(), "using data directory");
    let tracker = Tracker::open_or_unavailable(&config.db_path);
    let prefs = tracker.prefs();
    let store = match cli.profile.as_deref() {
        Some(profile) => tracker.days_for(profile)?,
        None => tracker.days(),
    };

    match cli.command {
        Commands::Show { date, json } => cmd_show(&store, date.as_deref(), json),
        Commands::History { days, json } => cmd_history(&store, days, json),
        Commands::Comply {
            date,
            yes,
            no,
            json,
        } => cmd_comply(&store, date.as_deref(), flag_pair(yes, no), json),
        Commands::Meal { command } => match command {
            MealCommands::Add {
                slot,
                foods,
                date,
                json,
            } => cmd_meal_add(&store, slot, &foods, date.as_deref(), json),
            MealCommands::Remove {
                slot,
                position,
                date,
                json,
            } => cmd_meal_remove(&store, slot, position, date.as_deref(), json),
            MealCommands::Notes {
                slot,
                notes,
                date,
                json,
            } => cmd_meal_notes(&store, slot, &notes, date.as_deref(), json),
            MealCommands::Time {
                slot,
                time,
                date,
                json,
            } => cmd_meal_time(&store, slot, &time, date.as_deref(), json),
            MealCommands::Suggest { slot, json } => cmd_meal_suggest(slot, json),
        },
        Commands::Workout {
            date,
            done,
            skip,
            cardio,
            weights,
            json,
        } => {
            let patch = WorkoutPatch {
                did_workout: flag_pair(done, skip),
                cardio_duration: cardio,
                weight_training: weights,
            };
            cmd_workout(&store, date.as_deref(), patch, json)
        }
        Commands::Sleep {
            date,
            wake,
            nap,
            bed,
            json,
        } => {
            let patch = SleepPatch {
                wake_time: wake,
                nap_time: nap,
                sleep_time: bed,
            };
            cmd_sleep(&store, date.as_deref(), patch, json)
        }
        Commands::Water { command } => match command {
            WaterCommands::Show { date, json } => cmd_water_show(&store, date.as_deref(), json),
            WaterCommands::Add {
                glasses,
                date,
                json,
            } => cmd_water_add(&store, glasses, date.as_deref(), json),
            WaterCommands::Remove { date, json } => {
                cmd_water_remove(&store, date.as_deref(), json)
            }
            WaterCommands::Goal { goal, date, json } => {
                cmd_water_goal(&store, goal, date.as_deref(), json)
            }
        },
        Commands::Weight { command } => match command {
            WeightCommands::Set {
                value,
                unit,
                user,
                date,
                json,
            } => cmd_weight_set(
                &store,
                &prefs,
                &value,
                unit,
                user.as_deref(),
                date.as_deref(),
                json,
            ),
            WeightCommands::Show { date, json } => cmd_weight_show(&store, date.as_deref(), json),
            WeightCommands::Convert { value, unit, json } => {
                cmd_weight_convert(&value, unit, json)
            }
        },
        Commands::Observe {
            text,
            append,
            date,
            json,
        } => cmd_observe(&store, date.as_deref(), &text, append, json),
        Commands::Export {
            format,
            output,
            json,
        } => cmd_export(&tracker, format.into(), output.as_deref(), json),
        Commands::Import { file, json } => cmd_import(&tracker, &file, json),
        Commands::Seed { force, json } => cmd_seed(&tracker, force, json),
        Commands::Clear { yes, json } => cmd_clear(&tracker, yes, json),
        Commands::Profile { command } => match command {
            ProfileCommands::Set { name, json } => cmd_profile_set(&prefs, &name, json),
            ProfileCommands::Show { json } => cmd_profile_show(&prefs, json),
            ProfileCommands::Clear { json } => cmd_profile_clear(&prefs, json),
        },
        Commands::Theme { theme, json } => {
            let dark = theme.map(|t| matches!(t, ThemeArg::Dark));
            cmd_theme(&prefs, dark, json)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_meal_add() {
        let cli = Cli::try_parse_from([
            "healthbook",
            "meal",
            "add",
            "early-morning",
            "Oats",
            "2 egg whites",
            "--date",
            "2026-01-13",
        ])
        .unwrap();
        match cli.command {
            Commands::Meal {
                command: MealCommands::Add { slot, foods, date, .. },
            } => {
                assert_eq!(slot, MealSlot::EarlyMorning);
                assert_eq!(foods, vec!["Oats", "2 egg whites"]);
                assert_eq!(date.as_deref(), Some("2026-01-13"));
            }
            _ => panic!("expected meal add"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_slot() {
        assert!(Cli::try_parse_from(["healthbook", "meal", "add", "brunch", "Eggs"]).is_err());
    }

    #[test]
    fn test_comply_flags_conflict() {
        assert!(Cli::try_parse_from(["healthbook", "comply", "--yes", "--no"]).is_err());
    }

    #[test]
    fn test_global_options() {
        let cli = Cli::try_parse_from([
            "healthbook",
            "show",
            "-vv",
            "--profile",
            "raed",
            "--data-dir",
            "/tmp/hb",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.profile.as_deref(), Some("raed"));
        assert_eq!(cli.data_dir, Some(PathBuf::from("/tmp/hb")));
    }

    #[test]
    fn test_flag_pair() {
        assert_eq!(flag_pair(true, false), Some(true));
        assert_eq!(flag_pair(false, true), Some(false));
        assert_eq!(flag_pair(false, false), None);
    }
}
