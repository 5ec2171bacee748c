use chrono::Utc;
use clap::{Parser, Subcommand};
use rounds_core::*;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "rounds")]
#[command(about = "Social drink tracking and BAC estimation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a night of tracking (ends any active night first)
    Start {
        /// Group the night belongs to
        #[arg(long, default_value = "solo")]
        group: String,

        /// Display name for the night
        #[arg(long)]
        name: Option<String>,

        /// Ride suggestion threshold, in drinks
        #[arg(long)]
        ride: Option<f64>,

        /// Food suggestion threshold, in drinks
        #[arg(long)]
        food: Option<f64>,

        /// Warning notification threshold, in drinks
        #[arg(long)]
        notify: Option<f64>,
    },

    /// End the active night and show its summary
    End,

    /// Log a drink to the active night
    Log {
        /// Drink type id (beer, wine, cocktail, shot, cider, seltzer)
        type_id: String,

        /// Log on behalf of another group member
        #[arg(long)]
        user: Option<String>,

        /// Venue name to attach
        #[arg(long)]
        location: Option<String>,

        /// Photo reference to attach
        #[arg(long)]
        photo: Option<String>,
    },

    /// Show current BAC, risk tier, and suggestions (default)
    Status {
        /// Show status for another group member
        #[arg(long)]
        user: Option<String>,
    },

    /// List recent drinks
    History {
        /// Days of history to show
        #[arg(long, default_value_t = 7)]
        days: i64,
    },

    /// Lifetime totals and health insight
    Health {
        /// Show insight for another group member
        #[arg(long)]
        user: Option<String>,
    },

    /// Roll up WAL drinks to CSV
    Rollup {
        /// Clean up processed WAL files after rollup
        #[arg(long)]
        cleanup: bool,
    },
}

/// File layout under the data directory
struct Paths {
    wal: PathBuf,
    csv: PathBuf,
    state: PathBuf,
}

impl Paths {
    fn new(data_dir: &std::path::Path) -> Self {
        let wal_dir = data_dir.join("wal");
        Self {
            wal: wal_dir.join("drinks.wal"),
            csv: data_dir.join("drinks.csv"),
            state: wal_dir.join("state.json"),
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging
    rounds_core::logging::init();

    let cli = Cli::parse();

    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    std::fs::create_dir_all(data_dir.join("wal"))?;

    let paths = Paths::new(&data_dir);

    match cli.command {
        Some(Commands::Start {
            group,
            name,
            ride,
            food,
            notify,
        }) => {
            let defaults = config.thresholds.to_thresholds();
            let thresholds = NightThresholds {
                ride: ride.unwrap_or(defaults.ride),
                food: food.unwrap_or(defaults.food),
                notification: notify.unwrap_or(defaults.notification),
            };
            cmd_start(&paths, group, name, thresholds)
        }
        Some(Commands::End) => cmd_end(&paths, &config),
        Some(Commands::Log {
            type_id,
            user,
            location,
            photo,
        }) => cmd_log(&paths, &config, type_id, user, location, photo),
        Some(Commands::Status { user }) => cmd_status(&paths, &config, user),
        Some(Commands::History { days }) => cmd_history(&paths, days),
        Some(Commands::Health { user }) => cmd_health(&paths, &config, user),
        Some(Commands::Rollup { cleanup }) => cmd_rollup(&data_dir, &paths, cleanup),
        None => cmd_status(&paths, &config, None),
    }
}

fn cmd_start(
    paths: &Paths,
    group: String,
    name: Option<String>,
    thresholds: NightThresholds,
) -> Result<()> {
    let state = TrackerState::update(&paths.state, |state| {
        state.start_night(group.clone(), name.clone(), Some(thresholds), Utc::now());
        Ok(())
    })?;

    let night = state
        .active_night()
        .ok_or_else(|| Error::State("night did not start".into()))?;

    println!("✓ Night started!");
    if let Some(ref name) = night.name {
        println!("  Name: {}", name);
    }
    println!("  Group: {}", night.group_id);
    println!(
        "  Thresholds: ride {} / food {} / warn {} drinks",
        night.thresholds.ride, night.thresholds.food, night.thresholds.notification
    );

    Ok(())
}

fn cmd_end(paths: &Paths, config: &Config) -> Result<()> {
    let before = TrackerState::load(&paths.state)?;
    let night = before
        .active_night()
        .cloned()
        .ok_or_else(|| Error::State("no active night to end".into()))?;

    TrackerState::update(&paths.state, |state| {
        state.end_active_night(Utc::now()).map(|_| ())
    })?;

    // Summary over the night's window
    let events = load_recent_events(&paths.wal, &paths.csv, 7)?;
    let mut ended = night.clone();
    ended.ended_at = Some(Utc::now());
    let night_events: Vec<DrinkEvent> = events_for_night(&events, &ended)
        .into_iter()
        .cloned()
        .collect();

    println!("✓ Night ended!");
    println!("  Drinks logged: {}", total_drinks(&night_events));
    print_type_counts(&night_events);

    let catalog = get_default_catalog();
    let user = &config.profile.user_id;
    let bac = estimate_bac(&night_events, user, catalog, &config.profile.body(), Utc::now());
    println!("  Your BAC now: {:.3} ({})", bac, BacLevel::classify(bac).as_str());

    Ok(())
}

fn cmd_log(
    paths: &Paths,
    config: &Config,
    type_id: String,
    user: Option<String>,
    location: Option<String>,
    photo: Option<String>,
) -> Result<()> {
    let state = TrackerState::load(&paths.state)?;
    if state.active_night().is_none() {
        return Err(Error::State(
            "no active night - run `rounds start` first".into(),
        ));
    }

    let catalog = get_default_catalog();
    let drink_type = catalog.drink_type(&type_id);
    if drink_type.is_none() {
        // Unknown types still get logged; they just contribute zero alcohol.
        eprintln!(
            "Warning: unknown drink type '{}' - it will not count toward BAC",
            type_id
        );
    }

    let event = DrinkEvent {
        id: uuid::Uuid::new_v4(),
        user_id: user.unwrap_or_else(|| config.profile.user_id.clone()),
        type_id,
        timestamp: Utc::now(),
        location: location.map(|name| Location {
            name,
            lat: None,
            lng: None,
        }),
        photo,
    };

    let mut sink = JsonlSink::new(&paths.wal);
    sink.append(&event)?;

    match drink_type {
        Some(drink) => println!(
            "✓ Logged {} {} at {}",
            drink.icon,
            drink.name,
            format_time(event.timestamp)
        ),
        None => println!("✓ Logged {} at {}", event.type_id, format_time(event.timestamp)),
    }

    Ok(())
}

fn cmd_status(paths: &Paths, config: &Config, user: Option<String>) -> Result<()> {
    let state = TrackerState::load(&paths.state)?;
    let now = Utc::now();
    let user = user.unwrap_or_else(|| config.profile.user_id.clone());

    let (title, thresholds, events) = match state.active_night() {
        Some(night) => {
            let events = load_recent_events(&paths.wal, &paths.csv, 7)?;
            let night_events: Vec<DrinkEvent> = events_for_night(&events, night)
                .into_iter()
                .cloned()
                .collect();
            let title = night
                .name
                .clone()
                .unwrap_or_else(|| "CURRENT NIGHT".to_string());
            (title, night.thresholds, night_events)
        }
        None => ("NO ACTIVE NIGHT".to_string(), config.thresholds.to_thresholds(), vec![]),
    };

    let catalog = get_default_catalog();
    let bac = estimate_bac(&events, &user, catalog, &config.profile.body(), now);
    let level = BacLevel::classify(bac);
    let triggers = SuggestionTriggers::evaluate(bac, &thresholds);

    println!("\n╭─────────────────────────────────────────╮");
    println!("│  {}", title);
    println!("╰─────────────────────────────────────────╯");
    println!();
    println!("  BAC estimate: {:.3} ({})", bac, level.as_str());
    println!("  {}", level.label());
    println!("  Legal driving limit: {:.3}", LEGAL_DRIVING_LIMIT);
    println!();

    let mine = drinks_for_user(&events, &user);
    println!("  Drinks this night: {}", mine.len());
    let mine_owned: Vec<DrinkEvent> = mine.into_iter().cloned().collect();
    print_type_counts(&mine_owned);

    if triggers.food {
        println!("  → Order some food");
    }
    if triggers.ride {
        println!("  → Consider a ride home");
    }
    if triggers.warn {
        println!("  ⚠ Over your warning threshold - slow down");
    }
    if !triggers.food && !triggers.ride && !triggers.warn {
        println!("  All good - drink water between rounds");
    }
    println!();

    Ok(())
}

fn cmd_history(paths: &Paths, days: i64) -> Result<()> {
    let events = load_recent_events(&paths.wal, &paths.csv, days)?;

    if events.is_empty() {
        println!("No drinks in the last {} days.", days);
        return Ok(());
    }

    let catalog = get_default_catalog();
    let now = Utc::now();

    println!("Drinks from the last {} days:\n", days);
    for event in &events {
        let name = catalog
            .drink_type(&event.type_id)
            .map(|d| format!("{} {}", d.icon, d.name))
            .unwrap_or_else(|| event.type_id.clone());

        let place = event
            .location
            .as_ref()
            .map(|l| format!(" at {}", l.name))
            .unwrap_or_default();

        println!(
            "  {} — {}{} ({})",
            name,
            time_ago(event.timestamp, now),
            place,
            event.user_id
        );
    }

    println!();
    print_type_counts(&events);

    Ok(())
}

fn cmd_health(paths: &Paths, config: &Config, user: Option<String>) -> Result<()> {
    // Health looks at the full archive, not just the recent window
    let events = load_recent_events(&paths.wal, &paths.csv, 3650)?;
    let user = user.unwrap_or_else(|| config.profile.user_id.clone());

    let insight = health_insight(&events, &user, Utc::now());

    println!("Health insight for {}:\n", user);
    println!("  Lifetime drinks:  {}", insight.lifetime_drinks);
    println!("  Weekly average:   {:.2}", insight.weekly_average);
    println!(
        "  Est. life impact: {:.2} years",
        insight.estimated_life_impact_years
    );
    let trend = match insight.monthly_trend {
        MonthlyTrend::Increasing => "increasing",
        MonthlyTrend::Decreasing => "decreasing",
        MonthlyTrend::Stable => "stable",
    };
    println!("  Monthly trend:    {}", trend);
    println!();
    println!("  Estimates only - not medical advice.");

    Ok(())
}

fn cmd_rollup(data_dir: &std::path::Path, paths: &Paths, cleanup: bool) -> Result<()> {
    if !paths.wal.exists() {
        println!("No WAL file found - nothing to roll up.");
        return Ok(());
    }

    let count = rounds_core::csv_rollup::wal_to_csv_and_archive(&paths.wal, &paths.csv)?;

    println!("✓ Rolled up {} drinks to CSV", count);
    println!("  CSV: {}", paths.csv.display());

    if cleanup {
        let cleaned = rounds_core::csv_rollup::cleanup_processed_wals(&data_dir.join("wal"))?;
        if cleaned > 0 {
            println!("✓ Cleaned up {} processed WAL files", cleaned);
        }
    }

    Ok(())
}

/// Print a per-type breakdown, e.g. "2 × 🍺 Beer"
fn print_type_counts(events: &[DrinkEvent]) {
    let counts = count_by_type(events);
    if counts.is_empty() {
        return;
    }

    let catalog = get_default_catalog();
    let mut rows: Vec<_> = counts.into_iter().collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    for (type_id, count) in rows {
        let name = catalog
            .drink_type(&type_id)
            .map(|d| format!("{} {}", d.icon, d.name))
            .unwrap_or(type_id);
        println!("    {} × {}", count, name);
    }
}
