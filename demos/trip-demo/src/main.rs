//! trip-demo — plans a few truck trips end to end with in-memory
//! collaborators and writes their logs to `output/trip-demo/`.
//!
//! Usage: `trip-demo [config.json]`.  The optional file is a `TripConfig`;
//! omitted fields keep their defaults.  Set `RUST_LOG=debug` to trace every
//! engine transition.

mod atlas;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use hos_output::{daily_logs, CsvLogWriter, DailyLog, LogWriter};
use hos_schedule::DutyStatus;
use hos_trip::{TripConfig, TripPlan, TripPlanner, TripRequest};

use atlas::{CityTable, StraightLineRouter};

// ── Demo trips ────────────────────────────────────────────────────────────────

/// (output name, current, pickup, dropoff, hours already used)
const TRIPS: &[(&str, &str, &str, &str, f64)] = &[
    ("regional",  "Chicago, IL",     "Indianapolis, IN", "Nashville, TN", 10.0),
    ("long_haul", "Los Angeles, CA", "Phoenix, AZ",      "Atlanta, GA",   0.0),
    ("near_limit", "Denver, CO",     "Dallas, TX",       "New York, NY",  62.0),
];

const OUTPUT_DIR: &str = "output/trip-demo";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => load_config(Path::new(&path))?,
        None => TripConfig::default(),
    };
    info!(pickup_leg = ?config.pickup_leg, speed_mph = config.rules.avg_speed_mph, "configuration loaded");

    let planner = TripPlanner::new(CityTable::new(), StraightLineRouter).with_config(config);

    println!("=== trip-demo: HOS trip planner ===");
    println!();

    for &(name, current, pickup, dropoff, hours_used) in TRIPS {
        let request = TripRequest::new(current, pickup, dropoff, hours_used);

        let t0 = Instant::now();
        let plan = match planner.plan(&request) {
            Ok(plan) => plan,
            Err(e) => {
                eprintln!("{name}: HTTP {}: {e}", e.status_code());
                continue;
            }
        };
        let elapsed = t0.elapsed();

        let logs = daily_logs(&plan.schedule.segments);
        print_plan(name, &request, &plan, &logs);
        println!("  planned in {:.3} ms", elapsed.as_secs_f64() * 1e3);

        let dir = PathBuf::from(OUTPUT_DIR).join(name);
        export(&dir, &plan, &logs)?;
        println!("  wrote {}", dir.display());
        println!();
    }

    // Response body of the first trip, as an endpoint would return it.
    let (_, current, pickup, dropoff, hours_used) = TRIPS[0];
    let plan = planner.plan(&TripRequest::new(current, pickup, dropoff, hours_used))?;
    println!("{}", serde_json::to_string_pretty(&plan)?);

    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<TripConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parsing config {}", path.display()))
}

fn export(dir: &Path, plan: &TripPlan, logs: &[DailyLog]) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    let mut writer = CsvLogWriter::new(dir)?;
    writer.write_segments(&plan.trip_segments)?;
    writer.write_daily_totals(logs)?;
    writer.finish()?;
    Ok(())
}

fn print_plan(name: &str, request: &TripRequest, plan: &TripPlan, logs: &[DailyLog]) {
    let loc = |s: &Option<String>| s.clone().unwrap_or_default();
    println!(
        "[{name}] {} → {} → {}",
        loc(&request.current_location),
        loc(&request.pickup_location),
        loc(&request.dropoff_location),
    );
    println!(
        "  {:.1} mi, {:.2} h elapsed, {:.2} cycle h left{}",
        plan.route.total_distance,
        plan.total_trip_hours,
        plan.available_hours,
        if plan.schedule.is_truncated() { "  (stopped at cycle limit)" } else { "" },
    );
    println!();

    println!("  {:<11} {:<9} {:<28} {}", "Time", "Status", "Event", "Location");
    println!("  {}", "-".repeat(70));
    for seg in &plan.schedule.segments {
        let at = seg.coordinate.map(|c| c.to_string()).unwrap_or_default();
        println!(
            "  {:<11} {:<9} {:<28} {}",
            format!("{}-{}", seg.start, seg.end()),
            seg.status(),
            seg.description(),
            at,
        );
    }
    println!();

    println!("  {:<5} {:>8} {:>8} {:>8} {:>8}", "Day", "Off", "Sleeper", "Driving", "On duty");
    for log in logs {
        print!("  {:<5}", log.day);
        for status in DutyStatus::ALL {
            print!(" {:>8.2}", log.totals.hours(status));
        }
        println!();
    }
}
