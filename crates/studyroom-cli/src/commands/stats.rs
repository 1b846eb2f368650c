//! Statistics commands for CLI.

use std::path::PathBuf;

use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;
use studyroom_core::stats::{
    completion_rate, daily_average, daily_totals, sessions_in_timeframe, subject_distribution,
    subject_share, subject_stats_csv, total_minutes, Timeframe,
};

use super::parse_timeframe;

#[derive(Subcommand)]
pub enum StatsAction {
    /// Summary for a timeframe
    Summary {
        /// Timeframe: week, month, or all
        #[arg(long, default_value = "week")]
        timeframe: String,
    },
    /// Minutes per day over a trailing window
    Daily {
        /// Number of days, today included
        #[arg(long, default_value = "7")]
        days: u32,
    },
    /// Total minutes per subject, busiest first
    Distribution,
    /// Each subject's share of total study time
    Share,
    /// Export per-subject stats as CSV
    Export {
        /// Timeframe: week, month, or all
        #[arg(long, default_value = "week")]
        timeframe: String,
        /// Write to a file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    timeframe: Timeframe,
    total_minutes: u64,
    session_count: usize,
    daily_average_minutes: u64,
    task_completion_rate: f64,
}

pub async fn run(action: StatsAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = super::load_app().await?;
    let now = Utc::now();

    match action {
        StatsAction::Summary { timeframe } => {
            let timeframe = parse_timeframe(&timeframe);
            let filtered = sessions_in_timeframe(app.sessions(), timeframe, now);
            let summary = Summary {
                timeframe,
                total_minutes: total_minutes(filtered.iter().copied()),
                session_count: filtered.len(),
                daily_average_minutes: daily_average(app.sessions()),
                task_completion_rate: completion_rate(app.tasks()),
            };
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        StatsAction::Daily { days } => {
            let totals = daily_totals(app.sessions(), days, now);
            println!("{}", serde_json::to_string_pretty(&totals)?);
        }
        StatsAction::Distribution => {
            let dist = subject_distribution(app.sessions());
            println!("{}", serde_json::to_string_pretty(&dist)?);
        }
        StatsAction::Share => {
            let share = subject_share(app.sessions());
            println!("{}", serde_json::to_string_pretty(&share)?);
        }
        StatsAction::Export { timeframe, output } => {
            let csv = subject_stats_csv(
                app.subjects(),
                app.sessions(),
                parse_timeframe(&timeframe),
                now,
            );
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)?;
                    println!("Exported to {}", path.display());
                }
                None => println!("{csv}"),
            }
        }
    }
    Ok(())
}
