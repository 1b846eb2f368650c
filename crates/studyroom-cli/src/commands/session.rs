//! Study session commands for CLI.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use studyroom_core::stats::sessions_in_timeframe;

use super::parse_timeframe;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Record a completed study session and advance the streak
    Record {
        /// Duration in minutes
        minutes: u32,
        /// Subject label; defaults to "General"
        #[arg(long)]
        subject: Option<String>,
        /// Completion time (RFC 3339); defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// List recorded sessions
    List {
        /// Timeframe: week, month, or all
        #[arg(long, default_value = "all")]
        timeframe: String,
    },
    /// Remove every recorded session (the streak is kept)
    Clear,
}

pub async fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::load_app().await?;

    match action {
        SessionAction::Record {
            minutes,
            subject,
            at,
        } => {
            let session = app
                .record_session(subject, minutes, at.unwrap_or_else(Utc::now))
                .await?;
            println!("Session recorded: {}", session.id);
            println!("{}", serde_json::to_string_pretty(&session)?);
            println!("{}", serde_json::to_string_pretty(app.streak())?);
        }
        SessionAction::List { timeframe } => {
            let sessions =
                sessions_in_timeframe(app.sessions(), parse_timeframe(&timeframe), Utc::now());
            println!("{}", serde_json::to_string_pretty(&sessions)?);
        }
        SessionAction::Clear => {
            let cleared = app.clear_sessions().await;
            println!("Cleared {cleared} session(s)");
        }
    }
    Ok(())
}
