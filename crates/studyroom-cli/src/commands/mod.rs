//! CLI subcommands. Each module follows the same shape: a clap `Subcommand`
//! enum plus an async `run` that loads state, applies the intent, and prints
//! pretty JSON.

pub mod profile;
pub mod session;
pub mod stats;
pub mod streak;
pub mod subject;
pub mod task;
pub mod timer;

use chrono::Utc;
use studyroom_core::stats::Timeframe;
use studyroom_core::{App, Store};

/// Open the default store and load application state.
pub(crate) async fn load_app() -> Result<App, Box<dyn std::error::Error>> {
    let store = Store::open()?;
    Ok(App::load(store, Utc::now()).await)
}

pub(crate) fn parse_timeframe(s: &str) -> Timeframe {
    match s {
        "week" => Timeframe::Week,
        "month" => Timeframe::Month,
        _ => Timeframe::All,
    }
}
