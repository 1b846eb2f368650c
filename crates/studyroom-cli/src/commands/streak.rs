//! Streak commands for CLI.

use clap::Subcommand;

#[derive(Subcommand)]
pub enum StreakAction {
    /// Current and best streak
    Show,
}

pub async fn run(action: StreakAction) -> Result<(), Box<dyn std::error::Error>> {
    let app = super::load_app().await?;

    match action {
        StreakAction::Show => {
            println!("{}", serde_json::to_string_pretty(app.streak())?);
        }
    }
    Ok(())
}
