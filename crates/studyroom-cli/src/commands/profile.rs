//! Profile commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use studyroom_core::{Achievement, PreferredStudyTime};

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Show the profile
    Show,
    /// Update profile fields and study preferences
    Set {
        /// Display name
        #[arg(long)]
        name: Option<String>,
        /// Email address
        #[arg(long)]
        email: Option<String>,
        /// Short bio
        #[arg(long)]
        bio: Option<String>,
        /// Preferred study time: morning, afternoon, evening, or night
        #[arg(long)]
        study_time: Option<String>,
        /// Focus session length in minutes
        #[arg(long)]
        focus: Option<u32>,
        /// Break length in minutes
        #[arg(long = "break")]
        break_minutes: Option<u32>,
        /// Daily study goal in hours
        #[arg(long)]
        daily_goal: Option<f64>,
        /// Enable or disable notifications
        #[arg(long)]
        notifications: Option<bool>,
        /// Enable or disable sound effects
        #[arg(long)]
        sound_effects: Option<bool>,
    },
    /// Append an achievement to the log
    Achievement {
        /// Achievement title
        title: String,
        /// Achievement description
        #[arg(long, default_value = "")]
        description: String,
    },
}

pub async fn run(action: ProfileAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::load_app().await?;

    match action {
        ProfileAction::Show => {
            println!("{}", serde_json::to_string_pretty(app.profile())?);
        }
        ProfileAction::Set {
            name,
            email,
            bio,
            study_time,
            focus,
            break_minutes,
            daily_goal,
            notifications,
            sound_effects,
        } => {
            let mut profile = app.profile().clone();
            if let Some(n) = name {
                profile.name = n;
            }
            if let Some(e) = email {
                profile.email = e;
            }
            if let Some(b) = bio {
                profile.bio = b;
            }
            if let Some(t) = study_time {
                profile.study_preferences.preferred_study_time = parse_study_time(&t);
            }
            if let Some(f) = focus {
                profile.study_preferences.focus_session_duration = f;
            }
            if let Some(b) = break_minutes {
                profile.study_preferences.break_duration = b;
            }
            if let Some(g) = daily_goal {
                profile.study_preferences.daily_goal_hours = g;
            }
            if let Some(n) = notifications {
                profile.study_preferences.notifications = n;
            }
            if let Some(s) = sound_effects {
                profile.study_preferences.sound_effects = s;
            }
            app.save_profile(profile).await;
            println!("Profile updated:");
            println!("{}", serde_json::to_string_pretty(app.profile())?);
        }
        ProfileAction::Achievement { title, description } => {
            app.add_achievement(Achievement {
                title,
                description,
                date: Utc::now(),
            })
            .await;
            println!("{}", serde_json::to_string_pretty(&app.profile().achievements)?);
        }
    }
    Ok(())
}

fn parse_study_time(s: &str) -> PreferredStudyTime {
    match s {
        "afternoon" => PreferredStudyTime::Afternoon,
        "evening" => PreferredStudyTime::Evening,
        "night" => PreferredStudyTime::Night,
        _ => PreferredStudyTime::Morning,
    }
}
