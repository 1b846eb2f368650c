//! Subject management commands for CLI.

use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;
use studyroom_core::stats::weekly_goal_progress;
use studyroom_core::SubjectDraft;

#[derive(Subcommand)]
pub enum SubjectAction {
    /// Create a new subject
    Add {
        /// Subject name
        name: String,
        /// Subject description
        #[arg(long)]
        description: Option<String>,
        /// Display color
        #[arg(long, default_value = "#6366f1")]
        color: String,
        /// Weekly study goal in hours
        #[arg(long, default_value = "0")]
        goal: f64,
    },
    /// List subjects
    List,
    /// Update a subject's fields
    Update {
        /// Subject ID
        id: String,
        /// New name (historical sessions keep the old label)
        #[arg(long)]
        name: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New display color
        #[arg(long)]
        color: Option<String>,
        /// New weekly goal in hours
        #[arg(long)]
        goal: Option<f64>,
    },
    /// Delete a subject (recorded sessions are kept)
    Delete {
        /// Subject ID
        id: String,
    },
    /// Weekly goal progress for every subject
    Progress,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SubjectProgress<'a> {
    subject: &'a str,
    goal_hours_per_week: f64,
    hours: f64,
    percent: f64,
}

pub async fn run(action: SubjectAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::load_app().await?;

    match action {
        SubjectAction::Add {
            name,
            description,
            color,
            goal,
        } => {
            let subject = app
                .create_subject(SubjectDraft {
                    name,
                    description,
                    color,
                    goal_hours_per_week: goal,
                })
                .await?;
            println!("Subject created: {}", subject.id);
            println!("{}", serde_json::to_string_pretty(&subject)?);
        }
        SubjectAction::List => {
            println!("{}", serde_json::to_string_pretty(app.subjects())?);
        }
        SubjectAction::Update {
            id,
            name,
            description,
            color,
            goal,
        } => {
            let current = app
                .subjects()
                .iter()
                .find(|s| s.id == id)
                .ok_or_else(|| format!("Subject not found: {id}"))?;
            let mut draft = SubjectDraft {
                name: current.name.clone(),
                description: current.description.clone(),
                color: current.color.clone(),
                goal_hours_per_week: current.goal_hours_per_week,
            };
            if let Some(n) = name {
                draft.name = n;
            }
            if let Some(d) = description {
                draft.description = Some(d);
            }
            if let Some(c) = color {
                draft.color = c;
            }
            if let Some(g) = goal {
                draft.goal_hours_per_week = g;
            }
            let subject = app.update_subject(&id, draft).await?;
            println!("Subject updated:");
            println!("{}", serde_json::to_string_pretty(&subject)?);
        }
        SubjectAction::Delete { id } => {
            app.delete_subject(&id).await?;
            println!("Subject deleted: {id}");
        }
        SubjectAction::Progress => {
            let now = Utc::now();
            let rows: Vec<SubjectProgress> = app
                .subjects()
                .iter()
                .map(|subject| {
                    let progress = weekly_goal_progress(subject, app.sessions(), now);
                    SubjectProgress {
                        subject: &subject.name,
                        goal_hours_per_week: subject.goal_hours_per_week,
                        hours: progress.hours,
                        percent: progress.percent,
                    }
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&rows)?);
        }
    }
    Ok(())
}
