//! Task management commands for CLI.

use chrono::{NaiveDate, Utc};
use clap::Subcommand;
use studyroom_core::stats::{filter_tasks, sort_tasks, TaskFilter, TaskSort};
use studyroom_core::{Priority, TaskDraft};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Task description
        #[arg(long)]
        description: Option<String>,
        /// Priority: high, medium, or low
        #[arg(long, default_value = "medium")]
        priority: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
    },
    /// List tasks
    List {
        /// Filter: all, active, or completed
        #[arg(long, default_value = "all")]
        filter: String,
        /// Sort key: priority, due-date, or created
        #[arg(long, default_value = "created")]
        sort: String,
    },
    /// Update a task's fields
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New description
        #[arg(long)]
        description: Option<String>,
        /// New priority
        #[arg(long)]
        priority: Option<String>,
        /// New due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
    },
    /// Toggle a task's completion
    Done {
        /// Task ID
        id: String,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Remove all completed tasks
    ClearCompleted,
}

pub async fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::load_app().await?;

    match action {
        TaskAction::Add {
            title,
            description,
            priority,
            due,
        } => {
            let task = app
                .create_task(
                    TaskDraft {
                        title,
                        description,
                        priority: parse_priority(&priority),
                        due_date: due,
                    },
                    Utc::now(),
                )
                .await?;
            println!("Task created: {}", task.id);
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::List { filter, sort } => {
            let filtered = filter_tasks(app.tasks(), parse_filter(&filter));
            let sorted = sort_tasks(filtered, parse_sort(&sort));
            println!("{}", serde_json::to_string_pretty(&sorted)?);
        }
        TaskAction::Update {
            id,
            title,
            description,
            priority,
            due,
            clear_due,
        } => {
            let current = app
                .tasks()
                .iter()
                .find(|t| t.id == id)
                .ok_or_else(|| format!("Task not found: {id}"))?;
            let mut draft = current.draft();
            if let Some(t) = title {
                draft.title = t;
            }
            if let Some(d) = description {
                draft.description = Some(d);
            }
            if let Some(p) = priority {
                draft.priority = parse_priority(&p);
            }
            if let Some(d) = due {
                draft.due_date = Some(d);
            }
            if clear_due {
                draft.due_date = None;
            }
            let task = app.update_task(&id, draft).await?;
            println!("Task updated:");
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Done { id } => {
            let task = app.toggle_task(&id).await?;
            println!("{}", serde_json::to_string_pretty(&task)?);
        }
        TaskAction::Delete { id } => {
            app.delete_task(&id).await?;
            println!("Task deleted: {id}");
        }
        TaskAction::ClearCompleted => {
            let cleared = app.clear_completed().await;
            println!("Cleared {cleared} completed task(s)");
        }
    }
    Ok(())
}

fn parse_priority(s: &str) -> Priority {
    match s {
        "high" => Priority::High,
        "low" => Priority::Low,
        _ => Priority::Medium,
    }
}

fn parse_filter(s: &str) -> TaskFilter {
    match s {
        "active" => TaskFilter::Active,
        "completed" => TaskFilter::Completed,
        _ => TaskFilter::All,
    }
}

fn parse_sort(s: &str) -> TaskSort {
    match s {
        "priority" => TaskSort::Priority,
        "due-date" | "dueDate" => TaskSort::DueDate,
        _ => TaskSort::Created,
    }
}
