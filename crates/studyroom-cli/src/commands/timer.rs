//! Timer commands for CLI.
//!
//! The engine is persisted under a store key between invocations, so
//! consecutive commands drive one continuing timer.

use chrono::Utc;
use clap::Subcommand;
use studyroom_core::{keys, Event, Schedule, StepKind, TimerEngine};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Start the timer (resumes a completed step at the next one)
    Start,
    /// Pause the running timer
    Pause,
    /// Resume a paused timer
    Resume,
    /// Skip to the next step
    Skip,
    /// Reset to the beginning of the schedule
    Reset,
    /// Tick the timer and print its state; a completed focus step records a
    /// study session
    Status {
        /// Subject to credit when a focus step completes
        #[arg(long)]
        subject: Option<String>,
    },
}

pub async fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = super::load_app().await?;
    let default_engine =
        TimerEngine::new(Schedule::from_preferences(&app.profile().study_preferences));
    let mut engine = app.store().get(keys::TIMER, default_engine).await;

    match action {
        TimerAction::Start => print_event_or_snapshot(engine.start(), &engine)?,
        TimerAction::Pause => print_event_or_snapshot(engine.pause(), &engine)?,
        TimerAction::Resume => print_event_or_snapshot(engine.resume(), &engine)?,
        TimerAction::Skip => print_event_or_snapshot(engine.skip(), &engine)?,
        TimerAction::Reset => print_event_or_snapshot(engine.reset(), &engine)?,
        TimerAction::Status { subject } => {
            let completed = engine.tick();
            println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
            if let Some(event) = completed {
                println!("{}", serde_json::to_string_pretty(&event)?);
                if let Event::TimerCompleted {
                    step_kind: StepKind::Focus,
                    duration_min,
                    ..
                } = event
                {
                    let session = app
                        .record_session(subject, duration_min as u32, Utc::now())
                        .await?;
                    println!("Session recorded: {}", session.id);
                    println!("{}", serde_json::to_string_pretty(app.streak())?);
                }
            }
        }
    }

    app.store().set(keys::TIMER, &engine).await?;
    Ok(())
}

fn print_event_or_snapshot(
    event: Option<Event>,
    engine: &TimerEngine,
) -> Result<(), Box<dyn std::error::Error>> {
    match event {
        Some(event) => println!("{}", serde_json::to_string_pretty(&event)?),
        None => println!("{}", serde_json::to_string_pretty(&engine.snapshot())?),
    }
    Ok(())
}
