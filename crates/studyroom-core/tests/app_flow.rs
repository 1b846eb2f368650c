//! End-to-end flows through the app container and the metrics engine.

use chrono::{DateTime, TimeZone, Utc};

use studyroom_core::stats::{
    completion_rate, subject_distribution, subject_stats_csv, weekly_goal_progress, Timeframe,
};
use studyroom_core::{App, Priority, Store, SubjectDraft, TaskDraft};

fn at(m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, m, d, h, 0, 0).unwrap()
}

async fn app() -> App {
    App::load(Store::in_memory(), at(1, 1, 8)).await
}

#[tokio::test]
async fn task_lifecycle_drives_completion_rate() {
    let mut app = app().await;
    let a = app
        .create_task(
            TaskDraft {
                title: "Read chapter".into(),
                priority: Priority::High,
                ..Default::default()
            },
            at(1, 1, 9),
        )
        .await
        .unwrap();
    for title in ["Problem set", "Summary notes"] {
        app.create_task(
            TaskDraft {
                title: title.into(),
                ..Default::default()
            },
            at(1, 1, 10),
        )
        .await
        .unwrap();
    }

    assert_eq!(completion_rate(app.tasks()), 0.0);
    app.toggle_task(&a.id).await.unwrap();
    let rate = completion_rate(app.tasks());
    assert!((rate - 100.0 / 3.0).abs() < 1e-9);

    let cleared = app.clear_completed().await;
    assert_eq!(cleared, 1);
    assert_eq!(app.tasks().len(), 2);
    assert!(app.tasks().iter().all(|t| !t.completed));
}

#[tokio::test]
async fn a_week_of_studying_builds_streak_and_metrics() {
    let mut app = app().await;
    app.create_subject(SubjectDraft {
        name: "Math".into(),
        color: "#6366f1".into(),
        goal_hours_per_week: 3.0,
        ..Default::default()
    })
    .await
    .unwrap();

    // Mon Jan 8 .. Wed Jan 10, two sessions the last day.
    app.record_session(Some("Math".into()), 60, at(1, 8, 9))
        .await
        .unwrap();
    app.record_session(Some("Math".into()), 30, at(1, 9, 9))
        .await
        .unwrap();
    app.record_session(Some("Math".into()), 30, at(1, 10, 9))
        .await
        .unwrap();
    app.record_session(Some("History".into()), 45, at(1, 10, 20))
        .await
        .unwrap();

    // Same-day second session did not double-count the streak.
    assert_eq!(app.streak().current_streak, 3);
    assert_eq!(app.streak().best_streak, 3);

    let dist = subject_distribution(app.sessions());
    assert_eq!(dist[0].subject, "Math");
    assert_eq!(dist[0].minutes, 120);
    assert_eq!(dist[1].subject, "History");

    let progress = weekly_goal_progress(&app.subjects()[0], app.sessions(), at(1, 10, 21));
    assert!((progress.hours - 2.0).abs() < 1e-9);
    assert!((progress.percent - 100.0 * 2.0 / 3.0).abs() < 1e-9);
}

#[tokio::test]
async fn renaming_subject_leaves_history_behind() {
    let mut app = app().await;
    let subject = app
        .create_subject(SubjectDraft {
            name: "Chem".into(),
            color: "#ec4899".into(),
            ..Default::default()
        })
        .await
        .unwrap();
    app.record_session(Some("Chem".into()), 30, at(1, 2, 9))
        .await
        .unwrap();

    app.update_subject(
        &subject.id,
        SubjectDraft {
            name: "Chemistry".into(),
            color: "#ec4899".into(),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    // The session keeps the label it was recorded under, so the renamed
    // subject no longer matches it.
    assert_eq!(app.sessions()[0].subject, "Chem");
    let progress = weekly_goal_progress(&app.subjects()[0], app.sessions(), at(1, 2, 10));
    assert_eq!(progress.hours, 0.0);
}

#[tokio::test]
async fn csv_export_reflects_recorded_sessions() {
    let mut app = app().await;
    app.create_subject(SubjectDraft {
        name: "Physics".into(),
        color: "#f59e0b".into(),
        goal_hours_per_week: 2.0,
        ..Default::default()
    })
    .await
    .unwrap();
    app.record_session(Some("Physics".into()), 90, at(1, 2, 9))
        .await
        .unwrap();

    let csv = subject_stats_csv(app.subjects(), app.sessions(), Timeframe::All, at(1, 2, 10));
    assert_eq!(
        csv,
        "Subject,Total Hours,Number of Sessions\nPhysics,1.5,1"
    );
}
