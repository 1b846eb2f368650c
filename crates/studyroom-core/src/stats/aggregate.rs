//! Time aggregation over study sessions.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::StudySession;

/// Reporting timeframe for session filters and exports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Timeframe {
    Week,
    Month,
    All,
}

/// Total study minutes across all sessions. Empty input is 0.
pub fn total_minutes<'a, I>(sessions: I) -> u64
where
    I: IntoIterator<Item = &'a StudySession>,
{
    sessions
        .into_iter()
        .map(|s| s.duration_minutes as u64)
        .sum()
}

/// Minutes from sessions whose date falls in `[start, end]`, inclusive.
pub fn minutes_in_range(
    sessions: &[StudySession],
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> u64 {
    sessions
        .iter()
        .filter(|s| s.date >= start && s.date <= end)
        .map(|s| s.duration_minutes as u64)
        .sum()
}

/// Minutes for one subject (exact string match), optionally time-bounded.
pub fn minutes_for_subject(
    sessions: &[StudySession],
    subject: &str,
    range: Option<(DateTime<Utc>, DateTime<Utc>)>,
) -> u64 {
    sessions
        .iter()
        .filter(|s| s.subject == subject)
        .filter(|s| match range {
            Some((start, end)) => s.date >= start && s.date <= end,
            None => true,
        })
        .map(|s| s.duration_minutes as u64)
        .sum()
}

/// The current week as an inclusive range: Sunday 00:00:00 through the last
/// second of Saturday, in UTC.
pub fn week_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.date_naive();
    let start_day = today - Duration::days(today.weekday().num_days_from_sunday() as i64);
    let start = start_day.and_time(NaiveTime::MIN).and_utc();
    let end = start + Duration::days(7) - Duration::seconds(1);
    (start, end)
}

/// The current calendar month as an inclusive range, in UTC.
pub fn month_bounds(now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
    let today = now.date_naive();
    // Day 1 of an existing month is always valid.
    let first = NaiveDate::from_ymd_opt(today.year(), today.month(), 1).unwrap_or(today);
    let next_first = if today.month() == 12 {
        NaiveDate::from_ymd_opt(today.year() + 1, 1, 1).unwrap_or(today)
    } else {
        NaiveDate::from_ymd_opt(today.year(), today.month() + 1, 1).unwrap_or(today)
    };
    let start = first.and_time(NaiveTime::MIN).and_utc();
    let end = next_first.and_time(NaiveTime::MIN).and_utc() - Duration::seconds(1);
    (start, end)
}

/// The inclusive range for a timeframe, `None` for all time.
pub fn timeframe_bounds(
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
    match timeframe {
        Timeframe::Week => Some(week_bounds(now)),
        Timeframe::Month => Some(month_bounds(now)),
        Timeframe::All => None,
    }
}

/// Sessions falling inside the timeframe, in input order.
pub fn sessions_in_timeframe<'a>(
    sessions: &'a [StudySession],
    timeframe: Timeframe,
    now: DateTime<Utc>,
) -> Vec<&'a StudySession> {
    match timeframe_bounds(timeframe, now) {
        None => sessions.iter().collect(),
        Some((start, end)) => sessions
            .iter()
            .filter(|s| s.date >= start && s.date <= end)
            .collect(),
    }
}

/// Aggregated minutes for one subject label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectMinutes {
    pub subject: String,
    pub minutes: u64,
}

/// Per-subject totals, sorted descending by minutes. Subjects are aggregated
/// in first-encounter order and the sort is stable, so ties keep that order.
pub fn subject_distribution(sessions: &[StudySession]) -> Vec<SubjectMinutes> {
    let mut totals: Vec<SubjectMinutes> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for session in sessions {
        match index.get(session.subject.as_str()) {
            Some(&i) => totals[i].minutes += session.duration_minutes as u64,
            None => {
                index.insert(session.subject.as_str(), totals.len());
                totals.push(SubjectMinutes {
                    subject: session.subject.clone(),
                    minutes: session.duration_minutes as u64,
                });
            }
        }
    }
    totals.sort_by(|a, b| b.minutes.cmp(&a.minutes));
    totals
}

/// A subject's slice of the total study time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectShare {
    pub subject: String,
    pub hours: f64,
    /// Percent of all minutes in the input; 0 when there are none.
    pub percent: f64,
}

/// The distribution normalized against the total, as hours and percent per
/// subject, busiest first.
pub fn subject_share(sessions: &[StudySession]) -> Vec<SubjectShare> {
    let total = total_minutes(sessions);
    subject_distribution(sessions)
        .into_iter()
        .map(|entry| SubjectShare {
            hours: entry.minutes as f64 / 60.0,
            percent: if total > 0 {
                entry.minutes as f64 / total as f64 * 100.0
            } else {
                0.0
            },
            subject: entry.subject,
        })
        .collect()
}

/// Minutes studied on one calendar day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub minutes: u64,
}

/// Per-day totals for the last `days` days (today included), oldest first.
/// Days without sessions appear with zero minutes.
pub fn daily_totals(sessions: &[StudySession], days: u32, now: DateTime<Utc>) -> Vec<DailyTotal> {
    let today = now.date_naive();
    let mut totals: Vec<DailyTotal> = (0..days as i64)
        .map(|i| {
            let date = today - Duration::days(i);
            let minutes = sessions
                .iter()
                .filter(|s| s.date.date_naive() == date)
                .map(|s| s.duration_minutes as u64)
                .sum();
            DailyTotal { date, minutes }
        })
        .collect();
    totals.reverse();
    totals
}

/// Average minutes per day with study activity, rounded to the nearest
/// minute. 0 when there are no sessions.
pub fn daily_average(sessions: &[StudySession]) -> u64 {
    let days: HashSet<NaiveDate> = sessions.iter().map(|s| s.date.date_naive()).collect();
    if days.is_empty() {
        return 0;
    }
    (total_minutes(sessions) as f64 / days.len() as f64).round() as u64
}
