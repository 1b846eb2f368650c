use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Preferred time of day for studying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreferredStudyTime {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl Default for PreferredStudyTime {
    fn default() -> Self {
        PreferredStudyTime::Morning
    }
}

/// Study preferences nested inside the profile. Field defaults keep stored
/// payloads from older versions parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPreferences {
    #[serde(default)]
    pub preferred_study_time: PreferredStudyTime,
    /// Focus session length in minutes
    #[serde(default = "default_focus_duration")]
    pub focus_session_duration: u32,
    /// Break length in minutes
    #[serde(default = "default_break_duration")]
    pub break_duration: u32,
    /// Daily study goal in hours
    #[serde(default = "default_daily_goal_hours")]
    pub daily_goal_hours: f64,
    #[serde(default = "default_true")]
    pub notifications: bool,
    #[serde(default = "default_true")]
    pub sound_effects: bool,
}

fn default_focus_duration() -> u32 {
    25
}
fn default_break_duration() -> u32 {
    5
}
fn default_daily_goal_hours() -> f64 {
    4.0
}
fn default_true() -> bool {
    true
}

impl Default for StudyPreferences {
    fn default() -> Self {
        Self {
            preferred_study_time: PreferredStudyTime::Morning,
            focus_session_duration: default_focus_duration(),
            break_duration: default_break_duration(),
            daily_goal_hours: default_daily_goal_hours(),
            notifications: true,
            sound_effects: true,
        }
    }
}

/// An unlocked achievement. The achievements list is append-only in principle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: String,
    pub description: String,
    pub date: DateTime<Utc>,
}

/// The student's profile and settings. A singleton value; unrelated to the
/// other entity collections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentProfile {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: String,
    /// Encoded image data (e.g. a data URL), if one was uploaded
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default)]
    pub study_preferences: StudyPreferences,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
}
