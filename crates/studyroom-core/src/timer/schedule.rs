use serde::{Deserialize, Serialize};

use crate::model::StudyPreferences;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepKind {
    Focus,
    Break,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub kind: StepKind,
    /// Duration in minutes.
    pub duration_min: u64,
    pub label: String,
}

impl Step {
    /// Step duration in milliseconds, saturating on overflow.
    pub fn duration_ms(&self) -> u64 {
        self.duration_min.saturating_mul(60).saturating_mul(1000)
    }

    /// Step duration in seconds, saturating on overflow.
    pub fn duration_secs(&self) -> u64 {
        self.duration_min.saturating_mul(60)
    }
}

/// An ordered run of focus and break steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub steps: Vec<Step>,
}

impl Schedule {
    /// Focus/break rounds from the user's study preferences.
    pub fn from_preferences(prefs: &StudyPreferences) -> Self {
        Self::rounds(
            prefs.focus_session_duration as u64,
            prefs.break_duration as u64,
            4,
        )
    }

    /// `rounds` alternating focus/break pairs.
    pub fn rounds(focus_min: u64, break_min: u64, rounds: usize) -> Self {
        let mut steps = Vec::with_capacity(rounds * 2);
        for round in 0..rounds {
            steps.push(Step {
                kind: StepKind::Focus,
                duration_min: focus_min,
                label: format!("Focus {}", round + 1),
            });
            steps.push(Step {
                kind: StepKind::Break,
                duration_min: break_min,
                label: "Break".into(),
            });
        }
        Schedule { steps }
    }

    pub fn total_duration_min(&self) -> u64 {
        self.steps.iter().map(|s| s.duration_min).sum()
    }

    pub fn focus_count(&self) -> usize {
        self.steps
            .iter()
            .filter(|s| s.kind == StepKind::Focus)
            .count()
    }

    /// Cumulative minutes completed up to (but not including) `step_index`.
    pub fn cumulative_min(&self, step_index: usize) -> u64 {
        self.steps
            .iter()
            .take(step_index)
            .map(|s| s.duration_min)
            .sum()
    }
}

impl Default for Schedule {
    fn default() -> Self {
        // The classic pomodoro: 25 on, 5 off, four rounds.
        Self::rounds(25, 5, 4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_schedule_has_four_rounds() {
        let s = Schedule::default();
        assert_eq!(s.steps.len(), 8);
        assert_eq!(s.focus_count(), 4);
        assert_eq!(s.total_duration_min(), 4 * 25 + 4 * 5);
    }

    #[test]
    fn preferences_drive_durations() {
        let prefs = StudyPreferences {
            focus_session_duration: 50,
            break_duration: 10,
            ..Default::default()
        };
        let s = Schedule::from_preferences(&prefs);
        assert_eq!(s.steps[0].duration_min, 50);
        assert_eq!(s.steps[1].duration_min, 10);
    }

    #[test]
    fn cumulative_minutes() {
        let s = Schedule::rounds(25, 5, 2);
        assert_eq!(s.cumulative_min(0), 0);
        assert_eq!(s.cumulative_min(2), 30);
        assert_eq!(s.cumulative_min(4), 60);
    }
}
