//! Learner statistics with JSON persistence.
//!
//! Tracks lifetime totals, answer streaks, a daily-use streak, per-subject
//! accuracy and a history of finished sessions.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::summary::percentage;

/// Lifetime statistics for one learner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerStats {
    pub total_answered: u32,
    pub correct_count: u32,
    /// Consecutive correct answers, reset by a wrong one.
    pub current_streak: u32,
    pub max_streak: u32,
    /// Consecutive days with activity.
    pub daily_streak: u32,
    pub last_active_date: Option<NaiveDate>,
    pub subject_stats: BTreeMap<String, SubjectStat>,
    pub history: Vec<SessionRecord>,
}

/// Per-subject lifetime totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectStat {
    pub total: u32,
    pub correct: u32,
}

impl SubjectStat {
    pub fn accuracy(&self) -> u32 {
        percentage(self.correct, self.total)
    }
}

/// One finished session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: Uuid,
    pub date: DateTime<Utc>,
    pub score: u32,
    pub total_possible: u32,
    /// Mock-exam category, or the subject code for subject practice.
    pub category: String,
}

impl LearnerStats {
    /// Record one graded answer.
    pub fn record_answer(&mut self, subject: &str, is_correct: bool) {
        self.total_answered += 1;
        let stat = self.subject_stats.entry(subject.to_string()).or_default();
        stat.total += 1;
        if is_correct {
            self.correct_count += 1;
            stat.correct += 1;
            self.current_streak += 1;
            self.max_streak = self.max_streak.max(self.current_streak);
        } else {
            self.current_streak = 0;
        }
    }

    /// Mark activity on `today` and update the daily streak.
    ///
    /// The day after the last active day extends the streak; a longer gap
    /// restarts it at 1; the same day leaves it unchanged.
    pub fn touch(&mut self, today: NaiveDate) {
        match self.last_active_date {
            Some(last) => {
                let gap = (today - last).num_days();
                if gap == 1 {
                    self.daily_streak += 1;
                } else if gap > 1 {
                    self.daily_streak = 1;
                }
            }
            None => self.daily_streak = 1,
        }
        if self.last_active_date.map_or(true, |last| today > last) {
            self.last_active_date = Some(today);
        }
    }

    /// Append a finished session to the history.
    pub fn record_session(
        &mut self,
        score: u32,
        total_possible: u32,
        category: &str,
        at: DateTime<Utc>,
    ) -> &SessionRecord {
        self.history.push(SessionRecord {
            id: Uuid::new_v4(),
            date: at,
            score,
            total_possible,
            category: category.to_string(),
        });
        &self.history[self.history.len() - 1]
    }

    /// Lifetime accuracy percentage.
    pub fn accuracy(&self) -> u32 {
        percentage(self.correct_count, self.total_answered)
    }

    /// Save the stats as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize stats")?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write stats to {}", path.display()))?;
        Ok(())
    }

    /// Load stats from a JSON file; a missing file yields fresh stats.
    pub fn load_json(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read stats from {}", path.display()))?;
        let stats: LearnerStats =
            serde_json::from_str(&content).context("failed to parse stats JSON")?;
        Ok(stats)
    }
}
