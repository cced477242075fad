//! End-of-session aggregation and the diagnostic summary text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::SessionOutcome;

/// Message returned when a session ends with nothing answered.
pub const EMPTY_SESSION_MESSAGE: &str = "Session ended. No questions were answered.";

/// Rounded percentage, halves rounding up. Zero when `total` is zero.
pub fn percentage(correct: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let (correct, total) = (u64::from(correct), u64::from(total));
    ((200 * correct + total) / (2 * total)) as u32
}

/// Totals for one subject within a session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectTally {
    pub total: u32,
    pub correct: u32,
}

impl SubjectTally {
    pub fn accuracy(&self) -> u32 {
        percentage(self.correct, self.total)
    }
}

/// Aggregated numbers for one session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub total: u32,
    pub correct: u32,
    /// `round(100 * correct / total)`.
    pub accuracy: u32,
    /// Per-subject tallies, ordered by subject code.
    pub per_subject: BTreeMap<String, SubjectTally>,
}

impl SessionSummary {
    pub fn from_outcomes(outcomes: &[SessionOutcome]) -> Self {
        let mut per_subject: BTreeMap<String, SubjectTally> = BTreeMap::new();
        let mut correct = 0u32;
        for outcome in outcomes {
            let tally = per_subject.entry(outcome.subject.clone()).or_default();
            tally.total += 1;
            if outcome.is_correct {
                tally.correct += 1;
                correct += 1;
            }
        }
        let total = outcomes.len() as u32;

        Self {
            total,
            correct,
            accuracy: percentage(correct, total),
            per_subject,
        }
    }

    /// The subject with the lowest accuracy, first by code on ties.
    ///
    /// Only meaningful when more than one subject was answered.
    pub fn weakest_subject(&self) -> Option<(&str, &SubjectTally)> {
        if self.per_subject.len() < 2 {
            return None;
        }
        self.per_subject
            .iter()
            .min_by_key(|(_, tally)| tally.accuracy())
            .map(|(code, tally)| (code.as_str(), tally))
    }

    /// Render the deterministic diagnostic text.
    pub fn render(&self) -> String {
        if self.total == 0 {
            return EMPTY_SESSION_MESSAGE.to_string();
        }

        let mut text = format!(
            "Session complete: {} of {} answered correctly ({}% accuracy).",
            self.correct, self.total, self.accuracy
        );

        if self.per_subject.len() > 1 {
            for (code, tally) in &self.per_subject {
                let label = if code.is_empty() { "(none)" } else { code };
                text.push_str(&format!(
                    "\n  {label}: {}/{} ({}%)",
                    tally.correct,
                    tally.total,
                    tally.accuracy()
                ));
            }
        }

        let weakest = self
            .weakest_subject()
            .filter(|(_, tally)| tally.accuracy() < 100);
        if let Some((code, tally)) = weakest {
            text.push_str(&format!(
                "\nFocus next on subject {code} ({}% accuracy).",
                tally.accuracy()
            ));
        } else if self.accuracy < 60 {
            text.push_str("\nReview the explanations before the next session.");
        }

        text
    }
}

/// Summarize a session's outcomes as text.
pub fn summarize(outcomes: &[SessionOutcome]) -> String {
    SessionSummary::from_outcomes(outcomes).render()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(id: &str, correct: bool, subject: &str) -> SessionOutcome {
        SessionOutcome {
            question_id: id.into(),
            is_correct: correct,
            subject: subject.into(),
        }
    }

    #[test]
    fn empty_session_returns_neutral_message() {
        assert_eq!(summarize(&[]), EMPTY_SESSION_MESSAGE);
    }

    #[test]
    fn three_of_four_is_seventy_five_percent() {
        let outcomes = vec![
            outcome("a", true, "1301"),
            outcome("b", true, "1301"),
            outcome("c", false, "1301"),
            outcome("d", true, "1301"),
        ];
        let text = summarize(&outcomes);
        assert!(text.contains("75%"), "got: {text}");
        assert!(text.contains("3 of 4"), "got: {text}");
    }

    #[test]
    fn summary_is_deterministic() {
        let outcomes = vec![
            outcome("a", true, "2301"),
            outcome("b", false, "1301"),
            outcome("c", true, "1301"),
        ];
        assert_eq!(summarize(&outcomes), summarize(&outcomes));
    }

    #[test]
    fn percentage_rounds_half_up() {
        assert_eq!(percentage(1, 3), 33);
        assert_eq!(percentage(2, 3), 67);
        assert_eq!(percentage(1, 8), 13);
        assert_eq!(percentage(1, 200), 1);
        assert_eq!(percentage(0, 0), 0);
        assert_eq!(percentage(5, 5), 100);
    }

    #[test]
    fn per_subject_breakdown_and_weakest() {
        let outcomes = vec![
            outcome("a", true, "2301"),
            outcome("b", true, "2301"),
            outcome("c", false, "1301"),
            outcome("d", true, "1301"),
        ];
        let summary = SessionSummary::from_outcomes(&outcomes);
        assert_eq!(summary.total, 4);
        assert_eq!(summary.correct, 3);
        assert_eq!(summary.per_subject["1301"], SubjectTally { total: 2, correct: 1 });
        assert_eq!(summary.weakest_subject().unwrap().0, "1301");

        let text = summary.render();
        assert!(text.contains("1301: 1/2 (50%)"), "got: {text}");
        assert!(text.contains("2301: 2/2 (100%)"), "got: {text}");
        assert!(text.contains("Focus next on subject 1301"), "got: {text}");
    }

    #[test]
    fn single_subject_has_no_weakest() {
        let summary = SessionSummary::from_outcomes(&[outcome("a", false, "1301")]);
        assert!(summary.weakest_subject().is_none());
        assert!(summary.render().contains("Review the explanations"));
    }

    #[test]
    fn perfect_subjects_get_no_focus_line() {
        let summary = SessionSummary::from_outcomes(&[
            outcome("a", true, "1301"),
            outcome("b", true, "2301"),
        ]);
        let text = summary.render();
        assert!(text.contains("2 of 2 answered correctly (100% accuracy)"));
        assert!(!text.contains("Focus next"));
        assert!(!text.contains("Review the explanations"));
    }
}
