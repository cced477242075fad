//! Core data model types for lexdrill.
//!
//! These are the fundamental types the question-bank engine works with:
//! canonical question records, the per-render presentation view, grading
//! verdicts and per-question session outcomes.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Point value of every question. Mock exams are scored as `weight * n`.
pub const QUESTION_WEIGHT: u32 = 2;

/// A single exam question in canonical form.
///
/// Records are produced once by [`crate::normalize`] and never mutated by the
/// engine afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    /// Globally unique identifier (e.g. "108-1301-001").
    pub question_id: String,
    /// Exam year (ROC calendar in the bundled banks).
    #[serde(default)]
    pub year: Option<i32>,
    /// Subject code, trimmed (e.g. "1301").
    #[serde(default)]
    pub subject_code: String,
    /// Question number within the year and subject.
    #[serde(default)]
    pub question_no: Option<u32>,
    /// Question text.
    pub stem: String,
    /// Answer choices in source order.
    pub choices: Vec<Choice>,
    /// Identities of the correct choices.
    #[serde(default)]
    pub correct_choice_ids: BTreeSet<String>,
    /// Stored explanation, if the bank carries one.
    #[serde(default)]
    pub explanation: Option<String>,
    /// Free-form tags; the first one is usually the statute reference.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Human-readable subject name, when the bank provides it.
    #[serde(default)]
    pub subject_name: Option<String>,
}

impl RawQuestion {
    /// The normalized composite key, if year and number are both known.
    pub fn meta_key(&self) -> Option<MetaKey> {
        Some(MetaKey::new(
            self.year?,
            &self.subject_code,
            self.question_no?,
        ))
    }

    /// Look up a choice by its identity.
    pub fn choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|c| c.choice_id == choice_id)
    }

    /// Whether the record carries an answer key.
    pub fn is_graded(&self) -> bool {
        !self.correct_choice_ids.is_empty()
    }
}

/// One answer choice with its stable identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Stable identity used for grading (e.g. "c2").
    pub choice_id: String,
    /// Canonical label assigned at ingestion, in source order.
    pub label: String,
    /// Choice text.
    pub text: String,
}

/// Normalized `(year, subject_code, question_no)` lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MetaKey {
    pub year: i32,
    pub subject_code: String,
    pub question_no: u32,
}

impl MetaKey {
    pub fn new(year: i32, subject_code: &str, question_no: u32) -> Self {
        Self {
            year,
            subject_code: subject_code.trim().to_string(),
            question_no,
        }
    }

    /// Build a key from loosely formatted strings.
    ///
    /// Whitespace is trimmed everywhere and the question number is parsed as
    /// an integer, so `"1"`, `" 1 "` and `"001"` all produce the same key.
    /// Returns `None` when the year or number is not an integer.
    pub fn parse(year: &str, subject_code: &str, question_no: &str) -> Option<Self> {
        let year = year.trim().parse::<i32>().ok()?;
        let question_no = question_no.trim().parse::<u32>().ok()?;
        Some(Self::new(year, subject_code, question_no))
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.year, self.subject_code, self.question_no)
    }
}

/// A per-render, caller-facing view of a [`RawQuestion`].
///
/// The answer key is deliberately absent; grading goes back to the index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentedQuestion {
    pub id: String,
    pub year: Option<i32>,
    pub subject_code: String,
    pub question_no: Option<u32>,
    /// Question text.
    pub content: String,
    /// Options in rendered order.
    pub options: Vec<PresentedOption>,
    /// Point value.
    pub weight: u32,
    /// Statute reference taken from the first tag.
    #[serde(default)]
    pub law_ref: Option<String>,
}

impl PresentedQuestion {
    /// Resolve a rendered label (case-insensitive) to its choice identity.
    pub fn option_by_label(&self, label: &str) -> Option<&PresentedOption> {
        let label = label.trim();
        self.options
            .iter()
            .find(|o| o.label.eq_ignore_ascii_case(label))
    }

    /// Look up an option by choice identity.
    pub fn option_by_id(&self, id: &str) -> Option<&PresentedOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// One rendered option. `id` is the choice identity, never a position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PresentedOption {
    /// The underlying `choice_id`.
    pub id: String,
    /// Display label for this rendering (A, B, C, ...).
    pub label: String,
    /// Choice text.
    pub content: String,
    /// Zero-based position in the rendered order.
    pub render_index: usize,
}

/// Verdict for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradeResult {
    pub is_correct: bool,
    pub correct_choice_ids: Vec<String>,
    pub explanation: String,
    pub feedback_asset: FeedbackAsset,
    pub status: GradeStatus,
}

/// Presentation routing tag for grading feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackAsset {
    Correct,
    Wrong,
}

impl FeedbackAsset {
    pub fn for_verdict(is_correct: bool) -> Self {
        if is_correct {
            FeedbackAsset::Correct
        } else {
            FeedbackAsset::Wrong
        }
    }
}

impl fmt::Display for FeedbackAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackAsset::Correct => write!(f, "correct"),
            FeedbackAsset::Wrong => write!(f, "wrong"),
        }
    }
}

/// How a grade was reached. Anything other than `Graded` is a soft failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradeStatus {
    /// The answer was checked against the stored key.
    Graded,
    /// The question is not (or no longer) in the index.
    QuestionUnavailable,
    /// The record exists but carries no correct choice ids.
    NoAnswerKey,
}

/// A per-question correctness record accumulated across one session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub question_id: String,
    pub is_correct: bool,
    pub subject: String,
}

/// How questions are selected for a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Practice a single subject code.
    Subject,
    /// Mock exam over a category of subject codes.
    Mock,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Subject => write!(f, "subject"),
            SelectionMode::Mock => write!(f, "mock"),
        }
    }
}

impl FromStr for SelectionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "subject" | "practice" => Ok(SelectionMode::Subject),
            "mock" | "exam" => Ok(SelectionMode::Mock),
            other => Err(format!("unknown selection mode: {other}")),
        }
    }
}
