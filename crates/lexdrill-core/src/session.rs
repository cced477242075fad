//! Bookkeeping for one practice or mock-exam session.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::bank::QuestionBank;
use crate::model::{GradeResult, PresentedQuestion, SelectionMode, SessionOutcome};

/// A run through a fixed list of presented questions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizSession {
    mode: SelectionMode,
    category: Option<String>,
    questions: Vec<PresentedQuestion>,
    current: usize,
    /// question id -> chosen choice id
    answers: HashMap<String, String>,
    outcomes: Vec<SessionOutcome>,
    score: u32,
}

impl QuizSession {
    pub fn new(mode: SelectionMode, questions: Vec<PresentedQuestion>) -> Self {
        Self {
            mode,
            category: None,
            questions,
            current: 0,
            answers: HashMap::new(),
            outcomes: Vec::new(),
            score: 0,
        }
    }

    /// Tag the session with the mock-exam category it was drawn from.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn questions(&self) -> &[PresentedQuestion] {
        &self.questions
    }

    /// The question under the cursor, or `None` once the session is finished.
    pub fn current(&self) -> Option<&PresentedQuestion> {
        self.questions.get(self.current)
    }

    /// Zero-based cursor position.
    pub fn position(&self) -> usize {
        self.current
    }

    pub fn is_finished(&self) -> bool {
        self.current >= self.questions.len()
    }

    /// Whether the current question already has an answer.
    pub fn is_answered(&self) -> bool {
        self.current()
            .is_some_and(|q| self.answers.contains_key(&q.id))
    }

    /// Grade `choice_id` for the current question.
    ///
    /// Each question is graded at most once; further answers return `None`.
    pub fn answer(&mut self, bank: &QuestionBank, choice_id: &str) -> Option<GradeResult> {
        if self.is_answered() {
            return None;
        }
        let question = self.questions.get(self.current)?;

        let result = bank.grade_answer(&question.id, choice_id);
        self.answers
            .insert(question.id.clone(), choice_id.trim().to_string());
        if result.is_correct {
            self.score += question.weight;
        }
        self.outcomes.push(SessionOutcome {
            question_id: question.id.clone(),
            is_correct: result.is_correct,
            subject: question.subject_code.clone(),
        });
        Some(result)
    }

    /// Move to the next question. Returns `false` once past the end.
    pub fn advance(&mut self) -> bool {
        if self.current < self.questions.len() {
            self.current += 1;
        }
        !self.is_finished()
    }

    /// Stop early; unanswered questions are simply not counted.
    pub fn finish(&mut self) {
        self.current = self.questions.len();
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Sum of weights over all questions in the session.
    pub fn total_possible(&self) -> u32 {
        self.questions.iter().map(|q| q.weight).sum()
    }

    pub fn outcomes(&self) -> &[SessionOutcome] {
        &self.outcomes
    }
}
