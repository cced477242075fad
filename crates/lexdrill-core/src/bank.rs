//! The question-bank engine facade.
//!
//! [`QuestionBank`] owns the current [`BankIndex`] snapshot behind a single
//! write operation. `set_bank` builds the replacement index outside the lock
//! and swaps the `Arc` in one assignment; readers clone the `Arc` and work on
//! an immutable snapshot, so they see either the old bank or the new one.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use serde_json::Value;

use crate::config::LexdrillConfig;
use crate::grader;
use crate::index::{BankIndex, IngestReport};
use crate::model::{
    GradeResult, MetaKey, PresentedQuestion, RawQuestion, SelectionMode, SessionOutcome,
};
use crate::normalize::flatten_records;
use crate::presenter::present;
use crate::sampler::Sampler;
use crate::summary::summarize;
use crate::traits::ExplanationSource;

/// Shared, swappable question bank.
pub struct QuestionBank {
    snapshot: RwLock<Arc<BankIndex>>,
    config: LexdrillConfig,
    explanations: Option<Arc<dyn ExplanationSource>>,
}

impl QuestionBank {
    /// An empty bank using `config` for sampling and categories.
    pub fn new(config: LexdrillConfig) -> Self {
        Self {
            snapshot: RwLock::new(Arc::new(BankIndex::empty())),
            config,
            explanations: None,
        }
    }

    /// Install an annotation source for questions without a stored explanation.
    pub fn with_explanations(mut self, source: Arc<dyn ExplanationSource>) -> Self {
        self.explanations = Some(source);
        self
    }

    pub fn config(&self) -> &LexdrillConfig {
        &self.config
    }

    /// Replace the whole bank with `records`.
    pub fn set_bank(&self, records: Vec<Value>) -> IngestReport {
        let (index, report) = BankIndex::build(&records);
        self.swap(index);
        tracing::info!(
            "bank replaced: {} indexed, {} malformed, {} duplicate",
            report.indexed,
            report.malformed,
            report.duplicates
        );
        report
    }

    /// Replace the bank from a single top-level value.
    ///
    /// An array is a list of records, an object is one record, and anything
    /// else produces an empty bank.
    pub fn set_bank_value(&self, value: Value) -> IngestReport {
        self.set_bank(flatten_records(value))
    }

    fn swap(&self, index: BankIndex) {
        let fresh = Arc::new(index);
        let mut guard = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = fresh;
    }

    /// The current index. Later `set_bank` calls do not affect it.
    pub fn snapshot(&self) -> Arc<BankIndex> {
        let guard = self.snapshot.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Question counts per subject code.
    pub fn subject_counts(&self) -> BTreeMap<String, usize> {
        self.snapshot().subject_counts()
    }

    pub fn retrieve_by_id(&self, question_id: &str) -> Option<Arc<RawQuestion>> {
        self.snapshot().get(question_id).cloned()
    }

    pub fn retrieve_by_meta(
        &self,
        year: &str,
        subject_code: &str,
        question_no: &str,
    ) -> Option<Arc<RawQuestion>> {
        self.snapshot()
            .get_by_meta(year, subject_code, question_no)
            .cloned()
    }

    /// Exact lookup by an already-normalized composite key.
    pub fn retrieve_by_key(&self, key: &MetaKey) -> Option<Arc<RawQuestion>> {
        self.snapshot().get_by_key(key).cloned()
    }

    /// Look up and render one question with shuffled choices.
    pub fn present(&self, question_id: &str) -> Option<PresentedQuestion> {
        self.retrieve_by_id(question_id)
            .map(|q| present(&q, &mut rand::thread_rng()))
    }

    /// Sample and render a question set.
    ///
    /// `target` is a subject code in [`SelectionMode::Subject`] and a category
    /// id or name in [`SelectionMode::Mock`].
    pub fn fetch_questions(&self, mode: SelectionMode, target: &str) -> Vec<PresentedQuestion> {
        let index = self.snapshot();
        let mut rng = rand::thread_rng();
        let category = match mode {
            SelectionMode::Mock => self.config.category(target),
            SelectionMode::Subject => None,
        };
        Sampler::new(&index, self.config.sampling)
            .sample(mode, target, category, &mut rng)
            .iter()
            .map(|q| present(q, &mut rng))
            .collect()
    }

    pub fn grade_answer(&self, question_id: &str, selected_choice_id: &str) -> GradeResult {
        let index = self.snapshot();
        grader::grade(
            &index,
            question_id,
            selected_choice_id,
            self.explanations.as_deref(),
        )
    }

    /// The explanation grading would show for `question`.
    pub fn explanation(&self, question: &RawQuestion) -> String {
        grader::explain(question, self.explanations.as_deref())
    }

    pub fn session_summary(&self, outcomes: &[SessionOutcome]) -> String {
        summarize(outcomes)
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new(LexdrillConfig::default())
    }
}

impl std::fmt::Debug for QuestionBank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuestionBank")
            .field("questions", &self.len())
            .field("sampling", &self.config.sampling)
            .field("explanations", &self.explanations.is_some())
            .finish()
    }
}
