//! Immutable lookup structures over the loaded question bank.
//!
//! A [`BankIndex`] is built once from raw records and never mutated; reloads
//! build a fresh index and swap it in (see [`crate::bank::QuestionBank`]).

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::model::{MetaKey, RawQuestion};
use crate::normalize::{normalize_record, Rejection};

/// Counts from building an index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    /// Records offered for ingestion.
    pub received: usize,
    /// Records that made it into the index.
    pub indexed: usize,
    /// Records dropped for missing id, stem or choices.
    pub malformed: usize,
    /// Records dropped because their id or composite key was already taken.
    pub duplicates: usize,
}

/// Id and composite-key lookup over an immutable set of questions.
#[derive(Debug, Default)]
pub struct BankIndex {
    questions: Vec<Arc<RawQuestion>>,
    by_id: HashMap<String, usize>,
    by_meta: HashMap<MetaKey, usize>,
}

impl BankIndex {
    /// An index with no questions.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build an index from loosely shaped records.
    ///
    /// Malformed records are skipped. The first record for an id wins; a later
    /// record whose id or composite key is already taken is dropped whole so
    /// both lookups always agree.
    pub fn build(records: &[Value]) -> (Self, IngestReport) {
        let mut index = Self::empty();
        let mut report = IngestReport {
            received: records.len(),
            ..IngestReport::default()
        };

        for record in records {
            match normalize_record(record) {
                Ok(question) => {
                    if index.insert(question) {
                        report.indexed += 1;
                    } else {
                        report.duplicates += 1;
                    }
                }
                Err(reason) => {
                    report.malformed += 1;
                    log_rejection(record, reason);
                }
            }
        }

        (index, report)
    }

    /// Build an index from already-canonical questions.
    pub fn from_questions(questions: impl IntoIterator<Item = RawQuestion>) -> Self {
        let mut index = Self::empty();
        for q in questions {
            index.insert(q);
        }
        index
    }

    fn insert(&mut self, question: RawQuestion) -> bool {
        let meta = question.meta_key();
        if self.by_id.contains_key(&question.question_id) {
            tracing::warn!("duplicate question_id '{}', keeping first", question.question_id);
            return false;
        }
        if let Some(key) = &meta {
            if let Some(&existing) = self.by_meta.get(key) {
                tracing::warn!(
                    "question '{}' reuses key {} of '{}', skipping",
                    question.question_id,
                    key,
                    self.questions[existing].question_id
                );
                return false;
            }
        }

        let slot = self.questions.len();
        self.by_id.insert(question.question_id.clone(), slot);
        if let Some(key) = meta {
            self.by_meta.insert(key, slot);
        }
        self.questions.push(Arc::new(question));
        true
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// All questions in ingestion order.
    pub fn questions(&self) -> &[Arc<RawQuestion>] {
        &self.questions
    }

    /// Exact id lookup after trimming.
    pub fn get(&self, question_id: &str) -> Option<&Arc<RawQuestion>> {
        self.by_id
            .get(question_id.trim())
            .map(|&slot| &self.questions[slot])
    }

    /// Exact composite-key lookup.
    pub fn get_by_key(&self, key: &MetaKey) -> Option<&Arc<RawQuestion>> {
        self.by_meta.get(key).map(|&slot| &self.questions[slot])
    }

    /// Composite-key lookup from loosely formatted strings.
    pub fn get_by_meta(
        &self,
        year: &str,
        subject_code: &str,
        question_no: &str,
    ) -> Option<&Arc<RawQuestion>> {
        let key = MetaKey::parse(year, subject_code, question_no)?;
        self.get_by_key(&key)
    }

    /// Number of questions per subject code, sorted by code.
    pub fn subject_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for q in &self.questions {
            *counts.entry(q.subject_code.clone()).or_insert(0) += 1;
        }
        counts
    }
}

fn log_rejection(record: &Value, reason: Rejection) {
    let hint = record
        .get("question_id")
        .or_else(|| record.get("id"))
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<no id>".to_string());
    tracing::debug!("dropping bank record {hint}: {reason}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, year: i64, code: &str, no: i64) -> Value {
        json!({
            "question_id": id,
            "year": year,
            "subject_code": code,
            "question_no": no,
            "stem": format!("stem of {id}"),
            "choices": [
                {"choice_id": "c1", "text": "X"},
                {"choice_id": "c2", "text": "Y"}
            ],
            "correct_choice_ids": ["c2"]
        })
    }

    #[test]
    fn index_excludes_malformed_records() {
        let records = vec![
            record("a", 108, "1301", 1),
            json!({"stem": "no id", "choices": [{"text": "x"}]}),
            json!({"question_id": "no-stem", "choices": [{"text": "x"}]}),
            json!({"question_id": "no-choices", "stem": "s"}),
            json!("not even an object"),
            record("b", 108, "1301", 2),
        ];
        let (index, report) = BankIndex::build(&records);
        assert_eq!(index.len(), 2);
        assert_eq!(report.received, 6);
        assert_eq!(report.indexed, 2);
        assert_eq!(report.malformed, 4);
        assert_eq!(report.duplicates, 0);
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let (index, report) = BankIndex::build(&[]);
        assert!(index.is_empty());
        assert_eq!(report, IngestReport::default());
    }

    #[test]
    fn id_and_meta_resolve_to_same_record() {
        let (index, _) = BankIndex::build(&[record("108-1301-001", 108, "1301", 1)]);
        let by_id = index.get("108-1301-001").unwrap();
        let by_meta = index.get_by_meta("108", "1301", "1").unwrap();
        assert!(Arc::ptr_eq(by_id, by_meta));
    }

    #[test]
    fn id_lookup_trims_but_does_not_fuzz() {
        let (index, _) = BankIndex::build(&[record("108-1301-001", 108, "1301", 1)]);
        assert!(index.get("  108-1301-001 ").is_some());
        assert!(index.get("108-1301-01").is_none());
        assert!(index.get("108-1301").is_none());
    }

    #[test]
    fn meta_lookup_normalizes_padding() {
        let mut r = record("x", 108, "1301", 1);
        r["subject_code"] = json!(" 1301 ");
        r["question_no"] = json!(" 1 ");
        let (index, _) = BankIndex::build(&[r]);
        assert!(index.get_by_meta("108", "1301", "1").is_some());
        assert!(index.get_by_meta("108", " 1301", "01").is_some());
        assert!(index.get_by_meta("109", "1301", "1").is_none());
        assert!(index.get_by_meta("108", "1301", "one").is_none());
    }

    #[test]
    fn duplicate_id_keeps_first_record() {
        let mut second = record("dup", 109, "2301", 5);
        second["stem"] = json!("second");
        let (index, report) = BankIndex::build(&[record("dup", 108, "1301", 1), second]);
        assert_eq!(index.len(), 1);
        assert_eq!(report.duplicates, 1);
        assert_eq!(index.get("dup").unwrap().stem, "stem of dup");
        assert!(index.get_by_meta("109", "2301", "5").is_none());
    }

    #[test]
    fn colliding_meta_key_drops_later_record() {
        let (index, report) = BankIndex::build(&[
            record("first", 108, "1301", 1),
            record("second", 108, "1301", 1),
        ]);
        assert_eq!(index.len(), 1);
        assert_eq!(report.duplicates, 1);
        assert!(index.get("second").is_none());
        assert_eq!(
            index.get_by_meta("108", "1301", "1").unwrap().question_id,
            "first"
        );
    }

    #[test]
    fn records_without_meta_are_still_indexed_by_id() {
        let r = json!({
            "question_id": "loose",
            "stem": "s",
            "choices": [{"text": "a"}, {"text": "b"}]
        });
        let (index, _) = BankIndex::build(&[r]);
        assert!(index.get("loose").is_some());
        assert_eq!(index.subject_counts().get(""), Some(&1));
    }

    #[test]
    fn subject_counts_are_grouped() {
        let (index, _) = BankIndex::build(&[
            record("a", 108, "1301", 1),
            record("b", 108, "1301", 2),
            record("c", 108, "2301", 1),
        ]);
        let counts = index.subject_counts();
        assert_eq!(counts.get("1301"), Some(&2));
        assert_eq!(counts.get("2301"), Some(&1));
    }
}
