//! Answer grading against the canonical answer key.
//!
//! Grading always goes back to the index, never to a presented (reshuffled)
//! view, so the verdict depends only on choice identity.

use crate::index::BankIndex;
use crate::model::{FeedbackAsset, GradeResult, GradeStatus, RawQuestion};
use crate::traits::ExplanationSource;

/// Grade `selected_choice_id` for the question `question_id`.
pub fn grade(
    index: &BankIndex,
    question_id: &str,
    selected_choice_id: &str,
    explanations: Option<&dyn ExplanationSource>,
) -> GradeResult {
    let Some(question) = index.get(question_id) else {
        tracing::warn!("grading unknown question '{}'", question_id.trim());
        return GradeResult {
            is_correct: false,
            correct_choice_ids: Vec::new(),
            explanation: format!(
                "Question data unavailable: '{}' is not in the loaded bank.",
                question_id.trim()
            ),
            feedback_asset: FeedbackAsset::Wrong,
            status: GradeStatus::QuestionUnavailable,
        };
    };

    grade_question(question, selected_choice_id, explanations)
}

/// Grade against an already-resolved record.
pub fn grade_question(
    question: &RawQuestion,
    selected_choice_id: &str,
    explanations: Option<&dyn ExplanationSource>,
) -> GradeResult {
    let correct_choice_ids: Vec<String> = question.correct_choice_ids.iter().cloned().collect();

    if !question.is_graded() {
        return GradeResult {
            is_correct: false,
            correct_choice_ids,
            explanation: format!(
                "No answer key is recorded for question '{}'.",
                question.question_id
            ),
            feedback_asset: FeedbackAsset::Wrong,
            status: GradeStatus::NoAnswerKey,
        };
    }

    let is_correct = question
        .correct_choice_ids
        .contains(selected_choice_id.trim());

    GradeResult {
        is_correct,
        explanation: explain(question, explanations),
        correct_choice_ids,
        feedback_asset: FeedbackAsset::for_verdict(is_correct),
        status: GradeStatus::Graded,
    }
}

/// Stored explanation, then the annotation source, then a generic fallback.
pub fn explain(question: &RawQuestion, explanations: Option<&dyn ExplanationSource>) -> String {
    if let Some(stored) = question
        .explanation
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty())
    {
        return stored.to_string();
    }

    if let Some(annotated) = explanations
        .and_then(|source| source.explanation_for(question))
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
    {
        return annotated;
    }

    fallback_explanation(question)
}

fn fallback_explanation(question: &RawQuestion) -> String {
    let answers: Vec<String> = question
        .correct_choice_ids
        .iter()
        .map(|id| match question.choice(id) {
            Some(choice) => format!("{id} ({}: {})", choice.label, choice.text),
            None => id.clone(),
        })
        .collect();
    format!(
        "No explanation is recorded. Correct answer: {}.",
        answers.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StaticExplanations;
    use serde_json::json;
    use std::collections::HashMap;

    fn index_with(explanation: Option<&str>) -> BankIndex {
        let mut record = json!({
            "question_id": "108-1301-001",
            "year": 108,
            "subject_code": "1301",
            "question_no": 1,
            "stem": "stem",
            "choices": [
                {"choice_id": "c1", "text": "X"},
                {"choice_id": "c2", "text": "Y"}
            ],
            "correct_choice_ids": ["c2"]
        });
        if let Some(e) = explanation {
            record["explanation"] = json!(e);
        }
        BankIndex::build(&[record]).0
    }

    #[test]
    fn correct_choice_is_graded_correct() {
        let index = index_with(Some("because Y"));
        let result = grade(&index, "108-1301-001", "c2", None);
        assert!(result.is_correct);
        assert_eq!(result.correct_choice_ids, vec!["c2"]);
        assert_eq!(result.explanation, "because Y");
        assert_eq!(result.feedback_asset, FeedbackAsset::Correct);
        assert_eq!(result.status, GradeStatus::Graded);
    }

    #[test]
    fn wrong_choice_is_graded_wrong() {
        let index = index_with(None);
        let result = grade(&index, "108-1301-001", "c1", None);
        assert!(!result.is_correct);
        assert_eq!(result.feedback_asset, FeedbackAsset::Wrong);
        assert_eq!(result.correct_choice_ids, vec!["c2"]);
    }

    #[test]
    fn labels_are_not_identities() {
        // "B" is the canonical label of c2 but is not a choice id.
        let index = index_with(None);
        assert!(!grade(&index, "108-1301-001", "B", None).is_correct);
    }

    #[test]
    fn ids_are_trimmed() {
        let index = index_with(None);
        assert!(grade(&index, " 108-1301-001 ", " c2 ", None).is_correct);
    }

    #[test]
    fn unknown_question_is_reported_not_raised() {
        let index = index_with(None);
        let result = grade(&index, "missing", "c1", None);
        assert!(!result.is_correct);
        assert!(result.correct_choice_ids.is_empty());
        assert!(result.explanation.contains("unavailable"));
        assert_eq!(result.status, GradeStatus::QuestionUnavailable);
    }

    #[test]
    fn blank_explanation_falls_back_to_generic_text() {
        let index = index_with(Some("   "));
        let result = grade(&index, "108-1301-001", "c1", None);
        assert_eq!(
            result.explanation,
            "No explanation is recorded. Correct answer: c2 (B: Y)."
        );
    }

    #[test]
    fn annotation_source_fills_missing_explanation() {
        let index = index_with(None);
        let source = StaticExplanations::new(HashMap::from([(
            "108-1301-001".to_string(),
            "annotated".to_string(),
        )]));
        let result = grade(&index, "108-1301-001", "c2", Some(&source));
        assert_eq!(result.explanation, "annotated");
    }

    #[test]
    fn stored_explanation_wins_over_annotation() {
        let index = index_with(Some("stored"));
        let source = StaticExplanations::new(HashMap::from([(
            "108-1301-001".to_string(),
            "annotated".to_string(),
        )]));
        let result = grade(&index, "108-1301-001", "c2", Some(&source));
        assert_eq!(result.explanation, "stored");
    }

    #[test]
    fn missing_answer_key_is_reported() {
        let record = json!({
            "question_id": "ungraded",
            "stem": "s",
            "choices": [{"text": "a"}, {"text": "b"}]
        });
        let index = BankIndex::build(&[record]).0;
        let result = grade(&index, "ungraded", "c1", None);
        assert!(!result.is_correct);
        assert_eq!(result.status, GradeStatus::NoAnswerKey);
    }

    #[test]
    fn multiple_correct_choices_accept_any() {
        let record = json!({
            "question_id": "multi",
            "stem": "s",
            "choices": [{"text": "a"}, {"text": "b"}, {"text": "c"}],
            "correct_choice_ids": ["c1", "c3"]
        });
        let index = BankIndex::build(&[record]).0;
        assert!(grade(&index, "multi", "c1", None).is_correct);
        assert!(grade(&index, "multi", "c3", None).is_correct);
        assert!(!grade(&index, "multi", "c2", None).is_correct);
    }
}
