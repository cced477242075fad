//! Per-request rendering of a question with shuffled choices.
//!
//! Position and identity are kept apart: the rendered order and labels change
//! on every call, while each option's `id` stays the source `choice_id`.

use rand::Rng;

use crate::model::{PresentedOption, PresentedQuestion, RawQuestion, QUESTION_WEIGHT};
use crate::normalize::label_for;
use crate::sampler::take_random;

/// Render `question` with a fresh random choice order.
pub fn present<R: Rng + ?Sized>(question: &RawQuestion, rng: &mut R) -> PresentedQuestion {
    let shuffled = take_random(question.choices.iter().collect(), usize::MAX, rng);

    let options = shuffled
        .into_iter()
        .enumerate()
        .map(|(render_index, choice)| PresentedOption {
            id: choice.choice_id.clone(),
            label: label_for(render_index),
            content: choice.text.clone(),
            render_index,
        })
        .collect();

    assemble(question, options)
}

/// Render `question` keeping the canonical source order and labels.
pub fn present_in_order(question: &RawQuestion) -> PresentedQuestion {
    let options = question
        .choices
        .iter()
        .enumerate()
        .map(|(render_index, choice)| PresentedOption {
            id: choice.choice_id.clone(),
            label: choice.label.clone(),
            content: choice.text.clone(),
            render_index,
        })
        .collect();

    assemble(question, options)
}

fn assemble(question: &RawQuestion, options: Vec<PresentedOption>) -> PresentedQuestion {
    PresentedQuestion {
        id: question.question_id.clone(),
        year: question.year,
        subject_code: question.subject_code.clone(),
        question_no: question.question_no,
        content: question.stem.clone(),
        options,
        weight: QUESTION_WEIGHT,
        law_ref: question.tags.first().cloned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Choice;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::{BTreeMap, BTreeSet};

    fn four_choice_question() -> RawQuestion {
        let choices = ["甲成立殺人罪之未遂", "中止未遂", "普通未遂", "普通傷害罪"]
            .iter()
            .enumerate()
            .map(|(i, text)| Choice {
                choice_id: format!("c{}", i + 1),
                label: label_for(i),
                text: text.to_string(),
            })
            .collect();
        RawQuestion {
            question_id: "104-1301-001".into(),
            year: Some(104),
            subject_code: "1301".into(),
            question_no: Some(1),
            stem: "甲欲殺 A...".into(),
            choices,
            correct_choice_ids: ["c2".to_string()].into_iter().collect(),
            explanation: Some("本題考查未遂罪中之中止".into()),
            tags: vec!["刑法第27條".into()],
            subject_name: None,
        }
    }

    #[test]
    fn ids_and_contents_survive_shuffling() {
        let q = four_choice_question();
        let source: BTreeMap<_, _> = q
            .choices
            .iter()
            .map(|c| (c.choice_id.clone(), c.text.clone()))
            .collect();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let presented = present(&q, &mut rng);
            let rendered: BTreeMap<_, _> = presented
                .options
                .iter()
                .map(|o| (o.id.clone(), o.content.clone()))
                .collect();
            assert_eq!(rendered, source);
            assert_eq!(presented.options.len(), 4);
        }
    }

    #[test]
    fn labels_follow_rendered_order() {
        let q = four_choice_question();
        let presented = present(&q, &mut StdRng::seed_from_u64(3));
        let labels: Vec<_> = presented.options.iter().map(|o| o.label.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D"]);
        for (i, option) in presented.options.iter().enumerate() {
            assert_eq!(option.render_index, i);
        }
    }

    #[test]
    fn order_varies_across_presentations() {
        let q = four_choice_question();
        let mut rng = StdRng::seed_from_u64(99);
        let orders: BTreeSet<Vec<String>> = (0..50)
            .map(|_| {
                present(&q, &mut rng)
                    .options
                    .into_iter()
                    .map(|o| o.id)
                    .collect::<Vec<_>>()
            })
            .collect();
        assert!(orders.len() > 1, "expected more than one distinct order");
    }

    #[test]
    fn presented_copies_identifiers_and_weight() {
        let q = four_choice_question();
        let presented = present(&q, &mut rand::thread_rng());
        assert_eq!(presented.id, "104-1301-001");
        assert_eq!(presented.year, Some(104));
        assert_eq!(presented.question_no, Some(1));
        assert_eq!(presented.content, q.stem);
        assert_eq!(presented.weight, QUESTION_WEIGHT);
        assert_eq!(presented.law_ref.as_deref(), Some("刑法第27條"));
    }

    #[test]
    fn in_order_presentation_keeps_canonical_labels() {
        let q = four_choice_question();
        let presented = present_in_order(&q);
        let pairs: Vec<_> = presented
            .options
            .iter()
            .map(|o| (o.label.as_str(), o.id.as_str()))
            .collect();
        assert_eq!(pairs, vec![("A", "c1"), ("B", "c2"), ("C", "c3"), ("D", "c4")]);
    }
}
