//! The `lexdrill show` command.

use anyhow::{bail, Result};

use lexdrill_core::model::PresentedQuestion;
use lexdrill_core::presenter::present_in_order;

use crate::BankArgs;

pub async fn execute(
    id: Option<String>,
    year: Option<String>,
    subject: Option<String>,
    no: Option<String>,
    in_order: bool,
    reveal: bool,
    args: BankArgs,
) -> Result<()> {
    let opened = super::open_bank(&args).await?;
    let bank = &opened.bank;

    let question = match (id, year, subject, no) {
        (Some(id), None, None, None) => bank.retrieve_by_id(&id),
        (None, Some(year), Some(subject), Some(no)) => bank.retrieve_by_meta(&year, &subject, &no),
        _ => bail!("pass either --id or all of --year, --subject and --no"),
    };
    let Some(question) = question else {
        bail!("question not found");
    };
    let presented = if in_order {
        present_in_order(&question)
    } else {
        match bank.present(&question.question_id) {
            Some(presented) => presented,
            None => bail!("question not found"),
        }
    };
    print_question(&presented);

    if reveal {
        let correct: Vec<String> = question.correct_choice_ids.iter().cloned().collect();
        let labels = answer_labels(&presented, &correct);
        println!("\nAnswer: {labels}");
        println!("{}", bank.explanation(&question));
    }

    Ok(())
}

/// Print a presented question with its options.
pub fn print_question(question: &PresentedQuestion) {
    let year = question
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "?".into());
    let number = question
        .question_no
        .map(|n| n.to_string())
        .unwrap_or_else(|| "?".into());
    println!(
        "{} (year {year}, subject {}, no. {number})",
        question.id, question.subject_code
    );
    if let Some(law) = &question.law_ref {
        println!("[{law}]");
    }
    println!("{}", question.content);
    for option in &question.options {
        println!("  {}. {}", option.label, option.content);
    }
}

/// Render correct choice ids as "B (c2)" using the presented labels.
pub fn answer_labels(question: &PresentedQuestion, correct_ids: &[String]) -> String {
    if correct_ids.is_empty() {
        return "(no answer key)".to_string();
    }
    correct_ids
        .iter()
        .map(|id| match question.option_by_id(id) {
            Some(option) => format!("{} ({id})", option.label),
            None => id.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
