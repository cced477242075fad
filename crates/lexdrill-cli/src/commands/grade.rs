//! The `lexdrill grade` command.

use anyhow::Result;

use lexdrill_core::model::GradeStatus;

use crate::BankArgs;

pub async fn execute(id: String, choice: String, json: bool, args: BankArgs) -> Result<()> {
    let opened = super::open_bank(&args).await?;
    let result = opened.bank.grade_answer(&id, &choice);

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    match result.status {
        GradeStatus::Graded if result.is_correct => println!("Correct."),
        GradeStatus::Graded => println!(
            "Wrong. Correct answer: {}",
            result.correct_choice_ids.join(", ")
        ),
        GradeStatus::NoAnswerKey => println!("Ungraded: no answer key."),
        GradeStatus::QuestionUnavailable => println!("Ungraded: question unavailable."),
    }
    println!("{}", result.explanation);

    Ok(())
}
