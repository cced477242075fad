//! The `lexdrill practice` and `lexdrill mock` commands.

use std::io::{BufRead, Write};

use anyhow::{bail, Result};
use chrono::{Local, Utc};

use lexdrill_core::model::SelectionMode;
use lexdrill_core::session::QuizSession;
use lexdrill_core::stats::LearnerStats;
use lexdrill_core::QuestionBank;

use super::show::answer_labels;
use crate::BankArgs;

pub async fn execute(
    mode: SelectionMode,
    target: String,
    no_stats: bool,
    args: BankArgs,
) -> Result<()> {
    let opened = super::open_bank(&args).await?;
    let bank = &opened.bank;

    let label = match mode {
        SelectionMode::Mock => match bank.config().category(&target) {
            Some(category) => category.id.clone(),
            None => bail!("unknown category: {target}"),
        },
        SelectionMode::Subject => target.trim().to_string(),
    };

    let questions = bank.fetch_questions(mode, &target);
    if questions.is_empty() {
        println!("No questions available for {mode} '{label}'.");
        return Ok(());
    }

    let mut session = QuizSession::new(mode, questions);
    if mode == SelectionMode::Mock {
        session = session.with_category(label.clone());
    }

    let stats_path = bank.config().stats_path.clone();
    let mut stats = if no_stats {
        LearnerStats::default()
    } else {
        LearnerStats::load_json(&stats_path)?
    };

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_session(bank, &mut session, &mut stats, stdin.lock(), stdout.lock())?;

    println!("\n{}", bank.session_summary(session.outcomes()));
    println!("Score: {}/{}", session.score(), session.total_possible());

    if !no_stats && !session.outcomes().is_empty() {
        stats.touch(Local::now().date_naive());
        stats.record_session(session.score(), session.total_possible(), &label, Utc::now());
        stats.save_json(&stats_path)?;
        tracing::debug!("stats saved to {}", stats_path.display());
    }

    Ok(())
}

/// Drive `session` from `input` until it finishes, the learner quits, or
/// input runs out. Every graded answer is also recorded in `stats`.
pub fn run_session<R: BufRead, W: Write>(
    bank: &QuestionBank,
    session: &mut QuizSession,
    stats: &mut LearnerStats,
    mut input: R,
    mut out: W,
) -> Result<()> {
    let total = session.questions().len();
    let mode = session.mode();
    match session.category() {
        Some(category) => writeln!(out, "Starting {mode} exam {category}: {total} question(s).")?,
        None => writeln!(out, "Starting {mode} practice: {total} question(s).")?,
    }

    'questions: while let Some(question) = session.current().cloned() {
        writeln!(out, "\n[{}/{}] {}", session.position() + 1, total, question.id)?;
        writeln!(out, "{}", question.content)?;
        for option in &question.options {
            writeln!(out, "  {}. {}", option.label, option.content)?;
        }

        loop {
            write!(out, "Answer (q to quit): ")?;
            out.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                session.finish();
                break 'questions;
            }
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if line.eq_ignore_ascii_case("q") {
                session.finish();
                break 'questions;
            }

            let Some(option) = question
                .option_by_label(line)
                .or_else(|| question.option_by_id(line))
            else {
                writeln!(out, "Unrecognized choice '{line}'.")?;
                continue;
            };

            if let Some(result) = session.answer(bank, &option.id) {
                stats.record_answer(&question.subject_code, result.is_correct);
                if result.is_correct {
                    writeln!(out, "Correct!")?;
                } else {
                    writeln!(
                        out,
                        "Wrong. Correct answer: {}",
                        answer_labels(&question, &result.correct_choice_ids)
                    )?;
                }
                writeln!(out, "{}", result.explanation)?;
            }
            break;
        }

        session.advance();
    }

    Ok(())
}
