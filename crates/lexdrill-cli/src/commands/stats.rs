//! The `lexdrill stats` command.

use std::path::PathBuf;

use anyhow::Result;
use comfy_table::{Cell, Table};

use lexdrill_core::config::load_config_from;
use lexdrill_core::stats::LearnerStats;

/// Sessions listed in the recent-history table.
const RECENT_SESSIONS: usize = 5;

pub fn execute(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let stats = LearnerStats::load_json(&config.stats_path)?;

    if stats.total_answered == 0 {
        println!("No answers recorded yet. Start with `lexdrill practice --subject <code>`.");
        return Ok(());
    }

    println!(
        "Answered: {} ({} correct, {}% accuracy)",
        stats.total_answered,
        stats.correct_count,
        stats.accuracy()
    );
    println!(
        "Streak: {} (best {}), daily streak: {} day(s)",
        stats.current_streak, stats.max_streak, stats.daily_streak
    );
    if let Some(date) = stats.last_active_date {
        println!("Last active: {date}");
    }

    let mut subjects = Table::new();
    subjects.set_header(vec!["Subject", "Answered", "Correct", "Accuracy"]);
    for (code, stat) in &stats.subject_stats {
        subjects.add_row(vec![
            Cell::new(code),
            Cell::new(stat.total),
            Cell::new(stat.correct),
            Cell::new(format!("{}%", stat.accuracy())),
        ]);
    }
    println!("\n{subjects}");

    if !stats.history.is_empty() {
        let mut history = Table::new();
        history.set_header(vec!["Date", "Category", "Score"]);
        for record in stats.history.iter().rev().take(RECENT_SESSIONS) {
            history.add_row(vec![
                Cell::new(record.date.format("%Y-%m-%d %H:%M")),
                Cell::new(&record.category),
                Cell::new(format!("{}/{}", record.score, record.total_possible)),
            ]);
        }
        println!("\n{history}");
    }

    Ok(())
}
