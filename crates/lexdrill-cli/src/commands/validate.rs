//! The `lexdrill validate` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::BankArgs;

pub async fn execute(args: BankArgs) -> Result<()> {
    let opened = super::open_bank(&args).await?;
    let report = &opened.report;

    println!(
        "Bank: {} ({} files loaded, {} failed)",
        opened.bank.config().bank_dir.display(),
        opened.loaded_files.len(),
        opened.failures.len()
    );
    println!(
        "Records: {} received, {} indexed, {} malformed, {} duplicate",
        report.received, report.indexed, report.malformed, report.duplicates
    );

    for failure in &opened.failures {
        println!("  WARNING: {}: {failure}", failure.file());
    }

    let counts = opened.bank.subject_counts();
    if !counts.is_empty() {
        let mut table = Table::new();
        table.set_header(vec!["Subject", "Questions"]);
        for (code, count) in &counts {
            let label = if code.is_empty() { "(none)" } else { code };
            table.add_row(vec![Cell::new(label), Cell::new(count)]);
        }
        println!("\n{table}");
    }

    let problems = report.malformed + report.duplicates + opened.failures.len();
    if problems == 0 {
        println!("Bank valid.");
    } else {
        println!("\n{problems} problem(s) found.");
    }

    Ok(())
}
