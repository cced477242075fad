//! The `lexdrill categories` command.

use anyhow::Result;
use comfy_table::{Cell, Table};

use crate::BankArgs;

pub async fn execute(args: BankArgs) -> Result<()> {
    let opened = super::open_bank(&args).await?;
    let bank = &opened.bank;
    let counts = bank.subject_counts();

    if bank.config().categories.is_empty() {
        println!("No categories configured. Run `lexdrill init` to create a config file.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_header(vec!["Id", "Name", "Subjects", "Questions"]);
    for category in &bank.config().categories {
        let pool: usize = category
            .subjects
            .iter()
            .filter_map(|code| counts.get(code.trim()))
            .sum();
        table.add_row(vec![
            Cell::new(&category.id),
            Cell::new(&category.name),
            Cell::new(category.subjects.join(", ")),
            Cell::new(pool),
        ]);
    }
    println!("{table}");

    Ok(())
}
