//! Subcommand implementations and the bank-opening helpers they share.

pub mod categories;
pub mod grade;
pub mod init;
pub mod practice;
pub mod show;
pub mod stats;
pub mod validate;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};

use lexdrill_core::config::{load_config_from, LexdrillConfig};
use lexdrill_core::error::FileFailure;
use lexdrill_core::index::IngestReport;
use lexdrill_core::loader::load_bank;
use lexdrill_core::traits::{DirectorySource, StaticExplanations};
use lexdrill_core::QuestionBank;

use crate::BankArgs;

/// Optional file of precomputed explanations inside a bank directory.
pub const EXPLANATIONS_FILE: &str = "explanations.json";

/// A loaded bank together with what happened while loading it.
pub struct OpenedBank {
    pub bank: QuestionBank,
    pub report: IngestReport,
    pub loaded_files: Vec<String>,
    pub failures: Vec<FileFailure>,
}

/// Load the config, applying a `--bank` override.
pub fn resolve_config(args: &BankArgs) -> Result<LexdrillConfig> {
    let mut config = load_config_from(args.config.as_deref())?;
    if let Some(dir) = &args.bank {
        config.bank_dir = dir.clone();
    }
    Ok(config)
}

/// Load the bank named by `args` into a fresh [`QuestionBank`].
pub async fn open_bank(args: &BankArgs) -> Result<OpenedBank> {
    let config = resolve_config(args)?;
    let source = DirectorySource::new(&config.bank_dir);
    let loaded = load_bank(&source).await.map_err(|e| {
        let hint = if e.is_permanent() {
            " (check --bank or run `lexdrill init`)"
        } else {
            " (try again)"
        };
        let context = format!("failed to load bank from {}{hint}", config.bank_dir.display());
        anyhow::Error::new(e).context(context)
    })?;
    let explanations = load_explanations(&config.bank_dir)?;

    let mut bank = QuestionBank::new(config);
    if let Some(explanations) = explanations {
        tracing::debug!("using {} precomputed explanations", explanations.len());
        bank = bank.with_explanations(Arc::new(explanations));
    }
    let report = bank.set_bank(loaded.records);

    Ok(OpenedBank {
        bank,
        report,
        loaded_files: loaded.loaded_files,
        failures: loaded.failures,
    })
}

fn load_explanations(bank_dir: &Path) -> Result<Option<StaticExplanations>> {
    let path = bank_dir.join(EXPLANATIONS_FILE);
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let explanations = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(Some(explanations))
}
