//! lexdrill configuration: bank location, sampling policy and mock-exam
//! categories.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default question count for subject practice.
pub const SUBJECT_SAMPLE_SIZE: usize = 10;
/// Default question count for a mock exam.
pub const MOCK_SAMPLE_SIZE: usize = 15;

/// Top-level lexdrill configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LexdrillConfig {
    /// Directory holding `manifest.json` and the bank files.
    #[serde(default = "default_bank_dir")]
    pub bank_dir: PathBuf,
    /// Where learner statistics are persisted.
    #[serde(default = "default_stats_path")]
    pub stats_path: PathBuf,
    /// Sampling policy.
    #[serde(default)]
    pub sampling: SamplingConfig,
    /// Mock-exam categories.
    #[serde(default = "default_categories")]
    pub categories: Vec<CategoryConfig>,
}

/// Sample sizes and the empty-category policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SamplingConfig {
    #[serde(default = "default_subject_size")]
    pub subject_size: usize,
    #[serde(default = "default_mock_size")]
    pub mock_size: usize,
    #[serde(default)]
    pub empty_category: EmptyCategoryPolicy,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            subject_size: SUBJECT_SAMPLE_SIZE,
            mock_size: MOCK_SAMPLE_SIZE,
            empty_category: EmptyCategoryPolicy::default(),
        }
    }
}

/// What a mock exam draws from when its category has no subject codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyCategoryPolicy {
    /// Return no questions.
    #[default]
    Strict,
    /// Draw from the whole bank.
    FullBank,
}

/// A named group of subject codes combined into one mock exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    /// Short identifier used on the command line (e.g. "session-1").
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Subject codes drawn from.
    #[serde(default)]
    pub subjects: Vec<String>,
}

impl CategoryConfig {
    pub fn new(id: &str, name: &str, subjects: &[&str]) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            subjects: subjects.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Whether `subject_code` belongs to this category (codes compared trimmed).
    pub fn contains(&self, subject_code: &str) -> bool {
        let code = subject_code.trim();
        self.subjects.iter().any(|s| s.trim() == code)
    }

    /// True when no usable subject code is configured.
    pub fn is_empty(&self) -> bool {
        self.subjects.iter().all(|s| s.trim().is_empty())
    }
}

impl LexdrillConfig {
    /// Find a category by id (case-insensitive) or exact display name.
    pub fn category(&self, target: &str) -> Option<&CategoryConfig> {
        let target = target.trim();
        self.categories
            .iter()
            .find(|c| c.id.eq_ignore_ascii_case(target) || c.name == target)
    }
}

impl Default for LexdrillConfig {
    fn default() -> Self {
        Self {
            bank_dir: default_bank_dir(),
            stats_path: default_stats_path(),
            sampling: SamplingConfig::default(),
            categories: default_categories(),
        }
    }
}

fn default_bank_dir() -> PathBuf {
    PathBuf::from("bank")
}
fn default_stats_path() -> PathBuf {
    PathBuf::from("lexdrill-stats.json")
}
fn default_subject_size() -> usize {
    SUBJECT_SAMPLE_SIZE
}
fn default_mock_size() -> usize {
    MOCK_SAMPLE_SIZE
}

/// The four sessions of the bar exam's first stage.
pub fn default_categories() -> Vec<CategoryConfig> {
    vec![
        CategoryConfig::new("session-1", "綜合法學(一)：公法、國際法", &["2301"]),
        CategoryConfig::new("session-2", "綜合法學(一)：刑法、刑訴、倫理", &["1301"]),
        CategoryConfig::new("session-3", "綜合法學(二)：民法、民訴", &["3301"]),
        CategoryConfig::new("session-4", "綜合法學(二)：商法、執行法、法英", &["4301"]),
    ]
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `lexdrill.toml` in the current directory
/// 2. `~/.config/lexdrill/config.toml`
///
/// Environment variable overrides: `LEXDRILL_BANK_DIR`, `LEXDRILL_STATS_PATH`.
pub fn load_config_from(path: Option<&Path>) -> Result<LexdrillConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("lexdrill.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => LexdrillConfig::default(),
    };

    if let Ok(dir) = std::env::var("LEXDRILL_BANK_DIR") {
        config.bank_dir = PathBuf::from(dir);
    }
    if let Ok(path) = std::env::var("LEXDRILL_STATS_PATH") {
        config.stats_path = PathBuf::from(path);
    }

    Ok(config)
}

/// Parse a TOML config string.
pub fn parse_config(content: &str) -> Result<LexdrillConfig> {
    let config: LexdrillConfig = toml::from_str(content)?;
    anyhow::ensure!(
        config.sampling.subject_size >= 1 && config.sampling.mock_size >= 1,
        "sample sizes must be at least 1"
    );
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("lexdrill"))
}
