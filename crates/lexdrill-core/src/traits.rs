//! Trait seams between the engine and its collaborators.
//!
//! A [`BankSource`] supplies raw bank files to the loader; an
//! [`ExplanationSource`] supplies precomputed explanations for questions whose
//! record carries none.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::RawQuestion;

// ---------------------------------------------------------------------------
// Bank source trait
// ---------------------------------------------------------------------------

/// Trait for backends that hold a manifest plus the bank files it lists.
#[async_trait]
pub trait BankSource: Send + Sync {
    /// Human-readable location (e.g. a directory path).
    fn describe(&self) -> String;

    /// Read the raw manifest bytes.
    async fn read_manifest(&self) -> std::io::Result<Vec<u8>>;

    /// Read one bank file named in the manifest.
    async fn read_file(&self, name: &str) -> std::io::Result<Vec<u8>>;
}

/// The manifest listing bank files, as in `bank/manifest.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// Bank file names, relative to the manifest. A missing list is empty.
    #[serde(default)]
    pub files: Vec<String>,
}

/// Name of the manifest file inside a bank directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// A bank stored in a local directory next to its `manifest.json`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl BankSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    async fn read_manifest(&self) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(self.root.join(MANIFEST_FILE)).await
    }

    async fn read_file(&self, name: &str) -> std::io::Result<Vec<u8>> {
        // Manifest entries are plain file names; refuse anything that escapes the root.
        let relative = Path::new(name);
        if relative.is_absolute()
            || relative
                .components()
                .any(|c| matches!(c, std::path::Component::ParentDir))
        {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("bank file outside bank directory: {name}"),
            ));
        }
        tokio::fs::read(self.root.join(relative)).await
    }
}

// ---------------------------------------------------------------------------
// Explanation source trait
// ---------------------------------------------------------------------------

/// Optional annotation source consulted when a record has no explanation.
pub trait ExplanationSource: Send + Sync {
    /// A precomputed explanation for `question`, if one exists.
    fn explanation_for(&self, question: &RawQuestion) -> Option<String>;
}

/// Explanations keyed by question id, e.g. loaded from an annotations file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticExplanations {
    entries: HashMap<String, String>,
}

impl StaticExplanations {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ExplanationSource for StaticExplanations {
    fn explanation_for(&self, question: &RawQuestion) -> Option<String> {
        self.entries.get(&question.question_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn directory_source_reads_manifest_and_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_FILE), r#"{"files":["a.json"]}"#).unwrap();
        std::fs::write(dir.path().join("a.json"), "[]").unwrap();

        let source = DirectorySource::new(dir.path());
        let manifest: Manifest =
            serde_json::from_slice(&source.read_manifest().await.unwrap()).unwrap();
        assert_eq!(manifest.files, vec!["a.json"]);
        assert_eq!(source.read_file("a.json").await.unwrap(), b"[]");
        assert!(source.read_file("missing.json").await.is_err());
    }

    #[tokio::test]
    async fn directory_source_refuses_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let source = DirectorySource::new(dir.path());
        let err = source.read_file("../secret.json").await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput);
    }

    #[test]
    fn static_explanations_lookup_by_id() {
        let explanations: StaticExplanations =
            serde_json::from_str(r#"{"108-1301-001": "because"}"#).unwrap();
        assert_eq!(explanations.len(), 1);
        let question = RawQuestion {
            question_id: "108-1301-001".into(),
            year: None,
            subject_code: String::new(),
            question_no: None,
            stem: "s".into(),
            choices: vec![],
            correct_choice_ids: Default::default(),
            explanation: None,
            tags: vec![],
            subject_name: None,
        };
        assert_eq!(
            explanations.explanation_for(&question).as_deref(),
            Some("because")
        );
    }
}
