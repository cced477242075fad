//! Bank loading from a manifest and its listed files.
//!
//! All listed files are read concurrently. A file that cannot be read or
//! parsed is recorded and skipped; only a missing or invalid manifest fails
//! the load.

use futures::future::join_all;
use serde_json::Value;

use crate::error::{FileFailure, LoadError};
use crate::normalize::flatten_records;
use crate::traits::{BankSource, Manifest};

/// Records gathered from a bank source, ready for `set_bank`.
#[derive(Debug, Default)]
pub struct LoadedBank {
    /// Raw records from every file that loaded, in manifest order.
    pub records: Vec<Value>,
    /// Files that contributed records.
    pub loaded_files: Vec<String>,
    /// Files that were skipped.
    pub failures: Vec<FileFailure>,
}

impl LoadedBank {
    pub fn file_count(&self) -> usize {
        self.loaded_files.len() + self.failures.len()
    }
}

/// Parse manifest bytes.
pub fn parse_manifest(bytes: &[u8], location: &str) -> Result<Manifest, LoadError> {
    serde_json::from_slice::<Manifest>(bytes).map_err(|e| LoadError::InvalidManifest {
        location: location.to_string(),
        message: e.to_string(),
    })
}

/// Load every file listed in the source's manifest.
pub async fn load_bank(source: &dyn BankSource) -> Result<LoadedBank, LoadError> {
    let location = source.describe();
    let manifest_bytes = source
        .read_manifest()
        .await
        .map_err(|e| LoadError::ManifestUnavailable {
            location: location.clone(),
            source: e,
        })?;
    let manifest = parse_manifest(&manifest_bytes, &location)?;

    if manifest.files.is_empty() {
        tracing::warn!("manifest at {location} lists no files");
        return Ok(LoadedBank::default());
    }

    tracing::info!("loading {} bank files from {location}", manifest.files.len());

    let reads = manifest.files.iter().map(|name| async move {
        let outcome = match source.read_file(name).await {
            Ok(bytes) => serde_json::from_slice::<Value>(&bytes).map_err(|e| {
                FileFailure::InvalidJson {
                    file: name.clone(),
                    message: e.to_string(),
                }
            }),
            Err(e) => Err(FileFailure::Unreadable {
                file: name.clone(),
                message: e.to_string(),
            }),
        };
        (name, outcome)
    });

    let mut bank = LoadedBank::default();
    for (name, outcome) in join_all(reads).await {
        match outcome {
            Ok(value) => {
                bank.records.extend(flatten_records(value));
                bank.loaded_files.push(name.clone());
            }
            Err(failure) => {
                tracing::warn!("skipping bank file {}: {failure}", failure.file());
                bank.failures.push(failure);
            }
        }
    }

    tracing::info!(
        "loaded {} records from {} of {} files",
        bank.records.len(),
        bank.loaded_files.len(),
        bank.file_count()
    );

    Ok(bank)
}
