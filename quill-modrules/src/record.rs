// Resolution record file (quill-resolved.json)

use anyhow::{Context, Result};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::descriptor::{ModuleDescriptor, DESCRIPTOR_FILE};
use crate::evaluator::{evaluate, BuildMode, ResolvedDependencies};

/// Default record file name at a plugin root.
pub const RECORD_FILE: &str = "quill-resolved.json";

/// Persisted evaluation output for the build orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordFile {
    pub version: u32,

    #[serde(rename = "generatedAt")]
    pub generated_at: String,

    pub mode: BuildMode,

    pub modules: BTreeMap<String, ModuleRecord>,
}

/// Resolved record for one module plus the descriptor hash it came from
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModuleRecord {
    pub resolved: ResolvedDependencies,
    pub integrity: String,
}

impl RecordFile {
    /// Create a new empty record file
    pub fn new(mode: BuildMode) -> Self {
        Self {
            version: 1,
            generated_at: Utc::now().to_rfc3339(),
            mode,
            modules: BTreeMap::new(),
        }
    }

    /// Load record file from disk
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;

        Self::from_str(&content)
    }

    /// Parse record file from string
    pub fn from_str(content: &str) -> Result<Self> {
        let record: RecordFile =
            serde_json::from_str(content).context("Failed to parse resolution record")?;

        Ok(record)
    }

    /// Save record file to disk
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize resolution record")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Evaluate modules and build the record, hashing each source descriptor
    /// so stale records can be detected later.
    pub fn generate<P: AsRef<Path>>(
        root: P,
        modules: &[ModuleDescriptor],
        mode: BuildMode,
    ) -> Result<Self> {
        let mut record = Self::new(mode);

        for module in modules {
            let descriptor_path = root.as_ref().join(&module.name).join(DESCRIPTOR_FILE);

            let integrity = if descriptor_path.exists() {
                format!("sha256:{}", hash_file(&descriptor_path)?)
            } else {
                "sha256:unknown".to_string()
            };

            record.modules.insert(
                module.name.clone(),
                ModuleRecord {
                    resolved: evaluate(module, mode),
                    integrity,
                },
            );
        }

        Ok(record)
    }

    /// Check recorded integrity against the descriptor files on disk.
    ///
    /// Returns one message per stale or missing descriptor; empty means the
    /// record is still current.
    pub fn validate<P: AsRef<Path>>(&self, root: P) -> Result<Vec<String>> {
        let mut errors = Vec::new();

        for (name, module) in &self.modules {
            let descriptor_path = root.as_ref().join(name).join(DESCRIPTOR_FILE);

            if !descriptor_path.exists() {
                errors.push(format!("Descriptor missing for module: {}", name));
                continue;
            }

            let expected = module
                .integrity
                .strip_prefix("sha256:")
                .unwrap_or(&module.integrity);

            match hash_file(&descriptor_path) {
                Ok(actual) => {
                    if expected != "unknown" && actual != expected {
                        errors.push(format!(
                            "Integrity mismatch for {}: expected {}, got {}",
                            name, expected, actual
                        ));
                    }
                }
                Err(e) => {
                    errors.push(format!("Failed to hash {}: {}", name, e));
                }
            }
        }

        Ok(errors)
    }

    /// Get record for a module
    pub fn get_module(&self, name: &str) -> Option<&ModuleRecord> {
        self.modules.get(name)
    }
}

/// SHA-256 hex digest of a file's contents
pub fn hash_file<P: AsRef<Path>>(path: P) -> Result<String> {
    let content = fs::read(&path)
        .with_context(|| format!("Failed to read file: {}", path.as_ref().display()))?;

    let mut hasher = Sha256::new();
    hasher.update(&content);
    let hash = hasher.finalize();

    Ok(format!("{:x}", hash))
}
