// Module descriptor parser - module.json

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Descriptor file name inside a module directory.
pub const DESCRIPTOR_FILE: &str = "module.json";

/// Build descriptor for a single engine module (module.json)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,

    /// Dependencies whose interface is re-exported to consumers of this module
    #[serde(
        default,
        rename = "publicDependencies",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub public_dependencies: Vec<String>,

    /// Dependencies used internally, never exposed to consumers
    #[serde(
        default,
        rename = "privateDependencies",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub private_dependencies: Vec<String>,

    #[serde(
        default,
        rename = "privateIncludePaths",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub private_include_paths: Vec<String>,
}

/// Validation errors for a module descriptor
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptorError {
    #[error("Module name cannot be empty")]
    EmptyName,

    #[error("Empty dependency name in module '{0}'")]
    EmptyDependency(String),

    #[error("Duplicate dependency '{1}' in module '{0}'")]
    DuplicateDependency(String, String),

    #[error("Dependency '{1}' of module '{0}' is declared both public and private")]
    ConflictingVisibility(String, String),
}

impl ModuleDescriptor {
    /// Create a descriptor with the standard starter layout
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            public_dependencies: vec!["Core".to_string()],
            private_dependencies: Vec::new(),
            private_include_paths: vec![format!("{}/Private", name)],
        }
    }

    /// Parse module.json from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;

        Self::from_str(&content)
    }

    /// Parse module.json from string
    pub fn from_str(content: &str) -> Result<Self> {
        let descriptor: ModuleDescriptor =
            serde_json::from_str(content).context("Failed to parse module.json")?;

        descriptor.validate()?;
        Ok(descriptor)
    }

    /// Write descriptor to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).context("Failed to serialize descriptor")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Validate descriptor contents
    ///
    /// Dependency names stay opaque here; whether a named module actually
    /// exists is the build orchestrator's problem.
    pub fn validate(&self) -> Result<(), DescriptorError> {
        if self.name.is_empty() {
            return Err(DescriptorError::EmptyName);
        }

        check_list(&self.name, &self.public_dependencies)?;
        check_list(&self.name, &self.private_dependencies)?;

        for name in &self.public_dependencies {
            if self.private_dependencies.contains(name) {
                return Err(DescriptorError::ConflictingVisibility(
                    self.name.clone(),
                    name.clone(),
                ));
            }
        }

        Ok(())
    }

    /// Check whether a dependency is declared in either list
    pub fn declares(&self, name: &str) -> bool {
        self.public_dependencies.iter().any(|n| n == name)
            || self.private_dependencies.iter().any(|n| n == name)
    }
}

fn check_list(module: &str, names: &[String]) -> Result<(), DescriptorError> {
    for (i, name) in names.iter().enumerate() {
        if name.is_empty() {
            return Err(DescriptorError::EmptyDependency(module.to_string()));
        }
        if names[..i].contains(name) {
            return Err(DescriptorError::DuplicateDependency(
                module.to_string(),
                name.clone(),
            ));
        }
    }
    Ok(())
}

impl Default for ModuleDescriptor {
    fn default() -> Self {
        Self::new("MyModule")
    }
}
