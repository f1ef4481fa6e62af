// Plugin descriptor: a plugin groups several modules under one source root

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::descriptor::{ModuleDescriptor, DESCRIPTOR_FILE};
use crate::evaluator::{evaluate, BuildMode, ResolvedDependencies};

/// Descriptor file name at a plugin root.
pub const PLUGIN_FILE: &str = "plugin.json";

/// Plugin descriptor (plugin.json)
///
/// `modules` lists module directory names under the plugin root; each one
/// carries its own module.json.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginDescriptor {
    pub name: String,
    pub version: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modules: Vec<String>,
}

impl PluginDescriptor {
    /// Parse plugin.json from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.as_ref().display()))?;

        Self::from_str(&content)
    }

    /// Parse plugin.json from string
    pub fn from_str(content: &str) -> Result<Self> {
        let plugin: PluginDescriptor =
            serde_json::from_str(content).context("Failed to parse plugin.json")?;

        plugin.validate()?;
        Ok(plugin)
    }

    /// Write plugin descriptor to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize plugin")?;

        fs::write(&path, content)
            .with_context(|| format!("Failed to write {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Validate plugin descriptor
    fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            anyhow::bail!("Plugin name cannot be empty");
        }

        if !is_valid_semver(&self.version) {
            anyhow::bail!("Invalid plugin version format: {}", self.version);
        }

        for (i, module) in self.modules.iter().enumerate() {
            if module.is_empty() {
                anyhow::bail!("Empty module entry in plugin '{}'", self.name);
            }
            if self.modules[..i].contains(module) {
                anyhow::bail!("Duplicate module '{}' in plugin '{}'", module, self.name);
            }
        }

        Ok(())
    }
}

/// Load a plugin root: plugin.json plus every listed module descriptor.
///
/// Each module lives in a directory named after itself, so the descriptor's
/// declared name must match the directory entry in plugin.json.
pub fn load_plugin<P: AsRef<Path>>(root: P) -> Result<(PluginDescriptor, Vec<ModuleDescriptor>)> {
    let root = root.as_ref();
    let plugin = PluginDescriptor::from_file(root.join(PLUGIN_FILE))?;

    let mut modules = Vec::with_capacity(plugin.modules.len());
    for module_dir in &plugin.modules {
        let path = root.join(module_dir).join(DESCRIPTOR_FILE);
        let descriptor = ModuleDescriptor::from_file(&path).with_context(|| {
            format!(
                "Failed to load module '{}' of plugin '{}'",
                module_dir, plugin.name
            )
        })?;

        if descriptor.name != *module_dir {
            anyhow::bail!(
                "Module directory '{}' declares mismatched name '{}'",
                module_dir,
                descriptor.name
            );
        }

        modules.push(descriptor);
    }

    Ok((plugin, modules))
}

/// Evaluate every module of a plugin for one build mode.
///
/// Evaluations are independent of each other; output is sorted by module
/// name so consumers see a deterministic order.
pub fn evaluate_plugin(modules: &[ModuleDescriptor], mode: BuildMode) -> Vec<ResolvedDependencies> {
    let mut resolved: Vec<ResolvedDependencies> =
        modules.iter().map(|m| evaluate(m, mode)).collect();

    resolved.sort_by(|a, b| a.module.cmp(&b.module));

    resolved
}

/// Check if version is valid semver
fn is_valid_semver(version: &str) -> bool {
    let version = version.strip_prefix('v').unwrap_or(version);
    let parts: Vec<&str> = version.split('.').collect();

    if parts.len() != 3 {
        return false;
    }

    parts.iter().all(|p| p.parse::<u32>().is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::PHYSICS_MODULE;
    use std::fs;

    #[test]
    fn test_parse_plugin_descriptor() {
        let json = r#"{
            "name": "Sprite2D",
            "version": "1.0.0",
            "modules": ["Sprite2D", "Sprite2DEditor"]
        }"#;

        let plugin = PluginDescriptor::from_str(json).unwrap();
        assert_eq!(plugin.name, "Sprite2D");
        assert_eq!(plugin.modules.len(), 2);
    }

    #[test]
    fn test_invalid_version_rejected() {
        let json = r#"{"name": "Sprite2D", "version": "not-a-version"}"#;
        assert!(PluginDescriptor::from_str(json).is_err());
    }

    #[test]
    fn test_duplicate_module_rejected() {
        let json = r#"{
            "name": "Sprite2D",
            "version": "1.0.0",
            "modules": ["Sprite2D", "Sprite2D"]
        }"#;

        assert!(PluginDescriptor::from_str(json).is_err());
    }

    #[test]
    fn test_evaluate_plugin_sorts_by_module_name() {
        let modules = vec![
            ModuleDescriptor::new("Zeta"),
            ModuleDescriptor::new("Alpha"),
        ];

        let resolved = evaluate_plugin(&modules, BuildMode::Runtime);
        assert_eq!(resolved[0].module, "Alpha");
        assert_eq!(resolved[1].module, "Zeta");
        assert!(resolved
            .iter()
            .all(|r| r.private_dependencies.contains(&PHYSICS_MODULE.to_string())));
    }

    #[test]
    fn test_load_plugin_from_disk() {
        let root = std::env::temp_dir().join("quill_test_load_plugin");
        fs::remove_dir_all(&root).ok();
        fs::create_dir_all(root.join("Sprite2D")).unwrap();

        let plugin = PluginDescriptor {
            name: "Sprite2D".to_string(),
            version: "1.0.0".to_string(),
            modules: vec!["Sprite2D".to_string()],
        };
        plugin.to_file(root.join(PLUGIN_FILE)).unwrap();

        ModuleDescriptor::new("Sprite2D")
            .to_file(root.join("Sprite2D").join(DESCRIPTOR_FILE))
            .unwrap();

        let (loaded, modules) = load_plugin(&root).unwrap();
        assert_eq!(loaded, plugin);
        assert_eq!(modules.len(), 1);
        assert_eq!(modules[0].name, "Sprite2D");

        fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn test_load_plugin_name_mismatch() {
        let root = std::env::temp_dir().join("quill_test_plugin_mismatch");
        fs::remove_dir_all(&root).ok();
        fs::create_dir_all(root.join("Sprite2D")).unwrap();

        let plugin = PluginDescriptor {
            name: "Sprite2D".to_string(),
            version: "1.0.0".to_string(),
            modules: vec!["Sprite2D".to_string()],
        };
        plugin.to_file(root.join(PLUGIN_FILE)).unwrap();

        // Descriptor declares a different name than its directory
        ModuleDescriptor::new("Renamed")
            .to_file(root.join("Sprite2D").join(DESCRIPTOR_FILE))
            .unwrap();

        assert!(load_plugin(&root).is_err());

        fs::remove_dir_all(&root).ok();
    }
}
