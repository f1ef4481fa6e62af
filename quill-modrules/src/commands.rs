// Descriptor commands (add, remove, list, check, evaluate)

use anyhow::Result;
use std::path::{Path, PathBuf};

use crate::descriptor::{ModuleDescriptor, DESCRIPTOR_FILE};
use crate::evaluator::BuildMode;
use crate::linkargs::{include_args, link_order};
use crate::plugin::{load_plugin, PLUGIN_FILE};
use crate::record::RecordFile;

/// Dependency visibility in a module descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    fn label(self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

/// Add a dependency to module.json
pub fn add_dependency(dir: &Path, name: &str, visibility: Visibility) -> Result<()> {
    let descriptor_path = dir.join(DESCRIPTOR_FILE);
    if !descriptor_path.exists() {
        anyhow::bail!(
            "{} not found in {}. Run 'quill-build init' first.",
            DESCRIPTOR_FILE,
            dir.display()
        );
    }

    let mut descriptor = ModuleDescriptor::from_file(&descriptor_path)?;

    if descriptor.declares(name) {
        anyhow::bail!(
            "Dependency '{}' is already declared in module '{}'",
            name,
            descriptor.name
        );
    }

    match visibility {
        Visibility::Public => descriptor.public_dependencies.push(name.to_string()),
        Visibility::Private => descriptor.private_dependencies.push(name.to_string()),
    }

    descriptor.to_file(&descriptor_path)?;

    println!("✅ Added {} dependency: {}", visibility.label(), name);
    println!("   Saved to {}", descriptor_path.display());

    Ok(())
}

/// Remove a dependency from module.json
pub fn remove_dependency(dir: &Path, name: &str) -> Result<()> {
    let descriptor_path = dir.join(DESCRIPTOR_FILE);
    if !descriptor_path.exists() {
        anyhow::bail!("{} not found in {}", DESCRIPTOR_FILE, dir.display());
    }

    let mut descriptor = ModuleDescriptor::from_file(&descriptor_path)?;

    if !descriptor.declares(name) {
        anyhow::bail!(
            "Dependency '{}' is not declared in module '{}'",
            name,
            descriptor.name
        );
    }

    descriptor.public_dependencies.retain(|n| n != name);
    descriptor.private_dependencies.retain(|n| n != name);

    descriptor.to_file(&descriptor_path)?;

    println!("✅ Removed dependency: {}", name);

    Ok(())
}

/// List declared dependencies of a module
pub fn list_dependencies(dir: &Path) -> Result<()> {
    let descriptor = ModuleDescriptor::from_file(dir.join(DESCRIPTOR_FILE))?;

    println!("Module: {}", descriptor.name);

    if descriptor.public_dependencies.is_empty() && descriptor.private_dependencies.is_empty() {
        println!("   No dependencies declared");
        return Ok(());
    }

    if !descriptor.public_dependencies.is_empty() {
        println!("   Public:");
        for name in &descriptor.public_dependencies {
            println!("      {}", name);
        }
    }

    if !descriptor.private_dependencies.is_empty() {
        println!("   Private:");
        for name in &descriptor.private_dependencies {
            println!("      {}", name);
        }
    }

    Ok(())
}

/// Validate descriptors under a path (plugin root or single module directory)
pub fn check(path: &Path) -> Result<()> {
    if path.join(PLUGIN_FILE).exists() {
        let (plugin, modules) = load_plugin(path)?;
        println!("✅ Plugin '{}': {} module(s) OK", plugin.name, modules.len());
    } else {
        let descriptor = ModuleDescriptor::from_file(path.join(DESCRIPTOR_FILE))?;
        println!("✅ Module '{}' OK", descriptor.name);
    }

    Ok(())
}

/// Evaluate descriptors under a path and print or persist the record.
///
/// A plugin root evaluates every listed module; a bare module directory
/// evaluates just that module.
pub fn evaluate_path(path: &Path, mode: BuildMode, json: bool, output: Option<&Path>) -> Result<()> {
    let (root, modules) = load_modules(path)?;

    log::info!("Evaluating {} module(s), {} mode", modules.len(), mode);

    let record = RecordFile::generate(&root, &modules, mode)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&record)?);
    } else {
        println!("Build mode: {}", mode);
        for module in record.modules.values() {
            print_resolved(module);
        }
    }

    if let Some(out) = output {
        record.to_file(out)?;
        println!("✅ Wrote {}", out.display());
    }

    Ok(())
}

fn load_modules(path: &Path) -> Result<(PathBuf, Vec<ModuleDescriptor>)> {
    if path.join(PLUGIN_FILE).exists() {
        let (_, modules) = load_plugin(path)?;
        Ok((path.to_path_buf(), modules))
    } else {
        let descriptor = ModuleDescriptor::from_file(path.join(DESCRIPTOR_FILE))?;
        let root = path.parent().unwrap_or(path).to_path_buf();
        Ok((root, vec![descriptor]))
    }
}

fn print_resolved(module: &crate::record::ModuleRecord) {
    let resolved = &module.resolved;

    println!("Module: {}", resolved.module);

    if !resolved.public_dependencies.is_empty() {
        println!("   Public:  {}", resolved.public_dependencies.join(", "));
    }
    println!("   Private: {}", resolved.private_dependencies.join(", "));

    let includes = include_args(resolved);
    if !includes.is_empty() {
        println!("   Include: {}", includes.join(" "));
    }

    println!("   Link:    {}", link_order(resolved).join(" "));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn setup_module(dir_name: &str, name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(dir_name);
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).unwrap();

        ModuleDescriptor::new(name)
            .to_file(dir.join(DESCRIPTOR_FILE))
            .unwrap();

        dir
    }

    #[test]
    fn test_add_and_remove_dependency() {
        let dir = setup_module("quill_test_cmd_add_remove", "Sprite2D");

        add_dependency(&dir, "Render", Visibility::Public).unwrap();
        add_dependency(&dir, "Ui", Visibility::Private).unwrap();

        let descriptor = ModuleDescriptor::from_file(dir.join(DESCRIPTOR_FILE)).unwrap();
        assert_eq!(descriptor.public_dependencies, vec!["Core", "Render"]);
        assert_eq!(descriptor.private_dependencies, vec!["Ui"]);

        remove_dependency(&dir, "Render").unwrap();

        let descriptor = ModuleDescriptor::from_file(dir.join(DESCRIPTOR_FILE)).unwrap();
        assert_eq!(descriptor.public_dependencies, vec!["Core"]);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_add_duplicate_rejected() {
        let dir = setup_module("quill_test_cmd_add_dup", "Sprite2D");

        add_dependency(&dir, "Ui", Visibility::Private).unwrap();
        assert!(add_dependency(&dir, "Ui", Visibility::Public).is_err());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_remove_unknown_rejected() {
        let dir = setup_module("quill_test_cmd_remove_unknown", "Sprite2D");

        assert!(remove_dependency(&dir, "Nope").is_err());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_evaluate_writes_record() {
        let dir = setup_module("quill_test_cmd_evaluate", "Sprite2D");
        let out = dir.join("quill-resolved.json");

        evaluate_path(&dir, BuildMode::Editor, false, Some(&out)).unwrap();

        let record = RecordFile::from_file(&out).unwrap();
        assert_eq!(record.mode, BuildMode::Editor);
        assert!(record.get_module("Sprite2D").is_some());

        fs::remove_dir_all(&dir).ok();
    }
}
