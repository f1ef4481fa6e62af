// Module scaffolding (new, init)

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::descriptor::{ModuleDescriptor, DESCRIPTOR_FILE};

/// Create a new Quill module directory
pub fn create_new_module(name: &str, path: Option<PathBuf>) -> Result<PathBuf> {
    let module_path = path.unwrap_or_else(|| PathBuf::from(name));

    // Check if directory already exists
    if module_path.exists() {
        anyhow::bail!("Directory already exists: {}", module_path.display());
    }

    create_module_structure(&module_path, name)?;

    println!("✅ Created new Quill module: {}", name);
    println!("   Path: {}", module_path.display());
    println!("\nNext steps:");
    println!("   quill-build check {}", module_path.display());
    println!("   quill-build evaluate {}", module_path.display());

    Ok(module_path)
}

/// Initialize module.json in existing directory
pub fn init_module(path: Option<PathBuf>) -> Result<PathBuf> {
    let module_path = path.unwrap_or_else(|| PathBuf::from("."));

    // Check if module.json already exists
    let descriptor_path = module_path.join(DESCRIPTOR_FILE);
    if descriptor_path.exists() {
        anyhow::bail!(
            "{} already exists in {}",
            DESCRIPTOR_FILE,
            module_path.display()
        );
    }

    // Get module name from directory
    let module_name = module_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("MyModule");

    let descriptor = ModuleDescriptor::new(module_name);
    descriptor.to_file(&descriptor_path)?;

    println!(
        "✅ Initialized {} in {}",
        DESCRIPTOR_FILE,
        module_path.display()
    );

    Ok(module_path)
}

/// Create module directory structure
fn create_module_structure(path: &Path, name: &str) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("Failed to create directory: {}", path.display()))?;

    fs::create_dir(path.join("Public")).context("Failed to create Public directory")?;
    fs::create_dir(path.join("Private")).context("Failed to create Private directory")?;

    // Create module.json
    let descriptor = ModuleDescriptor::new(name);
    descriptor.to_file(path.join(DESCRIPTOR_FILE))?;

    // Create .gitignore
    let gitignore_content = r#"# Build artifacts
quill-resolved.json
*.o
*.a

# IDE
.vscode/
.idea/
*.swp
*.swo
*~

# OS
.DS_Store
Thumbs.db
"#;

    fs::write(path.join(".gitignore"), gitignore_content).context("Failed to create .gitignore")?;

    // Create README.md
    let readme_content = format!(
        r#"# {}

A Quill engine module.

## Usage

```bash
# Validate the descriptor
quill-build check

# Resolve dependencies for a runtime build
quill-build evaluate

# Resolve dependencies for an editor build
quill-build evaluate --editor
```
"#,
        name
    );

    fs::write(path.join("README.md"), readme_content).context("Failed to create README.md")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_create_module() {
        let temp_dir = env::temp_dir();
        let module_name = "TestQuillModule";
        let module_path = temp_dir.join("quill_test_create_module");

        // Clean up if exists
        if module_path.exists() {
            fs::remove_dir_all(&module_path).ok();
        }

        // Create module
        let result = create_new_module(module_name, Some(module_path.clone()));
        assert!(result.is_ok());

        // Verify structure
        assert!(module_path.join(DESCRIPTOR_FILE).exists());
        assert!(module_path.join("Public").is_dir());
        assert!(module_path.join("Private").is_dir());
        assert!(module_path.join(".gitignore").exists());
        assert!(module_path.join("README.md").exists());

        let descriptor = ModuleDescriptor::from_file(module_path.join(DESCRIPTOR_FILE)).unwrap();
        assert_eq!(descriptor.name, module_name);
        assert_eq!(
            descriptor.private_include_paths,
            vec![format!("{}/Private", module_name)]
        );

        // Clean up
        fs::remove_dir_all(&module_path).ok();
    }

    #[test]
    fn test_init_refuses_overwrite() {
        let module_path = env::temp_dir().join("quill_test_init_overwrite");
        fs::remove_dir_all(&module_path).ok();
        fs::create_dir_all(&module_path).unwrap();

        assert!(init_module(Some(module_path.clone())).is_ok());
        assert!(init_module(Some(module_path.clone())).is_err());

        fs::remove_dir_all(&module_path).ok();
    }
}
