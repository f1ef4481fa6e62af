// Descriptor evaluation: (descriptor, build mode) -> resolved dependency record

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::descriptor::ModuleDescriptor;

/// Editor-only tooling module, linked privately in editor builds.
pub const EDITOR_TOOLING_MODULE: &str = "EditorCore";

/// Third-party physics runtime. Always linked privately so its headers never
/// leak to consumers of the module.
pub const PHYSICS_MODULE: &str = "Box2D";

/// Build mode supplied by the orchestrator for one evaluation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildMode {
    Editor,
    Runtime,
}

impl BuildMode {
    pub fn is_editor(self) -> bool {
        self == BuildMode::Editor
    }
}

impl fmt::Display for BuildMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BuildMode::Editor => write!(f, "editor"),
            BuildMode::Runtime => write!(f, "runtime"),
        }
    }
}

/// Resolved dependency record consumed by the build orchestrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedDependencies {
    pub module: String,

    #[serde(rename = "publicDependencies")]
    pub public_dependencies: Vec<String>,

    #[serde(rename = "privateDependencies")]
    pub private_dependencies: Vec<String>,

    #[serde(rename = "privateIncludePaths")]
    pub private_include_paths: Vec<String>,
}

/// Evaluate a module descriptor for a build mode.
///
/// Public dependencies and include paths pass through in declaration order.
/// Private dependencies gain the editor tooling module in editor builds, and
/// the physics runtime in every build. Dependency lists come out
/// duplicate-free, first occurrence wins.
///
/// Pure and infallible: the same inputs always produce the same record, and
/// unknown module names are passed along untouched for the orchestrator to
/// resolve.
pub fn evaluate(descriptor: &ModuleDescriptor, mode: BuildMode) -> ResolvedDependencies {
    let public_dependencies = dedup_names(&descriptor.public_dependencies);

    let mut private_dependencies = dedup_names(&descriptor.private_dependencies);
    if mode.is_editor() {
        push_unique(&mut private_dependencies, EDITOR_TOOLING_MODULE);
    }
    push_unique(&mut private_dependencies, PHYSICS_MODULE);

    ResolvedDependencies {
        module: descriptor.name.clone(),
        public_dependencies,
        private_dependencies,
        private_include_paths: descriptor.private_include_paths.clone(),
    }
}

/// Order-preserving dedup, first occurrence wins
fn dedup_names(names: &[String]) -> Vec<String> {
    let mut out = Vec::with_capacity(names.len());
    for name in names {
        if !out.contains(name) {
            out.push(name.clone());
        }
    }
    out
}

fn push_unique(names: &mut Vec<String>, name: &str) {
    if !names.iter().any(|n| n == name) {
        names.push(name.to_string());
    }
}
