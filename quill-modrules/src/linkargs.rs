// Compiler and linker argument formatting for the build orchestrator

use crate::evaluator::ResolvedDependencies;

/// Include-search arguments for compiling the module's own sources
pub fn include_args(resolved: &ResolvedDependencies) -> Vec<String> {
    resolved
        .private_include_paths
        .iter()
        .map(|path| format!("-I{}", path))
        .collect()
}

/// Dependency module names in link order: public interface modules first,
/// then privately linked ones.
pub fn link_order(resolved: &ResolvedDependencies) -> Vec<String> {
    let mut order = Vec::with_capacity(
        resolved.public_dependencies.len() + resolved.private_dependencies.len(),
    );

    order.extend(resolved.public_dependencies.iter().cloned());

    for name in &resolved.private_dependencies {
        if !order.contains(name) {
            order.push(name.clone());
        }
    }

    order
}
