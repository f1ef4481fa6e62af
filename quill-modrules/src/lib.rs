// quill-modrules - Quill engine module build descriptors
// Parses module/plugin descriptors and resolves them into the dependency
// records consumed by the build orchestrator.

pub mod cli;
pub mod commands;
pub mod descriptor;
pub mod evaluator;
pub mod linkargs;
pub mod plugin;
pub mod record;

pub use cli::{create_new_module, init_module};
pub use commands::{
    add_dependency, check, evaluate_path, list_dependencies, remove_dependency, Visibility,
};
pub use descriptor::{DescriptorError, ModuleDescriptor, DESCRIPTOR_FILE};
pub use evaluator::{
    evaluate, BuildMode, ResolvedDependencies, EDITOR_TOOLING_MODULE, PHYSICS_MODULE,
};
pub use linkargs::{include_args, link_order};
pub use plugin::{evaluate_plugin, load_plugin, PluginDescriptor, PLUGIN_FILE};
pub use record::{hash_file, ModuleRecord, RecordFile, RECORD_FILE};

/// Build tooling version
pub const VERSION: &str = "0.2.0";
