use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quill_modrules::{
    add_dependency, check, create_new_module, evaluate_path, init_module, list_dependencies,
    remove_dependency, BuildMode, Visibility,
};

#[derive(Parser)]
#[command(name = "quill-build")]
#[command(version = "0.2.0")]
#[command(about = "Quill Engine Module Build Tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new Quill module
    New {
        /// Module name
        #[arg(value_name = "NAME")]
        name: String,

        /// Module path (default: ./<name>)
        #[arg(short, long, value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Initialize module.json in existing directory
    Init {
        /// Module path (default: current directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Add a dependency to module.json
    Add {
        /// Dependency module name
        #[arg(value_name = "MODULE")]
        module: String,

        /// Link privately instead of re-exporting
        #[arg(long)]
        private: bool,

        /// Module directory (default: current directory)
        #[arg(short, long, value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Remove a dependency from module.json
    Remove {
        /// Dependency module name
        #[arg(value_name = "MODULE")]
        module: String,

        /// Module directory (default: current directory)
        #[arg(short, long, value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// List declared dependencies
    List {
        /// Module directory (default: current directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Validate descriptors (plugin root or module directory)
    Check {
        /// Plugin root or module directory (default: current directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Resolve descriptors into a dependency record
    Evaluate {
        /// Plugin root or module directory (default: current directory)
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,

        /// Resolve for an editor build
        #[arg(long)]
        editor: bool,

        /// Print the record as JSON
        #[arg(long)]
        json: bool,

        /// Write the record to a file
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::New { name, path } => {
            create_new_module(&name, path)?;
        }

        Commands::Init { path } => {
            init_module(path)?;
        }

        Commands::Add {
            module,
            private,
            path,
        } => {
            let dir = path.unwrap_or_else(|| PathBuf::from("."));
            let visibility = if private {
                Visibility::Private
            } else {
                Visibility::Public
            };
            add_dependency(&dir, &module, visibility)?;
        }

        Commands::Remove { module, path } => {
            let dir = path.unwrap_or_else(|| PathBuf::from("."));
            remove_dependency(&dir, &module)?;
        }

        Commands::List { path } => {
            let dir = path.unwrap_or_else(|| PathBuf::from("."));
            list_dependencies(&dir)?;
        }

        Commands::Check { path } => {
            let dir = path.unwrap_or_else(|| PathBuf::from("."));
            check(&dir)?;
        }

        Commands::Evaluate {
            path,
            editor,
            json,
            output,
        } => {
            let dir = path.unwrap_or_else(|| PathBuf::from("."));
            let mode = if editor {
                BuildMode::Editor
            } else {
                BuildMode::Runtime
            };

            log::info!("Evaluating {:?} in {} mode", dir, mode);

            evaluate_path(&dir, mode, json, output.as_deref())?;
        }
    }

    Ok(())
}
