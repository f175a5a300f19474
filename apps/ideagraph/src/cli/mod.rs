//! # ideagraph CLI Module
//!
//! This module implements the CLI interface for ideagraph.
//!
//! ## Available Commands
//!
//! - `shell` - Interactive add/save loop, then render (the default)
//! - `init` - Write the starter graph
//! - `status` - Show graph summary
//! - `add-node` - Add one concept
//! - `add-edge` - Relate two concepts
//! - `export` - Write the graph as node-link JSON
//! - `import` - Replace the graph from node-link JSON
//! - `render` - Lay out the graph and write the scene

mod commands;

use crate::config::{AppConfig, Overrides};
use crate::render::RenderFormat;
use clap::{Parser, Subcommand};
use ideagraph_core::GraphError;
use std::path::PathBuf;

pub use commands::*;

/// Default location of the persisted graph.
pub const DEFAULT_GRAPH_PATH: &str = "data/graph.json";

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// ideagraph - interactive 3-D concept graph builder
///
/// Grow a small graph of ideas and their relationships, then explore it as a
/// rotatable 3-D scene.
#[derive(Parser, Debug)]
#[command(name = "ideagraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the node-link JSON graph file
    #[arg(short, long, global = true, default_value = DEFAULT_GRAPH_PATH)]
    pub graph: PathBuf,

    /// Path to a TOML config file (default: ./ideagraph.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Add concepts and relations interactively, then render
    Shell {
        /// Page to write when the loop ends
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the starter graph
    Init {
        /// Overwrite an existing graph file
        #[arg(short, long)]
        force: bool,
    },

    /// Show graph summary
    Status,

    /// Add a concept
    AddNode {
        /// Concept name
        concept: String,

        /// Optional description shown on hover
        #[arg(short, long)]
        description: Option<String>,
    },

    /// Relate two existing concepts
    AddEdge {
        /// First concept
        from: String,

        /// Second concept
        to: String,

        /// Relationship label
        #[arg(short, long)]
        label: String,
    },

    /// Export graph as node-link JSON
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Import graph from node-link JSON
    Import {
        /// Input file path
        #[arg(short, long)]
        input: PathBuf,
    },

    /// Lay out the graph and write the scene
    Render {
        /// Seed for a reproducible layout
        #[arg(short, long)]
        seed: Option<u64>,

        /// Layout iterations
        #[arg(short = 'n', long)]
        iterations: Option<usize>,

        /// Output file path
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short = 't', long, value_enum, default_value_t = RenderFormat::Html)]
        format: RenderFormat,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), GraphError> {
    let graph_path = cli.graph.as_path();
    let json_mode = cli.json_mode;
    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command {
        Some(Commands::Shell { output }) => {
            let config = config.apply(Overrides {
                output,
                ..Overrides::default()
            })?;
            cmd_shell(graph_path, &config)
        }
        Some(Commands::Init { force }) => cmd_init(graph_path, json_mode, force),
        Some(Commands::Status) => cmd_status(graph_path, json_mode),
        Some(Commands::AddNode {
            concept,
            description,
        }) => cmd_add_node(graph_path, json_mode, &concept, description.as_deref()),
        Some(Commands::AddEdge { from, to, label }) => {
            cmd_add_edge(graph_path, json_mode, &from, &to, &label)
        }
        Some(Commands::Export { output }) => cmd_export(graph_path, &output),
        Some(Commands::Import { input }) => cmd_import(graph_path, json_mode, &input),
        Some(Commands::Render {
            seed,
            iterations,
            output,
            format,
        }) => {
            let config = config.apply(Overrides {
                seed,
                iterations,
                output,
            })?;
            cmd_render(graph_path, &config, json_mode, format)
        }
        None => cmd_shell(graph_path, &config),
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_shell() {
        let cli = Cli::try_parse_from(["ideagraph"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.graph, PathBuf::from(DEFAULT_GRAPH_PATH));
    }

    #[test]
    fn render_flags() {
        let cli = Cli::try_parse_from([
            "ideagraph", "render", "--seed", "7", "-n", "20", "--format", "json", "-o", "s.json",
        ])
        .expect("parse");

        let Some(Commands::Render {
            seed,
            iterations,
            output,
            format,
        }) = cli.command
        else {
            unreachable!("expected the render command");
        };
        assert_eq!(seed, Some(7));
        assert_eq!(iterations, Some(20));
        assert_eq!(output, Some(PathBuf::from("s.json")));
        assert_eq!(format, RenderFormat::Json);
    }

    #[test]
    fn global_graph_flag_after_subcommand() {
        let cli = Cli::try_parse_from(["ideagraph", "status", "--graph", "g.json", "--json-mode"])
            .expect("parse");
        assert_eq!(cli.graph, PathBuf::from("g.json"));
        assert!(cli.json_mode);
    }
}
