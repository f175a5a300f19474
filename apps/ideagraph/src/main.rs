//! # ideagraph - 3-D Concept Graph Builder
//!
//! The main binary for ideagraph.
//!
//! ## Usage
//!
//! ```bash
//! # Interactive shell, then write ideagraph.html
//! ideagraph
//!
//! # Scripted edits
//! ideagraph init
//! ideagraph add-node "Transformers" -d "attention is all you need"
//! ideagraph add-edge "Neural Networks" "Transformers" -l "generalizes to"
//! ideagraph render --seed 42 -o graph.html
//! ```

use clap::Parser;
use ideagraph::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — IDEAGRAPH_LOG_FORMAT=json enables machine-parseable output.
    // Logs go to stderr so they never mix with shell prompts or --json-mode output.
    let log_format = std::env::var("IDEAGRAPH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ideagraph=info".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(std::io::stderr),
                )
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        if e.is_contract_violation() {
            tracing::error!("Internal error, scene and layout disagree: {}", e);
        } else {
            tracing::error!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

/// Print the ideagraph startup banner.
fn print_banner() {
    println!(
        r#"
   _     _                                 _
  (_) __| | ___  __ _  __ _ _ __ __ _ _ __ | |__
  | |/ _` |/ _ \/ _` |/ _` | '__/ _` | '_ \| '_ \
  | | (_| |  __/ (_| | (_| | | | (_| | |_) | | | |
  |_|\__,_|\___|\__,_|\__, |_|  \__,_| .__/|_| |_|
                      |___/          |_|

  3-D Concept Graph Builder v{}
"#,
        env!("CARGO_PKG_VERSION")
    );
}
