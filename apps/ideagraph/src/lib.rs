//! # ideagraph
//!
//! The application layer around `ideagraph-core`: command line, config
//! file, the interactive shell and the file-backed rendering surfaces.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                  apps/ideagraph (THE BINARY)              │
//! │                                                           │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌────────┐  │
//! │  │   CLI    │   │  Shell   │   │  Config  │   │ Render │  │
//! │  │  (clap)  │   │ (stdin)  │   │  (toml)  │   │ (HTML) │  │
//! │  └────┬─────┘   └────┬─────┘   └────┬─────┘   └───┬────┘  │
//! │       └──────────────┴──────┬───────┴─────────────┘       │
//! │                             ▼                             │
//! │                    ┌────────────────┐                     │
//! │                    │ ideagraph-core │                     │
//! │                    │  (THE LOGIC)   │                     │
//! │                    └────────────────┘                     │
//! └───────────────────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
pub mod render;
pub mod shell;
