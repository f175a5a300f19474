//! # Interactive Shell
//!
//! The console loop that grows a graph one concept or relation at a time.
//!
//! ```text
//! Add (n)ode, (e)dge, (s)ave, or (q)uit to plot? n
//! Enter new concept: Transformers
//! Optional description/insight: attention is all you need
//! Add (n)ode, (e)dge, (s)ave, or (q)uit to plot? q
//! ```
//!
//! Input and output are generic so the loop can be driven from tests.
//! End of input behaves like `q`.

use ideagraph_core::{GraphError, Session};
use std::io::{BufRead, Write};
use std::path::Path;

/// Main prompt.
pub const ACTION_PROMPT: &str = "Add (n)ode, (e)dge, (s)ave, or (q)uit to plot? ";

/// Printed when an edge names a concept that does not exist.
pub const NODES_NOT_FOUND: &str = "Nodes not found—add them first!";

/// Printed for any unrecognized action.
pub const INVALID_ACTION: &str = "Invalid—try n, e, s, or q.";

/// What a single action line asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    AddNode,
    AddEdge,
    Save,
    Quit,
    Invalid,
}

impl Action {
    /// Parse a trimmed, case-insensitive action line.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        match line.trim().to_lowercase().as_str() {
            "n" => Self::AddNode,
            "e" => Self::AddEdge,
            "s" => Self::Save,
            "q" => Self::Quit,
            _ => Self::Invalid,
        }
    }
}

/// Console loop over a session.
pub struct Shell<'a, R, W> {
    session: &'a mut Session,
    graph_path: &'a Path,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    pub fn new(session: &'a mut Session, graph_path: &'a Path, input: R, output: W) -> Self {
        Self {
            session,
            graph_path,
            input,
            output,
        }
    }

    /// Run until `q` or end of input.
    ///
    /// Only I/O failures on the console end the loop early; a failed save is
    /// reported and the loop continues.
    pub fn run(&mut self) -> Result<(), GraphError> {
        loop {
            let Some(line) = self.ask(ACTION_PROMPT)? else {
                return Ok(());
            };

            match Action::parse(&line) {
                Action::Quit => return Ok(()),
                Action::AddNode => self.add_node()?,
                Action::AddEdge => self.add_edge()?,
                Action::Save => self.save()?,
                Action::Invalid => self.say(INVALID_ACTION)?,
            }
        }
    }

    fn add_node(&mut self) -> Result<(), GraphError> {
        let concept = self.ask("Enter new concept: ")?.unwrap_or_default();
        let description = self
            .ask("Optional description/insight: ")?
            .unwrap_or_default();

        if concept.is_empty() {
            return self.say("Concept name cannot be empty.");
        }

        let created = self.session.add_node(&concept, Some(&description));
        if created {
            tracing::debug!(concept = %concept, "Added concept");
        } else {
            tracing::debug!(concept = %concept, "Concept already present");
        }
        Ok(())
    }

    fn add_edge(&mut self) -> Result<(), GraphError> {
        let from = self.ask("From concept: ")?.unwrap_or_default();
        let to = self.ask("To concept: ")?.unwrap_or_default();
        let label = self.ask("Relationship label: ")?.unwrap_or_default();

        if label.is_empty() {
            return self.say("Relationship label cannot be empty.");
        }

        match self.session.add_edge(&from, &to, &label) {
            Ok(Some(previous)) => {
                tracing::debug!(from = %from, to = %to, "Relabeled '{}' as '{}'", previous, label);
                Ok(())
            }
            Ok(None) => {
                tracing::debug!(from = %from, to = %to, label = %label, "Added relation");
                Ok(())
            }
            Err(GraphError::UnknownNode(_)) => self.say(NODES_NOT_FOUND),
            Err(e) => self.say(&e.to_string()),
        }
    }

    fn save(&mut self) -> Result<(), GraphError> {
        match crate::cli::save_session(&*self.session, self.graph_path) {
            Ok(()) => {
                let message = format!("Graph saved to {}!", self.graph_path.display());
                self.say(&message)
            }
            Err(e) => {
                tracing::warn!("Save failed: {}", e);
                self.say(&format!("Save failed: {}", e))
            }
        }
    }

    /// Print a prompt and read one trimmed line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>, GraphError> {
        write!(self.output, "{}", prompt).map_err(console_error)?;
        self.output.flush().map_err(console_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(console_error)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn say(&mut self, message: &str) -> Result<(), GraphError> {
        writeln!(self.output, "{}", message).map_err(console_error)
    }
}

fn console_error(e: std::io::Error) -> GraphError {
    GraphError::IoError(format!("Console: {}", e))
}

// =============================================================================
// TESTS
// =============================================================================
