//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands.

use crate::config::AppConfig;
use crate::render::{HtmlSurface, RenderFormat};
use crate::shell::Shell;
use ideagraph_core::{
    GraphError, GraphMetrics, GraphStore, Session, graph_from_json, graph_to_json,
    meditation_prompt, primitives::MAX_PAYLOAD_SIZE, starter_graph,
};
use std::path::{Path, PathBuf};

// =============================================================================
// PATH VALIDATION
// =============================================================================

/// Validate file size before reading.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), GraphError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| GraphError::IoError(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(GraphError::SerializationError(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Resolve an input path to an existing regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, GraphError> {
    let canonical = path.canonicalize().map_err(|e| {
        GraphError::IoError(format!("Invalid file path '{}': {}", path.display(), e))
    })?;

    if !canonical.is_file() {
        return Err(GraphError::IoError(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Resolve an output path whose parent directory must already exist.
fn validate_output_path(path: &Path) -> Result<PathBuf, GraphError> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let canonical_parent = parent.canonicalize().map_err(|e| {
        GraphError::IoError(format!(
            "Invalid output directory '{}': {}",
            parent.display(),
            e
        ))
    })?;

    if !canonical_parent.is_dir() {
        return Err(GraphError::IoError(format!(
            "Output directory '{}' is not a valid directory",
            parent.display()
        )));
    }

    let filename = path
        .file_name()
        .ok_or_else(|| GraphError::IoError("Output path has no filename".to_string()))?;

    Ok(canonical_parent.join(filename))
}

fn print_json(value: &serde_json::Value) {
    println!("{}", serde_json::to_string_pretty(value).unwrap_or_default());
}

// =============================================================================
// SHELL COMMAND
// =============================================================================

/// Run the interactive loop on stdin/stdout, then render.
pub fn cmd_shell(graph_path: &Path, config: &AppConfig) -> Result<(), GraphError> {
    let mut session = load_or_create_session(graph_path, config)?;
    tracing::info!(
        nodes = session.node_count(),
        edges = session.edge_count(),
        "Shell started"
    );

    {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        Shell::new(&mut session, graph_path, stdin.lock(), stdout.lock()).run()?;
    }

    let mut surface = HtmlSurface::new(&config.render.output);
    session.render_request(&mut surface)?;
    println!("Plot written to {}", surface.path().display());

    if let Some(prompt) = meditation_prompt(session.graph(), &mut rand::rng()) {
        println!("{}", prompt);
    }

    Ok(())
}

// =============================================================================
// INIT COMMAND
// =============================================================================

/// Write the starter graph.
pub fn cmd_init(graph_path: &Path, json_mode: bool, force: bool) -> Result<(), GraphError> {
    if graph_path.exists() && !force {
        return Err(GraphError::IoError(format!(
            "Graph file {} already exists. Use --force to overwrite.",
            graph_path.display()
        )));
    }

    let session = Session::with_graph(starter_graph()?);
    save_session(&session, graph_path)?;

    if json_mode {
        print_json(&serde_json::json!({
            "graph": graph_path.to_string_lossy(),
            "node_count": session.node_count(),
            "edge_count": session.edge_count(),
        }));
    } else {
        println!(
            "Initialized starter graph at {} ({} nodes, {} edges)",
            graph_path.display(),
            session.node_count(),
            session.edge_count()
        );
    }

    Ok(())
}

// =============================================================================
// STATUS COMMAND
// =============================================================================

/// Show graph summary.
pub fn cmd_status(graph_path: &Path, json_mode: bool) -> Result<(), GraphError> {
    let session = load_or_create_session(graph_path, &AppConfig::default())?;
    let metrics = GraphMetrics::from_session(&session);

    if json_mode {
        print_json(&serde_json::json!({
            "graph": graph_path.to_string_lossy(),
            "persisted": graph_path.exists(),
            "node_count": metrics.node_count,
            "edge_count": metrics.edge_count,
            "max_degree": metrics.max_degree,
            "hubs": metrics.hubs,
            "isolated_count": metrics.isolated_count,
            "label_count": metrics.label_count,
            "density_per_thousand": metrics.density_per_thousand(),
        }));
        return Ok(());
    }

    println!("ideagraph Status");
    println!("================");
    println!("Graph: {}", graph_path.display());
    if !graph_path.exists() {
        println!("       (not saved yet, showing starter graph)");
    }
    println!();
    println!("Concepts:   {}", metrics.node_count);
    println!("Relations:  {}", metrics.edge_count);
    println!("Labels:     {}", metrics.label_count);
    println!("Isolated:   {}", metrics.isolated_count);
    println!(
        "Density:    {} per thousand",
        metrics.density_per_thousand()
    );
    if !metrics.hubs.is_empty() {
        let hubs: Vec<&str> = metrics.hubs.iter().map(|h| h.as_str()).collect();
        println!("Hubs:       {} (degree {})", hubs.join(", "), metrics.max_degree);
    }

    Ok(())
}

// =============================================================================
// ADD COMMANDS
// =============================================================================

/// Add a concept and save.
pub fn cmd_add_node(
    graph_path: &Path,
    json_mode: bool,
    concept: &str,
    description: Option<&str>,
) -> Result<(), GraphError> {
    let concept = concept.trim();
    if concept.is_empty() {
        return Err(GraphError::InvalidConfig(
            "concept name cannot be empty".to_string(),
        ));
    }

    let mut session = load_or_create_session(graph_path, &AppConfig::default())?;
    let created = session.add_node(concept, description.map(str::trim));
    save_session(&session, graph_path)?;

    if json_mode {
        print_json(&serde_json::json!({
            "concept": concept,
            "created": created,
            "node_count": session.node_count(),
        }));
    } else if created {
        println!("Added concept '{}'", concept);
    } else {
        println!("Concept '{}' already exists (unchanged)", concept);
    }

    Ok(())
}

/// Relate two concepts and save.
pub fn cmd_add_edge(
    graph_path: &Path,
    json_mode: bool,
    from: &str,
    to: &str,
    label: &str,
) -> Result<(), GraphError> {
    if label.trim().is_empty() {
        return Err(GraphError::InvalidConfig(
            "relationship label cannot be empty".to_string(),
        ));
    }

    let mut session = load_or_create_session(graph_path, &AppConfig::default())?;
    let previous = session.add_edge(from.trim(), to.trim(), label.trim())?;
    save_session(&session, graph_path)?;

    if json_mode {
        print_json(&serde_json::json!({
            "from": from.trim(),
            "to": to.trim(),
            "label": label.trim(),
            "previous_label": previous,
            "edge_count": session.edge_count(),
        }));
    } else if let Some(previous) = previous {
        println!(
            "Relabeled '{}' - '{}': '{}' -> '{}'",
            from.trim(),
            to.trim(),
            previous,
            label.trim()
        );
    } else {
        println!("Related '{}' {} '{}'", from.trim(), label.trim(), to.trim());
    }

    Ok(())
}

// =============================================================================
// EXPORT COMMAND
// =============================================================================

/// Export graph as pretty node-link JSON.
pub fn cmd_export(graph_path: &Path, output: &Path) -> Result<(), GraphError> {
    let validated_output = validate_output_path(output)?;

    let session = load_or_create_session(graph_path, &AppConfig::default())?;
    let data = graph_to_json(session.graph(), true)?;

    std::fs::write(&validated_output, &data)
        .map_err(|e| GraphError::IoError(format!("Write file: {}", e)))?;

    println!("Exported {} bytes to {}", data.len(), validated_output.display());

    Ok(())
}

// =============================================================================
// IMPORT COMMAND
// =============================================================================

/// Replace the graph file with an imported graph.
pub fn cmd_import(graph_path: &Path, json_mode: bool, input: &Path) -> Result<(), GraphError> {
    let validated_path = validate_file_path(input)?;
    validate_file_size(&validated_path, MAX_PAYLOAD_SIZE as u64)?;

    let data = std::fs::read(&validated_path)
        .map_err(|e| GraphError::IoError(format!("Read file: {}", e)))?;

    let session = Session::with_graph(graph_from_json(&data)?);
    save_session(&session, graph_path)?;

    if json_mode {
        print_json(&serde_json::json!({
            "node_count": session.node_count(),
            "edge_count": session.edge_count(),
        }));
    } else {
        println!(
            "Imported graph: {} nodes, {} edges",
            session.node_count(),
            session.edge_count()
        );
    }

    Ok(())
}

// =============================================================================
// RENDER COMMAND
// =============================================================================

/// Lay out the graph and hand the scene to the chosen surface.
pub fn cmd_render(
    graph_path: &Path,
    config: &AppConfig,
    json_mode: bool,
    format: RenderFormat,
) -> Result<(), GraphError> {
    let output = &config.render.output;
    let output = match format {
        RenderFormat::Json if output.extension().is_some_and(|e| e == "html") => {
            output.with_extension("json")
        }
        _ => output.clone(),
    };
    let validated_output = validate_output_path(&output)?;

    let session = load_or_create_session(graph_path, config)?;
    let mut surface = format.surface(&validated_output);
    session.render_request(surface.as_mut())?;

    let prompt = meditation_prompt(session.graph(), &mut rand::rng());

    if json_mode {
        print_json(&serde_json::json!({
            "output": validated_output.to_string_lossy(),
            "title": session.style().title,
            "node_count": session.node_count(),
            "edge_count": session.edge_count(),
            "meditation_prompt": prompt,
        }));
    } else {
        println!("Plot written to {}", validated_output.display());
        if let Some(prompt) = prompt {
            println!("{}", prompt);
        }
    }

    Ok(())
}

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Load the graph file into a session, or start from the starter graph.
pub fn load_or_create_session(graph_path: &Path, config: &AppConfig) -> Result<Session, GraphError> {
    let graph = if graph_path.exists() {
        validate_file_size(graph_path, MAX_PAYLOAD_SIZE as u64)?;
        let data = std::fs::read(graph_path)
            .map_err(|e| GraphError::IoError(format!("Read graph: {}", e)))?;
        let graph = graph_from_json(&data)?;
        tracing::debug!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "Loaded graph from {}",
            graph_path.display()
        );
        graph
    } else {
        tracing::info!(
            "No graph at {}, starting from the starter graph",
            graph_path.display()
        );
        starter_graph()?
    };

    Ok(Session::with_graph(graph)
        .with_layout_config(config.layout)
        .with_style(config.scene_style()))
}

/// Save a session's graph as node-link JSON, creating parent directories.
pub fn save_session(session: &Session, graph_path: &Path) -> Result<(), GraphError> {
    if let Some(parent) = graph_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| GraphError::IoError(format!("Create {}: {}", parent.display(), e)))?;
    }

    let data = graph_to_json(session.graph(), false)?;
    std::fs::write(graph_path, &data)
        .map_err(|e| GraphError::IoError(format!("Write graph: {}", e)))?;
    tracing::debug!("Saved {} bytes to {}", data.len(), graph_path.display());
    Ok(())
}
