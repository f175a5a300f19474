//! # CLI Integration Tests
//!
//! Command implementations driven against temporary graph files.

#![allow(clippy::unwrap_used, clippy::panic)]

use ideagraph::cli::{
    cmd_add_edge, cmd_add_node, cmd_export, cmd_import, cmd_init, cmd_render,
    load_or_create_session, save_session,
};
use ideagraph::config::{AppConfig, Overrides};
use ideagraph::render::RenderFormat;
use ideagraph::shell::Shell;
use ideagraph_core::{ConceptId, GraphError, GraphStore, Scene, Session, graph_from_json};
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn graph_file(dir: &TempDir) -> PathBuf {
    dir.path().join("data").join("graph.json")
}

fn load(path: &Path) -> Session {
    load_or_create_session(path, &AppConfig::default()).unwrap()
}

fn render_config(output: PathBuf) -> AppConfig {
    AppConfig::default()
        .apply(Overrides {
            seed: Some(11),
            iterations: None,
            output: Some(output),
        })
        .unwrap()
}

// =============================================================================
// INIT / LOAD
// =============================================================================

#[test]
fn init_writes_starter_graph() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);

    cmd_init(&path, false, false).unwrap();

    let session = load(&path);
    assert_eq!(session.node_count(), 9);
    assert_eq!(session.edge_count(), 8);
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);

    cmd_init(&path, false, false).unwrap();
    assert!(cmd_init(&path, false, false).is_err());
    cmd_init(&path, true, true).unwrap();
}

#[test]
fn missing_file_starts_from_starter_graph() {
    let dir = TempDir::new().unwrap();
    let session = load(&graph_file(&dir));

    assert_eq!(session.node_count(), 9);
    assert!(
        session
            .graph()
            .contains_node(&ConceptId::new("Machine Learning Basics"))
    );
}

#[test]
fn corrupt_graph_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("graph.json");
    std::fs::write(&path, b"{ not json").unwrap();

    let result = load_or_create_session(&path, &AppConfig::default());
    assert!(matches!(result, Err(GraphError::MalformedPayload(_))));
}

// =============================================================================
// EDITS
// =============================================================================

#[test]
fn add_node_and_edge_persist() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);

    cmd_add_node(&path, false, "Transformers", Some("attention")).unwrap();
    cmd_add_edge(&path, false, "Neural Networks", "Transformers", "generalizes to").unwrap();

    let session = load(&path);
    let graph = session.graph();
    assert_eq!(graph.node_count(), 10);
    assert_eq!(
        graph.edge_label(
            &ConceptId::new("Neural Networks"),
            &ConceptId::new("Transformers")
        ),
        Some("generalizes to")
    );
    let concept = graph.concept(&ConceptId::new("Transformers")).unwrap();
    assert_eq!(concept.description.as_deref(), Some("attention"));
}

#[test]
fn add_edge_to_unknown_concept_leaves_file_alone() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);
    cmd_init(&path, false, false).unwrap();
    let before = std::fs::read(&path).unwrap();

    let result = cmd_add_edge(&path, false, "PCA", "Nowhere", "rel");

    assert!(matches!(result, Err(GraphError::UnknownNode(_))));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn empty_concept_name_rejected() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);

    assert!(cmd_add_node(&path, false, "   ", None).is_err());
    assert!(!path.exists());
}

#[test]
fn empty_relationship_label_rejected() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);
    cmd_init(&path, false, false).unwrap();
    let before = std::fs::read(&path).unwrap();

    let result = cmd_add_edge(&path, false, "PCA", "Kernel Methods", "  ");

    assert!(matches!(result, Err(GraphError::InvalidConfig(_))));
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

// =============================================================================
// EXPORT / IMPORT
// =============================================================================

#[test]
fn export_then_import_roundtrip() {
    let dir = TempDir::new().unwrap();
    let source = graph_file(&dir);
    let exported = dir.path().join("export.json");
    let target = dir.path().join("copy.json");

    cmd_add_node(&source, false, "Extra", None).unwrap();
    cmd_export(&source, &exported).unwrap();
    cmd_import(&target, false, &exported).unwrap();

    assert!(load(&source).graph().same_content(load(&target).graph()));
}

#[test]
fn export_is_node_link_json() {
    let dir = TempDir::new().unwrap();
    let source = graph_file(&dir);
    let exported = dir.path().join("export.json");
    cmd_init(&source, false, false).unwrap();

    cmd_export(&source, &exported).unwrap();

    let value: serde_json::Value =
        serde_json::from_slice(&std::fs::read(&exported).unwrap()).unwrap();
    assert_eq!(value["directed"], false);
    assert_eq!(value["multigraph"], false);
    assert_eq!(value["nodes"].as_array().map(Vec::len), Some(9));
    assert_eq!(value["links"].as_array().map(Vec::len), Some(8));
}

#[test]
fn import_with_dangling_link_keeps_graph() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);
    cmd_init(&path, false, false).unwrap();
    let before = std::fs::read(&path).unwrap();

    let bad = dir.path().join("bad.json");
    std::fs::write(
        &bad,
        br#"{"nodes": [{"id": "A"}], "links": [{"source": "A", "target": "B", "label": "x"}]}"#,
    )
    .unwrap();

    assert!(cmd_import(&path, false, &bad).is_err());
    assert_eq!(std::fs::read(&path).unwrap(), before);
}

#[test]
fn import_missing_file_is_io_error() {
    let dir = TempDir::new().unwrap();
    let result = cmd_import(&graph_file(&dir), false, &dir.path().join("absent.json"));
    assert!(matches!(result, Err(GraphError::IoError(_))));
}

// =============================================================================
// RENDER
// =============================================================================

#[test]
fn render_html_page() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);
    let output = dir.path().join("graph.html");
    cmd_init(&path, false, false).unwrap();

    cmd_render(&path, &render_config(output.clone()), false, RenderFormat::Html).unwrap();

    let page = std::fs::read_to_string(&output).unwrap();
    assert!(page.contains("Interactive 3D DSML Concept Graph"));
    assert!(page.contains("Plotly.newPlot"));
    assert!(page.contains("Kernel Methods"));
}

#[test]
fn render_json_scene() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);
    let output = dir.path().join("scene.json");
    cmd_init(&path, false, false).unwrap();

    cmd_render(&path, &render_config(output.clone()), true, RenderFormat::Json).unwrap();

    let scene: Scene = serde_json::from_slice(&std::fs::read(&output).unwrap()).unwrap();
    assert_eq!(scene.nodes.len(), 9);
    assert_eq!(scene.edges.len(), 8);
    let hub = scene
        .node(&ConceptId::new("Machine Learning Basics"))
        .unwrap();
    assert_eq!(hub.color.r, 255);
}

#[test]
fn render_json_swaps_default_html_extension() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);
    cmd_init(&path, false, false).unwrap();

    let config = render_config(dir.path().join("page.html"));
    cmd_render(&path, &config, true, RenderFormat::Json).unwrap();

    assert!(dir.path().join("page.json").exists());
    assert!(!dir.path().join("page.html").exists());
}

#[test]
fn render_into_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);
    let output = dir.path().join("nope").join("graph.html");

    let result = cmd_render(&path, &render_config(output), false, RenderFormat::Html);
    assert!(matches!(result, Err(GraphError::IoError(_))));
}

// =============================================================================
// SHELL + CONFIG
// =============================================================================

#[test]
fn shell_save_writes_graph_file() {
    let dir = TempDir::new().unwrap();
    let path = graph_file(&dir);
    let mut session = Session::new();
    let mut output = Vec::new();

    Shell::new(
        &mut session,
        &path,
        Cursor::new(&b"n\nA\n\nn\nB\nbee\ne\nA\nB\nlinks\ns\nq\n"[..]),
        &mut output,
    )
    .run()
    .unwrap();

    let printed = String::from_utf8(output).unwrap();
    assert!(printed.contains(&format!("Graph saved to {}!", path.display())));

    let restored = graph_from_json(&std::fs::read(&path).unwrap()).unwrap();
    assert!(restored.same_content(session.graph()));
}

#[test]
fn saved_session_reloads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("g.json");
    let mut session = Session::new();
    session.add_node("solo", Some("alone"));

    save_session(&session, &path).unwrap();

    assert!(load(&path).graph().same_content(session.graph()));
}

#[test]
fn config_file_is_read() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ideagraph.toml");
    std::fs::write(
        &path,
        "[layout]\niterations = 25\nseed = 3\n\n[render]\ntitle = \"Ideas\"\n",
    )
    .unwrap();

    let config = AppConfig::load(Some(&path)).unwrap();
    assert_eq!(config.layout.iterations, 25);
    assert_eq!(config.layout.seed, Some(3));
    assert_eq!(config.scene_style().title, "Ideas");
}

#[test]
fn explicit_missing_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = AppConfig::load(Some(&dir.path().join("absent.toml")));
    assert!(matches!(result, Err(GraphError::IoError(_))));
}
