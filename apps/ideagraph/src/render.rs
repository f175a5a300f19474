//! # Rendering Surfaces
//!
//! File-backed implementations of [`RenderSurface`].
//!
//! - [`HtmlSurface`] writes a self-contained page that draws the scene with
//!   Plotly `scatter3d` traces: one line trace for every relation, one
//!   marker+text trace for every concept. Rotating, zooming and hover are
//!   handled by the browser.
//! - [`JsonSurface`] writes the scene itself as pretty JSON.

use clap::ValueEnum;
use ideagraph_core::primitives::{
    EDGE_LINE_COLOR, EDGE_LINE_WIDTH, NODE_MARKER_SIZE, NODE_OUTLINE_COLOR, NODE_OUTLINE_WIDTH,
};
use ideagraph_core::{GraphError, RenderSurface, Scene};
use serde_json::{Value, json};
use std::path::{Path, PathBuf};

/// Plotly bundle loaded by the generated page.
const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Output format for `ideagraph render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum RenderFormat {
    /// Interactive Plotly page.
    #[default]
    Html,
    /// Raw scene as JSON.
    Json,
}

impl RenderFormat {
    /// Build the surface that writes this format to `path`.
    #[must_use]
    pub fn surface(self, path: &Path) -> Box<dyn RenderSurface> {
        match self {
            Self::Html => Box::new(HtmlSurface::new(path)),
            Self::Json => Box::new(JsonSurface::new(path)),
        }
    }
}

// =============================================================================
// PLOTLY FIGURE
// =============================================================================

/// The Plotly figure (`data` + `layout`) for a scene.
#[must_use]
pub fn plotly_figure(scene: &Scene) -> Value {
    let [edge_x, edge_y, edge_z] = scene.edge_polyline();

    let edges = json!({
        "type": "scatter3d",
        "mode": "lines",
        "x": edge_x,
        "y": edge_y,
        "z": edge_z,
        "line": { "color": EDGE_LINE_COLOR, "width": EDGE_LINE_WIDTH },
        "hoverinfo": "none",
        "showlegend": false,
    });

    let nodes = json!({
        "type": "scatter3d",
        "mode": "markers+text",
        "x": scene.nodes.iter().map(|n| n.position.x).collect::<Vec<_>>(),
        "y": scene.nodes.iter().map(|n| n.position.y).collect::<Vec<_>>(),
        "z": scene.nodes.iter().map(|n| n.position.z).collect::<Vec<_>>(),
        "marker": {
            "size": NODE_MARKER_SIZE,
            "color": scene.nodes.iter().map(|n| n.color.css()).collect::<Vec<_>>(),
            "line": { "width": NODE_OUTLINE_WIDTH, "color": NODE_OUTLINE_COLOR },
        },
        "text": scene.nodes.iter().map(|n| n.label.as_str()).collect::<Vec<_>>(),
        "textposition": "top center",
        "hovertext": scene.nodes.iter().map(|n| n.tooltip.as_str()).collect::<Vec<_>>(),
        "hoverinfo": "text",
        "showlegend": false,
    });

    json!({
        "data": [edges, nodes],
        "layout": {
            "title": { "text": scene.style.title },
            "scene": {
                "xaxis": { "title": { "text": "X" } },
                "yaxis": { "title": { "text": "Y" } },
                "zaxis": { "title": { "text": "Z" } },
                "aspectmode": "cube",
            },
            "width": scene.style.width,
            "height": scene.style.height,
        },
    })
}

/// A complete HTML document drawing the scene.
pub fn html_document(scene: &Scene) -> Result<String, GraphError> {
    let figure = serde_json::to_string(&plotly_figure(scene))
        .map_err(|e| GraphError::SerializationError(e.to_string()))?;
    // Keep "</script>" inside labels from closing the script element.
    let figure = figure.replace("</", "<\\/");

    Ok(format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="ideagraph"></div>
<script>
const figure = {figure};
Plotly.newPlot("ideagraph", figure.data, figure.layout);
</script>
</body>
</html>
"#,
        title = escape_html(&scene.style.title),
        cdn = PLOTLY_CDN,
        figure = figure,
    ))
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

fn write_file(path: &Path, data: &[u8]) -> Result<(), GraphError> {
    std::fs::write(path, data)
        .map_err(|e| GraphError::IoError(format!("Write '{}': {}", path.display(), e)))
}

// =============================================================================
// SURFACES
// =============================================================================

/// Writes the scene as an interactive HTML page.
#[derive(Debug, Clone)]
pub struct HtmlSurface {
    path: PathBuf,
}

impl HtmlSurface {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RenderSurface for HtmlSurface {
    fn present(&mut self, scene: &Scene) -> Result<(), GraphError> {
        let page = html_document(scene)?;
        write_file(&self.path, page.as_bytes())?;
        tracing::info!(
            nodes = scene.nodes.len(),
            edges = scene.edges.len(),
            "Rendered scene to {}",
            self.path.display()
        );
        Ok(())
    }
}

/// Writes the scene as pretty JSON.
#[derive(Debug, Clone)]
pub struct JsonSurface {
    path: PathBuf,
}

impl JsonSurface {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RenderSurface for JsonSurface {
    fn present(&mut self, scene: &Scene) -> Result<(), GraphError> {
        let data = serde_json::to_vec_pretty(scene)
            .map_err(|e| GraphError::SerializationError(e.to_string()))?;
        write_file(&self.path, &data)?;
        tracing::info!("Wrote scene JSON to {}", self.path.display());
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use ideagraph_core::{LayoutConfig, Session};

    fn abc_scene() -> Scene {
        let mut session =
            Session::new().with_layout_config(LayoutConfig::default().with_seed(5));
        session.add_node("A", None);
        session.add_node("B", Some("</script><b>bold</b>"));
        session.add_node("C", None);
        session.add_edge("A", "B", "links").expect("edge");
        session.build_scene().expect("scene")
    }

    #[test]
    fn figure_has_edge_and_node_traces() {
        let figure = plotly_figure(&abc_scene());
        let data = figure["data"].as_array().expect("data");

        assert_eq!(data.len(), 2);
        assert_eq!(data[0]["mode"], "lines");
        assert_eq!(data[0]["hoverinfo"], "none");
        // One segment: start, end, gap.
        assert_eq!(data[0]["x"].as_array().map(Vec::len), Some(3));
        assert!(data[0]["x"][2].is_null());

        assert_eq!(data[1]["mode"], "markers+text");
        assert_eq!(data[1]["textposition"], "top center");
        assert_eq!(data[1]["marker"]["size"], 10);
        assert_eq!(data[1]["marker"]["line"]["color"], "darkblue");
        assert_eq!(data[1]["text"][2], "C");
        assert_eq!(data[1]["marker"]["color"][2], "rgb(0, 100, 100)");
        assert_eq!(data[1]["marker"]["color"][0], "rgb(255, 100, 100)");
    }

    #[test]
    fn figure_layout() {
        let figure = plotly_figure(&abc_scene());
        let layout = &figure["layout"];

        assert_eq!(layout["title"]["text"], "Interactive 3D DSML Concept Graph");
        assert_eq!(layout["scene"]["aspectmode"], "cube");
        assert_eq!(layout["scene"]["zaxis"]["title"]["text"], "Z");
        assert_eq!(layout["width"], 800);
        assert_eq!(layout["height"], 600);
    }

    #[test]
    fn html_escapes_script_close() {
        let page = html_document(&abc_scene()).expect("html");

        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("Plotly.newPlot"));
        assert_eq!(page.matches("</script>").count(), 2);
    }

    #[test]
    fn title_is_escaped() {
        let mut scene = abc_scene();
        scene.style.title = "a < b".to_string();
        let page = html_document(&scene).expect("html");
        assert!(page.contains("<title>a &lt; b</title>"));
    }
}
