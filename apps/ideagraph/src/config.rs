//! # Configuration
//!
//! Settings for layout and rendering, read from an optional TOML file.
//!
//! Precedence is CLI flag > file value > built-in default. A missing
//! `ideagraph.toml` in the working directory is not an error; a missing file
//! named explicitly with `--config` is.
//!
//! ```toml
//! [layout]
//! iterations = 50
//! seed = 42
//! scale = 1.0
//!
//! [render]
//! title = "Interactive 3D DSML Concept Graph"
//! width = 800
//! height = 600
//! output = "ideagraph.html"
//! ```

use ideagraph_core::{GraphError, LayoutConfig, SceneStyle};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "ideagraph.toml";

/// Where the HTML page is written when nothing else says otherwise.
pub const DEFAULT_RENDER_OUTPUT: &str = "ideagraph.html";

/// Maximum config file size (1 MB).
const MAX_CONFIG_FILE_SIZE: u64 = 1024 * 1024;

// =============================================================================
// FILE SCHEMA
// =============================================================================

/// `[render]` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Destination of the rendered page.
    pub output: PathBuf,
}

impl Default for RenderSettings {
    fn default() -> Self {
        let style = SceneStyle::default();
        Self {
            title: style.title,
            width: style.width,
            height: style.height,
            output: PathBuf::from(DEFAULT_RENDER_OUTPUT),
        }
    }
}

/// The whole config file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub layout: LayoutConfig,
    pub render: RenderSettings,
}

/// Per-invocation values from the command line.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub seed: Option<u64>,
    pub iterations: Option<usize>,
    pub output: Option<PathBuf>,
}

// =============================================================================
// LOADING
// =============================================================================

impl AppConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, GraphError> {
        let config: Self =
            toml::from_str(text).map_err(|e| GraphError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load the config for this invocation.
    ///
    /// With `explicit` set, that file must exist. Otherwise
    /// [`DEFAULT_CONFIG_FILE`] is read if present and defaults are used if not.
    pub fn load(explicit: Option<&Path>) -> Result<Self, GraphError> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !fallback.is_file() {
                    tracing::debug!("No {} found, using defaults", DEFAULT_CONFIG_FILE);
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let metadata = std::fs::metadata(&path).map_err(|e| {
            GraphError::IoError(format!("Cannot read config '{}': {}", path.display(), e))
        })?;
        if metadata.len() > MAX_CONFIG_FILE_SIZE {
            return Err(GraphError::InvalidConfig(format!(
                "Config file {} bytes exceeds maximum allowed {} bytes",
                metadata.len(),
                MAX_CONFIG_FILE_SIZE
            )));
        }

        let text = std::fs::read_to_string(&path)
            .map_err(|e| GraphError::IoError(format!("Read config: {}", e)))?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Apply command-line values on top of the file values.
    pub fn apply(mut self, overrides: Overrides) -> Result<Self, GraphError> {
        if let Some(seed) = overrides.seed {
            self.layout.seed = Some(seed);
        }
        if let Some(iterations) = overrides.iterations {
            self.layout.iterations = iterations;
        }
        if let Some(output) = overrides.output {
            self.render.output = output;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check every range the renderer depends on.
    pub fn validate(&self) -> Result<(), GraphError> {
        self.layout.validate()?;
        if self.render.width == 0 || self.render.height == 0 {
            return Err(GraphError::InvalidConfig(format!(
                "render size must be non-zero, got {}x{}",
                self.render.width, self.render.height
            )));
        }
        Ok(())
    }

    /// The scene style described by the `[render]` table.
    #[must_use]
    pub fn scene_style(&self) -> SceneStyle {
        SceneStyle {
            title: self.render.title.clone(),
            width: self.render.width,
            height: self.render.height,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_defaults() {
        let config = AppConfig::from_toml_str("").expect("parse");
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.render.output, PathBuf::from(DEFAULT_RENDER_OUTPUT));
    }

    #[test]
    fn partial_tables_keep_defaults() {
        let config = AppConfig::from_toml_str("[layout]\nseed = 9\n\n[render]\nwidth = 1024\n")
            .expect("parse");

        assert_eq!(config.layout.seed, Some(9));
        assert_eq!(config.layout.iterations, LayoutConfig::default().iterations);
        assert_eq!(config.render.width, 1024);
        assert_eq!(config.render.height, SceneStyle::default().height);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result = AppConfig::from_toml_str("[layout]\nseeed = 9\n");
        assert!(matches!(result, Err(GraphError::InvalidConfig(_))));
    }

    #[test]
    fn misspelled_layout_keys_rejected() {
        for text in ["[layout]\niteratons = 3\n", "[layout]\nscael = 2.0\n"] {
            let result = AppConfig::from_toml_str(text);
            assert!(
                matches!(result, Err(GraphError::InvalidConfig(_))),
                "accepted: {text}"
            );
        }
    }

    #[test]
    fn zero_width_rejected() {
        let result = AppConfig::from_toml_str("[render]\nwidth = 0\n");
        assert!(matches!(result, Err(GraphError::InvalidConfig(_))));
    }

    #[test]
    fn overrides_win_over_file() {
        let config = AppConfig::from_toml_str("[layout]\nseed = 1\niterations = 10\n")
            .expect("parse")
            .apply(Overrides {
                seed: Some(2),
                iterations: None,
                output: Some(PathBuf::from("out.html")),
            })
            .expect("apply");

        assert_eq!(config.layout.seed, Some(2));
        assert_eq!(config.layout.iterations, 10);
        assert_eq!(config.render.output, PathBuf::from("out.html"));
    }

    #[test]
    fn scene_style_follows_render_table() {
        let config =
            AppConfig::from_toml_str("[render]\ntitle = \"Mind map\"\n").expect("parse");
        let style = config.scene_style();
        assert_eq!(style.title, "Mind map");
        assert_eq!(style.width, SceneStyle::default().width);
    }
}
