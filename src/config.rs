//! Graph configuration.
//!
//! Every section is optional in the TOML file; missing values use the
//! defaults the renderer expects.
//!
//! ```toml
//! model_position = { x = 250.0, y = 25.0 }
//!
//! [metrics]
//! char_width = 7.5
//!
//! [layout_options]
//! "elk.direction" = "DOWN"
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info};
use serde::Deserialize;

use crate::error::Error;
use crate::ir::Position;
use crate::measure::TextMetrics;

/// File looked up in the working directory when no explicit path is given.
pub const LOCAL_CONFIG: &str = "dmmf-graph.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// Position of a model node the layout has no entry for.
    pub model_position: Position,
    /// Position of an enum node the layout has no entry for.
    pub enum_position: Position,
    pub metrics: TextMetrics,
    /// Passed through verbatim as the layout request's `layoutOptions`.
    pub layout_options: IndexMap<String, String>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        let layout_options = [
            ("elk.algorithm", "layered"),
            ("elk.direction", "RIGHT"),
            ("elk.spacing.nodeNode", "60"),
            ("elk.layered.spacing.nodeNodeBetweenLayers", "120"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();

        Self {
            model_position: Position::new(250.0, 25.0),
            enum_position: Position::new(0.0, 0.0),
            metrics: TextMetrics::default(),
            layout_options,
        }
    }
}

impl GraphConfig {
    pub fn from_toml(input: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(input)
    }
}

/// Load the configuration from `explicit_path`, else from [`LOCAL_CONFIG`]
/// if it exists, else use the defaults.
pub fn load_config(explicit_path: Option<&Path>) -> Result<GraphConfig, Error> {
    if let Some(path) = explicit_path {
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local = Path::new(LOCAL_CONFIG);
    if local.exists() {
        info!(path = local.display().to_string(); "Loading configuration from local path");
        return load_config_file(local);
    }

    debug!("No configuration file found, using default configuration");
    Ok(GraphConfig::default())
}

fn load_config_file(path: &Path) -> Result<GraphConfig, Error> {
    let content = fs::read_to_string(path)?;
    Ok(GraphConfig::from_toml(&content)?)
}
