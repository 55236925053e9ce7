// Panel configuration

use crate::assets::AssetRoot;
use crate::panzoom::PanZoomOptions;
use crate::surface::ImageSize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = "mapview.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Ids of the elements the panel is wired to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub map_container: String,
    pub map: String,
    pub parent_map: String,
    pub informatic: String,
    pub informatic_window: String,
    pub edit_button: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            map_container: "map-container".to_string(),
            map: "map".to_string(),
            parent_map: "parent_map".to_string(),
            informatic: "informatic".to_string(),
            informatic_window: "informatic_window".to_string(),
            edit_button: "edit_content_button".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub asset_root: AssetRoot,
    /// Map opened when the panel starts.
    pub root_map: String,
    pub marker_size_px: u32,
    pub container: ImageSize,
    pub zoom: PanZoomOptions,
    pub elements: ElementIds,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            asset_root: AssetRoot::default(),
            root_map: "0".to_string(),
            marker_size_px: 60,
            container: ImageSize::new(1280.0, 720.0),
            zoom: PanZoomOptions::default(),
            elements: ElementIds::default(),
        }
    }
}

impl PanelConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.zoom
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("zoom: {}", e)))?;
        let ImageSize { width, height } = self.container;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "container size {}x{} is not a positive size",
                width, height
            )));
        }
        Ok(())
    }

    /// Load `mapview.json` from `dir` if present, defaults otherwise.
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let path = dir.join(CONFIG_FILE);
        if path.exists() {
            Self::load(&path)
        } else {
            Ok(Self::default())
        }
    }
}
