//! Chart configuration and its JSON persistence.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::animation::SpringConfig;
use crate::error::{ChartError, Result};
use crate::scale::Margin;

/// Tunables that stay fixed across renders.
///
/// | Field           | Default | Purpose |
/// |-----------------|---------|---------|
/// | `margin`        | 20/20/45/60 | Room for axes and captions |
/// | `aspect_ratio`  | 1.0     | Outer height = width × ratio |
/// | `tick_count`    | 10      | Approximate ticks per axis |
/// | `marker_radius` | 7.5     | Point marker radius in points |
/// | `spring`        | critically damped, k = 170 | Shared interpolation profile |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub margin: Margin,
    pub aspect_ratio: f64,
    pub tick_count: usize,
    pub marker_radius: f32,
    pub spring: SpringConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            aspect_ratio: 1.0,
            tick_count: 10,
            marker_radius: 7.5,
            spring: SpringConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Serialize as pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn save_json(&self, path: &Path) -> Result<()> {
        let txt = self.to_json()?;
        std::fs::write(path, txt).map_err(|e| ChartError::config_io(path, e))
    }

    pub fn load_json(path: &Path) -> Result<Self> {
        let txt = std::fs::read_to_string(path).map_err(|e| ChartError::config_io(path, e))?;
        Self::from_json(&txt)
    }
}
