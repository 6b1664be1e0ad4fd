//! Editor configuration: snapping thresholds, minimum sizes, history depth.
//!
//! Defaults match the constants in [`crate::consts`]. A host can override any
//! of them through environment variables with [`EditorConfig::from_env`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use crate::consts::{
    DEFAULT_GRID_SIZE, HANDLE_RADIUS_PX, MAX_HISTORY_DEPTH, MIN_ELEMENT_HEIGHT, MIN_ELEMENT_WIDTH,
    ROTATE_HANDLE_OFFSET_PX, SNAP_THRESHOLD, SPACING_SNAP_THRESHOLD,
};

pub const ENV_GRID_SIZE: &str = "FORMCANVAS_GRID_SIZE";
pub const ENV_SNAP_THRESHOLD: &str = "FORMCANVAS_SNAP_THRESHOLD";
pub const ENV_SPACING_SNAP_THRESHOLD: &str = "FORMCANVAS_SPACING_SNAP_THRESHOLD";
pub const ENV_MIN_WIDTH: &str = "FORMCANVAS_MIN_WIDTH";
pub const ENV_MIN_HEIGHT: &str = "FORMCANVAS_MIN_HEIGHT";
pub const ENV_MAX_HISTORY: &str = "FORMCANVAS_MAX_HISTORY";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}: expected a positive integer, got '{value}'")]
    InvalidValue { var: &'static str, value: String },
}

/// Tunable editor parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorConfig {
    /// Grid cell size in document pixels. Always positive.
    pub grid_size: i32,
    /// Canvas-centre snap distance.
    pub snap_threshold: i32,
    /// Equal-spacing snap tolerance.
    pub spacing_snap_threshold: i32,
    pub min_width: i32,
    pub min_height: i32,
    /// Capacity of each history stack.
    pub max_history_depth: usize,
    /// Handle hit slop in screen pixels.
    pub handle_radius_px: f64,
    /// Rotate handle distance above the top edge in screen pixels.
    pub rotate_handle_offset_px: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            snap_threshold: SNAP_THRESHOLD,
            spacing_snap_threshold: SPACING_SNAP_THRESHOLD,
            min_width: MIN_ELEMENT_WIDTH,
            min_height: MIN_ELEMENT_HEIGHT,
            max_history_depth: MAX_HISTORY_DEPTH,
            handle_radius_px: HANDLE_RADIUS_PX,
            rotate_handle_offset_px: ROTATE_HANDLE_OFFSET_PX,
        }
    }
}

impl EditorConfig {
    /// Build config from environment variables, falling back to defaults.
    ///
    /// Optional:
    /// - `FORMCANVAS_GRID_SIZE`: default 8
    /// - `FORMCANVAS_SNAP_THRESHOLD`: default 5
    /// - `FORMCANVAS_SPACING_SNAP_THRESHOLD`: default 5
    /// - `FORMCANVAS_MIN_WIDTH`: default 50
    /// - `FORMCANVAS_MIN_HEIGHT`: default 30
    /// - `FORMCANVAS_MAX_HISTORY`: default 50
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Used by [`Self::from_env`]
    /// and by tests that must not touch the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let max_history = parse_positive(ENV_MAX_HISTORY, lookup(ENV_MAX_HISTORY))?;
        Ok(Self {
            grid_size: parse_positive(ENV_GRID_SIZE, lookup(ENV_GRID_SIZE))?.unwrap_or(defaults.grid_size),
            snap_threshold: parse_positive(ENV_SNAP_THRESHOLD, lookup(ENV_SNAP_THRESHOLD))?
                .unwrap_or(defaults.snap_threshold),
            spacing_snap_threshold: parse_positive(ENV_SPACING_SNAP_THRESHOLD, lookup(ENV_SPACING_SNAP_THRESHOLD))?
                .unwrap_or(defaults.spacing_snap_threshold),
            min_width: parse_positive(ENV_MIN_WIDTH, lookup(ENV_MIN_WIDTH))?.unwrap_or(defaults.min_width),
            min_height: parse_positive(ENV_MIN_HEIGHT, lookup(ENV_MIN_HEIGHT))?.unwrap_or(defaults.min_height),
            max_history_depth: max_history.map_or(defaults.max_history_depth, |n| n.unsigned_abs() as usize),
            ..defaults
        })
    }
}

fn parse_positive(var: &'static str, raw: Option<String>) -> Result<Option<i32>, ConfigError> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    match raw.trim().parse::<i32>() {
        Ok(n) if n > 0 => Ok(Some(n)),
        _ => Err(ConfigError::InvalidValue { var, value: raw }),
    }
}
