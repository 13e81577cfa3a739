use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub canvas: Canvas,
    pub layout: LayoutConfig,
    pub seed: Option<u64>,
}

impl ChartConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("invalid chart config in {}", path.display()))
    }
}

/// World-space extent of the chart. Mode targets and title labels are laid out
/// against `width`/`height`; new nodes spawn inside `spawn_width` x `spawn_height`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
    pub spawn_width: f32,
    pub spawn_height: f32,
}

impl Canvas {
    pub fn center_x(self) -> f32 {
        self.width / 2.0
    }

    pub fn center_y(self) -> f32 {
        self.height / 2.0
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1440.0,
            height: 425.0,
            spawn_width: 900.0,
            spawn_height: 800.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub force_strength: f32,
    pub velocity_decay: f32,
    pub alpha_min: f32,
    pub alpha_decay: f32,
    /// Barnes-Hut opening angle. Zero or below computes every pair exactly.
    pub theta: f32,
    pub distance_min: f32,
    pub max_speed: f32,
    pub ticks_per_second: f32,
    pub max_ticks_per_advance: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let alpha_min = 0.001_f32;
        Self {
            force_strength: 0.03,
            velocity_decay: 0.2,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            theta: 0.9,
            distance_min: 1.0,
            max_speed: 64.0,
            ticks_per_second: 60.0,
            max_ticks_per_advance: 8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config: ChartConfig =
            serde_json::from_str(r#"{"canvas": {"width": 960}, "layout": {"theta": 0}, "seed": 4}"#)
                .expect("config parses");

        assert_eq!(config.canvas.width, 960.0);
        assert_eq!(config.canvas.height, 425.0);
        assert_eq!(config.layout.theta, 0.0);
        assert_eq!(config.layout.force_strength, 0.03);
        assert_eq!(config.seed, Some(4));
    }

    #[test]
    fn default_alpha_decay_reaches_alpha_min_in_about_300_ticks() {
        let layout = LayoutConfig::default();
        let mut alpha = 1.0_f32;
        let mut ticks = 0;
        while alpha >= layout.alpha_min {
            alpha += (0.0 - alpha) * layout.alpha_decay;
            ticks += 1;
        }
        assert!((295..=305).contains(&ticks), "settled after {ticks} ticks");
    }
}
