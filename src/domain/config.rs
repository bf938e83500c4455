use serde::{Deserialize, Serialize};
use tracing::warn;

use super::error::{Result, WaterError};
use super::interaction::LayerMask;

/// How `advance` turns frame time into simulation steps
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateMode {
    /// Accumulate frame time, run whole `fixed_time_step` steps, carry the rest
    #[default]
    Fixed,
    /// One step per call, as long as the frame's delta time
    Variable,
}

/// How mesh columns pick their field sample
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MeshSampling {
    /// Column `c` reads cell `c / segments * L`: the whole window is
    /// stretched over the mesh
    Stretch,
    /// Column reads the cell under its own world X; follows a scrolling window
    #[default]
    World,
}

/// Per-instance configuration, constant after construction.
///
/// Loaded from camelCase JSON; every missing key falls back to its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WaterConfig {
    /// Grid resolution: field cells per world unit
    pub wave_pixels_per_unit: f32,
    /// Width (world units) of the simulated window around the anchor
    pub max_surface_width: u32,
    /// Wave speed; the stencil uses c². Stable only for c² in (0, 1)
    pub c: f32,
    /// Per-step amplitude multiplier
    pub decay: f32,
    /// Footprint scale applied to interaction spans
    pub spatial_scale: f32,

    pub enable_interaction: bool,
    pub interaction_layers: LayerMask,
    pub max_interaction_items: usize,
    pub interaction_multiplier: f32,
    pub horizontal_interaction_multiplier: f32,

    pub update_mode: UpdateMode,
    pub fixed_time_step: f32,
    /// Backlog beyond this many steps in one `advance` is discarded
    pub max_steps_per_frame: u32,
    pub update_when_paused: bool,
    /// World units per second the wave content drifts
    pub flow_velocity: f32,

    pub mesh_segments_per_unit: f32,
    pub mesh_sampling: MeshSampling,
    /// Field height -> mesh local Y
    pub surface_height_scale: f32,

    /// Opt-in: assert every step produces finite samples (debug builds only)
    pub check_finite: bool,
}

impl Default for WaterConfig {
    fn default() -> Self {
        WaterConfig {
            wave_pixels_per_unit: 4.0,
            max_surface_width: 256,
            c: 0.1,
            decay: 0.998,
            spatial_scale: 1.0,
            enable_interaction: true,
            interaction_layers: 1,
            max_interaction_items: 16,
            interaction_multiplier: 0.2,
            horizontal_interaction_multiplier: 1.0,
            update_mode: UpdateMode::Fixed,
            fixed_time_step: 0.02,
            max_steps_per_frame: 8,
            update_when_paused: true,
            flow_velocity: 0.0,
            mesh_segments_per_unit: 16.0,
            mesh_sampling: MeshSampling::World,
            surface_height_scale: 1.0,
            check_finite: false,
        }
    }
}

impl WaterConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: WaterConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    #[inline]
    pub fn wave_speed_squared(&self) -> f32 {
        self.c * self.c
    }

    /// Number of field cells: `round(pixels_per_unit * max_surface_width)`
    pub fn buffer_length(&self) -> Result<usize> {
        let len = (self.wave_pixels_per_unit * self.max_surface_width as f32).round();
        if !len.is_finite() || len < 1.0 {
            return Err(WaterError::config(format!(
                "grid length {} from {} px/unit over {} units",
                len, self.wave_pixels_per_unit, self.max_surface_width
            )));
        }
        Ok(len as usize)
    }

    /// Reject anything that would later divide by zero or allocate nothing.
    ///
    /// `c` is deliberately not range-checked; an unstable value only warns.
    pub fn validate(&self) -> Result<()> {
        positive("wavePixelsPerUnit", self.wave_pixels_per_unit)?;
        positive("spatialScale", self.spatial_scale)?;
        positive("fixedTimeStep", self.fixed_time_step)?;
        positive("meshSegmentsPerUnit", self.mesh_segments_per_unit)?;

        if self.max_surface_width == 0 {
            return Err(WaterError::config("maxSurfaceWidth must be at least 1"));
        }
        if self.max_steps_per_frame == 0 {
            return Err(WaterError::config("maxStepsPerFrame must be at least 1"));
        }
        if !self.decay.is_finite() || !self.c.is_finite() {
            return Err(WaterError::config("c and decay must be finite"));
        }
        self.buffer_length()?;

        let c2 = self.wave_speed_squared();
        if c2 >= 1.0 {
            warn!(c2, "wave speed squared >= 1, the stencil will diverge");
        }
        Ok(())
    }
}

fn positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(WaterError::config(format!("{} must be > 0 (got {})", name, value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let config = WaterConfig::from_json("{}").expect("defaults are valid");
        assert_eq!(config, WaterConfig::default());
        assert_eq!(config.buffer_length(), Ok(1024));
    }

    #[test]
    fn camel_case_keys_override_defaults() {
        let config = WaterConfig::from_json(
            r#"{"wavePixelsPerUnit": 2.0, "maxSurfaceWidth": 64, "updateMode": "variable", "meshSampling": "stretch"}"#,
        )
        .expect("valid config");
        assert_eq!(config.buffer_length(), Ok(128));
        assert_eq!(config.update_mode, UpdateMode::Variable);
        assert_eq!(config.mesh_sampling, MeshSampling::Stretch);
    }

    #[test]
    fn zero_resolution_fails_fast() {
        let config = WaterConfig { wave_pixels_per_unit: 0.0, ..WaterConfig::default() };
        assert!(matches!(config.validate(), Err(WaterError::Config(_))));

        let config = WaterConfig { wave_pixels_per_unit: -3.0, ..WaterConfig::default() };
        assert!(matches!(config.validate(), Err(WaterError::Config(_))));
    }

    #[test]
    fn grid_that_rounds_to_zero_is_rejected() {
        let config = WaterConfig {
            wave_pixels_per_unit: 0.001,
            max_surface_width: 1,
            ..WaterConfig::default()
        };
        assert!(matches!(config.buffer_length(), Err(WaterError::Config(_))));
        assert!(config.validate().is_err());
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = WaterConfig::from_json("{ nope").unwrap_err();
        assert!(matches!(err, WaterError::Serialization(_)));
    }

    #[test]
    fn unstable_wave_speed_is_not_rejected() {
        let config = WaterConfig { c: 1.2, ..WaterConfig::default() };
        assert!(config.validate().is_ok());
        assert!(!config.check_finite);
    }

    #[test]
    fn json_round_trips_through_to_json() {
        let config = WaterConfig { flow_velocity: 1.5, ..WaterConfig::default() };
        let back = WaterConfig::from_json(&config.to_json()).expect("round trip");
        assert_eq!(back.flow_velocity, 1.5);
    }
}
