use tracing::info;

use crate::domain::{Result, WaterConfig};
use crate::systems::{AnchorTracker, InteractionCollector, MeshStrip, WaveStepper};
use crate::spatial::WaveBuffers;

use super::accumulator::StepAccumulator;
use super::perf_stats::PerfStats;
use super::{RenderUniforms, SimulationStatus, WaterSurfaceCore};

/// Validate `config` and wire up every stage. Buffers and mesh stay empty
/// until the first tick that has a surface to work on.
pub(super) fn create_water_core(config: WaterConfig) -> Result<WaterSurfaceCore> {
    config.validate()?;
    let buffer_length = config.buffer_length()?;

    info!(
        buffer_length,
        pixels_per_unit = config.wave_pixels_per_unit,
        max_surface_width = config.max_surface_width,
        "water surface configured"
    );

    Ok(WaterSurfaceCore {
        buffer_length,
        surface: None,
        anchor_target: None,
        buffers: WaveBuffers::new(),
        stepper: WaveStepper::new(AnchorTracker::new(config.wave_pixels_per_unit, config.flow_velocity)),
        collector: InteractionCollector::new(
            config.enable_interaction,
            config.interaction_layers,
            config.max_interaction_items,
        ),
        mesh: MeshStrip::new(),
        accumulator: StepAccumulator::new(config.update_mode, config.fixed_time_step, config.max_steps_per_frame),
        uniforms: RenderUniforms {
            pixels_per_unit: config.wave_pixels_per_unit,
            buffer_length: buffer_length as u32,
            ..RenderUniforms::default()
        },
        status: SimulationStatus::Unready,
        total_steps: 0,
        perf_enabled: false,
        perf_stats: PerfStats::default(),
        config,
    })
}
