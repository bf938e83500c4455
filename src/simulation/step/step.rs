use tracing::{trace, warn};

use crate::domain::{IntrusionQuery, MeshSampling, Result, VelocityProvider, WaterError};
use crate::systems::{segments_for_width, StepParams};

use super::perf_timer::{elapsed_or_zero, PerfTimer};
use super::settings::anchor_for;
use super::{AdvanceReport, FrameTime, RenderUniforms, SimulationStatus, WaterSurfaceCore};

/// One host tick: collect interactions, run the granted steps, refresh the mesh
pub(super) fn advance(
    core: &mut WaterSurfaceCore,
    delta_time: f32,
    query: &dyn IntrusionQuery,
    velocities: &dyn VelocityProvider,
) -> Result<AdvanceReport> {
    if core.buffers.is_released() {
        return Err(WaterError::AlreadyReleased);
    }

    let perf_on = core.perf_enabled;
    if perf_on {
        core.perf_stats.reset();
    }
    let advance_timer = PerfTimer::start_if(perf_on);

    let Some(surface) = core.surface else {
        if core.status == SimulationStatus::Active {
            warn!("surface unbound, stepping suspended");
        }
        core.status = SimulationStatus::Unready;
        return Ok(AdvanceReport::unready());
    };
    core.status = SimulationStatus::Active;

    let budget = core.accumulator.budget(delta_time);
    if budget.dropped > 0 {
        warn!(
            dropped = budget.dropped,
            cap = core.config.max_steps_per_frame,
            "step backlog over the per-frame cap discarded"
        );
    }

    let anchor = anchor_for(core, &surface);
    let config = &core.config;
    let set = core.buffers.ensure_allocated(core.buffer_length, anchor)?;

    // === INTERACTIONS ===
    let collect_timer = PerfTimer::start_if(perf_on);
    let items = core.collector.collect(
        &surface,
        anchor,
        config.max_surface_width as f32,
        query,
        velocities,
    );
    let collect_ms = elapsed_or_zero(collect_timer);

    // === WAVE STEPS ===
    let step_timer = PerfTimer::start_if(perf_on);
    let params = StepParams {
        delta_time: budget.step_length,
        wave_speed_squared: config.wave_speed_squared(),
        decay: config.decay,
        target_anchor: anchor,
        surface_x: surface.position.x,
        spatial_scale: config.spatial_scale,
        interaction_multiplier: config.interaction_multiplier,
        horizontal_multiplier: config.horizontal_interaction_multiplier,
        check_finite: config.check_finite,
    };
    for _ in 0..budget.steps {
        core.stepper.step(set, &params, items);
    }
    core.total_steps += u64::from(budget.steps);
    let step_ms = elapsed_or_zero(step_timer);
    let collect_stats = core.collector.stats();

    let latest = set.latest();
    core.uniforms = RenderUniforms::from_field(latest, surface.position.x, config.wave_pixels_per_unit);

    // === MESH ===
    let mesh_timer = PerfTimer::start_if(perf_on);
    let mesh_rebuilt = core
        .mesh
        .rebuild(segments_for_width(surface.width(), config.mesh_segments_per_unit));
    match config.mesh_sampling {
        MeshSampling::Stretch => core.mesh.refresh_heights(latest, config.surface_height_scale),
        MeshSampling::World => core.mesh.refresh_heights_anchored(
            latest,
            &core.uniforms.placement(surface.width()),
            config.surface_height_scale,
        ),
    }
    let mesh_ms = elapsed_or_zero(mesh_timer);

    if perf_on {
        let stats = &mut core.perf_stats;
        stats.collect_ms = collect_ms;
        stats.step_ms = step_ms;
        stats.mesh_ms = mesh_ms;
        stats.steps_run = budget.steps;
        stats.steps_dropped = budget.dropped;
        stats.interactions_kept = collect_stats.kept as u32;
        stats.interactions_dropped = collect_stats.dropped as u32;
        stats.buffer_length = core.buffer_length as u32;
        stats.mesh_segments = core.mesh.segments();
        stats.mesh_rebuilt = mesh_rebuilt;
        stats.field_energy = latest.energy();
        stats.memory_bytes = (core.buffer_length * 3 * std::mem::size_of::<f32>()
            + core.mesh.vertex_float_len() * std::mem::size_of::<f32>()
            + core.mesh.indices().len() * std::mem::size_of::<u32>()) as u32;
        stats.advance_ms = elapsed_or_zero(advance_timer);
    }

    trace!(
        steps = budget.steps,
        interactions = collect_stats.kept,
        total_steps = core.total_steps,
        "advance"
    );

    Ok(AdvanceReport {
        status: SimulationStatus::Active,
        steps: budget.steps,
        dropped_steps: budget.dropped,
        interactions: collect_stats.kept,
        dropped_interactions: collect_stats.dropped,
        mesh_rebuilt,
    })
}

/// Frame time to simulate for `frame`, or `None` when frozen.
///
/// A paused host (`time_scale == 0`) still animates the water with unscaled
/// time when `update_when_paused` is set.
pub(super) fn frame_delta(core: &WaterSurfaceCore, frame: &FrameTime) -> Option<f32> {
    if frame.time_scale > 0.0 {
        Some(frame.delta)
    } else if frame.time_scale == 0.0 && core.config.update_when_paused {
        Some(frame.unscaled_delta)
    } else {
        None
    }
}

pub(super) fn advance_frame(
    core: &mut WaterSurfaceCore,
    frame: FrameTime,
    query: &dyn IntrusionQuery,
    velocities: &dyn VelocityProvider,
) -> Result<AdvanceReport> {
    match frame_delta(core, &frame) {
        Some(delta) => advance(core, delta, query, velocities),
        None if core.buffers.is_released() => Err(WaterError::AlreadyReleased),
        None => Ok(AdvanceReport {
            status: core.status,
            ..AdvanceReport::default()
        }),
    }
}
