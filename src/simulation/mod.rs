//! Simulation - the per-instance water surface
//!
//! `WaterSurfaceCore` only orchestrates; the work lives in systems/:
//! - interaction collection (systems/interaction)
//! - wave stepping and re-anchoring (systems/wave, systems/anchor)
//! - mesh deformation (systems/mesh)
//!
//! Lifecycle: `new` validates the config, the first `advance` with a bound
//! surface allocates buffers and mesh, `release` frees them exactly once.

use crate::domain::{
    InteractionItem, IntrusionQuery, Result, SurfaceTransform, VelocityProvider, WaterConfig,
};
use crate::spatial::{WaveBufferSet, WaveBuffers, WaveField};
use crate::systems::{InteractionCollector, MeshStrip, WaveStepper};

#[path = "perf/perf_timer.rs"]
mod perf_timer;
#[path = "perf/perf_stats.rs"]
mod perf_stats;
#[path = "step/accumulator.rs"]
mod accumulator;
#[path = "step/step.rs"]
mod step;
#[path = "render/render_extract.rs"]
mod render_extract;
#[path = "init/init.rs"]
mod init;
#[path = "init/settings.rs"]
mod settings;
mod facade;

pub use accumulator::{StepAccumulator, StepBudget};
pub use facade::{AbiLayout, WaterSurface};
pub use perf_stats::PerfStats;
pub use render_extract::RenderUniforms;

use render_extract::AbiLayoutData;

/// Whether the last `advance` could simulate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SimulationStatus {
    /// No surface bound yet: nothing is allocated or stepped
    #[default]
    Unready,
    Active,
}

/// Host frame timing, as a game loop reports it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameTime {
    /// Scaled frame time
    pub delta: f32,
    /// Frame time ignoring the time scale
    pub unscaled_delta: f32,
    /// 0 while the host is paused
    pub time_scale: f32,
}

impl FrameTime {
    pub fn running(delta: f32) -> Self {
        Self {
            delta,
            unscaled_delta: delta,
            time_scale: 1.0,
        }
    }

    pub fn paused(unscaled_delta: f32) -> Self {
        Self {
            delta: 0.0,
            unscaled_delta,
            time_scale: 0.0,
        }
    }
}

/// What one `advance` did
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvanceReport {
    pub status: SimulationStatus,
    pub steps: u32,
    /// Backlog discarded by the steps-per-frame cap
    pub dropped_steps: u32,
    pub interactions: usize,
    /// Actors found beyond `max_interaction_items`
    pub dropped_interactions: usize,
    pub mesh_rebuilt: bool,
}

impl AdvanceReport {
    fn unready() -> Self {
        Self::default()
    }
}

/// One simulated water strip
pub struct WaterSurfaceCore {
    config: WaterConfig,
    buffer_length: usize,

    // Collaborator state
    surface: Option<SurfaceTransform>,
    anchor_target: Option<f32>,

    // Stages
    buffers: WaveBuffers,
    stepper: WaveStepper,
    collector: InteractionCollector,
    mesh: MeshStrip,
    accumulator: StepAccumulator,

    // Outputs
    uniforms: RenderUniforms,
    status: SimulationStatus,
    total_steps: u64,

    // Perf metrics
    perf_enabled: bool,
    perf_stats: PerfStats,
}

impl WaterSurfaceCore {
    /// Validate `config` and build an idle surface
    pub fn new(config: WaterConfig) -> Result<Self> {
        init::create_water_core(config)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(WaterConfig::from_json(json)?)
    }

    pub fn config(&self) -> &WaterConfig {
        &self.config
    }

    /// Cells per field
    pub fn buffer_length(&self) -> usize {
        self.buffer_length
    }

    pub fn status(&self) -> SimulationStatus {
        self.status
    }

    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Bind (or move) the strip in the world. Required before anything steps.
    pub fn set_surface(&mut self, surface: SurfaceTransform) {
        settings::set_surface(self, surface);
    }

    pub fn clear_surface(&mut self) {
        settings::clear_surface(self);
    }

    pub fn surface(&self) -> Option<&SurfaceTransform> {
        self.surface.as_ref()
    }

    /// World X the simulated window follows; `None` follows the surface centre
    pub fn set_anchor_target(&mut self, target: Option<f32>) {
        settings::set_anchor_target(self, target);
    }

    pub fn anchor_target(&self) -> Option<f32> {
        self.anchor_target
    }

    /// Feed `delta_time` seconds of host time through the accumulator
    pub fn advance(
        &mut self,
        delta_time: f32,
        query: &dyn IntrusionQuery,
        velocities: &dyn VelocityProvider,
    ) -> Result<AdvanceReport> {
        step::advance(self, delta_time, query, velocities)
    }

    /// `advance` with pause handling (see `FrameTime`)
    pub fn advance_frame(
        &mut self,
        frame: FrameTime,
        query: &dyn IntrusionQuery,
        velocities: &dyn VelocityProvider,
    ) -> Result<AdvanceReport> {
        step::advance_frame(self, frame, query, velocities)
    }

    /// Free buffers and mesh. A second call is an error with no effect.
    pub fn release(&mut self) -> Result<()> {
        self.buffers.release()?;
        self.mesh.release();
        self.accumulator.reset();
        Ok(())
    }

    pub fn is_released(&self) -> bool {
        self.buffers.is_released()
    }

    pub fn buffers(&self) -> Option<&WaveBufferSet> {
        self.buffers.get()
    }

    /// Direct access for seeding or editing the field between ticks
    pub fn buffers_mut(&mut self) -> Option<&mut WaveBufferSet> {
        self.buffers.get_mut()
    }

    /// Most recently completed field (what the renderer should show)
    pub fn latest_field(&self) -> Option<&WaveField> {
        self.buffers.get().map(|set| set.latest())
    }

    pub fn render_uniforms(&self) -> RenderUniforms {
        self.uniforms
    }

    pub fn mesh(&self) -> &MeshStrip {
        &self.mesh
    }

    /// Items collected on the last tick (debug view)
    pub fn interaction_items(&self) -> &[InteractionItem] {
        self.collector.items()
    }

    pub fn collector(&self) -> &InteractionCollector {
        &self.collector
    }

    pub fn stepper(&self) -> &WaveStepper {
        &self.stepper
    }

    /// Enable or disable per-advance perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        settings::enable_perf_metrics(self, enabled);
    }

    /// Get last advance perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        settings::get_perf_stats(self)
    }

    /// Get pointer to the latest field (for JS texture upload)
    pub fn field_ptr(&self) -> *const f32 {
        render_extract::field_ptr(self)
    }

    pub fn field_len(&self) -> usize {
        render_extract::field_len(self)
    }

    pub(crate) fn abi_layout_data(&self) -> AbiLayoutData {
        render_extract::abi_layout_data(self)
    }
}

#[cfg(test)]
#[path = "tests/tests.rs"]
mod tests;
