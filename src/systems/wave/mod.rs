//! Wave Stepper - advances the rotating fields by one fixed step
//!
//! Order within a step:
//! 1. re-anchor: the Dest field gets its window position from the tracker
//! 2. stencil: Dest <- f(PrePre, Pre) read through scroll offsets
//! 3. forcing: interaction items overwrite their cells in Dest
//! 4. rotate: Dest becomes Pre for the next step
//!
//! Steps are strictly sequential; only the cells inside a step run in parallel.

mod forcing;
mod stencil;

pub use forcing::{apply_interactions, forced_value, item_cell_range, ForcingParams};
pub use stencil::{apply_stencil, cell_update, StencilParams};

use tracing::trace;

use crate::domain::InteractionItem;
use crate::spatial::{WaveBufferSet, WaveField};

use super::anchor::{relative_offset, AnchorStep, AnchorTracker};

/// Everything one step needs besides the buffers
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepParams {
    /// Simulated time covered by this step (drives flow drift)
    pub delta_time: f32,
    pub wave_speed_squared: f32,
    pub decay: f32,
    /// World X the window should follow
    pub target_anchor: f32,
    /// World X of the surface centre
    pub surface_x: f32,
    pub spatial_scale: f32,
    pub interaction_multiplier: f32,
    pub horizontal_multiplier: f32,
    /// Panic on non-finite output (debug builds only)
    pub check_finite: bool,
}

/// What a step did, for render uniforms and logging
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepOutcome {
    pub anchor: AnchorStep,
    /// Window centre relative to the surface centre
    pub wave_position_local: f32,
}

/// Pure field update: stencil over `dest` then interaction forcing.
///
/// `dest` must already carry its `simulation_position`; the scroll offsets
/// of the two history fields are derived from it.
pub fn step_fields(
    pre_pre: &WaveField,
    pre: &WaveField,
    dest: &mut WaveField,
    params: &StepParams,
    forcing: &ForcingParams,
    items: &[InteractionItem],
) {
    let stencil = StencilParams {
        wave_speed_squared: params.wave_speed_squared,
        decay: params.decay,
        offset_pre_pre: relative_offset(pre_pre.simulation_position, dest.simulation_position),
        offset_pre: relative_offset(pre.simulation_position, dest.simulation_position),
    };

    let cells = dest.samples_mut();
    apply_stencil(pre_pre, pre, cells, &stencil);
    apply_interactions(cells, items, forcing);

    if params.check_finite {
        debug_assert_finite!(cells, "wave step");
    }
}

/// Stateless driver over a buffer set; the tracker carries the scroll rules
#[derive(Clone, Copy, Debug)]
pub struct WaveStepper {
    tracker: AnchorTracker,
}

impl WaveStepper {
    pub fn new(tracker: AnchorTracker) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &AnchorTracker {
        &self.tracker
    }

    /// Run one full step (anchor, stencil, forcing, rotate)
    pub fn step(&self, set: &mut WaveBufferSet, params: &StepParams, items: &[InteractionItem]) -> StepOutcome {
        let length = set.length();
        let (pre_pre, pre, dest) = set.stencil_mut();

        let anchor = self.tracker.next_anchor(
            params.target_anchor,
            pre.world_position,
            pre.simulation_position,
            params.delta_time,
        );
        dest.world_position = anchor.world_position;
        dest.simulation_position = anchor.simulation_position;

        let wave_position_local = anchor.world_position - params.surface_x;
        let forcing = ForcingParams {
            pixels_per_unit: self.tracker.pixels_per_unit(),
            spatial_scale: params.spatial_scale,
            wave_position_local,
            buffer_length: length,
            interaction_multiplier: params.interaction_multiplier,
            horizontal_multiplier: params.horizontal_multiplier,
        };

        step_fields(pre_pre, pre, dest, params, &forcing, items);

        trace!(
            delta_pixels = anchor.delta_pixels,
            simulation_position = anchor.simulation_position,
            items = items.len(),
            "wave step"
        );

        set.rotate();

        StepOutcome {
            anchor,
            wave_position_local,
        }
    }
}
