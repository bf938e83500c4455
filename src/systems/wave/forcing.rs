//! Interaction forcing - writes actor disturbances into the new field
//!
//! Each item's span is mapped to buffer cells; covered cells are *set*
//! (not accumulated) to a value driven by the actor's velocity, then
//! clamped by how far the actor reaches above/below the surface.

use std::ops::RangeInclusive;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::domain::InteractionItem;

/// Below this span width the vertical term would blow up
const MIN_SPAN_WIDTH: f32 = 1e-3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ForcingParams {
    pub pixels_per_unit: f32,
    pub spatial_scale: f32,
    /// Window centre relative to the surface centre
    pub wave_position_local: f32,
    pub buffer_length: usize,
    pub interaction_multiplier: f32,
    pub horizontal_multiplier: f32,
}

impl ForcingParams {
    /// Surface-local X -> fractional cell coordinate in the current window
    #[inline]
    pub fn cell_coordinate(&self, local_x: f32) -> f32 {
        (local_x - self.wave_position_local) * self.pixels_per_unit + self.buffer_length as f32 * 0.5
    }
}

/// Cells covered by `item`, clipped to the buffer. `None` if fully outside.
pub fn item_cell_range(item: &InteractionItem, params: &ForcingParams) -> Option<RangeInclusive<usize>> {
    if params.buffer_length == 0 {
        return None;
    }
    let half = item.width() * 0.5 * params.spatial_scale;
    let center = item.center();
    let lo = params.cell_coordinate(center - half).floor();
    let hi = params.cell_coordinate(center + half).floor();

    let last = (params.buffer_length - 1) as f32;
    if !lo.is_finite() || !hi.is_finite() || hi < 0.0 || lo > last {
        return None;
    }
    Some(lo.max(0.0) as usize..=hi.min(last) as usize)
}

/// Value written into cell `b` of an item whose centre cell is `center_cell`
#[inline]
pub fn forced_value(item: &InteractionItem, b: usize, center_cell: isize, params: &ForcingParams) -> f32 {
    let width = item.width().max(MIN_SPAN_WIDTH);
    let mut v = item.vertical_velocity * params.interaction_multiplier / width;

    let b = b as isize;
    let push = params.horizontal_multiplier * item.horizontal_velocity;
    if b < center_cell {
        // Trailing side is pulled down, leading side piles up
        v -= push;
    } else if b > center_cell {
        v += push;
    }

    let lo = -item.lower_extent.max(0.0) * 0.5;
    let hi = item.upper_extent.max(0.0) * 0.5;
    v.clamp(lo, hi)
}

/// Apply every item to `dest` in order; later items overwrite earlier ones
/// where spans overlap. Cells are parallel within one item.
pub fn apply_interactions(dest: &mut [f32], items: &[InteractionItem], params: &ForcingParams) {
    for item in items {
        let Some(range) = item_cell_range(item, params) else {
            continue;
        };
        let start = *range.start();
        let center_cell = params.cell_coordinate(item.center()).floor() as isize;
        let span = &mut dest[range];

        #[cfg(feature = "parallel")]
        {
            span.par_iter_mut()
                .enumerate()
                .for_each(|(k, cell)| *cell = forced_value(item, start + k, center_cell, params));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (k, cell) in span.iter_mut().enumerate() {
                *cell = forced_value(item, start + k, center_cell, params);
            }
        }
    }
}
