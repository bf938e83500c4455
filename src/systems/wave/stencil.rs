//! Leapfrog finite-difference update of the 1-D wave equation
//!
//! dest[i] = (2*pre[i] - prePre[i] + c² * (pre[i-1] + pre[i+1] - 2*pre[i])) * decay
//!
//! Older fields are read through their scroll offset so all three line up
//! in the newest window. Anything outside an array reads as 0.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::spatial::WaveField;

/// Constants for one stencil pass
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StencilParams {
    pub wave_speed_squared: f32,
    pub decay: f32,
    /// `pre_pre.simulation_position - dest.simulation_position`
    pub offset_pre_pre: i32,
    /// `pre.simulation_position - dest.simulation_position`
    pub offset_pre: i32,
}

/// Per-cell kernel. Pure: depends only on the two history fields and `i`.
#[inline(always)]
pub fn cell_update(pre_pre: &WaveField, pre: &WaveField, i: usize, params: &StencilParams) -> f32 {
    let i = i as isize;
    let ip = i - params.offset_pre as isize;
    let ipp = i - params.offset_pre_pre as isize;

    let center = pre.sample_or_zero(ip);
    let left = pre.sample_or_zero(ip - 1);
    let right = pre.sample_or_zero(ip + 1);
    let previous = pre_pre.sample_or_zero(ipp);

    let next = 2.0 * center - previous + params.wave_speed_squared * (left + right - 2.0 * center);
    next * params.decay
}

/// Run the kernel over every cell of `dest`.
/// Parallel with Rayon when the feature is enabled; cells are independent.
pub fn apply_stencil(pre_pre: &WaveField, pre: &WaveField, dest: &mut [f32], params: &StencilParams) {
    #[cfg(feature = "parallel")]
    {
        dest.par_iter_mut()
            .enumerate()
            .for_each(|(i, d)| *d = cell_update(pre_pre, pre, i, params));
    }

    #[cfg(not(feature = "parallel"))]
    {
        for (i, d) in dest.iter_mut().enumerate() {
            *d = cell_update(pre_pre, pre, i, params);
        }
    }
}
