//! WaveField - one time step of the 1-D surface, as a flat f32 array
//!
//! Three fields rotate through the roles PrePre / Pre / Dest; only the
//! role table moves, cell data is never copied between steps.

mod buffers;
mod roles;

pub use buffers::WaveBuffers;
pub use roles::{BufferRole, WaveBufferSet, BUFFER_COUNT};

/// One height snapshot plus where its window sat when it was written
#[derive(Clone, Debug, PartialEq)]
pub struct WaveField {
    samples: Vec<f32>,
    /// World X the window was centred on
    pub world_position: f32,
    /// Cumulative scroll in whole cells since the simulation started
    pub simulation_position: i32,
}

impl WaveField {
    pub fn new(length: usize, world_position: f32) -> Self {
        Self {
            samples: vec![0.0; length],
            world_position,
            simulation_position: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    #[inline]
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.samples
    }

    /// Sample with zero outside the array (free boundary)
    #[inline]
    pub fn sample_or_zero(&self, idx: isize) -> f32 {
        if idx < 0 {
            return 0.0;
        }
        self.samples.get(idx as usize).copied().unwrap_or(0.0)
    }

    /// Sum of squared heights
    pub fn energy(&self) -> f64 {
        self.samples.iter().map(|&h| (h as f64) * (h as f64)).sum()
    }

    pub fn fill(&mut self, value: f32) {
        self.samples.fill(value);
    }

    /// Pointer to the samples (for JS texture upload)
    pub fn as_ptr(&self) -> *const f32 {
        self.samples.as_ptr()
    }

    pub(crate) fn release(&mut self) {
        self.samples = Vec::new();
    }
}
