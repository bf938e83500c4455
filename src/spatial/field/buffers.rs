use tracing::info;

use crate::domain::{Result, WaterError};

use super::roles::WaveBufferSet;

/// Owner of the lazily-built buffer set.
///
/// Empty until the first tick calls `ensure_allocated`; `release` tears it
/// down exactly once.
#[derive(Debug, Default)]
pub struct WaveBuffers {
    set: Option<WaveBufferSet>,
    released: bool,
}

impl WaveBuffers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build three zeroed fields of `length` anchored at `anchor`, unless a
    /// set of that length already exists. Idempotent.
    pub fn ensure_allocated(&mut self, length: usize, anchor: f32) -> Result<&mut WaveBufferSet> {
        if self.released {
            return Err(WaterError::AlreadyReleased);
        }
        if length == 0 {
            return Err(WaterError::config("wave buffer length must be > 0"));
        }

        let sized = matches!(&self.set, Some(set) if set.length() == length);
        if !sized {
            info!(length, anchor, "allocating wave buffers");
            self.set = Some(WaveBufferSet::new(length, anchor));
        }

        self.set.as_mut().ok_or(WaterError::NotAllocated)
    }

    pub fn get(&self) -> Option<&WaveBufferSet> {
        self.set.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut WaveBufferSet> {
        self.set.as_mut()
    }

    pub fn is_allocated(&self) -> bool {
        self.set.is_some()
    }

    pub fn is_released(&self) -> bool {
        self.released
    }

    /// Free all backing storage. A second call is an error with no effect.
    pub fn release(&mut self) -> Result<()> {
        if self.released {
            return Err(WaterError::AlreadyReleased);
        }
        if let Some(mut set) = self.set.take() {
            info!(length = set.length(), "releasing wave buffers");
            set.release();
        }
        self.released = true;
        Ok(())
    }
}
