//! Spatial storage - the rotating wave fields

pub mod field;

pub use field::{BufferRole, WaveBufferSet, WaveBuffers, WaveField, BUFFER_COUNT};
