//! Systems - per-tick stages of the water surface
//!
//! collect interactions -> step waves (re-anchoring each step) -> refresh mesh

pub mod anchor;
pub mod interaction;
pub mod mesh;
pub mod wave;

pub use anchor::{relative_offset, AnchorStep, AnchorTracker};
pub use interaction::{CollectStats, InteractionCollector, QuerySpan};
pub use mesh::{segments_for_width, FieldPlacement, MeshStrip, Vertex};
pub use wave::{StepOutcome, StepParams, WaveStepper};
