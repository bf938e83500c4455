use wasm_bindgen::prelude::*;

/// Snapshot of the last `advance` (all zeros while metrics are off)
#[wasm_bindgen]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PerfStats {
    pub(super) advance_ms: f64,
    pub(super) collect_ms: f64,
    pub(super) step_ms: f64,
    pub(super) mesh_ms: f64,
    pub(super) steps_run: u32,
    pub(super) steps_dropped: u32,
    pub(super) interactions_kept: u32,
    pub(super) interactions_dropped: u32,
    pub(super) buffer_length: u32,
    pub(super) mesh_segments: u32,
    pub(super) mesh_rebuilt: bool,
    pub(super) field_energy: f64,
    /// Bytes held by the three fields plus the mesh
    pub(super) memory_bytes: u32,
}

impl PerfStats {
    pub(crate) fn reset(&mut self) {
        *self = PerfStats::default();
    }
}

#[wasm_bindgen]
impl PerfStats {
    #[wasm_bindgen(getter)]
    pub fn advance_ms(&self) -> f64 { self.advance_ms }
    #[wasm_bindgen(getter)]
    pub fn collect_ms(&self) -> f64 { self.collect_ms }
    #[wasm_bindgen(getter)]
    pub fn step_ms(&self) -> f64 { self.step_ms }
    #[wasm_bindgen(getter)]
    pub fn mesh_ms(&self) -> f64 { self.mesh_ms }
    #[wasm_bindgen(getter)]
    pub fn steps_run(&self) -> u32 { self.steps_run }
    #[wasm_bindgen(getter)]
    pub fn steps_dropped(&self) -> u32 { self.steps_dropped }
    #[wasm_bindgen(getter)]
    pub fn interactions_kept(&self) -> u32 { self.interactions_kept }
    #[wasm_bindgen(getter)]
    pub fn interactions_dropped(&self) -> u32 { self.interactions_dropped }
    #[wasm_bindgen(getter)]
    pub fn buffer_length(&self) -> u32 { self.buffer_length }
    #[wasm_bindgen(getter)]
    pub fn mesh_segments(&self) -> u32 { self.mesh_segments }
    #[wasm_bindgen(getter)]
    pub fn mesh_rebuilt(&self) -> bool { self.mesh_rebuilt }
    #[wasm_bindgen(getter)]
    pub fn field_energy(&self) -> f64 { self.field_energy }
    #[wasm_bindgen(getter)]
    pub fn memory_bytes(&self) -> u32 { self.memory_bytes }
}
