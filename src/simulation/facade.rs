use wasm_bindgen::prelude::*;

use crate::core::{Aabb, Vec2};
use crate::domain::{
    ActorHandle, ActorKind, IntrusionScene, LayerMask, NoiseMotion, SurfaceTransform, WaterConfig, WaterError,
};

use super::perf_stats::PerfStats;
use super::{FrameTime, SimulationStatus, WaterSurfaceCore};

fn js_error(err: WaterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen]
pub struct AbiLayout {
    field_ptr: u32,
    field_len_elements: u32,
    field_len_bytes: u32,
    vertex_ptr: u32,
    vertex_len_elements: u32,
    vertex_len_bytes: u32,
    index_ptr: u32,
    index_len_elements: u32,
    index_len_bytes: u32,
}

#[wasm_bindgen]
impl AbiLayout {
    #[wasm_bindgen(getter)]
    pub fn field_ptr(&self) -> u32 { self.field_ptr }
    #[wasm_bindgen(getter)]
    pub fn field_len_elements(&self) -> u32 { self.field_len_elements }
    #[wasm_bindgen(getter)]
    pub fn field_len_bytes(&self) -> u32 { self.field_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn vertex_ptr(&self) -> u32 { self.vertex_ptr }
    #[wasm_bindgen(getter)]
    pub fn vertex_len_elements(&self) -> u32 { self.vertex_len_elements }
    #[wasm_bindgen(getter)]
    pub fn vertex_len_bytes(&self) -> u32 { self.vertex_len_bytes }

    #[wasm_bindgen(getter)]
    pub fn index_ptr(&self) -> u32 { self.index_ptr }
    #[wasm_bindgen(getter)]
    pub fn index_len_elements(&self) -> u32 { self.index_len_elements }
    #[wasm_bindgen(getter)]
    pub fn index_len_bytes(&self) -> u32 { self.index_len_bytes }
}

/// JS handle: one water strip plus the actor scene it interacts with.
///
/// The host mirrors its bodies into the scene (add/update/remove) and
/// calls `advance` once per frame.
#[wasm_bindgen]
pub struct WaterSurface {
    core: WaterSurfaceCore,
    scene: IntrusionScene,
}

#[wasm_bindgen]
impl WaterSurface {
    /// Create from a camelCase JSON config; missing keys use defaults
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<WaterSurface, JsValue> {
        let core = WaterSurfaceCore::from_json(config_json).map_err(js_error)?;
        Ok(Self {
            core,
            scene: IntrusionScene::new(),
        })
    }

    #[wasm_bindgen(js_name = withDefaults)]
    pub fn with_defaults() -> Result<WaterSurface, JsValue> {
        let core = WaterSurfaceCore::new(WaterConfig::default()).map_err(js_error)?;
        Ok(Self {
            core,
            scene: IntrusionScene::new(),
        })
    }

    pub fn config_json(&self) -> String {
        self.core.config().to_json()
    }

    #[wasm_bindgen(getter)]
    pub fn buffer_length(&self) -> u32 { self.core.buffer_length() as u32 }

    #[wasm_bindgen(getter)]
    pub fn is_active(&self) -> bool { self.core.status() == SimulationStatus::Active }

    #[wasm_bindgen(getter)]
    pub fn total_steps(&self) -> u64 { self.core.total_steps() }

    /// Place the strip: centre (x, y), world width and height
    pub fn set_surface(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.core.set_surface(SurfaceTransform::new(x, y, width, height));
    }

    pub fn clear_surface(&mut self) {
        self.core.clear_surface();
    }

    /// Follow a world X (e.g. the camera)
    pub fn set_anchor_target(&mut self, x: f32) {
        self.core.set_anchor_target(Some(x));
    }

    /// Go back to following the surface centre
    pub fn clear_anchor_target(&mut self) {
        self.core.set_anchor_target(None);
    }

    // === SCENE API ===

    /// Add a rigid body; returns its id
    pub fn add_physics_actor(&mut self, cx: f32, cy: f32, w: f32, h: f32, vx: f32, vy: f32, layers: LayerMask) -> u32 {
        self.add_actor(ActorKind::PhysicsActor, cx, cy, w, h, vx, vy, layers)
    }

    /// Add a non-physical actor with a declared velocity; returns its id
    pub fn add_interaction_provider(
        &mut self,
        cx: f32,
        cy: f32,
        w: f32,
        h: f32,
        vx: f32,
        vy: f32,
        layers: LayerMask,
    ) -> u32 {
        self.add_actor(ActorKind::InteractionProvider(None), cx, cy, w, h, vx, vy, layers)
    }

    /// Add a provider that bobs with 1-D noise over scene time; returns its id
    pub fn add_noise_provider(
        &mut self,
        cx: f32,
        cy: f32,
        w: f32,
        h: f32,
        frequency: f32,
        amplitude: f32,
        layers: LayerMask,
    ) -> u32 {
        let motion = NoiseMotion { frequency, amplitude };
        self.add_actor(ActorKind::InteractionProvider(Some(motion)), cx, cy, w, h, 0.0, 0.0, layers)
    }

    pub fn update_actor(&mut self, id: u32, cx: f32, cy: f32, w: f32, h: f32, vx: f32, vy: f32) -> bool {
        self.scene.update_actor(
            ActorHandle(u64::from(id)),
            Aabb::from_center(cx, cy, w, h),
            Vec2::new(vx, vy),
        )
    }

    pub fn remove_actor(&mut self, id: u32) -> bool {
        self.scene.remove_actor(ActorHandle(u64::from(id)))
    }

    pub fn clear_actors(&mut self) {
        self.scene.clear();
    }

    pub fn actor_count(&self) -> usize {
        self.scene.actor_count()
    }

    pub fn set_scene_time(&mut self, time: f32) {
        self.scene.set_time(time);
    }

    // === SIMULATION ===

    /// Advance by `delta_time` seconds; returns the number of steps run
    pub fn advance(&mut self, delta_time: f32) -> Result<u32, JsValue> {
        let report = self
            .core
            .advance(delta_time, &self.scene, &self.scene)
            .map_err(js_error)?;
        Ok(report.steps)
    }

    /// Advance with the host's pause state; returns the number of steps run
    pub fn advance_frame(&mut self, delta: f32, unscaled_delta: f32, time_scale: f32) -> Result<u32, JsValue> {
        let frame = FrameTime {
            delta,
            unscaled_delta,
            time_scale,
        };
        let report = self
            .core
            .advance_frame(frame, &self.scene, &self.scene)
            .map_err(js_error)?;
        Ok(report.steps)
    }

    /// Free all buffers; errors if already released
    pub fn release(&mut self) -> Result<(), JsValue> {
        self.core.release().map_err(js_error)
    }

    // === RENDER HANDOFF ===

    /// Get pointer to the latest field (1-D texture data)
    pub fn field_ptr(&self) -> *const f32 {
        self.core.field_ptr()
    }

    pub fn field_len(&self) -> usize {
        self.core.field_len()
    }

    #[wasm_bindgen(getter)]
    pub fn wave_position_local(&self) -> f32 { self.core.render_uniforms().wave_position_local }

    #[wasm_bindgen(getter)]
    pub fn pixels_per_unit(&self) -> f32 { self.core.render_uniforms().pixels_per_unit }

    /// Interleaved (x, y, u, v) vertices
    pub fn vertex_ptr(&self) -> *const f32 {
        self.core.mesh().vertex_ptr()
    }

    pub fn vertex_len(&self) -> usize {
        self.core.mesh().vertex_float_len()
    }

    pub fn index_ptr(&self) -> *const u32 {
        self.core.mesh().index_ptr()
    }

    pub fn index_len(&self) -> usize {
        self.core.mesh().indices().len()
    }

    #[wasm_bindgen(getter)]
    pub fn mesh_segments(&self) -> u32 { self.core.mesh().segments() }

    pub fn abi_layout(&self) -> AbiLayout {
        let data = self.core.abi_layout_data();
        AbiLayout {
            field_ptr: data.field_ptr as u32,
            field_len_elements: data.field_len_elements as u32,
            field_len_bytes: data.field_len_bytes as u32,
            vertex_ptr: data.vertex_ptr as u32,
            vertex_len_elements: data.vertex_len_elements as u32,
            vertex_len_bytes: data.vertex_len_bytes as u32,
            index_ptr: data.index_ptr as u32,
            index_len_elements: data.index_len_elements as u32,
            index_len_bytes: data.index_len_bytes as u32,
        }
    }

    // === DEBUG ===

    /// Last tick's interaction items as a JSON array (gizmo drawing)
    pub fn interaction_items_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(self.core.interaction_items())
            .map_err(|e| js_error(WaterError::from(e)))
    }

    /// Enable or disable per-advance perf metrics (adds timing overhead when enabled)
    pub fn enable_perf_metrics(&mut self, enabled: bool) {
        self.core.enable_perf_metrics(enabled);
    }

    /// Get last advance perf snapshot (zeros when perf disabled)
    pub fn get_perf_stats(&self) -> PerfStats {
        self.core.get_perf_stats()
    }
}

impl WaterSurface {
    #[allow(clippy::too_many_arguments)]
    fn add_actor(
        &mut self,
        kind: ActorKind,
        cx: f32,
        cy: f32,
        w: f32,
        h: f32,
        vx: f32,
        vy: f32,
        layers: LayerMask,
    ) -> u32 {
        let handle = self
            .scene
            .add_actor(kind, Aabb::from_center(cx, cy, w, h), Vec2::new(vx, vy), layers);
        handle.0 as u32
    }
}
