use crate::spatial::WaveField;
use crate::systems::FieldPlacement;

use super::WaterSurfaceCore;

/// Scalars the shading stage needs to sample the field texture
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RenderUniforms {
    /// Latest field's window centre minus the surface centre
    pub wave_position_local: f32,
    pub pixels_per_unit: f32,
    pub buffer_length: u32,
}

impl RenderUniforms {
    pub(crate) fn from_field(field: &WaveField, surface_x: f32, pixels_per_unit: f32) -> Self {
        Self {
            wave_position_local: field.world_position - surface_x,
            pixels_per_unit,
            buffer_length: field.len() as u32,
        }
    }

    pub(crate) fn placement(&self, surface_width: f32) -> FieldPlacement {
        FieldPlacement {
            wave_position_local: self.wave_position_local,
            pixels_per_unit: self.pixels_per_unit,
            surface_width,
        }
    }
}

pub(crate) struct AbiLayoutData {
    pub(crate) field_ptr: *const f32,
    pub(crate) field_len_elements: usize,
    pub(crate) field_len_bytes: usize,
    pub(crate) vertex_ptr: *const f32,
    pub(crate) vertex_len_elements: usize,
    pub(crate) vertex_len_bytes: usize,
    pub(crate) index_ptr: *const u32,
    pub(crate) index_len_elements: usize,
    pub(crate) index_len_bytes: usize,
}

pub(super) fn field_ptr(core: &WaterSurfaceCore) -> *const f32 {
    core.latest_field().map_or(std::ptr::null(), |f| f.as_ptr())
}

pub(super) fn field_len(core: &WaterSurfaceCore) -> usize {
    core.latest_field().map_or(0, |f| f.len())
}

pub(super) fn abi_layout_data(core: &WaterSurfaceCore) -> AbiLayoutData {
    let field_len_elements = field_len(core);
    let mesh = core.mesh();
    AbiLayoutData {
        field_ptr: field_ptr(core),
        field_len_elements,
        field_len_bytes: field_len_elements * std::mem::size_of::<f32>(),
        vertex_ptr: mesh.vertex_ptr(),
        vertex_len_elements: mesh.vertex_float_len(),
        vertex_len_bytes: mesh.vertex_float_len() * std::mem::size_of::<f32>(),
        index_ptr: mesh.index_ptr(),
        index_len_elements: mesh.indices().len(),
        index_len_bytes: mesh.indices().len() * std::mem::size_of::<u32>(),
    }
}
