//! Mesh Strip Builder - a quad strip whose top row follows the field
//!
//! Layout for `segments` quads:
//! - `(segments + 1) * 2` vertices; even = bottom edge (y = -0.5), odd = top
//! - `segments * 6` indices, quad `s` is `[b, b+1, b+3, b, b+3, b+2]`, `b = 2s`
//!
//! Geometry is rebuilt only when the segment count changes. Every other
//! tick only the top-row Y values are rewritten.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::debug;

use crate::spatial::WaveField;

/// Local Y of the fixed bottom edge
pub const BOTTOM_Y: f32 = -0.5;
/// Local Y of the undisturbed top edge
pub const REST_TOP_Y: f32 = 0.5;
/// Segment counts are always a multiple of this
pub const SEGMENT_GROUP: u32 = 4;

/// GPU-ready vertex: local position plus texture coordinate
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vertex {
    pub position: [f32; 2],
    pub texcoord: [f32; 2],
}

/// `max(1, floor(width * segments_per_unit) / 4) * 4`
pub fn segments_for_width(width: f32, segments_per_unit: f32) -> u32 {
    let raw = (width.abs() * segments_per_unit).floor();
    let groups = if raw.is_finite() && raw >= 0.0 {
        (raw.min(u32::MAX as f32) as u32) / SEGMENT_GROUP
    } else {
        0
    };
    groups.max(1).saturating_mul(SEGMENT_GROUP)
}

#[inline]
fn column_vertices(column: usize, segments: u32) -> [Vertex; 2] {
    let x = column as f32 / segments as f32;
    [
        Vertex {
            position: [x - 0.5, BOTTOM_Y],
            texcoord: [x, 0.0],
        },
        Vertex {
            position: [x - 0.5, REST_TOP_Y],
            texcoord: [x, 1.0],
        },
    ]
}

#[inline]
fn quad_indices(segment: usize) -> [u32; 6] {
    let b = segment as u32 * 2;
    [b, b + 1, b + 3, b, b + 3, b + 2]
}

/// Where the field window sits relative to the mesh
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldPlacement {
    /// Window centre minus surface centre (world units)
    pub wave_position_local: f32,
    pub pixels_per_unit: f32,
    /// World width the mesh spans
    pub surface_width: f32,
}

impl FieldPlacement {
    /// Field cell under mesh column `column`, or `None` outside the window
    #[inline]
    pub fn cell_for_column(&self, column: usize, segments: u32, length: usize) -> Option<usize> {
        let local_x = (column as f32 / segments as f32 - 0.5) * self.surface_width;
        let cell = ((local_x - self.wave_position_local) * self.pixels_per_unit + length as f32 * 0.5).floor();
        if cell >= 0.0 && cell < length as f32 {
            Some(cell as usize)
        } else {
            None
        }
    }
}

/// Vertex/index buffers of the water strip
#[derive(Debug, Default)]
pub struct MeshStrip {
    segments: u32,
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    rebuild_count: u64,
}

impl MeshStrip {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn segments(&self) -> u32 {
        self.segments
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// How many times geometry was actually regenerated
    pub fn rebuild_count(&self) -> u64 {
        self.rebuild_count
    }

    pub fn is_built(&self) -> bool {
        !self.vertices.is_empty()
    }

    /// Regenerate geometry for `segments` quads. Returns false (and touches
    /// nothing) when the strip already has that many.
    pub fn rebuild(&mut self, segments: u32) -> bool {
        let segments = segments.max(1);
        if self.is_built() && self.segments == segments {
            return false;
        }

        let columns = segments as usize + 1;
        self.vertices.resize(columns * 2, Vertex::default());
        self.indices.resize(segments as usize * 6, 0);

        #[cfg(feature = "parallel")]
        {
            self.vertices
                .par_chunks_mut(2)
                .enumerate()
                .for_each(|(c, pair)| pair.copy_from_slice(&column_vertices(c, segments)));
            self.indices
                .par_chunks_mut(6)
                .enumerate()
                .for_each(|(s, quad)| quad.copy_from_slice(&quad_indices(s)));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (c, pair) in self.vertices.chunks_mut(2).enumerate() {
                pair.copy_from_slice(&column_vertices(c, segments));
            }
            for (s, quad) in self.indices.chunks_mut(6).enumerate() {
                quad.copy_from_slice(&quad_indices(s));
            }
        }

        self.segments = segments;
        self.rebuild_count += 1;
        debug!(segments, vertices = self.vertices.len(), "mesh strip rebuilt");
        true
    }

    /// Stretch the whole field across the strip: column `c` samples cell
    /// `floor(c / segments * L)`, clamped to the last cell.
    pub fn refresh_heights(&mut self, field: &WaveField, height_scale: f32) {
        let segments = self.segments;
        let samples = field.samples();
        let length = samples.len();

        let top_y = |c: usize| -> f32 {
            if length == 0 || segments == 0 {
                return REST_TOP_Y;
            }
            let idx = ((c as f32 / segments as f32) * length as f32) as usize;
            let idx = idx.min(length - 1);
            REST_TOP_Y + *fast!(samples, [idx]) * height_scale
        };

        self.write_top_row(top_y);
    }

    /// World-aligned variant: each column samples the cell under its own
    /// X, so a window scrolling independently of the surface stays put.
    /// Columns outside the window rest at the undisturbed height.
    pub fn refresh_heights_anchored(&mut self, field: &WaveField, placement: &FieldPlacement, height_scale: f32) {
        let segments = self.segments;
        let samples = field.samples();
        let length = samples.len();

        let top_y = |c: usize| -> f32 {
            if segments == 0 {
                return REST_TOP_Y;
            }
            match placement.cell_for_column(c, segments, length) {
                Some(idx) => REST_TOP_Y + *fast!(samples, [idx]) * height_scale,
                None => REST_TOP_Y,
            }
        };

        self.write_top_row(top_y);
    }

    fn write_top_row<F>(&mut self, top_y: F)
    where
        F: Fn(usize) -> f32 + Sync + Send,
    {
        #[cfg(feature = "parallel")]
        {
            self.vertices
                .par_chunks_mut(2)
                .enumerate()
                .for_each(|(c, pair)| pair[1].position[1] = top_y(c));
        }

        #[cfg(not(feature = "parallel"))]
        {
            for (c, pair) in self.vertices.chunks_mut(2).enumerate() {
                pair[1].position[1] = top_y(c);
            }
        }
    }

    /// Drop the buffers; a later `rebuild` starts from scratch
    pub fn release(&mut self) {
        self.vertices = Vec::new();
        self.indices = Vec::new();
        self.segments = 0;
    }

    /// Vertex data as interleaved f32 (x, y, u, v) for JS
    pub fn vertex_ptr(&self) -> *const f32 {
        self.vertices.as_ptr() as *const f32
    }

    /// Number of f32 values behind `vertex_ptr`
    pub fn vertex_float_len(&self) -> usize {
        self.vertices.len() * 4
    }

    pub fn index_ptr(&self) -> *const u32 {
        self.indices.as_ptr()
    }
}
