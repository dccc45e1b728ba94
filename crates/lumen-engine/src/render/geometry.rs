//! Static quad geometry.

use bytemuck::{Pod, Zeroable};

/// A 2D position in normalized device coordinates.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
}

impl Vertex {
    const ATTRS: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x2];

    pub const fn new(x: f32, y: f32) -> Self {
        Self { position: [x, y] }
    }

    /// Buffer layout: position at shader location 0.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Centered quad spanning half the viewport in each axis.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex::new(-0.5, -0.5),
    Vertex::new(0.5, -0.5),
    Vertex::new(0.5, 0.5),
    Vertex::new(-0.5, 0.5),
];

/// Two counter-clockwise triangles.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 2, 3, 0];

pub const QUAD_INDEX_FORMAT: wgpu::IndexFormat = wgpu::IndexFormat::Uint32;

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_area(a: Vertex, b: Vertex, c: Vertex) -> f32 {
        let [ax, ay] = a.position;
        let [bx, by] = b.position;
        let [cx, cy] = c.position;
        0.5 * ((bx - ax) * (cy - ay) - (cx - ax) * (by - ay))
    }

    #[test]
    fn indices_reference_existing_vertices() {
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn triangles_are_counter_clockwise() {
        for tri in QUAD_INDICES.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| QUAD_VERTICES[i as usize]);
            assert!(signed_area(a, b, c) > 0.0);
        }
    }

    #[test]
    fn triangles_cover_the_quad() {
        let area: f32 = QUAD_INDICES
            .chunks_exact(3)
            .map(|t| signed_area(
                QUAD_VERTICES[t[0] as usize],
                QUAD_VERTICES[t[1] as usize],
                QUAD_VERTICES[t[2] as usize],
            ))
            .sum();
        assert_eq!(area, 1.0);
    }

    #[test]
    fn vertex_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 8);
        assert_eq!(layout.attributes.len(), 1);
        assert_eq!(layout.attributes[0].shader_location, 0);
        assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&QUAD_VERTICES).len(), 32);
    }
}
