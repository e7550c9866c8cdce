use bytemuck::{Pod, Zeroable};

/// Two triangles per rectangle.
pub const VERTICES_PER_RECT: usize = 6;

/// Position in logical pixels plus straight-alpha RGBA color.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct RgbaVertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

impl RgbaVertex {
    const ATTRS: [wgpu::VertexAttribute; 2] = wgpu::vertex_attr_array![
        0 => Float32x2, // pos
        1 => Float32x4  // color
    ];

    #[inline]
    pub const fn new(pos: [f32; 2], color: [f32; 4]) -> Self {
        Self { pos, color }
    }

    /// Vertex buffer layout matching this struct for a wgpu pipeline.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RgbaVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRS,
        }
    }
}

/// Flat vertex storage handed to the GPU submission stage.
#[derive(Debug, Default, Clone)]
pub struct Geometry {
    vertices: Vec<RgbaVertex>,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resizes to exactly `vertex_count` zeroed vertices.
    ///
    /// Shrinking releases the surplus so an empty pass leaves no stale data.
    pub fn allocate(&mut self, vertex_count: usize) {
        self.vertices.clear();
        self.vertices.resize(vertex_count, RgbaVertex::zeroed());
        self.vertices.shrink_to(vertex_count);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[RgbaVertex] {
        &self.vertices
    }

    #[inline]
    pub fn vertex_data_mut(&mut self) -> &mut [RgbaVertex] {
        &mut self.vertices
    }

    /// Raw bytes for `queue.write_buffer`.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_matches_struct() {
        let layout = RgbaVertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[1].offset, 8);
    }

    #[test]
    fn allocate_is_exact_and_zeroed() {
        let mut g = Geometry::new();
        g.allocate(12);
        assert_eq!(g.vertex_count(), 12);
        assert!(g.vertices().iter().all(|v| *v == RgbaVertex::default()));
        assert_eq!(g.as_bytes().len(), 12 * 24);

        g.allocate(0);
        assert!(g.is_empty());
    }
}
