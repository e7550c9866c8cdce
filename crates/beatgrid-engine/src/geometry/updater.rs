use crate::coords::{Rect, Vec2};

use super::{RgbaVertex, VERTICES_PER_RECT};

/// Sequential writer over a preallocated vertex slice.
///
/// The caller sizes the slice up front; [`index`](Self::index) reports how
/// many vertices were written so the caller can check the two agree.
pub struct RgbaVertexUpdater<'a> {
    data: &'a mut [RgbaVertex],
    index: usize,
}

impl<'a> RgbaVertexUpdater<'a> {
    pub fn new(data: &'a mut [RgbaVertex]) -> Self {
        Self { data, index: 0 }
    }

    /// Appends the rectangle spanning the opposite corners `p0` and `p1`.
    ///
    /// # Panics
    /// Panics if the slice has fewer than six free vertices left.
    pub fn add_rectangle(&mut self, p0: Vec2, p1: Vec2, color: [f32; 4]) {
        debug_assert!(
            self.index + VERTICES_PER_RECT <= self.data.len(),
            "vertex buffer overrun: {} + {} > {}",
            self.index,
            VERTICES_PER_RECT,
            self.data.len()
        );

        let rect = Rect::from_corners(p0, p1);
        let (min, max) = (rect.min(), rect.max());
        let lt = [min.x, min.y];
        let rt = [max.x, min.y];
        let lb = [min.x, max.y];
        let rb = [max.x, max.y];

        let quad = [lt, rt, lb, lb, rt, rb].map(|pos| RgbaVertex::new(pos, color));
        self.data[self.index..self.index + VERTICES_PER_RECT].copy_from_slice(&quad);
        self.index += VERTICES_PER_RECT;
    }

    /// Number of vertices written so far.
    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }
}
