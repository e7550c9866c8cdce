use std::ops::Range;

use crate::coords::{Rect, Vec2};

use super::{DigitAtlas, GlyphRasterizer, LabelOverlay, LabelPassSettings};

/// One placed label.
#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub origin: Vec2,
    pub text: String,
    /// Quads drawing this label, as a range into [`DigitLabels::quads`].
    pub quads: Range<usize>,
}

/// Textured quad sampling the digit atlas. `dst` is in logical pixels.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelQuad {
    pub dst: Rect,
    pub uv_min: [f32; 2],
    pub uv_max: [f32; 2],
}

/// Label overlay that draws decimal numbers from a [`DigitAtlas`].
pub struct DigitLabels<R> {
    rasterizer: R,
    atlas: DigitAtlas,
    labels: Vec<Label>,
    quads: Vec<LabelQuad>,
}

impl<R: GlyphRasterizer> DigitLabels<R> {
    pub fn new(rasterizer: R) -> Self {
        Self {
            rasterizer,
            atlas: DigitAtlas::new(),
            labels: Vec::new(),
            quads: Vec::new(),
        }
    }

    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    #[inline]
    pub fn quads(&self) -> &[LabelQuad] {
        &self.quads
    }

    #[inline]
    pub fn atlas(&self) -> &DigitAtlas {
        &self.atlas
    }

    fn push_digit_quads(&mut self, origin: Vec2, text: &str) {
        if self.atlas.is_empty() {
            return;
        }
        let dpr = self.atlas.device_pixel_ratio();
        let atlas_w = self.atlas.width() as f32;
        let atlas_h = self.atlas.height() as f32;

        let mut pen = 0.0f32;
        for ch in text.chars() {
            let Some(cell) = self.atlas.cell(ch) else { continue };
            let left = (pen + cell.xmin as f32) / dpr;
            self.quads.push(LabelQuad {
                dst: Rect::from_origin_size(
                    origin + Vec2::new(left, 0.0),
                    Vec2::new(cell.width as f32 / dpr, atlas_h / dpr),
                ),
                uv_min: [cell.x as f32 / atlas_w, 0.0],
                uv_max: [(cell.x + cell.width) as f32 / atlas_w, 1.0],
            });
            pen += cell.advance;
        }
    }
}

impl<R: GlyphRasterizer> LabelOverlay for DigitLabels<R> {
    fn reset_for_pass(&mut self, settings: LabelPassSettings) {
        self.clear();
        let regenerated = self.atlas.update(
            &self.rasterizer,
            settings.font_size,
            settings.max_height,
            settings.device_pixel_ratio,
        );
        if regenerated {
            log::debug!(
                "digit atlas regenerated: {}x{} px (font {}, limit {}, dpr {})",
                self.atlas.width(),
                self.atlas.height(),
                settings.font_size,
                settings.max_height,
                settings.device_pixel_ratio
            );
        }
    }

    fn place_label(&mut self, origin: Vec2, text: &str) {
        let first = self.quads.len();
        self.push_digit_quads(origin, text);
        self.labels.push(Label {
            origin,
            text: text.to_string(),
            quads: first..self.quads.len(),
        });
    }

    fn clear(&mut self) {
        self.labels.clear();
        self.quads.clear();
    }
}
