//! Bar-number labels drawn next to bar and phrase lines.
//!
//! The host owns the overlay (it is a child of the waveform scene). A pass
//! borrows it as `&mut dyn LabelOverlay`, resets it, and places one label per
//! bar start. [`DigitLabels`] is the stock implementation: it keeps a small
//! texture with the glyphs `0`-`9` and turns each label into textured quads.

mod atlas;
mod overlay;
mod rasterizer;

pub use atlas::{DigitAtlas, DigitCell};
pub use overlay::{DigitLabels, Label, LabelQuad};
pub use rasterizer::{FontLoadError, FontRasterizer, GlyphBitmap, GlyphRasterizer};

use crate::coords::Vec2;

/// Per-pass label parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LabelPassSettings {
    /// Requested glyph size in logical pixels.
    pub font_size: f32,
    /// Maximum label height in logical pixels (whole pixels).
    pub max_height: f32,
    pub device_pixel_ratio: f32,
}

/// Label sink driven by the beat-grid pass.
pub trait LabelOverlay {
    /// Drops last pass's labels and prepares the texture cache.
    ///
    /// Any texture regeneration finishes before this returns.
    fn reset_for_pass(&mut self, settings: LabelPassSettings);

    /// Places `text` with its top-left corner at `origin`.
    fn place_label(&mut self, origin: Vec2, text: &str);

    /// Drops all placements without touching the texture cache.
    fn clear(&mut self);
}

#[cfg(test)]
pub(crate) use atlas::tests::BlockRasterizer;
