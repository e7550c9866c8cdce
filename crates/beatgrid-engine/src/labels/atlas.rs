use super::{GlyphBitmap, GlyphRasterizer};

const DIGITS: [char; 10] = ['0', '1', '2', '3', '4', '5', '6', '7', '8', '9'];
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas
const MAX_FIT_ATTEMPTS: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq)]
struct AtlasKey {
    font_size: f32,
    max_height: f32,
    device_pixel_ratio: f32,
}

/// Location of one digit in the atlas, physical pixels.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct DigitCell {
    pub x: u32,
    pub width: u32,
    pub xmin: i32,
    pub advance: f32,
}

/// Single-row R8 coverage texture holding the glyphs `0`-`9`.
///
/// Every glyph column spans the full atlas height with the glyph drawn on a
/// shared baseline, so a quad covering the column keeps digits aligned.
#[derive(Debug, Clone, Default)]
pub struct DigitAtlas {
    key: Option<AtlasKey>,
    width: u32,
    height: u32,
    coverage: Vec<u8>,
    cells: [DigitCell; 10],
    device_pixel_ratio: f32,
    generation: u64,
}

impl DigitAtlas {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn coverage(&self) -> &[u8] {
        &self.coverage
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bumped on every regeneration; hosts re-upload the texture when it changes.
    #[inline]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    /// Cell for an ASCII digit.
    pub fn cell(&self, digit: char) -> Option<DigitCell> {
        let d = digit.to_digit(10)?;
        Some(self.cells[d as usize])
    }

    /// Regenerates the texture if any parameter changed. Returns `true` if it did.
    ///
    /// `font_size` and `max_height` are logical pixels; the glyph size is
    /// reduced until the digits fit in `max_height` (ignored when `<= 0`).
    /// If they still do not fit, the texture is left empty.
    pub fn update<R>(
        &mut self,
        rasterizer: &R,
        font_size: f32,
        max_height: f32,
        device_pixel_ratio: f32,
    ) -> bool
    where
        R: GlyphRasterizer + ?Sized,
    {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let key = AtlasKey { font_size, max_height, device_pixel_ratio: dpr };
        if self.key == Some(key) {
            return false;
        }

        self.key = Some(key);
        self.device_pixel_ratio = dpr;
        self.generation = self.generation.wrapping_add(1);

        let mut px = font_size * dpr;
        if !px.is_finite() || px <= 0.0 {
            log::warn!("DigitAtlas: unusable font size {font_size}; labels disabled");
            self.clear_texture();
            return true;
        }

        let limit = max_height * dpr;
        let mut glyphs = rasterize_digits(rasterizer, px);
        for _ in 0..MAX_FIT_ATTEMPTS {
            let height = text_height(&glyphs);
            if limit <= 0.0 || height as f32 <= limit || px <= 1.0 {
                break;
            }
            px = (px * limit / height as f32).floor().max(1.0);
            glyphs = rasterize_digits(rasterizer, px);
        }

        let height = text_height(&glyphs);
        if limit > 0.0 && height as f32 > limit {
            log::warn!("DigitAtlas: digits {height}px tall exceed {limit}px; labels disabled");
            self.clear_texture();
            return true;
        }

        self.pack(&glyphs);
        true
    }

    fn clear_texture(&mut self) {
        self.width = 0;
        self.height = 0;
        self.coverage.clear();
        self.cells = [DigitCell::default(); 10];
    }

    fn pack(&mut self, glyphs: &[GlyphBitmap]) {
        let baseline = glyphs.iter().map(|g| g.height as i32 + g.ymin).max().unwrap_or(0);
        let height = text_height(glyphs);
        let width = glyphs
            .iter()
            .map(|g| g.width as u32 + GLYPH_PADDING)
            .sum::<u32>()
            + GLYPH_PADDING;

        self.width = width;
        self.height = height;
        self.coverage.clear();
        self.coverage.resize((width * height) as usize, 0);

        let mut x = GLYPH_PADDING;
        for (d, g) in glyphs.iter().enumerate() {
            let top = (baseline - (g.height as i32 + g.ymin)).max(0) as u32;
            for row in 0..g.height as u32 {
                let dst_y = top + row;
                if dst_y >= height {
                    break;
                }
                let src = row as usize * g.width;
                let dst = (dst_y * width + x) as usize;
                self.coverage[dst..dst + g.width].copy_from_slice(&g.coverage[src..src + g.width]);
            }
            self.cells[d] = DigitCell {
                x,
                width: g.width as u32,
                xmin: g.xmin,
                advance: g.advance,
            };
            x += g.width as u32 + GLYPH_PADDING;
        }
    }
}

fn rasterize_digits<R: GlyphRasterizer + ?Sized>(rasterizer: &R, px: f32) -> Vec<GlyphBitmap> {
    DIGITS.iter().map(|&c| rasterizer.rasterize(c, px)).collect()
}

/// Height of the tallest digit column once all digits share a baseline.
fn text_height(glyphs: &[GlyphBitmap]) -> u32 {
    let above = glyphs.iter().map(|g| g.height as i32 + g.ymin).max().unwrap_or(0);
    let below = glyphs.iter().map(|g| -g.ymin).max().unwrap_or(0).max(0);
    (above + below).max(0) as u32
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Solid blocks: digit `d` is `(d + 2)` wide and `px` tall, sitting on the baseline.
    pub(crate) struct BlockRasterizer;

    impl GlyphRasterizer for BlockRasterizer {
        fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap {
            let d = ch.to_digit(10).unwrap_or(0) as usize;
            let width = d + 2;
            let height = px.round() as usize;
            GlyphBitmap {
                width,
                height,
                xmin: 0,
                ymin: 0,
                advance: width as f32 + 1.0,
                coverage: vec![255; width * height],
            }
        }
    }

    #[test]
    fn packs_digits_left_to_right() {
        let mut atlas = DigitAtlas::new();
        assert!(atlas.update(&BlockRasterizer, 10.0, 0.0, 1.0));
        // widths 2..=11 sum to 65, plus 11 paddings.
        assert_eq!(atlas.width(), 76);
        assert_eq!(atlas.height(), 10);
        assert_eq!(atlas.cell('0').unwrap().x, 1);
        assert_eq!(atlas.cell('1').unwrap().x, 4);
        assert_eq!(atlas.cell('9').unwrap().width, 11);
        assert_eq!(atlas.coverage().len(), 760);
    }

    #[test]
    fn unchanged_key_skips_regeneration() {
        let mut atlas = DigitAtlas::new();
        assert!(atlas.update(&BlockRasterizer, 10.0, 20.0, 1.0));
        let generation = atlas.generation();
        assert!(!atlas.update(&BlockRasterizer, 10.0, 20.0, 1.0));
        assert_eq!(atlas.generation(), generation);
        assert!(atlas.update(&BlockRasterizer, 10.0, 20.0, 2.0));
        assert_eq!(atlas.generation(), generation + 1);
    }

    /// Ignores the requested size.
    struct FixedRasterizer(usize);

    impl GlyphRasterizer for FixedRasterizer {
        fn rasterize(&self, _ch: char, _px: f32) -> GlyphBitmap {
            GlyphBitmap {
                width: 3,
                height: self.0,
                xmin: 0,
                ymin: 0,
                advance: 4.0,
                coverage: vec![255; 3 * self.0],
            }
        }
    }

    #[test]
    fn glyphs_that_never_fit_leave_texture_empty() {
        let mut atlas = DigitAtlas::new();
        assert!(atlas.update(&FixedRasterizer(30), 24.0, 12.0, 1.0));
        assert!(atlas.is_empty());
        assert!(atlas.cell('5').is_some_and(|c| c.width == 0));

        // Without a limit the same glyphs pack normally.
        assert!(atlas.update(&FixedRasterizer(30), 24.0, 0.0, 1.0));
        assert_eq!(atlas.height(), 30);
    }

    #[test]
    fn height_limit_shrinks_glyphs() {
        let mut atlas = DigitAtlas::new();
        atlas.update(&BlockRasterizer, 24.0, 12.0, 1.0);
        assert_eq!(atlas.height(), 12);
    }

    #[test]
    fn device_pixel_ratio_scales_raster_size() {
        let mut atlas = DigitAtlas::new();
        atlas.update(&BlockRasterizer, 10.0, 40.0, 2.0);
        assert_eq!(atlas.height(), 20);
        assert_eq!(atlas.device_pixel_ratio(), 2.0);
    }

    #[test]
    fn zero_font_size_yields_empty_texture() {
        let mut atlas = DigitAtlas::new();
        assert!(atlas.update(&BlockRasterizer, 0.0, 40.0, 1.0));
        assert!(atlas.is_empty());
    }

    #[test]
    fn non_digits_have_no_cell() {
        let atlas = DigitAtlas::new();
        assert!(atlas.cell('x').is_none());
        assert!(atlas.cell('-').is_none());
    }
}
