/// Error returned by [`FontRasterizer::from_bytes`].
#[derive(Debug, Clone, thiserror::Error)]
#[error("font load error: {0}")]
pub struct FontLoadError(pub String);

/// Coverage bitmap of one glyph, in physical pixels.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GlyphBitmap {
    pub width: usize,
    pub height: usize,
    /// Left bearing from the pen position.
    pub xmin: i32,
    /// Offset of the bitmap bottom from the baseline (negative below it).
    pub ymin: i32,
    pub advance: f32,
    /// Row-major, `width * height` bytes.
    pub coverage: Vec<u8>,
}

/// Text rasterization service used to build label textures.
pub trait GlyphRasterizer {
    fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap;
}

impl<T: GlyphRasterizer + ?Sized> GlyphRasterizer for Box<T> {
    fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap {
        (**self).rasterize(ch, px)
    }
}

/// `fontdue`-backed rasterizer.
pub struct FontRasterizer {
    font: fontdue::Font,
}

impl FontRasterizer {
    /// Parses a TrueType or OpenType font from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        Ok(Self { font })
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, ch: char, px: f32) -> GlyphBitmap {
        let (metrics, coverage) = self.font.rasterize(ch, px);
        GlyphBitmap {
            width: metrics.width,
            height: metrics.height,
            xmin: metrics.xmin,
            ymin: metrics.ymin,
            advance: metrics.advance_width,
            coverage,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn garbage_bytes_fail_to_load() {
        let err = FontRasterizer::from_bytes(&[0u8; 16]).err().unwrap();
        assert!(err.to_string().starts_with("font load error"));
    }
}
