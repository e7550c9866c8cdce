use crate::track::FramePos;

use super::{PositionKind, WaveformView};

/// Converts a display fraction into a track position.
///
/// Returns `None` when `total_samples <= 0` or the product is not finite.
#[inline]
pub fn to_frame_position(fraction: f64, total_samples: f64) -> Option<FramePos> {
    if total_samples.is_nan() || total_samples <= 0.0 {
        return None;
    }
    let position = FramePos(fraction * total_samples);
    position.is_valid().then_some(position)
}

/// Maps track positions to screen x, snapped to the device-pixel grid.
///
/// Snapping removes sub-pixel shimmer while scrolling. Tier widening is
/// applied afterwards in whole logical pixels, so it is unaffected.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PositionMapper {
    device_pixel_ratio: f64,
}

impl PositionMapper {
    /// Non-finite or non-positive ratios fall back to `1.0`.
    pub fn new(device_pixel_ratio: f32) -> Self {
        let dpr = device_pixel_ratio as f64;
        Self {
            device_pixel_ratio: if dpr.is_finite() && dpr > 0.0 { dpr } else { 1.0 },
        }
    }

    #[inline]
    pub fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    /// `round(x * dpr) / dpr`
    #[inline]
    pub fn quantize(&self, x: f64) -> f64 {
        (x * self.device_pixel_ratio).round() / self.device_pixel_ratio
    }

    pub fn to_screen_x<V>(&self, view: &V, position: FramePos, kind: PositionKind) -> f32
    where
        V: WaveformView + ?Sized,
    {
        self.quantize(view.transform_position(position, kind)) as f32
    }
}

impl Default for PositionMapper {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── to_frame_position ─────────────────────────────────────────────────

    #[test]
    fn frame_position_scales_fraction() {
        assert_eq!(to_frame_position(0.25, 1000.0), Some(FramePos(250.0)));
    }

    #[test]
    fn frame_position_rejects_empty_track() {
        assert_eq!(to_frame_position(0.5, 0.0), None);
        assert_eq!(to_frame_position(0.5, -10.0), None);
        assert_eq!(to_frame_position(0.5, f64::NAN), None);
    }

    #[test]
    fn frame_position_rejects_non_finite_fraction() {
        assert_eq!(to_frame_position(f64::INFINITY, 1000.0), None);
        assert_eq!(to_frame_position(f64::NAN, 1000.0), None);
    }

    #[test]
    fn frame_position_allows_negative_fraction() {
        // Scrolled before the track start.
        assert_eq!(to_frame_position(-0.1, 1000.0), Some(FramePos(-100.0)));
    }

    // ── quantize ──────────────────────────────────────────────────────────

    #[test]
    fn quantize_to_half_pixels_at_dpr_2() {
        let m = PositionMapper::new(2.0);
        assert_eq!(m.quantize(10.3), 10.5);
        assert_eq!(m.quantize(10.2), 10.0);
    }

    #[test]
    fn quantize_is_idempotent() {
        for dpr in [1.0f32, 1.25, 1.5, 2.0, 3.0] {
            let m = PositionMapper::new(dpr);
            for i in 0..200 {
                let x = i as f64 * 0.137 - 7.0;
                let once = m.quantize(x);
                assert_eq!(m.quantize(once), once, "dpr {dpr} x {x}");
            }
        }
    }

    #[test]
    fn bad_ratio_falls_back_to_one() {
        assert_eq!(PositionMapper::new(0.0).device_pixel_ratio(), 1.0);
        assert_eq!(PositionMapper::new(f32::NAN).device_pixel_ratio(), 1.0);
        assert_eq!(PositionMapper::new(0.0).quantize(3.6), 4.0);
    }
}
