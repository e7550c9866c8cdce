/// Sample-accurate position within a track.
#[derive(Debug, Copy, Clone, Default, PartialEq, PartialOrd)]
pub struct FramePos(pub f64);

impl FramePos {
    pub const ZERO: FramePos = FramePos(0.0);

    /// Finite positions are valid; NaN and infinities mark an invalid position.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.0.is_finite()
    }
}
