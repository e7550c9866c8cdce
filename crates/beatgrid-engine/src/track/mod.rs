//! Track-side inputs: frame positions, the beat grid and the track seam.
//!
//! The engine never owns track data. A pass borrows a [`Track`] from the host
//! view and reads its [`BeatGrid`] through [`BeatGrid::in_range`].

mod beats;
mod frame_pos;

pub use beats::{BeatCursor, BeatGrid, BeatGridError, BeatInRange, BeatsInRange, MAX_BEATS};
pub use frame_pos::FramePos;

/// Read-only view of a loaded track.
pub trait Track {
    /// The detected beat grid, if analysis produced one.
    fn beats(&self) -> Option<&BeatGrid>;

    /// Length of the track in samples.
    fn total_samples(&self) -> f64;

    #[inline]
    fn has_beats(&self) -> bool {
        self.beats().is_some()
    }
}

/// Plain-data track: a sample count and an optional beat grid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedTrack {
    pub total_samples: f64,
    pub beats: Option<BeatGrid>,
}

impl LoadedTrack {
    pub fn new(total_samples: f64, beats: Option<BeatGrid>) -> Self {
        Self { total_samples, beats }
    }
}

impl Track for LoadedTrack {
    fn beats(&self) -> Option<&BeatGrid> {
        self.beats.as_ref()
    }

    fn total_samples(&self) -> f64 {
        self.total_samples
    }
}
