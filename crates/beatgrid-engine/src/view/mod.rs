//! Host-side view state consumed by a pass.
//!
//! The waveform widget owns scroll, zoom and the position transform. A pass
//! reads them through [`WaveformView`] and never mutates them.

mod mapper;
mod scroll;

pub use mapper::{to_frame_position, PositionMapper};
pub use scroll::ScrollingView;

use crate::track::{FramePos, Track};

/// Which playback position a renderer follows.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash)]
pub enum PositionKind {
    #[default]
    Play,
    /// Secondary position shown while slip mode is engaged.
    Slip,
}

/// Read-only host view of the waveform widget.
pub trait WaveformView {
    /// The loaded track, if any.
    fn track(&self) -> Option<&dyn Track>;

    fn is_slip_active(&self) -> bool;

    /// Left edge of the visible window as a fraction of the track.
    fn first_displayed_position(&self, kind: PositionKind) -> f64;

    /// Right edge of the visible window as a fraction of the track.
    fn last_displayed_position(&self, kind: PositionKind) -> f64;

    /// Extent across the time axis (height for a horizontal waveform), logical px.
    fn breadth(&self) -> f32;

    fn device_pixel_ratio(&self) -> f32;

    /// Overlay opacity in percent (`0..=100`).
    ///
    /// Backends that compose the overlay opacity themselves return `None`,
    /// in which case the configured beat color is used as is.
    fn beat_grid_alpha(&self) -> Option<u8>;

    /// Maps a track position to a logical-pixel x coordinate.
    fn transform_position(&self, position: FramePos, kind: PositionKind) -> f64;
}
