use crate::track::{FramePos, LoadedTrack, Track};

use super::{PositionKind, WaveformView};

/// Plain scrolling-waveform model with a centered play head.
///
/// Positions are fractions of the track. `visible_samples` is the zoom: how
/// many samples fit across `width` logical pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollingView {
    pub track: Option<LoadedTrack>,
    pub play_position: f64,
    pub slip_position: f64,
    pub slip_active: bool,
    pub visible_samples: f64,
    pub width: f32,
    pub breadth: f32,
    pub device_pixel_ratio: f32,
    pub beat_grid_alpha: Option<u8>,
}

impl Default for ScrollingView {
    fn default() -> Self {
        Self {
            track: None,
            play_position: 0.0,
            slip_position: 0.0,
            slip_active: false,
            visible_samples: 44_100.0 * 8.0,
            width: 1024.0,
            breadth: 120.0,
            device_pixel_ratio: 1.0,
            beat_grid_alpha: Some(100),
        }
    }
}

impl ScrollingView {
    pub fn new(track: LoadedTrack) -> Self {
        Self {
            track: Some(track),
            ..Self::default()
        }
    }

    fn total_samples(&self) -> f64 {
        self.track.as_ref().map_or(0.0, |t| t.total_samples)
    }

    fn position(&self, kind: PositionKind) -> f64 {
        match kind {
            PositionKind::Play => self.play_position,
            PositionKind::Slip => self.slip_position,
        }
    }

    fn half_span_fraction(&self) -> f64 {
        let total = self.total_samples();
        if total > 0.0 {
            self.visible_samples / total / 2.0
        } else {
            0.0
        }
    }

    /// Scrolls the play head by `samples`.
    pub fn advance(&mut self, samples: f64) {
        let total = self.total_samples();
        if total > 0.0 {
            self.play_position += samples / total;
            if !self.slip_active {
                self.slip_position = self.play_position;
            }
        }
    }
}

impl WaveformView for ScrollingView {
    fn track(&self) -> Option<&dyn Track> {
        self.track.as_ref().map(|t| t as &dyn Track)
    }

    fn is_slip_active(&self) -> bool {
        self.slip_active
    }

    fn first_displayed_position(&self, kind: PositionKind) -> f64 {
        self.position(kind) - self.half_span_fraction()
    }

    fn last_displayed_position(&self, kind: PositionKind) -> f64 {
        self.position(kind) + self.half_span_fraction()
    }

    fn breadth(&self) -> f32 {
        self.breadth
    }

    fn device_pixel_ratio(&self) -> f32 {
        self.device_pixel_ratio
    }

    fn beat_grid_alpha(&self) -> Option<u8> {
        self.beat_grid_alpha
    }

    fn transform_position(&self, position: FramePos, kind: PositionKind) -> f64 {
        if self.visible_samples <= 0.0 {
            return 0.0;
        }
        let first = self.first_displayed_position(kind) * self.total_samples();
        (position.0 - first) / self.visible_samples * self.width as f64
    }
}
