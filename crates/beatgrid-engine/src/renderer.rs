//! The beat-grid pass.
//!
//! One pass reads the host view, counts the beats in the visible window,
//! allocates the vertex buffer at exactly `6 * count` vertices, and fills it
//! with one rectangle per beat while placing bar labels. Counting and filling
//! both walk [`BeatGrid::in_range`](crate::track::BeatGrid::in_range), so the
//! two traversals cannot disagree.

use crate::coords::Vec2;
use crate::dirty::{DirtyFlags, DirtyStateController, Phase};
use crate::geometry::{
    bar_label, Geometry, RgbaVertexUpdater, Tier, TierCounts, VERTICES_PER_RECT,
};
use crate::labels::{LabelOverlay, LabelPassSettings};
use crate::paint::Rgba;
use crate::theme::{BeatGridTheme, LabelConfig};
use crate::view::{to_frame_position, PositionKind, PositionMapper, WaveformView};

/// Nominal beat-line width before tier widening, logical px.
const LINE_WIDTH: f32 = 1.0;
/// Horizontal gap between a bar line and its label, logical px.
const LABEL_OFFSET_X: f32 = 4.0;

/// Why a pass produced no geometry without being an error.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SkipReason {
    NoTrack,
    /// Slip renderer while slip mode is off.
    SlipInactive,
    NoBeatGrid,
    /// Host overlay opacity is zero.
    OverlayHidden,
    NoSamples,
    InvalidWindow,
}

/// Result of one pass. Every variant leaves both dirty flags raised.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PassOutcome {
    Skipped(SkipReason),
    /// Beat color fully transparent: geometry and labels cleared.
    Empty,
    Drawn { beats: usize },
}

/// Resolved per-tier colors; the material state handed to the pipeline.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct TierPalette {
    pub phrase: Rgba,
    pub bar: Rgba,
    pub beat: Rgba,
}

impl TierPalette {
    /// Phrase and bar lines use fixed hues with the beat color's alpha.
    pub fn resolve(beat: Rgba) -> Self {
        Self {
            phrase: Rgba::RED.with_alpha(beat.a),
            bar: Rgba::YELLOW.with_alpha(beat.a),
            beat,
        }
    }

    #[inline]
    pub fn color(&self, tier: Tier) -> Rgba {
        match tier {
            Tier::Phrase => self.phrase,
            Tier::Bar => self.bar,
            Tier::Beat => self.beat,
        }
    }
}

/// Beat-grid overlay for one waveform position (play or slip).
#[derive(Debug)]
pub struct BeatGridRenderer {
    kind: PositionKind,
    beat_color: Rgba,
    label_config: LabelConfig,
    palette: TierPalette,
    geometry: Geometry,
    tiers: TierCounts,
    dirty: DirtyStateController,
}

impl BeatGridRenderer {
    /// `kind` is fixed for the renderer's lifetime.
    pub fn new(kind: PositionKind) -> Self {
        let theme = BeatGridTheme::default();
        Self {
            kind,
            beat_color: theme.beat_grid.beat_color,
            label_config: theme.labels,
            palette: TierPalette::default(),
            geometry: Geometry::new(),
            tiers: TierCounts::default(),
            dirty: DirtyStateController::new(),
        }
    }

    /// Applies theme colors and label sizing, and schedules a pass.
    pub fn setup(&mut self, theme: &BeatGridTheme) {
        self.beat_color = theme.beat_grid.beat_color;
        self.label_config = theme.labels.clone();
        self.dirty.request_recompute();
    }

    pub fn set_beat_color(&mut self, color: Rgba) {
        if self.beat_color != color {
            self.beat_color = color;
            self.dirty.request_recompute();
        }
    }

    #[inline]
    pub fn position_kind(&self) -> PositionKind {
        self.kind
    }

    #[inline]
    pub fn is_slip_renderer(&self) -> bool {
        self.kind == PositionKind::Slip
    }

    #[inline]
    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    /// Tier colors resolved by the last pass.
    #[inline]
    pub fn material(&self) -> &TierPalette {
        &self.palette
    }

    /// Lines per tier in the current geometry.
    #[inline]
    pub fn tier_counts(&self) -> TierCounts {
        self.tiers
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.dirty.phase()
    }

    #[inline]
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty.flags()
    }

    /// Host side: takes the dirty flags after uploading geometry/material.
    pub fn consume_dirty(&mut self) -> DirtyFlags {
        self.dirty.consume()
    }

    /// Schedules a pass; call on track swap, scroll/zoom, color or slip changes.
    pub fn request_recompute(&mut self) {
        self.dirty.request_recompute();
    }

    /// Runs a pass if one was requested.
    pub fn preprocess<V>(&mut self, view: &V, labels: &mut dyn LabelOverlay) -> Option<PassOutcome>
    where
        V: WaveformView + ?Sized,
    {
        if !self.dirty.needs_recompute() {
            return None;
        }
        Some(self.recompute(view, labels))
    }

    /// Runs one full pass unconditionally.
    pub fn recompute<V>(&mut self, view: &V, labels: &mut dyn LabelOverlay) -> PassOutcome
    where
        V: WaveformView + ?Sized,
    {
        self.dirty.begin_pass();
        self.tiers = TierCounts::default();
        let outcome = match self.build(view, labels) {
            Ok(outcome) => outcome,
            Err(reason) => {
                self.geometry.allocate(0);
                labels.clear();
                PassOutcome::Skipped(reason)
            }
        };
        self.dirty.finish_pass();
        outcome
    }

    fn build<V>(
        &mut self,
        view: &V,
        labels: &mut dyn LabelOverlay,
    ) -> Result<PassOutcome, SkipReason>
    where
        V: WaveformView + ?Sized,
    {
        let track = view.track().ok_or(SkipReason::NoTrack)?;
        if self.is_slip_renderer() && !view.is_slip_active() {
            return Err(SkipReason::SlipInactive);
        }
        let beats = track.beats().ok_or(SkipReason::NoBeatGrid)?;

        let mut color = self.beat_color;
        if let Some(percent) = view.beat_grid_alpha() {
            if percent == 0 {
                return Err(SkipReason::OverlayHidden);
            }
            color = color.with_alpha(f32::from(percent.min(100)) / 100.0);
        }
        self.palette = TierPalette::resolve(color);

        if color.is_transparent() {
            self.geometry.allocate(0);
            labels.clear();
            return Ok(PassOutcome::Empty);
        }

        let total_samples = track.total_samples();
        if total_samples.is_nan() || total_samples <= 0.0 {
            return Err(SkipReason::NoSamples);
        }

        let kind = self.kind;
        let start = to_frame_position(view.first_displayed_position(kind), total_samples)
            .ok_or(SkipReason::InvalidWindow)?;
        let end = to_frame_position(view.last_displayed_position(kind), total_samples)
            .ok_or(SkipReason::InvalidWindow)?;
        if end < start {
            return Err(SkipReason::InvalidWindow);
        }

        let mapper = PositionMapper::new(view.device_pixel_ratio());
        let breadth = view.breadth();
        let height = if self.is_slip_renderer() { breadth / 2.0 } else { breadth };

        let counted = beats.in_range(start, end).count();
        let reserved = counted * VERTICES_PER_RECT;
        self.geometry.allocate(reserved);

        labels.reset_for_pass(LabelPassSettings {
            font_size: self.label_config.font_size,
            max_height: (breadth * self.label_config.height_limit).round(),
            device_pixel_ratio: view.device_pixel_ratio(),
        });

        let palette = self.palette;
        let mut updater = RgbaVertexUpdater::new(self.geometry.vertex_data_mut());
        for beat in beats.in_range(start, end) {
            let x1 = mapper.to_screen_x(view, beat.position, kind);
            let x2 = x1 + LINE_WIDTH;

            let tier = Tier::classify(beat.index);
            self.tiers.record(tier);
            let w = tier.widening();
            updater.add_rectangle(
                Vec2::new(x1 - w, 0.0),
                Vec2::new(x2 + w, height),
                palette.color(tier).to_array(),
            );

            if let Some(bar) = bar_label(beat.index) {
                labels.place_label(Vec2::new(x1 + LABEL_OFFSET_X, 0.0), &bar.to_string());
            }
        }

        debug_assert_eq!(
            updater.index(),
            reserved,
            "beat grid: counted and filled vertex totals diverged"
        );

        Ok(PassOutcome::Drawn { beats: counted })
    }
}
