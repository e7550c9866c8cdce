use core::iter::FusedIterator;

use super::FramePos;

/// Error returned when building a [`BeatGrid`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BeatGridError {
    #[error("beat {index} is not a finite position")]
    NonFinite { index: usize },
    #[error("beat {index} at {position} does not come after the previous beat")]
    NotIncreasing { index: usize, position: f64 },
    #[error("beat length must be finite and positive, got {0}")]
    BadBeatLength(f64),
    #[error("bpm and sample rate must be finite and positive (bpm {bpm}, rate {sample_rate})")]
    BadTempo { bpm: f64, sample_rate: f64 },
    #[error("grid would hold {count} beats, limit is {MAX_BEATS}")]
    TooManyBeats { count: f64 },
}

/// Upper bound on generated grids; about 15 hours at 300 bpm.
pub const MAX_BEATS: usize = 1 << 18;

/// Detected beat positions of a track, strictly increasing.
///
/// Beats may start before frame 0. Indices are counted from the first beat at
/// or after frame 0, so earlier beats have negative indices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BeatGrid {
    beats: Vec<FramePos>,
}

/// Result of [`BeatGrid::seek_from`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct BeatCursor {
    /// Position of the beat in the underlying slice.
    pub slot: usize,
    /// Musical index relative to the first beat at or after frame 0.
    pub index: i64,
}

/// One beat yielded by [`BeatsInRange`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct BeatInRange {
    pub position: FramePos,
    pub index: i64,
}

impl BeatGrid {
    /// Validates and wraps `beats`.
    pub fn new(beats: Vec<FramePos>) -> Result<Self, BeatGridError> {
        for (index, beat) in beats.iter().enumerate() {
            if !beat.is_valid() {
                return Err(BeatGridError::NonFinite { index });
            }
            if index > 0 && *beat <= beats[index - 1] {
                return Err(BeatGridError::NotIncreasing { index, position: beat.0 });
            }
        }
        Ok(Self { beats })
    }

    /// Constant-tempo grid: beats every `beat_length` samples from
    /// `first_beat` up to and including `end`.
    pub fn constant(
        first_beat: FramePos,
        beat_length: f64,
        end: FramePos,
    ) -> Result<Self, BeatGridError> {
        if !beat_length.is_finite() || beat_length <= 0.0 {
            return Err(BeatGridError::BadBeatLength(beat_length));
        }
        if !first_beat.is_valid() {
            return Err(BeatGridError::NonFinite { index: 0 });
        }
        if !end.is_valid() || end < first_beat {
            return Ok(Self::default());
        }

        let count = ((end.0 - first_beat.0) / beat_length).floor() + 1.0;
        if !count.is_finite() || count > MAX_BEATS as f64 {
            return Err(BeatGridError::TooManyBeats { count });
        }

        // Multiply instead of accumulating so long tracks do not drift.
        let beats = (0..count as usize)
            .map(|i| FramePos(first_beat.0 + i as f64 * beat_length))
            .collect();
        Self::new(beats)
    }

    /// Constant-tempo grid from a BPM value covering `[first_beat, total_samples]`.
    pub fn from_bpm(
        first_beat: FramePos,
        bpm: f64,
        sample_rate: f64,
        total_samples: f64,
    ) -> Result<Self, BeatGridError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(bpm) || !valid(sample_rate) {
            return Err(BeatGridError::BadTempo { bpm, sample_rate });
        }
        Self::constant(first_beat, sample_rate * 60.0 / bpm, FramePos(total_samples))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.beats.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.beats.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[FramePos] {
        &self.beats
    }

    /// Finds the first beat at or after `position` and its musical index.
    ///
    /// Both the slot and the index come from binary searches over the same
    /// sorted slice. If no beat follows `position`, `slot == len()`.
    pub fn seek_from(&self, position: FramePos) -> BeatCursor {
        let slot = self.beats.partition_point(|b| *b < position);
        let origin = self.beats.partition_point(|b| *b < FramePos::ZERO);
        BeatCursor {
            slot,
            index: slot as i64 - origin as i64,
        }
    }

    /// Beats in `[start, end]`, ascending.
    ///
    /// Each call re-seeks, so counting and filling passes see the same beats.
    pub fn in_range(&self, start: FramePos, end: FramePos) -> BeatsInRange<'_> {
        let cursor = self.seek_from(start);
        BeatsInRange {
            beats: &self.beats,
            slot: cursor.slot,
            index: cursor.index,
            end,
        }
    }
}

/// Iterator returned by [`BeatGrid::in_range`].
#[derive(Debug, Clone)]
pub struct BeatsInRange<'a> {
    beats: &'a [FramePos],
    slot: usize,
    index: i64,
    end: FramePos,
}

impl Iterator for BeatsInRange<'_> {
    type Item = BeatInRange;

    fn next(&mut self) -> Option<BeatInRange> {
        let position = *self.beats.get(self.slot)?;
        if position > self.end {
            // Park past the end so the iterator stays fused.
            self.slot = self.beats.len();
            return None;
        }
        let item = BeatInRange { position, index: self.index };
        self.slot += 1;
        self.index += 1;
        Some(item)
    }
}

impl FusedIterator for BeatsInRange<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(positions: &[f64]) -> BeatGrid {
        BeatGrid::new(positions.iter().copied().map(FramePos).collect()).unwrap()
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn new_rejects_unsorted() {
        let err = BeatGrid::new(vec![FramePos(0.0), FramePos(10.0), FramePos(10.0)]).unwrap_err();
        assert_eq!(err, BeatGridError::NotIncreasing { index: 2, position: 10.0 });
    }

    #[test]
    fn new_rejects_nan() {
        let err = BeatGrid::new(vec![FramePos(0.0), FramePos(f64::NAN)]).unwrap_err();
        assert_eq!(err, BeatGridError::NonFinite { index: 1 });
    }

    #[test]
    fn constant_includes_end() {
        let g = BeatGrid::constant(FramePos(100.0), 50.0, FramePos(300.0)).unwrap();
        let got: Vec<f64> = g.as_slice().iter().map(|b| b.0).collect();
        assert_eq!(got, vec![100.0, 150.0, 200.0, 250.0, 300.0]);
    }

    #[test]
    fn from_bpm_120_at_44100() {
        let g = BeatGrid::from_bpm(FramePos::ZERO, 120.0, 44_100.0, 44_100.0).unwrap();
        // 22050 samples per beat over one second: beats at 0 and 22050 and 44100.
        assert_eq!(g.len(), 3);
        assert_eq!(g.as_slice()[1], FramePos(22_050.0));
    }

    #[test]
    fn from_bpm_rejects_zero_bpm() {
        assert!(matches!(
            BeatGrid::from_bpm(FramePos::ZERO, 0.0, 44_100.0, 1000.0),
            Err(BeatGridError::BadTempo { .. })
        ));
    }

    #[test]
    fn constant_rejects_oversized_grid() {
        let err = BeatGrid::constant(FramePos::ZERO, 1e-300, FramePos(1e10)).unwrap_err();
        assert!(matches!(err, BeatGridError::TooManyBeats { .. }));

        let err = BeatGrid::constant(FramePos::ZERO, 1.0, FramePos(MAX_BEATS as f64)).unwrap_err();
        assert_eq!(err, BeatGridError::TooManyBeats { count: MAX_BEATS as f64 + 1.0 });
    }

    #[test]
    fn from_bpm_rejects_absurd_tempo() {
        assert!(matches!(
            BeatGrid::from_bpm(FramePos::ZERO, 1e300, 44_100.0, 44_100.0),
            Err(BeatGridError::TooManyBeats { .. })
        ));
    }

    #[test]
    fn constant_at_limit_is_accepted() {
        let g = BeatGrid::constant(FramePos::ZERO, 1.0, FramePos(MAX_BEATS as f64 - 1.0)).unwrap();
        assert_eq!(g.len(), MAX_BEATS);
    }

    // ── seek_from ─────────────────────────────────────────────────────────

    #[test]
    fn seek_lands_on_first_beat_at_or_after() {
        let g = grid(&[0.0, 10.0, 20.0, 30.0]);
        assert_eq!(g.seek_from(FramePos(10.0)), BeatCursor { slot: 1, index: 1 });
        assert_eq!(g.seek_from(FramePos(11.0)), BeatCursor { slot: 2, index: 2 });
    }

    #[test]
    fn seek_past_end_returns_len() {
        let g = grid(&[0.0, 10.0]);
        assert_eq!(g.seek_from(FramePos(99.0)).slot, 2);
    }

    #[test]
    fn seek_indices_negative_before_frame_zero() {
        let g = grid(&[-20.0, -10.0, 0.0, 10.0]);
        assert_eq!(g.seek_from(FramePos(-25.0)), BeatCursor { slot: 0, index: -2 });
        assert_eq!(g.seek_from(FramePos(0.0)).index, 0);
    }

    #[test]
    fn seek_index_relative_to_first_beat_after_zero() {
        // Grid starts late in the track: its first beat is index 0.
        let g = grid(&[500.0, 600.0, 700.0]);
        assert_eq!(g.seek_from(FramePos(650.0)), BeatCursor { slot: 2, index: 2 });
    }

    // ── in_range ──────────────────────────────────────────────────────────

    #[test]
    fn in_range_is_inclusive_and_ascending() {
        let g = grid(&[0.0, 10.0, 20.0, 30.0, 40.0]);
        let got: Vec<_> = g
            .in_range(FramePos(10.0), FramePos(30.0))
            .map(|b| (b.position.0, b.index))
            .collect();
        assert_eq!(got, vec![(10.0, 1), (20.0, 2), (30.0, 3)]);
    }

    #[test]
    fn in_range_empty_window() {
        let g = grid(&[0.0, 10.0, 20.0]);
        assert_eq!(g.in_range(FramePos(11.0), FramePos(19.0)).count(), 0);
    }

    #[test]
    fn in_range_repeats_identically() {
        let g = BeatGrid::constant(FramePos(-300.0), 37.5, FramePos(5000.0)).unwrap();
        let a: Vec<_> = g.in_range(FramePos(-100.0), FramePos(900.0)).collect();
        let b: Vec<_> = g.in_range(FramePos(-100.0), FramePos(900.0)).collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), g.in_range(FramePos(-100.0), FramePos(900.0)).count());
    }

    #[test]
    fn in_range_stays_fused() {
        let g = grid(&[0.0, 10.0, 20.0]);
        let mut it = g.in_range(FramePos(0.0), FramePos(5.0));
        assert!(it.next().is_some());
        assert!(it.next().is_none());
        assert!(it.next().is_none());
    }
}
