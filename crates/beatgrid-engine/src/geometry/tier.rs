pub const BEATS_PER_BAR: i64 = 4;
pub const BEATS_PER_PHRASE: i64 = 16;

/// Visual class of a beat, derived from its index alone.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Tier {
    /// First beat of a 16-beat phrase.
    Phrase,
    /// First beat of a bar.
    Bar,
    Beat,
}

impl Tier {
    /// `index % 16 == 0` is a phrase, else `index % 4 == 0` a bar.
    ///
    /// Negative indices classify the same way (`-16` is a phrase).
    #[inline]
    pub fn classify(index: i64) -> Self {
        if index % BEATS_PER_PHRASE == 0 {
            Tier::Phrase
        } else if index % BEATS_PER_BAR == 0 {
            Tier::Bar
        } else {
            Tier::Beat
        }
    }

    /// Extra width added on each side of the one-pixel beat line.
    #[inline]
    pub fn widening(self) -> f32 {
        match self {
            Tier::Phrase => 2.0,
            Tier::Bar => 1.0,
            Tier::Beat => 0.0,
        }
    }
}

/// Lines drawn per tier by one pass.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct TierCounts {
    pub phrase: usize,
    pub bar: usize,
    pub beat: usize,
}

impl TierCounts {
    #[inline]
    pub fn record(&mut self, tier: Tier) {
        match tier {
            Tier::Phrase => self.phrase += 1,
            Tier::Bar => self.bar += 1,
            Tier::Beat => self.beat += 1,
        }
    }

    #[inline]
    pub fn total(self) -> usize {
        self.phrase + self.bar + self.beat
    }
}

/// Bar number shown for `index`, if that beat starts a bar at or after frame 0.
#[inline]
pub fn bar_label(index: i64) -> Option<i64> {
    (index >= 0 && index % BEATS_PER_BAR == 0).then_some(index / BEATS_PER_BAR)
}
