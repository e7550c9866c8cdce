//! Recompute scheduling and render-dirty flags.
//!
//! ```text
//! Idle ──request──▶ Recomputing ──pass done──▶ Dirty ──host consume──▶ Idle
//! ```
//!
//! The engine never polls for changes: the host calls `request_recompute`
//! when anything affecting the overlay changed, and consumes the flags after
//! uploading the new buffers.

/// Lifecycle phase of an overlay instance.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    /// A pass is scheduled (or running).
    Recomputing,
    /// A pass finished; its output waits for the host.
    Dirty,
}

/// Render-state staleness signals for the GPU submission stage.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct DirtyFlags {
    pub geometry: bool,
    pub material: bool,
}

impl DirtyFlags {
    #[inline]
    pub fn any(self) -> bool {
        self.geometry || self.material
    }
}

#[derive(Debug, Clone, Default)]
pub struct DirtyStateController {
    phase: Phase,
    flags: DirtyFlags,
}

impl DirtyStateController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn flags(&self) -> DirtyFlags {
        self.flags
    }

    /// Schedules a pass. Flags raised by an unconsumed pass stay raised.
    pub fn request_recompute(&mut self) {
        self.phase = Phase::Recomputing;
    }

    #[inline]
    pub fn needs_recompute(&self) -> bool {
        self.phase == Phase::Recomputing
    }

    pub(crate) fn begin_pass(&mut self) {
        self.phase = Phase::Recomputing;
    }

    /// Ends a pass. Both flags are raised whatever the pass produced.
    pub(crate) fn finish_pass(&mut self) {
        self.flags.geometry = true;
        self.flags.material = true;
        self.phase = Phase::Dirty;
    }

    /// Host side: takes the flags and returns to `Idle`.
    ///
    /// A pass requested after the last one finished keeps the controller in
    /// `Recomputing`.
    pub fn consume(&mut self) -> DirtyFlags {
        let flags = std::mem::take(&mut self.flags);
        if self.phase == Phase::Dirty {
            self.phase = Phase::Idle;
        }
        flags
    }
}
