//! Beat-grid overlay engine.
//!
//! Turns a track's beat timeline and the visible part of a scrolling waveform
//! into a tightly packed batch of colored rectangles (one per visible beat)
//! plus bar-number labels, ready to be uploaded to a wgpu pipeline.
//!
//! The host owns the track, the scroll/zoom state and the label overlay. The
//! engine only decides what to draw once asked, see [`BeatGridRenderer`].

pub mod coords;
pub mod dirty;
pub mod geometry;
pub mod labels;
pub mod logging;
pub mod paint;
pub mod renderer;
pub mod theme;
pub mod track;
pub mod view;

pub use renderer::{BeatGridRenderer, PassOutcome, SkipReason};
