//! Coordinate and geometry types shared by the overlay builders.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left of the waveform widget
//! - +X along the time axis, +Y down across the breadth

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
