//! CPU-side vertex data for the overlay.
//!
//! Rectangles are emitted as two triangles of [`RgbaVertex`] into a buffer
//! that is allocated once per pass at its exact final size.

mod tier;
mod updater;
mod vertex;

pub use tier::{bar_label, Tier, TierCounts, BEATS_PER_BAR, BEATS_PER_PHRASE};
pub use updater::RgbaVertexUpdater;
pub use vertex::{Geometry, RgbaVertex, VERTICES_PER_RECT};
