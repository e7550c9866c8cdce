//! Color model for overlay geometry.
//!
//! Vertex colors are straight (non-premultiplied) RGBA in `[0, 1]`; the
//! pipeline blends with `SrcAlpha / OneMinusSrcAlpha`.

pub mod color;

pub use color::{ColorParseError, Rgba};
