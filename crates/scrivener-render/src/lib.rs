//! Rendering seams for Scrivener.
//!
//! This crate holds the types widgets share with whatever backend ends up
//! drawing them:
//!
//! - **Geometry and color**: [`Point`], [`Size`], [`Rect`], [`Color`]
//! - **Text measurement**: the [`TextMeasurer`] trait and a deterministic
//!   [`MonospaceMeasurer`]
//! - **Drawing**: the [`Renderer`] trait and a recording [`DisplayList`]

pub mod renderer;
pub mod text;
pub mod types;

pub use renderer::{DisplayList, DrawCommand, Renderer, Stroke, TextRun};
pub use text::{MonospaceMeasurer, TextMeasurer, TextStyle};
pub use types::{Color, Point, Rect, Size};
