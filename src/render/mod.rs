//! Direct drawing-surface rendering.
//!
//! This module contains:
//! - The [`Surface`] abstraction over a sequential drawing engine
//! - Minimal-diff font-switch tracking ([`FontManager`])
//! - Greedy word-wrap layout with page-break prediction ([`LayoutRenderer`])
//!
//! It consumes [`crate::markdown::Segment`] values, either produced by the
//! inline parser or projected from validated paragraph spans; both paths
//! share the same data model.

mod font;
mod layout;

pub use font::{FontManager, FontState, FontStyle};
pub use layout::{spans_to_segments, LayoutConfig, LayoutRenderer};

/// A sequential drawing surface with a text-measurement primitive.
///
/// Modeled on the canvas interface of sequential-drawing engines: font
/// directives apply to all subsequent draw calls, so redundant directives
/// are both a performance cost and a correctness hazard. Measurement is a
/// pure query and may be called freely.
pub trait Surface {
    /// Set the active font size for subsequent draw calls.
    fn set_font_size(&mut self, size: f32);

    /// Set the active font face for subsequent draw calls.
    fn set_font(&mut self, family: &str, style: FontStyle);

    /// Draw `text` with the active font at the given position.
    fn draw_text(&mut self, x: f32, y: f32, text: &str);

    /// Measure the rendered width of `text` at the given font.
    fn measure_text(&self, text: &str, size: f32, style: FontStyle) -> f32;
}
