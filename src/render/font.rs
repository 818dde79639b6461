//! Font-state tracking for a drawing surface.
//!
//! Sequential-drawing engines treat font directives as mutable global
//! state, so re-issuing the same directive before every text fragment is
//! wasted work at best. [`FontManager`] remembers the last applied
//! (family, size, style) triple and skips the surface calls entirely when
//! nothing changed. The manager is owned per rendering session, never
//! shared between documents.

use super::Surface;

/// Font style selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Normal,
    Bold,
    Italic,
    BoldItalic,
}

impl FontStyle {
    /// Derive a style from bold/italic flags.
    pub fn from_flags(bold: bool, italic: bool) -> Self {
        match (bold, italic) {
            (false, false) => Self::Normal,
            (true, false) => Self::Bold,
            (false, true) => Self::Italic,
            (true, true) => Self::BoldItalic,
        }
    }
}

/// The (family, size, style) triple currently applied to a surface.
#[derive(Debug, Clone, PartialEq)]
pub struct FontState {
    pub family: String,
    pub size: f32,
    pub style: FontStyle,
}

/// Minimal-diff font switching for one rendering session.
#[derive(Debug, Clone)]
pub struct FontManager {
    current: FontState,
    default: FontState,
}

impl FontManager {
    /// Create a manager with a fixed family and default size.
    ///
    /// The initial state is the default triple; the first `set_font` call
    /// that differs from it will hit the surface.
    pub fn new(family: impl Into<String>, default_size: f32) -> Self {
        let default = FontState {
            family: family.into(),
            size: default_size,
            style: FontStyle::Normal,
        };
        Self {
            current: default.clone(),
            default,
        }
    }

    /// Current applied state.
    pub fn current(&self) -> &FontState {
        &self.current
    }

    /// Switch the surface font, skipping redundant directives.
    ///
    /// If the requested (size, style) already matches the applied state,
    /// no surface call is issued. Otherwise both a size directive and a
    /// font directive go out and the state is updated.
    pub fn set_font(&mut self, surface: &mut dyn Surface, size: f32, bold: bool, italic: bool) {
        if self.is_current_state(size, bold, italic) {
            return;
        }
        self.apply(surface, size, FontStyle::from_flags(bold, italic));
    }

    /// Apply the requested font unconditionally.
    ///
    /// Used after external state perturbation (e.g. the surface was handed
    /// to code outside the manager's control).
    pub fn force_apply(&mut self, surface: &mut dyn Surface, size: f32, bold: bool, italic: bool) {
        self.apply(surface, size, FontStyle::from_flags(bold, italic));
    }

    /// Restore and apply the session's initial default triple.
    pub fn reset_to_default(&mut self, surface: &mut dyn Surface) {
        let FontState { size, style, .. } = self.default;
        self.apply(surface, size, style);
    }

    /// Whether the given request matches the applied state. Pure query.
    pub fn is_current_state(&self, size: f32, bold: bool, italic: bool) -> bool {
        self.current.size == size && self.current.style == FontStyle::from_flags(bold, italic)
    }

    fn apply(&mut self, surface: &mut dyn Surface, size: f32, style: FontStyle) {
        surface.set_font_size(size);
        surface.set_font(&self.current.family, style);
        self.current.size = size;
        self.current.style = style;
    }
}
