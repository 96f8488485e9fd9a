//! Pointer cursor shapes.

/// The pointer shape a widget asks for while hovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CursorShape {
    /// The default arrow cursor.
    #[default]
    Arrow,

    /// An I-beam cursor, used over editable text.
    IBeam,

    /// A pointing hand cursor, used over clickable elements.
    Hand,

    /// A "not allowed" cursor.
    Forbidden,
}
