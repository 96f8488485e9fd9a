//! Logging facilities for Scrivener.
//!
//! Scrivener uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("scrivener::entry=trace")
//!     .init();
//! ```

/// Span names used throughout Scrivener for tracing.
pub mod span_names {
    /// Signal emission span.
    pub const SIGNAL: &str = "scrivener::signal";
    /// Event dispatch through a canvas.
    pub const DISPATCH: &str = "scrivener::dispatch";
    /// Entry painting span.
    pub const PAINT: &str = "scrivener::paint";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "scrivener_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "scrivener_core::signal";
    /// Canvas focus and refresh target.
    pub const CANVAS: &str = "scrivener::canvas";
    /// Text entry editing and selection target.
    pub const ENTRY: &str = "scrivener::entry";
    /// Clipboard access target.
    pub const CLIPBOARD: &str = "scrivener::clipboard";
    /// Theme loading target.
    pub const THEME: &str = "scrivener_style::theme";
}
