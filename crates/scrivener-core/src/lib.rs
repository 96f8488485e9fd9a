//! Core systems for Scrivener.
//!
//! This crate provides the foundational pieces shared by the widget crates:
//!
//! - **Object identity**: [`ObjectId`] and the [`Object`] trait
//! - **Signal/Slot System**: type-safe change notification
//! - **Logging**: `tracing` targets and span names per subsystem
//!
//! # Signal/Slot Example
//!
//! ```
//! use scrivener_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id).unwrap();
//! ```

mod error;
pub mod logging;
pub mod object;
pub mod signal;

pub use error::{Result, ScrivenerError, SignalError};
pub use object::{Object, ObjectId};
pub use signal::{ConnectionId, Signal};
