//! Core systems for Lattice MenuView.
//!
//! This crate provides the pieces the menu view is built on:
//!
//! - **Signal/Slot System**: Type-safe notification between models, actions and views
//! - **Logging**: `tracing` targets and tree-dump options used across the workspace
//!
//! # Signal/Slot Example
//!
//! ```
//! use lattice_menuview_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("Value changed to: {}", value);
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```
//!
//! # Blocking Example
//!
//! ```
//! use lattice_menuview_core::{Signal, SignalBlocker};
//!
//! let toggled = Signal::<bool>::new();
//! {
//!     let _blocker = SignalBlocker::new(&toggled);
//!     toggled.emit(true); // swallowed
//! }
//! assert!(!toggled.is_blocked());
//! ```

pub mod logging;
pub mod signal;

pub use logging::{TreeFormatOptions, TreeStyle};
pub use signal::{ConnectionId, Signal, SignalBlocker};
