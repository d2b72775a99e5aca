//! Signal/slot system for Lattice MenuView.
//!
//! Signals are emitted when state changes (a model inserted rows, an action
//! was triggered) and every connected slot is invoked with the emitted
//! arguments.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type
//! - [`ConnectionId`] - Identifier returned when connecting a slot
//! - [`SignalBlocker`] - RAII guard that silences a signal for a scope
//!
//! # Dispatch
//!
//! All slots run synchronously on the emitting thread. The menu view is a
//! single-threaded, callback-driven component, so there is no queued
//! delivery: a handler runs to completion before `emit` returns.
//!
//! `emit` takes a snapshot of the connected slots and releases the internal
//! lock before calling them. A slot may therefore connect or disconnect
//! slots on the very signal that is invoking it; such changes take effect
//! from the next emission.
//!
//! # Example
//!
//! ```
//! use lattice_menuview_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    /// Keys are versioned, so an ID whose connection was removed never
    /// matches a later connection.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A type-safe signal that can have multiple connected slots.
///
/// # Type Parameter
///
/// - `Args`: The argument type passed to connected slots. Use `()` for signals
///   with no arguments, or a tuple like `(ModelIndex, bool)` for several.
pub struct Signal<Args> {
    connections: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: Send + 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: Send + 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            connections: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    ///
    /// # Example
    ///
    /// ```
    /// use lattice_menuview_core::Signal;
    ///
    /// let signal = Signal::<String>::new();
    /// let id = signal.connect(|s| println!("Got: {}", s));
    /// signal.emit("Hello".to_string());
    /// assert!(signal.disconnect(id));
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.connections.lock().insert(Arc::new(slot))
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.connections.lock().remove(id).is_some()
    }

    /// Disconnect all slots from this signal.
    pub fn disconnect_all(&self) {
        self.connections.lock().clear();
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.connections.lock().len()
    }

    /// Block signal emission temporarily.
    ///
    /// While blocked, calls to `emit()` do nothing.
    pub fn set_blocked(&self, blocked: bool) {
        self.blocked.store(blocked, Ordering::SeqCst);
    }

    /// Check if signal emission is currently blocked.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Emit the signal, invoking all connected slots in connection order.
    ///
    /// If the signal is blocked, this does nothing.
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "signal blocked, skipping emit");
            return;
        }

        let slots: Vec<Slot<Args>> = self.connections.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// Blocks a signal for as long as the guard lives.
///
/// The previous blocked state is restored on drop, so blockers nest.
///
/// ```
/// use lattice_menuview_core::{Signal, SignalBlocker};
///
/// let signal = Signal::<()>::new();
/// signal.set_blocked(true);
/// {
///     let _outer = SignalBlocker::new(&signal);
/// }
/// assert!(signal.is_blocked());
/// ```
pub struct SignalBlocker<'a, Args: Send + 'static> {
    signal: &'a Signal<Args>,
    was_blocked: bool,
}

impl<'a, Args: Send + 'static> SignalBlocker<'a, Args> {
    /// Block `signal` until the returned guard is dropped.
    pub fn new(signal: &'a Signal<Args>) -> Self {
        let was_blocked = signal.is_blocked();
        signal.set_blocked(true);
        Self {
            signal,
            was_blocked,
        }
    }
}

impl<Args: Send + 'static> Drop for SignalBlocker<'_, Args> {
    fn drop(&mut self) {
        self.signal.set_blocked(self.was_blocked);
    }
}
