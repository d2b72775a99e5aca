//! Forwarding of action signals as index-based view signals.
//!
//! Each node's `triggered`, `toggled` and `hovered` signals are routed to
//! the view, which looks up the node's current index and re-emits the
//! signal with it. The lookup happens at emission time, so a node keeps
//! reporting the right index after rows around it were inserted, removed or
//! moved.

use std::sync::Weak;

use lattice_menuview_core::logging::targets;
use lattice_menuview_core::{ConnectionId, Signal};

use super::ViewShared;
use super::resolve;
use crate::model::ModelIndex;
use crate::widget::{Action, ActionId};

/// Signals of a [`MenuView`](super::MenuView).
///
/// Each carries the column-0 index of the row whose action emitted it.
pub struct MenuViewSignals {
    /// Emitted when an entry is highlighted.
    pub hovered: Signal<ModelIndex>,
    /// Emitted when an entry is activated. Args: (index, checked)
    pub triggered: Signal<(ModelIndex, bool)>,
    /// Emitted when a checkable entry changes state. Args: (index, checked)
    pub toggled: Signal<(ModelIndex, bool)>,
}

impl Default for MenuViewSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuViewSignals {
    /// Creates a new set of view signals.
    pub fn new() -> Self {
        Self {
            hovered: Signal::new(),
            triggered: Signal::new(),
            toggled: Signal::new(),
        }
    }
}

/// Connections made on one action.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RelayConnections {
    triggered: ConnectionId,
    toggled: ConnectionId,
    hovered: ConnectionId,
}

/// Routes the action's signals of node `id` to the view.
pub(crate) fn connect(action: &Action, id: ActionId, view: Weak<ViewShared>) -> RelayConnections {
    let target = view.clone();
    let triggered = action.triggered.connect(move |&checked| {
        route(&target, id, "triggered", |signals, index| {
            signals.triggered.emit((index, checked));
        });
    });

    let target = view.clone();
    let toggled = action.toggled.connect(move |&checked| {
        route(&target, id, "toggled", |signals, index| {
            signals.toggled.emit((index, checked));
        });
    });

    let hovered = action.hovered.connect(move |_| {
        route(&view, id, "hovered", |signals, index| {
            signals.hovered.emit(index);
        });
    });

    RelayConnections {
        triggered,
        toggled,
        hovered,
    }
}

/// Removes the connections made by [`connect`].
pub(crate) fn disconnect(action: &Action, connections: RelayConnections) {
    action.triggered.disconnect(connections.triggered);
    action.toggled.disconnect(connections.toggled);
    action.hovered.disconnect(connections.hovered);
}

/// Resolves the node's index and hands it to `emit` with the view unlocked.
///
/// Nothing is emitted for nodes the tree no longer tracks, when no model is
/// set, or when the view is in the middle of an update.
fn route<F>(view: &Weak<ViewShared>, id: ActionId, signal: &'static str, emit: F)
where
    F: FnOnce(&MenuViewSignals, ModelIndex),
{
    let Some(shared) = view.upgrade() else {
        return;
    };

    let index = {
        let Some(state) = shared.try_lock() else {
            tracing::debug!(target: targets::RELAY, ?id, signal, "view is busy, dropping action signal");
            return;
        };
        match state.model.as_ref() {
            Some(model) => resolve::get_index(&state.tree, model.as_ref(), id, 0),
            None => ModelIndex::invalid(),
        }
    };

    if !index.is_valid() {
        tracing::trace!(target: targets::RELAY, ?id, signal, "action has no model index");
        return;
    }
    tracing::trace!(target: targets::RELAY, ?id, signal, row = index.row(), "relaying action signal");
    emit(&shared.signals, index);
}
