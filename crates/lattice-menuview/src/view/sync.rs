//! Keeping the menu tree in step with the model.
//!
//! The model's change notifications are translated into the smallest tree
//! edit that mirrors them:
//!
//! | Notification               | Tree edit                                  |
//! |----------------------------|--------------------------------------------|
//! | `rows_inserted`            | create the rows and their descendants      |
//! | `rows_about_to_be_removed` | drop the rows, collapse an emptied menu    |
//! | `data_changed`             | repopulate the rows if a mapped column changed |
//! | `rows_moved`               | reorder within the parent, else rebuild    |
//! | `layout_changed`, `model_reset` | rebuild                               |
//!
//! Handlers never call back into the model for anything but reads.

use std::collections::VecDeque;
use std::sync::{Arc, Weak};

use lattice_menuview_core::logging::targets;

use super::mapping::populate;
use super::relay;
use super::resolve::get_action;
use super::{ViewShared, ViewState};
use crate::error::{Error, Result};
use crate::model::{ItemModel, ModelIndex, ModelSignals};
use crate::widget::{ActionId, NodeKind, RemovedNode};
use lattice_menuview_core::ConnectionId;

/// Every valid index below `parent`, breadth-first across the hierarchy.
///
/// `parent` itself is not included. This is the order in which the view
/// creates nodes, so a node's menu always exists before its children.
///
/// # Example
///
/// ```
/// use lattice_menuview::model::{ModelIndex, StandardItem, TreeModel};
/// use lattice_menuview::view::level_order;
///
/// let model = TreeModel::<StandardItem>::new();
/// let a = model.append_row(None, "a".into()).unwrap();
/// model.append_row(Some(a), "a0".into());
/// model.append_row(None, "b".into());
///
/// let order: Vec<(usize, usize)> = level_order(&model, &ModelIndex::invalid())
///     .iter()
///     .map(|index| (index.depth(), index.row()))
///     .collect();
/// assert_eq!(order, vec![(0, 0), (0, 1), (1, 0)]);
/// ```
pub fn level_order(model: &dyn ItemModel, parent: &ModelIndex) -> Vec<ModelIndex> {
    let mut result = Vec::new();
    let mut queue = VecDeque::from([parent.clone()]);
    while let Some(current) = queue.pop_front() {
        for row in 0..model.row_count(&current) {
            let index = model.index(row, 0, &current);
            if index.is_valid() {
                queue.push_back(index.clone());
                result.push(index);
            }
        }
    }
    result
}

impl ViewState {
    /// Drops every node below the root.
    pub(crate) fn clear(&mut self) {
        let root = self.tree.root();
        match self.tree.clear_children(root) {
            Ok(removed) => self.release(removed),
            Err(err) => tracing::error!(target: targets::SYNC, %err, "failed to clear the menu tree"),
        }
    }

    /// Rebuilds the whole tree from the model.
    #[tracing::instrument(level = "debug", target = "lattice_menuview::sync", skip_all)]
    pub(crate) fn reset(&mut self, model: &dyn ItemModel) {
        self.clear();
        let indices = level_order(model, &ModelIndex::invalid());
        tracing::debug!(target: targets::SYNC, rows = indices.len(), "rebuilding menu tree");
        for index in &indices {
            self.create_menu_for_index(model, index);
        }
    }

    /// Creates the node mirroring `index` at its row position.
    ///
    /// A leaf parent is promoted to a menu first. The new node is a menu if
    /// the model reports children for `index`, otherwise a leaf.
    pub(crate) fn create_menu_for_index(&mut self, model: &dyn ItemModel, index: &ModelIndex) -> Option<ActionId> {
        let parent_index = index.parent();
        let Some(parent) = get_action(&self.tree, &parent_index) else {
            tracing::warn!(target: targets::SYNC, ?index, "parent of new row is not in the menu tree");
            return None;
        };
        if !self.tree.is_menu(parent) {
            let menu = self.factory.create_menu(&parent_index);
            if let Err(err) = self.tree.promote(parent, menu) {
                tracing::warn!(target: targets::SYNC, %err, "failed to promote parent to a menu");
                return None;
            }
            tracing::trace!(target: targets::SYNC, ?parent, "promoted leaf to menu");
        }

        let before = get_action(&self.tree, &model.sibling(index, index.row(), 0));
        let kind = if model.has_children(index) {
            NodeKind::Menu(self.factory.create_menu(index))
        } else {
            NodeKind::Leaf
        };
        let action = Arc::new(self.factory.create_action(index));
        populate(model, index, &action, &self.columns);

        let id = match self.tree.insert_child(parent, before, action.clone(), kind) {
            Ok(id) => id,
            Err(err) => {
                tracing::warn!(target: targets::SYNC, %err, ?index, "failed to insert menu node");
                return None;
            }
        };
        let connections = relay::connect(&action, id, self.shared.clone());
        self.relays.insert(id, connections);
        Some(id)
    }

    /// Mirrors rows `first..=last` inserted under `parent`, with their
    /// descendants.
    #[tracing::instrument(level = "debug", target = "lattice_menuview::sync", skip(self, model))]
    pub(crate) fn insert_menus(&mut self, model: &dyn ItemModel, parent: &ModelIndex, first: usize, last: usize) {
        let end = last.saturating_add(1).min(model.row_count(parent));
        for row in first..end {
            let index = model.index(row, 0, parent);
            if !index.is_valid() {
                tracing::warn!(target: targets::SYNC, row, "inserted row is missing from the model");
                continue;
            }
            if self.create_menu_for_index(model, &index).is_none() {
                continue;
            }
            for descendant in level_order(model, &index) {
                self.create_menu_for_index(model, &descendant);
            }
        }
    }

    /// Drops the nodes of rows `first..=last` under `parent`.
    ///
    /// A menu left without children turns back into a leaf; the root stays
    /// a menu.
    #[tracing::instrument(level = "debug", target = "lattice_menuview::sync", skip(self))]
    pub(crate) fn remove_menus(&mut self, parent: &ModelIndex, first: usize, last: usize) {
        let Some(parent_id) = get_action(&self.tree, parent) else {
            tracing::debug!(target: targets::SYNC, "removed rows were never mirrored");
            return;
        };

        let end = last.saturating_add(1).min(self.tree.children(parent_id).len());
        for row in (first..end).rev() {
            let Some(child) = self.tree.child_at(parent_id, row) else {
                continue;
            };
            match self.tree.remove(child) {
                Ok(removed) => self.release(removed),
                Err(err) => tracing::warn!(target: targets::SYNC, %err, row, "failed to remove menu node"),
            }
        }

        if parent_id != self.tree.root() && self.tree.children(parent_id).is_empty() {
            if let Ok(true) = self.tree.demote(parent_id) {
                tracing::trace!(target: targets::SYNC, ?parent_id, "collapsed empty menu to a leaf");
            }
        }
    }

    /// Repopulates rows `top_left.row()..=bottom_right.row()` if a mapped
    /// column lies in the changed column range.
    pub(crate) fn update_menus(&mut self, model: &dyn ItemModel, top_left: &ModelIndex, bottom_right: &ModelIndex) {
        if !self.columns.intersects(top_left.column(), bottom_right.column()) {
            tracing::trace!(
                target: targets::SYNC,
                first = top_left.column(),
                last = bottom_right.column(),
                "changed columns are not mapped"
            );
            return;
        }

        let parent = top_left.parent();
        let end = bottom_right.row().saturating_add(1).min(model.row_count(&parent));
        for row in top_left.row()..end {
            let index = model.index(row, 0, &parent);
            let Some(action) = get_action(&self.tree, &index).and_then(|id| self.tree.action(id)) else {
                continue;
            };
            populate(model, &index, action, &self.columns);
        }
    }

    /// Mirrors a move of rows `first..=last` before `destination`.
    ///
    /// Only moves within one parent are mirrored incrementally.
    pub(crate) fn move_menus(
        &mut self,
        source: &ModelIndex,
        first: usize,
        last: usize,
        destination_parent: &ModelIndex,
        destination: usize,
    ) -> Result<()> {
        if source != destination_parent {
            return Err(Error::unsupported("moving rows between parents"));
        }
        let parent = get_action(&self.tree, source).ok_or(Error::InvalidIndex {
            row: source.row(),
            column: source.column(),
        })?;
        if first > last || last >= self.tree.children(parent).len() {
            return Err(Error::InvalidRange { first, last });
        }
        let moved = self
            .tree
            .move_children(parent, first, last - first + 1, destination)?;
        tracing::debug!(target: targets::SYNC, first, last, destination, moved, "mirrored row move");
        Ok(())
    }

    /// Re-reads every node's attributes, e.g. after the column mapping changed.
    pub(crate) fn repopulate_all(&mut self, model: &dyn ItemModel) {
        for id in self.tree.descendants(self.tree.root()) {
            let index = super::resolve::get_index(&self.tree, model, id, 0);
            if let Some(action) = self.tree.action(id) {
                populate(model, &index, action, &self.columns);
            }
        }
    }

    /// Disconnects the relays of removed nodes.
    fn release(&mut self, removed: Vec<RemovedNode>) {
        for (id, action) in removed {
            if let Some(connections) = self.relays.remove(id) {
                relay::disconnect(&action, connections);
            }
        }
    }
}

/// Connections from a model's signals to a view.
#[derive(Debug)]
pub(crate) struct ModelConnections {
    rows_inserted: ConnectionId,
    rows_about_to_be_removed: ConnectionId,
    rows_moved: ConnectionId,
    data_changed: ConnectionId,
    layout_changed: ConnectionId,
    model_reset: ConnectionId,
}

impl ModelConnections {
    /// Subscribes the view behind `view` to `signals`.
    pub(crate) fn connect(signals: &ModelSignals, view: &Weak<ViewShared>) -> Self {
        let target = view.clone();
        let rows_inserted = signals.rows_inserted.connect(move |(parent, first, last)| {
            dispatch(&target, "rows_inserted", |state, model| {
                state.insert_menus(model, parent, *first, *last);
            });
        });

        let target = view.clone();
        let rows_about_to_be_removed = signals
            .rows_about_to_be_removed
            .connect(move |(parent, first, last)| {
                dispatch(&target, "rows_about_to_be_removed", |state, _| {
                    state.remove_menus(parent, *first, *last);
                });
            });

        let target = view.clone();
        let rows_moved = signals
            .rows_moved
            .connect(move |(source, first, last, destination_parent, destination)| {
                dispatch(&target, "rows_moved", |state, model| {
                    if let Err(err) = state.move_menus(source, *first, *last, destination_parent, *destination) {
                        tracing::info!(target: targets::SYNC, %err, "falling back to a full rebuild");
                        state.reset(model);
                    }
                });
            });

        let target = view.clone();
        let data_changed = signals
            .data_changed
            .connect(move |(top_left, bottom_right, _roles)| {
                dispatch(&target, "data_changed", |state, model| {
                    state.update_menus(model, top_left, bottom_right);
                });
            });

        let target = view.clone();
        let layout_changed = signals.layout_changed.connect(move |_| {
            dispatch(&target, "layout_changed", |state, model| state.reset(model));
        });

        let target = view.clone();
        let model_reset = signals.model_reset.connect(move |_| {
            dispatch(&target, "model_reset", |state, model| state.reset(model));
        });

        Self {
            rows_inserted,
            rows_about_to_be_removed,
            rows_moved,
            data_changed,
            layout_changed,
            model_reset,
        }
    }

    /// Removes every connection made by [`connect`](Self::connect).
    pub(crate) fn disconnect(self, signals: &ModelSignals) {
        signals.rows_inserted.disconnect(self.rows_inserted);
        signals
            .rows_about_to_be_removed
            .disconnect(self.rows_about_to_be_removed);
        signals.rows_moved.disconnect(self.rows_moved);
        signals.data_changed.disconnect(self.data_changed);
        signals.layout_changed.disconnect(self.layout_changed);
        signals.model_reset.disconnect(self.model_reset);
    }
}

/// Runs a notification handler against the view's state.
///
/// A notification that arrives while the view is locked (a model mutated
/// from inside a view callback) cannot be applied; the view is then
/// rebuilt the next time it is locked.
fn dispatch<F>(view: &Weak<ViewShared>, notification: &'static str, handler: F)
where
    F: FnOnce(&mut ViewState, &dyn ItemModel),
{
    let Some(shared) = view.upgrade() else {
        return;
    };
    let Some(mut state) = shared.state.try_lock() else {
        tracing::warn!(
            target: targets::SYNC,
            notification,
            "model changed while the view was busy; scheduling a rebuild"
        );
        shared.schedule_resync();
        return;
    };
    if shared.resync_pending() {
        // The tree is already out of step; the rebuild runs on the next lock.
        tracing::trace!(target: targets::SYNC, notification, "rebuild pending, skipping notification");
        return;
    }
    let Some(model) = state.model.clone() else {
        return;
    };
    tracing::trace!(target: targets::SYNC, notification, "handling model notification");
    handler(&mut *state, model.as_ref());
}
