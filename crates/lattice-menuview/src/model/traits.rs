//! Core traits for the Model/View contract.
//!
//! Views only talk to models through [`ItemModel`] and listen to the
//! [`ModelSignals`] it exposes.

use lattice_menuview_core::Signal;

use super::index::ModelIndex;
use super::role::{CheckState, ItemData, ItemRole};

/// Capabilities of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemFlags {
    /// Item can be selected.
    pub selectable: bool,
    /// Item is enabled (can interact).
    pub enabled: bool,
    /// Item has a user-checkable checkbox.
    pub checkable: bool,
    /// Item can be edited.
    pub editable: bool,
}

impl Default for ItemFlags {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemFlags {
    /// Selectable and enabled.
    pub const fn new() -> Self {
        Self {
            selectable: true,
            enabled: true,
            checkable: false,
            editable: false,
        }
    }

    /// Not selectable, not enabled.
    pub const fn disabled() -> Self {
        Self {
            selectable: false,
            enabled: false,
            checkable: false,
            editable: false,
        }
    }

    /// Selectable, enabled and user-checkable.
    pub const fn checkable() -> Self {
        Self {
            checkable: true,
            ..Self::new()
        }
    }

    /// Sets the enabled flag.
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Sets the checkable flag.
    pub fn with_checkable(mut self, checkable: bool) -> Self {
        self.checkable = checkable;
        self
    }

    /// Sets the selectable flag.
    pub fn with_selectable(mut self, selectable: bool) -> Self {
        self.selectable = selectable;
        self
    }

    /// Sets the editable flag.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }
}

/// The trait item models implement.
///
/// `ItemModel` describes hierarchical data as rows and columns under parent
/// indices. The invalid index is the root.
///
/// # Implementation Requirements
///
/// At minimum, implement:
/// - [`row_count`](ItemModel::row_count) - Number of rows under a parent
/// - [`column_count`](ItemModel::column_count) - Number of columns
/// - [`data`](ItemModel::data) - Data for a given index and role
/// - [`index`](ItemModel::index) - Create an index for a position
/// - [`parent`](ItemModel::parent) - Get the parent of an index
/// - [`signals`](ItemModel::signals) - Change notifications
///
/// Models must emit the matching signal for every structural change:
/// `rows_about_to_be_removed` before rows disappear, `rows_inserted` after
/// rows appear, `data_changed` after values change and `model_reset` after
/// everything changed.
pub trait ItemModel: Send + Sync {
    /// Returns the number of rows under the given parent.
    fn row_count(&self, parent: &ModelIndex) -> usize;

    /// Returns the number of columns for children of the given parent.
    fn column_count(&self, parent: &ModelIndex) -> usize;

    /// Returns the data stored under the given role for the item at index.
    ///
    /// Returns `ItemData::None` for invalid indices and unsupported roles.
    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData;

    /// Creates a model index for the given row and column under parent.
    ///
    /// Returns `ModelIndex::invalid()` if the position is out of bounds.
    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex;

    /// Returns the parent of the given index.
    fn parent(&self, index: &ModelIndex) -> ModelIndex;

    /// Returns the signals for this model.
    fn signals(&self) -> &ModelSignals;

    /// Returns the capabilities of the item at the given index.
    ///
    /// The default returns selectable and enabled flags.
    fn flags(&self, _index: &ModelIndex) -> ItemFlags {
        ItemFlags::new()
    }

    /// Returns `true` if the item at parent has any children.
    fn has_children(&self, parent: &ModelIndex) -> bool {
        self.row_count(parent) > 0
    }

    /// Returns `true` if more rows can be fetched for the given parent.
    ///
    /// Used by models that load children lazily. The default returns `false`.
    fn can_fetch_more(&self, _parent: &ModelIndex) -> bool {
        false
    }

    /// Fetches more rows for the given parent. The default does nothing.
    fn fetch_more(&self, _parent: &ModelIndex) {}

    /// Validated index at `(row, column)` under the parent of `index`.
    fn sibling(&self, index: &ModelIndex, row: usize, column: usize) -> ModelIndex {
        if !index.is_valid() {
            return ModelIndex::invalid();
        }
        self.index(row, column, &self.parent(index))
    }

    /// Display text of an item (convenience for `data(index, Display)`).
    fn display_text(&self, index: &ModelIndex) -> Option<String> {
        self.data(index, ItemRole::Display).to_text()
    }

    /// Check state of an item.
    fn check_state(&self, index: &ModelIndex) -> Option<CheckState> {
        self.data(index, ItemRole::CheckState).as_check_state()
    }
}

/// Collection of signals emitted by item models.
///
/// - **Before removals and moves**: `rows_about_to_be_*`
/// - **After insertions, removals and moves**: `rows_*`
/// - **Value changes**: `data_changed`
/// - **Restructuring**: `layout_changed`, `model_reset`
pub struct ModelSignals {
    /// Emitted just before rows are inserted. Args: (parent, first, last)
    pub rows_about_to_be_inserted: Signal<(ModelIndex, usize, usize)>,

    /// Emitted after rows have been inserted. Args: (parent, first, last)
    pub rows_inserted: Signal<(ModelIndex, usize, usize)>,

    /// Emitted just before rows are removed. Args: (parent, first, last)
    pub rows_about_to_be_removed: Signal<(ModelIndex, usize, usize)>,

    /// Emitted after rows have been removed. Args: (parent, first, last)
    pub rows_removed: Signal<(ModelIndex, usize, usize)>,

    /// Emitted just before rows are moved.
    /// Args: (source parent, first, last, destination parent, destination row)
    pub rows_about_to_be_moved: Signal<(ModelIndex, usize, usize, ModelIndex, usize)>,

    /// Emitted after rows have been moved. Same arguments as
    /// `rows_about_to_be_moved`, expressed in pre-move coordinates.
    pub rows_moved: Signal<(ModelIndex, usize, usize, ModelIndex, usize)>,

    /// Emitted when data in existing items changes.
    /// Args: (top-left, bottom-right, changed roles; empty means all roles)
    pub data_changed: Signal<(ModelIndex, ModelIndex, Vec<ItemRole>)>,

    /// Emitted after rows were rearranged without insertion or removal.
    pub layout_changed: Signal<()>,

    /// Emitted before the model is reset.
    pub model_about_to_reset: Signal<()>,

    /// Emitted after the model has been reset.
    pub model_reset: Signal<()>,
}

impl Default for ModelSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelSignals {
    /// Creates a new set of model signals.
    pub fn new() -> Self {
        Self {
            rows_about_to_be_inserted: Signal::new(),
            rows_inserted: Signal::new(),
            rows_about_to_be_removed: Signal::new(),
            rows_removed: Signal::new(),
            rows_about_to_be_moved: Signal::new(),
            rows_moved: Signal::new(),
            data_changed: Signal::new(),
            layout_changed: Signal::new(),
            model_about_to_reset: Signal::new(),
            model_reset: Signal::new(),
        }
    }

    /// Emits the insertion pair around `insert_fn`.
    pub fn emit_rows_inserted<F>(&self, parent: ModelIndex, first: usize, last: usize, insert_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_inserted.emit((parent.clone(), first, last));
        insert_fn();
        self.rows_inserted.emit((parent, first, last));
    }

    /// Emits the removal pair around `remove_fn`.
    pub fn emit_rows_removed<F>(&self, parent: ModelIndex, first: usize, last: usize, remove_fn: F)
    where
        F: FnOnce(),
    {
        self.rows_about_to_be_removed.emit((parent.clone(), first, last));
        remove_fn();
        self.rows_removed.emit((parent, first, last));
    }

    /// Emits the move pair around `move_fn`.
    pub fn emit_rows_moved<F>(
        &self,
        source: ModelIndex,
        first: usize,
        last: usize,
        destination: ModelIndex,
        row: usize,
        move_fn: F,
    ) where
        F: FnOnce(),
    {
        self.rows_about_to_be_moved
            .emit((source.clone(), first, last, destination.clone(), row));
        move_fn();
        self.rows_moved.emit((source, first, last, destination, row));
    }

    /// Emits `data_changed` for a single item.
    pub fn emit_data_changed_single(&self, index: ModelIndex, roles: Vec<ItemRole>) {
        self.data_changed.emit((index.clone(), index, roles));
    }

    /// Emits the reset pair around `reset_fn`.
    pub fn emit_reset<F>(&self, reset_fn: F)
    where
        F: FnOnce(),
    {
        self.model_about_to_reset.emit(());
        reset_fn();
        self.model_reset.emit(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_item_flags() {
        let flags = ItemFlags::new();
        assert!(flags.selectable);
        assert!(flags.enabled);
        assert!(!flags.checkable);

        let checkable = ItemFlags::checkable().with_enabled(false);
        assert!(checkable.checkable);
        assert!(!checkable.enabled);
        assert_eq!(ItemFlags::disabled().with_enabled(true).selectable, false);
    }

    #[test]
    fn test_emit_rows_removed_order() {
        let signals = ModelSignals::new();
        let events = Arc::new(Mutex::new(Vec::new()));

        let about = events.clone();
        signals
            .rows_about_to_be_removed
            .connect(move |(_, first, last)| about.lock().push(("about", *first, *last)));
        let done = events.clone();
        signals
            .rows_removed
            .connect(move |(_, first, last)| done.lock().push(("done", *first, *last)));

        let inner = events.clone();
        signals.emit_rows_removed(ModelIndex::invalid(), 3, 7, || {
            inner.lock().push(("remove", 3, 7));
        });

        assert_eq!(
            *events.lock(),
            vec![("about", 3, 7), ("remove", 3, 7), ("done", 3, 7)]
        );
    }

    #[test]
    fn test_emit_reset() {
        let signals = ModelSignals::new();
        let counter = Arc::new(Mutex::new(0));

        let c1 = counter.clone();
        signals.model_about_to_reset.connect(move |_| *c1.lock() += 1);
        let c2 = counter.clone();
        signals.model_reset.connect(move |_| *c2.lock() += 10);

        signals.emit_reset(|| {});
        assert_eq!(*counter.lock(), 11);
    }
}
