//! Hierarchical tree model implementation.
//!
//! `TreeModel` stores parent/child data in a slotmap arena and reports every
//! structural change through [`ModelSignals`]. Batch operations (inserting a
//! range of rows, inserting a populated branch, removing a range) produce a
//! single notification pair.

use std::cmp::Ordering;
use std::collections::HashMap;

use parking_lot::RwLock;
use slotmap::{Key, KeyData, SlotMap, new_key_type};

use super::index::ModelIndex;
use super::role::{CheckState, ItemData, ItemRole};
use super::traits::{ItemFlags, ItemModel, ModelSignals};
use crate::widget::Icon;

new_key_type! {
    /// Stable identifier of a node in a [`TreeModel`].
    ///
    /// Unlike a [`ModelIndex`], a `NodeId` keeps naming the same item while
    /// rows around it are inserted, removed or moved.
    pub struct NodeId;
}

fn to_internal_id(id: NodeId) -> u64 {
    id.data().as_ffi()
}

fn from_internal_id(value: u64) -> NodeId {
    NodeId::from(KeyData::from_ffi(value))
}

/// Trait for tree node data that provides its own display information.
///
/// Implement this trait for types that should be directly usable as tree nodes.
pub trait TreeNodeData: Send + Sync {
    /// Returns data for a column and role.
    fn data(&self, column: usize, role: ItemRole) -> ItemData;

    /// Returns the flags for a column of this node.
    fn flags(&self, _column: usize) -> ItemFlags {
        ItemFlags::new()
    }
}

/// Implement TreeNodeData for String for convenience.
impl TreeNodeData for String {
    fn data(&self, column: usize, role: ItemRole) -> ItemData {
        match (column, role) {
            (0, ItemRole::Display) => ItemData::from(self.as_str()),
            _ => ItemData::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
struct StandardCell {
    values: HashMap<ItemRole, ItemData>,
    flags: ItemFlags,
}

impl Default for StandardCell {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            flags: ItemFlags::new(),
        }
    }
}

/// A general purpose row: role data and flags per column.
///
/// # Example
///
/// ```
/// use lattice_menuview::model::{ItemRole, StandardItem};
///
/// let item = StandardItem::new("Save")
///     .with_tooltip("Write the document to disk")
///     .with_text(1, "Ctrl+S");
///
/// assert_eq!(item.text(0).as_deref(), Some("Save"));
/// assert_eq!(item.data(1, ItemRole::Display).as_string(), Some("Ctrl+S"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StandardItem {
    cells: Vec<StandardCell>,
}

impl StandardItem {
    /// Creates an item with display text in column 0.
    pub fn new(text: impl Into<String>) -> Self {
        Self::default().with_text(0, text)
    }

    /// Sets the display text of a column.
    pub fn with_text(self, column: usize, text: impl Into<String>) -> Self {
        self.with_data(column, ItemRole::Display, text.into())
    }

    /// Sets the value stored under a role of a column.
    pub fn with_data(mut self, column: usize, role: ItemRole, value: impl Into<ItemData>) -> Self {
        self.set_data(column, role, value);
        self
    }

    /// Sets the decoration of column 0.
    pub fn with_icon(self, icon: Icon) -> Self {
        self.with_data(0, ItemRole::Decoration, icon)
    }

    /// Sets the tooltip of column 0.
    pub fn with_tooltip(self, tooltip: impl Into<String>) -> Self {
        self.with_data(0, ItemRole::ToolTip, tooltip.into())
    }

    /// Sets the flags of a column.
    pub fn with_flags(mut self, column: usize, flags: ItemFlags) -> Self {
        self.set_flags(column, flags);
        self
    }

    /// Makes a column user-checkable with the given state.
    pub fn with_check_state(mut self, column: usize, state: CheckState) -> Self {
        let flags = self.flags(column).with_checkable(true);
        self.set_flags(column, flags);
        self.with_data(column, ItemRole::CheckState, state)
    }

    fn cell_mut(&mut self, column: usize) -> &mut StandardCell {
        if self.cells.len() <= column {
            self.cells.resize_with(column + 1, StandardCell::default);
        }
        &mut self.cells[column]
    }

    /// Returns the value stored under a role of a column.
    pub fn data(&self, column: usize, role: ItemRole) -> ItemData {
        self.cells
            .get(column)
            .and_then(|cell| cell.values.get(&role))
            .cloned()
            .unwrap_or_default()
    }

    /// Stores a value; `ItemData::None` clears the role.
    ///
    /// Returns `true` if the stored value changed.
    pub fn set_data(&mut self, column: usize, role: ItemRole, value: impl Into<ItemData>) -> bool {
        let value = value.into();
        let cell = self.cell_mut(column);
        if value.is_none() {
            return cell.values.remove(&role).is_some();
        }
        if cell.values.get(&role) == Some(&value) {
            return false;
        }
        cell.values.insert(role, value);
        true
    }

    /// Returns the display text of a column.
    pub fn text(&self, column: usize) -> Option<String> {
        self.data(column, ItemRole::Display).into_string()
    }

    /// Returns the flags of a column.
    pub fn flags(&self, column: usize) -> ItemFlags {
        self.cells
            .get(column)
            .map_or_else(ItemFlags::new, |cell| cell.flags)
    }

    /// Replaces the flags of a column.
    pub fn set_flags(&mut self, column: usize, flags: ItemFlags) {
        self.cell_mut(column).flags = flags;
    }
}

impl From<&str> for StandardItem {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for StandardItem {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}

impl TreeNodeData for StandardItem {
    fn data(&self, column: usize, role: ItemRole) -> ItemData {
        StandardItem::data(self, column, role)
    }

    fn flags(&self, column: usize) -> ItemFlags {
        StandardItem::flags(self, column)
    }
}

/// A node together with its descendants, inserted in one operation.
///
/// # Example
///
/// ```
/// use lattice_menuview::model::{StandardItem, TreeBranch};
///
/// let branch = TreeBranch::new(StandardItem::new("Drinks"))
///     .with_child(StandardItem::new("Tea"))
///     .with_child(TreeBranch::new(StandardItem::new("Juice")).with_child(StandardItem::new("Apple")));
///
/// assert_eq!(branch.node_count(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TreeBranch<T> {
    /// Data of the branch's top node.
    pub data: T,
    /// Child branches in row order.
    pub children: Vec<TreeBranch<T>>,
}

impl<T> TreeBranch<T> {
    /// Creates a branch without children.
    pub fn new(data: T) -> Self {
        Self {
            data,
            children: Vec::new(),
        }
    }

    /// Appends a child.
    pub fn with_child(mut self, child: impl Into<TreeBranch<T>>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Appends several children.
    pub fn with_children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<TreeBranch<T>>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Number of nodes in the branch, including the top node.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(TreeBranch::node_count).sum::<usize>()
    }
}

impl<T> From<T> for TreeBranch<T> {
    fn from(data: T) -> Self {
        Self::new(data)
    }
}

/// A node in the tree structure.
struct TreeNode<T> {
    data: T,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
}

/// Internal storage for tree nodes.
struct TreeStorage<T> {
    nodes: SlotMap<NodeId, TreeNode<T>>,
    roots: Vec<NodeId>,
}

impl<T> TreeStorage<T> {
    fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: Vec::new(),
        }
    }

    fn contains_parent(&self, parent: Option<NodeId>) -> bool {
        parent.is_none_or(|id| self.nodes.contains_key(id))
    }

    fn children_of(&self, parent: Option<NodeId>) -> &[NodeId] {
        match parent {
            None => &self.roots,
            Some(id) => self
                .nodes
                .get(id)
                .map(|n| n.children.as_slice())
                .unwrap_or(&[]),
        }
    }

    fn children_of_mut(&mut self, parent: Option<NodeId>) -> Option<&mut Vec<NodeId>> {
        match parent {
            None => Some(&mut self.roots),
            Some(id) => self.nodes.get_mut(id).map(|n| &mut n.children),
        }
    }

    fn child_at(&self, parent: Option<NodeId>, row: usize) -> Option<NodeId> {
        self.children_of(parent).get(row).copied()
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|n| n.parent)
    }

    fn row_of(&self, id: NodeId) -> Option<usize> {
        let node = self.nodes.get(id)?;
        self.children_of(node.parent)
            .iter()
            .position(|&child| child == id)
    }

    /// Inserts a branch into the arena without linking it into its parent.
    fn attach(&mut self, parent: Option<NodeId>, branch: TreeBranch<T>) -> NodeId {
        let TreeBranch { data, children } = branch;
        let id = self.nodes.insert(TreeNode {
            data,
            children: Vec::new(),
            parent,
        });
        let child_ids: Vec<NodeId> = children
            .into_iter()
            .map(|child| self.attach(Some(id), child))
            .collect();
        if let Some(node) = self.nodes.get_mut(id) {
            node.children = child_ids;
        }
        id
    }

    /// Removes a node and all its descendants from the arena.
    fn remove_subtree(&mut self, id: NodeId) -> Option<T> {
        let node = self.nodes.remove(id)?;
        let mut pending = node.children;
        while let Some(child) = pending.pop() {
            if let Some(removed) = self.nodes.remove(child) {
                pending.extend(removed.children);
            }
        }
        Some(node.data)
    }

    /// Finds the node an index refers to.
    ///
    /// The internal id is tried first; indices built by hand (or carrying a
    /// stale id) are resolved by walking their row path.
    fn resolve(&self, index: &ModelIndex) -> Option<NodeId> {
        if !index.is_valid() {
            return None;
        }
        let candidate = from_internal_id(index.internal_id());
        if self.nodes.contains_key(candidate) && self.row_of(candidate) == Some(index.row()) {
            return Some(candidate);
        }

        let mut current = None;
        for ancestor in index.ancestors().iter().rev() {
            current = Some(self.child_at(current, ancestor.row())?);
        }
        self.child_at(current, index.row())
    }

    /// Resolves a parent index: `Some(None)` is the root, `None` is unknown.
    fn resolve_parent(&self, parent: &ModelIndex) -> Option<Option<NodeId>> {
        if parent.is_valid() {
            self.resolve(parent).map(Some)
        } else {
            Some(None)
        }
    }

    fn create_index(&self, id: NodeId, column: usize) -> Option<ModelIndex> {
        let row = self.row_of(id)?;
        let parent_index = match self.parent_of(id) {
            Some(pid) => self.create_index(pid, 0)?,
            None => ModelIndex::invalid(),
        };
        Some(ModelIndex::with_internal_id(
            row,
            column,
            parent_index,
            to_internal_id(id),
        ))
    }

    fn parent_index(&self, parent: Option<NodeId>) -> Option<ModelIndex> {
        match parent {
            None => Some(ModelIndex::invalid()),
            Some(id) => self.create_index(id, 0),
        }
    }
}

/// A hierarchical tree model for displaying parent-child data.
///
/// Nodes are addressed by [`NodeId`] for mutation and by [`ModelIndex`]
/// through the [`ItemModel`] trait. All mutators take `&self` and emit the
/// matching [`ModelSignals`] with the internal lock released, so connected
/// views may query the model from their handlers.
///
/// # Example
///
/// ```
/// use lattice_menuview::model::{ItemModel, ModelIndex, StandardItem, TreeModel};
///
/// let model = TreeModel::<StandardItem>::new();
/// let fruit = model.append_row(None, StandardItem::new("Fruit")).unwrap();
/// model.insert_rows(Some(fruit), 0, vec!["Apple".into(), "Pear".into()]);
///
/// let fruit_index = model.index(0, 0, &ModelIndex::invalid());
/// assert_eq!(model.row_count(&fruit_index), 2);
/// assert_eq!(model.node_id(&fruit_index), Some(fruit));
/// ```
pub struct TreeModel<T> {
    storage: RwLock<TreeStorage<T>>,
    column_count: usize,
    signals: ModelSignals,
}

impl<T: TreeNodeData + 'static> Default for TreeModel<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: TreeNodeData + 'static> TreeModel<T> {
    /// Creates a new empty tree model with one column.
    pub fn new() -> Self {
        Self {
            storage: RwLock::new(TreeStorage::new()),
            column_count: 1,
            signals: ModelSignals::new(),
        }
    }

    /// Sets the number of columns.
    pub fn with_column_count(mut self, count: usize) -> Self {
        self.column_count = count.max(1);
        self
    }

    /// Appends a row under `parent` (`None` for the top level).
    ///
    /// Returns `None` if the parent doesn't exist.
    pub fn append_row(&self, parent: Option<NodeId>, data: T) -> Option<NodeId> {
        self.insert_branches(parent, None, vec![TreeBranch::new(data)])?
            .into_iter()
            .next()
    }

    /// Inserts consecutive rows starting at `row`, with one notification.
    ///
    /// Returns `None` if the parent doesn't exist, `row` is past the end, or
    /// `items` is empty.
    pub fn insert_rows(&self, parent: Option<NodeId>, row: usize, items: Vec<T>) -> Option<Vec<NodeId>> {
        self.insert_branches(parent, Some(row), items.into_iter().map(TreeBranch::new).collect())
    }

    /// Inserts a populated subtree at `row`, with one notification.
    ///
    /// Views are told about the top node only; its descendants already exist
    /// when `rows_inserted` is emitted.
    pub fn insert_branch(&self, parent: Option<NodeId>, row: usize, branch: TreeBranch<T>) -> Option<NodeId> {
        self.insert_branches(parent, Some(row), vec![branch])?
            .into_iter()
            .next()
    }

    /// Appends a populated subtree under `parent`.
    pub fn append_branch(&self, parent: Option<NodeId>, branch: TreeBranch<T>) -> Option<NodeId> {
        self.insert_branches(parent, None, vec![branch])?
            .into_iter()
            .next()
    }

    fn insert_branches(
        &self,
        parent: Option<NodeId>,
        row: Option<usize>,
        branches: Vec<TreeBranch<T>>,
    ) -> Option<Vec<NodeId>> {
        if branches.is_empty() {
            return None;
        }
        let (parent_index, row) = {
            let storage = self.storage.read();
            if !storage.contains_parent(parent) {
                return None;
            }
            let len = storage.children_of(parent).len();
            let row = row.unwrap_or(len);
            if row > len {
                return None;
            }
            (storage.parent_index(parent)?, row)
        };
        let last = row + branches.len() - 1;

        self.signals
            .rows_about_to_be_inserted
            .emit((parent_index.clone(), row, last));
        let ids = {
            let mut storage = self.storage.write();
            let ids: Vec<NodeId> = branches
                .into_iter()
                .map(|branch| storage.attach(parent, branch))
                .collect();
            if let Some(children) = storage.children_of_mut(parent) {
                children.splice(row..row, ids.iter().copied());
            }
            ids
        };
        self.signals.rows_inserted.emit((parent_index, row, last));
        Some(ids)
    }

    /// Removes `count` rows starting at `row`, with one notification.
    ///
    /// `rows_about_to_be_removed` is emitted while the rows still exist.
    /// Returns the removed items, or `None` if the range is invalid.
    pub fn remove_rows(&self, parent: Option<NodeId>, row: usize, count: usize) -> Option<Vec<T>> {
        if count == 0 {
            return None;
        }
        let parent_index = {
            let storage = self.storage.read();
            if !storage.contains_parent(parent) || row + count > storage.children_of(parent).len() {
                return None;
            }
            storage.parent_index(parent)?
        };
        let last = row + count - 1;

        self.signals
            .rows_about_to_be_removed
            .emit((parent_index.clone(), row, last));
        let removed: Vec<T> = {
            let mut storage = self.storage.write();
            let ids: Vec<NodeId> = match storage.children_of_mut(parent) {
                Some(children) => children.drain(row..=last).collect(),
                None => Vec::new(),
            };
            ids.into_iter()
                .filter_map(|id| storage.remove_subtree(id))
                .collect()
        };
        self.signals.rows_removed.emit((parent_index, row, last));
        Some(removed)
    }

    /// Removes a node and all its descendants.
    ///
    /// Returns the removed node's data, or `None` if the node doesn't exist.
    pub fn remove(&self, id: NodeId) -> Option<T> {
        let (parent, row) = {
            let storage = self.storage.read();
            (storage.parent_of(id), storage.row_of(id)?)
        };
        self.remove_rows(parent, row, 1)?.into_iter().next()
    }

    /// Moves `count` rows starting at `first` before `destination`.
    ///
    /// `destination` is a row under the same parent in pre-move
    /// coordinates; it must not fall inside `first..=first + count`.
    pub fn move_rows(&self, parent: Option<NodeId>, first: usize, count: usize, destination: usize) -> bool {
        if count == 0 {
            return false;
        }
        let last = first + count - 1;
        let parent_index = {
            let storage = self.storage.read();
            if !storage.contains_parent(parent) {
                return false;
            }
            let len = storage.children_of(parent).len();
            if last >= len || destination > len || (first..=last + 1).contains(&destination) {
                return false;
            }
            match storage.parent_index(parent) {
                Some(index) => index,
                None => return false,
            }
        };

        self.signals.emit_rows_moved(
            parent_index.clone(),
            first,
            last,
            parent_index,
            destination,
            || {
                let mut storage = self.storage.write();
                if let Some(children) = storage.children_of_mut(parent) {
                    let moved: Vec<NodeId> = children.drain(first..=last).collect();
                    let at = if destination > last {
                        destination - count
                    } else {
                        destination
                    };
                    children.splice(at..at, moved);
                }
            },
        );
        true
    }

    /// Sorts the children of `parent` and emits `layout_changed`.
    pub fn sort_children_by<F>(&self, parent: Option<NodeId>, mut compare: F) -> bool
    where
        F: FnMut(&T, &T) -> Ordering,
    {
        {
            let mut storage = self.storage.write();
            let Some(children) = storage.children_of_mut(parent) else {
                return false;
            };
            let mut sorted = std::mem::take(children);
            sorted.sort_by(|a, b| match (storage.nodes.get(*a), storage.nodes.get(*b)) {
                (Some(a), Some(b)) => compare(&a.data, &b.data),
                _ => Ordering::Equal,
            });
            if let Some(children) = storage.children_of_mut(parent) {
                *children = sorted;
            }
        }
        self.signals.layout_changed.emit(());
        true
    }

    /// Replaces the whole tree, emitting a model reset.
    pub fn replace_roots(&self, branches: Vec<TreeBranch<T>>) {
        self.signals.emit_reset(|| {
            let mut storage = self.storage.write();
            storage.nodes.clear();
            let roots: Vec<NodeId> = branches
                .into_iter()
                .map(|branch| storage.attach(None, branch))
                .collect();
            storage.roots = roots;
        });
    }

    /// Clears all nodes from the tree.
    pub fn clear(&self) {
        self.replace_roots(Vec::new());
    }

    /// Provides read access to a node's data.
    pub fn with_node<F, R>(&self, id: NodeId, f: F) -> Option<R>
    where
        F: FnOnce(&T) -> R,
    {
        let storage = self.storage.read();
        storage.nodes.get(id).map(|node| f(&node.data))
    }

    /// Provides mutable access to a node's data.
    ///
    /// Emits `data_changed` for the whole row with an empty role list.
    pub fn modify_node<F, R>(&self, id: NodeId, f: F) -> Option<R>
    where
        F: FnOnce(&mut T) -> R,
    {
        let (result, top_left, bottom_right) = {
            let mut storage = self.storage.write();
            let node = storage.nodes.get_mut(id)?;
            let result = f(&mut node.data);
            (
                result,
                storage.create_index(id, 0)?,
                storage.create_index(id, self.column_count - 1)?,
            )
        };
        self.signals.data_changed.emit((top_left, bottom_right, Vec::new()));
        Some(result)
    }

    /// Returns the node an index refers to.
    pub fn node_id(&self, index: &ModelIndex) -> Option<NodeId> {
        self.storage.read().resolve(index)
    }

    /// Returns the column-0 index of a node; invalid if the node is gone.
    pub fn index_of(&self, id: NodeId) -> ModelIndex {
        self.storage
            .read()
            .create_index(id, 0)
            .unwrap_or_default()
    }

    /// Returns the parent of a node (`None` for top-level nodes).
    pub fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.storage.read().parent_of(id)
    }

    /// Returns the children of `parent` in row order.
    pub fn children(&self, parent: Option<NodeId>) -> Vec<NodeId> {
        self.storage.read().children_of(parent).to_vec()
    }

    /// Returns the number of children of `parent`.
    pub fn child_count(&self, parent: Option<NodeId>) -> usize {
        self.storage.read().children_of(parent).len()
    }

    /// Returns the number of top-level nodes.
    pub fn root_count(&self) -> usize {
        self.storage.read().roots.len()
    }

    /// Returns `true` if the tree is empty.
    pub fn is_empty(&self) -> bool {
        self.storage.read().roots.is_empty()
    }

    /// Returns the total number of nodes.
    pub fn node_count(&self) -> usize {
        self.storage.read().nodes.len()
    }
}

impl TreeModel<StandardItem> {
    /// Stores a value in one cell and emits `data_changed` for that cell.
    ///
    /// Returns `false` if the node or column doesn't exist or the value is
    /// unchanged.
    pub fn set_data(&self, id: NodeId, column: usize, role: ItemRole, value: impl Into<ItemData>) -> bool {
        if column >= self.column_count {
            return false;
        }
        let index = {
            let mut storage = self.storage.write();
            let Some(node) = storage.nodes.get_mut(id) else {
                return false;
            };
            if !node.data.set_data(column, role, value) {
                return false;
            }
            match storage.create_index(id, column) {
                Some(index) => index,
                None => return false,
            }
        };
        self.signals.emit_data_changed_single(index, vec![role]);
        true
    }

    /// Replaces the flags of one cell and emits `data_changed` for it.
    pub fn set_flags(&self, id: NodeId, column: usize, flags: ItemFlags) -> bool {
        if column >= self.column_count {
            return false;
        }
        let index = {
            let mut storage = self.storage.write();
            let Some(node) = storage.nodes.get_mut(id) else {
                return false;
            };
            node.data.set_flags(column, flags);
            match storage.create_index(id, column) {
                Some(index) => index,
                None => return false,
            }
        };
        self.signals.emit_data_changed_single(index, Vec::new());
        true
    }
}

impl<T: TreeNodeData + 'static> ItemModel for TreeModel<T> {
    fn row_count(&self, parent: &ModelIndex) -> usize {
        let storage = self.storage.read();
        match storage.resolve_parent(parent) {
            Some(parent_id) => storage.children_of(parent_id).len(),
            None => 0,
        }
    }

    fn column_count(&self, _parent: &ModelIndex) -> usize {
        self.column_count
    }

    fn data(&self, index: &ModelIndex, role: ItemRole) -> ItemData {
        if index.column() >= self.column_count {
            return ItemData::None;
        }
        let storage = self.storage.read();
        storage
            .resolve(index)
            .and_then(|id| storage.nodes.get(id))
            .map_or(ItemData::None, |node| node.data.data(index.column(), role))
    }

    fn index(&self, row: usize, column: usize, parent: &ModelIndex) -> ModelIndex {
        if column >= self.column_count {
            return ModelIndex::invalid();
        }

        let storage = self.storage.read();
        let Some(parent_id) = storage.resolve_parent(parent) else {
            return ModelIndex::invalid();
        };
        match storage.child_at(parent_id, row) {
            Some(child) => ModelIndex::with_internal_id(row, column, parent.clone(), to_internal_id(child)),
            None => ModelIndex::invalid(),
        }
    }

    fn parent(&self, index: &ModelIndex) -> ModelIndex {
        let storage = self.storage.read();
        storage
            .resolve(index)
            .and_then(|id| storage.parent_of(id))
            .and_then(|parent_id| storage.create_index(parent_id, 0))
            .unwrap_or_default()
    }

    fn signals(&self) -> &ModelSignals {
        &self.signals
    }

    fn flags(&self, index: &ModelIndex) -> ItemFlags {
        if index.column() >= self.column_count {
            return ItemFlags::disabled();
        }
        let storage = self.storage.read();
        storage
            .resolve(index)
            .and_then(|id| storage.nodes.get(id))
            .map_or_else(ItemFlags::disabled, |node| node.data.flags(index.column()))
    }
}
