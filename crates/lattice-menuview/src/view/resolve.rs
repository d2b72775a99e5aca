//! Translation between model indices and menu tree nodes.
//!
//! The menu tree itself is the index: no side table maps indices to
//! actions. An index is found by descending through child positions, and a
//! node's index is rebuilt from its positions on the way up to the root.

use lattice_menuview_core::logging::targets;

use crate::model::{ItemModel, ModelIndex};
use crate::widget::{ActionId, MenuTree};

/// The node mirroring `index`; the root for the invalid index.
///
/// Returns `None` when the tree does not (yet) contain the position, which
/// is expected while an incremental update is half way through.
pub(crate) fn get_action(tree: &MenuTree, index: &ModelIndex) -> Option<ActionId> {
    if !index.is_valid() {
        return Some(tree.root());
    }

    let mut current = tree.root();
    for ancestor in index.ancestors().iter().rev() {
        let next = tree.child_at(current, ancestor.row())?;
        if !tree.is_menu(next) {
            return None;
        }
        current = next;
    }
    tree.child_at(current, index.row())
}

/// Child positions from the root down to `id`, root-first.
///
/// Returns an empty path for the root and `None` for nodes that are not
/// reachable through menus from the root.
pub(crate) fn row_path(tree: &MenuTree, id: ActionId) -> Option<Vec<usize>> {
    if !tree.contains(id) {
        return None;
    }
    let mut rows = Vec::new();
    let mut current = id;
    while current != tree.root() {
        let parent = tree.parent(current)?;
        if !tree.is_menu(parent) {
            return None;
        }
        rows.push(tree.position_of(parent, current)?);
        current = parent;
    }
    rows.reverse();
    Some(rows)
}

/// The model index mirrored by `id`, at `column` on the deepest level.
///
/// The root and untracked nodes give the invalid index.
pub(crate) fn get_index(tree: &MenuTree, model: &dyn ItemModel, id: ActionId, column: usize) -> ModelIndex {
    let Some(rows) = row_path(tree, id) else {
        tracing::debug!(target: targets::RESOLVE, ?id, "node is not tracked by the menu tree");
        return ModelIndex::invalid();
    };

    let depth = rows.len();
    let mut index = ModelIndex::invalid();
    for (level, row) in rows.into_iter().enumerate() {
        let col = if level + 1 == depth { column } else { 0 };
        index = model.index(row, col, &index);
        if !index.is_valid() {
            tracing::debug!(target: targets::RESOLVE, ?id, level, row, "model has no matching row");
            return ModelIndex::invalid();
        }
    }
    index
}
