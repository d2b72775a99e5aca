//! Arena-backed menu tree.
//!
//! A [`MenuTree`] owns every action of a menu hierarchy. Nodes are addressed
//! by [`ActionId`] handles and know their parent, so the tree can be walked
//! in both directions. A node is either a leaf action or a menu holding an
//! ordered list of children; the root is always a menu.

use std::collections::VecDeque;
use std::sync::Arc;

use slotmap::{SlotMap, new_key_type};

use super::action::Action;
use crate::error::{Error, Result};

new_key_type! {
    /// Handle of a node in a [`MenuTree`].
    ///
    /// Handles are versioned: once a node is removed its handle never
    /// resolves again, even if the slot is reused.
    pub struct ActionId;
}

/// Menu-specific state of a node: its ordered children.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    children: Vec<ActionId>,
    tooltips_visible: bool,
}

impl Menu {
    /// Creates an empty menu.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether tooltips of the menu's entries are shown.
    pub fn with_tooltips_visible(mut self, visible: bool) -> Self {
        self.tooltips_visible = visible;
        self
    }

    /// Returns whether tooltips of the menu's entries are shown.
    pub fn tooltips_visible(&self) -> bool {
        self.tooltips_visible
    }

    /// Children in display order.
    pub fn children(&self) -> &[ActionId] {
        &self.children
    }

    /// Number of children.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Returns `true` if the menu has no entries.
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Position of a child in display order.
    pub fn position_of(&self, child: ActionId) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }
}

/// What a node is: a plain action or a submenu.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// An action without children.
    Leaf,
    /// A submenu.
    Menu(Menu),
}

impl NodeKind {
    /// Returns `true` for submenus.
    pub fn is_menu(&self) -> bool {
        matches!(self, NodeKind::Menu(_))
    }

    /// The menu state, if this is a submenu.
    pub fn as_menu(&self) -> Option<&Menu> {
        match self {
            NodeKind::Menu(menu) => Some(menu),
            NodeKind::Leaf => None,
        }
    }

    fn as_menu_mut(&mut self) -> Option<&mut Menu> {
        match self {
            NodeKind::Menu(menu) => Some(menu),
            NodeKind::Leaf => None,
        }
    }
}

/// A node of the menu tree.
#[derive(Debug)]
pub struct MenuNode {
    action: Arc<Action>,
    parent: Option<ActionId>,
    kind: NodeKind,
}

impl MenuNode {
    /// The node's action.
    pub fn action(&self) -> &Arc<Action> {
        &self.action
    }

    /// The containing menu; `None` for the root.
    pub fn parent(&self) -> Option<ActionId> {
        self.parent
    }

    /// Leaf or menu.
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Returns `true` for submenus.
    pub fn is_menu(&self) -> bool {
        self.kind.is_menu()
    }

    /// Children in display order; empty for leaves.
    pub fn children(&self) -> &[ActionId] {
        self.kind.as_menu().map(Menu::children).unwrap_or(&[])
    }
}

/// A removed node, returned so callers can release what they attached to it.
pub type RemovedNode = (ActionId, Arc<Action>);

/// The menu hierarchy.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lattice_menuview::widget::{Action, Menu, MenuTree, NodeKind};
///
/// let mut tree = MenuTree::new(Action::new("Main"), Menu::new());
/// let root = tree.root();
///
/// let file = tree
///     .insert_child(root, None, Arc::new(Action::new("File")), NodeKind::Menu(Menu::new()))
///     .unwrap();
/// tree.insert_child(file, None, Arc::new(Action::new("Open")), NodeKind::Leaf).unwrap();
///
/// assert!(tree.is_menu(file));
/// assert_eq!(tree.children(file).len(), 1);
/// assert_eq!(tree.parent(file), Some(root));
/// ```
#[derive(Debug)]
pub struct MenuTree {
    nodes: SlotMap<ActionId, MenuNode>,
    root: ActionId,
}

impl MenuTree {
    /// Creates a tree whose root menu is represented by `root_action`.
    pub fn new(root_action: Action, mut root_menu: Menu) -> Self {
        root_menu.children.clear();
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(MenuNode {
            action: Arc::new(root_action),
            parent: None,
            kind: NodeKind::Menu(root_menu),
        });
        Self { nodes, root }
    }

    /// The root menu.
    pub fn root(&self) -> ActionId {
        self.root
    }

    /// Returns the node for a handle.
    pub fn node(&self, id: ActionId) -> Option<&MenuNode> {
        self.nodes.get(id)
    }

    /// Returns `true` if the handle names a live node.
    pub fn contains(&self, id: ActionId) -> bool {
        self.nodes.contains_key(id)
    }

    /// The action of a node.
    pub fn action(&self, id: ActionId) -> Option<&Arc<Action>> {
        self.nodes.get(id).map(MenuNode::action)
    }

    /// The containing menu of a node.
    pub fn parent(&self, id: ActionId) -> Option<ActionId> {
        self.nodes.get(id).and_then(MenuNode::parent)
    }

    /// Children of a node; empty for leaves and unknown handles.
    pub fn children(&self, id: ActionId) -> &[ActionId] {
        self.nodes.get(id).map(MenuNode::children).unwrap_or(&[])
    }

    /// Child at `position` of a menu.
    pub fn child_at(&self, id: ActionId, position: usize) -> Option<ActionId> {
        self.children(id).get(position).copied()
    }

    /// Returns `true` if the node is a menu.
    pub fn is_menu(&self, id: ActionId) -> bool {
        self.nodes.get(id).is_some_and(MenuNode::is_menu)
    }

    /// Position of `child` in the child list of `parent`.
    pub fn position_of(&self, parent: ActionId, child: ActionId) -> Option<usize> {
        self.nodes
            .get(parent)
            .and_then(|node| node.kind.as_menu())
            .and_then(|menu| menu.position_of(child))
    }

    /// Total number of nodes, root included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` if the root menu has no entries.
    pub fn is_empty(&self) -> bool {
        self.children(self.root).is_empty()
    }

    /// Number of menus between a node and the root.
    pub fn depth(&self, id: ActionId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(parent) = current {
            depth += 1;
            current = self.parent(parent);
        }
        depth
    }

    /// All nodes below `id` in level order.
    pub fn descendants(&self, id: ActionId) -> Vec<ActionId> {
        let mut result = Vec::new();
        let mut queue: VecDeque<ActionId> = self.children(id).iter().copied().collect();
        while let Some(next) = queue.pop_front() {
            result.push(next);
            queue.extend(self.children(next).iter().copied());
        }
        result
    }

    /// Inserts a node into the menu `parent`.
    ///
    /// The node goes before `before` when that is a child of `parent`,
    /// otherwise it is appended. A menu kind always starts out empty.
    pub fn insert_child(
        &mut self,
        parent: ActionId,
        before: Option<ActionId>,
        action: Arc<Action>,
        mut kind: NodeKind,
    ) -> Result<ActionId> {
        let parent_node = self.nodes.get(parent).ok_or(Error::UnknownNode)?;
        if !parent_node.is_menu() {
            return Err(Error::NotAMenu);
        }
        if let Some(menu) = kind.as_menu_mut() {
            menu.children.clear();
        }

        let id = self.nodes.insert(MenuNode {
            action,
            parent: Some(parent),
            kind,
        });
        let menu = self
            .nodes
            .get_mut(parent)
            .and_then(|node| node.kind.as_menu_mut())
            .ok_or(Error::NotAMenu)?;
        let position = before
            .and_then(|anchor| menu.position_of(anchor))
            .unwrap_or(menu.children.len());
        menu.children.insert(position, id);
        Ok(id)
    }

    /// Removes a node and its whole subtree.
    ///
    /// Returns the removed nodes, the node itself first.
    pub fn remove(&mut self, id: ActionId) -> Result<Vec<RemovedNode>> {
        if id == self.root {
            return Err(Error::RootNode);
        }
        let parent = self.nodes.get(id).ok_or(Error::UnknownNode)?.parent;
        if let Some(menu) = parent
            .and_then(|p| self.nodes.get_mut(p))
            .and_then(|node| node.kind.as_menu_mut())
        {
            menu.children.retain(|&child| child != id);
        }
        Ok(self.drop_subtrees(vec![id]))
    }

    /// Removes every child of a menu, keeping the menu itself.
    pub fn clear_children(&mut self, id: ActionId) -> Result<Vec<RemovedNode>> {
        let node = self.nodes.get_mut(id).ok_or(Error::UnknownNode)?;
        let children = match node.kind.as_menu_mut() {
            Some(menu) => std::mem::take(&mut menu.children),
            None => Vec::new(),
        };
        Ok(self.drop_subtrees(children))
    }

    fn drop_subtrees(&mut self, tops: Vec<ActionId>) -> Vec<RemovedNode> {
        let mut removed = Vec::new();
        let mut pending: VecDeque<ActionId> = tops.into();
        while let Some(next) = pending.pop_front() {
            if let Some(node) = self.nodes.remove(next) {
                if let NodeKind::Menu(menu) = node.kind {
                    pending.extend(menu.children);
                }
                removed.push((next, node.action));
            }
        }
        removed
    }

    /// Turns a leaf into an empty menu.
    ///
    /// Returns `Ok(false)` if the node already is a menu.
    pub fn promote(&mut self, id: ActionId, mut menu: Menu) -> Result<bool> {
        let node = self.nodes.get_mut(id).ok_or(Error::UnknownNode)?;
        if node.is_menu() {
            return Ok(false);
        }
        menu.children.clear();
        node.kind = NodeKind::Menu(menu);
        Ok(true)
    }

    /// Turns an empty menu back into a leaf.
    ///
    /// Returns `Ok(false)` for the root, for leaves and for menus that still
    /// have children.
    pub fn demote(&mut self, id: ActionId) -> Result<bool> {
        let node = self.nodes.get_mut(id).ok_or(Error::UnknownNode)?;
        if id == self.root || !node.kind.as_menu().is_some_and(Menu::is_empty) {
            return Ok(false);
        }
        node.kind = NodeKind::Leaf;
        Ok(true)
    }

    /// Moves `count` children starting at `first` before `destination`.
    ///
    /// `destination` uses pre-move positions. Returns `Ok(false)` when the
    /// range is out of bounds or the move would not change anything.
    pub fn move_children(&mut self, parent: ActionId, first: usize, count: usize, destination: usize) -> Result<bool> {
        let node = self.nodes.get_mut(parent).ok_or(Error::UnknownNode)?;
        let menu = node.kind.as_menu_mut().ok_or(Error::NotAMenu)?;
        let len = menu.children.len();
        if count == 0 || first.checked_add(count).is_none_or(|end| end > len) || destination > len {
            return Ok(false);
        }
        let last = first + count - 1;
        if (first..=last + 1).contains(&destination) {
            return Ok(false);
        }

        let moved: Vec<ActionId> = menu.children.drain(first..=last).collect();
        let at = if destination > last {
            destination - count
        } else {
            destination
        };
        menu.children.splice(at..at, moved);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(tree: &mut MenuTree, parent: ActionId, text: &str) -> ActionId {
        tree.insert_child(parent, None, Arc::new(Action::new(text)), NodeKind::Leaf)
            .unwrap()
    }

    fn texts(tree: &MenuTree, id: ActionId) -> Vec<String> {
        tree.children(id)
            .iter()
            .filter_map(|&c| tree.action(c).map(|a| a.text()))
            .collect()
    }

    #[test]
    fn test_insert_before_anchor() {
        let mut tree = MenuTree::new(Action::new("root"), Menu::new());
        let root = tree.root();
        let a = leaf(&mut tree, root, "a");
        leaf(&mut tree, root, "c");
        let c = tree.child_at(root, 1).unwrap();
        tree.insert_child(root, Some(c), Arc::new(Action::new("b")), NodeKind::Leaf)
            .unwrap();

        assert_eq!(texts(&tree, root), vec!["a", "b", "c"]);
        assert_eq!(tree.position_of(root, a), Some(0));
        assert_eq!(tree.depth(a), 1);
    }

    #[test]
    fn test_insert_into_leaf_fails() {
        let mut tree = MenuTree::new(Action::new("root"), Menu::new());
        let root = tree.root();
        let a = leaf(&mut tree, root, "a");

        let err = tree
            .insert_child(a, None, Arc::new(Action::new("x")), NodeKind::Leaf)
            .unwrap_err();
        assert_eq!(err, Error::NotAMenu);
    }

    #[test]
    fn test_remove_subtree() {
        let mut tree = MenuTree::new(Action::new("root"), Menu::new());
        let root = tree.root();
        let menu = tree
            .insert_child(root, None, Arc::new(Action::new("m")), NodeKind::Menu(Menu::new()))
            .unwrap();
        let inner = leaf(&mut tree, menu, "x");
        leaf(&mut tree, menu, "y");

        let removed = tree.remove(menu).unwrap();
        assert_eq!(removed.len(), 3);
        assert_eq!(removed[0].0, menu);
        assert!(!tree.contains(inner));
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.remove(menu).unwrap_err(), Error::UnknownNode);
        assert_eq!(tree.remove(root).unwrap_err(), Error::RootNode);
    }

    #[test]
    fn test_promote_and_demote() {
        let mut tree = MenuTree::new(Action::new("root"), Menu::new());
        let root = tree.root();
        let a = leaf(&mut tree, root, "a");

        assert!(tree.promote(a, Menu::new()).unwrap());
        assert!(!tree.promote(a, Menu::new()).unwrap());
        let child = leaf(&mut tree, a, "child");
        assert!(!tree.demote(a).unwrap());

        tree.remove(child).unwrap();
        assert!(tree.demote(a).unwrap());
        assert!(!tree.is_menu(a));
        assert!(!tree.demote(root).unwrap());
        assert!(tree.is_menu(root));
    }

    #[test]
    fn test_move_children() {
        let mut tree = MenuTree::new(Action::new("root"), Menu::new());
        let root = tree.root();
        for text in ["a", "b", "c", "d", "e"] {
            leaf(&mut tree, root, text);
        }

        assert!(tree.move_children(root, 0, 2, 4).unwrap());
        assert_eq!(texts(&tree, root), vec!["c", "d", "a", "b", "e"]);
        assert!(tree.move_children(root, 4, 1, 0).unwrap());
        assert_eq!(texts(&tree, root), vec!["e", "c", "d", "a", "b"]);
        assert!(!tree.move_children(root, 1, 1, 2).unwrap());
        assert!(!tree.move_children(root, 3, 3, 0).unwrap());
    }

    #[test]
    fn test_descendants_level_order() {
        let mut tree = MenuTree::new(Action::new("root"), Menu::new());
        let root = tree.root();
        let m = tree
            .insert_child(root, None, Arc::new(Action::new("m")), NodeKind::Menu(Menu::new()))
            .unwrap();
        leaf(&mut tree, m, "m0");
        leaf(&mut tree, root, "b");

        let order: Vec<String> = tree
            .descendants(root)
            .into_iter()
            .filter_map(|id| tree.action(id).map(|a| a.text()))
            .collect();
        assert_eq!(order, vec!["m", "b", "m0"]);
    }

    #[test]
    fn test_clear_children() {
        let mut tree = MenuTree::new(Action::new("root"), Menu::new());
        let root = tree.root();
        leaf(&mut tree, root, "a");
        leaf(&mut tree, root, "b");

        assert_eq!(tree.clear_children(root).unwrap().len(), 2);
        assert!(tree.is_empty());
        assert!(tree.is_menu(root));
    }
}
