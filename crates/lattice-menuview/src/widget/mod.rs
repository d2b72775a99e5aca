//! Menu widgets: actions and the menu tree they live in.
//!
//! # Key Types
//!
//! - [`Action`]: A menu entry with text, icon, check state and signals
//! - [`MenuTree`]: Arena that owns all actions of a menu hierarchy
//! - [`ActionId`]: Stable handle of a node in the tree
//! - [`NodeKind`]/[`Menu`]: Leaf action or submenu
//! - [`MenuTreeDebug`]: Text dump of a tree

mod action;
mod debug;
mod icon;
mod tree;

pub use action::Action;
pub use debug::MenuTreeDebug;
pub use icon::{Icon, IconSource};
pub use tree::{ActionId, Menu, MenuNode, MenuTree, NodeKind, RemovedNode};
