//! Model/View contract for Lattice MenuView.
//!
//! The menu view never owns data. It reads a hierarchical model through the
//! [`ItemModel`] trait and follows its change notifications.
//!
//! # Core Types
//!
//! - `ModelIndex`: Identifies an item's position in a model
//! - `ItemRole`: Specifies what type of data to access
//! - `ItemData`: Type-erased container for item data
//! - `ItemFlags`: Capabilities of an item (enabled, checkable, ...)
//! - `ItemModel`: The trait that models implement
//! - `ModelSignals`: Signals for change notifications
//!
//! # Model Implementations
//!
//! - `TreeModel`: Hierarchical tree structure with parent-child relationships
//! - `StandardItem`: Ready-made row type with per-column role data and flags
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │    Model    │────>│   Signals   │────>│  MenuView   │
//! │ (ItemModel) │     │             │     │             │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                       │
//!       │         ┌─────────────┐               │
//!       └────────>│ ModelIndex  │<──────────────┘
//!                 │  ItemRole   │
//!                 │  ItemData   │
//!                 └─────────────┘
//! ```

mod index;
mod role;
mod traits;
mod tree_model;

pub use index::ModelIndex;
pub use role::{CheckState, ItemData, ItemRole};
pub use traits::{ItemFlags, ItemModel, ModelSignals};
pub use tree_model::{NodeId, StandardItem, TreeBranch, TreeModel, TreeNodeData};
