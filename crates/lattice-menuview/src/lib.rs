//! Lattice MenuView - nested menus driven by a hierarchical item model.
//!
//! [`MenuView`](view::MenuView) projects an [`ItemModel`](model::ItemModel)
//! onto a tree of actions: every row becomes an [`Action`](widget::Action)
//! and every row with children becomes a submenu. The view listens to the
//! model's change notifications and updates the menu tree incrementally.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lattice_menuview::model::{ItemModel, ModelIndex, StandardItem, TreeModel};
//! use lattice_menuview::view::MenuView;
//!
//! let model = Arc::new(TreeModel::<StandardItem>::new());
//! let dishes = model.append_row(None, StandardItem::new("Dishes")).unwrap();
//! model.append_row(Some(dishes), StandardItem::new("Soup"));
//!
//! let view = MenuView::new("Menu");
//! view.set_model(Some(model.clone()));
//!
//! view.signals().triggered.connect(|(index, _checked)| {
//!     println!("picked row {}", index.row());
//! });
//!
//! let dishes_index = model.index(0, 0, &ModelIndex::invalid());
//! let dishes_action = view.get_action(&dishes_index).unwrap();
//! assert!(view.is_menu(dishes_action));
//! ```
//!
//! # Modules
//!
//! - [`model`]: Model/View contract (indices, roles, flags, signals) and a tree model
//! - [`widget`]: Actions and the arena-backed menu tree
//! - [`view`]: The synchronizing menu view

mod error;
pub mod model;
pub mod view;
pub mod widget;

pub use error::{Error, Result};
pub use lattice_menuview_core::{ConnectionId, Signal, SignalBlocker, TreeFormatOptions, TreeStyle};
pub use view::{ColumnMapping, MenuView, MenuViewSignals};
