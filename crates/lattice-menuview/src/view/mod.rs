//! The menu view.
//!
//! [`MenuView`] owns a [`MenuTree`] whose shape mirrors an [`ItemModel`]:
//!
//! - every valid row becomes a node whose [`Action`] carries the row's
//!   mapped data (see [`ColumnMapping`])
//! - a row with children becomes a menu, a row without children a leaf
//! - the model's change notifications are applied to the tree as they
//!   arrive, without rebuilding it
//! - the actions' `triggered`, `toggled` and `hovered` signals are
//!   re-emitted on [`MenuViewSignals`] with the row's model index
//!
//! The tree is the only mapping between the two sides. A node's index is
//! its chain of positions, so nothing needs fixing up when rows shift.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use lattice_menuview::model::{StandardItem, TreeBranch, TreeModel};
//! use lattice_menuview::view::MenuView;
//!
//! let model = Arc::new(TreeModel::<StandardItem>::new());
//! model.replace_roots(vec![
//!     TreeBranch::new(StandardItem::new("Starters"))
//!         .with_child(StandardItem::new("Soup"))
//!         .with_child(StandardItem::new("Salad")),
//!     TreeBranch::new(StandardItem::new("Dessert")),
//! ]);
//!
//! let view = MenuView::new("Menu");
//! view.set_model(Some(model));
//!
//! assert_eq!(view.texts(view.root()), vec!["Starters", "Dessert"]);
//! assert_eq!(
//!     view.dump_tree(),
//!     "Menu\n├── Starters\n│   ├── Soup\n│   └── Salad\n└── Dessert\n"
//! );
//! ```

mod factory;
mod mapping;
mod relay;
mod resolve;
mod sync;

pub use factory::{DefaultMenuFactory, MenuFactory};
pub use mapping::{ActionAttribute, ColumnMapping};
pub use relay::MenuViewSignals;
pub use sync::level_order;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use lattice_menuview_core::TreeFormatOptions;
use lattice_menuview_core::logging::targets;
use parking_lot::{Mutex, MutexGuard};
use slotmap::SecondaryMap;

use crate::error::{Error, Result};
use crate::model::{ItemModel, ModelIndex};
use crate::widget::{Action, ActionId, MenuTree, MenuTreeDebug};
use relay::RelayConnections;
use sync::ModelConnections;

/// State shared between the view and the closures it connects.
pub(crate) struct ViewShared {
    pub(crate) state: Mutex<ViewState>,
    /// Set when a model notification could not be applied.
    resync: AtomicBool,
    pub(crate) signals: MenuViewSignals,
}

impl ViewShared {
    /// Locks the state, rebuilding it first if a notification was missed.
    pub(crate) fn lock(&self) -> MutexGuard<'_, ViewState> {
        let mut state = self.state.lock();
        self.apply_resync(&mut state);
        state
    }

    /// Like [`lock`](Self::lock), but gives up if the state is busy.
    pub(crate) fn try_lock(&self) -> Option<MutexGuard<'_, ViewState>> {
        let mut state = self.state.try_lock()?;
        self.apply_resync(&mut state);
        Some(state)
    }

    pub(crate) fn schedule_resync(&self) {
        self.resync.store(true, Ordering::Release);
    }

    pub(crate) fn resync_pending(&self) -> bool {
        self.resync.load(Ordering::Acquire)
    }

    fn apply_resync(&self, state: &mut ViewState) {
        if !self.resync.swap(false, Ordering::AcqRel) {
            return;
        }
        tracing::debug!(target: targets::VIEW, "applying pending rebuild");
        match state.model.clone() {
            Some(model) => state.reset(model.as_ref()),
            None => state.clear(),
        }
    }
}

/// Everything the view mutates while synchronizing.
pub(crate) struct ViewState {
    shared: Weak<ViewShared>,
    pub(crate) model: Option<Arc<dyn ItemModel>>,
    model_connections: Option<ModelConnections>,
    pub(crate) tree: MenuTree,
    columns: ColumnMapping,
    factory: Arc<dyn MenuFactory>,
    relays: SecondaryMap<ActionId, RelayConnections>,
}

impl ViewState {
    fn disconnect_model(&mut self) {
        if let (Some(model), Some(connections)) = (self.model.as_ref(), self.model_connections.take()) {
            connections.disconnect(model.signals());
        }
    }
}

/// A menu tree kept in step with an item model.
///
/// The view starts without a model and with an empty root menu titled
/// `title`. See the [module documentation](self) for how rows map to nodes.
pub struct MenuView {
    shared: Arc<ViewShared>,
}

impl MenuView {
    /// Creates a view using [`DefaultMenuFactory`].
    pub fn new(title: impl Into<String>) -> Self {
        Self::with_factory(title, Arc::new(DefaultMenuFactory))
    }

    /// Creates a view whose nodes are made by `factory`.
    pub fn with_factory(title: impl Into<String>, factory: Arc<dyn MenuFactory>) -> Self {
        let root_menu = factory.create_menu(&ModelIndex::invalid());
        let tree = MenuTree::new(Action::new(title), root_menu);
        let shared = Arc::new_cyclic(|weak| ViewShared {
            state: Mutex::new(ViewState {
                shared: weak.clone(),
                model: None,
                model_connections: None,
                tree,
                columns: ColumnMapping::default(),
                factory,
                relays: SecondaryMap::new(),
            }),
            resync: AtomicBool::new(false),
            signals: MenuViewSignals::new(),
        });
        Self { shared }
    }

    /// Sets the column mapping.
    pub fn with_columns(self, columns: ColumnMapping) -> Self {
        self.set_columns(columns);
        self
    }

    /// The root menu's title.
    pub fn title(&self) -> String {
        let state = self.shared.lock();
        state
            .tree
            .action(state.tree.root())
            .map(|action| action.text())
            .unwrap_or_default()
    }

    /// Sets the root menu's title.
    pub fn set_title(&self, title: impl Into<String>) {
        let state = self.shared.lock();
        if let Some(action) = state.tree.action(state.tree.root()) {
            action.set_text(title);
        }
    }

    /// The model, if one is set.
    pub fn model(&self) -> Option<Arc<dyn ItemModel>> {
        self.shared.lock().model.clone()
    }

    /// Replaces the model and rebuilds the tree.
    ///
    /// The previous model's notifications are disconnected first. `None`
    /// leaves an empty root menu.
    #[tracing::instrument(level = "debug", target = "lattice_menuview::view", skip_all)]
    pub fn set_model(&self, model: Option<Arc<dyn ItemModel>>) {
        let mut state = self.shared.state.lock();
        self.shared.resync.store(false, Ordering::Release);

        state.disconnect_model();
        state.model = model;
        match state.model.clone() {
            Some(model) => {
                let connections = ModelConnections::connect(model.signals(), &state.shared);
                state.model_connections = Some(connections);
                state.reset(model.as_ref());
                tracing::debug!(target: targets::VIEW, nodes = state.tree.len(), "model set");
            }
            None => {
                state.clear();
                tracing::debug!(target: targets::VIEW, "model cleared");
            }
        }
    }

    /// The column mapping.
    pub fn columns(&self) -> ColumnMapping {
        self.shared.lock().columns.clone()
    }

    /// Changes the column mapping and repopulates every action.
    pub fn set_columns(&self, columns: ColumnMapping) {
        let mut state = self.shared.lock();
        if state.columns == columns {
            return;
        }
        state.columns = columns;
        if let Some(model) = state.model.clone() {
            state.repopulate_all(model.as_ref());
        }
    }

    /// The view's index-based signals.
    pub fn signals(&self) -> &MenuViewSignals {
        &self.shared.signals
    }

    /// The root menu node.
    pub fn root(&self) -> ActionId {
        self.shared.lock().tree.root()
    }

    /// The node mirroring `index`; the root for the invalid index.
    pub fn get_action(&self, index: &ModelIndex) -> Option<ActionId> {
        resolve::get_action(&self.shared.lock().tree, index)
    }

    /// The model index of node `id` at `column`.
    ///
    /// Gives the invalid index for the root, for nodes no longer in the
    /// tree and when no model is set.
    pub fn get_index(&self, id: ActionId, column: usize) -> ModelIndex {
        let state = self.shared.lock();
        match state.model.as_ref() {
            Some(model) => resolve::get_index(&state.tree, model.as_ref(), id, column),
            None => ModelIndex::invalid(),
        }
    }

    /// The action of the node mirroring `index`.
    pub fn action(&self, index: &ModelIndex) -> Option<Arc<Action>> {
        let state = self.shared.lock();
        resolve::get_action(&state.tree, index).and_then(|id| state.tree.action(id).cloned())
    }

    /// The action of node `id`.
    pub fn action_by_id(&self, id: ActionId) -> Option<Arc<Action>> {
        self.shared.lock().tree.action(id).cloned()
    }

    /// Child nodes of `id` in row order.
    pub fn children(&self, id: ActionId) -> Vec<ActionId> {
        self.shared.lock().tree.children(id).to_vec()
    }

    /// Returns `true` if `id` is a menu.
    pub fn is_menu(&self, id: ActionId) -> bool {
        self.shared.lock().tree.is_menu(id)
    }

    /// Texts of the children of `id`.
    pub fn texts(&self, id: ActionId) -> Vec<String> {
        let state = self.shared.lock();
        state
            .tree
            .children(id)
            .iter()
            .filter_map(|&child| state.tree.action(child))
            .map(|action| action.text())
            .collect()
    }

    /// Runs `f` with the menu tree borrowed.
    ///
    /// The view is locked for the duration; `f` must not call back into
    /// the view or mutate the model.
    pub fn with_tree<R>(&self, f: impl FnOnce(&MenuTree) -> R) -> R {
        f(&self.shared.lock().tree)
    }

    /// Text dump of the tree with default options.
    pub fn dump_tree(&self) -> String {
        self.dump_tree_with(TreeFormatOptions::default())
    }

    /// Text dump of the tree.
    pub fn dump_tree_with(&self, options: TreeFormatOptions) -> String {
        let state = self.shared.lock();
        MenuTreeDebug::new(&state.tree).with_options(options).format_tree()
    }

    /// Triggers the action mirroring `index`, as a click would.
    pub fn trigger(&self, index: &ModelIndex) -> Result<()> {
        let action = self.require_action(index)?;
        action.trigger();
        Ok(())
    }

    /// Hovers the action mirroring `index`.
    pub fn hover(&self, index: &ModelIndex) -> Result<()> {
        let action = self.require_action(index)?;
        action.hover();
        Ok(())
    }

    fn require_action(&self, index: &ModelIndex) -> Result<Arc<Action>> {
        if !index.is_valid() {
            return Err(Error::InvalidIndex {
                row: index.row(),
                column: index.column(),
            });
        }
        self.action(index).ok_or(Error::InvalidIndex {
            row: index.row(),
            column: index.column(),
        })
    }
}

impl std::fmt::Debug for MenuView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.lock();
        f.debug_struct("MenuView")
            .field("nodes", &state.tree.len())
            .field("has_model", &state.model.is_some())
            .field("columns", &state.columns)
            .finish()
    }
}

impl Drop for MenuView {
    fn drop(&mut self) {
        let mut state = self.shared.state.lock();
        state.disconnect_model();
        state.clear();
    }
}
