//! Construction hooks for menu nodes.

use crate::model::ModelIndex;
use crate::widget::{Action, Menu};

/// Creates the actions and menus of a [`MenuView`](super::MenuView).
///
/// The view fills in every mapped attribute after creation, so a factory
/// only sets what the model does not provide (for example a fixed icon
/// text or menu-wide tooltip visibility).
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use lattice_menuview::model::ModelIndex;
/// use lattice_menuview::view::{MenuFactory, MenuView};
/// use lattice_menuview::widget::Menu;
///
/// struct TooltipMenus;
///
/// impl MenuFactory for TooltipMenus {
///     fn create_menu(&self, _index: &ModelIndex) -> Menu {
///         Menu::new().with_tooltips_visible(true)
///     }
/// }
///
/// let view = MenuView::with_factory("Main", Arc::new(TooltipMenus));
/// assert_eq!(view.title(), "Main");
/// ```
pub trait MenuFactory: Send + Sync {
    /// Creates the action for the row at `index`.
    fn create_action(&self, _index: &ModelIndex) -> Action {
        Action::new("")
    }

    /// Creates the menu for the row at `index`.
    ///
    /// Called with the invalid index for the root menu, and whenever a leaf
    /// gains its first child.
    fn create_menu(&self, _index: &ModelIndex) -> Menu {
        Menu::new()
    }
}

/// Factory producing plain actions and menus.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultMenuFactory;

impl MenuFactory for DefaultMenuFactory {}
