//! Actions shown as menu entries.
//!
//! An [`Action`] is a non-visual command: text, icon, tooltips, enabled and
//! checked state, plus the signals a menu emits when the user interacts with
//! the entry. Every node of a [`MenuTree`](super::MenuTree) owns one.
//!
//! # Example
//!
//! ```
//! use lattice_menuview::widget::Action;
//!
//! let bold = Action::new("Bold").with_checkable(true);
//! bold.toggled.connect(|&checked| {
//!     println!("Bold is now: {}", if checked { "on" } else { "off" });
//! });
//!
//! bold.trigger();
//! assert!(bold.is_checked());
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use lattice_menuview_core::Signal;
use parking_lot::RwLock;

use super::icon::Icon;

/// Internal mutable state of an action.
#[derive(Debug, Clone)]
struct ActionState {
    text: String,
    icon: Option<Icon>,
    icon_text: String,
    tooltip: String,
    status_tip: String,
    whats_this: String,
    enabled: bool,
    visible: bool,
    checkable: bool,
    checked: bool,
}

/// A non-visual object representing a menu command.
///
/// # Signals
///
/// - [`triggered`](Action::triggered): Emitted when the action is activated
/// - [`toggled`](Action::toggled): Emitted when a checkable action's state changes
/// - [`changed`](Action::changed): Emitted when any property changes
/// - [`hovered`](Action::hovered): Emitted when the action is highlighted
pub struct Action {
    state: RwLock<ActionState>,

    /// Generation counter, bumped on every property change.
    generation: AtomicU64,

    /// Signal emitted when the action is activated.
    ///
    /// For checkable actions, this is emitted after the checked state changes.
    /// The parameter is the checked state (always false for non-checkable actions).
    pub triggered: Signal<bool>,

    /// Signal emitted when a checkable action's state changes.
    pub toggled: Signal<bool>,

    /// Signal emitted when any action property changes.
    pub changed: Signal<()>,

    /// Signal emitted when the action is hovered (highlighted in a menu).
    pub hovered: Signal<()>,
}

impl Default for Action {
    fn default() -> Self {
        Self::new("")
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.read();
        f.debug_struct("Action")
            .field("text", &state.text)
            .field("enabled", &state.enabled)
            .field("checkable", &state.checkable)
            .field("checked", &state.checked)
            .finish_non_exhaustive()
    }
}

impl Action {
    /// Create a new action with the given text.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            state: RwLock::new(ActionState {
                text: text.into(),
                icon: None,
                icon_text: String::new(),
                tooltip: String::new(),
                status_tip: String::new(),
                whats_this: String::new(),
                enabled: true,
                visible: true,
                checkable: false,
                checked: false,
            }),
            generation: AtomicU64::new(0),
            triggered: Signal::new(),
            toggled: Signal::new(),
            changed: Signal::new(),
            hovered: Signal::new(),
        }
    }

    /// Applies `update` to the state and emits `changed` if it reports a change.
    fn update(&self, update: impl FnOnce(&mut ActionState) -> bool) {
        let changed = update(&mut *self.state.write());
        if changed {
            self.emit_changed();
        }
    }

    // ========================================================================
    // Text
    // ========================================================================

    /// Get the action's text.
    pub fn text(&self) -> String {
        self.state.read().text.clone()
    }

    /// Set the action's text.
    pub fn set_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|state| replace_if_changed(&mut state.text, text));
    }

    /// Text shown next to the icon where space is tight; falls back to the text.
    pub fn icon_text(&self) -> String {
        let state = self.state.read();
        if state.icon_text.is_empty() {
            state.text.clone()
        } else {
            state.icon_text.clone()
        }
    }

    /// Set the icon text.
    pub fn set_icon_text(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|state| replace_if_changed(&mut state.icon_text, text));
    }

    // ========================================================================
    // Icon
    // ========================================================================

    /// Get the action's icon.
    pub fn icon(&self) -> Option<Icon> {
        self.state.read().icon.clone()
    }

    /// Set the action's icon.
    pub fn set_icon(&self, icon: Option<Icon>) {
        self.update(|state| replace_if_changed(&mut state.icon, icon));
    }

    /// Builder pattern for setting icon.
    pub fn with_icon(self, icon: Icon) -> Self {
        self.set_icon(Some(icon));
        self
    }

    // ========================================================================
    // Help Texts
    // ========================================================================

    /// Get the tooltip.
    pub fn tooltip(&self) -> String {
        self.state.read().tooltip.clone()
    }

    /// Set the tooltip.
    pub fn set_tooltip(&self, tooltip: impl Into<String>) {
        let tooltip = tooltip.into();
        self.update(|state| replace_if_changed(&mut state.tooltip, tooltip));
    }

    /// Builder pattern for setting tooltip.
    pub fn with_tooltip(self, tooltip: impl Into<String>) -> Self {
        self.set_tooltip(tooltip);
        self
    }

    /// Get the status bar tip.
    pub fn status_tip(&self) -> String {
        self.state.read().status_tip.clone()
    }

    /// Set the status bar tip.
    pub fn set_status_tip(&self, tip: impl Into<String>) {
        let tip = tip.into();
        self.update(|state| replace_if_changed(&mut state.status_tip, tip));
    }

    /// Get the "What's This?" help text.
    pub fn whats_this(&self) -> String {
        self.state.read().whats_this.clone()
    }

    /// Set the "What's This?" help text.
    pub fn set_whats_this(&self, text: impl Into<String>) {
        let text = text.into();
        self.update(|state| replace_if_changed(&mut state.whats_this, text));
    }

    // ========================================================================
    // Enabled / Visible
    // ========================================================================

    /// Check if the action is enabled.
    pub fn is_enabled(&self) -> bool {
        self.state.read().enabled
    }

    /// Set whether the action is enabled.
    pub fn set_enabled(&self, enabled: bool) {
        self.update(|state| replace_if_changed(&mut state.enabled, enabled));
    }

    /// Builder pattern for setting enabled state.
    pub fn with_enabled(self, enabled: bool) -> Self {
        self.set_enabled(enabled);
        self
    }

    /// Check if the action is visible.
    pub fn is_visible(&self) -> bool {
        self.state.read().visible
    }

    /// Set whether the action is visible.
    pub fn set_visible(&self, visible: bool) {
        self.update(|state| replace_if_changed(&mut state.visible, visible));
    }

    // ========================================================================
    // Checkable State
    // ========================================================================

    /// Check if the action is checkable.
    pub fn is_checkable(&self) -> bool {
        self.state.read().checkable
    }

    /// Set whether the action is checkable.
    ///
    /// Making a checked action non-checkable also unchecks it.
    pub fn set_checkable(&self, checkable: bool) {
        let should_uncheck;
        {
            let mut state = self.state.write();
            if state.checkable == checkable {
                return;
            }
            state.checkable = checkable;
            should_uncheck = !checkable && state.checked;
            if should_uncheck {
                state.checked = false;
            }
        }
        if should_uncheck {
            self.toggled.emit(false);
        }
        self.emit_changed();
    }

    /// Builder pattern for setting checkable state.
    pub fn with_checkable(self, checkable: bool) -> Self {
        self.set_checkable(checkable);
        self
    }

    /// Check if the action is currently checked.
    pub fn is_checked(&self) -> bool {
        self.state.read().checked
    }

    /// Set the checked state.
    ///
    /// Only has effect if the action is checkable.
    pub fn set_checked(&self, checked: bool) {
        {
            let mut state = self.state.write();
            if !state.checkable || state.checked == checked {
                return;
            }
            state.checked = checked;
        }
        self.toggled.emit(checked);
        self.emit_changed();
    }

    /// Builder pattern for setting checked state.
    pub fn with_checked(self, checked: bool) -> Self {
        self.set_checked(checked);
        self
    }

    /// Toggle the checked state.
    ///
    /// Only has effect if the action is checkable.
    pub fn toggle(&self) {
        let checked = {
            let mut state = self.state.write();
            if !state.checkable {
                return;
            }
            state.checked = !state.checked;
            state.checked
        };
        self.toggled.emit(checked);
        self.emit_changed();
    }

    // ========================================================================
    // Activation
    // ========================================================================

    /// Trigger the action programmatically.
    ///
    /// This behaves as if the user activated the action. Disabled actions
    /// ignore the call. Checkable actions toggle and emit `toggled` before
    /// `triggered`.
    pub fn trigger(&self) {
        let (checkable, checked) = {
            let mut state = self.state.write();
            if !state.enabled {
                return;
            }
            if state.checkable {
                state.checked = !state.checked;
            }
            (state.checkable, state.checked)
        };

        if checkable {
            self.toggled.emit(checked);
            self.emit_changed();
        }
        self.triggered.emit(checked);
    }

    /// Emit the hovered signal.
    ///
    /// Called when the action is highlighted in a menu.
    pub fn hover(&self) {
        self.hovered.emit(());
    }

    // ========================================================================
    // Change Detection
    // ========================================================================

    /// Get the current generation counter.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Blocks or unblocks every signal of this action.
    pub fn block_signals(&self, blocked: bool) {
        self.triggered.set_blocked(blocked);
        self.toggled.set_blocked(blocked);
        self.changed.set_blocked(blocked);
        self.hovered.set_blocked(blocked);
    }

    fn emit_changed(&self) {
        self.generation.fetch_add(1, Ordering::Release);
        self.changed.emit(());
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn test_action_defaults() {
        let action = Action::new("Open");
        assert_eq!(action.text(), "Open");
        assert_eq!(action.icon_text(), "Open");
        assert!(action.is_enabled());
        assert!(action.is_visible());
        assert!(!action.is_checkable());
        assert!(!action.is_checked());
        assert!(action.icon().is_none());
    }

    #[test]
    fn test_set_checked_requires_checkable() {
        let action = Action::new("Wrap");
        action.set_checked(true);
        assert!(!action.is_checked());

        action.set_checkable(true);
        action.set_checked(true);
        assert!(action.is_checked());

        action.set_checkable(false);
        assert!(!action.is_checked());
    }

    #[test]
    fn test_trigger_checkable_emits_toggled_then_triggered() {
        let action = Action::new("Bold").with_checkable(true);
        let events = Arc::new(Mutex::new(Vec::new()));

        let e = events.clone();
        action.toggled.connect(move |&c| e.lock().push(("toggled", c)));
        let e = events.clone();
        action.triggered.connect(move |&c| e.lock().push(("triggered", c)));

        action.trigger();
        action.trigger();

        assert_eq!(
            *events.lock(),
            vec![
                ("toggled", true),
                ("triggered", true),
                ("toggled", false),
                ("triggered", false)
            ]
        );
    }

    #[test]
    fn test_disabled_action_ignores_trigger() {
        let action = Action::new("Quit").with_enabled(false);
        let count = Arc::new(Mutex::new(0));
        let c = count.clone();
        action.triggered.connect(move |_| *c.lock() += 1);

        action.trigger();
        assert_eq!(*count.lock(), 0);
    }

    #[test]
    fn test_changed_only_on_real_change() {
        let action = Action::new("Cut");
        let count = Arc::new(Mutex::new(0));
        let c = count.clone();
        action.changed.connect(move |_| *c.lock() += 1);

        action.set_text("Cut");
        action.set_text("Cut selection");
        action.set_tooltip("Move to clipboard");
        action.set_icon(Some(Icon::from_theme("edit-cut")));
        action.set_icon(Some(Icon::from_theme("edit-cut")));

        assert_eq!(*count.lock(), 3);
        assert_eq!(action.generation(), 3);
    }

    #[test]
    fn test_block_signals() {
        let action = Action::new("Paste");
        let count = Arc::new(Mutex::new(0));
        let c = count.clone();
        action.hovered.connect(move |_| *c.lock() += 1);

        action.block_signals(true);
        action.hover();
        action.block_signals(false);
        action.hover();

        assert_eq!(*count.lock(), 1);
    }
}
