//! Data roles for item models.
//!
//! A cell can expose several facets of its value (text, icon, tooltip, check
//! state). The role selects which facet `ItemModel::data` returns.

use crate::widget::Icon;

/// Standard roles for accessing different aspects of item data.
///
/// # Example
///
/// ```ignore
/// let text = model.data(&index, ItemRole::Display);
/// let custom = model.data(&index, ItemRole::User(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ItemRole {
    /// Primary text to display. Should return `String`.
    Display,
    /// Icon or decoration to show. Should return `Icon` or an icon name.
    Decoration,
    /// Value for editing.
    Edit,
    /// Tooltip text shown on hover.
    ToolTip,
    /// Text shown in the status bar while the item is highlighted.
    StatusTip,
    /// Extended "What's This?" help text.
    WhatsThis,
    /// Check state for checkable items.
    CheckState,
    /// Application-specific data.
    User(u32),
}

impl ItemRole {
    /// Returns `true` if this is a user-defined role.
    #[inline]
    pub fn is_user_role(&self) -> bool {
        matches!(self, ItemRole::User(_))
    }
}

/// Check state for checkable items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckState {
    /// Item is unchecked.
    #[default]
    Unchecked,
    /// Item is partially checked (tri-state).
    PartiallyChecked,
    /// Item is checked.
    Checked,
}

impl CheckState {
    /// Converts the integer encoding (0, 1, 2) used by many models.
    ///
    /// Values above 2 count as checked, negative values as unchecked.
    pub fn from_int(value: i64) -> Self {
        match value {
            i64::MIN..=0 => CheckState::Unchecked,
            1 => CheckState::PartiallyChecked,
            _ => CheckState::Checked,
        }
    }

    /// Returns `true` if the item is checked (fully or partially).
    pub fn is_checked(&self) -> bool {
        !matches!(self, CheckState::Unchecked)
    }

    /// Toggles between Unchecked and Checked.
    pub fn toggle(&self) -> CheckState {
        match self {
            CheckState::Unchecked => CheckState::Checked,
            CheckState::PartiallyChecked | CheckState::Checked => CheckState::Unchecked,
        }
    }
}

impl From<bool> for CheckState {
    fn from(checked: bool) -> Self {
        if checked {
            CheckState::Checked
        } else {
            CheckState::Unchecked
        }
    }
}

/// Value stored under a role.
///
/// `ItemData::None` means "no data for this role", which views treat
/// differently from an empty string.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ItemData {
    /// No data.
    #[default]
    None,
    /// String data (Display, ToolTip, ...).
    String(String),
    /// Integer data.
    Int(i64),
    /// Boolean data.
    Bool(bool),
    /// Icon data.
    Icon(Icon),
    /// Check state data.
    CheckState(CheckState),
}

impl ItemData {
    /// Returns `true` if this is `ItemData::None`.
    pub fn is_none(&self) -> bool {
        matches!(self, ItemData::None)
    }

    /// Returns `true` if this contains some data.
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// The data as a string slice.
    pub fn as_string(&self) -> Option<&str> {
        match self {
            ItemData::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// The data as an owned string.
    pub fn into_string(self) -> Option<String> {
        match self {
            ItemData::String(s) => Some(s),
            _ => None,
        }
    }

    /// The data rendered as display text.
    ///
    /// Numbers and booleans are formatted; icons and check states have no text.
    pub fn to_text(&self) -> Option<String> {
        match self {
            ItemData::String(s) => Some(s.clone()),
            ItemData::Int(n) => Some(n.to_string()),
            ItemData::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// The data as an integer.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ItemData::Int(n) => Some(*n),
            _ => None,
        }
    }

    /// The data as a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ItemData::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The data as an icon.
    pub fn as_icon(&self) -> Option<&Icon> {
        match self {
            ItemData::Icon(icon) => Some(icon),
            _ => None,
        }
    }

    /// The data as a check state.
    pub fn as_check_state(&self) -> Option<CheckState> {
        match self {
            ItemData::CheckState(state) => Some(*state),
            _ => None,
        }
    }
}

impl From<String> for ItemData {
    fn from(s: String) -> Self {
        ItemData::String(s)
    }
}

impl From<&str> for ItemData {
    fn from(s: &str) -> Self {
        ItemData::String(s.to_string())
    }
}

impl From<i64> for ItemData {
    fn from(n: i64) -> Self {
        ItemData::Int(n)
    }
}

impl From<i32> for ItemData {
    fn from(n: i32) -> Self {
        ItemData::Int(i64::from(n))
    }
}

impl From<bool> for ItemData {
    fn from(b: bool) -> Self {
        ItemData::Bool(b)
    }
}

impl From<Icon> for ItemData {
    fn from(icon: Icon) -> Self {
        ItemData::Icon(icon)
    }
}

impl From<CheckState> for ItemData {
    fn from(state: CheckState) -> Self {
        ItemData::CheckState(state)
    }
}

impl<T: Into<ItemData>> From<Option<T>> for ItemData {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(ItemData::None, Into::into)
    }
}
