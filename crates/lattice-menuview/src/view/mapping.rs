//! Column mapping and action attribute population.
//!
//! Every action attribute is read from one cell of the action's model row.
//! [`ColumnMapping`] says which column feeds which attribute; the role used
//! for each attribute is fixed.

use lattice_menuview_core::SignalBlocker;
use lattice_menuview_core::logging::targets;

use crate::model::{ItemData, ItemModel, ItemRole, ModelIndex};
use crate::widget::{Action, Icon};

/// An action attribute that can be sourced from a model column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionAttribute {
    /// Action text, from the display role.
    Text,
    /// Action icon, from the decoration role.
    Icon,
    /// Short icon text, from the display role.
    IconText,
    /// Tooltip, from the tooltip role.
    ToolTip,
    /// Checked state, from the check-state role.
    Checked,
    /// "What's This?" text, from the what's-this role.
    WhatsThis,
    /// Status bar text, from the status-tip role.
    StatusTip,
}

impl ActionAttribute {
    /// All attributes in population order.
    pub const ALL: [ActionAttribute; 7] = [
        ActionAttribute::Text,
        ActionAttribute::Icon,
        ActionAttribute::IconText,
        ActionAttribute::ToolTip,
        ActionAttribute::Checked,
        ActionAttribute::WhatsThis,
        ActionAttribute::StatusTip,
    ];

    /// The data role the attribute is read from.
    pub fn role(self) -> ItemRole {
        match self {
            ActionAttribute::Text | ActionAttribute::IconText => ItemRole::Display,
            ActionAttribute::Icon => ItemRole::Decoration,
            ActionAttribute::ToolTip => ItemRole::ToolTip,
            ActionAttribute::Checked => ItemRole::CheckState,
            ActionAttribute::WhatsThis => ItemRole::WhatsThis,
            ActionAttribute::StatusTip => ItemRole::StatusTip,
        }
    }

    /// Converts the cell value and assigns it to the action.
    ///
    /// Returns `false` when the value cannot be converted; the attribute is
    /// then left as it was.
    fn apply(self, action: &Action, data: &ItemData) -> bool {
        match self {
            ActionAttribute::Icon => match to_icon(data) {
                Some(icon) => action.set_icon(Some(icon)),
                None => return false,
            },
            ActionAttribute::Checked => match to_checked(data) {
                Some(checked) => action.set_checked(checked),
                None => return false,
            },
            _ => {
                let Some(text) = data.to_text() else {
                    return false;
                };
                match self {
                    ActionAttribute::Text => action.set_text(text),
                    ActionAttribute::IconText => action.set_icon_text(text),
                    ActionAttribute::ToolTip => action.set_tooltip(text),
                    ActionAttribute::WhatsThis => action.set_whats_this(text),
                    _ => action.set_status_tip(text),
                }
            }
        }
        true
    }
}

/// Icons come as icon values or as theme names.
fn to_icon(data: &ItemData) -> Option<Icon> {
    match data {
        ItemData::Icon(icon) => Some(icon.clone()),
        ItemData::String(name) if !name.is_empty() => Some(Icon::from_theme(name.as_str())),
        _ => None,
    }
}

/// Check states come as check states, booleans or integers.
fn to_checked(data: &ItemData) -> Option<bool> {
    match data {
        ItemData::CheckState(state) => Some(state.is_checked()),
        ItemData::Bool(checked) => Some(*checked),
        ItemData::Int(value) => Some(crate::model::CheckState::from_int(*value).is_checked()),
        _ => None,
    }
}

/// Which model column feeds which action attribute.
///
/// `None` means the attribute is not mapped. By default the text and icon
/// come from column 0 and everything else is unmapped.
///
/// # Example
///
/// ```
/// use lattice_menuview::ColumnMapping;
///
/// let columns = ColumnMapping::default()
///     .with_tooltip_column(1)
///     .with_checked_column(2);
///
/// assert_eq!(columns.source_columns(), vec![0, 1, 2]);
/// assert!(columns.intersects(2, 5));
/// assert!(!columns.intersects(3, 5));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize), serde(default))]
pub struct ColumnMapping {
    /// Column of the action text.
    pub text: Option<usize>,
    /// Column of the icon.
    pub icon: Option<usize>,
    /// Column of the icon text.
    pub icon_text: Option<usize>,
    /// Column of the tooltip.
    pub tooltip: Option<usize>,
    /// Column whose check state (and checkable flag) drive the action.
    pub checked: Option<usize>,
    /// Column of the "What's This?" text.
    pub whats_this: Option<usize>,
    /// Column of the status tip.
    pub status_tip: Option<usize>,
}

impl Default for ColumnMapping {
    fn default() -> Self {
        Self {
            text: Some(0),
            icon: Some(0),
            icon_text: None,
            tooltip: None,
            checked: None,
            whats_this: None,
            status_tip: None,
        }
    }
}

impl ColumnMapping {
    /// A mapping with every attribute unmapped.
    pub fn unmapped() -> Self {
        Self {
            text: None,
            icon: None,
            ..Self::default()
        }
    }

    /// Sets the text column.
    pub fn with_text_column(mut self, column: impl Into<Option<usize>>) -> Self {
        self.text = column.into();
        self
    }

    /// Sets the icon column.
    pub fn with_icon_column(mut self, column: impl Into<Option<usize>>) -> Self {
        self.icon = column.into();
        self
    }

    /// Sets the icon text column.
    pub fn with_icon_text_column(mut self, column: impl Into<Option<usize>>) -> Self {
        self.icon_text = column.into();
        self
    }

    /// Sets the tooltip column.
    pub fn with_tooltip_column(mut self, column: impl Into<Option<usize>>) -> Self {
        self.tooltip = column.into();
        self
    }

    /// Sets the checked column.
    pub fn with_checked_column(mut self, column: impl Into<Option<usize>>) -> Self {
        self.checked = column.into();
        self
    }

    /// Sets the "What's This?" column.
    pub fn with_whats_this_column(mut self, column: impl Into<Option<usize>>) -> Self {
        self.whats_this = column.into();
        self
    }

    /// Sets the status tip column.
    pub fn with_status_tip_column(mut self, column: impl Into<Option<usize>>) -> Self {
        self.status_tip = column.into();
        self
    }

    /// The column mapped to an attribute.
    pub fn column(&self, attribute: ActionAttribute) -> Option<usize> {
        match attribute {
            ActionAttribute::Text => self.text,
            ActionAttribute::Icon => self.icon,
            ActionAttribute::IconText => self.icon_text,
            ActionAttribute::ToolTip => self.tooltip,
            ActionAttribute::Checked => self.checked,
            ActionAttribute::WhatsThis => self.whats_this,
            ActionAttribute::StatusTip => self.status_tip,
        }
    }

    /// Distinct mapped columns, ascending.
    pub fn source_columns(&self) -> Vec<usize> {
        let mut columns: Vec<usize> = ActionAttribute::ALL
            .iter()
            .filter_map(|&attribute| self.column(attribute))
            .collect();
        columns.sort_unstable();
        columns.dedup();
        columns
    }

    /// Returns `true` if any mapped column lies in `first..=last`.
    pub fn intersects(&self, first: usize, last: usize) -> bool {
        ActionAttribute::ALL
            .iter()
            .filter_map(|&attribute| self.column(attribute))
            .any(|column| (first..=last).contains(&column))
    }
}

/// Copies the data of `index`'s row into `action`.
///
/// Enabled comes from the column-0 flags and checkable from the flags of
/// the checked column; checkable is assigned before the checked state.
/// Cells without data leave their attribute untouched. `toggled` is blocked
/// while the state is written so no view-level signal fires.
pub(crate) fn populate(model: &dyn ItemModel, index: &ModelIndex, action: &Action, columns: &ColumnMapping) {
    if !index.is_valid() {
        return;
    }
    let _blocked = SignalBlocker::new(&action.toggled);
    let row = index.row();

    let first = model.sibling(index, row, 0);
    action.set_enabled(model.flags(&first).enabled);

    let checkable = columns
        .checked
        .map(|column| model.sibling(index, row, column))
        .is_some_and(|cell| cell.is_valid() && model.flags(&cell).checkable);
    action.set_checkable(checkable);

    for attribute in ActionAttribute::ALL {
        let Some(column) = columns.column(attribute) else {
            continue;
        };
        let cell = model.sibling(index, row, column);
        let data = model.data(&cell, attribute.role());
        if data.is_none() {
            continue;
        }
        if !attribute.apply(action, &data) {
            tracing::trace!(
                target: targets::SYNC,
                ?attribute,
                column,
                "cell value has no conversion for attribute"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CheckState, ItemFlags, StandardItem, TreeModel};

    fn single_row(item: StandardItem, columns: usize) -> (TreeModel<StandardItem>, ModelIndex) {
        let model = TreeModel::new().with_column_count(columns);
        model.append_row(None, item);
        let index = model.index(0, 0, &ModelIndex::invalid());
        (model, index)
    }

    #[test]
    fn test_default_mapping() {
        let columns = ColumnMapping::default();
        assert_eq!(columns.text, Some(0));
        assert_eq!(columns.icon, Some(0));
        assert_eq!(columns.checked, None);
        assert_eq!(columns.source_columns(), vec![0]);
        assert!(!ColumnMapping::unmapped().intersects(0, usize::MAX));
    }

    #[test]
    fn test_populate_text_icon_tooltip() {
        let (model, index) = single_row(
            StandardItem::new("Soup")
                .with_data(0, ItemRole::Decoration, "bowl")
                .with_text(1, "Hot and sour"),
            2,
        );
        let action = Action::new("");
        let columns = ColumnMapping::default().with_tooltip_column(1);

        populate(&model, &index, &action, &columns);

        assert_eq!(action.text(), "Soup");
        assert_eq!(action.icon(), Some(Icon::from_theme("bowl")));
        // The tooltip column has display text but no tooltip role data.
        assert_eq!(action.tooltip(), "");
    }

    #[test]
    fn test_missing_data_keeps_attribute() {
        let (model, index) = single_row(StandardItem::default(), 1);
        let action = Action::new("kept");

        populate(&model, &index, &action, &ColumnMapping::default());
        assert_eq!(action.text(), "kept");
    }

    #[test]
    fn test_checked_column() {
        let (model, index) = single_row(
            StandardItem::new("Spicy").with_check_state(1, CheckState::Checked),
            2,
        );
        let action = Action::new("");
        let toggles = std::sync::Arc::new(parking_lot::Mutex::new(0));
        let t = toggles.clone();
        action.toggled.connect(move |_| *t.lock() += 1);

        populate(&model, &index, &action, &ColumnMapping::default().with_checked_column(1));

        assert!(action.is_checkable());
        assert!(action.is_checked());
        assert_eq!(*toggles.lock(), 0);
    }

    #[test]
    fn test_checked_column_on_non_checkable_cell() {
        let (model, index) = single_row(
            StandardItem::new("Plain").with_data(1, ItemRole::CheckState, CheckState::Checked),
            2,
        );
        let action = Action::new("");

        populate(&model, &index, &action, &ColumnMapping::default().with_checked_column(1));

        assert!(!action.is_checkable());
        assert!(!action.is_checked());
    }

    #[test]
    fn test_enabled_from_first_column_flags() {
        let (model, index) = single_row(
            StandardItem::new("Sold out").with_flags(0, ItemFlags::new().with_enabled(false)),
            1,
        );
        let action = Action::new("");

        populate(&model, &index, &action, &ColumnMapping::default());
        assert!(!action.is_enabled());
    }

    #[test]
    fn test_converters() {
        assert_eq!(to_checked(&ItemData::Int(2)), Some(true));
        assert_eq!(to_checked(&ItemData::Int(0)), Some(false));
        assert_eq!(to_checked(&ItemData::Bool(true)), Some(true));
        assert_eq!(to_checked(&ItemData::from("yes")), None);
        assert_eq!(to_icon(&ItemData::from("")), None);
    }
}
