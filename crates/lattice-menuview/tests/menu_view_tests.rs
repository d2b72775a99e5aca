//! Tests for keeping a menu view in step with a tree model.

use std::sync::Arc;

use parking_lot::Mutex;

use lattice_menuview::model::{
    CheckState, ItemFlags, ItemModel, ItemRole, ModelIndex, NodeId, StandardItem, TreeBranch, TreeModel,
};
use lattice_menuview::view::{ColumnMapping, MenuView, level_order};
use lattice_menuview::widget::{Action, ActionId};
use lattice_menuview::{Error, TreeFormatOptions, TreeStyle};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// `testrow0` .. `testrow{rows - 1}` at the top level.
fn flat_model(rows: usize) -> Arc<TreeModel<StandardItem>> {
    let model = Arc::new(TreeModel::new());
    for row in 0..rows {
        model.append_row(None, StandardItem::new(format!("testrow{row}")));
    }
    model
}

/// `parents` top-level rows with `children` rows `testrowI:J` each.
fn tree_model(parents: usize, children: usize) -> (Arc<TreeModel<StandardItem>>, Vec<NodeId>) {
    let model = Arc::new(TreeModel::new());
    let branches = (0..parents)
        .map(|i| {
            TreeBranch::new(StandardItem::new(format!("testrow{i}")))
                .with_children((0..children).map(|j| StandardItem::new(format!("testrow{i}:{j}"))))
        })
        .collect();
    model.replace_roots(branches);
    let ids = model.children(None);
    (model, ids)
}

fn view_of(model: &Arc<TreeModel<StandardItem>>) -> MenuView {
    init_tracing();
    let view = MenuView::new("Menu");
    view.set_model(Some(model.clone()));
    view
}

fn top(row: usize) -> ModelIndex {
    ModelIndex::new(row, 0, ModelIndex::invalid())
}

/// Asserts that the subtree below `parent` has the model's shape and texts.
fn assert_mirrors(view: &MenuView, model: &dyn ItemModel, parent: &ModelIndex) {
    let id = view.get_action(parent).expect("parent has a node");
    let children = view.children(id);
    let rows = model.row_count(parent);
    assert_eq!(children.len(), rows, "child count under {parent:?}");
    if parent.is_valid() {
        assert_eq!(view.is_menu(id), rows > 0, "menu kind of {parent:?}");
    }

    let texts = view.texts(id);
    for row in 0..rows {
        let index = model.index(row, 0, parent);
        assert_eq!(Some(texts[row].clone()), model.display_text(&index));
        assert_eq!(view.get_action(&index), Some(children[row]));
        assert_eq!(view.get_index(children[row], 0), index);
        assert_mirrors(view, model, &index);
    }
}

fn recorder<T: Clone + Send + 'static>() -> (Arc<Mutex<Vec<T>>>, impl Fn(&T) + Send + Sync + 'static) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    (seen, move |value: &T| sink.lock().push(value.clone()))
}

#[test]
fn test_flat_rows() {
    let model = flat_model(10);
    let view = view_of(&model);

    let expected: Vec<String> = (0..10).map(|row| format!("testrow{row}")).collect();
    assert_eq!(view.texts(view.root()), expected);
    for id in view.children(view.root()) {
        assert!(!view.is_menu(id));
    }
}

#[test]
fn test_tree_rows() {
    let (model, _) = tree_model(10, 10);
    let view = view_of(&model);

    let top_level = view.children(view.root());
    assert_eq!(top_level.len(), 10);
    for (i, &id) in top_level.iter().enumerate() {
        assert!(view.is_menu(id));
        let expected: Vec<String> = (0..10).map(|j| format!("testrow{i}:{j}")).collect();
        assert_eq!(view.texts(id), expected);
    }
    assert_mirrors(&view, model.as_ref(), &ModelIndex::invalid());
}

#[test]
fn test_remove_child_range() {
    let (model, parents) = tree_model(10, 10);
    let view = view_of(&model);

    assert!(model.remove_rows(Some(parents[2]), 3, 5).is_some());

    let parent = view.get_action(&top(2)).unwrap();
    assert_eq!(
        view.texts(parent),
        vec!["testrow2:0", "testrow2:1", "testrow2:2", "testrow2:8", "testrow2:9"]
    );
    assert_mirrors(&view, model.as_ref(), &ModelIndex::invalid());
}

#[test]
fn test_remove_all_children_demotes_parent() {
    let (model, parents) = tree_model(10, 10);
    let view = view_of(&model);

    model.remove_rows(Some(parents[2]), 0, 10);

    let parent = view.get_action(&top(2)).unwrap();
    assert!(!view.is_menu(parent));
    assert!(view.children(parent).is_empty());
    assert!(view.is_menu(view.get_action(&top(3)).unwrap()));
}

#[test]
fn test_data_changed_updates_only_that_action() {
    let model = flat_model(10);
    let view = view_of(&model);
    let before: Vec<Arc<Action>> = (0..10).map(|row| view.action(&top(row)).unwrap()).collect();

    let id = model.children(None)[4];
    assert!(model.set_data(id, 0, ItemRole::Display, "renamed"));

    let after: Vec<Arc<Action>> = (0..10).map(|row| view.action(&top(row)).unwrap()).collect();
    assert_eq!(after[4].text(), "renamed");
    for (old, new) in before.iter().zip(&after) {
        assert!(Arc::ptr_eq(old, new), "actions are updated in place");
    }
    assert_eq!(after[3].text(), "testrow3");
}

#[test]
fn test_data_changed_on_unmapped_column_is_skipped() {
    let model = Arc::new(TreeModel::new().with_column_count(3));
    let id = model
        .append_row(None, StandardItem::new("soup").with_tooltip("hot"))
        .unwrap();
    let view = view_of(&model);
    view.set_columns(ColumnMapping::default().with_status_tip_column(1));

    let action = view.action(&top(0)).unwrap();
    action.set_text("edited by hand");

    model.set_data(id, 2, ItemRole::Display, "ignored");
    assert_eq!(action.text(), "edited by hand");

    model.set_data(id, 1, ItemRole::StatusTip, "ready");
    assert_eq!(action.status_tip(), "ready");
    assert_eq!(action.text(), "soup");
}

#[test]
fn test_round_trip() {
    let (model, _) = tree_model(4, 3);
    let view = view_of(&model);

    for index in level_order(model.as_ref(), &ModelIndex::invalid()) {
        let id = view.get_action(&index).unwrap();
        assert_eq!(view.get_index(id, 0), index);
    }
    assert!(!view.get_index(view.root(), 0).is_valid());
    assert_eq!(view.get_action(&ModelIndex::invalid()), Some(view.root()));
}

#[test]
fn test_get_index_column() {
    let model = Arc::new(TreeModel::new().with_column_count(2));
    let parent = model.append_row(None, StandardItem::new("a")).unwrap();
    model.append_row(Some(parent), StandardItem::new("a0").with_text(1, "second"));
    let view = view_of(&model);

    let id = view.children(view.children(view.root())[0])[0];
    let index = view.get_index(id, 1);
    assert_eq!(index.column(), 1);
    assert_eq!(model.display_text(&index).as_deref(), Some("second"));
}

#[test]
fn test_level_order() {
    let (model, _) = tree_model(3, 2);
    let order = level_order(model.as_ref(), &ModelIndex::invalid());
    let texts: Vec<String> = order
        .iter()
        .filter_map(|index| model.display_text(index))
        .collect();
    assert_eq!(
        texts,
        vec![
            "testrow0", "testrow1", "testrow2", "testrow0:0", "testrow0:1", "testrow1:0", "testrow1:1",
            "testrow2:0", "testrow2:1",
        ]
    );

    let below = level_order(model.as_ref(), &top(1));
    assert_eq!(below.len(), 2);
    assert!(below.iter().all(|index| index.parent() == top(1)));
}

#[test]
fn test_insert_rows() {
    let (model, parents) = tree_model(3, 3);
    let view = view_of(&model);

    model.insert_rows(
        Some(parents[1]),
        1,
        vec![StandardItem::new("new a"), StandardItem::new("new b")],
    );
    model.insert_rows(None, 0, vec![StandardItem::new("first")]);

    let parent = view.get_action(&top(2)).unwrap();
    assert_eq!(
        view.texts(parent),
        vec!["testrow1:0", "new a", "new b", "testrow1:1", "testrow1:2"]
    );
    assert_eq!(view.texts(view.root())[0], "first");
    assert_mirrors(&view, model.as_ref(), &ModelIndex::invalid());
}

#[test]
fn test_insert_branch_creates_descendants() {
    let model = flat_model(2);
    let view = view_of(&model);

    let branch = TreeBranch::new(StandardItem::new("Drinks"))
        .with_child(TreeBranch::new(StandardItem::new("Tea")).with_child(StandardItem::new("Green")))
        .with_child(StandardItem::new("Water"));
    model.insert_branch(None, 1, branch);

    assert_eq!(view.texts(view.root()), vec!["testrow0", "Drinks", "testrow1"]);
    let drinks = view.get_action(&top(1)).unwrap();
    assert!(view.is_menu(drinks));
    assert_eq!(view.texts(drinks), vec!["Tea", "Water"]);
    assert_mirrors(&view, model.as_ref(), &ModelIndex::invalid());
}

#[test]
fn test_leaf_promoted_on_first_child() {
    let model = flat_model(3);
    let view = view_of(&model);
    let leaf = view.get_action(&top(1)).unwrap();
    assert!(!view.is_menu(leaf));

    let parent = model.children(None)[1];
    model.append_row(Some(parent), StandardItem::new("child"));

    assert_eq!(view.get_action(&top(1)), Some(leaf));
    assert!(view.is_menu(leaf));
    assert_eq!(view.texts(leaf), vec!["child"]);

    model.remove_rows(Some(parent), 0, 1);
    assert!(!view.is_menu(leaf));
}

#[test]
fn test_rebind_same_model() {
    let (model, _) = tree_model(3, 2);
    let view = view_of(&model);
    let first = view.dump_tree_with(TreeFormatOptions::minimal());

    view.set_model(Some(model.clone()));
    assert_eq!(view.dump_tree_with(TreeFormatOptions::minimal()), first);
    assert_eq!(model.signals().rows_inserted.connection_count(), 1);
}

#[test]
fn test_rebind_disconnects_old_model() {
    let old = flat_model(2);
    let view = view_of(&old);
    let new = flat_model(3);
    view.set_model(Some(new.clone()));

    old.append_row(None, StandardItem::new("ignored"));
    assert_eq!(view.children(view.root()).len(), 3);
    assert_eq!(old.signals().rows_inserted.connection_count(), 0);

    new.append_row(None, StandardItem::new("seen"));
    assert_eq!(view.texts(view.root()).last().map(String::as_str), Some("seen"));
}

#[test]
fn test_model_reset_and_clear() {
    let (model, _) = tree_model(3, 3);
    let view = view_of(&model);

    model.replace_roots(vec![TreeBranch::new(StandardItem::new("only"))]);
    assert_eq!(view.texts(view.root()), vec!["only"]);

    model.clear();
    assert!(view.children(view.root()).is_empty());
}

#[test]
fn test_move_within_parent() {
    let model = flat_model(5);
    let view = view_of(&model);
    let moved = view.action(&top(0)).unwrap();

    assert!(model.move_rows(None, 0, 2, 4));

    assert_eq!(
        view.texts(view.root()),
        vec!["testrow2", "testrow3", "testrow0", "testrow1", "testrow4"]
    );
    // Moved nodes are reordered, not recreated.
    assert!(Arc::ptr_eq(&view.action(&top(2)).unwrap(), &moved));
    assert_mirrors(&view, model.as_ref(), &ModelIndex::invalid());
}

#[test]
fn test_cross_parent_move_rebuilds() {
    let (model, _) = tree_model(2, 2);
    let view = view_of(&model);
    let before = view.action(&model.index(0, 0, &top(0))).unwrap();

    // A model that moves rows between parents announces it like this.
    model.signals().rows_moved.emit((top(0), 0, 0, top(1), 0));

    let after = view.action(&model.index(0, 0, &top(0))).unwrap();
    assert!(!Arc::ptr_eq(&before, &after), "tree was rebuilt");
    assert_mirrors(&view, model.as_ref(), &ModelIndex::invalid());
}

#[test]
fn test_sort_rebuilds() {
    let model = Arc::new(TreeModel::new());
    for text in ["pear", "apple", "fig"] {
        model.append_row(None, StandardItem::new(text));
    }
    let view = view_of(&model);

    model.sort_children_by(None, |a, b| a.text(0).cmp(&b.text(0)));
    assert_eq!(view.texts(view.root()), vec!["apple", "fig", "pear"]);
}

#[test]
fn test_relay_triggered_and_hovered() {
    let (model, _) = tree_model(3, 3);
    let view = view_of(&model);
    let (triggered, on_triggered) = recorder::<(ModelIndex, bool)>();
    let (hovered, on_hovered) = recorder::<ModelIndex>();
    view.signals().triggered.connect(on_triggered);
    view.signals().hovered.connect(on_hovered);

    let index = model.index(2, 0, &top(1));
    view.trigger(&index).unwrap();
    view.action(&top(0)).unwrap().hover();

    assert_eq!(*triggered.lock(), vec![(index, false)]);
    assert_eq!(*hovered.lock(), vec![top(0)]);
}

#[test]
fn test_relay_follows_row_shifts() {
    let model = flat_model(3);
    let view = view_of(&model);
    let (triggered, on_triggered) = recorder::<(ModelIndex, bool)>();
    view.signals().triggered.connect(on_triggered);

    let action = view.action(&top(2)).unwrap();
    model.insert_rows(None, 0, vec![StandardItem::new("a"), StandardItem::new("b")]);
    action.trigger();

    assert_eq!(triggered.lock()[0].0, top(4));
}

#[test]
fn test_stale_and_foreign_actions_emit_nothing() {
    let model = flat_model(3);
    let view = view_of(&model);
    let (triggered, on_triggered) = recorder::<(ModelIndex, bool)>();
    view.signals().triggered.connect(on_triggered);

    let stale = view.action(&top(1)).unwrap();
    model.remove_rows(None, 1, 1);
    stale.trigger();

    let foreign = Action::new("elsewhere");
    foreign.trigger();

    assert!(triggered.lock().is_empty());
    assert_eq!(stale.triggered.connection_count(), 0);
}

#[test]
fn test_handler_may_edit_model() {
    let model = flat_model(3);
    let view = view_of(&model);

    let target = model.clone();
    view.signals().triggered.connect(move |(index, _)| {
        if let Some(id) = target.node_id(index) {
            target.remove(id);
        }
    });

    view.trigger(&top(1)).unwrap();
    assert_eq!(view.texts(view.root()), vec!["testrow0", "testrow2"]);
}

#[test]
fn test_checkable_rows() {
    let model = Arc::new(TreeModel::new().with_column_count(2));
    let checkable = ItemFlags::new().with_checkable(true);
    let id = model
        .append_row(
            None,
            StandardItem::new("Spicy")
                .with_flags(1, checkable)
                .with_check_state(1, CheckState::Unchecked),
        )
        .unwrap();
    model.append_row(None, StandardItem::new("Mild"));

    let view = MenuView::new("Menu").with_columns(ColumnMapping::default().with_checked_column(1));
    view.set_model(Some(model.clone()));
    let (toggled, on_toggled) = recorder::<(ModelIndex, bool)>();
    view.signals().toggled.connect(on_toggled);

    let spicy = view.action(&top(0)).unwrap();
    assert!(spicy.is_checkable());
    assert!(!spicy.is_checked());
    assert!(!view.action(&top(1)).unwrap().is_checkable());

    // Model updates do not echo back as view signals.
    model.set_data(id, 1, ItemRole::CheckState, CheckState::Checked);
    assert!(spicy.is_checked());
    assert!(toggled.lock().is_empty());

    view.trigger(&top(0)).unwrap();
    assert_eq!(*toggled.lock(), vec![(top(0), false)]);
}

#[test]
fn test_disabled_rows() {
    let model = Arc::new(TreeModel::new());
    let id = model.append_row(None, StandardItem::new("Sold out")).unwrap();
    let view = view_of(&model);
    let (triggered, on_triggered) = recorder::<(ModelIndex, bool)>();
    view.signals().triggered.connect(on_triggered);

    model.set_flags(id, 0, ItemFlags::new().with_enabled(false));
    let action = view.action(&top(0)).unwrap();
    assert!(!action.is_enabled());

    view.trigger(&top(0)).unwrap();
    assert!(triggered.lock().is_empty());
}

#[test]
fn test_trigger_unknown_index() {
    let model = flat_model(1);
    let view = view_of(&model);
    assert_eq!(view.trigger(&top(7)), Err(Error::InvalidIndex { row: 7, column: 0 }));
}

#[test]
fn test_dump_tree() {
    let (model, _) = tree_model(2, 1);
    let view = view_of(&model);
    let options = TreeFormatOptions::minimal().with_style(TreeStyle::Ascii);
    assert_eq!(
        view.dump_tree_with(options),
        "Menu\n|-- testrow0\n|   `-- testrow0:0\n`-- testrow1\n    `-- testrow1:0\n"
    );
}

#[test]
fn test_children_of_unknown_node() {
    let model = flat_model(2);
    let view = view_of(&model);
    let gone: ActionId = view.children(view.root())[1];
    model.remove_rows(None, 1, 1);

    assert!(view.children(gone).is_empty());
    assert!(!view.is_menu(gone));
    assert!(view.action_by_id(gone).is_none());
    assert!(!view.get_index(gone, 0).is_valid());
}

#[cfg(feature = "serde")]
#[test]
fn test_column_mapping_serde() {
    let columns = ColumnMapping::default().with_tooltip_column(2);
    let json = serde_json::to_string(&columns).unwrap();
    let back: ColumnMapping = serde_json::from_str(&json).unwrap();
    assert_eq!(back, columns);

    let partial: ColumnMapping = serde_json::from_str(r#"{"checked": 1}"#).unwrap();
    assert_eq!(partial.checked, Some(1));
    assert_eq!(partial.text, Some(0));
}

#[test]
fn test_batch_insert_into_leaf() {
    let model = flat_model(3);
    let view = view_of(&model);
    let root = ModelIndex::invalid();
    let leaf = model.children(None)[1];
    let leaf_action = view.get_action(&top(1)).unwrap();

    model.insert_rows(
        Some(leaf),
        0,
        vec![StandardItem::new("a"), StandardItem::new("b"), StandardItem::new("c")],
    );
    assert!(view.is_menu(leaf_action));
    assert_eq!(view.texts(leaf_action), vec!["a", "b", "c"]);
    assert_mirrors(&view, model.as_ref(), &root);

    let branch = TreeBranch::new(StandardItem::new("x")).with_child(StandardItem::new("y"));
    model.insert_branch(Some(leaf), 1, branch);
    assert_eq!(view.texts(leaf_action), vec!["a", "x", "b", "c"]);
    assert_mirrors(&view, model.as_ref(), &root);

    model.remove_rows(Some(leaf), 0, 3);
    assert_eq!(view.texts(leaf_action), vec!["c"]);
    assert_mirrors(&view, model.as_ref(), &root);

    model.remove_rows(Some(leaf), 0, 1);
    assert!(!view.is_menu(leaf_action));
    assert_mirrors(&view, model.as_ref(), &root);

    model.insert_rows(Some(leaf), 0, vec![StandardItem::new("z")]);
    assert_eq!(view.get_action(&top(1)), Some(leaf_action));
    assert!(view.is_menu(leaf_action));
    assert_mirrors(&view, model.as_ref(), &root);
    assert!(view.dump_tree().ends_with("├── testrow1\n│   └── z\n└── testrow2\n"));
}

#[test]
fn test_reversed_move_range_rebuilds() {
    let model = flat_model(5);
    let view = view_of(&model);
    let root = ModelIndex::invalid();

    model.signals().rows_moved.emit((root.clone(), 3, 1, root.clone(), 0));
    assert_mirrors(&view, model.as_ref(), &root);

    model.signals().rows_moved.emit((root.clone(), 2, usize::MAX, root.clone(), 0));
    assert_mirrors(&view, model.as_ref(), &root);
}

#[test]
fn test_oversized_notification_ranges_are_clamped() {
    let model = flat_model(5);
    let view = view_of(&model);
    let root = ModelIndex::invalid();

    model.signals().rows_inserted.emit((root.clone(), 5, usize::MAX));
    assert_eq!(view.children(view.root()).len(), 5);

    let bottom = ModelIndex::new(usize::MAX, 0, root.clone());
    model.signals().data_changed.emit((top(4), bottom, Vec::new()));
    assert_mirrors(&view, model.as_ref(), &root);

    model.signals().rows_about_to_be_removed.emit((root, 3, usize::MAX));
    assert_eq!(view.texts(view.root()), vec!["testrow0", "testrow1", "testrow2"]);
}
