//! Text dumps of a menu tree.
//!
//! ```text
//! Main
//! ├── File
//! │   ├── Open
//! │   └── Recent
//! │       └── notes.txt
//! └── Quit [disabled]
//! ```

use std::fmt;

use lattice_menuview_core::{TreeFormatOptions, TreeStyle};

use super::tree::{ActionId, MenuTree};

/// Formats a [`MenuTree`] for logs and test failure messages.
pub struct MenuTreeDebug<'a> {
    tree: &'a MenuTree,
    options: TreeFormatOptions,
}

impl<'a> MenuTreeDebug<'a> {
    /// Create a visualizer with default options.
    pub fn new(tree: &'a MenuTree) -> Self {
        Self {
            tree,
            options: TreeFormatOptions::default(),
        }
    }

    /// Set formatting options.
    pub fn with_options(mut self, options: TreeFormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Render the whole tree into a string.
    pub fn format_tree(&self) -> String {
        self.to_string()
    }

    fn write_label(&self, f: &mut fmt::Formatter<'_>, id: ActionId) -> fmt::Result {
        let Some(node) = self.tree.node(id) else {
            return Ok(());
        };
        let action = node.action();
        let text = action.text();
        f.write_str(if text.is_empty() { "(untitled)" } else { text.as_str() })?;

        if self.options.show_ids {
            write!(f, " [{id:?}]")?;
        }
        if self.options.show_state {
            let mut flags = Vec::new();
            if let Some(menu) = node.kind().as_menu() {
                if menu.is_empty() {
                    flags.push("empty menu");
                }
                if menu.tooltips_visible() {
                    flags.push("tooltips");
                }
            }
            if !action.is_enabled() {
                flags.push("disabled");
            }
            if action.is_checkable() {
                flags.push(if action.is_checked() { "checked" } else { "unchecked" });
            }
            if !flags.is_empty() {
                write!(f, " [{}]", flags.join(", "))?;
            }
        }
        writeln!(f)
    }

    fn write_children(&self, f: &mut fmt::Formatter<'_>, id: ActionId, prefix: &str, depth: usize) -> fmt::Result {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return Ok(());
        }
        let style = self.options.style;
        let children = self.tree.children(id);
        for (position, &child) in children.iter().enumerate() {
            let is_last = position + 1 == children.len();
            write!(f, "{prefix}{}", style.branch(is_last))?;
            if style == TreeStyle::Compact {
                write!(f, "{:width$}", "", width = depth * 2)?;
            }
            self.write_label(f, child)?;
            let next_prefix = format!("{prefix}{}", style.continuation(is_last));
            self.write_children(f, child, &next_prefix, depth + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for MenuTreeDebug<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let root = self.tree.root();
        self.write_label(f, root)?;
        self.write_children(f, root, "", 1)
    }
}
