//! Logging and debugging facilities for Lattice MenuView.
//!
//! The workspace is instrumented with the `tracing` crate. To see logs,
//! install a subscriber in your application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("lattice_menuview::sync=debug")
//!     .init();
//! ```
//!
//! Every event carries one of the [`targets`] so subsystems can be filtered
//! individually. Tree dumps of a menu hierarchy are configured with
//! [`TreeFormatOptions`].

/// Target names for log filtering.
pub mod targets {
    /// Signal/slot system target.
    pub const SIGNAL: &str = "lattice_menuview_core::signal";
    /// Menu view binding and lifecycle.
    pub const VIEW: &str = "lattice_menuview::view";
    /// Incremental synchronization between model and menu tree.
    pub const SYNC: &str = "lattice_menuview::sync";
    /// Index/action resolution.
    pub const RESOLVE: &str = "lattice_menuview::resolve";
    /// Action signal relay.
    pub const RELAY: &str = "lattice_menuview::relay";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Compact single-line representation.
    Compact,
}

impl TreeStyle {
    /// Branch prefix for a node, depending on whether it is its parent's last child.
    pub fn branch(self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (TreeStyle::Ascii, false) => "|-- ",
            (TreeStyle::Ascii, true) => "`-- ",
            (TreeStyle::Unicode, false) => "├── ",
            (TreeStyle::Unicode, true) => "└── ",
            (TreeStyle::Compact, _) => "",
        }
    }

    /// Continuation prefix drawn below a node for its descendants.
    pub fn continuation(self, is_last: bool) -> &'static str {
        match (self, is_last) {
            (TreeStyle::Ascii, false) => "|   ",
            (TreeStyle::Unicode, false) => "│   ",
            (TreeStyle::Ascii | TreeStyle::Unicode, true) => "    ",
            (TreeStyle::Compact, _) => "",
        }
    }
}

/// Configuration for tree debug output.
#[derive(Debug, Clone)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Whether to show node handles.
    pub show_ids: bool,
    /// Whether to show node state (checked, disabled).
    pub show_state: bool,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

impl Default for TreeFormatOptions {
    fn default() -> Self {
        Self {
            style: TreeStyle::default(),
            show_ids: false,
            show_state: true,
            max_depth: None,
        }
    }
}

impl TreeFormatOptions {
    /// Options for detailed debugging output.
    pub fn detailed() -> Self {
        Self {
            show_ids: true,
            ..Default::default()
        }
    }

    /// Options for minimal output: labels only.
    pub fn minimal() -> Self {
        Self {
            show_ids: false,
            show_state: false,
            ..Default::default()
        }
    }

    /// Sets the tree style.
    pub fn with_style(mut self, style: TreeStyle) -> Self {
        self.style = style;
        self
    }

    /// Limits the traversal depth.
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }
}
