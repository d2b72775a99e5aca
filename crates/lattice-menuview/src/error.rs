//! Error types for the menu view.

/// Result type alias for menu view operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while synchronizing the menu tree.
///
/// Lookups that miss (an index without an action, a stale action handle)
/// are not errors: they return `None` or an invalid index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The structural operation has no incremental implementation.
    #[error("{operation} is not implemented")]
    Unsupported { operation: &'static str },

    /// The node handle does not belong to the menu tree.
    #[error("Unknown menu node")]
    UnknownNode,

    /// Children were requested under a node that is not a menu.
    #[error("Menu node expected, found a leaf action")]
    NotAMenu,

    /// The root menu is fixed for the lifetime of the tree.
    #[error("The root menu cannot be removed")]
    RootNode,

    /// The model index does not resolve to a node of the menu tree.
    #[error("Model index {row}:{column} is not represented in the menu tree")]
    InvalidIndex { row: usize, column: usize },

    /// A notification named a row range that does not fit the menu.
    #[error("Row range {first}..={last} does not fit the menu")]
    InvalidRange { first: usize, last: usize },
}

impl Error {
    /// Create an unsupported-operation error.
    pub fn unsupported(operation: &'static str) -> Self {
        Self::Unsupported { operation }
    }
}
