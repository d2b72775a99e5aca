//! Model index for addressing items in hierarchical models.
//!
//! A `ModelIndex` names one cell of an `ItemModel`: a row and a column under
//! a parent index. The chain of parents is carried by the index itself, so
//! a view can walk from any index up to the root without asking the model.

use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// Represents a position within an `ItemModel`.
///
/// Two indices are equal when they name the same `(row, column)` under the
/// same parent lineage. The model-specific [`internal_id`](Self::internal_id)
/// does not take part in comparisons, so an index rebuilt through
/// `ItemModel::index` compares equal to the one the model handed out earlier.
///
/// The invalid index stands for the (invisible) root of the model.
///
/// # Index Validity
///
/// Indices describe positions, not items. After rows are inserted, removed or
/// moved, a stored index may point at a different item or at nothing.
///
/// # Example
///
/// ```
/// use lattice_menuview::model::ModelIndex;
///
/// let top = ModelIndex::new(2, 0, ModelIndex::invalid());
/// let child = ModelIndex::new(0, 0, top.clone());
///
/// assert_eq!(child.parent(), top);
/// assert_eq!(child.depth(), 1);
/// assert_eq!(top.sibling(2, 0), top);
/// ```
#[derive(Clone, Default)]
pub struct ModelIndex {
    position: Option<Position>,
}

#[derive(Clone)]
struct Position {
    row: usize,
    column: usize,
    parent: Option<Arc<ModelIndex>>,
    internal_id: u64,
}

impl ModelIndex {
    /// Creates the invalid index, which represents the model root.
    #[inline]
    pub const fn invalid() -> Self {
        Self { position: None }
    }

    /// Creates a valid index with no model-specific id.
    ///
    /// Models normally use [`with_internal_id`](Self::with_internal_id).
    #[inline]
    pub fn new(row: usize, column: usize, parent: ModelIndex) -> Self {
        Self::with_internal_id(row, column, parent, 0)
    }

    /// Creates a valid index carrying a model-specific identifier.
    ///
    /// Models use the id to find their internal node for the index without
    /// walking the parent chain.
    pub fn with_internal_id(row: usize, column: usize, parent: ModelIndex, internal_id: u64) -> Self {
        Self {
            position: Some(Position {
                row,
                column,
                parent: parent.is_valid().then(|| Arc::new(parent)),
                internal_id,
            }),
        }
    }

    /// Returns `true` unless this is the invalid (root) index.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.position.is_some()
    }

    /// Row within the parent, 0 for the invalid index.
    #[inline]
    pub fn row(&self) -> usize {
        self.position.as_ref().map_or(0, |p| p.row)
    }

    /// Column within the parent, 0 for the invalid index.
    #[inline]
    pub fn column(&self) -> usize {
        self.position.as_ref().map_or(0, |p| p.column)
    }

    /// Model-specific identifier, 0 for the invalid index.
    #[inline]
    pub fn internal_id(&self) -> u64 {
        self.position.as_ref().map_or(0, |p| p.internal_id)
    }

    /// Returns the parent index; the invalid index for top-level items.
    pub fn parent(&self) -> ModelIndex {
        self.position
            .as_ref()
            .and_then(|p| p.parent.as_deref())
            .cloned()
            .unwrap_or_default()
    }

    /// Returns `true` if this index has a valid parent.
    pub fn has_parent(&self) -> bool {
        self.position.as_ref().is_some_and(|p| p.parent.is_some())
    }

    /// Index at `(row, column)` under the same parent.
    ///
    /// The result carries no internal id; use `ItemModel::sibling` when the
    /// model's id is needed. Returns the invalid index for the invalid index.
    pub fn sibling(&self, row: usize, column: usize) -> ModelIndex {
        if !self.is_valid() {
            return ModelIndex::invalid();
        }
        ModelIndex::new(row, column, self.parent())
    }

    /// Index at `column` in the same row.
    pub fn sibling_at_column(&self, column: usize) -> ModelIndex {
        self.sibling(self.row(), column)
    }

    /// Number of valid ancestors; top-level items have depth 0.
    pub fn depth(&self) -> usize {
        self.ancestors().len()
    }

    /// Valid ancestors, nearest first. The root is not included.
    pub fn ancestors(&self) -> Vec<ModelIndex> {
        let mut chain = Vec::new();
        let mut current = self.parent();
        while current.is_valid() {
            let next = current.parent();
            chain.push(current);
            current = next;
        }
        chain
    }

    /// Returns `true` if `ancestor` is a strict ancestor of this index.
    pub fn is_descendant_of(&self, ancestor: &ModelIndex) -> bool {
        ancestor.is_valid() && self.ancestors().iter().any(|a| a == ancestor)
    }
}

impl std::fmt::Debug for ModelIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.position {
            Some(p) => {
                write!(f, "ModelIndex(")?;
                for ancestor in self.ancestors().iter().rev() {
                    write!(f, "{}/", ancestor.row())?;
                }
                write!(f, "{}, col {})", p.row, p.column)
            }
            None => write!(f, "ModelIndex(invalid)"),
        }
    }
}

impl PartialEq for ModelIndex {
    fn eq(&self, other: &Self) -> bool {
        match (&self.position, &other.position) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.row == b.row && a.column == b.column && self.parent() == other.parent()
            }
            _ => false,
        }
    }
}

impl Eq for ModelIndex {}

impl Hash for ModelIndex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.is_valid().hash(state);
        if let Some(p) = &self.position {
            p.row.hash(state);
            p.column.hash(state);
            self.parent().hash(state);
        }
    }
}
