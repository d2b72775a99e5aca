//! Icon handles for actions.
//!
//! The menu view never decodes images. An [`Icon`] only names where the
//! image comes from; the renderer that draws the menu resolves it.

use std::path::{Path, PathBuf};

/// Source for an icon.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IconSource {
    /// A name looked up in the current icon theme (e.g. `"document-save"`).
    Theme(String),
    /// A path to an image file.
    Path(PathBuf),
}

/// A lightweight, cloneable icon handle.
///
/// # Example
///
/// ```
/// use lattice_menuview::widget::Icon;
///
/// let icon = Icon::from_theme("edit-copy");
/// assert_eq!(icon.theme_name(), Some("edit-copy"));
/// assert!(icon.path().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Icon {
    source: IconSource,
}

impl Icon {
    /// Create an icon looked up by theme name.
    pub fn from_theme(name: impl Into<String>) -> Self {
        Self {
            source: IconSource::Theme(name.into()),
        }
    }

    /// Create an icon loaded from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        Self {
            source: IconSource::Path(path.as_ref().to_path_buf()),
        }
    }

    /// Get the icon source.
    pub fn source(&self) -> &IconSource {
        &self.source
    }

    /// Theme name, if this icon is theme-based.
    pub fn theme_name(&self) -> Option<&str> {
        match &self.source {
            IconSource::Theme(name) => Some(name),
            IconSource::Path(_) => None,
        }
    }

    /// File path, if this icon is path-based.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            IconSource::Theme(_) => None,
            IconSource::Path(path) => Some(path),
        }
    }
}

impl std::fmt::Display for Icon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.source {
            IconSource::Theme(name) => write!(f, "theme:{name}"),
            IconSource::Path(path) => write!(f, "{}", path.display()),
        }
    }
}
