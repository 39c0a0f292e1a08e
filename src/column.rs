//! Column definitions.

use crate::coerce::ColumnKind;

/// Presentation options for a column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayOptions {
    /// Whether the column is rendered.
    pub visible: bool,
    /// Whether the user may sort on this column.
    pub sortable: bool,
    /// Fixed width hint, in the engine's units.
    pub width: Option<u16>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            visible: true,
            sortable: true,
            width: None,
        }
    }
}

/// A column definition: name, comparator kind, and presentation options.
///
/// Immutable once a render cycle starts. Comparators and headers are
/// fixed at table construction, so changing the set of definitions forces
/// a full rebuild rather than a reconciliation; the controller compares
/// definitions for equality to skip rebuilds on identical notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDefinition {
    /// Header name.
    pub name: String,
    /// Comparator kind resolved against the registry at config build.
    pub kind: ColumnKind,
    /// Presentation options.
    pub display: DisplayOptions,
}

impl ColumnDefinition {
    /// Create a column with default display options.
    pub fn new(name: impl Into<String>, kind: ColumnKind) -> Self {
        Self {
            name: name.into(),
            kind,
            display: DisplayOptions::default(),
        }
    }

    /// Create a column using the engine's default comparison.
    pub fn plain(name: impl Into<String>) -> Self {
        Self::new(name, ColumnKind::Default)
    }

    /// Set whether the column is sortable.
    pub fn with_sortable(mut self, sortable: bool) -> Self {
        self.display.sortable = sortable;
        self
    }

    /// Set a fixed width hint.
    pub fn with_width(mut self, width: u16) -> Self {
        self.display.width = Some(width);
        self
    }

    /// Hide the column.
    pub fn hidden(mut self) -> Self {
        self.display.visible = false;
        self
    }
}
