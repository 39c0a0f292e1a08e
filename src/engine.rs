//! External collaborator traits: the render engine and the view host.
//!
//! The core never touches presentation directly. Everything a concrete
//! paging/rendering library does (draw rows, run its stable sort, clamp
//! page offsets, fire state-save callbacks) sits behind [`RenderEngine`]
//! and [`TableHandle`], which keeps coercion and reconciliation testable
//! headless.

use serde_json::{Map, Value};

use crate::column::ColumnDefinition;
use crate::error::TableError;
use crate::registry::ComparatorEntry;
use crate::state::{TableStateStore, TableViewState};
use crate::value::Row;

/// A column as handed to the render engine: the definition plus the sort
/// behavior resolved from the registry at config-build time. `None` means
/// the engine compares with its own default.
#[derive(Debug, Clone)]
pub struct ResolvedColumn {
    /// The column definition.
    pub definition: ColumnDefinition,
    /// Resolved sort behavior, absent for default/unregistered kinds.
    pub comparator: Option<ComparatorEntry>,
}

/// Everything the render engine needs for a first render.
#[derive(Clone)]
pub struct RenderConfig {
    /// Columns with resolved comparators.
    pub columns: Vec<ResolvedColumn>,
    /// Initial rows.
    pub rows: Vec<Row>,
    /// Rows per page, when the host overrides the engine default.
    pub page_size: Option<usize>,
    /// Whether the engine should report state-affecting user actions.
    pub persist: bool,
    /// Saved state to seed the initial view, loaded before render.
    pub saved_state: Option<TableViewState>,
    /// Store the engine writes state changes to. Present only when
    /// persistence is enabled.
    pub store: Option<TableStateStore>,
    /// Free-form engine settings supplied by the caller. Merged last;
    /// caller wins on key conflicts with anything the controller built.
    pub overrides: Map<String, Value>,
}

/// A snapshot of the engine's paging settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewSettings {
    /// Index of the first displayed row (page offset).
    pub display_start: usize,
    /// Rows per page.
    pub page_length: usize,
    /// `true` when the engine pages server-side. Offset restoration only
    /// applies to client-resident datasets.
    pub server_side_paging: bool,
}

/// The engine's live table: the sole mutable reference reconciliation
/// needs. Exactly one exists per rendered table, owned by the controller
/// for the table's lifetime.
pub trait TableHandle {
    /// Current paging settings.
    fn settings(&self) -> ViewSettings;

    /// Remove every row from the live view. Column, sort, and filter
    /// configuration stay untouched.
    fn clear_rows(&mut self);

    /// Append one row. `redraw: false` batches the append without a
    /// per-row draw.
    fn add_row(&mut self, row: Row, redraw: bool);

    /// Full redraw: re-applies the current sort and filter against the
    /// present rows and resets the page offset to zero.
    fn redraw(&mut self);

    /// Move the page offset. The engine clamps an offset past the end of
    /// the current row count.
    fn set_display_start(&mut self, offset: usize);

    /// Draw the current page.
    fn draw(&mut self);

    /// Append an extra header row after the engine's own header. Cells
    /// arrive already compiled by the view host.
    fn append_header_row(&mut self, cells: Vec<CompiledFragment>);
}

/// The rendering collaborator.
pub trait RenderEngine {
    /// The handle type this engine produces.
    type Handle: TableHandle;

    /// Render a table into the engine's container and return its handle.
    fn create(&mut self, config: RenderConfig) -> Result<Self::Handle, TableError>;

    /// Hide the container element. Called before first content is
    /// available so an unstyled/empty table never flashes.
    fn hide_container(&mut self);

    /// Show the container element after the first successful render.
    fn show_container(&mut self);
}

/// A markup fragment after the view host has instantiated it against its
/// scope. Opaque to the core; only the engine interprets it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledFragment(String);

impl CompiledFragment {
    /// A fragment used verbatim, with no host compilation.
    pub fn raw(markup: impl Into<String>) -> Self {
        Self(markup.into())
    }

    /// An empty fragment (an empty header cell).
    pub fn empty() -> Self {
        Self(String::new())
    }

    /// The fragment content.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns `true` for an empty fragment.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// The host-framework collaborator that instantiates markup fragments
/// against its own scope/context. The core only ever asks it to compile;
/// what "compile" means belongs to the host.
pub trait ViewHost {
    /// Instantiate a markup fragment.
    fn compile(&self, fragment: &str) -> CompiledFragment;
}
