//! Keep a rendered table in sync with a live dataset without losing the
//! viewer's sort, page, or filter state.
//!
//! Two subsystems carry the weight: a typed cell-value coercion layer
//! ([`coerce`] + [`registry`]) that lets arbitrary textual or
//! markup-embedded cell content sort correctly, and a reconciliation
//! protocol ([`reconcile`] + [`controller`]) that swaps the row data of a
//! live table while preserving pagination. The actual paging/rendering
//! library and the host UI framework sit behind the traits in [`engine`].

pub mod coerce;
pub mod column;
pub mod controller;
pub mod engine;
pub mod error;
pub mod reconcile;
pub mod registry;
pub mod state;
pub mod value;

pub mod prelude {
    pub use crate::coerce::ColumnKind;
    pub use crate::column::{ColumnDefinition, DisplayOptions};
    pub use crate::controller::{RenderOutcome, TableController, TableOptions};
    pub use crate::engine::{
        CompiledFragment, RenderConfig, RenderEngine, ResolvedColumn, TableHandle, ViewHost,
        ViewSettings,
    };
    pub use crate::error::TableError;
    pub use crate::reconcile::ReconciliationEngine;
    pub use crate::registry::{ComparatorEntry, ComparatorRegistry};
    pub use crate::state::{
        MemoryBackend, SortDirection, StateBackend, TableStateStore, TableViewState,
    };
    pub use crate::value::{CellValue, Row, SortKey};
}
