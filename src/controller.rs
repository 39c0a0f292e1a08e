//! Table controller: the orchestrator reacting to dataset and column
//! change notifications.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::column::ColumnDefinition;
use crate::engine::{
    CompiledFragment, RenderConfig, RenderEngine, ResolvedColumn, TableHandle, ViewHost,
};
use crate::error::TableError;
use crate::reconcile::ReconciliationEngine;
use crate::registry::ComparatorRegistry;
use crate::state::TableStateStore;
use crate::value::Row;

/// Per-table options supplied by the host.
#[derive(Clone, Default)]
pub struct TableOptions {
    /// Stable identity used to key persisted state.
    pub table_id: String,
    /// Whether view state is persisted across renders.
    pub persist: bool,
    /// Rows per page, when the host overrides the engine default.
    pub page_size: Option<usize>,
    /// Optional second header row. `None` cells render empty.
    pub second_header: Option<Vec<Option<String>>>,
    /// Free-form engine settings, merged last (caller wins).
    pub overrides: Map<String, Value>,
}

impl TableOptions {
    /// Options for a table with the given stable identity.
    pub fn new(table_id: impl Into<String>) -> Self {
        Self {
            table_id: table_id.into(),
            ..Self::default()
        }
    }

    /// Enable view-state persistence.
    pub fn with_persistence(mut self) -> Self {
        self.persist = true;
        self
    }

    /// Override the rows-per-page default.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Attach a second header row. `None` cells render as empty headers.
    pub fn with_second_header(mut self, cells: Vec<Option<String>>) -> Self {
        self.second_header = Some(cells);
        self
    }

    /// Add a free-form engine override.
    pub fn with_override(mut self, key: impl Into<String>, value: Value) -> Self {
        self.overrides.insert(key.into(), value);
        self
    }
}

/// What a change notification ended up doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// First render: a handle was created.
    FirstRender,
    /// The live table was reconciled in place.
    Reconciled,
    /// Nothing happened (incomplete configuration, or an identical
    /// column notification).
    Skipped,
}

/// Orchestrates one table: decides between first render and in-place
/// update, builds render configuration, and owns the table handle.
///
/// Two states: *uninitialized* (no handle yet) and *live* (handle held).
/// A dataset change while uninitialized performs the first render; while
/// live it delegates to [`ReconciliationEngine`]. A column change while
/// live rebuilds the table, since comparators and headers are fixed at
/// construction.
///
/// The controller is the handle's only owner; the guard in
/// [`render`](Self::render) converts a second first-render attempt into
/// an update, so exactly one handle ever exists per table element.
pub struct TableController<E: RenderEngine> {
    engine: E,
    registry: Arc<ComparatorRegistry>,
    store: TableStateStore,
    host: Option<Arc<dyn ViewHost>>,
    options: TableOptions,
    columns: Vec<ColumnDefinition>,
    handle: Option<E::Handle>,
}

impl<E: RenderEngine> TableController<E> {
    /// Create a controller. The container is hidden until the first
    /// successful render so an empty table never flashes.
    pub fn new(
        mut engine: E,
        registry: Arc<ComparatorRegistry>,
        store: TableStateStore,
        options: TableOptions,
    ) -> Self {
        engine.hide_container();
        Self {
            engine,
            registry,
            store,
            host: None,
            options,
            columns: Vec::new(),
            handle: None,
        }
    }

    /// Attach the view host used to compile markup in the second header
    /// row. Without one, fragments pass through uncompiled.
    pub fn with_view_host(mut self, host: Arc<dyn ViewHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Returns `true` once a table handle is held.
    pub fn is_live(&self) -> bool {
        self.handle.is_some()
    }

    /// The current column definitions.
    pub fn columns(&self) -> &[ColumnDefinition] {
        &self.columns
    }

    /// The dataset was replaced. First render when uninitialized,
    /// reconciliation when live.
    pub fn dataset_changed(&mut self, rows: &[Row]) -> Result<RenderOutcome, TableError> {
        if self.handle.is_some() {
            self.update(rows)?;
            Ok(RenderOutcome::Reconciled)
        } else {
            self.render(rows)
        }
    }

    /// The column definitions were replaced.
    ///
    /// An identical set of definitions on a live table is skipped;
    /// otherwise the handle is dropped and the table rebuilt, because
    /// comparators and headers cannot change on a live table.
    pub fn columns_changed(
        &mut self,
        columns: Vec<ColumnDefinition>,
        rows: &[Row],
    ) -> Result<RenderOutcome, TableError> {
        if self.handle.is_some() && columns == self.columns {
            log::debug!(
                "identical column definitions for {}, skipping rebuild",
                self.options.table_id
            );
            return Ok(RenderOutcome::Skipped);
        }
        if self.handle.take().is_some() {
            log::debug!("column definitions changed for {}, rebuilding", self.options.table_id);
        }
        self.columns = columns;
        self.render(rows)
    }

    /// First render.
    ///
    /// With no columns configured yet the render is skipped silently
    /// rather than showing a broken table. Invoked while already live,
    /// this redirects to the update path instead of creating a second
    /// handle.
    pub fn render(&mut self, rows: &[Row]) -> Result<RenderOutcome, TableError> {
        if self.handle.is_some() {
            self.update(rows)?;
            return Ok(RenderOutcome::Reconciled);
        }
        if self.columns.is_empty() {
            log::debug!(
                "no columns configured for {}, skipping render",
                self.options.table_id
            );
            return Ok(RenderOutcome::Skipped);
        }

        let config = self.build_config(rows);
        let mut handle = self.engine.create(config)?;
        if let Some(cells) = &self.options.second_header {
            handle.append_header_row(Self::compile_header(self.host.as_deref(), cells));
        }
        self.handle = Some(handle);
        self.engine.show_container();
        Ok(RenderOutcome::FirstRender)
    }

    /// Reconcile the live table against a new dataset snapshot.
    ///
    /// Calling this on a table that was never rendered is a contract
    /// violation and fails with [`TableError::NotLive`].
    pub fn update(&mut self, rows: &[Row]) -> Result<(), TableError> {
        let handle = self.handle.as_mut().ok_or(TableError::NotLive)?;
        ReconciliationEngine::update(handle, rows);
        Ok(())
    }

    fn build_config(&self, rows: &[Row]) -> RenderConfig {
        let columns = self
            .columns
            .iter()
            .map(|definition| ResolvedColumn {
                comparator: self.registry.lookup_kind(&definition.kind).cloned(),
                definition: definition.clone(),
            })
            .collect();
        let saved_state = if self.options.persist {
            self.store.load(&self.options.table_id)
        } else {
            None
        };
        RenderConfig {
            columns,
            rows: rows.to_vec(),
            page_size: self.options.page_size,
            persist: self.options.persist,
            saved_state,
            store: self.options.persist.then(|| self.store.clone()),
            overrides: self.options.overrides.clone(),
        }
    }

    fn compile_header(
        host: Option<&dyn ViewHost>,
        cells: &[Option<String>],
    ) -> Vec<CompiledFragment> {
        cells
            .iter()
            .map(|cell| match (cell, host) {
                (Some(markup), Some(host)) => host.compile(markup),
                (Some(markup), None) => CompiledFragment::raw(markup.clone()),
                (None, _) => CompiledFragment::empty(),
            })
            .collect()
    }
}
