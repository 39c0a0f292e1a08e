//! A mock render engine with real sort/page semantics.
//!
//! The mock keeps the behaviors reconciliation depends on: `redraw`
//! re-applies the active sort and resets the page offset to zero, and
//! `set_display_start` clamps an offset past the end of the dataset to
//! the start of the last page, exactly like a paging engine would.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use steadytable::prelude::*;

pub const DEFAULT_PAGE_LENGTH: usize = 10;

/// Observable state of the mock view.
#[derive(Default)]
pub struct ViewInner {
    pub columns: Vec<ResolvedColumn>,
    pub rows: Vec<Row>,
    pub display_start: usize,
    pub page_length: usize,
    pub server_side_paging: bool,
    /// Active sort: column index and ascending flag.
    pub sort: Option<(usize, bool)>,
    pub extra_headers: Vec<Vec<CompiledFragment>>,
    pub saved_state: Option<TableViewState>,
    pub persist: bool,
    pub store_attached: bool,
    pub overrides: serde_json::Map<String, serde_json::Value>,
    pub redraws: usize,
    pub draws: usize,
}

impl ViewInner {
    /// Stable sort of `rows` by the active sort column.
    fn apply_sort(&mut self) {
        let Some((col, ascending)) = self.sort else {
            return;
        };
        let Some(column) = self.columns.get(col) else {
            return;
        };
        match &column.comparator {
            Some(entry) => {
                let preprocess = entry.preprocess.clone();
                let compare = if ascending {
                    entry.ascending.clone()
                } else {
                    entry.descending.clone()
                };
                self.rows.sort_by(|a, b| {
                    let ka = preprocess(a.get(col).unwrap_or(&CellValue::Null));
                    let kb = preprocess(b.get(col).unwrap_or(&CellValue::Null));
                    compare(ka, kb)
                });
            }
            None => {
                // Engine default: plain string comparison.
                self.rows.sort_by(|a, b| {
                    let ta = cell_text(a.get(col));
                    let tb = cell_text(b.get(col));
                    if ascending { ta.cmp(&tb) } else { tb.cmp(&ta) }
                });
            }
        }
    }

    fn clamp_display_start(&self, offset: usize) -> usize {
        if self.rows.is_empty() || self.page_length == 0 {
            return 0;
        }
        if offset >= self.rows.len() {
            let last_page = (self.rows.len() - 1) / self.page_length;
            last_page * self.page_length
        } else {
            offset
        }
    }

    /// The rows of the current page.
    pub fn current_page(&self) -> &[Row] {
        let end = (self.display_start + self.page_length).min(self.rows.len());
        &self.rows[self.display_start.min(end)..end]
    }

    /// Cell text of column `col` for every row, in view order.
    pub fn column_text(&self, col: usize) -> Vec<String> {
        self.rows.iter().map(|r| cell_text(r.get(col))).collect()
    }
}

fn cell_text(cell: Option<&CellValue>) -> String {
    match cell {
        Some(CellValue::Text(s)) => s.clone(),
        Some(CellValue::Number(n)) => n.to_string(),
        Some(CellValue::Null) | None => String::new(),
    }
}

pub struct MockHandle {
    inner: Arc<Mutex<ViewInner>>,
}

impl TableHandle for MockHandle {
    fn settings(&self) -> ViewSettings {
        let inner = self.inner.lock().unwrap();
        ViewSettings {
            display_start: inner.display_start,
            page_length: inner.page_length,
            server_side_paging: inner.server_side_paging,
        }
    }

    fn clear_rows(&mut self) {
        self.inner.lock().unwrap().rows.clear();
    }

    fn add_row(&mut self, row: Row, redraw: bool) {
        let mut inner = self.inner.lock().unwrap();
        inner.rows.push(row);
        if redraw {
            inner.draws += 1;
        }
    }

    fn redraw(&mut self) {
        let mut inner = self.inner.lock().unwrap();
        inner.apply_sort();
        inner.display_start = 0;
        inner.redraws += 1;
    }

    fn set_display_start(&mut self, offset: usize) {
        let mut inner = self.inner.lock().unwrap();
        inner.display_start = inner.clamp_display_start(offset);
    }

    fn draw(&mut self) {
        self.inner.lock().unwrap().draws += 1;
    }

    fn append_header_row(&mut self, cells: Vec<CompiledFragment>) {
        self.inner.lock().unwrap().extra_headers.push(cells);
    }
}

pub struct MockEngine {
    inner: Arc<Mutex<ViewInner>>,
    container_visible: Arc<AtomicBool>,
    creates: Arc<AtomicUsize>,
    pub fail_create: bool,
    pub server_side: bool,
}

impl MockEngine {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ViewInner::default())),
            container_visible: Arc::new(AtomicBool::new(true)),
            creates: Arc::new(AtomicUsize::new(0)),
            fail_create: false,
            server_side: false,
        }
    }

    pub fn server_side() -> Self {
        Self {
            server_side: true,
            ..Self::new()
        }
    }

    /// A probe into the view state, valid after the engine moves into a
    /// controller.
    pub fn view(&self) -> Arc<Mutex<ViewInner>> {
        self.inner.clone()
    }

    pub fn visibility(&self) -> Arc<AtomicBool> {
        self.container_visible.clone()
    }

    pub fn create_count(&self) -> Arc<AtomicUsize> {
        self.creates.clone()
    }
}

impl RenderEngine for MockEngine {
    type Handle = MockHandle;

    fn create(&mut self, config: RenderConfig) -> Result<MockHandle, TableError> {
        if self.fail_create {
            return Err(TableError::Engine("mock create failure".to_string()));
        }
        self.creates.fetch_add(1, Ordering::SeqCst);

        let mut inner = self.inner.lock().unwrap();
        inner.page_length = config.page_size.unwrap_or(DEFAULT_PAGE_LENGTH);
        inner.server_side_paging = self.server_side;
        inner.persist = config.persist;
        inner.store_attached = config.store.is_some();
        // Default sort: first column ascending, like a paging engine's
        // initial draw. Saved state overrides it.
        inner.sort = if config.columns.is_empty() {
            None
        } else {
            Some((0, true))
        };
        inner.display_start = 0;
        if let Some(state) = &config.saved_state {
            if let Some(col) = state.sort_column {
                inner.sort = Some((col, state.sort_direction == SortDirection::Ascending));
            }
            if state.page_size > 0 {
                inner.page_length = state.page_size;
            }
            inner.display_start = state.page_index * inner.page_length;
        }
        inner.saved_state = config.saved_state;
        inner.overrides = config.overrides;
        inner.columns = config.columns;
        inner.rows = config.rows;
        inner.apply_sort();
        inner.display_start = inner.clamp_display_start(inner.display_start);
        inner.draws += 1;
        drop(inner);

        Ok(MockHandle {
            inner: self.inner.clone(),
        })
    }

    fn hide_container(&mut self) {
        self.container_visible.store(false, Ordering::SeqCst);
    }

    fn show_container(&mut self) {
        self.container_visible.store(true, Ordering::SeqCst);
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// A view host that wraps fragments so tests can see compilation happened.
pub struct TagHost;

impl ViewHost for TagHost {
    fn compile(&self, fragment: &str) -> CompiledFragment {
        CompiledFragment::raw(format!("compiled:{fragment}"))
    }
}

/// Shorthand for a single-cell row.
pub fn row1(cell: impl Into<CellValue>) -> Row {
    vec![cell.into()]
}
