//! In-place dataset reconciliation with a standing redraw.

use crate::engine::TableHandle;
use crate::value::Row;

/// Applies a new dataset snapshot to an already-rendered table without
/// tearing it down.
///
/// A naive clear-and-redraw resets pagination to the first page, which is
/// a usability regression when the dataset refreshes underneath a viewer
/// several pages in. The *standing redraw* performed here re-applies the
/// current sort and filter against the new rows, then restores the page
/// offset captured before the update.
pub struct ReconciliationEngine;

impl ReconciliationEngine {
    /// Replace the table's rows with `rows` and redraw at the preserved
    /// page offset.
    ///
    /// Rows are appended batched (no per-row draw); exactly one draw runs
    /// at the end. When the engine reports server-side paging, offset
    /// restoration is skipped and only the final draw runs: restoring a
    /// client-side offset is meaningless when the server owns paging.
    ///
    /// If the old offset now points past the end of the new dataset, the
    /// engine's own page-end clamping applies; nothing here special-cases
    /// a shrunken row count.
    pub fn update<H: TableHandle + ?Sized>(handle: &mut H, rows: &[Row]) {
        let before = handle.settings();

        handle.clear_rows();
        for row in rows {
            handle.add_row(row.clone(), false);
        }

        if before.server_side_paging {
            handle.draw();
            return;
        }

        // redraw() resets the offset to zero; put it back before drawing.
        handle.redraw();
        handle.set_display_start(before.display_start);
        log::debug!(
            "standing redraw: {} rows, restored offset {}",
            rows.len(),
            before.display_start
        );
        handle.draw();
    }
}
