//! The table engine: canonical dataset plus the derived view pipeline
//! (filter, then sort, then window) and view-relative mutations.

use std::cmp::Ordering;

use rayon::prelude::*;
use tracing::{debug, info};

use crate::util::parse_number;

use super::dataset::{Dataset, RowId};
use super::window::{Window, WindowState};

/// Past this many cells, filtering and sorting go through rayon.
const PARALLEL_THRESHOLD: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Column index plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortSpec {
    pub column: usize,
    pub direction: SortDirection,
}

/// What the presentation layer renders: the windowed slice of the view,
/// with enough state to draw counts and indicators.
#[derive(Debug)]
pub struct ViewSnapshot<'a> {
    /// Rows inside the window, in display order.
    pub rows: Vec<(RowId, &'a [String])>,
    pub total_count: usize,
    pub filtered_count: usize,
    pub sort: Option<SortSpec>,
    pub window: WindowState,
}

/// Owns the canonical dataset and every piece of ephemeral view state.
///
/// All operations run synchronously to completion; the derived view is
/// recomputed eagerly whenever the dataset or the view inputs change, so
/// reads never observe a stale mapping.
pub struct TableEngine {
    dataset: Dataset,
    search: String,
    sort: Option<SortSpec>,
    window: Window,
    /// Filtered and sorted row ids, in display order.
    view: Vec<RowId>,
}

impl TableEngine {
    pub fn new(window: Window) -> Self {
        Self {
            dataset: Dataset::default(),
            search: String::new(),
            sort: None,
            window,
            view: Vec::new(),
        }
    }

    /// Replace the dataset wholesale. Search, sort, and window position are
    /// reset unconditionally; nothing from the previous dataset survives.
    pub fn load(&mut self, dataset: Dataset) {
        info!(
            rows = dataset.row_count(),
            cols = dataset.col_count(),
            "dataset loaded"
        );
        self.dataset = dataset;
        self.reset_view();
    }

    /// The one authoritative reset for every state-replacing event.
    fn reset_view(&mut self) {
        self.search.clear();
        self.sort = None;
        self.window.reset();
        self.refresh();
    }

    pub fn headers(&self) -> &[String] {
        self.dataset.headers()
    }

    pub fn has_data(&self) -> bool {
        !self.dataset.headers().is_empty()
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn sort_spec(&self) -> Option<SortSpec> {
        self.sort
    }

    /// Apply a search term; recomputed on every change, and the window
    /// snaps back to the start.
    pub fn set_search_term(&mut self, term: &str) {
        if self.search == term {
            return;
        }
        self.search = term.to_string();
        self.window.reset();
        self.refresh();
    }

    /// Set or clear the sort spec. The window snaps back to the start.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        if self.sort == sort {
            return;
        }
        self.sort = sort;
        self.window.reset();
        self.refresh();
    }

    pub fn request_page(&mut self, n: usize) {
        self.window.request_page(n, self.view.len());
    }

    /// Grow the reveal window by one batch. Idempotent at the end of the
    /// filtered view.
    pub fn request_more(&mut self) {
        self.window.request_more(self.view.len());
    }

    pub fn can_reveal_more(&self) -> bool {
        self.window.can_reveal_more(self.view.len())
    }

    /// Replace the row at a window-relative position with `cells`. The
    /// position resolves to the row's stable id first, so the edit lands on
    /// the same row whatever the current filter or sort. Unresolvable
    /// positions are a no-op.
    pub fn edit_row(&mut self, view_pos: usize, cells: Vec<String>) -> bool {
        let Some(id) = self.resolve(view_pos) else {
            return false;
        };
        let changed = self.dataset.replace(id, cells);
        if changed {
            debug!(row = ?id, "row edited");
            self.refresh();
            self.window.clamp(self.view.len());
        }
        changed
    }

    /// Delete the row at a window-relative position. Later canonical
    /// positions shift down by one; the window clamps if the filtered
    /// count shrank below it. Unresolvable positions are a no-op.
    pub fn delete_row(&mut self, view_pos: usize) -> bool {
        let Some(id) = self.resolve(view_pos) else {
            return false;
        };
        let removed = self.dataset.remove(id);
        if removed {
            debug!(row = ?id, "row deleted");
            self.refresh();
            self.window.clamp(self.view.len());
        }
        removed
    }

    /// The windowed view for rendering.
    pub fn current_view(&self) -> ViewSnapshot<'_> {
        let (start, end) = self.window.range(self.view.len());
        let rows = self.view[start..end]
            .iter()
            .filter_map(|&id| self.dataset.row(id).map(|cells| (id, cells)))
            .collect();

        ViewSnapshot {
            rows,
            total_count: self.dataset.row_count(),
            filtered_count: self.view.len(),
            sort: self.sort,
            window: self.window.state(self.view.len()),
        }
    }

    pub fn window_state(&self) -> WindowState {
        self.window.state(self.view.len())
    }

    /// Map a window-relative position to a stable row id.
    fn resolve(&self, view_pos: usize) -> Option<RowId> {
        let (start, end) = self.window.range(self.view.len());
        let idx = start.checked_add(view_pos)?;
        if idx >= end {
            return None;
        }
        self.view.get(idx).copied()
    }

    /// Recompute the filtered/sorted view from canonical state.
    fn refresh(&mut self) {
        self.view = self.filtered_ids();
        if let Some(sort) = self.sort {
            self.sort_ids(sort);
        }
    }

    fn filtered_ids(&self) -> Vec<RowId> {
        if self.search.is_empty() {
            return self.dataset.ids().to_vec();
        }

        let needle = self.search.to_lowercase();
        let matches = |id: &RowId| {
            self.dataset
                .row(*id)
                .map(|cells| {
                    cells
                        .iter()
                        .any(|cell| cell.to_lowercase().contains(&needle))
                })
                .unwrap_or(false)
        };

        let size = self.dataset.row_count() * self.dataset.col_count().max(1);
        if size >= PARALLEL_THRESHOLD {
            self.dataset
                .ids()
                .par_iter()
                .filter(|id| matches(id))
                .copied()
                .collect()
        } else {
            self.dataset
                .ids()
                .iter()
                .filter(|id| matches(id))
                .copied()
                .collect()
        }
    }

    fn sort_ids(&mut self, sort: SortSpec) {
        let dataset = &self.dataset;
        let cmp = move |a: &RowId, b: &RowId| {
            let va = cell_for_sort(dataset, *a, sort.column);
            let vb = cell_for_sort(dataset, *b, sort.column);
            let ord = compare_cells(va, vb);
            match sort.direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        };

        // stable sorts keep ties in canonical (filtered) order
        if self.view.len() >= PARALLEL_THRESHOLD {
            self.view.par_sort_by(cmp);
        } else {
            self.view.sort_by(cmp);
        }
    }
}

fn cell_for_sort(dataset: &Dataset, id: RowId, column: usize) -> &str {
    dataset
        .row(id)
        .and_then(|cells| cells.get(column))
        .map(|s| s.as_str())
        .unwrap_or("")
}

/// Numeric when both sides parse fully as numbers, raw lexicographic
/// otherwise.
pub fn compare_cells(a: &str, b: &str) -> Ordering {
    match (parse_number(a), parse_number(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.cmp(b),
    }
}
