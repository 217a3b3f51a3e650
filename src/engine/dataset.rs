//! Canonical table state: a row arena keyed by stable ids.
//!
//! Rows keep the identity they were assigned at load time, so a view can
//! hand a position back to the engine after any amount of filtering and
//! sorting and still hit the row the user was looking at.

use std::collections::HashMap;

/// Stable row identity, assigned once at load and never reused within a
/// dataset's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

/// Headers plus rows in canonical insertion order.
///
/// `order` is the source-of-truth row sequence; `cells` is the arena the
/// ids index into. Every row holds exactly one cell per header.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    headers: Vec<String>,
    cells: HashMap<RowId, Vec<String>>,
    order: Vec<RowId>,
    next_id: u64,
}

impl Dataset {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let mut dataset = Self {
            headers,
            cells: HashMap::with_capacity(rows.len()),
            order: Vec::with_capacity(rows.len()),
            next_id: 0,
        };
        for row in rows {
            dataset.push(row);
        }
        dataset
    }

    fn push(&mut self, mut row: Vec<String>) {
        row.resize(self.headers.len(), String::new());
        let id = RowId(self.next_id);
        self.next_id += 1;
        self.cells.insert(id, row);
        self.order.push(id);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn col_count(&self) -> usize {
        self.headers.len()
    }

    pub fn row_count(&self) -> usize {
        self.order.len()
    }

    /// Row ids in canonical insertion order.
    pub fn ids(&self) -> &[RowId] {
        &self.order
    }

    pub fn row(&self, id: RowId) -> Option<&[String]> {
        self.cells.get(&id).map(|r| r.as_slice())
    }

    /// Replace a row's cells wholesale. Unknown ids are a no-op.
    pub fn replace(&mut self, id: RowId, mut row: Vec<String>) -> bool {
        match self.cells.get_mut(&id) {
            Some(slot) => {
                row.resize(self.headers.len(), String::new());
                *slot = row;
                true
            }
            None => false,
        }
    }

    /// Remove a row; later canonical positions shift down by one.
    /// Unknown ids are a no-op.
    pub fn remove(&mut self, id: RowId) -> bool {
        if self.cells.remove(&id).is_none() {
            return false;
        }
        self.order.retain(|&r| r != id);
        true
    }
}
