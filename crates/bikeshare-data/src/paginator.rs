//! Cumulative raw-row paging.
//!
//! Every advance returns the whole prefix from row 0, growing by one page
//! each time: the first advance shows rows `[0, 5)`, the second `[0, 10)`,
//! and so on. It does not return only the newly revealed page. Once the
//! prefix covers the dataset, further advances keep returning all rows.
//! The caller decides when to stop.

use bikeshare_core::models::{Dataset, TripRecord};

/// Rows added to the prefix on every advance.
pub const DEFAULT_PAGE_SIZE: usize = 5;

#[derive(Debug, Clone)]
pub struct RawDataPaginator<'a> {
    dataset: &'a Dataset,
    page_size: usize,
    revealed: usize,
}

impl<'a> RawDataPaginator<'a> {
    pub fn new(dataset: &'a Dataset) -> Self {
        Self::with_page_size(dataset, DEFAULT_PAGE_SIZE)
    }

    /// A page size of zero is treated as one.
    pub fn with_page_size(dataset: &'a Dataset, page_size: usize) -> Self {
        Self {
            dataset,
            page_size: page_size.max(1),
            revealed: 0,
        }
    }

    /// Grow the prefix by one page and return it, starting from row 0.
    pub fn advance(&mut self) -> &'a [TripRecord] {
        self.revealed = self.revealed.saturating_add(self.page_size);
        self.current()
    }

    /// The prefix revealed so far, without advancing.
    pub fn current(&self) -> &'a [TripRecord] {
        let records = self.dataset.records();
        &records[..self.revealed.min(records.len())]
    }

    /// `true` once the prefix covers every row.
    pub fn is_exhausted(&self) -> bool {
        self.revealed >= self.dataset.len()
    }
}

/// Never ends on its own; bound it with `take` or stop on caller input.
impl<'a> Iterator for RawDataPaginator<'a> {
    type Item = &'a [TripRecord];

    fn next(&mut self) -> Option<Self::Item> {
        Some(self.advance())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
