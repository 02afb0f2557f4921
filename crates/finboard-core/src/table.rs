//! In-memory record list, search filter and page position for one view

use crate::error::{CoreError, CoreResult};
use crate::format::Formatter;
use crate::models::{Column, Record, RecordId, RecordsPage};
use crate::pagination;

/// Records where any formatted field contains `query`, case-insensitively.
///
/// An empty (or all-whitespace) query keeps every record.
pub fn filter_records(records: &[Record], query: &str, formatter: &Formatter) -> Vec<Record> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return records.to_vec();
    }

    records
        .iter()
        .filter(|record| {
            Column::ORDER.iter().any(|column| {
                formatter
                    .format(&record.field(*column))
                    .to_lowercase()
                    .contains(&needle)
            })
        })
        .cloned()
        .collect()
}

/// State behind one table view.
///
/// `filtered` is rebuilt from `data` and the stored query after every change,
/// never patched in place.
#[derive(Debug, Clone)]
pub struct TableState {
    data: Vec<Record>,
    filtered: Vec<Record>,
    query: String,
    current_page: usize,
    rows_per_page: usize,
    formatter: Formatter,
}

impl TableState {
    pub fn new(rows_per_page: usize, formatter: Formatter) -> Self {
        Self {
            data: Vec::new(),
            filtered: Vec::new(),
            query: String::new(),
            current_page: 1,
            rows_per_page: rows_per_page.max(1),
            formatter,
        }
    }

    pub fn data(&self) -> &[Record] {
        &self.data
    }

    pub fn filtered(&self) -> &[Record] {
        &self.filtered
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn rows_per_page(&self) -> usize {
        self.rows_per_page
    }

    pub fn formatter(&self) -> &Formatter {
        &self.formatter
    }

    pub fn total_pages(&self) -> usize {
        pagination::total_pages(self.filtered.len(), self.rows_per_page)
    }

    /// Swap in a freshly fetched list
    pub fn replace_data(&mut self, records: Vec<Record>) {
        log::debug!("Replacing table data with {} records", records.len());
        self.data = records;
        self.refilter();
        self.clamp_page();
    }

    /// Store the search text and go back to the first page
    pub fn search(&mut self, query: &str) {
        self.query = query.to_string();
        self.refilter();
        self.current_page = 1;
    }

    /// Jump to `page`, clamped to `[1, max(total_pages, 1)]`
    pub fn go_to_page(&mut self, page: usize) {
        self.current_page = page;
        self.clamp_page();
    }

    pub fn next_page(&mut self) {
        self.go_to_page(self.current_page.saturating_add(1));
    }

    pub fn previous_page(&mut self) {
        self.go_to_page(self.current_page.saturating_sub(1));
    }

    /// Replace the record with the same id by `updated`.
    ///
    /// The backend's edit response has no `source`; the cached one is kept.
    pub fn apply_edit(&mut self, mut updated: Record) -> CoreResult<()> {
        let existing = self
            .data
            .iter_mut()
            .find(|record| record.id == updated.id)
            .ok_or_else(|| CoreError::RecordNotFound {
                id: updated.id.to_string(),
            })?;

        if updated.source.is_none() {
            updated.source = existing.source.take();
        }
        *existing = updated;

        self.refilter();
        self.clamp_page();
        Ok(())
    }

    /// Remove the record with `id`
    pub fn apply_delete(&mut self, id: &RecordId) -> CoreResult<()> {
        let before = self.data.len();
        self.data.retain(|record| &record.id != id);
        if self.data.len() == before {
            return Err(CoreError::RecordNotFound { id: id.to_string() });
        }

        self.refilter();
        self.clamp_page();
        Ok(())
    }

    /// Drop every record, after a confirmed delete-all
    pub fn clear(&mut self) {
        self.data.clear();
        self.filtered.clear();
        self.current_page = 1;
    }

    /// Records shown on the current page
    pub fn page_slice(&self) -> &[Record] {
        let start = (self.current_page - 1) * self.rows_per_page;
        if start >= self.filtered.len() {
            return &[];
        }
        let end = (start + self.rows_per_page).min(self.filtered.len());
        &self.filtered[start..end]
    }

    pub fn to_page(&self) -> RecordsPage {
        RecordsPage {
            records: self.page_slice().to_vec(),
            total_count: self.filtered.len(),
            page: self.current_page,
            page_size: self.rows_per_page,
            total_pages: self.total_pages(),
            query: self.query.clone(),
        }
    }

    fn refilter(&mut self) {
        self.filtered = filter_records(&self.data, &self.query, &self.formatter);
    }

    fn clamp_page(&mut self) {
        self.current_page = self.current_page.clamp(1, self.total_pages().max(1));
    }
}
