//! Paging over a normalized result set
//!
//! [`page`] is the pure slice. [`Paginator`] is the cursor the lookup keeps:
//! page number, page size and total count, plus the derived navigation
//! helpers a results view needs.

use serde::{Deserialize, Serialize};

use crate::results::ResultRow;

/// Default number of rows per page
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Maximum page numbers offered for direct navigation
pub const VISIBLE_PAGE_NUMBERS: usize = 5;

/// Where paging happens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationMode {
    /// Fetch everything once and slice locally
    #[default]
    ClientSide,
    /// Send `pageNumber`/`pageSize` and re-query on every page change
    ServerSide,
}

/// One visible window of results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultPage {
    pub items: Vec<ResultRow>,
    /// 1-based
    pub page_number: usize,
    pub page_size: usize,
    pub total_count: usize,
}

impl ResultPage {
    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.page_size)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Slice `rows` into page `page_number` of `page_size`
///
/// `items.len() == min(page_size, max(0, rows.len() - (page_number - 1) * page_size))`.
/// Page numbers below 1 are treated as 1 and a zero page size as 1.
#[must_use]
pub fn page(rows: &[ResultRow], page_number: usize, page_size: usize) -> ResultPage {
    let page_number = page_number.max(1);
    let page_size = page_size.max(1);

    let start = (page_number - 1).saturating_mul(page_size);
    let items = if start >= rows.len() {
        Vec::new()
    } else {
        let end = start.saturating_add(page_size).min(rows.len());
        rows[start..end].to_vec()
    };

    ResultPage {
        items,
        page_number,
        page_size,
        total_count: rows.len(),
    }
}

#[must_use]
pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    total_count.div_ceil(page_size.max(1))
}

/// Page cursor over a result set of known size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginator {
    page_number: usize,
    page_size: usize,
    total_count: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl Paginator {
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_number: 1,
            page_size: page_size.max(1),
            total_count: 0,
        }
    }

    #[must_use]
    pub fn page_number(&self) -> usize {
        self.page_number
    }

    #[must_use]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    #[must_use]
    pub fn total_count(&self) -> usize {
        self.total_count
    }

    #[must_use]
    pub fn total_pages(&self) -> usize {
        total_pages(self.total_count, self.page_size)
    }

    #[must_use]
    pub fn is_first_page(&self) -> bool {
        self.page_number <= 1
    }

    #[must_use]
    pub fn is_last_page(&self) -> bool {
        self.page_number >= self.total_pages()
    }

    /// New total; the current page is clamped into range
    #[must_use]
    pub fn with_total(mut self, total_count: usize) -> Self {
        self.total_count = total_count;
        self.page_number = self.clamp(self.page_number);
        self
    }

    /// Jump to `page_number`, clamped to `1..=total_pages`
    #[must_use]
    pub fn go_to(mut self, page_number: usize) -> Self {
        self.page_number = self.clamp(page_number);
        self
    }

    #[must_use]
    pub fn next(self) -> Self {
        self.go_to(self.page_number.saturating_add(1))
    }

    #[must_use]
    pub fn previous(self) -> Self {
        self.go_to(self.page_number.saturating_sub(1))
    }

    /// Change the page size and return to page 1
    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.page_number = 1;
        self
    }

    /// Back to page 1 with no results
    #[must_use]
    pub fn reset(self) -> Self {
        Self::new(self.page_size)
    }

    /// 1-based `(first, last, total)` of the rows on the current page;
    /// `(0, 0, 0)` when there are none
    #[must_use]
    pub fn range(&self) -> (usize, usize, usize) {
        if self.total_count == 0 {
            return (0, 0, 0);
        }
        let start = (self.page_number - 1) * self.page_size + 1;
        let end = (self.page_number * self.page_size).min(self.total_count);
        (start, end, self.total_count)
    }

    /// Up to [`VISIBLE_PAGE_NUMBERS`] page numbers around the current page
    #[must_use]
    pub fn page_numbers(&self) -> Vec<usize> {
        let total = self.total_pages();
        if total == 0 {
            return Vec::new();
        }

        let half = VISIBLE_PAGE_NUMBERS / 2;
        let mut first = self.page_number.saturating_sub(half).max(1);
        let last = (first + VISIBLE_PAGE_NUMBERS - 1).min(total);
        if last + 1 - first < VISIBLE_PAGE_NUMBERS {
            first = (last + 1).saturating_sub(VISIBLE_PAGE_NUMBERS).max(1);
        }
        (first..=last).collect()
    }

    /// Client-side slice of `rows` for the current page
    #[must_use]
    pub fn slice(&self, rows: &[ResultRow]) -> ResultPage {
        page(rows, self.page_number, self.page_size)
    }

    fn clamp(&self, page_number: usize) -> usize {
        page_number.clamp(1, self.total_pages().max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn rows(n: usize) -> Vec<ResultRow> {
        (0..n)
            .map(|i| ResultRow {
                id: format!("result-{i}"),
                identifier_number: format!("{i:011}"),
                entity_name: format!("Entity {i}"),
                entity_status: "Active".into(),
                entity_type: "N/A".into(),
                tax_registration_status: "N/A".into(),
                business_location: "N/A".into(),
                raw_data: Value::Null,
            })
            .collect()
    }

    #[test]
    fn twenty_five_rows_in_pages_of_ten() {
        let all = rows(25);
        assert_eq!(page(&all, 1, 10).items.len(), 10);
        assert_eq!(page(&all, 2, 10).items.len(), 10);
        let last = page(&all, 3, 10);
        assert_eq!(last.items.len(), 5);
        assert_eq!(last.items[0].id, "result-20");
        assert_eq!(last.total_count, 25);
        assert_eq!(last.total_pages(), 3);
        assert!(page(&all, 4, 10).is_empty());
    }

    #[test]
    fn paginator_navigation_is_clamped() {
        let p = Paginator::new(10).with_total(25);
        assert!(p.is_first_page());
        assert_eq!(p.previous().page_number(), 1);
        assert_eq!(p.go_to(99).page_number(), 3);
        assert!(p.go_to(3).is_last_page());
        assert_eq!(p.next().next().next().page_number(), 3);
        assert_eq!(p.go_to(0).page_number(), 1);
    }

    #[test]
    fn page_size_change_resets_to_first_page() {
        let p = Paginator::new(10).with_total(25).go_to(3).with_page_size(5);
        assert_eq!(p.page_number(), 1);
        assert_eq!(p.total_pages(), 5);
    }

    #[test]
    fn range_reports_visible_rows() {
        let p = Paginator::new(10).with_total(25).go_to(3);
        assert_eq!(p.range(), (21, 25, 25));
        assert_eq!(Paginator::new(10).range(), (0, 0, 0));
    }

    #[test]
    fn page_number_window() {
        let p = Paginator::new(10).with_total(95);
        assert_eq!(p.page_numbers(), vec![1, 2, 3, 4, 5]);
        assert_eq!(p.go_to(6).page_numbers(), vec![4, 5, 6, 7, 8]);
        assert_eq!(p.go_to(10).page_numbers(), vec![6, 7, 8, 9, 10]);
        assert_eq!(Paginator::new(10).with_total(15).page_numbers(), vec![1, 2]);
        assert!(Paginator::new(10).page_numbers().is_empty());
    }
}
