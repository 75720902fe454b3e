//! Sortable, paginated tables
//!
//! [`TablePagination`] sorts and pages an in-memory row set described by a
//! list of [`Column`]s. Everything happens client-side over rows that are
//! already loaded and filtered.

use crate::api::AnamnesisForm;
use crate::config::DEFAULT_PAGE_SIZE;
use chrono::{DateTime, Local};
use std::cmp::Ordering;

type Accessor<T> = Box<dyn Fn(&T) -> String + Send + Sync>;

/// One column of a table
pub struct Column<T> {
    pub id: &'static str,
    pub header: &'static str,
    pub sortable: bool,
    value: Accessor<T>,
    display: Option<Accessor<T>>,
}

impl<T> Column<T> {
    /// Sortable column whose cells show `value`
    pub fn new(
        id: &'static str,
        header: &'static str,
        value: impl Fn(&T) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            id,
            header,
            sortable: true,
            value: Box::new(value),
            display: None,
        }
    }

    /// Show cells differently from the value they sort by
    pub fn with_display(mut self, display: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.display = Some(Box::new(display));
        self
    }

    pub fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Value the column sorts by
    pub fn value(&self, row: &T) -> String {
        (self.value)(row)
    }

    /// Text shown in the cell
    pub fn render(&self, row: &T) -> String {
        match &self.display {
            Some(display) => display(row),
            None => self.value(row),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortRule {
    pub column_id: String,
    pub direction: SortDirection,
}

/// Header cell as the presentation layer renders it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub id: &'static str,
    pub label: &'static str,
    pub sortable: bool,
    pub sorted: Option<SortDirection>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderGroup {
    pub headers: Vec<Header>,
}

/// Sort and pagination state over a set of rows
pub struct TablePagination<T> {
    columns: Vec<Column<T>>,
    rows: Vec<T>,
    /// Row indexes in display order
    order: Vec<usize>,
    sort: Option<SortRule>,
    page_index: usize,
    page_size: usize,
}

impl<T> TablePagination<T> {
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>) -> Self {
        let mut table = Self {
            columns,
            order: Vec::new(),
            rows,
            sort: None,
            page_index: 0,
            page_size: DEFAULT_PAGE_SIZE,
        };
        table.apply_sort();
        table
    }

    /// Replace the rows, e.g. after the search filter changed.
    /// Returns to the first page.
    pub fn set_rows(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.page_index = 0;
        self.apply_sort();
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    // ===== Sorting =====

    pub fn sort_by(&self) -> Option<&SortRule> {
        self.sort.as_ref()
    }

    /// Header click: sort ascending by an unsorted column, or flip the
    /// direction of the sorted one. Unknown and unsortable columns are ignored.
    pub fn toggle_sort(&mut self, column_id: &str) {
        let sortable = self
            .columns
            .iter()
            .any(|column| column.id == column_id && column.sortable);
        if !sortable {
            return;
        }

        let direction = match &self.sort {
            Some(rule) if rule.column_id == column_id => rule.direction.flipped(),
            _ => SortDirection::Ascending,
        };

        tracing::debug!("Sorting by {} {:?}", column_id, direction);
        self.sort = Some(SortRule {
            column_id: column_id.to_string(),
            direction,
        });
        self.page_index = 0;
        self.apply_sort();
    }

    fn apply_sort(&mut self) {
        self.order = (0..self.rows.len()).collect();

        let Some(rule) = &self.sort else {
            return;
        };
        let Some(column) = self.columns.iter().find(|c| c.id == rule.column_id) else {
            return;
        };

        let keys: Vec<String> = self
            .rows
            .iter()
            .map(|row| column.value(row).to_lowercase())
            .collect();
        let compare = |a: &usize, b: &usize| -> Ordering { keys[*a].cmp(&keys[*b]) };

        match rule.direction {
            SortDirection::Ascending => self.order.sort_by(compare),
            SortDirection::Descending => self.order.sort_by(|a, b| compare(b, a)),
        }
    }

    pub fn header_groups(&self) -> Vec<HeaderGroup> {
        let headers = self
            .columns
            .iter()
            .map(|column| Header {
                id: column.id,
                label: column.header,
                sortable: column.sortable,
                sorted: self
                    .sort
                    .as_ref()
                    .filter(|rule| rule.column_id == column.id)
                    .map(|rule| rule.direction),
            })
            .collect();

        vec![HeaderGroup { headers }]
    }

    // ===== Pagination =====

    /// Rows on the current page, in display order
    pub fn page(&self) -> Vec<&T> {
        self.order
            .iter()
            .skip(self.page_index * self.page_size)
            .take(self.page_size)
            .map(|&index| &self.rows[index])
            .collect()
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages; an empty table still has one (empty) page
    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(self.page_size).max(1)
    }

    pub fn page_options(&self) -> Vec<usize> {
        (0..self.page_count()).collect()
    }

    pub fn can_previous_page(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next_page(&self) -> bool {
        self.page_index + 1 < self.page_count()
    }

    /// Jump to page `index`, clamped to the available pages
    pub fn goto_page(&mut self, index: usize) {
        self.page_index = index.min(self.page_count() - 1);
    }

    pub fn first_page(&mut self) {
        self.goto_page(0);
    }

    pub fn previous_page(&mut self) {
        self.goto_page(self.page_index.saturating_sub(1));
    }

    pub fn next_page(&mut self) {
        self.goto_page(self.page_index + 1);
    }

    pub fn last_page(&mut self) {
        self.goto_page(self.page_count() - 1);
    }

    /// Change rows per page, keeping the current top row visible
    pub fn set_page_size(&mut self, size: usize) {
        let size = size.max(1);
        let top_row = self.page_index * self.page_size;
        self.page_size = size;
        self.goto_page(top_row / size);
    }
}

/// Creation time as shown in the list, in local time
pub fn format_created_at(created_at: &str) -> String {
    match DateTime::parse_from_rfc3339(created_at) {
        Ok(at) => at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string(),
        Err(_) => created_at.to_string(),
    }
}

/// Columns of the anamnesis list view
pub fn anamnesis_columns() -> Vec<Column<AnamnesisForm>> {
    vec![
        Column::new("title", "Title", |form: &AnamnesisForm| form.title.clone()),
        Column::new("description", "Description", |form: &AnamnesisForm| {
            form.description.clone()
        }),
        Column::new("createdAt", "Created At", |form: &AnamnesisForm| {
            form.created_at.clone()
        })
        .with_display(|form: &AnamnesisForm| format_created_at(&form.created_at)),
        Column::new("actions", "Actions", |_: &AnamnesisForm| String::new()).unsortable(),
    ]
}
