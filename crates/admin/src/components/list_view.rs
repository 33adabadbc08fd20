//! Rendered admin lists.

use serde::Serialize;

use super::DataTableConfig;

/// One record's cells, keyed by column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    pub id: String,
    cells: Vec<(String, String)>,
}

impl TableRow {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cells: Vec::new(),
        }
    }

    /// Set the value shown in column `key`.
    #[must_use]
    pub fn cell(mut self, key: &str, value: impl Into<String>) -> Self {
        self.cells.push((key.to_string(), value.into()));
        self
    }

    /// The value for column `key`, if set.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// What an empty list shows instead of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmptyState {
    pub title: String,
    pub description: Option<String>,
}

/// A row laid out in column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub id: String,
    pub cells: Vec<String>,
}

/// A list ready for display: rows under the visible columns, or the empty
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ListView {
    Empty(EmptyState),
    Rows {
        headers: Vec<String>,
        rows: Vec<RenderedRow>,
    },
}

impl ListView {
    /// Lay out `rows` under the config's default columns. Missing cells
    /// render as blank.
    #[must_use]
    pub fn new(config: &DataTableConfig, rows: Vec<TableRow>) -> Self {
        if rows.is_empty() {
            return Self::Empty(EmptyState {
                title: config.empty_title.clone(),
                description: config.empty_description.clone(),
            });
        }

        let columns = config.default_columns();
        let rows = rows
            .into_iter()
            .map(|row| RenderedRow {
                cells: columns
                    .iter()
                    .map(|c| row.get(&c.key).unwrap_or_default().to_string())
                    .collect(),
                id: row.id,
            })
            .collect();

        Self::Rows {
            headers: columns.iter().map(|c| c.label.clone()).collect(),
            rows,
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty(_))
    }

    /// Number of rendered rows.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::Empty(_) => 0,
            Self::Rows { rows, .. } => rows.len(),
        }
    }

    /// The empty state, when there are no rows.
    #[must_use]
    pub const fn empty_state(&self) -> Option<&EmptyState> {
        match self {
            Self::Empty(state) => Some(state),
            Self::Rows { .. } => None,
        }
    }
}
