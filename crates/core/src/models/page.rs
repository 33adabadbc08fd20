//! Listing results that may or may not be paginated.

use serde::{Deserialize, Serialize};

/// One page of a listing.
///
/// The backend answers listings either with a bare array or with an object
/// carrying the items plus paging counters. Both decode into `Page`; a bare
/// array is treated as a single complete page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawPage<T>")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: u32,
    pub pages: u32,
}

impl<T> Page<T> {
    /// Whether the listing is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether another page follows this one.
    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.page < self.pages
    }
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            pages: 1,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawPage<T> {
    List(Vec<T>),
    Paged {
        #[serde(
            alias = "products",
            alias = "orders",
            alias = "users",
            alias = "data",
            alias = "results",
            alias = "docs"
        )]
        items: Vec<T>,
        #[serde(default, alias = "totalCount", alias = "count")]
        total: Option<usize>,
        #[serde(default, alias = "currentPage")]
        page: Option<u32>,
        #[serde(default, alias = "totalPages")]
        pages: Option<u32>,
    },
}

impl<T> From<RawPage<T>> for Page<T> {
    fn from(raw: RawPage<T>) -> Self {
        match raw {
            RawPage::List(items) => Self {
                total: items.len(),
                items,
                page: 1,
                pages: 1,
            },
            RawPage::Paged {
                items,
                total,
                page,
                pages,
            } => {
                let page = page.unwrap_or(1).max(1);
                Self {
                    total: total.unwrap_or(items.len()),
                    items,
                    page,
                    pages: pages.unwrap_or(page).max(page),
                }
            }
        }
    }
}
