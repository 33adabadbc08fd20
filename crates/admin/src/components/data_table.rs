//! Data table component types.
//!
//! These types define the columns, filters and empty state of each admin list.

use serde::Serialize;
use threadline_core::OrderStatus;
use threadline_core::models::AttributeKind;

/// Column definition for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct TableColumn {
    /// Unique key for the column.
    pub key: String,
    /// Display label for the column header.
    pub label: String,
    /// Whether the column is sortable.
    pub sortable: bool,
    /// Whether the column is visible by default.
    pub default_visible: bool,
}

impl TableColumn {
    /// Create a new sortable column.
    #[must_use]
    pub fn sortable(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: true,
            default_visible: true,
        }
    }

    /// Create a new non-sortable column.
    #[must_use]
    pub fn new(key: &str, label: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            sortable: false,
            default_visible: true,
        }
    }

    /// Set whether the column is visible by default.
    #[must_use]
    pub const fn visible(mut self, visible: bool) -> Self {
        self.default_visible = visible;
        self
    }
}

/// Filter type for data tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    /// Text input filter.
    Text,
    /// Single-select dropdown.
    Select,
}

/// Filter definition for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct TableFilter {
    /// Filter parameter key.
    pub key: String,
    /// Display label.
    pub label: String,
    /// Filter type.
    pub filter_type: FilterType,
    /// Placeholder text (for text inputs).
    pub placeholder: Option<String>,
    /// Available options (for selects).
    pub options: Vec<FilterOption>,
}

/// Option for select filters.
#[derive(Debug, Clone, Serialize)]
pub struct FilterOption {
    /// Option value.
    pub value: String,
    /// Display label.
    pub label: String,
}

impl FilterOption {
    /// Create a new filter option.
    #[must_use]
    pub fn new(value: &str, label: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
        }
    }
}

impl TableFilter {
    /// Create a text filter.
    #[must_use]
    pub fn text(key: &str, label: &str, placeholder: &str) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Text,
            placeholder: Some(placeholder.to_string()),
            options: vec![],
        }
    }

    /// Create a select filter.
    #[must_use]
    pub fn select(key: &str, label: &str, options: Vec<FilterOption>) -> Self {
        Self {
            key: key.to_string(),
            label: label.to_string(),
            filter_type: FilterType::Select,
            placeholder: None,
            options,
        }
    }

    /// Whether `value` is one of the select options.
    #[must_use]
    pub fn accepts(&self, value: &str) -> bool {
        match self.filter_type {
            FilterType::Text => true,
            FilterType::Select => self.options.iter().any(|o| o.value == value),
        }
    }
}

/// Configuration for a data table.
#[derive(Debug, Clone, Serialize)]
pub struct DataTableConfig {
    /// Unique table identifier.
    pub table_id: String,
    /// Column definitions.
    pub columns: Vec<TableColumn>,
    /// Filter definitions.
    pub filters: Vec<TableFilter>,
    /// Title for empty state.
    pub empty_title: String,
    /// Description for empty state.
    pub empty_description: Option<String>,
}

impl DataTableConfig {
    /// Create a new data table configuration.
    #[must_use]
    pub fn new(table_id: &str) -> Self {
        Self {
            table_id: table_id.to_string(),
            columns: vec![],
            filters: vec![],
            empty_title: "No items found".to_string(),
            empty_description: None,
        }
    }

    /// Add a column.
    #[must_use]
    pub fn column(mut self, column: TableColumn) -> Self {
        self.columns.push(column);
        self
    }

    /// Add a filter.
    #[must_use]
    pub fn filter(mut self, filter: TableFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Set empty state configuration.
    #[must_use]
    pub fn empty_state(mut self, title: &str, description: Option<&str>) -> Self {
        self.empty_title = title.to_string();
        self.empty_description = description.map(ToString::to_string);
        self
    }

    /// Get default visible columns.
    #[must_use]
    pub fn default_columns(&self) -> Vec<&TableColumn> {
        self.columns.iter().filter(|c| c.default_visible).collect()
    }

    /// Look up a filter by key.
    #[must_use]
    pub fn find_filter(&self, key: &str) -> Option<&TableFilter> {
        self.filters.iter().find(|f| f.key == key)
    }
}

fn active_filter() -> TableFilter {
    TableFilter::select(
        "status",
        "Status",
        vec![
            FilterOption::new("active", "Active"),
            FilterOption::new("inactive", "Inactive"),
        ],
    )
}

/// Build the products table configuration.
#[must_use]
pub fn products_table_config() -> DataTableConfig {
    DataTableConfig::new("products")
        .column(TableColumn::sortable("name", "Product"))
        .column(TableColumn::new("slug", "Slug").visible(false))
        .column(TableColumn::new("category", "Category"))
        .column(TableColumn::new("brand", "Brand"))
        .column(TableColumn::sortable("price", "Price"))
        .column(TableColumn::new("variants", "Variants"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::new("featured", "Featured").visible(false))
        .filter(TableFilter::text("search", "Search", "Search products by name..."))
        .filter(active_filter())
        .empty_state(
            "No products yet",
            Some("Create a product to start selling"),
        )
}

/// Build the variants table configuration for one product.
#[must_use]
pub fn variants_table_config() -> DataTableConfig {
    DataTableConfig::new("variants")
        .column(TableColumn::sortable("sku", "SKU"))
        .column(TableColumn::new("size", "Size"))
        .column(TableColumn::new("color", "Color"))
        .column(TableColumn::new("price", "Price"))
        .column(TableColumn::sortable("stock", "Stock"))
        .empty_state(
            "No variants",
            Some("Add a size or color combination to make this product purchasable"),
        )
}

/// Build the categories table configuration.
#[must_use]
pub fn categories_table_config() -> DataTableConfig {
    DataTableConfig::new("categories")
        .column(TableColumn::sortable("name", "Category"))
        .column(TableColumn::new("slug", "Slug"))
        .column(TableColumn::new("parent", "Parent"))
        .column(TableColumn::new("status", "Status"))
        .filter(active_filter())
        .empty_state("No categories yet", Some("Categories group products in the storefront"))
}

/// Build the brands table configuration.
#[must_use]
pub fn brands_table_config() -> DataTableConfig {
    DataTableConfig::new("brands")
        .column(TableColumn::sortable("name", "Brand"))
        .column(TableColumn::new("slug", "Slug"))
        .column(TableColumn::new("logo", "Logo").visible(false))
        .column(TableColumn::new("status", "Status"))
        .filter(active_filter())
        .empty_state("No brands yet", None)
}

/// Build the table configuration for one attribute taxonomy.
#[must_use]
pub fn attributes_table_config(kind: AttributeKind) -> DataTableConfig {
    let mut config = DataTableConfig::new(kind.slug())
        .column(TableColumn::sortable("name", kind.label()));
    if kind.has_code() {
        config = config.column(TableColumn::new("value", "Code"));
    }
    let title = format!("No {} values yet", kind.label().to_lowercase());
    config
        .column(TableColumn::new("description", "Description").visible(false))
        .empty_state(&title, None)
}

/// Build the customers table configuration.
#[must_use]
pub fn customers_table_config() -> DataTableConfig {
    DataTableConfig::new("customers")
        .column(TableColumn::sortable("name", "Customer"))
        .column(TableColumn::sortable("email", "Email"))
        .column(TableColumn::new("phone", "Phone").visible(false))
        .column(TableColumn::new("role", "Role"))
        .column(TableColumn::new("addresses", "Addresses").visible(false))
        .column(TableColumn::sortable("created", "Created"))
        .filter(TableFilter::select(
            "role",
            "Role",
            vec![
                FilterOption::new("customer", "Customer"),
                FilterOption::new("admin", "Admin"),
            ],
        ))
        .empty_state(
            "No customers found",
            Some("Try adjusting your search or filters"),
        )
}

/// Build the orders table configuration.
#[must_use]
pub fn orders_table_config() -> DataTableConfig {
    let statuses = OrderStatus::ALL
        .iter()
        .map(|s| {
            let mut label = s.as_str().to_string();
            if let Some(first) = label.get_mut(..1) {
                first.make_ascii_uppercase();
            }
            FilterOption::new(s.as_str(), &label)
        })
        .collect();

    DataTableConfig::new("orders")
        .column(TableColumn::sortable("number", "Order"))
        .column(TableColumn::new("customer", "Customer"))
        .column(TableColumn::new("items", "Items"))
        .column(TableColumn::sortable("total", "Total"))
        .column(TableColumn::new("payment", "Payment"))
        .column(TableColumn::new("status", "Status"))
        .column(TableColumn::sortable("created", "Placed"))
        .filter(TableFilter::select("status", "Status", statuses))
        .empty_state("No orders found", Some("Try a different status filter"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_columns_are_not_default() {
        let config = products_table_config();
        let keys: Vec<&str> = config
            .default_columns()
            .into_iter()
            .map(|c| c.key.as_str())
            .collect();
        assert!(keys.contains(&"name"));
        assert!(!keys.contains(&"slug"));
    }

    #[test]
    fn test_color_table_shows_code_column() {
        let colors = attributes_table_config(AttributeKind::Color);
        assert!(colors.columns.iter().any(|c| c.key == "value"));
        let sizes = attributes_table_config(AttributeKind::Size);
        assert!(!sizes.columns.iter().any(|c| c.key == "value"));
        assert_eq!(sizes.empty_title, "No size values yet");
    }

    #[test]
    fn test_order_status_filter_lists_every_status() {
        let config = orders_table_config();
        let filter = config.find_filter("status").unwrap_or_else(|| panic!("no filter"));
        assert_eq!(filter.options.len(), OrderStatus::ALL.len());
        assert!(filter.accepts("shipped"));
        assert!(!filter.accepts("lost"));
        assert_eq!(
            filter.options.first().map(|o| o.label.as_str()),
            Some("Pending")
        );
    }
}
