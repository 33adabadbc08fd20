//! Reusable list components.

mod data_table;
mod list_view;

pub use data_table::{
    DataTableConfig, FilterOption, FilterType, TableColumn, TableFilter,
    attributes_table_config, brands_table_config, categories_table_config,
    customers_table_config, orders_table_config, products_table_config,
    variants_table_config,
};
pub use list_view::{EmptyState, ListView, RenderedRow, TableRow};
