//! The collections managed through [`CrudScreen`](crate::CrudScreen).

mod attributes;
mod brands;
mod categories;
mod customers;
mod products;
mod variants;

pub use attributes::{AttributeForm, Attributes};
pub use brands::{BrandForm, Brands};
pub use categories::{Categories, CategoryForm};
pub use customers::{CustomerForm, Customers};
pub use products::{ProductForm, ProductFormOptions, Products};
pub use variants::{VariantForm, Variants};
