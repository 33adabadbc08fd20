//! One service per backend resource.
//!
//! Services are thin: each method maps to exactly one request and returns
//! the decoded body. Obtain them from [`ApiClient`](crate::ApiClient).

mod attributes;
mod brands;
mod cart;
mod categories;
mod delivery;
mod orders;
mod products;
mod users;

pub use attributes::AttributeService;
pub use brands::BrandService;
pub use cart::CartService;
pub use categories::CategoryService;
pub use delivery::DeliveryService;
pub use orders::OrderService;
pub use products::ProductService;
pub use users::UserService;
