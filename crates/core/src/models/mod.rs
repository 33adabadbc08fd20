//! REST resource shapes.
//!
//! Each record mirrors what the backend sends. Identifiers accept both `_id`
//! and `id`, and relations use [`Ref`](crate::Ref) because the backend
//! populates them inconsistently. Input structs (`*Input`) are what the
//! admin and storefront send back on create/update.

mod attribute;
mod brand;
mod cart;
mod category;
mod delivery;
mod order;
mod page;
mod product;
mod user;

pub use attribute::{AttributeInput, AttributeKind, AttributeValue};
pub use brand::{Brand, BrandInput};
pub use cart::{AddToCart, Cart, CartItem, UpdateCartItem};
pub use category::{Category, CategoryInput};
pub use delivery::{DeliveryCheck, DeliveryOption};
pub use order::{
    CheckoutRequest, Order, OrderFilter, OrderItem, OrderStatusUpdate, PaymentConfirmation,
    ShippingAddress,
};
pub use page::Page;
pub use product::{Product, ProductInput, ProductQuery, ProductSort, Variant, VariantInput};
pub use user::{Address, AddressInput, AuthResponse, ProfileUpdate, User, UserUpdate};

pub(crate) const fn default_true() -> bool {
    true
}
