//! Storefront error type.

use thiserror::Error;
use threadline_client::ApiError;
use threadline_core::FormErrors;

use crate::checkout::CheckoutStep;
use crate::storage::StorageError;

/// Errors raised by storefront flows.
#[derive(Debug, Error)]
pub enum StorefrontError {
    /// Backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// Local or session storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Submitted form has invalid fields.
    #[error("Invalid input: {0}")]
    Form(#[from] FormErrors),

    /// The action needs a signed-in shopper.
    #[error("Please sign in to continue")]
    NotSignedIn,

    /// Checkout was started with nothing in the cart.
    #[error("Your cart is empty")]
    EmptyCart,

    /// The product has variants and none was chosen.
    #[error("Please choose a size or color for {product}")]
    VariantRequired { product: String },

    /// The chosen variant does not belong to the product.
    #[error("Variant {0} is not available for this product")]
    UnknownVariant(String),

    /// The chosen variant has no stock.
    #[error("{0} is out of stock")]
    OutOfStock(String),

    /// Quantity must be at least one.
    #[error("Quantity must be at least 1")]
    InvalidQuantity,

    /// No cart line with this id.
    #[error("Cart item {0} not found")]
    UnknownCartItem(String),

    /// The chosen delivery option is not offered.
    #[error("Delivery option {0} is not available")]
    UnknownDeliveryOption(String),

    /// The backend does not deliver to this postal code.
    #[error("We do not deliver to {postal_code}: {message}")]
    NotServiceable {
        postal_code: String,
        message: String,
    },

    /// Order was placed without picking a payment method.
    #[error("Please choose a payment method")]
    PaymentMethodRequired,

    /// The payment page was opened with no pending order in session storage.
    #[error("No pending checkout found")]
    MissingCheckoutData,

    /// A wizard action was attempted out of order.
    #[error("Cannot go from {from} to {to}")]
    StepOrder { from: CheckoutStep, to: CheckoutStep },
}

impl StorefrontError {
    /// Whether the shopper should be sent to the sign-in page.
    #[must_use]
    pub const fn needs_sign_in(&self) -> bool {
        matches!(self, Self::NotSignedIn | Self::Api(ApiError::Unauthorized(_)))
    }
}

/// Result type alias for `StorefrontError`.
pub type Result<T> = std::result::Result<T, StorefrontError>;
