//! Unified error handling for admin.

use thiserror::Error;
use threadline_client::ApiError;
use threadline_core::{FormErrors, OrderStatus};

/// Error type for the admin screens.
#[derive(Debug, Error)]
pub enum AdminError {
    /// The backend rejected or failed the request.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// The open form has invalid fields.
    #[error("Invalid form: {0}")]
    Form(#[from] FormErrors),

    /// The record is not in the loaded list.
    #[error("No {resource} with id {id}")]
    NotFound { resource: &'static str, id: String },

    /// `submit` or `form_mut` was called with no form open.
    #[error("No form is open")]
    NoOpenForm,

    /// The resource has no create endpoint.
    #[error("New {0} records cannot be created from the admin")]
    CreateNotSupported(&'static str),

    /// A confirmation issued by another screen was passed to this one.
    #[error("Confirmation for a {confirmed} cannot delete a {resource}")]
    ConfirmationMismatch {
        resource: &'static str,
        confirmed: &'static str,
    },

    /// No order is open on the orders screen.
    #[error("No order is selected")]
    NoOrderSelected,

    /// The order is past the point where it can be cancelled.
    #[error("Orders that are {0} cannot be cancelled")]
    NotCancellable(OrderStatus),
}

impl AdminError {
    pub(crate) fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

/// Result alias for admin operations.
pub type Result<T> = std::result::Result<T, AdminError>;
