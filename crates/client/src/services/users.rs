//! Authentication, profile, address book and customer administration.

use secrecy::{ExposeSecret, SecretString};
use serde_json::json;
use threadline_core::models::{
    Address, AddressInput, AuthResponse, Page, ProfileUpdate, User, UserUpdate,
};
use threadline_core::{AddressId, Email, UserId};
use tracing::instrument;

use crate::client::ApiClient;
use crate::endpoints;
use crate::error::ApiError;

/// User endpoints.
#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub(crate) const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange credentials for a token and the account.
    ///
    /// Does not install the token on the client; callers decide whether to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` (or `Validation`) for bad credentials.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &Email,
        password: &SecretString,
    ) -> Result<AuthResponse, ApiError> {
        let body = json!({
            "email": email.as_str(),
            "password": password.expose_secret(),
        });
        self.client.post(endpoints::LOGIN, &body).await
    }

    /// Create a customer account.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Validation` if the backend rejects the details.
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn register(
        &self,
        name: &str,
        email: &Email,
        password: &SecretString,
        phone: Option<&str>,
    ) -> Result<AuthResponse, ApiError> {
        let mut body = json!({
            "name": name,
            "email": email.as_str(),
            "password": password.expose_secret(),
        });
        if let Some(phone) = phone {
            body["phone"] = json!(phone);
        }
        self.client.post(endpoints::REGISTER, &body).await
    }

    /// The account the current token belongs to.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` when no valid token is set.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<User, ApiError> {
        self.client.get(endpoints::ME).await
    }

    /// Update the signed-in account's profile.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn update_me(&self, update: &ProfileUpdate) -> Result<User, ApiError> {
        self.client.put(endpoints::ME, update).await
    }

    // =========================================================================
    // Address book
    // =========================================================================

    /// Saved addresses of the signed-in account.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn addresses(&self) -> Result<Vec<Address>, ApiError> {
        self.client.get(endpoints::MY_ADDRESSES).await
    }

    /// Save a new address.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input))]
    pub async fn add_address(&self, input: &AddressInput) -> Result<Address, ApiError> {
        self.client.post(endpoints::MY_ADDRESSES, input).await
    }

    /// Replace a saved address.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, input), fields(address_id = %id))]
    pub async fn update_address(
        &self,
        id: &AddressId,
        input: &AddressInput,
    ) -> Result<Address, ApiError> {
        self.client.put(&endpoints::my_address(id), input).await
    }

    /// Delete a saved address.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(address_id = %id))]
    pub async fn delete_address(&self, id: &AddressId) -> Result<(), ApiError> {
        self.client.delete(&endpoints::my_address(id)).await
    }

    // =========================================================================
    // Customers (admin)
    // =========================================================================

    /// All accounts.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list(&self) -> Result<Vec<User>, ApiError> {
        let page: Page<User> = self.client.get(endpoints::USERS).await?;
        Ok(page.items)
    }

    /// Get an account by ID.
    ///
    /// # Errors
    ///
    /// Returns error if the account is not found or the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get(&self, id: &UserId) -> Result<User, ApiError> {
        self.client.get(&endpoints::user(id)).await
    }

    /// Edit an account.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self, update), fields(user_id = %id))]
    pub async fn update(&self, id: &UserId, update: &UserUpdate) -> Result<User, ApiError> {
        self.client.put(&endpoints::user(id), update).await
    }

    /// Delete an account.
    ///
    /// # Errors
    ///
    /// Returns error if the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn delete(&self, id: &UserId) -> Result<(), ApiError> {
        self.client.delete(&endpoints::user(id)).await
    }
}
