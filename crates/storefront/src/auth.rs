//! Sign-in state.
//!
//! A successful login or registration installs the bearer token on the
//! shared [`ApiClient`] and persists `token` and `user` in local storage so a
//! later run can [`AuthSession::restore`] it.

use secrecy::{ExposeSecret, SecretString};
use threadline_client::{ApiClient, ApiError};
use threadline_core::{Email, FormErrors};
use threadline_core::forms::optional;
use threadline_core::models::{AuthResponse, User};
use tracing::{info, instrument, warn};

use crate::error::Result;
use crate::storage::SessionStore;

/// Sign-in form.
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: String,
    pub password: SecretString,
}

/// Account registration form.
#[derive(Debug, Clone)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl LoginForm {
    fn validate(&self) -> std::result::Result<Email, FormErrors> {
        let mut errors = FormErrors::new();
        let email = errors.email("email", &self.email);
        if self.password.expose_secret().is_empty() {
            errors.push("password", "password is required");
        }
        match email {
            Some(email) if errors.is_empty() => Ok(email),
            _ => Err(errors),
        }
    }
}

impl RegisterForm {
    fn validate(&self) -> std::result::Result<Email, FormErrors> {
        let mut errors = FormErrors::new();
        errors.required("name", &self.name);
        let email = errors.email("email", &self.email);
        let password = self.password.expose_secret();
        if password.is_empty() {
            errors.push("password", "password is required");
        } else if password != self.confirm_password.expose_secret() {
            errors.push("confirm_password", "passwords do not match");
        }
        match email {
            Some(email) if errors.is_empty() => Ok(email),
            _ => Err(errors),
        }
    }
}

/// The shopper's authentication session.
#[derive(Debug, Clone)]
pub struct AuthSession {
    client: ApiClient,
    store: SessionStore,
}

impl AuthSession {
    #[must_use]
    pub const fn new(client: ApiClient, store: SessionStore) -> Self {
        Self { client, store }
    }

    /// Sign in and remember the session.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Form` for a malformed email or blank
    /// password, or the backend error for rejected credentials.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn login(&self, form: &LoginForm) -> Result<User> {
        let email = form.validate()?;
        let response = self.client.users().login(&email, &form.password).await?;
        self.accept(response).await
    }

    /// Create an account and sign in to it.
    ///
    /// # Errors
    ///
    /// Returns `StorefrontError::Form` listing every invalid field, or the
    /// backend error if registration is rejected.
    #[instrument(skip(self, form), fields(email = %form.email))]
    pub async fn register(&self, form: &RegisterForm) -> Result<User> {
        let email = form.validate()?;
        let response = self
            .client
            .users()
            .register(
                form.name.trim(),
                &email,
                &form.password,
                optional(&form.phone).as_deref(),
            )
            .await?;
        self.accept(response).await
    }

    /// Sign out: drop the token everywhere and end the shopping session.
    ///
    /// # Errors
    ///
    /// Returns error if storage cannot be written.
    #[instrument(skip(self))]
    pub async fn logout(&self) -> Result<()> {
        self.client.clear_token().await;
        self.store.clear_auth()?;
        self.store.end_session()?;
        info!("Signed out");
        Ok(())
    }

    /// Load a stored token into the client and refresh the stored user.
    ///
    /// Returns `None` when nothing is stored or the token was rejected; a
    /// rejected token is forgotten.
    ///
    /// # Errors
    ///
    /// Returns error if storage fails or the backend fails for a reason other
    /// than an invalid token.
    #[instrument(skip(self))]
    pub async fn restore(&self) -> Result<Option<User>> {
        let Some(token) = self.store.token()? else {
            return Ok(None);
        };
        self.client.set_token(token).await;

        match self.client.users().me().await {
            Ok(user) => {
                self.store.set_user(&user)?;
                Ok(Some(user))
            }
            Err(ApiError::Unauthorized(message)) => {
                warn!(%message, "Stored token rejected, signing out");
                self.client.clear_token().await;
                self.store.clear_auth()?;
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// The user stored at sign-in, without a backend call.
    ///
    /// # Errors
    ///
    /// Returns error if local storage cannot be read.
    pub fn current_user(&self) -> Result<Option<User>> {
        Ok(self.store.user()?)
    }

    /// Whether a shopper is signed in.
    ///
    /// # Errors
    ///
    /// Returns error if local storage cannot be read.
    pub fn is_signed_in(&self) -> Result<bool> {
        Ok(self.store.token()?.is_some() && self.store.user()?.is_some())
    }

    async fn accept(&self, response: AuthResponse) -> Result<User> {
        self.store.set_token(&response.token)?;
        self.store.set_user(&response.user)?;
        self.client
            .set_token(SecretString::from(response.token))
            .await;
        info!(user_id = %response.user.id, "Signed in");
        Ok(response.user)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use threadline_client::ClientConfig;

    use super::*;
    use crate::error::StorefrontError;

    fn session() -> AuthSession {
        let client = ApiClient::new(&ClientConfig::new("http://127.0.0.1:9").unwrap()).unwrap();
        AuthSession::new(client, SessionStore::in_memory())
    }

    #[test]
    fn test_register_form_collects_errors() {
        let form = RegisterForm {
            name: " ".into(),
            email: "nope".into(),
            phone: String::new(),
            password: SecretString::from("secret1"),
            confirm_password: SecretString::from("secret2"),
        };
        let errors = form.validate().unwrap_err();
        assert!(errors.get("name").is_some());
        assert!(errors.get("email").is_some());
        assert_eq!(errors.get("confirm_password"), Some("passwords do not match"));
    }

    #[tokio::test]
    async fn test_login_validates_before_calling_backend() {
        let form = LoginForm {
            email: String::new(),
            password: SecretString::from(""),
        };
        let errors = match session().login(&form).await {
            Err(StorefrontError::Form(errors)) => errors,
            other => panic!("expected form error, got {other:?}"),
        };
        assert_eq!(errors.len(), 2);
    }

    #[tokio::test]
    async fn test_restore_without_token_is_signed_out() {
        let session = session();
        assert!(session.restore().await.unwrap().is_none());
        assert!(!session.is_signed_in().unwrap());
        assert!(session.current_user().unwrap().is_none());
    }
}
