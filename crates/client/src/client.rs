//! Shared HTTP client: base URL joining, bearer token injection and response
//! decoding.

use std::sync::Arc;

use reqwest::{Method, RequestBuilder, Response, multipart::Form};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, de::DeserializeOwned};
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::services::{
    AttributeService, BrandService, CartService, CategoryService, DeliveryService,
    OrderService, ProductService, UserService,
};

/// REST backend client.
///
/// Cheap to clone; clones share the HTTP connection pool and the token.
///
/// # Authentication
///
/// Holds at most one bearer token. When set it is attached to every request
/// as `Authorization: Bearer <token>`; when unset requests go out anonymous.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    token: RwLock<Option<SecretString>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url.as_str())
            .field("token", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(config: &ClientConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.base_url.clone(),
                token: RwLock::new(None),
            }),
        })
    }

    /// The backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Attach `token` to all subsequent requests.
    pub async fn set_token(&self, token: SecretString) {
        *self.inner.token.write().await = Some(token);
    }

    /// Stop sending a bearer token.
    pub async fn clear_token(&self) {
        *self.inner.token.write().await = None;
    }

    /// Whether a bearer token is currently set.
    pub async fn has_token(&self) -> bool {
        self.inner.token.read().await.is_some()
    }

    // =========================================================================
    // Services
    // =========================================================================

    /// Catalog products and their variants.
    #[must_use]
    pub fn products(&self) -> ProductService {
        ProductService::new(self.clone())
    }

    /// Product categories.
    #[must_use]
    pub fn categories(&self) -> CategoryService {
        CategoryService::new(self.clone())
    }

    /// Brands.
    #[must_use]
    pub fn brands(&self) -> BrandService {
        BrandService::new(self.clone())
    }

    /// Attribute taxonomies.
    #[must_use]
    pub fn attributes(&self) -> AttributeService {
        AttributeService::new(self.clone())
    }

    /// The signed-in shopper's cart.
    #[must_use]
    pub fn cart(&self) -> CartService {
        CartService::new(self.clone())
    }

    /// Checkout and order management.
    #[must_use]
    pub fn orders(&self) -> OrderService {
        OrderService::new(self.clone())
    }

    /// Accounts, profiles and address books.
    #[must_use]
    pub fn users(&self) -> UserService {
        UserService::new(self.clone())
    }

    /// Delivery options and serviceability.
    #[must_use]
    pub fn delivery(&self) -> DeliveryService {
        DeliveryService::new(self.clone())
    }

    // =========================================================================
    // Verbs
    // =========================================================================

    /// GET `path` and decode the response.
    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path, &[])?;
        Self::send(self.request(Method::GET, url).await).await
    }

    /// GET `path` with query-string pairs and decode the response.
    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(path, query)?;
        Self::send(self.request(Method::GET, url).await).await
    }

    /// POST a JSON body.
    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.with_json(Method::POST, path, body).await
    }

    /// PUT a JSON body.
    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.with_json(Method::PUT, path, body).await
    }

    /// PATCH a JSON body.
    pub(crate) async fn patch<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.with_json(Method::PATCH, path, body).await
    }

    /// DELETE `path`, ignoring any response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path, &[])?;
        let response = self.request(Method::DELETE, url).await.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        Err(Self::error_from(response).await)
    }

    /// DELETE `path` and decode the response (e.g. the updated cart).
    pub(crate) async fn delete_returning<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path, &[])?;
        Self::send(self.request(Method::DELETE, url).await).await
    }

    /// POST a multipart form (image uploads).
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        self.with_form(Method::POST, path, form).await
    }

    /// PUT a multipart form (image uploads).
    pub(crate) async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        self.with_form(Method::PUT, path, form).await
    }

    async fn with_form<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        form: Form,
    ) -> Result<T, ApiError> {
        let url = self.url(path, &[])?;
        Self::send(self.request(method, url).await.multipart(form)).await
    }

    async fn with_json<T: DeserializeOwned, B: Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path, &[])?;
        Self::send(self.request(method, url).await.json(body)).await
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// Append `path` to the base URL and add query pairs.
    ///
    /// The base URL's own path is kept (`https://host/api` + `/products`
    /// gives `https://host/api/products`).
    pub(crate) fn url(&self, path: &str, query: &[(&str, String)]) -> Result<Url, ApiError> {
        let base = self.inner.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let mut url = Url::parse(&format!("{base}/{path}"))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url)
    }

    async fn request(&self, method: Method, url: Url) -> RequestBuilder {
        let builder = self.inner.http.request(method, url);
        match self.inner.token.read().await.as_ref() {
            Some(token) => builder.bearer_auth(token.expose_secret()),
            None => builder,
        }
    }

    #[instrument(skip(builder), level = "debug")]
    async fn send<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
        let response = builder.send().await?;
        let status = response.status();
        debug!(status = status.as_u16(), url = %response.url(), "Backend responded");

        if !status.is_success() {
            return Err(Self::error_from(response).await);
        }

        let body = response.text().await?;
        decode(&body)
    }

    async fn error_from(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let url = response.url().clone();
        let body = response.text().await.unwrap_or_default();
        let error = ApiError::from_status(status, &body);
        warn!(status, url = %url, error = %error, "Backend request failed");
        error
    }
}

/// Decode a success body that is either the resource itself or wrapped as
/// `{"data": <resource>, ...}`.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let value: serde_json::Value = if body.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_str(body).map_err(|e| ApiError::Parse(format!("invalid JSON: {e}")))?
    };

    if let Some(data) = value.get("data") {
        // Paging counters beside a `data` array belong to the listing itself.
        if data.is_array()
            && has_sibling_fields(&value)
            && let Ok(decoded) = T::deserialize(&value)
        {
            return Ok(decoded);
        }
        if let Ok(decoded) = T::deserialize(data) {
            return Ok(decoded);
        }
    }

    serde_json::from_value(value)
        .map_err(|e| ApiError::Parse(format!("unexpected response shape: {e}")))
}

/// Keys that only describe the envelope around `data`.
const ENVELOPE_KEYS: [&str; 5] = ["data", "success", "message", "status", "statusCode"];

fn has_sibling_fields(value: &serde_json::Value) -> bool {
    value
        .as_object()
        .is_some_and(|object| object.keys().any(|key| !ENVELOPE_KEYS.contains(&key.as_str())))
}
