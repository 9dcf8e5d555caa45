//! HTTP client for the generation API

use crate::error::{ApiError, GENERIC_ERROR_MESSAGE};
use crate::requests::{
    ApiResponse, AuthSession, CheckoutSession, DomainAvailability, DownloadFormat, ExportLink,
    ExportTarget, GenerationRequest, Preferences, PurchaseReceipt,
};
use crate::types::{
    AuthToken, Brand, BrandDraft, BrandId, BrandKit, BrandKitId, BrandPatch, BusinessName,
    DomainSuggestion, Generation, GenerationId, LogoId, Subscription, User,
};
use bytes::Bytes;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, Method};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::fmt::Display;

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api";

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "BRANDKIT_API_URL";

/// Client configuration
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL every endpoint path is appended to
    pub base_url: String,
}

impl ApiConfig {
    /// Configuration for an explicit base URL
    ///
    /// A trailing `/` is dropped since endpoint paths start with one.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Read the base URL from `BRANDKIT_API_URL`, falling back to the default
    #[must_use]
    pub fn from_env() -> Self {
        std::env::var(BASE_URL_ENV)
            .ok()
            .filter(|url| !url.trim().is_empty())
            .map_or_else(Self::default, Self::new)
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

/// Typed client for the generation API
///
/// The client holds no mutable state; the bearer credential is fixed at
/// construction through [`ApiClient::with_token`]. Every call is a single
/// attempt.
///
/// # Example
///
/// ```no_run
/// use brandkit_api::{ApiClient, ApiConfig};
///
/// # async fn run() -> Result<(), brandkit_api::ApiError> {
/// let client = ApiClient::new(ApiConfig::default());
/// let generation = client.generate_logo("blue tech logo", Some("modern")).await?.into_data()?;
/// println!("generated {}", generation.id);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<AuthToken>,
}

impl ApiClient {
    /// Create an unauthenticated client
    #[must_use]
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::new(),
            base_url: config.base_url,
            token: None,
        }
    }

    /// Create an unauthenticated client configured from the environment
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env())
    }

    /// Set or clear the bearer credential
    #[must_use]
    pub fn with_token(mut self, token: Option<AuthToken>) -> Self {
        self.token = token;
        self
    }

    /// Configured credential
    #[must_use]
    pub const fn token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Configured base URL
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and parse the JSON envelope
    ///
    /// `Content-Type: application/json` is sent unless `headers` overrides
    /// it. When a token is configured, `Authorization: Bearer <token>` is
    /// added after the caller's headers.
    ///
    /// # Errors
    ///
    /// - [`ApiError::RequestFailed`] for a non-2xx status, carrying the
    ///   envelope's `error` or [`GENERIC_ERROR_MESSAGE`]
    /// - [`ApiError::TransportFailed`] when the network fails or the body is
    ///   not the expected JSON
    /// - [`ApiError::InvalidHeader`] when the token cannot be sent as a header
    #[tracing::instrument(skip(self, body, headers))]
    pub async fn request<T, B>(
        &self,
        method: Method,
        endpoint: &str,
        body: Option<&B>,
        headers: Option<HeaderMap>,
    ) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{endpoint}", self.base_url);

        let mut header_map = HeaderMap::new();
        header_map.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(extra) = headers {
            header_map.extend(extra);
        }
        if let Some(token) = &self.token {
            let value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
                .map_err(|e| ApiError::InvalidHeader(e.to_string()))?;
            header_map.insert(AUTHORIZATION, value);
        }

        let mut builder = self.client.request(method.clone(), &url).headers(header_map);
        if let Some(body) = body {
            let encoded = serde_json::to_vec(body)
                .map_err(|e| transport_failure(&url, format!("failed to encode body: {e}")))?;
            builder = builder.body(encoded);
        }

        metrics::counter!("api.requests.total", "method" => method.to_string()).increment(1);

        let response = builder.send().await.map_err(|e| transport_failure(&url, e))?;
        let status = response.status();
        let payload = response.bytes().await.map_err(|e| transport_failure(&url, e))?;

        if !status.is_success() {
            let envelope: Value =
                serde_json::from_slice(&payload).map_err(|e| transport_failure(&url, e))?;
            let message = envelope
                .get("error")
                .and_then(Value::as_str)
                .map_or_else(|| GENERIC_ERROR_MESSAGE.to_string(), ToString::to_string);

            metrics::counter!("api.requests.failed").increment(1);
            tracing::error!(%url, status = status.as_u16(), %message, "API request failed");

            return Err(ApiError::RequestFailed {
                status: status.as_u16(),
                message,
            });
        }

        tracing::debug!(%url, status = status.as_u16(), "API request succeeded");
        serde_json::from_slice(&payload).map_err(|e| transport_failure(&url, e))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<ApiResponse<T>, ApiError> {
        self.request::<T, Value>(Method::GET, endpoint, None, None).await
    }

    async fn post<T, B>(&self, endpoint: &str, body: Option<&B>) -> Result<ApiResponse<T>, ApiError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.request(Method::POST, endpoint, body, None).await
    }

    // ========== Auth ==========

    /// `POST /auth/login/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn login(&self, email: &str, password: &str) -> Result<ApiResponse<AuthSession>, ApiError> {
        let body = json!({ "email": email, "password": password });
        self.post("/auth/login/", Some(&body)).await
    }

    /// `POST /auth/register/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<ApiResponse<AuthSession>, ApiError> {
        let body = json!({ "email": email, "password": password, "name": name });
        self.post("/auth/register/", Some(&body)).await
    }

    /// `POST /auth/logout/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn logout(&self) -> Result<ApiResponse<Value>, ApiError> {
        self.post::<Value, Value>("/auth/logout/", None).await
    }

    /// `GET /auth/me/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn current_user(&self) -> Result<ApiResponse<User>, ApiError> {
        self.get("/auth/me/").await
    }

    // ========== Brands ==========

    /// `GET /brands/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn brands(&self) -> Result<ApiResponse<Vec<Brand>>, ApiError> {
        self.get("/brands/").await
    }

    /// `GET /brands/{id}/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn brand(&self, id: &BrandId) -> Result<ApiResponse<Brand>, ApiError> {
        self.get(&format!("/brands/{}/", segment(id))).await
    }

    /// `POST /brands/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn create_brand(&self, draft: &BrandDraft) -> Result<ApiResponse<Brand>, ApiError> {
        self.post("/brands/", Some(draft)).await
    }

    /// `PATCH /brands/{id}/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn update_brand(
        &self,
        id: &BrandId,
        patch: &BrandPatch,
    ) -> Result<ApiResponse<Brand>, ApiError> {
        self.request(Method::PATCH, &format!("/brands/{}/", segment(id)), Some(patch), None)
            .await
    }

    /// `DELETE /brands/{id}/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete_brand(&self, id: &BrandId) -> Result<ApiResponse<Value>, ApiError> {
        self.request::<Value, Value>(Method::DELETE, &format!("/brands/{}/", segment(id)), None, None)
            .await
    }

    // ========== Generations ==========

    /// `POST /generate/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn generate_content(
        &self,
        request: &GenerationRequest,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        tracing::debug!(kind = %request.kind, "Submitting generation");
        self.post("/generate/", Some(request)).await
    }

    /// `GET /generate/{id}/status/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn generation_status(&self, id: &GenerationId) -> Result<ApiResponse<Generation>, ApiError> {
        self.get(&format!("/generate/{}/status/", segment(id))).await
    }

    /// `GET /generate/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn generations(&self) -> Result<ApiResponse<Vec<Generation>>, ApiError> {
        self.get("/generate/").await
    }

    /// Logo generation through `POST /generate/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn generate_logo(
        &self,
        prompt: &str,
        style: Option<&str>,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        self.generate_content(&GenerationRequest::logo(prompt, style.map(str::to_string)))
            .await
    }

    /// Slogan generation through `POST /generate/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn generate_slogan(
        &self,
        prompt: &str,
        style: Option<&str>,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        self.generate_content(&GenerationRequest::slogan(prompt, style.map(str::to_string)))
            .await
    }

    /// Palette generation through `POST /generate/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn generate_colors(
        &self,
        industry: &str,
        preferences: Option<Preferences>,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        self.generate_content(&GenerationRequest::colors(industry, preferences))
            .await
    }

    /// `GET /logos/{id}/download/?format=..`, returning the raw asset
    ///
    /// # Errors
    ///
    /// - [`ApiError::DownloadFailed`] for a non-2xx status
    /// - [`ApiError::TransportFailed`] when the network fails
    #[tracing::instrument(skip(self))]
    pub async fn download_logo(&self, id: &LogoId, format: DownloadFormat) -> Result<Bytes, ApiError> {
        let url = format!("{}/logos/{}/download/?format={format}", self.base_url, segment(id));

        let mut builder = self.client.get(&url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token.as_str());
        }

        metrics::counter!("api.requests.total", "method" => "GET").increment(1);

        let response = builder.send().await.map_err(|e| transport_failure(&url, e))?;
        let status = response.status();
        if !status.is_success() {
            metrics::counter!("api.requests.failed").increment(1);
            tracing::error!(%url, status = status.as_u16(), "Logo download failed");
            return Err(ApiError::DownloadFailed {
                status: status.as_u16(),
            });
        }

        response.bytes().await.map_err(|e| transport_failure(&url, e))
    }

    // ========== Domains & names ==========

    /// `POST /domains/suggest/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn suggest_domains(
        &self,
        business_name: &str,
    ) -> Result<ApiResponse<Vec<DomainSuggestion>>, ApiError> {
        let body = json!({ "business_name": business_name });
        self.post("/domains/suggest/", Some(&body)).await
    }

    /// `GET /domains/check/{domain}/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn check_domain(&self, domain: &str) -> Result<ApiResponse<DomainAvailability>, ApiError> {
        self.get(&format!("/domains/check/{}/", segment(domain))).await
    }

    /// `POST /business-names/generate/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn generate_business_names(
        &self,
        industry: &str,
        keywords: Option<&[String]>,
    ) -> Result<ApiResponse<Vec<BusinessName>>, ApiError> {
        let mut body = json!({ "industry": industry });
        if let Some(keywords) = keywords {
            body["keywords"] = json!(keywords);
        }
        self.post("/business-names/generate/", Some(&body)).await
    }

    // ========== Brand kits ==========

    /// `GET /brand-kits/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn brand_kits(&self) -> Result<ApiResponse<Vec<BrandKit>>, ApiError> {
        self.get("/brand-kits/").await
    }

    /// `POST /brand-kits/{id}/purchase/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn purchase_brand_kit(&self, id: &BrandKitId) -> Result<ApiResponse<PurchaseReceipt>, ApiError> {
        self.post::<PurchaseReceipt, Value>(&format!("/brand-kits/{}/purchase/", segment(id)), None)
            .await
    }

    // ========== Integrations ==========

    /// `POST /integrations/connect/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn connect_integration(
        &self,
        name: &str,
        access_token: &str,
    ) -> Result<ApiResponse<Value>, ApiError> {
        let body = json!({ "name": name, "access_token": access_token });
        self.post("/integrations/connect/", Some(&body)).await
    }

    /// `POST /integrations/{target}/export/{brand_id}/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn export_brand(
        &self,
        target: ExportTarget,
        brand_id: &BrandId,
    ) -> Result<ApiResponse<ExportLink>, ApiError> {
        let endpoint = format!("/integrations/{}/export/{}/", target.as_str(), segment(brand_id));
        self.post::<ExportLink, Value>(&endpoint, None).await
    }

    /// Export a brand to Canva
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn export_to_canva(&self, brand_id: &BrandId) -> Result<ApiResponse<ExportLink>, ApiError> {
        self.export_brand(ExportTarget::Canva, brand_id).await
    }

    /// Export a brand to Figma
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn export_to_figma(&self, brand_id: &BrandId) -> Result<ApiResponse<ExportLink>, ApiError> {
        self.export_brand(ExportTarget::Figma, brand_id).await
    }

    // ========== Payments ==========

    /// `POST /payments/create-checkout-session/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn create_checkout_session(
        &self,
        price_id: &str,
    ) -> Result<ApiResponse<CheckoutSession>, ApiError> {
        let body = json!({ "price_id": price_id });
        self.post("/payments/create-checkout-session/", Some(&body))
            .await
    }

    /// `GET /payments/subscription/`
    ///
    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn subscription(&self) -> Result<ApiResponse<Subscription>, ApiError> {
        self.get("/payments/subscription/").await
    }
}

/// Percent-encode one path segment
fn segment(value: impl Display) -> String {
    urlencoding::encode(&value.to_string()).into_owned()
}

fn transport_failure(url: &str, detail: impl Display) -> ApiError {
    metrics::counter!("api.requests.failed").increment(1);
    tracing::error!(%url, error = %detail, "API request failed");
    ApiError::TransportFailed(detail.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_trims_trailing_slash() {
        assert_eq!(ApiConfig::new("http://api.test/v1/").base_url, "http://api.test/v1");
        assert_eq!(ApiConfig::default().base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_segment_escapes_reserved_characters() {
        assert_eq!(segment("acme.io/admin?x=1"), "acme.io%2Fadmin%3Fx%3D1");
        assert_eq!(segment(BrandId::new("b-1_a.b~")), "b-1_a.b~");
    }

    #[test]
    fn test_with_token() {
        let client = ApiClient::new(ApiConfig::default());
        assert!(client.token().is_none());

        let client = client.with_token(Some(AuthToken::new("abc")));
        assert_eq!(client.token().map(AuthToken::as_str), Some("abc"));

        let client = client.with_token(None);
        assert!(client.token().is_none());
    }
}
