//! The store's view of the generation API
//!
//! Effects call the API through [`BrandingApi`] so tests can swap in a stub.
//! The credential is passed per call, taken from the state at the time the
//! command was reduced.

use async_trait::async_trait;
use brandkit_api::{
    ApiClient, ApiError, ApiResponse, AuthSession, AuthToken, Brand, BrandDraft, BrandId, BrandKit,
    BrandPatch, BusinessName, DomainSuggestion, DownloadFormat, Generation, GenerationId, LogoId,
    Preferences, User,
};
use bytes::Bytes;
use serde_json::Value;

/// Operations the generation store needs from the API
#[async_trait]
pub trait BrandingApi: Send + Sync {
    /// Sign in
    async fn login(&self, email: &str, password: &str) -> Result<ApiResponse<AuthSession>, ApiError>;

    /// Create an account
    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<ApiResponse<AuthSession>, ApiError>;

    /// Close the server-side session
    async fn logout(&self, token: Option<&AuthToken>) -> Result<ApiResponse<Value>, ApiError>;

    /// Fetch the signed-in user
    async fn current_user(&self, token: Option<&AuthToken>) -> Result<ApiResponse<User>, ApiError>;

    /// List brands
    async fn brands(&self, token: Option<&AuthToken>) -> Result<ApiResponse<Vec<Brand>>, ApiError>;

    /// Create a brand
    async fn create_brand(
        &self,
        token: Option<&AuthToken>,
        draft: &BrandDraft,
    ) -> Result<ApiResponse<Brand>, ApiError>;

    /// Patch a brand
    async fn update_brand(
        &self,
        token: Option<&AuthToken>,
        id: &BrandId,
        patch: &BrandPatch,
    ) -> Result<ApiResponse<Brand>, ApiError>;

    /// Delete a brand
    async fn delete_brand(
        &self,
        token: Option<&AuthToken>,
        id: &BrandId,
    ) -> Result<ApiResponse<Value>, ApiError>;

    /// List brand kits
    async fn brand_kits(&self, token: Option<&AuthToken>) -> Result<ApiResponse<Vec<BrandKit>>, ApiError>;

    /// Generate a logo
    async fn generate_logo(
        &self,
        token: Option<&AuthToken>,
        prompt: &str,
        style: Option<&str>,
    ) -> Result<ApiResponse<Generation>, ApiError>;

    /// Generate slogans
    async fn generate_slogan(
        &self,
        token: Option<&AuthToken>,
        prompt: &str,
        style: Option<&str>,
    ) -> Result<ApiResponse<Generation>, ApiError>;

    /// Generate a palette
    async fn generate_colors(
        &self,
        token: Option<&AuthToken>,
        industry: &str,
        preferences: Option<Preferences>,
    ) -> Result<ApiResponse<Generation>, ApiError>;

    /// Suggest domains
    async fn suggest_domains(
        &self,
        token: Option<&AuthToken>,
        business_name: &str,
    ) -> Result<ApiResponse<Vec<DomainSuggestion>>, ApiError>;

    /// Generate business names
    async fn generate_business_names(
        &self,
        token: Option<&AuthToken>,
        industry: &str,
        keywords: &[String],
    ) -> Result<ApiResponse<Vec<BusinessName>>, ApiError>;

    /// Poll a generation
    async fn generation_status(
        &self,
        token: Option<&AuthToken>,
        id: &GenerationId,
    ) -> Result<ApiResponse<Generation>, ApiError>;

    /// Download a logo asset
    async fn download_logo(
        &self,
        token: Option<&AuthToken>,
        id: &LogoId,
        format: DownloadFormat,
    ) -> Result<Bytes, ApiError>;
}

fn authorized(client: &ApiClient, token: Option<&AuthToken>) -> ApiClient {
    client.clone().with_token(token.cloned())
}

#[async_trait]
impl BrandingApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<ApiResponse<AuthSession>, ApiError> {
        ApiClient::login(self, email, password).await
    }

    async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<ApiResponse<AuthSession>, ApiError> {
        ApiClient::register(self, email, password, name).await
    }

    async fn logout(&self, token: Option<&AuthToken>) -> Result<ApiResponse<Value>, ApiError> {
        authorized(self, token).logout().await
    }

    async fn current_user(&self, token: Option<&AuthToken>) -> Result<ApiResponse<User>, ApiError> {
        authorized(self, token).current_user().await
    }

    async fn brands(&self, token: Option<&AuthToken>) -> Result<ApiResponse<Vec<Brand>>, ApiError> {
        authorized(self, token).brands().await
    }

    async fn create_brand(
        &self,
        token: Option<&AuthToken>,
        draft: &BrandDraft,
    ) -> Result<ApiResponse<Brand>, ApiError> {
        authorized(self, token).create_brand(draft).await
    }

    async fn update_brand(
        &self,
        token: Option<&AuthToken>,
        id: &BrandId,
        patch: &BrandPatch,
    ) -> Result<ApiResponse<Brand>, ApiError> {
        authorized(self, token).update_brand(id, patch).await
    }

    async fn delete_brand(
        &self,
        token: Option<&AuthToken>,
        id: &BrandId,
    ) -> Result<ApiResponse<Value>, ApiError> {
        authorized(self, token).delete_brand(id).await
    }

    async fn brand_kits(&self, token: Option<&AuthToken>) -> Result<ApiResponse<Vec<BrandKit>>, ApiError> {
        authorized(self, token).brand_kits().await
    }

    async fn generate_logo(
        &self,
        token: Option<&AuthToken>,
        prompt: &str,
        style: Option<&str>,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        authorized(self, token).generate_logo(prompt, style).await
    }

    async fn generate_slogan(
        &self,
        token: Option<&AuthToken>,
        prompt: &str,
        style: Option<&str>,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        authorized(self, token).generate_slogan(prompt, style).await
    }

    async fn generate_colors(
        &self,
        token: Option<&AuthToken>,
        industry: &str,
        preferences: Option<Preferences>,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        authorized(self, token)
            .generate_colors(industry, preferences)
            .await
    }

    async fn suggest_domains(
        &self,
        token: Option<&AuthToken>,
        business_name: &str,
    ) -> Result<ApiResponse<Vec<DomainSuggestion>>, ApiError> {
        authorized(self, token).suggest_domains(business_name).await
    }

    async fn generate_business_names(
        &self,
        token: Option<&AuthToken>,
        industry: &str,
        keywords: &[String],
    ) -> Result<ApiResponse<Vec<BusinessName>>, ApiError> {
        let keywords = (!keywords.is_empty()).then_some(keywords);
        authorized(self, token)
            .generate_business_names(industry, keywords)
            .await
    }

    async fn generation_status(
        &self,
        token: Option<&AuthToken>,
        id: &GenerationId,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        authorized(self, token).generation_status(id).await
    }

    async fn download_logo(
        &self,
        token: Option<&AuthToken>,
        id: &LogoId,
        format: DownloadFormat,
    ) -> Result<Bytes, ApiError> {
        authorized(self, token).download_logo(id, format).await
    }
}
