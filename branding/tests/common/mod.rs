//! Shared fixtures for branding tests

#![allow(dead_code)] // Not every test binary uses every fixture

use async_trait::async_trait;
use branding::{BrandingAction, BrandingApi, BrandingEnvironment, BrandingReducer, BrandingState};
use brandkit_api::{
    ApiError, ApiResponse, AuthSession, AuthToken, Brand, BrandDraft, BrandId, BrandKit, BrandPatch,
    BusinessName, ColorPalette, DomainSuggestion, DownloadFormat, Generation, GenerationId, LogoId,
    Preferences, User, UserId,
};
use brandkit_core::Reducer;
use brandkit_core::environment::Clock;
use brandkit_testing::{collect_feedback, test_clock};
use bytes::Bytes;
use serde_json::Value;
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Configurable in-process API
#[derive(Default)]
pub struct StubApi {
    /// Reply to logo/slogan/colors generation
    pub generation: Option<Result<ApiResponse<Generation>, ApiError>>,
    /// Reply to domain suggestions
    pub domains: Option<Vec<DomainSuggestion>>,
    /// Reply to login/register
    pub session: Option<AuthSession>,
    /// Reply to logout
    pub logout_fails: bool,
    /// When set, logo generation waits for a notification
    pub logo_gate: Option<Arc<Notify>>,
    /// Tokens seen per call, in order
    pub seen_tokens: Mutex<Vec<(&'static str, Option<String>)>>,
}

impl StubApi {
    pub fn generating(generation: Generation) -> Self {
        Self {
            generation: Some(Ok(ApiResponse::ok(generation))),
            ..Self::default()
        }
    }

    fn record(&self, call: &'static str, token: Option<&AuthToken>) {
        if let Ok(mut seen) = self.seen_tokens.lock() {
            seen.push((call, token.map(|t| t.as_str().to_string())));
        }
    }

    fn generation_reply(&self) -> Result<ApiResponse<Generation>, ApiError> {
        self.generation.clone().unwrap_or_else(not_stubbed)
    }
}

fn not_stubbed<T>() -> Result<T, ApiError> {
    Err(ApiError::TransportFailed("not stubbed".to_string()))
}

#[async_trait]
impl BrandingApi for StubApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<ApiResponse<AuthSession>, ApiError> {
        self.session.clone().map_or_else(not_stubbed, |s| Ok(ApiResponse::ok(s)))
    }

    async fn register(
        &self,
        _email: &str,
        _password: &str,
        _name: &str,
    ) -> Result<ApiResponse<AuthSession>, ApiError> {
        self.session.clone().map_or_else(not_stubbed, |s| Ok(ApiResponse::ok(s)))
    }

    async fn logout(&self, token: Option<&AuthToken>) -> Result<ApiResponse<Value>, ApiError> {
        self.record("logout", token);
        if self.logout_fails {
            return Err(ApiError::RequestFailed {
                status: 500,
                message: "boom".to_string(),
            });
        }
        Ok(ApiResponse::ok(Value::Null))
    }

    async fn current_user(&self, token: Option<&AuthToken>) -> Result<ApiResponse<User>, ApiError> {
        self.record("current_user", token);
        not_stubbed()
    }

    async fn brands(&self, token: Option<&AuthToken>) -> Result<ApiResponse<Vec<Brand>>, ApiError> {
        self.record("brands", token);
        not_stubbed()
    }

    async fn create_brand(
        &self,
        token: Option<&AuthToken>,
        _draft: &BrandDraft,
    ) -> Result<ApiResponse<Brand>, ApiError> {
        self.record("create_brand", token);
        not_stubbed()
    }

    async fn update_brand(
        &self,
        token: Option<&AuthToken>,
        id: &BrandId,
        _patch: &BrandPatch,
    ) -> Result<ApiResponse<Brand>, ApiError> {
        self.record("update_brand", token);
        Ok(ApiResponse::ok(sample_brand(id.as_str(), "server copy")))
    }

    async fn delete_brand(
        &self,
        token: Option<&AuthToken>,
        _id: &BrandId,
    ) -> Result<ApiResponse<Value>, ApiError> {
        self.record("delete_brand", token);
        Ok(ApiResponse {
            success: false,
            data: None,
            error: Some("Brand is locked".to_string()),
            message: None,
        })
    }

    async fn brand_kits(&self, token: Option<&AuthToken>) -> Result<ApiResponse<Vec<BrandKit>>, ApiError> {
        self.record("brand_kits", token);
        not_stubbed()
    }

    async fn generate_logo(
        &self,
        token: Option<&AuthToken>,
        _prompt: &str,
        _style: Option<&str>,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        self.record("generate_logo", token);
        if let Some(gate) = &self.logo_gate {
            gate.notified().await;
        }
        self.generation_reply()
    }

    async fn generate_slogan(
        &self,
        token: Option<&AuthToken>,
        _prompt: &str,
        _style: Option<&str>,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        self.record("generate_slogan", token);
        self.generation_reply()
    }

    async fn generate_colors(
        &self,
        token: Option<&AuthToken>,
        _industry: &str,
        _preferences: Option<Preferences>,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        self.record("generate_colors", token);
        self.generation_reply()
    }

    async fn suggest_domains(
        &self,
        token: Option<&AuthToken>,
        _business_name: &str,
    ) -> Result<ApiResponse<Vec<DomainSuggestion>>, ApiError> {
        self.record("suggest_domains", token);
        self.domains.clone().map_or_else(not_stubbed, |d| Ok(ApiResponse::ok(d)))
    }

    async fn generate_business_names(
        &self,
        token: Option<&AuthToken>,
        _industry: &str,
        _keywords: &[String],
    ) -> Result<ApiResponse<Vec<BusinessName>>, ApiError> {
        self.record("generate_business_names", token);
        not_stubbed()
    }

    async fn generation_status(
        &self,
        token: Option<&AuthToken>,
        _id: &GenerationId,
    ) -> Result<ApiResponse<Generation>, ApiError> {
        self.record("generation_status", token);
        self.generation_reply()
    }

    async fn download_logo(
        &self,
        token: Option<&AuthToken>,
        _id: &LogoId,
        _format: DownloadFormat,
    ) -> Result<Bytes, ApiError> {
        self.record("download_logo", token);
        Err(ApiError::DownloadFailed { status: 404 })
    }
}

pub fn environment(api: Arc<dyn BrandingApi>) -> BrandingEnvironment {
    BrandingEnvironment::new(api, Arc::new(test_clock()))
}

/// Reduce `action`, then resolve its effects and reduce every fed-back action
pub async fn run(state: &mut BrandingState, action: BrandingAction, env: &BrandingEnvironment) {
    let reducer = BrandingReducer::new();
    let mut pending = vec![action];
    while let Some(action) = pending.pop() {
        let effects = reducer.reduce(state, action, env);
        let mut feedback = collect_feedback(effects).await;
        feedback.reverse();
        pending.extend(feedback);
    }
}

pub fn palette() -> ColorPalette {
    ColorPalette {
        primary: "#1e3a8a".to_string(),
        secondary: "#3b82f6".to_string(),
        accent: "#f59e0b".to_string(),
        neutral: "#6b7280".to_string(),
        background: "#ffffff".to_string(),
    }
}

pub fn sample_brand(id: &str, name: &str) -> Brand {
    let now = test_clock().now();
    Brand {
        id: BrandId::new(id),
        name: name.to_string(),
        description: String::new(),
        industry: "Technology".to_string(),
        target_audience: "Developers".to_string(),
        colors: palette(),
        logo: None,
        slogans: Vec::new(),
        domain_suggestions: Vec::new(),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_user() -> User {
    let now = test_clock().now();
    User {
        id: UserId::new("u1"),
        email: "ada@example.com".to_string(),
        name: "Ada".to_string(),
        avatar: None,
        subscription: None,
        created_at: now,
        updated_at: now,
    }
}
