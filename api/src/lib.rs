//! # Brand-asset generation API client
//!
//! Typed operations over the HTTP API that generates logos, slogans, color
//! palettes, domain suggestions and business names.
//!
//! Every JSON response is wrapped in an envelope (`{success, data, error,
//! message}`, see [`ApiResponse`]); the logo download returns raw bytes.
//!
//! ## Example
//!
//! ```no_run
//! use brandkit_api::{ApiClient, ApiConfig, AuthToken};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ApiClient::new(ApiConfig::from_env())
//!         .with_token(Some(AuthToken::new("token-from-login")));
//!
//!     let brands = client.brands().await?.into_data()?;
//!     println!("{} brands", brands.len());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod requests;
pub mod types;

pub use client::{ApiClient, ApiConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ApiError, GENERIC_ERROR_MESSAGE};
pub use requests::{
    ApiResponse, AuthSession, CheckoutSession, DomainAvailability, DownloadFormat, ExportLink,
    ExportTarget, GenerationRequest, Preferences, PurchaseReceipt,
};
pub use types::{
    AuthToken, Brand, BrandDraft, BrandId, BrandKit, BrandKitId, BrandPatch, BusinessName,
    BusinessNameId, BusinessNameResult, ColorPalette, DomainResult, DomainSuggestion,
    DomainSuggestionId, Generation, GenerationId, GenerationKind, GenerationPatch,
    GenerationResult, GenerationStatus, ImageFormat, Logo, LogoId, LogoResult, LogoVariation,
    PaletteError, Plan, Slogan, SloganId, SloganItem, SloganResult, Subscription,
    SubscriptionStatus, User, UserId,
};
