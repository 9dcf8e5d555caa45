//! Actions accepted by the generation store

use crate::state::{LogoDownload, RequestId};
use brandkit_api::{
    ApiError, AuthSession, Brand, BrandDraft, BrandId, BrandKit, BrandPatch, DownloadFormat,
    Generation, GenerationId, GenerationKind, GenerationPatch, LogoId, Preferences, SloganId, User,
};

/// Every input of the generation store
///
/// Setters replace state directly. Commands validate input and start API
/// calls; their effects feed back the event variants at the end.
#[derive(Clone, Debug)]
pub enum BrandingAction {
    // ========== Setters ==========
    /// Replace the signed-in user
    SetUser(Option<User>),
    /// Replace the authentication flag
    SetAuthenticated(bool),
    /// Replace the brand list
    SetBrands(Vec<Brand>),
    /// Append a brand
    AddBrand(Brand),
    /// Merge a patch into a brand (and the current brand if it matches)
    UpdateBrand {
        /// Brand to patch
        id: BrandId,
        /// Fields to overwrite
        patch: BrandPatch,
    },
    /// Remove a brand (and clear the current brand if it matches)
    DeleteBrand {
        /// Brand to remove
        id: BrandId,
    },
    /// Select the brand being edited
    SetCurrentBrand(Option<Brand>),
    /// Prepend a generation
    AddGeneration(Generation),
    /// Merge a status/result patch; no-op for unknown ids
    UpdateGeneration {
        /// Generation to patch
        id: GenerationId,
        /// Status/result update
        patch: GenerationPatch,
    },
    /// Drive the manual generating flag
    SetGenerating(bool),
    /// Replace the loading flag
    SetLoading(bool),
    /// Replace the error message
    SetError(Option<String>),
    /// Clear the error message
    ClearError,
    /// Replace the brand kits
    SetBrandKits(Vec<BrandKit>),
    /// Flip a slogan's favorite membership
    ToggleFavorite {
        /// Slogan to (un)favorite
        slogan_id: SloganId,
    },
    /// Return to the initial state, keeping the tracking policy
    Reset,

    // ========== Generation commands ==========
    /// Generate a logo from a description
    GenerateLogo {
        /// Logo description
        prompt: String,
        /// Style (modern, minimal, ...)
        style: Option<String>,
    },
    /// Generate slogans from a brand description
    GenerateSlogan {
        /// Brand description
        prompt: String,
        /// Tone (professional, casual, ...)
        style: Option<String>,
    },
    /// Generate a palette for an industry
    GenerateColors {
        /// Industry
        industry: String,
        /// Extra preferences
        preferences: Option<Preferences>,
    },
    /// Suggest domains for a business name
    GenerateDomains {
        /// Business name
        business_name: String,
    },
    /// Generate business names for an industry
    GenerateBusinessNames {
        /// Industry
        industry: String,
        /// Optional keywords
        keywords: Vec<String>,
    },
    /// Refresh a generation's status from the server
    PollGeneration {
        /// Generation to refresh
        id: GenerationId,
    },

    // ========== Session & data commands ==========
    /// Sign in
    Login {
        /// Account email
        email: String,
        /// Account password
        password: String,
    },
    /// Create an account and sign in
    Register {
        /// Account email
        email: String,
        /// Account password
        password: String,
        /// Display name
        name: String,
    },
    /// Sign out; the session is cleared even if the server call fails
    Logout,
    /// Refresh the signed-in user
    LoadCurrentUser,
    /// Load the user's brands
    FetchBrands,
    /// Create a brand on the server
    CreateBrand(BrandDraft),
    /// Patch a brand on the server, then locally
    SaveBrand {
        /// Brand to patch
        id: BrandId,
        /// Fields to overwrite
        patch: BrandPatch,
    },
    /// Delete a brand on the server, then locally
    RemoveBrand {
        /// Brand to delete
        id: BrandId,
    },
    /// Load purchasable brand kits
    FetchBrandKits,
    /// Download a logo asset
    DownloadLogo {
        /// Logo to download
        id: LogoId,
        /// Requested format
        format: DownloadFormat,
    },

    // ========== Events fed back by effects ==========
    /// A generation request returned a payload
    GenerationCompleted {
        /// Request being settled
        request: RequestId,
        /// The new generation
        generation: Generation,
    },
    /// A generation request failed or returned no payload
    GenerationFailed {
        /// Request being settled
        request: RequestId,
        /// Kind that was requested
        kind: GenerationKind,
        /// Underlying failure
        error: ApiError,
    },
    /// Status polling returned
    GenerationPolled {
        /// Generation that was polled
        id: GenerationId,
        /// Fresh record or failure
        outcome: Result<Generation, ApiError>,
    },
    /// Login or registration succeeded
    SessionStarted(AuthSession),
    /// The session was closed
    LoggedOut,
    /// The current user was refreshed
    UserLoaded(User),
    /// Brands were loaded
    BrandsLoaded(Vec<Brand>),
    /// A brand was created
    BrandCreated(Brand),
    /// A brand patch was accepted by the server
    BrandSaved {
        /// Patched brand
        id: BrandId,
        /// Accepted patch
        patch: BrandPatch,
    },
    /// A brand was deleted on the server
    BrandRemoved {
        /// Deleted brand
        id: BrandId,
    },
    /// Brand kits were loaded
    BrandKitsLoaded(Vec<BrandKit>),
    /// A logo download finished
    LogoDownloaded(LogoDownload),
    /// A session or data command failed
    RequestFailed {
        /// Command that failed
        operation: Operation,
        /// Underlying failure
        error: ApiError,
    },
}

impl BrandingAction {
    /// Settle a generation request with the API outcome
    #[must_use]
    pub fn generation_settled(
        request: RequestId,
        kind: GenerationKind,
        outcome: Result<Generation, ApiError>,
    ) -> Self {
        match outcome {
            Ok(generation) => Self::GenerationCompleted {
                request,
                generation,
            },
            Err(error) => Self::GenerationFailed {
                request,
                kind,
                error,
            },
        }
    }

    /// Stable name for logs and metrics
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::SetUser(_) => "set_user",
            Self::SetAuthenticated(_) => "set_authenticated",
            Self::SetBrands(_) => "set_brands",
            Self::AddBrand(_) => "add_brand",
            Self::UpdateBrand { .. } => "update_brand",
            Self::DeleteBrand { .. } => "delete_brand",
            Self::SetCurrentBrand(_) => "set_current_brand",
            Self::AddGeneration(_) => "add_generation",
            Self::UpdateGeneration { .. } => "update_generation",
            Self::SetGenerating(_) => "set_generating",
            Self::SetLoading(_) => "set_loading",
            Self::SetError(_) => "set_error",
            Self::ClearError => "clear_error",
            Self::SetBrandKits(_) => "set_brand_kits",
            Self::ToggleFavorite { .. } => "toggle_favorite",
            Self::Reset => "reset",
            Self::GenerateLogo { .. } => "generate_logo",
            Self::GenerateSlogan { .. } => "generate_slogan",
            Self::GenerateColors { .. } => "generate_colors",
            Self::GenerateDomains { .. } => "generate_domains",
            Self::GenerateBusinessNames { .. } => "generate_business_names",
            Self::PollGeneration { .. } => "poll_generation",
            Self::Login { .. } => "login",
            Self::Register { .. } => "register",
            Self::Logout => "logout",
            Self::LoadCurrentUser => "load_current_user",
            Self::FetchBrands => "fetch_brands",
            Self::CreateBrand(_) => "create_brand",
            Self::SaveBrand { .. } => "save_brand",
            Self::RemoveBrand { .. } => "remove_brand",
            Self::FetchBrandKits => "fetch_brand_kits",
            Self::DownloadLogo { .. } => "download_logo",
            Self::GenerationCompleted { .. } => "generation_completed",
            Self::GenerationFailed { .. } => "generation_failed",
            Self::GenerationPolled { .. } => "generation_polled",
            Self::SessionStarted(_) => "session_started",
            Self::LoggedOut => "logged_out",
            Self::UserLoaded(_) => "user_loaded",
            Self::BrandsLoaded(_) => "brands_loaded",
            Self::BrandCreated(_) => "brand_created",
            Self::BrandSaved { .. } => "brand_saved",
            Self::BrandRemoved { .. } => "brand_removed",
            Self::BrandKitsLoaded(_) => "brand_kits_loaded",
            Self::LogoDownloaded(_) => "logo_downloaded",
            Self::RequestFailed { .. } => "request_failed",
        }
    }
}

/// Session and data commands that report through [`BrandingAction::RequestFailed`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    /// `Login`
    Login,
    /// `Register`
    Register,
    /// `LoadCurrentUser`
    LoadCurrentUser,
    /// `FetchBrands`
    FetchBrands,
    /// `CreateBrand`
    CreateBrand,
    /// `SaveBrand`
    SaveBrand,
    /// `RemoveBrand`
    RemoveBrand,
    /// `FetchBrandKits`
    FetchBrandKits,
    /// `DownloadLogo`
    DownloadLogo,
}

impl Operation {
    /// Message shown when the server supplied none
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Login => "Login failed. Please check your credentials.",
            Self::Register => "Registration failed. Please try again.",
            Self::LoadCurrentUser => "Failed to load your account",
            Self::FetchBrands => "Failed to load brands",
            Self::CreateBrand => "Failed to create brand",
            Self::SaveBrand => "Failed to save brand",
            Self::RemoveBrand => "Failed to delete brand",
            Self::FetchBrandKits => "Failed to load brand kits",
            Self::DownloadLogo => "Failed to download logo",
        }
    }

    /// User-facing message for `error`: the server's message when present
    #[must_use]
    pub fn describe(self, error: &ApiError) -> String {
        match (self, error.server_message()) {
            (Self::DownloadLogo, _) | (_, None) => self.failure_message().to_string(),
            (_, Some(message)) => message.to_string(),
        }
    }
}

/// Message shown when a required generation input is blank
#[must_use]
pub const fn validation_message(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Logo => "Please enter a description for your logo",
        GenerationKind::Slogan => "Please describe your brand or business",
        GenerationKind::Colors | GenerationKind::BusinessName => "Please select an industry",
        GenerationKind::Domain => "Please enter a business name",
    }
}

/// Message shown when a generation fails
#[must_use]
pub const fn generation_failure_message(kind: GenerationKind) -> &'static str {
    match kind {
        GenerationKind::Logo => "Failed to generate logo. Please try again.",
        GenerationKind::Slogan => "Failed to generate slogans. Please try again.",
        GenerationKind::Colors => "Failed to generate color palette. Please try again.",
        GenerationKind::Domain => "Failed to generate domain suggestions. Please try again.",
        GenerationKind::BusinessName => "Failed to generate business names. Please try again.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandkit_api::GENERIC_ERROR_MESSAGE;

    #[test]
    fn test_describe_prefers_server_message() {
        let error = ApiError::RequestFailed {
            status: 409,
            message: "Brand name already taken".to_string(),
        };
        assert_eq!(Operation::CreateBrand.describe(&error), "Brand name already taken");

        let generic = ApiError::RequestFailed {
            status: 500,
            message: GENERIC_ERROR_MESSAGE.to_string(),
        };
        assert_eq!(Operation::CreateBrand.describe(&generic), "Failed to create brand");

        let transport = ApiError::TransportFailed("connection refused".to_string());
        assert_eq!(Operation::FetchBrands.describe(&transport), "Failed to load brands");
    }

    #[test]
    fn test_download_failures_use_fixed_message() {
        let error = ApiError::RequestFailed {
            status: 403,
            message: "Upgrade required".to_string(),
        };
        assert_eq!(Operation::DownloadLogo.describe(&error), "Failed to download logo");
    }

    #[test]
    fn test_generation_settled() {
        let request = RequestId::new();
        let action = BrandingAction::generation_settled(
            request,
            GenerationKind::Colors,
            Err(ApiError::EmptyResponse { message: None }),
        );
        assert!(matches!(
            action,
            BrandingAction::GenerationFailed { kind: GenerationKind::Colors, .. }
        ));
        assert_eq!(action.name(), "generation_failed");
    }
}
