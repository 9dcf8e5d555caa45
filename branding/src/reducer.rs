//! Reducer and environment of the generation store

use crate::actions::{BrandingAction, Operation, generation_failure_message, validation_message};
use crate::api::BrandingApi;
use crate::state::{BrandingState, LogoDownload, RequestId};
use brandkit_api::{
    ApiError, BrandId, BrandPatch, BusinessNameResult, DomainResult, Generation,
    GenerationKind, GenerationPatch, GenerationResult, GenerationStatus,
};
use brandkit_core::environment::Clock;
use brandkit_core::{Effect, Reducer, SmallVec, smallvec};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

/// Delay between status polls of a pending generation
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Effects returned by [`BrandingReducer`]
pub type Effects = SmallVec<[Effect<BrandingAction>; 4]>;

/// Injected dependencies of the generation store
#[derive(Clone)]
pub struct BrandingEnvironment {
    /// Generation API
    pub api: Arc<dyn BrandingApi>,
    /// Time source for stamping generations
    pub clock: Arc<dyn Clock>,
    /// Delay before re-polling a generation that is still pending
    pub poll_interval: Duration,
}

impl BrandingEnvironment {
    /// Environment over `api` and `clock`
    #[must_use]
    pub fn new(api: Arc<dyn BrandingApi>, clock: Arc<dyn Clock>) -> Self {
        Self {
            api,
            clock,
            poll_interval: DEFAULT_POLL_INTERVAL,
        }
    }

    /// Override the re-poll delay
    #[must_use]
    pub const fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }
}

impl std::fmt::Debug for BrandingEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrandingEnvironment")
            .field("poll_interval", &self.poll_interval)
            .finish_non_exhaustive()
    }
}

/// Domain reducer of the generation store
#[derive(Clone, Copy, Debug, Default)]
pub struct BrandingReducer;

impl BrandingReducer {
    /// Create the reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for BrandingReducer {
    type State = BrandingState;
    type Action = BrandingAction;
    type Environment = BrandingEnvironment;

    #[allow(clippy::too_many_lines)] // One arm per action
    fn reduce(
        &self,
        state: &mut BrandingState,
        action: BrandingAction,
        env: &BrandingEnvironment,
    ) -> Effects {
        tracing::trace!(action = action.name(), "Reducing action");
        metrics::counter!("branding.actions.total", "action" => action.name()).increment(1);

        match action {
            // ========== Setters ==========
            BrandingAction::SetUser(user) => {
                state.user = user;
                SmallVec::new()
            },
            BrandingAction::SetAuthenticated(authenticated) => {
                state.is_authenticated = authenticated;
                SmallVec::new()
            },
            BrandingAction::SetBrands(brands) => {
                state.brands = brands;
                SmallVec::new()
            },
            BrandingAction::AddBrand(brand) => {
                state.brands.push(brand);
                SmallVec::new()
            },
            BrandingAction::UpdateBrand { id, patch } => {
                update_brand(state, &id, &patch);
                SmallVec::new()
            },
            BrandingAction::DeleteBrand { id } => {
                delete_brand(state, &id);
                SmallVec::new()
            },
            BrandingAction::SetCurrentBrand(brand) => {
                state.current_brand = brand;
                SmallVec::new()
            },
            BrandingAction::AddGeneration(generation) => {
                add_generation(state, generation, env);
                SmallVec::new()
            },
            BrandingAction::UpdateGeneration { id, patch } => {
                match state.generations.iter_mut().find(|g| g.id == id) {
                    Some(generation) => generation.apply(&patch),
                    None => tracing::debug!(generation = %id, "Ignoring update of unknown generation"),
                }
                SmallVec::new()
            },
            BrandingAction::SetGenerating(generating) => {
                state.tracker.set_manual(generating);
                SmallVec::new()
            },
            BrandingAction::SetLoading(loading) => {
                state.is_loading = loading;
                SmallVec::new()
            },
            BrandingAction::SetError(error) => {
                state.error = error;
                SmallVec::new()
            },
            BrandingAction::ClearError => {
                state.error = None;
                SmallVec::new()
            },
            BrandingAction::SetBrandKits(kits) => {
                state.brand_kits = kits;
                SmallVec::new()
            },
            BrandingAction::ToggleFavorite { slogan_id } => {
                state.favorites.toggle(slogan_id);
                SmallVec::new()
            },
            BrandingAction::Reset | BrandingAction::LoggedOut => {
                *state = state.reset();
                SmallVec::new()
            },

            // ========== Generation commands ==========
            BrandingAction::GenerateLogo { prompt, style } => {
                let Some(request) = begin_generation(state, GenerationKind::Logo, &prompt) else {
                    return SmallVec::new();
                };
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![generation_effect(request, GenerationKind::Logo, async move {
                    api.generate_logo(token.as_ref(), &prompt, style.as_deref())
                        .await?
                        .into_data()
                })]
            },
            BrandingAction::GenerateSlogan { prompt, style } => {
                let Some(request) = begin_generation(state, GenerationKind::Slogan, &prompt) else {
                    return SmallVec::new();
                };
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![generation_effect(request, GenerationKind::Slogan, async move {
                    api.generate_slogan(token.as_ref(), &prompt, style.as_deref())
                        .await?
                        .into_data()
                })]
            },
            BrandingAction::GenerateColors {
                industry,
                preferences,
            } => {
                let Some(request) = begin_generation(state, GenerationKind::Colors, &industry) else {
                    return SmallVec::new();
                };
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![generation_effect(request, GenerationKind::Colors, async move {
                    api.generate_colors(token.as_ref(), &industry, preferences)
                        .await?
                        .into_data()
                })]
            },
            BrandingAction::GenerateDomains { business_name } => {
                let Some(request) = begin_generation(state, GenerationKind::Domain, &business_name)
                else {
                    return SmallVec::new();
                };
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![generation_effect(request, GenerationKind::Domain, async move {
                    let domains = api
                        .suggest_domains(token.as_ref(), &business_name)
                        .await?
                        .into_data()?;
                    Ok::<_, ApiError>(Generation::completed(
                        format!("domain-{request}"),
                        GenerationResult::Domain(DomainResult { domains }),
                    ))
                })]
            },
            BrandingAction::GenerateBusinessNames { industry, keywords } => {
                let Some(request) =
                    begin_generation(state, GenerationKind::BusinessName, &industry)
                else {
                    return SmallVec::new();
                };
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![generation_effect(request, GenerationKind::BusinessName, async move {
                    let names = api
                        .generate_business_names(token.as_ref(), &industry, &keywords)
                        .await?
                        .into_data()?;
                    Ok::<_, ApiError>(Generation::completed(
                        format!("business-name-{request}"),
                        GenerationResult::BusinessName(BusinessNameResult { names }),
                    ))
                })]
            },
            BrandingAction::PollGeneration { id } => {
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![Effect::future(async move {
                    let outcome = match api.generation_status(token.as_ref(), &id).await {
                        Ok(response) => response.into_data(),
                        Err(error) => Err(error),
                    };
                    Some(BrandingAction::GenerationPolled { id, outcome })
                })]
            },

            // ========== Generation events ==========
            BrandingAction::GenerationCompleted {
                request,
                generation,
            } => {
                if !settle(state, request) {
                    return SmallVec::new();
                }
                if let Some(GenerationResult::Colors(palette)) = &generation.result {
                    if let Err(error) = palette.validate() {
                        tracing::error!(generation = %generation.id, %error, "Rejecting malformed palette");
                        metrics::counter!("branding.generations.failed", "kind" => "colors").increment(1);
                        state.error =
                            Some(generation_failure_message(GenerationKind::Colors).to_string());
                        return SmallVec::new();
                    }
                }
                add_generation(state, generation, env);
                SmallVec::new()
            },
            BrandingAction::GenerationFailed {
                request,
                kind,
                error,
            } => {
                if !settle(state, request) {
                    return SmallVec::new();
                }
                tracing::error!(%kind, %error, "Generation failed");
                metrics::counter!("branding.generations.failed", "kind" => kind.as_str()).increment(1);
                state.error = Some(generation_failure_message(kind).to_string());
                SmallVec::new()
            },
            BrandingAction::GenerationPolled { id, outcome } => {
                let generation = match outcome {
                    Ok(generation) => generation,
                    Err(error) => {
                        tracing::warn!(generation = %id, %error, "Generation status poll failed");
                        return SmallVec::new();
                    },
                };
                let Some(existing) = state.generations.iter_mut().find(|g| g.id == id) else {
                    tracing::debug!(generation = %id, "Dropping poll of a generation no longer in history");
                    return SmallVec::new();
                };
                existing.apply(&GenerationPatch::from(generation));
                if existing.status != GenerationStatus::Pending {
                    return SmallVec::new();
                }
                tracing::debug!(generation = %id, "Generation still pending, polling again");
                smallvec![Effect::delay(
                    env.poll_interval,
                    BrandingAction::PollGeneration { id },
                )]
            },

            // ========== Session & data commands ==========
            BrandingAction::Login { email, password } => {
                if email.trim().is_empty() || password.is_empty() {
                    state.error = Some("Please enter your email and password".to_string());
                    return SmallVec::new();
                }
                begin_request(state);
                let api = Arc::clone(&env.api);
                smallvec![request_effect(
                    Operation::Login,
                    async move { api.login(&email, &password).await?.into_data() },
                    BrandingAction::SessionStarted,
                )]
            },
            BrandingAction::Register {
                email,
                password,
                name,
            } => {
                if email.trim().is_empty() || password.is_empty() || name.trim().is_empty() {
                    state.error = Some("Please fill in all fields".to_string());
                    return SmallVec::new();
                }
                begin_request(state);
                let api = Arc::clone(&env.api);
                smallvec![request_effect(
                    Operation::Register,
                    async move { api.register(&email, &password, &name).await?.into_data() },
                    BrandingAction::SessionStarted,
                )]
            },
            BrandingAction::Logout => {
                state.is_loading = true;
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![Effect::future(async move {
                    let outcome = match api.logout(token.as_ref()).await {
                        Ok(response) => response.ensure_success(),
                        Err(error) => Err(error),
                    };
                    if let Err(error) = outcome {
                        tracing::warn!(%error, "Remote logout failed, clearing session anyway");
                    }
                    Some(BrandingAction::LoggedOut)
                })]
            },
            BrandingAction::LoadCurrentUser => {
                begin_request(state);
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![request_effect(
                    Operation::LoadCurrentUser,
                    async move { api.current_user(token.as_ref()).await?.into_data() },
                    BrandingAction::UserLoaded,
                )]
            },
            BrandingAction::FetchBrands => {
                begin_request(state);
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![request_effect(
                    Operation::FetchBrands,
                    async move { api.brands(token.as_ref()).await?.into_data() },
                    BrandingAction::BrandsLoaded,
                )]
            },
            BrandingAction::CreateBrand(draft) => {
                if draft.name.trim().is_empty() {
                    state.error = Some("Please enter a brand name".to_string());
                    return SmallVec::new();
                }
                begin_request(state);
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![request_effect(
                    Operation::CreateBrand,
                    async move { api.create_brand(token.as_ref(), &draft).await?.into_data() },
                    BrandingAction::BrandCreated,
                )]
            },
            BrandingAction::SaveBrand { id, patch } => {
                if patch.is_empty() {
                    return SmallVec::new();
                }
                begin_request(state);
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                let remote = (id.clone(), patch.clone());
                smallvec![request_effect(
                    Operation::SaveBrand,
                    async move {
                        api.update_brand(token.as_ref(), &remote.0, &remote.1)
                            .await?
                            .ensure_success()
                    },
                    move |()| BrandingAction::BrandSaved { id, patch },
                )]
            },
            BrandingAction::RemoveBrand { id } => {
                begin_request(state);
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                let remote = id.clone();
                smallvec![request_effect(
                    Operation::RemoveBrand,
                    async move { api.delete_brand(token.as_ref(), &remote).await?.ensure_success() },
                    move |()| BrandingAction::BrandRemoved { id },
                )]
            },
            BrandingAction::FetchBrandKits => {
                begin_request(state);
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                smallvec![request_effect(
                    Operation::FetchBrandKits,
                    async move { api.brand_kits(token.as_ref()).await?.into_data() },
                    BrandingAction::BrandKitsLoaded,
                )]
            },
            BrandingAction::DownloadLogo { id, format } => {
                begin_request(state);
                let (api, token) = (Arc::clone(&env.api), state.auth_token.clone());
                let remote = id.clone();
                smallvec![request_effect(
                    Operation::DownloadLogo,
                    async move { api.download_logo(token.as_ref(), &remote, format).await },
                    move |bytes| {
                        BrandingAction::LogoDownloaded(LogoDownload {
                            logo_id: id,
                            format,
                            bytes,
                        })
                    },
                )]
            },

            // ========== Session & data events ==========
            BrandingAction::SessionStarted(session) => {
                state.is_loading = false;
                state.user = Some(session.user);
                state.auth_token = Some(session.token);
                state.is_authenticated = true;
                SmallVec::new()
            },
            BrandingAction::UserLoaded(user) => {
                state.is_loading = false;
                state.user = Some(user);
                state.is_authenticated = true;
                SmallVec::new()
            },
            BrandingAction::BrandsLoaded(brands) => {
                state.is_loading = false;
                state.current_brand = state
                    .current_brand
                    .take()
                    .and_then(|current| brands.iter().find(|b| b.id == current.id).cloned());
                state.brands = brands;
                SmallVec::new()
            },
            BrandingAction::BrandCreated(brand) => {
                state.is_loading = false;
                state.current_brand = Some(brand.clone());
                state.brands.push(brand);
                SmallVec::new()
            },
            BrandingAction::BrandSaved { id, patch } => {
                state.is_loading = false;
                update_brand(state, &id, &patch);
                SmallVec::new()
            },
            BrandingAction::BrandRemoved { id } => {
                state.is_loading = false;
                delete_brand(state, &id);
                SmallVec::new()
            },
            BrandingAction::BrandKitsLoaded(kits) => {
                state.is_loading = false;
                state.brand_kits = kits;
                SmallVec::new()
            },
            BrandingAction::LogoDownloaded(download) => {
                state.is_loading = false;
                state.last_download = Some(download);
                SmallVec::new()
            },
            BrandingAction::RequestFailed { operation, error } => {
                state.is_loading = false;
                tracing::error!(?operation, %error, "Request failed");
                state.error = Some(operation.describe(&error));
                SmallVec::new()
            },
        }
    }
}

fn update_brand(state: &mut BrandingState, id: &BrandId, patch: &BrandPatch) {
    if let Some(brand) = state.brands.iter_mut().find(|b| b.id == *id) {
        brand.apply(patch);
    }
    if let Some(current) = state.current_brand.as_mut().filter(|b| b.id == *id) {
        current.apply(patch);
    }
}

fn delete_brand(state: &mut BrandingState, id: &BrandId) {
    state.brands.retain(|b| b.id != *id);
    if state.current_brand.as_ref().is_some_and(|b| b.id == *id) {
        state.current_brand = None;
    }
}

fn add_generation(state: &mut BrandingState, mut generation: Generation, env: &BrandingEnvironment) {
    if generation.created_at.is_none() {
        generation.created_at = Some(env.clock.now());
    }
    metrics::counter!("branding.generations.completed", "kind" => generation.kind.as_str())
        .increment(1);
    state.insert_generation(generation);
}

/// Validate the required input and start tracking, or record the validation error
fn begin_generation(state: &mut BrandingState, kind: GenerationKind, input: &str) -> Option<RequestId> {
    if input.trim().is_empty() {
        state.error = Some(validation_message(kind).to_string());
        return None;
    }

    let request = RequestId::new();
    state.tracker.begin(request, kind);
    state.error = None;
    tracing::debug!(%kind, %request, "Generation started");
    Some(request)
}

/// Settle `request`; results of untracked requests (a previous session's) are dropped
fn settle(state: &mut BrandingState, request: RequestId) -> bool {
    let tracked = state.tracker.settle(request);
    if !tracked {
        tracing::debug!(%request, "Dropping result of an untracked request");
    }
    tracked
}

fn begin_request(state: &mut BrandingState) {
    state.is_loading = true;
    state.error = None;
}

fn generation_effect<F>(request: RequestId, kind: GenerationKind, call: F) -> Effect<BrandingAction>
where
    F: Future<Output = Result<Generation, ApiError>> + Send + 'static,
{
    Effect::future(async move { Some(BrandingAction::generation_settled(request, kind, call.await)) })
}

fn request_effect<T, F, S>(operation: Operation, call: F, on_success: S) -> Effect<BrandingAction>
where
    F: Future<Output = Result<T, ApiError>> + Send + 'static,
    S: FnOnce(T) -> BrandingAction + Send + 'static,
{
    Effect::future(async move {
        Some(match call.await {
            Ok(value) => on_success(value),
            Err(error) => BrandingAction::RequestFailed { operation, error },
        })
    })
}
