//! Generation store state and its derived views

use brandkit_api::{
    AuthToken, Brand, BrandId, BrandKit, BusinessName, ColorPalette, DomainSuggestion, DownloadFormat,
    Generation, GenerationId, GenerationKind, GenerationResult, LogoId, LogoResult, SloganId,
    SloganItem, User,
};
use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Identifier of one in-flight generation request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(Uuid);

impl RequestId {
    /// Fresh random request id
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// How in-flight generations are tracked
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackingPolicy {
    /// One flag for every request: whichever request settles first clears it
    Shared,
    /// One entry per request: generating while any request is pending
    #[default]
    PerRequest,
}

impl FromStr for TrackingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "shared" => Ok(Self::Shared),
            "per-request" | "per_request" | "perrequest" => Ok(Self::PerRequest),
            other => Err(format!("unknown tracking policy: {other}")),
        }
    }
}

impl fmt::Display for TrackingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Shared => f.write_str("shared"),
            Self::PerRequest => f.write_str("per-request"),
        }
    }
}

/// In-flight generation bookkeeping
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GenerationTracker {
    policy: TrackingPolicy,
    in_flight: BTreeMap<RequestId, GenerationKind>,
    shared: bool,
    manual: bool,
}

impl GenerationTracker {
    /// Empty tracker using `policy`
    #[must_use]
    pub const fn new(policy: TrackingPolicy) -> Self {
        Self {
            policy,
            in_flight: BTreeMap::new(),
            shared: false,
            manual: false,
        }
    }

    /// Configured policy
    #[must_use]
    pub const fn policy(&self) -> TrackingPolicy {
        self.policy
    }

    /// Mark a request as in flight
    pub fn begin(&mut self, request: RequestId, kind: GenerationKind) {
        self.in_flight.insert(request, kind);
        self.shared = true;
    }

    /// Settle a request, returning whether it was being tracked
    ///
    /// Under [`TrackingPolicy::Shared`] this clears the flag for every
    /// outstanding request.
    pub fn settle(&mut self, request: RequestId) -> bool {
        let tracked = self.in_flight.remove(&request).is_some();
        if self.policy == TrackingPolicy::Shared || self.in_flight.is_empty() {
            self.shared = false;
        }
        tracked
    }

    /// Drive the manual flag (`SetGenerating`)
    pub fn set_manual(&mut self, generating: bool) {
        self.manual = generating;
    }

    /// Number of requests that have not settled
    #[must_use]
    pub fn pending(&self) -> usize {
        self.in_flight.len()
    }

    /// Requests that have not settled, with their kinds
    pub fn in_flight(&self) -> impl Iterator<Item = (RequestId, GenerationKind)> + '_ {
        self.in_flight.iter().map(|(request, kind)| (*request, *kind))
    }

    /// True while a generation is considered in flight
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.manual
            || match self.policy {
                TrackingPolicy::Shared => self.shared,
                TrackingPolicy::PerRequest => !self.in_flight.is_empty(),
            }
    }

    /// True while a generation of `kind` is considered in flight
    #[must_use]
    pub fn is_generating_kind(&self, kind: GenerationKind) -> bool {
        let pending = self.in_flight.values().any(|k| *k == kind);
        self.manual
            || match self.policy {
                TrackingPolicy::Shared => self.shared && pending,
                TrackingPolicy::PerRequest => pending,
            }
    }
}

/// Insertion-ordered set of favorited slogan ids
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Favorites(Vec<SloganId>);

impl Favorites {
    /// Flip membership, returning whether the id is now a favorite
    pub fn toggle(&mut self, id: SloganId) -> bool {
        if let Some(pos) = self.0.iter().position(|f| *f == id) {
            self.0.remove(pos);
            false
        } else {
            self.0.push(id);
            true
        }
    }

    /// Membership test
    #[must_use]
    pub fn contains(&self, id: &SloganId) -> bool {
        self.0.contains(id)
    }

    /// Favorites in the order they were added
    pub fn iter(&self) -> impl Iterator<Item = &SloganId> {
        self.0.iter()
    }

    /// Number of favorites
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing is favorited
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A downloaded logo asset, kept until the UI saves it
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogoDownload {
    /// Logo that was downloaded
    pub logo_id: LogoId,
    /// Requested format
    pub format: DownloadFormat,
    /// Raw asset bytes
    pub bytes: Bytes,
}

/// Everything the UI renders
///
/// `user`, `is_authenticated`, `brands`, `current_brand` and `brand_kits`
/// survive a reload (see [`crate::persistence`]); the token is persisted under
/// its own key. The rest is session-only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrandingState {
    /// Signed-in user
    pub user: Option<User>,
    /// Whether a session is established
    pub is_authenticated: bool,
    /// Bearer credential for API calls
    pub auth_token: Option<AuthToken>,
    /// Brands owned by the user
    pub brands: Vec<Brand>,
    /// Brand being edited
    pub current_brand: Option<Brand>,
    /// Generation history, most recent first
    pub generations: Vec<Generation>,
    /// In-flight generation requests
    pub tracker: GenerationTracker,
    /// Whether a session or data request is running
    pub is_loading: bool,
    /// Last user-facing error
    pub error: Option<String>,
    /// Purchasable brand kits
    pub brand_kits: Vec<BrandKit>,
    /// Favorited slogans
    pub favorites: Favorites,
    /// Most recent logo download
    pub last_download: Option<LogoDownload>,
}

impl BrandingState {
    /// Empty state tracking generations with `policy`
    #[must_use]
    pub fn with_policy(policy: TrackingPolicy) -> Self {
        Self {
            tracker: GenerationTracker::new(policy),
            ..Self::default()
        }
    }

    /// Initial state for a fresh session, keeping the tracking policy
    #[must_use]
    pub fn reset(&self) -> Self {
        Self::with_policy(self.tracker.policy())
    }

    /// True while a generation is in flight
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.tracker.is_generating()
    }

    /// True while a generation of `kind` is in flight
    #[must_use]
    pub fn is_generating_kind(&self, kind: GenerationKind) -> bool {
        self.tracker.is_generating_kind(kind)
    }

    /// Insert at the front, replacing any record with the same id
    pub fn insert_generation(&mut self, generation: Generation) {
        self.generations.retain(|g| g.id != generation.id);
        self.generations.insert(0, generation);
    }

    /// Look up a generation by id
    #[must_use]
    pub fn generation(&self, id: &GenerationId) -> Option<&Generation> {
        self.generations.iter().find(|g| g.id == *id)
    }

    /// Look up a brand by id
    #[must_use]
    pub fn brand(&self, id: &BrandId) -> Option<&Brand> {
        self.brands.iter().find(|b| b.id == *id)
    }

    /// Generations of one kind, most recent first
    pub fn generations_of(&self, kind: GenerationKind) -> impl Iterator<Item = &Generation> {
        self.generations.iter().filter(move |g| g.kind == kind)
    }

    fn results(&self) -> impl Iterator<Item = &GenerationResult> {
        self.generations.iter().filter_map(|g| g.result.as_ref())
    }

    /// Generated logos, most recent first
    pub fn logos(&self) -> impl Iterator<Item = &LogoResult> {
        self.results().filter_map(|r| match r {
            GenerationResult::Logo(logo) => Some(logo),
            _ => None,
        })
    }

    /// Generated slogans, flattened, most recent generation first
    pub fn slogan_items(&self) -> impl Iterator<Item = &SloganItem> {
        self.results().flat_map(GenerationResult::slogans)
    }

    /// Generated palettes, most recent first
    pub fn palettes(&self) -> impl Iterator<Item = &ColorPalette> {
        self.results().filter_map(|r| match r {
            GenerationResult::Colors(palette) => Some(palette),
            _ => None,
        })
    }

    /// Suggested domains, flattened
    pub fn domain_suggestions(&self) -> impl Iterator<Item = &DomainSuggestion> {
        self.results().flat_map(|r| -> &[DomainSuggestion] {
            match r {
                GenerationResult::Domain(result) => &result.domains,
                _ => &[],
            }
        })
    }

    /// Suggested business names, flattened
    pub fn business_names(&self) -> impl Iterator<Item = &BusinessName> {
        self.results().flat_map(|r| -> &[BusinessName] {
            match r {
                GenerationResult::BusinessName(result) => &result.names,
                _ => &[],
            }
        })
    }

    /// Favorited slogans in favorite order
    ///
    /// Ids whose slogan is no longer in `generations` are skipped.
    #[must_use]
    pub fn favorite_slogans(&self) -> Vec<&SloganItem> {
        self.favorites
            .iter()
            .filter_map(|id| self.slogan_items().find(|item| item.id == *id))
            .collect()
    }
}
