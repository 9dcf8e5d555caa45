//! Domain types exchanged with the generation API
//!
//! Field names follow the server's camelCase JSON. Identifiers are opaque,
//! server-assigned strings wrapped in newtypes so they cannot be mixed up.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wraps a server-assigned identifier
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the raw identifier
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }
    };
}

string_id!(
    /// Identifier of a [`User`]
    UserId
);
string_id!(
    /// Identifier of a [`Brand`]
    BrandId
);
string_id!(
    /// Identifier of a [`Generation`]
    GenerationId
);
string_id!(
    /// Identifier of a [`Logo`] or one of its variations
    LogoId
);
string_id!(
    /// Identifier of a slogan, inside a brand or a slogan generation
    SloganId
);
string_id!(
    /// Identifier of a [`DomainSuggestion`]
    DomainSuggestionId
);
string_id!(
    /// Identifier of a [`BusinessName`]
    BusinessNameId
);
string_id!(
    /// Identifier of a [`BrandKit`]
    BrandKitId
);

/// Bearer credential returned by login/register
///
/// The `Debug` output is redacted so tokens never end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Wrap a raw token
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Raw token value
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

// ========== Users ==========

/// An authenticated user
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier
    pub id: UserId,
    /// Login email
    pub email: String,
    /// Display name
    pub name: String,
    /// Avatar URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    /// Paid plan, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subscription: Option<Subscription>,
    /// Account creation time
    pub created_at: DateTime<Utc>,
    /// Last profile update
    pub updated_at: DateTime<Utc>,
}

/// Subscription plan tier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    /// Free tier
    Free,
    /// Pro tier
    Pro,
    /// Enterprise tier
    Enterprise,
}

/// Billing state of a subscription
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    /// Paid and current
    Active,
    /// Cancelled, runs until period end
    Canceled,
    /// Payment overdue
    PastDue,
}

/// A user's subscription descriptor
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    /// Subscription identifier
    pub id: String,
    /// Plan tier
    pub plan: Plan,
    /// Billing status
    pub status: SubscriptionStatus,
    /// End of the current billing period
    pub current_period_end: DateTime<Utc>,
    /// Feature flags unlocked by the plan
    #[serde(default)]
    pub features: Vec<String>,
}

// ========== Brands ==========

/// Errors raised when validating a [`ColorPalette`]
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PaletteError {
    /// A slot does not hold a `#rgb` or `#rrggbb` color
    #[error("palette slot `{slot}` is not a hex color: {value:?}")]
    InvalidColor {
        /// Slot name
        slot: &'static str,
        /// Offending value
        value: String,
    },
}

/// Five-slot brand palette
///
/// All five slots are required: a payload missing any of them fails to
/// deserialize and the palette is treated as incomplete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPalette {
    /// Main brand color
    pub primary: String,
    /// Supporting color
    pub secondary: String,
    /// Highlight color
    pub accent: String,
    /// Text / border color
    pub neutral: String,
    /// Page background
    pub background: String,
}

impl ColorPalette {
    /// Slot names in display order
    pub const SLOTS: [&'static str; 5] = ["primary", "secondary", "accent", "neutral", "background"];

    /// Slots paired with their colors, in display order
    #[must_use]
    pub fn slots(&self) -> [(&'static str, &str); 5] {
        [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("neutral", &self.neutral),
            ("background", &self.background),
        ]
    }

    /// Check that every slot holds a hex color
    ///
    /// # Errors
    ///
    /// Returns [`PaletteError::InvalidColor`] for the first slot that fails.
    pub fn validate(&self) -> Result<(), PaletteError> {
        for (slot, value) in self.slots() {
            if !is_hex_color(value) {
                return Err(PaletteError::InvalidColor {
                    slot,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

fn is_hex_color(value: &str) -> bool {
    value
        .strip_prefix('#')
        .is_some_and(|hex| matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Raster or vector format of a logo asset
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Scalable vector graphics
    Svg,
    /// Portable network graphics
    Png,
    /// JPEG
    Jpg,
}

/// A logo attached to a brand
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Logo {
    /// Logo identifier
    pub id: LogoId,
    /// Asset URL
    pub url: String,
    /// Asset format
    pub format: ImageFormat,
    /// Style the logo was generated with
    #[serde(default)]
    pub style: String,
    /// Alternative renderings
    #[serde(default)]
    pub variations: Vec<LogoVariation>,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

/// Alternative rendering of a logo
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoVariation {
    /// Variation identifier
    pub id: LogoId,
    /// Asset URL
    pub url: String,
    /// Style of this variation
    #[serde(default)]
    pub style: String,
    /// Asset format
    pub format: ImageFormat,
}

/// A slogan saved on a brand
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slogan {
    /// Slogan identifier
    pub id: SloganId,
    /// Slogan text
    pub text: String,
    /// Tone (professional, casual, creative, luxury, ...)
    #[serde(default)]
    pub style: String,
    /// Language code
    #[serde(default)]
    pub language: String,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// A candidate domain for a brand
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainSuggestion {
    /// Suggestion identifier
    pub id: DomainSuggestionId,
    /// Fully-qualified domain
    pub domain: String,
    /// Whether the domain can be registered
    pub available: bool,
    /// Registration price, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    /// Suggested registrar
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registrar: Option<String>,
}

/// A generated business name
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessName {
    /// Name identifier
    pub id: BusinessNameId,
    /// The name itself
    pub name: String,
    /// Whether the name looks available
    pub available: bool,
    /// Matching domain, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    /// Whether a trademark conflict was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trademark: Option<bool>,
    /// Creation time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The aggregate a user is building
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    /// Brand identifier
    pub id: BrandId,
    /// Brand name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Industry the brand operates in
    #[serde(default)]
    pub industry: String,
    /// Intended audience
    #[serde(default)]
    pub target_audience: String,
    /// Brand palette
    pub colors: ColorPalette,
    /// Chosen logo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    /// Saved slogans, in order
    #[serde(default)]
    pub slogans: Vec<Slogan>,
    /// Saved domain suggestions
    #[serde(default)]
    pub domain_suggestions: Vec<DomainSuggestion>,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Last update time
    pub updated_at: DateTime<Utc>,
}

impl Brand {
    /// Merge a partial update into this brand
    ///
    /// Only fields present in the patch are overwritten.
    pub fn apply(&mut self, patch: &BrandPatch) {
        if let Some(name) = &patch.name {
            self.name.clone_from(name);
        }
        if let Some(description) = &patch.description {
            self.description.clone_from(description);
        }
        if let Some(industry) = &patch.industry {
            self.industry.clone_from(industry);
        }
        if let Some(target_audience) = &patch.target_audience {
            self.target_audience.clone_from(target_audience);
        }
        if let Some(colors) = &patch.colors {
            self.colors = colors.clone();
        }
        if let Some(logo) = &patch.logo {
            self.logo = Some(logo.clone());
        }
        if let Some(slogans) = &patch.slogans {
            self.slogans.clone_from(slogans);
        }
        if let Some(domain_suggestions) = &patch.domain_suggestions {
            self.domain_suggestions.clone_from(domain_suggestions);
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = updated_at;
        }
    }
}

/// Partial update of a [`Brand`]; absent fields are left untouched
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandPatch {
    /// New name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New industry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// New target audience
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
    /// New palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPalette>,
    /// New logo
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<Logo>,
    /// Replacement slogan list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slogans: Option<Vec<Slogan>>,
    /// Replacement domain list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_suggestions: Option<Vec<DomainSuggestion>>,
    /// Update time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl BrandPatch {
    /// True when the patch would change nothing
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Fields supplied when creating a brand; the server assigns the id
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandDraft {
    /// Brand name
    pub name: String,
    /// Free-form description
    #[serde(default)]
    pub description: String,
    /// Industry
    #[serde(default)]
    pub industry: String,
    /// Intended audience
    #[serde(default)]
    pub target_audience: String,
    /// Initial palette
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colors: Option<ColorPalette>,
}

/// A purchasable bundle of brand assets
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandKit {
    /// Kit identifier
    pub id: BrandKitId,
    /// Brand the kit was built from
    pub brand_id: BrandId,
    /// Kit name
    pub name: String,
    /// Kit description
    #[serde(default)]
    pub description: String,
    /// Price in the account currency
    pub price: f64,
    /// Included assets
    #[serde(default)]
    pub includes: Vec<String>,
    /// Number of downloads so far
    #[serde(default)]
    pub downloads: u64,
    /// Creation time
    pub created_at: DateTime<Utc>,
}

// ========== Generations ==========

/// Content kind of a generation request
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationKind {
    /// Logo artwork
    Logo,
    /// Slogans / taglines
    Slogan,
    /// Five-color palette
    Colors,
    /// Domain suggestions
    Domain,
    /// Business names
    BusinessName,
}

impl GenerationKind {
    /// Every kind, in display order
    pub const ALL: [Self; 5] = [
        Self::Logo,
        Self::Slogan,
        Self::Colors,
        Self::Domain,
        Self::BusinessName,
    ];

    /// Wire name of the kind
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Slogan => "slogan",
            Self::Colors => "colors",
            Self::Domain => "domain",
            Self::BusinessName => "business-name",
        }
    }
}

impl std::fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle state of a generation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenerationStatus {
    /// Accepted, result not ready
    Pending,
    /// Result available
    Completed,
    /// Generation failed server-side
    Failed,
}

/// Result of a logo generation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogoResult {
    /// Asset URL
    pub url: String,
    /// Asset format, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<ImageFormat>,
    /// Alternative renderings
    #[serde(default)]
    pub variations: Vec<LogoVariation>,
}

/// One slogan inside a slogan generation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SloganItem {
    /// Slogan identifier (used by favorites)
    pub id: SloganId,
    /// Slogan text
    pub text: String,
    /// Tone
    #[serde(default)]
    pub style: String,
    /// Language code
    #[serde(default)]
    pub language: String,
}

/// Result of a slogan generation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SloganResult {
    /// Generated slogans
    pub slogans: Vec<SloganItem>,
}

/// Result of a domain generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainResult {
    /// Suggested domains
    pub domains: Vec<DomainSuggestion>,
}

/// Result of a business-name generation
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BusinessNameResult {
    /// Suggested names
    pub names: Vec<BusinessName>,
}

/// Kind-specific generation payload
///
/// Serialized untagged: the wire carries the kind next to the result, in the
/// generation's `type` field.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationResult {
    /// Logo artwork
    Logo(LogoResult),
    /// Slogans
    Slogan(SloganResult),
    /// Palette
    Colors(ColorPalette),
    /// Domain suggestions
    Domain(DomainResult),
    /// Business names
    BusinessName(BusinessNameResult),
}

impl GenerationResult {
    /// Kind this payload belongs to
    #[must_use]
    pub const fn kind(&self) -> GenerationKind {
        match self {
            Self::Logo(_) => GenerationKind::Logo,
            Self::Slogan(_) => GenerationKind::Slogan,
            Self::Colors(_) => GenerationKind::Colors,
            Self::Domain(_) => GenerationKind::Domain,
            Self::BusinessName(_) => GenerationKind::BusinessName,
        }
    }

    /// Decode a raw payload as the given kind
    ///
    /// # Errors
    ///
    /// Returns a description of the mismatch when the payload does not have
    /// the shape of `kind` (e.g. a palette missing a slot).
    pub fn decode(kind: GenerationKind, value: serde_json::Value) -> Result<Self, String> {
        let decoded = match kind {
            GenerationKind::Logo => serde_json::from_value(value).map(Self::Logo),
            GenerationKind::Slogan => serde_json::from_value(value).map(Self::Slogan),
            GenerationKind::Colors => serde_json::from_value(value).map(Self::Colors),
            GenerationKind::Domain => serde_json::from_value(value).map(Self::Domain),
            GenerationKind::BusinessName => serde_json::from_value(value).map(Self::BusinessName),
        };
        decoded.map_err(|e| format!("invalid {kind} result: {e}"))
    }

    /// Decode a payload whose kind was not reported, from its shape
    ///
    /// # Errors
    ///
    /// Returns an error when no kind's distinguishing field is present.
    pub fn infer(value: serde_json::Value) -> Result<Self, String> {
        let kind = [
            ("url", GenerationKind::Logo),
            ("slogans", GenerationKind::Slogan),
            ("primary", GenerationKind::Colors),
            ("domains", GenerationKind::Domain),
            ("names", GenerationKind::BusinessName),
        ]
        .into_iter()
        .find_map(|(field, kind)| value.get(field).map(|_| kind))
        .ok_or_else(|| "unrecognized generation result".to_string())?;

        Self::decode(kind, value)
    }

    /// Slogans carried by this payload (empty for other kinds)
    #[must_use]
    pub fn slogans(&self) -> &[SloganItem] {
        match self {
            Self::Slogan(result) => &result.slogans,
            _ => &[],
        }
    }
}

/// One asynchronous unit of generated content
///
/// The result, when present, always matches `kind`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawGeneration")]
pub struct Generation {
    /// Generation identifier
    pub id: GenerationId,
    /// Content kind
    pub kind: GenerationKind,
    /// Payload, absent while pending or after failure
    pub result: Option<GenerationResult>,
    /// Lifecycle state
    pub status: GenerationStatus,
    /// Creation time, stamped by the client when the server omits it
    pub created_at: Option<DateTime<Utc>>,
}

impl Generation {
    /// A completed generation holding `result`
    #[must_use]
    pub fn completed(id: impl Into<GenerationId>, result: GenerationResult) -> Self {
        Self {
            id: id.into(),
            kind: result.kind(),
            result: Some(result),
            status: GenerationStatus::Completed,
            created_at: None,
        }
    }

    /// A generation with no result yet
    #[must_use]
    pub fn pending(id: impl Into<GenerationId>, kind: GenerationKind) -> Self {
        Self {
            id: id.into(),
            kind,
            result: None,
            status: GenerationStatus::Pending,
            created_at: None,
        }
    }

    /// Builder: set the creation time
    #[must_use]
    pub const fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Merge a status/result patch
    ///
    /// A result of a different kind than this generation is ignored.
    pub fn apply(&mut self, patch: &GenerationPatch) {
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(result) = &patch.result {
            if result.kind() == self.kind {
                self.result = Some(result.clone());
            } else {
                tracing::warn!(
                    generation = %self.id,
                    expected = %self.kind,
                    got = %result.kind(),
                    "Ignoring result of mismatched kind"
                );
            }
        }
    }

    /// Slogans carried by this generation (empty for other kinds)
    #[must_use]
    pub fn slogans(&self) -> &[SloganItem] {
        match &self.result {
            Some(result) => result.slogans(),
            None => &[],
        }
    }
}

/// Wire form of [`Generation`]
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGeneration {
    id: GenerationId,
    #[serde(rename = "type", default)]
    kind: Option<GenerationKind>,
    #[serde(default)]
    result: Option<serde_json::Value>,
    #[serde(default)]
    status: Option<GenerationStatus>,
    #[serde(default)]
    created_at: Option<DateTime<Utc>>,
}

impl TryFrom<RawGeneration> for Generation {
    type Error = String;

    fn try_from(raw: RawGeneration) -> Result<Self, Self::Error> {
        let result = match (raw.result, raw.kind) {
            (None, _) => None,
            (Some(value), Some(kind)) => Some(GenerationResult::decode(kind, value)?),
            (Some(value), None) => Some(GenerationResult::infer(value)?),
        };

        let kind = raw
            .kind
            .or_else(|| result.as_ref().map(GenerationResult::kind))
            .ok_or_else(|| format!("generation {} has neither a type nor a result", raw.id))?;

        let status = raw.status.unwrap_or(if result.is_some() {
            GenerationStatus::Completed
        } else {
            GenerationStatus::Pending
        });

        Ok(Self {
            id: raw.id,
            kind,
            result,
            status,
            created_at: raw.created_at,
        })
    }
}

impl Serialize for Generation {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct WireGeneration<'a> {
            id: &'a GenerationId,
            #[serde(rename = "type")]
            kind: GenerationKind,
            #[serde(skip_serializing_if = "Option::is_none")]
            result: Option<&'a GenerationResult>,
            status: GenerationStatus,
            #[serde(skip_serializing_if = "Option::is_none")]
            created_at: Option<&'a DateTime<Utc>>,
        }

        WireGeneration {
            id: &self.id,
            kind: self.kind,
            result: self.result.as_ref(),
            status: self.status,
            created_at: self.created_at.as_ref(),
        }
        .serialize(serializer)
    }
}

/// Status/result patch from status polling
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct GenerationPatch {
    /// New status
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<GenerationStatus>,
    /// New result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<GenerationResult>,
}

impl GenerationPatch {
    /// Patch that only changes the status
    #[must_use]
    pub const fn status(status: GenerationStatus) -> Self {
        Self {
            status: Some(status),
            result: None,
        }
    }
}

impl From<Generation> for GenerationPatch {
    fn from(generation: Generation) -> Self {
        Self {
            status: Some(generation.status),
            result: generation.result,
        }
    }
}
