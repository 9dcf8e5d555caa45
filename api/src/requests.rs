//! Request bodies, the response envelope and small response payloads

use crate::error::ApiError;
use crate::types::{AuthToken, GenerationKind, User};
use serde::{Deserialize, Serialize};

/// Free-form generation preferences, e.g. `{"preference": "cool"}`
pub type Preferences = serde_json::Map<String, serde_json::Value>;

/// Body of `POST /generate/`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Content kind to generate
    #[serde(rename = "type")]
    pub kind: GenerationKind,
    /// Natural-language prompt
    pub prompt: String,
    /// Style hint (modern, minimal, professional, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Industry the content is for
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    /// Extra preferences
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
}

impl GenerationRequest {
    /// Logo generation from a prompt and optional style
    #[must_use]
    pub fn logo(prompt: impl Into<String>, style: Option<String>) -> Self {
        Self {
            kind: GenerationKind::Logo,
            prompt: prompt.into(),
            style,
            industry: None,
            preferences: None,
        }
    }

    /// Slogan generation from a prompt and optional tone
    #[must_use]
    pub fn slogan(prompt: impl Into<String>, style: Option<String>) -> Self {
        Self {
            kind: GenerationKind::Slogan,
            prompt: prompt.into(),
            style,
            industry: None,
            preferences: None,
        }
    }

    /// Palette generation for an industry; the prompt is synthesized
    #[must_use]
    pub fn colors(industry: impl Into<String>, preferences: Option<Preferences>) -> Self {
        let industry = industry.into();
        Self {
            kind: GenerationKind::Colors,
            prompt: format!("Generate color palette for {industry} industry"),
            style: None,
            industry: Some(industry),
            preferences,
        }
    }
}

/// Uniform JSON envelope around every non-binary response
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the server considers the call successful
    #[serde(default)]
    pub success: bool,
    /// Payload
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Informational message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Successful envelope around `data`
    #[must_use]
    pub const fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        }
    }

    /// Unwrap the payload
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyResponse`] when `success` is false or no data
    /// was returned.
    pub fn into_data(self) -> Result<T, ApiError> {
        match self.data {
            Some(data) if self.success => Ok(data),
            _ => Err(ApiError::EmptyResponse {
                message: self.error.or(self.message),
            }),
        }
    }

    /// Check the envelope of a call whose payload is irrelevant
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::EmptyResponse`] when `success` is false.
    pub fn ensure_success(self) -> Result<(), ApiError> {
        if self.success {
            Ok(())
        } else {
            Err(ApiError::EmptyResponse {
                message: self.error.or(self.message),
            })
        }
    }
}

/// Payload of login and register
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// The authenticated user
    pub user: User,
    /// Bearer credential for subsequent calls
    pub token: AuthToken,
}

/// Payload of `GET /domains/check/{domain}/`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DomainAvailability {
    /// Whether the domain can be registered
    pub available: bool,
    /// Registration price, if known
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

/// Payload of a brand-kit purchase
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseReceipt {
    /// Where the purchased kit can be fetched
    pub download_url: String,
}

/// Payload of a design-tool export
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLink {
    /// Link to the exported design
    pub url: String,
}

/// Payload of a checkout-session creation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    /// Payment-provider session id
    pub session_id: String,
    /// Hosted checkout URL
    pub url: String,
}

/// Format of a logo download
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DownloadFormat {
    /// Vector
    Svg,
    /// Raster
    Png,
}

impl DownloadFormat {
    /// Query-string value
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Png => "png",
        }
    }
}

impl std::fmt::Display for DownloadFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Integration target for design exports
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExportTarget {
    /// Canva
    Canva,
    /// Figma
    Figma,
}

impl ExportTarget {
    /// Path segment of the export endpoint
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Canva => "canva",
            Self::Figma => "figma",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_colors_request_synthesizes_prompt() {
        let mut preferences = Preferences::new();
        preferences.insert("preference".to_string(), json!("cool"));

        let request = GenerationRequest::colors("Finance", Some(preferences));
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "type": "colors",
                "prompt": "Generate color palette for Finance industry",
                "industry": "Finance",
                "preferences": {"preference": "cool"}
            })
        );
    }

    #[test]
    fn test_logo_request_omits_absent_style() {
        let value = serde_json::to_value(GenerationRequest::logo("blue tech logo", None)).unwrap();
        assert_eq!(value, json!({"type": "logo", "prompt": "blue tech logo"}));
    }

    #[test]
    fn test_envelope_without_data_for_payload_lacking_default() {
        #[derive(Debug, PartialEq, Deserialize)]
        struct Receipt {
            url: String,
        }

        let empty: ApiResponse<Receipt> = serde_json::from_value(json!({"success": true})).unwrap();
        assert!(empty.data.is_none());
        assert!(empty.into_data().is_err());

        let full: ApiResponse<Receipt> =
            serde_json::from_value(json!({"success": true, "data": {"url": "https://cdn.test/a"}})).unwrap();
        assert_eq!(full.into_data().unwrap().url, "https://cdn.test/a");
    }

    #[test]
    fn test_into_data_requires_success_and_data() {
        let ok: ApiResponse<u32> = serde_json::from_value(json!({"success": true, "data": 7})).unwrap();
        assert_eq!(ok.into_data(), Ok(7));

        let failed: ApiResponse<u32> =
            serde_json::from_value(json!({"success": false, "error": "quota exceeded"})).unwrap();
        assert_eq!(
            failed.into_data(),
            Err(ApiError::EmptyResponse {
                message: Some("quota exceeded".to_string())
            })
        );

        let empty: ApiResponse<u32> = serde_json::from_value(json!({"success": true})).unwrap();
        assert_eq!(empty.into_data(), Err(ApiError::EmptyResponse { message: None }));
    }
}
