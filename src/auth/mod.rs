use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig, STANDARD};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::AppConfig;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);

/// State carried through the Notion redirect round trip
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OAuthState {
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub frontend_url: String,
    /// Milliseconds since the unix epoch
    #[serde(default)]
    pub timestamp: i64,
}

#[derive(Debug, Error)]
pub enum StateError {
    #[error("state is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),

    #[error("state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl OAuthState {
    pub fn new(user_id: impl Into<String>, frontend_url: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            frontend_url: frontend_url.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }

    pub fn encode(&self) -> Result<String, StateError> {
        let json = serde_json::to_vec(self)?;
        Ok(STANDARD.encode(json))
    }

    /// Accepts standard or URL-safe base64, padded or not.
    pub fn decode(raw: &str) -> Result<Self, StateError> {
        let trimmed = raw.trim();
        let bytes = match STANDARD_LENIENT.decode(trimmed) {
            Ok(bytes) => bytes,
            Err(_) => URL_SAFE_LENIENT.decode(trimmed)?,
        };
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Who initiated the authorization and where to send the browser afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackTarget {
    pub user_id: String,
    pub frontend_url: String,
}

impl CallbackTarget {
    /// Resolve the callback target from the raw `state` query value.
    /// Undecodable state and foreign frontend URLs fall back to configured defaults.
    pub fn resolve(raw_state: Option<&str>, config: &AppConfig) -> Self {
        let state = match raw_state.filter(|s| !s.trim().is_empty()) {
            Some(raw) => match OAuthState::decode(raw) {
                Ok(state) => Some(state),
                Err(e) => {
                    tracing::warn!("Failed to parse OAuth state: {}", e);
                    None
                }
            },
            None => None,
        };

        let mut target = Self {
            user_id: config.defaults.user_id.clone(),
            frontend_url: config.frontend.url.clone(),
        };

        if let Some(state) = state {
            if !state.user_id.trim().is_empty() {
                target.user_id = state.user_id;
            }
            let frontend_url = state.frontend_url.trim();
            if !frontend_url.is_empty() {
                if config.is_allowed_origin(frontend_url) {
                    target.frontend_url = frontend_url.trim_end_matches('/').to_string();
                } else {
                    tracing::warn!("Ignoring frontend URL outside allowed origins: {}", frontend_url);
                }
            }
        }

        target
    }

    pub fn success_url(&self) -> String {
        format!(
            "{}/notion/connected?success=true",
            self.frontend_url.trim_end_matches('/')
        )
    }

    pub fn error_url(&self, message: &str) -> String {
        error_redirect(&self.frontend_url, message)
    }
}

/// `{frontend}/notion/error?message=<encoded>`
pub fn error_redirect(frontend_url: &str, message: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(message.as_bytes()).collect();
    format!("{}/notion/error?message={}", frontend_url.trim_end_matches('/'), encoded)
}
