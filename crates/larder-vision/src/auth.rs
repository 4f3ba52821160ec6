use larder_core::config::{AuthMode, RecognitionSettings};
use std::fmt;

use crate::proxy::ProxyError;

/// How the user token for the recognition service is obtained.
#[derive(Clone, PartialEq, Eq)]
pub enum UserToken {
    None,
    Provided(String),
    /// Created against the service on first use.
    CreateOnDemand,
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    pub user_token: UserToken,
}

impl Credentials {
    pub fn authorization_header(&self) -> String { format!("Bearer {}", self.api_key) }
}

// Keys never reach logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials").field("api_key", &"<redacted>").field("user_token", &self.user_token).finish()
    }
}

impl fmt::Debug for UserToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Provided(_) => f.write_str("Provided(<redacted>)"),
            Self::CreateOnDemand => f.write_str("CreateOnDemand"),
        }
    }
}

/// Read the credentials named by `settings` through `env`.
///
/// `env` is usually `|k| std::env::var(k).ok()`; blank values count as missing.
pub fn resolve_credentials<F>(settings: &RecognitionSettings, env: F) -> Result<Credentials, ProxyError>
where
    F: Fn(&str) -> Option<String>,
{
    let lookup = |key: &str| env(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    let api_key = lookup(settings.api_key_env.as_str()).ok_or_else(|| ProxyError::MissingCredential(settings.api_key_env.clone()))?;
    let user_token = match settings.auth_mode {
        AuthMode::ApiKey => UserToken::None,
        AuthMode::ApiKeyUserTokenEnv => {
            UserToken::Provided(lookup(settings.user_token_env.as_str()).ok_or_else(|| ProxyError::MissingCredential(settings.user_token_env.clone()))?)
        }
        AuthMode::ApiKeyUserTokenAutocreate => match lookup(settings.user_token_env.as_str()) {
            Some(token) => UserToken::Provided(token),
            None => UserToken::CreateOnDemand,
        },
    };
    tracing::debug!(mode = ?settings.auth_mode, ?user_token, "resolved recognition credentials");
    Ok(Credentials { api_key, user_token })
}
