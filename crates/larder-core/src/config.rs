//! Layered configuration and path helpers.
//!
//! Uses Figment to merge built-in defaults + `config.toml` + `config.<env>.toml`
//! + `LARDER_*` env vars (`__` separates nested keys, e.g.
//! `LARDER_SEARCH__MIN_ACCURACY=75`). Provides helpers to expand `~` and
//! `${VAR}` and to resolve relative paths against a known base directory.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::{MatchMode, Strategy};

pub const ENV_PREFIX: &str = "LARDER_";

pub struct Config {
    figment: Figment,
    env_name: String,
}

impl Config {
    /// Load from the current directory.
    pub fn load() -> Result<Self> { Self::load_from(Path::new(".")) }

    /// Load `config.toml` and the env-specific overlay from `dir`.
    pub fn load_from(dir: &Path) -> Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::from(Serialized::defaults(Settings::default())).merge(Toml::file(dir.join("config.toml")));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file(dir.join("config.dev.toml"))),
            "prod" | "production" => figment = figment.merge(Toml::file(dir.join("config.prod.toml"))),
            "test" | "testing" => figment = figment.merge(Toml::file(dir.join("config.test.toml"))),
            _ => {}
        }
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config = Self { figment, env_name };
        config.validate_for_env()?;
        Ok(config)
    }

    /// Wrap an already-assembled figment; defaults are layered underneath.
    pub fn from_figment(figment: Figment) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Settings::default())).merge(figment);
        let config = Self { figment, env_name: "custom".to_string() };
        config.validate_for_env()?;
        Ok(config)
    }

    pub fn env_name(&self) -> &str { &self.env_name }

    pub fn get<T>(&self, key: &str) -> Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| Error::InvalidConfig(format!("Failed to get '{}': {}", key, e)))
    }

    /// The whole typed configuration.
    pub fn settings(&self) -> Result<Settings> {
        self.figment.extract().map_err(|e| Error::InvalidConfig(e.to_string()))
    }

    fn validate_for_env(&self) -> Result<()> {
        let settings = self.settings()?;
        settings.validate()?;
        if matches!(self.env_name.as_str(), "prod" | "production") && settings.catalog.path.as_os_str().is_empty() {
            return Err(Error::InvalidConfig("catalog.path must be set in production".to_string()));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub catalog: CatalogSettings,
    pub search: SearchSettings,
    pub featured: FeaturedSettings,
    pub recognition: RecognitionSettings,
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        if self.search.min_accuracy > 100.0 || self.search.min_accuracy < 0.0 || self.search.min_accuracy.is_nan() {
            return Err(Error::InvalidConfig(format!("search.min_accuracy must be within 0..=100, got {}", self.search.min_accuracy)));
        }
        if self.search.suggestion_limit == 0 {
            return Err(Error::InvalidConfig("search.suggestion_limit must be positive".to_string()));
        }
        if self.featured.count == 0 {
            return Err(Error::InvalidConfig("featured.count must be positive".to_string()));
        }
        let r = &self.recognition;
        for (key, value) in [
            ("segmentation_threshold", r.segmentation_threshold),
            ("recognition_threshold", r.recognition_threshold),
            ("results_threshold", r.results_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!("recognition.{key} must be within 0..=1, got {value}")));
            }
        }
        Ok(())
    }

    /// Resolve configured paths against `base` after `~`/`$VAR` expansion.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        self.catalog.path = resolve_with_base(base, self.catalog.path.to_string_lossy());
        self.catalog.favorites_path = resolve_with_base(base, self.catalog.favorites_path.to_string_lossy());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSettings {
    /// A JSON file or a directory of JSON files.
    pub path: PathBuf,
    pub favorites_path: PathBuf,
    /// Fail the whole load on the first malformed record.
    pub strict: bool,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/catalog.json"),
            favorites_path: PathBuf::from("~/.local/share/larder/favorites.json"),
            strict: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub match_mode: MatchMode,
    pub strategy: Strategy,
    pub min_accuracy: f64,
    pub suggestion_limit: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            match_mode: MatchMode::Containment,
            strategy: Strategy::Threshold,
            min_accuracy: 50.0,
            suggestion_limit: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturedSettings {
    pub count: usize,
    pub seed: u64,
}

impl Default for FeaturedSettings {
    fn default() -> Self { Self { count: 6, seed: 42 } }
}

/// How the recognition proxy authenticates upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AuthMode {
    /// API key only.
    #[default]
    ApiKey,
    /// API key plus a user token read from the environment.
    ApiKeyUserTokenEnv,
    /// API key plus a user token created on first use.
    ApiKeyUserTokenAutocreate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecognitionSettings {
    pub auth_mode: AuthMode,
    /// Name of the env var holding the API key, never the key itself.
    pub api_key_env: String,
    pub user_token_env: String,
    pub segmentation_threshold: f64,
    pub recognition_threshold: f64,
    pub results_threshold: f64,
}

impl Default for RecognitionSettings {
    fn default() -> Self {
        Self {
            auth_mode: AuthMode::ApiKey,
            api_key_env: "LOGMEAL_API_KEY".to_string(),
            user_token_env: "LOGMEAL_USER_TOKEN".to_string(),
            segmentation_threshold: 0.15,
            recognition_threshold: 0.3,
            results_threshold: 0.3,
        }
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

/// Resolve a possibly relative path against a given base directory after expansion.
/// If `p` is absolute, it's returned as-is; otherwise `base.join(p)` is returned.
pub fn resolve_with_base<S: AsRef<str>>(base: &Path, p: S) -> PathBuf {
    let p = expand_path(p);
    if p.is_absolute() { p } else { base.join(p) }
}
