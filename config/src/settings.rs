//! The settings snapshot: every recognized option, read once, then shared read-only.
//!
//! Build it with [`Settings::from_env`] (process environment) or [`Settings::from_source`]
//! (any [`SettingsSource`], e.g. explicit overrides layered over the environment), wrap it in an
//! `Arc` and hand it to whatever needs it. Fields are private; there are no setters.

use std::fmt;

use serde_json::Value;

use crate::source::{ProcessEnv, SettingsSource};
use crate::summary::{SettingsSummary, SummarySection};
use crate::LoadError;

/// Environment variable names.
pub mod keys {
    pub const ENV: &str = "ENV";
    pub const HOST: &str = "HOST";
    pub const PORT: &str = "PORT";
    pub const REDIS_URL: &str = "REDIS_URL";
    pub const SESSION_TTL_SECONDS: &str = "SESSION_TTL_SECONDS";
    pub const BACKEND_PUBLIC_BASE_URL: &str = "BACKEND_PUBLIC_BASE_URL";
    pub const CORS_ORIGINS: &str = "CORS_ORIGINS";
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    pub const SUPABASE_URL: &str = "SUPABASE_URL";
    pub const SUPABASE_ANON_KEY: &str = "SUPABASE_ANON_KEY";
    pub const SUPABASE_SERVICE_ROLE_KEY: &str = "SUPABASE_SERVICE_ROLE_KEY";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const MODEL_PROVIDER_API_KEY: &str = "MODEL_PROVIDER_API_KEY";
    pub const LLM_API_KEY: &str = "LLM_API_KEY";
    pub const MODEL_PROVIDER_BASE_URL: &str = "MODEL_PROVIDER_BASE_URL";
    pub const LLM_API_BASE: &str = "LLM_API_BASE";
    pub const LLM_REASONING_MODEL: &str = "LLM_REASONING_MODEL";
    pub const LLM_EXPRESSION_MODEL: &str = "LLM_EXPRESSION_MODEL";
}

pub const DEFAULT_ENV: &str = "development";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_REDIS_URL: &str = "redis://localhost:6379/0";
pub const DEFAULT_SESSION_TTL_SECONDS: u64 = 3600;
pub const DEFAULT_BACKEND_PUBLIC_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_MODEL_PROVIDER_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_REASONING_MODEL: &str = "gpt-4o";
pub const DEFAULT_EXPRESSION_MODEL: &str = "gpt-4o-mini";

/// Names reported by [`Settings::required_env_vars`]. Fixed; not derived from the fields.
const REQUIRED_ENV_VARS: [&str; 3] = [
    keys::SUPABASE_URL,
    keys::SUPABASE_ANON_KEY,
    keys::MODEL_PROVIDER_API_KEY,
];

/// Immutable configuration snapshot for the process lifetime.
#[derive(Clone, PartialEq, Eq)]
pub struct Settings {
    env: String,
    host: String,
    port: u16,
    redis_url: String,
    session_ttl_seconds: u64,
    backend_public_base_url: String,
    cors_origins: Vec<String>,
    log_level: String,
    supabase_url: Option<String>,
    supabase_anon_key: Option<String>,
    supabase_service_role_key: Option<String>,
    database_url: Option<String>,
    model_provider_api_key: Option<String>,
    model_provider_base_url: String,
    reasoning_model: String,
    expression_model: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            env: DEFAULT_ENV.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            redis_url: DEFAULT_REDIS_URL.to_string(),
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECONDS,
            backend_public_base_url: DEFAULT_BACKEND_PUBLIC_BASE_URL.to_string(),
            cors_origins: Vec::new(),
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            supabase_url: None,
            supabase_anon_key: None,
            supabase_service_role_key: None,
            database_url: None,
            model_provider_api_key: None,
            model_provider_base_url: DEFAULT_MODEL_PROVIDER_BASE_URL.to_string(),
            reasoning_model: DEFAULT_REASONING_MODEL.to_string(),
            expression_model: DEFAULT_EXPRESSION_MODEL.to_string(),
        }
    }
}

impl Settings {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, LoadError> {
        Self::from_source(&ProcessEnv)
    }

    /// Reads every recognized option from `source`, applying defaults for absent ones.
    ///
    /// Absent means missing, JSON `null`, or a blank string. `CORS_ORIGINS` never fails; the
    /// integer options fail with [`LoadError::InvalidValue`] when they do not parse.
    pub fn from_source<S: SettingsSource + ?Sized>(source: &S) -> Result<Self, LoadError> {
        let d = Self::default();
        Ok(Self {
            env: string_or(source, keys::ENV, d.env)?,
            host: string_or(source, keys::HOST, d.host)?,
            port: unsigned_or(source, keys::PORT, d.port)?,
            redis_url: string_or(source, keys::REDIS_URL, d.redis_url)?,
            session_ttl_seconds: unsigned_or(
                source,
                keys::SESSION_TTL_SECONDS,
                d.session_ttl_seconds,
            )?,
            backend_public_base_url: string_or(
                source,
                keys::BACKEND_PUBLIC_BASE_URL,
                d.backend_public_base_url,
            )?,
            cors_origins: parse_cors_origins(present(source, keys::CORS_ORIGINS).as_ref()),
            log_level: string_or(source, keys::LOG_LEVEL, d.log_level)?,
            supabase_url: optional(source, keys::SUPABASE_URL)?,
            supabase_anon_key: optional(source, keys::SUPABASE_ANON_KEY)?,
            supabase_service_role_key: optional(source, keys::SUPABASE_SERVICE_ROLE_KEY)?,
            database_url: optional(source, keys::DATABASE_URL)?,
            model_provider_api_key: optional_with_fallback(
                source,
                keys::MODEL_PROVIDER_API_KEY,
                keys::LLM_API_KEY,
            )?,
            model_provider_base_url: optional_with_fallback(
                source,
                keys::MODEL_PROVIDER_BASE_URL,
                keys::LLM_API_BASE,
            )?
            .unwrap_or(d.model_provider_base_url),
            reasoning_model: string_or(source, keys::LLM_REASONING_MODEL, d.reasoning_model)?,
            expression_model: string_or(source, keys::LLM_EXPRESSION_MODEL, d.expression_model)?,
        })
    }

    pub fn env(&self) -> &str {
        &self.env
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// `host:port`, as given to a listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn redis_url(&self) -> &str {
        &self.redis_url
    }

    pub fn session_ttl_seconds(&self) -> u64 {
        self.session_ttl_seconds
    }

    pub fn backend_public_base_url(&self) -> &str {
        &self.backend_public_base_url
    }

    pub fn cors_origins(&self) -> &[String] {
        &self.cors_origins
    }

    pub fn log_level(&self) -> &str {
        &self.log_level
    }

    pub fn supabase_url(&self) -> Option<&str> {
        self.supabase_url.as_deref()
    }

    pub fn supabase_anon_key(&self) -> Option<&str> {
        self.supabase_anon_key.as_deref()
    }

    pub fn supabase_service_role_key(&self) -> Option<&str> {
        self.supabase_service_role_key.as_deref()
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    /// `MODEL_PROVIDER_API_KEY`, or `LLM_API_KEY` when the former is unset.
    pub fn model_provider_api_key(&self) -> Option<&str> {
        self.model_provider_api_key.as_deref()
    }

    /// `MODEL_PROVIDER_BASE_URL`, or `LLM_API_BASE` when the former is unset.
    pub fn model_provider_base_url(&self) -> &str {
        &self.model_provider_base_url
    }

    pub fn reasoning_model(&self) -> &str {
        &self.reasoning_model
    }

    pub fn expression_model(&self) -> &str {
        &self.expression_model
    }

    /// True iff the environment name is `production`, ignoring case.
    pub fn is_production(&self) -> bool {
        self.env.to_lowercase() == "production"
    }

    /// The documented list of required variables. Does not look at the current values.
    pub fn required_env_vars() -> &'static [&'static str] {
        &REQUIRED_ENV_VARS
    }

    /// Entries of [`required_env_vars`](Self::required_env_vars) that are unset in this snapshot.
    /// Loading never fails on these; callers decide whether to warn.
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_ENV_VARS
            .iter()
            .copied()
            .filter(|name| {
                let value = match *name {
                    keys::SUPABASE_URL => &self.supabase_url,
                    keys::SUPABASE_ANON_KEY => &self.supabase_anon_key,
                    _ => &self.model_provider_api_key,
                };
                value.is_none()
            })
            .collect()
    }

    /// Secret-free view for verbose output.
    pub fn summary(&self) -> SettingsSummary {
        let cors = if self.cors_origins.is_empty() {
            "-".to_string()
        } else {
            self.cors_origins.join(",")
        };
        SettingsSummary::new()
            .with_section(
                SummarySection::new("server")
                    .entry("env", &self.env)
                    .entry("production", self.is_production().to_string())
                    .entry("bind", self.bind_addr())
                    .entry("public_base_url", &self.backend_public_base_url)
                    .entry("cors_origins", cors)
                    .entry("log_level", &self.log_level),
            )
            .with_section(
                SummarySection::new("store")
                    .entry("redis_url", redact_url(&self.redis_url))
                    .entry("session_ttl_seconds", self.session_ttl_seconds.to_string())
                    .entry(
                        "database_url",
                        self.database_url
                            .as_deref()
                            .map(redact_url)
                            .unwrap_or_else(|| "unset".to_string()),
                    ),
            )
            .with_section(
                SummarySection::new("identity")
                    .entry("supabase_url", set_or_unset(&self.supabase_url))
                    .entry("supabase_anon_key", set_or_unset(&self.supabase_anon_key))
                    .entry(
                        "supabase_service_role_key",
                        set_or_unset(&self.supabase_service_role_key),
                    ),
            )
            .with_section(
                SummarySection::new("model")
                    .entry("api_key", set_or_unset(&self.model_provider_api_key))
                    .entry("base_url", &self.model_provider_base_url)
                    .entry("reasoning_model", &self.reasoning_model)
                    .entry("expression_model", &self.expression_model),
            )
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("env", &self.env)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("redis_url", &redact_url(&self.redis_url))
            .field("session_ttl_seconds", &self.session_ttl_seconds)
            .field("backend_public_base_url", &self.backend_public_base_url)
            .field("cors_origins", &self.cors_origins)
            .field("log_level", &self.log_level)
            .field("supabase_url", &self.supabase_url)
            .field("supabase_anon_key", &set_or_unset(&self.supabase_anon_key))
            .field(
                "supabase_service_role_key",
                &set_or_unset(&self.supabase_service_role_key),
            )
            .field("database_url", &self.database_url.as_deref().map(redact_url))
            .field("model_provider_api_key", &set_or_unset(&self.model_provider_api_key))
            .field("model_provider_base_url", &self.model_provider_base_url)
            .field("reasoning_model", &self.reasoning_model)
            .field("expression_model", &self.expression_model)
            .finish()
    }
}

/// Normalizes the allowed-origins option.
///
/// * string: split on `,`, trim each piece, drop empty pieces;
/// * list: passed through (string items as-is, other items as their JSON text);
/// * anything else, or absent: empty.
pub fn parse_cors_origins(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        _ => Vec::new(),
    }
}

fn present<S: SettingsSource + ?Sized>(source: &S, key: &str) -> Option<Value> {
    match source.get(key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => Some(v),
    }
}

fn invalid(key: &str, value: &Value) -> LoadError {
    let value = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    LoadError::InvalidValue {
        key: key.to_string(),
        value,
    }
}

fn text(key: &str, value: Value) -> Result<String, LoadError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(invalid(key, &other)),
    }
}

fn string_or<S: SettingsSource + ?Sized>(
    source: &S,
    key: &str,
    default: String,
) -> Result<String, LoadError> {
    present(source, key).map_or(Ok(default), |v| text(key, v))
}

fn optional<S: SettingsSource + ?Sized>(source: &S, key: &str) -> Result<Option<String>, LoadError> {
    present(source, key).map(|v| text(key, v)).transpose()
}

fn optional_with_fallback<S: SettingsSource + ?Sized>(
    source: &S,
    primary: &str,
    fallback: &str,
) -> Result<Option<String>, LoadError> {
    match optional(source, primary)? {
        Some(v) => Ok(Some(v)),
        None => optional(source, fallback),
    }
}

fn unsigned_or<S, T>(source: &S, key: &str, default: T) -> Result<T, LoadError>
where
    S: SettingsSource + ?Sized,
    T: TryFrom<u64>,
{
    let Some(value) = present(source, key) else {
        return Ok(default);
    };
    let parsed = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    parsed
        .and_then(|n| T::try_from(n).ok())
        .ok_or_else(|| invalid(key, &value))
}

fn set_or_unset(value: &Option<String>) -> &'static str {
    if value.is_some() {
        "set"
    } else {
        "unset"
    }
}

/// Masks the userinfo part of a URL: `redis://user:pw@host/0` -> `redis://***@host/0`.
///
/// Everything between `://` and the last `@` counts as userinfo, so a password holding an
/// unescaped `/`, `?` or `#` is still masked. An `@` in the path over-masks instead of leaking.
fn redact_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    match rest.rsplit_once('@') {
        Some((_, host_and_path)) => format!("{}://***@{}", scheme, host_and_path),
        None => url.to_string(),
    }
}
