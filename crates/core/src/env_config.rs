//! Environment variable parsing with warn-level logging for invalid values.

use std::fmt::Display;
use std::str::FromStr;

/// Default OpenAI-compatible API root.
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.openai.com";
/// Default chat model.
pub const DEFAULT_LLM_MODEL: &str = "gpt-4-turbo-preview";
/// Default sampling temperature.
pub const DEFAULT_LLM_TEMPERATURE: f32 = 0.7;
/// Default reply length cap.
pub const DEFAULT_LLM_MAX_TOKENS: u32 = 1000;
/// Default HTTP timeout for the LLM call.
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 60;

/// Parse an environment variable with a default fallback.
///
/// - If the variable is not set: returns `default` silently (expected case).
/// - If the variable is set but cannot be parsed: logs a warning and returns `default`.
pub fn env_parse_with_default<T: FromStr + Display>(var: &str, default: T) -> T {
    parse_or_default(var, std::env::var(var).ok().as_deref(), default)
}

/// Parsing half of [`env_parse_with_default`], separated from the process environment.
pub fn parse_or_default<T: FromStr + Display>(var: &str, raw: Option<&str>, default: T) -> T {
    match raw {
        Some(v) => match v.parse() {
            Ok(n) => n,
            Err(_) => {
                tracing::warn!(
                    var,
                    value = %v,
                    default = %default,
                    "invalid env var value, using default"
                );
                default
            },
        },
        None => default,
    }
}

/// What to do when a badge award fails after the primary record was saved.
///
/// The primary save and the award are never in one transaction; this only
/// decides whether the request reports the failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BadgeFailurePolicy {
    /// Fail the whole request (the primary save stays committed).
    #[default]
    Propagate,
    /// Log the failure and report success.
    LogAndContinue,
}

impl BadgeFailurePolicy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Propagate => "propagate",
            Self::LogAndContinue => "log",
        }
    }
}

impl Display for BadgeFailurePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BadgeFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "propagate" => Ok(Self::Propagate),
            "log" | "log_and_continue" => Ok(Self::LogAndContinue),
            other => Err(format!("unknown badge failure policy: {other}")),
        }
    }
}

/// Settings for the outbound chat-completion call.
#[derive(Clone)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_LLM_BASE_URL.to_owned(),
            model: DEFAULT_LLM_MODEL.to_owned(),
            temperature: DEFAULT_LLM_TEMPERATURE,
            max_tokens: DEFAULT_LLM_MAX_TOKENS,
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

/// Runtime configuration assembled from the environment at startup.
#[derive(Debug, Clone, Default)]
pub struct CoachConfig {
    pub database_url: Option<String>,
    pub llm: LlmSettings,
    pub badge_failure_policy: BadgeFailurePolicy,
}

impl CoachConfig {
    /// Read `DATABASE_URL`, `OPENAI_API_KEY` and the `COACH_*` variables.
    #[must_use]
    pub fn from_env() -> Self {
        let non_empty = |var: &str| std::env::var(var).ok().filter(|v| !v.trim().is_empty());
        Self {
            database_url: non_empty("DATABASE_URL"),
            llm: LlmSettings {
                api_key: non_empty("OPENAI_API_KEY"),
                base_url: non_empty("COACH_LLM_BASE_URL")
                    .unwrap_or_else(|| DEFAULT_LLM_BASE_URL.to_owned()),
                model: non_empty("COACH_LLM_MODEL").unwrap_or_else(|| DEFAULT_LLM_MODEL.to_owned()),
                temperature: env_parse_with_default(
                    "COACH_LLM_TEMPERATURE",
                    DEFAULT_LLM_TEMPERATURE,
                ),
                max_tokens: env_parse_with_default("COACH_LLM_MAX_TOKENS", DEFAULT_LLM_MAX_TOKENS),
                timeout_secs: env_parse_with_default(
                    "COACH_LLM_TIMEOUT_SECS",
                    DEFAULT_LLM_TIMEOUT_SECS,
                ),
            },
            badge_failure_policy: env_parse_with_default(
                "COACH_BADGE_FAILURE_POLICY",
                BadgeFailurePolicy::default(),
            ),
        }
    }
}
