use secrecy::Secret;
use service_core::config::{self as core_config, get_env, parse_env};
use service_core::error::AppError;
use std::fmt;
use std::time::Duration;

/// OpenAI-compatible surface of the Gemini API.
const DEFAULT_MODEL_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/openai/";

const DEFAULT_MODEL_TIMEOUT_SECS: u64 = 120;

/// Default request body cap (20MB). Blueprint scans are large.
const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct BlueprintConfig {
    pub common: core_config::Config,
    pub model_api: ModelApiConfig,
    pub models: ModelConfig,
    /// Serve bundled fixture responses instead of calling the model.
    pub mock_responses: bool,
    pub max_upload_bytes: usize,
}

#[derive(Clone)]
pub struct ModelApiConfig {
    pub api_key: Secret<String>,
    pub base_url: String,
    pub timeout: Duration,
}

impl fmt::Debug for ModelApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelApiConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Model for the room detection endpoints.
    pub rooms_model: String,
    /// Model for the is-this-a-blueprint check.
    pub validation_model: String,
    /// Model for compliance report generation.
    pub report_model: String,
}

impl BlueprintConfig {
    /// Load configuration from the environment.
    ///
    /// Fails when `GEMINI_API_KEY` is absent; the service must not start
    /// without a credential.
    pub fn load() -> Result<Self, AppError> {
        let common_config = core_config::Config::load()?;
        let is_prod = common_config.is_production();

        let timeout_secs = parse_env(
            "MODEL_TIMEOUT_SECS",
            DEFAULT_MODEL_TIMEOUT_SECS,
            is_prod,
        )?;

        Ok(BlueprintConfig {
            common: common_config,
            model_api: ModelApiConfig {
                api_key: Secret::new(get_env("GEMINI_API_KEY", None, is_prod)?),
                base_url: get_env("MODEL_BASE_URL", Some(DEFAULT_MODEL_BASE_URL), is_prod)?,
                timeout: Duration::from_secs(timeout_secs),
            },
            models: ModelConfig {
                rooms_model: get_env(
                    "BLUEPRINT_ROOMS_MODEL",
                    Some("gemini-3-pro-preview"),
                    is_prod,
                )?,
                validation_model: get_env(
                    "BLUEPRINT_VALIDATION_MODEL",
                    Some("gemini-2.5-flash"),
                    is_prod,
                )?,
                report_model: get_env(
                    "BLUEPRINT_REPORT_MODEL",
                    Some("gemini-3-pro-preview"),
                    is_prod,
                )?,
            },
            mock_responses: parse_env("MOCK_RESPONSES", false, false)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES, false)?,
        })
    }
}
