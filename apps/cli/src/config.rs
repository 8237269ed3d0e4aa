use std::env;

use ocorrencias_core::{AccessToken, AppError, AppResult};

const DEFAULT_API_BASE_URL: &str = "http://127.0.0.1:8080";

/// Runtime configuration read from the environment.
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub api_base_url: String,
    pub api_token: Option<AccessToken>,
    pub http_timeout_seconds: u64,
    pub reference_cache_ttl_seconds: u32,
}

impl CliConfig {
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        let api_base_url = lookup("OCORRENCIAS_API_BASE_URL")
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned())
            .trim_end_matches('/')
            .to_owned();
        let api_token = lookup("OCORRENCIAS_API_TOKEN")
            .filter(|value| !value.trim().is_empty())
            .map(AccessToken::new)
            .transpose()?;
        let http_timeout_seconds =
            parse_u64(&lookup, "OCORRENCIAS_HTTP_TIMEOUT_SECONDS", 15)?;
        let reference_cache_ttl_seconds =
            parse_u32(&lookup, "OCORRENCIAS_REFERENCE_CACHE_TTL_SECONDS", 0)?;

        if http_timeout_seconds == 0 {
            return Err(AppError::Validation(
                "OCORRENCIAS_HTTP_TIMEOUT_SECONDS must be greater than zero".to_owned(),
            ));
        }

        Ok(Self {
            api_base_url,
            api_token,
            http_timeout_seconds,
            reference_cache_ttl_seconds,
        })
    }
}

fn parse_u64(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u64) -> AppResult<u64> {
    match lookup(name) {
        Some(value) => value.trim().parse::<u64>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}

fn parse_u32(lookup: &impl Fn(&str) -> Option<String>, name: &str, default: u32) -> AppResult<u32> {
    match lookup(name) {
        Some(value) => value.trim().parse::<u32>().map_err(|error| {
            AppError::Validation(format!("invalid {name} value '{value}': {error}"))
        }),
        None => Ok(default),
    }
}
