//! Configuration loading.
//!
//! Resolution order for the file: explicit path, `DOCSIFT_CONFIG`, then
//! `<config dir>/docsift/config.json`. A missing file yields defaults.
//! `DOCSIFT_*` environment variables are applied on top, and the merged
//! result is validated before use.

use std::path::{Path, PathBuf};

use docsift_types::{ConfigError, DocsiftConfig};
use tracing::{debug, info, warn};
use validator::{Validate, ValidationErrors, ValidationErrorsKind};

const CONFIG_DIR: &str = "docsift";
const CONFIG_FILE: &str = "config.json";

pub const CONFIG_PATH_ENV: &str = "DOCSIFT_CONFIG";

/// Default location of `config.json`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE)).ok_or(ConfigError::NoDataDir)
}

pub fn resolve_config_path(explicit: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = explicit {
        return Ok(path.to_path_buf());
    }
    match std::env::var(CONFIG_PATH_ENV) {
        Ok(path) if !path.trim().is_empty() => Ok(PathBuf::from(path)),
        _ => default_config_path(),
    }
}

/// Parse `path`, falling back to defaults when it does not exist.
pub fn load_config_from(path: &Path) -> Result<DocsiftConfig, ConfigError> {
    if !path.exists() {
        debug!("[Config] {} not found, using defaults", path.display());
        return Ok(DocsiftConfig::default());
    }
    let content =
        std::fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(path, &e))?;
    serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))
}

/// Apply `DOCSIFT_*` overrides read through `lookup`.
pub fn apply_env_overrides<F>(config: &mut DocsiftConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(endpoint) = get("DOCSIFT_ENDPOINT") {
        config.upstream.endpoint = endpoint;
    }
    if let Some(api_key) = get("DOCSIFT_API_KEY") {
        config.upstream.api_key = api_key;
    }
    if let Some(api_version) = get("DOCSIFT_API_VERSION") {
        config.upstream.api_version = Some(api_version);
    }
    if let Some(model) = get("DOCSIFT_MODEL") {
        config.upstream.model = model;
    }
    if let Some(port) = get("DOCSIFT_PORT") {
        config.server.port = port.trim().parse().map_err(|_| ConfigError::ValidationError {
            field: "DOCSIFT_PORT".to_string(),
            message: format!("'{}' is not a valid port", port),
        })?;
    }
    Ok(())
}

pub fn validate_config(config: &DocsiftConfig) -> Result<(), ConfigError> {
    config.validate().map_err(|errors| {
        let (field, message) = first_violation(&errors, "")
            .unwrap_or_else(|| ("config".to_string(), errors.to_string()));
        ConfigError::ValidationError { field, message }
    })
}

fn first_violation(errors: &ValidationErrors, prefix: &str) -> Option<(String, String)> {
    for (name, kind) in errors.errors() {
        let path = if prefix.is_empty() { name.to_string() } else { format!("{}.{}", prefix, name) };
        match kind {
            ValidationErrorsKind::Field(violations) => {
                if let Some(violation) = violations.first() {
                    let message = violation
                        .message
                        .as_ref()
                        .map(ToString::to_string)
                        .unwrap_or_else(|| violation.code.to_string());
                    return Some((path, message));
                }
            },
            ValidationErrorsKind::Struct(inner) => {
                if let Some(found) = first_violation(inner, &path) {
                    return Some(found);
                }
            },
            ValidationErrorsKind::List(items) => {
                for (index, inner) in items {
                    if let Some(found) = first_violation(inner, &format!("{}[{}]", path, index)) {
                        return Some(found);
                    }
                }
            },
        }
    }
    None
}

/// Resolve, read, override from the process environment and validate.
pub fn load_config(explicit: Option<&Path>) -> Result<DocsiftConfig, ConfigError> {
    let path = resolve_config_path(explicit)?;
    let mut config = load_config_from(&path)?;
    apply_env_overrides(&mut config, |key| std::env::var(key).ok())?;
    validate_config(&config)?;
    if config.upstream.api_key.is_empty() {
        warn!("[Config] No upstream API key configured; upstream calls will be rejected");
    }
    info!("[Config] Loaded configuration (source: {})", path.display());
    Ok(config)
}
