//! Configuration service implementation.
//!
//! Loads `ContractorConfig` from `~/.config/contractor/config.toml` (or an
//! explicit path), applies environment overrides and resolves relative
//! directories.

use crate::paths::ContractorPaths;
use crate::storage::AtomicTomlFile;
use contractor_core::config::ContractorConfig;
use contractor_core::error::{ContractorError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

pub const ENV_ADMIN_USER_ID: &str = "CONTRACTOR_ADMIN_USER_ID";
pub const ENV_TEMPLATES_DIR: &str = "CONTRACTOR_TEMPLATES_DIR";
pub const ENV_OUTPUT_DIR: &str = "CONTRACTOR_OUTPUT_DIR";

/// Configuration service that loads and caches the configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` means the platform default.
    config_path: Option<PathBuf>,
    config: Arc<RwLock<Option<ContractorConfig>>>,
}

impl ConfigService {
    /// Uses `~/.config/contractor/config.toml`.
    pub fn new() -> Self {
        Self {
            config_path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Uses an explicit config file; relative directories in it resolve
    /// against the file's directory.
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            config_path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading it on first access.
    pub fn get_config(&self) -> Result<ContractorConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self.load(|key| std::env::var(key).ok())?;

        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    fn load<F>(&self, env: F) -> Result<ContractorConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let (config_path, base_dir) = match &self.config_path {
            Some(path) => {
                let base = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_default();
                (path.clone(), base)
            }
            None => {
                let config_file = ContractorPaths::config_file()
                    .map_err(|e| ContractorError::config(e.to_string()))?;
                let data_dir = ContractorPaths::data_dir()
                    .map_err(|e| ContractorError::config(e.to_string()))?;
                (config_file, data_dir)
            }
        };

        load_config(&config_path, &base_dir, env)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads `config_path` (defaults when missing), applies overrides from `env`
/// and resolves relative paths against `base_dir`.
pub fn load_config<F>(config_path: &Path, base_dir: &Path, env: F) -> Result<ContractorConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = AtomicTomlFile::<ContractorConfig>::new(config_path.to_path_buf())
        .load()?
        .unwrap_or_default();

    if let Some(raw) = env(ENV_ADMIN_USER_ID) {
        config.admin_user_id = raw.trim().parse().map_err(|_| {
            ContractorError::config(format!(
                "{} must be an integer, got '{}'",
                ENV_ADMIN_USER_ID, raw
            ))
        })?;
    }
    if let Some(dir) = env(ENV_TEMPLATES_DIR) {
        config.templates_dir = PathBuf::from(dir);
    }
    if let Some(dir) = env(ENV_OUTPUT_DIR) {
        config.output_dir = PathBuf::from(dir);
    }

    if config.template_extension.trim().is_empty() {
        return Err(ContractorError::config("template_extension must not be empty"));
    }
    config.template_extension = config
        .template_extension
        .trim()
        .trim_start_matches('.')
        .to_string();

    config.templates_dir = ContractorPaths::resolve(base_dir, &config.templates_dir);
    config.output_dir = ContractorPaths::resolve(base_dir, &config.output_dir);
    config.records_file = ContractorPaths::resolve(base_dir, &config.records_file);

    tracing::debug!(
        config_path = %config_path.display(),
        templates_dir = %config.templates_dir.display(),
        output_dir = %config.output_dir.display(),
        "Configuration loaded"
    );
    Ok(config)
}
