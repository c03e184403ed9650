use crate::{Error, Result};
use monlivre_engine::loans::{DEFAULT_DUE_SOON_DAYS, DEFAULT_RENEWAL_DAYS};
use monlivre_engine::{OverduePolicy, RenewalPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";
pub const DEFAULT_PLACEHOLDER_COVER: &str = "/placeholder.svg";

/// Upper bound for `loans.renewal_days` (one century)
pub const MAX_RENEWAL_DAYS: i64 = 36_500;

/// Resolve the workspace data directory path based on priority:
/// 1. Explicit path (with tilde expansion)
/// 2. MONLIVRE_PATH environment variable (with tilde expansion)
/// 3. XDG data directory
/// 4. ~/.monlivre
pub fn resolve_workspace_path(explicit_path: Option<&str>) -> Result<PathBuf> {
    if let Some(path) = explicit_path {
        return Ok(expand_tilde(path));
    }

    if let Ok(env_path) = std::env::var("MONLIVRE_PATH") {
        return Ok(expand_tilde(&env_path));
    }

    if let Some(data_dir) = dirs::data_dir() {
        return Ok(data_dir.join("monlivre"));
    }

    if let Some(home) = std::env::var_os("HOME") {
        return Ok(PathBuf::from(home).join(".monlivre"));
    }

    Err(Error::Config(
        "Could not determine workspace path: no HOME directory or XDG data directory found"
            .to_string(),
    ))
}

/// Expand tilde (~) in paths to the user's home directory
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/")
        && let Some(home) = std::env::var_os("HOME")
    {
        return PathBuf::from(home).join(stripped);
    }
    PathBuf::from(path)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-request timeout; unset means the HTTP client default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

/// Who decides whether a renewal is granted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenewalMode {
    /// Ask the backend, apply locally only after it confirms
    #[default]
    Backend,
    /// Apply locally without any request
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanSettings {
    #[serde(default = "default_renewal_days")]
    pub renewal_days: i64,
    #[serde(default = "default_due_soon_days")]
    pub due_soon_days: i64,
    #[serde(default)]
    pub renewal_mode: RenewalMode,
    #[serde(default)]
    pub overdue_policy: OverduePolicy,
}

impl Default for LoanSettings {
    fn default() -> Self {
        Self {
            renewal_days: DEFAULT_RENEWAL_DAYS,
            due_soon_days: DEFAULT_DUE_SOON_DAYS,
            renewal_mode: RenewalMode::default(),
            overdue_policy: OverduePolicy::default(),
        }
    }
}

impl LoanSettings {
    pub fn renewal_policy(&self) -> RenewalPolicy {
        RenewalPolicy::new(self.renewal_days)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSettings {
    #[serde(default = "default_placeholder_cover")]
    pub placeholder_cover: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            placeholder_cover: default_placeholder_cover(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub loans: LoanSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn default_path() -> Result<PathBuf> {
        Ok(resolve_workspace_path(None)?.join("config.toml"))
    }

    pub fn validate(&self) -> Result<()> {
        if self.backend.base_url.trim().is_empty() {
            return Err(Error::Config("backend.base_url is empty".to_string()));
        }
        if self.loans.renewal_days <= 0 || self.loans.renewal_days > MAX_RENEWAL_DAYS {
            return Err(Error::Config(format!(
                "loans.renewal_days must be between 1 and {}, got {}",
                MAX_RENEWAL_DAYS, self.loans.renewal_days
            )));
        }
        if self.loans.due_soon_days < 0 {
            return Err(Error::Config(format!(
                "loans.due_soon_days cannot be negative, got {}",
                self.loans.due_soon_days
            )));
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_renewal_days() -> i64 {
    DEFAULT_RENEWAL_DAYS
}

fn default_due_soon_days() -> i64 {
    DEFAULT_DUE_SOON_DAYS
}

fn default_placeholder_cover() -> String {
    DEFAULT_PLACEHOLDER_COVER.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.backend.base_url, "http://localhost:5000");
        assert_eq!(config.loans.renewal_days, 30);
        assert_eq!(config.loans.due_soon_days, 3);
        assert_eq!(config.loans.renewal_mode, RenewalMode::Backend);
        assert_eq!(config.loans.overdue_policy, OverduePolicy::Backend);
        assert_eq!(config.catalog.placeholder_cover, "/placeholder.svg");
    }

    #[test]
    fn test_config_save_and_load() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");

        let mut config = Config::default();
        config.backend.base_url = "http://library.example:8080".to_string();
        config.backend.timeout_secs = Some(5);
        config.loans.renewal_mode = RenewalMode::Advisory;
        config.loans.overdue_policy = OverduePolicy::Derived;

        config.save_to(&config_path)?;
        assert!(config_path.exists());

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded, config);

        Ok(())
    }

    #[test]
    fn test_partial_file_fills_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[loans]\nrenewal_mode = \"advisory\"\n")?;

        let loaded = Config::load_from(&config_path)?;
        assert_eq!(loaded.loans.renewal_mode, RenewalMode::Advisory);
        assert_eq!(loaded.loans.renewal_days, 30);
        assert_eq!(loaded.backend.base_url, DEFAULT_BASE_URL);

        Ok(())
    }

    #[test]
    fn test_invalid_renewal_days_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[loans]\nrenewal_days = 0\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        Ok(())
    }

    #[test]
    fn test_oversized_renewal_days_rejected() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("config.toml");
        std::fs::write(&config_path, "[loans]\nrenewal_days = 10000000000\n")?;

        let err = Config::load_from(&config_path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));

        Ok(())
    }

    #[test]
    fn test_load_nonexistent_returns_default() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config_path = temp_dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path)?;
        assert_eq!(config, Config::default());

        Ok(())
    }

    #[test]
    fn test_explicit_path_wins() -> Result<()> {
        let path = resolve_workspace_path(Some("/tmp/monlivre-data"))?;
        assert_eq!(path, PathBuf::from("/tmp/monlivre-data"));
        Ok(())
    }
}
