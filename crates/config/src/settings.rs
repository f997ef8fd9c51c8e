// Application settings
// Loaded from ~/.config/billsync/config.json

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable holding the Legistar API token.
pub const LEGISTAR_TOKEN_ENV: &str = "LEGISTAR_API_TOKEN";

/// Environment variable holding the Sheets access token.
pub const SHEETS_TOKEN_ENV: &str = "SHEETS_ACCESS_TOKEN";

#[derive(Debug)]
pub enum SettingsError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for SettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsError::Io(msg) => write!(f, "settings read error: {msg}"),
            SettingsError::Parse(msg) => write!(f, "settings parse error: {msg}"),
        }
    }
}

impl std::error::Error for SettingsError {}

/// Persistent settings for the sync pipeline.
///
/// Every field has a default so a partial (or absent) config file still
/// loads; the CLI layers flag overrides on top.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Spreadsheet to reconcile.
    pub spreadsheet_id: String,

    /// Session year; selects the "Introductions {year}" tab.
    pub year: String,

    /// Co-sponsors needed before a matter has sufficient support.
    pub quorum_threshold: usize,

    /// Legistar endpoint override (testing / other bodies).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub legistar_base: Option<String>,

    /// Sheets endpoint override (testing).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sheets_base: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            spreadsheet_id: String::new(),
            year: String::new(),
            quorum_threshold: 26,
            legistar_base: None,
            sheets_base: None,
        }
    }
}

impl Settings {
    /// Default config file location: `~/.config/billsync/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("billsync").join("config.json"))
    }

    /// Load settings from a file. A missing file yields defaults; a
    /// malformed file is an error (silent fallback would mask typos).
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .map_err(|e| SettingsError::Io(format!("{}: {}", path.display(), e)))?;
        serde_json::from_str(&raw)
            .map_err(|e| SettingsError::Parse(format!("{}: {}", path.display(), e)))
    }
}

/// Resolve a credential: explicit flag wins, then the environment. Blank
/// values count as absent.
pub fn resolve_token(flag: Option<&str>, env_var: &str) -> Option<String> {
    if let Some(value) = flag {
        let value = value.trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }
    std::env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(settings.quorum_threshold, 26);
        assert!(settings.spreadsheet_id.is_empty());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{ "spreadsheet_id": "abc123", "year": "2024" }"#).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.spreadsheet_id, "abc123");
        assert_eq!(settings.year, "2024");
        assert_eq!(settings.quorum_threshold, 26);
        assert_eq!(settings.legistar_base, None);
    }

    #[test]
    fn test_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(Settings::load(&path), Err(SettingsError::Parse(_))));
    }

    #[test]
    fn test_resolve_token_flag_wins() {
        std::env::set_var("BILLSYNC_TEST_TOKEN_A", "env-tok");
        assert_eq!(
            resolve_token(Some(" flag-tok "), "BILLSYNC_TEST_TOKEN_A").as_deref(),
            Some("flag-tok")
        );
        std::env::remove_var("BILLSYNC_TEST_TOKEN_A");
    }

    #[test]
    fn test_resolve_token_env_fallback() {
        std::env::set_var("BILLSYNC_TEST_TOKEN_B", "env-tok");
        assert_eq!(
            resolve_token(None, "BILLSYNC_TEST_TOKEN_B").as_deref(),
            Some("env-tok")
        );
        std::env::remove_var("BILLSYNC_TEST_TOKEN_B");
    }

    #[test]
    fn test_resolve_token_blank_is_absent() {
        assert_eq!(resolve_token(Some("   "), "BILLSYNC_TEST_TOKEN_C"), None);
    }
}
