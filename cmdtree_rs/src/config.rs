//! Configuration file support for cmdtree.
//!
//! Everything is optional; an absent file means built-in defaults.
//!
//! ```toml
//! display_name = "/eco"
//! help_command = "help"
//!
//! [messages]
//! permission_denied = "Missing permission: {permission}"
//!
//! [locales.pl]
//! not_enough_arguments = "Za mało argumentów."
//!
//! [shell]
//! principal = "steve"
//! permissions = ["economy.pay"]
//! interactive = true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::warn;

use crate::lang::{CatalogLang, LocaleLangProvider};

pub const DEFAULT_DISPLAY_NAME: &str = "/cmd";
pub const DEFAULT_HELP_COMMAND: &str = "help";

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    /// Name printed in front of every usage line and help entry.
    pub display_name: String,
    /// Command suggested when nothing resolves (`"<display_name> <help_command>"`).
    pub help_command: String,
    /// Message template overrides for every principal.
    pub messages: BTreeMap<String, String>,
    /// Per-locale templates, layered over `messages`.
    pub locales: BTreeMap<String, BTreeMap<String, String>>,
    pub shell: ShellConfig,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            display_name: DEFAULT_DISPLAY_NAME.to_string(),
            help_command: DEFAULT_HELP_COMMAND.to_string(),
            messages: BTreeMap::new(),
            locales: BTreeMap::new(),
            shell: ShellConfig::default(),
        }
    }
}

/// Settings of the demo shell's principal and logging.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub principal: String,
    pub permissions: Vec<String>,
    pub interactive: bool,
    pub locale: Option<String>,
    /// Log filter used when `RUST_LOG` is unset, e.g. `"debug"`.
    pub log_level: Option<String>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            principal: "console".to_string(),
            permissions: Vec::new(),
            interactive: false,
            locale: None,
            log_level: None,
        }
    }
}

impl DispatcherConfig {
    /// Load config from a specific path.
    /// Returns default config if the file doesn't exist or is invalid.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_toml_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Strict parse, for callers that want to report the error themselves.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Message provider described by `[messages]` and `[locales.*]`.
    pub fn lang_provider(&self) -> LocaleLangProvider {
        let base = CatalogLang::from_templates(self.messages.clone());
        let mut provider = LocaleLangProvider::new(base);
        for (tag, overrides) in &self.locales {
            let mut merged = self.messages.clone();
            merged.extend(overrides.clone());
            provider = provider.with_locale(tag, CatalogLang::from_templates(merged));
        }
        provider
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::LangProvider;
    use crate::principal::Principal;
    use std::io::Write;
    use tempfile::TempDir;

    struct Localized(&'static str);

    impl Principal for Localized {
        fn name(&self) -> &str {
            "localized"
        }
        fn has_permission(&self, _permission: &str) -> bool {
            true
        }
        fn locale(&self) -> Option<&str> {
            Some(self.0)
        }
        fn send_message(&self, _message: &str) {}
    }

    #[test]
    fn test_default_config() {
        let config = DispatcherConfig::default();
        assert_eq!(config.display_name, "/cmd");
        assert_eq!(config.help_command, "help");
        assert!(config.messages.is_empty());
        assert_eq!(config.shell.principal, "console");
        assert!(!config.shell.interactive);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = TempDir::new().expect("temp dir");
        let config = DispatcherConfig::load_from_path(&temp.path().join("cmdtree.toml"));
        assert_eq!(config.display_name, "/cmd");
    }

    #[test]
    fn test_load_valid_config() {
        let temp = TempDir::new().expect("temp dir");
        let config_path = temp.path().join("cmdtree.toml");
        let mut file = std::fs::File::create(&config_path).expect("create config");
        writeln!(
            file,
            r#"
display_name = "/eco"

[messages]
usage = "Try: {{usage}}"

[locales.pl]
not_enough_arguments = "Za mało argumentów."

[shell]
principal = "steve"
permissions = ["economy.pay", "economy.balance"]
interactive = true
"#
        )
        .expect("write config");

        let config = DispatcherConfig::load_from_path(&config_path);
        assert_eq!(config.display_name, "/eco");
        assert_eq!(config.help_command, "help");
        assert_eq!(config.shell.principal, "steve");
        assert_eq!(config.shell.permissions.len(), 2);
        assert!(config.shell.interactive);

        let provider = config.lang_provider();
        let pl = provider.lang_for(&Localized("pl"));
        assert_eq!(pl.not_enough_arguments(), "Za mało argumentów.");
        assert_eq!(pl.usage("/eco x"), "Try: /eco x");
        let en = provider.lang_for(&Localized("en"));
        assert_eq!(en.not_enough_arguments(), "Not enough arguments.");
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let temp = TempDir::new().expect("temp dir");
        let config_path = temp.path().join("cmdtree.toml");
        std::fs::write(&config_path, "display_name = [not toml").expect("write config");

        let config = DispatcherConfig::load_from_path(&config_path);
        assert_eq!(config.display_name, "/cmd");
        assert!(DispatcherConfig::from_toml_str("display_name = [not toml").is_err());
    }

    #[test]
    fn test_load_empty_config() {
        let temp = TempDir::new().expect("temp dir");
        let config_path = temp.path().join("cmdtree.toml");
        std::fs::File::create(&config_path).expect("create empty config");

        let config = DispatcherConfig::load_from_path(&config_path);
        assert_eq!(config.display_name, "/cmd");
        assert!(config.locales.is_empty());
    }
}
