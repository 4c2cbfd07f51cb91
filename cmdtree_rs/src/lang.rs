//! User-facing message text.
//!
//! The dispatcher never formats diagnostics itself. It asks a
//! [`LangProvider`] for the [`CommandLang`] of the principal at hand and lets
//! that produce every string. Two implementations ship with the crate:
//!
//! - [`DefaultLang`]: built-in English
//! - [`CatalogLang`]: templates with `{placeholder}` substitution, typically
//!   loaded from the `[messages]` / `[locales.*]` config tables; keys it does
//!   not define fall back to English
//!
//! Placeholders: `{label}`, `{raw}`, `{usage}`, `{permission}`, `{candidate}`.

use std::collections::HashMap;

use tracing::warn;

use crate::principal::{PermissionSpec, Principal};

/// Message catalog for one language.
pub trait CommandLang: Send + Sync {
    fn not_enough_arguments(&self) -> String;
    fn too_many_arguments(&self) -> String;
    fn unknown_argument(&self, label: &str) -> String;
    fn invalid_number(&self, raw: &str) -> String;
    fn invalid_argument(&self, raw: &str) -> String;
    fn wrong_principal_context(&self) -> String;
    /// Prefix a usage line, e.g. `"Usage: /cmd pay <player>"`.
    fn usage(&self, usage: &str) -> String;
    fn permission_denied(&self, permission: &PermissionSpec) -> String;
    /// Generic text for handler faults that carry no user-facing message.
    fn command_failed(&self) -> String;
    fn suggestion(&self, candidate: &str) -> String;
}

/// Message ids understood by [`CatalogLang`].
pub const MESSAGE_KEYS: &[&str] = &[
    "not_enough_arguments",
    "too_many_arguments",
    "unknown_argument",
    "invalid_number",
    "invalid_argument",
    "wrong_principal_context",
    "usage",
    "permission_denied",
    "command_failed",
    "suggestion",
];

const CATALOG_EN: &[(&str, &str)] = &[
    ("not_enough_arguments", "Not enough arguments."),
    ("too_many_arguments", "Too many arguments."),
    ("unknown_argument", "Unknown argument: {label}"),
    ("invalid_number", "Number expected, but \"{raw}\" found."),
    ("invalid_argument", "Invalid argument: '{raw}'"),
    (
        "wrong_principal_context",
        "This command can only be run by an interactive user.",
    ),
    ("usage", "Usage: {usage}"),
    ("permission_denied", "You don't have permission for this."),
    (
        "command_failed",
        "An internal error occurred while running this command.",
    ),
    ("suggestion", "Did you mean '{candidate}'?"),
];

fn english(key: &str) -> &'static str {
    CATALOG_EN
        .iter()
        .find(|(k, _)| *k == key)
        .map_or("", |(_, v)| *v)
}

fn fill(template: &str, args: &[(&str, &str)]) -> String {
    let mut result = template.to_string();
    for (key, value) in args {
        result = result.replace(&format!("{{{key}}}"), value);
    }
    result
}

/// Built-in English messages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLang;

impl DefaultLang {
    fn render(&self, key: &str, args: &[(&str, &str)]) -> String {
        fill(english(key), args)
    }
}

/// Template catalog with English fallback.
#[derive(Debug, Clone, Default)]
pub struct CatalogLang {
    templates: HashMap<String, String>,
}

impl CatalogLang {
    /// Build from `key -> template` pairs. Unknown keys are ignored with a warning.
    pub fn from_templates<I, K, V>(templates: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = HashMap::new();
        for (key, value) in templates {
            let key = key.into();
            if !MESSAGE_KEYS.contains(&key.as_str()) {
                warn!(key = %key, "ignoring unknown message key");
                continue;
            }
            map.insert(key, value.into());
        }
        Self { templates: map }
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    fn render(&self, key: &str, args: &[(&str, &str)]) -> String {
        let template = self
            .templates
            .get(key)
            .map_or_else(|| english(key), String::as_str);
        fill(template, args)
    }
}

macro_rules! impl_command_lang {
    ($ty:ty) => {
        impl CommandLang for $ty {
            fn not_enough_arguments(&self) -> String {
                self.render("not_enough_arguments", &[])
            }
            fn too_many_arguments(&self) -> String {
                self.render("too_many_arguments", &[])
            }
            fn unknown_argument(&self, label: &str) -> String {
                self.render("unknown_argument", &[("label", label)])
            }
            fn invalid_number(&self, raw: &str) -> String {
                self.render("invalid_number", &[("raw", raw)])
            }
            fn invalid_argument(&self, raw: &str) -> String {
                self.render("invalid_argument", &[("raw", raw)])
            }
            fn wrong_principal_context(&self) -> String {
                self.render("wrong_principal_context", &[])
            }
            fn usage(&self, usage: &str) -> String {
                self.render("usage", &[("usage", usage)])
            }
            fn permission_denied(&self, permission: &PermissionSpec) -> String {
                let permission = permission.to_string();
                self.render("permission_denied", &[("permission", permission.as_str())])
            }
            fn command_failed(&self) -> String {
                self.render("command_failed", &[])
            }
            fn suggestion(&self, candidate: &str) -> String {
                self.render("suggestion", &[("candidate", candidate)])
            }
        }
    };
}

impl_command_lang!(DefaultLang);
impl_command_lang!(CatalogLang);

/// Chooses the language used for a given principal.
pub trait LangProvider: Send + Sync {
    fn default_lang(&self) -> &dyn CommandLang;

    fn lang_for(&self, _principal: &dyn Principal) -> &dyn CommandLang {
        self.default_lang()
    }
}

/// Same language for every principal.
pub struct SimpleLangProvider {
    lang: Box<dyn CommandLang>,
}

impl SimpleLangProvider {
    pub fn new(lang: impl CommandLang + 'static) -> Self {
        Self {
            lang: Box::new(lang),
        }
    }
}

impl Default for SimpleLangProvider {
    fn default() -> Self {
        Self::new(DefaultLang)
    }
}

impl LangProvider for SimpleLangProvider {
    fn default_lang(&self) -> &dyn CommandLang {
        self.lang.as_ref()
    }
}

/// Picks a language by [`Principal::locale`].
///
/// Tags are matched case-insensitively, full tag first (`pt-br`), then the
/// primary subtag (`pt`), then the default language.
pub struct LocaleLangProvider {
    default: Box<dyn CommandLang>,
    by_locale: HashMap<String, Box<dyn CommandLang>>,
}

fn normalize_locale(tag: &str) -> String {
    tag.trim().to_ascii_lowercase().replace('_', "-")
}

impl LocaleLangProvider {
    pub fn new(default: impl CommandLang + 'static) -> Self {
        Self {
            default: Box::new(default),
            by_locale: HashMap::new(),
        }
    }

    pub fn with_locale(mut self, tag: &str, lang: impl CommandLang + 'static) -> Self {
        self.by_locale.insert(normalize_locale(tag), Box::new(lang));
        self
    }

    fn find(&self, tag: &str) -> Option<&dyn CommandLang> {
        let tag = normalize_locale(tag);
        if let Some(lang) = self.by_locale.get(&tag) {
            return Some(lang.as_ref());
        }
        let primary = tag.split('-').next().unwrap_or_default();
        self.by_locale.get(primary).map(|lang| lang.as_ref())
    }
}

impl LangProvider for LocaleLangProvider {
    fn default_lang(&self) -> &dyn CommandLang {
        self.default.as_ref()
    }

    fn lang_for(&self, principal: &dyn Principal) -> &dyn CommandLang {
        principal
            .locale()
            .and_then(|tag| self.find(tag))
            .unwrap_or_else(|| self.default.as_ref())
    }
}
