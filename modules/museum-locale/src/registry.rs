use std::fmt;

use crate::error::LocaleError;

/// Locales the site ships with, in display order.
pub const SUPPORTED_LOCALES: &[&str] = &["zh-CN", "en"];

/// Locale used when neither the path nor the preference cookie names one.
pub const DEFAULT_LOCALE: &str = "zh-CN";

/// Cookie that persists the visitor's last resolved locale.
pub const LOCALE_COOKIE: &str = "NEXT_LOCALE";

/// True iff `value` exactly matches one of the built-in supported tags.
pub fn is_valid_locale(value: Option<&str>) -> bool {
    value.is_some_and(|v| SUPPORTED_LOCALES.contains(&v))
}

/// A locale tag that is known to belong to a [`Locales`] registry.
///
/// Only the registry hands these out, so anything accepting a `Locale`
/// never has to re-check membership.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Locale(String);

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Locale {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The fixed set of supported locales, the default, and the preference cookie name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locales {
    supported: Vec<String>,
    default: String,
    cookie_name: String,
}

impl Default for Locales {
    fn default() -> Self {
        Self {
            supported: SUPPORTED_LOCALES.iter().map(|s| s.to_string()).collect(),
            default: DEFAULT_LOCALE.to_string(),
            cookie_name: LOCALE_COOKIE.to_string(),
        }
    }
}

impl Locales {
    /// Build a registry, rejecting empty sets, duplicates, malformed tags,
    /// and a default that is not a member.
    pub fn new(
        supported: Vec<String>,
        default: impl Into<String>,
        cookie_name: impl Into<String>,
    ) -> Result<Self, LocaleError> {
        let default = default.into();
        let cookie_name = cookie_name.into();

        if supported.is_empty() {
            return Err(LocaleError::EmptyLocaleSet);
        }

        for (i, tag) in supported.iter().enumerate() {
            if !is_well_formed_tag(tag) {
                return Err(LocaleError::InvalidTag(tag.clone()));
            }
            if supported[..i].contains(tag) {
                return Err(LocaleError::DuplicateLocale(tag.clone()));
            }
        }

        if !supported.contains(&default) {
            return Err(LocaleError::DefaultNotSupported(default));
        }

        if cookie_name.is_empty() || cookie_name.contains(['=', ';', ' ']) {
            return Err(LocaleError::Config(format!(
                "invalid locale cookie name {cookie_name:?}"
            )));
        }

        Ok(Self {
            supported,
            default,
            cookie_name,
        })
    }

    /// Supported tags in configured order.
    pub fn supported(&self) -> impl Iterator<Item = &str> {
        self.supported.iter().map(String::as_str)
    }

    pub fn default_tag(&self) -> &str {
        &self.default
    }

    pub fn default_locale(&self) -> Locale {
        Locale(self.default.clone())
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// True iff `value` is present and exactly matches a supported tag.
    pub fn is_valid_locale(&self, value: Option<&str>) -> bool {
        value.is_some_and(|v| self.supported.iter().any(|s| s == v))
    }

    /// Look up a tag, returning `None` for anything unsupported.
    pub fn get(&self, tag: &str) -> Option<Locale> {
        self.is_valid_locale(Some(tag))
            .then(|| Locale(tag.to_string()))
    }

    /// Checked lookup for callers that want an error instead of a fallback.
    pub fn parse(&self, tag: &str) -> Result<Locale, LocaleError> {
        self.get(tag)
            .ok_or_else(|| LocaleError::UnsupportedLocale(tag.to_string()))
    }

    /// Precedence: path segment, then preference cookie, then default.
    /// Invalid candidates are treated as absent.
    pub fn resolve(&self, path_locale: Option<&str>, cookie_locale: Option<&str>) -> Locale {
        path_locale
            .and_then(|tag| self.get(tag))
            .or_else(|| cookie_locale.and_then(|tag| self.get(tag)))
            .unwrap_or_else(|| self.default_locale())
    }
}

fn is_well_formed_tag(tag: &str) -> bool {
    !tag.is_empty()
        && !tag
            .chars()
            .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '.' | ';' | '='))
}
