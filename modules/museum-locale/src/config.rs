use serde::Deserialize;

use crate::error::LocaleError;
use crate::registry::{Locales, DEFAULT_LOCALE, LOCALE_COOKIE, SUPPORTED_LOCALES};

/// Header the request boundary uses to forward the resolved locale.
pub const DEFAULT_LOCALE_HEADER: &str = "x-museum-locale";

/// `[locales]` table of the site config.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocalesConfig {
    pub supported: Vec<String>,
    pub default: String,
    pub cookie_name: String,
}

impl Default for LocalesConfig {
    fn default() -> Self {
        Self {
            supported: SUPPORTED_LOCALES.iter().map(|s| s.to_string()).collect(),
            default: DEFAULT_LOCALE.to_string(),
            cookie_name: LOCALE_COOKIE.to_string(),
        }
    }
}

impl LocalesConfig {
    pub fn build(&self) -> Result<Locales, LocaleError> {
        Locales::new(
            self.supported.clone(),
            self.default.clone(),
            self.cookie_name.clone(),
        )
    }
}

/// `[routing]` table: which paths skip the locale boundary and how the
/// resolved locale is forwarded.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RoutingConfig {
    /// Framework-internal asset prefix (scripts, styles, fonts).
    pub asset_prefix: String,
    pub api_prefix: String,
    /// CMS studio, served untranslated.
    pub studio_prefix: String,
    /// Exact paths served as-is (favicon, robots, sitemap).
    pub bypass_files: Vec<String>,
    pub locale_header: String,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            asset_prefix: "/_assets".to_string(),
            api_prefix: "/api".to_string(),
            studio_prefix: "/studio".to_string(),
            bypass_files: vec![
                "/favicon.ico".to_string(),
                "/robots.txt".to_string(),
                "/sitemap.xml".to_string(),
            ],
            locale_header: DEFAULT_LOCALE_HEADER.to_string(),
        }
    }
}

impl RoutingConfig {
    pub fn bypass_prefixes(&self) -> [&str; 3] {
        [
            self.asset_prefix.as_str(),
            self.api_prefix.as_str(),
            self.studio_prefix.as_str(),
        ]
    }
}
