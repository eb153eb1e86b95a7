//! Pure helpers that detect, strip, and inject the locale segment of a path.
//!
//! A localized path carries its locale as the first segment: `/en/stories/x`.
//! None of these functions fail; malformed input is normalized instead.

use crate::registry::{Locale, Locales};

const EXTERNAL_PREFIXES: &[&str] = &["http:", "https:", "mailto:", "tel:", "#"];

/// Give a path its leading slash. Empty input becomes `/`.
pub fn normalize(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

/// Absolute-scheme links and same-page fragments are never localized.
pub fn is_external_href(path: &str) -> bool {
    EXTERNAL_PREFIXES.iter().any(|p| path.starts_with(p))
}

/// The supported locale whose prefix `path` carries, if any.
fn matching_prefix<'a>(locales: &'a Locales, normalized: &str) -> Option<&'a str> {
    locales.supported().find(|tag| {
        normalized
            .strip_prefix('/')
            .and_then(|rest| rest.strip_prefix(tag))
            .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
    })
}

/// True iff the normalized path is `/<locale>` or starts with `/<locale>/`.
pub fn has_locale_prefix(locales: &Locales, path: &str) -> bool {
    matching_prefix(locales, &normalize(path)).is_some()
}

/// The locale named by the first path segment, if it is supported.
pub fn locale_segment(locales: &Locales, path: &str) -> Option<Locale> {
    matching_prefix(locales, &normalize(path)).and_then(|tag| locales.get(tag))
}

/// Remove the locale prefix, leaving `/` when nothing remains.
///
/// Repeated prefixes (`/en/en/x`) are all removed so that the result never
/// carries a locale segment.
pub fn strip_locale_prefix(locales: &Locales, path: &str) -> String {
    let mut current = normalize(path);
    while let Some(tag) = matching_prefix(locales, &current) {
        let rest = &current[tag.len() + 1..];
        current = if rest.is_empty() {
            "/".to_string()
        } else {
            rest.to_string()
        };
    }
    current
}

/// Prefix `path` with `/<locale>` unless it is external or already localized.
///
/// `locale` is used verbatim; pass a tag obtained from the registry.
pub fn with_locale_prefix(locales: &Locales, path: &str, locale: &str) -> String {
    if path.is_empty() {
        return format!("/{locale}");
    }
    if is_external_href(path) {
        return path.to_string();
    }

    let normalized = normalize(path);
    if has_locale_prefix(locales, &normalized) {
        return normalized;
    }
    if normalized == "/" {
        format!("/{locale}")
    } else {
        format!("/{locale}{normalized}")
    }
}

/// Move `path` to another locale, replacing whatever prefix it had.
pub fn switch_locale(locales: &Locales, path: &str, locale: &Locale) -> String {
    let bare = strip_locale_prefix(locales, path);
    with_locale_prefix(locales, &bare, locale.as_str())
}

/// One localized variant of `path` per supported locale, in registry order.
pub fn alternate_paths(locales: &Locales, path: &str) -> Vec<(Locale, String)> {
    let bare = strip_locale_prefix(locales, path);
    locales
        .supported()
        .filter_map(|tag| locales.get(tag))
        .map(|locale| {
            let href = with_locale_prefix(locales, &bare, locale.as_str());
            (locale, href)
        })
        .collect()
}

/// An href split into its path, `?query`, and `#fragment` parts.
///
/// `query` and `fragment` keep their leading delimiter so that
/// concatenating the three parts reproduces the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HrefParts<'a> {
    pub path: &'a str,
    pub query: &'a str,
    pub fragment: &'a str,
}

pub fn split_href(href: &str) -> HrefParts<'_> {
    let (before_hash, fragment) = match href.find('#') {
        Some(i) => href.split_at(i),
        None => (href, ""),
    };
    let (path, query) = match before_hash.find('?') {
        Some(i) => before_hash.split_at(i),
        None => (before_hash, ""),
    };
    HrefParts {
        path,
        query,
        fragment,
    }
}

/// Localize the path part of an href, keeping its query and fragment.
///
/// Query-only hrefs (`?page=2`) are relative to the current document and
/// are left alone, as are external hrefs.
pub fn localize_href(locales: &Locales, href: &str, locale: &str) -> String {
    if is_external_href(href) {
        return href.to_string();
    }
    let parts = split_href(href);
    if parts.path.is_empty() && !(parts.query.is_empty() && parts.fragment.is_empty()) {
        return href.to_string();
    }
    let path = with_locale_prefix(locales, parts.path, locale);
    format!("{path}{}{}", parts.query, parts.fragment)
}
