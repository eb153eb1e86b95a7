use crate::registry::{Locale, Locales};

/// One year, in seconds.
pub const PREFERENCE_MAX_AGE_SECS: u64 = 365 * 24 * 3600;

/// Read the locale preference from a raw `Cookie` header.
/// Unsupported or missing values come back as `None`.
pub fn preference_from_cookie_header(header: Option<&str>, locales: &Locales) -> Option<Locale> {
    let value = parse_cookie(header?, locales.cookie_name())?;
    locales.get(value.trim_matches('"'))
}

/// `Set-Cookie` value persisting `locale` for the whole site.
pub fn preference_set_cookie(locale: &Locale, locales: &Locales) -> String {
    format!(
        "{}={}; Path=/; Max-Age={PREFERENCE_MAX_AGE_SECS}; SameSite=Lax",
        locales.cookie_name(),
        locale
    )
}

/// Parse a specific cookie from the Cookie header string.
pub fn parse_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix(name)?.strip_prefix('='))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cookie_works() {
        assert_eq!(parse_cookie("NEXT_LOCALE=en; other=xyz", "NEXT_LOCALE"), Some("en"));
        assert_eq!(parse_cookie("other=xyz; NEXT_LOCALE=zh-CN", "NEXT_LOCALE"), Some("zh-CN"));
        assert_eq!(parse_cookie("NEXT_LOCALE_OLD=en", "NEXT_LOCALE"), None);
        assert_eq!(parse_cookie("other=xyz", "NEXT_LOCALE"), None);
    }

    #[test]
    fn unsupported_preference_is_absent() {
        let locales = Locales::default();
        assert_eq!(
            preference_from_cookie_header(Some("NEXT_LOCALE=fr"), &locales),
            None
        );
        assert_eq!(preference_from_cookie_header(None, &locales), None);
        assert_eq!(
            preference_from_cookie_header(Some("NEXT_LOCALE=en"), &locales).map(|l| l.to_string()),
            Some("en".to_string())
        );
    }

    #[test]
    fn set_cookie_carries_scope_and_lifetime() {
        let locales = Locales::default();
        let en = locales.parse("en").unwrap();
        assert_eq!(
            preference_set_cookie(&en, &locales),
            "NEXT_LOCALE=en; Path=/; Max-Age=31536000; SameSite=Lax"
        );
    }
}
