use crate::path::{is_external_href, localize_href, with_locale_prefix};
use crate::registry::{Locale, Locales};

/// Structured link target, for callers that build URLs from parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlObject {
    pub pathname: Option<String>,
    /// Without the leading `?`.
    pub query: Option<String>,
    /// Without the leading `#`.
    pub hash: Option<String>,
}

impl UrlObject {
    pub fn path(pathname: impl Into<String>) -> Self {
        Self {
            pathname: Some(pathname.into()),
            ..Self::default()
        }
    }

    pub fn to_href(&self) -> String {
        let mut href = self.pathname.clone().unwrap_or_default();
        if let Some(query) = self.query.as_deref().filter(|q| !q.is_empty()) {
            href.push('?');
            href.push_str(query);
        }
        if let Some(hash) = self.hash.as_deref().filter(|h| !h.is_empty()) {
            href.push('#');
            href.push_str(hash);
        }
        href
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Href(String),
    Url(UrlObject),
}

impl From<&str> for LinkTarget {
    fn from(href: &str) -> Self {
        LinkTarget::Href(href.to_string())
    }
}

impl From<String> for LinkTarget {
    fn from(href: String) -> Self {
        LinkTarget::Href(href)
    }
}

impl From<UrlObject> for LinkTarget {
    fn from(url: UrlObject) -> Self {
        LinkTarget::Url(url)
    }
}

impl LinkTarget {
    pub fn to_href(&self) -> String {
        match self {
            LinkTarget::Href(href) => href.clone(),
            LinkTarget::Url(url) => url.to_href(),
        }
    }
}

/// Give a link target the locale prefix before it is rendered.
///
/// Only the path (or `pathname`) changes; query and fragment are kept.
/// External hrefs and objects without a `pathname` pass through.
pub fn localize_target(locales: &Locales, target: LinkTarget, locale: &Locale) -> LinkTarget {
    match target {
        LinkTarget::Href(href) => LinkTarget::Href(localize_href(locales, &href, locale.as_str())),
        LinkTarget::Url(mut url) => {
            if let Some(pathname) = url.pathname.take() {
                url.pathname = Some(if is_external_href(&pathname) {
                    pathname
                } else {
                    with_locale_prefix(locales, &pathname, locale.as_str())
                });
            }
            LinkTarget::Url(url)
        }
    }
}

/// An anchor whose href already carries the active locale.
#[derive(Debug, Clone)]
pub struct LocalizedLink {
    href: String,
    class: Option<String>,
    attrs: Vec<(String, String)>,
}

impl LocalizedLink {
    pub fn new(locales: &Locales, target: impl Into<LinkTarget>, locale: &Locale) -> Self {
        Self {
            href: localize_target(locales, target.into(), locale).to_href(),
            class: None,
            attrs: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.push((name.into(), value.into()));
        self
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    /// Render as `<a>`; `label` is escaped.
    pub fn render(&self, label: &str) -> String {
        let mut html = format!(r#"<a href="{}""#, html_escape(&self.href));
        if let Some(class) = &self.class {
            html.push_str(&format!(r#" class="{}""#, html_escape(class)));
        }
        for (name, value) in &self.attrs {
            html.push_str(&format!(r#" {}="{}""#, name, html_escape(value)));
        }
        html.push('>');
        html.push_str(&html_escape(label));
        html.push_str("</a>");
        html
    }
}

pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en() -> (Locales, Locale) {
        let locales = Locales::default();
        let en = locales.parse("en").unwrap();
        (locales, en)
    }

    #[test]
    fn string_targets_are_prefixed() {
        let (locales, en) = en();
        assert_eq!(
            localize_target(&locales, "/stories".into(), &en),
            LinkTarget::Href("/en/stories".to_string())
        );
        assert_eq!(
            localize_target(&locales, "/zh-CN/stories".into(), &en),
            LinkTarget::Href("/zh-CN/stories".to_string())
        );
    }

    #[test]
    fn object_targets_localize_pathname_only() {
        let (locales, en) = en();
        let target = UrlObject {
            pathname: Some("/countries".to_string()),
            query: Some("region=asia".to_string()),
            hash: None,
        };
        let localized = localize_target(&locales, target.into(), &en);
        assert_eq!(localized.to_href(), "/en/countries?region=asia");
    }

    #[test]
    fn object_without_pathname_passes_through() {
        let (locales, en) = en();
        let target = UrlObject {
            pathname: None,
            query: Some("page=2".to_string()),
            hash: None,
        };
        assert_eq!(
            localize_target(&locales, target.clone().into(), &en),
            LinkTarget::Url(target)
        );
    }

    #[test]
    fn external_targets_pass_through() {
        let (locales, en) = en();
        assert_eq!(
            localize_target(&locales, "https://museum.example/tickets".into(), &en),
            LinkTarget::Href("https://museum.example/tickets".to_string())
        );
        assert_eq!(
            localize_target(&locales, UrlObject::path("mailto:hi@museum.example").into(), &en)
                .to_href(),
            "mailto:hi@museum.example"
        );
    }

    #[test]
    fn renders_escaped_anchor() {
        let (locales, en) = en();
        let html = LocalizedLink::new(&locales, "/stories/jade", &en)
            .class("card-link")
            .attr("data-no-transition", "")
            .render("Jade & Bronze");
        assert_eq!(
            html,
            r#"<a href="/en/stories/jade" class="card-link" data-no-transition="">Jade &amp; Bronze</a>"#
        );
    }
}
