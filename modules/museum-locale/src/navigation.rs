//! In-page navigation interception.
//!
//! One delegated click handler decides whether an anchor click should become
//! a client-side route push, localizes the destination, and wraps the push in
//! a view transition when the host supports one. Ineligible clicks are left
//! to the browser.
//!
//! The host (document, router, transition API) is reached through traits so
//! the same logic drives a browser binding or a test double.

use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, warn};
use url::Url;

use crate::cookie::preference_from_cookie_header;
use crate::error::LocaleError;
use crate::path::{has_locale_prefix, locale_segment, with_locale_prefix};
use crate::registry::{Locale, Locales};

/// Root attribute present while the interceptor is mounted.
pub const TRANSITION_MARKER: &str = "data-view-transitions";

/// Anchors carrying this attribute are never intercepted.
pub const OPT_OUT_ATTR: &str = "data-no-transition";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Vec::new(),
        }
    }

    pub fn anchor(href: impl Into<String>) -> Self {
        Self::new("a").with_attr("href", href)
    }

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.attr(name).is_some()
    }

    fn is_anchor(&self) -> bool {
        self.tag.eq_ignore_ascii_case("a")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub fn any(&self) -> bool {
        self.ctrl || self.meta || self.shift || self.alt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Auxiliary,
    Secondary,
    Other(u16),
}

#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub button: MouseButton,
    pub modifiers: Modifiers,
    /// Composed path: the click target first, then its ancestors.
    pub path: Vec<Element>,
    default_prevented: bool,
}

impl ClickEvent {
    pub fn new(button: MouseButton, modifiers: Modifiers, path: Vec<Element>) -> Self {
        Self {
            button,
            modifiers,
            path,
            default_prevented: false,
        }
    }

    /// Plain left click on `path[0]`.
    pub fn primary(path: Vec<Element>) -> Self {
        Self::new(MouseButton::Primary, Modifiers::default(), path)
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Why a click was left to the browser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    DefaultPrevented,
    NonPrimaryButton,
    ModifierKey,
    NoAnchor,
    ForeignTarget,
    Download,
    OptedOut,
    ExternalRel,
    InvalidHref,
    CrossOrigin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionMode {
    Animated,
    Direct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    Ignored(SkipReason),
    /// Destination equals the current location; nothing pushed.
    AlreadyHere,
    Navigated { href: String, mode: TransitionMode },
}

#[derive(Debug, Error)]
#[error("view transition failed: {0}")]
pub struct TransitionError(pub String);

/// Client-side router.
pub trait Router {
    fn push(&self, href: &str);
}

/// Host view-transition capability.
///
/// `start` must invoke `update` to perform the DOM change. An `Err` returned
/// after `update` has run does not undo the navigation.
pub trait ViewTransition {
    fn start(&self, update: &mut dyn FnMut()) -> Result<(), TransitionError>;
}

pub trait DocumentHost {
    /// Absolute URL of the current page.
    fn location(&self) -> Url;
    fn cookie_header(&self) -> Option<String>;
    fn root_attribute(&self, name: &str) -> Option<String>;
    fn set_root_attribute(&self, name: &str, value: &str);
    fn remove_root_attribute(&self, name: &str);
    /// Register the delegated click listener on the document.
    fn add_click_listener(&self);
    fn remove_click_listener(&self);
}

impl<T: ViewTransition + ?Sized> ViewTransition for Rc<T> {
    fn start(&self, update: &mut dyn FnMut()) -> Result<(), TransitionError> {
        (**self).start(update)
    }
}

impl<T: Router + ?Sized> Router for &T {
    fn push(&self, href: &str) {
        (**self).push(href)
    }
}

impl<T: Router + ?Sized> Router for Rc<T> {
    fn push(&self, href: &str) {
        (**self).push(href)
    }
}

impl<T: DocumentHost + ?Sized> DocumentHost for &T {
    fn location(&self) -> Url {
        (**self).location()
    }
    fn cookie_header(&self) -> Option<String> {
        (**self).cookie_header()
    }
    fn root_attribute(&self, name: &str) -> Option<String> {
        (**self).root_attribute(name)
    }
    fn set_root_attribute(&self, name: &str, value: &str) {
        (**self).set_root_attribute(name, value)
    }
    fn remove_root_attribute(&self, name: &str) {
        (**self).remove_root_attribute(name)
    }
    fn add_click_listener(&self) {
        (**self).add_click_listener()
    }
    fn remove_click_listener(&self) {
        (**self).remove_click_listener()
    }
}

impl<T: DocumentHost + ?Sized> DocumentHost for Rc<T> {
    fn location(&self) -> Url {
        (**self).location()
    }
    fn cookie_header(&self) -> Option<String> {
        (**self).cookie_header()
    }
    fn root_attribute(&self, name: &str) -> Option<String> {
        (**self).root_attribute(name)
    }
    fn set_root_attribute(&self, name: &str, value: &str) {
        (**self).set_root_attribute(name, value)
    }
    fn remove_root_attribute(&self, name: &str) {
        (**self).remove_root_attribute(name)
    }
    fn add_click_listener(&self) {
        (**self).add_click_listener()
    }
    fn remove_click_listener(&self) {
        (**self).remove_click_listener()
    }
}

/// Check every eligibility rule and resolve the anchor against `current`.
pub fn eligible_destination(event: &ClickEvent, current: &Url) -> Result<Url, SkipReason> {
    if event.default_prevented() {
        return Err(SkipReason::DefaultPrevented);
    }
    if event.button != MouseButton::Primary {
        return Err(SkipReason::NonPrimaryButton);
    }
    if event.modifiers.any() {
        return Err(SkipReason::ModifierKey);
    }

    let anchor = event
        .path
        .iter()
        .find(|el| el.is_anchor() && el.has_attr("href"))
        .ok_or(SkipReason::NoAnchor)?;

    if anchor
        .attr("target")
        .is_some_and(|t| !t.is_empty() && !t.eq_ignore_ascii_case("_self"))
    {
        return Err(SkipReason::ForeignTarget);
    }
    if anchor.has_attr("download") {
        return Err(SkipReason::Download);
    }
    if anchor.has_attr(OPT_OUT_ATTR) {
        return Err(SkipReason::OptedOut);
    }
    if anchor
        .attr("rel")
        .is_some_and(|rel| rel.split_whitespace().any(|r| r.eq_ignore_ascii_case("external")))
    {
        return Err(SkipReason::ExternalRel);
    }

    let href = anchor.attr("href").unwrap_or_default();
    let destination = current.join(href).map_err(|_| SkipReason::InvalidHref)?;
    if destination.origin() != current.origin() {
        return Err(SkipReason::CrossOrigin);
    }
    Ok(destination)
}

/// Locale of the page being viewed: path segment, then cookie, then default.
pub fn active_locale(locales: &Locales, current: &Url, cookie_header: Option<&str>) -> Locale {
    locale_segment(locales, current.path())
        .or_else(|| preference_from_cookie_header(cookie_header, locales))
        .unwrap_or_else(|| locales.default_locale())
}

fn path_and_query(path: &str, url: &Url) -> String {
    match url.query() {
        Some(q) => format!("{path}?{q}"),
        None => path.to_string(),
    }
}

/// Mounted click interceptor. Mounting registers the delegated listener and
/// sets the root marker; dropping it releases both.
pub struct NavigationInterceptor<H: DocumentHost, R: Router> {
    locales: Locales,
    host: H,
    router: R,
    transitions: Option<Box<dyn ViewTransition>>,
}

impl<H: DocumentHost, R: Router> NavigationInterceptor<H, R> {
    /// Install on `host`. Fails if an interceptor is already mounted there.
    pub fn mount(
        locales: Locales,
        host: H,
        router: R,
        transitions: Option<Box<dyn ViewTransition>>,
    ) -> Result<Self, LocaleError> {
        if host.root_attribute(TRANSITION_MARKER).is_some() {
            return Err(LocaleError::AlreadyMounted);
        }
        host.add_click_listener();
        host.set_root_attribute(TRANSITION_MARKER, "enabled");
        debug!(transitions = transitions.is_some(), "Navigation interceptor mounted");

        Ok(Self {
            locales,
            host,
            router,
            transitions,
        })
    }

    pub fn active_locale(&self) -> Locale {
        let current = self.host.location();
        active_locale(&self.locales, &current, self.host.cookie_header().as_deref())
    }

    /// Delegated click handler.
    pub fn on_click(&self, event: &mut ClickEvent) -> ClickOutcome {
        let current = self.host.location();
        let destination = match eligible_destination(event, &current) {
            Ok(url) => url,
            Err(reason) => return ClickOutcome::Ignored(reason),
        };

        let locale = active_locale(&self.locales, &current, self.host.cookie_header().as_deref());
        let path = if has_locale_prefix(&self.locales, destination.path()) {
            destination.path().to_string()
        } else {
            with_locale_prefix(&self.locales, destination.path(), locale.as_str())
        };

        let target = path_and_query(&path, &destination);
        if target == path_and_query(current.path(), &current) {
            return ClickOutcome::AlreadyHere;
        }

        event.prevent_default();

        let href = match destination.fragment() {
            Some(fragment) => format!("{target}#{fragment}"),
            None => target,
        };
        let mode = self.dispatch(&href);
        debug!(%href, %locale, ?mode, "Intercepted navigation");

        ClickOutcome::Navigated { href, mode }
    }

    fn dispatch(&self, href: &str) -> TransitionMode {
        let Some(transitions) = &self.transitions else {
            self.router.push(href);
            return TransitionMode::Direct;
        };

        let mut pushed = false;
        let result = transitions.start(&mut || {
            if !pushed {
                self.router.push(href);
                pushed = true;
            }
        });

        if let Err(e) = &result {
            debug!(error = %e, "View transition did not finish");
        }

        if pushed {
            TransitionMode::Animated
        } else {
            warn!(%href, "View transition never ran its update; navigating directly");
            self.router.push(href);
            TransitionMode::Direct
        }
    }
}

impl<H: DocumentHost, R: Router> Drop for NavigationInterceptor<H, R> {
    fn drop(&mut self) {
        self.host.remove_click_listener();
        self.host.remove_root_attribute(TRANSITION_MARKER);
        debug!("Navigation interceptor unmounted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn here() -> Url {
        Url::parse("https://museum.example/zh-CN/countries").unwrap()
    }

    #[test]
    fn nested_target_finds_enclosing_anchor() {
        let event = ClickEvent::primary(vec![
            Element::new("img"),
            Element::new("span"),
            Element::anchor("/stories"),
            Element::new("body"),
        ]);
        let url = eligible_destination(&event, &here()).unwrap();
        assert_eq!(url.path(), "/stories");
    }

    #[test]
    fn anchor_without_href_is_skipped() {
        let event = ClickEvent::primary(vec![Element::new("a"), Element::new("div")]);
        assert_eq!(eligible_destination(&event, &here()), Err(SkipReason::NoAnchor));
    }

    #[test]
    fn self_target_is_still_eligible() {
        let event = ClickEvent::primary(vec![Element::anchor("/stories").with_attr("target", "_self")]);
        assert!(eligible_destination(&event, &here()).is_ok());
    }

    #[test]
    fn opt_outs_are_respected() {
        let cases = [
            (Element::anchor("/a").with_attr("target", "_blank"), SkipReason::ForeignTarget),
            (Element::anchor("/a").with_attr("download", ""), SkipReason::Download),
            (Element::anchor("/a").with_attr(OPT_OUT_ATTR, ""), SkipReason::OptedOut),
            (Element::anchor("/a").with_attr("rel", "noopener External"), SkipReason::ExternalRel),
            (Element::anchor("https://external.example/a"), SkipReason::CrossOrigin),
            (Element::anchor("mailto:curator@museum.example"), SkipReason::CrossOrigin),
        ];
        for (anchor, reason) in cases {
            let event = ClickEvent::primary(vec![anchor]);
            assert_eq!(eligible_destination(&event, &here()), Err(reason));
        }
    }

    #[test]
    fn modifier_and_button_checks_come_first() {
        let mut event = ClickEvent::new(
            MouseButton::Primary,
            Modifiers {
                meta: true,
                ..Modifiers::default()
            },
            vec![Element::anchor("/a")],
        );
        assert_eq!(eligible_destination(&event, &here()), Err(SkipReason::ModifierKey));

        event.button = MouseButton::Auxiliary;
        assert_eq!(eligible_destination(&event, &here()), Err(SkipReason::NonPrimaryButton));

        let mut prevented = ClickEvent::primary(vec![Element::anchor("/a")]);
        prevented.prevent_default();
        assert_eq!(
            eligible_destination(&prevented, &here()),
            Err(SkipReason::DefaultPrevented)
        );
    }

    #[test]
    fn active_locale_prefers_path_then_cookie() {
        let locales = Locales::default();
        assert_eq!(active_locale(&locales, &here(), Some("NEXT_LOCALE=en")).as_str(), "zh-CN");

        let bare = Url::parse("https://museum.example/countries").unwrap();
        assert_eq!(active_locale(&locales, &bare, Some("NEXT_LOCALE=en")).as_str(), "en");
        assert_eq!(active_locale(&locales, &bare, Some("NEXT_LOCALE=xx")).as_str(), "zh-CN");
        assert_eq!(active_locale(&locales, &bare, None).as_str(), "zh-CN");
    }
}
