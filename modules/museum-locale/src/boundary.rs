//! Request-time locale resolution.
//!
//! Every page request either bypasses the boundary (assets, API, studio),
//! carries a locale segment and is rewritten to its locale-free path, or has
//! no locale segment and is redirected to one.

use std::convert::Infallible;
use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{
        header::{self, HeaderName},
        request::Parts,
        uri::PathAndQuery,
        HeaderValue, StatusCode, Uri,
    },
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use tracing::{debug, warn};

use crate::config::{RoutingConfig, DEFAULT_LOCALE_HEADER};
use crate::cookie::{preference_from_cookie_header, preference_set_cookie};
use crate::error::LocaleError;
use crate::path::{locale_segment, strip_locale_prefix, with_locale_prefix};
use crate::registry::{Locale, Locales};

/// Outcome of inspecting one request path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryDecision {
    /// Locale-agnostic path; forward untouched.
    Bypass,
    /// No locale segment; send the browser to the localized URL.
    Redirect { location: String, locale: Locale },
    /// Locale segment present; render `path_and_query` in `locale`.
    Rewrite {
        path_and_query: String,
        locale: Locale,
    },
}

/// The locale resolved for the current request.
///
/// Inserted as a request extension by [`locale_boundary`]; page handlers take
/// it as an extractor to pick their message bundle. Outside the boundary's
/// rewrite it falls back to the locale header (checked against the registry),
/// then to the default locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestLocale(pub Locale);

impl<S: Send + Sync> FromRequestParts<S> for RequestLocale {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        if let Some(locale) = parts.extensions.get::<RequestLocale>() {
            return Ok(locale.clone());
        }

        let fallback;
        let boundary = match parts.extensions.get::<Arc<LocaleBoundary>>() {
            Some(boundary) => boundary.as_ref(),
            None => {
                fallback = LocaleBoundary::fallback();
                &fallback
            }
        };

        let from_header = parts
            .headers
            .get(boundary.locale_header())
            .and_then(|v| v.to_str().ok())
            .and_then(|tag| boundary.locales().get(tag));

        Ok(RequestLocale(
            from_header.unwrap_or_else(|| boundary.locales().default_locale()),
        ))
    }
}

/// Shared, read-only routing state for [`locale_boundary`].
#[derive(Debug, Clone)]
pub struct LocaleBoundary {
    locales: Locales,
    routing: RoutingConfig,
    header: HeaderName,
}

impl LocaleBoundary {
    pub fn new(locales: Locales, routing: RoutingConfig) -> Result<Self, LocaleError> {
        let header = HeaderName::try_from(routing.locale_header.as_str())
            .map_err(|e| LocaleError::Config(format!("invalid locale header name: {e}")))?;
        Ok(Self {
            locales,
            routing,
            header,
        })
    }

    /// Built-in registry and default header, for extractors running
    /// without a boundary in front of them.
    fn fallback() -> Self {
        Self {
            locales: Locales::default(),
            routing: RoutingConfig::default(),
            header: HeaderName::from_static(DEFAULT_LOCALE_HEADER),
        }
    }

    pub fn locales(&self) -> &Locales {
        &self.locales
    }

    pub fn locale_header(&self) -> &HeaderName {
        &self.header
    }

    /// Assets, API, studio, well-known files, and any path containing a dot.
    pub fn is_bypassed(&self, path: &str) -> bool {
        let under_prefix = self.routing.bypass_prefixes().iter().any(|prefix| {
            !prefix.is_empty()
                && path
                    .strip_prefix(*prefix)
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
        });
        if under_prefix || self.routing.bypass_files.iter().any(|f| f == path) {
            return true;
        }

        path.contains('.')
    }

    pub fn decide(&self, path: &str, query: Option<&str>, cookie_header: Option<&str>) -> BoundaryDecision {
        if self.is_bypassed(path) {
            return BoundaryDecision::Bypass;
        }

        let query = query
            .filter(|q| !q.is_empty())
            .map(|q| format!("?{q}"))
            .unwrap_or_default();

        match locale_segment(&self.locales, path) {
            Some(locale) => {
                let bare = strip_locale_prefix(&self.locales, path);
                BoundaryDecision::Rewrite {
                    path_and_query: format!("{bare}{query}"),
                    locale,
                }
            }
            None => {
                let locale = preference_from_cookie_header(cookie_header, &self.locales)
                    .unwrap_or_else(|| self.locales.default_locale());
                let target = with_locale_prefix(&self.locales, path, locale.as_str());
                BoundaryDecision::Redirect {
                    location: format!("{target}{query}"),
                    locale,
                }
            }
        }
    }
}

/// axum middleware applying [`LocaleBoundary::decide`] to every request.
///
/// Must wrap the whole `Router` (not be added with `Router::layer`) because
/// the rewrite has to happen before routing.
pub async fn locale_boundary(
    State(boundary): State<Arc<LocaleBoundary>>,
    mut req: Request,
    next: Next,
) -> Response {
    // The locale header is internal; only the rewrite arm may set it.
    req.headers_mut().remove(boundary.locale_header());

    let cookie_header = req
        .headers()
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok());

    let decision = boundary.decide(req.uri().path(), req.uri().query(), cookie_header);

    match decision {
        BoundaryDecision::Bypass => {
            req.extensions_mut().insert(boundary);
            next.run(req).await
        }
        BoundaryDecision::Redirect { location, locale } => {
            debug!(path = %req.uri().path(), %location, %locale, "Redirecting to localized path");
            Redirect::temporary(&location).into_response()
        }
        BoundaryDecision::Rewrite {
            path_and_query,
            locale,
        } => {
            debug!(path = %req.uri().path(), rewrite = %path_and_query, %locale, "Rewriting localized request");

            match rewrite_uri(req.uri(), &path_and_query) {
                Ok(uri) => *req.uri_mut() = uri,
                Err(e) => {
                    warn!(error = %e, rewrite = %path_and_query, "Failed to rewrite request URI");
                    return (StatusCode::INTERNAL_SERVER_ERROR, "failed to rewrite request")
                        .into_response();
                }
            }

            if let Ok(value) = HeaderValue::from_str(locale.as_str()) {
                req.headers_mut().insert(boundary.locale_header().clone(), value);
            }
            req.extensions_mut().insert(RequestLocale(locale.clone()));

            let mut response = next.run(req).await;
            let cookie = preference_set_cookie(&locale, boundary.locales());
            if let Ok(value) = HeaderValue::from_str(&cookie) {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            response
        }
    }
}

fn rewrite_uri(uri: &Uri, path_and_query: &str) -> Result<Uri, axum::http::Error> {
    let mut parts = uri.clone().into_parts();
    parts.path_and_query = Some(PathAndQuery::try_from(path_and_query)?);
    Ok(Uri::from_parts(parts)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn boundary() -> LocaleBoundary {
        LocaleBoundary::new(Locales::default(), RoutingConfig::default()).unwrap()
    }

    #[test]
    fn bypasses_locale_agnostic_paths() {
        let b = boundary();
        for path in [
            "/_assets/app.js",
            "/api",
            "/api/contact",
            "/studio/desk",
            "/favicon.ico",
            "/robots.txt",
            "/sitemap.xml",
            "/images/hero.webp",
            "/en/gallery/print.pdf",
            "/v1.0/stories",
        ] {
            assert_eq!(b.decide(path, None, None), BoundaryDecision::Bypass, "{path}");
        }
    }

    #[test]
    fn prefix_bypass_is_segment_aware() {
        let b = boundary();
        assert!(!b.is_bypassed("/apiary"));
        assert!(!b.is_bypassed("/studios"));
    }

    #[test]
    fn missing_locale_redirects_to_default() {
        let b = boundary();
        match b.decide("/regions", None, None) {
            BoundaryDecision::Redirect { location, locale } => {
                assert_eq!(location, "/zh-CN/regions");
                assert_eq!(locale.as_str(), "zh-CN");
            }
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn root_redirect_has_no_trailing_slash() {
        let b = boundary();
        let decision = b.decide("/", None, Some("NEXT_LOCALE=en"));
        assert!(matches!(
            decision,
            BoundaryDecision::Redirect { ref location, .. } if location == "/en"
        ));
    }

    #[test]
    fn redirect_keeps_query_string() {
        let b = boundary();
        let decision = b.decide("/stories", Some("page=2"), Some("NEXT_LOCALE=en"));
        assert!(matches!(
            decision,
            BoundaryDecision::Redirect { ref location, .. } if location == "/en/stories?page=2"
        ));
    }

    #[test]
    fn stale_cookie_falls_back_to_default() {
        let b = boundary();
        let decision = b.decide("/countries", None, Some("NEXT_LOCALE=fr"));
        assert!(matches!(
            decision,
            BoundaryDecision::Redirect { ref location, .. } if location == "/zh-CN/countries"
        ));
    }

    #[test]
    fn locale_segment_rewrites_to_bare_path() {
        let b = boundary();
        match b.decide("/en/stories/x", Some("ref=home"), Some("NEXT_LOCALE=zh-CN")) {
            BoundaryDecision::Rewrite {
                path_and_query,
                locale,
            } => {
                assert_eq!(path_and_query, "/stories/x?ref=home");
                assert_eq!(locale.as_str(), "en");
            }
            other => panic!("expected rewrite, got {other:?}"),
        }
    }

    #[test]
    fn bare_locale_rewrites_to_root() {
        let b = boundary();
        assert!(matches!(
            b.decide("/zh-CN", None, None),
            BoundaryDecision::Rewrite { ref path_and_query, .. } if path_and_query == "/"
        ));
    }

    #[test]
    fn rewrite_uri_rejects_unencoded_path() {
        let uri: Uri = "/en/stories".parse().unwrap();
        assert!(rewrite_uri(&uri, "/bad path").is_err());
        assert_eq!(rewrite_uri(&uri, "/stories?x=1").unwrap(), "/stories?x=1");
    }

    #[test]
    fn rejects_invalid_header_name() {
        let routing = RoutingConfig {
            locale_header: "bad header".to_string(),
            ..RoutingConfig::default()
        };
        assert!(matches!(
            LocaleBoundary::new(Locales::default(), routing),
            Err(LocaleError::Config(_))
        ));
    }
}
