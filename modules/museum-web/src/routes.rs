use std::sync::Arc;

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderValue, StatusCode, Uri},
    middleware::from_fn_with_state,
    response::{Html, IntoResponse, Json, Redirect, Response},
    routing::get,
    Router,
};
use serde::Deserialize;
use tower::Layer;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::{info, warn};

use museum_locale::cookie::preference_set_cookie;
use museum_locale::{
    locale_boundary, switch_locale, Locale, LocaleBoundary, LocaleError, Locales, RequestLocale,
};

use crate::config::FileConfig;
use crate::content;
use crate::messages::bundle;
use crate::templates::{self, PageContext, SITE_CSS};

pub struct AppState {
    pub locales: Locales,
    pub boundary: Arc<LocaleBoundary>,
}

impl AppState {
    pub fn from_config(config: &FileConfig) -> Result<Self, LocaleError> {
        let locales = config.locales.build()?;
        let boundary = LocaleBoundary::new(locales.clone(), config.routing.clone())?;
        Ok(Self {
            locales,
            boundary: Arc::new(boundary),
        })
    }
}

/// Full application: site routes behind the locale boundary, plus the
/// response headers and request spans shared by every path.
///
/// The boundary wraps the inner router as a service rather than being added
/// with `Router::layer`, so its URI rewrite is seen by routing.
pub fn build_app(state: Arc<AppState>) -> Router {
    let boundary = state.boundary.clone();

    let site = Router::new()
        .route("/", get(home_page))
        .route("/regions", get(regions_page))
        .route("/countries", get(countries_page))
        .route("/stories", get(stories_page))
        .route("/stories/{slug}", get(story_page))
        .route("/api/health", get(health))
        .route("/api/locale", get(switch_locale_action))
        .route("/_assets/site.css", get(site_css))
        .route("/robots.txt", get(robots))
        .fallback(not_found)
        .with_state(state);

    Router::new()
        .fallback_service(from_fn_with_state(boundary, locale_boundary).layer(site))
        .layer(SetResponseHeaderLayer::overriding(
            header::X_CONTENT_TYPE_OPTIONS,
            HeaderValue::from_static("nosniff"),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        // Request span: method + path only
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

// --- Page handlers ---

fn page(state: &AppState, locale: &Locale, uri: &Uri, render: impl FnOnce(&PageContext<'_>) -> String) -> Response {
    let ctx = PageContext {
        locales: &state.locales,
        locale,
        path: uri.path(),
        messages: bundle(&state.locales, locale),
    };
    localized_html(locale, StatusCode::OK, render(&ctx))
}

fn localized_html(locale: &Locale, status: StatusCode, html: String) -> Response {
    (
        status,
        [(header::CONTENT_LANGUAGE, locale.to_string())],
        Html(html),
    )
        .into_response()
}

async fn home_page(
    State(state): State<Arc<AppState>>,
    RequestLocale(locale): RequestLocale,
    uri: Uri,
) -> Response {
    page(&state, &locale, &uri, templates::render_home)
}

async fn regions_page(
    State(state): State<Arc<AppState>>,
    RequestLocale(locale): RequestLocale,
    uri: Uri,
) -> Response {
    page(&state, &locale, &uri, templates::render_regions)
}

#[derive(Deserialize)]
struct CountriesQuery {
    region: Option<String>,
}

async fn countries_page(
    State(state): State<Arc<AppState>>,
    RequestLocale(locale): RequestLocale,
    uri: Uri,
    Query(params): Query<CountriesQuery>,
) -> Response {
    let region = params
        .region
        .as_deref()
        .and_then(content::region)
        .map(|r| r.slug);
    page(&state, &locale, &uri, |ctx| templates::render_countries(ctx, region))
}

async fn stories_page(
    State(state): State<Arc<AppState>>,
    RequestLocale(locale): RequestLocale,
    uri: Uri,
) -> Response {
    page(&state, &locale, &uri, templates::render_stories)
}

async fn story_page(
    State(state): State<Arc<AppState>>,
    RequestLocale(locale): RequestLocale,
    uri: Uri,
    Path(slug): Path<String>,
) -> Response {
    match content::story(&slug) {
        Some(story) => page(&state, &locale, &uri, |ctx| templates::render_story(ctx, story)),
        None => not_found_page(&state, &locale, &uri),
    }
}

async fn not_found(State(state): State<Arc<AppState>>, req: Request) -> Response {
    match req.extensions().get::<RequestLocale>() {
        Some(RequestLocale(locale)) => not_found_page(&state, locale, req.uri()),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

fn not_found_page(state: &AppState, locale: &Locale, uri: &Uri) -> Response {
    let ctx = PageContext {
        locales: &state.locales,
        locale,
        path: uri.path(),
        messages: bundle(&state.locales, locale),
    };
    localized_html(locale, StatusCode::NOT_FOUND, templates::render_not_found(&ctx))
}

// --- Locale-agnostic handlers ---

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "locales": state.locales.supported().collect::<Vec<_>>(),
        "default_locale": state.locales.default_tag(),
    }))
}

#[derive(Deserialize)]
struct SwitchQuery {
    to: String,
    from: Option<String>,
}

/// Explicit locale switch: persist the choice and move the visitor to the
/// same page in the new locale.
async fn switch_locale_action(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SwitchQuery>,
) -> Response {
    let locale = match state.locales.parse(&params.to) {
        Ok(locale) => locale,
        Err(e) => {
            warn!(error = %e, "Rejected locale switch");
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    // Only same-site paths; anything else lands on the home page.
    let from = params
        .from
        .as_deref()
        .filter(|f| f.starts_with('/') && !f.starts_with("//"))
        .unwrap_or("/");
    let target = switch_locale(&state.locales, from, &locale);
    info!(%locale, %target, "Locale switched");

    let cookie = preference_set_cookie(&locale, &state.locales);
    ([(header::SET_COOKIE, cookie)], Redirect::to(&target)).into_response()
}

async fn site_css() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        SITE_CSS,
    )
}

async fn robots() -> &'static str {
    "User-agent: *\nAllow: /\n"
}
