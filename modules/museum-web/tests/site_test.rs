//! End-to-end requests against the assembled site router.

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    response::Response,
    Router,
};
use tower::ServiceExt;

use museum_web::{build_app, AppState, FileConfig};

fn app() -> Router {
    let state = AppState::from_config(&FileConfig::default()).unwrap();
    build_app(Arc::new(state))
}

async fn get(path: &str, cookie: Option<&str>) -> Response {
    let mut request = Request::get(path);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn regions_without_locale_redirects_to_default() {
    let response = get("/regions", None).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/zh-CN/regions");
}

#[tokio::test]
async fn root_redirect_uses_cookie_preference() {
    let response = get("/", Some("NEXT_LOCALE=en")).await;
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(response.headers()[header::LOCATION], "/en");
}

#[tokio::test]
async fn localized_story_renders_in_requested_language() {
    let response = get("/en/stories/rosetta-stone", Some("NEXT_LOCALE=zh-CN")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_LANGUAGE], "en");
    assert_eq!(
        response.headers()[header::SET_COOKIE],
        "NEXT_LOCALE=en; Path=/; Max-Age=31536000; SameSite=Lax"
    );

    let html = body_text(response).await;
    assert!(html.contains("The Rosetta Stone"));
    assert!(html.contains(r#"href="/en/stories""#));
    assert!(html.contains(r#"hreflang="zh-CN" href="/zh-CN/stories/rosetta-stone""#));
}

#[tokio::test]
async fn default_locale_pages_use_default_bundle() {
    let response = get("/zh-CN/countries?region=east-asia", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_LANGUAGE], "zh-CN");

    let html = body_text(response).await;
    assert!(html.contains("按国家浏览"));
    assert!(html.contains("日本"));
    assert!(!html.contains("墨西哥"));
    assert!(html.contains(r#"href="/zh-CN/stories/great-wave""#));
}

#[tokio::test]
async fn unknown_story_is_a_localized_404() {
    let response = get("/en/stories/no-such-object", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("Page not found"));

    let response = get("/zh-CN/galleries", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.contains("页面不存在"));
}

#[tokio::test]
async fn locale_switch_sets_cookie_and_redirects() {
    let response = get("/api/locale?to=en&from=%2Fzh-CN%2Fstories%2Fsun-stone", None).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/en/stories/sun-stone");
    assert_eq!(
        response.headers()[header::SET_COOKIE],
        "NEXT_LOCALE=en; Path=/; Max-Age=31536000; SameSite=Lax"
    );
}

#[tokio::test]
async fn locale_switch_rejects_unsupported_and_offsite_input() {
    let response = get("/api/locale?to=fr&from=%2Fen", None).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get("/api/locale?to=zh-CN&from=%2F%2Fevil.example%2Fx", None).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/zh-CN");
}

#[tokio::test]
async fn bypassed_routes_skip_locale_handling() {
    let response = get("/api/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["default_locale"], "zh-CN");

    let response = get("/_assets/site.css", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/css; charset=utf-8");

    let response = get("/robots.txt", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get("/studio/desk", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn every_response_gets_shared_headers() {
    let response = get("/en", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
}
