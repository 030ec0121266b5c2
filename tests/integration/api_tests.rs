//! API integration tests for thumbnail retrieval and error handling.
//!
//! Tests verify:
//! - Thumbnail dimensions and letterboxing through the HTTP layer
//! - Error cases (bad parameters, missing source, undecodable source)
//! - HTTP response codes, headers and JSON error bodies

use std::sync::atomic::Ordering;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use thumbnail_service::fit::FillColor;
use thumbnail_service::server::DEFAULT_MAX_DIMENSION;
use thumbnail_service::RouterConfig;

use super::test_utils::{
    assert_color_near, create_test_jpeg, create_test_png, decode_jpeg, is_valid_jpeg, router_for,
    router_with_config, router_with_fill, MockImageSource,
};

const SOURCE_URL: &str = "http://images.test/photo.jpg";
const RED: [u8; 3] = [220, 20, 20];

async fn get(router: Router, uri: &str) -> axum::response::Response {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    router.oneshot(request).await.unwrap()
}

async fn body_bytes(response: axum::response::Response) -> bytes::Bytes {
    response.into_body().collect().await.unwrap().to_bytes()
}

async fn error_reason(response: axum::response::Response) -> String {
    let body = body_bytes(response).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    json["reason"].as_str().unwrap().to_string()
}

fn thumbnail_uri(x: &str, y: &str) -> String {
    format!("/thumbnail?url={}&x={}&y={}", SOURCE_URL, x, y)
}

// =============================================================================
// Successful Thumbnails
// =============================================================================

#[tokio::test]
async fn test_thumbnail_success_headers() {
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(800, 600, RED));
    let response = get(router_for(source), &thumbnail_uri("400", "400")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "image/jpeg"
    );
    assert!(response.headers().contains_key("cache-control"));
    assert_eq!(response.headers().get("x-source-size").unwrap(), "800x600");

    let content_length: usize = response
        .headers()
        .get("content-length")
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();

    let body = body_bytes(response).await;
    assert_eq!(body.len(), content_length);
    assert!(is_valid_jpeg(&body), "Response should be a valid JPEG");
}

#[tokio::test]
async fn test_same_ratio_downscale() {
    // 800x600 -> 400x300: direct downscale, no padding
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(800, 600, RED));
    let response = get(router_for(source), &thumbnail_uri("400", "300")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let img = decode_jpeg(&body_bytes(response).await);
    assert_eq!(img.dimensions(), (400, 300));
    for (x, y) in [(2, 2), (397, 2), (2, 297), (397, 297), (200, 150)] {
        assert_color_near(img.get_pixel(x, y), RED, 24, &format!("pixel ({}, {})", x, y));
    }
}

#[tokio::test]
async fn test_width_binding_letterbox() {
    // 800x600 -> 400x400: 400x300 content, 50px black bars top and bottom
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(800, 600, RED));
    let response = get(router_for(source), &thumbnail_uri("400", "400")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let img = decode_jpeg(&body_bytes(response).await);
    assert_eq!(img.dimensions(), (400, 400));

    assert_color_near(img.get_pixel(200, 20), [0, 0, 0], 24, "top bar");
    assert_color_near(img.get_pixel(200, 380), [0, 0, 0], 24, "bottom bar");
    assert_color_near(img.get_pixel(200, 200), RED, 24, "center");
    assert_color_near(img.get_pixel(5, 200), RED, 24, "left edge of content");
}

#[tokio::test]
async fn test_small_source_centered_on_white() {
    // 400x300 -> 800x800: source unscaled at (200, 250)
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(400, 300, RED));
    let response = get(
        router_with_fill(source, FillColor::WHITE),
        &thumbnail_uri("800", "800"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let img = decode_jpeg(&body_bytes(response).await);
    assert_eq!(img.dimensions(), (800, 800));

    assert_color_near(img.get_pixel(100, 100), [255, 255, 255], 24, "corner fill");
    assert_color_near(img.get_pixel(190, 400), [255, 255, 255], 24, "left fill");
    assert_color_near(img.get_pixel(400, 230), [255, 255, 255], 24, "top fill");
    assert_color_near(img.get_pixel(210, 260), RED, 24, "content top-left");
    assert_color_near(img.get_pixel(590, 540), RED, 24, "content bottom-right");
    assert_color_near(img.get_pixel(400, 560), [255, 255, 255], 24, "bottom fill");
}

#[tokio::test]
async fn test_png_source() {
    let url = "http://images.test/icon.png";
    let source =
        MockImageSource::new().with_image(url, create_test_png(256, 128, [10, 200, 10, 255]));
    let response = get(
        router_for(source),
        &format!("/thumbnail?url={}&x=128&y=128", url),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let img = decode_jpeg(&body_bytes(response).await);
    // 128x64 content, 32px bars top and bottom
    assert_eq!(img.dimensions(), (128, 128));
    assert_color_near(img.get_pixel(64, 64), [10, 200, 10], 24, "content");
    assert_color_near(img.get_pixel(64, 8), [0, 0, 0], 24, "top bar");
    assert_color_near(img.get_pixel(64, 120), [0, 0, 0], 24, "bottom bar");
}

#[tokio::test]
async fn test_quality_parameter() {
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(64, 64, RED));
    let response = get(
        router_for(source),
        &format!("{}&quality=55", thumbnail_uri("32", "32")),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers().get("x-thumbnail-quality").unwrap(), "55");
}

// =============================================================================
// Parameter Errors (400)
// =============================================================================

#[tokio::test]
async fn test_missing_x_rejected() {
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(8, 8, RED));
    let response = get(
        router_for(source),
        &format!("/thumbnail?url={}&y=10", SOURCE_URL),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let reason = error_reason(response).await;
    assert!(reason.contains("x param"), "reason: {}", reason);
}

#[tokio::test]
async fn test_unparseable_y_rejected() {
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(8, 8, RED));
    let response = get(router_for(source), &thumbnail_uri("10", "ten")).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let reason = error_reason(response).await;
    assert!(reason.contains("y param"), "reason: {}", reason);
}

#[tokio::test]
async fn test_zero_dimension_rejected_before_fetch() {
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(8, 8, RED));
    let fetches = source.fetch_counter();
    let router = router_for(source);

    let response = get(router.clone(), &thumbnail_uri("0", "10")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = get(router, &thumbnail_uri("10", "0")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_oversized_dimension_rejected_before_fetch() {
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(8, 8, RED));
    let fetches = source.fetch_counter();
    let router = router_for(source);

    let response = get(router.clone(), &thumbnail_uri("4294967295", "4294967295")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let reason = error_reason(response).await;
    assert!(reason.contains("x param"), "reason: {}", reason);

    let over = (DEFAULT_MAX_DIMENSION + 1).to_string();
    let response = get(router, &thumbnail_uri("10", &over)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let reason = error_reason(response).await;
    assert!(reason.contains("y param"), "reason: {}", reason);

    assert_eq!(fetches.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_configured_max_dimension() {
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(8, 8, RED));
    let router = router_with_config(source, RouterConfig::new().with_max_dimension(16));

    let response = get(router.clone(), &thumbnail_uri("16", "16")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = get(router, &thumbnail_uri("17", "16")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_negative_dimension_rejected() {
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(8, 8, RED));
    let response = get(router_for(source), &thumbnail_uri("-1", "10")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_quality_rejected() {
    let source = MockImageSource::new().with_image(SOURCE_URL, create_test_jpeg(8, 8, RED));
    let router = router_for(source);

    let response = get(
        router.clone(),
        &format!("{}&quality=0", thumbnail_uri("4", "4")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(error_reason(response).await.contains("quality"));

    let response = get(router, &format!("{}&quality=best", thumbnail_uri("4", "4"))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Source Errors (404 / 500)
// =============================================================================

#[tokio::test]
async fn test_unknown_source_is_not_found() {
    let source = MockImageSource::new();
    let response = get(router_for(source), &thumbnail_uri("10", "10")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        response.headers().get("content-type").unwrap(),
        "application/json"
    );
    assert!(!error_reason(response).await.is_empty());
}

#[tokio::test]
async fn test_missing_url_is_not_found() {
    let source = MockImageSource::new();
    let response = get(router_for(source), "/thumbnail?x=10&y=10").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_undecodable_source_is_server_error() {
    let source = MockImageSource::new().with_image(SOURCE_URL, b"<html>nope</html>".to_vec());
    let response = get(router_for(source), &thumbnail_uri("10", "10")).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let reason = error_reason(response).await;
    assert!(reason.contains("decoding"), "reason: {}", reason);
}

// =============================================================================
// Auxiliary Endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let response = get(router_for(MockImageSource::new()), "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_index_endpoint() {
    let response = get(router_for(MockImageSource::new()), "/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_bytes(response).await;
    assert!(String::from_utf8_lossy(&body).contains("Welcome"));
}

#[tokio::test]
async fn test_unknown_route() {
    let response = get(router_for(MockImageSource::new()), "/nope").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
