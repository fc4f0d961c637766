use axum::Router;
use axum::body::Body;
use axum::extract::Extension;
use axum::http::Request;
use axum::middleware;
use axum::routing::get;
use tower::ServiceExt;

use bloodwork::infrastructure::observability::{
    REQUEST_ID_HEADER, RequestId, request_id_middleware,
};

async fn echo_request_id(Extension(request_id): Extension<RequestId>) -> String {
    request_id.0
}

fn app() -> Router {
    Router::new()
        .route("/", get(echo_request_id))
        .layer(middleware::from_fn(request_id_middleware))
}

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[tokio::test]
async fn given_incoming_request_id_when_handled_then_handler_sees_same_id() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(REQUEST_ID_HEADER, "abc-123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"abc-123");
}

#[tokio::test]
async fn given_no_request_id_when_handled_then_uuid_is_generated() {
    let response = app()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let header = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(uuid::Uuid::parse_str(&header).is_ok());
}

#[test]
fn given_oversized_or_unprintable_id_when_reading_headers_then_new_id_is_minted() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, "x".repeat(500).parse().unwrap());
    let long = RequestId::from_headers(&headers);
    assert!(uuid::Uuid::parse_str(&long.0).is_ok());

    headers.insert(REQUEST_ID_HEADER, "has space".parse().unwrap());
    let spaced = RequestId::from_headers(&headers);
    assert_ne!(spaced.0, "has space");
}

#[test]
fn given_valid_id_when_reading_headers_then_it_is_kept() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert(REQUEST_ID_HEADER, "req-42".parse().unwrap());

    assert_eq!(
        RequestId::from_headers(&headers),
        RequestId("req-42".to_string())
    );
}
