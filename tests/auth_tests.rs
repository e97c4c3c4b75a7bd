use axum::{
    extract::FromRequestParts,
    http::{Method, Request, StatusCode, Uri, header, request::Parts},
};
use songvault::{
    auth::{AuthUser, decode_token, issue_token},
    config::AppConfig,
};

// The AuthUser extractor only needs AppConfig from the state, so the config
// itself can serve as the state in these tests.

const TEST_SECRET: &str = "test-signing-secret-1234567890";

fn test_config() -> AppConfig {
    AppConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..AppConfig::default()
    }
}

fn request_parts(method: Method, uri: Uri) -> Parts {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(axum::body::Body::empty())
        .unwrap();
    let (parts, _) = request.into_parts();
    parts
}

// --- Token round-trip ---

#[test]
fn test_issue_then_decode_round_trips_claims() {
    let token = issue_token(42, true, TEST_SECRET).unwrap();
    assert!(!token.is_empty());

    let claims = decode_token(&token, TEST_SECRET).unwrap();
    assert_eq!(claims.id, 42);
    assert!(claims.is_admin);

    let token = issue_token(7, false, TEST_SECRET).unwrap();
    let claims = decode_token(&token, TEST_SECRET).unwrap();
    assert_eq!(claims.id, 7);
    assert!(!claims.is_admin);
}

#[test]
fn test_decode_rejects_wrong_secret() {
    let token = issue_token(1, false, TEST_SECRET).unwrap();
    assert!(decode_token(&token, "another-secret-entirely").is_err());
}

#[test]
fn test_decode_rejects_garbage() {
    assert!(decode_token("not.a.token", TEST_SECRET).is_err());
    assert!(decode_token("", TEST_SECRET).is_err());
}

// --- Extractor behavior ---

#[tokio::test]
async fn test_extractor_accepts_valid_bearer_token() {
    let config = test_config();
    let token = issue_token(42, true, TEST_SECRET).unwrap();

    let mut parts = request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
    );

    let auth_user = AuthUser::from_request_parts(&mut parts, &config)
        .await
        .expect("valid token should authenticate");

    assert_eq!(auth_user.id, 42);
    assert!(auth_user.is_admin);
}

#[tokio::test]
async fn test_extractor_rejects_missing_header() {
    let config = test_config();
    let mut parts = request_parts(Method::GET, "/".parse().unwrap());

    let result = AuthUser::from_request_parts(&mut parts, &config).await;

    assert_eq!(result.unwrap_err().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extractor_rejects_non_bearer_scheme() {
    let config = test_config();
    let mut parts = request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_static("Basic dXNlcjpwYXNz"),
    );

    let result = AuthUser::from_request_parts(&mut parts, &config).await;

    assert_eq!(result.unwrap_err().status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_extractor_rejects_tampered_token() {
    let config = test_config();
    // Signed with a different secret: the signature check must fail.
    let forged = issue_token(42, true, "attacker-secret").unwrap();

    let mut parts = request_parts(Method::GET, "/".parse().unwrap());
    parts.headers.insert(
        header::AUTHORIZATION,
        header::HeaderValue::from_str(&format!("Bearer {forged}")).unwrap(),
    );

    let result = AuthUser::from_request_parts(&mut parts, &config).await;

    // Invalid and missing tokens are indistinguishable: both 401.
    assert_eq!(result.unwrap_err().status(), StatusCode::UNAUTHORIZED);
}
