use super::*;
use crate::net::error::TransportError;
use crate::storage::{TOKEN_KEY, USER_KEY};
use crate::test_support::harness;
use futures::executor::block_on;
use serde_json::json;

// =============================================================
// Request shaping
// =============================================================

#[test]
fn send_applies_default_headers_bearer_and_timeout() {
    let h = harness();
    h.credentials.set(TOKEN_KEY, "tok");
    h.transport.reply_json(200, &json!([]));

    let _: Vec<serde_json::Value> = block_on(h.api.get_json("/wilayah/provinces")).unwrap();

    let req = &h.transport.requests()[0];
    assert_eq!(req.method, Method::Get);
    assert_eq!(req.url, "http://localhost:8000/api/wilayah/provinces");
    assert_eq!(req.header_value("Authorization"), Some("Bearer tok"));
    assert_eq!(req.header_value("X-Requested-With"), Some("XMLHttpRequest"));
    assert_eq!(req.header_value("Accept"), Some("application/json"));
    assert_eq!(req.timeout, Some(Duration::from_secs(10)));
}

#[test]
fn post_json_serializes_payload() {
    let h = harness();
    h.transport.reply_json(200, &json!({ "ok": true }));

    let body: serde_json::Value = block_on(h.api.post_json("/login", &json!({ "email": "a@b.c" }))).unwrap();

    assert_eq!(body, json!({ "ok": true }));
    let req = &h.transport.requests()[0];
    assert_eq!(req.method, Method::Post);
    assert_eq!(req.body.as_deref(), Some(r#"{"email":"a@b.c"}"#));
    assert_eq!(req.header_value("Authorization"), None);
}

// =============================================================
// Inbound pipeline
// =============================================================

#[test]
fn success_body_is_repaired_before_decoding() {
    let h = harness();
    h.transport.reply(200, r#"c{"a":1}"#);
    let body: serde_json::Value = block_on(h.api.get_json("/x")).unwrap();
    assert_eq!(body, json!({ "a": 1 }));
}

#[test]
fn unrepairable_text_body_is_a_decode_error() {
    let h = harness();
    h.transport.reply(200, "cNOTJSON");
    let err = block_on(h.api.get_json::<serde_json::Value>("/x")).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[test]
fn unauthorized_response_evicts_both_keys_before_returning() {
    let h = harness();
    h.credentials.set(TOKEN_KEY, "tok");
    h.credentials.set(USER_KEY, "{}");
    h.transport.reply(401, r#"c{"message":"Unauthenticated."}"#);

    let err = block_on(h.api.get_json::<serde_json::Value>("/me")).unwrap_err();

    assert!(err.is_unauthorized());
    assert_eq!(err.body(), Some(&Body::Json(json!({ "message": "Unauthenticated." }))));
    assert_eq!(h.credentials.token(), None);
    assert_eq!(h.credentials.cached_user_raw(), None);
}

#[test]
fn transport_failures_map_to_distinct_errors() {
    let h = harness();
    h.transport.fail(TransportError::Timeout);
    h.transport.fail(TransportError::Network("connection refused".to_owned()));

    assert!(matches!(block_on(h.api.post_empty("/logout")), Err(ApiError::Timeout)));
    assert!(matches!(block_on(h.api.post_empty("/logout")), Err(ApiError::Network(_))));
}

#[test]
fn post_empty_ignores_body() {
    let h = harness();
    h.transport.reply(204, "");
    assert!(block_on(h.api.post_empty("/logout")).is_ok());
}

// =============================================================
// decode_body
// =============================================================

#[test]
fn decode_body_rejects_empty() {
    assert!(matches!(decode_body::<serde_json::Value>(Body::Empty), Err(ApiError::Decode(_))));
}

#[test]
fn decode_body_reports_shape_mismatch() {
    let err = decode_body::<Vec<String>>(Body::Json(json!({ "a": 1 }))).unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}
