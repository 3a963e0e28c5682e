use super::*;
use serde_json::json;

#[test]
fn decode_parses_valid_json() {
    assert_eq!(Body::decode(r#"{"a":1}"#.to_owned()), Body::Json(json!({ "a": 1 })));
    assert_eq!(Body::decode("[1,2]".to_owned()), Body::Json(json!([1, 2])));
}

#[test]
fn decode_keeps_invalid_json_as_text() {
    assert_eq!(Body::decode(r#"c{"a":1}"#.to_owned()), Body::Text(r#"c{"a":1}"#.to_owned()));
}

#[test]
fn decode_treats_blank_as_empty() {
    assert_eq!(Body::decode("  \n".to_owned()), Body::Empty);
}

#[test]
fn as_str_covers_text_and_json_strings() {
    assert_eq!(Body::Text("x".to_owned()).as_str(), Some("x"));
    assert_eq!(Body::Json(json!("y")).as_str(), Some("y"));
    assert_eq!(Body::Json(json!(1)).as_str(), None);
    assert_eq!(Body::Empty.as_str(), None);
}

#[test]
fn header_replaces_case_insensitively() {
    let req = HttpRequest::new(Method::Get, "/x")
        .header("authorization", "Bearer a")
        .header("Authorization", "Bearer b");
    assert_eq!(req.headers.len(), 1);
    assert_eq!(req.header_value("AUTHORIZATION"), Some("Bearer b"));
}

#[test]
fn json_sets_body_and_content_type() {
    let req = HttpRequest::new(Method::Post, "/login")
        .json(&json!({ "email": "a@b.c" }))
        .unwrap();
    assert_eq!(req.body.as_deref(), Some(r#"{"email":"a@b.c"}"#));
    assert_eq!(req.header_value("content-type"), Some("application/json"));
}

#[test]
fn success_range_is_2xx() {
    assert!(HttpResponse::from_raw(204, String::new()).is_success());
    assert!(!HttpResponse::from_raw(302, String::new()).is_success());
    assert!(!HttpResponse::from_raw(401, String::new()).is_success());
}
