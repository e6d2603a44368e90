//! Tests for record extraction, layout, and serialisation.

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use crate::request::{
    CompletedRequest, CompletedResponse, REMOTE_ADDR_ATTRIBUTE, REMOTE_HOST_ATTRIBUTE,
};

use super::{
    AccessFields, COMBINED_COLUMNS, COMMON_COLUMNS, FieldValue, HostLookup, LogPattern,
    build_record, serialise_series,
};

#[fixture]
fn request() -> CompletedRequest {
    CompletedRequest::new("10.0.0.5", "/api/x")
        .with_user("alice")
        .with_hostname("client.example")
        .with_server_name("www.example")
        .with_method("POST")
        .with_header("User-Agent", "curl/8.5")
}

fn lookup(resolve_hosts: bool, request_attributes_enabled: bool) -> HostLookup {
    HostLookup {
        resolve_hosts,
        request_attributes_enabled,
    }
}

#[rstest]
fn common_scenario_clamps_unknown_bytes(request: CompletedRequest) {
    let response = CompletedResponse::new(200, -1);
    let fields = AccessFields::extract(&request, &response, LogPattern::Common, lookup(false, false));
    let record = build_record(LogPattern::Common, &fields);

    let pairs: Vec<_> = record.fields().collect();
    assert_eq!(
        pairs,
        vec![
            ("remoteHost", &FieldValue::from("10.0.0.5")),
            ("userName", &FieldValue::from("alice")),
            ("query", &FieldValue::from("/api/x")),
            ("status", &FieldValue::Integer(200)),
            ("bytes", &FieldValue::Integer(0)),
        ]
    );
}

#[rstest]
fn combined_record_uses_empty_referer_when_absent(request: CompletedRequest) {
    let response = CompletedResponse::new(201, 512);
    let fields =
        AccessFields::extract(&request, &response, LogPattern::Combined, HostLookup::default());
    let record = build_record(LogPattern::Combined, &fields);

    assert_eq!(record.columns(), &COMBINED_COLUMNS);
    assert_eq!(record.get("referer"), Some(&FieldValue::from("")));
    assert_eq!(record.get("method"), Some(&FieldValue::from("POST")));
    assert_eq!(record.get("virtualHost"), Some(&FieldValue::from("www.example")));
    assert_eq!(record.get("userAgent"), Some(&FieldValue::from("curl/8.5")));
    assert_eq!(record.get("bytes"), Some(&FieldValue::Integer(512)));
}

#[rstest]
fn common_extraction_skips_combined_fields(request: CompletedRequest) {
    let response = CompletedResponse::new(200, 10);
    let fields = AccessFields::extract(&request, &response, LogPattern::Common, HostLookup::default());
    assert!(fields.method.is_empty());
    assert!(fields.user_agent.is_empty());

    let record = build_record(LogPattern::Common, &fields);
    assert_eq!(record.columns(), &COMMON_COLUMNS);
    assert_eq!(record.get("method"), None);
}

#[rstest]
fn missing_user_is_logged_as_empty_string() {
    let request = CompletedRequest::new("192.0.2.1", "/");
    let response = CompletedResponse::new(404, 0);
    let fields = AccessFields::extract(&request, &response, LogPattern::Common, HostLookup::default());
    assert_eq!(fields.user_name, "");
}

#[rstest]
#[case::resolve_with_attribute(true, true, "attr-host.example")]
#[case::resolve_without_attribute_lookup(true, false, "client.example")]
#[case::address_with_attribute(false, true, "203.0.113.9")]
#[case::address_without_attribute_lookup(false, false, "10.0.0.5")]
fn remote_host_precedence_with_attributes_present(
    request: CompletedRequest,
    #[case] resolve_hosts: bool,
    #[case] request_attributes_enabled: bool,
    #[case] expected: &str,
) {
    let request = request
        .with_attribute(REMOTE_HOST_ATTRIBUTE, "attr-host.example")
        .with_attribute(REMOTE_ADDR_ATTRIBUTE, "203.0.113.9");
    let response = CompletedResponse::new(200, 0);
    let fields = AccessFields::extract(
        &request,
        &response,
        LogPattern::Common,
        lookup(resolve_hosts, request_attributes_enabled),
    );
    assert_eq!(fields.remote_host, expected);
}

#[rstest]
#[case::resolve(true, "client.example")]
#[case::address(false, "10.0.0.5")]
fn remote_host_falls_back_when_attribute_missing(
    request: CompletedRequest,
    #[case] resolve_hosts: bool,
    #[case] expected: &str,
) {
    let response = CompletedResponse::new(200, 0);
    let fields = AccessFields::extract(
        &request,
        &response,
        LogPattern::Common,
        lookup(resolve_hosts, true),
    );
    assert_eq!(fields.remote_host, expected);
}

#[rstest]
#[case("combined", LogPattern::Combined)]
#[case("common", LogPattern::Common)]
#[case("Combined", LogPattern::Common)]
#[case("", LogPattern::Common)]
#[case("%h %l %u", LogPattern::Common)]
fn pattern_names_fail_open_to_common(#[case] name: &str, #[case] expected: LogPattern) {
    assert_eq!(LogPattern::from_name(name), expected);
}

#[rstest]
fn serialises_single_point_series(request: CompletedRequest) {
    let response = CompletedResponse::new(200, 42);
    let fields = AccessFields::extract(&request, &response, LogPattern::Common, lookup(false, false));
    let record = build_record(LogPattern::Common, &fields);

    let payload = serialise_series("accessLogs", &record).expect("serialise series");
    let decoded: Value = serde_json::from_slice(&payload).expect("decode payload");
    assert_eq!(
        decoded,
        json!([{
            "name": "accessLogs",
            "columns": ["remoteHost", "userName", "query", "status", "bytes"],
            "points": [["10.0.0.5", "alice", "/api/x", 200, 42]],
        }])
    );
}

#[rstest]
fn field_values_expose_their_variant(request: CompletedRequest) {
    let fields = AccessFields::extract(
        &request,
        &CompletedResponse::new(200, 64),
        LogPattern::Common,
        HostLookup::default(),
    );
    let record = build_record(LogPattern::Common, &fields);

    let user = record.get("userName").expect("userName");
    assert_eq!(user.as_text(), Some("alice"));
    assert_eq!(user.as_integer(), None);

    let bytes = record.get("bytes").expect("bytes");
    assert_eq!(bytes.as_integer(), Some(64));
    assert_eq!(bytes.as_text(), None);
    assert_eq!(FieldValue::from(7_i64).as_integer(), Some(7));
}
