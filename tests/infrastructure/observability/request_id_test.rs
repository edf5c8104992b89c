use todo_agent::infrastructure::observability::{REQUEST_ID_HEADER, RequestId};

#[test]
fn given_request_id_header_constant_when_accessed_then_returns_correct_value() {
    assert_eq!(REQUEST_ID_HEADER, "x-request-id");
}

#[test]
fn given_valid_header_value_when_building_request_id_then_reuses_it() {
    let request_id = RequestId::from_header(Some("req-123"));
    assert_eq!(request_id, RequestId("req-123".to_string()));
}

#[test]
fn given_missing_header_when_building_request_id_then_mints_uuid() {
    let request_id = RequestId::from_header(None);
    assert!(uuid::Uuid::parse_str(&request_id.0).is_ok());
}

#[test]
fn given_unusable_header_values_when_building_request_id_then_mints_fresh_id() {
    let too_long = "x".repeat(200);
    for value in ["", "has space", too_long.as_str()] {
        let request_id = RequestId::from_header(Some(value));
        assert_ne!(request_id.0, value);
        assert!(uuid::Uuid::parse_str(&request_id.0).is_ok());
    }
}
