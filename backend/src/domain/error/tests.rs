//! Tests for domain error construction and serialisation.

use super::*;
use rstest::{fixture, rstest};
use serde_json::json;

const TRACE_ID: &str = "00000000-0000-0000-0000-000000000000";

#[fixture]
fn scoped_trace_id() -> TraceId {
    TRACE_ID.parse().expect("fixture is a valid UUID")
}

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("not yours"), ErrorCode::Unauthorized)]
#[case(Error::not_found("missing"), ErrorCode::NotFound)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("db down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn try_new_rejects_blank_messages() {
    let result = Error::try_new(ErrorCode::InvalidRequest, "   ");
    assert_eq!(result, Err(ErrorValidationError::EmptyMessage));
}

#[rstest]
fn try_with_trace_id_rejects_blank_values() {
    let result = Error::internal("boom").try_with_trace_id(" ");
    assert_eq!(result, Err(ErrorValidationError::EmptyTraceId));
}

#[rstest]
fn trace_id_is_absent_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[rstest]
#[tokio::test]
async fn constructors_capture_trace_id_in_scope(scoped_trace_id: TraceId) {
    let error = TraceId::scope(scoped_trace_id, async { Error::not_found("missing") }).await;
    assert_eq!(error.trace_id(), Some(TRACE_ID));
}

#[rstest]
fn serialises_camel_case_and_omits_empty_fields() {
    let value = serde_json::to_value(Error::not_found("missing")).expect("serialise");
    assert_eq!(value, json!({ "code": "not_found", "message": "missing" }));
}

#[rstest]
fn serialises_details_and_trace_id() {
    let error = Error::invalid_request("bad")
        .with_trace_id("abc")
        .with_details(json!({ "field": "name" }));
    let value = serde_json::to_value(error).expect("serialise");
    assert_eq!(value["traceId"], "abc");
    assert_eq!(value["details"]["field"], "name");
}

#[rstest]
#[tokio::test]
async fn deserialising_ignores_ambient_trace_id(scoped_trace_id: TraceId) {
    let error: Error = TraceId::scope(scoped_trace_id, async {
        serde_json::from_value(json!({ "code": "conflict", "message": "taken" }))
            .expect("deserialise")
    })
    .await;
    assert_eq!(error.code(), ErrorCode::Conflict);
    assert!(error.trace_id().is_none());
}

#[rstest]
fn deserialising_rejects_blank_message() {
    let result: Result<Error, _> =
        serde_json::from_value(json!({ "code": "not_found", "message": "" }));
    assert!(result.is_err());
}
