//! Request body decoding for HTTP endpoints.
//!
//! Bodies are decoded leniently by `dispatch-lib`: fields that cannot be
//! coerced fall back to defaults. Only the framing can fail, and that maps to
//! a 400 problem.

use dispatch_lib::{AssignmentRequest, EtaRequest, Result as LibResult};

use crate::problem::{from_lib_error, ProblemDetails};

/// A request document that can be decoded from a raw body.
pub trait RequestBody: Sized {
    /// Decode `body`, treating an empty body or `null` as `{}`.
    ///
    /// The `request_id` populates the `instance` field of the returned
    /// problem. The problem is boxed to keep the `Err` variant small.
    fn parse(body: &[u8], request_id: &str) -> Result<Self, Box<ProblemDetails>>;
}

fn into_problem<T>(decoded: LibResult<T>, request_id: &str) -> Result<T, Box<ProblemDetails>> {
    decoded.map_err(|e| Box::new(from_lib_error(&e, request_id)))
}

impl RequestBody for AssignmentRequest {
    fn parse(body: &[u8], request_id: &str) -> Result<Self, Box<ProblemDetails>> {
        into_problem(AssignmentRequest::from_json_slice(body), request_id)
    }
}

impl RequestBody for EtaRequest {
    fn parse(body: &[u8], request_id: &str) -> Result<Self, Box<ProblemDetails>> {
        into_problem(EtaRequest::from_json_slice(body), request_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PROBLEM_INVALID_REQUEST;

    #[test]
    fn test_assignment_request_parses() {
        let req = AssignmentRequest::parse(
            br#"{"motos":[{"id":1}],"orders":[{"id":"a"},{"id":"b"}],"speed_kmh":"30"}"#,
            "test",
        )
        .unwrap();
        assert_eq!(req.motos.len(), 1);
        assert_eq!(req.orders.len(), 2);
        assert_eq!(req.speed_kmh, Some(30.0));
    }

    #[test]
    fn test_empty_body_is_an_empty_request() {
        let req = EtaRequest::parse(b"", "test").unwrap();
        assert!(req.moto_lat.is_none());
        let req = AssignmentRequest::parse(b"null", "test").unwrap();
        assert!(req.motos.is_empty());
    }

    #[test]
    fn test_malformed_json_is_a_bad_request() {
        let err = AssignmentRequest::parse(b"{\"motos\": [", "req-1").unwrap_err();
        assert_eq!(err.status, 400);
        assert_eq!(err.type_uri, PROBLEM_INVALID_REQUEST);
        assert_eq!(err.instance.as_deref(), Some("req-1"));
    }

    #[test]
    fn test_non_object_body_is_a_bad_request() {
        let err = EtaRequest::parse(b"42", "req-2").unwrap_err();
        assert_eq!(err.status, 400);
        assert!(err.detail.as_deref().unwrap().contains("number"));
    }
}
