//! Per-request outcome of a secondary fetch.

use crate::api::{ApiError, ApiResponse};
use serde::de::DeserializeOwned;

/// Result of one secondary fetch, kept as a value so a failure never
/// propagates into sibling fetches.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome<T> {
    Success(T),
    /// Non-2xx status, transport failure or undecodable body.
    Failed(ApiError),
    /// Not applicable, e.g. a 404 on an optional lookup. Not an error.
    Skipped,
}

/// How a 404 on a secondary fetch is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// The resource must exist; a 404 is a failure.
    Required,
    /// The resource may not exist yet; a 404 means "no value".
    Optional,
}

impl<T> FetchOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, FetchOutcome::Failed(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, FetchOutcome::Skipped)
    }

    pub fn value(self) -> Option<T> {
        match self {
            FetchOutcome::Success(value) => Some(value),
            FetchOutcome::Failed(_) | FetchOutcome::Skipped => None,
        }
    }

    pub fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.value().unwrap_or_default()
    }
}

/// Classifies a settled request.
pub fn classify<T: DeserializeOwned>(
    result: Result<ApiResponse, ApiError>,
    lookup: Lookup,
) -> FetchOutcome<T> {
    let response = match result {
        Ok(response) => response,
        Err(e) => return FetchOutcome::Failed(e),
    };
    if response.status == 404 && lookup == Lookup::Optional {
        return FetchOutcome::Skipped;
    }
    if !response.is_success() {
        return FetchOutcome::Failed(ApiError::from_response(&response));
    }
    match response.json() {
        Ok(value) => FetchOutcome::Success(value),
        Err(e) => FetchOutcome::Failed(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RatingSummary;

    #[test]
    fn success_decodes_body() {
        let outcome: FetchOutcome<RatingSummary> = classify(
            Ok(ApiResponse::new(
                200,
                r#"{"average_rating":4.5,"review_count":2}"#,
            )),
            Lookup::Required,
        );
        assert_eq!(outcome.unwrap_or_default().average_rating, 4.5);
    }

    #[test]
    fn not_found_depends_on_lookup() {
        let optional: FetchOutcome<RatingSummary> =
            classify(Ok(ApiResponse::new(404, "")), Lookup::Optional);
        assert!(optional.is_skipped());

        let required: FetchOutcome<RatingSummary> =
            classify(Ok(ApiResponse::new(404, "")), Lookup::Required);
        assert!(required.is_failed());
    }

    #[test]
    fn other_statuses_transport_errors_and_bad_bodies_fail() {
        let server: FetchOutcome<RatingSummary> =
            classify(Ok(ApiResponse::new(503, "")), Lookup::Optional);
        assert!(server.is_failed());

        let network: FetchOutcome<RatingSummary> = classify(
            Err(ApiError::Transport("connection reset".into())),
            Lookup::Optional,
        );
        assert!(network.is_failed());

        let garbage: FetchOutcome<RatingSummary> =
            classify(Ok(ApiResponse::new(200, "<html>")), Lookup::Required);
        assert!(matches!(garbage, FetchOutcome::Failed(ApiError::Decode(_))));
    }

    #[test]
    fn defaults_apply_to_failed_and_skipped() {
        assert_eq!(FetchOutcome::<f64>::Skipped.unwrap_or_default(), 0.0);
        assert_eq!(
            FetchOutcome::<i64>::Failed(ApiError::Transport("x".into())).unwrap_or_default(),
            0
        );
        assert_eq!(FetchOutcome::Success(3).value(), Some(3));
    }
}
