use crate::domain::error::{ErrorKind, LibraryError};
use crate::transport::http::types::{ApiResponse, AppState};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use std::future::Future;

/// Runs a library call under the request deadline.
///
/// On expiry the call's future is dropped, which aborts whatever storage call
/// it was awaiting. Steps that already completed stay committed.
pub async fn within_deadline<T, F>(state: &AppState, fut: F) -> Result<T, LibraryError>
where
    F: Future<Output = Result<T, LibraryError>>,
{
    match tokio::time::timeout(state.request_timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(LibraryError::Cancelled(format!(
            "request deadline of {}s exceeded",
            state.request_timeout.as_secs_f64()
        ))),
    }
}

pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidArgument => StatusCode::BAD_REQUEST,
        ErrorKind::NotFound => StatusCode::NOT_FOUND,
        // The envelope's data.kind tells it apart from storage failures.
        ErrorKind::ReferentialIntegrityViolation => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::StorageUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        ErrorKind::Cancelled => StatusCode::GATEWAY_TIMEOUT,
    }
}

/// Error envelope: the message plus the error kind and, for multi-step
/// operations, the step that failed.
pub fn error_response(err: &LibraryError) -> Response {
    let kind = err.kind();
    let mut data = serde_json::json!({ "kind": kind.as_str() });
    if let Some(step) = err.failed_step() {
        data["step"] = serde_json::Value::from(step.as_str());
    }
    (
        status_for(kind),
        Json(ApiResponse {
            success: false,
            data: Some(data),
            error: Some(err.to_string()),
        }),
    )
        .into_response()
}

pub fn data_response<T: Serialize>(status: StatusCode, data: &T) -> Response {
    match serde_json::to_value(data) {
        Ok(value) => (
            status,
            Json(ApiResponse {
                success: true,
                data: Some(value),
                error: None,
            }),
        )
            .into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ApiResponse {
                success: false,
                data: None,
                error: Some(format!("Failed to serialize response: {}", e)),
            }),
        )
            .into_response(),
    }
}

pub fn empty_response(status: StatusCode) -> Response {
    (
        status,
        Json(ApiResponse {
            success: true,
            data: None,
            error: None,
        }),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::LibraryService;
    use crate::domain::error::OperationStep;
    use crate::storage::Stores;
    use std::sync::Arc;
    use std::time::Duration;

    fn state(timeout: Duration) -> AppState {
        let stores = Stores::in_memory();
        AppState {
            library: Arc::new(LibraryService::new(
                stores.developers,
                stores.games,
                tracing::Dispatch::none(),
            )),
            request_timeout: timeout,
        }
    }

    #[test]
    fn kinds_map_to_statuses() {
        assert_eq!(status_for(ErrorKind::InvalidArgument), StatusCode::BAD_REQUEST);
        assert_eq!(status_for(ErrorKind::NotFound), StatusCode::NOT_FOUND);
        assert_eq!(
            status_for(ErrorKind::ReferentialIntegrityViolation),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            status_for(ErrorKind::StorageUnavailable),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn step_errors_use_inner_status() {
        let err = LibraryError::not_found("developer", "x").during(OperationStep::DeleteDeveloper);
        assert_eq!(error_response(&err).status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn expired_deadline_is_cancelled() {
        let state = state(Duration::from_millis(20));
        let err = within_deadline(&state, async {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok::<_, LibraryError>(())
        })
        .await
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
        assert_eq!(error_response(&err).status(), StatusCode::GATEWAY_TIMEOUT);
    }

    #[tokio::test]
    async fn completed_call_passes_through() {
        let state = state(Duration::from_secs(5));
        let developers = within_deadline(&state, state.library.list_developers())
            .await
            .unwrap();
        assert!(developers.is_empty());
    }
}
