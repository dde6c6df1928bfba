//! API エラーと HTTP レスポンスへの変換

use axum::Json;
use axum::http::StatusCode;
use axum::response::{
    IntoResponse,
    Response,
};
use serde::Serialize;
use thiserror::Error;

use crate::tracker::TrackerError;

/// API ハンドラーのエラー
#[derive(Error, Debug)]
pub enum ApiError {
    /// `game` パラメータが欠落、または不正
    #[error("invalid game")]
    InvalidGame,

    /// ストレージなど内部のエラー
    #[error("internal error: {0}")]
    Internal(String),
}

/// 失敗時のレスポンス本体 `{ "ok": false, "error": ... }`
#[derive(Debug, Serialize)]
struct ErrorBody {
    /// 常に `false`
    ok: bool,
    /// 安定したエラーメッセージ
    error: &'static str,
}

impl From<TrackerError> for ApiError {
    fn from(error: TrackerError) -> Self {
        match error {
            TrackerError::InvalidGame(_) => Self::InvalidGame,
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::InvalidGame => (StatusCode::BAD_REQUEST, "invalid game"),
            Self::Internal(detail) => {
                tracing::error!("Request failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
            }
        };
        (status, Json(ErrorBody { ok: false, error: message })).into_response()
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;
    use crate::tracker::StoreError;
    use crate::types::GameId;

    #[rstest]
    #[case::invalid(ApiError::InvalidGame, StatusCode::BAD_REQUEST)]
    #[case::internal(ApiError::Internal("disk full".into()), StatusCode::INTERNAL_SERVER_ERROR)]
    fn test_status_codes(#[case] error: ApiError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }

    #[googletest::test]
    fn test_from_tracker_error() {
        let invalid = GameId::parse("../etc").map_err(TrackerError::from);
        let storage = TrackerError::Storage(StoreError::CorruptRow("x".into()));

        expect_that!(
            matches!(invalid.map_err(ApiError::from), Err(ApiError::InvalidGame)),
            eq(true)
        );
        expect_that!(matches!(ApiError::from(storage), ApiError::Internal(_)), eq(true));
    }
}
