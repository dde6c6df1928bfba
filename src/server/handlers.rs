//! `/api/*` のハンドラー

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{
    Query,
    State,
};
use serde::Serialize;

use super::error::ApiError;
use super::state::AppState;
use crate::tracker::ClickRecord;

/// `/api/click` のクエリパラメータ名
pub const GAME_PARAM: &str = "game";

/// `/api/click` の成功レスポンス
#[derive(Debug, Serialize)]
pub struct ClickResponse {
    pub ok: bool,
    pub game: String,
}

/// クリックを 1 件記録する（GET / POST 共通）
pub async fn record_click(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<ClickResponse>, ApiError> {
    let raw = query.map(|Query(pairs)| first_game(pairs)).unwrap_or_default();

    let record = state.tracker.increment(&raw).await?;

    Ok(Json(ClickResponse { ok: true, game: record.game_id.into_inner() }))
}

/// 最初の `game` パラメータの値
///
/// `game` が複数ある場合は先頭を使う。クエリ文字列自体が壊れている場合は
/// 呼び出し側で `game` 欠落と同じ扱いになる。
fn first_game(pairs: Vec<(String, String)>) -> String {
    pairs.into_iter().find(|(key, _)| key == GAME_PARAM).map(|(_, value)| value).unwrap_or_default()
}

/// 全ゲームのクリック数（多い順）
pub async fn stats(State(state): State<AppState>) -> Result<Json<Vec<ClickRecord>>, ApiError> {
    let records = state.tracker.list_all().await?;
    Ok(Json(records))
}
