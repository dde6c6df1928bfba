//! SQLite によるクリック数の永続化

use std::path::{
    Path,
    PathBuf,
};
use std::time::Duration;

use rusqlite::{
    Connection,
    Row,
    params,
};
use serde::Serialize;
use thiserror::Error;

use crate::types::GameId;

/// 書き込み競合時に待つ最大時間
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

const CREATE_TABLE: &str = "
    CREATE TABLE IF NOT EXISTS game_clicks (
        game_id TEXT PRIMARY KEY,
        clicks INTEGER NOT NULL DEFAULT 0 CHECK (clicks >= 0)
    )
";

/// 作成と加算を 1 文で行う（同一 ID への同時リクエストでも取りこぼさない）
const UPSERT_CLICK: &str = "
    INSERT INTO game_clicks (game_id, clicks) VALUES (?1, 1)
    ON CONFLICT(game_id) DO UPDATE SET clicks = clicks + 1
    RETURNING game_id, clicks
";

const ALL_STATS: &str =
    "SELECT game_id, clicks FROM game_clicks ORDER BY clicks DESC, game_id ASC";

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// 保存されている値がゲーム ID として不正
    #[error("Corrupt row for game '{0}'")]
    CorruptRow(String),
}

/// 1 ゲーム分のクリック数
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClickRecord {
    pub game_id: GameId,
    pub clicks: u64,
}

impl ClickRecord {
    fn from_row(row: &Row<'_>) -> Result<(String, i64), rusqlite::Error> {
        Ok((row.get(0)?, row.get(1)?))
    }

    fn try_from_parts((game_id, clicks): (String, i64)) -> Result<Self, StoreError> {
        let clicks = u64::try_from(clicks).map_err(|_| StoreError::CorruptRow(game_id.clone()))?;
        let game_id = GameId::parse(&game_id).map_err(|e| StoreError::CorruptRow(e.raw))?;
        Ok(Self { game_id, clicks })
    }
}

/// クリック数テーブル
///
/// 操作ごとに接続を開きます。同時書き込みの直列化は SQLite のロックに任せ、
/// アプリケーション側ではロックを取りません。
#[derive(Debug, Clone)]
pub struct ClickStore {
    path: PathBuf,
}

impl ClickStore {
    /// データベースを開き、テーブルがなければ作成する
    ///
    /// # Errors
    /// ファイルを開けない、またはスキーマを作成できない場合
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        let conn = store.connect()?;

        let mode: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;
        tracing::debug!(journal_mode = %mode, "Opened click database at {:?}", store.path);

        conn.execute_batch(CREATE_TABLE)?;
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn connect(&self) -> Result<Connection, StoreError> {
        let conn = Connection::open(&self.path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(conn)
    }

    /// クリック数を 1 加算する（未登録なら 1 で作成）
    ///
    /// # Errors
    /// 書き込みに失敗した場合。その場合カウントは変化しません。
    pub fn increment(&self, game: &GameId) -> Result<ClickRecord, StoreError> {
        let conn = self.connect()?;
        let parts = conn.query_row(UPSERT_CLICK, params![game.as_str()], ClickRecord::from_row)?;
        let record = ClickRecord::try_from_parts(parts)?;
        tracing::debug!(game = %record.game_id, clicks = record.clicks, "Recorded click");
        Ok(record)
    }

    /// 全ゲームのクリック数（多い順、同数は ID 昇順）
    ///
    /// ゲーム ID として不正な行は警告を出して除外します。
    ///
    /// # Errors
    /// 読み込みに失敗した場合
    pub fn list_all(&self) -> Result<Vec<ClickRecord>, StoreError> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare(ALL_STATS)?;
        let rows = stmt.query_map([], ClickRecord::from_row)?;

        let mut records = Vec::new();
        for row in rows {
            // 不正な行は読み飛ばし、残りのランキングは返す
            match ClickRecord::try_from_parts(row?) {
                Ok(record) => records.push(record),
                Err(e) => tracing::warn!("Skipping stored click row: {}", e),
            }
        }
        Ok(records)
    }
}
