//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![cfg(test)]
#![allow(clippy::unwrap_used)]

use serde_json::json;
use tempfile::TempDir;

use crate::input::translation::TranslationTable;
use crate::tracker::ClickStore;
use crate::types::{
    GameId,
    LanguageCode,
};

/// 言語コードを作成する
pub(crate) fn lang(code: &str) -> LanguageCode {
    LanguageCode::parse(code).unwrap()
}

/// ゲーム ID を作成する
pub(crate) fn game(id: &str) -> GameId {
    GameId::parse(id).unwrap()
}

/// テスト用の翻訳テーブル（en / ja）
///
/// `maxBalls` と `empty` は en のみ
pub(crate) fn sample_table() -> TranslationTable {
    TranslationTable::from_json(json!({
        "en": {
            "title": "ABC Bouncing Balls",
            "menu": { "start": "Start", "options": { "sound": "Sound" } },
            "form": { "name": "Your name" },
            "help": "<b>Tap</b> the balls",
            "maxBalls": 26,
            "empty": ""
        },
        "ja": {
            "title": "ABCはずむボール",
            "menu": { "start": "スタート", "options": { "sound": "おと" } },
            "form": { "name": "なまえ" },
            "help": "<b>タップ</b>してね"
        }
    }))
    .unwrap()
}

/// 一時ディレクトリ上の `ClickStore` を作成する
///
/// # Returns
/// ディレクトリ（drop で削除される）とストア
pub(crate) fn temp_store() -> (TempDir, ClickStore) {
    let dir = TempDir::new().unwrap();
    let store = ClickStore::open(dir.path().join("clicks.db")).unwrap();
    (dir, store)
}
