//! ゲームごとのクリック数記録
/// 非同期インターフェース
pub mod service;
/// SQLite ストア
pub mod store;

pub use service::{
    ClickTracker,
    TrackerError,
};
pub use store::{
    ClickRecord,
    ClickStore,
    StoreError,
};
