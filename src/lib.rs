//! kids-games
//!
//! 子ども向けブラウザゲーム集の共通基盤: 翻訳ヘルパーとクリック数記録サーバー

pub mod config;
pub mod i18n;
pub mod input;
pub mod server;
pub mod tracker;
pub mod types;

#[cfg(test)]
mod test_utils;

pub use i18n::Translator;
pub use tracker::ClickTracker;
