//! HTTP ハンドラー間で共有する状態

use crate::tracker::ClickTracker;

/// HTTP サーバーの共有状態
///
/// `ClickTracker` は内部で `Arc` を持つため、クローンしても同じストアを指します。
#[derive(Debug, Clone)]
pub struct AppState {
    /// クリック数記録
    pub tracker: ClickTracker,
}

impl AppState {
    /// 新しい `AppState` を作成
    #[must_use]
    pub const fn new(tracker: ClickTracker) -> Self {
        Self { tracker }
    }
}

#[cfg(test)]
mod tests {
    use googletest::prelude::*;

    use super::*;
    use crate::test_utils::temp_store;

    #[googletest::test]
    fn debug_impl_works() {
        let (_dir, store) = temp_store();
        let state = AppState::new(ClickTracker::new(store));

        let debug_str = format!("{state:?}");

        expect_that!(debug_str.as_str(), contains_substring("AppState"));
        expect_that!(debug_str.as_str(), contains_substring("tracker"));
    }

    #[tokio::test]
    async fn cloned_state_shares_store() {
        let (_dir, store) = temp_store();
        let state1 = AppState::new(ClickTracker::new(store));
        let state2 = state1.clone();

        assert!(state1.tracker.increment("maze").await.is_ok());

        let records = state2.tracker.list_all().await.unwrap_or_default();
        assert_eq!(records.len(), 1);
    }
}
