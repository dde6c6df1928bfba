//! 翻訳サービス
//!
//! 現在の言語を保持し、ドット区切りのキーを解決して `Page` 上の要素へ書き込みます。
//! 言語が変わるたびに全要素を再描画し、`LanguageChanged` を購読者へ通知します。

use tokio::sync::broadcast;

use super::page::{
    ElementContent,
    LanguageSwitcher,
    Page,
};
use super::preferences::{
    GLOBAL_LANGUAGE_KEY,
    PreferenceStore,
    namespace_language_key,
};
use crate::input::translation::{
    LookupError,
    TranslationNode,
    TranslationTable,
};
use crate::types::LanguageCode;

/// 通知チャネルの容量
const EVENT_CAPACITY: usize = 16;

/// 言語変更通知
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageChanged {
    pub language: LanguageCode,
}

/// 翻訳サービス
///
/// グローバルなシングルトンではなく、UI 層が所有して明示的に受け渡します。
#[derive(Debug)]
pub struct Translator<S> {
    /// 翻訳テーブル（`initialize` 後は不変）
    table: TranslationTable,
    /// 言語設定の保存キーに使う名前空間
    namespace: String,
    /// 現在の言語
    current: LanguageCode,
    /// 言語設定の保存先
    preferences: S,
    /// 描画対象
    page: Page,
    /// 言語変更通知
    events: broadcast::Sender<LanguageChanged>,
}

impl<S: PreferenceStore> Translator<S> {
    /// 保存済みの言語を復元して作成（未保存・不正値の場合は `en`）
    #[must_use]
    pub fn new(preferences: S, page: Page) -> Self {
        let current = preferences
            .get(GLOBAL_LANGUAGE_KEY)
            .and_then(|stored| match LanguageCode::parse(&stored) {
                Ok(code) => Some(code),
                Err(e) => {
                    tracing::warn!("Ignoring stored language preference: {}", e);
                    None
                }
            })
            .unwrap_or_default();

        let (events, _) = broadcast::channel(EVENT_CAPACITY);

        Self {
            table: TranslationTable::new(),
            namespace: String::new(),
            current,
            preferences,
            page,
            events,
        }
    }

    /// 翻訳テーブルを設定して初回描画を行う
    ///
    /// ページに言語切り替え UI がなければ English / 日本語 のボタンを追加します。
    pub fn initialize(&mut self, table: TranslationTable, namespace: impl Into<String>) {
        self.table = table;
        self.namespace = namespace.into();

        if self.page.switcher().is_none() {
            self.page.set_switcher(LanguageSwitcher::default_buttons());
        }

        tracing::debug!(
            namespace = %self.namespace,
            language = %self.current,
            "Initializing translator"
        );
        self.set_language(self.current.clone());
    }

    /// 言語を切り替える
    ///
    /// 保存、ボタン状態の更新、再描画、通知の順に行います。同じ言語で何度呼んでも結果は同じです。
    pub fn set_language(&mut self, language: LanguageCode) {
        if !self.table.contains_language(&language) {
            tracing::warn!(language = %language, "No translations loaded for language");
        }
        self.current = language;

        self.persist(GLOBAL_LANGUAGE_KEY.to_string());
        self.persist(namespace_language_key(&self.namespace));

        if let Some(switcher) = self.page.switcher_mut() {
            switcher.set_active(&self.current);
        }

        self.apply_all();

        if self.events.send(LanguageChanged { language: self.current.clone() }).is_err() {
            tracing::trace!("No language change listeners");
        }
    }

    /// 言語切り替えボタンのクリック
    ///
    /// ボタンが存在する言語なら切り替えて `true` を返します。
    pub fn handle_switcher_click(&mut self, language: &str) -> bool {
        let Ok(code) = LanguageCode::parse(language) else {
            return false;
        };
        if !self.page.switcher().is_some_and(|s| s.offers(&code)) {
            tracing::debug!(language = %code, "Click on unknown switcher button");
            return false;
        }
        self.set_language(code);
        true
    }

    /// キーを解決する（厳密版）
    ///
    /// # Errors
    /// See [`LookupError`].
    pub fn lookup(&self, key: &str) -> Result<&TranslationNode, LookupError> {
        self.table.lookup(&self.current, key)
    }

    /// キーを解決する
    ///
    /// 見つからない場合は警告を出してキー文字列そのものを返します。
    #[must_use]
    pub fn translate(&self, key: &str) -> TranslationNode {
        match self.lookup(key) {
            Ok(node) => node.clone(),
            Err(e) => {
                tracing::warn!("{} for language: {}", e, self.current);
                TranslationNode::Text(key.to_string())
            }
        }
    }

    /// 文字列として解決する（文字列以外の値は表示用テキストに変換）
    #[must_use]
    pub fn translate_text(&self, key: &str) -> String {
        match self.translate(key) {
            TranslationNode::Text(s) => s,
            other => other.display_text().unwrap_or_default(),
        }
    }

    /// 翻訳キーを持つ全要素を再描画する
    pub fn apply_all(&mut self) {
        let mut page = std::mem::take(&mut self.page);

        for element in page.elements_mut() {
            if let Some(key) = element.text_key.as_deref()
                && let Some(text) = self.translate(key).display_text()
            {
                if element.is_text_input() {
                    element.placeholder = Some(text);
                } else {
                    element.content = ElementContent::Text(text);
                }
            }

            if let Some(key) = element.markup_key.as_deref()
                && let Some(markup) = self.translate(key).display_text()
            {
                element.content = ElementContent::Markup(markup);
            }
        }

        self.page = page;
    }

    #[must_use]
    pub const fn current_language(&self) -> &LanguageCode {
        &self.current
    }

    /// 言語変更通知を購読する
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<LanguageChanged> {
        self.events.subscribe()
    }

    #[must_use]
    pub const fn page(&self) -> &Page {
        &self.page
    }

    pub const fn page_mut(&mut self) -> &mut Page {
        &mut self.page
    }

    #[must_use]
    pub const fn preferences(&self) -> &S {
        &self.preferences
    }

    /// 現在の言語を保存する（失敗しても切り替えは続行）
    fn persist(&mut self, key: String) {
        if let Err(e) = self.preferences.set(&key, self.current.as_str()) {
            tracing::warn!(key = %key, "Failed to persist language preference: {}", e);
        }
    }
}
