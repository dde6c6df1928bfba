//! 翻訳対象の UI モデル
//!
//! ブラウザの DOM の代わりに、翻訳キーが紐付いた要素と言語切り替えボタンだけを保持します。

use crate::types::LanguageCode;

/// `Page` 内の要素 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(usize);

/// 要素の中身
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ElementContent {
    #[default]
    Empty,
    /// プレーンテキスト
    Text(String),
    /// そのまま描画されるマークアップ
    Markup(String),
}

/// 翻訳キーを持ちうる UI 要素
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    /// タグ名（`input`, `textarea`, `h1` など）
    pub tag: String,
    /// テキストとして書き込む翻訳キー
    pub text_key: Option<String>,
    /// マークアップとして書き込む翻訳キー
    pub markup_key: Option<String>,
    pub content: ElementContent,
    pub placeholder: Option<String>,
}

impl Element {
    /// テキスト翻訳キー付きの要素
    #[must_use]
    pub fn with_text_key(tag: impl Into<String>, key: impl Into<String>) -> Self {
        Self { tag: tag.into(), text_key: Some(key.into()), ..Self::default() }
    }

    /// マークアップ翻訳キー付きの要素
    #[must_use]
    pub fn with_markup_key(tag: impl Into<String>, key: impl Into<String>) -> Self {
        Self { tag: tag.into(), markup_key: Some(key.into()), ..Self::default() }
    }

    /// 入力系の要素はテキストではなく placeholder に翻訳を書き込む
    #[must_use]
    pub fn is_text_input(&self) -> bool {
        self.tag.eq_ignore_ascii_case("input") || self.tag.eq_ignore_ascii_case("textarea")
    }

    /// 表示中のテキスト（マークアップの場合はそのまま）
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match &self.content {
            ElementContent::Empty => None,
            ElementContent::Text(s) | ElementContent::Markup(s) => Some(s),
        }
    }
}

/// 言語切り替えボタン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitcherButton {
    pub language: LanguageCode,
    pub label: String,
    pub active: bool,
}

/// 言語切り替え UI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageSwitcher {
    buttons: Vec<SwitcherButton>,
}

impl LanguageSwitcher {
    #[must_use]
    pub fn new(buttons: impl IntoIterator<Item = (LanguageCode, String)>) -> Self {
        Self {
            buttons: buttons
                .into_iter()
                .map(|(language, label)| SwitcherButton { language, label, active: false })
                .collect(),
        }
    }

    /// English / 日本語 の 2 ボタン
    #[must_use]
    pub fn default_buttons() -> Self {
        Self {
            buttons: [("en", "English"), ("ja", "日本語")]
                .into_iter()
                .filter_map(|(code, label)| {
                    LanguageCode::parse(code).ok().map(|language| SwitcherButton {
                        language,
                        label: label.to_string(),
                        active: false,
                    })
                })
                .collect(),
        }
    }

    #[must_use]
    pub fn buttons(&self) -> &[SwitcherButton] {
        &self.buttons
    }

    /// 指定言語のボタンを持っているか
    #[must_use]
    pub fn offers(&self, language: &LanguageCode) -> bool {
        self.buttons.iter().any(|b| &b.language == language)
    }

    /// 指定言語のボタンだけを active にする
    pub fn set_active(&mut self, language: &LanguageCode) {
        for button in &mut self.buttons {
            button.active = &button.language == language;
        }
    }

    /// active なボタンの言語
    #[must_use]
    pub fn active(&self) -> Option<&LanguageCode> {
        self.buttons.iter().find(|b| b.active).map(|b| &b.language)
    }
}

/// 1 ページ分の UI
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    elements: Vec<Element>,
    switcher: Option<LanguageSwitcher>,
}

impl Page {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// 要素を追加して ID を返す
    pub fn add(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.get(id.0)
    }

    pub fn elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.elements.iter_mut()
    }

    #[must_use]
    pub const fn switcher(&self) -> Option<&LanguageSwitcher> {
        self.switcher.as_ref()
    }

    pub const fn switcher_mut(&mut self) -> Option<&mut LanguageSwitcher> {
        self.switcher.as_mut()
    }

    pub fn set_switcher(&mut self, switcher: LanguageSwitcher) {
        self.switcher = Some(switcher);
    }
}
