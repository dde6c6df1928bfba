//! クライアント側の翻訳機能
/// 翻訳漏れの検出
pub mod coverage;
/// 翻訳対象の UI モデル
pub mod page;
/// 言語設定の永続化
pub mod preferences;
/// 翻訳サービス本体
pub mod translator;

pub use coverage::{
    MissingTranslation,
    missing_translations,
};
pub use page::{
    Element,
    ElementContent,
    ElementId,
    LanguageSwitcher,
    Page,
    SwitcherButton,
};
pub use preferences::{
    FilePreferences,
    GLOBAL_LANGUAGE_KEY,
    MemoryPreferences,
    PreferenceError,
    PreferenceStore,
};
pub use translator::{
    LanguageChanged,
    Translator,
};
