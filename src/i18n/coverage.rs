//! 翻訳漏れの検出

use std::collections::BTreeSet;

use crate::input::translation::TranslationTable;
use crate::types::LanguageCode;

/// ある言語に存在しないキー
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct MissingTranslation {
    pub language: LanguageCode,
    pub key: String,
}

/// いずれかの言語に存在するが、他の言語には存在しないキーを列挙する
///
/// 結果は言語、キーの順にソートされます。
#[must_use]
pub fn missing_translations(table: &TranslationTable) -> Vec<MissingTranslation> {
    let languages = table.languages();

    let per_language: Vec<(&LanguageCode, BTreeSet<String>)> =
        languages.iter().map(|language| (*language, table.keys(language))).collect();

    let all_keys: BTreeSet<&String> = per_language.iter().flat_map(|(_, keys)| keys).collect();

    let mut missing = Vec::new();
    for (language, keys) in &per_language {
        for key in &all_keys {
            if !keys.contains(*key) {
                missing.push(MissingTranslation {
                    language: (*language).clone(),
                    key: (*key).clone(),
                });
            }
        }
    }

    missing
}
