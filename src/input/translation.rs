//! Translation table input definitions

use std::collections::{
    BTreeMap,
    BTreeSet,
    HashMap,
};
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::types::{
    InvalidLanguageCode,
    LanguageCode,
};

/// Separator between the segments of a translation key (`menu.start`).
pub const KEY_SEPARATOR: char = '.';

/// Errors raised while building a [`TranslationTable`].
#[derive(Error, Debug)]
pub enum TranslationError {
    #[error("Failed to read translation file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    InvalidLanguage(#[from] InvalidLanguageCode),

    /// The document (or one language entry in it) is not a JSON object.
    #[error("Expected an object for {context}")]
    NotAnObject { context: String },
}

/// Why a dotted key could not be resolved.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LookupError {
    #[error("No translations loaded for language: {0}")]
    UnknownLanguage(LanguageCode),

    #[error("Translation key not found: {key} (missing segment '{segment}')")]
    MissingKey { key: String, segment: String },

    /// A leaf value was reached before the key was exhausted.
    #[error("Translation key not found: {key} ('{segment}' is not a container)")]
    NotAContainer { key: String, segment: String },
}

/// One value in a translation tree.
#[derive(Debug, Clone, PartialEq)]
pub enum TranslationNode {
    Text(String),
    Number(serde_json::Number),
    Flag(bool),
    Null,
    List(Vec<TranslationNode>),
    Map(BTreeMap<String, TranslationNode>),
}

impl TranslationNode {
    /// Text shown when the value is painted into an element.
    ///
    /// Returns `None` for values that must leave the element untouched:
    /// empty strings, `0`, `false`, null, and compound values.
    #[must_use]
    pub fn display_text(&self) -> Option<String> {
        match self {
            Self::Text(s) if !s.is_empty() => Some(s.clone()),
            Self::Number(n) if !is_zero(n) => Some(n.to_string()),
            Self::Flag(true) => Some("true".to_string()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Child reached by one key segment.
    ///
    /// Maps are entered by name, lists by decimal index.
    fn child(&self, segment: &str) -> Result<Option<&Self>, ()> {
        match self {
            Self::Map(map) => Ok(map.get(segment)),
            Self::List(items) => Ok(segment.parse::<usize>().ok().and_then(|i| items.get(i))),
            _ => Err(()),
        }
    }
}

#[allow(clippy::float_cmp)]
fn is_zero(n: &serde_json::Number) -> bool {
    n.as_f64().is_some_and(|v| v == 0.0)
}

impl From<Value> for TranslationNode {
    fn from(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Number(n) => Self::Number(n),
            Value::Bool(b) => Self::Flag(b),
            Value::Null => Self::Null,
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(map) => {
                Self::Map(map.into_iter().map(|(k, v)| (k, Self::from(v))).collect())
            }
        }
    }
}

impl From<&str> for TranslationNode {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Translations for every supported language.
///
/// Loaded once per page and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TranslationTable {
    languages: HashMap<LanguageCode, TranslationNode>,
}

impl TranslationTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) the tree of one language.
    pub fn insert(&mut self, language: LanguageCode, root: BTreeMap<String, TranslationNode>) {
        self.languages.insert(language, TranslationNode::Map(root));
    }

    /// Build a table from `{ "en": { ... }, "ja": { ... } }`.
    ///
    /// # Examples
    /// ```
    /// use serde_json::json;
    /// use kids_games::input::translation::TranslationTable;
    /// use kids_games::types::LanguageCode;
    ///
    /// let table = TranslationTable::from_json(json!({
    ///     "en": { "menu": { "start": "Start" } },
    ///     "ja": { "menu": { "start": "スタート" } }
    /// }))
    /// .unwrap();
    ///
    /// let ja = LanguageCode::parse("ja").unwrap();
    /// let value = table.lookup(&ja, "menu.start").unwrap();
    /// assert_eq!(value.as_text(), Some("スタート"));
    /// ```
    ///
    /// # Errors
    /// The document or a language entry is not an object, or a language code
    /// is malformed.
    pub fn from_json(value: Value) -> Result<Self, TranslationError> {
        let Value::Object(languages) = value else {
            return Err(TranslationError::NotAnObject { context: "translation table".into() });
        };

        let mut table = Self::new();
        for (code, tree) in languages {
            let language = LanguageCode::parse(&code)?;
            let Value::Object(root) = tree else {
                return Err(TranslationError::NotAnObject { context: format!("language '{code}'") });
            };
            table.insert(
                language,
                root.into_iter().map(|(k, v)| (k, TranslationNode::from(v))).collect(),
            );
        }
        Ok(table)
    }

    /// # Errors
    /// Invalid JSON or any error of [`Self::from_json`].
    pub fn from_json_str(text: &str) -> Result<Self, TranslationError> {
        Self::from_json(serde_json::from_str(text)?)
    }

    /// Load every `<language>.json` file of a locales directory.
    ///
    /// Files whose stem is not a language code are skipped.
    ///
    /// # Errors
    /// Read or parse failure of any candidate file.
    pub fn load_dir(dir: &Path) -> Result<Self, TranslationError> {
        let mut table = Self::new();

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let Ok(language) = LanguageCode::parse(stem) else {
                tracing::debug!("Skipping non-language file: {:?}", path);
                continue;
            };

            tracing::debug!(language = %language, "Loading translations from {:?}", path);
            let content = std::fs::read_to_string(&path)?;
            let Value::Object(root) = serde_json::from_str::<Value>(&content)? else {
                return Err(TranslationError::NotAnObject {
                    context: path.to_string_lossy().to_string(),
                });
            };
            table.insert(
                language,
                root.into_iter().map(|(k, v)| (k, TranslationNode::from(v))).collect(),
            );
        }

        Ok(table)
    }

    /// Languages in the table, sorted.
    #[must_use]
    pub fn languages(&self) -> Vec<&LanguageCode> {
        let mut languages: Vec<_> = self.languages.keys().collect();
        languages.sort();
        languages
    }

    #[must_use]
    pub fn contains_language(&self, language: &LanguageCode) -> bool {
        self.languages.contains_key(language)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }

    /// Resolve a dotted key for one language.
    ///
    /// # Errors
    /// See [`LookupError`].
    pub fn lookup(
        &self,
        language: &LanguageCode,
        key: &str,
    ) -> Result<&TranslationNode, LookupError> {
        let mut node = self
            .languages
            .get(language)
            .ok_or_else(|| LookupError::UnknownLanguage(language.clone()))?;

        for segment in key.split(KEY_SEPARATOR) {
            node = match node.child(segment) {
                Ok(Some(child)) => child,
                Ok(None) => {
                    return Err(LookupError::MissingKey {
                        key: key.to_string(),
                        segment: segment.to_string(),
                    });
                }
                Err(()) => {
                    return Err(LookupError::NotAContainer {
                        key: key.to_string(),
                        segment: segment.to_string(),
                    });
                }
            };
        }

        Ok(node)
    }

    /// Flattened leaf keys of one language (`menu.start`, `levels.0`).
    ///
    /// Empty for unknown languages.
    #[must_use]
    pub fn keys(&self, language: &LanguageCode) -> BTreeSet<String> {
        let mut result = BTreeSet::new();
        if let Some(root) = self.languages.get(language) {
            flatten_node(root, None, &mut result);
        }
        result
    }
}

fn flatten_node(node: &TranslationNode, prefix: Option<&str>, result: &mut BTreeSet<String>) {
    let join = |segment: &str| {
        prefix.map_or_else(|| segment.to_string(), |p| format!("{p}{KEY_SEPARATOR}{segment}"))
    };

    match node {
        TranslationNode::Map(map) => {
            for (key, child) in map {
                flatten_node(child, Some(&join(key)), result);
            }
        }
        TranslationNode::List(items) => {
            for (index, child) in items.iter().enumerate() {
                flatten_node(child, Some(&join(&index.to_string())), result);
            }
        }
        _ => {
            if let Some(key) = prefix {
                result.insert(key.to_string());
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use googletest::prelude::*;
    use rstest::rstest;
    use serde_json::json;
    use tempfile::TempDir;

    use super::*;

    fn lang(code: &str) -> LanguageCode {
        LanguageCode::parse(code).unwrap()
    }

    fn sample_table() -> TranslationTable {
        TranslationTable::from_json(json!({
            "en": {
                "title": "Bouncing Balls",
                "menu": { "start": "Start", "help": "<b>Tap</b> a ball" },
                "levels": ["Easy", "Hard"],
                "maxBalls": 26,
                "empty": ""
            },
            "ja": {
                "title": "はずむボール",
                "menu": { "start": "スタート" }
            }
        }))
        .unwrap()
    }

    #[rstest]
    #[case::top_level("en", "title", "Bouncing Balls")]
    #[case::nested("en", "menu.start", "Start")]
    #[case::list_index("en", "levels.1", "Hard")]
    #[case::other_language("ja", "menu.start", "スタート")]
    fn test_lookup_found(#[case] code: &str, #[case] key: &str, #[case] expected: &str) {
        let table = sample_table();
        let node = table.lookup(&lang(code), key).unwrap();
        assert_eq!(node.as_text(), Some(expected));
    }

    #[googletest::test]
    fn test_lookup_returns_non_string_values_verbatim() {
        let table = sample_table();

        let number = table.lookup(&lang("en"), "maxBalls").unwrap();
        expect_that!(number.display_text().as_deref(), some(eq("26")));

        let menu = table.lookup(&lang("en"), "menu").unwrap();
        expect_that!(matches!(menu, TranslationNode::Map(m) if m.len() == 2), eq(true));
    }

    #[rstest]
    #[case::missing_leaf("menu.quit", "quit")]
    #[case::missing_branch("settings.sound", "settings")]
    #[case::list_out_of_range("levels.5", "5")]
    #[case::list_non_numeric("levels.first", "first")]
    fn test_lookup_missing(#[case] key: &str, #[case] segment: &str) {
        let table = sample_table();
        let error = table.lookup(&lang("en"), key).unwrap_err();
        assert_eq!(
            error,
            LookupError::MissingKey { key: key.to_string(), segment: segment.to_string() }
        );
    }

    #[googletest::test]
    fn test_lookup_through_leaf_is_shape_error() {
        let table = sample_table();
        let error = table.lookup(&lang("en"), "title.text").unwrap_err();
        expect_that!(
            error == LookupError::NotAContainer { key: "title.text".into(), segment: "text".into() },
            eq(true)
        );
    }

    #[googletest::test]
    fn test_lookup_unknown_language() {
        let table = sample_table();
        let error = table.lookup(&lang("fr"), "title").unwrap_err();
        expect_that!(error == LookupError::UnknownLanguage(lang("fr")), eq(true));
    }

    #[rstest]
    #[case::text(TranslationNode::from("Hi"), Some("Hi"))]
    #[case::empty_text(TranslationNode::from(""), None)]
    #[case::number(TranslationNode::Number(7.into()), Some("7"))]
    #[case::zero(TranslationNode::Number(0.into()), None)]
    #[case::true_flag(TranslationNode::Flag(true), Some("true"))]
    #[case::false_flag(TranslationNode::Flag(false), None)]
    #[case::null(TranslationNode::Null, None)]
    #[case::list(TranslationNode::List(vec![TranslationNode::from("a")]), None)]
    fn test_display_text(#[case] node: TranslationNode, #[case] expected: Option<&str>) {
        assert_eq!(node.display_text().as_deref(), expected);
    }

    #[googletest::test]
    fn test_keys_flattens_maps_and_lists() {
        let table = sample_table();
        let keys: Vec<String> = table.keys(&lang("en")).into_iter().collect();

        assert_eq!(
            keys,
            vec!["empty", "levels.0", "levels.1", "maxBalls", "menu.help", "menu.start", "title"]
        );
        expect_that!(table.keys(&lang("fr")).is_empty(), eq(true));
    }

    #[rstest]
    #[case::not_object(json!(["en"]))]
    #[case::language_not_object(json!({ "en": "Hello" }))]
    #[case::bad_language_code(json!({ "e n": {} }))]
    fn test_from_json_rejects(#[case] value: Value) {
        assert!(TranslationTable::from_json(value).is_err());
    }

    #[googletest::test]
    fn test_languages_sorted() {
        let table = sample_table();
        let codes: Vec<&str> = table.languages().into_iter().map(LanguageCode::as_str).collect();
        assert_eq!(codes, vec!["en", "ja"]);
    }

    /// `load_dir`: `<lang>.json` を読み込み、それ以外は無視する
    #[googletest::test]
    fn test_load_dir() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), r#"{"title": "Maze"}"#).unwrap();
        fs::write(temp_dir.path().join("ja.json"), r#"{"title": "めいろ"}"#).unwrap();
        fs::write(temp_dir.path().join("README.txt"), "not json").unwrap();
        fs::write(temp_dir.path().join("games list.json"), "[]").unwrap();

        let table = TranslationTable::load_dir(temp_dir.path()).unwrap();

        expect_that!(table.languages().len(), eq(2));
        let title = table.lookup(&lang("ja"), "title").unwrap();
        expect_that!(title.as_text(), some(eq("めいろ")));
    }

    /// `load_dir`: JSON パースエラー
    #[googletest::test]
    fn test_load_dir_invalid_json() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("en.json"), "invalid json").unwrap();

        let result = TranslationTable::load_dir(temp_dir.path());

        expect_that!(matches!(result, Err(TranslationError::Parse(_))), eq(true));
    }
}
