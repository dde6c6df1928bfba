//! Core types used throughout the project.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use thiserror::Error;

/// Language used when nothing has been persisted yet.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Rejected game identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid game")]
pub struct InvalidGameId {
    /// The raw value as received (before trimming).
    pub raw: String,
}

/// Identifier of one game's click counter (e.g. `abc-bouncing-balls.html`).
///
/// Always trimmed, non-empty, and free of `..` and `/`. The id doubles as a
/// file name elsewhere in the site, so it is kept safe even though the click
/// counter never touches the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct GameId(String);

impl GameId {
    /// # Errors
    /// Returns [`InvalidGameId`] when the trimmed value is empty or contains
    /// `..` or `/`.
    pub fn parse(raw: &str) -> Result<Self, InvalidGameId> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.contains("..") || trimmed.contains('/') {
            return Err(InvalidGameId { raw: raw.to_string() });
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for GameId {
    type Err = InvalidGameId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Rejected language code.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid language code: '{0}'")]
pub struct InvalidLanguageCode(pub String);

/// A short locale identifier such as `en` or `ja`.
///
/// Accepts ASCII letters, digits, `-` and `_`, so region forms like `en-US`
/// can be added to the switcher without code changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct LanguageCode(String);

impl LanguageCode {
    /// # Errors
    /// Returns [`InvalidLanguageCode`] for empty values or unexpected characters.
    pub fn parse(raw: &str) -> Result<Self, InvalidLanguageCode> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if valid { Ok(Self(trimmed.to_string())) } else { Err(InvalidLanguageCode(raw.to_string())) }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageCode {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for LanguageCode {
    type Err = InvalidLanguageCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialEq<str> for LanguageCode {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LanguageCode {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}
