//! Input data loaded from disk
/// Translation tables
pub mod translation;
