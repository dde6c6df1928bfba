//! 設定ファイルの読み込み関数

use std::io::ErrorKind;
use std::path::Path;

use super::{
    ConfigError,
    ServerSettings,
};

/// サーバー起動ディレクトリに置く設定ファイル
pub(super) const CONFIG_FILE_NAME: &str = ".kids-games.json";

/// `<root>/.kids-games.json` を読む
///
/// ファイルがなければ `None`。環境変数の適用とバリデーションは
/// [`super::ConfigManager`] が行うため、ここでは JSON として読めるかだけを見ます。
///
/// # Errors
/// ファイルが存在するのに読めない、または JSON として不正な場合
pub(super) fn load_from_root(root: &Path) -> Result<Option<ServerSettings>, ConfigError> {
    let config_path = root.join(CONFIG_FILE_NAME);

    let content = match std::fs::read_to_string(&config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No server config at {:?}, using defaults", config_path);
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let settings: ServerSettings = serde_json::from_str(&content)?;
    tracing::debug!(port = settings.port, "Loaded server config from {:?}", config_path);
    Ok(Some(settings))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    /// `load_from_root`: 設定ファイルが存在する場合
    #[rstest]
    fn test_load_from_root_with_valid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_content = r#"{"port": 8000, "staticRoot": "public"}"#;
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), config_content).unwrap();

        let result = load_from_root(temp_dir.path());

        assert!(result.is_ok());
        let settings = result.unwrap();
        assert!(settings.is_some());
        let settings = settings.unwrap();
        assert_eq!(settings.port, 8000);
        assert_eq!(settings.static_root.to_str(), Some("public"));
    }

    /// `load_from_root`: 設定ファイルが存在しない場合
    #[rstest]
    fn test_load_from_root_no_config_file() {
        let temp_dir = TempDir::new().unwrap();

        let result = load_from_root(temp_dir.path());

        assert!(result.is_ok());
        assert!(result.unwrap().is_none());
    }

    /// `load_from_root`: JSON パースエラー
    #[rstest]
    #[case::not_json("invalid json")]
    #[case::port_out_of_range(r#"{"port": 70000}"#)]
    fn test_load_from_root_invalid(#[case] content: &str) {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE_NAME), content).unwrap();

        let result = load_from_root(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    /// `load_from_root`: 設定ファイル名のディレクトリは読み込みエラー
    #[rstest]
    fn test_load_from_root_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();

        let result = load_from_root(temp_dir.path());

        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
