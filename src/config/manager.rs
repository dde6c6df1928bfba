//! 設定管理を行うモジュール

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    ServerSettings,
    ValidationError,
    loader,
};

/// ポート番号を上書きする環境変数
pub const PORT_ENV: &str = "PORT";

/// 設定管理を行う
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    /// 現在の設定
    current_settings: ServerSettings,

    /// ルートディレクトリ
    root: Option<PathBuf>,
}

impl ConfigManager {
    /// 新しい設定マネージャーを作成
    #[must_use]
    pub fn new() -> Self {
        Self { current_settings: ServerSettings::default(), root: None }
    }

    /// 設定を読み込む
    ///
    /// 設定ファイル → 環境変数の順に適用し、相対パスをルートディレクトリ基準に解決します。
    ///
    /// # Arguments
    /// * `root` - ルートディレクトリ
    /// * `env` - 環境変数の取得関数（通常は `|k| std::env::var(k).ok()`）
    ///
    /// # Errors
    /// - ファイル読み込みエラー
    /// - JSON パースエラー
    /// - バリデーションエラー（`PORT` が不正な場合を含む）
    pub fn load_settings(
        &mut self,
        root: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        tracing::debug!("Loading settings for root: {:?}", root);

        // 設定ファイルを読み込み
        let mut settings = if let Some(root) = &root {
            loader::load_from_root(root)?.map_or_else(ServerSettings::default, |file| {
                tracing::debug!("Loaded file settings: {:?}", file);
                file
            })
        } else {
            ServerSettings::default()
        };

        // 環境変数で上書き
        apply_env_overrides(&mut settings, env).map_err(|e| ConfigError::ValidationErrors(vec![e]))?;

        // バリデーション
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        if let Some(root) = &root {
            resolve_paths(&mut settings, root);
        }

        // 設定を保存
        self.current_settings = settings;
        self.root = root;
        tracing::debug!("Settings loaded successfully: {:?}", self.current_settings);

        Ok(())
    }

    /// 現在の設定を取得
    #[must_use]
    pub const fn get_settings(&self) -> &ServerSettings {
        &self.current_settings
    }

    /// ルートディレクトリを取得
    #[must_use]
    pub const fn root(&self) -> Option<&PathBuf> {
        self.root.as_ref()
    }
}

/// `PORT` 環境変数を適用する（空文字列は未設定と同じ扱い）
fn apply_env_overrides(
    settings: &mut ServerSettings,
    env: impl Fn(&str) -> Option<String>,
) -> Result<(), ValidationError> {
    if let Some(raw) = env(PORT_ENV)
        && !raw.trim().is_empty()
    {
        settings.port = raw.trim().parse().map_err(|_| {
            ValidationError::new(PORT_ENV, format!("'{raw}' is not a valid port number (0-65535)"))
        })?;
    }
    Ok(())
}

/// 相対パスをルートディレクトリ基準にする
fn resolve_paths(settings: &mut ServerSettings, root: &Path) {
    let resolve = |path: &mut PathBuf| {
        if path.is_relative() {
            *path = root.join(&*path);
        }
    };

    resolve(&mut settings.database_path);
    resolve(&mut settings.static_root);
    if let Some(dir) = settings.locales_dir.as_mut() {
        resolve(dir);
    }
    if let Some(dir) = settings.log_dir.as_mut() {
        resolve(dir);
    }
}
