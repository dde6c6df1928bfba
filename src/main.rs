//! Entry point for the Kids Games server.

use std::path::Path;

use kids_games::config::{
    ConfigManager,
    ServerSettings,
};
use kids_games::i18n::missing_translations;
use kids_games::input::translation::TranslationTable;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let root = std::env::current_dir().ok();
    let mut config_manager = ConfigManager::new();
    let config_result = config_manager.load_settings(root, |key| std::env::var(key).ok());
    let settings = config_manager.get_settings().clone();

    // ログファイルへの書き込みを維持するため、guard は main の終わりまで保持する
    let _guard = init_tracing(&settings);

    if let Err(error) = config_result {
        tracing::error!("Configuration error: {}", error);
        std::process::exit(1);
    }

    if let Some(dir) = &settings.locales_dir {
        audit_translations(dir);
    }

    if let Err(error) = kids_games::server::serve(&settings).await {
        tracing::error!("Server error: {}", error);
        std::process::exit(1);
    }
}

/// tracing を初期化（`RUST_LOG` 未設定時は INFO）
fn init_tracing(settings: &ServerSettings) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(dir) = &settings.log_dir {
        let appender = tracing_appender::rolling::daily(dir, "kids-games.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt().with_env_filter(filter).with_writer(writer).with_ansi(false).init();
        Some(guard)
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
        None
    }
}

/// 翻訳ファイルの漏れを起動時に警告する
fn audit_translations(dir: &Path) {
    let table = match TranslationTable::load_dir(dir) {
        Ok(table) => table,
        Err(e) => {
            tracing::warn!("Failed to load translations from {:?}: {}", dir, e);
            return;
        }
    };

    let missing = missing_translations(&table);
    for gap in &missing {
        tracing::warn!(language = %gap.language, "Missing translation key: {}", gap.key);
    }
    tracing::info!(
        languages = table.languages().len(),
        missing = missing.len(),
        "Checked translations in {:?}",
        dir
    );
}
