/// ログ基盤モジュール
///
/// ユーザーAPI Lambdaのログ出力設定。CloudWatch Logsでリクエスト単位に
/// 絞り込めるよう、1イベント1行のJSONで出力する。
use std::sync::Once;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// 本番のデフォルトログレベル
const DEFAULT_LEVEL: &str = "info";
/// テストのデフォルトログレベル（リクエストのdebugトレースも出す）
#[cfg(test)]
const TEST_DEFAULT_LEVEL: &str = "debug";

static INIT: Once = Once::new();

/// `RUST_LOG`があればそれを、無ければ指定レベルを使うフィルター
fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// JSONログサブスクライバーを一度だけ登録する
///
/// 既に別のサブスクライバーが登録済み（テスト等）の場合は何もしない。
pub fn init_logging() {
    INIT.call_once(|| {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .with_target(true)
            .with_file(true)
            .with_line_number(true);

        let _ = tracing_subscriber::registry()
            .with(env_filter(DEFAULT_LEVEL))
            .with(json_layer)
            .try_init();
    });
}

/// テスト用のログサブスクライバーを初期化する（人間が読みやすい形式）
#[cfg(test)]
pub fn init_test_logging() {
    static TEST_INIT: Once = Once::new();

    TEST_INIT.call_once(|| {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_test_writer()
            .with_target(true)
            .compact();

        let _ = tracing_subscriber::registry()
            .with(env_filter(TEST_DEFAULT_LEVEL))
            .with(fmt_layer)
            .try_init();
    });
}
