//! Logger setup shared by Sofa binaries.

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence. Without it, `default_level` applies to the
/// binary's own crate and `tower_http`, and everything else logs at `info`.
///
/// # Arguments
///
/// * `bin_name` - Binary name (e.g. `env!("CARGO_BIN_NAME")`)
/// * `default_level` - Level used when `RUST_LOG` is not set
pub fn setup_logger(bin_name: &str, default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(bin_name, default_level)));

    // A second initialization (e.g. from tests) keeps the first subscriber
    if let Err(e) = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(true))
        .try_init()
    {
        tracing::debug!("Logger for '{}' already initialized: {}", bin_name, e);
    }
}

fn default_directives(bin_name: &str, default_level: &str) -> String {
    let crate_name = bin_name.replace('-', "_");
    format!("info,{crate_name}={default_level},tower_http={default_level}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives() {
        // テスト項目: バイナリ名からクレート単位のフィルタが組み立てられる
        // when (操作):
        let directives = default_directives("sofa-server", "debug");

        // then (期待する結果):
        assert_eq!(directives, "info,sofa_server=debug,tower_http=debug");
    }

    #[test]
    fn test_setup_logger_twice_does_not_panic() {
        // テスト項目: ロガーを 2 回初期化しても panic しない
        // when (操作):
        setup_logger("sofa-server", "debug");
        setup_logger("sofa-server", "info");

        // then (期待する結果):
        tracing::info!("logger initialized");
    }
}
