mod action;
mod app;
mod app_state;
mod component;
mod components;
mod debounce;
mod focus;
mod lookup;
mod player;
mod theme;
mod widgets;

use wordbook_proto::client::DictionaryClient;
use wordbook_proto::config::Config;
use wordbook_proto::platform;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let data_dir = platform::data_dir();
    std::fs::create_dir_all(&data_dir)?;

    let log_path = platform::log_path();
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    // Allow RUST_LOG override; default to debug for app code but suppress noisy
    // connection-level DEBUG from HTTP client internals (hyper_util, reqwest).
    let log_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "debug,hyper_util=warn,reqwest=warn,hyper=warn".to_string());
    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(log_filter.as_str())
        .with_ansi(false)
        .init();

    // Print log path to stderr so it can be tailed immediately.
    eprintln!("wordbook log: {}", log_path.display());

    tracing::info!("wordbook starting…");

    // ── Load config ──────────────────────────────────────────────────────────
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!("config unreadable ({}), using defaults", e);
        Config::default()
    });
    tracing::info!(
        "service {} (debounce {} ms)",
        config.service.base_url,
        config.lookup.debounce_ms
    );

    let client = DictionaryClient::new(&config.service)?;

    // ── Run TUI ──────────────────────────────────────────────────────────────
    let app = app::App::new(&config, client, log_path);
    app.run().await?;

    tracing::info!("wordbook exiting");
    Ok(())
}
