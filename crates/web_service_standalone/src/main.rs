use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chat_core::Config;
use clap::Parser;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use web_service::storage::{FileMessageStore, InMemoryMessageStore, MessageStore};
use web_service::{AppState, ServerConfig};

/// Chat assist HTTP service: message recaps and topic title suggestions.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// TOML config file with an `[llm]` table (default: ./config.toml if present)
    #[arg(long, env = "APP_CONFIG")]
    config: Option<PathBuf>,

    #[arg(long, env = "APP_HOST")]
    host: Option<String>,

    #[arg(long, env = "APP_PORT")]
    port: Option<u16>,

    /// JSON file with an array of `{ "id", "content" }` messages loaded into memory
    #[arg(long, conflicts_with = "messages_dir")]
    messages: Option<PathBuf>,

    /// Directory of `<id>.json` message files
    #[arg(long)]
    messages_dir: Option<PathBuf>,
}

impl Args {
    fn server_config(&self) -> ServerConfig {
        let mut config = ServerConfig::from_env();
        if let Some(host) = &self.host {
            config.host = host.clone();
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        config
    }

    async fn message_store(&self) -> anyhow::Result<Arc<dyn MessageStore>> {
        if let Some(path) = &self.messages {
            let store = InMemoryMessageStore::load_json(path)
                .await
                .with_context(|| format!("Failed to load messages from {}", path.display()))?;
            return Ok(Arc::new(store));
        }
        if let Some(dir) = &self.messages_dir {
            return Ok(Arc::new(FileMessageStore::new(dir.clone())));
        }
        tracing::warn!("No message source given; starting with an empty store");
        Ok(Arc::new(InMemoryMessageStore::new()))
    }
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(
            fmt::layer()
                .with_target(true)
                .with_thread_ids(false)
                .with_line_number(true)
                .with_file(false),
        )
        .init();

    if let Err(e) = run(Args::parse()).await {
        tracing::error!("Failed to run web service: {:#}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> anyhow::Result<()> {
    tracing::info!("Starting standalone web service...");

    let config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    let message_store = args.message_store().await?;
    let app_state = AppState::new(config.llm, message_store);

    web_service::run(args.server_config(), app_state)
        .await
        .map_err(anyhow::Error::msg)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsStr;

    #[test]
    fn cli_flags_override_server_config() {
        let args = Args::parse_from([
            "web_service_standalone",
            "--host",
            "0.0.0.0",
            "--port",
            "9100",
        ]);
        let config = args.server_config();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9100);
    }

    #[test]
    fn messages_and_messages_dir_conflict() {
        let result = Args::try_parse_from([
            "web_service_standalone",
            "--messages",
            "a.json",
            "--messages-dir",
            "msgs",
        ]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn loads_messages_from_json_seed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("messages.json");
        std::fs::write(&path, r#"[{"id": 1, "content": "hello"}]"#).unwrap();

        let args = Args::parse_from([
            OsStr::new("web_service_standalone"),
            OsStr::new("--messages"),
            path.as_os_str(),
        ]);
        let store = args.message_store().await.unwrap();
        let message = store.get_message(1).await.unwrap().unwrap();
        assert_eq!(message.text, "hello");
    }
}
