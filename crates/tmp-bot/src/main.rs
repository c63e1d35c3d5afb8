//! TMP query bot - main entry point.

use anyhow::Context;
use chat_client::{ChatClient, MessageReceiver, MessageSink};
use query_ledger::QueryLedger;
use std::sync::Arc;
use tmp_bot::config::{BotConfig, Config, LogFormat, LookupBackend, LookupConfig};
use tmp_bot::{serve, AppResult, Router, RouterSettings};
use tmp_client::{AccountLookup, AccountServiceClient, MockLookup};
use tokio::signal;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.bot);

    info!("Starting TMP query bot...");

    let utc_offset = config.bot.utc_offset()?;
    let provider = build_provider(&config.lookup).await?;
    let ledger = QueryLedger::new(config.ledger.capacity, utc_offset);

    let chat = ChatClient::new(&config.chat.service_url, &config.chat.bot_id)
        .context("Failed to create chat gateway client")?;

    if !chat.health_check().await {
        error!("Chat gateway not reachable at {}", config.chat.service_url);
        return Err(anyhow::anyhow!("Chat gateway not reachable").into());
    }
    info!("Chat gateway healthy");

    let router = Arc::new(Router::standard(
        provider,
        ledger,
        RouterSettings {
            recent_limit: config.ledger.recent_limit,
            utc_offset,
            record_provider_failures: config.ledger.record_provider_failures,
        },
    )?);

    info!("Registered handlers: {}", router.handler_names().join(", "));
    info!("Usage: \"#查询TMP 用户名\" or \"@机器人 查询TMP 用户名\"");
    info!("History: \"#历史查询\", help: \"#TMP帮助\"");
    info!("Listening for messages...");

    let sink: Arc<dyn MessageSink> = Arc::new(chat.clone());
    let receiver = MessageReceiver::new(chat, config.chat.poll_interval);
    let stream = Box::pin(receiver.stream());

    serve(router, sink, stream, async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
        }
    })
    .await;

    info!("Shutting down...");
    Ok(())
}

async fn build_provider(config: &LookupConfig) -> AppResult<Arc<dyn AccountLookup>> {
    match config.backend {
        LookupBackend::Mock => {
            let mock = match &config.fixtures_path {
                Some(path) => MockLookup::from_file(path, config.not_found_delay)?,
                None => MockLookup::sample(config.not_found_delay)?,
            };
            info!("Using mock account data ({} accounts)", mock.len());
            Ok(Arc::new(mock))
        }
        LookupBackend::Http => {
            let client = AccountServiceClient::new(
                &config.base_url,
                config.api_key.clone(),
                config.timeout,
                config.max_retries,
            )
            .context("Failed to create account service client")?;

            if client.health_check().await {
                info!("Account service healthy at {}", client.base_url());
            } else {
                warn!("Account service health check failed - will retry on requests");
            }
            Ok(Arc::new(client))
        }
    }
}

fn init_logging(config: &BotConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}
