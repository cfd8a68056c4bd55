#![cfg_attr(not(test), deny(clippy::panic))]

use clap::Parser;
use connection_hub::application::common::{GameGateway, LobbyGateway, RealtimeClient};
use connection_hub::config;
use connection_hub::infrastructure::data_mappers::{GameMapper, LobbyMapper};
use connection_hub::infrastructure::kv::redis::RedisKvStore;
use connection_hub::infrastructure::kv::KvStore;
use connection_hub::infrastructure::message_broker::NatsEventPublisher;
use connection_hub::infrastructure::realtime::HttpRealtimeClient;
use connection_hub::infrastructure::scheduling::TaskSchedulerImpl;
use connection_hub::logging;
use connection_hub::metrics::HubMetrics;
use connection_hub::presentation::{self, Deps};
use std::sync::Arc;

/// Connection Hub -- presence/lifecycle coordinator for multiplayer board game lobbies and games
#[derive(Parser, Debug)]
#[command(name = "connection-hub")]
#[command(about = "Presence and lifecycle coordinator for board game lobbies and games")]
#[command(version)]
struct Cli {
    /// Validate configuration and exit without starting the process.
    /// Useful for CI/CD pipelines and pre-deployment checks.
    #[arg(long, short = 'c', conflicts_with = "print_config")]
    validate_config: bool,

    /// Print the loaded configuration to stdout (as JSON) and exit.
    #[arg(long, conflicts_with = "validate_config")]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = config::load();

    if cli.print_config {
        let json = serde_json::to_string_pretty(&cfg)
            .map_err(|e| anyhow::anyhow!("failed to serialize config: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    let validation_result = config::validate(&cfg);

    if cli.validate_config {
        match validation_result {
            Ok(()) => {
                println!("Configuration validation passed");
                println!();
                println!("Configuration summary:");
                println!("  Redis URL: {}", cfg.redis_url);
                println!("  NATS URL: {}", cfg.nats_url);
                println!("  Realtime URL: {}", cfg.realtime_url);
                println!("  Lock TTL: {}s", cfg.lock_expires_in_secs);
                println!("  Entity TTL: {}s", cfg.entity_ttl_secs);
                println!("  Presence grace: {}s", cfg.presence_grace_secs);
                println!("  Reconnect budget: {}s", cfg.reconnect_budget_secs);
                println!("  Log format: {:?}", cfg.logging.format);
                return Ok(());
            }
            Err(e) => {
                eprintln!("Configuration validation failed:\n{e}");
                std::process::exit(1);
            }
        }
    }

    validation_result?;

    logging::init(&cfg.logging);
    tracing::info!("starting connection hub");

    let kv: Arc<dyn KvStore> = Arc::new(RedisKvStore::connect(&cfg.redis_url).await?);
    let lobby_gateway: Arc<dyn LobbyGateway> = Arc::new(LobbyMapper::new(kv.clone(), cfg.entity_ttl()));
    let game_gateway: Arc<dyn GameGateway> = Arc::new(GameMapper::new(kv.clone(), cfg.entity_ttl()));
    let task_scheduler = Arc::new(TaskSchedulerImpl::new(kv.clone()));
    let event_publisher = Arc::new(
        NatsEventPublisher::connect(&cfg.nats_url)
            .await
            .map_err(|e| anyhow::anyhow!("failed to connect to message bus: {e}"))?,
    );
    let realtime_client: Arc<dyn RealtimeClient> = Arc::new(HttpRealtimeClient::new(
        cfg.realtime_url.clone(),
        cfg.realtime_api_key.clone(),
    )?);

    let deps = Deps {
        kv,
        lock_ttl: cfg.lock_ttl(),
        presence_grace: cfg.presence_grace(),
        reconnect_budget: cfg.reconnect_budget(),
        lobby_gateway,
        game_gateway,
        event_publisher,
        task_scheduler,
        realtime_client,
        metrics: Arc::new(HubMetrics::new()),
    };

    let nats_url = cfg.nats_url.clone();
    let consumer_deps = deps.clone();
    let executor_deps = deps;

    let consumer =
        tokio::spawn(async move { presentation::message_consumer::run(consumer_deps, &nats_url).await });
    let executor = tokio::spawn(async move { presentation::task_executor::run(executor_deps).await });

    tokio::select! {
        res = consumer => { res??; }
        res = executor => { res??; }
    }

    Ok(())
}

#[cfg(test)]
mod cli_tests {
    use super::Cli;
    use clap::Parser;

    #[test]
    fn default_no_flags() {
        let cli = Cli::try_parse_from(["connection-hub"]).unwrap();
        assert!(!cli.validate_config);
        assert!(!cli.print_config);
    }

    #[test]
    fn validate_config_long_and_short() {
        let cli = Cli::try_parse_from(["connection-hub", "--validate-config"]).unwrap();
        assert!(cli.validate_config);
        let cli = Cli::try_parse_from(["connection-hub", "-c"]).unwrap();
        assert!(cli.validate_config);
    }

    #[test]
    fn print_config_flag() {
        let cli = Cli::try_parse_from(["connection-hub", "--print-config"]).unwrap();
        assert!(cli.print_config);
    }

    #[test]
    fn validate_and_print_config_conflict() {
        let result = Cli::try_parse_from(["connection-hub", "--validate-config", "--print-config"]);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("cannot be used with"));
    }
}
