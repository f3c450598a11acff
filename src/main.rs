use anyhow::Context;
use clap::Parser;
use price_scout::app::{report, server};
use price_scout::config::{CliConfig, Command};
use price_scout::utils::logger;
use price_scout::{build_providers, Aggregator, Query, ScoutConfig, ScoutError};
use std::net::SocketAddr;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    match cli.command {
        Command::Serve { .. } => logger::init_json_logger(),
        Command::Search { .. } => logger::init_cli_logger(cli.verbose),
    }
    tracing::debug!("CLI config: {:?}", cli);

    let config = match ScoutConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => fail(e),
    };
    let aggregator = match build_providers(&config) {
        Ok(providers) => Aggregator::new(providers),
        Err(e) => fail(e),
    };

    match cli.command {
        Command::Search { model, format } => {
            let query = match Query::new(model) {
                Ok(query) => query,
                Err(e) => fail(e),
            };
            let rendered = aggregator
                .aggregate(&query)
                .await
                .and_then(|result| report::render(&result, format.into()));
            match rendered {
                Ok(output) => println!("{}", output),
                Err(e) => fail(e),
            }
        }
        Command::Serve { port } => {
            let port = port.unwrap_or(config.server.port);
            let addr: SocketAddr = format!("{}:{}", config.server.host, port)
                .parse()
                .with_context(|| {
                    format!("invalid listen address {}:{}", config.server.host, port)
                })?;

            tracing::info!(
                "Serving {} providers: {}",
                aggregator.provider_ids().len(),
                aggregator.provider_ids().join(", ")
            );
            server::serve(aggregator, addr)
                .await
                .context("HTTP server stopped unexpectedly")?;
        }
    }

    Ok(())
}

fn fail(e: ScoutError) -> ! {
    tracing::error!("❌ {}", e);
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
    std::process::exit(1);
}
