pub mod cli;
pub mod config;
pub mod converter;
pub mod core;
pub mod log;
pub mod providers;
pub mod store;

use crate::config::AppConfig;
use crate::converter::Converter;
use crate::providers::exchange_rate_api::ExchangeRateApiProvider;
use crate::store::PersistenceStore;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Commands supported by the converter, mapped from CLI subcommands.
pub enum AppCommand {
    Convert {
        amount: String,
        from: Option<String>,
        to: Option<String>,
    },
    Currencies,
    History,
    ClearHistory,
    Swap,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let store = PersistenceStore::open(&config.data_path()?)?;
    let provider = Arc::new(ExchangeRateApiProvider::new(
        &config.provider.base_url,
        &config.reference_currency,
    ));
    let mut converter = Converter::new(provider, store);

    match command {
        AppCommand::Convert { amount, from, to } => {
            cli::convert::run(&mut converter, &amount, from.as_deref(), to.as_deref()).await
        }
        AppCommand::Currencies => cli::currencies::run(&mut converter).await,
        AppCommand::History => cli::history::run(&converter).await,
        AppCommand::ClearHistory => cli::history::clear(&mut converter).await,
        AppCommand::Swap => cli::convert::swap(&mut converter).await,
    }
}
