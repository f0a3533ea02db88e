//! Conversion orchestration: validates input, drives the rate provider and
//! persists results and preferences.

use crate::core::error::ConverterError;
use crate::core::history::{ConversionRecord, Preferences};
use crate::core::rates::RateProvider;
use crate::store::PersistenceStore;
use std::sync::Arc;
use tracing::{debug, warn};

/// Lifecycle of a conversion request: Idle -> Loading -> (Success | Error).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConverterState {
    Idle,
    Loading,
    Success,
    Error,
}

pub struct Converter {
    provider: Arc<dyn RateProvider>,
    store: PersistenceStore,
    state: ConverterState,
    currencies: Vec<String>,
    preferences: Preferences,
}

impl Converter {
    pub fn new(provider: Arc<dyn RateProvider>, store: PersistenceStore) -> Self {
        Converter {
            provider,
            store,
            state: ConverterState::Idle,
            currencies: Vec::new(),
            preferences: Preferences::default(),
        }
    }

    pub fn state(&self) -> ConverterState {
        self.state
    }

    /// Alphabetically ordered currency codes, populated by [`Converter::init`].
    pub fn currencies(&self) -> &[String] {
        &self.currencies
    }

    pub fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    /// Loads the selectable currency set and saved preferences. A provider
    /// failure leaves the converter in the Error state; there is no retry.
    pub async fn init(&mut self) -> Result<(), ConverterError> {
        let mut currencies = match self.provider.list_currencies().await {
            Ok(currencies) => currencies,
            Err(e) => {
                self.state = ConverterState::Error;
                return Err(e);
            }
        };
        currencies.sort();
        currencies.dedup();
        self.currencies = currencies;

        self.preferences = match self.store.get_preferences().await {
            Ok(prefs) => prefs,
            Err(ConverterError::CorruptState(key)) => {
                warn!("Ignoring corrupt preferences under '{key}'");
                Preferences::default()
            }
            Err(e) => {
                self.state = ConverterState::Error;
                return Err(e);
            }
        };

        debug!(
            "Initialized with {} currencies, preferences {:?}",
            self.currencies.len(),
            self.preferences
        );
        self.state = ConverterState::Idle;
        Ok(())
    }

    /// Selects a new from/to pair and persists it. Codes are normalized to
    /// uppercase and, when the currency list is loaded, must appear in it.
    pub async fn select(&mut self, from: &str, to: &str) -> Result<(), ConverterError> {
        let from = from.trim().to_uppercase();
        let to = to.trim().to_uppercase();

        for code in [&from, &to] {
            if !self.currencies.is_empty() && !self.currencies.contains(code) {
                return Err(ConverterError::Validation(format!(
                    "unknown currency: {code}"
                )));
            }
        }

        self.preferences = Preferences {
            from_currency: from,
            to_currency: to,
        };
        self.store.save_preferences(&self.preferences).await
    }

    /// Exchanges the selected from/to pair and persists the new preferences.
    pub async fn swap(&mut self) -> Result<(), ConverterError> {
        self.preferences = self.store.get_preferences().await?.swapped();
        self.store.save_preferences(&self.preferences).await
    }

    /// Converts `amount_input` using the selected preference pair. Invalid
    /// input is rejected before any state change or network call. Requests
    /// are serialized by the exclusive receiver: a second conversion cannot
    /// start while one is in flight.
    pub async fn convert(
        &mut self,
        amount_input: &str,
    ) -> Result<ConversionRecord, ConverterError> {
        let amount = parse_amount(amount_input)?;

        self.state = ConverterState::Loading;
        let conversion = match self
            .provider
            .convert(
                &self.preferences.from_currency,
                &self.preferences.to_currency,
                amount,
            )
            .await
        {
            Ok(conversion) => conversion,
            Err(e) => {
                self.state = ConverterState::Error;
                return Err(e);
            }
        };

        let record = match self.store.save_to_history(conversion).await {
            Ok(record) => record,
            Err(e) => {
                self.state = ConverterState::Error;
                return Err(e);
            }
        };

        self.state = ConverterState::Success;
        Ok(record)
    }

    /// Persisted history, newest first. Corrupt state is treated as empty.
    pub async fn history(&self) -> Vec<ConversionRecord> {
        match self.store.get_history().await {
            Ok(history) => history,
            Err(e) => {
                warn!("Treating unreadable history as empty: {e}");
                Vec::new()
            }
        }
    }

    pub async fn clear_history(&mut self) -> Result<(), ConverterError> {
        self.store.clear_history().await
    }
}

/// Parses and validates an amount: must be a finite number greater than zero.
fn parse_amount(input: &str) -> Result<f64, ConverterError> {
    let amount: f64 = input
        .trim()
        .parse()
        .map_err(|_| ConverterError::Validation(format!("'{input}' is not a number")))?;

    if !amount.is_finite() || amount <= 0.0 {
        return Err(ConverterError::Validation(format!(
            "amount must be a positive number, got '{input}'"
        )));
    }
    Ok(amount)
}
