use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};

use crate::core::error::ConverterError;
use crate::core::rates::{Conversion, RateProvider, round_to};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Provider for the exchangerate-api v4 "latest" endpoint. Every call issues
/// one outbound request; nothing is cached between conversions.
pub struct ExchangeRateApiProvider {
    base_url: String,
    reference_currency: String,
}

impl ExchangeRateApiProvider {
    pub fn new(base_url: &str, reference_currency: &str) -> Self {
        ExchangeRateApiProvider {
            base_url: base_url.to_string(),
            reference_currency: reference_currency.to_string(),
        }
    }

    /// Fetches the latest rates quoted against `base`. Only the `rates`
    /// field of the response is consumed; a response without it is an error.
    async fn fetch_rates(&self, base: &str) -> Result<HashMap<String, f64>, ConverterError> {
        let url = format!("{}/{}", self.base_url, base);
        debug!("Requesting rates from {}", url);

        let client = reqwest::Client::builder()
            .user_agent("cambio/1.0")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ConverterError::Network(format!("client setup failed: {e}")))?;

        let response = client.get(&url).send().await.map_err(|e| {
            ConverterError::Network(format!("request error: {e} for currency: {base}"))
        })?;

        if !response.status().is_success() {
            return Err(ConverterError::Network(format!(
                "HTTP error: {} for currency: {base}",
                response.status()
            )));
        }

        let text = response
            .text()
            .await
            .map_err(|e| ConverterError::Network(format!("failed to read response body: {e}")))?;

        let data: LatestRatesResponse = serde_json::from_str(&text).map_err(|e| {
            ConverterError::Network(format!("malformed rates response for {base}: {e}"))
        })?;

        Ok(data.rates)
    }
}

#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    rates: HashMap<String, f64>,
}

#[async_trait]
impl RateProvider for ExchangeRateApiProvider {
    async fn list_currencies(&self) -> Result<Vec<String>, ConverterError> {
        let rates = self.fetch_rates(&self.reference_currency).await?;

        let mut currencies: Vec<String> = rates.into_keys().collect();
        if !currencies.contains(&self.reference_currency) {
            currencies.push(self.reference_currency.clone());
        }
        Ok(currencies)
    }

    #[instrument(name = "RateFetch", skip(self, amount), fields(from = %from, to = %to))]
    async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<Conversion, ConverterError> {
        let rates = self.fetch_rates(from).await?;

        let rate = *rates
            .get(to)
            .ok_or_else(|| ConverterError::RateUnavailable {
                from: from.to_string(),
                to: to.to_string(),
            })?;

        Ok(Conversion {
            from_currency: from.to_string(),
            to_currency: to.to_string(),
            amount,
            result: round_to(amount * rate, 2),
            rate: round_to(rate, 4),
        })
    }
}
