//! Exchange rate abstractions

use crate::core::error::ConverterError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Result of a single conversion. `result` is rounded to 2 decimal places
/// and `rate` to 4, half away from zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Conversion {
    pub from_currency: String,
    pub to_currency: String,
    pub amount: f64,
    pub result: f64,
    pub rate: f64,
}

#[async_trait]
pub trait RateProvider: Send + Sync {
    /// Lists the currency codes the provider can convert between: the
    /// reference currency plus every target quoted against it.
    async fn list_currencies(&self) -> Result<Vec<String>, ConverterError>;

    /// Converts `amount` units of `from` into `to` at the latest rate.
    /// Issues one outbound request per call; rates are never cached.
    async fn convert(
        &self,
        from: &str,
        to: &str,
        amount: f64,
    ) -> Result<Conversion, ConverterError>;
}

/// Rounds to `places` decimal places, half away from zero.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}
