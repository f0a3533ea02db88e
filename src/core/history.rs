//! Conversion history and user preference records.

use crate::core::rates::Conversion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of conversions kept in history; oldest entries are evicted.
pub const HISTORY_LIMIT: usize = 10;

/// A conversion stamped with the time it was saved. Records are immutable
/// and ordered newest-first in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    #[serde(flatten)]
    pub conversion: Conversion,
    pub timestamp: DateTime<Utc>,
}

/// Default from/to currency pair, overwritten wholesale on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    pub from_currency: String,
    pub to_currency: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Preferences {
            from_currency: "USD".to_string(),
            to_currency: "EUR".to_string(),
        }
    }
}

impl Preferences {
    /// Returns a copy with from/to exchanged.
    pub fn swapped(&self) -> Self {
        Preferences {
            from_currency: self.to_currency.clone(),
            to_currency: self.from_currency.clone(),
        }
    }
}
