//! Core business logic abstractions

pub mod error;
pub mod history;
pub mod rates;

// Re-export main types for cleaner imports
pub use error::ConverterError;
pub use history::{ConversionRecord, HISTORY_LIMIT, Preferences};
pub use rates::{Conversion, RateProvider, round_to};
