//! CLI rendering glue. These modules only present controller state; all
//! conversion and persistence logic lives in the core.

pub mod convert;
pub mod currencies;
pub mod history;
pub mod setup;
pub mod ui;
