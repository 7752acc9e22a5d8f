// src/lib.rs
// #![allow(dead_code)]
// #![allow(unused)]

#[macro_use]
pub mod macros;
#[macro_use]
pub mod log;

pub mod card;
pub mod config;
pub mod core;
pub mod csv;
pub mod error;
pub mod progress;
pub mod report;
pub mod scrape;
pub mod specs;
pub mod stats;

#[cfg(feature = "cli")]
pub mod cli;

pub use card::{Card, DeckItem, DeckType};
pub use crate::core::{HttpTransport, Transport};
pub use error::{OracleError, Result};
pub use scrape::{DeckResolution, Oracle};
pub use stats::DeckStats;
