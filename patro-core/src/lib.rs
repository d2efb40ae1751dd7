//! Core library for patro.
//!
//! Scrapes the Bikram Sambat calendar month by month and keeps the results as
//! JSON under a data root:
//! - `fetch` posts the month form upstream (one attempt per call)
//! - `extract` turns the returned page into a `MonthRecord`
//! - `retry` wraps both with linear backoff
//! - `store` reads and writes the per-month and per-year artifacts
//! - `scrape` drives the month and year loops

pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod model;
pub mod progress;
pub mod retry;
pub mod scrape;
pub mod store;

pub use config::PatroConfig;
pub use error::{PatroError, PatroResult};
pub use model::*;
