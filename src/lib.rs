//! This crate provides a read-only HTTP API over a climate observation dataset: per-station daily
//! precipitation and temperature readings.
//!
//! The dataset is loaded once at startup from two CSV files, a station roster and a measurement
//! table, and is immutable for the lifetime of the process. Four queries are served:
//!
//! * the precipitation series over the last year of data,
//! * stations ranked by how many measurements they recorded,
//! * the temperature series of the most active station over the last year,
//! * minimum, average and maximum temperature over a date range.
//!
//! Requests flow through [validation] into the [query] engine, which composes over the
//! [store] primitives. Results are converted to response payloads by [shaper].
//!
//! The server is built on top of a number of open source components.
//!
//! * [Tokio](tokio), the most popular asynchronous Rust runtime.
//! * [Axum](axum) web framework, built by the Tokio team, on top of the [hyper] HTTP library.
//! * [Serde](serde) performs serialisation of JSON response data.
//! * [chrono] provides calendar dates and [csv] reads the dataset.

pub mod app;
pub mod app_state;
pub mod cli;
pub mod error;
pub mod metrics;
pub mod models;
pub mod query;
pub mod server;
pub mod shaper;
pub mod store;
#[cfg(test)]
pub mod test_utils;
pub mod tracing;
pub mod validation;
