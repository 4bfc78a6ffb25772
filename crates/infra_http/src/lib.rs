//! HTTP Infrastructure Layer
//!
//! This crate provides the production implementation of the `Transport`
//! port: an authenticated reqwest client pointed at the HubSpot API.
//!
//! # Modules
//!
//! - `config`: `HubspotConfig`, the explicit configuration value
//! - `client`: `HttpTransport`, the `Transport` adapter
//! - `error`: translation of HTTP statuses and client errors into `PortError`

pub mod config;
pub mod client;
pub mod error;

pub use config::{Credentials, HubspotConfig, DEFAULT_BASE_URL};
pub use client::HttpTransport;
