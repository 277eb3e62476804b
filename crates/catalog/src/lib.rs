//! Toilet catalog model and HTTP client for the WCLook backend
//!
//! This crate owns the catalog side of WCLook:
//!
//! - **Domain model**: `Toilet`, `Review`, `OpeningHours`, `Cleanliness`
//! - **Raw record parsing**: loosely-typed backend documents are turned
//!   into typed records with documented per-field defaults, and every
//!   substitution is reported as a diagnostic instead of being silently
//!   swallowed
//! - **Catalog client**: a thin reqwest wrapper fetching the full toilet
//!   set, with request correlation IDs and a small error taxonomy
//!   (`Network` / `Data` / `Unknown`)
//!
//! The client performs no automatic retries; a user-triggered refresh is
//! the retry mechanism.
//!
//! # Example
//!
//! ```rust,no_run
//! use wclook_catalog::{CatalogClient, ClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatalogClient::new()?;
//!     let toilets = client.fetch_all().await?;
//!     println!("fetched {} toilets", toilets.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod model;
pub mod parse;

pub use client::CatalogClient;
pub use config::{ClientConfig, Environment};
pub use error::{FetchError, FetchResult};
pub use model::{Cleanliness, OpeningHours, Review, Toilet};
pub use parse::{AppliedDefault, ParseOutcome, ParseReport, RawToiletRecord};
