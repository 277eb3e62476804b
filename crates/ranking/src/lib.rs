//! Distance ranking pipeline and fetch/refresh lifecycle for WCLook.
//!
//! This crate is the core of the system. It orchestrates the catalog
//! client and the location provider into a sorted, distance-annotated
//! toilet list:
//!
//! - [`rank`] resolves the user's position, annotates every toilet with
//!   its haversine distance, and returns a stable ascending ordering
//! - [`ToiletFeed`] wraps fetch + rank in an explicit lifecycle
//!   (`Idle → Loading → Ready | Failed`) published over a watch channel,
//!   with a forced-refresh guard and last-writer-wins completion
//!
//! # Example
//!
//! ```
//! use wclook_location::FixedLocationProvider;
//! use wclook_geo::Coordinate;
//! use wclook_ranking::rank;
//!
//! let provider = FixedLocationProvider::new(Coordinate::new(48.8566, 2.3522));
//! let ranked = rank(vec![], &provider).unwrap();
//! assert!(ranked.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod feed;
pub mod rank;

pub use error::{FeedFailure, FailureKind, RankingError};
pub use feed::{CatalogSource, FeedState, ToiletFeed};
pub use rank::{rank, rank_from};
