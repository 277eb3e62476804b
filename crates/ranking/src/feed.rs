//! The fetch/refresh lifecycle around the ranking pass.
//!
//! A [`ToiletFeed`] owns one catalog source and one location provider
//! and drives `Idle → Loading → Ready | Failed` cycles:
//!
//! - the first load and forced refreshes run a full fetch + rank cycle
//! - once a cycle has completed (`Ready` or `Failed`), passive refresh
//!   requests are no-ops; only `force = true` runs another cycle
//! - while a cycle is in flight, duplicate non-forced requests are
//!   suppressed
//! - a cycle always runs to completion and writes its result; when
//!   forced refreshes overlap, the last writer wins
//!
//! `Ready` replaces the previous snapshot wholesale and `Failed` retains
//! no previous data. State is published over a watch channel; the
//! presentation side holds a read-only receiver.

use crate::error::FeedFailure;
use crate::rank::rank;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, instrument};
use wclook_catalog::{CatalogClient, FetchResult, Toilet};
use wclook_location::LocationProvider;

/// Anything the feed can fetch a catalog snapshot from.
///
/// [`CatalogClient`] is the production implementation; tests substitute
/// scripted sources.
pub trait CatalogSource: Send + Sync {
    /// Fetch the full set of toilets.
    fn fetch_catalog(&self) -> impl Future<Output = FetchResult<Vec<Toilet>>> + Send;
}

impl CatalogSource for CatalogClient {
    async fn fetch_catalog(&self) -> FetchResult<Vec<Toilet>> {
        self.fetch_all().await
    }
}

/// Lifecycle state of the feed.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedState {
    /// No data fetched yet
    Idle,
    /// A fetch-and-rank cycle is in flight
    Loading,
    /// The most recent successful ranking result
    Ready(Vec<Toilet>),
    /// The most recent cycle failed; no previous data is retained
    Failed(FeedFailure),
}

impl FeedState {
    /// True while a cycle is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The ranked snapshot, when one is held.
    #[must_use]
    pub fn toilets(&self) -> Option<&[Toilet]> {
        match self {
            Self::Ready(toilets) => Some(toilets),
            _ => None,
        }
    }

    /// The failure, when the last cycle failed.
    #[must_use]
    pub fn failure(&self) -> Option<&FeedFailure> {
        match self {
            Self::Failed(failure) => Some(failure),
            _ => None,
        }
    }
}

/// Fetch + rank lifecycle owner.
///
/// The feed holds the only mutable copy of the current state; everyone
/// else observes it through [`ToiletFeed::subscribe`].
pub struct ToiletFeed<S> {
    source: S,
    provider: Arc<dyn LocationProvider>,
    state: watch::Sender<FeedState>,
    completed: AtomicBool,
    in_flight: AtomicBool,
}

impl<S: CatalogSource> ToiletFeed<S> {
    /// Create an idle feed.
    pub fn new(source: S, provider: Arc<dyn LocationProvider>) -> Self {
        let (state, _) = watch::channel(FeedState::Idle);
        Self {
            source,
            provider,
            state,
            completed: AtomicBool::new(false),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Subscribe to lifecycle state changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<FeedState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn current(&self) -> FeedState {
        self.state.borrow().clone()
    }

    /// Run a fetch-and-rank cycle, or suppress it per the lifecycle
    /// guard. Returns the state after this call.
    ///
    /// Suppression rules: once a cycle has completed, only `force`
    /// triggers a new one; while a cycle is in flight, non-forced
    /// duplicates are dropped. A forced refresh always runs, and
    /// whichever overlapping cycle completes last writes the final
    /// state.
    #[instrument(skip(self))]
    pub async fn refresh(&self, force: bool) -> FeedState {
        if !force && self.completed.load(Ordering::Acquire) {
            debug!("Catalog already loaded; refresh without force is a no-op");
            return self.current();
        }
        if self.in_flight.swap(true, Ordering::AcqRel) && !force {
            debug!("Fetch already in flight; suppressing duplicate request");
            return self.current();
        }
        if force {
            debug!("Forced refresh requested");
        }

        self.state.send_replace(FeedState::Loading);

        let state = match self.run_cycle().await {
            Ok(toilets) => FeedState::Ready(toilets),
            Err(failure) => FeedState::Failed(failure),
        };

        // Unconditional write: last writer wins across overlapping
        // forced refreshes.
        self.state.send_replace(state.clone());
        self.completed.store(true, Ordering::Release);
        self.in_flight.store(false, Ordering::Release);
        state
    }

    async fn run_cycle(&self) -> Result<Vec<Toilet>, FeedFailure> {
        let toilets = self.source.fetch_catalog().await?;
        let ranked = rank(toilets, self.provider.as_ref())?;
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use std::collections::VecDeque;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use wclook_catalog::{Cleanliness, FetchError};
    use wclook_geo::Coordinate;
    use wclook_location::{FixedLocationProvider, UnavailableLocationProvider};

    const ORIGIN: Coordinate = Coordinate { latitude: 48.8566, longitude: 2.3522 };

    fn toilet(id: &str, lat: f64, lon: f64) -> Toilet {
        Toilet {
            id: id.to_string(),
            name: format!("Toilettes {id}"),
            location: Coordinate::new(lat, lon),
            address: String::new(),
            distance: None,
            is_accessible: false,
            cleanliness: Cleanliness::Average,
            is_open: true,
            opening_hours: None,
            reviews: vec![],
            note: String::new(),
            quality: 0,
            image: "toilet".to_string(),
        }
    }

    /// A source that replays a script of results and counts calls.
    struct ScriptedSource {
        script: Mutex<VecDeque<FetchResult<Vec<Toilet>>>>,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<FetchResult<Vec<Toilet>>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl CatalogSource for &ScriptedSource {
        async fn fetch_catalog(&self) -> FetchResult<Vec<Toilet>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.script
                .lock()
                .unwrap()
                .pop_front()
                .expect("script exhausted")
        }
    }

    fn paris_provider() -> Arc<dyn LocationProvider> {
        Arc::new(FixedLocationProvider::new(ORIGIN))
    }

    #[tokio::test]
    async fn test_first_load_reaches_ready_sorted() {
        let source = ScriptedSource::new(vec![Ok(vec![
            toilet("far", 48.8600, 2.3600),
            toilet("near", 48.8570, 2.3530),
        ])]);
        let feed = ToiletFeed::new(&source, paris_provider());

        assert_eq!(feed.current(), FeedState::Idle);
        let state = feed.refresh(false).await;

        let toilets = state.toilets().expect("should be ready");
        let ids: Vec<&str> = toilets.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["near", "far"]);
        assert_eq!(feed.current(), state);
    }

    #[tokio::test]
    async fn test_passive_refresh_after_ready_is_noop() {
        let source = ScriptedSource::new(vec![Ok(vec![toilet("a", 48.8570, 2.3530)])]);
        let feed = ToiletFeed::new(&source, paris_provider());

        let first = feed.refresh(false).await;
        assert!(first.toilets().is_some());
        assert_eq!(source.calls(), 1);

        // No force: no new fetch, data untouched.
        let second = feed.refresh(false).await;
        assert_eq!(source.calls(), 1);
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn test_forced_refresh_replaces_snapshot_wholesale() {
        let source = ScriptedSource::new(vec![
            Ok(vec![toilet("old", 48.8570, 2.3530)]),
            Ok(vec![toilet("new", 48.8600, 2.3600)]),
        ]);
        let feed = ToiletFeed::new(&source, paris_provider());

        feed.refresh(false).await;
        let state = feed.refresh(true).await;
        assert_eq!(source.calls(), 2);

        let ids: Vec<&str> = state.toilets().unwrap().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["new"]);
    }

    #[tokio::test]
    async fn test_fetch_failure_reaches_failed() {
        let source =
            ScriptedSource::new(vec![Err(FetchError::Network("connection refused".to_string()))]);
        let feed = ToiletFeed::new(&source, paris_provider());

        let state = feed.refresh(false).await;
        let failure = state.failure().expect("should be failed");
        assert_eq!(failure.kind, FailureKind::Network);
    }

    #[tokio::test]
    async fn test_failed_cycle_also_arms_the_guard() {
        let source = ScriptedSource::new(vec![Err(FetchError::no_results())]);
        let feed = ToiletFeed::new(&source, paris_provider());

        let state = feed.refresh(false).await;
        assert_eq!(state.failure().unwrap().kind, FailureKind::NoResults);

        // Passive re-entry after a failure does not re-trigger either.
        feed.refresh(false).await;
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_no_location_never_produces_ready() {
        let source = ScriptedSource::new(vec![Ok(vec![toilet("a", 48.8570, 2.3530)])]);
        let feed = ToiletFeed::new(&source, Arc::new(UnavailableLocationProvider::new()));

        let state = feed.refresh(false).await;
        assert!(state.toilets().is_none());
        assert_eq!(
            state.failure().unwrap().kind,
            FailureKind::LocationUnavailable
        );
    }

    #[tokio::test]
    async fn test_failure_discards_previous_data() {
        let source = ScriptedSource::new(vec![
            Ok(vec![toilet("a", 48.8570, 2.3530)]),
            Err(FetchError::Network("offline".to_string())),
        ]);
        let feed = ToiletFeed::new(&source, paris_provider());

        feed.refresh(false).await;
        let state = feed.refresh(true).await;

        // The error replaces the data; nothing stale is retained.
        assert!(state.toilets().is_none());
        assert!(feed.current().toilets().is_none());
    }

    #[tokio::test]
    async fn test_subscribers_observe_the_final_state() {
        let source = ScriptedSource::new(vec![Ok(vec![toilet("a", 48.8570, 2.3530)])]);
        let feed = ToiletFeed::new(&source, paris_provider());
        let mut rx = feed.subscribe();

        assert_eq!(*rx.borrow_and_update(), FeedState::Idle);
        feed.refresh(false).await;

        assert!(rx.has_changed().unwrap());
        let state = rx.borrow_and_update().clone();
        assert!(state.toilets().is_some());
    }
}
