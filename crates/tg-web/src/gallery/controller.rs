use std::{fmt, sync::Arc, time::Instant};

use tg_flickr::PhotoSearch;
use tokio::{sync::RwLock, task::JoinHandle};
use tracing::Instrument;

use super::slot::{Completion, FetchTicket, GalleryState, Slot};
use crate::{metrics, topic::Topic};

/// Owns the topic slots and the photo source.
///
/// Cloning is cheap; every clone shares the same state. The lock is only
/// held for the slot transitions, never across the HTTP call. Spawned
/// fetches run inside the caller's span.
#[derive(Clone)]
pub struct Gallery {
    source: Arc<dyn PhotoSearch>,
    state: Arc<RwLock<GalleryState>>,
}

impl fmt::Debug for Gallery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Gallery").finish_non_exhaustive()
    }
}

impl Gallery {
    pub fn new(source: Arc<dyn PhotoSearch>) -> Self {
        Self {
            source,
            state: Arc::default(),
        }
    }

    /// Fetch every fixed topic concurrently, one task per topic.
    ///
    /// Returns the join handles so callers may await the initial load.
    pub fn start(&self) -> Vec<JoinHandle<Completion>> {
        Topic::FIXED
            .into_iter()
            .filter_map(|topic| topic.default_query().map(|query| (topic, query)))
            .map(|(topic, query)| {
                let gallery = self.clone();
                tokio::spawn(async move { gallery.load(topic, query).await }.in_current_span())
            })
            .collect()
    }

    /// Mark `topic` as loading `query` and hand out the ticket for the fetch.
    pub async fn begin(&self, topic: Topic, query: &str) -> FetchTicket {
        self.state.write().await.begin(topic, query)
    }

    /// Begin a search for `text` unless it was already requested. Used when
    /// a search page is viewed, so views never restart or retry a fetch.
    pub async fn begin_search_if_needed(&self, text: &str) -> Option<FetchTicket> {
        let mut state = self.state.write().await;
        if state.search(text).is_some() {
            return None;
        }
        Some(state.begin(Topic::Search, text))
    }

    /// Begin a fresh search for `text` unless one is already in flight.
    /// Used by the search form, which is how a failed search is retried.
    pub async fn refresh_search(&self, text: &str) -> Option<FetchTicket> {
        let mut state = self.state.write().await;
        if state.search(text).is_some_and(Slot::is_loading) {
            return None;
        }
        Some(state.begin(Topic::Search, text))
    }

    /// Run the HTTP call for a ticket and apply the result to its slot.
    pub async fn fetch(&self, ticket: FetchTicket) -> Completion {
        let started = Instant::now();
        let result = self.source.search(&ticket.query).await;
        let elapsed = started.elapsed().as_secs_f64();

        let (completion, outcome) = match result {
            Ok(photos) => (self.state.write().await.succeed(&ticket, photos), "ok"),
            Err(err) => {
                tracing::error!(
                    topic = %ticket.topic,
                    query = %ticket.query,
                    error = %err,
                    "Error fetching photos"
                );
                (self.state.write().await.fail(&ticket), err.kind())
            }
        };

        match completion {
            Completion::Loaded(count) => {
                tracing::info!(topic = %ticket.topic, query = %ticket.query, count, "Photos loaded");
            }
            Completion::Stale => {
                tracing::debug!(
                    topic = %ticket.topic,
                    query = %ticket.query,
                    "Discarding superseded response"
                );
            }
            Completion::Failed => {}
        }

        let outcome = if completion == Completion::Stale {
            "stale"
        } else {
            outcome
        };
        metrics::record_photo_fetch(ticket.topic, outcome, elapsed);

        completion
    }

    /// Run [`fetch`](Self::fetch) on its own task.
    pub fn spawn_fetch(&self, ticket: FetchTicket) -> JoinHandle<Completion> {
        let gallery = self.clone();
        tokio::spawn(async move { gallery.fetch(ticket).await }.in_current_span())
    }

    /// Begin and fetch in one step.
    pub async fn load(&self, topic: Topic, query: &str) -> Completion {
        let ticket = self.begin(topic, query).await;
        self.fetch(ticket).await
    }

    /// Free-text search into the slot for `text`.
    pub async fn search(&self, text: &str) -> Completion {
        self.load(Topic::Search, text).await
    }

    /// Snapshot of a fixed topic's slot for rendering. The search topic has
    /// one slot per text, see [`search_slot`](Self::search_slot).
    pub async fn slot(&self, topic: Topic) -> Slot {
        self.state
            .read()
            .await
            .fixed(topic)
            .cloned()
            .unwrap_or_default()
    }

    /// Snapshot of the results for `text`. Idle and empty if never requested.
    pub async fn search_slot(&self, text: &str) -> Slot {
        self.state
            .read()
            .await
            .search(text)
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tg_flickr::{FlickrError, Photo};
    use tracing::{Event, Subscriber, info_span};
    use tracing_subscriber::{
        Layer,
        layer::{Context, SubscriberExt},
        registry::LookupSpan,
        util::SubscriberInitExt,
    };

    use super::*;

    struct NoPhotos;

    #[async_trait]
    impl PhotoSearch for NoPhotos {
        async fn search(&self, _text: &str) -> Result<Vec<Photo>, FlickrError> {
            Ok(Vec::new())
        }
    }

    /// Records the enclosing span names of every event.
    #[derive(Clone, Default)]
    struct EventScopes(Arc<Mutex<Vec<Vec<String>>>>);

    impl<S> Layer<S> for EventScopes
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        fn on_event(&self, event: &Event<'_>, ctx: Context<'_, S>) {
            let names = ctx
                .event_scope(event)
                .map(|scope| scope.map(|span| span.name().to_string()).collect())
                .unwrap_or_default();
            self.0.lock().unwrap().push(names);
        }
    }

    #[tokio::test]
    async fn test_spawned_fetch_logs_inside_request_span() {
        let scopes = EventScopes::default();
        let _guard = tracing_subscriber::registry()
            .with(scopes.clone())
            .set_default();

        let gallery = Gallery::new(Arc::new(NoPhotos));
        let handle = async {
            let ticket = gallery.begin(Topic::Search, "rome").await;
            gallery.spawn_fetch(ticket)
        }
        .instrument(info_span!("request"))
        .await;

        assert_eq!(handle.await.unwrap(), Completion::Loaded(0));

        let scopes = scopes.0.lock().unwrap();
        assert!(!scopes.is_empty(), "fetch emitted no events");
        assert!(
            scopes
                .iter()
                .all(|names| names.iter().any(|name| name == "request")),
            "fetch events outside the request span: {scopes:?}"
        );
    }

    #[tokio::test]
    async fn test_refresh_search_skips_in_flight_text() {
        let gallery = Gallery::new(Arc::new(NoPhotos));

        let ticket = gallery.refresh_search("rome").await.unwrap();
        assert!(gallery.refresh_search("rome").await.is_none());

        gallery.fetch(ticket).await;
        assert!(gallery.refresh_search("rome").await.is_some());
    }
}
