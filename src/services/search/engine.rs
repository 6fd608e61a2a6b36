use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use tokio::{
    sync::{watch, RwLock},
    task::JoinHandle,
};

use super::state::{transition, SearchEvent, SearchState};
use crate::{
    config::Config,
    error::{AppError, AppResult},
    models::{Place, SearchQuery, SearchResult},
    services::{catalog::Catalog, gateway::RecommendationSource},
};

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Sent to the AI source instead of an empty query
    pub trending_phrase: String,
    /// Query submitted by `start`
    pub startup_query: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self::from(&Config::default())
    }
}

impl From<&Config> for EngineSettings {
    fn from(config: &Config) -> Self {
        Self {
            trending_phrase: config.trending_phrase.clone(),
            startup_query: config.startup_query.clone(),
        }
    }
}

/// Drives one search at a time
///
/// Each `submit` takes a fresh generation number, publishes the catalog subset
/// right away and asks the AI source on a background task. When the answer
/// arrives it only lands if no newer search has been submitted since.
#[derive(Clone)]
pub struct SearchEngine {
    inner: Arc<EngineInner>,
}

struct EngineInner {
    catalog: Arc<Catalog>,
    source: Arc<dyn RecommendationSource>,
    settings: EngineSettings,
    generation: AtomicU64,
    state: RwLock<SearchState>,
    selection: RwLock<Option<Place>>,
    updates: watch::Sender<SearchResult>,
}

impl SearchEngine {
    pub fn new(
        catalog: Arc<Catalog>,
        source: Arc<dyn RecommendationSource>,
        settings: EngineSettings,
    ) -> Self {
        let (updates, _) = watch::channel(SearchState::Idle.snapshot());

        Self {
            inner: Arc::new(EngineInner {
                catalog,
                source,
                settings,
                generation: AtomicU64::new(0),
                state: RwLock::new(SearchState::Idle),
                selection: RwLock::new(None),
                updates,
            }),
        }
    }

    /// Submits the startup query so the first view is populated
    pub async fn start(&self) -> JoinHandle<()> {
        let query = SearchQuery::new(self.inner.settings.startup_query.clone());
        self.submit(query).await
    }

    /// Starts a new search, superseding any search still in flight
    ///
    /// Returns once the provisional results are published. The returned handle
    /// completes when the AI answer has been applied or discarded.
    pub async fn submit(&self, query: SearchQuery) -> JoinHandle<()> {
        let query = query.normalized();
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let provisional = self.inner.catalog.matching(&query);

        tracing::info!(
            generation,
            query = %query.text,
            category = ?query.category,
            region = %query.region,
            provisional = provisional.len(),
            "Search submitted"
        );

        self.inner
            .apply(SearchEvent::Submitted {
                generation,
                query: query.clone(),
                provisional,
            })
            .await;

        let inner = self.inner.clone();
        tokio::spawn(async move {
            let text = query.effective_text(&inner.settings.trending_phrase).to_string();
            let outbound = SearchQuery { text, ..query };

            let event = match inner.source.fetch_recommendations(&outbound).await {
                Ok(places) => SearchEvent::Resolved { generation, places },
                Err(error) => {
                    tracing::warn!(generation, error = %error, "AI recommendations unavailable");
                    SearchEvent::Rejected { generation, error }
                }
            };

            inner.apply(event).await;
        })
    }

    /// Latest published result
    pub fn current_result(&self) -> SearchResult {
        self.inner.updates.borrow().clone()
    }

    /// Receives every published result
    pub fn subscribe(&self) -> watch::Receiver<SearchResult> {
        self.inner.updates.subscribe()
    }

    /// Looks a place up in the visible results, then in the catalog
    pub async fn find_place(&self, id: &str) -> Option<Place> {
        let state = self.inner.state.read().await;
        let place = state
            .places()
            .iter()
            .find(|place| place.id == id)
            .or_else(|| self.inner.catalog.get(id))
            .cloned();
        place
    }

    /// Opens the detail view for a place
    pub async fn select_place(&self, id: &str) -> AppResult<Place> {
        let place = self
            .find_place(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("Place {} not found", id)))?;

        *self.inner.selection.write().await = Some(place.clone());
        tracing::debug!(place = %place.id, "Place selected");

        Ok(place)
    }

    pub async fn clear_selection(&self) {
        *self.inner.selection.write().await = None;
    }

    pub async fn selected(&self) -> Option<Place> {
        self.inner.selection.read().await.clone()
    }

    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }
}

impl EngineInner {
    /// Applies an event and publishes the new snapshot if anything changed
    async fn apply(&self, event: SearchEvent) {
        let event_generation = event.generation();
        let mut state = self.state.write().await;

        let before_generation = state.generation();
        let was_loading = state.is_loading();

        let next = transition(std::mem::take(&mut *state), event);
        let changed = next.generation() != before_generation || next.is_loading() != was_loading;
        *state = next;

        if !changed {
            tracing::debug!(
                event_generation,
                current_generation = state.generation(),
                "Discarded stale search event"
            );
            return;
        }

        let snapshot = state.snapshot();
        tracing::info!(
            generation = snapshot.generation,
            results = snapshot.results.len(),
            loading = snapshot.loading,
            notice = snapshot.error.is_some(),
            "Search state published"
        );
        self.updates.send_replace(snapshot);
    }
}
