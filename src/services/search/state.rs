use chrono::Utc;

use crate::{
    error::GatewayError,
    models::{Notice, Place, SearchQuery, SearchResult},
    services::aggregator,
};

/// Lifecycle of the current search
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SearchState {
    #[default]
    Idle,
    Searching {
        generation: u64,
        query: SearchQuery,
        provisional: Vec<Place>,
    },
    Settled {
        generation: u64,
        query: SearchQuery,
        results: Vec<Place>,
    },
    Failed {
        generation: u64,
        query: SearchQuery,
        results: Vec<Place>,
        notice: Notice,
    },
}

/// Inputs to the reducer
#[derive(Debug, Clone)]
pub enum SearchEvent {
    /// A new search started; `provisional` is the catalog subset
    Submitted {
        generation: u64,
        query: SearchQuery,
        provisional: Vec<Place>,
    },
    /// The AI source answered
    Resolved { generation: u64, places: Vec<Place> },
    /// The AI source failed
    Rejected { generation: u64, error: GatewayError },
}

impl SearchEvent {
    pub fn generation(&self) -> u64 {
        match self {
            SearchEvent::Submitted { generation, .. }
            | SearchEvent::Resolved { generation, .. }
            | SearchEvent::Rejected { generation, .. } => *generation,
        }
    }
}

impl SearchState {
    /// Generation of the search this state belongs to, 0 when idle
    pub fn generation(&self) -> u64 {
        match self {
            SearchState::Idle => 0,
            SearchState::Searching { generation, .. }
            | SearchState::Settled { generation, .. }
            | SearchState::Failed { generation, .. } => *generation,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SearchState::Searching { .. })
    }

    pub fn query(&self) -> Option<&SearchQuery> {
        match self {
            SearchState::Idle => None,
            SearchState::Searching { query, .. }
            | SearchState::Settled { query, .. }
            | SearchState::Failed { query, .. } => Some(query),
        }
    }

    /// Places currently visible to the client
    pub fn places(&self) -> &[Place] {
        match self {
            SearchState::Idle => &[],
            SearchState::Searching { provisional, .. } => provisional,
            SearchState::Settled { results, .. } | SearchState::Failed { results, .. } => results,
        }
    }

    pub fn notice(&self) -> Option<Notice> {
        match self {
            SearchState::Failed { notice, .. } => Some(*notice),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> SearchResult {
        SearchResult {
            generation: self.generation(),
            query: self.query().cloned(),
            results: self.places().to_vec(),
            loading: self.is_loading(),
            error: self.notice().map(|n| n.message().to_string()),
            updated_at: Utc::now(),
        }
    }
}

/// Pure state transition
///
/// A submission always moves to `Searching` unless it is older than the
/// current search. Resolutions only apply to the search still in flight with
/// the same generation; anything else is stale and leaves the state untouched.
pub fn transition(state: SearchState, event: SearchEvent) -> SearchState {
    match event {
        SearchEvent::Submitted {
            generation,
            query,
            provisional,
        } => {
            if generation <= state.generation() {
                return state;
            }
            SearchState::Searching {
                generation,
                query,
                provisional,
            }
        }
        SearchEvent::Resolved { generation, places } => match state {
            SearchState::Searching {
                generation: current,
                query,
                provisional,
            } if current == generation => SearchState::Settled {
                generation,
                query,
                results: aggregator::merge(&provisional, &places),
            },
            other => other,
        },
        SearchEvent::Rejected { generation, error } => match state {
            SearchState::Searching {
                generation: current,
                query,
                provisional,
            } if current == generation => SearchState::Failed {
                generation,
                query,
                results: provisional,
                notice: Notice::for_error(&error),
            },
            other => other,
        },
    }
}
