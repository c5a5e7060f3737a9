//! Ordered multi-entry aggregation
//!
//! Fans out one entry fetch per requested ID, all in flight at once, and
//! joins them back in input order. Completion order never affects the
//! result: `join_all` yields outputs positionally, so slot `i` always holds
//! the outcome for `entry_ids[i]`.

use futures::future::join_all;

use crate::app::client::PlaybackApi;
use crate::app::models::PlaybackResponse;
use crate::app::session::SessionConfiguration;
use crate::errors::{ApiResult, PlaybackApiError};

/// An entry that was fetched successfully
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedEntry {
    /// Position in the requested list
    pub index: usize,
    /// Requested entry ID
    pub entry_id: String,
    pub details: PlaybackResponse,
}

/// An entry whose fetch failed
#[derive(Debug)]
pub struct EntryFailure {
    /// Position in the requested list
    pub index: usize,
    /// Requested entry ID
    pub entry_id: String,
    pub error: PlaybackApiError,
}

/// Partitioned outcome of a multi-entry load
///
/// Both lists are in input order and together cover every requested entry.
#[derive(Debug, Default)]
pub struct AggregateResult {
    pub successes: Vec<LoadedEntry>,
    pub failures: Vec<EntryFailure>,
}

impl AggregateResult {
    /// Partition positional outcomes
    pub fn from_outcomes<S: AsRef<str>>(
        entry_ids: &[S],
        outcomes: Vec<ApiResult<PlaybackResponse>>,
    ) -> Self {
        let mut result = Self::default();

        for (index, (entry_id, outcome)) in entry_ids.iter().zip(outcomes).enumerate() {
            let entry_id = entry_id.as_ref().to_string();
            match outcome {
                Ok(details) => result.successes.push(LoadedEntry {
                    index,
                    entry_id,
                    details,
                }),
                Err(error) => result.failures.push(EntryFailure {
                    index,
                    entry_id,
                    error,
                }),
            }
        }

        result
    }

    /// Number of entries covered by this result
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Successful metadata records, in input order
    pub fn details(&self) -> impl Iterator<Item = &PlaybackResponse> {
        self.successes.iter().map(|entry| &entry.details)
    }

    /// Split into bare records and errors
    pub fn into_parts(self) -> (Vec<PlaybackResponse>, Vec<PlaybackApiError>) {
        (
            self.successes.into_iter().map(|entry| entry.details).collect(),
            self.failures.into_iter().map(|failure| failure.error).collect(),
        )
    }
}

/// Issues concurrent entry fetches for a list of IDs
pub struct PlaylistAggregator<'a> {
    api: &'a dyn PlaybackApi,
    config: &'a SessionConfiguration,
}

impl<'a> PlaylistAggregator<'a> {
    pub fn new(api: &'a dyn PlaybackApi, config: &'a SessionConfiguration) -> Self {
        Self { api, config }
    }

    /// Fetch every entry and collect the outcomes in input order
    ///
    /// Duplicate IDs are fetched independently. Individual failures are
    /// recorded in the result; this never fails as a whole.
    pub async fn load_all<S>(
        &self,
        entry_ids: &[S],
        authorization_token: Option<&str>,
    ) -> AggregateResult
    where
        S: AsRef<str> + Sync,
    {
        if entry_ids.is_empty() {
            return AggregateResult::default();
        }

        tracing::info!("Loading video details for {} entries", entry_ids.len());

        let fetches = entry_ids.iter().map(|entry_id| {
            self.api
                .get_video_details(self.config, entry_id.as_ref(), authorization_token)
        });
        let outcomes = join_all(fetches).await;

        let result = AggregateResult::from_outcomes(entry_ids, outcomes);
        for failure in &result.failures {
            tracing::warn!(
                "Failed to load entry {} (position {}): {}",
                failure.entry_id,
                failure.index,
                failure.error
            );
        }
        tracing::info!(
            "Loaded {} of {} entries",
            result.successes.len(),
            entry_ids.len()
        );

        result
    }
}
