//! Domain service for the episode catalog.
//!
//! This module provides the [`EpisodeService`] trait covering release need
//! evaluation, metadata reconciliation, and catalog accessors.

use crate::domain::SeriesId;
use crate::entities::episodes;
use crate::models::episode::{EpisodeInput, RefreshCounts};
use crate::models::release::EpisodeParseResult;
use thiserror::Error;

/// Domain errors for episode operations.
#[derive(Debug, Error)]
pub enum EpisodeError {
    #[error("Series {0} not found")]
    SeriesNotFound(SeriesId),

    #[error("Quality profile {0} not found")]
    ProfileNotFound(i32),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Metadata source error: {0}")]
    MetadataSource(String),
}

impl From<sea_orm::DbErr> for EpisodeError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for EpisodeError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for episode operations.
///
/// Absent lookups are `Ok(None)`/empty, not errors; the need evaluator treats
/// an unknown episode as "create a placeholder", never as a failure.
#[async_trait::async_trait]
pub trait EpisodeService: Send + Sync {
    /// Decides whether a parsed candidate release should be grabbed.
    ///
    /// Evaluates each covered episode number in the candidate's listed order
    /// and returns `true` as soon as one of them still needs the release.
    /// Episodes not yet known locally are persisted as placeholders as a side
    /// effect, even when the final answer is `false`.
    ///
    /// # Errors
    ///
    /// - Returns [`EpisodeError::SeriesNotFound`] if the series is not tracked
    /// - Returns [`EpisodeError::ProfileNotFound`] if its profile is missing
    /// - Returns [`EpisodeError::Database`] on store failures
    async fn is_needed(&self, parsed: &EpisodeParseResult) -> Result<bool, EpisodeError>;

    /// Merges the metadata source's full episode list into the store.
    ///
    /// Existing records keep their identity key and are overwritten; unseen
    /// records are inserted with a store-assigned key. A record that fails to
    /// process is logged and counted without aborting the rest of the run.
    ///
    /// # Errors
    ///
    /// - Returns [`EpisodeError::MetadataSource`] if the fetch fails
    /// - Returns [`EpisodeError::Database`] if a bulk apply fails
    async fn refresh_episode_info(
        &self,
        series_id: SeriesId,
    ) -> Result<RefreshCounts, EpisodeError>;

    /// Fetches one episode by its store-assigned id.
    async fn get_episode(&self, episode_id: i32) -> Result<Option<episodes::Model>, EpisodeError>;

    /// Lists every stored episode of a series, ordered by season and number.
    async fn get_episodes_by_series(
        &self,
        series_id: SeriesId,
    ) -> Result<Vec<episodes::Model>, EpisodeError>;

    /// Lists the stored episodes of one season.
    async fn get_episodes_by_season(
        &self,
        series_id: SeriesId,
        season_number: i32,
    ) -> Result<Vec<episodes::Model>, EpisodeError>;

    /// Overwrites a stored episode. The input must carry its identity key.
    async fn update_episode(&self, episode: &EpisodeInput) -> Result<(), EpisodeError>;

    async fn delete_episode(&self, episode_id: i32) -> Result<(), EpisodeError>;
}
