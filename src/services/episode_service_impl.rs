//! `SeaORM` implementation of the [`EpisodeService`] trait.
//!
//! Carries the two pieces of real decision logic in the crate: the release
//! need evaluation and the episode reconciliation against the metadata source.
//! Everything else forwards to the store.

use crate::clients::{EpisodeResource, MetadataSource};
use crate::db::Store;
use crate::domain::SeriesId;
use crate::entities::episodes;
use crate::models::episode::{EpisodeInput, RefreshCounts};
use crate::models::release::EpisodeParseResult;
use crate::quality::{HeldFile, Quality, ReleaseDecision};
use crate::services::SeasonService;
use crate::services::episode_service::{EpisodeError, EpisodeService};

use anyhow::Context;
use chrono::{NaiveDate, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Air dates below this floor are clamped; the backing store's datetime range
/// does not reach further back.
static STORAGE_DATE_FLOOR: LazyLock<NaiveDate> =
    LazyLock::new(|| NaiveDate::from_ymd_opt(1753, 1, 1).expect("fixed calendar date"));

pub struct SeaOrmEpisodeService {
    store: Arc<Store>,
    metadata: Arc<dyn MetadataSource>,
    seasons: Arc<SeasonService>,
}

impl SeaOrmEpisodeService {
    #[must_use]
    pub fn new(
        store: Arc<Store>,
        metadata: Arc<dyn MetadataSource>,
        seasons: Arc<SeasonService>,
    ) -> Self {
        Self {
            store,
            metadata,
            seasons,
        }
    }

    /// Minimal episode record standing in until metadata is refreshed.
    fn placeholder(series_id: i32, season_number: i32, episode_number: i32) -> EpisodeInput {
        EpisodeInput {
            id: None,
            tvdb_id: None,
            series_id,
            season_id: None,
            season_number,
            episode_number,
            title: String::new(),
            overview: String::new(),
            air_date: Utc::now().date_naive(),
            language: "en".to_string(),
        }
    }

    async fn held_file(&self, episode_id: i32) -> Result<Option<HeldFile>, EpisodeError> {
        let Some(file) = self.store.get_file_for_episode(episode_id).await? else {
            return Ok(None);
        };

        let quality = Quality::from_storage_id(file.quality).ok_or_else(|| {
            EpisodeError::Database(format!(
                "episode file {} carries unknown quality id {}",
                file.id, file.quality
            ))
        })?;

        Ok(Some(HeldFile {
            quality,
            proper: file.proper,
        }))
    }

    /// Maps one fetched record to a store row, classifying it for insert or
    /// update by the natural key. Errors here are the caller's per-item
    /// failures.
    async fn map_resource(
        &self,
        series_id: i32,
        resource: &EpisodeResource,
    ) -> anyhow::Result<EpisodeInput> {
        let air_date = match &resource.first_aired {
            Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                .with_context(|| format!("invalid air date {raw:?}"))?,
            None => *STORAGE_DATE_FLOOR,
        };

        let air_date = air_date.max(*STORAGE_DATE_FLOOR);

        let existing = self
            .store
            .find_episode(series_id, resource.season_number, resource.episode_number)
            .await?;

        Ok(EpisodeInput {
            id: existing.map(|e| e.id),
            tvdb_id: Some(resource.id),
            series_id,
            season_id: Some(resource.season_id),
            season_number: resource.season_number,
            episode_number: resource.episode_number,
            title: resource.episode_name.clone(),
            overview: resource.overview.clone(),
            air_date,
            language: resource.language.abbreviation.clone(),
        })
    }
}

#[async_trait::async_trait]
impl EpisodeService for SeaOrmEpisodeService {
    async fn is_needed(&self, parsed: &EpisodeParseResult) -> Result<bool, EpisodeError> {
        let series = self
            .store
            .get_series(parsed.series_id)
            .await?
            .ok_or_else(|| EpisodeError::SeriesNotFound(SeriesId::new(parsed.series_id)))?;

        let profile = self
            .store
            .get_quality_profile(series.quality_profile_id)
            .await?
            .ok_or(EpisodeError::ProfileNotFound(series.quality_profile_id))?;

        for &episode_number in &parsed.episode_numbers {
            let held = match self
                .store
                .find_episode(parsed.series_id, parsed.season_number, episode_number)
                .await?
            {
                Some(episode) => self.held_file(episode.id).await?,
                None => {
                    info!(
                        series = %series.title,
                        season = parsed.season_number,
                        episode = episode_number,
                        "Episode not in store, adding placeholder record"
                    );

                    let placeholder = Self::placeholder(
                        parsed.series_id,
                        parsed.season_number,
                        episode_number,
                    );
                    self.store.add_episode(&placeholder).await?;

                    None
                }
            };

            match profile.evaluate(parsed.quality, parsed.proper, held.as_ref()) {
                ReleaseDecision::Grab(reason) => {
                    info!(
                        event = "release_needed",
                        series = %series.title,
                        season = parsed.season_number,
                        episode = episode_number,
                        quality = %parsed.quality,
                        proper = parsed.proper,
                        reason = %reason,
                        "Candidate release is needed"
                    );
                    return Ok(true);
                }
                ReleaseDecision::Skip(reason) => {
                    debug!(
                        series = %series.title,
                        season = parsed.season_number,
                        episode = episode_number,
                        reason = %reason,
                        "Episode already satisfied"
                    );
                }
            }
        }

        Ok(false)
    }

    async fn refresh_episode_info(
        &self,
        series_id: SeriesId,
    ) -> Result<RefreshCounts, EpisodeError> {
        let id = series_id.value();

        info!(series_id = id, "Starting episode info refresh");

        let payload = self
            .metadata
            .get_series(id, true)
            .await
            .map_err(|e| EpisodeError::MetadataSource(e.to_string()))?;

        let mut ensured = HashSet::new();
        for episode in &payload.episodes {
            if ensured.insert((episode.season_id, episode.season_number)) {
                self.seasons
                    .ensure_season(id, episode.season_id, episode.season_number)
                    .await?;
            }
        }

        let mut counts = RefreshCounts::default();
        let mut inserts = Vec::new();
        let mut updates = Vec::new();

        for resource in &payload.episodes {
            match self.map_resource(id, resource).await {
                Ok(input) => {
                    if input.id.is_some() {
                        updates.push(input);
                    } else {
                        inserts.push(input);
                    }
                    counts.successful += 1;
                }
                Err(e) => {
                    warn!(
                        series = %payload.series_name,
                        season = resource.season_number,
                        episode = resource.episode_number,
                        error = %e,
                        "Failed to process fetched episode"
                    );
                    counts.failed += 1;
                }
            }
        }

        self.store.add_episodes(&inserts).await?;
        self.store.update_episodes(&updates).await?;

        info!(
            event = "episode_refresh_finished",
            series = %payload.series_name,
            inserted = inserts.len(),
            updated = updates.len(),
            successful = counts.successful,
            failed = counts.failed,
            "Episode info refresh complete"
        );

        Ok(counts)
    }

    async fn get_episode(&self, episode_id: i32) -> Result<Option<episodes::Model>, EpisodeError> {
        let episode = self.store.get_episode(episode_id).await?;
        Ok(episode)
    }

    async fn get_episodes_by_series(
        &self,
        series_id: SeriesId,
    ) -> Result<Vec<episodes::Model>, EpisodeError> {
        let episodes = self.store.get_episodes_by_series(series_id.value()).await?;
        Ok(episodes)
    }

    async fn get_episodes_by_season(
        &self,
        series_id: SeriesId,
        season_number: i32,
    ) -> Result<Vec<episodes::Model>, EpisodeError> {
        let episodes = self
            .store
            .get_episodes_by_season(series_id.value(), season_number)
            .await?;
        Ok(episodes)
    }

    async fn update_episode(&self, episode: &EpisodeInput) -> Result<(), EpisodeError> {
        self.store.update_episode(episode).await?;
        Ok(())
    }

    async fn delete_episode(&self, episode_id: i32) -> Result<(), EpisodeError> {
        self.store.delete_episode(episode_id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_date_floor_is_fixed() {
        assert_eq!(
            *STORAGE_DATE_FLOOR,
            NaiveDate::from_ymd_opt(1753, 1, 1).unwrap()
        );
    }

    #[test]
    fn placeholder_has_minimal_fields() {
        let input = SeaOrmEpisodeService::placeholder(10, 2, 5);
        assert_eq!(input.id, None);
        assert_eq!(input.tvdb_id, None);
        assert_eq!(input.season_id, None);
        assert!(input.title.is_empty());
        assert!(input.overview.is_empty());
        assert_eq!(input.language, "en");
        assert_eq!(input.air_date, Utc::now().date_naive());
    }
}
