pub mod tvdb;

pub use tvdb::TvdbClient;

use anyhow::Result;
use async_trait::async_trait;

/// Full episode listing for one series as reported by the metadata source.
#[derive(Debug, Clone)]
pub struct SeriesPayload {
    pub series_name: String,
    pub episodes: Vec<EpisodeResource>,
}

#[derive(Debug, Clone)]
pub struct EpisodeResource {
    pub id: i32,
    pub series_id: i32,
    pub season_id: i32,
    pub season_number: i32,
    pub episode_number: i32,
    /// Calendar date string (`YYYY-MM-DD`); absent when the source has none.
    pub first_aired: Option<String>,
    pub language: LanguageResource,
    pub overview: String,
    pub episode_name: String,
}

#[derive(Debug, Clone)]
pub struct LanguageResource {
    pub abbreviation: String,
}

/// External metadata source consumed by the episode reconciler.
///
/// `include_episodes` requests the full-detail listing rather than the bare
/// series record.
#[async_trait]
pub trait MetadataSource: Send + Sync {
    async fn get_series(&self, series_id: i32, include_episodes: bool) -> Result<SeriesPayload>;
}
