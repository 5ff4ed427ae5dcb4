use super::{EpisodeResource, LanguageResource, MetadataSource, SeriesPayload};
use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct TvdbResponse<T> {
    data: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TvdbSeries {
    series_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TvdbEpisode {
    id: i32,
    aired_season_id: i32,
    aired_season: i32,
    aired_episode_number: i32,
    first_aired: Option<String>,
    episode_name: Option<String>,
    overview: Option<String>,
    language: Option<TvdbEpisodeLanguage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TvdbEpisodeLanguage {
    episode_name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TvdbLinks {
    next: Option<i32>,
}

#[derive(Debug, Deserialize)]
struct TvdbEpisodePage {
    data: Vec<TvdbEpisode>,
    links: Option<TvdbLinks>,
}

#[derive(Clone)]
pub struct TvdbClient {
    client: Client,
    base_url: String,
}

impl TvdbClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_series_record(&self, series_id: i32) -> Result<TvdbSeries> {
        let url = format!("{}/series/{}", self.base_url, series_id);
        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TVDB API error: {} - {}", status, body));
        }

        let response: TvdbResponse<TvdbSeries> = response.json().await?;
        Ok(response.data)
    }

    async fn get_episode_page(&self, series_id: i32, page: i32) -> Result<TvdbEpisodePage> {
        let url = format!(
            "{}/series/{}/episodes?page={}",
            self.base_url, series_id, page
        );
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            // No episodes recorded for the series.
            return Ok(TvdbEpisodePage {
                data: Vec::new(),
                links: None,
            });
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow::anyhow!("TVDB API error: {} - {}", status, body));
        }

        let page: TvdbEpisodePage = response.json().await?;
        Ok(page)
    }

    fn map_episode(series_id: i32, episode: TvdbEpisode) -> EpisodeResource {
        let abbreviation = episode
            .language
            .and_then(|l| l.episode_name)
            .unwrap_or_else(|| "en".to_string());

        EpisodeResource {
            id: episode.id,
            series_id,
            season_id: episode.aired_season_id,
            season_number: episode.aired_season,
            episode_number: episode.aired_episode_number,
            first_aired: episode.first_aired.filter(|s| !s.is_empty()),
            language: LanguageResource { abbreviation },
            overview: episode.overview.unwrap_or_default(),
            episode_name: episode.episode_name.unwrap_or_default(),
        }
    }
}

#[async_trait]
impl MetadataSource for TvdbClient {
    async fn get_series(&self, series_id: i32, include_episodes: bool) -> Result<SeriesPayload> {
        let series = self.get_series_record(series_id).await?;

        let mut episodes = Vec::new();

        if include_episodes {
            let mut page = 1;
            loop {
                let result = self.get_episode_page(series_id, page).await?;

                episodes.extend(
                    result
                        .data
                        .into_iter()
                        .map(|e| Self::map_episode(series_id, e)),
                );

                match result.links.and_then(|l| l.next) {
                    Some(next) if next > page => page = next,
                    _ => break,
                }
            }
        }

        Ok(SeriesPayload {
            series_name: series.series_name,
            episodes,
        })
    }
}
