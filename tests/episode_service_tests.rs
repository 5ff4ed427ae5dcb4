//! End-to-end tests for the episode service over an in-memory store.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;

use seriarr::Store;
use seriarr::clients::{EpisodeResource, LanguageResource, MetadataSource, SeriesPayload};
use seriarr::domain::SeriesId;
use seriarr::entities::series;
use seriarr::models::episode::{EpisodeFileInput, EpisodeInput, RefreshCounts};
use seriarr::models::release::EpisodeParseResult;
use seriarr::quality::Quality;
use seriarr::services::{EpisodeError, EpisodeService, SeaOrmEpisodeService, SeasonService};

const SERIES_ID: i32 = 71663;

struct StubMetadataSource {
    payload: SeriesPayload,
}

#[async_trait]
impl MetadataSource for StubMetadataSource {
    async fn get_series(
        &self,
        _series_id: i32,
        _include_episodes: bool,
    ) -> anyhow::Result<SeriesPayload> {
        Ok(self.payload.clone())
    }
}

async fn spawn_store() -> Arc<Store> {
    Arc::new(
        Store::new("sqlite::memory:")
            .await
            .expect("failed to open in-memory store"),
    )
}

async fn seed_series(store: &Store, cutoff: Quality) {
    let profile_id = store
        .ensure_quality_profile("Default", cutoff)
        .await
        .expect("failed to seed profile");

    store
        .add_series(&series::Model {
            id: SERIES_ID,
            title: "Test Series".to_string(),
            overview: None,
            status: Some("Continuing".to_string()),
            quality_profile_id: profile_id,
            monitored: true,
            added_at: Some(chrono::Utc::now().to_rfc3339()),
        })
        .await
        .expect("failed to seed series");
}

fn service(store: &Arc<Store>, payload: SeriesPayload) -> SeaOrmEpisodeService {
    let seasons = Arc::new(SeasonService::new(store.clone()));
    SeaOrmEpisodeService::new(
        store.clone(),
        Arc::new(StubMetadataSource { payload }),
        seasons,
    )
}

fn empty_payload() -> SeriesPayload {
    SeriesPayload {
        series_name: "Test Series".to_string(),
        episodes: Vec::new(),
    }
}

fn resource(
    id: i32,
    season_id: i32,
    season_number: i32,
    episode_number: i32,
    first_aired: Option<&str>,
) -> EpisodeResource {
    EpisodeResource {
        id,
        series_id: SERIES_ID,
        season_id,
        season_number,
        episode_number,
        first_aired: first_aired.map(str::to_string),
        language: LanguageResource {
            abbreviation: "en".to_string(),
        },
        overview: format!("Overview for episode {episode_number}"),
        episode_name: format!("Episode {episode_number}"),
    }
}

async fn seed_episode(store: &Store, season_number: i32, episode_number: i32) -> i32 {
    store
        .add_episode(&EpisodeInput {
            id: None,
            tvdb_id: None,
            series_id: SERIES_ID,
            season_id: None,
            season_number,
            episode_number,
            title: format!("Episode {episode_number}"),
            overview: String::new(),
            air_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            language: "en".to_string(),
        })
        .await
        .expect("failed to seed episode")
}

async fn attach_file(store: &Store, episode_id: i32, quality: Quality, proper: bool) {
    store
        .add_episode_file(&EpisodeFileInput {
            series_id: SERIES_ID,
            episode_id,
            path: format!("/library/test-series/{episode_id}.mkv"),
            size: Some(734_003_200),
            quality: quality.storage_id(),
            proper,
        })
        .await
        .expect("failed to attach file");
}

fn candidate(
    season_number: i32,
    episode_numbers: &[i32],
    quality: Quality,
    proper: bool,
) -> EpisodeParseResult {
    EpisodeParseResult {
        series_id: SERIES_ID,
        season_number,
        episode_numbers: episode_numbers.to_vec(),
        quality,
        proper,
    }
}

#[tokio::test]
async fn unknown_episode_gets_placeholder_and_is_needed() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;
    let svc = service(&store, empty_payload());

    let parsed = candidate(1, &[5], Quality::Webdl, false);
    assert!(svc.is_needed(&parsed).await.unwrap());

    let placeholder = store
        .find_episode(SERIES_ID, 1, 5)
        .await
        .unwrap()
        .expect("placeholder should have been persisted");
    assert_eq!(placeholder.tvdb_id, None);
    assert_eq!(placeholder.season_id, None);
    assert!(placeholder.title.is_empty());
    assert!(placeholder.overview.is_empty());
    assert_eq!(placeholder.language, "en");

    // A second evaluation reuses the placeholder instead of duplicating it.
    assert!(svc.is_needed(&parsed).await.unwrap());
    let all = store.get_episodes_by_series(SERIES_ID).await.unwrap();
    assert_eq!(all.len(), 1);
}

#[tokio::test]
async fn unknown_series_is_an_error() {
    let store = spawn_store().await;
    let svc = service(&store, empty_payload());

    let parsed = candidate(1, &[1], Quality::Webdl, false);
    let err = svc.is_needed(&parsed).await.unwrap_err();
    assert!(matches!(err, EpisodeError::SeriesNotFound(id) if id == SeriesId::new(SERIES_ID)));
}

#[tokio::test]
async fn held_higher_quality_satisfies_candidate() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;
    let svc = service(&store, empty_payload());

    let episode_id = seed_episode(&store, 1, 1).await;
    attach_file(&store, episode_id, Quality::Bluray1080p, false).await;

    let parsed = candidate(1, &[1], Quality::Webdl, true);
    assert!(!svc.is_needed(&parsed).await.unwrap());
}

#[tokio::test]
async fn exact_quality_and_proper_match_is_satisfied() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;
    let svc = service(&store, empty_payload());

    let episode_id = seed_episode(&store, 1, 1).await;
    attach_file(&store, episode_id, Quality::Webdl, false).await;

    let parsed = candidate(1, &[1], Quality::Webdl, false);
    assert!(!svc.is_needed(&parsed).await.unwrap());
}

#[tokio::test]
async fn proper_repack_at_equal_quality_is_needed() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;
    let svc = service(&store, empty_payload());

    let episode_id = seed_episode(&store, 1, 1).await;
    attach_file(&store, episode_id, Quality::Webdl, false).await;

    let parsed = candidate(1, &[1], Quality::Webdl, true);
    assert!(svc.is_needed(&parsed).await.unwrap());
}

#[tokio::test]
async fn upgrade_is_skipped_once_cutoff_reached() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Webdl).await;
    let svc = service(&store, empty_payload());

    let episode_id = seed_episode(&store, 1, 1).await;
    attach_file(&store, episode_id, Quality::Webdl, false).await;

    let parsed = candidate(1, &[1], Quality::Bluray1080p, false);
    assert!(!svc.is_needed(&parsed).await.unwrap());
}

#[tokio::test]
async fn upgrade_below_cutoff_is_needed() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;
    let svc = service(&store, empty_payload());

    let episode_id = seed_episode(&store, 1, 1).await;
    attach_file(&store, episode_id, Quality::Hdtv, false).await;

    let parsed = candidate(1, &[1], Quality::Webdl, false);
    assert!(svc.is_needed(&parsed).await.unwrap());
}

#[tokio::test]
async fn multi_episode_release_needed_when_one_episode_has_no_file() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;
    let svc = service(&store, empty_payload());

    let third = seed_episode(&store, 2, 3).await;
    attach_file(&store, third, Quality::Hdtv, false).await;
    seed_episode(&store, 2, 4).await;

    let parsed = candidate(2, &[3, 4], Quality::Hdtv, false);
    assert!(svc.is_needed(&parsed).await.unwrap());

    // Episode 3 was satisfied and must not have been recreated.
    let all = store.get_episodes_by_series(SERIES_ID).await.unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn refresh_inserts_then_updates_with_stable_identity() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;

    let payload = SeriesPayload {
        series_name: "Test Series".to_string(),
        episodes: vec![
            resource(301, 9001, 1, 1, Some("2024-01-08")),
            resource(302, 9001, 1, 2, Some("2024-01-15")),
            resource(303, 9001, 1, 3, Some("2024-01-22")),
        ],
    };
    let svc = service(&store, payload);

    let counts = svc.refresh_episode_info(SeriesId::new(SERIES_ID)).await.unwrap();
    assert_eq!(
        counts,
        RefreshCounts {
            successful: 3,
            failed: 0
        }
    );

    let first_run = store.get_episodes_by_series(SERIES_ID).await.unwrap();
    assert_eq!(first_run.len(), 3);
    let mut first_ids: Vec<i32> = first_run.iter().map(|e| e.id).collect();
    first_ids.sort_unstable();

    assert!(first_run.iter().all(|e| e.tvdb_id.is_some()));
    assert!(first_run.iter().all(|e| e.season_id == Some(9001)));

    // Same snapshot again: no new rows, identity keys unchanged.
    let counts = svc.refresh_episode_info(SeriesId::new(SERIES_ID)).await.unwrap();
    assert_eq!(counts.successful, 3);
    assert_eq!(counts.failed, 0);

    let second_run = store.get_episodes_by_series(SERIES_ID).await.unwrap();
    assert_eq!(second_run.len(), 3);
    let mut second_ids: Vec<i32> = second_run.iter().map(|e| e.id).collect();
    second_ids.sort_unstable();
    assert_eq!(first_ids, second_ids);

    // Season bookkeeping is idempotent across runs.
    let seasons = store.get_seasons_by_series(SERIES_ID).await.unwrap();
    assert_eq!(seasons.len(), 1);
    assert_eq!(seasons[0].id, 9001);
    assert_eq!(seasons[0].season_number, 1);
}

#[tokio::test]
async fn refresh_backfills_placeholder_and_keeps_its_identity() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;
    let svc = service(&store, empty_payload());

    // The need evaluator learns about the episode first.
    let parsed = candidate(1, &[2], Quality::Webdl, false);
    assert!(svc.is_needed(&parsed).await.unwrap());
    let placeholder = store.find_episode(SERIES_ID, 1, 2).await.unwrap().unwrap();

    let payload = SeriesPayload {
        series_name: "Test Series".to_string(),
        episodes: vec![resource(302, 9001, 1, 2, Some("2024-01-15"))],
    };
    let svc = service(&store, payload);
    let counts = svc.refresh_episode_info(SeriesId::new(SERIES_ID)).await.unwrap();
    assert_eq!(counts.successful, 1);

    let refreshed = store.find_episode(SERIES_ID, 1, 2).await.unwrap().unwrap();
    assert_eq!(refreshed.id, placeholder.id);
    assert_eq!(refreshed.tvdb_id, Some(302));
    assert_eq!(refreshed.title, "Episode 2");
    assert_eq!(
        refreshed.air_date,
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    );
}

#[tokio::test]
async fn refresh_clamps_air_dates_below_the_floor() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;

    let floor = NaiveDate::from_ymd_opt(1753, 1, 1).unwrap();

    // Insert batch: one ancient date, one missing date.
    let payload = SeriesPayload {
        series_name: "Test Series".to_string(),
        episodes: vec![
            resource(301, 9001, 1, 1, Some("1200-06-01")),
            resource(302, 9001, 1, 2, None),
        ],
    };
    let svc = service(&store, payload);
    let counts = svc.refresh_episode_info(SeriesId::new(SERIES_ID)).await.unwrap();
    assert_eq!(counts.successful, 2);

    let first = store.find_episode(SERIES_ID, 1, 1).await.unwrap().unwrap();
    let second = store.find_episode(SERIES_ID, 1, 2).await.unwrap().unwrap();
    assert_eq!(first.air_date, floor);
    assert_eq!(second.air_date, floor);

    // Update batch: the existing row clamps too.
    let payload = SeriesPayload {
        series_name: "Test Series".to_string(),
        episodes: vec![resource(301, 9001, 1, 1, Some("0044-03-15"))],
    };
    let svc = service(&store, payload);
    svc.refresh_episode_info(SeriesId::new(SERIES_ID)).await.unwrap();

    let updated = store.find_episode(SERIES_ID, 1, 1).await.unwrap().unwrap();
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.air_date, floor);
}

#[tokio::test]
async fn one_malformed_record_does_not_abort_the_refresh() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;

    let payload = SeriesPayload {
        series_name: "Test Series".to_string(),
        episodes: vec![
            resource(301, 9001, 1, 1, Some("2024-01-08")),
            resource(302, 9001, 1, 2, Some("not-a-date")),
            resource(303, 9001, 1, 3, Some("2024-01-22")),
        ],
    };
    let svc = service(&store, payload);

    let counts = svc.refresh_episode_info(SeriesId::new(SERIES_ID)).await.unwrap();
    assert_eq!(
        counts,
        RefreshCounts {
            successful: 2,
            failed: 1
        }
    );

    let all = store.get_episodes_by_series(SERIES_ID).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(store.find_episode(SERIES_ID, 1, 2).await.unwrap().is_none());
}

#[tokio::test]
async fn pass_through_accessors_forward_to_the_store() {
    let store = spawn_store().await;
    seed_series(&store, Quality::Bluray1080p).await;
    let svc = service(&store, empty_payload());

    let first = seed_episode(&store, 1, 1).await;
    seed_episode(&store, 1, 2).await;
    seed_episode(&store, 2, 1).await;

    let by_series = svc
        .get_episodes_by_series(SeriesId::new(SERIES_ID))
        .await
        .unwrap();
    assert_eq!(by_series.len(), 3);

    let by_season = svc
        .get_episodes_by_season(SeriesId::new(SERIES_ID), 1)
        .await
        .unwrap();
    assert_eq!(by_season.len(), 2);

    let fetched = svc.get_episode(first).await.unwrap().unwrap();
    assert_eq!(fetched.episode_number, 1);

    let mut input = EpisodeInput {
        id: Some(fetched.id),
        tvdb_id: fetched.tvdb_id,
        series_id: fetched.series_id,
        season_id: fetched.season_id,
        season_number: fetched.season_number,
        episode_number: fetched.episode_number,
        title: "Renamed".to_string(),
        overview: fetched.overview,
        air_date: fetched.air_date,
        language: fetched.language,
    };
    svc.update_episode(&input).await.unwrap();
    let renamed = svc.get_episode(first).await.unwrap().unwrap();
    assert_eq!(renamed.title, "Renamed");

    // Updating without an identity key violates the store contract.
    input.id = None;
    assert!(svc.update_episode(&input).await.is_err());

    svc.delete_episode(first).await.unwrap();
    assert!(svc.get_episode(first).await.unwrap().is_none());
}
