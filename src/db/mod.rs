use crate::entities::{episode_files, episodes, seasons, series};
use crate::models::episode::{EpisodeFileInput, EpisodeInput};
use crate::quality::{Quality, QualityProfile};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        // A pooled in-memory sqlite hands every connection its own database,
        // so memory urls must stay on a single connection.
        if db_url.contains(":memory:") {
            return Self::with_pool_options(db_url, 1, 1).await;
        }

        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        if !db_url.contains(":memory:") {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        migrator::Migrator::up(&conn, None).await?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn episode_repo(&self) -> repositories::episode::EpisodeRepository {
        repositories::episode::EpisodeRepository::new(self.conn.clone())
    }

    fn episode_file_repo(&self) -> repositories::episode_file::EpisodeFileRepository {
        repositories::episode_file::EpisodeFileRepository::new(self.conn.clone())
    }

    fn series_repo(&self) -> repositories::series::SeriesRepository {
        repositories::series::SeriesRepository::new(self.conn.clone())
    }

    fn season_repo(&self) -> repositories::season::SeasonRepository {
        repositories::season::SeasonRepository::new(self.conn.clone())
    }

    fn quality_repo(&self) -> repositories::quality::QualityRepository {
        repositories::quality::QualityRepository::new(self.conn.clone())
    }

    pub async fn get_episode(&self, id: i32) -> Result<Option<episodes::Model>> {
        self.episode_repo().get(id).await
    }

    pub async fn find_episode(
        &self,
        series_id: i32,
        season_number: i32,
        episode_number: i32,
    ) -> Result<Option<episodes::Model>> {
        self.episode_repo()
            .find_by_number(series_id, season_number, episode_number)
            .await
    }

    pub async fn get_episodes_by_series(&self, series_id: i32) -> Result<Vec<episodes::Model>> {
        self.episode_repo().get_by_series(series_id).await
    }

    pub async fn get_episodes_by_season(
        &self,
        series_id: i32,
        season_number: i32,
    ) -> Result<Vec<episodes::Model>> {
        self.episode_repo()
            .get_by_season(series_id, season_number)
            .await
    }

    pub async fn get_episodes_by_season_id(&self, season_id: i32) -> Result<Vec<episodes::Model>> {
        self.episode_repo().get_by_season_id(season_id).await
    }

    pub async fn add_episode(&self, input: &EpisodeInput) -> Result<i32> {
        self.episode_repo().add(input).await
    }

    pub async fn add_episodes(&self, inputs: &[EpisodeInput]) -> Result<()> {
        self.episode_repo().add_many(inputs).await
    }

    pub async fn update_episode(&self, input: &EpisodeInput) -> Result<()> {
        self.episode_repo().update(input).await
    }

    pub async fn update_episodes(&self, inputs: &[EpisodeInput]) -> Result<()> {
        self.episode_repo().update_many(inputs).await
    }

    pub async fn delete_episode(&self, id: i32) -> Result<()> {
        self.episode_repo().delete(id).await
    }

    pub async fn get_episode_file(&self, id: i32) -> Result<Option<episode_files::Model>> {
        self.episode_file_repo().get(id).await
    }

    pub async fn get_file_for_episode(
        &self,
        episode_id: i32,
    ) -> Result<Option<episode_files::Model>> {
        self.episode_file_repo().get_for_episode(episode_id).await
    }

    pub async fn add_episode_file(&self, input: &EpisodeFileInput) -> Result<i32> {
        self.episode_file_repo().add(input).await
    }

    pub async fn delete_episode_file(&self, id: i32) -> Result<()> {
        self.episode_file_repo().delete(id).await
    }

    pub async fn get_series(&self, id: i32) -> Result<Option<series::Model>> {
        self.series_repo().get(id).await
    }

    pub async fn list_series(&self) -> Result<Vec<series::Model>> {
        self.series_repo().list().await
    }

    pub async fn add_series(&self, model: &series::Model) -> Result<()> {
        self.series_repo().add(model).await
    }

    pub async fn remove_series(&self, id: i32) -> Result<bool> {
        self.series_repo().remove(id).await
    }

    pub async fn season_exists(&self, season_id: i32) -> Result<bool> {
        self.season_repo().exists(season_id).await
    }

    pub async fn add_season(
        &self,
        season_id: i32,
        series_id: i32,
        season_number: i32,
    ) -> Result<()> {
        self.season_repo()
            .add(season_id, series_id, season_number)
            .await
    }

    pub async fn get_seasons_by_series(&self, series_id: i32) -> Result<Vec<seasons::Model>> {
        self.season_repo().get_by_series(series_id).await
    }

    pub async fn get_quality_profile(&self, id: i32) -> Result<Option<QualityProfile>> {
        self.quality_repo().get_profile(id).await
    }

    pub async fn get_quality_profile_by_name(&self, name: &str) -> Result<Option<QualityProfile>> {
        self.quality_repo().get_profile_by_name(name).await
    }

    pub async fn ensure_quality_profile(&self, name: &str, cutoff: Quality) -> Result<i32> {
        self.quality_repo().ensure_profile(name, cutoff).await
    }
}
