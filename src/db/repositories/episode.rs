use crate::entities::{episodes, prelude::*};
use crate::models::episode::EpisodeInput;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, Set,
};

/// Repository for episode catalog operations
pub struct EpisodeRepository {
    conn: DatabaseConnection,
}

impl EpisodeRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn active_model(input: &EpisodeInput) -> episodes::ActiveModel {
        episodes::ActiveModel {
            id: input.id.map_or(NotSet, Set),
            tvdb_id: Set(input.tvdb_id),
            series_id: Set(input.series_id),
            season_id: Set(input.season_id),
            season_number: Set(input.season_number),
            episode_number: Set(input.episode_number),
            title: Set(input.title.clone()),
            overview: Set(input.overview.clone()),
            air_date: Set(input.air_date),
            language: Set(input.language.clone()),
        }
    }

    pub async fn get(&self, id: i32) -> Result<Option<episodes::Model>> {
        let row = Episodes::find_by_id(id).one(&self.conn).await?;
        Ok(row)
    }

    /// Lookup by the natural key used before the store-assigned id is known.
    pub async fn find_by_number(
        &self,
        series_id: i32,
        season_number: i32,
        episode_number: i32,
    ) -> Result<Option<episodes::Model>> {
        let row = Episodes::find()
            .filter(episodes::Column::SeriesId.eq(series_id))
            .filter(episodes::Column::SeasonNumber.eq(season_number))
            .filter(episodes::Column::EpisodeNumber.eq(episode_number))
            .one(&self.conn)
            .await?;

        Ok(row)
    }

    pub async fn get_by_series(&self, series_id: i32) -> Result<Vec<episodes::Model>> {
        let rows = Episodes::find()
            .filter(episodes::Column::SeriesId.eq(series_id))
            .order_by_asc(episodes::Column::SeasonNumber)
            .order_by_asc(episodes::Column::EpisodeNumber)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    pub async fn get_by_season(
        &self,
        series_id: i32,
        season_number: i32,
    ) -> Result<Vec<episodes::Model>> {
        let rows = Episodes::find()
            .filter(episodes::Column::SeriesId.eq(series_id))
            .filter(episodes::Column::SeasonNumber.eq(season_number))
            .order_by_asc(episodes::Column::EpisodeNumber)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Lookup by the metadata source's season identity. Placeholders carry no
    /// season id and are never matched here.
    pub async fn get_by_season_id(&self, season_id: i32) -> Result<Vec<episodes::Model>> {
        let rows = Episodes::find()
            .filter(episodes::Column::SeasonId.eq(season_id))
            .order_by_asc(episodes::Column::EpisodeNumber)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }

    /// Inserts one episode and returns the store-assigned identity key.
    pub async fn add(&self, input: &EpisodeInput) -> Result<i32> {
        let result = Episodes::insert(Self::active_model(input))
            .exec(&self.conn)
            .await?;

        Ok(result.last_insert_id)
    }

    pub async fn add_many(&self, inputs: &[EpisodeInput]) -> Result<()> {
        if inputs.is_empty() {
            return Ok(());
        }

        let active_models: Vec<episodes::ActiveModel> =
            inputs.iter().map(Self::active_model).collect();

        Episodes::insert_many(active_models).exec(&self.conn).await?;

        Ok(())
    }

    pub async fn update(&self, input: &EpisodeInput) -> Result<()> {
        if input.id.is_none() {
            anyhow::bail!("episode update requires a previously assigned identity key");
        }

        Self::active_model(input).update(&self.conn).await?;

        Ok(())
    }

    /// Applies an update batch. Row-wise underneath; every row must carry its
    /// identity key.
    pub async fn update_many(&self, inputs: &[EpisodeInput]) -> Result<()> {
        for input in inputs {
            self.update(input).await?;
        }

        Ok(())
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        Episodes::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }
}
