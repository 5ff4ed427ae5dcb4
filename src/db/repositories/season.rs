use crate::entities::{prelude::*, seasons};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set};

/// Repository for season bookkeeping
pub struct SeasonRepository {
    conn: DatabaseConnection,
}

impl SeasonRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn exists(&self, season_id: i32) -> Result<bool> {
        let row = Seasons::find_by_id(season_id).one(&self.conn).await?;
        Ok(row.is_some())
    }

    pub async fn add(&self, season_id: i32, series_id: i32, season_number: i32) -> Result<()> {
        let active_model = seasons::ActiveModel {
            id: Set(season_id),
            series_id: Set(series_id),
            season_number: Set(season_number),
            monitored: Set(true),
        };

        Seasons::insert(active_model).exec(&self.conn).await?;

        Ok(())
    }

    pub async fn get_by_series(&self, series_id: i32) -> Result<Vec<seasons::Model>> {
        let rows = Seasons::find()
            .filter(seasons::Column::SeriesId.eq(series_id))
            .order_by_asc(seasons::Column::SeasonNumber)
            .all(&self.conn)
            .await?;

        Ok(rows)
    }
}
