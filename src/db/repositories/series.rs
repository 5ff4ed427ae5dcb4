use crate::entities::{prelude::*, series};
use anyhow::Result;
use sea_orm::{DatabaseConnection, EntityTrait, Set};

/// Repository for tracked series records
pub struct SeriesRepository {
    conn: DatabaseConnection,
}

impl SeriesRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<series::Model>> {
        let row = Series::find_by_id(id).one(&self.conn).await?;
        Ok(row)
    }

    pub async fn list(&self) -> Result<Vec<series::Model>> {
        let rows = Series::find().all(&self.conn).await?;
        Ok(rows)
    }

    /// Adds a series, overwriting mutable fields when the id already exists.
    pub async fn add(&self, model: &series::Model) -> Result<()> {
        let active_model = series::ActiveModel {
            id: Set(model.id),
            title: Set(model.title.clone()),
            overview: Set(model.overview.clone()),
            status: Set(model.status.clone()),
            quality_profile_id: Set(model.quality_profile_id),
            monitored: Set(model.monitored),
            added_at: Set(model.added_at.clone()),
        };

        Series::insert(active_model)
            .on_conflict(
                sea_orm::sea_query::OnConflict::column(series::Column::Id)
                    .update_columns([
                        series::Column::Title,
                        series::Column::Overview,
                        series::Column::Status,
                        series::Column::QualityProfileId,
                        series::Column::Monitored,
                    ])
                    .to_owned(),
            )
            .exec(&self.conn)
            .await?;

        Ok(())
    }

    pub async fn remove(&self, id: i32) -> Result<bool> {
        let result = Series::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }
}
