use crate::entities::{episode_files, prelude::*};
use crate::models::episode::EpisodeFileInput;
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Repository for held media file records
pub struct EpisodeFileRepository {
    conn: DatabaseConnection,
}

impl EpisodeFileRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    pub async fn get(&self, id: i32) -> Result<Option<episode_files::Model>> {
        let row = EpisodeFiles::find_by_id(id).one(&self.conn).await?;
        Ok(row)
    }

    pub async fn get_for_episode(&self, episode_id: i32) -> Result<Option<episode_files::Model>> {
        let row = EpisodeFiles::find()
            .filter(episode_files::Column::EpisodeId.eq(episode_id))
            .one(&self.conn)
            .await?;

        Ok(row)
    }

    pub async fn add(&self, input: &EpisodeFileInput) -> Result<i32> {
        let active_model = episode_files::ActiveModel {
            series_id: Set(input.series_id),
            episode_id: Set(input.episode_id),
            path: Set(input.path.clone()),
            size: Set(input.size),
            quality: Set(input.quality),
            proper: Set(input.proper),
            date_added: Set(chrono::Utc::now().to_rfc3339()),
            ..Default::default()
        };

        let result = EpisodeFiles::insert(active_model).exec(&self.conn).await?;

        Ok(result.last_insert_id)
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        EpisodeFiles::delete_by_id(id).exec(&self.conn).await?;
        Ok(())
    }
}
