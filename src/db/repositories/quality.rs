use crate::entities::{prelude::*, quality_profiles};
use crate::quality::{Quality, QualityProfile};
use anyhow::Result;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

/// Repository for quality profiles
pub struct QualityRepository {
    conn: DatabaseConnection,
}

impl QualityRepository {
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_profile(m: quality_profiles::Model) -> Result<QualityProfile> {
        let cutoff = Quality::from_storage_id(m.cutoff_quality_id)
            .ok_or_else(|| anyhow::anyhow!("unknown cutoff quality id {}", m.cutoff_quality_id))?;

        Ok(QualityProfile {
            id: m.id,
            name: m.name,
            cutoff,
        })
    }

    pub async fn get_profile(&self, id: i32) -> Result<Option<QualityProfile>> {
        let row = QualityProfiles::find_by_id(id).one(&self.conn).await?;

        row.map(Self::map_profile).transpose()
    }

    pub async fn get_profile_by_name(&self, name: &str) -> Result<Option<QualityProfile>> {
        let row = QualityProfiles::find()
            .filter(quality_profiles::Column::Name.eq(name))
            .one(&self.conn)
            .await?;

        row.map(Self::map_profile).transpose()
    }

    /// Creates the profile if it is not present yet; returns its id either way.
    pub async fn ensure_profile(&self, name: &str, cutoff: Quality) -> Result<i32> {
        if let Some(existing) = self.get_profile_by_name(name).await? {
            return Ok(existing.id);
        }

        let active_model = quality_profiles::ActiveModel {
            name: Set(name.to_string()),
            cutoff_quality_id: Set(cutoff.storage_id()),
            ..Default::default()
        };

        let result = QualityProfiles::insert(active_model).exec(&self.conn).await?;

        Ok(result.last_insert_id)
    }
}
