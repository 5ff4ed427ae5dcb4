use crate::db::Store;
use anyhow::Result;
use std::sync::Arc;
use tracing::debug;

/// Season bookkeeping over the store.
pub struct SeasonService {
    store: Arc<Store>,
}

impl SeasonService {
    #[must_use]
    pub const fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// Registers the season if it is not known yet. Idempotent.
    pub async fn ensure_season(
        &self,
        series_id: i32,
        season_id: i32,
        season_number: i32,
    ) -> Result<()> {
        if self.store.season_exists(season_id).await? {
            return Ok(());
        }

        debug!(series_id, season_id, season_number, "Registering season");
        self.store
            .add_season(season_id, series_id, season_number)
            .await
    }
}
