use chrono::NaiveDate;

/// Episode row for insert and update batches.
///
/// `id` is `None` for rows the store has not seen yet; the store assigns the
/// identity key on insert. Update batches must carry a previously assigned key.
#[derive(Debug, Clone)]
pub struct EpisodeInput {
    pub id: Option<i32>,
    pub tvdb_id: Option<i32>,
    pub series_id: i32,
    pub season_id: Option<i32>,
    pub season_number: i32,
    pub episode_number: i32,
    pub title: String,
    pub overview: String,
    pub air_date: NaiveDate,
    pub language: String,
}

#[derive(Debug, Clone)]
pub struct EpisodeFileInput {
    pub series_id: i32,
    pub episode_id: i32,
    pub path: String,
    pub size: Option<i64>,
    pub quality: i32,
    pub proper: bool,
}

/// Per-item outcome counts of one reconciliation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RefreshCounts {
    pub successful: u32,
    pub failed: u32,
}
