use crate::quality::Quality;

/// Parsed candidate release covering one or more episodes of a season.
///
/// Ephemeral input to the need evaluator; never persisted.
#[derive(Debug, Clone)]
pub struct EpisodeParseResult {
    pub series_id: i32,
    pub season_number: i32,
    pub episode_numbers: Vec<i32>,
    pub quality: Quality,
    pub proper: bool,
}
