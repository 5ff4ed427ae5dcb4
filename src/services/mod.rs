pub mod episode_service;
pub mod episode_service_impl;
pub mod season;

pub use episode_service::{EpisodeError, EpisodeService};
pub use episode_service_impl::SeaOrmEpisodeService;
pub use season::SeasonService;
