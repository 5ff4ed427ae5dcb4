pub use super::episode_files::Entity as EpisodeFiles;
pub use super::episodes::Entity as Episodes;
pub use super::quality_profiles::Entity as QualityProfiles;
pub use super::seasons::Entity as Seasons;
pub use super::series::Entity as Series;
