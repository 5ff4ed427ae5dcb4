use sea_orm::entity::prelude::*;

/// One broadcast episode of a tracked series.
///
/// (series_id, season_number, episode_number) is unique and is the natural
/// lookup key before the store-assigned id is known. `tvdb_id` and `season_id`
/// stay empty until the first metadata refresh fills them in.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "episodes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tvdb_id: Option<i32>,
    pub series_id: i32,
    pub season_id: Option<i32>,
    pub season_number: i32,
    pub episode_number: i32,
    pub title: String,
    pub overview: String,
    pub air_date: Date,
    pub language: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::series::Entity",
        from = "Column::SeriesId",
        to = "super::series::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Series,
    #[sea_orm(has_one = "super::episode_files::Entity")]
    EpisodeFiles,
}

impl Related<super::series::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Series.def()
    }
}

impl Related<super::episode_files::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::EpisodeFiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
