//! `SeaORM` Entity for the campus user/major relationship.
//!
//! Tracks which majors a student is (or was) pursuing. Deactivating a row
//! stamps `date_stopped` rather than deleting it.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "wmu_user_majors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub wmu_user_id: Uuid,
    pub major_id: Uuid,
    pub is_active: bool,
    pub date_started: DateTimeWithTimeZone,
    pub date_stopped: Option<DateTimeWithTimeZone>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wmu_users::Entity",
        from = "Column::WmuUserId",
        to = "super::wmu_users::Column::Id"
    )]
    WmuUsers,
    #[sea_orm(
        belongs_to = "super::majors::Entity",
        from = "Column::MajorId",
        to = "super::majors::Column::Id"
    )]
    Majors,
}

impl Related<super::wmu_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WmuUsers.def()
    }
}

impl Related<super::majors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Majors.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
