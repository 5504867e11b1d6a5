//! `SeaORM` Entity for Success Center usage logs.
//!
//! A row with a null `check_out` means the student is currently checked in.
//! A partial unique index keeps at most one open row per student.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "student_usage_logs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub student_id: Uuid,
    pub location_id: Option<Uuid>,
    pub check_in: DateTimeWithTimeZone,
    pub check_out: Option<DateTimeWithTimeZone>,
    pub approved: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::wmu_users::Entity",
        from = "Column::StudentId",
        to = "super::wmu_users::Column::Id"
    )]
    WmuUsers,
    #[sea_orm(
        belongs_to = "super::tutor_locations::Entity",
        from = "Column::LocationId",
        to = "super::tutor_locations::Column::Id"
    )]
    TutorLocations,
}

impl Related<super::wmu_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WmuUsers.def()
    }
}

impl Related<super::tutor_locations::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TutorLocations.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
