//! `SeaORM` Entity for university departments.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "departments")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub slug: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::majors::Entity")]
    Majors,
    #[sea_orm(has_many = "super::room_departments::Entity")]
    RoomDepartments,
}

impl Related<super::majors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Majors.def()
    }
}

impl Related<super::room_departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomDepartments.def()
    }
}

impl Related<super::rooms::Entity> for Entity {
    fn to() -> RelationDef {
        super::room_departments::Relation::Rooms.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::room_departments::Relation::Departments.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
