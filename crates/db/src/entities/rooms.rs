//! `SeaORM` Entity for university rooms.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "rooms")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub room_type_id: Uuid,
    pub name: String,
    pub description: String,
    pub capacity: i16,
    pub slug: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::room_types::Entity",
        from = "Column::RoomTypeId",
        to = "super::room_types::Column::Id"
    )]
    RoomTypes,
    #[sea_orm(has_many = "super::room_departments::Entity")]
    RoomDepartments,
}

impl Related<super::room_types::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomTypes.def()
    }
}

impl Related<super::room_departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::RoomDepartments.def()
    }
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        super::room_departments::Relation::Departments.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::room_departments::Relation::Rooms.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
