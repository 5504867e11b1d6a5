//! `SeaORM` Entity for academic majors.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "majors")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub department_id: Uuid,
    pub code: String,
    pub name: String,
    pub undergrad: bool,
    pub active: bool,
    pub slug: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::departments::Entity",
        from = "Column::DepartmentId",
        to = "super::departments::Column::Id"
    )]
    Departments,
    #[sea_orm(has_many = "super::wmu_user_majors::Entity")]
    WmuUserMajors,
}

impl Related<super::departments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Departments.def()
    }
}

impl Related<super::wmu_user_majors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WmuUserMajors.def()
    }
}

impl Related<super::wmu_users::Entity> for Entity {
    fn to() -> RelationDef {
        super::wmu_user_majors::Relation::WmuUsers.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::wmu_user_majors::Relation::Majors.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
