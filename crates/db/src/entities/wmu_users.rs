//! `SeaORM` Entity for campus user records.
//!
//! A campus user is anyone known to the university directory: student,
//! professor, faculty, or other. They need not have a portal login.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User type as recorded by the registrar.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    #[sea_orm(num_value = 0)]
    Student,
    #[sea_orm(num_value = 1)]
    Professor,
    #[sea_orm(num_value = 2)]
    Faculty,
    #[sea_orm(num_value = 3)]
    Other,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "wmu_users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub bronco_net: String,
    pub winno: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub last_name: String,
    pub user_type: UserType,
    pub official_email: String,
    pub is_active: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Returns the student's shorthand email (`<bronco_net>@wmich.edu`).
    #[must_use]
    pub fn shorthand_email(&self) -> String {
        format!("{}@wmich.edu", self.bronco_net)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::wmu_user_majors::Entity")]
    WmuUserMajors,
    #[sea_orm(has_many = "super::student_usage_logs::Entity")]
    StudentUsageLogs,
}

impl Related<super::wmu_user_majors::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WmuUserMajors.def()
    }
}

impl Related<super::majors::Entity> for Entity {
    fn to() -> RelationDef {
        super::wmu_user_majors::Relation::Majors.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::wmu_user_majors::Relation::WmuUsers.def().rev())
    }
}

impl Related<super::student_usage_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentUsageLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
