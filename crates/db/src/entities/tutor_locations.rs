//! `SeaORM` Entity for Success Center tutoring locations.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "tutor_locations")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub location_name: String,
    pub room_number: Option<String>,
    pub is_active: bool,
    /// Pop-up event location rather than a standing site.
    pub is_event: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::student_usage_logs::Entity")]
    StudentUsageLogs,
}

impl Related<super::student_usage_logs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentUsageLogs.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
