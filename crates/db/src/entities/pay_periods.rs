//! `SeaORM` Entity for two-week pay periods.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "pay_periods")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub date_start: Date,
    pub date_end: Date,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::timesheet_shifts::Entity")]
    TimesheetShifts,
}

impl Related<super::timesheet_shifts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimesheetShifts.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
