//! `SeaORM` Entity for employee timesheet shifts.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "timesheet_shifts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub employee_id: Uuid,
    pub pay_period_id: Uuid,
    pub clock_in: DateTimeWithTimeZone,
    pub clock_out: Option<DateTimeWithTimeZone>,
    /// Employee's drawn signature, serialized by the frontend.
    pub signature: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EmployeeId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::pay_periods::Entity",
        from = "Column::PayPeriodId",
        to = "super::pay_periods::Column::Id"
    )]
    PayPeriods,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::pay_periods::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PayPeriods.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
