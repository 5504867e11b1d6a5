//! `SeaORM` Entity for the software catalog.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "software")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::software_details::Entity")]
    SoftwareDetails,
}

impl Related<super::software_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SoftwareDetails.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
