//! `SeaORM` Entity for addresses.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "addresses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub street: String,
    pub optional_street: Option<String>,
    pub city: String,
    /// Two-letter state abbreviation.
    pub state: String,
    pub zip: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    /// Formats the address on one line.
    #[must_use]
    pub fn display(&self) -> String {
        match &self.optional_street {
            Some(optional) => format!(
                "{} {} {}, {}, {}",
                self.street, optional, self.city, self.state, self.zip
            ),
            None => format!("{} {}, {}, {}", self.street, self.city, self.state, self.zip),
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::profiles::Entity")]
    Profiles,
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
