//! `SeaORM` Entity linking the three user record types.
//!
//! Every known person has exactly one intermediary row, keyed by BroncoNet.
//! It ties together the optional login account, the optional campus user
//! record, and the profile, and carries the directory sync bookkeeping.
//! At least one of `user_id` / `wmu_user_id` must be set (DB CHECK).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "user_intermediaries")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub wmu_user_id: Option<Uuid>,
    pub profile_id: Option<Uuid>,
    pub bronco_net: String,
    pub winno: String,
    pub first_name: String,
    pub last_name: String,
    /// Department directory's opinion of whether the user is active.
    pub cae_is_active: bool,
    /// Main campus directory's opinion of whether the user is active.
    pub wmu_is_active: bool,
    pub last_directory_check: Date,
    pub slug: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    Users,
    #[sea_orm(
        belongs_to = "super::wmu_users::Entity",
        from = "Column::WmuUserId",
        to = "super::wmu_users::Column::Id"
    )]
    WmuUsers,
    #[sea_orm(
        belongs_to = "super::profiles::Entity",
        from = "Column::ProfileId",
        to = "super::profiles::Column::Id"
    )]
    Profiles,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Users.def()
    }
}

impl Related<super::wmu_users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WmuUsers.def()
    }
}

impl Related<super::profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Profiles.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
