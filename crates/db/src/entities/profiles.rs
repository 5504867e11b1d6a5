//! `SeaORM` Entity for user profiles (site settings).

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Preset font sizes for the site UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i16", db_type = "SmallInteger")]
#[serde(rename_all = "lowercase")]
pub enum FontSize {
    #[sea_orm(num_value = 0)]
    Xs,
    #[sea_orm(num_value = 1)]
    Sm,
    #[sea_orm(num_value = 2)]
    Base,
    #[sea_orm(num_value = 3)]
    Md,
    #[sea_orm(num_value = 4)]
    Lg,
    #[sea_orm(num_value = 5)]
    Xl,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub address_id: Option<Uuid>,
    pub site_theme_id: Option<Uuid>,
    pub phone_number: Option<String>,
    pub user_timezone: String,
    pub desktop_font_size: FontSize,
    pub mobile_font_size: FontSize,
    /// Foreground css color for the schedule, e.g. `red` or `#FF0000`.
    pub fg_color: Option<String>,
    /// Background css color for the schedule.
    pub bg_color: Option<String>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::addresses::Entity",
        from = "Column::AddressId",
        to = "super::addresses::Column::Id"
    )]
    Addresses,
    #[sea_orm(
        belongs_to = "super::site_themes::Entity",
        from = "Column::SiteThemeId",
        to = "super::site_themes::Column::Id"
    )]
    SiteThemes,
}

impl Related<super::addresses::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addresses.def()
    }
}

impl Related<super::site_themes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SiteThemes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
