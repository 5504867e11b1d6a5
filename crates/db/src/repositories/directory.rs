//! Directory sync repository.
//!
//! The database side of campus directory synchronization: creating and
//! updating the campus user / login user / intermediary trio from a user's
//! raw directory attributes, and applying resolved activity status.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use tracing::{info, warn};
use uuid::Uuid;

use quad_core::directory::{
    DirectoryAttributes, RetentionStatus,
    attributes::{
        ATTR_BANNER_ID, ATTR_FIRST_NAME, ATTR_HOME_PHONE, ATTR_LAST_NAME, ATTR_MAIL,
        ATTR_MIDDLE_NAME,
    },
};
use quad_core::roles::PortalRole;
use quad_core::text::slugify;

use crate::entities::{profiles, user_intermediaries, users, wmu_users};
use crate::repositories::user::UserRepository;

/// How long a directory check stays fresh. Within this window repeat logins
/// skip the LDAP round trip entirely.
const CHECK_TTL_DAYS: i64 = 1;

/// Repository coordinating the three user record types with directory data.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    db: DatabaseConnection,
}

impl DirectoryRepository {
    /// Creates a new directory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a campus user by BroncoNet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_wmu_user(&self, bronco_net: &str) -> Result<Option<wmu_users::Model>, DbErr> {
        wmu_users::Entity::find()
            .filter(wmu_users::Column::BroncoNet.eq(bronco_net))
            .one(&self.db)
            .await
    }

    /// Finds a campus user by Winno.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_wmu_user_by_winno(
        &self,
        winno: &str,
    ) -> Result<Option<wmu_users::Model>, DbErr> {
        wmu_users::Entity::find()
            .filter(wmu_users::Column::Winno.eq(winno))
            .one(&self.db)
            .await
    }

    /// Finds the intermediary row for a BroncoNet.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_intermediary(
        &self,
        bronco_net: &str,
    ) -> Result<Option<user_intermediaries::Model>, DbErr> {
        user_intermediaries::Entity::find()
            .filter(user_intermediaries::Column::BroncoNet.eq(bronco_net))
            .one(&self.db)
            .await
    }

    /// Returns true when the user's last directory check is stale and a
    /// fresh LDAP status check is warranted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn needs_status_check(
        &self,
        bronco_net: &str,
        now: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let Some(intermediary) = self.find_intermediary(bronco_net).await? else {
            return Ok(true);
        };

        let cutoff = (now - chrono::Duration::days(CHECK_TTL_DAYS)).date_naive();
        Ok(intermediary.last_directory_check <= cutoff)
    }

    /// Returns true when the user belongs to a protected role that must
    /// never be auto-deactivated by directory sync.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn is_protected(&self, bronco_net: &str) -> Result<bool, DbErr> {
        let user_repo = UserRepository::new(self.db.clone());
        let Some(user) = user_repo.find_by_username(bronco_net).await? else {
            return Ok(false);
        };

        let protected: Vec<&str> = PortalRole::PROTECTED
            .iter()
            .map(|role| role.group_name())
            .collect();
        user_repo.in_any_group(user.id, &protected).await
    }

    /// Creates or updates the campus user record (and the linked login user
    /// and intermediary) from a user's directory attributes.
    ///
    /// Name fields follow the registrar's values when present, falling back
    /// to any existing login-user values, then the directory's backup name
    /// chain. The official email falls back to the shorthand campus address.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::Custom` when the directory entry carries no Winno for
    /// a brand-new user, or any database error.
    pub async fn upsert_from_attributes(
        &self,
        bronco_net: &str,
        attrs: &DirectoryAttributes,
    ) -> Result<wmu_users::Model, DbErr> {
        let txn = self.db.begin().await?;
        let now = Utc::now();

        let login_user = users::Entity::find()
            .filter(users::Column::Username.eq(bronco_net))
            .one(&txn)
            .await?;

        // Resolve names: registrar first, login user second, backup chain last.
        let first_name = attrs
            .single(ATTR_FIRST_NAME)
            .map(str::to_string)
            .or_else(|| {
                login_user
                    .as_ref()
                    .filter(|u| !u.first_name.is_empty())
                    .map(|u| u.first_name.clone())
            })
            .unwrap_or_else(|| attrs.backup_name(bronco_net, false));

        let last_name = attrs
            .single(ATTR_LAST_NAME)
            .map(str::to_string)
            .or_else(|| {
                login_user
                    .as_ref()
                    .filter(|u| !u.last_name.is_empty())
                    .map(|u| u.last_name.clone())
            })
            .unwrap_or_else(|| attrs.backup_name(bronco_net, true));

        let middle_name = attrs.single(ATTR_MIDDLE_NAME).map(str::to_string);

        let shorthand_email = format!("{bronco_net}@wmich.edu");
        let official_email = attrs
            .single(ATTR_MAIL)
            .map_or_else(|| shorthand_email.clone(), str::to_string);

        let existing = wmu_users::Entity::find()
            .filter(wmu_users::Column::BroncoNet.eq(bronco_net))
            .one(&txn)
            .await?;

        let wmu_user = match existing {
            Some(model) => {
                let mut active: wmu_users::ActiveModel = model.into();
                active.first_name = Set(first_name.clone());
                active.middle_name = Set(middle_name);
                active.last_name = Set(last_name.clone());
                active.official_email = Set(official_email.clone());
                active.updated_at = Set(now.into());
                active.update(&txn).await?
            }
            None => {
                let winno = attrs.single(ATTR_BANNER_ID).ok_or_else(|| {
                    DbErr::Custom(format!("directory returned empty winno for {bronco_net}"))
                })?;

                info!(uid = bronco_net, "creating campus user from directory");
                wmu_users::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    bronco_net: Set(bronco_net.to_string()),
                    winno: Set(winno.to_string()),
                    first_name: Set(first_name.clone()),
                    middle_name: Set(middle_name),
                    last_name: Set(last_name.clone()),
                    user_type: Set(wmu_users::UserType::Student),
                    official_email: Set(official_email.clone()),
                    is_active: Set(true),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                }
                .insert(&txn)
                .await?
            }
        };

        // Mirror names and email onto the login user, if one exists.
        if let Some(login) = &login_user {
            let mut active = users::ActiveModel {
                id: Set(login.id),
                updated_at: Set(now.into()),
                ..Default::default()
            };
            let mut changed = false;
            if login.first_name != first_name {
                active.first_name = Set(first_name.clone());
                changed = true;
            }
            if login.last_name != last_name {
                active.last_name = Set(last_name.clone());
                changed = true;
            }
            if login.email != official_email {
                active.email = Set(official_email.clone());
                changed = true;
            }
            if changed {
                active.update(&txn).await?;
            }
        }

        // Phone lives on the profile; garbage directory values are skipped.
        let phone = attrs.single(ATTR_HOME_PHONE).map(str::to_string);

        // Ensure the intermediary + profile exist and mirror current values.
        let intermediary = user_intermediaries::Entity::find()
            .filter(user_intermediaries::Column::BroncoNet.eq(bronco_net))
            .one(&txn)
            .await?;

        match intermediary {
            Some(model) => {
                if let (Some(profile_id), Some(phone)) = (model.profile_id, phone) {
                    profiles::ActiveModel {
                        id: Set(profile_id),
                        phone_number: Set(Some(phone)),
                        updated_at: Set(now.into()),
                        ..Default::default()
                    }
                    .update(&txn)
                    .await?;
                }

                let mut active: user_intermediaries::ActiveModel = model.into();
                active.wmu_user_id = Set(Some(wmu_user.id));
                if let Some(login) = &login_user {
                    active.user_id = Set(Some(login.id));
                }
                active.winno = Set(wmu_user.winno.clone());
                active.first_name = Set(first_name);
                active.last_name = Set(last_name);
                active.updated_at = Set(now.into());
                active.update(&txn).await?;
            }
            None => {
                let profile = profiles::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    address_id: Set(None),
                    site_theme_id: Set(None),
                    phone_number: Set(phone),
                    user_timezone: Set("America/Detroit".to_string()),
                    desktop_font_size: Set(profiles::FontSize::Base),
                    mobile_font_size: Set(profiles::FontSize::Base),
                    fg_color: Set(None),
                    bg_color: Set(None),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                }
                .insert(&txn)
                .await?;

                user_intermediaries::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(login_user.as_ref().map(|u| u.id)),
                    wmu_user_id: Set(Some(wmu_user.id)),
                    profile_id: Set(Some(profile.id)),
                    bronco_net: Set(bronco_net.to_string()),
                    winno: Set(wmu_user.winno.clone()),
                    first_name: Set(first_name),
                    last_name: Set(last_name),
                    cae_is_active: Set(true),
                    wmu_is_active: Set(true),
                    last_directory_check: Set(now.date_naive()),
                    slug: Set(slugify(bronco_net)),
                    created_at: Set(now.into()),
                    updated_at: Set(now.into()),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;
        Ok(wmu_user)
    }

    /// Applies a resolved retention status to the user's records.
    ///
    /// The login user's `is_active` follows the enrolled/employed flag, the
    /// campus user's follows the retention flag, and the intermediary's
    /// bookkeeping fields are stamped. Protected-role members are the
    /// caller's responsibility to exclude (see [`Self::is_protected`]).
    ///
    /// # Errors
    ///
    /// Returns an error if any database update fails.
    pub async fn apply_status(
        &self,
        bronco_net: &str,
        status: RetentionStatus,
        now: DateTime<Utc>,
    ) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;

        if let Some(login) = users::Entity::find()
            .filter(users::Column::Username.eq(bronco_net))
            .one(&txn)
            .await?
        {
            users::ActiveModel {
                id: Set(login.id),
                is_active: Set(status.is_active),
                updated_at: Set(now.into()),
                ..Default::default()
            }
            .update(&txn)
            .await?;
        }

        if let Some(wmu_user) = wmu_users::Entity::find()
            .filter(wmu_users::Column::BroncoNet.eq(bronco_net))
            .one(&txn)
            .await?
        {
            wmu_users::ActiveModel {
                id: Set(wmu_user.id),
                is_active: Set(status.is_in_retention),
                updated_at: Set(now.into()),
                ..Default::default()
            }
            .update(&txn)
            .await?;
        }

        if let Some(intermediary) = user_intermediaries::Entity::find()
            .filter(user_intermediaries::Column::BroncoNet.eq(bronco_net))
            .one(&txn)
            .await?
        {
            user_intermediaries::ActiveModel {
                id: Set(intermediary.id),
                wmu_is_active: Set(status.is_in_retention),
                last_directory_check: Set(now.date_naive()),
                updated_at: Set(now.into()),
                ..Default::default()
            }
            .update(&txn)
            .await?;
        } else {
            warn!(uid = bronco_net, "status applied with no intermediary row");
        }

        txn.commit().await?;
        Ok(())
    }
}
