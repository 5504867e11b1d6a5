//! User repository for login accounts and group access.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use uuid::Uuid;

use quad_core::roles::PortalRole;
use quad_shared::types::PageRequest;

use crate::entities::{group_memberships, groups, user_groups, users};

/// Input for creating a login account.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    /// Login id (BroncoNet).
    pub username: String,
    /// Email address; empty falls back to the shorthand campus address.
    pub email: String,
    /// Argon2 password hash.
    pub password_hash: String,
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Superuser flag (development accounts only).
    pub is_superuser: bool,
}

/// User repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by username (BroncoNet).
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.db)
            .await
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id).one(&self.db).await
    }

    /// Checks if a username is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .count(&self.db)
            .await?;

        Ok(count > 0)
    }

    /// Creates a new login account.
    ///
    /// # Errors
    ///
    /// Returns an error if the database insert fails.
    pub async fn create(&self, input: CreateUserInput) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().into();
        let email = if input.email.is_empty() {
            format!("{}@wmich.edu", input.username)
        } else {
            input.email
        };

        let user = users::ActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(input.username),
            email: Set(email),
            password_hash: Set(input.password_hash),
            first_name: Set(input.first_name),
            last_name: Set(input.last_name),
            is_active: Set(true),
            is_staff: Set(input.is_superuser),
            is_superuser: Set(input.is_superuser),
            last_login: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        };

        user.insert(&self.db).await
    }

    /// Gets an existing user by username, or creates one.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub async fn get_or_create(&self, input: CreateUserInput) -> Result<users::Model, DbErr> {
        if let Some(existing) = self.find_by_username(&input.username).await? {
            return Ok(existing);
        }
        self.create(input).await
    }

    /// Lists users, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self, page: &PageRequest) -> Result<(Vec<users::Model>, u64), DbErr> {
        let paginator = users::Entity::find()
            .order_by_asc(users::Column::Username)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(u64::from(page.page.saturating_sub(1))).await?;
        Ok((items, total))
    }

    /// Gets the names of all groups a user belongs to.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_user_groups(&self, user_id: Uuid) -> Result<Vec<groups::Model>, DbErr> {
        users::Entity::find_by_id(user_id)
            .find_with_related(groups::Entity)
            .all(&self.db)
            .await
            .map(|mut results| results.pop().map(|(_, g)| g).unwrap_or_default())
    }

    /// Records a successful login.
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn record_login(&self, user_id: Uuid) -> Result<(), DbErr> {
        let now = chrono::Utc::now().into();
        users::ActiveModel {
            id: Set(user_id),
            last_login: Set(Some(now)),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&self.db)
        .await?;
        Ok(())
    }

    /// Updates a user's editable fields (names, email).
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub async fn update_names(
        &self,
        user_id: Uuid,
        first_name: Option<String>,
        last_name: Option<String>,
        email: Option<String>,
    ) -> Result<users::Model, DbErr> {
        let mut active = users::ActiveModel {
            id: Set(user_id),
            updated_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        if let Some(first_name) = first_name {
            active.first_name = Set(first_name);
        }
        if let Some(last_name) = last_name {
            active.last_name = Set(last_name);
        }
        if let Some(email) = email {
            active.email = Set(email);
        }
        active.update(&self.db).await
    }

    /// Replaces a user's group assignments and recomputes their access flags.
    ///
    /// Access is group-driven: a user with no valid portal group cannot log
    /// in, and staff status follows the staff-level roles. Membership history
    /// rows are closed/opened to match. Everything runs in one transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if any database operation fails.
    pub async fn set_groups(&self, user_id: Uuid, group_ids: &[Uuid]) -> Result<users::Model, DbErr> {
        let txn = self.db.begin().await?;
        let today = chrono::Utc::now().date_naive();
        let now = chrono::Utc::now().into();

        // Replace current assignments.
        user_groups::Entity::delete_many()
            .filter(user_groups::Column::UserId.eq(user_id))
            .exec(&txn)
            .await?;

        for group_id in group_ids {
            user_groups::ActiveModel {
                user_id: Set(user_id),
                group_id: Set(*group_id),
            }
            .insert(&txn)
            .await?;
        }

        // Close history rows for groups the user left.
        let open_memberships = group_memberships::Entity::find()
            .filter(group_memberships::Column::UserId.eq(user_id))
            .filter(group_memberships::Column::DateLeft.is_null())
            .all(&txn)
            .await?;

        for membership in &open_memberships {
            if !group_ids.contains(&membership.group_id) {
                group_memberships::ActiveModel {
                    id: Set(membership.id),
                    date_left: Set(Some(today)),
                    updated_at: Set(now),
                    ..Default::default()
                }
                .update(&txn)
                .await?;
            }
        }

        // Open history rows for groups the user joined.
        for group_id in group_ids {
            let already_open = open_memberships
                .iter()
                .any(|membership| membership.group_id == *group_id);
            if !already_open {
                group_memberships::ActiveModel {
                    id: Set(Uuid::new_v4()),
                    user_id: Set(user_id),
                    group_id: Set(*group_id),
                    date_joined: Set(today),
                    date_left: Set(None),
                    created_at: Set(now),
                    updated_at: Set(now),
                }
                .insert(&txn)
                .await?;
            }
        }

        // Recompute access flags from the new assignments.
        let assigned = groups::Entity::find()
            .filter(groups::Column::Id.is_in(group_ids.iter().copied()))
            .all(&txn)
            .await?;

        let user = users::Entity::find_by_id(user_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("user {user_id}")))?;

        let mut is_active = false;
        let mut is_staff = false;
        for group in &assigned {
            if let Some(role) = PortalRole::from_group_name(&group.name) {
                is_active = true;
                if PortalRole::STAFF.contains(&role) {
                    is_staff = true;
                }
            }
        }
        // Superusers keep access regardless of group churn.
        if user.is_superuser {
            is_active = true;
            is_staff = true;
        }

        let updated = users::ActiveModel {
            id: Set(user_id),
            is_active: Set(is_active),
            is_staff: Set(is_staff),
            updated_at: Set(now),
            ..Default::default()
        }
        .update(&txn)
        .await?;

        txn.commit().await?;
        Ok(updated)
    }

    /// Returns true if the user belongs to any of the named groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn in_any_group(&self, user_id: Uuid, names: &[&str]) -> Result<bool, DbErr> {
        let count = user_groups::Entity::find()
            .filter(user_groups::Column::UserId.eq(user_id))
            .inner_join(groups::Entity)
            .filter(groups::Column::Name.is_in(names.iter().copied()))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }
}
