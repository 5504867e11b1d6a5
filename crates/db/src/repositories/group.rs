//! Group and permission repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;
use tracing::info;
use uuid::Uuid;

use quad_core::roles::{PortalRole, all_permissions};

use crate::entities::{group_permissions, groups, permissions};

/// Group repository for role and permission management.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    db: DatabaseConnection,
}

impl GroupRepository {
    /// Creates a new group repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a group by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_name(&self, name: &str) -> Result<Option<groups::Model>, DbErr> {
        groups::Entity::find()
            .filter(groups::Column::Name.eq(name))
            .one(&self.db)
            .await
    }

    /// Lists all groups.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<groups::Model>, DbErr> {
        groups::Entity::find()
            .order_by_asc(groups::Column::Name)
            .all(&self.db)
            .await
    }

    /// Gets the permissions assigned to a group.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn get_group_permissions(
        &self,
        group_id: Uuid,
    ) -> Result<Vec<permissions::Model>, DbErr> {
        groups::Entity::find_by_id(group_id)
            .find_with_related(permissions::Entity)
            .all(&self.db)
            .await
            .map(|mut results| results.pop().map(|(_, p)| p).unwrap_or_default())
    }

    /// Seeds the full permission catalog and every portal role with its
    /// permission subset. Idempotent: existing rows are reused, and each
    /// role's assignments are reset to exactly the catalog subset.
    ///
    /// Runs in a single transaction so a half-seeded catalog is never
    /// visible.
    ///
    /// # Errors
    ///
    /// Returns an error if any database operation fails.
    pub async fn seed_roles(&self) -> Result<(), DbErr> {
        let txn = self.db.begin().await?;
        let now = chrono::Utc::now().into();

        // Permission catalog first.
        let existing: HashMap<String, Uuid> = permissions::Entity::find()
            .all(&txn)
            .await?
            .into_iter()
            .map(|p| (p.codename, p.id))
            .collect();

        let mut permission_ids: HashMap<String, Uuid> = HashMap::new();
        for permission in all_permissions() {
            let codename = permission.codename();
            let id = match existing.get(&codename) {
                Some(id) => *id,
                None => {
                    let id = Uuid::new_v4();
                    permissions::ActiveModel {
                        id: Set(id),
                        codename: Set(codename.clone()),
                        name: Set(permission.display_name()),
                        created_at: Set(now),
                    }
                    .insert(&txn)
                    .await?;
                    id
                }
            };
            permission_ids.insert(codename, id);
        }

        // Then each role and its subset.
        for role in PortalRole::ALL {
            let group = match groups::Entity::find()
                .filter(groups::Column::Name.eq(role.group_name()))
                .one(&txn)
                .await?
            {
                Some(group) => group,
                None => {
                    groups::ActiveModel {
                        id: Set(Uuid::new_v4()),
                        name: Set(role.group_name().to_string()),
                        created_at: Set(now),
                        updated_at: Set(now),
                    }
                    .insert(&txn)
                    .await?
                }
            };

            // Reset assignments to the catalog subset.
            group_permissions::Entity::delete_many()
                .filter(group_permissions::Column::GroupId.eq(group.id))
                .exec(&txn)
                .await?;

            for permission in role.permissions() {
                let Some(permission_id) = permission_ids.get(&permission.codename()) else {
                    continue;
                };
                group_permissions::ActiveModel {
                    group_id: Set(group.id),
                    permission_id: Set(*permission_id),
                }
                .insert(&txn)
                .await?;
            }
        }

        txn.commit().await?;
        info!(
            roles = PortalRole::ALL.len(),
            permissions = permission_ids.len(),
            "seeded portal roles"
        );
        Ok(())
    }
}
