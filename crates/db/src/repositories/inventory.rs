//! Inventory repository: assets and the software catalog.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use quad_core::text::slugify;
use quad_shared::types::PageRequest;

use crate::entities::{assets, software, software_details};

/// Input for creating an asset.
#[derive(Debug, Clone)]
pub struct CreateAssetInput {
    /// Manufacturer serial number.
    pub serial_number: String,
    /// Department asset tag.
    pub asset_tag: String,
    /// Manufacturer name.
    pub brand_name: String,
    /// MAC address, if networked.
    pub mac_address: Option<String>,
    /// Static IP address, if assigned.
    pub ip_address: Option<String>,
    /// Hostname.
    pub device_name: Option<String>,
    /// Free-form description.
    pub description: Option<String>,
}

/// Input for creating a software version record.
#[derive(Debug, Clone)]
pub struct CreateSoftwareDetailInput {
    /// Parent software id.
    pub software_id: Uuid,
    /// License class.
    pub software_type: software_details::SoftwareType,
    /// Version string.
    pub version: String,
    /// License expiration, when applicable.
    pub expiration: Option<chrono::NaiveDate>,
}

/// Inventory repository.
#[derive(Debug, Clone)]
pub struct InventoryRepository {
    db: DatabaseConnection,
}

impl InventoryRepository {
    /// Creates a new inventory repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    // ------------------------------------------------------------------
    // Assets
    // ------------------------------------------------------------------

    /// Creates an asset.
    ///
    /// # Errors
    ///
    /// Returns an error on uniqueness collisions (serial, tag, MAC, IP) or
    /// other database failures.
    pub async fn create_asset(&self, input: CreateAssetInput) -> Result<assets::Model, DbErr> {
        let now = chrono::Utc::now().into();
        assets::ActiveModel {
            id: Set(Uuid::new_v4()),
            serial_number: Set(input.serial_number),
            asset_tag: Set(input.asset_tag),
            brand_name: Set(input.brand_name),
            mac_address: Set(input.mac_address),
            ip_address: Set(input.ip_address),
            device_name: Set(input.device_name),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Lists assets ordered by tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_assets(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<assets::Model>, u64), DbErr> {
        let paginator = assets::Entity::find()
            .order_by_asc(assets::Column::AssetTag)
            .paginate(&self.db, page.limit());

        let total = paginator.num_items().await?;
        let items = paginator
            .fetch_page(u64::from(page.page.saturating_sub(1)))
            .await?;
        Ok((items, total))
    }

    /// Finds an asset by its tag.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_asset_by_tag(&self, tag: &str) -> Result<Option<assets::Model>, DbErr> {
        assets::Entity::find()
            .filter(assets::Column::AssetTag.eq(tag))
            .one(&self.db)
            .await
    }

    /// Counts assets.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_assets(&self) -> Result<u64, DbErr> {
        assets::Entity::find().count(&self.db).await
    }

    // ------------------------------------------------------------------
    // Software catalog
    // ------------------------------------------------------------------

    /// Creates a software catalog entry.
    ///
    /// # Errors
    ///
    /// Returns an error on name/slug collisions or other database failures.
    pub async fn create_software(&self, name: &str) -> Result<software::Model, DbErr> {
        let now = chrono::Utc::now().into();
        software::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name.to_string()),
            slug: Set(slugify(name)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Lists the software catalog with version records attached.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_software(
        &self,
    ) -> Result<Vec<(software::Model, Vec<software_details::Model>)>, DbErr> {
        software::Entity::find()
            .find_with_related(software_details::Entity)
            .order_by_asc(software::Column::Name)
            .all(&self.db)
            .await
    }

    /// Creates a version record for a software entry.
    ///
    /// # Errors
    ///
    /// Returns an error on slug collisions or other database failures.
    pub async fn create_software_detail(
        &self,
        input: CreateSoftwareDetailInput,
    ) -> Result<software_details::Model, DbErr> {
        let parent = software::Entity::find_by_id(input.software_id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("software {}", input.software_id)))?;

        let now = chrono::Utc::now().into();
        software_details::ActiveModel {
            id: Set(Uuid::new_v4()),
            software_id: Set(parent.id),
            software_type: Set(input.software_type),
            version: Set(input.version.clone()),
            expiration: Set(input.expiration),
            is_active: Set(true),
            slug: Set(slugify(&format!("{} {}", parent.name, input.version))),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
    }

    /// Counts software catalog entries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_software(&self) -> Result<u64, DbErr> {
        software::Entity::find().count(&self.db).await
    }
}
