//! Randomized development data.
//!
//! Generates bulk records with `fake` on top of the fixtures. Random values
//! regularly collide with uniqueness constraints (tags, serials, slugs), so
//! everything here goes through the retry engine in [`super::seed_with_retry`].

use fake::Fake;
use fake::faker::address::en::{BuildingNumber, CityName, StreetName, ZipCode};
use fake::faker::company::en::{Buzzword, CompanyName};
use fake::faker::internet::en::{IPv4, MACAddress};
use fake::faker::job::en::Title;
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::{FirstName, LastName};
use rand::Rng;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use tracing::info;
use uuid::Uuid;

use crate::entities::{addresses, wmu_users};
use crate::repositories::{
    CampusRepository, CreateAssetInput, CreateRoomInput, InventoryRepository,
};

use super::{SeedError, SeedOutcome, seed_with_retry};

/// Generates every random model group, `count` records each.
///
/// # Errors
///
/// Returns an error only when an entire model group fails to generate.
pub async fn generate_all(db: &DatabaseConnection, count: usize) -> Result<(), SeedError> {
    create_addresses(db, count).await?.check("address")?;
    create_wmu_users(db, count).await?.check("wmu user")?;
    create_rooms(db, count).await?.check("room")?;
    create_assets(db, count).await?.check("asset")?;
    create_software(db, count).await?.check("software")?;
    info!(count, "random seeding complete");
    Ok(())
}

/// Generates random street addresses.
///
/// # Errors
///
/// Returns an error if a non-collision database failure occurs repeatedly.
pub async fn create_addresses(db: &DatabaseConnection, count: usize) -> Result<SeedOutcome, SeedError> {
    let outcome = seed_with_retry(count, || async {
        let now = chrono::Utc::now().into();
        addresses::ActiveModel {
            id: Set(Uuid::new_v4()),
            street: Set(format!(
                "{} {}",
                BuildingNumber().fake::<String>(),
                StreetName().fake::<String>()
            )),
            optional_street: Set(None),
            city: Set(CityName().fake()),
            state: Set("MI".to_string()),
            zip: Set(ZipCode().fake()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    })
    .await;

    info!(created = outcome.created, "populated addresses");
    Ok(outcome)
}

/// Generates random campus users (students).
///
/// # Errors
///
/// Returns an error if a non-collision database failure occurs repeatedly.
pub async fn create_wmu_users(db: &DatabaseConnection, count: usize) -> Result<SeedOutcome, SeedError> {
    let outcome = seed_with_retry(count, || async {
        let first_name: String = FirstName().fake();
        let last_name: String = LastName().fake();
        let suffix: u32 = rand::rng().random_range(1000..9999);
        let bronco_net = format!(
            "{}{}{suffix}",
            first_name.chars().next().unwrap_or('x').to_ascii_lowercase(),
            last_name
                .chars()
                .take(3)
                .collect::<String>()
                .to_ascii_lowercase(),
        );
        let winno: u64 = rand::rng().random_range(100_000_000..999_999_999);

        let now = chrono::Utc::now().into();
        wmu_users::ActiveModel {
            id: Set(Uuid::new_v4()),
            bronco_net: Set(bronco_net.clone()),
            winno: Set(winno.to_string()),
            first_name: Set(first_name),
            middle_name: Set(None),
            last_name: Set(last_name),
            user_type: Set(wmu_users::UserType::Student),
            official_email: Set(format!("{bronco_net}@wmich.edu")),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
    })
    .await;

    info!(created = outcome.created, "populated wmu users");
    Ok(outcome)
}

/// Generates random rooms spread across the seeded departments and types.
///
/// # Errors
///
/// Returns an error if a non-collision database failure occurs repeatedly.
pub async fn create_rooms(db: &DatabaseConnection, count: usize) -> Result<SeedOutcome, SeedError> {
    let repo = CampusRepository::new(db.clone());
    let departments = repo.list_departments().await?;
    let room_types = repo.list_room_types().await?;

    if departments.is_empty() || room_types.is_empty() {
        // Fixtures have not run; nothing to attach rooms to.
        return Ok(SeedOutcome {
            requested: count,
            created: 0,
            failed: count,
        });
    }

    let outcome = seed_with_retry(count, || {
        let repo = repo.clone();
        let departments = &departments;
        let room_types = &room_types;
        async move {
            let (wing, number) = {
                let mut rng = rand::rng();
                let wing = char::from(rng.random_range(b'A'..=b'G'));
                let number: u16 = rng.random_range(100..500);
                (wing, number)
            };
            let department = &departments[rand::rng().random_range(0..departments.len())];
            let room_type = &room_types[rand::rng().random_range(0..room_types.len())];

            repo.create_room(CreateRoomInput {
                name: format!("{wing}-{number}"),
                description: Sentence(3..8).fake(),
                capacity: rand::rng().random_range(0..80),
                room_type_id: room_type.id,
                department_ids: vec![department.id],
            })
            .await
        }
    })
    .await;

    info!(created = outcome.created, "populated rooms");
    Ok(outcome)
}

/// Generates random hardware assets.
///
/// # Errors
///
/// Returns an error if a non-collision database failure occurs repeatedly.
pub async fn create_assets(db: &DatabaseConnection, count: usize) -> Result<SeedOutcome, SeedError> {
    let repo = InventoryRepository::new(db.clone());

    let outcome = seed_with_retry(count, || {
        let repo = repo.clone();
        async move {
            let serial: u64 = rand::rng().random_range(1_000_000_000..9_999_999_999);
            let tag: u32 = rand::rng().random_range(10_000_000..99_999_999);

            repo.create_asset(CreateAssetInput {
                serial_number: serial.to_string(),
                asset_tag: format!("A{tag}"),
                brand_name: CompanyName().fake(),
                mac_address: Some(MACAddress().fake()),
                ip_address: Some(IPv4().fake::<String>()),
                device_name: Some(LastName().fake()),
                description: Some(Sentence(3..8).fake()),
            })
            .await
        }
    })
    .await;

    info!(created = outcome.created, "populated assets");
    Ok(outcome)
}

/// Generates random software catalog entries with one version record each.
///
/// # Errors
///
/// Returns an error if a non-collision database failure occurs repeatedly.
pub async fn create_software(db: &DatabaseConnection, count: usize) -> Result<SeedOutcome, SeedError> {
    use crate::entities::software_details::SoftwareType;
    use crate::repositories::CreateSoftwareDetailInput;

    let repo = InventoryRepository::new(db.clone());

    let outcome = seed_with_retry(count, || {
        let repo = repo.clone();
        async move {
            // Two random words keeps the collision rate tolerable.
            let name = format!(
                "{} {}",
                Buzzword().fake::<String>(),
                Title().fake::<String>()
            );
            let software = repo.create_software(&name).await?;

            let (major, minor) = {
                let mut rng = rand::rng();
                (rng.random_range(1..20), rng.random_range(0..10))
            };
            let software_type = match rand::rng().random_range(0..3) {
                0 => SoftwareType::Licensed,
                1 => SoftwareType::Open,
                _ => SoftwareType::Trial,
            };
            let expiration = chrono::Utc::now().date_naive()
                + chrono::Duration::days(rand::rng().random_range(-365..730));

            repo.create_software_detail(CreateSoftwareDetailInput {
                software_id: software.id,
                software_type,
                version: format!("{major}.{minor}"),
                expiration: Some(expiration),
            })
            .await
        }
    })
    .await;

    info!(created = outcome.created, "populated software");
    Ok(outcome)
}
