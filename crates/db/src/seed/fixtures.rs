//! Fixed seed records: everything the portal needs before first login.
//!
//! All fixture loaders are idempotent get-or-creates, so rerunning the
//! seeder against a populated database is safe.

use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use tracing::info;
use uuid::Uuid;

use quad_core::auth::hash_password;
use quad_core::roles::PortalRole;
use quad_core::text::slugify;

use crate::entities::{profiles, site_themes, tutor_locations, user_intermediaries};
use crate::repositories::{CampusRepository, CreateUserInput, GroupRepository, UserRepository};

use super::SeedError;

/// Standing site themes, as `(display name, file name)`.
const SITE_THEMES: &[(&str, &str)] = &[
    ("Gold", "wmu-gold"),
    ("Dark", "wmu-dark"),
    ("Light", "wmu-light"),
    ("High Contrast", "high-contrast"),
];

/// Departments that must exist, as `(code, name)`. `NA` is the catch-all
/// for records with no real department.
const DEPARTMENTS: &[(&str, &str)] = &[
    ("NA", "None/Unknown"),
    ("EDO", "Engineering Dean's Office"),
    ("CS", "Computer Science"),
    ("ECE", "Electrical and Computer Engineering"),
    ("MAE", "Mechanical and Aerospace Engineering"),
    ("CCE", "Civil and Construction Engineering"),
];

/// Standing room types.
const ROOM_TYPES: &[&str] = &["Classroom", "Computer Classroom", "Breakroom", "Office", "Server Room"];

/// Success Center tutoring locations, as `(name, room, is_event)`.
const TUTOR_LOCATIONS: &[(&str, Option<&str>, bool)] = &[
    ("Bronco Study Zone", Some("1340"), false),
    ("Statistics Tutoring", Some("3375"), false),
    ("SSC - Floyd", Some("2010"), false),
    ("SSC - Eldridge", Some("4420"), false),
    ("STEP - Event", None, true),
];

/// Development logins created for each role, as `(username, first, last)`.
/// The names are deliberately silly so nobody mistakes them for real people.
const ROLE_USERS: &[(PortalRole, &str, &str, &str)] = &[
    (PortalRole::Director, "cae_director", "Clara", "Oswald"),
    (
        PortalRole::BuildingCoordinator,
        "cae_building_coordinator",
        "Phil",
        "Dunphy",
    ),
    (PortalRole::AdminGa, "cae_admin_ga", "Homer", "Simpson"),
    (PortalRole::ProgrammerGa, "cae_programmer_ga", "Kim", "Possible"),
    (PortalRole::Admin, "cae_admin", "Gumball", "Watterson"),
    (PortalRole::Programmer, "cae_programmer", "Phineas", "Flynn"),
    (PortalRole::Attendant, "cae_attendant", "Darwin", "Watterson"),
    (PortalRole::StepAdmin, "step_admin", "Leslie", "Knope"),
    (PortalRole::StepEmployee, "step_employee", "Andy", "Dwyer"),
];

/// Loads every fixture group, in dependency order.
///
/// # Errors
///
/// Returns an error if any database operation fails.
pub async fn load_all(db: &DatabaseConnection, seed_password: &str) -> Result<(), SeedError> {
    create_site_themes(db).await?;
    create_roles(db).await?;
    create_departments(db).await?;
    create_room_types(db).await?;
    create_tutor_locations(db).await?;
    create_role_users(db, seed_password).await?;
    info!("fixture loading complete");
    Ok(())
}

/// Creates the standing site themes.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub async fn create_site_themes(db: &DatabaseConnection) -> Result<(), SeedError> {
    for (ordering, (display_name, file_name)) in SITE_THEMES.iter().enumerate() {
        let exists = site_themes::Entity::find()
            .filter(site_themes::Column::DisplayName.eq(*display_name))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let now = chrono::Utc::now().into();
        site_themes::ActiveModel {
            id: Set(Uuid::new_v4()),
            display_name: Set((*display_name).to_string()),
            file_name: Set((*file_name).to_string()),
            gold_logo: Set(*file_name != "wmu-dark"),
            ordering: Set(i16::try_from(ordering).unwrap_or(0)),
            slug: Set(slugify(display_name)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;
    }

    info!("populated site themes");
    Ok(())
}

/// Seeds groups and their permission subsets from the role catalog.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub async fn create_roles(db: &DatabaseConnection) -> Result<(), SeedError> {
    GroupRepository::new(db.clone()).seed_roles().await?;
    Ok(())
}

/// Creates the standing departments.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub async fn create_departments(db: &DatabaseConnection) -> Result<(), SeedError> {
    let repo = CampusRepository::new(db.clone());
    for (code, name) in DEPARTMENTS {
        repo.get_or_create_department(code, name).await?;
    }
    info!("populated departments");
    Ok(())
}

/// Creates the standing room types.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub async fn create_room_types(db: &DatabaseConnection) -> Result<(), SeedError> {
    let repo = CampusRepository::new(db.clone());
    for name in ROOM_TYPES {
        repo.get_or_create_room_type(name).await?;
    }
    info!("populated room types");
    Ok(())
}

/// Creates the Success Center tutoring locations.
///
/// # Errors
///
/// Returns an error if a database operation fails.
pub async fn create_tutor_locations(db: &DatabaseConnection) -> Result<(), SeedError> {
    for (name, room, is_event) in TUTOR_LOCATIONS {
        let exists = tutor_locations::Entity::find()
            .filter(tutor_locations::Column::LocationName.eq(*name))
            .one(db)
            .await?
            .is_some();
        if exists {
            continue;
        }

        let now = chrono::Utc::now().into();
        tutor_locations::ActiveModel {
            id: Set(Uuid::new_v4()),
            location_name: Set((*name).to_string()),
            room_number: Set(room.map(String::from)),
            is_active: Set(true),
            is_event: Set(*is_event),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;
    }

    info!("populated tutor locations");
    Ok(())
}

/// Creates one development login per role, each assigned to its group.
///
/// # Errors
///
/// Returns an error if hashing or a database operation fails.
pub async fn create_role_users(
    db: &DatabaseConnection,
    seed_password: &str,
) -> Result<(), SeedError> {
    let user_repo = UserRepository::new(db.clone());
    let group_repo = GroupRepository::new(db.clone());

    let password_hash = hash_password(seed_password)
        .map_err(|e| SeedError::Database(sea_orm::DbErr::Custom(e.to_string())))?;

    for (role, username, first_name, last_name) in ROLE_USERS {
        let user = user_repo
            .get_or_create(CreateUserInput {
                username: (*username).to_string(),
                email: String::new(),
                password_hash: password_hash.clone(),
                first_name: (*first_name).to_string(),
                last_name: (*last_name).to_string(),
                is_superuser: false,
            })
            .await?;

        let group = group_repo
            .find_by_name(role.group_name())
            .await?
            .ok_or_else(|| {
                SeedError::Database(sea_orm::DbErr::RecordNotFound(format!(
                    "group {}",
                    role.group_name()
                )))
            })?;

        user_repo.set_groups(user.id, &[group.id]).await?;
        ensure_intermediary(db, user.id, username, first_name, last_name).await?;
    }

    info!("populated role users");
    Ok(())
}

/// Gives a login user its intermediary and profile rows, mirroring what
/// directory sync does for real accounts.
async fn ensure_intermediary(
    db: &DatabaseConnection,
    user_id: Uuid,
    bronco_net: &str,
    first_name: &str,
    last_name: &str,
) -> Result<(), SeedError> {
    let exists = user_intermediaries::Entity::find()
        .filter(user_intermediaries::Column::BroncoNet.eq(bronco_net))
        .one(db)
        .await?
        .is_some();
    if exists {
        return Ok(());
    }

    let now = chrono::Utc::now();
    let profile = profiles::ActiveModel {
        id: Set(Uuid::new_v4()),
        address_id: Set(None),
        site_theme_id: Set(None),
        phone_number: Set(None),
        user_timezone: Set("America/Detroit".to_string()),
        desktop_font_size: Set(profiles::FontSize::Base),
        mobile_font_size: Set(profiles::FontSize::Base),
        fg_color: Set(None),
        bg_color: Set(None),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await?;

    user_intermediaries::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(Some(user_id)),
        wmu_user_id: Set(None),
        profile_id: Set(Some(profile.id)),
        bronco_net: Set(bronco_net.to_string()),
        winno: Set(bronco_net.to_string()),
        first_name: Set(first_name.to_string()),
        last_name: Set(last_name.to_string()),
        cae_is_active: Set(true),
        wmu_is_active: Set(true),
        last_directory_check: Set(now.date_naive()),
        slug: Set(slugify(bronco_net)),
        created_at: Set(now.into()),
        updated_at: Set(now.into()),
    }
    .insert(db)
    .await?;

    Ok(())
}
