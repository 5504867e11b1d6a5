//! Database seeder and management commands for the Quad portal.
//!
//! Usage:
//!   seeder fixtures           - Load fixed records (roles, themes, locations)
//!   seeder seed [count]       - Fixtures plus randomized records (default 100)
//!   seeder logout-users       - Revoke every active login session
//!   seeder send-test-email    - Send a test email to configured admins

use quad_db::repositories::SessionRepository;
use quad_db::seed::{fixtures, random};
use quad_shared::{AppConfig, EmailService};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map_or("seed", String::as_str);

    let config = AppConfig::load().expect("Failed to load configuration");

    match command {
        "fixtures" => {
            let db = connect(&config).await;
            fixtures::load_all(&db, &config.seed.password)
                .await
                .expect("Fixture loading failed");
            println!("Fixture loading complete.");
        }
        "seed" => {
            let count = args
                .get(2)
                .map(|raw| raw.parse().expect("count must be a number"))
                .unwrap_or(100);

            let db = connect(&config).await;
            fixtures::load_all(&db, &config.seed.password)
                .await
                .expect("Fixture loading failed");
            random::generate_all(&db, count)
                .await
                .expect("Random seeding failed");
            println!("Seeding complete.");
        }
        "logout-users" => {
            let db = connect(&config).await;
            let revoked = SessionRepository::new(db)
                .revoke_all_sessions()
                .await
                .expect("Failed to revoke sessions");
            println!("Logged out {revoked} active session(s).");
        }
        "send-test-email" => {
            let service = EmailService::new(config.email.clone());
            let sent = service
                .send_test_email()
                .await
                .expect("Failed to send test email");
            println!("Sent {sent} test email(s).");
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!("Commands: fixtures, seed [count], logout-users, send-test-email");
            std::process::exit(1);
        }
    }
}

async fn connect(config: &AppConfig) -> sea_orm::DatabaseConnection {
    println!("Connecting to database...");
    quad_db::connect(&config.database.url)
        .await
        .expect("Failed to connect to database")
}
