//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    pub server: ServerConfig,
    /// Database configuration.
    pub database: DatabaseConfig,
    /// JWT configuration.
    pub jwt: JwtSettings,
    /// Campus directory (LDAP) configuration.
    #[serde(default)]
    pub directory: DirectoryConfig,
    /// Email configuration.
    #[serde(default)]
    pub email: EmailConfig,
    /// Seed configuration for development data.
    #[serde(default)]
    pub seed: SeedConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    /// Database connection URL.
    pub url: String,
    /// Maximum number of connections in the pool.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Minimum number of connections in the pool.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
}

fn default_max_connections() -> u32 {
    10
}

fn default_min_connections() -> u32 {
    1
}

/// JWT configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    /// Secret key for signing tokens.
    pub secret: String,
    /// Access token expiration in seconds.
    #[serde(default = "default_access_token_expiry")]
    pub access_token_expiry_secs: u64,
    /// Refresh token expiration in seconds.
    #[serde(default = "default_refresh_token_expiry")]
    pub refresh_token_expiry_secs: u64,
}

fn default_access_token_expiry() -> u64 {
    900 // 15 minutes
}

fn default_refresh_token_expiry() -> u64 {
    604800 // 7 days
}

/// Campus directory (LDAP) configuration.
///
/// When `host` is empty the directory integration is disabled and lookups
/// fall back to local database records only (the local development setup).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DirectoryConfig {
    /// LDAP server URL, e.g. `ldaps://directory.example.edu`.
    #[serde(default)]
    pub host: String,
    /// DN of the service account used for searches.
    #[serde(default)]
    pub bind_dn: String,
    /// Password of the service account.
    #[serde(default)]
    pub bind_password: String,
    /// Search base for user entries.
    #[serde(default)]
    pub user_search_base: String,
    /// Attribute holding the login id (BroncoNet).
    #[serde(default = "default_uid_attribute")]
    pub uid_attribute: String,
}

fn default_uid_attribute() -> String {
    "uid".to_string()
}

impl DirectoryConfig {
    /// Returns true when a directory host has been configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        !self.host.is_empty()
    }
}

/// SMTP email configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// SMTP server hostname.
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    /// SMTP server port.
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
    /// SMTP username.
    #[serde(default)]
    pub smtp_username: String,
    /// SMTP password.
    #[serde(default)]
    pub smtp_password: String,
    /// From address for outgoing mail.
    #[serde(default = "default_from_email")]
    pub from_email: String,
    /// Display name for outgoing mail.
    #[serde(default = "default_from_name")]
    pub from_name: String,
    /// Site admin addresses, used by the test-email command.
    #[serde(default)]
    pub admin_emails: Vec<String>,
}

fn default_smtp_host() -> String {
    "localhost".to_string()
}

fn default_smtp_port() -> u16 {
    1025
}

fn default_from_email() -> String {
    "noreply@quad.local".to_string()
}

fn default_from_name() -> String {
    "Quad Portal".to_string()
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: default_smtp_host(),
            smtp_port: default_smtp_port(),
            smtp_username: String::new(),
            smtp_password: String::new(),
            from_email: default_from_email(),
            from_name: default_from_name(),
            admin_emails: Vec::new(),
        }
    }
}

/// Seed configuration for development data.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Password assigned to all seeded development users.
    #[serde(default = "default_seed_password")]
    pub password: String,
}

fn default_seed_password() -> String {
    "temppass2".to_string()
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            password: default_seed_password(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("QUAD").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_disabled_by_default() {
        let config = DirectoryConfig::default();
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_email_config_default() {
        let config = EmailConfig::default();
        assert_eq!(config.smtp_host, "localhost");
        assert_eq!(config.smtp_port, 1025);
        assert!(config.admin_emails.is_empty());
    }
}
