//! LDAP directory client.

use async_trait::async_trait;
use ldap3::{LdapConnAsync, Scope, SearchEntry};
use thiserror::Error;
use tracing::{debug, warn};

use quad_shared::config::DirectoryConfig;

use super::attributes::{ATTR_BANNER_ID, DirectoryAttributes};

/// Errors raised by directory lookups.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// The directory integration is not configured.
    #[error("directory integration is not configured")]
    NotConfigured,

    /// Connection or protocol failure.
    #[error("directory connection failed: {0}")]
    Connection(String),

    /// The bind (service account login) was rejected.
    #[error("directory bind failed: {0}")]
    Bind(String),
}

/// Abstraction over the campus directory.
///
/// Lookups return `Ok(None)` when the user simply does not exist; errors are
/// reserved for connectivity problems, which callers surface as user-facing
/// warnings rather than failures.
#[async_trait]
pub trait DirectoryClient: Send + Sync {
    /// Fetches all attributes for a user by login id (BroncoNet).
    async fn find_by_uid(&self, uid: &str)
    -> Result<Option<DirectoryAttributes>, DirectoryError>;

    /// Fetches all attributes for a user by university number (Winno).
    async fn find_by_winno(
        &self,
        winno: &str,
    ) -> Result<Option<DirectoryAttributes>, DirectoryError>;
}

/// Directory client backed by a real LDAP server.
#[derive(Debug, Clone)]
pub struct LdapDirectoryClient {
    config: DirectoryConfig,
}

impl LdapDirectoryClient {
    /// Creates a client for the configured directory.
    #[must_use]
    pub const fn new(config: DirectoryConfig) -> Self {
        Self { config }
    }

    /// Runs one bind-search-unbind cycle and returns the first entry.
    async fn search(&self, filter: &str) -> Result<Option<DirectoryAttributes>, DirectoryError> {
        if !self.config.is_enabled() {
            return Err(DirectoryError::NotConfigured);
        }

        let (conn, mut ldap) = LdapConnAsync::new(&self.config.host)
            .await
            .map_err(|e| DirectoryError::Connection(e.to_string()))?;
        ldap3::drive!(conn);

        ldap.simple_bind(&self.config.bind_dn, &self.config.bind_password)
            .await
            .map_err(|e| DirectoryError::Connection(e.to_string()))?
            .success()
            .map_err(|e| DirectoryError::Bind(e.to_string()))?;

        let (entries, _) = ldap
            .search(
                &self.config.user_search_base,
                Scope::Subtree,
                filter,
                vec!["*"],
            )
            .await
            .map_err(|e| DirectoryError::Connection(e.to_string()))?
            .success()
            .map_err(|e| DirectoryError::Connection(e.to_string()))?;

        let _ = ldap.unbind().await;

        let Some(entry) = entries.into_iter().next() else {
            debug!(filter, "directory search returned no entries");
            return Ok(None);
        };

        let entry = SearchEntry::construct(entry);
        Ok(Some(DirectoryAttributes::from_pairs(entry.attrs)))
    }
}

#[async_trait]
impl DirectoryClient for LdapDirectoryClient {
    async fn find_by_uid(
        &self,
        uid: &str,
    ) -> Result<Option<DirectoryAttributes>, DirectoryError> {
        let uid = escape_filter_value(uid);
        let filter = format!("({}={uid})", self.config.uid_attribute);

        match self.search(&filter).await? {
            Some(attrs) => Ok(Some(attrs)),
            None => {
                // Some older accounts only resolve through the campus-specific
                // uid field, so retry with that before giving up.
                warn!(uid = %uid, "uid lookup failed, retrying via wmuUID");
                self.search(&format!("(wmuUID={uid})")).await
            }
        }
    }

    async fn find_by_winno(
        &self,
        winno: &str,
    ) -> Result<Option<DirectoryAttributes>, DirectoryError> {
        let winno = escape_filter_value(winno);
        self.search(&format!("({ATTR_BANNER_ID}={winno})")).await
    }
}

/// Escapes special characters in an LDAP filter value (RFC 4515).
fn escape_filter_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '*' => escaped.push_str("\\2a"),
            '(' => escaped.push_str("\\28"),
            ')' => escaped.push_str("\\29"),
            '\\' => escaped.push_str("\\5c"),
            '\0' => escaped.push_str("\\00"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_filter_value() {
        assert_eq!(escape_filter_value("abc1234"), "abc1234");
        assert_eq!(escape_filter_value("a*(b)\\c"), "a\\2a\\28b\\29\\5cc");
    }

    #[tokio::test]
    async fn test_unconfigured_client_errors() {
        let client = LdapDirectoryClient::new(DirectoryConfig::default());
        let result = client.find_by_uid("abc1234").await;
        assert!(matches!(result, Err(DirectoryError::NotConfigured)));
    }
}
