//! Raw directory attribute maps and access helpers.

use std::collections::HashMap;

/// Attribute flagging current enrollment ("True"/"False" as strings).
pub const ATTR_ENROLLED: &str = "wmuEnrolled";
/// Account status attribute ("active"/"inactive").
pub const ATTR_USER_STATUS: &str = "inetUserStatus";
/// Student enrollment expiration timestamp.
pub const ATTR_STUDENT_EXPIRATION: &str = "wmuStudentExpiration";
/// Employee appointment expiration timestamp.
pub const ATTR_EMPLOYEE_EXPIRATION: &str = "wmuEmployeeExpiration";
/// University-issued numeric id (Winno).
pub const ATTR_BANNER_ID: &str = "wmuBannerID";
/// First name as recorded by the registrar.
pub const ATTR_FIRST_NAME: &str = "wmuFirstName";
/// Middle name as recorded by the registrar.
pub const ATTR_MIDDLE_NAME: &str = "wmuMiddleName";
/// Last name as recorded by the registrar.
pub const ATTR_LAST_NAME: &str = "wmuLastName";
/// Official email address.
pub const ATTR_MAIL: &str = "mail";
/// Home phone number.
pub const ATTR_HOME_PHONE: &str = "homePhone";

/// A user's raw directory entry: attribute name to list of string values.
///
/// Directory attributes are multi-valued by protocol; most of the ones the
/// portal cares about carry a single value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryAttributes(HashMap<String, Vec<String>>);

impl DirectoryAttributes {
    /// Creates an empty attribute map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an attribute map from name/values pairs.
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Vec<V>)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self(
            pairs
                .into_iter()
                .map(|(k, vs)| (k.into(), vs.into_iter().map(Into::into).collect()))
                .collect(),
        )
    }

    /// Inserts an attribute with the given values.
    pub fn insert<K: Into<String>>(&mut self, name: K, values: Vec<String>) {
        self.0.insert(name.into(), values);
    }

    /// Returns the first value of an attribute, trimmed.
    ///
    /// Absent attributes and empty value lists both return `None`, as does a
    /// present-but-blank value.
    #[must_use]
    pub fn single(&self, name: &str) -> Option<&str> {
        self.0
            .get(name)
            .and_then(|values| values.first())
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }

    /// Returns all values of an attribute.
    #[must_use]
    pub fn all(&self, name: &str) -> Option<&[String]> {
        self.0.get(name).map(Vec::as_slice)
    }

    /// Resolves a display name with fallbacks, mirroring how the registrar's
    /// directory degrades: `givenName`/`sn`, then `displayName`, `gecos`,
    /// `cn`, and finally the uid itself.
    #[must_use]
    pub fn backup_name(&self, uid: &str, last_name: bool) -> String {
        let primary = if last_name { "sn" } else { "givenName" };

        for attr in [primary, "displayName", "gecos", "cn"] {
            if let Some(value) = self.single(attr) {
                return value.to_string();
            }
        }

        uid.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_collapses_one_element_lists() {
        let attrs =
            DirectoryAttributes::from_pairs([(ATTR_ENROLLED, vec!["  True  "])]);
        assert_eq!(attrs.single(ATTR_ENROLLED), Some("True"));
    }

    #[test]
    fn test_single_treats_empty_as_absent() {
        let mut attrs = DirectoryAttributes::new();
        attrs.insert(ATTR_USER_STATUS, vec![]);
        assert_eq!(attrs.single(ATTR_USER_STATUS), None);

        attrs.insert(ATTR_USER_STATUS, vec!["   ".to_string()]);
        assert_eq!(attrs.single(ATTR_USER_STATUS), None);
    }

    #[test]
    fn test_backup_name_fallback_order() {
        let attrs = DirectoryAttributes::from_pairs([
            ("displayName", vec!["Display Name"]),
            ("cn", vec!["Common Name"]),
        ]);
        // No givenName, so displayName wins over cn.
        assert_eq!(attrs.backup_name("abc1234", false), "Display Name");

        let attrs = DirectoryAttributes::from_pairs([("givenName", vec!["Given"])]);
        assert_eq!(attrs.backup_name("abc1234", false), "Given");

        let attrs = DirectoryAttributes::new();
        assert_eq!(attrs.backup_name("abc1234", true), "abc1234");
    }
}
