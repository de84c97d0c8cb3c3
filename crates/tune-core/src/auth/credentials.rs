//! Credential requirements and collected credential values.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Sensitivity of a credential field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CredentialKind {
    /// Echoed while typed.
    #[default]
    Normal,
    /// Typed without echo.
    Secret,
}

impl CredentialKind {
    /// Returns true if input for this field must be hidden.
    #[must_use]
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Secret)
    }
}

/// Credentials a resource kind needs before it can authenticate.
///
/// Handlers may declare either a plain list of field names, all of them
/// [`CredentialKind::Normal`], or an ordered mapping of field name to kind.
/// Both shapes deserialize from JSON/TOML:
///
/// ```
/// use tune_core::auth::{CredentialKind, RequiredCredentials};
///
/// let list: RequiredCredentials = serde_json::from_str(r#"["token"]"#).unwrap();
/// let map: RequiredCredentials =
///     serde_json::from_str(r#"{"username": "normal", "password": "secret"}"#).unwrap();
///
/// assert_eq!(list.normalize()["token"], CredentialKind::Normal);
/// assert_eq!(map.normalize()["password"], CredentialKind::Secret);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RequiredCredentials {
    /// Field names only.
    Fields(Vec<String>),
    /// Field name to sensitivity.
    Tagged(IndexMap<String, CredentialKind>),
}

impl RequiredCredentials {
    /// Builds a tagged requirement from `(name, kind)` pairs.
    pub fn tagged<N: Into<String>>(fields: impl IntoIterator<Item = (N, CredentialKind)>) -> Self {
        Self::Tagged(fields.into_iter().map(|(name, kind)| (name.into(), kind)).collect())
    }

    /// Builds a list requirement from field names.
    pub fn fields<N: Into<String>>(names: impl IntoIterator<Item = N>) -> Self {
        Self::Fields(names.into_iter().map(Into::into).collect())
    }

    /// Returns the requirement as an ordered name to kind mapping.
    ///
    /// List entries become [`CredentialKind::Normal`] in list order; a repeated
    /// name keeps its first position. Mappings are returned unchanged.
    #[must_use]
    pub fn normalize(&self) -> IndexMap<String, CredentialKind> {
        match self {
            Self::Fields(names) => names
                .iter()
                .map(|name| (name.clone(), CredentialKind::Normal))
                .collect(),
            Self::Tagged(fields) => fields.clone(),
        }
    }
}

/// Credential values collected for one authentication attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    values: IndexMap<String, String>,
}

impl Credentials {
    /// Creates an empty set of credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the answer for `name`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Returns the value supplied for `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Returns the value for `name` unless it is missing or empty.
    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get(name).filter(|value| !value.is_empty())
    }

    /// Field names in the order they were answered.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of answered fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was answered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Credentials {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut credentials = Self::new();
        for (name, value) in iter {
            credentials.insert(name, value);
        }
        credentials
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_normalizes_to_normal_in_order() {
        let required = RequiredCredentials::fields(["token", "account", "region"]);
        let normalized = required.normalize();

        let names: Vec<_> = normalized.keys().cloned().collect();
        assert_eq!(names, vec!["token", "account", "region"]);
        assert!(normalized.values().all(|kind| *kind == CredentialKind::Normal));
    }

    #[test]
    fn test_mapping_is_unchanged() {
        let required = RequiredCredentials::tagged([
            ("username", CredentialKind::Normal),
            ("password", CredentialKind::Secret),
        ]);
        let RequiredCredentials::Tagged(expected) = required.clone() else {
            panic!("expected tagged requirement");
        };
        assert_eq!(required.normalize(), expected);
    }

    #[test]
    fn test_numeric_field_names_keep_their_shape() {
        let list: RequiredCredentials = serde_json::from_str(r#"["1", "2"]"#).unwrap();
        assert_eq!(list, RequiredCredentials::fields(["1", "2"]));

        let map: RequiredCredentials =
            serde_json::from_str(r#"{"0": "secret", "1": "normal"}"#).unwrap();
        let normalized = map.normalize();
        assert_eq!(normalized["0"], CredentialKind::Secret);
        assert_eq!(normalized["1"], CredentialKind::Normal);
    }

    #[test]
    fn test_duplicate_list_entries_keep_first_position() {
        let normalized = RequiredCredentials::fields(["a", "b", "a"]).normalize();
        let names: Vec<_> = normalized.keys().cloned().collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn test_mapping_order_follows_declaration() {
        let map: RequiredCredentials =
            serde_json::from_str(r#"{"password": "secret", "username": "normal"}"#).unwrap();
        let names: Vec<_> = map.normalize().keys().cloned().collect();
        assert_eq!(names, vec!["password", "username"]);
    }

    #[test]
    fn test_credentials_non_empty() {
        let credentials: Credentials =
            [("username", "octocat"), ("password", "")].into_iter().collect();
        assert_eq!(credentials.non_empty("username"), Some("octocat"));
        assert_eq!(credentials.non_empty("password"), None);
        assert_eq!(credentials.non_empty("otp"), None);
        assert_eq!(credentials.get("password"), Some(""));
        assert_eq!(credentials.len(), 2);
    }

    #[test]
    fn test_secret_is_hidden() {
        assert!(CredentialKind::Secret.is_hidden());
        assert!(!CredentialKind::Normal.is_hidden());
    }
}
