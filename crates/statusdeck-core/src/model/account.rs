// ── Account identity and records ──
//
// AccountId is the canonical-string identifier the whole layer keys on.
// The directory reports some ids numerically; canonicalization happens
// once at the API boundary, and every equality/membership check here
// operates on the string form.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── AccountId ───────────────────────────────────────────────────────

/// Canonical identifier for a directory account.
///
/// Opaque: numerically-valued ids are stored in their string form, so
/// `55` and `"55"` compare equal everywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AccountId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ── AccountStatus ───────────────────────────────────────────────────

/// Equipment status of an account as presented to consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountStatus {
    Down,
    Warning,
    /// Member of the suppression set; excluded from visible views.
    Suppressed,
}

// ── AccountRecord ───────────────────────────────────────────────────

/// One account row in a down/warning/suppressed view.
///
/// Produced transiently per request from directory responses. Addresses
/// and IP lists are deduplicated at conversion time, order preserved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecord {
    pub id: AccountId,
    pub name: String,
    pub status: AccountStatus,
    /// Formatted postal addresses, deduplicated, input order preserved.
    pub addresses: Vec<String>,
    /// Assigned IP addresses, deduplicated, input order preserved.
    pub ip_addresses: Vec<String>,
}

impl AccountRecord {
    /// The address shown in single-line views: first non-empty entry.
    pub fn display_address(&self) -> Option<&str> {
        self.addresses
            .iter()
            .map(String::as_str)
            .find(|a| !a.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(addresses: Vec<&str>) -> AccountRecord {
        AccountRecord {
            id: AccountId::from("1"),
            name: "Test".into(),
            status: AccountStatus::Down,
            addresses: addresses.into_iter().map(String::from).collect(),
            ip_addresses: Vec::new(),
        }
    }

    #[test]
    fn display_address_skips_empty_entries() {
        let r = record(vec!["", "12 Ridge Rd, Ashford", "1 Main St"]);
        assert_eq!(r.display_address(), Some("12 Ridge Rd, Ashford"));
    }

    #[test]
    fn display_address_none_when_all_empty() {
        assert_eq!(record(vec![]).display_address(), None);
        assert_eq!(record(vec![""]).display_address(), None);
    }

    #[test]
    fn ids_compare_on_canonical_string_form() {
        assert_eq!(AccountId::from("55"), AccountId::from(55.to_string()));
    }
}
