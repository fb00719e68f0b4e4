//! Response types for the directory's batched query API.
//!
//! All types match the JSON the directory returns inside the `data`
//! envelope. Field names use camelCase via `#[serde(rename_all)]`.
//! Every expected-but-possibly-absent field carries `#[serde(default)]`:
//! a missing field is an empty/zero value, never a parse error.

use serde::{Deserialize, Deserializer, Serialize};

// ── Aggregate counts ─────────────────────────────────────────────────

/// Equipment counts by category, as reported by the aggregate query.
///
/// These are raw, pre-suppression figures. Counts are `i64` because the
/// downstream recomputation is allowed to produce negative derived values
/// and must not change representation along the way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountsResponse {
    #[serde(default)]
    pub good: i64,
    #[serde(default)]
    pub warning: i64,
    #[serde(default)]
    pub down: i64,
    #[serde(default)]
    pub uninventoried: i64,
    #[serde(default)]
    pub total: i64,
}

// ── Accounts ─────────────────────────────────────────────────────────

/// A single account as returned by the list and lookup queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    /// Account identifier. The directory reports some ids as JSON numbers
    /// and some as strings; both deserialize to the canonical string form.
    #[serde(deserialize_with = "id_as_string")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub addresses: Vec<AddressResponse>,
    #[serde(default)]
    pub ip_assignments: Vec<IpAssignmentResponse>,
}

/// A postal address attached to an account.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    #[serde(default)]
    pub line1: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub subdivision: Option<String>,
    #[serde(default)]
    pub zip: Option<String>,
}

/// An IP assignment attached to an account's inventory.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpAssignmentResponse {
    #[serde(default)]
    pub subnet: Option<String>,
}

// ── Identifier normalization ─────────────────────────────────────────

/// Accept a JSON string or number and canonicalize to `String`.
///
/// Identifiers are opaque: `55` and `"55"` name the same account, and all
/// equality/membership checks downstream use the string form.
fn id_as_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Number(n) => n.to_string(),
    })
}
