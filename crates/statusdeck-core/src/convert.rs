// ── Raw directory shapes -> domain types ──
//
// Total mappings: every expected-but-absent field becomes an empty or
// zero value, never an error. Address and IP lists are deduplicated with
// input order preserved; dashboards show the first non-empty address.

use statusdeck_api::types::{AccountResponse, AddressResponse, CountsResponse};

use crate::model::{AccountId, AccountRecord, AccountStatus, EquipmentSummary};

/// Map one directory account into a domain record with the given status.
pub fn account_from_response(resp: AccountResponse, status: AccountStatus) -> AccountRecord {
    let addresses = dedup_preserve(
        resp.addresses
            .iter()
            .map(format_address)
            .filter(|a| !a.is_empty()),
    );
    let ip_addresses = dedup_preserve(
        resp.ip_assignments
            .into_iter()
            .filter_map(|ip| ip.subnet)
            .filter(|s| !s.is_empty()),
    );

    AccountRecord {
        id: AccountId::from(resp.id),
        name: resp.name,
        status,
        addresses,
        ip_addresses,
    }
}

/// Map a whole list, keeping input order.
pub fn accounts_from_responses(
    responses: Vec<AccountResponse>,
    status: AccountStatus,
) -> Vec<AccountRecord> {
    responses
        .into_iter()
        .map(|r| account_from_response(r, status))
        .collect()
}

/// Map the aggregate counts shape onto a raw (pre-suppression) summary.
pub fn summary_from_counts(counts: &CountsResponse) -> EquipmentSummary {
    EquipmentSummary {
        good: counts.good,
        warning: counts.warning,
        down: counts.down,
        uninventoried: counts.uninventoried,
        total: counts.total,
    }
}

/// Join the populated parts of an address into a single display line.
fn format_address(addr: &AddressResponse) -> String {
    [&addr.line1, &addr.city, &addr.subdivision, &addr.zip]
        .into_iter()
        .filter_map(|part| part.as_deref())
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Deduplicate, keeping the first occurrence of each value in order.
fn dedup_preserve(values: impl IntoIterator<Item = String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
