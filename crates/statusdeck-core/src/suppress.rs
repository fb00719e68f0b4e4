// ── Suppression set and filter ──
//
// An operator-curated exclusion set of account identifiers. The set is
// shared across all concurrent requests; persistence belongs to the
// embedding process, which seeds and mutates the in-memory set through
// this surface. Membership is keyed on the canonical string form.

use std::collections::HashSet;

use parking_lot::RwLock;

use crate::model::{AccountId, AccountRecord};

/// Shared in-memory set of suppressed account identifiers.
#[derive(Default)]
pub struct SuppressionSet {
    members: RwLock<HashSet<AccountId>>,
}

impl SuppressionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a set from existing identifiers (e.g. loaded by the
    /// persistence collaborator at startup).
    pub fn from_members(ids: impl IntoIterator<Item = AccountId>) -> Self {
        Self {
            members: RwLock::new(ids.into_iter().collect()),
        }
    }

    /// Add an identifier. Returns `true` if it was not already present.
    pub fn add(&self, id: AccountId) -> bool {
        self.members.write().insert(id)
    }

    /// Remove an identifier. Returns `true` if it was present.
    pub fn remove(&self, id: &AccountId) -> bool {
        self.members.write().remove(id)
    }

    pub fn contains(&self, id: &AccountId) -> bool {
        self.members.read().contains(id)
    }

    /// All members, sorted for deterministic iteration.
    pub fn members(&self) -> Vec<AccountId> {
        let mut ids: Vec<AccountId> = self.members.read().iter().cloned().collect();
        ids.sort();
        ids
    }

    pub fn len(&self) -> usize {
        self.members.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.read().is_empty()
    }
}

/// Partition `records` into the visible remainder and a suppressed count.
///
/// A record is suppressed iff its identifier is a member of `set`. Order
/// of the visible records preserves the input order. Pure apart from the
/// set read; O(records).
pub fn partition_visible(
    records: Vec<AccountRecord>,
    set: &SuppressionSet,
) -> (Vec<AccountRecord>, usize) {
    let total = records.len();
    let visible: Vec<AccountRecord> = records
        .into_iter()
        .filter(|r| !set.contains(&r.id))
        .collect();
    let suppressed = total - visible.len();
    (visible, suppressed)
}
