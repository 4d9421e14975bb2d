//! Delivery address collection for the current session.
//!
//! The book is an ordered, in-memory collection and the rendering source of
//! truth. Its one consistency rule: at most one entry is active, and a
//! non-empty book has exactly one. The first address added to an empty book
//! activates automatically; activation is exclusive and applied in a single
//! pass; removing the active entry promotes the first remaining entry in
//! display order.
//!
//! Mutations are synchronous over local state. Backend mirroring happens
//! elsewhere and reports back only through the per-entry [`SyncState`]
//! marker, so a failed mirror is visible instead of silently logged.

use serde::Serialize;
use thiserror::Error;

use platter_core::AddressId;

/// Backend mirroring state of one address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    /// Accepted locally, mirror still in flight.
    Pending,
    /// The backend acknowledged the mirror.
    Synced,
    /// The mirror failed; the entry is local-only until retried.
    Failed,
}

/// A delivery address held for the current session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Address {
    /// Locally assigned identifier, monotonically distinct per book.
    pub id: AddressId,
    /// Short label ("Home", "Office").
    pub label: String,
    /// Street line.
    pub line: String,
    /// City.
    pub city: String,
    /// State or region.
    pub region: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
    /// Whether this is the session's designated delivery address.
    pub is_active: bool,
    /// Backend mirroring state.
    pub sync: SyncState,
}

/// Input for [`AddressBook::add`]: every field is required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddressCandidate {
    /// Short label ("Home", "Office").
    pub label: String,
    /// Street line.
    pub line: String,
    /// City.
    pub city: String,
    /// State or region.
    pub region: String,
    /// Postal code.
    pub postal_code: String,
    /// Country.
    pub country: String,
}

impl AddressCandidate {
    /// Names of the required fields that are blank after trimming.
    fn blank_fields(&self) -> Vec<&'static str> {
        let mut blank = Vec::new();
        for (name, value) in [
            ("label", &self.label),
            ("line", &self.line),
            ("city", &self.city),
            ("region", &self.region),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ] {
            if value.trim().is_empty() {
                blank.push(name);
            }
        }
        blank
    }
}

/// Rejection from [`AddressBook::add`]: one or more required fields were
/// blank after trimming. The collection is untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("required address fields are blank: {}", fields.join(", "))]
pub struct BlankFields {
    /// The offending field names, in declaration order.
    pub fields: Vec<&'static str>,
}

/// Ordered collection of addresses with a single active entry.
#[derive(Debug)]
pub struct AddressBook {
    entries: Vec<Address>,
    next_id: i64,
}

impl Default for AddressBook {
    fn default() -> Self {
        Self::new()
    }
}

impl AddressBook {
    /// Create an empty address book.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }

    /// Add a validated candidate to the end of the collection.
    ///
    /// Field values are trimmed before they are stored. The first entry in
    /// an empty book becomes active; every later entry starts inactive. New
    /// entries start with sync marker [`SyncState::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`BlankFields`] naming every required field that is blank
    /// after trimming; the collection is not mutated.
    pub fn add(&mut self, candidate: &AddressCandidate) -> Result<Address, BlankFields> {
        let blank = candidate.blank_fields();
        if !blank.is_empty() {
            return Err(BlankFields { fields: blank });
        }

        let id = AddressId::new(self.next_id);
        self.next_id += 1;

        let address = Address {
            id,
            label: candidate.label.trim().to_owned(),
            line: candidate.line.trim().to_owned(),
            city: candidate.city.trim().to_owned(),
            region: candidate.region.trim().to_owned(),
            postal_code: candidate.postal_code.trim().to_owned(),
            country: candidate.country.trim().to_owned(),
            is_active: self.entries.is_empty(),
            sync: SyncState::Pending,
        };
        self.entries.push(address.clone());
        Ok(address)
    }

    /// Remove the entry with the given identifier; absent ids are a no-op.
    ///
    /// Removing the active entry promotes the first remaining entry in
    /// display order, so a non-empty book always has exactly one active
    /// member.
    pub fn remove(&mut self, id: AddressId) {
        let Some(position) = self.entries.iter().position(|a| a.id == id) else {
            return;
        };
        let removed = self.entries.remove(position);
        if removed.is_active
            && let Some(first) = self.entries.first_mut()
        {
            first.is_active = true;
        }
    }

    /// Make the entry with the given identifier the single active one.
    ///
    /// Applied in one pass: the match becomes active and every other entry
    /// inactive in the same update. An absent id leaves the collection
    /// unchanged.
    pub fn set_active(&mut self, id: AddressId) {
        if !self.entries.iter().any(|a| a.id == id) {
            return;
        }
        for address in &mut self.entries {
            address.is_active = address.id == id;
        }
    }

    /// Ordered read-only projection for rendering.
    #[must_use]
    pub fn list(&self) -> &[Address] {
        &self.entries
    }

    /// Look up an entry by identifier.
    #[must_use]
    pub fn get(&self, id: AddressId) -> Option<&Address> {
        self.entries.iter().find(|a| a.id == id)
    }

    /// The currently active entry, if any.
    #[must_use]
    pub fn active(&self) -> Option<&Address> {
        self.entries.iter().find(|a| a.is_active)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the book is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Record that the backend acknowledged the mirror for this entry.
    ///
    /// No-op when the entry has been removed in the meantime - a late
    /// mirror result for a gone address is ignored.
    pub fn mark_synced(&mut self, id: AddressId) {
        if let Some(address) = self.entries.iter_mut().find(|a| a.id == id) {
            address.sync = SyncState::Synced;
        }
    }

    /// Record that the mirror for this entry failed.
    ///
    /// No-op when the entry has been removed in the meantime.
    pub fn mark_sync_failed(&mut self, id: AddressId) {
        if let Some(address) = self.entries.iter_mut().find(|a| a.id == id) {
            address.sync = SyncState::Failed;
        }
    }
}
