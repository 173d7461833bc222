use std::fmt;

/// Lifecycle position of one entity instance.
///
/// ```text
/// Creating --create--> Pending --ok--> Saved
/// Loaded | Changed | Saved --update--> Pending --ok--> Saved
/// any persisted state --delete--> Pending --ok--> Deleted
/// Loaded | Saved | Found --set--> Changed
/// ```
///
/// A failed request leaves the entity in the state it had before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityState {
    /// Built locally, never sent to the server.
    Creating,

    /// A request for this entity is in flight.
    Pending,

    /// The last create or update succeeded.
    Saved,

    /// Fetched by identity, or deserialized from a record.
    Loaded,

    /// Has local edits not sent yet.
    Changed,

    /// Removed on the server. Terminal.
    Deleted,

    /// Materialized from a list or page.
    Found,
}

impl EntityState {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityState::Creating => "creating",
            EntityState::Pending => "pending",
            EntityState::Saved => "saved",
            EntityState::Loaded => "loaded",
            EntityState::Changed => "changed",
            EntityState::Deleted => "deleted",
            EntityState::Found => "found",
        }
    }

    /// Returns `true` when the entity exists on the server.
    pub fn is_persisted(&self) -> bool {
        matches!(
            self,
            EntityState::Saved | EntityState::Loaded | EntityState::Changed | EntityState::Found
        )
    }
}

impl fmt::Display for EntityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
