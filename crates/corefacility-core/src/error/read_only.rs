use super::Error;

/// Error when a write is attempted on a read-only entity type.
#[derive(Debug)]
pub(super) struct ReadOnlyError {
    entity: Box<str>,
    operation: Box<str>,
}

impl std::error::Error for ReadOnlyError {}

impl core::fmt::Display for ReadOnlyError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "read-only: `{}` entities do not support {}",
            self.entity, self.operation
        )
    }
}

impl Error {
    /// Creates a read-only error.
    pub fn read_only(entity: &str, operation: &str) -> Error {
        Error::from(super::ErrorKind::ReadOnly(ReadOnlyError {
            entity: entity.into(),
            operation: operation.into(),
        }))
    }

    /// Returns `true` if this error is a read-only error.
    pub fn is_read_only(&self) -> bool {
        self.class() == super::ErrorClass::ReadOnly
    }
}
