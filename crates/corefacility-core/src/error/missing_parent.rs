use super::Error;

/// Error when a child entity is used or deserialized without its parent.
#[derive(Debug)]
pub(super) struct MissingParentError {
    entity: Box<str>,
}

impl std::error::Error for MissingParentError {}

impl core::fmt::Display for MissingParentError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "missing parent: `{}` is a child entity and requires a parent",
            self.entity
        )
    }
}

impl Error {
    /// Creates a missing parent error.
    pub fn missing_parent(entity: &str) -> Error {
        Error::from(super::ErrorKind::MissingParent(MissingParentError {
            entity: entity.into(),
        }))
    }

    /// Returns `true` if this error is a missing parent error.
    pub fn is_missing_parent(&self) -> bool {
        self.class() == super::ErrorClass::MissingParent
    }
}
