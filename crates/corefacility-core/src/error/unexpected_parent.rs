use super::Error;

/// Error when a parent is supplied for a top-level entity type.
#[derive(Debug)]
pub(super) struct UnexpectedParentError {
    entity: Box<str>,
}

impl std::error::Error for UnexpectedParentError {}

impl core::fmt::Display for UnexpectedParentError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "unexpected parent: `{}` entities do not live under a parent",
            self.entity
        )
    }
}

impl Error {
    /// Creates an unexpected parent error.
    pub fn unexpected_parent(entity: &str) -> Error {
        Error::from(super::ErrorKind::UnexpectedParent(UnexpectedParentError {
            entity: entity.into(),
        }))
    }

    /// Returns `true` if this error is an unexpected parent error.
    pub fn is_unexpected_parent(&self) -> bool {
        self.class() == super::ErrorClass::UnexpectedParent
    }
}
