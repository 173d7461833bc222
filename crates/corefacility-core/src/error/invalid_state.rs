use super::Error;

/// Error when an entity operation is issued from a state that is not a valid
/// source for it, e.g. `update` on an entity that was never created.
#[derive(Debug)]
pub(super) struct InvalidStateError {
    operation: Box<str>,
    state: Box<str>,
}

impl std::error::Error for InvalidStateError {}

impl core::fmt::Display for InvalidStateError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid operation: cannot {} an entity in the `{}` state",
            self.operation, self.state
        )
    }
}

impl Error {
    /// Creates an invalid state error.
    pub fn invalid_state(operation: &str, state: impl core::fmt::Display) -> Error {
        Error::from(super::ErrorKind::InvalidState(InvalidStateError {
            operation: operation.into(),
            state: state.to_string().into(),
        }))
    }

    /// Returns `true` if this error is an invalid state error.
    pub fn is_invalid_state(&self) -> bool {
        self.class() == super::ErrorClass::InvalidState
    }
}
