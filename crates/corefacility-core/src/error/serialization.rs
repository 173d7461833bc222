use super::Error;

/// Error when a JSON payload cannot be encoded or decoded.
#[derive(Debug)]
pub(super) struct SerializationError {
    inner: serde_json::Error,
}

impl std::error::Error for SerializationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.inner)
    }
}

impl core::fmt::Display for SerializationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "serialization error: {}", self.inner)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Error {
        Error::from(super::ErrorKind::Serialization(SerializationError { inner: err }))
    }
}

impl Error {
    /// Returns `true` if this error is a serialization error.
    pub fn is_serialization(&self) -> bool {
        self.class() == super::ErrorClass::Serialization
    }
}
