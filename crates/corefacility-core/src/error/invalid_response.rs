use super::Error;

/// Error when a response body does not have the expected envelope shape.
///
/// This is reported as a server-side failure: the server answered, but with
/// something the client cannot interpret.
#[derive(Debug)]
pub(super) struct InvalidResponseError {
    message: Box<str>,
}

impl std::error::Error for InvalidResponseError {}

impl core::fmt::Display for InvalidResponseError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid response: {}", self.message)
    }
}

impl Error {
    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidResponse(InvalidResponseError {
            message: message.into().into(),
        }))
    }
}
