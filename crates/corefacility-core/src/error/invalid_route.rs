use super::Error;

/// Error when a URL template cannot be resolved with the identities at hand.
#[derive(Debug)]
pub(super) struct InvalidRouteError {
    template: Box<str>,
    message: Box<str>,
}

impl std::error::Error for InvalidRouteError {}

impl core::fmt::Display for InvalidRouteError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid route `{}`: {}", self.template, self.message)
    }
}

impl Error {
    /// Creates an invalid route error.
    pub fn invalid_route(template: &str, message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::InvalidRoute(InvalidRouteError {
            template: template.into(),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is an invalid route error.
    pub fn is_invalid_route(&self) -> bool {
        self.class() == super::ErrorClass::InvalidRoute
    }
}
