use super::{Error, ErrorKind};

/// Error when a value is rejected by a field's local coercion.
#[derive(Debug)]
pub(super) struct ValidationError {
    field: Option<Box<str>>,
    message: Box<str>,
}

impl std::error::Error for ValidationError {}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match &self.field {
            Some(field) => write!(
                f,
                "validation failed for field `{field}`: {}",
                self.message
            ),
            None => write!(f, "validation failed: {}", self.message),
        }
    }
}

impl Error {
    /// Creates a validation error not attached to any field.
    pub fn validation(message: impl Into<String>) -> Error {
        Error::from(ErrorKind::Validation(ValidationError {
            field: None,
            message: message.into().into(),
        }))
    }

    /// Creates a validation error for the named field.
    pub fn field_validation(field: &str, message: impl Into<String>) -> Error {
        Error::from(ErrorKind::Validation(ValidationError {
            field: Some(field.into()),
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a validation error.
    pub fn is_validation(&self) -> bool {
        self.class() == super::ErrorClass::Validation
    }

    /// Name of the field that rejected the value.
    pub fn invalid_field(&self) -> Option<&str> {
        self.find_kind(|kind| match kind {
            ErrorKind::Validation(err) => err.field.as_deref(),
            _ => None,
        })
    }

    /// The message to show next to the rejected field.
    pub fn validation_message(&self) -> Option<&str> {
        self.find_kind(|kind| match kind {
            ErrorKind::Validation(err) => Some(&*err.message),
            _ => None,
        })
    }
}
