mod adhoc;
mod config;
mod http;
mod invalid_response;
mod invalid_route;
mod invalid_state;
mod missing_parent;
mod network;
mod page_range;
mod read_only;
mod serialization;
mod unexpected_parent;
mod validation;

use adhoc::AdhocError;
use config::ConfigError;
use http::HttpError;
use invalid_response::InvalidResponseError;
use invalid_route::InvalidRouteError;
use invalid_state::InvalidStateError;
use missing_parent::MissingParentError;
use network::NetworkError;
use page_range::PageRangeError;
use read_only::ReadOnlyError;
use serialization::SerializationError;
use std::sync::Arc;
use unexpected_parent::UnexpectedParentError;
use validation::ValidationError;

/// Returns early with an ad-hoc error built from a format string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return Err($crate::Error::from_args(format_args!($($arg)*)))
    };
}

/// Builds an ad-hoc error from a format string.
#[macro_export]
macro_rules! err {
    ($($arg:tt)*) => {
        $crate::Error::from_args(format_args!($($arg)*))
    };
}

/// What went wrong, in a form callers can match on.
///
/// Context added with [`Error::context`] does not change the class: the class
/// is taken from the first error in the chain that carries one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    /// A value was rejected by a field's local coercion. Never leaves the client.
    Validation,
    /// No HTTP response was obtained.
    Network,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    MethodNotAllowed,
    NotAcceptable,
    LengthRequired,
    TooManyRequests,
    /// 5xx statuses, and responses whose envelope has the wrong shape.
    ServerSide,
    /// Any other non-success HTTP status.
    Http,
    /// The operation is not valid from the entity's current state.
    InvalidState,
    /// The entity type does not support the operation.
    ReadOnly,
    /// There is no page in the requested direction.
    PageRange,
    /// A child entity was used without its parent.
    MissingParent,
    /// A parent was given for a top-level entity type.
    UnexpectedParent,
    /// A URL template could not be resolved.
    InvalidRoute,
    Config,
    Serialization,
    Other,
}

/// An error that can occur in corefacility.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
    cause: Option<Error>,
}

impl Error {
    /// Adds context to this error.
    ///
    /// Context is displayed in reverse order: the most recently added context
    /// is shown first, followed by earlier context, ending with the root cause.
    #[inline(never)]
    #[cold]
    pub fn context(self, consequent: Error) -> Error {
        let kind = match Arc::try_unwrap(consequent.inner) {
            Ok(inner) if inner.cause.is_none() => inner.kind,
            Ok(inner) => ErrorKind::Adhoc(AdhocError::new(
                Error {
                    inner: Arc::new(inner),
                }
                .to_string(),
            )),
            Err(shared) => ErrorKind::Adhoc(AdhocError::new(Error { inner: shared }.to_string())),
        };

        Error {
            inner: Arc::new(ErrorInner {
                kind,
                cause: Some(self),
            }),
        }
    }

    /// Returns the class of this error.
    pub fn class(&self) -> ErrorClass {
        self.chain()
            .map(|err| err.kind().class())
            .find(|class| *class != ErrorClass::Other)
            .unwrap_or(ErrorClass::Other)
    }

    fn chain(&self) -> impl Iterator<Item = &Error> {
        let mut err = self;
        core::iter::once(err).chain(core::iter::from_fn(move || {
            err = err.inner.cause.as_ref()?;
            Some(err)
        }))
    }

    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }

    fn find_kind<'a, T: 'a>(&'a self, f: impl Fn(&'a ErrorKind) -> Option<T>) -> Option<T> {
        self.chain().find_map(|err| f(err.kind()))
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self.kind() {
            ErrorKind::Anyhow(err) => Some(err.as_ref()),
            ErrorKind::Network(err) => Some(err),
            ErrorKind::Serialization(err) => Some(err),
            _ => None,
        }
    }
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        let mut it = self.chain().peekable();
        while let Some(err) = it.next() {
            core::fmt::Display::fmt(err.kind(), f)?;
            if it.peek().is_some() {
                f.write_str(": ")?;
            }
        }
        Ok(())
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .field("cause", &self.inner.cause)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    Anyhow(anyhow::Error),
    Adhoc(AdhocError),
    Config(ConfigError),
    Http(HttpError),
    InvalidResponse(InvalidResponseError),
    InvalidRoute(InvalidRouteError),
    InvalidState(InvalidStateError),
    MissingParent(MissingParentError),
    Network(NetworkError),
    PageRange(PageRangeError),
    ReadOnly(ReadOnlyError),
    Serialization(SerializationError),
    UnexpectedParent(UnexpectedParentError),
    Validation(ValidationError),
}

impl ErrorKind {
    fn class(&self) -> ErrorClass {
        use self::ErrorKind::*;

        match self {
            Anyhow(_) | Adhoc(_) => ErrorClass::Other,
            Config(_) => ErrorClass::Config,
            Http(err) => err.class(),
            InvalidResponse(_) => ErrorClass::ServerSide,
            InvalidRoute(_) => ErrorClass::InvalidRoute,
            InvalidState(_) => ErrorClass::InvalidState,
            MissingParent(_) => ErrorClass::MissingParent,
            Network(_) => ErrorClass::Network,
            PageRange(_) => ErrorClass::PageRange,
            ReadOnly(_) => ErrorClass::ReadOnly,
            Serialization(_) => ErrorClass::Serialization,
            UnexpectedParent(_) => ErrorClass::UnexpectedParent,
            Validation(_) => ErrorClass::Validation,
        }
    }
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            Anyhow(err) => core::fmt::Display::fmt(err, f),
            Adhoc(err) => core::fmt::Display::fmt(err, f),
            Config(err) => core::fmt::Display::fmt(err, f),
            Http(err) => core::fmt::Display::fmt(err, f),
            InvalidResponse(err) => core::fmt::Display::fmt(err, f),
            InvalidRoute(err) => core::fmt::Display::fmt(err, f),
            InvalidState(err) => core::fmt::Display::fmt(err, f),
            MissingParent(err) => core::fmt::Display::fmt(err, f),
            Network(err) => core::fmt::Display::fmt(err, f),
            PageRange(err) => core::fmt::Display::fmt(err, f),
            ReadOnly(err) => core::fmt::Display::fmt(err, f),
            Serialization(err) => core::fmt::Display::fmt(err, f),
            UnexpectedParent(err) => core::fmt::Display::fmt(err, f),
            Validation(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner { kind, cause: None }),
        }
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Error {
        Error::from(ErrorKind::Anyhow(err))
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Error {
        Error::config(format!("invalid URL: {err}"))
    }
}
