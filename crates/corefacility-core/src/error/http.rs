use super::{Error, ErrorClass, ErrorKind};
use serde_json::Value;

/// Error when the server answered with a non-success HTTP status.
///
/// The server's error envelope is `{detail?, code?}`. Bodies without a
/// `detail` (for example per-field messages on a 400) are kept verbatim as the
/// detail so the caller can still show them.
#[derive(Debug)]
pub(super) struct HttpError {
    status: u16,
    detail: Option<Box<str>>,
    code: Option<Box<str>>,
}

impl HttpError {
    pub(super) fn class(&self) -> ErrorClass {
        match self.status {
            400 => ErrorClass::BadRequest,
            401 => ErrorClass::Unauthorized,
            403 => ErrorClass::Forbidden,
            404 => ErrorClass::NotFound,
            405 => ErrorClass::MethodNotAllowed,
            406 => ErrorClass::NotAcceptable,
            411 => ErrorClass::LengthRequired,
            429 => ErrorClass::TooManyRequests,
            500..=599 => ErrorClass::ServerSide,
            _ => ErrorClass::Http,
        }
    }

    fn reason(&self) -> &'static str {
        match self.status {
            400 => "bad request",
            401 => "unauthorized",
            403 => "forbidden",
            404 => "not found",
            405 => "method not allowed",
            406 => "not acceptable",
            411 => "length required",
            429 => "too many requests",
            500..=599 => "server-side error",
            _ => "unexpected status",
        }
    }
}

impl std::error::Error for HttpError {}

impl core::fmt::Display for HttpError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "HTTP {} ({})", self.status, self.reason())?;
        if let Some(ref detail) = self.detail {
            write!(f, ": {detail}")?;
        }
        if let Some(ref code) = self.code {
            write!(f, " [code={code}]")?;
        }
        Ok(())
    }
}

impl Error {
    /// Translates a non-success HTTP status and its response body into an
    /// error. The mapping from status to [`ErrorClass`] is fixed.
    pub fn from_status(status: u16, body: &Value) -> Error {
        let detail = match body {
            Value::Object(map) => match map.get("detail").and_then(Value::as_str) {
                Some(detail) => Some(detail.into()),
                None if map.is_empty() => None,
                None if map.contains_key("code") && map.len() == 1 => None,
                None => Some(body.to_string().into()),
            },
            Value::String(text) if !text.is_empty() => Some(text.as_str().into()),
            _ => None,
        };

        let code = body.get("code").and_then(Value::as_str).map(Into::into);

        Error::from(ErrorKind::Http(HttpError {
            status,
            detail,
            code,
        }))
    }

    /// The HTTP status the server answered with, if this error came from one.
    pub fn http_status(&self) -> Option<u16> {
        self.find_kind(|kind| match kind {
            ErrorKind::Http(err) => Some(err.status),
            _ => None,
        })
    }

    /// The `detail` message from the server's error envelope.
    pub fn http_detail(&self) -> Option<&str> {
        self.find_kind(|kind| match kind {
            ErrorKind::Http(err) => err.detail.as_deref(),
            _ => None,
        })
    }

    /// The `code` from the server's error envelope.
    pub fn http_code(&self) -> Option<&str> {
        self.find_kind(|kind| match kind {
            ErrorKind::Http(err) => err.code.as_deref(),
            _ => None,
        })
    }

    pub fn is_bad_request(&self) -> bool {
        self.class() == ErrorClass::BadRequest
    }

    pub fn is_unauthorized(&self) -> bool {
        self.class() == ErrorClass::Unauthorized
    }

    pub fn is_forbidden(&self) -> bool {
        self.class() == ErrorClass::Forbidden
    }

    pub fn is_not_found(&self) -> bool {
        self.class() == ErrorClass::NotFound
    }

    pub fn is_method_not_allowed(&self) -> bool {
        self.class() == ErrorClass::MethodNotAllowed
    }

    pub fn is_not_acceptable(&self) -> bool {
        self.class() == ErrorClass::NotAcceptable
    }

    pub fn is_length_required(&self) -> bool {
        self.class() == ErrorClass::LengthRequired
    }

    pub fn is_too_many_requests(&self) -> bool {
        self.class() == ErrorClass::TooManyRequests
    }

    /// Returns `true` for 5xx statuses and for malformed responses.
    pub fn is_server_side(&self) -> bool {
        self.class() == ErrorClass::ServerSide
    }
}
