use super::Error;

/// Error when no HTTP response could be obtained: connection failures,
/// timeouts, TLS errors and the like.
#[derive(Debug)]
pub(super) struct NetworkError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for NetworkError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.inner.as_ref())
    }
}

impl core::fmt::Display for NetworkError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        // Display the error and walk its source chain
        write!(f, "network error: {}", self.inner)?;
        let mut source = self.inner.source();
        while let Some(err) = source {
            write!(f, ": {err}")?;
            source = err.source();
        }
        Ok(())
    }
}

impl Error {
    /// Creates a network error from a transport failure.
    pub fn network(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Error {
        Error::from(super::ErrorKind::Network(NetworkError { inner: err.into() }))
    }

    /// Returns `true` if this error is a network error.
    pub fn is_network(&self) -> bool {
        self.class() == super::ErrorClass::Network
    }
}
