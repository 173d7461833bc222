use super::{Client, Config};
use crate::{transport::Transport, Error, Result};

use std::sync::Arc;

#[derive(Default)]
pub struct Builder {
    transport: Option<Arc<dyn Transport>>,
    config: Option<Config>,
}

impl Builder {
    /// Uses an explicit transport. Takes precedence over [`config`](Self::config).
    pub fn transport(&mut self, transport: impl Transport) -> &mut Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    pub fn shared_transport(&mut self, transport: Arc<dyn Transport>) -> &mut Self {
        self.transport = Some(transport);
        self
    }

    /// Connects to the backend described by `config` with the built-in HTTP
    /// transport.
    pub fn config(&mut self, config: Config) -> &mut Self {
        self.config = Some(config);
        self
    }

    pub fn build(&mut self) -> Result<Client> {
        let transport = match (self.transport.take(), self.config.take()) {
            (Some(transport), _) => transport,
            (None, Some(config)) => connect(&config)?,
            (None, None) => {
                return Err(Error::config(
                    "a transport or a configuration is required to build a client",
                ))
            }
        };

        Ok(Client::new(transport))
    }
}

#[cfg(feature = "http")]
fn connect(config: &Config) -> Result<Arc<dyn Transport>> {
    let transport = corefacility_transport_http::Http::new(
        config.api_root()?,
        config.token.as_deref(),
        config.request_timeout(),
    )?;
    tracing::debug!(root = %transport.root(), "connected HTTP transport");
    Ok(Arc::new(transport))
}

#[cfg(not(feature = "http"))]
fn connect(_config: &Config) -> Result<Arc<dyn Transport>> {
    Err(Error::config(
        "the `http` feature is disabled; supply a transport instead",
    ))
}
