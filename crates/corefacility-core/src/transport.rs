mod request;
pub use request::{Body, FileUpload, Method, Request};

mod response;
pub use response::{PageData, Response};

use crate::{async_trait, Result};

use std::fmt::Debug;

/// The uniform HTTP client the entity layer talks through.
///
/// A transport returns `Ok` for every response the server produced,
/// whatever its status; translating statuses into errors is the caller's
/// job (see [`Response::error_for_status`]). `Err` means no response was
/// obtained at all and is always a network error.
#[async_trait]
pub trait Transport: Debug + Send + Sync + 'static {
    async fn exec(&self, request: Request) -> Result<Response>;
}
