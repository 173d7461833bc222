mod error;
pub use error::{Error, ErrorClass};

pub mod route;
pub use route::Route;

pub mod schema;
pub use schema::{Constraint, Field, FieldTy, ManagedKind, Schema};

pub mod transport;
pub use transport::{Body, FileUpload, Method, PageData, Request, Response, Transport};

mod value;
pub use value::{Lookup, Query, Record, Value};

/// A Result type alias that uses corefacility's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

pub use async_trait::async_trait;
