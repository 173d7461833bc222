pub mod cache;
pub use cache::Cache;

pub mod client;
pub use client::{Client, Config};

mod entity;
pub use entity::{Entity, EntityDef, EntityState, ParentRef, PARENT_KEY};

mod found;
pub use found::Found;

pub mod manager;
pub use manager::{FileManager, PasswordManager};

mod model;
pub use model::Model;

pub mod models;

mod page;
pub use page::EntityPage;

pub mod provider;
pub use provider::{Capability, HttpRequestProvider, Listing, Provider};

pub use corefacility_core::{
    bail, err, route, schema, transport, Error, ErrorClass, Field, FieldTy, Lookup, ManagedKind,
    Query, Record, Result, Route, Schema, Value,
};
