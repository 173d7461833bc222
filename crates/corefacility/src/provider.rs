use corefacility_core::{
    async_trait,
    transport::{Body, Method, PageData, Request, Response, Transport},
    Lookup, Query, Record, Result, Route, Value,
};

use std::{fmt::Debug, sync::Arc};

/// What a provider's endpoints look like, fixed at configuration time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capability {
    /// The list endpoint answers with a page envelope rather than an array.
    pub paginated: bool,

    /// Create and update are refused before any request is made.
    pub read_only: bool,

    /// Number of ancestor identities needed to build a path. Non-zero for
    /// child entities.
    pub depth: usize,
}

/// Result of a list request.
#[derive(Debug, Clone, PartialEq)]
pub enum Listing {
    Flat(Vec<Record>),
    Paged(PageData),
}

/// Persistence strategy of one entity type.
///
/// Every method maps one entity-level intent onto one request and translates
/// the response shape. `scope` is the ancestor identity chain, outermost
/// first; it is empty for top-level entities.
#[async_trait]
pub trait Provider: Debug + Send + Sync + 'static {
    fn capability(&self) -> &Capability;

    async fn get_entity_list(&self, scope: &[Value], query: &Query) -> Result<Listing>;

    async fn get_entity(&self, scope: &[Value], lookup: &Lookup) -> Result<Record>;

    async fn create_entity(&self, scope: &[Value], record: Record) -> Result<Record>;

    async fn update_entity(&self, scope: &[Value], id: &Value, record: Record) -> Result<Record>;

    async fn delete_entity(&self, scope: &[Value], id: &Value) -> Result<()>;

    /// Follows a pagination cursor handed out with an earlier page.
    async fn fetch_page(&self, cursor: &str) -> Result<PageData>;

    /// Issues a request against a sub-resource of one entity, for field
    /// managers. Returns the decoded body; `null` when it was empty.
    async fn field_request(
        &self,
        scope: &[Value],
        id: &Value,
        subpath: &str,
        method: Method,
        body: Body,
    ) -> Result<Value>;
}

/// [`Provider`] bound to one route of the REST backend.
#[derive(Debug)]
pub struct HttpRequestProvider {
    transport: Arc<dyn Transport>,
    route: Route,
    capability: Capability,
}

impl HttpRequestProvider {
    pub fn new(transport: Arc<dyn Transport>, route: Route) -> HttpRequestProvider {
        let capability = Capability {
            paginated: route.is_paginated(),
            read_only: route.is_read_only(),
            depth: route.depth(),
        };

        HttpRequestProvider {
            transport,
            route,
            capability,
        }
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    async fn send(&self, request: Request) -> Result<Response> {
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.exec(request).await?;
        tracing::debug!(%method, %path, status = response.status, "request completed");

        response.error_for_status()
    }
}

#[async_trait]
impl Provider for HttpRequestProvider {
    fn capability(&self) -> &Capability {
        &self.capability
    }

    async fn get_entity_list(&self, scope: &[Value], query: &Query) -> Result<Listing> {
        let path = self.route.resolve(scope)?;
        let response = self.send(Request::get(path).query(query.clone())).await?;

        if self.capability.paginated {
            response.into_page().map(Listing::Paged)
        } else {
            response.into_list().map(Listing::Flat)
        }
    }

    async fn get_entity(&self, scope: &[Value], lookup: &Lookup) -> Result<Record> {
        let path = self.route.entity_path(scope, lookup)?;
        self.send(Request::get(path)).await?.into_record()
    }

    async fn create_entity(&self, scope: &[Value], record: Record) -> Result<Record> {
        let path = self.route.resolve(scope)?;
        self.send(Request::post(path).json(into_object(record)))
            .await?
            .into_record()
    }

    async fn update_entity(&self, scope: &[Value], id: &Value, record: Record) -> Result<Record> {
        let path = self.route.entity_path(scope, identity(id))?;
        self.send(Request::patch(path).json(into_object(record)))
            .await?
            .into_record()
    }

    async fn delete_entity(&self, scope: &[Value], id: &Value) -> Result<()> {
        let path = self.route.entity_path(scope, identity(id))?;
        self.send(Request::delete(path)).await?;
        Ok(())
    }

    async fn fetch_page(&self, cursor: &str) -> Result<PageData> {
        self.send(Request::get(cursor)).await?.into_page()
    }

    async fn field_request(
        &self,
        scope: &[Value],
        id: &Value,
        subpath: &str,
        method: Method,
        body: Body,
    ) -> Result<Value> {
        let path = self.route.entity_path(scope, identity(id))? + subpath;
        let response = self.send(Request::new(method, path).body(body)).await?;
        Ok(response.body)
    }
}

fn into_object(record: Record) -> Value {
    Value::Object(record.into_iter().collect())
}

/// Identity values render without JSON quoting in paths.
fn identity(id: &Value) -> String {
    match id {
        Value::String(alias) => alias.clone(),
        other => other.to_string(),
    }
}
