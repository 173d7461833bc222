mod builder;
pub use builder::Builder;

mod config;
pub use config::Config;

use crate::{
    entity::{Entity, EntityDef, EntityState, ParentRef},
    provider::Listing,
    transport::Transport,
    Cache, EntityPage, Found, Lookup, Model, Query, Record, Result,
};

use std::{fmt, sync::Arc};

/// Shared state between all `Client` clones.
struct Shared {
    transport: Arc<dyn Transport>,
    cache: Cache,
}

/// Entry point to a corefacility backend.
///
/// Cloning is cheap; clones share the transport and the cache.
#[derive(Clone)]
pub struct Client {
    shared: Arc<Shared>,
}

impl Client {
    pub fn builder() -> Builder {
        Builder::default()
    }

    pub(crate) fn new(transport: Arc<dyn Transport>) -> Client {
        Client {
            shared: Arc::new(Shared {
                transport,
                cache: Cache::default(),
            }),
        }
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.shared.transport
    }

    pub fn cache(&self) -> &Cache {
        &self.shared.cache
    }

    /// The type definition entities of `M` are bound to.
    pub fn definition<M: Model>(&self) -> Arc<EntityDef> {
        Arc::new(EntityDef::new(M::schema(), M::provider(self)))
    }

    /// A new, unsaved entity.
    pub fn new_entity<M: Model>(&self) -> Result<M> {
        Entity::new(self.definition::<M>()).map(M::from)
    }

    /// A new, unsaved entity living under `parent`.
    pub fn new_entity_in<M: Model>(&self, parent: &Entity) -> Result<M> {
        let def = self.definition::<M>();
        let parent = parent.as_parent()?;
        def.scope(Some(&parent))?;
        Entity::with_parent(def, parent).map(M::from)
    }

    /// Rebuilds an entity from a record produced by
    /// [`Entity::serialize`]. Child entities need their parent attached
    /// with [`ParentRef::attach`].
    pub fn deserialize<M: Model>(&self, record: Record) -> Result<M> {
        Entity::deserialize(self.definition::<M>(), record).map(M::from)
    }

    /// Fetches one entity by identity.
    pub async fn get<M: Model>(&self, lookup: impl Into<Lookup>) -> Result<M> {
        self.get_scoped(None, lookup.into()).await
    }

    /// Fetches one child entity of `parent` by identity.
    pub async fn get_in<M: Model>(&self, parent: &Entity, lookup: impl Into<Lookup>) -> Result<M> {
        self.get_scoped(Some(parent.as_parent()?), lookup.into())
            .await
    }

    async fn get_scoped<M: Model>(&self, parent: Option<ParentRef>, lookup: Lookup) -> Result<M> {
        let def = self.definition::<M>();
        let scope = def.scope(parent.as_ref())?;

        tracing::debug!(entity = M::NAME, %lookup, "fetching entity");
        let record = def.provider().get_entity(&scope, &lookup).await?;
        Entity::hydrate(def, record, parent, EntityState::Loaded).map(M::from)
    }

    /// Searches entities. Every result is in the `Found` state.
    pub async fn find<M: Model>(&self, query: Query) -> Result<Found<M>> {
        self.find_scoped(None, query).await
    }

    /// Searches the child entities of `parent`.
    pub async fn find_in<M: Model>(&self, parent: &Entity, query: Query) -> Result<Found<M>> {
        self.find_scoped(Some(parent.as_parent()?), query).await
    }

    async fn find_scoped<M: Model>(
        &self,
        parent: Option<ParentRef>,
        query: Query,
    ) -> Result<Found<M>> {
        let def = self.definition::<M>();
        let scope = def.scope(parent.as_ref())?;

        tracing::debug!(entity = M::NAME, %query, "searching entities");
        match def.provider().get_entity_list(&scope, &query).await? {
            Listing::Flat(records) => {
                hydrate_all(&def, records, parent.as_ref()).map(Found::List)
            }
            Listing::Paged(data) => EntityPage::from_data(def, parent, data).map(Found::Page),
        }
    }

    /// Like [`find`](Self::find), but answers repeated queries from the
    /// client's cache. Paginated responses are reduced to their first page.
    pub async fn find_cached<M: Model>(&self, query: Query) -> Result<Vec<M>> {
        let def = self.definition::<M>();
        let scope = def.scope(None)?;
        let key = format!("{}?{}", M::NAME, query);

        let records = match self.cache().get(&key) {
            Some(records) => {
                tracing::trace!(entity = M::NAME, %key, "cache hit");
                records
            }
            None => {
                let records = match def.provider().get_entity_list(&scope, &query).await? {
                    Listing::Flat(records) => records,
                    Listing::Paged(data) => data.results,
                };
                self.cache().insert(key, records.clone());
                records
            }
        };

        hydrate_all(&def, records, None)
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("transport", &self.shared.transport)
            .field("cache", &self.shared.cache)
            .finish()
    }
}

fn hydrate_all<M: Model>(
    def: &Arc<EntityDef>,
    records: Vec<Record>,
    parent: Option<&ParentRef>,
) -> Result<Vec<M>> {
    records
        .into_iter()
        .map(|record| {
            Entity::hydrate(Arc::clone(def), record, parent.cloned(), EntityState::Found)
                .map(M::from)
        })
        .collect()
}
