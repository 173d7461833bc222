mod parent;
pub use parent::{ParentRef, PARENT_KEY};

mod pending;
use pending::Pending;

mod state;
pub use state::EntityState;

use crate::{
    provider::Provider,
    transport::{Body, Method},
    Error, Lookup, Record, Result, Schema, Value,
};

use indexmap::{IndexMap, IndexSet};
use std::sync::Arc;

/// Everything entities of one type share: the field layout and the provider
/// that persists them.
#[derive(Debug)]
pub struct EntityDef {
    schema: Schema,
    provider: Arc<dyn Provider>,
}

impl EntityDef {
    pub fn new(schema: Schema, provider: Arc<dyn Provider>) -> EntityDef {
        EntityDef { schema, provider }
    }

    pub fn name(&self) -> &'static str {
        self.schema.name()
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn provider(&self) -> &dyn Provider {
        &*self.provider
    }

    /// Returns `true` when entities of this type live under a parent.
    pub fn is_child(&self) -> bool {
        self.provider.capability().depth > 0
    }

    /// The identity chain a request for this type needs, given its parent.
    pub(crate) fn scope(&self, parent: Option<&ParentRef>) -> Result<Vec<Value>> {
        match (self.is_child(), parent) {
            (true, Some(parent)) => Ok(parent.scope()),
            (true, None) => Err(Error::missing_parent(self.name())),
            (false, None) => Ok(vec![]),
            (false, Some(_)) => Err(Error::unexpected_parent(self.name())),
        }
    }
}

/// One record of the backend, bound to its type definition.
///
/// Typed models such as [`User`](crate::models::User) wrap an `Entity` and
/// dereference to it. All mutating operations take `&mut self`, so at most
/// one request per instance can be in flight.
#[derive(Debug)]
pub struct Entity {
    def: Arc<EntityDef>,
    fields: Record,
    /// Names of fields assigned since the last successful create or update.
    changed: IndexSet<String>,
    state: EntityState,
    parent: Option<ParentRef>,
    /// Values owned by field managers rather than by the record.
    pub(crate) managed: IndexMap<String, Value>,
}

impl Entity {
    /// A new, unsaved entity holding the schema defaults.
    ///
    /// Fails when a declared default does not fit its field.
    pub fn new(def: Arc<EntityDef>) -> Result<Entity> {
        let fields = def.schema().defaults()?;

        Ok(Entity {
            def,
            fields,
            changed: IndexSet::new(),
            state: EntityState::Creating,
            parent: None,
            managed: IndexMap::new(),
        })
    }

    /// A new, unsaved child entity.
    pub fn with_parent(def: Arc<EntityDef>, parent: ParentRef) -> Result<Entity> {
        let mut entity = Entity::new(def)?;
        entity.parent = Some(parent);
        Ok(entity)
    }

    /// Builds a loaded entity from a caller-supplied record.
    ///
    /// Child entities need the record to carry their parent under
    /// [`PARENT_KEY`]; the key is consumed.
    pub fn deserialize(def: Arc<EntityDef>, mut record: Record) -> Result<Entity> {
        let parent = match record.shift_remove(PARENT_KEY) {
            Some(value) => Some(serde_json::from_value::<ParentRef>(value)?),
            None => None,
        };

        if def.is_child() && parent.is_none() {
            return Err(Error::missing_parent(def.name()));
        }

        let fields = def.schema().load(record)?;
        Ok(Entity::from_parts(def, fields, parent, EntityState::Loaded))
    }

    /// Builds an entity from a record the server sent.
    pub(crate) fn hydrate(
        def: Arc<EntityDef>,
        record: Record,
        parent: Option<ParentRef>,
        state: EntityState,
    ) -> Result<Entity> {
        let fields = load_from_server(&def, record)?;
        Ok(Entity::from_parts(def, fields, parent, state))
    }

    fn from_parts(
        def: Arc<EntityDef>,
        fields: Record,
        parent: Option<ParentRef>,
        state: EntityState,
    ) -> Entity {
        tracing::trace!(entity = def.name(), %state, "materialized entity");

        Entity {
            def,
            fields,
            changed: IndexSet::new(),
            state,
            parent,
            managed: IndexMap::new(),
        }
    }

    pub fn def(&self) -> &Arc<EntityDef> {
        &self.def
    }

    /// The entity type name, e.g. `user`.
    pub fn entity_name(&self) -> &'static str {
        self.def.name()
    }

    pub fn state(&self) -> EntityState {
        self.state
    }

    /// The server-assigned identity, once there is one.
    pub fn id(&self) -> Option<&Value> {
        self.get(crate::schema::ID_FIELD)
    }

    pub fn parent(&self) -> Option<&ParentRef> {
        self.parent.as_ref()
    }

    pub fn fields(&self) -> &Record {
        &self.fields
    }

    /// Returns a field value, treating `null` as absent.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name).filter(|value| !value.is_null())
    }

    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Names of fields with unsent edits, in assignment order.
    pub fn changed_fields(&self) -> impl Iterator<Item = &str> {
        self.changed.iter().map(String::as_str)
    }

    pub fn has_changes(&self) -> bool {
        !self.changed.is_empty()
    }

    /// Assigns a field after running it through the field's coercion.
    ///
    /// The identity and other read-only fields cannot be assigned, nor can
    /// fields that belong to a field manager.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<()> {
        if self.state == EntityState::Deleted {
            return Err(Error::invalid_state("modify", self.state));
        }

        let def = Arc::clone(&self.def);
        let Some(field) = def.schema().field(name) else {
            return Err(Error::field_validation(
                name,
                format!("`{}` entities have no such field", def.name()),
            ));
        };

        if field.is_read_only() {
            return Err(Error::field_validation(name, "this field is read-only"));
        }

        if field.is_managed() {
            return Err(Error::field_validation(
                name,
                "this field is managed; use its field manager",
            ));
        }

        let value = field.coerce(value.into())?;
        self.fields.insert(field.name().to_owned(), value);
        self.changed.insert(field.name().to_owned());

        if matches!(
            self.state,
            EntityState::Loaded | EntityState::Saved | EntityState::Found
        ) {
            self.transition(EntityState::Changed);
        }

        Ok(())
    }

    /// The field values as a plain record, without any parent reference.
    pub fn serialize(&self) -> Record {
        self.fields
            .iter()
            .filter(|(name, _)| *name != PARENT_KEY)
            .map(|(name, value)| (name.clone(), value.clone()))
            .collect()
    }

    /// A reference other entities can use as their parent.
    pub fn as_parent(&self) -> Result<ParentRef> {
        let Some(id) = self.id() else {
            return Err(Error::invalid_state("use as a parent", self.state));
        };

        Ok(ParentRef {
            id: id.clone(),
            ancestors: self
                .parent
                .as_ref()
                .map(ParentRef::scope)
                .unwrap_or_default(),
        })
    }

    /// Sends a new entity to the server.
    ///
    /// Local coercion runs first; nothing is sent when it fails. On success
    /// the server's record is merged in and the entity is `Saved`.
    pub async fn create(&mut self) -> Result<()> {
        let def = Arc::clone(&self.def);

        if def.provider().capability().read_only {
            return Err(Error::read_only(def.name(), "create"));
        }

        if self.state != EntityState::Creating {
            return Err(Error::invalid_state("create", self.state));
        }

        let scope = def.scope(self.parent.as_ref())?;
        let payload = self.creation_payload()?;

        tracing::debug!(entity = def.name(), "creating entity");
        let record = {
            let _pending = Pending::enter(&mut self.state);
            def.provider().create_entity(&scope, payload).await?
        };

        self.merge(load_from_server(&def, record)?);
        self.changed.clear();
        self.transition(EntityState::Saved);
        Ok(())
    }

    /// Sends the fields assigned since the last save.
    ///
    /// With nothing to send no request is made and the state is kept.
    pub async fn update(&mut self) -> Result<()> {
        let def = Arc::clone(&self.def);

        if def.provider().capability().read_only {
            return Err(Error::read_only(def.name(), "update"));
        }

        if !matches!(
            self.state,
            EntityState::Loaded | EntityState::Changed | EntityState::Saved
        ) {
            return Err(Error::invalid_state("update", self.state));
        }

        if self.changed.is_empty() {
            tracing::trace!(entity = def.name(), "nothing to update");
            return Ok(());
        }

        let id = self.require_id("update")?;
        let scope = def.scope(self.parent.as_ref())?;
        let payload: Record = self
            .changed
            .iter()
            .map(|name| {
                let value = self.fields.get(name).cloned().unwrap_or(Value::Null);
                (name.clone(), value)
            })
            .collect();

        tracing::debug!(entity = def.name(), %id, fields = payload.len(), "updating entity");
        let record = {
            let _pending = Pending::enter(&mut self.state);
            def.provider().update_entity(&scope, &id, payload).await?
        };

        let record = load_from_server(&def, record)?;
        self.changed.clear();
        self.merge(record);
        self.transition(EntityState::Saved);
        Ok(())
    }

    /// Removes the entity on the server. The instance becomes `Deleted`.
    pub async fn delete(&mut self) -> Result<()> {
        if matches!(self.state, EntityState::Creating | EntityState::Deleted) {
            return Err(Error::invalid_state("delete", self.state));
        }

        let def = Arc::clone(&self.def);
        let id = self.require_id("delete")?;
        let scope = def.scope(self.parent.as_ref())?;

        tracing::debug!(entity = def.name(), %id, "deleting entity");
        {
            let _pending = Pending::enter(&mut self.state);
            def.provider().delete_entity(&scope, &id).await?;
        }

        self.transition(EntityState::Deleted);
        Ok(())
    }

    /// Fetches the entity again, discarding unsent edits.
    pub async fn reload(&mut self) -> Result<()> {
        if !self.state.is_persisted() {
            return Err(Error::invalid_state("reload", self.state));
        }

        let def = Arc::clone(&self.def);
        let id = self.require_id("reload")?;
        let Some(lookup) = Lookup::from_value(&id) else {
            return Err(Error::invalid_state("reload", self.state));
        };
        let scope = def.scope(self.parent.as_ref())?;

        let record = {
            let _pending = Pending::enter(&mut self.state);
            def.provider().get_entity(&scope, &lookup).await?
        };

        self.fields = load_from_server(&def, record)?;
        self.changed.clear();
        self.transition(EntityState::Loaded);
        Ok(())
    }

    /// Issues a request on behalf of a field manager. The entity state is
    /// kept; only `Pending` is observed while the request is in flight.
    pub(crate) async fn field_request(
        &mut self,
        operation: &str,
        subpath: &str,
        method: Method,
        body: Body,
    ) -> Result<Value> {
        if !self.state.is_persisted() {
            return Err(Error::invalid_state(operation, self.state));
        }

        let def = Arc::clone(&self.def);
        let id = self.require_id(operation)?;
        let scope = def.scope(self.parent.as_ref())?;

        let _pending = Pending::enter(&mut self.state);
        def.provider()
            .field_request(&scope, &id, subpath, method, body)
            .await
    }

    /// Merges a partial record the server sent back after a field request.
    /// Fields with unsent local edits keep their local value.
    pub(crate) fn refresh(&mut self, body: Value) -> Result<()> {
        let record = match body {
            Value::Object(map) => map.into_iter().collect(),
            Value::Null => return Ok(()),
            _ => return Err(Error::invalid_response("expected a JSON object")),
        };

        let record = load_from_server(&self.def, record)?;
        for (name, value) in record {
            if !self.changed.contains(&name) {
                self.fields.insert(name, value);
            }
        }
        Ok(())
    }

    pub(crate) fn refresh_field(&mut self, name: &str, value: Value) {
        self.fields.insert(name.to_owned(), value);
    }

    /// Fields sent on create: everything assigned plus required fields, which
    /// fall back to their default.
    fn creation_payload(&self) -> Result<Record> {
        let mut payload = Record::new();

        for field in self.def.schema().fields() {
            if field.is_read_only() || field.is_managed() {
                continue;
            }

            let raw = if self.changed.contains(field.name()) {
                self.fields.get(field.name()).cloned().unwrap_or(Value::Null)
            } else if field.is_required() {
                Value::Null
            } else {
                continue;
            };

            payload.insert(field.name().to_owned(), field.coerce(raw)?);
        }

        Ok(payload)
    }

    fn merge(&mut self, record: Record) {
        for (name, value) in record {
            self.fields.insert(name, value);
        }
    }

    fn require_id(&self, operation: &str) -> Result<Value> {
        self.id()
            .cloned()
            .ok_or_else(|| Error::invalid_state(operation, format!("{} (no identity)", self.state)))
    }

    fn transition(&mut self, state: EntityState) {
        tracing::trace!(entity = self.def.name(), from = %self.state, to = %state, "state change");
        self.state = state;
    }
}

fn load_from_server(def: &EntityDef, record: Record) -> Result<Record> {
    def.schema().load(record).map_err(|err| {
        err.context(Error::invalid_response(format!(
            "malformed `{}` record",
            def.name()
        )))
    })
}
