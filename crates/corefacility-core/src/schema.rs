mod constraint;
pub use constraint::{
    Constraint, ConstraintChoices, ConstraintCustom, ConstraintLength, ConstraintRange, Validate,
};

mod field;
pub use field::{Field, FieldTy, ManagedKind};

use crate::{Record, Value};

use indexmap::IndexMap;

/// Name of the identity field every entity carries.
pub const ID_FIELD: &str = "id";

/// The ordered field descriptors of one entity type.
///
/// A schema is built once per entity type and shared by every instance of it.
#[derive(Debug, Clone)]
pub struct Schema {
    name: &'static str,
    fields: IndexMap<&'static str, Field>,
}

impl Schema {
    /// Creates a schema. A read-only `id` field is added in front unless the
    /// caller declared one.
    pub fn new(name: &'static str, fields: impl IntoIterator<Item = Field>) -> Schema {
        let mut by_name = IndexMap::new();
        by_name.insert(ID_FIELD, Field::id(ID_FIELD).read_only());

        for field in fields {
            by_name.insert(field.name(), field);
        }

        Schema {
            name,
            fields: by_name,
        }
    }

    /// The entity type name, e.g. `user`.
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.fields.values()
    }

    /// The value set of a freshly constructed entity: every field that
    /// declares a default, coerced like an assigned value.
    pub fn defaults(&self) -> crate::Result<Record> {
        self.fields()
            .filter_map(|field| field.default_value().map(|value| (field, value)))
            .map(|(field, value)| {
                field
                    .coerce(value.clone())
                    .map(|value| (field.name().to_owned(), value))
            })
            .collect()
    }

    /// Coerces a record that came from the server. Field types are enforced;
    /// keys the schema does not know are kept verbatim.
    pub fn load(&self, record: Record) -> crate::Result<Record> {
        record
            .into_iter()
            .map(|(name, value)| {
                let value: Value = match self.field(&name) {
                    Some(field) => field.load(value)?,
                    None => value,
                };
                Ok((name, value))
            })
            .collect()
    }
}
