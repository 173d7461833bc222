use indexmap::IndexMap;

use std::fmt;

pub use serde_json::Value;

/// The raw field values of one entity, in the order the server sent them.
pub type Record = IndexMap<String, Value>;

/// Identifies a single entity on the server: corefacility resources can be
/// addressed by numeric id or by alias.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Lookup {
    Id(i64),
    Alias(String),
}

impl Lookup {
    /// Builds a lookup from an identity value as it appears in a record.
    pub fn from_value(value: &Value) -> Option<Lookup> {
        match value {
            Value::Number(number) => number.as_i64().map(Lookup::Id),
            Value::String(alias) if !alias.is_empty() => Some(Lookup::Alias(alias.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Id(id) => write!(f, "{id}"),
            Lookup::Alias(alias) => f.write_str(alias),
        }
    }
}

impl From<i64> for Lookup {
    fn from(id: i64) -> Lookup {
        Lookup::Id(id)
    }
}

impl From<i32> for Lookup {
    fn from(id: i32) -> Lookup {
        Lookup::Id(id.into())
    }
}

impl From<&str> for Lookup {
    fn from(alias: &str) -> Lookup {
        Lookup::Alias(alias.to_owned())
    }
}

impl From<String> for Lookup {
    fn from(alias: String) -> Lookup {
        Lookup::Alias(alias)
    }
}

/// Search parameters for a list request, sent as the URL query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    params: Vec<(String, String)>,
}

impl Query {
    pub fn new() -> Query {
        Query::default()
    }

    /// Adds a parameter. Repeated names are kept and sent in order.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Query {
        self.params.push((name.into(), value.to_string()));
        self
    }

    /// Full-text search term understood by every list endpoint.
    pub fn search(self, term: impl Into<String>) -> Query {
        self.param("q", term.into())
    }

    /// Asks the server for the light-weight representation of each item.
    pub fn basic_profile(self) -> Query {
        self.param("profile", "basic")
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// The `application/x-www-form-urlencoded` form, used as a cache key.
impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.iter())
            .finish();
        f.write_str(&encoded)
    }
}
