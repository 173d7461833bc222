use crate::{Record, Result, Value};

use serde::{Deserialize, Serialize};

/// Record key that carries the parent of a child entity.
pub const PARENT_KEY: &str = "parent";

/// Snapshot of the entity a child entity lives under.
///
/// Only identities are kept: a child never observes later edits of its
/// parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentRef {
    /// Identity of the direct parent.
    pub id: Value,

    /// Identities of the parent's own ancestors, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<Value>,
}

impl ParentRef {
    pub fn new(id: impl Into<Value>) -> ParentRef {
        ParentRef {
            id: id.into(),
            ancestors: vec![],
        }
    }

    /// The full identity chain used to fill a route template.
    pub fn scope(&self) -> Vec<Value> {
        let mut scope = self.ancestors.clone();
        scope.push(self.id.clone());
        scope
    }

    /// Stores this reference under [`PARENT_KEY`] so the record can be passed
    /// back to `deserialize`.
    pub fn attach(&self, record: &mut Record) -> Result<()> {
        record.insert(PARENT_KEY.to_owned(), serde_json::to_value(self)?);
        Ok(())
    }
}
