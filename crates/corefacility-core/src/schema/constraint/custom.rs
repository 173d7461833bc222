use super::Constraint;

use crate::{Error, Result, Value};

use std::{fmt, sync::Arc};

/// A caller-supplied check. The returned message is shown next to the field.
pub trait Validate: Send + Sync + 'static {
    fn validate(&self, value: &Value) -> std::result::Result<(), String>;
}

impl<F> Validate for F
where
    F: Fn(&Value) -> std::result::Result<(), String> + Send + Sync + 'static,
{
    fn validate(&self, value: &Value) -> std::result::Result<(), String> {
        self(value)
    }
}

#[derive(Clone)]
pub struct ConstraintCustom {
    name: &'static str,
    validator: Arc<dyn Validate>,
}

impl ConstraintCustom {
    pub fn new(name: &'static str, validator: impl Validate) -> Self {
        ConstraintCustom {
            name,
            validator: Arc::new(validator),
        }
    }

    pub(crate) fn check(&self, field: &str, value: &Value) -> Result<()> {
        self.validator
            .validate(value)
            .map_err(|message| Error::field_validation(field, message))
    }
}

impl fmt::Debug for ConstraintCustom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ConstraintCustom").field(&self.name).finish()
    }
}

impl From<ConstraintCustom> for Constraint {
    fn from(custom: ConstraintCustom) -> Self {
        Constraint::Custom(custom)
    }
}
