use super::Constraint;

use crate::{Error, Result, Value};

#[derive(Debug, Clone)]
pub struct ConstraintChoices {
    /// The values the field may take.
    pub choices: Vec<Value>,
}

impl ConstraintChoices {
    pub(crate) fn check(&self, field: &str, value: &Value) -> Result<()> {
        if self.choices.contains(value) {
            Ok(())
        } else {
            Err(Error::field_validation(
                field,
                format!("{value} is not a valid choice"),
            ))
        }
    }
}

impl From<ConstraintChoices> for Constraint {
    fn from(choices: ConstraintChoices) -> Self {
        Constraint::Choices(choices)
    }
}
