use super::Constraint;

use crate::{Error, Result, Value};

#[derive(Debug, Clone)]
pub struct ConstraintLength {
    /// The minimum number of characters.
    pub min: Option<usize>,

    /// The maximum number of characters.
    pub max: Option<usize>,
}

impl ConstraintLength {
    pub(crate) fn check(&self, field: &str, value: &Value) -> Result<()> {
        let Some(text) = value.as_str() else {
            return Ok(());
        };

        let len = text.chars().count();

        if let Some(min) = self.min {
            if len < min {
                return Err(Error::field_validation(
                    field,
                    format!("ensure this field has at least {min} characters"),
                ));
            }
        }

        if let Some(max) = self.max {
            if len > max {
                return Err(Error::field_validation(
                    field,
                    format!("ensure this field has no more than {max} characters"),
                ));
            }
        }

        Ok(())
    }
}

impl From<ConstraintLength> for Constraint {
    fn from(length: ConstraintLength) -> Self {
        Constraint::Length(length)
    }
}
