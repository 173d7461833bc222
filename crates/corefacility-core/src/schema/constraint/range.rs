use super::Constraint;

use crate::{Error, Result, Value};

/// Inclusive numeric bounds.
#[derive(Debug, Clone)]
pub struct ConstraintRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ConstraintRange {
    pub(crate) fn check(&self, field: &str, value: &Value) -> Result<()> {
        let Some(number) = value.as_f64() else {
            return Ok(());
        };

        if let Some(min) = self.min {
            if number < min {
                return Err(Error::field_validation(
                    field,
                    format!("ensure this value is greater than or equal to {min}"),
                ));
            }
        }

        if let Some(max) = self.max {
            if number > max {
                return Err(Error::field_validation(
                    field,
                    format!("ensure this value is less than or equal to {max}"),
                ));
            }
        }

        Ok(())
    }
}

impl From<ConstraintRange> for Constraint {
    fn from(range: ConstraintRange) -> Self {
        Constraint::Range(range)
    }
}
