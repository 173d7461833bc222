mod choices;
pub use choices::ConstraintChoices;

mod custom;
pub use custom::{ConstraintCustom, Validate};

mod length;
pub use length::ConstraintLength;

mod range;
pub use range::ConstraintRange;

use crate::{Result, Value};

#[derive(Debug, Clone)]
pub enum Constraint {
    Choices(ConstraintChoices),
    Custom(ConstraintCustom),
    Length(ConstraintLength),
    Range(ConstraintRange),
}

impl Constraint {
    pub fn custom(name: &'static str, validator: impl Validate) -> Self {
        ConstraintCustom::new(name, validator).into()
    }

    /// Checks an already type-coerced value. `field` names the field in the
    /// returned validation error.
    pub fn check(&self, field: &str, value: &Value) -> Result<()> {
        match self {
            Constraint::Choices(choices) => choices.check(field, value),
            Constraint::Custom(custom) => custom.check(field, value),
            Constraint::Length(length) => length.check(field, value),
            Constraint::Range(range) => range.check(field, value),
        }
    }
}
