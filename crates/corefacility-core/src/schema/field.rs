use super::{Constraint, ConstraintChoices, ConstraintLength, ConstraintRange, Validate};
use crate::{Error, Result, Value};

/// Value type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTy {
    Boolean,
    Integer,
    Float,
    String,
    /// Identity of another entity: a non-negative integer.
    Id,
    /// Any JSON value, accepted verbatim.
    Json,
    /// A value owned by a field manager rather than by the entity's save
    /// cycle.
    Managed(ManagedKind),
}

/// The kinds of values that need their own server round trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagedKind {
    /// Uploaded through a multipart request, cleared with `DELETE`.
    File,
    /// Generated by the server on request.
    Password,
}

/// Descriptor of one entity attribute.
///
/// Fields are built once with the consuming builder methods below and are
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct Field {
    name: &'static str,
    ty: FieldTy,
    required: bool,
    read_only: bool,
    default: Option<Value>,
    constraints: Vec<Constraint>,
    description: Option<&'static str>,
}

impl Field {
    pub fn new(name: &'static str, ty: FieldTy) -> Field {
        Field {
            name,
            ty,
            required: false,
            read_only: false,
            default: None,
            constraints: Vec::new(),
            description: None,
        }
    }

    pub fn boolean(name: &'static str) -> Field {
        Field::new(name, FieldTy::Boolean)
    }

    pub fn integer(name: &'static str) -> Field {
        Field::new(name, FieldTy::Integer)
    }

    pub fn float(name: &'static str) -> Field {
        Field::new(name, FieldTy::Float)
    }

    pub fn string(name: &'static str) -> Field {
        Field::new(name, FieldTy::String)
    }

    pub fn id(name: &'static str) -> Field {
        Field::new(name, FieldTy::Id)
    }

    pub fn json(name: &'static str) -> Field {
        Field::new(name, FieldTy::Json)
    }

    pub fn file(name: &'static str) -> Field {
        Field::new(name, FieldTy::Managed(ManagedKind::File))
    }

    pub fn password(name: &'static str) -> Field {
        Field::new(name, FieldTy::Managed(ManagedKind::Password))
    }

    pub fn required(mut self) -> Field {
        self.required = true;
        self
    }

    pub fn read_only(mut self) -> Field {
        self.read_only = true;
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Field {
        self.default = Some(value.into());
        self
    }

    pub fn description(mut self, description: &'static str) -> Field {
        self.description = Some(description);
        self
    }

    /// Appends a constraint. Constraints run in the order they were added.
    pub fn constraint(mut self, constraint: impl Into<Constraint>) -> Field {
        self.constraints.push(constraint.into());
        self
    }

    /// Inclusive numeric bounds.
    pub fn range(self, min: i64, max: i64) -> Field {
        self.constraint(ConstraintRange {
            min: Some(min as f64),
            max: Some(max as f64),
        })
    }

    pub fn min_value(self, min: impl Into<f64>) -> Field {
        self.constraint(ConstraintRange {
            min: Some(min.into()),
            max: None,
        })
    }

    pub fn max_value(self, max: impl Into<f64>) -> Field {
        self.constraint(ConstraintRange {
            min: None,
            max: Some(max.into()),
        })
    }

    /// Inclusive bounds on the number of characters.
    pub fn length(self, min: usize, max: usize) -> Field {
        self.constraint(ConstraintLength {
            min: Some(min),
            max: Some(max),
        })
    }

    pub fn max_length(self, max: usize) -> Field {
        self.constraint(ConstraintLength {
            min: None,
            max: Some(max),
        })
    }

    pub fn choices<I, V>(self, choices: I) -> Field
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.constraint(ConstraintChoices {
            choices: choices.into_iter().map(Into::into).collect(),
        })
    }

    /// Attaches a custom check. `name` only shows up in debug output.
    pub fn validate(self, name: &'static str, validator: impl Validate) -> Field {
        self.constraint(Constraint::custom(name, validator))
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn ty(&self) -> FieldTy {
        self.ty
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    pub fn is_managed(&self) -> bool {
        matches!(self.ty, FieldTy::Managed(_))
    }

    pub fn managed_kind(&self) -> Option<ManagedKind> {
        match self.ty {
            FieldTy::Managed(kind) => Some(kind),
            _ => None,
        }
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    pub fn get_description(&self) -> Option<&'static str> {
        self.description
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Validates and normalizes a value about to be assigned to this field.
    ///
    /// `null` resolves to the default when there is one; otherwise required
    /// fields reject it. Non-null values are converted to the field's type and
    /// then checked against each constraint in order; the first rejection is
    /// the error returned.
    pub fn coerce(&self, raw: Value) -> Result<Value> {
        if raw.is_null() {
            if !self.required {
                return Ok(Value::Null);
            }
            return match &self.default {
                Some(default) if !default.is_null() => {
                    self.ty.coerce(self.name, default.clone())
                }
                _ => Err(Error::field_validation(self.name, "this field is required")),
            };
        }

        let value = self.ty.coerce(self.name, raw)?;

        for constraint in &self.constraints {
            constraint.check(self.name, &value)?;
        }

        Ok(value)
    }

    /// Converts a value that came from the server. Only the type is enforced.
    pub fn load(&self, raw: Value) -> Result<Value> {
        if raw.is_null() {
            return Ok(Value::Null);
        }
        self.ty.coerce(self.name, raw)
    }
}

impl FieldTy {
    fn coerce(&self, field: &str, raw: Value) -> Result<Value> {
        match self {
            FieldTy::Boolean => match raw {
                Value::Bool(_) => Ok(raw),
                Value::String(ref text) if text == "true" => Ok(Value::Bool(true)),
                Value::String(ref text) if text == "false" => Ok(Value::Bool(false)),
                _ => Err(Error::field_validation(field, "must be a boolean")),
            },
            FieldTy::Integer => as_integer(&raw)
                .map(Value::from)
                .ok_or_else(|| Error::field_validation(field, "a valid integer is required")),
            FieldTy::Float => {
                let number = match &raw {
                    Value::Number(number) => number.as_f64(),
                    Value::String(text) => text.trim().parse::<f64>().ok(),
                    _ => None,
                };
                number
                    .and_then(serde_json::Number::from_f64)
                    .map(Value::Number)
                    .ok_or_else(|| Error::field_validation(field, "a valid number is required"))
            }
            FieldTy::String => match raw {
                Value::String(_) => Ok(raw),
                _ => Err(Error::field_validation(field, "not a valid string")),
            },
            FieldTy::Id => match as_integer(&raw) {
                Some(id) if id >= 0 => Ok(Value::from(id)),
                _ => Err(Error::field_validation(field, "not a valid identifier")),
            },
            FieldTy::Json => Ok(raw),
            FieldTy::Managed(_) => match raw {
                Value::String(_) => Ok(raw),
                _ => Err(Error::field_validation(field, "not a valid string")),
            },
        }
    }
}

fn as_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(number) => number.as_i64().or_else(|| {
            number
                .as_f64()
                .filter(|float| float.fract() == 0.0 && float.abs() < i64::MAX as f64)
                .map(|float| float as i64)
        }),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
