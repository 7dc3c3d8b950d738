//! Values carried on the result stack.

use serde::{Deserialize, Serialize};

use crate::core::{EntityId, SimError, SimResult};

/// A value produced by one instruction and consumed as an argument by a
/// later one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Value {
    /// No result. Also the outcome of choosing from an empty candidate list.
    Nothing,
    Int(i64),
    Entity(EntityId),
    Entities(Vec<EntityId>),
}

impl Value {
    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Nothing => "nothing",
            Value::Int(_) => "integer",
            Value::Entity(_) => "entity",
            Value::Entities(_) => "entity list",
        }
    }

    /// Read an integer argument.
    pub fn as_int(&self, instruction: &'static str) -> SimResult<i64> {
        match self {
            Value::Int(n) => Ok(*n),
            other => Err(mismatch(instruction, "integer", other)),
        }
    }

    /// Read an entity argument. `Nothing` reads as `None`.
    pub fn as_entity(&self, instruction: &'static str) -> SimResult<Option<EntityId>> {
        match self {
            Value::Entity(id) => Ok(Some(*id)),
            Value::Nothing => Ok(None),
            other => Err(mismatch(instruction, "entity", other)),
        }
    }

    /// Read an entity list argument. `Nothing` reads as an empty list.
    pub fn as_entities(&self, instruction: &'static str) -> SimResult<&[EntityId]> {
        match self {
            Value::Entities(ids) => Ok(ids),
            Value::Nothing => Ok(&[]),
            other => Err(mismatch(instruction, "entity list", other)),
        }
    }
}

fn mismatch(instruction: &'static str, expected: &'static str, found: &Value) -> SimError {
    SimError::ArgumentType {
        instruction,
        expected,
        found: found.kind().to_string(),
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<EntityId> for Value {
    fn from(id: EntityId) -> Self {
        Value::Entity(id)
    }
}

impl From<Vec<EntityId>> for Value {
    fn from(ids: Vec<EntityId>) -> Self {
        Value::Entities(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        assert_eq!(Value::Int(3).as_int("Test").unwrap(), 3);
        assert_eq!(Value::Entity(EntityId(4)).as_entity("Test").unwrap(), Some(EntityId(4)));
        assert_eq!(Value::Nothing.as_entity("Test").unwrap(), None);
        assert!(Value::Nothing.as_entities("Test").unwrap().is_empty());
    }

    #[test]
    fn test_type_mismatch() {
        let err = Value::Entity(EntityId(2)).as_int("DealDamage").unwrap_err();
        assert_eq!(err.to_string(), "DealDamage expected integer, found entity");
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(5), Value::Int(5));
        assert_eq!(Value::from(EntityId(1)), Value::Entity(EntityId(1)));
        assert_eq!(
            Value::from(vec![EntityId(1), EntityId(2)]),
            Value::Entities(vec![EntityId(1), EntityId(2)])
        );
    }
}
