//! Custom scalar and enum adapters

use async_graphql::{Enum, InputValueError, InputValueResult, Scalar, ScalarType, Value};
use uuid::Uuid;

/// `UUID` scalar. Accepts only the hyphenated 36-character form and always
/// serializes the lowercase hyphenated form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UuidScalar(pub Uuid);

impl UuidScalar {
    pub fn parse_literal(s: &str) -> Result<Self, String> {
        if s.len() != 36 {
            return Err(format!("invalid UUID literal \"{}\": expected 36 characters", s));
        }
        Uuid::try_parse(s)
            .map(Self)
            .map_err(|e| format!("invalid UUID literal \"{}\": {}", s, e))
    }
}

#[Scalar(name = "UUID")]
impl ScalarType for UuidScalar {
    fn parse(value: Value) -> InputValueResult<Self> {
        match &value {
            Value::String(s) => Self::parse_literal(s).map_err(InputValueError::custom),
            _ => Err(InputValueError::expected_type(value)),
        }
    }

    fn is_valid(value: &Value) -> bool {
        matches!(value, Value::String(s) if Self::parse_literal(s).is_ok())
    }

    fn to_value(&self) -> Value {
        Value::String(self.0.hyphenated().to_string())
    }
}

impl From<Uuid> for UuidScalar {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<UuidScalar> for Uuid {
    fn from(id: UuidScalar) -> Self {
        id.0
    }
}

/// Membership tier identifiers as exposed over GraphQL
#[derive(Enum, Debug, Clone, Copy, PartialEq, Eq)]
#[graphql(name = "MemberTypeId", remote = "crate::domain::MemberTypeId")]
pub enum MemberTypeIdGql {
    #[graphql(name = "basic")]
    Basic,
    #[graphql(name = "business")]
    Business,
}
