//! Resolved values and the type tags that drive coercion.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Type tag attached to a declaration.
///
/// Tags are decided at registration time and drive coercion of raw override
/// strings; nothing is discovered by inspecting values at access time.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeTag {
    /// Boolean with textual spellings (true/false, 1/0, yes/no, on/off)
    Bool,
    /// Signed 64-bit integer
    Int,
    /// 64-bit float; integer-looking strings widen
    Float,
    /// Raw string, no transformation
    Str,
    /// JSON array
    List,
    /// JSON object
    Map,
    /// ISO-8601 datetime without timezone (offsets are normalized away)
    DateTime,
    /// ISO-8601 calendar date
    Date,
    /// ISO-8601 time of day
    Time,
    /// Arbitrary-precision decimal, exact textual precision preserved
    Decimal,
    /// UUID in hyphenated, simple, braced, or URN form
    Uuid,
    /// `T` or absent; the literal string "none" coerces to [`Value::None`]
    Optional(Box<TypeTag>),
    /// Members attempted in declaration order; first success wins
    Union(Vec<TypeTag>),
    /// User type constructible from a string
    Custom(CustomType),
}

impl TypeTag {
    /// Human-readable name used in error messages.
    pub fn name(&self) -> String {
        match self {
            TypeTag::Bool => "bool".to_string(),
            TypeTag::Int => "int".to_string(),
            TypeTag::Float => "float".to_string(),
            TypeTag::Str => "str".to_string(),
            TypeTag::List => "list".to_string(),
            TypeTag::Map => "map".to_string(),
            TypeTag::DateTime => "datetime".to_string(),
            TypeTag::Date => "date".to_string(),
            TypeTag::Time => "time".to_string(),
            TypeTag::Decimal => "decimal".to_string(),
            TypeTag::Uuid => "uuid".to_string(),
            TypeTag::Optional(inner) => format!("optional<{}>", inner.name()),
            TypeTag::Union(members) => {
                let names: Vec<String> = members.iter().map(TypeTag::name).collect();
                format!("union<{}>", names.join("|"))
            }
            TypeTag::Custom(custom) => custom.name.to_string(),
        }
    }
}

/// Hook for user-defined types constructible from a string.
///
/// The parse function receives the raw override string and returns any
/// [`Value`] variant; a returned error message is wrapped in a
/// [`CoercionError`](crate::CoercionError) by the engine.
#[derive(Clone, Copy)]
pub struct CustomType {
    /// Type name used in error messages
    pub name: &'static str,
    /// Conversion from the raw override string
    pub parse: fn(&str) -> Result<Value, String>,
}

impl fmt::Debug for CustomType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CustomType").field("name", &self.name).finish()
    }
}

impl PartialEq for CustomType {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

/// A resolved settings value: either a coerced override or a declared default.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Absent value for optional and uninitialized settings
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<serde_json::Value>),
    Map(serde_json::Map<String, serde_json::Value>),
    DateTime(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    Decimal(Decimal),
    Uuid(Uuid),
}

impl Value {
    /// Name of this value's runtime type, for error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "none",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Map(_) => "map",
            Value::DateTime(_) => "datetime",
            Value::Date(_) => "date",
            Value::Time(_) => "time",
            Value::Decimal(_) => "decimal",
            Value::Uuid(_) => "uuid",
        }
    }

    /// Whether this is the absent value.
    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Float view of the value; integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            Value::Int(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[serde_json::Value]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&serde_json::Map<String, serde_json::Value>> {
        match self {
            Value::Map(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_datetime(&self) -> Option<NaiveDateTime> {
        match self {
            Value::DateTime(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Value::Date(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<NaiveTime> {
        match self {
            Value::Time(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Value::Decimal(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            Value::Uuid(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this value is a legal inhabitant of `tag`.
    ///
    /// Used to validate declared defaults eagerly when the registry is
    /// built. `Value::None` only matches `Optional`; a custom tag accepts
    /// any value since the parse function owns the invariant.
    pub(crate) fn matches(&self, tag: &TypeTag) -> bool {
        match (tag, self) {
            (TypeTag::Optional(_), Value::None) => true,
            (TypeTag::Optional(inner), value) => value.matches(inner),
            (TypeTag::Union(members), value) => members.iter().any(|m| value.matches(m)),
            (TypeTag::Custom(_), _) => true,
            (TypeTag::Bool, Value::Bool(_)) => true,
            (TypeTag::Int, Value::Int(_)) => true,
            (TypeTag::Float, Value::Float(_)) => true,
            (TypeTag::Str, Value::Str(_)) => true,
            (TypeTag::List, Value::List(_)) => true,
            (TypeTag::Map, Value::Map(_)) => true,
            (TypeTag::DateTime, Value::DateTime(_)) => true,
            (TypeTag::Date, Value::Date(_)) => true,
            (TypeTag::Time, Value::Time(_)) => true,
            (TypeTag::Decimal, Value::Decimal(_)) => true,
            (TypeTag::Uuid, Value::Uuid(_)) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => write!(f, "none"),
            Value::Bool(v) => write!(f, "{v}"),
            Value::Int(v) => write!(f, "{v}"),
            Value::Float(v) => write!(f, "{v}"),
            Value::Str(v) => write!(f, "{v}"),
            Value::List(v) => {
                let rendered = serde_json::to_string(v).map_err(|_| fmt::Error)?;
                write!(f, "{rendered}")
            }
            Value::Map(v) => {
                let rendered = serde_json::to_string(v).map_err(|_| fmt::Error)?;
                write!(f, "{rendered}")
            }
            Value::DateTime(v) => write!(f, "{v}"),
            Value::Date(v) => write!(f, "{v}"),
            Value::Time(v) => write!(f, "{v}"),
            Value::Decimal(v) => write!(f, "{v}"),
            Value::Uuid(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::None => serializer.serialize_none(),
            Value::Bool(v) => serializer.serialize_bool(*v),
            Value::Int(v) => serializer.serialize_i64(*v),
            Value::Float(v) => serializer.serialize_f64(*v),
            Value::Str(v) => serializer.serialize_str(v),
            Value::List(v) => v.serialize(serializer),
            Value::Map(v) => v.serialize(serializer),
            Value::DateTime(v) => v.serialize(serializer),
            Value::Date(v) => v.serialize(serializer),
            Value::Time(v) => v.serialize(serializer),
            Value::Decimal(v) => Serialize::serialize(v, serializer),
            Value::Uuid(v) => v.serialize(serializer),
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(v as i64)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32, usize);

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(v as f64)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<Vec<serde_json::Value>> for Value {
    fn from(v: Vec<serde_json::Value>) -> Self {
        Value::List(v)
    }
}

impl From<serde_json::Map<String, serde_json::Value>> for Value {
    fn from(v: serde_json::Map<String, serde_json::Value>) -> Self {
        Value::Map(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Value::DateTime(v)
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Value::Date(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Value::Time(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Value::Decimal(v)
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Value::Uuid(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::None,
        }
    }
}
