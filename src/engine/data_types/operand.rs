use std::fmt;

use itertools::Itertools;
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::engine::data_types::{Decimal, Type};

/// One nullable scalar. Equality, ordering and hashing are structural, which makes
/// tuples usable as group keys.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Hash, Serialize, Deserialize)]
pub enum Operand {
    Null,
    Int32(i32),
    Int64(i64),
    Bool(bool),
    Float32(OrderedFloat<f32>),
    Float64(OrderedFloat<f64>),
    Decimal(Decimal),
    String(String),
}

/// One row.
pub type Tuple = Vec<Operand>;

impl Operand {
    pub fn get_type(&self) -> Type {
        match *self {
            Operand::Null => Type::Null,
            Operand::Int32(_) => Type::Int32,
            Operand::Int64(_) => Type::Int64,
            Operand::Bool(_) => Type::Bool,
            Operand::Float32(_) => Type::Float32,
            Operand::Float64(_) => Type::Float64,
            Operand::Decimal(_) => Type::Decimal,
            Operand::String(_) => Type::String,
        }
    }

    pub fn is_null(&self) -> bool {
        *self == Operand::Null
    }

    pub fn display_tuple(tuple: &[Operand]) -> String {
        format!("({})", tuple.iter().join(", "))
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Operand::Null => write!(f, "null"),
            Operand::Int32(i) => write!(f, "{}", i),
            Operand::Int64(i) => write!(f, "{}L", i),
            Operand::Bool(b) => write!(f, "{}", b),
            Operand::Float32(x) => write!(f, "{}f", x),
            Operand::Float64(x) => write!(f, "{}", x),
            Operand::Decimal(ref d) => write!(f, "{}M", d),
            Operand::String(ref s) => write!(f, "\"{}\"", s),
        }
    }
}

pub mod syntax {
    pub use super::Operand::{Bool, Int32, Int64, Null};

    #[allow(non_snake_case)]
    pub fn Str(s: &str) -> super::Operand {
        super::Operand::String(s.to_string())
    }

    #[allow(non_snake_case)]
    pub fn Dec(s: &str) -> super::Operand {
        match super::Decimal::parse(s) {
            Ok(d) => super::Operand::Decimal(d),
            Err(_) => super::Operand::Null,
        }
    }
}

impl From<i32> for Operand {
    fn from(val: i32) -> Self { Operand::Int32(val) }
}

impl From<i64> for Operand {
    fn from(val: i64) -> Self { Operand::Int64(val) }
}

impl From<bool> for Operand {
    fn from(val: bool) -> Self { Operand::Bool(val) }
}

impl From<f32> for Operand {
    fn from(val: f32) -> Self { Operand::Float32(OrderedFloat(val)) }
}

impl From<f64> for Operand {
    fn from(val: f64) -> Self { Operand::Float64(OrderedFloat(val)) }
}

impl From<Decimal> for Operand {
    fn from(val: Decimal) -> Self { Operand::Decimal(val) }
}

impl From<String> for Operand {
    fn from(val: String) -> Self { Operand::String(val) }
}

impl<'a> From<&'a str> for Operand {
    fn from(val: &str) -> Self { Operand::String(val.to_string()) }
}

impl From<()> for Operand {
    fn from(_: ()) -> Self { Operand::Null }
}

impl<T: Into<Operand>> From<Option<T>> for Operand {
    fn from(val: Option<T>) -> Self {
        match val {
            Some(val) => val.into(),
            None => Operand::Null,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::*;

    fn hash(tuple: &Tuple) -> u64 {
        let mut hasher = DefaultHasher::new();
        tuple.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn tuples_compare_by_value() {
        let a: Tuple = vec![1.into(), "abc".into(), Operand::Null];
        let b: Tuple = vec![1.into(), String::from("abc").into(), ().into()];
        assert_eq!(a, b);
        assert_eq!(hash(&a), hash(&b));
        assert_ne!(a, vec![1.into(), "abd".into(), Operand::Null]);
    }

    #[test]
    fn types() {
        assert_eq!(Operand::from(1i64).get_type(), Type::Int64);
        assert_eq!(Operand::from(1.5f32).get_type(), Type::Float32);
        assert_eq!(Operand::from(None::<i32>).get_type(), Type::Null);
        assert!(Operand::from(None::<String>).is_null());
    }

    #[test]
    fn display() {
        let row: Tuple = vec![2.into(), "Betty".into(), 60f32.into(), Operand::Null];
        assert_eq!(Operand::display_tuple(&row), "(2, \"Betty\", 60f, null)");
    }

    #[test]
    fn serde_round_trip() {
        let row: Tuple = vec![
            7i64.into(),
            true.into(),
            2.5f32.into(),
            syntax::Dec("12.34"),
            "x".into(),
            Operand::Null,
        ];
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(serde_json::from_str::<Tuple>(&json).unwrap(), row);
    }
}
