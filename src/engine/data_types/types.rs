use std::fmt;

use serde::{Deserialize, Serialize};

pub const TYPE_NUM: usize = 8;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Type {
    Null = 0,
    Int32 = 1,
    Int64 = 2,
    Bool = 3,
    Float32 = 4,
    Float64 = 5,
    Decimal = 6,
    String = 7,
}

impl Type {
    pub const ALL: [Type; TYPE_NUM] = [
        Type::Null,
        Type::Int32,
        Type::Int64,
        Type::Bool,
        Type::Float32,
        Type::Float64,
        Type::Decimal,
        Type::String,
    ];

    /// Type tags occupy the low nibble of an instruction byte.
    pub fn from_code(code: u8) -> Option<Type> {
        Type::ALL.get(code as usize).copied()
    }

    pub fn code(self) -> u8 { self as u8 }

    pub fn index(self) -> usize { self as usize }

    pub fn name(self) -> &'static str {
        match self {
            Type::Null => "NULL",
            Type::Int32 => "INT32",
            Type::Int64 => "INT64",
            Type::Bool => "BOOL",
            Type::Float32 => "FLOAT",
            Type::Float64 => "DOUBLE",
            Type::Decimal => "DECIMAL",
            Type::String => "STRING",
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
