use thiserror::Error;

use crate::engine::data_types::Type;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Unknown code in expression, bytes: {}", hex::encode_upper(.0))]
    UnknownCode(Vec<u8>),
    #[error("Instruction runs past end of code, bytes: {}", hex::encode_upper(.0))]
    Truncated(Vec<u8>),
    #[error("String constant is not valid utf-8, bytes: {}", hex::encode_upper(.0))]
    InvalidString(Vec<u8>),
    #[error("Value exceeds limits of type {0}")]
    Overflow(Type),
    #[error("Cannot cast \"{value}\" to {target}")]
    InvalidCast { value: String, target: Type },
    #[error("Indexed variable read without a bound tuple")]
    UnboundTuple,
    #[error("Some assumption was violated. This is a bug: {0}")]
    FatalError(String),
}

pub type QueryResult<T> = Result<T, QueryError>;

#[macro_export]
macro_rules! fatal {
    ($e:expr) => {
        $crate::QueryError::FatalError($e.to_owned())
    };
    ($fmt:expr, $($arg:tt)+) => {
        $crate::QueryError::FatalError(format!($fmt, $($arg)+))
    };
}

#[macro_export]
macro_rules! bail {
    ($kind:expr, $e:expr) => {
        return Err($kind($e.to_owned()))
    };
    ($kind:expr, $fmt:expr, $($arg:tt)+) => {
        return Err($kind(format!($fmt, $($arg)+)))
    };
}
