#[macro_use]
mod errors;
mod engine;
mod options;
mod rel;

pub use crate::engine::data_types::{syntax, Decimal, NativeType, Operand, Tuple, Type, TYPE_NUM};
pub use crate::engine::execution::{OperatorVector, Runner};
pub use crate::errors::{QueryError, QueryResult};
pub use crate::options::Options;
pub use crate::rel::{Agg, BoxedAgg, BoxedRelOp, RelOp, RelRunner};

#[doc(hidden)]
pub use crate::engine::codec;
