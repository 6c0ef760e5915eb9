use std::fmt;

use ordered_float::OrderedFloat;

use crate::engine::data_types::{Decimal, Operand, Type};
use crate::errors::*;

/// Rust representation behind a type tag. `Option<Self>` is the nullable wrapper.
pub trait NativeType: Clone + fmt::Debug + Send + Sync + 'static {
    fn t() -> Type;
    fn wrap(self) -> Operand;
    /// Null operands unwrap to `None`, operands of another type are a contract violation.
    fn unwrap(op: Operand) -> QueryResult<Option<Self>>;

    fn wrap_opt(val: Option<Self>) -> Operand {
        match val {
            Some(val) => val.wrap(),
            None => Operand::Null,
        }
    }
}

fn mismatch<T: NativeType>(op: &Operand) -> QueryError {
    fatal!("Expected operand of type {}, got {:?}", T::t(), op)
}

macro_rules! native_type {
    ($native:ty, $variant:ident, |$v:ident| $wrap:expr, |$w:ident| $unwrap:expr) => {
        impl NativeType for $native {
            fn t() -> Type { Type::$variant }
            fn wrap(self) -> Operand { let $v = self; Operand::$variant($wrap) }
            fn unwrap(op: Operand) -> QueryResult<Option<Self>> {
                match op {
                    Operand::$variant($w) => Ok(Some($unwrap)),
                    Operand::Null => Ok(None),
                    other => Err(mismatch::<Self>(&other)),
                }
            }
        }
    };
}

native_type!(i32, Int32, |v| v, |v| v);
native_type!(i64, Int64, |v| v, |v| v);
native_type!(bool, Bool, |v| v, |v| v);
native_type!(f32, Float32, |v| OrderedFloat(v), |v| v.into_inner());
native_type!(f64, Float64, |v| OrderedFloat(v), |v| v.into_inner());
native_type!(Decimal, Decimal, |v| v, |v| v);
native_type!(String, String, |v| v, |v| v);

/// Values of the NULL type tag. Every instance is null.
impl NativeType for () {
    fn t() -> Type { Type::Null }
    fn wrap(self) -> Operand { Operand::Null }
    fn unwrap(op: Operand) -> QueryResult<Option<()>> {
        match op {
            Operand::Null => Ok(None),
            other => Err(mismatch::<()>(&other)),
        }
    }
}
