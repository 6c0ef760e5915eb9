mod decimal;
mod native;
mod operand;
mod types;

pub use self::decimal::Decimal;
pub use self::native::NativeType;
pub use self::operand::{syntax, Operand, Tuple};
pub use self::types::{Type, TYPE_NUM};
