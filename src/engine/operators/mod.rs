pub mod binary_operator;
pub mod bool_op;
pub mod catalog;
pub mod comparison_operators;
pub mod constant;
pub mod functions;
pub mod is_null;
pub mod map_operator;
pub mod numeric_operators;
pub mod operand_stack;
pub mod stack_operator;
pub mod type_conversion;

pub use self::binary_operator::{BinaryOp, BinaryOperator, TernaryOp, TernaryOperator};
pub use self::bool_op::{BooleanAnd, BooleanNot, BooleanOp, BooleanOperator, BooleanOr};
pub use self::catalog::{catalog, Catalog};
pub use self::comparison_operators::*;
pub use self::constant::{Constant, IndexedVariable, NullOperator};
pub use self::functions::*;
pub use self::is_null::{IsFalse, IsNull, IsTrue, NullTest, TestOperator, Truthy};
pub use self::map_operator::{MapOp, MapOperator};
pub use self::numeric_operators::*;
pub use self::operand_stack::OperandStack;
pub use self::stack_operator::{BoxedOperator, OperatorRef, StackOperator};
pub use self::type_conversion::{Cast, CastCheck, CheckedTypeConversionOperator, TypeConversionOperator};
