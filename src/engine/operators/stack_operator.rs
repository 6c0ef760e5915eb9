use std::fmt;
use std::ops::Deref;

use crate::engine::data_types::Type;
use crate::engine::operators::operand_stack::OperandStack;
use crate::errors::*;

pub type BoxedOperator = Box<dyn StackOperator>;

/// One instruction of a decoded expression. Pops its fixed number of inputs and
/// pushes exactly one result.
pub trait StackOperator: fmt::Debug + Send + Sync {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()>;
    fn result_type(&self) -> Type;
    fn display_op(&self) -> String;
}

/// Either a catalog singleton or an operator carrying per-program data.
#[derive(Debug)]
pub enum OperatorRef {
    Shared(&'static dyn StackOperator),
    Owned(BoxedOperator),
}

impl Deref for OperatorRef {
    type Target = dyn StackOperator;

    fn deref(&self) -> &Self::Target {
        match self {
            OperatorRef::Shared(op) => *op,
            OperatorRef::Owned(op) => op.as_ref(),
        }
    }
}

impl From<BoxedOperator> for OperatorRef {
    fn from(op: BoxedOperator) -> OperatorRef { OperatorRef::Owned(op) }
}

impl From<&'static dyn StackOperator> for OperatorRef {
    fn from(op: &'static dyn StackOperator) -> OperatorRef { OperatorRef::Shared(op) }
}
