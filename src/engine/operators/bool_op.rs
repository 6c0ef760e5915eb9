use std::fmt;
use std::marker::PhantomData;

use crate::engine::data_types::Type;
use crate::engine::operators::*;
use crate::errors::*;

/// Three-valued connective. Unlike the compute operators it sees null inputs.
#[derive(Debug)]
pub struct BooleanOperator<T> {
    op: PhantomData<T>,
}

impl<T: BooleanOp> BooleanOperator<T> {
    pub fn boxed() -> BoxedOperator {
        Box::new(BooleanOperator::<T> { op: PhantomData })
    }
}

impl<T: BooleanOp> StackOperator for BooleanOperator<T> {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        let rhs = stack.pop_as::<bool>()?;
        let lhs = stack.pop_as::<bool>()?;
        stack.push_opt(T::evaluate(lhs, rhs));
        Ok(())
    }

    fn result_type(&self) -> Type { Type::Bool }

    fn display_op(&self) -> String { T::name().to_string() }
}

pub trait BooleanOp: fmt::Debug + Send + Sync + 'static {
    fn evaluate(lhs: Option<bool>, rhs: Option<bool>) -> Option<bool>;
    fn name() -> &'static str;
}

#[derive(Debug)]
pub struct BooleanOr;

impl BooleanOp for BooleanOr {
    fn evaluate(lhs: Option<bool>, rhs: Option<bool>) -> Option<bool> {
        match (lhs, rhs) {
            (Some(true), _) | (_, Some(true)) => Some(true),
            (Some(false), Some(false)) => Some(false),
            _ => None,
        }
    }

    fn name() -> &'static str { "or" }
}

#[derive(Debug)]
pub struct BooleanAnd;

impl BooleanOp for BooleanAnd {
    fn evaluate(lhs: Option<bool>, rhs: Option<bool>) -> Option<bool> {
        match (lhs, rhs) {
            (Some(false), _) | (_, Some(false)) => Some(false),
            (Some(true), Some(true)) => Some(true),
            _ => None,
        }
    }

    fn name() -> &'static str { "and" }
}

#[derive(Debug)]
pub struct BooleanNot;

impl StackOperator for BooleanNot {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        let v = stack.pop_as::<bool>()?;
        stack.push_opt(v.map(|b| !b));
        Ok(())
    }

    fn result_type(&self) -> Type { Type::Bool }

    fn display_op(&self) -> String { "not".to_string() }
}
