use std::fmt;
use std::marker::PhantomData;

use crate::engine::data_types::*;
use crate::engine::operators::*;
use crate::errors::*;

/// Two-input compute operator. The right operand sits on top of the stack.
/// A null on either side short-circuits to a null result.
#[derive(Debug)]
pub struct BinaryOperator<LHS, RHS, Out, Op> {
    op: PhantomData<(LHS, RHS, Out, Op)>,
}

impl<LHS, RHS, Out, Op> BinaryOperator<LHS, RHS, Out, Op>
    where LHS: NativeType,
          RHS: NativeType,
          Out: NativeType,
          Op: BinaryOp<LHS, RHS, Out> {
    pub fn boxed() -> BoxedOperator {
        Box::new(BinaryOperator::<LHS, RHS, Out, Op> { op: PhantomData })
    }
}

impl<LHS, RHS, Out, Op> StackOperator for BinaryOperator<LHS, RHS, Out, Op>
    where LHS: NativeType,
          RHS: NativeType,
          Out: NativeType,
          Op: BinaryOp<LHS, RHS, Out> {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        let rhs = stack.pop_as::<RHS>()?;
        let lhs = stack.pop_as::<LHS>()?;
        let result = match (lhs, rhs) {
            (Some(lhs), Some(rhs)) => Op::perform(lhs, rhs)?,
            _ => None,
        };
        stack.push_opt(result);
        Ok(())
    }

    fn result_type(&self) -> Type { Out::t() }

    fn display_op(&self) -> String {
        format!("{} {} {}", LHS::t(), Op::symbol(), RHS::t())
    }
}

pub trait BinaryOp<LHS, RHS, Out>: fmt::Debug + Send + Sync + 'static {
    fn perform(lhs: LHS, rhs: RHS) -> QueryResult<Option<Out>>;
    fn symbol() -> &'static str;
}

/// Three-input compute operator, used by the substring function family.
#[derive(Debug)]
pub struct TernaryOperator<A, B, C, Out, Op> {
    op: PhantomData<(A, B, C, Out, Op)>,
}

impl<A, B, C, Out, Op> TernaryOperator<A, B, C, Out, Op>
    where A: NativeType,
          B: NativeType,
          C: NativeType,
          Out: NativeType,
          Op: TernaryOp<A, B, C, Out> {
    pub fn boxed() -> BoxedOperator {
        Box::new(TernaryOperator::<A, B, C, Out, Op> { op: PhantomData })
    }
}

impl<A, B, C, Out, Op> StackOperator for TernaryOperator<A, B, C, Out, Op>
    where A: NativeType,
          B: NativeType,
          C: NativeType,
          Out: NativeType,
          Op: TernaryOp<A, B, C, Out> {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        let c = stack.pop_as::<C>()?;
        let b = stack.pop_as::<B>()?;
        let a = stack.pop_as::<A>()?;
        let result = match (a, b, c) {
            (Some(a), Some(b), Some(c)) => Op::perform(a, b, c)?,
            _ => None,
        };
        stack.push_opt(result);
        Ok(())
    }

    fn result_type(&self) -> Type { Out::t() }

    fn display_op(&self) -> String {
        format!("{}({}, {}, {})", Op::name(), A::t(), B::t(), C::t())
    }
}

pub trait TernaryOp<A, B, C, Out>: fmt::Debug + Send + Sync + 'static {
    fn perform(a: A, b: B, c: C) -> QueryResult<Option<Out>>;
    fn name() -> &'static str;
}
