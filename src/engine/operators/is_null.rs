use std::fmt;
use std::marker::PhantomData;

use crate::engine::data_types::*;
use crate::engine::operators::*;
use crate::errors::*;

/// Unary bool-valued test that accepts null inputs instead of propagating them.
#[derive(Debug)]
pub struct TestOperator<T, Test> {
    test: PhantomData<(T, Test)>,
}

impl<T: NativeType + Truthy, Test: NullTest> TestOperator<T, Test> {
    pub fn boxed() -> BoxedOperator {
        Box::new(TestOperator::<T, Test> { test: PhantomData })
    }
}

impl<T: NativeType + Truthy, Test: NullTest> StackOperator for TestOperator<T, Test> {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        let v = stack.pop_as::<T>()?;
        stack.push(Operand::Bool(Test::test(v.as_ref())));
        Ok(())
    }

    fn result_type(&self) -> Type { Type::Bool }

    fn display_op(&self) -> String {
        format!("{}({})", Test::name(), T::t())
    }
}

pub trait NullTest: fmt::Debug + Send + Sync + 'static {
    fn test<T: Truthy>(v: Option<&T>) -> bool;
    fn name() -> &'static str;
}

#[derive(Debug)]
pub struct IsNull;

impl NullTest for IsNull {
    fn test<T: Truthy>(v: Option<&T>) -> bool { v.is_none() }
    fn name() -> &'static str { "is_null" }
}

#[derive(Debug)]
pub struct IsTrue;

impl NullTest for IsTrue {
    fn test<T: Truthy>(v: Option<&T>) -> bool { v.map_or(false, Truthy::is_true) }
    fn name() -> &'static str { "is_true" }
}

#[derive(Debug)]
pub struct IsFalse;

impl NullTest for IsFalse {
    fn test<T: Truthy>(v: Option<&T>) -> bool { v.map_or(false, |v| !v.is_true()) }
    fn name() -> &'static str { "is_false" }
}

/// Non-zero numbers are true. Strings are read as numbers, unparsable strings count as zero.
pub trait Truthy {
    fn is_true(&self) -> bool;
}

impl Truthy for () {
    fn is_true(&self) -> bool { false }
}

impl Truthy for bool {
    fn is_true(&self) -> bool { *self }
}

impl Truthy for i32 {
    fn is_true(&self) -> bool { *self != 0 }
}

impl Truthy for i64 {
    fn is_true(&self) -> bool { *self != 0 }
}

impl Truthy for f32 {
    fn is_true(&self) -> bool { *self != 0.0 }
}

impl Truthy for f64 {
    fn is_true(&self) -> bool { *self != 0.0 }
}

impl Truthy for Decimal {
    fn is_true(&self) -> bool { !self.is_zero() }
}

impl Truthy for String {
    fn is_true(&self) -> bool {
        self.trim().parse::<f64>().map_or(false, |v| v != 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_tests() {
        assert!(IsNull::test::<i32>(None));
        assert!(!IsNull::test(Some(&0)));
        assert!(!IsTrue::test::<bool>(None));
        assert!(!IsFalse::test::<bool>(None));
        assert!(IsTrue::test(Some(&1i64)));
        assert!(IsFalse::test(Some(&0.0f64)));
    }

    #[test]
    fn string_truthiness() {
        assert!("1".to_string().is_true());
        assert!(" 2.5 ".to_string().is_true());
        assert!(!"0".to_string().is_true());
        assert!(!"abc".to_string().is_true());
    }
}
