use crate::engine::data_types::NativeType;
use crate::engine::operators::binary_operator::BinaryOp;
use crate::errors::*;


#[derive(Debug)]
pub struct Equals;

#[derive(Debug)]
pub struct NotEquals;

#[derive(Debug)]
pub struct GreaterThan;

#[derive(Debug)]
pub struct GreaterThanEquals;

#[derive(Debug)]
pub struct LessThan;

#[derive(Debug)]
pub struct LessThanEquals;


impl<T: NativeType + PartialOrd> BinaryOp<T, T, bool> for Equals {
    #[inline]
    fn perform(l: T, r: T) -> QueryResult<Option<bool>> { Ok(Some(l == r)) }
    fn symbol() -> &'static str { "==" }
}

impl<T: NativeType + PartialOrd> BinaryOp<T, T, bool> for NotEquals {
    #[inline]
    fn perform(l: T, r: T) -> QueryResult<Option<bool>> { Ok(Some(l != r)) }
    fn symbol() -> &'static str { "<>" }
}

impl<T: NativeType + PartialOrd> BinaryOp<T, T, bool> for GreaterThan {
    #[inline]
    fn perform(l: T, r: T) -> QueryResult<Option<bool>> { Ok(Some(l > r)) }
    fn symbol() -> &'static str { ">" }
}

impl<T: NativeType + PartialOrd> BinaryOp<T, T, bool> for GreaterThanEquals {
    #[inline]
    fn perform(l: T, r: T) -> QueryResult<Option<bool>> { Ok(Some(l >= r)) }
    fn symbol() -> &'static str { ">=" }
}

impl<T: NativeType + PartialOrd> BinaryOp<T, T, bool> for LessThan {
    #[inline]
    fn perform(l: T, r: T) -> QueryResult<Option<bool>> { Ok(Some(l < r)) }
    fn symbol() -> &'static str { "<" }
}

impl<T: NativeType + PartialOrd> BinaryOp<T, T, bool> for LessThanEquals {
    #[inline]
    fn perform(l: T, r: T) -> QueryResult<Option<bool>> { Ok(Some(l <= r)) }
    fn symbol() -> &'static str { "<=" }
}
