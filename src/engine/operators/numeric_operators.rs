use num::traits::CheckedRem;

use crate::engine::data_types::*;
use crate::engine::operators::binary_operator::BinaryOp;
use crate::engine::operators::map_operator::MapOp;
use crate::errors::*;

/// Arithmetic shared by the numeric type tags. Fixed-width integers are overflow checked,
/// floats follow IEEE 754.
pub trait Numeric: NativeType + PartialOrd {
    fn zero() -> Self;
    fn add_checked(self, rhs: Self) -> QueryResult<Self>;
    fn sub_checked(self, rhs: Self) -> QueryResult<Self>;
    fn mul_checked(self, rhs: Self) -> QueryResult<Self>;
    /// `None` on division by zero.
    fn div_checked(self, rhs: Self) -> QueryResult<Option<Self>>;
    fn neg_checked(self) -> QueryResult<Self>;
    /// `abs(MIN) == MIN` for integers.
    fn abs_wrapping(self) -> Self;
    fn abs_checked(self) -> QueryResult<Self>;
}

macro_rules! numeric_int {
    ($t:ty) => {
        impl Numeric for $t {
            fn zero() -> Self { 0 }
            fn add_checked(self, rhs: Self) -> QueryResult<Self> {
                self.checked_add(rhs).ok_or(QueryError::Overflow(<$t>::t()))
            }
            fn sub_checked(self, rhs: Self) -> QueryResult<Self> {
                self.checked_sub(rhs).ok_or(QueryError::Overflow(<$t>::t()))
            }
            fn mul_checked(self, rhs: Self) -> QueryResult<Self> {
                self.checked_mul(rhs).ok_or(QueryError::Overflow(<$t>::t()))
            }
            fn div_checked(self, rhs: Self) -> QueryResult<Option<Self>> {
                if rhs == 0 {
                    return Ok(None);
                }
                self.checked_div(rhs).map(Some).ok_or(QueryError::Overflow(<$t>::t()))
            }
            fn neg_checked(self) -> QueryResult<Self> {
                self.checked_neg().ok_or(QueryError::Overflow(<$t>::t()))
            }
            fn abs_wrapping(self) -> Self { self.wrapping_abs() }
            fn abs_checked(self) -> QueryResult<Self> {
                self.checked_abs().ok_or(QueryError::Overflow(<$t>::t()))
            }
        }
    };
}

macro_rules! numeric_float {
    ($t:ty) => {
        impl Numeric for $t {
            fn zero() -> Self { 0.0 }
            fn add_checked(self, rhs: Self) -> QueryResult<Self> { Ok(self + rhs) }
            fn sub_checked(self, rhs: Self) -> QueryResult<Self> { Ok(self - rhs) }
            fn mul_checked(self, rhs: Self) -> QueryResult<Self> { Ok(self * rhs) }
            fn div_checked(self, rhs: Self) -> QueryResult<Option<Self>> {
                if rhs == 0.0 { Ok(None) } else { Ok(Some(self / rhs)) }
            }
            fn neg_checked(self) -> QueryResult<Self> { Ok(-self) }
            fn abs_wrapping(self) -> Self { self.abs() }
            fn abs_checked(self) -> QueryResult<Self> { Ok(self.abs()) }
        }
    };
}

numeric_int!(i32);
numeric_int!(i64);
numeric_float!(f32);
numeric_float!(f64);

impl Numeric for Decimal {
    fn zero() -> Self { Decimal::zero() }
    fn add_checked(self, rhs: Self) -> QueryResult<Self> { Ok(Decimal::add(&self, &rhs)) }
    fn sub_checked(self, rhs: Self) -> QueryResult<Self> { Ok(Decimal::sub(&self, &rhs)) }
    fn mul_checked(self, rhs: Self) -> QueryResult<Self> { Decimal::mul(&self, &rhs) }
    fn div_checked(self, rhs: Self) -> QueryResult<Option<Self>> { Ok(Decimal::div(&self, &rhs)) }
    fn neg_checked(self) -> QueryResult<Self> { Ok(Decimal::neg(&self)) }
    fn abs_wrapping(self) -> Self { Decimal::abs(&self) }
    fn abs_checked(self) -> QueryResult<Self> { Ok(Decimal::abs(&self)) }
}


#[derive(Debug)]
pub struct Pos;

#[derive(Debug)]
pub struct Neg;

#[derive(Debug)]
pub struct Abs;

#[derive(Debug)]
pub struct AbsCheck;

#[derive(Debug)]
pub struct Addition;

#[derive(Debug)]
pub struct Subtraction;

#[derive(Debug)]
pub struct Multiplication;

#[derive(Debug)]
pub struct Division;

#[derive(Debug)]
pub struct Modulo;

#[derive(Debug)]
pub struct Min;

#[derive(Debug)]
pub struct Max;


impl<T: Numeric> MapOp<T, T> for Pos {
    fn apply(v: T) -> QueryResult<Option<T>> { Ok(Some(v)) }
    fn name() -> &'static str { "pos" }
}

impl<T: Numeric> MapOp<T, T> for Neg {
    fn apply(v: T) -> QueryResult<Option<T>> { v.neg_checked().map(Some) }
    fn name() -> &'static str { "neg" }
}

impl<T: Numeric> MapOp<T, T> for Abs {
    fn apply(v: T) -> QueryResult<Option<T>> { Ok(Some(v.abs_wrapping())) }
    fn name() -> &'static str { "abs" }
}

impl<T: Numeric> MapOp<T, T> for AbsCheck {
    fn apply(v: T) -> QueryResult<Option<T>> { v.abs_checked().map(Some) }
    fn name() -> &'static str { "abs_check" }
}

impl<T: Numeric> BinaryOp<T, T, T> for Addition {
    fn perform(lhs: T, rhs: T) -> QueryResult<Option<T>> { lhs.add_checked(rhs).map(Some) }
    fn symbol() -> &'static str { "+" }
}

impl BinaryOp<String, String, String> for Addition {
    fn perform(mut lhs: String, rhs: String) -> QueryResult<Option<String>> {
        lhs.push_str(&rhs);
        Ok(Some(lhs))
    }
    fn symbol() -> &'static str { "+" }
}

impl<T: Numeric> BinaryOp<T, T, T> for Subtraction {
    fn perform(lhs: T, rhs: T) -> QueryResult<Option<T>> { lhs.sub_checked(rhs).map(Some) }
    fn symbol() -> &'static str { "-" }
}

impl<T: Numeric> BinaryOp<T, T, T> for Multiplication {
    fn perform(lhs: T, rhs: T) -> QueryResult<Option<T>> { lhs.mul_checked(rhs).map(Some) }
    fn symbol() -> &'static str { "*" }
}

impl<T: Numeric> BinaryOp<T, T, T> for Division {
    fn perform(lhs: T, rhs: T) -> QueryResult<Option<T>> { lhs.div_checked(rhs) }
    fn symbol() -> &'static str { "/" }
}

impl<T: Numeric + CheckedRem> BinaryOp<T, T, T> for Modulo {
    fn perform(lhs: T, rhs: T) -> QueryResult<Option<T>> {
        if rhs == <T as Numeric>::zero() {
            return Ok(None);
        }
        // Only MIN % -1 fails here, and its remainder is zero.
        Ok(Some(lhs.checked_rem(&rhs).unwrap_or_else(<T as Numeric>::zero)))
    }
    fn symbol() -> &'static str { "%" }
}

impl<T: NativeType + PartialOrd> BinaryOp<T, T, T> for Min {
    fn perform(lhs: T, rhs: T) -> QueryResult<Option<T>> {
        Ok(Some(if rhs < lhs { rhs } else { lhs }))
    }
    fn symbol() -> &'static str { "min" }
}

impl<T: NativeType + PartialOrd> BinaryOp<T, T, T> for Max {
    fn perform(lhs: T, rhs: T) -> QueryResult<Option<T>> {
        Ok(Some(if rhs > lhs { rhs } else { lhs }))
    }
    fn symbol() -> &'static str { "max" }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int64_overflow() {
        assert_eq!(Addition::perform(i64::MAX, 1i64), Err(QueryError::Overflow(Type::Int64)));
        assert_eq!(Subtraction::perform(i64::MIN, 1i64), Err(QueryError::Overflow(Type::Int64)));
        assert_eq!(Multiplication::perform(i64::MAX, 2i64), Err(QueryError::Overflow(Type::Int64)));
        assert_eq!(Addition::perform(i64::MAX - 1, 1i64), Ok(Some(i64::MAX)));
    }

    #[test]
    fn int32_overflow() {
        assert_eq!(Addition::perform(i32::MAX, 1i32), Err(QueryError::Overflow(Type::Int32)));
        assert_eq!(<Neg as MapOp<i32, i32>>::apply(i32::MIN), Err(QueryError::Overflow(Type::Int32)));
    }

    #[test]
    fn division_by_zero_is_null() {
        assert_eq!(Division::perform(7i32, 0i32), Ok(None));
        assert_eq!(Division::perform(7.0f64, 0.0f64), Ok(None));
        assert_eq!(Modulo::perform(7i64, 0i64), Ok(None));
        assert_eq!(Division::perform(Decimal::from(7), Decimal::zero()), Ok(None));
    }

    #[test]
    fn integer_division_truncates() {
        assert_eq!(Division::perform(7i32, 2i32), Ok(Some(3)));
        assert_eq!(Division::perform(-7i32, 2i32), Ok(Some(-3)));
        assert_eq!(Division::perform(i32::MIN, -1i32), Err(QueryError::Overflow(Type::Int32)));
        assert_eq!(Modulo::perform(-7i32, 3i32), Ok(Some(-1)));
        assert_eq!(Modulo::perform(i64::MIN, -1i64), Ok(Some(0)));
    }

    #[test]
    fn abs_wraps_unless_checked() {
        assert_eq!(<Abs as MapOp<i32, i32>>::apply(i32::MIN), Ok(Some(i32::MIN)));
        assert_eq!(<AbsCheck as MapOp<i32, i32>>::apply(i32::MIN), Err(QueryError::Overflow(Type::Int32)));
        assert_eq!(<AbsCheck as MapOp<i64, i64>>::apply(-5), Ok(Some(5)));
        assert_eq!(<Abs as MapOp<f64, f64>>::apply(-2.5), Ok(Some(2.5)));
    }

    #[test]
    fn string_addition_concatenates() {
        assert_eq!(Addition::perform("ab".to_string(), "c".to_string()), Ok(Some("abc".to_string())));
    }

    #[test]
    fn min_max() {
        assert_eq!(Min::perform(3i32, 2i32), Ok(Some(2)));
        assert_eq!(Max::perform("abc".to_string(), "abd".to_string()), Ok(Some("abd".to_string())));
        assert_eq!(Max::perform(false, true), Ok(Some(true)));
    }
}
