use std::marker::PhantomData;

use crate::engine::data_types::*;
use crate::engine::operators::*;
use crate::errors::*;


#[derive(Debug)]
pub struct TypeConversionOperator<T, U> {
    t: PhantomData<(T, U)>,
}

impl<T: NativeType + Cast<U>, U: NativeType> TypeConversionOperator<T, U> {
    pub fn boxed() -> BoxedOperator {
        Box::new(TypeConversionOperator::<T, U> { t: PhantomData })
    }
}

impl<T: NativeType + Cast<U>, U: NativeType> StackOperator for TypeConversionOperator<T, U> {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        let result = match stack.pop_as::<T>()? {
            Some(v) => Some(v.cast()?),
            None => None,
        };
        stack.push_opt(result);
        Ok(())
    }

    fn result_type(&self) -> Type { U::t() }

    fn display_op(&self) -> String {
        format!("{} as {}", T::t(), U::t())
    }
}

/// Like `TypeConversionOperator`, but raises `Overflow` instead of wrapping or saturating.
#[derive(Debug)]
pub struct CheckedTypeConversionOperator<T, U> {
    t: PhantomData<(T, U)>,
}

impl<T: NativeType + CastCheck<U>, U: NativeType> CheckedTypeConversionOperator<T, U> {
    pub fn boxed() -> BoxedOperator {
        Box::new(CheckedTypeConversionOperator::<T, U> { t: PhantomData })
    }
}

impl<T: NativeType + CastCheck<U>, U: NativeType> StackOperator for CheckedTypeConversionOperator<T, U> {
    fn apply(&self, stack: &mut OperandStack) -> QueryResult<()> {
        let result = match stack.pop_as::<T>()? {
            Some(v) => Some(v.cast_check()?),
            None => None,
        };
        stack.push_opt(result);
        Ok(())
    }

    fn result_type(&self) -> Type { U::t() }

    fn display_op(&self) -> String {
        format!("{} as checked {}", T::t(), U::t())
    }
}


pub trait Cast<T> {
    fn cast(self) -> QueryResult<T>;
}

pub trait CastCheck<T> {
    fn cast_check(self) -> QueryResult<T>;
}

fn parse<T: std::str::FromStr + NativeType>(s: &str) -> QueryResult<T> {
    s.trim().parse::<T>().map_err(|_| QueryError::InvalidCast { value: s.to_string(), target: T::t() })
}

// C-style fixed notation, 15 fractional digits, trailing zeros dropped but one digit kept.
fn format_float(v: f64) -> String {
    let mut s = format!("{:.15}", v);
    if s.contains('.') {
        let trimmed = s.trim_end_matches('0').len();
        s.truncate(trimmed);
        if s.ends_with('.') {
            s.push('0');
        }
    }
    s
}

fn check_range(rounded: f64, min: f64, max: f64, t: Type) -> QueryResult<()> {
    if rounded.is_nan() || rounded < min || rounded > max {
        Err(QueryError::Overflow(t))
    } else {
        Ok(())
    }
}


impl Cast<i64> for i32 { fn cast(self) -> QueryResult<i64> { Ok(i64::from(self)) } }

impl Cast<bool> for i32 { fn cast(self) -> QueryResult<bool> { Ok(self != 0) } }

impl Cast<f32> for i32 { fn cast(self) -> QueryResult<f32> { Ok(self as f32) } }

impl Cast<f64> for i32 { fn cast(self) -> QueryResult<f64> { Ok(f64::from(self)) } }

impl Cast<Decimal> for i32 { fn cast(self) -> QueryResult<Decimal> { Ok(Decimal::from(self)) } }

impl Cast<String> for i32 { fn cast(self) -> QueryResult<String> { Ok(self.to_string()) } }


impl Cast<i32> for i64 { fn cast(self) -> QueryResult<i32> { Ok(self as i32) } }

impl Cast<bool> for i64 { fn cast(self) -> QueryResult<bool> { Ok(self != 0) } }

impl Cast<f32> for i64 { fn cast(self) -> QueryResult<f32> { Ok(self as f32) } }

impl Cast<f64> for i64 { fn cast(self) -> QueryResult<f64> { Ok(self as f64) } }

impl Cast<Decimal> for i64 { fn cast(self) -> QueryResult<Decimal> { Ok(Decimal::from(self)) } }

impl Cast<String> for i64 { fn cast(self) -> QueryResult<String> { Ok(self.to_string()) } }


impl Cast<i32> for bool { fn cast(self) -> QueryResult<i32> { Ok(i32::from(self)) } }

impl Cast<i64> for bool { fn cast(self) -> QueryResult<i64> { Ok(i64::from(self)) } }

impl Cast<f32> for bool { fn cast(self) -> QueryResult<f32> { Ok(f32::from(u8::from(self))) } }

impl Cast<f64> for bool { fn cast(self) -> QueryResult<f64> { Ok(f64::from(u8::from(self))) } }

impl Cast<Decimal> for bool { fn cast(self) -> QueryResult<Decimal> { Ok(Decimal::from(self)) } }

impl Cast<String> for bool { fn cast(self) -> QueryResult<String> { Ok(self.to_string()) } }


// Float to integer rounds half away from zero and saturates.
impl Cast<i32> for f32 { fn cast(self) -> QueryResult<i32> { Ok(self.round() as i32) } }

impl Cast<i64> for f32 { fn cast(self) -> QueryResult<i64> { Ok(self.round() as i64) } }

impl Cast<bool> for f32 { fn cast(self) -> QueryResult<bool> { Ok(self != 0.0) } }

impl Cast<f64> for f32 { fn cast(self) -> QueryResult<f64> { Ok(f64::from(self)) } }

impl Cast<Decimal> for f32 { fn cast(self) -> QueryResult<Decimal> { Decimal::from_f32(self) } }

impl Cast<String> for f32 { fn cast(self) -> QueryResult<String> { Ok(format_float(f64::from(self))) } }


impl Cast<i32> for f64 { fn cast(self) -> QueryResult<i32> { Ok(self.round() as i32) } }

impl Cast<i64> for f64 { fn cast(self) -> QueryResult<i64> { Ok(self.round() as i64) } }

impl Cast<bool> for f64 { fn cast(self) -> QueryResult<bool> { Ok(self != 0.0) } }

impl Cast<f32> for f64 { fn cast(self) -> QueryResult<f32> { Ok(self as f32) } }

impl Cast<Decimal> for f64 { fn cast(self) -> QueryResult<Decimal> { Decimal::from_f64(self) } }

impl Cast<String> for f64 { fn cast(self) -> QueryResult<String> { Ok(format_float(self)) } }


impl Cast<i32> for Decimal { fn cast(self) -> QueryResult<i32> { Ok(self.to_i32_saturating()) } }

impl Cast<i64> for Decimal { fn cast(self) -> QueryResult<i64> { Ok(self.to_i64_saturating()) } }

impl Cast<bool> for Decimal { fn cast(self) -> QueryResult<bool> { Ok(!self.is_zero()) } }

impl Cast<f32> for Decimal { fn cast(self) -> QueryResult<f32> { Ok(self.to_f32()) } }

impl Cast<f64> for Decimal { fn cast(self) -> QueryResult<f64> { Ok(self.to_f64()) } }

impl Cast<String> for Decimal { fn cast(self) -> QueryResult<String> { Ok(self.to_string()) } }


impl Cast<i32> for String { fn cast(self) -> QueryResult<i32> { parse(&self) } }

impl Cast<i64> for String { fn cast(self) -> QueryResult<i64> { parse(&self) } }

impl Cast<f32> for String { fn cast(self) -> QueryResult<f32> { parse(&self) } }

impl Cast<f64> for String { fn cast(self) -> QueryResult<f64> { parse(&self) } }

impl Cast<Decimal> for String { fn cast(self) -> QueryResult<Decimal> { Decimal::parse(&self) } }


impl CastCheck<i32> for i64 {
    fn cast_check(self) -> QueryResult<i32> {
        i32::try_from(self).map_err(|_| QueryError::Overflow(Type::Int32))
    }
}

impl CastCheck<i32> for f32 {
    fn cast_check(self) -> QueryResult<i32> { f64::from(self).cast_check() }
}

impl CastCheck<i64> for f32 {
    fn cast_check(self) -> QueryResult<i64> { f64::from(self).cast_check() }
}

impl CastCheck<i32> for f64 {
    fn cast_check(self) -> QueryResult<i32> {
        let rounded = self.round();
        check_range(rounded, f64::from(i32::MIN), f64::from(i32::MAX), Type::Int32)?;
        Ok(rounded as i32)
    }
}

impl CastCheck<i64> for f64 {
    fn cast_check(self) -> QueryResult<i64> {
        let rounded = self.round();
        // `i64::MAX as f64` is 2^63, one past the largest valid value.
        if rounded >= i64::MAX as f64 {
            return Err(QueryError::Overflow(Type::Int64));
        }
        check_range(rounded, i64::MIN as f64, i64::MAX as f64, Type::Int64)?;
        Ok(rounded as i64)
    }
}

impl CastCheck<i32> for Decimal {
    fn cast_check(self) -> QueryResult<i32> { self.to_i32().ok_or(QueryError::Overflow(Type::Int32)) }
}

impl CastCheck<i64> for Decimal {
    fn cast_check(self) -> QueryResult<i64> { self.to_i64().ok_or(QueryError::Overflow(Type::Int64)) }
}

// Finite inputs must stay finite, infinities and NaN pass through.
fn check_finite<T: Into<f64> + Copy>(from_finite: bool, v: T, t: Type) -> QueryResult<T> {
    if from_finite && !v.into().is_finite() {
        return Err(QueryError::Overflow(t));
    }
    Ok(v)
}

impl CastCheck<f32> for f64 {
    fn cast_check(self) -> QueryResult<f32> { check_finite(self.is_finite(), self as f32, Type::Float32) }
}

impl CastCheck<f32> for Decimal {
    fn cast_check(self) -> QueryResult<f32> { check_finite(true, self.to_f32(), Type::Float32) }
}

impl CastCheck<f64> for Decimal {
    fn cast_check(self) -> QueryResult<f64> { check_finite(true, self.to_f64(), Type::Float64) }
}

macro_rules! cast_check_unchecked {
    ($($from:ty => [$($to:ty),*]);* $(;)*) => {
        $($(
            impl CastCheck<$to> for $from {
                fn cast_check(self) -> QueryResult<$to> { self.cast() }
            }
        )*)*
    };
}

cast_check_unchecked! {
    i32 => [i64, bool, f32, f64, Decimal, String];
    i64 => [bool, f32, f64, Decimal, String];
    bool => [i32, i64, f32, f64, Decimal, String];
    f32 => [bool, f64, Decimal, String];
    f64 => [bool, Decimal, String];
    Decimal => [bool, String];
    String => [i32, i64, f32, f64, Decimal];
}
