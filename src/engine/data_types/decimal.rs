use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::Sign;
use bigdecimal::{BigDecimal, RoundingMode};
use num::{ToPrimitive, Zero};
use serde::{Deserialize, Serialize};

use crate::engine::data_types::Type;
use crate::errors::*;

/// Arbitrary precision decimal.
///
/// Equality and hashing ignore trailing zeros, so `1.50` and `1.5` land in the same group.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Decimal(BigDecimal);

/// Largest power of ten a decimal may carry, in either direction.
const MAX_EXPONENT: i64 = 4096;

impl Decimal {
    pub fn parse(s: &str) -> QueryResult<Decimal> {
        let v = BigDecimal::from_str(s.trim())
            .map_err(|_| QueryError::InvalidCast { value: s.to_string(), target: Type::Decimal })?;
        Decimal::bounded(v)
    }

    fn bounded(v: BigDecimal) -> QueryResult<Decimal> {
        let (_, scale) = v.normalized().into_bigint_and_exponent();
        if scale.unsigned_abs() > MAX_EXPONENT as u64 {
            return Err(QueryError::Overflow(Type::Decimal));
        }
        Ok(Decimal(v))
    }

    pub fn zero() -> Decimal { Decimal(BigDecimal::zero()) }

    pub fn is_zero(&self) -> bool { self.0.is_zero() }

    pub fn add(&self, rhs: &Decimal) -> Decimal { Decimal(&self.0 + &rhs.0) }

    pub fn sub(&self, rhs: &Decimal) -> Decimal { Decimal(&self.0 - &rhs.0) }

    pub fn mul(&self, rhs: &Decimal) -> QueryResult<Decimal> { Decimal::bounded(&self.0 * &rhs.0) }

    /// `None` when dividing by zero.
    pub fn div(&self, rhs: &Decimal) -> Option<Decimal> {
        if rhs.is_zero() {
            None
        } else {
            Some(Decimal(&self.0 / &rhs.0))
        }
    }

    pub fn neg(&self) -> Decimal { Decimal(-&self.0) }

    pub fn abs(&self) -> Decimal { Decimal(self.0.abs()) }

    /// Rounded half away from zero, `None` if out of range.
    pub fn to_i64(&self) -> Option<i64> {
        self.0.with_scale_round(0, RoundingMode::HalfUp).to_i64()
    }

    pub fn to_i32(&self) -> Option<i32> {
        self.0.with_scale_round(0, RoundingMode::HalfUp).to_i32()
    }

    pub fn to_i64_saturating(&self) -> i64 {
        self.to_i64().unwrap_or(if self.is_negative() { i64::MIN } else { i64::MAX })
    }

    pub fn to_i32_saturating(&self) -> i32 {
        self.to_i32().unwrap_or(if self.is_negative() { i32::MIN } else { i32::MAX })
    }

    pub fn to_f64(&self) -> f64 { self.0.to_f64().unwrap_or(f64::NAN) }

    pub fn to_f32(&self) -> f32 { self.0.to_f32().unwrap_or(f32::NAN) }

    /// Uses the shortest decimal string that round-trips the float.
    pub fn from_f64(v: f64) -> QueryResult<Decimal> {
        if !v.is_finite() {
            return Err(QueryError::InvalidCast { value: v.to_string(), target: Type::Decimal });
        }
        Decimal::parse(&v.to_string())
    }

    pub fn from_f32(v: f32) -> QueryResult<Decimal> {
        if !v.is_finite() {
            return Err(QueryError::InvalidCast { value: v.to_string(), target: Type::Decimal });
        }
        Decimal::parse(&v.to_string())
    }

    fn is_negative(&self) -> bool { self.0.sign() == Sign::Minus }
}

impl From<i32> for Decimal {
    fn from(v: i32) -> Decimal { Decimal(BigDecimal::from(v)) }
}

impl From<i64> for Decimal {
    fn from(v: i64) -> Decimal { Decimal(BigDecimal::from(v)) }
}

impl From<bool> for Decimal {
    fn from(v: bool) -> Decimal { Decimal(BigDecimal::from(v as i32)) }
}

impl From<BigDecimal> for Decimal {
    fn from(v: BigDecimal) -> Decimal { Decimal(v) }
}

// Plain notation without trailing zeros: "12.34", "0", "152.2756", "1200".
impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let (digits, scale) = self.0.normalized().into_bigint_and_exponent();
        if digits.is_zero() {
            return write!(f, "0");
        }
        let sign = if digits.sign() == Sign::Minus { "-" } else { "" };
        let magnitude = digits.magnitude().to_string();
        if scale <= 0 {
            return write!(f, "{}{}{}", sign, magnitude, "0".repeat(scale.unsigned_abs() as usize));
        }
        let scale = scale as usize;
        if magnitude.len() > scale {
            let (int, frac) = magnitude.split_at(magnitude.len() - scale);
            write!(f, "{}{}.{}", sign, int, frac)
        } else {
            write!(f, "{}0.{}{}", sign, "0".repeat(scale - magnitude.len()), magnitude)
        }
    }
}
