use std::fmt;
use std::marker::PhantomData;

use crate::engine::codec::*;
use crate::engine::data_types::*;
use crate::engine::opcodes::*;
use crate::engine::operators::*;
use crate::errors::*;

pub type BoxedAgg = Box<dyn Agg>;

/// One accumulator slot of an aggregation.
pub trait Agg: fmt::Debug + Send + Sync {
    /// Value of the slot before any row was folded in.
    fn init(&self) -> Operand { Operand::Null }
    fn add(&self, acc: Operand, tuple: &[Operand]) -> QueryResult<Operand>;
    fn result_type(&self) -> Type;
    fn display_agg(&self) -> String;
}

fn column(tuple: &[Operand], index: usize) -> QueryResult<&Operand> {
    tuple.get(index)
        .ok_or_else(|| fatal!("Aggregate reads column {} of tuple with {} columns", index, tuple.len()))
}

#[derive(Debug)]
pub struct CountAllAgg;

impl Agg for CountAllAgg {
    fn init(&self) -> Operand { Operand::Int64(0) }

    fn add(&self, acc: Operand, _: &[Operand]) -> QueryResult<Operand> {
        increment(acc)
    }

    fn result_type(&self) -> Type { Type::Int64 }

    fn display_agg(&self) -> String { "count(*)".to_string() }
}

/// Counts rows whose column is not null.
#[derive(Debug)]
pub struct CountAgg {
    index: usize,
    t: Type,
}

impl Agg for CountAgg {
    fn init(&self) -> Operand { Operand::Int64(0) }

    fn add(&self, acc: Operand, tuple: &[Operand]) -> QueryResult<Operand> {
        if column(tuple, self.index)?.is_null() {
            Ok(acc)
        } else {
            increment(acc)
        }
    }

    fn result_type(&self) -> Type { Type::Int64 }

    fn display_agg(&self) -> String { format!("count(${}<{}>)", self.index, self.t) }
}

fn increment(acc: Operand) -> QueryResult<Operand> {
    match i64::unwrap(acc)? {
        Some(count) => Ok(Operand::Int64(count + 1)),
        None => Ok(Operand::Int64(1)),
    }
}

/// Folds a column with a binary operator, skipping nulls. A null accumulator takes the
/// first non-null value.
#[derive(Debug)]
pub struct CalcAgg<T, Op> {
    index: usize,
    name: &'static str,
    from_zero: bool,
    op: PhantomData<(T, Op)>,
}

impl<T: Numeric, Op: BinaryOp<T, T, T>> CalcAgg<T, Op> {
    /// Starts at zero instead of null, so an all-null column sums to zero.
    pub fn boxed_from_zero(index: usize, name: &'static str) -> BoxedAgg {
        Box::new(CalcAgg::<T, Op> { index, name, from_zero: true, op: PhantomData })
    }
}

impl<T: NativeType, Op: BinaryOp<T, T, T>> CalcAgg<T, Op> {
    pub fn boxed(index: usize, name: &'static str) -> BoxedAgg {
        Box::new(CalcAgg::<T, Op> { index, name, from_zero: false, op: PhantomData })
    }
}

impl<T: NativeType, Op: BinaryOp<T, T, T>> Agg for CalcAgg<T, Op> {
    fn init(&self) -> Operand {
        if self.from_zero { zero_of(T::t()) } else { Operand::Null }
    }

    fn add(&self, acc: Operand, tuple: &[Operand]) -> QueryResult<Operand> {
        let value = match T::unwrap(column(tuple, self.index)?.clone())? {
            Some(value) => value,
            None => return Ok(acc),
        };
        match T::unwrap(acc)? {
            Some(acc) => Ok(T::wrap_opt(Op::perform(acc, value)?)),
            None => Ok(value.wrap()),
        }
    }

    fn result_type(&self) -> Type { T::t() }

    fn display_agg(&self) -> String { format!("{}(${}<{}>)", self.name, self.index, T::t()) }
}

fn zero_of(t: Type) -> Operand {
    match t {
        Type::Int32 => <i32 as Numeric>::zero().wrap(),
        Type::Int64 => <i64 as Numeric>::zero().wrap(),
        Type::Float32 => <f32 as Numeric>::zero().wrap(),
        Type::Float64 => <f64 as Numeric>::zero().wrap(),
        Type::Decimal => Decimal::zero().wrap(),
        _ => Operand::Null,
    }
}

macro_rules! numeric_agg {
    ($t:expr, |$T:ident| $make:expr) => {
        match $t {
            Type::Int32 => { type $T = i32; Some($make) }
            Type::Int64 => { type $T = i64; Some($make) }
            Type::Float32 => { type $T = f32; Some($make) }
            Type::Float64 => { type $T = f64; Some($make) }
            Type::Decimal => { type $T = Decimal; Some($make) }
            _ => None,
        }
    };
}

macro_rules! value_agg {
    ($t:expr, |$T:ident| $make:expr) => {
        match $t {
            Type::Int32 => { type $T = i32; Some($make) }
            Type::Int64 => { type $T = i64; Some($make) }
            Type::Bool => { type $T = bool; Some($make) }
            Type::Float32 => { type $T = f32; Some($make) }
            Type::Float64 => { type $T = f64; Some($make) }
            Type::Decimal => { type $T = Decimal; Some($make) }
            Type::String => { type $T = String; Some($make) }
            Type::Null => None,
        }
    };
}

/// Decodes a varint count followed by that many aggregate descriptors.
pub fn decode_aggs(code: &[u8], p: usize) -> QueryResult<(Vec<BoxedAgg>, usize)> {
    let (count, mut p) = decode_usize(code, p)?;
    let mut aggs = Vec::with_capacity(count.min(code.len()));
    for _ in 0..count {
        let b = p;
        let descriptor = match code.get(p) {
            Some(&byte) => byte,
            None => bail!(QueryError::Truncated, &code[b..]),
        };
        p += 1;
        if descriptor == AGG_COUNT_ALL {
            aggs.push(Box::new(CountAllAgg) as BoxedAgg);
            continue;
        }
        let unknown = || QueryError::UnknownCode(code[b..].to_vec());
        let t = Type::from_code(descriptor & 0x0F).ok_or_else(unknown)?;
        let (index, cursor) = decode_usize(code, p)?;
        p = cursor;
        let agg = match descriptor & 0xF0 {
            AGG_COUNT => Some(Box::new(CountAgg { index, t }) as BoxedAgg),
            AGG_SUM => numeric_agg!(t, |T| CalcAgg::<T, Addition>::boxed(index, "sum")),
            AGG_SUM0 => numeric_agg!(t, |T| CalcAgg::<T, Addition>::boxed_from_zero(index, "sum0")),
            AGG_MAX => value_agg!(t, |T| CalcAgg::<T, Max>::boxed(index, "max")),
            AGG_MIN => value_agg!(t, |T| CalcAgg::<T, Min>::boxed(index, "min")),
            _ => None,
        };
        aggs.push(agg.ok_or_else(unknown)?);
    }
    Ok((aggs, p))
}
