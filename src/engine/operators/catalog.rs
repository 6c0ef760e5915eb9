use fnv::FnvHashMap;
use lazy_static::lazy_static;

use crate::engine::data_types::*;
use crate::engine::opcodes::*;
use crate::engine::operators::*;

type Table = Vec<Option<BoxedOperator>>;

lazy_static! {
    static ref CATALOG: Catalog = Catalog::new();
}

/// Process wide singletons of every stateless operator, built on first use and
/// read-only afterwards. An empty slot means the operation is undefined for that type.
pub fn catalog() -> &'static Catalog { &CATALOG }

pub struct Catalog {
    nulls: Table,
    typed: FnvHashMap<u8, Table>,
    cast: Vec<Table>,
    cast_check: Vec<Table>,
    fun: Table,
    not: BoxedOperator,
    and: BoxedOperator,
    or: BoxedOperator,
    const_true: BoxedOperator,
    const_false: BoxedOperator,
}

fn empty_table(len: usize) -> Table { (0..len).map(|_| None).collect() }

macro_rules! typed_table {
    ($($variant:ident: $native:ty),+ => |$t:ident| $make:expr) => {{
        let mut table = empty_table(TYPE_NUM);
        $({
            type $t = $native;
            table[Type::$variant.index()] = Some($make);
        })+
        table
    }};
}

macro_rules! numeric_table {
    (|$t:ident| $make:expr) => {
        typed_table!(Int32: i32, Int64: i64, Float32: f32, Float64: f64, Decimal: Decimal => |$t| $make)
    };
}

macro_rules! value_table {
    (|$t:ident| $make:expr) => {
        typed_table!(Int32: i32, Int64: i64, Bool: bool, Float32: f32, Float64: f64, Decimal: Decimal, String: String
            => |$t| $make)
    };
}

macro_rules! any_table {
    (|$t:ident| $make:expr) => {
        typed_table!(Null: (), Int32: i32, Int64: i64, Bool: bool, Float32: f32, Float64: f64, Decimal: Decimal,
            String: String => |$t| $make)
    };
}

macro_rules! cast_table {
    ($op:ident) => {{
        let mut table: Vec<Table> = (0..TYPE_NUM).map(|_| empty_table(TYPE_NUM)).collect();
        cast_entries!(table, $op;
            Int32: i32 => [Int64: i64, Bool: bool, Float32: f32, Float64: f64, Decimal: Decimal, String: String];
            Int64: i64 => [Int32: i32, Bool: bool, Float32: f32, Float64: f64, Decimal: Decimal, String: String];
            Bool: bool => [Int32: i32, Int64: i64, Float32: f32, Float64: f64, Decimal: Decimal, String: String];
            Float32: f32 => [Int32: i32, Int64: i64, Bool: bool, Float64: f64, Decimal: Decimal, String: String];
            Float64: f64 => [Int32: i32, Int64: i64, Bool: bool, Float32: f32, Decimal: Decimal, String: String];
            Decimal: Decimal => [Int32: i32, Int64: i64, Bool: bool, Float32: f32, Float64: f64, String: String];
            String: String => [Int32: i32, Int64: i64, Float32: f32, Float64: f64, Decimal: Decimal]
        );
        table
    }};
}

macro_rules! cast_entries {
    ($table:ident, $op:ident; $($src:ident: $s:ty => [$($dst:ident: $d:ty),+]);+) => {
        $($(
            $table[Type::$dst.index()][Type::$src.index()] = Some($op::<$s, $d>::boxed());
        )+)+
    };
}

impl Catalog {
    fn new() -> Catalog {
        let mut typed = FnvHashMap::default();
        typed.insert(POS, numeric_table!(|T| MapOperator::<T, T, Pos>::boxed()));
        typed.insert(NEG, numeric_table!(|T| MapOperator::<T, T, Neg>::boxed()));
        typed.insert(ADD, typed_table!(Int32: i32, Int64: i64, Float32: f32, Float64: f64, Decimal: Decimal,
            String: String => |T| BinaryOperator::<T, T, T, Addition>::boxed()));
        typed.insert(SUB, {
            let mut table = numeric_table!(|T| BinaryOperator::<T, T, T, Subtraction>::boxed());
            // Strings "subtract" by concatenation, compiled programs rely on it.
            table[Type::String.index()] = Some(BinaryOperator::<String, String, String, Addition>::boxed());
            table
        });
        typed.insert(MUL, numeric_table!(|T| BinaryOperator::<T, T, T, Multiplication>::boxed()));
        typed.insert(DIV, numeric_table!(|T| BinaryOperator::<T, T, T, Division>::boxed()));
        typed.insert(MOD, typed_table!(Int32: i32, Int64: i64 => |T| BinaryOperator::<T, T, T, Modulo>::boxed()));

        typed.insert(EQ, value_table!(|T| BinaryOperator::<T, T, bool, Equals>::boxed()));
        typed.insert(GE, value_table!(|T| BinaryOperator::<T, T, bool, GreaterThanEquals>::boxed()));
        typed.insert(GT, value_table!(|T| BinaryOperator::<T, T, bool, GreaterThan>::boxed()));
        typed.insert(LE, value_table!(|T| BinaryOperator::<T, T, bool, LessThanEquals>::boxed()));
        typed.insert(LT, value_table!(|T| BinaryOperator::<T, T, bool, LessThan>::boxed()));
        typed.insert(NE, value_table!(|T| BinaryOperator::<T, T, bool, NotEquals>::boxed()));

        typed.insert(IS_NULL, any_table!(|T| TestOperator::<T, IsNull>::boxed()));
        typed.insert(IS_TRUE, any_table!(|T| TestOperator::<T, IsTrue>::boxed()));
        typed.insert(IS_FALSE, any_table!(|T| TestOperator::<T, IsFalse>::boxed()));

        typed.insert(MIN, value_table!(|T| BinaryOperator::<T, T, T, Min>::boxed()));
        typed.insert(MAX, value_table!(|T| BinaryOperator::<T, T, T, Max>::boxed()));
        typed.insert(ABS, numeric_table!(|T| MapOperator::<T, T, Abs>::boxed()));
        typed.insert(ABS_C, numeric_table!(|T| MapOperator::<T, T, AbsCheck>::boxed()));

        Catalog {
            nulls: Type::ALL.iter().map(|&t| Some(Box::new(NullOperator { t }) as BoxedOperator)).collect(),
            typed,
            cast: cast_table!(TypeConversionOperator),
            cast_check: cast_table!(CheckedTypeConversionOperator),
            fun: fun_table(),
            not: Box::new(BooleanNot),
            and: BooleanOperator::<BooleanAnd>::boxed(),
            or: BooleanOperator::<BooleanOr>::boxed(),
            const_true: Constant::boxed(true),
            const_false: Constant::boxed(false),
        }
    }

    pub fn null(&self, t: Type) -> Option<&dyn StackOperator> {
        self.nulls[t.index()].as_deref()
    }

    /// Operators selected by an opcode followed by a type byte.
    pub fn typed(&self, opcode: u8, t: Type) -> Option<&dyn StackOperator> {
        self.typed.get(&opcode).and_then(|table| table[t.index()].as_deref())
    }

    pub fn is_typed(&self, opcode: u8) -> bool { self.typed.contains_key(&opcode) }

    pub fn cast(&self, dst: Type, src: Type) -> Option<&dyn StackOperator> {
        self.cast[dst.index()][src.index()].as_deref()
    }

    pub fn cast_check(&self, dst: Type, src: Type) -> Option<&dyn StackOperator> {
        self.cast_check[dst.index()][src.index()].as_deref()
    }

    pub fn fun(&self, code: u8) -> Option<&dyn StackOperator> {
        self.fun.get(code as usize).and_then(|op| op.as_deref())
    }

    pub fn boolean(&self, opcode: u8) -> Option<&dyn StackOperator> {
        match opcode {
            NOT => Some(self.not.as_ref()),
            AND => Some(self.and.as_ref()),
            OR => Some(self.or.as_ref()),
            _ => None,
        }
    }

    pub fn const_bool(&self, val: bool) -> &dyn StackOperator {
        if val { self.const_true.as_ref() } else { self.const_false.as_ref() }
    }
}

fn fun_table() -> Table {
    let mut table = empty_table(FUN_NUM);
    let mut set = |code: u8, op: BoxedOperator| table[code as usize] = Some(op);
    set(CEIL, MapOperator::<f64, f64, Ceil>::boxed());
    set(FLOOR, MapOperator::<f64, f64, Floor>::boxed());
    set(SIN, MapOperator::<f64, f64, Sin>::boxed());
    set(COS, MapOperator::<f64, f64, Cos>::boxed());
    set(TAN, MapOperator::<f64, f64, Tan>::boxed());
    set(ASIN, MapOperator::<f64, f64, Asin>::boxed());
    set(ACOS, MapOperator::<f64, f64, Acos>::boxed());
    set(ATAN, MapOperator::<f64, f64, Atan>::boxed());
    set(SINH, MapOperator::<f64, f64, Sinh>::boxed());
    set(COSH, MapOperator::<f64, f64, Cosh>::boxed());
    set(TANH, MapOperator::<f64, f64, Tanh>::boxed());
    set(EXP, MapOperator::<f64, f64, Exp>::boxed());
    set(LOG, MapOperator::<f64, f64, Log>::boxed());
    set(CONCAT, BinaryOperator::<String, String, String, Concat>::boxed());
    set(LOWER, MapOperator::<String, String, Lower>::boxed());
    set(UPPER, MapOperator::<String, String, Upper>::boxed());
    set(LEFT, BinaryOperator::<String, i32, String, Left>::boxed());
    set(RIGHT, BinaryOperator::<String, i32, String, Right>::boxed());
    set(TRIM, MapOperator::<String, String, Trim>::boxed());
    set(LTRIM, MapOperator::<String, String, LTrim>::boxed());
    set(RTRIM, MapOperator::<String, String, RTrim>::boxed());
    set(SUBSTR_2, TernaryOperator::<String, i32, i32, String, Substr>::boxed());
    set(SUBSTR_1, BinaryOperator::<String, i32, String, Substr>::boxed());
    set(MID_2, TernaryOperator::<String, i32, i32, String, Mid>::boxed());
    set(MID_1, BinaryOperator::<String, i32, String, Mid>::boxed());
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undefined_combinations_are_absent() {
        let catalog = catalog();
        assert!(catalog.typed(MUL, Type::Bool).is_none());
        assert!(catalog.typed(MUL, Type::String).is_none());
        assert!(catalog.typed(MOD, Type::Float64).is_none());
        assert!(catalog.typed(EQ, Type::Null).is_none());
        assert!(catalog.typed(0x88, Type::Int32).is_none());
        assert!(catalog.cast(Type::Bool, Type::String).is_none());
        assert!(catalog.cast(Type::Int32, Type::Null).is_none());
        assert!(catalog.fun(0x03).is_none());
        assert!(catalog.fun(0x40).is_none());
    }

    #[test]
    fn result_types() {
        let catalog = catalog();
        assert_eq!(catalog.typed(GT, Type::Float32).map(|op| op.result_type()), Some(Type::Bool));
        assert_eq!(catalog.typed(ADD, Type::Decimal).map(|op| op.result_type()), Some(Type::Decimal));
        assert_eq!(catalog.typed(IS_NULL, Type::Null).map(|op| op.result_type()), Some(Type::Bool));
        assert_eq!(catalog.cast(Type::String, Type::Bool).map(|op| op.result_type()), Some(Type::String));
        assert_eq!(catalog.fun(LEFT).map(|op| op.result_type()), Some(Type::String));
        assert_eq!(catalog.null(Type::Int64).map(|op| op.result_type()), Some(Type::Int64));
    }

    #[test]
    fn string_subtraction_concatenates() {
        let op = catalog().typed(SUB, Type::String).unwrap();
        let mut stack = OperandStack::default();
        stack.push(Operand::from("ab"));
        stack.push(Operand::from("cd"));
        op.apply(&mut stack).unwrap();
        assert_eq!(stack.pop(), Ok(Operand::from("abcd")));
    }
}
