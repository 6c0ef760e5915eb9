//! Instruction bytes. Type-tagged classes carry the type in the low nibble.

pub const EOE: u8 = 0x00;

pub const NULL: u8 = 0x00;
pub const CONST: u8 = 0x10;
pub const CONST_N: u8 = 0x20;
pub const VAR_I: u8 = 0x30;

pub const POS: u8 = 0x81;
pub const NEG: u8 = 0x82;
pub const ADD: u8 = 0x83;
pub const SUB: u8 = 0x84;
pub const MUL: u8 = 0x85;
pub const DIV: u8 = 0x86;
pub const MOD: u8 = 0x87;

pub const EQ: u8 = 0x91;
pub const GE: u8 = 0x92;
pub const GT: u8 = 0x93;
pub const LE: u8 = 0x94;
pub const LT: u8 = 0x95;
pub const NE: u8 = 0x96;

pub const IS_NULL: u8 = 0xA1;
pub const IS_TRUE: u8 = 0xA2;
pub const IS_FALSE: u8 = 0xA3;

pub const MIN: u8 = 0xB1;
pub const MAX: u8 = 0xB2;
pub const ABS: u8 = 0xB3;
pub const ABS_C: u8 = 0xB4;

pub const NOT: u8 = 0x51;
pub const AND: u8 = 0x52;
pub const OR: u8 = 0x53;

pub const CAST: u8 = 0xF0;
pub const CAST_C: u8 = 0xFC;
pub const FUN: u8 = 0xF1;

pub const FUN_NUM: usize = 0x36;

pub const CEIL: u8 = 0x01;
pub const FLOOR: u8 = 0x02;
pub const SIN: u8 = 0x07;
pub const COS: u8 = 0x08;
pub const TAN: u8 = 0x09;
pub const ASIN: u8 = 0x0A;
pub const ACOS: u8 = 0x0B;
pub const ATAN: u8 = 0x0C;
pub const SINH: u8 = 0x0D;
pub const COSH: u8 = 0x0E;
pub const TANH: u8 = 0x0F;
pub const EXP: u8 = 0x10;
pub const LOG: u8 = 0x11;

pub const CONCAT: u8 = 0x21;
pub const LOWER: u8 = 0x22;
pub const UPPER: u8 = 0x23;
pub const LEFT: u8 = 0x24;
pub const RIGHT: u8 = 0x25;
pub const TRIM: u8 = 0x26;
pub const LTRIM: u8 = 0x28;
pub const RTRIM: u8 = 0x2A;
pub const SUBSTR_2: u8 = 0x2C;
pub const SUBSTR_1: u8 = 0x2D;
pub const MID_2: u8 = 0x2E;
pub const MID_1: u8 = 0x2F;

pub const FILTER: u8 = 0x71;
pub const PROJECT: u8 = 0x72;
pub const GROUPED_AGGREGATE: u8 = 0x73;
pub const UNGROUPED_AGGREGATE: u8 = 0x74;

pub const AGG_COUNT_ALL: u8 = 0x10;
pub const AGG_COUNT: u8 = 0x10;
pub const AGG_SUM: u8 = 0x20;
pub const AGG_SUM0: u8 = 0x30;
pub const AGG_MAX: u8 = 0x40;
pub const AGG_MIN: u8 = 0x50;
