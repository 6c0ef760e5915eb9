//! Entries of the numbered function table. String positions count characters.

use crate::engine::operators::binary_operator::{BinaryOp, TernaryOp};
use crate::engine::operators::map_operator::MapOp;
use crate::errors::*;

macro_rules! math_function {
    ($name:ident, $f:ident, $display:expr) => {
        #[derive(Debug)]
        pub struct $name;

        impl MapOp<f64, f64> for $name {
            fn apply(v: f64) -> QueryResult<Option<f64>> { Ok(Some(v.$f())) }
            fn name() -> &'static str { $display }
        }
    };
}

math_function!(Ceil, ceil, "ceil");
math_function!(Floor, floor, "floor");
math_function!(Sin, sin, "sin");
math_function!(Cos, cos, "cos");
math_function!(Tan, tan, "tan");
math_function!(Asin, asin, "asin");
math_function!(Acos, acos, "acos");
math_function!(Atan, atan, "atan");
math_function!(Sinh, sinh, "sinh");
math_function!(Cosh, cosh, "cosh");
math_function!(Tanh, tanh, "tanh");
math_function!(Exp, exp, "exp");
math_function!(Log, ln, "log");


#[derive(Debug)]
pub struct Concat;

impl BinaryOp<String, String, String> for Concat {
    fn perform(mut lhs: String, rhs: String) -> QueryResult<Option<String>> {
        lhs.push_str(&rhs);
        Ok(Some(lhs))
    }
    fn symbol() -> &'static str { "||" }
}

#[derive(Debug)]
pub struct Lower;

impl MapOp<String, String> for Lower {
    fn apply(s: String) -> QueryResult<Option<String>> { Ok(Some(s.to_ascii_lowercase())) }
    fn name() -> &'static str { "lower" }
}

#[derive(Debug)]
pub struct Upper;

impl MapOp<String, String> for Upper {
    fn apply(s: String) -> QueryResult<Option<String>> { Ok(Some(s.to_ascii_uppercase())) }
    fn name() -> &'static str { "upper" }
}

#[derive(Debug)]
pub struct Trim;

impl MapOp<String, String> for Trim {
    fn apply(s: String) -> QueryResult<Option<String>> {
        Ok(Some(s.trim_matches(|c: char| c.is_ascii_whitespace()).to_string()))
    }
    fn name() -> &'static str { "trim" }
}

#[derive(Debug)]
pub struct LTrim;

impl MapOp<String, String> for LTrim {
    fn apply(s: String) -> QueryResult<Option<String>> {
        Ok(Some(s.trim_start_matches(|c: char| c.is_ascii_whitespace()).to_string()))
    }
    fn name() -> &'static str { "ltrim" }
}

#[derive(Debug)]
pub struct RTrim;

impl MapOp<String, String> for RTrim {
    fn apply(s: String) -> QueryResult<Option<String>> {
        Ok(Some(s.trim_end_matches(|c: char| c.is_ascii_whitespace()).to_string()))
    }
    fn name() -> &'static str { "rtrim" }
}

fn char_len(s: &str) -> usize { s.chars().count() }

fn chars(s: &str, start: usize, end: usize) -> String {
    if end <= start {
        return String::new();
    }
    s.chars().skip(start).take(end - start).collect()
}

fn clamp_len(n: i32, len: usize) -> usize {
    if n <= 0 { 0 } else { (n as usize).min(len) }
}

/// Leading `n` characters.
#[derive(Debug)]
pub struct Left;

impl BinaryOp<String, i32, String> for Left {
    fn perform(s: String, n: i32) -> QueryResult<Option<String>> {
        let n = clamp_len(n, char_len(&s));
        Ok(Some(chars(&s, 0, n)))
    }
    fn symbol() -> &'static str { "left" }
}

/// Trailing `n` characters.
#[derive(Debug)]
pub struct Right;

impl BinaryOp<String, i32, String> for Right {
    fn perform(s: String, n: i32) -> QueryResult<Option<String>> {
        let len = char_len(&s);
        let n = clamp_len(n, len);
        Ok(Some(chars(&s, len - n, len)))
    }
    fn symbol() -> &'static str { "right" }
}

/// Zero-based half-open range `[start, end)`, clamped to the string.
#[derive(Debug)]
pub struct Substr;

impl TernaryOp<String, i32, i32, String> for Substr {
    fn perform(s: String, start: i32, end: i32) -> QueryResult<Option<String>> {
        let len = char_len(&s);
        let start = clamp_len(start, len);
        // An end before the start selects the rest of the string.
        let end = if i64::from(end) < start as i64 { len } else { clamp_len(end, len) };
        Ok(Some(chars(&s, start, end)))
    }
    fn name() -> &'static str { "substr" }
}

impl BinaryOp<String, i32, String> for Substr {
    fn perform(s: String, start: i32) -> QueryResult<Option<String>> {
        let len = char_len(&s);
        Ok(Some(chars(&s, clamp_len(start, len), len)))
    }
    fn symbol() -> &'static str { "substr" }
}

// One-based position, negative positions count from the end. `None` if outside the string.
fn mid_start(pos: i32, len: usize) -> Option<usize> {
    let len = len as i64;
    let pos = i64::from(pos);
    if 0 < pos && pos <= len {
        Some((pos - 1) as usize)
    } else if -len <= pos && pos < 0 {
        Some((pos + len) as usize)
    } else {
        None
    }
}

/// `count` characters from a one-based position.
#[derive(Debug)]
pub struct Mid;

impl TernaryOp<String, i32, i32, String> for Mid {
    fn perform(s: String, pos: i32, count: i32) -> QueryResult<Option<String>> {
        let len = char_len(&s);
        if count <= 0 {
            return Ok(Some(String::new()));
        }
        Ok(Some(match mid_start(pos, len) {
            Some(start) => chars(&s, start, start.saturating_add(count as usize).min(len)),
            None => String::new(),
        }))
    }
    fn name() -> &'static str { "mid" }
}

impl BinaryOp<String, i32, String> for Mid {
    fn perform(s: String, pos: i32) -> QueryResult<Option<String>> {
        let len = char_len(&s);
        Ok(Some(match mid_start(pos, len) {
            Some(start) => chars(&s, start, len),
            None => String::new(),
        }))
    }
    fn symbol() -> &'static str { "mid" }
}
