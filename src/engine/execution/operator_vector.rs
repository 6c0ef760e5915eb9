use std::fmt;

use crate::engine::codec::*;
use crate::engine::data_types::*;
use crate::engine::opcodes::*;
use crate::engine::operators::*;
use crate::errors::*;

/// The decoded instruction list of one expression.
#[derive(Debug, Default)]
pub struct OperatorVector {
    ops: Vec<OperatorRef>,
}

impl OperatorVector {
    /// Decodes a program, replacing any previous one, and returns the cursor after its last
    /// instruction. Decoding stops at an end-of-expression byte (which is consumed) or at the
    /// end of `code`. A program that fails to decode leaves the vector empty.
    pub fn decode(&mut self, code: &[u8]) -> QueryResult<usize> {
        self.ops.clear();
        let mut ops = Vec::new();
        let catalog = catalog();
        let mut p = 0;
        while p < code.len() {
            let b = p;
            let opcode = code[p];
            p += 1;
            if opcode == EOE {
                break;
            }
            let op: OperatorRef = match opcode & 0xF0 {
                NULL => {
                    let t = type_of(code, b, opcode & 0x0F)?;
                    shared(code, b, catalog.null(t))?
                }
                CONST => {
                    let (op, cursor) = decode_const(code, b, p, false)?;
                    p = cursor;
                    op
                }
                CONST_N => {
                    let (op, cursor) = decode_const(code, b, p, true)?;
                    p = cursor;
                    op
                }
                VAR_I => {
                    let t = type_of(code, b, opcode & 0x0F)?;
                    let (index, cursor) = decode_usize(code, p)?;
                    p = cursor;
                    IndexedVariable::boxed(index, t).into()
                }
                _ => match opcode {
                    NOT | AND | OR => shared(code, b, catalog.boolean(opcode))?,
                    CAST | CAST_C => {
                        let types = byte_at(code, b, p)?;
                        p += 1;
                        let dst = type_of(code, b, types >> 4)?;
                        let src = type_of(code, b, types & 0x0F)?;
                        if dst == src {
                            continue;
                        }
                        let op = if opcode == CAST { catalog.cast(dst, src) } else { catalog.cast_check(dst, src) };
                        shared(code, b, op)?
                    }
                    FUN => {
                        let fun = byte_at(code, b, p)?;
                        p += 1;
                        shared(code, b, catalog.fun(fun))?
                    }
                    _ if catalog.is_typed(opcode) => {
                        let t = type_of(code, b, byte_at(code, b, p)?)?;
                        p += 1;
                        shared(code, b, catalog.typed(opcode, t))?
                    }
                    _ => return Err(unknown(code, b)),
                },
            };
            ops.push(op);
        }
        self.ops = ops;
        log::debug!("Decoded expression of {} operators: {}", self.ops.len(), self);
        Ok(p)
    }

    pub fn iter(&self) -> impl Iterator<Item = &dyn StackOperator> {
        self.ops.iter().map(|op| &**op)
    }

    pub fn len(&self) -> usize { self.ops.len() }

    pub fn is_empty(&self) -> bool { self.ops.is_empty() }

    /// Type produced by the final instruction, `Null` for an empty program.
    pub fn result_type(&self) -> Type {
        self.ops.last().map_or(Type::Null, |op| op.result_type())
    }
}

impl fmt::Display for OperatorVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}", op.display_op())?;
        }
        Ok(())
    }
}

fn unknown(code: &[u8], b: usize) -> QueryError {
    QueryError::UnknownCode(code[b..].to_vec())
}

fn shared(code: &[u8], b: usize, op: Option<&'static dyn StackOperator>) -> QueryResult<OperatorRef> {
    op.map(OperatorRef::Shared).ok_or_else(|| unknown(code, b))
}

fn byte_at(code: &[u8], b: usize, p: usize) -> QueryResult<u8> {
    match code.get(p) {
        Some(&byte) => Ok(byte),
        None => bail!(QueryError::Truncated, &code[b..]),
    }
}

fn type_of(code: &[u8], b: usize, tag: u8) -> QueryResult<Type> {
    Type::from_code(tag).ok_or_else(|| unknown(code, b))
}

// Negated int constants wrap, so the most negative value survives the round trip.
fn decode_const(code: &[u8], b: usize, p: usize, negate: bool) -> QueryResult<(OperatorRef, usize)> {
    let tag = code[b] & 0x0F;
    let t = type_of(code, b, tag)?;
    let constant = match (t, negate) {
        (Type::Int32, _) => {
            let (v, p) = decode_varint(code, p)?;
            let v = v as i32;
            (Constant::boxed(if negate { v.wrapping_neg() } else { v }), p)
        }
        (Type::Int64, _) => {
            let (v, p) = decode_varint(code, p)?;
            let v = v as i64;
            (Constant::boxed(if negate { v.wrapping_neg() } else { v }), p)
        }
        (Type::Bool, _) => return Ok((OperatorRef::Shared(catalog().const_bool(!negate)), p)),
        (Type::Float32, false) => {
            let (v, p) = decode_f32(code, p)?;
            (Constant::boxed(v), p)
        }
        (Type::Float64, false) => {
            let (v, p) = decode_f64(code, p)?;
            (Constant::boxed(v), p)
        }
        (Type::Decimal, false) => {
            let (v, p) = decode_string(code, p)?;
            (Constant::boxed(Decimal::parse(&v)?), p)
        }
        (Type::String, false) => {
            let (v, p) = decode_string(code, p)?;
            (Constant::boxed(v), p)
        }
        _ => return Err(unknown(code, b)),
    };
    Ok((constant.0.into(), constant.1))
}
