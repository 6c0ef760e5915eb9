//! Primitive wire values embedded in expression and relational bytecode.
//!
//! Every decoder takes the full code buffer and a cursor, and returns the decoded
//! value together with the advanced cursor. Reading never goes past `code.len()`;
//! a payload that would do so yields `QueryError::Truncated` carrying the bytes of
//! the unfinished value.

use byteorder::{BigEndian, ByteOrder};

use crate::errors::*;

const VARINT_MAX_BYTES: usize = 10;

/// 7 bits per byte, least significant group first, high bit marks continuation.
pub fn decode_varint(code: &[u8], p: usize) -> QueryResult<(u64, usize)> {
    let mut value = 0u64;
    let mut cursor = p;
    loop {
        let byte = match code.get(cursor) {
            Some(&byte) => byte,
            None => bail!(QueryError::Truncated, &code[p.min(code.len())..]),
        };
        if cursor - p == VARINT_MAX_BYTES {
            bail!(QueryError::UnknownCode, &code[p..]);
        }
        value |= u64::from(byte & 0x7F) << (7 * (cursor - p));
        cursor += 1;
        if byte & 0x80 == 0 {
            return Ok((value, cursor));
        }
    }
}

pub fn decode_usize(code: &[u8], p: usize) -> QueryResult<(usize, usize)> {
    let (value, cursor) = decode_varint(code, p)?;
    match usize::try_from(value) {
        Ok(value) => Ok((value, cursor)),
        Err(_) => bail!(QueryError::UnknownCode, &code[p..]),
    }
}

pub fn decode_f32(code: &[u8], p: usize) -> QueryResult<(f32, usize)> {
    let bytes = take(code, p, 4)?;
    Ok((BigEndian::read_f32(bytes), p + 4))
}

pub fn decode_f64(code: &[u8], p: usize) -> QueryResult<(f64, usize)> {
    let bytes = take(code, p, 8)?;
    Ok((BigEndian::read_f64(bytes), p + 8))
}

/// Varint length followed by that many utf-8 bytes.
pub fn decode_string(code: &[u8], p: usize) -> QueryResult<(String, usize)> {
    let (len, start) = decode_usize(code, p)?;
    let bytes = take(code, start, len)?;
    match std::str::from_utf8(bytes) {
        Ok(s) => Ok((s.to_string(), start + len)),
        Err(_) => bail!(QueryError::InvalidString, bytes),
    }
}

fn take(code: &[u8], p: usize, len: usize) -> QueryResult<&[u8]> {
    match p.checked_add(len) {
        Some(end) if end <= code.len() => Ok(&code[p..end]),
        _ => bail!(QueryError::Truncated, &code[p.min(code.len())..]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bytes(s: &str) -> Vec<u8> {
        hex::decode(s).unwrap()
    }

    #[test]
    fn single_byte_varint() {
        assert_eq!(decode_varint(&bytes("01"), 0).unwrap(), (1, 1));
        assert_eq!(decode_varint(&bytes("7F"), 0).unwrap(), (127, 1));
    }

    #[test]
    fn multi_byte_varint() {
        assert_eq!(decode_varint(&bytes("9601"), 0).unwrap(), (150, 2));
        assert_eq!(decode_varint(&bytes("FF9601"), 1).unwrap(), (150, 3));
        assert_eq!(decode_varint(&bytes("8080808008"), 0).unwrap(), (1 << 31, 5));
    }

    #[test]
    fn varint_wraps_into_i32() {
        let (value, _) = decode_varint(&bytes("8080808008"), 0).unwrap();
        assert_eq!(value as i32, i32::MIN);
    }

    #[test]
    fn truncated_varint() {
        assert_eq!(decode_varint(&bytes("9680"), 0), Err(QueryError::Truncated(bytes("9680"))));
        assert_eq!(decode_varint(&[], 0), Err(QueryError::Truncated(vec![])));
    }

    #[test]
    fn overlong_varint() {
        let code = bytes("8080808080808080808001");
        assert_eq!(decode_varint(&code, 0), Err(QueryError::UnknownCode(code.clone())));
    }

    #[test]
    fn big_endian_floats() {
        assert_eq!(decode_f32(&bytes("42480000"), 0).unwrap(), (50.0, 4));
        assert_eq!(decode_f64(&bytes("401F333333333333"), 0).unwrap(), (7.8, 8));
        assert_eq!(decode_f64(&bytes("41B1E1A300000000"), 0).unwrap(), (3E8, 8));
    }

    #[test]
    fn float_payload_past_end() {
        assert_eq!(decode_f64(&bytes("401F33"), 0), Err(QueryError::Truncated(bytes("401F33"))));
    }

    #[test]
    fn length_prefixed_string() {
        assert_eq!(decode_string(&bytes("03616263"), 0).unwrap(), ("abc".to_string(), 4));
        assert_eq!(decode_string(&bytes("00"), 0).unwrap(), (String::new(), 1));
        assert_eq!(decode_string(&bytes("056162"), 0), Err(QueryError::Truncated(bytes("6162"))));
        assert_eq!(decode_string(&bytes("01FF"), 0), Err(QueryError::InvalidString(bytes("FF"))));
    }
}
