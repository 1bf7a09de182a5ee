//! The binary schema codec.
//!
//! Both the instruction payloads sent to the record program and the record
//! bytes stored in a slot use the same encoding: fields in declared order,
//! fixed-width integers little-endian, strings and byte vectors prefixed by
//! a little-endian `u32` byte count, no padding or alignment.
//!
//! Decoding is "unchecked" in one deliberate way: trailing bytes after the
//! last declared field are permitted, because stored slots are padded out to
//! their fixed capacity. Running out of bytes mid-field is an error
//! ([`CodecError::SchemaMismatch`]), never a panic.

use crate::error::CodecError;
use crate::types::Pubkey;

/// Result alias for codec operations.
pub type Result<T> = std::result::Result<T, CodecError>;

/// Append-only byte sink for encoding.
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a writer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    pub fn write_u16(&mut self, v: u16) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    pub fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Write a fixed-length byte array with no length prefix.
    pub fn write_array<const N: usize>(&mut self, v: &[u8; N]) {
        self.buf.extend_from_slice(v);
    }

    pub fn write_pubkey(&mut self, v: &Pubkey) {
        self.buf.extend_from_slice(v.as_bytes());
    }

    /// Write a UTF-8 string: little-endian `u32` byte count, then the bytes.
    pub fn write_string(&mut self, v: &str) {
        self.write_bytes(v.as_bytes());
    }

    /// Write a byte vector: little-endian `u32` byte count, then the bytes.
    pub fn write_bytes(&mut self, v: &[u8]) {
        self.write_u32(v.len() as u32);
        self.buf.extend_from_slice(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written yet.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}

/// Cursor over a byte slice for decoding.
#[derive(Debug)]
pub struct Reader<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Create a reader over the given bytes.
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(CodecError::SchemaMismatch {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub fn read_u16(&mut self) -> Result<u16> {
        let bytes: [u8; 2] = self.take(2)?.try_into().expect("length checked");
        Ok(u16::from_le_bytes(bytes))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let bytes: [u8; 8] = self.take(8)?.try_into().expect("length checked");
        Ok(u64::from_le_bytes(bytes))
    }

    /// Read a fixed-length byte array with no length prefix.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes: [u8; N] = self.take(N)?.try_into().expect("length checked");
        Ok(bytes)
    }

    pub fn read_pubkey(&mut self) -> Result<Pubkey> {
        Ok(Pubkey(self.read_array::<32>()?))
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self) -> Result<String> {
        let bytes = self.read_bytes()?;
        String::from_utf8(bytes).map_err(|_| CodecError::InvalidUtf8)
    }

    /// Read a length-prefixed byte vector.
    pub fn read_bytes(&mut self) -> Result<Vec<u8>> {
        let len = self.read_u32()? as usize;
        Ok(self.take(len)?.to_vec())
    }

    fn read_u32(&mut self) -> Result<u32> {
        let bytes: [u8; 4] = self.take(4)?.try_into().expect("length checked");
        Ok(u32::from_le_bytes(bytes))
    }
}

/// A value with a declared binary layout.
///
/// `encode` and `decode` must agree on field order; the impl is the single
/// source of truth for both directions.
pub trait Schema: Sized {
    /// Append this value's fields, in declared order, to the writer.
    fn encode(&self, w: &mut Writer);

    /// Read this value's fields, in declared order, from the reader.
    fn decode(r: &mut Reader<'_>) -> Result<Self>;

    /// Encode to a fresh byte vector.
    fn to_vec(&self) -> Vec<u8> {
        let mut w = Writer::new();
        self.encode(&mut w);
        w.into_bytes()
    }

    /// Encoded length in bytes.
    fn encoded_len(&self) -> usize {
        self.to_vec().len()
    }

    /// Decode from a byte slice. Trailing bytes beyond the declared fields
    /// are ignored (stored slots are capacity-padded).
    fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::decode(&mut Reader::new(bytes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_integer_little_endian() {
        let mut w = Writer::new();
        w.write_u16(0x0102);
        w.write_u64(0x0807060504030201);
        let bytes = w.into_bytes();
        assert_eq!(bytes[..2], [0x02, 0x01]);
        assert_eq!(bytes[2..], [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08]);
    }

    #[test]
    fn test_string_length_prefix() {
        let mut w = Writer::new();
        w.write_string("abc");
        assert_eq!(w.into_bytes(), vec![3, 0, 0, 0, b'a', b'b', b'c']);
    }

    #[test]
    fn test_truncated_input_is_schema_mismatch() {
        let mut r = Reader::new(&[0x01, 0x02]);
        assert_eq!(
            r.read_u64(),
            Err(CodecError::SchemaMismatch {
                needed: 8,
                remaining: 2
            })
        );
    }

    #[test]
    fn test_string_prefix_larger_than_input() {
        // Claims 100 bytes follow; only 2 do.
        let mut r = Reader::new(&[100, 0, 0, 0, b'h', b'i']);
        assert!(matches!(
            r.read_string(),
            Err(CodecError::SchemaMismatch { needed: 100, .. })
        ));
    }

    #[test]
    fn test_invalid_utf8() {
        let mut w = Writer::new();
        w.write_bytes(&[0xff, 0xfe]);
        let bytes = w.into_bytes();
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_string(), Err(CodecError::InvalidUtf8));
    }

    #[test]
    fn test_trailing_bytes_permitted() {
        let mut w = Writer::new();
        w.write_u8(7);
        let mut bytes = w.into_bytes();
        bytes.extend_from_slice(&[0; 16]); // capacity padding
        let mut r = Reader::new(&bytes);
        assert_eq!(r.read_u8().unwrap(), 7);
        assert_eq!(r.remaining(), 16);
    }

    proptest! {
        #[test]
        fn prop_primitives_roundtrip(a: u8, b: u16, c: u64, s in ".{0,64}", v in proptest::collection::vec(any::<u8>(), 0..64)) {
            let mut w = Writer::new();
            w.write_u8(a);
            w.write_u16(b);
            w.write_u64(c);
            w.write_string(&s);
            w.write_bytes(&v);
            let bytes = w.into_bytes();

            let mut r = Reader::new(&bytes);
            prop_assert_eq!(r.read_u8().unwrap(), a);
            prop_assert_eq!(r.read_u16().unwrap(), b);
            prop_assert_eq!(r.read_u64().unwrap(), c);
            prop_assert_eq!(r.read_string().unwrap(), s);
            prop_assert_eq!(r.read_bytes().unwrap(), v);
            prop_assert_eq!(r.remaining(), 0);
        }
    }
}
