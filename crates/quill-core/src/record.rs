//! Record layouts: the fixed 65-byte record and dynamic payload schemas.
//!
//! Every slot owned by the record program starts with the same header,
//! `[version:1][authority:32]`. A fixed ("simple") record follows the header
//! with exactly 32 bytes of data. A dynamic record follows it with a
//! caller-defined, length-prefixed payload that must fit within the
//! capacity chosen at creation.

use crate::codec::{Reader, Result, Schema, Writer};
use crate::types::Pubkey;

/// Payload length of a fixed record.
pub const DATA_LENGTH: usize = 32;

/// Header length shared by fixed and dynamic records: version + authority.
/// Dynamic payloads start at this offset in the stored bytes.
pub const HEADER_LENGTH: usize = 33;

/// Decoded view of a fixed record slot.
///
/// Wire layout: `[version:1][authority:32][data:32]`, 65 bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RecordData {
    pub version: u8,
    pub authority: Pubkey,
    pub data: [u8; DATA_LENGTH],
}

impl RecordData {
    /// Version written by the program on initialize.
    pub const CURRENT_VERSION: u8 = 0;

    pub fn new(authority: Pubkey, data: [u8; DATA_LENGTH]) -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            authority,
            data,
        }
    }

    /// Capacity of a fixed record slot, computed from the zero-valued
    /// layout so it always tracks the declared fields.
    pub fn account_size() -> usize {
        Self::default().encoded_len()
    }

    /// The data field as text, with zero padding stripped.
    ///
    /// Content shorter than [`DATA_LENGTH`] is stored zero-padded (see
    /// [`fixed_data`]); this undoes that for display and comparison.
    pub fn text(&self) -> String {
        let end = self
            .data
            .iter()
            .rposition(|&b| b != 0)
            .map_or(0, |i| i + 1);
        String::from_utf8_lossy(&self.data[..end]).into_owned()
    }
}

impl Schema for RecordData {
    fn encode(&self, w: &mut Writer) {
        w.write_u8(self.version);
        w.write_pubkey(&self.authority);
        w.write_array(&self.data);
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            version: r.read_u8()?,
            authority: r.read_pubkey()?,
            data: r.read_array()?,
        })
    }
}

/// Fit arbitrary content into the fixed data field: truncate past
/// [`DATA_LENGTH`], zero-pad below it.
pub fn fixed_data(content: &[u8]) -> [u8; DATA_LENGTH] {
    let mut out = [0u8; DATA_LENGTH];
    let len = content.len().min(DATA_LENGTH);
    out[..len].copy_from_slice(&content[..len]);
    out
}

/// A minimal dynamic payload: a key and a free-form message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub key: Pubkey,
    pub message: String,
}

impl Schema for NoteRecord {
    fn encode(&self, w: &mut Writer) {
        w.write_pubkey(&self.key);
        w.write_string(&self.message);
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            key: r.read_pubkey()?,
            message: r.read_string()?,
        })
    }
}

/// A richer dynamic payload, the shape a dapp would define for its own
/// records. Exercises every codec primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetMetadata {
    pub parent_key: Pubkey,
    pub name: String,
    pub description: String,
    pub uri: String,
    pub is_mutable: bool,
    pub amount: u64,
    pub shares: u16,
}

impl Schema for AssetMetadata {
    fn encode(&self, w: &mut Writer) {
        w.write_pubkey(&self.parent_key);
        w.write_string(&self.name);
        w.write_string(&self.description);
        w.write_string(&self.uri);
        w.write_u8(self.is_mutable as u8);
        w.write_u64(self.amount);
        w.write_u16(self.shares);
    }

    fn decode(r: &mut Reader<'_>) -> Result<Self> {
        Ok(Self {
            parent_key: r.read_pubkey()?,
            name: r.read_string()?,
            description: r.read_string()?,
            uri: r.read_string()?,
            is_mutable: r.read_u8()? != 0,
            amount: r.read_u64()?,
            shares: r.read_u16()?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CodecError;

    #[test]
    fn test_account_size_is_65() {
        assert_eq!(RecordData::account_size(), 65);
        assert_eq!(RecordData::account_size(), 1 + 32 + DATA_LENGTH);
    }

    #[test]
    fn test_header_length_matches_layout() {
        // version + authority precede the data field.
        assert_eq!(HEADER_LENGTH, RecordData::account_size() - DATA_LENGTH);
    }

    #[test]
    fn test_record_data_roundtrip() {
        let record = RecordData::new(
            Pubkey::from_bytes([7; 32]),
            fixed_data(b"initial data saved to an account"),
        );
        let bytes = record.to_vec();
        assert_eq!(bytes.len(), 65);
        assert_eq!(RecordData::from_bytes(&bytes).unwrap(), record);
    }

    #[test]
    fn test_fixed_data_pads_and_truncates() {
        let short = fixed_data(b"hi");
        assert_eq!(&short[..2], b"hi");
        assert!(short[2..].iter().all(|&b| b == 0));

        let long = fixed_data(&[0xaa; 40]);
        assert_eq!(long, [0xaa; 32]);
    }

    #[test]
    fn test_text_strips_padding() {
        let record = RecordData::new(Pubkey::ZERO, fixed_data(b"hello"));
        assert_eq!(record.text(), "hello");

        let empty = RecordData::new(Pubkey::ZERO, fixed_data(b""));
        assert_eq!(empty.text(), "");
    }

    #[test]
    fn test_truncated_record_is_schema_mismatch() {
        let record = RecordData::new(Pubkey::from_bytes([1; 32]), fixed_data(b"x"));
        let bytes = record.to_vec();
        assert!(matches!(
            RecordData::from_bytes(&bytes[..40]),
            Err(CodecError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_note_record_roundtrip() {
        let note = NoteRecord {
            key: Pubkey::from_bytes([3; 32]),
            message: "dynamic message".to_string(),
        };
        assert_eq!(NoteRecord::from_bytes(&note.to_vec()).unwrap(), note);
    }

    #[test]
    fn test_asset_metadata_roundtrip() {
        let meta = AssetMetadata {
            parent_key: Pubkey::from_bytes([5; 32]),
            name: "name".to_string(),
            description: "description".to_string(),
            uri: "https://example.org/asset".to_string(),
            is_mutable: true,
            amount: 1_000_000,
            shares: 100,
        };
        assert_eq!(AssetMetadata::from_bytes(&meta.to_vec()).unwrap(), meta);
    }

    #[test]
    fn test_decode_ignores_capacity_padding() {
        let note = NoteRecord {
            key: Pubkey::from_bytes([3; 32]),
            message: "padded".to_string(),
        };
        let mut bytes = note.to_vec();
        bytes.resize(150, 0); // slot capacity padding
        assert_eq!(NoteRecord::from_bytes(&bytes).unwrap(), note);
    }
}
