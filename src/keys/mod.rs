//! Keyspace Layout
//!
//! All value types share one flat byte keyspace. The first byte of every
//! internal key names the namespace it belongs to; user keys never reach the
//! store without one, so the namespaces cannot collide by construction.
//!
//! ```text
//! meta record        [0x00][user key]                                  -> [tag][u64 BE cardinality]
//! zset member entry  [0x01][u32 BE keylen][user key][member]           -> [8-byte packed score]
//! zset score index   [0x02][u32 BE keylen][user key][score][member]    -> (empty)
//! ```
//!
//! The meta record is the type registry: its value's leading byte (the type
//! tag) says which variant owns the key's payload entries elsewhere in the
//! store. Payload keys embed the user key behind a length prefix so that
//! `user key ++ member` splits unambiguously.
//!
//! Scores are packed with an order-preserving transform so an ascending scan
//! of the score namespace yields (score, member) pairs in sorted order.

use bytes::{BufMut, Bytes, BytesMut};

/// Namespace discriminator for meta records.
pub const META: u8 = 0x00;

/// Namespace discriminator for sorted set member entries.
pub const ZSET_MEMBER: u8 = 0x01;

/// Namespace discriminator for sorted set score index entries.
pub const ZSET_SCORE: u8 = 0x02;

/// Width of a packed score.
pub const SCORE_LEN: usize = 8;

/// The type tag stored in a meta record's leading byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum TypeTag {
    /// Sorted set.
    Zset = b'z',
}

impl TypeTag {
    /// Decodes a stored tag byte. `None` means the store holds a tag this
    /// binary does not know about.
    pub fn from_byte(byte: u8) -> Option<TypeTag> {
        match byte {
            b'z' => Some(TypeTag::Zset),
            _ => None,
        }
    }

    /// The byte written into the meta record.
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

/// Derives the meta record key for a user key.
pub fn meta_key(key: &[u8]) -> Bytes {
    let mut out = BytesMut::with_capacity(1 + key.len());
    out.put_u8(META);
    out.put_slice(key);
    out.freeze()
}

fn payload_header(namespace: u8, key: &[u8], extra: usize) -> BytesMut {
    let mut out = BytesMut::with_capacity(1 + 4 + key.len() + extra);
    out.put_u8(namespace);
    out.put_u32(key.len() as u32);
    out.put_slice(key);
    out
}

/// Key of the member -> score entry for one sorted set member.
pub fn zset_member_key(key: &[u8], member: &[u8]) -> Bytes {
    let mut out = payload_header(ZSET_MEMBER, key, member.len());
    out.put_slice(member);
    out.freeze()
}

/// Prefix covering every member entry of one sorted set.
pub fn zset_member_prefix(key: &[u8]) -> Bytes {
    payload_header(ZSET_MEMBER, key, 0).freeze()
}

/// Key of the (score, member) index entry for one sorted set member.
pub fn zset_score_key(key: &[u8], score: f64, member: &[u8]) -> Bytes {
    let mut out = payload_header(ZSET_SCORE, key, SCORE_LEN + member.len());
    out.put_slice(&encode_score(score));
    out.put_slice(member);
    out.freeze()
}

/// Prefix covering every score index entry of one sorted set.
pub fn zset_score_prefix(key: &[u8]) -> Bytes {
    payload_header(ZSET_SCORE, key, 0).freeze()
}

/// Packs a score so that unsigned byte order matches numeric order.
///
/// Non-negative floats get their sign bit set; negative floats are
/// complemented. Standard order-preserving IEEE-754 transform.
pub fn encode_score(score: f64) -> [u8; SCORE_LEN] {
    const SIGN: u64 = 1 << 63;
    let bits = score.to_bits();
    let packed = if bits & SIGN == 0 { bits | SIGN } else { !bits };
    packed.to_be_bytes()
}

/// Inverse of [`encode_score`].
pub fn decode_score(raw: [u8; SCORE_LEN]) -> f64 {
    const SIGN: u64 = 1 << 63;
    let packed = u64::from_be_bytes(raw);
    let bits = if packed & SIGN != 0 { packed ^ SIGN } else { !packed };
    f64::from_bits(bits)
}
