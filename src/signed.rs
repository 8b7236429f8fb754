//! This module provides base primitives for encoding and decoding the
//! fixed-width signed integers used on the wire.
//!
//! It mostly centralizes the knowledge that the protocol packs signed
//! values in two's complement, most significant byte first.

/// Length of an encoded 1-byte signed integer in bytes.
pub const BYTE_LEN: usize = 1;

/// Length of an encoded 2-byte signed integer in bytes.
pub const SHORT_LEN: usize = 2;

/// Length of an encoded 4-byte signed integer in bytes.
pub const INT_LEN: usize = 4;

/// Returns the byte representation of the given 1-byte integer value.
pub fn encode_i8(value: i8) -> [u8; BYTE_LEN] {
  value.to_be_bytes()
}

/// Returns the integer value corresponding to the given byte.
///
/// Total: every byte pattern is the representation of exactly one value.
pub fn decode_i8(bytes: [u8; BYTE_LEN]) -> i8 {
  i8::from_be_bytes(bytes)
}

/// Returns the byte representation of the given 2-byte integer value.
pub fn encode_i16(value: i16) -> [u8; SHORT_LEN] {
  value.to_be_bytes()
}

/// Returns the integer value corresponding to the given bytes.
///
/// Total: every byte pattern is the representation of exactly one value.
pub fn decode_i16(bytes: [u8; SHORT_LEN]) -> i16 {
  i16::from_be_bytes(bytes)
}

/// Returns the byte representation of the given 4-byte integer value.
pub fn encode_i32(value: i32) -> [u8; INT_LEN] {
  value.to_be_bytes()
}

/// Returns the integer value corresponding to the given bytes.
///
/// Total: every byte pattern is the representation of exactly one value.
pub fn decode_i32(bytes: [u8; INT_LEN]) -> i32 {
  i32::from_be_bytes(bytes)
}
