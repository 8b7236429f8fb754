//! This module provides encoding and decoding functionality for the signed
//! integer values used by the wire protocol.
//!
//! The wire format is simple and strict. Integer values are packed in fixed
//! widths, most significant byte first, negative values in two's complement:
//!
//!   * `byte` values are serialized in 1 byte.
//!   * `short` values are serialized in 2 bytes.
//!   * `int` values are serialized in 4 bytes.
//!
//! Decoding is total: given enough bytes, every bit pattern is the
//! representation of exactly one value. Encoding validates that the value
//! fits in the requested width before packing it.

use std::convert::{TryFrom, TryInto};
use std::io;

use bytes::BytesMut;
use log::warn;
use thiserror::Error;

use crate::signed::{
    decode_i16, decode_i32, decode_i8, encode_i16, encode_i32, encode_i8, BYTE_LEN, INT_LEN,
    SHORT_LEN,
};

#[derive(PartialEq, Error, Debug)]
pub enum ValueDecodeError {
    #[error("at position {position}: not enough bytes to decode: expected {expected}, found {remaining}")]
    NotEnoughData {
        /// The number of bytes the decoder expected to read.
        ///
        /// Invariant: `remaining < expected`.
        expected: usize,

        /// The number of bytes remaining in the input buffer.
        ///
        /// Invariant: `remaining < expected`.
        remaining: usize,

        /// The decoder's position in the input buffer.
        position: usize,
    },
}

impl From<ValueDecodeError> for io::Error {
    fn from(error: ValueDecodeError) -> Self {
        let kind = match &error {
            &ValueDecodeError::NotEnoughData { .. } => io::ErrorKind::UnexpectedEof,
        };
        let message = format!("{}", &error);
        io::Error::new(kind, message)
    }
}

/// A type for decoding integer values from protocol messages.
pub struct ValueDecoder<'a> {
    // The buffer we are decoding from.
    //
    // Invariant: `position <= buffer.len()`.
    buffer: &'a [u8],

    // Our current position within `buffer`.
    //
    // We could instead maintain this implicitly in `buffer` by splitting off
    // decoded bytes from the start of the buffer, but we would then be unable
    // to remember how many bytes we had decoded. This information is useful to
    // have in error messages when encountering decoding errors.
    //
    // Invariant: `position <= buffer.len()`.
    position: usize,
}

/// This trait is implemented by types that can be decoded from messages using
/// a `ValueDecoder`.
pub trait ValueDecode: Sized {
    /// Attempts to decode a value of this type with the given decoder.
    fn decode_from(decoder: &mut ValueDecoder) -> Result<Self, ValueDecodeError>;
}

impl<'a> ValueDecoder<'a> {
    /// Wraps the given byte buffer.
    pub fn new(buffer: &'a [u8]) -> Self {
        Self {
            buffer: buffer,
            position: 0,
        }
    }

    /// The current position of this decoder in the input buffer.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of bytes remaining to decode.
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    /// Returns whether the underlying buffer has remaining bytes to decode.
    ///
    /// Shorthand for `remaining() > 0`.
    pub fn has_remaining(&self) -> bool {
        self.remaining() > 0
    }

    /// Returns a read-only view of the remaining bytes to decode.
    ///
    /// The returned slice is of size `remaining()`.
    pub fn bytes(&self) -> &[u8] {
        &self.buffer[self.position..]
    }

    /// Attempts to consume the next `n` bytes from this buffer.
    ///
    /// Returns a slice of size `n` if successful, in which case this decoder
    /// advances its internal position by `n`. On failure the position is left
    /// untouched.
    fn consume(&mut self, n: usize) -> Result<&[u8], ValueDecodeError> {
        if self.remaining() < n {
            return Err(ValueDecodeError::NotEnoughData {
                expected: n,
                remaining: self.remaining(),
                position: self.position,
            });
        }

        // Cannot use bytes() here as it borrows self immutably, which
        // prevents us from mutating self.position afterwards.
        let end = self.position + n;
        let bytes = &self.buffer[self.position..end];
        self.position = end;
        Ok(bytes)
    }

    /// Attempts to decode a 1-byte signed integer value.
    pub fn decode_byte(&mut self) -> Result<i8, ValueDecodeError> {
        let bytes = self.consume(BYTE_LEN)?;
        // The conversion from slice to fixed-size array cannot fail, because
        // consume() guarantees that its return value is of size n.
        let array: [u8; BYTE_LEN] = bytes.try_into().unwrap();
        Ok(decode_i8(array))
    }

    /// Attempts to decode a 2-byte signed integer value.
    pub fn decode_short(&mut self) -> Result<i16, ValueDecodeError> {
        let bytes = self.consume(SHORT_LEN)?;
        // See decode_byte() for why unwrap() cannot panic.
        let array: [u8; SHORT_LEN] = bytes.try_into().unwrap();
        Ok(decode_i16(array))
    }

    /// Attempts to decode a 4-byte signed integer value.
    pub fn decode_int(&mut self) -> Result<i32, ValueDecodeError> {
        let bytes = self.consume(INT_LEN)?;
        // See decode_byte() for why unwrap() cannot panic.
        let array: [u8; INT_LEN] = bytes.try_into().unwrap();
        Ok(decode_i32(array))
    }

    /// Attempts to decode a value of the given type.
    ///
    /// Allows easy decoding of complex values using type inference:
    ///
    /// ```ignore
    /// let val: i32 = decoder.decode()?;
    /// ```
    pub fn decode<T: ValueDecode>(&mut self) -> Result<T, ValueDecodeError> {
        T::decode_from(self)
    }
}

impl ValueDecode for i8 {
    fn decode_from(decoder: &mut ValueDecoder) -> Result<Self, ValueDecodeError> {
        decoder.decode_byte()
    }
}

impl ValueDecode for i16 {
    fn decode_from(decoder: &mut ValueDecoder) -> Result<Self, ValueDecodeError> {
        decoder.decode_short()
    }
}

impl ValueDecode for i32 {
    fn decode_from(decoder: &mut ValueDecoder) -> Result<Self, ValueDecodeError> {
        decoder.decode_int()
    }
}

/// Decodes a single value spanning the entirety of `buffer`.
///
/// Logs a warning if the value does not consume the whole buffer.
pub fn decode_value<T: ValueDecode>(buffer: &[u8]) -> Result<T, ValueDecodeError> {
    let mut decoder = ValueDecoder::new(buffer);
    let value = decoder.decode()?;
    if decoder.has_remaining() {
        warn!(
            "Value decoded with {} extra bytes remaining",
            decoder.remaining()
        );
    }
    Ok(value)
}

#[derive(Debug, Error, PartialEq)]
pub enum ValueEncodeError {
    #[error("{type_name} values must be between {min} and {max}, got {value}")]
    OutOfRange {
        /// The name of the wire type the value was meant to be packed as.
        type_name: &'static str,

        /// The value that does not fit in the requested width.
        value: i64,

        /// The smallest value the width can represent.
        min: i64,

        /// The largest value the width can represent.
        max: i64,
    },
}

impl From<ValueEncodeError> for io::Error {
    fn from(error: ValueEncodeError) -> Self {
        io::Error::new(io::ErrorKind::InvalidData, format!("{}", error))
    }
}

/// A type for encoding integer values into protocol messages.
pub struct ValueEncoder<'a> {
    /// The buffer to which the encoder appends encoded bytes.
    buffer: &'a mut BytesMut,
}

/// This trait is implemented by types that can be encoded into messages using
/// a `ValueEncoder`.
pub trait ValueEncode {
    /// Attempts to encode `self` with the given encoder.
    fn encode(&self, encoder: &mut ValueEncoder) -> Result<(), ValueEncodeError>;
}

impl<'a> ValueEncoder<'a> {
    /// Wraps the given buffer for encoding values into.
    ///
    /// Encoded bytes are appended. The buffer is not pre-cleared.
    pub fn new(buffer: &'a mut BytesMut) -> Self {
        ValueEncoder { buffer: buffer }
    }

    /// Encodes the given value as a 1-byte signed integer.
    ///
    /// Fails if the value does not fit in 1 byte, in which case the
    /// underlying buffer is left untouched.
    pub fn encode_byte(&mut self, value: i64) -> Result<(), ValueEncodeError> {
        let value = match i8::try_from(value) {
            Ok(value) => value,
            Err(_) => {
                return Err(ValueEncodeError::OutOfRange {
                    type_name: "byte",
                    value: value,
                    min: i64::from(i8::MIN),
                    max: i64::from(i8::MAX),
                });
            }
        };
        self.buffer.extend_from_slice(&encode_i8(value));
        Ok(())
    }

    /// Encodes the given value as a 2-byte signed integer.
    ///
    /// Fails if the value does not fit in 2 bytes, in which case the
    /// underlying buffer is left untouched.
    pub fn encode_short(&mut self, value: i64) -> Result<(), ValueEncodeError> {
        let value = match i16::try_from(value) {
            Ok(value) => value,
            Err(_) => {
                return Err(ValueEncodeError::OutOfRange {
                    type_name: "short",
                    value: value,
                    min: i64::from(i16::MIN),
                    max: i64::from(i16::MAX),
                });
            }
        };
        self.buffer.extend_from_slice(&encode_i16(value));
        Ok(())
    }

    /// Encodes the given value as a 4-byte signed integer.
    ///
    /// Fails if the value does not fit in 4 bytes, in which case the
    /// underlying buffer is left untouched.
    pub fn encode_int(&mut self, value: i64) -> Result<(), ValueEncodeError> {
        let value = match i32::try_from(value) {
            Ok(value) => value,
            Err(_) => {
                return Err(ValueEncodeError::OutOfRange {
                    type_name: "int",
                    value: value,
                    min: i64::from(i32::MIN),
                    max: i64::from(i32::MAX),
                });
            }
        };
        self.buffer.extend_from_slice(&encode_i32(value));
        Ok(())
    }

    /// Encodes the given value into the underlying buffer.
    ///
    /// Allows for easy encoding with type inference:
    /// ```ignore
    /// encoder.encode(&value)?;
    /// ```
    pub fn encode<T: ValueEncode>(&mut self, val: &T) -> Result<(), ValueEncodeError> {
        val.encode(self)
    }
}

impl ValueEncode for i8 {
    fn encode(&self, encoder: &mut ValueEncoder) -> Result<(), ValueEncodeError> {
        encoder.encode_byte(i64::from(*self))
    }
}

impl ValueEncode for i16 {
    fn encode(&self, encoder: &mut ValueEncoder) -> Result<(), ValueEncodeError> {
        encoder.encode_short(i64::from(*self))
    }
}

impl ValueEncode for i32 {
    fn encode(&self, encoder: &mut ValueEncoder) -> Result<(), ValueEncodeError> {
        encoder.encode_int(i64::from(*self))
    }
}

/*=======*
 * TESTS *
 *=======*/
