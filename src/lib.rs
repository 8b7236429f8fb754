//! Binary codec primitives for the Internet Printing Protocol wire format.
//!
//! IPP packs all of its integer values in fixed widths, most significant
//! byte first, negative values in two's complement. This crate provides the
//! conversions between those byte representations and native signed
//! integers, along with a cursor-based decoder and an appending encoder
//! built on top of them for use by the surrounding message codec.

mod signed;
mod value_codec;

pub use crate::signed::{
    decode_i16, decode_i32, decode_i8, encode_i16, encode_i32, encode_i8, BYTE_LEN, INT_LEN,
    SHORT_LEN,
};
pub use crate::value_codec::{
    decode_value, ValueDecode, ValueDecodeError, ValueDecoder, ValueEncode, ValueEncodeError,
    ValueEncoder,
};
