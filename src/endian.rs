// Copyright (c) 2025 skewer contributors
// Licensed under the MIT License:
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN
// THE SOFTWARE.

//! Little-endian read primitives.
//!
//! All positions are absolute byte offsets into a segment and need not be
//! aligned. Callers are responsible for bounds: the layout computations of a
//! `ReaderArena` guarantee that every offset handed to these functions lands
//! inside the segment.
//!
//! 64-bit values are reconstructed from two 32-bit halves, with the
//! low-address half holding the low-order bits. Unsigned 32-bit values are
//! the signed decode's bit pattern reinterpreted.

/// Bit `bit` (LSB-first, `0..8`) of the byte at `position`.
#[inline]
pub fn bit(raw: &[u8], position: usize, bit: u8) -> bool {
    raw[position] & (1 << bit) != 0
}

#[inline]
pub fn int8(raw: &[u8], position: usize) -> i8 {
    raw[position] as i8
}

#[inline]
pub fn uint8(raw: &[u8], position: usize) -> u8 {
    raw[position]
}

#[inline]
pub fn int16(raw: &[u8], position: usize) -> i16 {
    i16::from_le_bytes([raw[position], raw[position + 1]])
}

#[inline]
pub fn uint16(raw: &[u8], position: usize) -> u16 {
    int16(raw, position) as u16
}

#[inline]
pub fn int32(raw: &[u8], position: usize) -> i32 {
    i32::from_le_bytes([
        raw[position],
        raw[position + 1],
        raw[position + 2],
        raw[position + 3],
    ])
}

#[inline]
pub fn uint32(raw: &[u8], position: usize) -> u32 {
    int32(raw, position) as u32
}

#[inline]
pub fn uint64(raw: &[u8], position: usize) -> u64 {
    let low = uint32(raw, position);
    let high = uint32(raw, position + 4);
    (u64::from(high) << 32) | u64::from(low)
}

#[inline]
pub fn int64(raw: &[u8], position: usize) -> i64 {
    uint64(raw, position) as i64
}

#[inline]
pub fn float32(raw: &[u8], position: usize) -> f32 {
    f32::from_bits(uint32(raw, position))
}

#[inline]
pub fn float64(raw: &[u8], position: usize) -> f64 {
    f64::from_bits(uint64(raw, position))
}
