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

//! Layout descriptors.
//!
//! A layout is a plain value fully describing the byte shape of one
//! dereferenced object. Layouts are produced by a
//! [`ReaderArena`](crate::arena::ReaderArena) while resolving a pointer and
//! are immutable from then on; all offsets are absolute byte positions within
//! the target segment.

/// Per-element (or per-struct) byte counts of the data section and the
/// pointer section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bytes {
    pub data: u32,
    pub pointers: u32,
}

impl Bytes {
    pub const ZERO: Self = Self {
        data: 0,
        pointers: 0,
    };
}

/// Byte shape of a struct: `[data_section, pointers_section)` holds data
/// fields, `[pointers_section, end)` holds pointer fields.
///
/// `bytes` is the footprint the struct was *compiled* for; the section
/// offsets describe what is actually *stored*, which may be narrower (older
/// data) or wider (newer data) than the compiled footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StructLayout {
    pub bytes: Bytes,
    pub data_section: usize,
    pub pointers_section: usize,
    pub end: usize,
}

/// Byte shape of a bit-packed boolean list: `length` bits starting at byte
/// `begin`, LSB-first within each byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoolListLayout {
    pub begin: usize,
    pub length: u32,
}

/// Element encoding of a byte-aligned list: the wire's 3-bit element-size
/// flag together with the element's data/pointer footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NonboolListEncoding {
    pub flag: u8,
    pub bytes: Bytes,
}

impl NonboolListEncoding {
    pub const VOID: Self = Self::plain(0x00, 0);
    pub const BYTE: Self = Self::plain(0x02, 1);
    pub const TWO_BYTES: Self = Self::plain(0x03, 2);
    pub const FOUR_BYTES: Self = Self::plain(0x04, 4);
    pub const EIGHT_BYTES: Self = Self::plain(0x05, 8);
    pub const POINTER: Self = Self {
        flag: 0x06,
        bytes: Bytes {
            data: 0,
            pointers: 8,
        },
    };

    const fn plain(flag: u8, data: u32) -> Self {
        Self {
            flag,
            bytes: Bytes { data, pointers: 0 },
        }
    }

    /// Encoding of a composite (struct) list, whose per-element footprint
    /// comes from the list's tag word or from compiled schema knowledge.
    pub const fn composite(bytes: Bytes) -> Self {
        Self { flag: 0x07, bytes }
    }

    /// Encoding named by a wire element-size flag. `None` for `0x01` (bit
    /// alignment, which has no byte encoding) and `0x07` (composite, whose
    /// footprint is not determined by the flag alone).
    pub const fn from_flag(flag: u8) -> Option<Self> {
        match flag {
            0x00 => Some(Self::VOID),
            0x02 => Some(Self::BYTE),
            0x03 => Some(Self::TWO_BYTES),
            0x04 => Some(Self::FOUR_BYTES),
            0x05 => Some(Self::EIGHT_BYTES),
            0x06 => Some(Self::POINTER),
            _ => None,
        }
    }
}

/// Byte shape of a byte-aligned list: `length` elements of shape `encoding`
/// starting at byte `begin`. Blobs are byte lists whose `length` counts
/// bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NonboolListLayout {
    pub encoding: NonboolListEncoding,
    pub begin: usize,
    pub length: u32,
}

/// A capability reference: an index into the message's capability table.
/// The only layout with no segment-resident payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapLayout {
    pub index: u32,
}
