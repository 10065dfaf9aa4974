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

//! Shared test fixtures: an in-memory `ReaderArena` over hand-laid segments,
//! wire-word builders, and a hand-compiled struct reader shaped the way
//! generated code would be.

#![allow(dead_code)]

use std::cell::Cell;

use skewer::arena::{
    Pointer, ReaderArena, Segment, SegmentId, Word, BIT_FLAG, CAP_POINTER, LIST_POINTER,
    STRUCT_POINTER,
};
use skewer::endian;
use skewer::guts::{AnyGuts, StructGuts};
use skewer::layout::{
    BoolListLayout, Bytes, CapLayout, NonboolListEncoding, NonboolListLayout, StructLayout,
};
use skewer::traits::{FromPointer, StructElement};
use skewer::{Error, ListAlignment, PointerShape, Result, Text};

/// A reader arena over in-memory segments. Decodes real wire pointers
/// (near struct/list/cap and single-far indirection) and charges a
/// traversal budget so runaway pointer chains fail instead of spinning.
pub struct TestArena {
    segments: Vec<Vec<u8>>,
    budget: Cell<u64>,
}

impl TestArena {
    pub fn new(segments: Vec<Vec<u8>>) -> Self {
        Self::with_traversal_budget(segments, 1 << 16)
    }

    pub fn single(segment: Vec<u8>) -> Self {
        Self::new(vec![segment])
    }

    pub fn with_traversal_budget(segments: Vec<Vec<u8>>, budget: u64) -> Self {
        Self {
            segments,
            budget: Cell::new(budget),
        }
    }
}

fn shape_of(type_bits: u8) -> PointerShape {
    match type_bits {
        STRUCT_POINTER => PointerShape::Struct,
        LIST_POINTER => PointerShape::List,
        _ => PointerShape::Capability,
    }
}

fn expect_type(p: &Pointer<'_>, wanted: u8, expected: &'static [PointerShape]) -> Result<()> {
    if p.type_bits == wanted {
        Ok(())
    } else {
        Err(Error::PointerType {
            expected,
            found: shape_of(p.type_bits),
        })
    }
}

/// Resolve a near pointer word at `ref_` holding halves `(lo, hi)`.
fn near<'s>(ref_: Word<'s>, lo: u32, hi: u32) -> Result<Pointer<'s>> {
    let type_bits = (lo & 3) as u8;
    if type_bits == CAP_POINTER {
        return Ok(Pointer {
            type_bits,
            hi,
            object: ref_,
        });
    }
    let offset_words = (lo as i32) >> 2;
    let position = ref_.position as i64 + 8 + i64::from(offset_words) * 8;
    if position < 0 || position as usize > ref_.segment.raw.len() {
        return Err(Error::PointerOutOfBounds);
    }
    Ok(Pointer {
        type_bits,
        hi,
        object: Word {
            segment: ref_.segment,
            position: position as usize,
        },
    })
}

impl ReaderArena for TestArena {
    fn segment<'s>(&'s self, id: SegmentId) -> Result<Segment<'s>> {
        match self.segments.get(id as usize) {
            Some(raw) => Ok(Segment { id, raw }),
            None => Err(Error::MissingSegment(id)),
        }
    }

    fn pointer<'s>(&'s self, ref_: Word<'s>) -> Result<Pointer<'s>> {
        let budget = self.budget.get();
        if budget == 0 {
            return Err(Error::NestingLimitExceeded);
        }
        self.budget.set(budget - 1);

        let raw = ref_.segment.raw;
        if ref_.position + 8 > raw.len() {
            return Err(Error::PointerOutOfBounds);
        }
        let lo = endian::uint32(raw, ref_.position);
        let hi = endian::uint32(raw, ref_.position + 4);
        if lo & 3 != 2 {
            return near(ref_, lo, hi);
        }

        // Far pointer: hop to the landing pad in the named segment.
        if lo & 4 != 0 {
            // Double-far landing pads are more than these fixtures need.
            return Err(Error::MalformedPointer);
        }
        let segment = self.segment(hi)?;
        let pad = (lo >> 3) as usize * 8;
        if pad + 8 > segment.raw.len() {
            return Err(Error::PointerOutOfBounds);
        }
        let pad_lo = endian::uint32(segment.raw, pad);
        let pad_hi = endian::uint32(segment.raw, pad + 4);
        if pad_lo & 3 == 2 {
            return Err(Error::MalformedPointer);
        }
        near(
            Word {
                segment,
                position: pad,
            },
            pad_lo,
            pad_hi,
        )
    }

    fn generic_struct_layout(&self, p: &Pointer<'_>) -> Result<StructLayout> {
        expect_type(p, STRUCT_POINTER, &[PointerShape::Struct])?;
        let bytes = Bytes {
            data: (p.hi & 0xffff) * 8,
            pointers: (p.hi >> 16) * 8,
        };
        let data_section = p.object.position;
        let pointers_section = data_section + bytes.data as usize;
        let end = pointers_section + bytes.pointers as usize;
        if end > p.object.segment.raw.len() {
            return Err(Error::PointerOutOfBounds);
        }
        Ok(StructLayout {
            bytes,
            data_section,
            pointers_section,
            end,
        })
    }

    fn specific_struct_layout(&self, p: &Pointer<'_>, _compiled: Bytes) -> Result<StructLayout> {
        // The stored sections always win; readers default anything the
        // compiled footprint expects beyond them.
        self.generic_struct_layout(p)
    }

    fn bool_list_layout(&self, p: &Pointer<'_>) -> Result<BoolListLayout> {
        expect_type(p, LIST_POINTER, &[PointerShape::List])?;
        if p.element_size_flag() != BIT_FLAG {
            return Err(Error::ListAlignment {
                expected: ListAlignment::BitAligned,
                found: ListAlignment::ByteAligned,
            });
        }
        let length = p.hi >> 3;
        let begin = p.object.position;
        if begin + (length as usize + 7) / 8 > p.object.segment.raw.len() {
            return Err(Error::PointerOutOfBounds);
        }
        Ok(BoolListLayout { begin, length })
    }

    fn blob_layout(&self, p: &Pointer<'_>) -> Result<NonboolListLayout> {
        expect_type(p, LIST_POINTER, &[PointerShape::List])?;
        let flag = p.element_size_flag();
        if flag != NonboolListEncoding::BYTE.flag {
            return Err(Error::UnexpectedElementSize {
                expected: NonboolListEncoding::BYTE.flag,
                found: flag,
            });
        }
        let length = p.hi >> 3;
        let begin = p.object.position;
        if begin + length as usize > p.object.segment.raw.len() {
            return Err(Error::PointerOutOfBounds);
        }
        Ok(NonboolListLayout {
            encoding: NonboolListEncoding::BYTE,
            begin,
            length,
        })
    }

    fn specific_nonbool_list_layout(
        &self,
        p: &Pointer<'_>,
        compiled: NonboolListEncoding,
    ) -> Result<NonboolListLayout> {
        let layout = self.generic_nonbool_list_layout(p)?;
        // A stored composite list satisfies any compiled encoding: its tag
        // word fixes the stride and each element's leading bytes line up.
        if layout.encoding.flag == compiled.flag || layout.encoding.flag == 0x07 {
            Ok(layout)
        } else {
            Err(Error::UnexpectedElementSize {
                expected: compiled.flag,
                found: layout.encoding.flag,
            })
        }
    }

    fn generic_nonbool_list_layout(&self, p: &Pointer<'_>) -> Result<NonboolListLayout> {
        expect_type(p, LIST_POINTER, &[PointerShape::List])?;
        let flag = p.element_size_flag();
        if flag == BIT_FLAG {
            return Err(Error::ListAlignment {
                expected: ListAlignment::ByteAligned,
                found: ListAlignment::BitAligned,
            });
        }
        let raw = p.object.segment.raw;
        if flag == 0x07 {
            // Composite: the element count and footprint live in the tag
            // word at the list's start.
            let position = p.object.position;
            if position + 8 > raw.len() {
                return Err(Error::PointerOutOfBounds);
            }
            let tag_lo = endian::uint32(raw, position);
            let tag_hi = endian::uint32(raw, position + 4);
            if tag_lo & 3 != 0 {
                return Err(Error::MalformedPointer);
            }
            let length = tag_lo >> 2;
            let bytes = Bytes {
                data: (tag_hi & 0xffff) * 8,
                pointers: (tag_hi >> 16) * 8,
            };
            let begin = position + 8;
            let body = length as usize * (bytes.data + bytes.pointers) as usize;
            if begin + body > raw.len() {
                return Err(Error::PointerOutOfBounds);
            }
            return Ok(NonboolListLayout {
                encoding: NonboolListEncoding::composite(bytes),
                begin,
                length,
            });
        }
        let encoding = NonboolListEncoding::from_flag(flag).ok_or(Error::MalformedPointer)?;
        let length = p.hi >> 3;
        let begin = p.object.position;
        let body = length as usize * (encoding.bytes.data + encoding.bytes.pointers) as usize;
        if begin + body > raw.len() {
            return Err(Error::PointerOutOfBounds);
        }
        Ok(NonboolListLayout {
            encoding,
            begin,
            length,
        })
    }

    fn cap_layout(&self, p: &Pointer<'_>) -> Result<CapLayout> {
        expect_type(p, CAP_POINTER, &[PointerShape::Capability])?;
        Ok(CapLayout { index: p.hi })
    }
}

/// The root pointer word of segment 0.
pub fn root(arena: &TestArena) -> Word<'_> {
    Word {
        segment: arena.segment(0).unwrap(),
        position: 0,
    }
}

pub fn le_word(lo: u32, hi: u32) -> [u8; 8] {
    let mut word = [0; 8];
    word[..4].copy_from_slice(&lo.to_le_bytes());
    word[4..].copy_from_slice(&hi.to_le_bytes());
    word
}

/// Struct pointer: signed word offset from the end of the pointer word,
/// then data and pointer section word counts.
pub fn struct_pointer(offset_words: i32, data_words: u16, pointer_words: u16) -> [u8; 8] {
    le_word(
        (offset_words << 2) as u32,
        u32::from(data_words) | u32::from(pointer_words) << 16,
    )
}

/// List pointer: word offset, 3-bit element-size flag, and element count
/// (word count of the body, for composite lists).
pub fn list_pointer(offset_words: i32, flag: u8, count: u32) -> [u8; 8] {
    le_word((offset_words << 2) as u32 | 1, count << 3 | u32::from(flag))
}

/// The tag word at the start of a composite list body.
pub fn composite_tag(count: u32, data_words: u16, pointer_words: u16) -> [u8; 8] {
    le_word(
        count << 2,
        u32::from(data_words) | u32::from(pointer_words) << 16,
    )
}

pub fn cap_pointer(index: u32) -> [u8; 8] {
    le_word(u32::from(CAP_POINTER), index)
}

/// Single-far pointer into `segment` at `word_offset`.
pub fn far_pointer(segment: u32, word_offset: u32) -> [u8; 8] {
    le_word(word_offset << 3 | 2, segment)
}

pub fn null_pointer() -> [u8; 8] {
    [0; 8]
}

/// Flatten words into one segment buffer.
pub fn seg(words: &[[u8; 8]]) -> Vec<u8> {
    words.iter().flatten().copied().collect()
}

/// Bytes padded out to a whole word.
pub fn byte_word(bytes: &[u8]) -> [u8; 8] {
    assert!(bytes.len() <= 8);
    let mut word = [0; 8];
    word[..bytes.len()].copy_from_slice(bytes);
    word
}

/// A hand-compiled struct reader, shaped the way generated code would be.
///
/// Schema v2 footprint: two data words and two pointers. Fields: `kind`
/// discriminant at data offset 0, `age` at offset 2, `rank` at offset 8
/// (second data word, new in v2), `name` at pointer offset 0, `email` at
/// pointer offset 8 (new in v2). Data written under v1 (one data word, one
/// pointer) must read with `rank` defaulting to 0 and `email` absent.
pub struct PersonReader<'a> {
    pub guts: StructGuts<'a>,
}

impl<'a> PersonReader<'a> {
    pub fn kind(&self) -> u16 {
        self.guts.get_tag(0)
    }

    pub fn expect_kind(&self, expected: u16) -> Result<()> {
        self.guts.check_tag(expected, 0)
    }

    pub fn age(&self) -> u16 {
        self.guts.get_tag(2)
    }

    pub fn rank(&self) -> u16 {
        self.guts.get_tag(8)
    }

    pub fn name(&self) -> Result<Option<Text<'a>>> {
        match self.guts.pointers_word(0) {
            Some(word) => Text::get(self.guts.level, self.guts.arena, word),
            None => Ok(None),
        }
    }

    pub fn email(&self) -> Result<Option<Text<'a>>> {
        match self.guts.pointers_word(8) {
            Some(word) => Text::get(self.guts.level, self.guts.arena, word),
            None => Ok(None),
        }
    }
}

impl<'a> FromPointer<'a> for PersonReader<'a> {
    fn from_any(guts: AnyGuts<'a>) -> Result<Self> {
        Ok(Self {
            guts: StructGuts::from_any(guts)?,
        })
    }

    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        Ok(Self {
            guts: StructGuts::deref(level, arena, ref_, Self::compiled_bytes())?,
        })
    }
}

impl<'a> StructElement<'a> for PersonReader<'a> {
    fn compiled_bytes() -> Bytes {
        Bytes {
            data: 16,
            pointers: 16,
        }
    }

    fn intern(guts: StructGuts<'a>) -> Self {
        Self { guts }
    }
}
