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

//! Shape-specific read views.
//!
//! A "guts" value pairs a [`layout`](crate::layout) descriptor with the
//! context needed to read it: the arena, the target segment, and the nesting
//! level reached to get there. Guts are immutable views constructed once per
//! access path; constructing one never touches the segment's bytes, and the
//! `deref` constructors increment `level` by exactly one per pointer
//! followed.

use crate::arena::{Pointer, ReaderArena, Segment, Word, BIT_FLAG, LIST_POINTER, STRUCT_POINTER};
use crate::endian;
use crate::error::{Error, ListAlignment, PointerShape};
use crate::layout::{
    BoolListLayout, Bytes, CapLayout, NonboolListEncoding, NonboolListLayout, StructLayout,
};
use crate::Result;

/// Read view of a struct.
#[derive(Clone, Copy)]
pub struct StructGuts<'a> {
    pub level: u32,
    pub arena: &'a dyn ReaderArena,
    pub segment: Segment<'a>,
    pub layout: StructLayout,
}

impl<'a> StructGuts<'a> {
    /// Narrow an unknown-shape view to a struct view.
    pub fn from_any(guts: AnyGuts<'a>) -> Result<Self> {
        match guts {
            AnyGuts::Struct(s) => Ok(s),
            other => Err(Error::PointerType {
                expected: &[PointerShape::Struct],
                found: other.shape(),
            }),
        }
    }

    /// Resolve `ref_` as a struct pointer for an accessor compiled against
    /// the footprint `compiled`.
    pub fn deref(
        level: u32,
        arena: &'a dyn ReaderArena,
        ref_: Word<'a>,
        compiled: Bytes,
    ) -> Result<Self> {
        let p = arena.pointer(ref_)?;
        let layout = arena.specific_struct_layout(&p, compiled)?;
        Ok(Self {
            level: level + 1,
            arena,
            segment: p.object.segment,
            layout,
        })
    }

    /// Resolve `ref_` as a struct pointer with whatever footprint is stored.
    pub fn deref_generic(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        let p = arena.pointer(ref_)?;
        let layout = arena.generic_struct_layout(&p)?;
        Ok(Self {
            level: level + 1,
            arena,
            segment: p.object.segment,
            layout,
        })
    }

    /// The all-defaults struct: zero-width sections at the start of
    /// segment 0. Every field read through it yields its default.
    pub fn empty(arena: &'a dyn ReaderArena) -> Result<Self> {
        Ok(Self {
            level: 0,
            arena,
            segment: arena.segment(0)?,
            layout: StructLayout {
                bytes: Bytes::ZERO,
                data_section: 0,
                pointers_section: 0,
                end: 0,
            },
        })
    }

    /// The u16 field at `data_section + offset`, or 0 when those two bytes
    /// would cross into the pointer section. Data written under an older,
    /// narrower schema therefore reads as defaulted, never as garbage.
    pub fn get_tag(&self, offset: usize) -> u16 {
        let position = self.layout.data_section + offset;
        if position + 2 <= self.layout.pointers_section {
            endian::uint16(self.segment.raw, position)
        } else {
            0
        }
    }

    /// Check an explicitly stored union discriminant against the value the
    /// accessor was compiled for.
    pub fn check_tag(&self, expected: u16, offset: usize) -> Result<()> {
        let found = self.get_tag(offset);
        if found == expected {
            Ok(())
        } else {
            Err(Error::IncorrectTag { expected, found })
        }
    }

    /// Coordinate of the pointer field `offset` bytes into the pointer
    /// section, or `None` when the stored struct is too narrow to have it.
    /// The same forward-compatibility rule as [`get_tag`](Self::get_tag),
    /// applied to pointer fields.
    pub fn pointers_word(&self, offset: usize) -> Option<Word<'a>> {
        let position = self.layout.pointers_section + offset;
        if position < self.layout.end {
            Some(Word {
                segment: self.segment,
                position,
            })
        } else {
            None
        }
    }
}

/// Read view of a bit-packed boolean list.
#[derive(Clone, Copy)]
pub struct BoolListGuts<'a> {
    pub level: u32,
    pub arena: &'a dyn ReaderArena,
    pub segment: Segment<'a>,
    pub layout: BoolListLayout,
}

impl<'a> BoolListGuts<'a> {
    /// Narrow an unknown-shape view to a bit-list view. A byte-aligned list
    /// is an alignment mismatch, not a pointer-type mismatch.
    pub fn from_any(guts: AnyGuts<'a>) -> Result<Self> {
        match guts {
            AnyGuts::BoolList(b) => Ok(b),
            AnyGuts::NonboolList(_) => Err(Error::ListAlignment {
                expected: ListAlignment::BitAligned,
                found: ListAlignment::ByteAligned,
            }),
            other => Err(Error::PointerType {
                expected: &[PointerShape::List],
                found: other.shape(),
            }),
        }
    }

    pub fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        let p = arena.pointer(ref_)?;
        let layout = arena.bool_list_layout(&p)?;
        Ok(Self {
            level: level + 1,
            arena,
            segment: p.object.segment,
            layout,
        })
    }

    /// Bit `index`: bit `index & 7` (LSB-first) of byte
    /// `begin + (index >> 3)`. Callers bounds-check `index` first.
    pub fn bit(&self, index: u32) -> bool {
        endian::bit(
            self.segment.raw,
            self.layout.begin + (index >> 3) as usize,
            (index & 7) as u8,
        )
    }
}

/// Read view of a byte-aligned list.
#[derive(Clone, Copy)]
pub struct NonboolListGuts<'a> {
    pub level: u32,
    pub arena: &'a dyn ReaderArena,
    pub segment: Segment<'a>,
    pub layout: NonboolListLayout,
}

impl<'a> NonboolListGuts<'a> {
    /// Narrow an unknown-shape view to a byte-aligned-list view. A bit list
    /// is an alignment mismatch, not a pointer-type mismatch.
    pub fn from_any(guts: AnyGuts<'a>) -> Result<Self> {
        match guts {
            AnyGuts::NonboolList(l) => Ok(l),
            AnyGuts::BoolList(_) => Err(Error::ListAlignment {
                expected: ListAlignment::ByteAligned,
                found: ListAlignment::BitAligned,
            }),
            other => Err(Error::PointerType {
                expected: &[PointerShape::List],
                found: other.shape(),
            }),
        }
    }

    /// Resolve `ref_` as a list of elements encoded as `compiled`.
    pub fn deref(
        level: u32,
        arena: &'a dyn ReaderArena,
        ref_: Word<'a>,
        compiled: NonboolListEncoding,
    ) -> Result<Self> {
        let p = arena.pointer(ref_)?;
        let layout = arena.specific_nonbool_list_layout(&p, compiled)?;
        Ok(Self {
            level: level + 1,
            arena,
            segment: p.object.segment,
            layout,
        })
    }

    /// Resolve `ref_` as a list with whatever element encoding is stored.
    pub fn deref_generic(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        let p = arena.pointer(ref_)?;
        let layout = arena.generic_nonbool_list_layout(&p)?;
        Ok(Self {
            level: level + 1,
            arena,
            segment: p.object.segment,
            layout,
        })
    }

    /// Resolve `ref_` as a blob, a byte list whose length counts bytes.
    pub fn deref_blob(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        let p = arena.pointer(ref_)?;
        let layout = arena.blob_layout(&p)?;
        Ok(Self {
            level: level + 1,
            arena,
            segment: p.object.segment,
            layout,
        })
    }

    /// Check the stored element encoding against an accessor's compiled
    /// encoding. A stored composite list satisfies any byte-aligned
    /// accessor: its tag word fixes the stride and each element's leading
    /// bytes and pointer sub-section line up. Any other disagreement is an
    /// element-size mismatch.
    pub fn check_encoding(&self, compiled: NonboolListEncoding) -> Result<()> {
        let found = self.layout.encoding.flag;
        if found == compiled.flag || found == 0x07 {
            Ok(())
        } else {
            Err(Error::UnexpectedElementSize {
                expected: compiled.flag,
                found,
            })
        }
    }

    /// Distance in bytes between consecutive elements: data bytes plus
    /// pointer bytes per element.
    pub fn stride(&self) -> u32 {
        self.layout.encoding.bytes.data + self.layout.encoding.bytes.pointers
    }

    /// Start of the first element's pointer sub-section. Meaningful for
    /// composite and pointer encodings.
    pub fn pointers_begin(&self) -> usize {
        self.layout.begin + self.layout.encoding.bytes.data as usize
    }

    /// Struct view over one element's byte window `[data_section, end)`,
    /// constructed in place: no pointer is followed, so the view stays at
    /// this list's level.
    pub fn inline_struct(&self, data_section: usize, end: usize) -> StructGuts<'a> {
        StructGuts {
            level: self.level,
            arena: self.arena,
            segment: self.segment,
            layout: StructLayout {
                bytes: self.layout.encoding.bytes,
                data_section,
                pointers_section: data_section + self.layout.encoding.bytes.data as usize,
                end,
            },
        }
    }
}

/// Read view of a capability reference. Nothing segment-resident beyond the
/// table index itself.
#[derive(Clone, Copy)]
pub struct CapGuts {
    pub layout: CapLayout,
}

impl CapGuts {
    pub fn from_any(guts: AnyGuts<'_>) -> Result<Self> {
        match guts {
            AnyGuts::Cap(c) => Ok(c),
            other => Err(Error::PointerType {
                expected: &[PointerShape::Capability],
                found: other.shape(),
            }),
        }
    }

    pub fn deref(arena: &dyn ReaderArena, ref_: Word<'_>) -> Result<Self> {
        let p = arena.pointer(ref_)?;
        Ok(Self {
            layout: arena.cap_layout(&p)?,
        })
    }

    /// The wire form: tag byte `0x03`, three zero bytes, then the
    /// little-endian table index.
    pub fn wire_bytes(&self) -> [u8; 8] {
        let mut word = [0; 8];
        word[0] = 0x03;
        word[4..8].copy_from_slice(&self.layout.index.to_le_bytes());
        word
    }
}

/// The shape union: one variant per read view.
#[derive(Clone, Copy)]
pub enum AnyGuts<'a> {
    Struct(StructGuts<'a>),
    BoolList(BoolListGuts<'a>),
    NonboolList(NonboolListGuts<'a>),
    Cap(CapGuts),
}

impl<'a> AnyGuts<'a> {
    /// The primary shape, as named in mismatch errors. Both list variants
    /// are "list" at this level.
    pub fn shape(&self) -> PointerShape {
        match self {
            Self::Struct(_) => PointerShape::Struct,
            Self::BoolList(_) | Self::NonboolList(_) => PointerShape::List,
            Self::Cap(_) => PointerShape::Capability,
        }
    }

    /// Resolve `ref_` into whichever view its runtime tag calls for. List
    /// pointers branch again on the embedded element-size flag: bit-aligned
    /// lists get a [`BoolListGuts`], everything else a [`NonboolListGuts`].
    pub fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        let p = arena.pointer(ref_)?;
        match p.type_bits {
            STRUCT_POINTER => Ok(Self::Struct(StructGuts {
                level: level + 1,
                arena,
                segment: p.object.segment,
                layout: arena.generic_struct_layout(&p)?,
            })),
            LIST_POINTER => {
                if p.element_size_flag() == BIT_FLAG {
                    Ok(Self::BoolList(BoolListGuts {
                        level: level + 1,
                        arena,
                        segment: p.object.segment,
                        layout: arena.bool_list_layout(&p)?,
                    }))
                } else {
                    Ok(Self::NonboolList(NonboolListGuts {
                        level: level + 1,
                        arena,
                        segment: p.object.segment,
                        layout: arena.generic_nonbool_list_layout(&p)?,
                    }))
                }
            }
            _ => Ok(Self::Cap(CapGuts {
                layout: arena.cap_layout(&p)?,
            })),
        }
    }
}

impl<'a> From<StructGuts<'a>> for AnyGuts<'a> {
    fn from(guts: StructGuts<'a>) -> Self {
        Self::Struct(guts)
    }
}

impl<'a> From<BoolListGuts<'a>> for AnyGuts<'a> {
    fn from(guts: BoolListGuts<'a>) -> Self {
        Self::BoolList(guts)
    }
}

impl<'a> From<NonboolListGuts<'a>> for AnyGuts<'a> {
    fn from(guts: NonboolListGuts<'a>) -> Self {
        Self::NonboolList(guts)
    }
}

impl<'a> From<CapGuts> for AnyGuts<'a> {
    fn from(guts: CapGuts) -> Self {
        Self::Cap(guts)
    }
}

/// The sub-union of the two list views.
#[derive(Clone, Copy)]
pub enum ListGuts<'a> {
    Bool(BoolListGuts<'a>),
    Nonbool(NonboolListGuts<'a>),
}

impl<'a> ListGuts<'a> {
    pub fn from_any(guts: AnyGuts<'a>) -> Result<Self> {
        match guts {
            AnyGuts::BoolList(b) => Ok(Self::Bool(b)),
            AnyGuts::NonboolList(l) => Ok(Self::Nonbool(l)),
            other => Err(Error::PointerType {
                expected: &[PointerShape::List],
                found: other.shape(),
            }),
        }
    }

    pub fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        let p = arena.pointer(ref_)?;
        if p.element_size_flag() == BIT_FLAG && p.type_bits == LIST_POINTER {
            Ok(Self::Bool(BoolListGuts {
                level: level + 1,
                arena,
                segment: p.object.segment,
                layout: arena.bool_list_layout(&p)?,
            }))
        } else {
            Ok(Self::Nonbool(NonboolListGuts {
                level: level + 1,
                arena,
                segment: p.object.segment,
                layout: arena.generic_nonbool_list_layout(&p)?,
            }))
        }
    }
}

impl<'a> From<ListGuts<'a>> for AnyGuts<'a> {
    fn from(guts: ListGuts<'a>) -> Self {
        match guts {
            ListGuts::Bool(b) => Self::BoolList(b),
            ListGuts::Nonbool(l) => Self::NonboolList(l),
        }
    }
}
