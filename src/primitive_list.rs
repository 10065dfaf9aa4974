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

//! Lists of primitives.
//!
//! One bounds-checked linear-scan skeleton, [`Primitives`], parameterized by
//! a per-element decode function and instantiated once per numeric width;
//! plus the bit-addressed [`BoolList`], which has no stride at all. Element
//! positions go through the stored stride, so data written by a different
//! schema revision still reads each element's leading bytes correctly.

use core::marker::PhantomData;

use crate::arena::{ReaderArena, Word};
use crate::endian;
use crate::error::Error;
use crate::guts::{BoolListGuts, NonboolListGuts};
use crate::layout::NonboolListEncoding;
use crate::traits::{FromPointer, IndexMove, ListIter};
use crate::Result;

/// A fixed-width element of a byte-aligned list.
pub trait PrimitiveElement: Sized {
    /// The list encoding this element type is compiled for.
    const ENCODING: NonboolListEncoding;

    /// Decode one element at absolute byte `position`.
    fn decode(raw: &[u8], position: usize) -> Self;
}

impl PrimitiveElement for () {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::VOID;

    fn decode(_raw: &[u8], _position: usize) {}
}

impl PrimitiveElement for i8 {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::BYTE;

    fn decode(raw: &[u8], position: usize) -> Self {
        endian::int8(raw, position)
    }
}

impl PrimitiveElement for u8 {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::BYTE;

    fn decode(raw: &[u8], position: usize) -> Self {
        endian::uint8(raw, position)
    }
}

impl PrimitiveElement for i16 {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::TWO_BYTES;

    fn decode(raw: &[u8], position: usize) -> Self {
        endian::int16(raw, position)
    }
}

impl PrimitiveElement for u16 {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::TWO_BYTES;

    fn decode(raw: &[u8], position: usize) -> Self {
        endian::uint16(raw, position)
    }
}

impl PrimitiveElement for i32 {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::FOUR_BYTES;

    fn decode(raw: &[u8], position: usize) -> Self {
        endian::int32(raw, position)
    }
}

impl PrimitiveElement for u32 {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::FOUR_BYTES;

    fn decode(raw: &[u8], position: usize) -> Self {
        endian::uint32(raw, position)
    }
}

impl PrimitiveElement for i64 {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::EIGHT_BYTES;

    fn decode(raw: &[u8], position: usize) -> Self {
        endian::int64(raw, position)
    }
}

impl PrimitiveElement for u64 {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::EIGHT_BYTES;

    fn decode(raw: &[u8], position: usize) -> Self {
        endian::uint64(raw, position)
    }
}

impl PrimitiveElement for f32 {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::FOUR_BYTES;

    fn decode(raw: &[u8], position: usize) -> Self {
        endian::float32(raw, position)
    }
}

impl PrimitiveElement for f64 {
    const ENCODING: NonboolListEncoding = NonboolListEncoding::EIGHT_BYTES;

    fn decode(raw: &[u8], position: usize) -> Self {
        endian::float64(raw, position)
    }
}

pub struct Primitives<'a, T> {
    pub guts: NonboolListGuts<'a>,
    marker: PhantomData<T>,
}

impl<'a, T> Clone for Primitives<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Primitives<'a, T> {}

impl<'a, T: PrimitiveElement> Primitives<'a, T> {
    /// Wrap an already-validated list view.
    pub fn intern(guts: NonboolListGuts<'a>) -> Self {
        Self {
            guts,
            marker: PhantomData,
        }
    }

    pub fn len(&self) -> u32 {
        self.guts.layout.length
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The element at `index`.
    pub fn get(&self, index: u32) -> Result<T> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                length: self.len(),
            });
        }
        Ok(self.at(index))
    }

    pub fn try_get(&self, index: u32) -> Option<T> {
        (index < self.len()).then(|| self.at(index))
    }

    // Callers bounds-check `index`.
    fn at(&self, index: u32) -> T {
        T::decode(
            self.guts.segment.raw,
            self.guts.layout.begin + index as usize * self.guts.stride() as usize,
        )
    }

    /// A single left-to-right pass, never reading outside
    /// `[begin, begin + length * stride)`.
    pub fn iter(self) -> ListIter<Self, T> {
        let size = self.len();
        ListIter::new(self, size)
    }
}

impl<'a, T: PrimitiveElement> IndexMove<u32, T> for Primitives<'a, T> {
    fn index_move(&self, index: u32) -> T {
        self.at(index)
    }
}

impl<'a, T: PrimitiveElement> FromPointer<'a> for Primitives<'a, T> {
    /// Narrowing re-checks the stored element width, so an already-resolved
    /// list can never be read at the wrong stride.
    fn from_any(guts: crate::guts::AnyGuts<'a>) -> Result<Self> {
        let guts = NonboolListGuts::from_any(guts)?;
        guts.check_encoding(T::ENCODING)?;
        Ok(Self::intern(guts))
    }

    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        Ok(Self::intern(NonboolListGuts::deref(
            level,
            arena,
            ref_,
            T::ENCODING,
        )?))
    }
}

impl<'a, T: PrimitiveElement> IntoIterator for Primitives<'a, T> {
    type Item = T;
    type IntoIter = ListIter<Self, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

pub type VoidList<'a> = Primitives<'a, ()>;
pub type Int8List<'a> = Primitives<'a, i8>;
pub type Int16List<'a> = Primitives<'a, i16>;
pub type Int32List<'a> = Primitives<'a, i32>;
pub type Int64List<'a> = Primitives<'a, i64>;
pub type UInt8List<'a> = Primitives<'a, u8>;
pub type UInt16List<'a> = Primitives<'a, u16>;
pub type UInt32List<'a> = Primitives<'a, u32>;
pub type UInt64List<'a> = Primitives<'a, u64>;
pub type Float32List<'a> = Primitives<'a, f32>;
pub type Float64List<'a> = Primitives<'a, f64>;

/// A bit-packed boolean list. Every element is exactly one bit; there is no
/// stride.
#[derive(Clone, Copy)]
pub struct BoolList<'a> {
    pub guts: BoolListGuts<'a>,
}

impl<'a> BoolList<'a> {
    /// Wrap an already-validated list view.
    pub fn intern(guts: BoolListGuts<'a>) -> Self {
        Self { guts }
    }

    pub fn len(&self) -> u32 {
        self.guts.layout.length
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bit at `index`.
    pub fn get(&self, index: u32) -> Result<bool> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                length: self.len(),
            });
        }
        Ok(self.guts.bit(index))
    }

    pub fn try_get(&self, index: u32) -> Option<bool> {
        (index < self.len()).then(|| self.guts.bit(index))
    }

    pub fn iter(self) -> ListIter<Self, bool> {
        let size = self.len();
        ListIter::new(self, size)
    }
}

impl<'a> IndexMove<u32, bool> for BoolList<'a> {
    fn index_move(&self, index: u32) -> bool {
        self.guts.bit(index)
    }
}

impl<'a> FromPointer<'a> for BoolList<'a> {
    fn from_any(guts: crate::guts::AnyGuts<'a>) -> Result<Self> {
        Ok(Self::intern(BoolListGuts::from_any(guts)?))
    }

    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        Ok(Self::intern(BoolListGuts::deref(level, arena, ref_)?))
    }
}

impl<'a> IntoIterator for BoolList<'a> {
    type Item = bool;
    type IntoIter = ListIter<Self, bool>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
