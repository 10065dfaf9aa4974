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

//! Lists of composite (struct) elements.
//!
//! Each element is a fixed-width record carved out of the list body in
//! place: `get` computes the element's byte window from the *stored* stride
//! and hands it to the element type's `intern`, with no per-element
//! re-validation. The stored stride may be narrower or wider than the
//! element's compiled footprint; the struct view's bounds rules make either
//! read safely.

use core::marker::PhantomData;

use crate::arena::{ReaderArena, Word};
use crate::error::Error;
use crate::guts::NonboolListGuts;
use crate::layout::NonboolListEncoding;
use crate::traits::{FromPointer, IndexMove, ListIter, StructElement};
use crate::Result;

pub struct Structs<'a, T> {
    pub guts: NonboolListGuts<'a>,
    marker: PhantomData<T>,
}

impl<'a, T> Clone for Structs<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Structs<'a, T> {}

impl<'a, T: StructElement<'a>> Structs<'a, T> {
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
        let stride = self.guts.stride() as usize;
        let data_section = self.guts.layout.begin + index as usize * stride;
        T::intern(self.guts.inline_struct(data_section, data_section + stride))
    }

    /// A single left-to-right pass over `[begin, begin + length * stride)`.
    pub fn iter(self) -> ListIter<Self, T> {
        let size = self.len();
        ListIter::new(self, size)
    }
}

impl<'a, T: StructElement<'a>> IndexMove<u32, T> for Structs<'a, T> {
    fn index_move(&self, index: u32) -> T {
        self.at(index)
    }
}

impl<'a, T: StructElement<'a>> FromPointer<'a> for Structs<'a, T> {
    fn from_any(guts: crate::guts::AnyGuts<'a>) -> Result<Self> {
        Ok(Self::intern(NonboolListGuts::from_any(guts)?))
    }

    /// Resolve with the element's compiled footprint fixed at compile time.
    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        let compiled = NonboolListEncoding::composite(T::compiled_bytes());
        Ok(Self::intern(NonboolListGuts::deref(
            level, arena, ref_, compiled,
        )?))
    }
}

impl<'a, T: StructElement<'a>> IntoIterator for Structs<'a, T> {
    type Item = T;
    type IntoIter = ListIter<Self, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
