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

//! Lists of pointer-typed elements.
//!
//! Each slot holds a nested wire pointer. `get` resolves the slot through
//! the element contract's nullable `get`, so a null slot reads as `None` and
//! a populated one follows the pointer (incrementing the nesting level).
//! Used for lists of lists, of blobs, of capabilities, and of `AnyValue`.

use core::marker::PhantomData;

use crate::arena::{is_null, ReaderArena, Word};
use crate::error::Error;
use crate::guts::NonboolListGuts;
use crate::layout::NonboolListEncoding;
use crate::traits::{FromPointer, IndexMove, ListIter};
use crate::Result;

pub struct Pointers<'a, T> {
    pub guts: NonboolListGuts<'a>,
    marker: PhantomData<T>,
}

impl<'a, T> Clone for Pointers<'a, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T> Copy for Pointers<'a, T> {}

impl<'a, T: FromPointer<'a>> Pointers<'a, T> {
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

    /// Whether slot `index` holds a non-null pointer.
    pub fn has(&self, index: u32) -> Result<bool> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                length: self.len(),
            });
        }
        Ok(!is_null(self.slot(index)))
    }

    /// Resolve slot `index`: `Ok(None)` for a null slot.
    pub fn get(&self, index: u32) -> Result<Option<T>> {
        if index >= self.len() {
            return Err(Error::IndexOutOfBounds {
                index,
                length: self.len(),
            });
        }
        self.at(index)
    }

    // Callers bounds-check `index`.
    fn slot(&self, index: u32) -> Word<'a> {
        Word {
            segment: self.guts.segment,
            position: self.guts.pointers_begin() + index as usize * self.guts.stride() as usize,
        }
    }

    fn at(&self, index: u32) -> Result<Option<T>> {
        T::get(self.guts.level, self.guts.arena, self.slot(index))
    }

    /// A single left-to-right pass over the slots.
    pub fn iter(self) -> ListIter<Self, Result<Option<T>>> {
        let size = self.len();
        ListIter::new(self, size)
    }
}

impl<'a, T: FromPointer<'a>> IndexMove<u32, Result<Option<T>>> for Pointers<'a, T> {
    fn index_move(&self, index: u32) -> Result<Option<T>> {
        self.at(index)
    }
}

impl<'a, T: FromPointer<'a>> FromPointer<'a> for Pointers<'a, T> {
    /// Narrowing re-checks that the stored elements carry pointer slots.
    fn from_any(guts: crate::guts::AnyGuts<'a>) -> Result<Self> {
        let guts = NonboolListGuts::from_any(guts)?;
        guts.check_encoding(NonboolListEncoding::POINTER)?;
        Ok(Self::intern(guts))
    }

    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        Ok(Self::intern(NonboolListGuts::deref(
            level,
            arena,
            ref_,
            NonboolListEncoding::POINTER,
        )?))
    }
}

impl<'a, T: FromPointer<'a>> IntoIterator for Pointers<'a, T> {
    type Item = Result<Option<T>>;
    type IntoIter = ListIter<Self, Result<Option<T>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
