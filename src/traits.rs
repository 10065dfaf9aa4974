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

//! Element contracts and iteration plumbing.
//!
//! The generic containers in [`struct_list`](crate::struct_list),
//! [`pointer_list`](crate::pointer_list), and
//! [`primitive_list`](crate::primitive_list) are parameterized over these
//! traits, instantiated once per concrete element type at compile time.

use core::marker::PhantomData;

use crate::arena::{is_null, ReaderArena, Word};
use crate::guts::{AnyGuts, StructGuts};
use crate::layout::Bytes;
use crate::Result;

/// Contract of any pointer-resolvable type: values, containers, blobs, and
/// capability references all satisfy it.
pub trait FromPointer<'a>: Sized {
    /// Narrow an already-resolved view, failing on shape mismatch. Never
    /// silently coerces.
    fn from_any(guts: AnyGuts<'a>) -> Result<Self>;

    /// Resolve a fresh pointer word into a view of this shape.
    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self>;

    /// Nullable resolve: a wire-null pointer is `Ok(None)`, never an error.
    fn get(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Option<Self>> {
        if is_null(ref_) {
            Ok(None)
        } else {
            Self::deref(level, arena, ref_).map(Some)
        }
    }
}

/// Additional contract of composite (struct) element types: a compiled
/// per-element footprint, and in-place construction from a view that was
/// already validated when the enclosing list pointer was resolved.
pub trait StructElement<'a>: FromPointer<'a> {
    /// The (data, pointers) footprint this element type was compiled
    /// against.
    fn compiled_bytes() -> Bytes;

    /// Wrap a known struct view. No re-validation.
    fn intern(guts: StructGuts<'a>) -> Self;
}

/// Indexed access that hands out an owned element, the engine behind
/// [`ListIter`].
pub trait IndexMove<I, T> {
    fn index_move(&self, index: I) -> T;
}

/// A bounded, non-recursive cursor over a list. List length can never grow
/// the call stack.
pub struct ListIter<T, U> {
    marker: PhantomData<U>,
    list: T,
    index: u32,
    size: u32,
}

impl<T, U> ListIter<T, U> {
    pub fn new(list: T, size: u32) -> Self {
        Self {
            marker: PhantomData,
            list,
            index: 0,
            size,
        }
    }
}

impl<U, T: IndexMove<u32, U>> Iterator for ListIter<T, U> {
    type Item = U;

    fn next(&mut self) -> Option<U> {
        if self.index < self.size {
            let result = self.list.index_move(self.index);
            self.index += 1;
            Some(result)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.size - self.index) as usize;
        (remaining, Some(remaining))
    }
}

impl<U, T: IndexMove<u32, U>> ExactSizeIterator for ListIter<T, U> {
    fn len(&self) -> usize {
        (self.size - self.index) as usize
    }
}

impl<U, T: IndexMove<u32, U>> DoubleEndedIterator for ListIter<T, U> {
    fn next_back(&mut self) -> Option<U> {
        if self.size > self.index {
            self.size -= 1;
            Some(self.list.index_move(self.size))
        } else {
            None
        }
    }
}
