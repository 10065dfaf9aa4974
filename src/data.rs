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

//! Raw byte blobs.

use crate::arena::{ReaderArena, Word};
use crate::error::Error;
use crate::guts::NonboolListGuts;
use crate::layout::NonboolListEncoding;
use crate::traits::FromPointer;
use crate::Result;

/// A sequence of bytes, exposed verbatim as a borrowed slice of its segment.
#[derive(Clone, Copy)]
pub struct Data<'a> {
    pub guts: NonboolListGuts<'a>,
}

impl<'a> Data<'a> {
    /// Wrap an already-validated blob view.
    pub fn intern(guts: NonboolListGuts<'a>) -> Self {
        Self { guts }
    }

    pub fn len(&self) -> u32 {
        self.guts.layout.length
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The byte window `[begin, begin + length)`, uncopied.
    pub fn as_bytes(&self) -> &'a [u8] {
        let begin = self.guts.layout.begin;
        &self.guts.segment.raw[begin..begin + self.guts.layout.length as usize]
    }
}

impl<'a> FromPointer<'a> for Data<'a> {
    /// Narrowing requires exactly byte-width elements, the same rule a blob
    /// dereference applies. Composite storage is not a blob.
    fn from_any(guts: crate::guts::AnyGuts<'a>) -> Result<Self> {
        let guts = NonboolListGuts::from_any(guts)?;
        let found = guts.layout.encoding.flag;
        if found != NonboolListEncoding::BYTE.flag {
            return Err(Error::UnexpectedElementSize {
                expected: NonboolListEncoding::BYTE.flag,
                found,
            });
        }
        Ok(Self::intern(guts))
    }

    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        Ok(Self::intern(NonboolListGuts::deref_blob(
            level, arena, ref_,
        )?))
    }
}
