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

//! UTF-8 text blobs.
//!
//! The stored window includes a mandatory trailing nul; a stored length of
//! zero is a format violation caught at dereference time, before any content
//! byte is read. UTF-8 validity is only checked by [`Text::to_str`].

use core::str;

use crate::arena::{ReaderArena, Word};
use crate::error::Error;
use crate::guts::NonboolListGuts;
use crate::layout::NonboolListEncoding;
use crate::traits::FromPointer;
use crate::Result;

/// A nul-terminated text blob.
///
/// Invariant: the stored length is at least 1 (the terminator). Both
/// `deref` and `from_any` enforce this; `intern` trusts its caller to hand
/// over a view that already passed one of them.
#[derive(Clone, Copy)]
pub struct Text<'a> {
    pub guts: NonboolListGuts<'a>,
}

impl<'a> Text<'a> {
    /// Wrap an already-validated text view.
    pub fn intern(guts: NonboolListGuts<'a>) -> Self {
        Self { guts }
    }

    /// Content length in bytes, excluding the terminator.
    pub fn len(&self) -> u32 {
        self.guts.layout.length - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The content bytes, excluding the trailing nul.
    pub fn to_bytes(&self) -> &'a [u8] {
        let begin = self.guts.layout.begin;
        &self.guts.segment.raw[begin..begin + self.guts.layout.length as usize - 1]
    }

    /// The stored bytes, including the trailing nul.
    pub fn to_bytes_with_nul(&self) -> &'a [u8] {
        let begin = self.guts.layout.begin;
        &self.guts.segment.raw[begin..begin + self.guts.layout.length as usize]
    }

    /// Decode the content bytes as UTF-8.
    pub fn to_str(&self) -> Result<&'a str> {
        str::from_utf8(self.to_bytes()).map_err(Error::from)
    }
}

impl<'a> FromPointer<'a> for Text<'a> {
    /// Narrowing applies the same rules as a blob dereference: exactly
    /// byte-width elements, and at least the terminator stored.
    fn from_any(guts: crate::guts::AnyGuts<'a>) -> Result<Self> {
        let guts = NonboolListGuts::from_any(guts)?;
        let found = guts.layout.encoding.flag;
        if found != NonboolListEncoding::BYTE.flag {
            return Err(Error::UnexpectedElementSize {
                expected: NonboolListEncoding::BYTE.flag,
                found,
            });
        }
        if guts.layout.length == 0 {
            return Err(Error::TextMissingNulTerminator);
        }
        Ok(Self::intern(guts))
    }

    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        let guts = NonboolListGuts::deref_blob(level, arena, ref_)?;
        if guts.layout.length == 0 {
            return Err(Error::TextMissingNulTerminator);
        }
        Ok(Self::intern(guts))
    }
}
