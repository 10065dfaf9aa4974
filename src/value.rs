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

//! Polymorphic value wrappers.
//!
//! The entry points for reading a pointer whose shape is not statically
//! known, or only known to the primary-tag level. Each wrapper holds a
//! resolved view and can narrow it further with `get_as`, which either
//! succeeds exactly or fails with the narrowing error.

use crate::arena::{ReaderArena, Word};
use crate::guts::{AnyGuts, CapGuts, ListGuts, StructGuts};
use crate::traits::{FromPointer, StructElement};
use crate::Result;

/// A value of any shape.
#[derive(Clone, Copy)]
pub struct AnyValue<'a> {
    pub guts: AnyGuts<'a>,
}

impl<'a> AnyValue<'a> {
    pub fn intern(guts: AnyGuts<'a>) -> Self {
        Self { guts }
    }

    /// Narrow to a caller-requested shape.
    pub fn get_as<T: FromPointer<'a>>(&self) -> Result<T> {
        T::from_any(self.guts)
    }
}

impl<'a> FromPointer<'a> for AnyValue<'a> {
    fn from_any(guts: AnyGuts<'a>) -> Result<Self> {
        Ok(Self { guts })
    }

    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        Ok(Self {
            guts: AnyGuts::deref(level, arena, ref_)?,
        })
    }
}

/// A value already known to be a struct.
#[derive(Clone, Copy)]
pub struct StructValue<'a> {
    pub guts: StructGuts<'a>,
}

impl<'a> StructValue<'a> {
    pub fn intern(guts: StructGuts<'a>) -> Self {
        Self { guts }
    }

    /// Reinterpret as a compiled struct reader. The shape was validated when
    /// this value was constructed, so this cannot fail.
    pub fn get_as<T: StructElement<'a>>(&self) -> T {
        T::intern(self.guts)
    }
}

impl<'a> FromPointer<'a> for StructValue<'a> {
    fn from_any(guts: AnyGuts<'a>) -> Result<Self> {
        Ok(Self {
            guts: StructGuts::from_any(guts)?,
        })
    }

    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        Ok(Self {
            guts: StructGuts::deref_generic(level, arena, ref_)?,
        })
    }
}

/// A value already known to be a list, of either alignment.
#[derive(Clone, Copy)]
pub struct ListValue<'a> {
    pub guts: ListGuts<'a>,
}

impl<'a> ListValue<'a> {
    pub fn intern(guts: ListGuts<'a>) -> Self {
        Self { guts }
    }

    /// Narrow to a concrete list type; a bit- versus byte-alignment
    /// disagreement surfaces as the alignment error.
    pub fn get_as<T: FromPointer<'a>>(&self) -> Result<T> {
        T::from_any(self.guts.into())
    }
}

impl<'a> FromPointer<'a> for ListValue<'a> {
    fn from_any(guts: AnyGuts<'a>) -> Result<Self> {
        Ok(Self {
            guts: ListGuts::from_any(guts)?,
        })
    }

    fn deref(level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        Ok(Self {
            guts: ListGuts::deref(level, arena, ref_)?,
        })
    }
}

/// A capability reference.
#[derive(Clone, Copy)]
pub struct CapValue {
    pub guts: CapGuts,
}

impl CapValue {
    pub fn intern(guts: CapGuts) -> Self {
        Self { guts }
    }

    /// Index into the message's capability table.
    pub fn index(&self) -> u32 {
        self.guts.layout.index
    }
}

impl<'a> FromPointer<'a> for CapValue {
    fn from_any(guts: AnyGuts<'a>) -> Result<Self> {
        Ok(Self {
            guts: CapGuts::from_any(guts)?,
        })
    }

    fn deref(_level: u32, arena: &'a dyn ReaderArena, ref_: Word<'a>) -> Result<Self> {
        Ok(Self {
            guts: CapGuts::deref(arena, ref_)?,
        })
    }
}
