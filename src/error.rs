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

//! Error taxonomy of the read layer.
//!
//! Every error is raised synchronously at the failing narrow or index, before
//! any partial read is returned. Absence (a wire-null pointer) is never an
//! error; nullable accessors return `Ok(None)` for it.

use core::fmt;

use thiserror::Error;

/// Primary shape of a resolved pointer, as named in error messages.
///
/// The wire distinguishes structs, lists, and capabilities at the 2-bit tag
/// level; whether a list is bit- or byte-aligned is a secondary distinction
/// reported through [`ListAlignment`] instead.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerShape {
    Struct,
    List,
    Capability,
}

impl fmt::Display for PointerShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => write!(f, "struct"),
            Self::List => write!(f, "list"),
            Self::Capability => write!(f, "capability"),
        }
    }
}

/// Element alignment of a list: one bit per element, or a whole number of
/// bytes (possibly zero) per element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListAlignment {
    BitAligned,
    ByteAligned,
}

impl fmt::Display for ListAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BitAligned => write!(f, "bit aligned"),
            Self::ByteAligned => write!(f, "byte aligned"),
        }
    }
}

fn shape_set(shapes: &[PointerShape]) -> String {
    let names: Vec<String> = shapes.iter().map(ToString::to_string).collect();
    names.join(" or ")
}

#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// A narrow requested one set of pointer shapes and the resolved pointer
    /// had another.
    #[error("expected a {} pointer, found a {found} pointer", shape_set(.expected))]
    PointerType {
        expected: &'static [PointerShape],
        found: PointerShape,
    },

    /// Both sides agree the pointer is a list but disagree on bit- versus
    /// byte-alignment of its elements.
    #[error("expected a {expected} list, found a {found} list")]
    ListAlignment {
        expected: ListAlignment,
        found: ListAlignment,
    },

    /// An explicitly stored union discriminant disagrees with the value the
    /// accessor was compiled for.
    #[error("expected union tag {expected}, found {found}")]
    IncorrectTag { expected: u16, found: u16 },

    /// Indexed access outside `[0, length)`.
    #[error("index {index} is out of bounds for a list of length {length}")]
    IndexOutOfBounds { index: u32, length: u32 },

    /// A text blob's content bytes are not valid UTF-8.
    #[error("text is not valid utf-8")]
    TextNotUtf8(#[from] core::str::Utf8Error),

    /// A text blob with a stored length of zero lacks even its mandatory nul
    /// terminator. Detected at dereference time, before any content is read.
    #[error("text blob is empty; it must store at least its nul terminator")]
    TextMissingNulTerminator,

    // The remaining kinds are raised by `ReaderArena` implementations while
    // resolving pointers and computing layouts.
    /// A pointer's target lands outside the bounds of its segment.
    #[error("pointer targets bytes outside the bounds of its segment")]
    PointerOutOfBounds,

    /// A pointer word that cannot be decoded at all, for example a
    /// double-far pointer whose landing pad is itself far.
    #[error("malformed pointer")]
    MalformedPointer,

    /// A list pointer stores a different element-size flag than the accessor
    /// requires.
    #[error("expected element-size flag {expected:#x}, found {found:#x}")]
    UnexpectedElementSize { expected: u8, found: u8 },

    /// The arena's pointer-traversal budget is spent. Guards against
    /// adversarially deep or cyclic messages.
    #[error("message is too deeply nested or contains cycles")]
    NestingLimitExceeded,

    /// A far pointer names a segment the message does not contain.
    #[error("message has no segment {0}")]
    MissingSegment(u32),
}
