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

//! The external pointer-resolution collaborator.
//!
//! This module defines what the read layer *consumes*: segments, word
//! coordinates, the decoded pointer record, and the [`ReaderArena`] trait
//! through which generic wire pointers become [`layout`](crate::layout)
//! descriptors. Buffer ownership, message framing, far-pointer chasing, and
//! traversal limits all live behind this trait; the read layer only calls it.

use crate::layout::{
    BoolListLayout, Bytes, CapLayout, NonboolListEncoding, NonboolListLayout, StructLayout,
};
use crate::Result;

pub type SegmentId = u32;

/// Wire type tag of a struct pointer.
pub const STRUCT_POINTER: u8 = 0x00;
/// Wire type tag of a list pointer.
pub const LIST_POINTER: u8 = 0x01;
/// Wire type tag of a capability pointer.
pub const CAP_POINTER: u8 = 0x03;

/// Element-size flag of a bit-packed boolean list.
pub const BIT_FLAG: u8 = 0x01;

/// One immutable segment of a message. The bytes are externally owned; this
/// layer only ever reads them.
#[derive(Clone, Copy)]
pub struct Segment<'a> {
    pub id: SegmentId,
    pub raw: &'a [u8],
}

/// A (segment, byte offset) coordinate naming one 8-byte pointer word. Not
/// an owning handle, just a location.
#[derive(Clone, Copy)]
pub struct Word<'a> {
    pub segment: Segment<'a>,
    pub position: usize,
}

/// True iff the 8 bytes at `ref_` are all zero. A null pointer means
/// absence, never an error.
pub fn is_null(ref_: Word<'_>) -> bool {
    ref_.segment.raw[ref_.position..ref_.position + 8] == [0; 8]
}

/// A wire pointer decoded by the arena: far indirection already chased away,
/// the 2-bit type tag extracted, and the target located.
///
/// Borrowed for the duration of one access; layouts computed from it carry
/// no reference back to it.
#[derive(Clone, Copy)]
pub struct Pointer<'a> {
    /// Primary type tag: [`STRUCT_POINTER`], [`LIST_POINTER`], or
    /// [`CAP_POINTER`]. The wire's fourth state, "far", never reaches this
    /// layer.
    pub type_bits: u8,
    /// High 32 bits of the (resolved) pointer word. For struct pointers this
    /// holds the section word counts, for list pointers the element-size
    /// flag and element count, for capability pointers the table index.
    pub hi: u32,
    /// Start of the target object.
    pub object: Word<'a>,
}

impl<'a> Pointer<'a> {
    /// The 3-bit element-size flag of a list pointer.
    pub fn element_size_flag(&self) -> u8 {
        (self.hi & 0x07) as u8
    }
}

/// Resolution services the read layer consumes.
///
/// Implementations own the message's segments and all safety policy: bounds
/// validation, far-pointer chasing, and enforcement of a maximum traversal
/// depth (the read layer threads its `level` counter faithfully through
/// every dereference but never enforces a limit itself).
///
/// Layout methods must fail with the matching taxonomy error when the
/// pointer's shape disagrees with the request: [`Error::PointerType`] for a
/// primary-tag mismatch, [`Error::ListAlignment`] for bit- versus
/// byte-aligned lists, [`Error::UnexpectedElementSize`] for a byte-aligned
/// list of the wrong width.
///
/// [`Error::PointerType`]: crate::Error::PointerType
/// [`Error::ListAlignment`]: crate::Error::ListAlignment
/// [`Error::UnexpectedElementSize`]: crate::Error::UnexpectedElementSize
pub trait ReaderArena {
    /// Look up a segment by id.
    fn segment<'s>(&'s self, id: SegmentId) -> Result<Segment<'s>>;

    /// Decode the pointer word at `ref_`, chasing far pointers to their
    /// landing pads, and charge the traversal budget.
    fn pointer<'s>(&'s self, ref_: Word<'s>) -> Result<Pointer<'s>>;

    /// Struct layout of `p` exactly as stored, with `bytes` describing the
    /// stored sections.
    fn generic_struct_layout(&self, p: &Pointer<'_>) -> Result<StructLayout>;

    /// Struct layout of `p` for an accessor compiled against the footprint
    /// `compiled`. The stored sections win; `compiled` lets the arena
    /// validate against schema expectations.
    fn specific_struct_layout(&self, p: &Pointer<'_>, compiled: Bytes) -> Result<StructLayout>;

    /// Bit-list layout of `p`.
    fn bool_list_layout(&self, p: &Pointer<'_>) -> Result<BoolListLayout>;

    /// Byte-list layout of a blob (`Data` or `Text`) pointer; `length`
    /// counts stored bytes.
    fn blob_layout(&self, p: &Pointer<'_>) -> Result<NonboolListLayout>;

    /// Byte-aligned list layout of `p` for an accessor compiled against
    /// `compiled`. For composite lists the true element count and footprint
    /// come from the list's tag word.
    fn specific_nonbool_list_layout(
        &self,
        p: &Pointer<'_>,
        compiled: NonboolListEncoding,
    ) -> Result<NonboolListLayout>;

    /// Byte-aligned list layout of `p` with whatever encoding is stored.
    fn generic_nonbool_list_layout(&self, p: &Pointer<'_>) -> Result<NonboolListLayout>;

    /// Capability layout of `p`.
    fn cap_layout(&self, p: &Pointer<'_>) -> Result<CapLayout>;
}
