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

//! # skewer
//!
//! Zero-copy typed readers for a pointer-based binary message format.
//!
//! A message is a set of immutable byte buffers ("segments") containing
//! structs, lists, capability references, and length-prefixed blobs, all
//! linked together by 8-byte wire pointers. This crate is the read side of
//! the typed-value layer: it narrows generic pointers into shape-specific
//! views ([`guts`]), wraps them in polymorphic values ([`value`]), and
//! exposes bounds-checked typed containers ([`struct_list`],
//! [`pointer_list`], [`primitive_list`]) and blobs ([`Data`], [`Text`]) that
//! decode bytes lazily, on demand, without copying payload data.
//!
//! Pointer resolution itself -- segment lookup, far-pointer chasing,
//! traversal limits, and layout computation -- is the business of an
//! [`arena::ReaderArena`] implementation supplied by the caller. Everything
//! in this crate borrows from such an arena and never outlives it.

pub mod arena;
pub mod data;
pub mod endian;
mod error;
pub mod guts;
pub mod layout;
pub mod pointer_list;
pub mod primitive_list;
pub mod struct_list;
pub mod text;
pub mod traits;
pub mod value;

pub use crate::data::Data;
pub use crate::error::{Error, ListAlignment, PointerShape};
pub use crate::text::Text;
pub use crate::value::{AnyValue, CapValue, ListValue, StructValue};

pub type Result<T> = core::result::Result<T, Error>;
