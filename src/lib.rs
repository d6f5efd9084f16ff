// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![doc(html_root_url = "https://docs.rs/ncarray/0.1/")]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The `ncarray` crate provides [`Array`], an n-dimensional array of
//! scalars in the style of a scientific data model: every array is a flat
//! shared buffer plus an [`Index`] that maps coordinates to buffer offsets.
//!
//! - [`Range`] and [`Section`] describe (strided) subsets of axes and
//!   boxes, compose and intersect, and parse from the text form
//!   `"1:3,:,2"`.
//! - [`Index`] owns the shape/stride/offset arithmetic. Sections, flips,
//!   transposes, permutations and reductions derive new indexes over the
//!   same buffer without copying.
//! - [`Array`] views share their buffer: a write through any view is seen
//!   by all of them. [`IndexIter`] walks a view in row-major logical order.
//! - [`DynArray`] holds an array of any [`DataType`] chosen at runtime.
//!
//! ## Crate Feature Flags
//!
//! - `serde`: serialization of ranges, sections, indexes and arrays.
//! - `approx`: approximate equality of arrays via the `approx` traits.
//!
//! ## Example
//!
//! ```
//! use ncarray::{Array, Range};
//!
//! let a = Array::from_vec(&[2, 3], vec![0, 1, 2, 3, 4, 5]).unwrap();
//! let col = a.section(&[None, Some(Range::new(1, 1).unwrap())]).unwrap();
//! assert_eq!(col.shape(), &[2]);
//! assert_eq!(col.to_vec(), vec![1, 4]);
//!
//! // views alias the buffer
//! col.set(&[1], 40).unwrap();
//! assert_eq!(a.get(&[1, 1]).unwrap(), 40);
//! ```
//!
//! ## Threads
//!
//! Arrays are not `Send` or `Sync`. Views of one buffer must stay on one
//! thread, and writers are never synchronised against readers. Callers
//! that need parallelism copy data out with [`Array::to_vec`].

mod arrayformat;
#[cfg(feature = "approx")]
mod array_approx;
#[cfg(feature = "serde")]
mod array_serde;
mod data_type;
mod dyn_array;
mod element;
mod error;
mod impl_constructors;
mod impl_methods;
mod impl_views;
pub mod index;
pub mod iterators;
mod nested;
mod range;
mod section;
mod storage;

pub use crate::data_type::DataType;
pub use crate::dyn_array::DynArray;
pub use crate::element::Element;
pub use crate::error::{ArrayError, ErrorKind};
pub use crate::index::{Index, Offsets, MAX_SIZE};
pub use crate::iterators::IndexIter;
pub use crate::nested::NestedArray;
pub use crate::range::{Range, RangeIter};
pub use crate::section::{Section, SectionIter};
pub use crate::storage::Storage;

/// An n-dimensional array: a shared flat [`Storage`] buffer interpreted
/// through an [`Index`].
///
/// The index is owned by this array alone; the buffer is shared with every
/// view derived from it and released when the last view is dropped.
/// Cloning an `Array` creates another view of the same buffer.
///
/// ## View operations
///
/// [`section`](Array::section), [`slice`](Array::slice),
/// [`transpose`](Array::transpose), [`permute`](Array::permute),
/// [`flip`](Array::flip) and [`reduce`](Array::reduce) never copy.
/// [`copy`](Array::copy) and [`reshape`](Array::reshape) always copy;
/// [`copy_if_view`](Array::copy_if_view) and
/// [`flat_storage`](Array::flat_storage) copy only when needed.
///
/// ```
/// use ncarray::Array;
///
/// let a = Array::from_vec(&[3, 1, 4], (0..12).collect()).unwrap();
/// assert_eq!(a.slice(0, 1).unwrap().shape(), &[1, 4]);
/// assert_eq!(a.transpose(0, 2).unwrap().shape(), &[4, 1, 3]);
/// ```
#[derive(Clone)]
pub struct Array<T> {
    storage: Storage<T>,
    index: Index,
}
