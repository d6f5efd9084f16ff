// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shape, stride and offset arithmetic.
//!
//! An [`Index`] maps an n-dimensional coordinate to a linear offset into a
//! flat buffer:
//!
//! ```text
//! element(i) = offset + Σ i[k] × strides[k]
//! ```
//!
//! Views (section, flip, transpose, permute, reduce) are new `Index`
//! values over the same buffer. No view operation modifies its receiver
//! and none touches the buffer.
use std::iter::FusedIterator;

use tracing::trace;

use crate::error::{check_axis, check_rank, invalid_range, ArrayError};
use crate::Range;

/// Exclusive ceiling on the number of elements in an index: sizes must be
/// below 2^31.
pub const MAX_SIZE: usize = i32::MAX as usize;

/// The stride computation for one array or view.
///
/// An `Index` is a pure descriptor; traversal state lives in
/// [`Offsets`] and the array iterators, never in the index itself.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Index {
    shape: Vec<usize>,
    strides: Vec<isize>,
    offset: usize,
    size: usize,
    // number of elements in the canonical index this one derives from
    base_size: usize,
    vlen: Option<usize>,
    constant: bool,
}

/// Return the number of elements of `shape`.
///
/// **Errors** with `ErrorKind::Capacity` if it reaches 2^31.
pub fn compute_size(shape: &[usize]) -> Result<usize, ArrayError> {
    let size = shape
        .iter()
        .fold(1u128, |acc, &n| acc.saturating_mul(n as u128));
    if size > MAX_SIZE as u128 {
        return Err(ArrayError::DimensionTooLarge { size });
    }
    Ok(size as usize)
}

/// Row-major strides for `shape`: `(a, b, c)` gives `(b * c, c, 1)`.
pub fn default_strides(shape: &[usize]) -> Vec<isize> {
    let mut strides = vec![0; shape.len()];
    let mut product = 1isize;
    for (s, &n) in strides.iter_mut().zip(shape).rev() {
        *s = product;
        product = product.saturating_mul(n.min(isize::MAX as usize) as isize);
    }
    strides
}

impl Index {
    /// Create the canonical row-major index for `shape`.
    ///
    /// Zero-length axes are allowed.
    ///
    /// **Errors** with `ErrorKind::Capacity` if the size reaches 2^31.
    pub fn new(shape: &[usize]) -> Result<Index, ArrayError> {
        let size = compute_size(shape)?;
        trace!(rank = shape.len(), size, "canonical index");
        Ok(Index {
            shape: shape.to_vec(),
            strides: default_strides(shape),
            offset: 0,
            size,
            base_size: size,
            vlen: None,
            constant: false,
        })
    }

    /// A canonical, non-constant index over a fresh buffer with the same
    /// shape. The size was checked when `self` was built.
    pub(crate) fn to_canonical(&self) -> Index {
        Index {
            shape: self.shape.clone(),
            strides: default_strides(&self.shape),
            offset: 0,
            size: self.size,
            base_size: self.size,
            vlen: None,
            constant: false,
        }
    }

    /// The rank-0 index of a single element.
    pub fn scalar() -> Index {
        Index {
            shape: Vec::new(),
            strides: Vec::new(),
            offset: 0,
            size: 1,
            base_size: 1,
            vlen: None,
            constant: false,
        }
    }

    /// An index of `shape` that resolves every coordinate to offset 0, for
    /// presenting one stored value as a constant array.
    ///
    /// A constant index never reports itself as a fast iterator, so bulk
    /// extraction replicates the value instead of aliasing the one-element
    /// buffer.
    pub fn constant(shape: &[usize]) -> Result<Index, ArrayError> {
        let size = compute_size(shape)?;
        trace!(rank = shape.len(), size, "constant index");
        Ok(Index {
            shape: shape.to_vec(),
            strides: vec![0; shape.len()],
            offset: 0,
            size,
            base_size: 1,
            vlen: None,
            constant: true,
        })
    }

    pub fn rank(&self) -> usize {
        self.shape.len()
    }

    /// Extent of each axis.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Element strides, one per axis; negative after a flip.
    pub fn strides(&self) -> &[isize] {
        &self.strides
    }

    /// Storage offset of the element at the all-zero coordinate.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Number of elements (the product of the shape).
    pub fn size(&self) -> usize {
        self.size
    }

    /// Return `true` if every coordinate maps to offset zero.
    pub fn is_constant(&self) -> bool {
        self.constant
    }

    /// The variable-length axis, if a `VLEN` range was applied.
    pub fn vlen_axis(&self) -> Option<usize> {
        self.vlen
    }

    /// Return `true` if iterating this index in logical order walks the
    /// backing buffer contiguously from offset 0, covering all of it.
    ///
    /// Any view that rearranges, skips or repeats elements is not fast.
    pub fn is_fast_iterator(&self) -> bool {
        if self.constant || self.offset != 0 || self.size != self.base_size {
            return false;
        }
        let defaults = default_strides(&self.shape);
        // an axis of length 1 can have any stride
        self.shape
            .iter()
            .zip(self.strides.iter().zip(&defaults))
            .all(|(&n, (&s, &d))| n == 1 || s == d)
    }

    /// Storage offset of the element at `coords`.
    pub fn element(&self, coords: &[usize]) -> Result<usize, ArrayError> {
        check_rank(self.rank(), coords.len())?;
        for (&i, &n) in coords.iter().zip(&self.shape) {
            if i >= n {
                return Err(ArrayError::OutOfBounds { index: i, len: n });
            }
        }
        Ok(self.element_unchecked(coords))
    }

    #[inline]
    pub(crate) fn element_unchecked(&self, coords: &[usize]) -> usize {
        let offset = coords
            .iter()
            .zip(&self.strides)
            .fold(self.offset as isize, |acc, (&i, &s)| acc + i as isize * s);
        offset as usize
    }

    /// Coordinates of the `n`-th element in logical (row-major) order.
    pub fn counter_of(&self, n: usize) -> Result<Vec<usize>, ArrayError> {
        if n >= self.size {
            return Err(ArrayError::OutOfBounds { index: n, len: self.size });
        }
        let mut coords = vec![0; self.rank()];
        let mut rest = n;
        for (c, &len) in coords.iter_mut().zip(&self.shape).rev() {
            *c = rest % len;
            rest /= len;
        }
        Ok(coords)
    }

    /// Storage offset of the `n`-th element in logical order.
    pub fn element_at(&self, n: usize) -> Result<usize, ArrayError> {
        let coords = self.counter_of(n)?;
        Ok(self.element_unchecked(&coords))
    }

    /// Iterate storage offsets in logical order.
    pub fn offsets(&self) -> Offsets<'_> {
        Offsets::new(self)
    }

    fn derive(
        &self,
        shape: Vec<usize>,
        strides: Vec<isize>,
        offset: isize,
        vlen: Option<usize>,
    ) -> Index {
        debug_assert!(offset >= 0 || shape.contains(&0));
        let size = shape.iter().product();
        Index {
            shape,
            strides,
            offset: offset.max(0) as usize,
            size,
            base_size: self.base_size,
            vlen,
            constant: self.constant,
        }
    }

    /// Restrict to `ranges`, one per axis, keeping every axis.
    ///
    /// `None` keeps an axis whole. A `VLEN` range marks its axis as
    /// variable-length: the axis gets extent one and contributes nothing
    /// to the offset.
    pub fn section_no_reduce(&self, ranges: &[Option<Range>]) -> Result<Index, ArrayError> {
        check_rank(self.rank(), ranges.len())?;
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        let mut offset = self.offset as isize;
        let mut vlen = self.vlen;
        for (axis, r) in ranges.iter().enumerate() {
            let r = match r {
                None => continue,
                Some(r) => r,
            };
            if r.is_vlen() {
                if vlen.map_or(false, |v| v != axis) {
                    return Err(ArrayError::Unsupported("more than one variable-length axis"));
                }
                vlen = Some(axis);
                shape[axis] = 1;
                strides[axis] = 0;
                continue;
            }
            if r.is_empty() {
                shape[axis] = 0;
                continue;
            }
            if r.last() >= self.shape[axis] {
                return Err(invalid_range(format!(
                    "range {} exceeds axis {} of length {}",
                    r, axis, self.shape[axis]
                )));
            }
            offset += strides[axis] * r.first() as isize;
            strides[axis] *= r.stride() as isize;
            shape[axis] = r.len();
        }
        let index = self.derive(shape, strides, offset, vlen);
        trace!(shape = ?index.shape, offset = index.offset, "section");
        Ok(index)
    }

    /// Restrict to `ranges`, then drop every axis of length one.
    pub fn section(&self, ranges: &[Option<Range>]) -> Result<Index, ArrayError> {
        Ok(self.section_no_reduce(ranges)?.reduce())
    }

    /// Reverse the traversal order of `axis`.
    ///
    /// The same elements are selected; `flip(a)` twice is the identity.
    pub fn flip(&self, axis: usize) -> Result<Index, ArrayError> {
        check_axis(axis, self.rank())?;
        let mut strides = self.strides.clone();
        let mut offset = self.offset as isize;
        let n = self.shape[axis];
        if n > 0 {
            offset += strides[axis] * (n as isize - 1);
        }
        strides[axis] = -strides[axis];
        trace!(axis, "flip");
        Ok(self.derive(self.shape.clone(), strides, offset, self.vlen))
    }

    /// Swap two axes.
    pub fn transpose(&self, a: usize, b: usize) -> Result<Index, ArrayError> {
        check_axis(a, self.rank())?;
        check_axis(b, self.rank())?;
        let mut shape = self.shape.clone();
        let mut strides = self.strides.clone();
        shape.swap(a, b);
        strides.swap(a, b);
        let vlen = self.vlen.map(|v| match v {
            v if v == a => b,
            v if v == b => a,
            v => v,
        });
        trace!(a, b, "transpose");
        Ok(self.derive(shape, strides, self.offset as isize, vlen))
    }

    /// Reorder the axes: axis `i` of the result is axis `dims[i]` of self.
    ///
    /// **Errors** if `dims` is not a permutation of `0..rank`.
    pub fn permute(&self, dims: &[usize]) -> Result<Index, ArrayError> {
        let rank = self.rank();
        let mut seen = vec![false; rank];
        let valid = dims.len() == rank
            && dims.iter().all(|&d| d < rank && !std::mem::replace(&mut seen[d], true));
        if !valid {
            return Err(ArrayError::NotPermutation { dims: dims.to_vec(), rank });
        }
        let shape = dims.iter().map(|&d| self.shape[d]).collect();
        let strides = dims.iter().map(|&d| self.strides[d]).collect();
        let vlen = self.vlen.and_then(|v| dims.iter().position(|&d| d == v));
        trace!(?dims, "permute");
        Ok(self.derive(shape, strides, self.offset as isize, vlen))
    }

    /// Drop every axis of length one, except a variable-length axis.
    pub fn reduce(&self) -> Index {
        let keep: Vec<usize> = (0..self.rank())
            .filter(|&i| self.shape[i] != 1 || self.vlen == Some(i))
            .collect();
        if keep.len() == self.rank() {
            return self.clone();
        }
        self.keep_axes(&keep)
    }

    /// Drop `axis`, which must have length one.
    pub fn reduce_axis(&self, axis: usize) -> Result<Index, ArrayError> {
        check_axis(axis, self.rank())?;
        if self.shape[axis] != 1 || self.vlen == Some(axis) {
            return Err(ArrayError::NotReducible { axis, len: self.shape[axis] });
        }
        let keep: Vec<usize> = (0..self.rank()).filter(|&i| i != axis).collect();
        Ok(self.keep_axes(&keep))
    }

    fn keep_axes(&self, keep: &[usize]) -> Index {
        let shape = keep.iter().map(|&i| self.shape[i]).collect();
        let strides = keep.iter().map(|&i| self.strides[i]).collect();
        let vlen = self.vlen.and_then(|v| keep.iter().position(|&i| i == v));
        self.derive(shape, strides, self.offset as isize, vlen)
    }

    /// Reinterpret the same elements with a new shape.
    ///
    /// **Errors** if the sizes differ, or if the index is not in canonical
    /// order (a constant index reshapes to a constant index).
    pub fn reshape(&self, shape: &[usize]) -> Result<Index, ArrayError> {
        let size = compute_size(shape)?;
        if size != self.size {
            return Err(ArrayError::IncompatibleShapes { expected: self.size, got: size });
        }
        if self.constant {
            return Index::constant(shape);
        }
        if !self.is_fast_iterator() {
            return Err(ArrayError::IncompatibleLayout);
        }
        Index::new(shape)
    }
}

impl Default for Index {
    fn default() -> Self {
        Index::scalar()
    }
}

/// Traversal position over an [`Index`] in logical order, last axis
/// fastest. Holds no reference to the index so that owners of an index
/// can carry one alongside it.
#[derive(Clone, Debug)]
pub(crate) struct Odometer {
    counter: Vec<usize>,
    current: isize,
    remaining: usize,
}

impl Odometer {
    pub(crate) fn new(index: &Index) -> Self {
        Odometer {
            counter: vec![0; index.rank()],
            current: index.offset as isize,
            remaining: index.size,
        }
    }

    pub(crate) fn counter(&self) -> &[usize] {
        &self.counter
    }

    pub(crate) fn remaining(&self) -> usize {
        self.remaining
    }

    #[inline]
    pub(crate) fn next(&mut self, index: &Index) -> Option<usize> {
        if self.remaining == 0 {
            return None;
        }
        let offset = self.current as usize;
        self.remaining -= 1;
        if self.remaining > 0 {
            self.advance(index);
        }
        Some(offset)
    }

    #[inline]
    fn advance(&mut self, index: &Index) {
        let shape = &index.shape;
        let strides = &index.strides;
        for axis in (0..shape.len()).rev() {
            self.counter[axis] += 1;
            self.current += strides[axis];
            if self.counter[axis] < shape[axis] {
                return;
            }
            // carry
            self.current -= strides[axis] * shape[axis] as isize;
            self.counter[axis] = 0;
        }
    }
}

/// Iterator over the storage offsets of an [`Index`], in logical order.
#[derive(Clone, Debug)]
pub struct Offsets<'a> {
    index: &'a Index,
    odometer: Odometer,
}

impl<'a> Offsets<'a> {
    fn new(index: &'a Index) -> Self {
        Offsets {
            index,
            odometer: Odometer::new(index),
        }
    }

    /// Coordinates of the element the next call to `next` yields.
    pub fn counter(&self) -> &[usize] {
        self.odometer.counter()
    }
}

impl<'a> Iterator for Offsets<'a> {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        self.odometer.next(self.index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.odometer.remaining();
        (len, Some(len))
    }
}

impl<'a> ExactSizeIterator for Offsets<'a> {}

impl<'a> FusedIterator for Offsets<'a> {}
