// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Methods that derive views: new arrays over the same buffer with a
//! different index.
use crate::error::{check_axis, ArrayError};
use crate::{Array, Element, Index, Range, Section};

impl<T: Element> Array<T> {
    fn create_view(&self, index: Index) -> Array<T> {
        Array::from_parts(self.storage().clone(), index)
    }

    /// Return a view of the subset selected by `ranges`, one per axis
    /// (`None` for a whole axis). Axes of length one are dropped.
    ///
    /// **Errors** on a rank mismatch or a range outside the shape.
    pub fn section(&self, ranges: &[Option<Range>]) -> Result<Array<T>, ArrayError> {
        Ok(self.create_view(self.index().section(ranges)?))
    }

    /// Like [`section`](Array::section), keeping every axis.
    pub fn section_no_reduce(&self, ranges: &[Option<Range>]) -> Result<Array<T>, ArrayError> {
        Ok(self.create_view(self.index().section_no_reduce(ranges)?))
    }

    /// View of the subset described by `section`, with rank reduction.
    pub fn section_of(&self, section: &Section) -> Result<Array<T>, ArrayError> {
        self.section(section.ranges())
    }

    /// View of the subset described by the section text `spec`, e.g.
    /// `"0:9:2,:,3"`, with rank reduction.
    ///
    /// ```
    /// use ncarray::Array;
    ///
    /// let a = Array::from_vec(&[4, 5], (0..20).collect()).unwrap();
    /// let v = a.section_spec("1:3:2,4").unwrap();
    /// assert_eq!(v.to_vec(), vec![9, 19]);
    /// ```
    pub fn section_spec(&self, spec: &str) -> Result<Array<T>, ArrayError> {
        let section: Section = spec.parse()?;
        self.section_of(&section)
    }

    /// Fix `axis` at `value`, dropping exactly that axis; other axes of
    /// length one are kept.
    pub fn slice(&self, axis: usize, value: usize) -> Result<Array<T>, ArrayError> {
        check_axis(axis, self.rank())?;
        let mut ranges = vec![None; self.rank()];
        ranges[axis] = Some(Range::new(value, value)?);
        let index = self.index().section_no_reduce(&ranges)?.reduce_axis(axis)?;
        Ok(self.create_view(index))
    }

    /// Swap two axes.
    pub fn transpose(&self, a: usize, b: usize) -> Result<Array<T>, ArrayError> {
        Ok(self.create_view(self.index().transpose(a, b)?))
    }

    /// Reorder the axes: axis `i` of the view is axis `dims[i]` of self.
    pub fn permute(&self, dims: &[usize]) -> Result<Array<T>, ArrayError> {
        Ok(self.create_view(self.index().permute(dims)?))
    }

    /// Reverse the order of `axis`.
    pub fn flip(&self, axis: usize) -> Result<Array<T>, ArrayError> {
        Ok(self.create_view(self.index().flip(axis)?))
    }

    /// Drop every axis of length one. Returns a view of the same buffer
    /// even when nothing is dropped.
    pub fn reduce(&self) -> Array<T> {
        self.create_view(self.index().reduce())
    }

    /// Drop `axis`, which must have length one.
    pub fn reduce_axis(&self, axis: usize) -> Result<Array<T>, ArrayError> {
        Ok(self.create_view(self.index().reduce_axis(axis)?))
    }
}
