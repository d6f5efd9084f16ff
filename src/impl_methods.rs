// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::any::Any;
use std::borrow::Cow;

use tracing::debug;

use crate::error::ArrayError;
use crate::index::compute_size;
use crate::{Array, DataType, Element, Index, IndexIter, Range, Storage};

macro_rules! typed_accessors {
    ($($get:ident, $set:ident, $to:ident, $from:ident, $ty:ty;)*) => {
        $(
        #[doc = concat!("Read the element at `coords` as `", stringify!($ty), "`.")]
        pub fn $get(&self, coords: &[usize]) -> Result<$ty, ArrayError> {
            self.get(coords)?.$to()
        }

        #[doc = concat!("Write `value` (converted from `", stringify!($ty), "`) at `coords`.")]
        pub fn $set(&self, coords: &[usize], value: $ty) -> Result<(), ArrayError> {
            self.set(coords, T::$from(value)?)
        }
        )*
    };
}

impl<T: Element> Array<T> {
    /// Return the shape of the array.
    pub fn shape(&self) -> &[usize] {
        self.index.shape()
    }

    /// Return the number of axes.
    pub fn rank(&self) -> usize {
        self.index.rank()
    }

    /// Return the number of elements.
    pub fn size(&self) -> usize {
        self.index.size()
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    /// Element strides into the backing buffer.
    pub fn strides(&self) -> &[isize] {
        self.index.strides()
    }

    /// The index mapping coordinates of this array into its storage.
    pub fn index(&self) -> &Index {
        &self.index
    }

    /// The backing buffer, shared with every view of it.
    ///
    /// **Note:** its layout need not match the logical order of this array.
    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    /// The element type tag.
    pub fn data_type(&self) -> DataType {
        T::DATA_TYPE
    }

    /// Return `true` if the elements must be traversed with strides, i.e.
    /// the index is not a fast iterator over the whole buffer.
    pub fn is_view(&self) -> bool {
        !self.index.is_fast_iterator()
    }

    pub fn is_constant(&self) -> bool {
        self.index.is_constant()
    }

    /// Return `true` if both arrays read the same buffer.
    pub fn shares_storage<U: Element>(&self, other: &Array<U>) -> bool {
        match (&other.storage as &dyn Any).downcast_ref::<Storage<T>>() {
            Some(s) => Storage::ptr_eq(&self.storage, s),
            None => false,
        }
    }

    /// Read the element at `coords`.
    pub fn get(&self, coords: &[usize]) -> Result<T, ArrayError> {
        self.storage.get(self.index.element(coords)?)
    }

    /// Write the element at `coords`. Every view of the buffer sees it.
    pub fn set(&self, coords: &[usize], value: T) -> Result<(), ArrayError> {
        self.storage.set(self.index.element(coords)?, value)
    }

    /// Read the element at `coords` converted to `U`.
    pub fn get_as<U: Element>(&self, coords: &[usize]) -> Result<U, ArrayError> {
        self.get(coords)?.cast()
    }

    /// Convert `value` and write it at `coords`.
    pub fn set_as<U: Element>(&self, coords: &[usize], value: U) -> Result<(), ArrayError> {
        self.set(coords, value.cast()?)
    }

    /// Read the `n`-th element in logical order.
    pub fn get_by_counter(&self, n: usize) -> Result<T, ArrayError> {
        self.storage.get(self.index.element_at(n)?)
    }

    /// Write the `n`-th element in logical order.
    pub fn set_by_counter(&self, n: usize, value: T) -> Result<(), ArrayError> {
        self.storage.set(self.index.element_at(n)?, value)
    }

    typed_accessors! {
        get_f64, set_f64, to_f64, from_f64, f64;
        get_f32, set_f32, to_f32, from_f32, f32;
        get_i64, set_i64, to_i64, from_i64, i64;
        get_i32, set_i32, to_i32, from_i32, i32;
        get_i16, set_i16, to_i16, from_i16, i16;
        get_i8, set_i8, to_i8, from_i8, i8;
        get_bool, set_bool, to_bool, from_bool, bool;
        get_char, set_char, to_char, from_char, char;
    }

    /// Return a new cursor over the elements in logical order.
    pub fn iter(&self) -> IndexIter<'_, T> {
        IndexIter::new(&self.storage, Cow::Borrowed(&self.index))
    }

    /// Return a cursor over the subset selected by `ranges`, one per axis
    /// (`None` for a whole axis). No axis is reduced.
    pub fn range_iter(&self, ranges: &[Option<Range>]) -> Result<IndexIter<'_, T>, ArrayError> {
        let index = self.index.section_no_reduce(ranges)?;
        Ok(IndexIter::new(&self.storage, Cow::Owned(index)))
    }

    /// Copy the elements out in logical order.
    pub fn to_vec(&self) -> Vec<T> {
        if self.index.is_fast_iterator() {
            return self.storage.to_vec();
        }
        self.iter().collect()
    }

    /// Copy the elements out in logical order, converted to `U`.
    pub fn to_vec_as<U: Element>(&self) -> Result<Vec<U>, ArrayError> {
        self.iter().map(Element::cast).collect()
    }

    /// Copy into a new buffer in canonical order, whatever the layout of
    /// this array.
    pub fn copy(&self) -> Array<T> {
        debug!(shape = ?self.shape(), view = self.is_view(), "copying array");
        let index = self.index.to_canonical();
        Array::from_parts(Storage::from_vec(self.iter().collect()), index)
    }

    /// Return this array if it is already in canonical order over its
    /// whole buffer, otherwise a canonical copy.
    pub fn copy_if_view(&self) -> Cow<'_, Array<T>> {
        if self.is_view() {
            Cow::Owned(self.copy())
        } else {
            Cow::Borrowed(self)
        }
    }

    /// Copy the elements into a new array of `shape`.
    ///
    /// **Errors** if the sizes differ.
    pub fn reshape(&self, shape: &[usize]) -> Result<Array<T>, ArrayError> {
        let size = compute_size(shape)?;
        if size != self.size() {
            return Err(ArrayError::IncompatibleShapes { expected: self.size(), got: size });
        }
        debug!(from = ?self.shape(), to = ?shape, "reshape by copy");
        Array::from_vec(shape, self.to_vec())
    }

    /// Reinterpret the same buffer with `shape`.
    ///
    /// **Errors** if the sizes differ, or if this array is a view whose
    /// elements are not in canonical order.
    pub fn reshape_no_copy(&self, shape: &[usize]) -> Result<Array<T>, ArrayError> {
        let index = self.index.reshape(shape)?;
        Ok(Array::from_parts(self.storage.clone(), index))
    }

    /// Return the elements as a flat buffer in logical order.
    ///
    /// If this array is in canonical order over its whole buffer, the
    /// buffer itself is returned (no copying); otherwise the elements are
    /// copied into a fresh one.
    pub fn flat_storage(&self) -> Storage<T> {
        if self.index.is_fast_iterator() {
            return self.storage.clone();
        }
        debug!(shape = ?self.shape(), "flattening view into new storage");
        Storage::from_vec(self.iter().collect())
    }

    /// Like [`flat_storage`](Array::flat_storage) with a conversion to
    /// `U`; the buffer is shared only when `U` is `T` and no copy is
    /// needed.
    pub fn flat_storage_as<U: Element>(&self) -> Result<Storage<U>, ArrayError> {
        if self.index.is_fast_iterator() {
            if let Some(s) = (&self.storage as &dyn Any).downcast_ref::<Storage<U>>() {
                return Ok(s.clone());
            }
        }
        debug!(from = %T::DATA_TYPE, to = %U::DATA_TYPE, "converting into new storage");
        Ok(Storage::from_vec(self.to_vec_as()?))
    }

    /// Copy `len` elements, in logical order, from `src` starting at
    /// position `src_pos` into `dst` starting at position `dst_pos`.
    ///
    /// Overlapping copies within one buffer read every source element
    /// before writing.
    pub fn arraycopy(
        src: &Array<T>,
        src_pos: usize,
        dst: &Array<T>,
        dst_pos: usize,
        len: usize,
    ) -> Result<(), ArrayError> {
        for (pos, size) in [(src_pos, src.size()), (dst_pos, dst.size())] {
            match pos.checked_add(len) {
                Some(end) if end <= size => {}
                _ => {
                    return Err(ArrayError::OutOfBounds {
                        index: pos.saturating_add(len),
                        len: size,
                    })
                }
            }
        }
        let values: Vec<T> = src.iter().skip(src_pos).take(len).collect();
        let mut it = dst.iter();
        for _ in 0..dst_pos {
            it.next();
        }
        for v in values {
            it.set_next(v)?;
        }
        Ok(())
    }
}

impl<T: Element> PartialEq for Array<T> {
    /// Arrays are equal when shapes and logical contents match.
    fn eq(&self, rhs: &Self) -> bool {
        self.shape() == rhs.shape() && self.iter().eq(rhs.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    #[test]
    fn typed_access_converts() {
        let a = Array::from_vec(&[2], vec![1i32, 2]).unwrap();
        assert_eq!(a.get_f64(&[1]).unwrap(), 2.0);
        a.set_f64(&[0], 7.9).unwrap();
        assert_eq!(a.get(&[0]).unwrap(), 7);
        assert_eq!(a.get_bool(&[0]).unwrap_err().kind(), ErrorKind::ForbiddenConversion);
        assert_eq!(a.get(&[2]).unwrap_err().kind(), ErrorKind::OutOfBounds);
        assert_eq!(a.get(&[0, 0]).unwrap_err().kind(), ErrorKind::InvalidRange);
    }

    #[test]
    fn flat_storage_aliases_only_when_fast() {
        let a = Array::from_vec(&[2, 2], vec![1u16, 2, 3, 4]).unwrap();
        assert!(Storage::ptr_eq(&a.flat_storage(), a.storage()));
        let t = a.transpose(0, 1).unwrap();
        let flat = t.flat_storage();
        assert!(!Storage::ptr_eq(&flat, a.storage()));
        assert_eq!(flat.to_vec(), vec![1, 3, 2, 4]);
        let wide = a.flat_storage_as::<f64>().unwrap();
        assert_eq!(wide.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
        assert!(Storage::ptr_eq(&a.flat_storage_as::<u16>().unwrap(), a.storage()));
    }

    #[test]
    fn constant_is_replicated() {
        let c = Array::constant(&[2, 3], 1.5f32).unwrap();
        assert!(c.is_view());
        let flat = c.flat_storage();
        assert_eq!(flat.len(), 6);
        assert!(!Storage::ptr_eq(&flat, c.storage()));
    }

    #[test]
    fn copy_gets_a_canonical_index() {
        let a = Array::from_vec(&[3, 4], (0..12).collect::<Vec<i64>>()).unwrap();
        let v = a
            .section_no_reduce(&[None, Some(Range::VLEN)])
            .unwrap()
            .flip(0)
            .unwrap();
        let c = v.copy();
        assert_eq!(c.index(), &Index::new(&[3, 1]).unwrap());
        assert_eq!(c.storage().len(), 3);
        assert_eq!(c.to_vec(), vec![8, 4, 0]);

        let k = Array::constant(&[2, 2], 5u8).unwrap().copy();
        assert!(!k.is_constant());
        assert_eq!(k.storage().len(), 4);
    }
}
