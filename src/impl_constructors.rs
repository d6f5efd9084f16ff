// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for `Array`.
//!
use crate::error::ArrayError;
use crate::{Array, Element, Index, NestedArray, Storage};

impl<T: Element> Array<T> {
    /// Create an array of `shape` filled with `T::default()`.
    ///
    /// **Errors** if the number of elements reaches 2^31.
    ///
    /// ```
    /// use ncarray::Array;
    ///
    /// let a = Array::<f64>::zeros(&[2, 3]).unwrap();
    /// assert_eq!(a.size(), 6);
    /// ```
    pub fn zeros(shape: &[usize]) -> Result<Self, ArrayError> {
        Self::from_elem(shape, T::default())
    }

    /// Create an array of `shape` with copies of `elem`.
    pub fn from_elem(shape: &[usize], elem: T) -> Result<Self, ArrayError> {
        let index = Index::new(shape)?;
        let storage = Storage::from_elem(index.size(), elem);
        Ok(Array { storage, index })
    }

    /// Create an array of `shape` from a vector in row-major order (no
    /// copying needed).
    ///
    /// **Errors** if `v.len()` differs from the size of `shape`.
    pub fn from_vec(shape: &[usize], v: Vec<T>) -> Result<Self, ArrayError> {
        Self::from_storage(shape, Storage::from_vec(v))
    }

    /// Create an array of `shape` over an existing buffer, which is shared,
    /// not copied.
    ///
    /// **Errors** if the buffer length differs from the size of `shape`.
    pub fn from_storage(shape: &[usize], storage: Storage<T>) -> Result<Self, ArrayError> {
        let index = Index::new(shape)?;
        if storage.len() != index.size() {
            return Err(ArrayError::IncompatibleShapes {
                expected: index.size(),
                got: storage.len(),
            });
        }
        Ok(Array { storage, index })
    }

    /// Create an array of `shape` in which every element is `value`, backed
    /// by a single stored element.
    ///
    /// Writing any element of a constant array writes them all.
    pub fn constant(shape: &[usize], value: T) -> Result<Self, ArrayError> {
        Ok(Array {
            storage: Storage::from_elem(1, value),
            index: Index::constant(shape)?,
        })
    }

    /// Create a rank-0 array holding `value`.
    pub fn scalar(value: T) -> Self {
        Array {
            storage: Storage::from_elem(1, value),
            index: Index::scalar(),
        }
    }

    /// Create an array from nested vectors, slices or fixed-size arrays.
    /// The rank is the nesting depth.
    ///
    /// **Errors** if the input is ragged.
    ///
    /// ```
    /// use ncarray::Array;
    ///
    /// let a = Array::from_nested(&vec![[1, 2, 3], [4, 5, 6]]).unwrap();
    /// assert_eq!(a.shape(), &[2, 3]);
    /// assert_eq!(a.get(&[1, 0]).unwrap(), 4);
    /// ```
    pub fn from_nested<N>(nested: &N) -> Result<Self, ArrayError>
    where
        N: NestedArray<Elem = T> + ?Sized,
    {
        let mut shape = Vec::with_capacity(N::DEPTH);
        nested.shape_into(&mut shape);
        let index = Index::new(&shape)?;
        let mut data = Vec::with_capacity(index.size());
        nested.flatten_into(&shape, 0, &mut data)?;
        Ok(Array {
            storage: Storage::from_vec(data),
            index,
        })
    }

    /// Assemble an array from a buffer and an index describing it.
    pub(crate) fn from_parts(storage: Storage<T>, index: Index) -> Self {
        Array { storage, index }
    }
}
