// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::error::ArrayError;
use crate::Element;

/// The flat backing buffer of an array and all of its views.
///
/// Cloning a `Storage` clones the handle, not the elements; the buffer is
/// released when the last handle is dropped. Writes through any handle are
/// visible through every other one.
///
/// `Storage` is neither `Send` nor `Sync`: concurrent access to one buffer
/// is the caller's business and is not supported by this type.
pub struct Storage<T> {
    cells: Rc<[Cell<T>]>,
}

impl<T: Element> Storage<T> {
    /// Take ownership of `v` as a new buffer (no copying of the logical
    /// layout is implied; elements keep their positions).
    pub fn from_vec(v: Vec<T>) -> Self {
        Storage {
            cells: v.into_iter().map(Cell::new).collect(),
        }
    }

    /// A buffer of `len` copies of `elem`.
    pub fn from_elem(len: usize, elem: T) -> Self {
        Storage {
            cells: (0..len).map(|_| Cell::new(elem)).collect(),
        }
    }

    /// Number of cells in the buffer.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Read the element at linear `offset`.
    #[inline]
    pub fn get(&self, offset: usize) -> Result<T, ArrayError> {
        self.cells
            .get(offset)
            .map(Cell::get)
            .ok_or(ArrayError::OutOfBounds { index: offset, len: self.len() })
    }

    /// Write the element at linear `offset`.
    #[inline]
    pub fn set(&self, offset: usize, value: T) -> Result<(), ArrayError> {
        match self.cells.get(offset) {
            Some(cell) => {
                cell.set(value);
                Ok(())
            }
            None => Err(ArrayError::OutOfBounds { index: offset, len: self.len() }),
        }
    }

    /// Copy the buffer out in storage order.
    pub fn to_vec(&self) -> Vec<T> {
        self.cells.iter().map(Cell::get).collect()
    }

    /// Iterate the buffer in storage order.
    pub fn iter(&self) -> impl Iterator<Item = T> + '_ {
        self.cells.iter().map(Cell::get)
    }

    /// Return `true` if both handles share one buffer.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.cells, &b.cells)
    }

    /// Number of live handles to this buffer.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.cells)
    }

    #[inline]
    pub(crate) fn cell(&self, offset: usize) -> Option<&Cell<T>> {
        self.cells.get(offset)
    }
}

impl<T> Clone for Storage<T> {
    fn clone(&self) -> Self {
        Storage {
            cells: Rc::clone(&self.cells),
        }
    }
}

impl<T: Element> From<Vec<T>> for Storage<T> {
    fn from(v: Vec<T>) -> Self {
        Storage::from_vec(v)
    }
}

impl<T: Copy + fmt::Debug> fmt::Debug for Storage<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.cells.iter().map(Cell::get)).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_share_writes() {
        let a = Storage::from_vec(vec![1, 2, 3]);
        let b = a.clone();
        b.set(1, 20).unwrap();
        assert_eq!(a.to_vec(), vec![1, 20, 3]);
        assert!(Storage::ptr_eq(&a, &b));
        assert_eq!(a.handle_count(), 2);
        drop(b);
        assert_eq!(a.handle_count(), 1);
    }

    #[test]
    fn bounds() {
        let a = Storage::from_elem(2, 0.5f32);
        assert!(a.get(2).is_err());
        assert!(a.set(5, 1.0).is_err());
        assert_eq!(a.get(1).unwrap(), 0.5);
    }
}
