// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Element cursors over arrays.
use std::borrow::Cow;
use std::fmt;
use std::iter::FusedIterator;

use crate::error::ArrayError;
use crate::index::Odometer;
use crate::{Element, Index, Storage};

#[derive(Clone, Debug)]
enum Cursor {
    /// Canonical order: walk the buffer directly.
    Fast { pos: usize, end: usize },
    /// Arbitrary strides: odometer over the logical coordinates.
    General(Odometer),
}

/// A cursor over the elements of an array or view.
///
/// A fast iterator (see [`Index::is_fast_iterator`]) yields elements in
/// increasing storage order, which for a fast index is also logical order.
/// A general iterator yields elements in row-major logical order with the
/// last axis varying fastest; the storage offsets it visits need not be
/// monotonic.
///
/// Each call to [`Array::iter`](crate::Array::iter) returns an independent
/// cursor. A cursor is not shareable between threads, and neither is the
/// buffer it reads.
#[derive(Clone)]
pub struct IndexIter<'a, T> {
    storage: &'a Storage<T>,
    index: Cow<'a, Index>,
    cursor: Cursor,
    done: usize,
}

macro_rules! typed_next {
    ($($get:ident, $set:ident, $to:ident, $from:ident, $ty:ty;)*) => {
        $(
        #[doc = concat!("Read the next element as `", stringify!($ty), "` and advance.")]
        pub fn $get(&mut self) -> Result<$ty, ArrayError> {
            self.next_value()?.$to()
        }

        #[doc = concat!(
            "Write `value` (converted from `",
            stringify!($ty),
            "`) to the next element and advance."
        )]
        pub fn $set(&mut self, value: $ty) -> Result<(), ArrayError> {
            self.set_next(T::$from(value)?)
        }
        )*
    };
}

impl<'a, T: Element> IndexIter<'a, T> {
    pub(crate) fn new(storage: &'a Storage<T>, index: Cow<'a, Index>) -> Self {
        let cursor = if index.is_fast_iterator() {
            Cursor::Fast { pos: 0, end: index.size() }
        } else {
            Cursor::General(Odometer::new(&index))
        };
        IndexIter {
            storage,
            index,
            cursor,
            done: 0,
        }
    }

    /// Return `true` if this cursor walks the buffer directly.
    pub fn is_fast(&self) -> bool {
        matches!(self.cursor, Cursor::Fast { .. })
    }

    /// Return `true` while elements remain.
    pub fn has_next(&self) -> bool {
        self.done < self.index.size()
    }

    /// Number of elements already visited.
    pub fn position(&self) -> usize {
        self.done
    }

    /// Coordinates of the element the next call yields.
    pub fn counter(&self) -> Vec<usize> {
        match &self.cursor {
            // an exhausted fast cursor reports the origin
            Cursor::Fast { pos, .. } => self
                .index
                .counter_of(*pos)
                .unwrap_or_else(|_| vec![0; self.index.rank()]),
            Cursor::General(odometer) => odometer.counter().to_vec(),
        }
    }

    #[inline]
    fn next_offset(&mut self) -> Option<usize> {
        let offset = match &mut self.cursor {
            Cursor::Fast { pos, end } => {
                if *pos == *end {
                    return None;
                }
                *pos += 1;
                *pos - 1
            }
            Cursor::General(odometer) => odometer.next(&self.index)?,
        };
        self.done += 1;
        Some(offset)
    }

    fn next_value(&mut self) -> Result<T, ArrayError> {
        let len = self.index.size();
        let offset = self
            .next_offset()
            .ok_or(ArrayError::IteratorExhausted { len })?;
        self.storage.get(offset)
    }

    /// Write `value` to the next element and advance.
    pub fn set_next(&mut self, value: T) -> Result<(), ArrayError> {
        let len = self.index.size();
        let offset = self
            .next_offset()
            .ok_or(ArrayError::IteratorExhausted { len })?;
        self.storage.set(offset, value)
    }

    /// Read the next element converted to `U` and advance.
    pub fn get_next_as<U: Element>(&mut self) -> Result<U, ArrayError> {
        self.next_value()?.cast()
    }

    typed_next! {
        get_f64_next, set_f64_next, to_f64, from_f64, f64;
        get_f32_next, set_f32_next, to_f32, from_f32, f32;
        get_i64_next, set_i64_next, to_i64, from_i64, i64;
        get_i32_next, set_i32_next, to_i32, from_i32, i32;
        get_i16_next, set_i16_next, to_i16, from_i16, i16;
        get_i8_next, set_i8_next, to_i8, from_i8, i8;
        get_bool_next, set_bool_next, to_bool, from_bool, bool;
        get_char_next, set_char_next, to_char, from_char, char;
    }
}

impl<'a, T: Element> Iterator for IndexIter<'a, T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        let offset = self.next_offset()?;
        self.storage.cell(offset).map(|c| c.get())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.index.size() - self.done;
        (len, Some(len))
    }
}

impl<'a, T: Element> fmt::Debug for IndexIter<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexIter")
            .field("shape", &self.index.shape())
            .field("fast", &self.is_fast())
            .field("position", &self.done)
            .finish()
    }
}

impl<'a, T: Element> ExactSizeIterator for IndexIter<'a, T> {}

impl<'a, T: Element> FusedIterator for IndexIter<'a, T> {}
