// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::error::ArrayError;
use crate::Element;

/// Native nested collections that can seed an array; see
/// [`Array::from_nested`](crate::Array::from_nested).
///
/// Implemented for every element type (depth 0) and for `Vec<N>`, `[N]`
/// and `[N; K]` over a nested `N`.
pub trait NestedArray {
    type Elem: Element;

    /// Nesting depth, which becomes the array rank.
    const DEPTH: usize;

    /// Push the extents found by descending through first elements. Empty
    /// levels contribute zeros for the levels below them.
    fn shape_into(&self, shape: &mut Vec<usize>);

    /// Append elements in row-major order, checking each level against
    /// `shape[depth]`.
    fn flatten_into(
        &self,
        shape: &[usize],
        depth: usize,
        out: &mut Vec<Self::Elem>,
    ) -> Result<(), ArrayError>;
}

macro_rules! impl_leaf {
    ($($ty:ty)*) => {
        $(
        impl NestedArray for $ty {
            type Elem = $ty;
            const DEPTH: usize = 0;

            fn shape_into(&self, _: &mut Vec<usize>) {}

            fn flatten_into(
                &self,
                _: &[usize],
                _: usize,
                out: &mut Vec<$ty>,
            ) -> Result<(), ArrayError> {
                out.push(*self);
                Ok(())
            }
        }
        )*
    };
}

impl_leaf!(bool i8 u8 i16 u16 i32 u32 i64 u64 f32 f64 char);

fn shape_of_items<N: NestedArray>(items: &[N], shape: &mut Vec<usize>) {
    shape.push(items.len());
    match items.first() {
        Some(first) => first.shape_into(shape),
        None => shape.extend(std::iter::repeat(0).take(N::DEPTH)),
    }
}

fn flatten_items<N: NestedArray>(
    items: &[N],
    shape: &[usize],
    depth: usize,
    out: &mut Vec<N::Elem>,
) -> Result<(), ArrayError> {
    if shape.get(depth) != Some(&items.len()) {
        return Err(ArrayError::Ragged { depth });
    }
    for item in items {
        item.flatten_into(shape, depth + 1, out)?;
    }
    Ok(())
}

impl<N: NestedArray> NestedArray for [N] {
    type Elem = N::Elem;
    const DEPTH: usize = N::DEPTH + 1;

    fn shape_into(&self, shape: &mut Vec<usize>) {
        shape_of_items(self, shape)
    }

    fn flatten_into(
        &self,
        shape: &[usize],
        depth: usize,
        out: &mut Vec<N::Elem>,
    ) -> Result<(), ArrayError> {
        flatten_items(self, shape, depth, out)
    }
}

impl<N: NestedArray> NestedArray for Vec<N> {
    type Elem = N::Elem;
    const DEPTH: usize = N::DEPTH + 1;

    fn shape_into(&self, shape: &mut Vec<usize>) {
        shape_of_items(self, shape)
    }

    fn flatten_into(
        &self,
        shape: &[usize],
        depth: usize,
        out: &mut Vec<N::Elem>,
    ) -> Result<(), ArrayError> {
        flatten_items(self, shape, depth, out)
    }
}

impl<N: NestedArray, const K: usize> NestedArray for [N; K] {
    type Elem = N::Elem;
    const DEPTH: usize = N::DEPTH + 1;

    fn shape_into(&self, shape: &mut Vec<usize>) {
        shape_of_items(self, shape)
    }

    fn flatten_into(
        &self,
        shape: &[usize],
        depth: usize,
        out: &mut Vec<N::Elem>,
    ) -> Result<(), ArrayError> {
        flatten_items(self, shape, depth, out)
    }
}
