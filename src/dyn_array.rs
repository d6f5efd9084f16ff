// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use tracing::debug;

use crate::error::ArrayError;
use crate::{Array, DataType, Range, Section};

/// An array whose element type is chosen at runtime by [`DataType`].
///
/// Variants are named after the data types they hold. View operations
/// keep the variant.
///
/// ```
/// use ncarray::{DataType, DynArray};
///
/// let a = DynArray::factory(DataType::Short, &[2, 3]).unwrap();
/// a.set_f64(&[1, 2], 41.7).unwrap();
/// assert_eq!(a.get_f64(&[1, 2]).unwrap(), 41.0);
/// assert_eq!(a.transpose(0, 1).unwrap().shape(), &[3, 2]);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DynArray {
    Boolean(Array<bool>),
    Byte(Array<i8>),
    UByte(Array<u8>),
    Short(Array<i16>),
    UShort(Array<u16>),
    Int(Array<i32>),
    UInt(Array<u32>),
    Long(Array<i64>),
    ULong(Array<u64>),
    Float(Array<f32>),
    Double(Array<f64>),
    Char(Array<char>),
}

macro_rules! dispatch {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            DynArray::Boolean($a) => $body,
            DynArray::Byte($a) => $body,
            DynArray::UByte($a) => $body,
            DynArray::Short($a) => $body,
            DynArray::UShort($a) => $body,
            DynArray::Int($a) => $body,
            DynArray::UInt($a) => $body,
            DynArray::Long($a) => $body,
            DynArray::ULong($a) => $body,
            DynArray::Float($a) => $body,
            DynArray::Double($a) => $body,
            DynArray::Char($a) => $body,
        }
    };
}

// apply a view operation and rewrap in the same variant
macro_rules! rewrap {
    ($self:expr, $a:ident => $body:expr) => {
        match $self {
            DynArray::Boolean($a) => DynArray::Boolean($body),
            DynArray::Byte($a) => DynArray::Byte($body),
            DynArray::UByte($a) => DynArray::UByte($body),
            DynArray::Short($a) => DynArray::Short($body),
            DynArray::UShort($a) => DynArray::UShort($body),
            DynArray::Int($a) => DynArray::Int($body),
            DynArray::UInt($a) => DynArray::UInt($body),
            DynArray::Long($a) => DynArray::Long($body),
            DynArray::ULong($a) => DynArray::ULong($body),
            DynArray::Float($a) => DynArray::Float($body),
            DynArray::Double($a) => DynArray::Double($body),
            DynArray::Char($a) => DynArray::Char($body),
        }
    };
}

impl DynArray {
    /// Create a zero-filled array of `shape` holding `data_type` elements.
    ///
    /// **Errors** if the number of elements reaches 2^31.
    pub fn factory(data_type: DataType, shape: &[usize]) -> Result<DynArray, ArrayError> {
        debug!(dtype = %data_type, shape = ?shape, "allocating array");
        Ok(match data_type {
            DataType::Boolean => DynArray::Boolean(Array::zeros(shape)?),
            DataType::Byte => DynArray::Byte(Array::zeros(shape)?),
            DataType::UByte => DynArray::UByte(Array::zeros(shape)?),
            DataType::Short => DynArray::Short(Array::zeros(shape)?),
            DataType::UShort => DynArray::UShort(Array::zeros(shape)?),
            DataType::Int => DynArray::Int(Array::zeros(shape)?),
            DataType::UInt => DynArray::UInt(Array::zeros(shape)?),
            DataType::Long => DynArray::Long(Array::zeros(shape)?),
            DataType::ULong => DynArray::ULong(Array::zeros(shape)?),
            DataType::Float => DynArray::Float(Array::zeros(shape)?),
            DataType::Double => DynArray::Double(Array::zeros(shape)?),
            DataType::Char => DynArray::Char(Array::zeros(shape)?),
        })
    }

    pub fn data_type(&self) -> DataType {
        dispatch!(self, a => a.data_type())
    }

    pub fn shape(&self) -> &[usize] {
        dispatch!(self, a => a.shape())
    }

    pub fn rank(&self) -> usize {
        dispatch!(self, a => a.rank())
    }

    pub fn size(&self) -> usize {
        dispatch!(self, a => a.size())
    }

    pub fn is_view(&self) -> bool {
        dispatch!(self, a => a.is_view())
    }

    /// Read the element at `coords` as `f64`.
    ///
    /// **Errors** with `ForbiddenConversion` for boolean and char arrays.
    pub fn get_f64(&self, coords: &[usize]) -> Result<f64, ArrayError> {
        dispatch!(self, a => a.get_f64(coords))
    }

    pub fn set_f64(&self, coords: &[usize], value: f64) -> Result<(), ArrayError> {
        dispatch!(self, a => a.set_f64(coords, value))
    }

    pub fn get_i64(&self, coords: &[usize]) -> Result<i64, ArrayError> {
        dispatch!(self, a => a.get_i64(coords))
    }

    pub fn set_i64(&self, coords: &[usize], value: i64) -> Result<(), ArrayError> {
        dispatch!(self, a => a.set_i64(coords, value))
    }

    /// Copy the elements out in logical order as `f64`.
    pub fn to_vec_f64(&self) -> Result<Vec<f64>, ArrayError> {
        dispatch!(self, a => a.to_vec_as::<f64>())
    }

    pub fn copy(&self) -> DynArray {
        rewrap!(self, a => a.copy())
    }

    pub fn section(&self, ranges: &[Option<Range>]) -> Result<DynArray, ArrayError> {
        Ok(rewrap!(self, a => a.section(ranges)?))
    }

    pub fn section_no_reduce(&self, ranges: &[Option<Range>]) -> Result<DynArray, ArrayError> {
        Ok(rewrap!(self, a => a.section_no_reduce(ranges)?))
    }

    pub fn section_of(&self, section: &Section) -> Result<DynArray, ArrayError> {
        self.section(section.ranges())
    }

    pub fn slice(&self, axis: usize, value: usize) -> Result<DynArray, ArrayError> {
        Ok(rewrap!(self, a => a.slice(axis, value)?))
    }

    pub fn transpose(&self, a: usize, b: usize) -> Result<DynArray, ArrayError> {
        Ok(rewrap!(self, x => x.transpose(a, b)?))
    }

    pub fn permute(&self, dims: &[usize]) -> Result<DynArray, ArrayError> {
        Ok(rewrap!(self, a => a.permute(dims)?))
    }

    pub fn flip(&self, axis: usize) -> Result<DynArray, ArrayError> {
        Ok(rewrap!(self, a => a.flip(axis)?))
    }

    pub fn reduce(&self) -> DynArray {
        rewrap!(self, a => a.reduce())
    }

    pub fn reshape(&self, shape: &[usize]) -> Result<DynArray, ArrayError> {
        Ok(rewrap!(self, a => a.reshape(shape)?))
    }
}

impl fmt::Display for DynArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        dispatch!(self, a => fmt::Display::fmt(a, f))
    }
}

macro_rules! impl_from_array {
    ($($variant:ident($ty:ty))*) => {
        $(
        impl From<Array<$ty>> for DynArray {
            fn from(a: Array<$ty>) -> DynArray {
                DynArray::$variant(a)
            }
        }
        )*
    };
}

impl_from_array! {
    Boolean(bool) Byte(i8) UByte(u8) Short(i16) UShort(u16) Int(i32)
    UInt(u32) Long(i64) ULong(u64) Float(f32) Double(f64) Char(char)
}
