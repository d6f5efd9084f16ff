// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Scalar element types and the conversions between them.
//!
//! Numeric types convert among each other with `as` semantics: reading
//! through a wider accessor widens, writing through a narrower one
//! truncates. `bool` only converts to and from `bool`. `char` converts to
//! and from integers by code point.
use std::fmt;

use num_traits::AsPrimitive;

use crate::error::ArrayError;
use crate::DataType;

mod private {
    pub trait Sealed {}
}

/// A scalar that can be stored in an [`Array`](crate::Array).
///
/// ***This trait is sealed; it is implemented for `bool`, `char` and the
/// primitive integer and float types.***
pub trait Element:
    Copy + Default + PartialEq + fmt::Debug + fmt::Display + 'static + private::Sealed
{
    /// Runtime tag of this element type.
    const DATA_TYPE: DataType;

    fn to_f64(self) -> Result<f64, ArrayError>;
    fn to_f32(self) -> Result<f32, ArrayError>;
    fn to_i64(self) -> Result<i64, ArrayError>;
    fn to_i32(self) -> Result<i32, ArrayError>;
    fn to_i16(self) -> Result<i16, ArrayError>;
    fn to_i8(self) -> Result<i8, ArrayError>;
    fn to_bool(self) -> Result<bool, ArrayError>;
    fn to_char(self) -> Result<char, ArrayError>;

    fn from_f64(v: f64) -> Result<Self, ArrayError>;
    fn from_f32(v: f32) -> Result<Self, ArrayError>;
    fn from_i64(v: i64) -> Result<Self, ArrayError>;
    fn from_i32(v: i32) -> Result<Self, ArrayError>;
    fn from_i16(v: i16) -> Result<Self, ArrayError>;
    fn from_i8(v: i8) -> Result<Self, ArrayError>;
    fn from_bool(v: bool) -> Result<Self, ArrayError>;
    fn from_char(v: char) -> Result<Self, ArrayError>;

    /// Convert to another element type.
    ///
    /// Integral targets go through `i64` (which round-trips `u64` bit for
    /// bit), floating point targets through `f64`.
    fn cast<U: Element>(self) -> Result<U, ArrayError> {
        match U::DATA_TYPE {
            DataType::Boolean => U::from_bool(self.to_bool()?),
            DataType::Char => U::from_char(self.to_char()?),
            DataType::Float | DataType::Double => U::from_f64(self.to_f64()?),
            _ => U::from_i64(self.to_i64()?),
        }
    }
}

#[inline]
fn forbidden(from: DataType, to: DataType) -> ArrayError {
    ArrayError::ForbiddenConversion { from, to }
}

macro_rules! numeric_conversions {
    ($ty:ty) => {
        fn to_f64(self) -> Result<f64, ArrayError> { Ok(self.as_()) }
        fn to_f32(self) -> Result<f32, ArrayError> { Ok(self.as_()) }
        fn to_i64(self) -> Result<i64, ArrayError> { Ok(self.as_()) }
        fn to_i32(self) -> Result<i32, ArrayError> { Ok(self.as_()) }
        fn to_i16(self) -> Result<i16, ArrayError> { Ok(self.as_()) }
        fn to_i8(self) -> Result<i8, ArrayError> { Ok(self.as_()) }
        fn to_bool(self) -> Result<bool, ArrayError> {
            Err(forbidden(Self::DATA_TYPE, DataType::Boolean))
        }

        fn from_f64(v: f64) -> Result<Self, ArrayError> { Ok(v.as_()) }
        fn from_f32(v: f32) -> Result<Self, ArrayError> { Ok(v.as_()) }
        fn from_i64(v: i64) -> Result<Self, ArrayError> { Ok(v.as_()) }
        fn from_i32(v: i32) -> Result<Self, ArrayError> { Ok(v.as_()) }
        fn from_i16(v: i16) -> Result<Self, ArrayError> { Ok(v.as_()) }
        fn from_i8(v: i8) -> Result<Self, ArrayError> { Ok(v.as_()) }
        fn from_bool(_: bool) -> Result<Self, ArrayError> {
            Err(forbidden(DataType::Boolean, Self::DATA_TYPE))
        }
    };
}

macro_rules! impl_integral {
    ($($ty:ty => $dt:ident,)*) => {
        $(
        impl private::Sealed for $ty {}

        impl Element for $ty {
            const DATA_TYPE: DataType = DataType::$dt;

            numeric_conversions!($ty);

            fn to_char(self) -> Result<char, ArrayError> {
                let code: u32 = self.as_();
                char::from_u32(code).ok_or_else(|| forbidden(Self::DATA_TYPE, DataType::Char))
            }

            fn from_char(v: char) -> Result<Self, ArrayError> {
                Ok((v as u32).as_())
            }
        }
        )*
    };
}

macro_rules! impl_float {
    ($($ty:ty => $dt:ident,)*) => {
        $(
        impl private::Sealed for $ty {}

        impl Element for $ty {
            const DATA_TYPE: DataType = DataType::$dt;

            numeric_conversions!($ty);

            fn to_char(self) -> Result<char, ArrayError> {
                Err(forbidden(Self::DATA_TYPE, DataType::Char))
            }

            fn from_char(_: char) -> Result<Self, ArrayError> {
                Err(forbidden(DataType::Char, Self::DATA_TYPE))
            }
        }
        )*
    };
}

impl_integral! {
    i8 => Byte,
    u8 => UByte,
    i16 => Short,
    u16 => UShort,
    i32 => Int,
    u32 => UInt,
    i64 => Long,
    u64 => ULong,
}

impl_float! {
    f32 => Float,
    f64 => Double,
}

macro_rules! refuse_numeric {
    ($($to:ident, $from:ident, $ty:ty, $dt:ident;)*) => {
        $(
        fn $to(self) -> Result<$ty, ArrayError> {
            Err(forbidden(Self::DATA_TYPE, DataType::$dt))
        }
        fn $from(_: $ty) -> Result<Self, ArrayError> {
            Err(forbidden(DataType::$dt, Self::DATA_TYPE))
        }
        )*
    };
}

impl private::Sealed for bool {}

impl Element for bool {
    const DATA_TYPE: DataType = DataType::Boolean;

    refuse_numeric! {
        to_f64, from_f64, f64, Double;
        to_f32, from_f32, f32, Float;
        to_i64, from_i64, i64, Long;
        to_i32, from_i32, i32, Int;
        to_i16, from_i16, i16, Short;
        to_i8, from_i8, i8, Byte;
        to_char, from_char, char, Char;
    }

    fn to_bool(self) -> Result<bool, ArrayError> {
        Ok(self)
    }

    fn from_bool(v: bool) -> Result<Self, ArrayError> {
        Ok(v)
    }
}

macro_rules! char_integral {
    ($($to:ident, $from:ident, $ty:ty;)*) => {
        $(
        fn $to(self) -> Result<$ty, ArrayError> {
            Ok((self as u32).as_())
        }
        fn $from(v: $ty) -> Result<Self, ArrayError> {
            <$ty as Element>::to_char(v)
        }
        )*
    };
}

impl private::Sealed for char {}

impl Element for char {
    const DATA_TYPE: DataType = DataType::Char;

    refuse_numeric! {
        to_f64, from_f64, f64, Double;
        to_f32, from_f32, f32, Float;
    }

    char_integral! {
        to_i64, from_i64, i64;
        to_i32, from_i32, i32;
        to_i16, from_i16, i16;
        to_i8, from_i8, i8;
    }

    fn to_bool(self) -> Result<bool, ArrayError> {
        Err(forbidden(DataType::Char, DataType::Boolean))
    }

    fn from_bool(_: bool) -> Result<Self, ArrayError> {
        Err(forbidden(DataType::Boolean, DataType::Char))
    }

    fn to_char(self) -> Result<char, ArrayError> {
        Ok(self)
    }

    fn from_char(v: char) -> Result<Self, ArrayError> {
        Ok(v)
    }
}
