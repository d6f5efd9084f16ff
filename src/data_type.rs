// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::str::FromStr;

use crate::error::{invalid_range, ArrayError};

/// Element type tag of an array.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    Boolean,
    Byte,
    UByte,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    Float,
    Double,
    Char,
}

impl DataType {
    pub const ALL: [DataType; 12] = [
        DataType::Boolean,
        DataType::Byte,
        DataType::UByte,
        DataType::Short,
        DataType::UShort,
        DataType::Int,
        DataType::UInt,
        DataType::Long,
        DataType::ULong,
        DataType::Float,
        DataType::Double,
        DataType::Char,
    ];

    /// Lower-case type name, as used in CDL.
    pub fn name(self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Byte => "byte",
            DataType::UByte => "ubyte",
            DataType::Short => "short",
            DataType::UShort => "ushort",
            DataType::Int => "int",
            DataType::UInt => "uint",
            DataType::Long => "long",
            DataType::ULong => "ulong",
            DataType::Float => "float",
            DataType::Double => "double",
            DataType::Char => "char",
        }
    }

    /// Size of one element in bytes.
    pub fn size(self) -> usize {
        match self {
            DataType::Boolean | DataType::Byte | DataType::UByte | DataType::Char => 1,
            DataType::Short | DataType::UShort => 2,
            DataType::Int | DataType::UInt | DataType::Float => 4,
            DataType::Long | DataType::ULong | DataType::Double => 8,
        }
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, DataType::Boolean | DataType::Char)
    }

    pub fn is_integral(self) -> bool {
        self.is_numeric() && !self.is_floating_point()
    }

    pub fn is_floating_point(self) -> bool {
        matches!(self, DataType::Float | DataType::Double)
    }

    pub fn is_unsigned(self) -> bool {
        matches!(
            self,
            DataType::UByte | DataType::UShort | DataType::UInt | DataType::ULong
        )
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DataType {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        DataType::ALL
            .iter()
            .copied()
            .find(|dt| dt.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| invalid_range(format!("unknown data type {:?}", s)))
    }
}
