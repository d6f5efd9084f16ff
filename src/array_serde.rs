// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use serde::de::{self, MapAccess, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use std::fmt;
use std::marker::PhantomData;

use crate::{Array, DataType, Element, IndexIter};

/// Version of the serialized array layout.
pub const ARRAY_FORMAT_VERSION: u8 = 1u8;

/// Verifies that the version of the deserialized array matches the current
/// `ARRAY_FORMAT_VERSION`.
pub fn verify_version<E>(v: u8) -> Result<(), E>
where
    E: de::Error,
{
    if v != ARRAY_FORMAT_VERSION {
        let err_msg = format!("unknown array version: {}", v);
        Err(de::Error::custom(err_msg))
    } else {
        Ok(())
    }
}

fn verify_dtype<T: Element, E: de::Error>(dtype: DataType) -> Result<(), E> {
    if dtype != T::DATA_TYPE {
        let err_msg = format!("expected dtype {}, found {}", T::DATA_TYPE, dtype);
        Err(de::Error::custom(err_msg))
    } else {
        Ok(())
    }
}

/// Views serialize their elements in logical order; the layout of the
/// backing buffer is not preserved.
///
/// **Requires crate feature `"serde"`**
impl<T> Serialize for Array<T>
where
    T: Element + Serialize,
{
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        let mut state = serializer.serialize_struct("Array", 4)?;
        state.serialize_field("v", &ARRAY_FORMAT_VERSION)?;
        state.serialize_field("dtype", &self.data_type())?;
        state.serialize_field("shape", self.shape())?;
        state.serialize_field("data", &Sequence(self))?;
        state.end()
    }
}

// private iterator wrapper
struct Sequence<'a, T>(&'a Array<T>);

impl<'a, T> Serialize for Sequence<'a, T>
where
    T: Element + Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let iter: IndexIter<'_, T> = self.0.iter();
        let mut seq = serializer.serialize_seq(Some(iter.len()))?;
        for elt in iter {
            seq.serialize_element(&elt)?;
        }
        seq.end()
    }
}

struct ArrayVisitor<T> {
    _marker: PhantomData<T>,
}

enum ArrayField {
    Version,
    DataType,
    Shape,
    Data,
}

impl<T> ArrayVisitor<T> {
    pub fn new() -> Self {
        ArrayVisitor { _marker: PhantomData }
    }
}

static ARRAY_FIELDS: &[&str] = &["v", "dtype", "shape", "data"];

/// **Requires crate feature `"serde"`**
impl<'de, T> Deserialize<'de> for Array<T>
where
    T: Element + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Array<T>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_struct("Array", ARRAY_FIELDS, ArrayVisitor::new())
    }
}

impl<'de> Deserialize<'de> for ArrayField {
    fn deserialize<D>(deserializer: D) -> Result<ArrayField, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ArrayFieldVisitor;

        impl<'de> Visitor<'de> for ArrayFieldVisitor {
            type Value = ArrayField;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(r#""v", "dtype", "shape" or "data""#)
            }

            fn visit_str<E>(self, value: &str) -> Result<ArrayField, E>
            where
                E: de::Error,
            {
                match value {
                    "v" => Ok(ArrayField::Version),
                    "dtype" => Ok(ArrayField::DataType),
                    "shape" => Ok(ArrayField::Shape),
                    "data" => Ok(ArrayField::Data),
                    other => Err(de::Error::unknown_field(other, ARRAY_FIELDS)),
                }
            }

            fn visit_bytes<E>(self, value: &[u8]) -> Result<ArrayField, E>
            where
                E: de::Error,
            {
                match value {
                    b"v" => Ok(ArrayField::Version),
                    b"dtype" => Ok(ArrayField::DataType),
                    b"shape" => Ok(ArrayField::Shape),
                    b"data" => Ok(ArrayField::Data),
                    other => Err(de::Error::unknown_field(
                        &String::from_utf8_lossy(other),
                        ARRAY_FIELDS,
                    )),
                }
            }
        }

        deserializer.deserialize_identifier(ArrayFieldVisitor)
    }
}

fn build<T: Element, E: de::Error>(shape: Vec<usize>, data: Vec<T>) -> Result<Array<T>, E> {
    Array::from_vec(&shape, data).map_err(de::Error::custom)
}

impl<'de, T> Visitor<'de> for ArrayVisitor<T>
where
    T: Element + Deserialize<'de>,
{
    type Value = Array<T>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("ncarray representation")
    }

    fn visit_seq<V>(self, mut visitor: V) -> Result<Array<T>, V::Error>
    where
        V: SeqAccess<'de>,
    {
        let v: u8 = match visitor.next_element()? {
            Some(value) => value,
            None => return Err(de::Error::invalid_length(0, &self)),
        };
        verify_version::<V::Error>(v)?;

        let dtype: DataType = match visitor.next_element()? {
            Some(value) => value,
            None => return Err(de::Error::invalid_length(1, &self)),
        };
        verify_dtype::<T, V::Error>(dtype)?;

        let shape: Vec<usize> = match visitor.next_element()? {
            Some(value) => value,
            None => return Err(de::Error::invalid_length(2, &self)),
        };

        let data: Vec<T> = match visitor.next_element()? {
            Some(value) => value,
            None => return Err(de::Error::invalid_length(3, &self)),
        };

        build(shape, data)
    }

    fn visit_map<V>(self, mut visitor: V) -> Result<Array<T>, V::Error>
    where
        V: MapAccess<'de>,
    {
        let mut v: Option<u8> = None;
        let mut dtype: Option<DataType> = None;
        let mut shape: Option<Vec<usize>> = None;
        let mut data: Option<Vec<T>> = None;

        while let Some(key) = visitor.next_key()? {
            match key {
                ArrayField::Version => {
                    let val = visitor.next_value()?;
                    verify_version::<V::Error>(val)?;
                    v = Some(val);
                }
                ArrayField::DataType => {
                    let val = visitor.next_value()?;
                    verify_dtype::<T, V::Error>(val)?;
                    dtype = Some(val);
                }
                ArrayField::Shape => {
                    shape = Some(visitor.next_value()?);
                }
                ArrayField::Data => {
                    data = Some(visitor.next_value()?);
                }
            }
        }

        if v.is_none() {
            return Err(de::Error::missing_field("v"));
        }
        if dtype.is_none() {
            return Err(de::Error::missing_field("dtype"));
        }
        let shape = shape.ok_or_else(|| de::Error::missing_field("shape"))?;
        let data = data.ok_or_else(|| de::Error::missing_field("data"))?;

        build(shape, data)
    }
}
