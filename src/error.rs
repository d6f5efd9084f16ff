// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use crate::DataType;

/// An error from range, section, index or array operations.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ArrayError {
    #[error("invalid range: {0}")]
    InvalidRange(String),

    #[error("invalid section spec {spec:?}: {reason}")]
    InvalidSpec { spec: String, reason: String },

    #[error("rank mismatch: expected {expected}, got {got}")]
    RankMismatch { expected: usize, got: usize },

    #[error("axis {axis} out of range for rank {rank}")]
    AxisOutOfRange { axis: usize, rank: usize },

    #[error("{dims:?} is not a permutation of 0..{rank}")]
    NotPermutation { dims: Vec<usize>, rank: usize },

    #[error("cannot reduce axis {axis} of length {len}")]
    NotReducible { axis: usize, len: usize },

    #[error("element of {from} cannot be accessed as {to}")]
    ForbiddenConversion { from: DataType, to: DataType },

    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },

    #[error("iterator exhausted after {len} elements")]
    IteratorExhausted { len: usize },

    #[error("array size {size} reaches the 2^31 element ceiling")]
    DimensionTooLarge { size: u128 },

    #[error("incompatible shapes: size {expected} vs {got}")]
    IncompatibleShapes { expected: usize, got: usize },

    #[error("nested input is ragged at depth {depth}")]
    Ragged { depth: usize },

    #[error("incompatible layout: not in canonical order")]
    IncompatibleLayout,

    #[error("unsupported: {0}")]
    Unsupported(&'static str),

    #[error("section is immutable")]
    Immutable,
}

/// Error code for an [`ArrayError`].
///
/// This enumeration is not exhaustive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// malformed range or section, or a rank mismatch against a shape
    InvalidRange,
    /// element accessed as an incompatible type
    ForbiddenConversion,
    /// index arithmetic outside the declared shape or size
    OutOfBounds,
    /// element count reaches the 2^31 ceiling
    Capacity,
    /// total sizes differ
    IncompatibleShapes,
    /// the operation needs a canonical-order index
    IncompatibleLayout,
    /// operation not supported for these operands
    Unsupported,
    /// mutation of a frozen section
    Immutable,
}

impl ArrayError {
    /// Return the `ErrorKind` of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ArrayError::InvalidRange(_)
            | ArrayError::InvalidSpec { .. }
            | ArrayError::RankMismatch { .. }
            | ArrayError::AxisOutOfRange { .. }
            | ArrayError::NotPermutation { .. }
            | ArrayError::NotReducible { .. } => ErrorKind::InvalidRange,
            ArrayError::ForbiddenConversion { .. } => ErrorKind::ForbiddenConversion,
            ArrayError::OutOfBounds { .. } | ArrayError::IteratorExhausted { .. } => {
                ErrorKind::OutOfBounds
            }
            ArrayError::DimensionTooLarge { .. } => ErrorKind::Capacity,
            ArrayError::IncompatibleShapes { .. } | ArrayError::Ragged { .. } => {
                ErrorKind::IncompatibleShapes
            }
            ArrayError::IncompatibleLayout => ErrorKind::IncompatibleLayout,
            ArrayError::Unsupported(_) => ErrorKind::Unsupported,
            ArrayError::Immutable => ErrorKind::Immutable,
        }
    }
}

pub(crate) fn invalid_range(msg: impl Into<String>) -> ArrayError {
    ArrayError::InvalidRange(msg.into())
}

pub(crate) fn check_rank(expected: usize, got: usize) -> Result<(), ArrayError> {
    if expected != got {
        return Err(ArrayError::RankMismatch { expected, got });
    }
    Ok(())
}

pub(crate) fn check_axis(axis: usize, rank: usize) -> Result<(), ArrayError> {
    if axis >= rank {
        return Err(ArrayError::AxisOutOfRange { axis, rank });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds() {
        assert_eq!(invalid_range("x").kind(), ErrorKind::InvalidRange);
        assert_eq!(check_rank(2, 3).unwrap_err().kind(), ErrorKind::InvalidRange);
        assert_eq!(ArrayError::DimensionTooLarge { size: 1 << 31 }.kind(), ErrorKind::Capacity);
        assert_eq!(ArrayError::IteratorExhausted { len: 0 }.kind(), ErrorKind::OutOfBounds);
        assert!(check_axis(1, 2).is_ok());
    }

    #[test]
    fn messages_carry_values() {
        let e = ArrayError::OutOfBounds { index: 7, len: 3 };
        assert_eq!(e.to_string(), "index 7 out of bounds for length 3");
    }
}
