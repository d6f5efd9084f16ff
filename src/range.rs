// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::cmp::{max, min};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FusedIterator;
use std::str::FromStr;

use num_integer::Integer;

use crate::error::{invalid_range, ArrayError};

/// An arithmetic progression of indices along one axis.
///
/// A `Range` selects the elements `first, first + stride, ..., last` with
/// `last = first + (len - 1) * stride`. Ranges are immutable; every
/// operation returns a new one.
///
/// Two reserved values exist. [`Range::EMPTY`] selects nothing.
/// [`Range::VLEN`] stands for a variable-length axis whose extent is not
/// known at this scope. Neither has a meaningful `first` or `last`.
///
/// ## Examples
///
/// ```
/// use ncarray::Range;
///
/// let r = Range::with_stride(2, 9, 3).unwrap();
/// assert_eq!(r.len(), 3);
/// assert_eq!(r.last(), 8);
/// assert_eq!(r.iter().collect::<Vec<_>>(), vec![2, 5, 8]);
/// ```
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    name: Option<String>,
    first: usize,
    length: usize,
    stride: usize,
    vlen: bool,
}

impl Range {
    /// The range selecting no elements.
    pub const EMPTY: Range = Range {
        name: None,
        first: 0,
        length: 0,
        stride: 1,
        vlen: false,
    };

    /// The variable-length marker.
    pub const VLEN: Range = Range {
        name: None,
        first: 0,
        length: 0,
        stride: 1,
        vlen: true,
    };

    /// Create the unit-stride range `first..=last`.
    pub fn new(first: usize, last: usize) -> Result<Range, ArrayError> {
        Range::with_stride(first, last, 1)
    }

    /// Create the range `first..=last` stepping by `stride`.
    ///
    /// **Errors** if `last < first` or `stride < 1`. A `last` that is not
    /// reached exactly is rounded down to the last selected element.
    pub fn with_stride(first: usize, last: usize, stride: usize) -> Result<Range, ArrayError> {
        Range::build(None, first, last, stride)
    }

    /// Create a named range.
    pub fn named(
        name: impl Into<String>,
        first: usize,
        last: usize,
        stride: usize,
    ) -> Result<Range, ArrayError> {
        Range::build(Some(name.into()), first, last, stride)
    }

    /// The range `0..len`, or `EMPTY` when `len` is zero.
    pub fn with_len(len: usize) -> Range {
        if len == 0 {
            return Range::EMPTY;
        }
        Range {
            name: None,
            first: 0,
            length: len,
            stride: 1,
            vlen: false,
        }
    }

    fn build(
        name: Option<String>,
        first: usize,
        last: usize,
        stride: usize,
    ) -> Result<Range, ArrayError> {
        if last < first {
            return Err(invalid_range(format!(
                "last ({}) must be >= first ({})",
                last, first
            )));
        }
        if stride < 1 {
            return Err(invalid_range(format!("stride ({}) must be > 0", stride)));
        }
        Ok(Range {
            name,
            first,
            length: max(1 + (last - first) / stride, 1),
            stride,
            vlen: false,
        })
    }

    /// Return a copy of this range carrying `name`.
    pub fn with_name(&self, name: impl Into<String>) -> Range {
        Range {
            name: Some(name.into()),
            ..self.clone()
        }
    }

    /// The axis name, if any. Names are carried along but never compared.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// First element. `0` for the `EMPTY` and `VLEN` sentinels.
    pub fn first(&self) -> usize {
        self.first
    }

    /// The last selected element; `first()` for `EMPTY` and `VLEN`.
    pub fn last(&self) -> usize {
        if self.length == 0 {
            return self.first;
        }
        self.first + (self.length - 1) * self.stride
    }

    /// Step between consecutive elements, at least one.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Number of selected elements. `VLEN` reports zero.
    pub fn len(&self) -> usize {
        self.length
    }

    /// Return `true` for the `EMPTY` range.
    pub fn is_empty(&self) -> bool {
        self.length == 0 && !self.vlen
    }

    /// Return `true` for the `VLEN` marker.
    pub fn is_vlen(&self) -> bool {
        self.vlen
    }

    /// The `i`-th selected element.
    pub fn element(&self, i: usize) -> Result<usize, ArrayError> {
        if self.vlen {
            return Err(ArrayError::Unsupported("element of a variable-length range"));
        }
        if i >= self.length {
            return Err(ArrayError::OutOfBounds { index: i, len: self.length });
        }
        Ok(self.first + i * self.stride)
    }

    /// Position of `elem` within this range; the inverse of `element`.
    pub fn index(&self, elem: usize) -> Result<usize, ArrayError> {
        if !self.contains(elem) {
            return Err(invalid_range(format!("element {} not in range {}", elem, self)));
        }
        Ok((elem - self.first) / self.stride)
    }

    /// Return `true` if `i` is one of the selected elements.
    pub fn contains(&self, i: usize) -> bool {
        if self.length == 0 {
            return false;
        }
        i >= self.first && i <= self.last() && (i - self.first) % self.stride == 0
    }

    /// Smallest selected element `>= start`, if any.
    pub fn first_in_interval(&self, start: usize) -> Option<usize> {
        if self.length == 0 || start > self.last() {
            return None;
        }
        if start <= self.first {
            return Some(self.first);
        }
        align_up(self.first, self.stride, start)
    }

    /// Compose with `r`, whose indices select among this range's elements.
    ///
    /// The result never runs past `self.last()`, even when `r` nominally
    /// extends further.
    ///
    /// ```
    /// use ncarray::Range;
    ///
    /// let base = Range::new(0, 9).unwrap();
    /// let c = base.compose(&Range::new(5, 20).unwrap()).unwrap();
    /// assert_eq!((c.first(), c.last()), (5, 9));
    /// ```
    pub fn compose(&self, r: &Range) -> Result<Range, ArrayError> {
        if self.is_empty() || r.is_empty() {
            return Ok(Range::EMPTY);
        }
        if self.vlen || r.vlen {
            return Ok(Range::VLEN);
        }
        let first = self.element(r.first)?;
        let stride = self.stride.checked_mul(r.stride).ok_or_else(|| {
            invalid_range(format!("stride {} * {} overflows", self.stride, r.stride))
        })?;
        let reach = r
            .last()
            .saturating_mul(self.stride)
            .saturating_add(self.first);
        let last = min(self.last(), reach);
        Range::build(self.name.clone(), first, last, stride)
    }

    /// Set intersection.
    ///
    /// **Errors** with `ErrorKind::Unsupported` if both ranges have a
    /// stride greater than one.
    pub fn intersect(&self, r: &Range) -> Result<Range, ArrayError> {
        if self.is_empty() || r.is_empty() {
            return Ok(Range::EMPTY);
        }
        if self.vlen || r.vlen {
            return Ok(Range::VLEN);
        }
        match self.common(r)? {
            Some((first, last, stride)) if first <= last => {
                Range::build(self.name.clone(), first, last, stride)
            }
            _ => Ok(Range::EMPTY),
        }
    }

    /// Return `true` if the ranges share an element.
    pub fn intersects(&self, r: &Range) -> Result<bool, ArrayError> {
        if self.is_empty() || r.is_empty() {
            return Ok(false);
        }
        if self.vlen || r.vlen {
            return Ok(true);
        }
        Ok(matches!(self.common(r)?, Some((first, last, _)) if first <= last))
    }

    // `None` when aligning the first common element overflows
    fn common(&self, r: &Range) -> Result<Option<(usize, usize, usize)>, ArrayError> {
        let last = min(self.last(), r.last());
        let (first, stride) = match (self.stride, r.stride) {
            (1, 1) => (Some(max(self.first, r.first)), 1),
            (1, s) => (align_up(r.first, s, self.first), s),
            (s, 1) => (align_up(self.first, s, r.first), s),
            _ => {
                return Err(ArrayError::Unsupported(
                    "intersection when both ranges have a stride",
                ))
            }
        };
        Ok(first.map(|first| (first, last, stride)))
    }

    /// The smallest unit-stride range covering both ranges.
    ///
    /// Stride information is discarded: the union of `0:8:2` and `1:9:2`
    /// is `0:9`.
    pub fn union(&self, r: &Range) -> Result<Range, ArrayError> {
        if self.is_empty() {
            return Ok(r.clone());
        }
        if self.vlen || r.vlen {
            return Ok(Range::VLEN);
        }
        if r.is_empty() {
            return Ok(self.clone());
        }
        let first = min(self.first, r.first);
        let last = max(self.last(), r.last());
        Range::build(self.name.clone(), first, last, 1)
    }

    /// Subtract `origin` from every element.
    pub fn shift_origin(&self, origin: usize) -> Result<Range, ArrayError> {
        if self.length == 0 {
            return Ok(self.clone());
        }
        if origin > self.first {
            return Err(invalid_range(format!(
                "origin {} lies past first ({})",
                origin, self.first
            )));
        }
        Range::build(
            self.name.clone(),
            self.first - origin,
            self.last() - origin,
            self.stride,
        )
    }

    /// Iterate the selected elements.
    pub fn iter(&self) -> RangeIter {
        RangeIter {
            first: self.first,
            stride: self.stride,
            front: 0,
            back: self.length,
        }
    }
}

/// Smallest `start + k * stride` that is `>= lower`.
#[inline]
fn align_up(start: usize, stride: usize, lower: usize) -> Option<usize> {
    if start >= lower {
        return Some(start);
    }
    Integer::div_ceil(&(lower - start), &stride)
        .checked_mul(stride)?
        .checked_add(start)
}

impl PartialEq for Range {
    fn eq(&self, rhs: &Self) -> bool {
        if self.is_empty() && rhs.is_empty() {
            return true;
        }
        self.first == rhs.first
            && self.length == rhs.length
            && self.stride == rhs.stride
            && self.vlen == rhs.vlen
    }
}

impl Eq for Range {}

impl Hash for Range {
    fn hash<H: Hasher>(&self, state: &mut H) {
        if self.is_empty() {
            0u8.hash(state);
            return;
        }
        (self.first, self.length, self.stride, self.vlen).hash(state);
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.vlen {
            return f.write_str("*");
        }
        if self.length == 0 {
            return f.write_str("EMPTY");
        }
        write!(f, "{}:{}", self.first, self.last())?;
        if self.stride > 1 {
            write!(f, ":{}", self.stride)?;
        }
        Ok(())
    }
}

fn spec_error(spec: &str, reason: impl Into<String>) -> ArrayError {
    ArrayError::InvalidSpec {
        spec: spec.to_string(),
        reason: reason.into(),
    }
}

fn parse_usize(spec: &str, token: &str) -> Result<usize, ArrayError> {
    token
        .trim()
        .parse::<usize>()
        .map_err(|e| spec_error(spec, format!("{:?}: {}", token.trim(), e)))
}

/// Parse one dimension: `first:last[:stride]`, a bare index `i` (the
/// length-one range `i:i`), `*` for `VLEN`, or `EMPTY`.
impl FromStr for Range {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        match token {
            "*" => return Ok(Range::VLEN),
            "EMPTY" => return Ok(Range::EMPTY),
            _ => {}
        }
        let parts: Vec<&str> = token.split(':').collect();
        let range = match parts[..] {
            [index] => {
                let i = parse_usize(s, index)?;
                Range::new(i, i)
            }
            [first, last] => Range::new(parse_usize(s, first)?, parse_usize(s, last)?),
            [first, last, stride] => Range::with_stride(
                parse_usize(s, first)?,
                parse_usize(s, last)?,
                parse_usize(s, stride)?,
            ),
            _ => return Err(spec_error(s, "too many ':'")),
        };
        range.map_err(|e| spec_error(s, e.to_string()))
    }
}

/// Iterator over the elements of a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    first: usize,
    stride: usize,
    front: usize,
    back: usize,
}

impl Iterator for RangeIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.front == self.back {
            return None;
        }
        let elem = self.first + self.front * self.stride;
        self.front += 1;
        Some(elem)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl DoubleEndedIterator for RangeIter {
    #[inline]
    fn next_back(&mut self) -> Option<usize> {
        if self.front == self.back {
            return None;
        }
        self.back -= 1;
        Some(self.first + self.back * self.stride)
    }
}

impl ExactSizeIterator for RangeIter {}

impl FusedIterator for RangeIter {}

impl<'a> IntoIterator for &'a Range {
    type Item = usize;
    type IntoIter = RangeIter;

    fn into_iter(self) -> RangeIter {
        self.iter()
    }
}
