// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;
use std::iter::FusedIterator;
use std::str::FromStr;

use crate::error::{check_rank, invalid_range, ArrayError};
use crate::Range;

/// A rectangular, possibly strided, subset of an n-dimensional index
/// space: one [`Range`] per axis.
///
/// An entry may be `None`, meaning "the whole axis"; such entries are
/// resolved against a concrete shape by [`set_defaults`](Section::set_defaults).
///
/// A section can be frozen with [`make_immutable`](Section::make_immutable),
/// after which every method that edits its list of ranges fails.
///
/// Sections parse from and print as the text grammar
/// `dim (',' dim)*` with `dim := ':' | i | first:last | first:last:stride`.
/// A bare index `i` selects the single element `i`.
///
/// ```
/// use ncarray::Section;
///
/// let s: Section = "1:3,:,2".parse().unwrap();
/// assert_eq!(s.rank(), 3);
/// assert_eq!(s.to_string(), "1:3,:,2:2");
/// ```
#[derive(Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Section {
    ranges: Vec<Option<Range>>,
    immutable: bool,
}

impl Section {
    /// The section covering all of `shape`, with origin zero.
    pub fn from_shape(shape: &[usize]) -> Section {
        Section {
            ranges: shape.iter().map(|&n| Some(Range::with_len(n))).collect(),
            immutable: false,
        }
    }

    /// The section of `shape[i]` elements starting at `origin[i]` on each
    /// axis. An axis of length zero becomes `Range::EMPTY`.
    pub fn new(origin: &[usize], shape: &[usize]) -> Result<Section, ArrayError> {
        check_rank(origin.len(), shape.len())?;
        let ranges = origin
            .iter()
            .zip(shape)
            .map(|(&o, &n)| {
                if n == 0 {
                    Ok(Some(Range::EMPTY))
                } else {
                    let last = o.checked_add(n - 1).ok_or_else(|| last_overflow(o, n))?;
                    Range::new(o, last).map(Some)
                }
            })
            .collect::<Result<_, _>>()?;
        Ok(Section::from_opt_ranges(ranges))
    }

    /// Like [`Section::new`], with `shape[i]` elements spaced by
    /// `strides[i]` on each axis.
    pub fn with_strides(
        origin: &[usize],
        shape: &[usize],
        strides: &[usize],
    ) -> Result<Section, ArrayError> {
        check_rank(origin.len(), shape.len())?;
        check_rank(origin.len(), strides.len())?;
        let mut ranges = Vec::with_capacity(origin.len());
        for ((&o, &n), &s) in origin.iter().zip(shape).zip(strides) {
            if n == 0 {
                ranges.push(Some(Range::EMPTY));
                continue;
            }
            if s < 1 {
                return Err(invalid_range(format!("stride ({}) must be > 0", s)));
            }
            let last = (n - 1)
                .checked_mul(s)
                .and_then(|x| x.checked_add(o))
                .ok_or_else(|| last_overflow(o, n))?;
            ranges.push(Some(Range::with_stride(o, last, s)?));
        }
        Ok(Section::from_opt_ranges(ranges))
    }

    /// A mutable section with every axis resolved to `ranges`.
    pub fn from_ranges(ranges: Vec<Range>) -> Section {
        Section::from_opt_ranges(ranges.into_iter().map(Some).collect())
    }

    /// A mutable section; `None` entries stand for a whole axis, to be
    /// filled in by [`Section::set_defaults`].
    pub fn from_opt_ranges(ranges: Vec<Option<Range>>) -> Section {
        Section {
            ranges,
            immutable: false,
        }
    }

    /// Number of axes, resolved or not.
    pub fn rank(&self) -> usize {
        self.ranges.len()
    }

    /// The per-axis ranges, `None` for unresolved axes.
    pub fn ranges(&self) -> &[Option<Range>] {
        &self.ranges
    }

    /// The range of `axis`, or `None` if it is out of bounds or unresolved.
    pub fn range(&self, axis: usize) -> Option<&Range> {
        self.ranges.get(axis).and_then(Option::as_ref)
    }

    /// Find a range by name.
    pub fn find(&self, name: &str) -> Option<&Range> {
        self.ranges
            .iter()
            .flatten()
            .find(|r| r.name() == Some(name))
    }

    fn resolved(&self) -> Result<Vec<&Range>, ArrayError> {
        self.ranges
            .iter()
            .enumerate()
            .map(|(i, r)| {
                r.as_ref()
                    .ok_or_else(|| invalid_range(format!("range {} is unresolved", i)))
            })
            .collect()
    }

    /// First index of each axis.
    pub fn origin(&self) -> Result<Vec<usize>, ArrayError> {
        Ok(self.resolved()?.iter().map(|r| r.first()).collect())
    }

    /// Number of elements along each axis.
    pub fn shape(&self) -> Result<Vec<usize>, ArrayError> {
        Ok(self.resolved()?.iter().map(|r| r.len()).collect())
    }

    /// Stride of each axis.
    pub fn strides(&self) -> Result<Vec<usize>, ArrayError> {
        Ok(self.resolved()?.iter().map(|r| r.stride()).collect())
    }

    /// Total number of selected elements.
    ///
    /// A `VLEN` axis counts as one, as does an unresolved axis. The
    /// product saturates at `usize::MAX`.
    pub fn compute_size(&self) -> usize {
        self.ranges
            .iter()
            .flatten()
            .filter(|r| !r.is_vlen())
            .fold(1, |acc, r| acc.saturating_mul(r.len()))
    }

    /// Return `true` if some axis is `VLEN`.
    pub fn is_variable_length(&self) -> bool {
        self.ranges.iter().flatten().any(Range::is_vlen)
    }

    /// Return `true` if some axis has a stride greater than one.
    pub fn is_strided(&self) -> bool {
        self.ranges.iter().flatten().any(|r| r.stride() > 1)
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    /// Freeze the list of ranges.
    pub fn make_immutable(&mut self) -> &mut Self {
        self.immutable = true;
        self
    }

    fn check_mutable(&self) -> Result<(), ArrayError> {
        if self.immutable {
            return Err(ArrayError::Immutable);
        }
        Ok(())
    }

    /// Add an axis at the end.
    ///
    /// **Errors** with `ErrorKind::Immutable` once the section is frozen;
    /// the same holds for the other editing methods.
    pub fn append_range(&mut self, range: Option<Range>) -> Result<&mut Self, ArrayError> {
        self.check_mutable()?;
        self.ranges.push(range);
        Ok(self)
    }

    pub fn insert_range(
        &mut self,
        axis: usize,
        range: Option<Range>,
    ) -> Result<&mut Self, ArrayError> {
        self.check_mutable()?;
        if axis > self.rank() {
            return Err(ArrayError::AxisOutOfRange { axis, rank: self.rank() });
        }
        self.ranges.insert(axis, range);
        Ok(self)
    }

    /// Remove `axis` and return its range.
    pub fn remove_range(&mut self, axis: usize) -> Result<Option<Range>, ArrayError> {
        self.check_mutable()?;
        if axis >= self.rank() {
            return Err(ArrayError::AxisOutOfRange { axis, rank: self.rank() });
        }
        Ok(self.ranges.remove(axis))
    }

    /// Replace the range of `axis`.
    pub fn set_range(
        &mut self,
        axis: usize,
        range: Option<Range>,
    ) -> Result<&mut Self, ArrayError> {
        self.check_mutable()?;
        let rank = self.rank();
        match self.ranges.get_mut(axis) {
            Some(slot) => *slot = range,
            None => return Err(ArrayError::AxisOutOfRange { axis, rank }),
        }
        Ok(self)
    }

    /// Replace every unresolved entry with the whole axis of `shape`.
    pub fn set_defaults(&mut self, shape: &[usize]) -> Result<&mut Self, ArrayError> {
        self.check_mutable()?;
        check_rank(shape.len(), self.rank())?;
        for (slot, &n) in self.ranges.iter_mut().zip(shape) {
            if slot.is_none() {
                *slot = Some(Range::with_len(n));
            }
        }
        Ok(self)
    }

    /// A copy of this section with unresolved entries filled from `shape`.
    pub fn with_defaults(&self, shape: &[usize]) -> Result<Section, ArrayError> {
        let mut s = Section::from_opt_ranges(self.ranges.clone());
        s.set_defaults(shape)?;
        Ok(s)
    }

    /// Validate against `shape` without failing.
    ///
    /// Return a description of the first problem found, or `None` if every
    /// range fits inside `shape`.
    pub fn check_in_range(&self, shape: &[usize]) -> Option<String> {
        if self.rank() != shape.len() {
            return Some(format!(
                "number of ranges in section ({}) must equal rank ({})",
                self.rank(),
                shape.len()
            ));
        }
        for (i, (r, &n)) in self.ranges.iter().zip(shape).enumerate() {
            let r = match r {
                Some(r) if !r.is_vlen() && !r.is_empty() => r,
                _ => continue,
            };
            if r.last() >= n {
                return Some(format!(
                    "illegal range for dimension {}: last requested {} > max {}",
                    i,
                    r.last(),
                    n as isize - 1
                ));
            }
        }
        None
    }

    /// Return `true` if this section is the whole of `shape`.
    pub fn equivalent(&self, shape: &[usize]) -> bool {
        self.rank() == shape.len()
            && self.ranges.iter().zip(shape).all(|(r, &n)| match r {
                None => true,
                Some(r) => r.len() == n && (n == 0 || (r.first() == 0 && r.stride() == 1)),
            })
    }

    /// Compose with `want`, whose ranges are relative to this section.
    ///
    /// A `None` entry in `want` keeps this section's range unchanged.
    pub fn compose(&self, want: &Section) -> Result<Section, ArrayError> {
        check_rank(self.rank(), want.rank())?;
        let ranges = self
            .ranges
            .iter()
            .zip(&want.ranges)
            .map(|(base, r)| match (base, r) {
                (_, None) => Ok(base.clone()),
                (None, Some(r)) => Ok(Some(r.clone())),
                (Some(base), Some(r)) => base.compose(r).map(Some),
            })
            .collect::<Result<_, _>>()?;
        Ok(Section::from_opt_ranges(ranges))
    }

    /// Per-axis intersection. An unresolved axis acts as the whole axis.
    pub fn intersect(&self, other: &Section) -> Result<Section, ArrayError> {
        check_rank(self.rank(), other.rank())?;
        let ranges = self
            .ranges
            .iter()
            .zip(&other.ranges)
            .map(|(a, b)| match (a, b) {
                (None, r) | (r, None) => Ok(r.clone()),
                (Some(a), Some(b)) => a.intersect(b).map(Some),
            })
            .collect::<Result<_, _>>()?;
        Ok(Section::from_opt_ranges(ranges))
    }

    /// Per-axis union. An unresolved axis stays unresolved.
    pub fn union(&self, other: &Section) -> Result<Section, ArrayError> {
        check_rank(self.rank(), other.rank())?;
        let ranges = self
            .ranges
            .iter()
            .zip(&other.ranges)
            .map(|(a, b)| match (a, b) {
                (Some(a), Some(b)) => a.union(b).map(Some),
                _ => Ok(None),
            })
            .collect::<Result<_, _>>()?;
        Ok(Section::from_opt_ranges(ranges))
    }

    /// Return `true` if the sections overlap on every axis.
    pub fn intersects(&self, other: &Section) -> Result<bool, ArrayError> {
        check_rank(self.rank(), other.rank())?;
        for (a, b) in self.ranges.iter().zip(&other.ranges) {
            if let (Some(a), Some(b)) = (a, b) {
                if !a.intersects(b)? {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    /// Return `true` if every axis of `other` lies within the bounds of the
    /// matching axis of this section.
    pub fn contains(&self, other: &Section) -> Result<bool, ArrayError> {
        check_rank(self.rank(), other.rank())?;
        Ok(self
            .ranges
            .iter()
            .zip(&other.ranges)
            .all(|(a, b)| match (a, b) {
                (None, _) => true,
                (Some(_), None) => false,
                (Some(a), Some(b)) => {
                    b.is_empty()
                        || (!a.is_empty() && a.first() <= b.first() && a.last() >= b.last())
                }
            }))
    }

    /// Return `true` if the coordinate `point` is selected.
    pub fn contains_point(&self, point: &[usize]) -> bool {
        point.len() == self.rank()
            && self
                .ranges
                .iter()
                .zip(point)
                .all(|(r, &i)| r.as_ref().map_or(true, |r| r.contains(i)))
    }

    /// Move the origin to `origin`, so that the result is relative to it.
    pub fn shift_origin(&self, origin: &[usize]) -> Result<Section, ArrayError> {
        check_rank(self.rank(), origin.len())?;
        let ranges = self
            .ranges
            .iter()
            .zip(origin)
            .map(|(r, &o)| match r {
                None => Ok(None),
                Some(r) => r.shift_origin(o).map(Some),
            })
            .collect::<Result<_, _>>()?;
        Ok(Section::from_opt_ranges(ranges))
    }

    /// Linear offset of the first element of `intersect` among the
    /// elements of this section, in row-major order.
    pub fn offset(&self, intersect: &Section) -> Result<usize, ArrayError> {
        check_rank(self.rank(), intersect.rank())?;
        let base = self.resolved()?;
        let want = intersect.resolved()?;
        let mut result = 0usize;
        let mut stride = 1usize;
        for (b, w) in base.iter().zip(&want).rev() {
            result = b
                .index(w.first())?
                .checked_mul(stride)
                .and_then(|x| x.checked_add(result))
                .ok_or_else(|| overflow(self))?;
            stride = stride.checked_mul(b.len()).ok_or_else(|| overflow(self))?;
        }
        Ok(result)
    }

    /// Drop every axis of length one.
    pub fn reduce(&self) -> Section {
        let ranges = self
            .ranges
            .iter()
            .filter(|r| r.as_ref().map_or(true, |r| r.len() != 1 || r.is_vlen()))
            .cloned()
            .collect();
        Section::from_opt_ranges(ranges)
    }

    /// Divide every range by its stride, giving a unit-stride section.
    pub fn compact(&self) -> Result<Section, ArrayError> {
        let ranges = self
            .ranges
            .iter()
            .map(|r| match r {
                Some(r) if r.stride() > 1 && !r.is_empty() && !r.is_vlen() => {
                    Range::new(r.first() / r.stride(), r.last() / r.stride()).map(Some)
                }
                other => Ok(other.clone()),
            })
            .collect::<Result<_, _>>()?;
        Ok(Section::from_opt_ranges(ranges))
    }

    /// Drop every `VLEN` axis.
    pub fn remove_vlen(&self) -> Section {
        let ranges = self
            .ranges
            .iter()
            .filter(|r| !r.as_ref().map_or(false, Range::is_vlen))
            .cloned()
            .collect();
        Section::from_opt_ranges(ranges)
    }

    /// Iterate the section's points as linear offsets into the row-major
    /// layout of `shape`. Unresolved axes cover the whole axis of `shape`.
    pub fn iter(&self, shape: &[usize]) -> Result<SectionIter, ArrayError> {
        SectionIter::new(self, shape)
    }
}

impl PartialEq for Section {
    fn eq(&self, rhs: &Self) -> bool {
        self.ranges == rhs.ranges
    }
}

impl Eq for Section {}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, r) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            match r {
                None => f.write_str(":")?,
                Some(r) => r.fmt(f)?,
            }
        }
        Ok(())
    }
}

/// Parse the section text grammar; surrounding parentheses are optional.
impl FromStr for Section {
    type Err = ArrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut body = s.trim();
        if let Some(inner) = body.strip_prefix('(').and_then(|b| b.strip_suffix(')')) {
            body = inner.trim();
        }
        if body.is_empty() {
            return Ok(Section::default());
        }
        let ranges = body
            .split(',')
            .map(|token| match token.trim() {
                ":" => Ok(None),
                dim => dim.parse::<Range>().map(Some),
            })
            .collect::<Result<_, _>>()?;
        Ok(Section::from_opt_ranges(ranges))
    }
}

/// Iterator over the points of a [`Section`], yielding linear offsets into
/// a full row-major shape. The last axis varies fastest.
#[derive(Clone, Debug)]
pub struct SectionIter {
    ranges: Vec<Range>,
    strides: Vec<usize>,
    counter: Vec<usize>,
    done: usize,
    total: usize,
}

impl SectionIter {
    fn new(section: &Section, shape: &[usize]) -> Result<SectionIter, ArrayError> {
        let section = section.with_defaults(shape)?;
        if let Some(msg) = section.check_in_range(shape) {
            return Err(invalid_range(msg));
        }
        if section.is_variable_length() {
            return Err(ArrayError::Unsupported("iteration over a variable-length section"));
        }
        let ranges: Vec<Range> = section.ranges.iter().flatten().cloned().collect();
        let mut strides = vec![0; shape.len()];
        let mut ss = 1usize;
        for (s, &n) in strides.iter_mut().zip(shape).rev() {
            *s = ss;
            ss = ss.checked_mul(n).ok_or_else(|| overflow(&section))?;
        }
        let total = ranges
            .iter()
            .try_fold(1usize, |acc, r| acc.checked_mul(r.len()))
            .ok_or_else(|| overflow(&section))?;
        Ok(SectionIter {
            counter: vec![0; ranges.len()],
            ranges,
            strides,
            done: 0,
            total,
        })
    }

    /// Coordinates, in the full shape, of the point the next call to
    /// `next` will yield.
    pub fn counter(&self) -> Vec<usize> {
        self.ranges
            .iter()
            .zip(&self.counter)
            .map(|(r, &i)| r.first() + i * r.stride())
            .collect()
    }

    fn current(&self) -> usize {
        self.ranges
            .iter()
            .zip(&self.counter)
            .zip(&self.strides)
            .map(|((r, &i), &s)| (r.first() + i * r.stride()) * s)
            .sum()
    }

    fn incr(&mut self) {
        for (i, r) in self.counter.iter_mut().zip(&self.ranges).rev() {
            *i += 1;
            if *i < r.len() {
                return;
            }
            *i = 0;
        }
    }
}

impl Iterator for SectionIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.done >= self.total {
            return None;
        }
        let offset = self.current();
        self.done += 1;
        if self.done < self.total {
            self.incr();
        }
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.total - self.done;
        (len, Some(len))
    }
}

impl ExactSizeIterator for SectionIter {}

impl FusedIterator for SectionIter {}

fn last_overflow(origin: usize, len: usize) -> ArrayError {
    invalid_range(format!("{} elements from {} run past usize::MAX", len, origin))
}

fn overflow(section: &Section) -> ArrayError {
    invalid_range(format!("index arithmetic of section {} overflows", section))
}
