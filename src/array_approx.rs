// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::{Array, Element};

impl<T: Element> Array<T> {
    /// A test for equality that uses the elementwise absolute difference to compute the
    /// approximate equality of two arrays.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn abs_diff_eq<U>(
        &self,
        other: &Array<U>,
        epsilon: <T as AbsDiffEq<U>>::Epsilon,
    ) -> bool
    where
        T: AbsDiffEq<U>,
        <T as AbsDiffEq<U>>::Epsilon: Clone,
        U: Element,
    {
        <Self as AbsDiffEq<Array<U>>>::abs_diff_eq(self, other, epsilon)
    }

    /// A test for equality that uses an elementwise relative comparison if the values are far
    /// apart; and the absolute difference otherwise.
    ///
    /// **Requires crate feature `"approx"`**
    pub fn relative_eq<U>(
        &self,
        other: &Array<U>,
        epsilon: <T as AbsDiffEq<U>>::Epsilon,
        max_relative: <T as AbsDiffEq<U>>::Epsilon,
    ) -> bool
    where
        T: RelativeEq<U>,
        <T as AbsDiffEq<U>>::Epsilon: Clone,
        U: Element,
    {
        <Self as RelativeEq<Array<U>>>::relative_eq(self, other, epsilon, max_relative)
    }

    // shapes first, then elementwise in logical order
    fn all_pairs<U, F>(&self, other: &Array<U>, mut f: F) -> bool
    where
        U: Element,
        F: FnMut(&T, &U) -> bool,
    {
        self.shape() == other.shape() && self.iter().zip(other.iter()).all(|(a, b)| f(&a, &b))
    }
}

/// **Requires crate feature `"approx"`.**
impl<T, U> AbsDiffEq<Array<U>> for Array<T>
where
    T: Element + AbsDiffEq<U>,
    T::Epsilon: Clone,
    U: Element,
{
    type Epsilon = T::Epsilon;

    fn default_epsilon() -> T::Epsilon {
        T::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Array<U>, epsilon: T::Epsilon) -> bool {
        self.all_pairs(other, |a, b| T::abs_diff_eq(a, b, epsilon.clone()))
    }
}

/// **Requires crate feature `"approx"`.**
impl<T, U> RelativeEq<Array<U>> for Array<T>
where
    T: Element + RelativeEq<U>,
    T::Epsilon: Clone,
    U: Element,
{
    fn default_max_relative() -> T::Epsilon {
        T::default_max_relative()
    }

    fn relative_eq(&self, other: &Array<U>, epsilon: T::Epsilon, max_relative: T::Epsilon) -> bool {
        self.all_pairs(other, |a, b| {
            T::relative_eq(a, b, epsilon.clone(), max_relative.clone())
        })
    }
}

/// **Requires crate feature `"approx"`.**
impl<T, U> UlpsEq<Array<U>> for Array<T>
where
    T: Element + UlpsEq<U>,
    T::Epsilon: Clone,
    U: Element,
{
    fn default_max_ulps() -> u32 {
        T::default_max_ulps()
    }

    fn ulps_eq(&self, other: &Array<U>, epsilon: T::Epsilon, max_ulps: u32) -> bool {
        self.all_pairs(other, |a, b| T::ulps_eq(a, b, epsilon.clone(), max_ulps))
    }
}
