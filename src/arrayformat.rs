// Copyright 2014-2016 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::{Array, Element};

fn format_array<T, F>(array: &Array<T>, f: &mut fmt::Formatter<'_>, mut format: F) -> fmt::Result
where
    T: Element,
    F: FnMut(&T, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    let shape = array.shape();
    let ndim = shape.len();
    let mut counter = vec![0usize; ndim];
    for _ in 0..ndim {
        write!(f, "[")?;
    }
    // number of axes that wrapped while advancing past the previous element
    let mut wrapped = 0;
    for (i, elt) in array.iter().enumerate() {
        if i > 0 {
            if wrapped > 0 {
                for _ in 0..wrapped {
                    write!(f, "]")?;
                }
                writeln!(f, ",")?;
                for _ in 0..ndim - wrapped {
                    write!(f, " ")?;
                }
                for _ in 0..wrapped {
                    write!(f, "[")?;
                }
            } else {
                write!(f, ", ")?;
            }
        }
        format(&elt, f)?;

        wrapped = 0;
        for axis in (0..ndim).rev() {
            counter[axis] += 1;
            if counter[axis] < shape[axis] {
                break;
            }
            counter[axis] = 0;
            wrapped += 1;
        }
    }
    for _ in 0..ndim {
        write!(f, "]")?;
    }
    Ok(())
}

/// Format the array using `Display` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style, in logical order.
impl<T: Element> fmt::Display for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_array(self, f, <_>::fmt)
    }
}

/// Format the array using `Debug` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style.
impl<T: Element> fmt::Debug for Array<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Add extra information for Debug
        format_array(self, f, <_>::fmt)?;
        write!(
            f,
            " shape={:?}, strides={:?}, offset={}, dtype={}",
            self.shape(),
            self.strides(),
            self.index().offset(),
            self.data_type()
        )?;
        if self.is_view() {
            write!(f, ", view")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::Array;

    #[test]
    fn nested_brackets() {
        let a = Array::from_vec(&[2, 2, 2], (0..8).collect::<Vec<i32>>()).unwrap();
        assert_eq!(
            a.to_string(),
            "[[[0, 1],\n  [2, 3]],\n [[4, 5],\n  [6, 7]]]"
        );
    }

    #[test]
    fn views_print_in_logical_order() {
        let a = Array::from_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6]).unwrap();
        let t = a.transpose(0, 1).unwrap();
        assert_eq!(t.to_string(), "[[1, 4],\n [2, 5],\n [3, 6]]");
        assert_eq!(format!("{:.1}", Array::scalar(2.0f64)), "2.0");
        assert_eq!(Array::<u8>::zeros(&[0, 3]).unwrap().to_string(), "[[]]");
    }

    #[test]
    fn debug_adds_layout() {
        let a = Array::from_vec(&[2], vec![1u8, 2]).unwrap();
        let s = format!("{:?}", a.flip(0).unwrap());
        assert_eq!(s, "[2, 1] shape=[2], strides=[-1], offset=1, dtype=ubyte, view");
    }
}
