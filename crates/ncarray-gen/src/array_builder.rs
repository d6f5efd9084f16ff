// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ncarray::Array;
use ncarray::ArrayError;
use ncarray::Element;

use num_traits::Num;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayBuilder {
    shape: Vec<usize>,
    memory_order: Order,
    generator: ElementGenerator,
}

/// Memory layout of the built array
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Order {
    /// Row-major; the last axis varies fastest in memory
    C,
    /// Column-major, produced as an axis-reversed view of a row-major buffer
    F,
}

/// How to generate elements
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementGenerator {
    Sequential,
    Zero,
}

impl Default for ArrayBuilder {
    fn default() -> Self {
        Self::new(&[])
    }
}

impl ArrayBuilder {
    pub fn new(shape: &[usize]) -> Self {
        ArrayBuilder {
            shape: shape.to_vec(),
            memory_order: Order::C,
            generator: ElementGenerator::Sequential,
        }
    }

    pub fn memory_order(mut self, order: Order) -> Self {
        self.memory_order = order;
        self
    }

    pub fn generator(mut self, generator: ElementGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// Build the array. Sequential elements count up from zero in memory
    /// order.
    pub fn build<T>(self) -> Result<Array<T>, ArrayError>
    where
        T: Element + Num,
    {
        let mut current = T::zero();
        let size = self.shape.iter().product();
        let use_zeros = self.generator == ElementGenerator::Zero;
        let data = (0..size)
            .map(|_| {
                let ret = current;
                if !use_zeros {
                    current = ret + T::one();
                }
                ret
            })
            .collect();
        match self.memory_order {
            Order::C => Array::from_vec(&self.shape, data),
            Order::F => {
                let mut reversed = self.shape.clone();
                reversed.reverse();
                let axes: Vec<usize> = (0..reversed.len()).rev().collect();
                Array::from_vec(&reversed, data)?.permute(&axes)
            }
        }
    }
}

#[test]
fn test_order() {
    let (m, n) = (12, 13);
    let c = ArrayBuilder::new(&[m, n])
        .memory_order(Order::C)
        .build::<i32>()
        .unwrap();
    let f = ArrayBuilder::new(&[m, n])
        .memory_order(Order::F)
        .build::<i32>()
        .unwrap();

    assert_eq!(c.shape(), &[m, n]);
    assert_eq!(f.shape(), &[m, n]);
    assert_eq!(c.strides(), &[n as isize, 1]);
    assert_eq!(f.strides(), &[1, m as isize]);
    assert_eq!(f.get(&[1, 0]).unwrap(), 1);
}

#[test]
fn test_zero() {
    let z = ArrayBuilder::new(&[3, 2])
        .generator(ElementGenerator::Zero)
        .build::<f64>()
        .unwrap();
    assert!(z.iter().all(|x| x == 0.0));
}
