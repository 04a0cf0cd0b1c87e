// Copyright 2024 bluss and ndarray developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ndframe::{Array, Ix, LinalgScalar};

/// Storage order of a built array.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Order
{
    /// Axis 0 is adjacent in storage; the natural layout of an allocation.
    ColumnMajor,
    /// The last axis is adjacent in storage; built as the transposed view of a
    /// column-major allocation.
    RowMajor,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArrayBuilder
{
    shape: Vec<Ix>,
    memory_order: Order,
    generator: ElementGenerator,
}

/// How to generate elements
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementGenerator
{
    /// 0, 1, 2, … in storage order.
    Sequential,
    Zero,
}

impl Default for ArrayBuilder
{
    fn default() -> Self
    {
        Self::new(&[0])
    }
}

impl ArrayBuilder
{
    pub fn new(shape: &[Ix]) -> Self
    {
        ArrayBuilder {
            shape: shape.to_vec(),
            memory_order: Order::ColumnMajor,
            generator: ElementGenerator::Sequential,
        }
    }

    pub fn memory_order(mut self, order: Order) -> Self
    {
        self.memory_order = order;
        self
    }

    pub fn generator(mut self, generator: ElementGenerator) -> Self
    {
        self.generator = generator;
        self
    }

    pub fn build<T>(self) -> Array<T>
    where T: LinalgScalar
    {
        let mut current = T::zero();
        let size = self.shape.iter().product();
        let use_zeros = self.generator == ElementGenerator::Zero;
        let elems = (0..size)
            .map(|_| {
                let ret = current;
                if !use_zeros {
                    current = ret + T::one();
                }
                ret
            })
            .collect();
        match self.memory_order {
            Order::ColumnMajor => Array::from_shape_vec(&self.shape, elems).unwrap(),
            Order::RowMajor => {
                let reversed: Vec<Ix> = self.shape.iter().rev().copied().collect();
                Array::from_shape_vec(&reversed, elems).unwrap().t()
            }
        }
    }
}

#[test]
fn test_order()
{
    let (m, n) = (12, 13);
    let f = ArrayBuilder::new(&[m, n])
        .memory_order(Order::ColumnMajor)
        .build::<i32>();
    let c = ArrayBuilder::new(&[m, n])
        .memory_order(Order::RowMajor)
        .build::<i32>();

    assert_eq!(c.shape(), &[m, n]);
    assert_eq!(f.shape(), &[m, n]);
    assert_eq!(c.strides(), &[n as isize, 1]);
    assert_eq!(f.strides(), &[1, m as isize]);
    assert_eq!(c.get_ij(1, 0).unwrap(), n as i32);
    assert_eq!(f.get_ij(1, 0).unwrap(), 1);
}

#[test]
fn test_zero_generator()
{
    let z = ArrayBuilder::new(&[3, 2])
        .generator(ElementGenerator::Zero)
        .build::<f64>();
    assert_eq!(z.to_vec(), vec![0.; 6]);
}
