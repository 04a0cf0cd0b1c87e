extern crate ndframe;

use ndframe::{Index, IntArray, Key, Slice};

use quickcheck::{quickcheck, TestResult};

/// Shape of at most three axes built from `dims`, each axis in `1..=4`.
fn small_shape(dims: &[u8]) -> Vec<usize>
{
    dims.iter().take(3).map(|&d| d as usize % 4 + 1).collect()
}

fn sequential(shape: &[usize]) -> IntArray
{
    let len = shape.iter().product::<usize>() as i32;
    IntArray::from_shape_vec(shape, (0..len).collect()).unwrap()
}

quickcheck! {
    fn reshape_preserves_logical_order(dims: Vec<u8>, split: u8) -> TestResult {
        let shape = small_shape(&dims);
        let a = sequential(&shape);
        let len = a.len();
        let first = split as usize % len + 1;
        if len % first != 0 {
            return TestResult::discard();
        }
        let b = a.reshape(&[first, len / first]).unwrap();
        TestResult::from_bool((0..len).all(|i| b.get(i).unwrap() == a.get(i).unwrap()))
    }

    fn transpose_is_involution(dims: Vec<u8>, reverse: bool) -> bool {
        let a = sequential(&small_shape(&dims));
        let a = if reverse && a.ndim() > 0 {
            a.slice(&[Slice::from(..).step_by(-1)]).unwrap()
        } else {
            a
        };
        let tt = a.t().t();
        tt.shape() == a.shape() && tt.strides() == a.strides() && tt == a
    }

    fn copy_is_independent(values: Vec<i32>, at: usize) -> TestResult {
        if values.is_empty() {
            return TestResult::discard();
        }
        let mut a = IntArray::from_vec(values.clone());
        let b = a.copy();
        let at = at % values.len();
        a.set(at, values[at].wrapping_add(1)).unwrap();
        TestResult::from_bool(!b.is_view() && b.to_vec() == values)
    }

    fn index_is_bijective(keys: Vec<i64>, sort: bool) -> bool {
        let mut unique = keys;
        unique.sort_unstable();
        unique.dedup();
        let index = if sort {
            Index::sorted(unique.iter().rev().copied())
        } else {
            Index::from_keys(unique.iter().copied())
        }
        .unwrap();
        index.len() == unique.len()
            && index
                .entries()
                .all(|(k, p)| index.location(k.clone()) == Ok(p) && index.key(p) == Ok(k))
            && (!sort || index.keys().eq(unique.iter().map(|&k| Key::from(k))))
    }
}
