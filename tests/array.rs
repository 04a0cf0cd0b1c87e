extern crate ndframe;

use ndframe::{ArrayFactory, DoubleArray, Error, IntArray, LinalgScalar, ReferenceArray};
use num_complex::Complex64;
use num_traits::{One, Zero};

use defmac::defmac;

#[test]
fn construct_from_rows()
{
    let bj = ArrayFactory::new();
    let a = bj.from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    assert_eq!(a.shape(), &[2, 3]);
    assert_eq!(a.strides(), &[1, 2]);
    assert_eq!(a.to_vec(), vec![1, 4, 2, 5, 3, 6]);
    assert_eq!(a.get_ij(1, 2).unwrap(), 6);
    assert!(!a.is_view());
    assert!(a.is_matrix());
    assert!(!a.is_square());

    let ragged: [&[i32]; 2] = [&[1, 2], &[3]];
    assert!(matches!(bj.from_rows(&ragged), Err(Error::IncompatibleShape { .. })));
}

#[test]
fn shape_vec_must_match()
{
    assert!(IntArray::from_shape_vec(&[2, 2], vec![1, 2, 3, 4]).is_ok());
    assert!(matches!(
        IntArray::from_shape_vec(&[2, 2], vec![1, 2, 3]),
        Err(Error::IncompatibleShape { .. })
    ));
}

#[test]
fn factory_element_kinds()
{
    let bj = ArrayFactory::new();
    assert_eq!(bj.double_array(&[2]).to_vec(), vec![0., 0.]);
    assert_eq!(bj.int_array(&[1, 2]).to_vec(), vec![0, 0]);
    assert_eq!(bj.long_array(&[3]).sum(), 0i64);
    assert_eq!(bj.boolean_array(&[2]).to_vec(), vec![false, false]);
    assert_eq!(bj.complex_array(&[1]).get(0).unwrap(), Complex64::new(0., 0.));

    let mut r: ReferenceArray<String> = bj.reference_array(&[2, 2]);
    assert_eq!(r.get(3).unwrap(), None);
    r.set_ij(1, 1, Some("x".to_string())).unwrap();
    assert_eq!(r.get(3).unwrap().as_deref(), Some("x"));
    assert_eq!(r.get(0).unwrap(), None);
}

#[test]
fn ones_zeros_filled()
{
    fn check<A: LinalgScalar>()
    {
        let bj = ArrayFactory::new();
        let z = bj.zeros::<A>(&[2, 3]);
        let o = bj.ones::<A>(&[2, 3]);
        assert_eq!(z.len(), 6);
        assert!(z.iter().all(|x| x.is_zero()));
        assert!(o.iter().all(|x| x.is_one()));
        assert_eq!(o.sum(), A::one() + A::one() + A::one() + A::one() + A::one() + A::one());
    }
    check::<f32>();
    check::<f64>();
    check::<i32>();
    check::<i64>();
    check::<Complex64>();

    let bj = ArrayFactory::new();
    let f = bj.filled(&[2], true);
    assert_eq!(f.to_vec(), vec![true, true]);
    defmac!(len_of shape => bj.from_elem(shape, 1).len());
    assert_eq!(len_of!(&[2, 3]), 6);
    assert_eq!(len_of!(&[0, 3]), 0);
    assert_eq!(len_of!(&[]), 1);
}

#[test]
fn ranges_and_eye()
{
    let bj = ArrayFactory::new();
    assert_eq!(bj.range(0, 5, 2).to_vec(), vec![0, 2, 4]);
    assert_eq!(bj.range(5, 0, -2).to_vec(), vec![5, 3, 1]);
    assert!(bj.range(0, 5, -1).is_empty());
    assert_eq!(bj.linspace(0., 1., 5).to_vec(), vec![0., 0.25, 0.5, 0.75, 1.]);

    let eye = bj.eye::<f64>(3);
    assert!(eye.is_square());
    assert_eq!(eye.sum(), 3.);
    assert_eq!(eye.get_ij(1, 1).unwrap(), 1.);
    assert_eq!(eye.get_ij(0, 1).unwrap(), 0.);
}

#[test]
fn out_of_range_access()
{
    let mut a = DoubleArray::from_vec(vec![1., 2., 3.]);
    assert_eq!(a.get(3).err(), Some(Error::IndexOutOfRange { index: 3, len: 3 }));
    assert!(a.set(5, 0.).is_err());
    assert_eq!(a.get_ij(0, 0).err(), Some(Error::Dimensionality { expected: 2, found: 1 }));
    assert!(a.size_of(1).is_err());
    assert_eq!(a.size_of(0).unwrap(), 3);
}

#[test]
fn n_dimensional_indexing()
{
    let a = IntArray::from_shape_vec(&[2, 3, 4], (0..24).collect()).unwrap();
    assert_eq!(a.ndim(), 3);
    assert_eq!(a.strides(), &[1, 2, 6]);
    assert_eq!(a.get_index(&[1, 2, 3]).unwrap(), 1 + 2 * 2 + 3 * 6);
    assert!(a.get_index(&[2, 0, 0]).is_err());
    assert!(a.get_index(&[0, 0]).is_err());
    for i in 0..a.len() {
        assert_eq!(a.get(i).unwrap(), i as i32);
    }
}

#[test]
fn copy_is_independent()
{
    let mut a = DoubleArray::from_vec(vec![1., 1., 1., 1.]);
    let b = a.copy();
    a.set(0, 1000.).unwrap();
    assert_eq!(b.get(0).unwrap(), 1.);
    assert!(!b.is_view());
    assert!(!b.shares_storage_with(&a));
}

#[test]
fn elementwise_arithmetic()
{
    let bj = ArrayFactory::new();
    let a = bj.from_rows(&[[1., 2.], [3., 4.]]).unwrap();
    let b = bj.ones::<f64>(&[2, 2]);
    assert_eq!(a.add(&b).unwrap(), bj.from_rows(&[[2., 3.], [4., 5.]]).unwrap());
    assert_eq!(a.sub(&b).unwrap().sum(), 6.);
    assert_eq!(a.mul(&a).unwrap().sum(), 30.);
    assert_eq!(&a * 2., a.add(&a).unwrap());
    assert_eq!((-&a).sum(), -10.);
    assert!(matches!(a.add(&bj.ones::<f64>(&[4])), Err(Error::NonConformantShape { .. })));

    // vectors conform by length regardless of orientation
    let row = a.get_row(0).unwrap();
    let col = a.get_column(0).unwrap();
    assert_eq!(row.add(&col).unwrap().to_vec(), vec![2., 5.]);
}

#[test]
fn numeric_summaries()
{
    let bj = ArrayFactory::new();
    let a = bj.from_rows(&[[1., 5.], [-3., 4.]]).unwrap();
    assert_eq!(a.sum(), 7.);
    assert_eq!(a.product(), -60.);
    assert_eq!(a.mean(), Some(1.75));
    assert_eq!(a.min(), Some(-3.));
    assert_eq!(a.max(), Some(5.));
    assert_eq!(bj.zeros::<f64>(&[0]).mean(), None);
    let sums = a.reduce_columns(|c| c.sum()).unwrap();
    assert_eq!(sums.to_vec(), vec![-2., 9.]);
}

#[test]
fn format_by_rows()
{
    let bj = ArrayFactory::new();
    let a = bj.from_rows(&[[1, 2, 3], [4, 5, 6]]).unwrap();
    assert_eq!(a.to_string(), "[[1, 2, 3],\n [4, 5, 6]]");
}
