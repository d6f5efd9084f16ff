use std::borrow::Cow;

use ncarray::{Array, ErrorKind, Range, Section, Storage};
use ncarray_gen::array_builder::ArrayBuilder;

use itertools::Itertools;

fn seq(shape: &[usize]) -> Array<f64> {
    ArrayBuilder::new(shape).build().unwrap()
}

#[test]
fn views_alias_the_buffer() {
    let a = seq(&[3, 4]);
    let v = a
        .section(&[Some(Range::new(1, 2).unwrap()), Some(Range::with_stride(0, 3, 3).unwrap())])
        .unwrap();
    assert_eq!(v.shape(), &[2, 2]);
    assert!(a.shares_storage(&v));
    v.set(&[1, 1], -1.0).unwrap();
    assert_eq!(a.get(&[2, 3]).unwrap(), -1.0);

    let t = v.transpose(0, 1).unwrap();
    assert_eq!(t.get(&[1, 1]).unwrap(), -1.0);
    a.set(&[1, 3], 100.0).unwrap();
    assert_eq!(t.get(&[1, 0]).unwrap(), 100.0);
}

#[test]
fn slice_drops_only_that_axis() {
    let a = seq(&[3, 1, 4]);
    let s = a.slice(0, 1).unwrap();
    assert_eq!(s.shape(), &[1, 4]);
    assert_eq!(s.to_vec(), vec![4.0, 5.0, 6.0, 7.0]);
    assert_eq!(a.slice(1, 0).unwrap().shape(), &[3, 4]);
    assert_eq!(a.slice(0, 3).unwrap_err().kind(), ErrorKind::InvalidRange);
}

#[test]
fn section_reduces_every_unit_axis() {
    let a = seq(&[3, 1, 4]);
    let s = a.section(&[Some(Range::new(2, 2).unwrap()), None, None]).unwrap();
    assert_eq!(s.shape(), &[4]);
    let n = a.section_no_reduce(&[Some(Range::new(2, 2).unwrap()), None, None]).unwrap();
    assert_eq!(n.shape(), &[1, 1, 4]);
    assert_eq!(n.reduce().shape(), &[4]);
    assert_eq!(n.reduce_axis(1).unwrap().shape(), &[1, 4]);
    assert!(n.reduce_axis(2).is_err());
}

#[test]
fn section_by_text_and_struct() {
    let a = seq(&[4, 5, 6]);
    let v = a.section_spec("1:3:2, :, 5").unwrap();
    assert_eq!(v.shape(), &[2, 5]);
    let expected: Vec<f64> = [1, 3]
        .iter()
        .cartesian_product(0..5)
        .map(|(&i, j)| (i * 30 + j * 6 + 5) as f64)
        .collect();
    assert_eq!(v.to_vec(), expected);

    let s: Section = "1:3:2,:,5".parse().unwrap();
    assert_eq!(a.section_of(&s).unwrap(), v);
    assert!(a.section_spec("0:4,:,:").is_err());
    assert!(a.section_spec("x").is_err());
}

#[test]
fn transpose_permute_flip() {
    let a = seq(&[2, 3, 4]);
    let t = a.transpose(0, 2).unwrap();
    assert_eq!(t.shape(), &[4, 3, 2]);
    let p = a.permute(&[2, 1, 0]).unwrap();
    assert_eq!(t, p);
    for (i, j, k) in iproduct(2, 3, 4) {
        assert_eq!(t.get(&[k, j, i]).unwrap(), a.get(&[i, j, k]).unwrap());
    }

    let f = a.flip(1).unwrap();
    assert!(f.is_view());
    assert_eq!(f.get(&[0, 0, 0]).unwrap(), a.get(&[0, 2, 0]).unwrap());
    let ff = f.flip(1).unwrap();
    assert!(!ff.is_view());
    assert_eq!(ff.index(), a.index());
    assert_eq!(a.flip(3).unwrap_err().kind(), ErrorKind::InvalidRange);
}

fn iproduct(a: usize, b: usize, c: usize) -> impl Iterator<Item = (usize, usize, usize)> {
    (0..a)
        .cartesian_product(0..b)
        .cartesian_product(0..c)
        .map(|((i, j), k)| (i, j, k))
}

#[test]
fn copy_if_view_returns_self_when_canonical() {
    let a = seq(&[2, 3]);
    match a.copy_if_view() {
        Cow::Borrowed(b) => assert!(std::ptr::eq(b, &a)),
        Cow::Owned(_) => panic!("fresh array was copied"),
    }

    let t = a.transpose(0, 1).unwrap();
    let c = t.copy_if_view().into_owned();
    assert!(!c.is_view());
    assert!(!c.shares_storage(&a));
    assert_eq!(c, t.copy());
    assert_eq!(c.to_vec(), vec![0.0, 3.0, 1.0, 4.0, 2.0, 5.0]);
}

#[test]
fn copy_is_detached() {
    let a = seq(&[2, 2]);
    let c = a.flip(0).unwrap().copy();
    c.set(&[0, 0], 7.0).unwrap();
    assert_eq!(a.get(&[1, 0]).unwrap(), 2.0);
    assert_eq!(c.strides(), &[2, 1]);
}

#[test]
fn reshape_with_and_without_copy() {
    let a = seq(&[2, 6]);
    let r = a.reshape_no_copy(&[3, 4]).unwrap();
    assert!(a.shares_storage(&r));
    assert_eq!(r.get(&[2, 1]).unwrap(), 9.0);

    let t = a.transpose(0, 1).unwrap();
    assert_eq!(t.reshape_no_copy(&[12]).unwrap_err().kind(), ErrorKind::IncompatibleLayout);
    let flat = t.reshape(&[12]).unwrap();
    assert!(!flat.shares_storage(&a));
    assert_eq!(flat.get(&[1]).unwrap(), 6.0);
    assert_eq!(a.reshape(&[5]).unwrap_err().kind(), ErrorKind::IncompatibleShapes);
}

#[test]
fn flat_storage_copies_only_views() {
    let a = seq(&[3, 2]);
    assert!(Storage::ptr_eq(&a.flat_storage(), a.storage()));
    let row = a.slice(0, 2).unwrap();
    let flat = row.flat_storage();
    assert_eq!(flat.to_vec(), vec![4.0, 5.0]);
    assert!(!Storage::ptr_eq(&flat, a.storage()));
    let ints = a.flat_storage_as::<i16>().unwrap();
    assert_eq!(ints.to_vec(), vec![0, 1, 2, 3, 4, 5]);
    assert!(a.flat_storage_as::<bool>().is_err());
}

#[test]
fn arraycopy_over_logical_positions() {
    let src = seq(&[2, 3]).transpose(0, 1).unwrap();
    let dst = Array::<f64>::zeros(&[6]).unwrap();
    Array::arraycopy(&src, 1, &dst, 2, 3).unwrap();
    assert_eq!(dst.to_vec(), vec![0.0, 0.0, 3.0, 1.0, 4.0, 0.0]);
    let e = Array::arraycopy(&src, 4, &dst, 0, 3).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::OutOfBounds);

    // overlapping copy inside one buffer
    let a = seq(&[5]);
    Array::arraycopy(&a, 0, &a, 1, 4).unwrap();
    assert_eq!(a.to_vec(), vec![0.0, 0.0, 1.0, 2.0, 3.0]);
}

#[test]
fn constant_arrays_write_everywhere() {
    let c = Array::constant(&[2, 2], 3i32).unwrap();
    assert!(c.is_constant());
    c.set(&[0, 1], 5).unwrap();
    assert_eq!(c.to_vec(), vec![5; 4]);
    let r = c.reshape_no_copy(&[4]).unwrap();
    assert!(r.is_constant());
    assert_eq!(c.section(&[Some(Range::new(1, 1).unwrap()), None]).unwrap().to_vec(), vec![5, 5]);
}

#[test]
fn by_counter_access() {
    let a = seq(&[3, 4]).flip(1).unwrap();
    assert_eq!(a.get_by_counter(0).unwrap(), 3.0);
    a.set_by_counter(5, -5.0).unwrap();
    assert_eq!(a.get(&[1, 1]).unwrap(), -5.0);
    assert!(a.get_by_counter(12).is_err());
}

#[test]
fn typed_accessors_convert() {
    let a = Array::from_vec(&[2], vec![65u8, 200]).unwrap();
    assert_eq!(a.get_char(&[0]).unwrap(), 'A');
    assert_eq!(a.get_i8(&[1]).unwrap(), -56);
    assert_eq!(a.get_as::<f32>(&[1]).unwrap(), 200.0);
    a.set_as(&[0], 'z').unwrap();
    assert_eq!(a.get(&[0]).unwrap(), b'z');
    assert!(a.set_bool(&[0], true).is_err());
}
