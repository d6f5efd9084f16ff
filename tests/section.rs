use ncarray::{ErrorKind, Range, Section};

use itertools::Itertools;

fn sec(spec: &str) -> Section {
    spec.parse().unwrap()
}

#[test]
fn construct_from_origin_and_shape() {
    let s = Section::new(&[1, 0, 2], &[2, 3, 1]).unwrap();
    assert_eq!(s.to_string(), "1:2,0:2,2:2");
    assert_eq!(s.origin().unwrap(), vec![1, 0, 2]);
    assert_eq!(s.shape().unwrap(), vec![2, 3, 1]);
    assert_eq!(s.compute_size(), 6);

    let s = Section::with_strides(&[0, 1], &[3, 2], &[2, 4]).unwrap();
    assert_eq!(s.to_string(), "0:4:2,1:5:4");
    assert!(s.is_strided());
    assert_eq!(s.strides().unwrap(), vec![2, 4]);

    let s = Section::new(&[3], &[0]).unwrap();
    assert!(s.range(0).unwrap().is_empty());
    assert_eq!(s.compute_size(), 0);

    assert_eq!(Section::new(&[0], &[1, 2]).unwrap_err().kind(), ErrorKind::InvalidRange);
}

#[test]
fn defaults_fill_unresolved_axes() {
    let s = sec(":,2,:");
    assert!(s.origin().is_err());
    let full = s.with_defaults(&[4, 5, 6]).unwrap();
    assert_eq!(full.to_string(), "0:3,2:2,0:5");
    assert!(s.range(0).is_none());

    let mut s = s;
    s.set_defaults(&[4, 5, 6]).unwrap();
    assert_eq!(s, full);
    assert_eq!(s.set_defaults(&[4, 5]).unwrap_err().kind(), ErrorKind::InvalidRange);
}

#[test]
fn check_in_range_reports() {
    let s = sec("0:3,5");
    assert_eq!(s.check_in_range(&[4, 6]), None);
    let msg = s.check_in_range(&[4, 5]).unwrap();
    assert!(msg.contains("dimension 1"), "{}", msg);
    assert!(s.check_in_range(&[4]).is_some());
    assert!(Section::from_shape(&[4, 6]).equivalent(&[4, 6]));
    assert!(!s.equivalent(&[4, 6]));
    assert!(sec(":,:").equivalent(&[4, 6]));
}

#[test]
fn compose_sections() {
    let base = sec("10:20,0:9:3");
    let want = sec("2:4,:");
    let c = base.compose(&want).unwrap();
    assert_eq!(c.to_string(), "12:14,0:9:3");
    let want = sec("1:1,1:2");
    assert_eq!(base.compose(&want).unwrap().to_string(), "11:11,3:6:3");
    assert_eq!(base.compose(&sec("1")).unwrap_err().kind(), ErrorKind::InvalidRange);
}

#[test]
fn set_operations() {
    let a = sec("0:9,0:9");
    let b = sec("5:14,:");
    assert_eq!(a.intersect(&b).unwrap().to_string(), "5:9,0:9");
    assert!(a.intersects(&b).unwrap());
    assert!(!a.intersects(&sec("10:12,0:9")).unwrap());
    assert_eq!(a.union(&sec("12:14,3:4")).unwrap().to_string(), "0:14,0:9");
    assert_eq!(a.union(&b).unwrap().to_string(), "0:14,:");

    assert!(a.contains(&sec("2:3,9")).unwrap());
    assert!(!a.contains(&sec("2:10,9")).unwrap());
    assert!(b.contains(&sec("5,3")).unwrap());
    assert!(a.contains_point(&[9, 0]));
    assert!(!a.contains_point(&[10, 0]));
    assert!(!a.contains_point(&[1]));
    assert_eq!(a.intersect(&sec("1")).unwrap_err().kind(), ErrorKind::InvalidRange);
}

#[test]
fn shift_and_offset() {
    let s = sec("3:7,2:8:2");
    assert_eq!(s.shift_origin(&[3, 2]).unwrap().to_string(), "0:4,0:6:2");
    assert!(s.shift_origin(&[4, 0]).is_err());

    // row 1 of the section, column 2 of the section
    let inner = sec("4:5,6:8:2");
    assert_eq!(s.offset(&inner).unwrap(), 4 + 2);
    assert!(s.offset(&sec("4:5,5")).is_err());
}

#[test]
fn reduce_compact_and_vlen() {
    let s = sec("0:3,2,:,*");
    assert_eq!(s.reduce().to_string(), "0:3,:,*");
    assert!(s.is_variable_length());
    assert_eq!(s.remove_vlen().to_string(), "0:3,2:2,:");
    assert_eq!(s.compute_size(), 4);

    let s = sec("2:10:2,3:9:3");
    assert_eq!(s.compact().unwrap().to_string(), "1:5,1:3");
}

#[test]
fn edits_and_freeze() {
    let mut s = Section::default();
    s.append_range(Some(Range::new(0, 1).unwrap()))
        .unwrap()
        .append_range(None)
        .unwrap();
    s.insert_range(0, Some(Range::named("time", 5, 5, 1).unwrap()))
        .unwrap();
    assert_eq!(s.to_string(), "5:5,0:1,:");
    assert_eq!(s.find("time").unwrap().first(), 5);
    assert!(s.find("depth").is_none());
    assert_eq!(s.remove_range(1).unwrap(), Some(Range::new(0, 1).unwrap()));
    s.set_range(1, Some(Range::new(2, 3).unwrap())).unwrap();
    assert_eq!(s.to_string(), "5:5,2:3");
    assert_eq!(s.set_range(2, None).unwrap_err().kind(), ErrorKind::InvalidRange);

    s.make_immutable();
    assert!(s.is_immutable());
    assert_eq!(s.remove_range(0).unwrap_err().kind(), ErrorKind::Immutable);
    assert_eq!(s.insert_range(0, None).unwrap_err().kind(), ErrorKind::Immutable);
    assert_eq!(s.set_defaults(&[9, 9]).unwrap_err().kind(), ErrorKind::Immutable);
    // non-mutating operations still work
    assert_eq!(s.reduce().rank(), 1);
}

#[test]
fn iterate_points_in_full_shape() {
    let shape = [3, 4, 5];
    let s = sec("1:2,0:3:3,:");
    let offsets: Vec<usize> = s.iter(&shape).unwrap().collect();

    let expected: Vec<usize> = [vec![1, 2], vec![0, 3], (0..5).collect()]
        .into_iter()
        .multi_cartesian_product()
        .map(|c| c[0] * 20 + c[1] * 5 + c[2])
        .collect();
    assert_eq!(offsets, expected);

    let mut it = s.iter(&shape).unwrap();
    assert_eq!(it.len(), 20);
    it.nth(5);
    assert_eq!(it.counter(), vec![1, 3, 1]);

    assert!(sec("0:3,:,:").iter(&shape).is_err());
    assert_eq!(sec("*,:,:").iter(&shape).unwrap_err().kind(), ErrorKind::Unsupported);
}

#[test]
fn empty_axes_survive_text() {
    let s = Section::new(&[3, 0], &[0, 2]).unwrap();
    assert_eq!(s.to_string(), "EMPTY,0:1");
    let back: Section = s.to_string().parse().unwrap();
    assert_eq!(back, s);
    assert_eq!(back.compute_size(), 0);
}

#[test]
fn huge_sections_do_not_overflow() {
    let big = Section::from_shape(&[1 << 40, 1 << 40]);
    assert_eq!(big.compute_size(), usize::MAX);

    let cube = Section::from_shape(&[1 << 40, 1 << 40, 1 << 40]);
    let corner = Section::new(&[1, 0, 0], &[1, 1, 1]).unwrap();
    assert_eq!(cube.offset(&corner).unwrap_err().kind(), ErrorKind::InvalidRange);

    assert!(Section::new(&[usize::MAX], &[2]).is_err());
    assert!(Section::with_strides(&[0], &[3], &[usize::MAX]).is_err());

    let shape = [1 << 40, 1 << 40, 1 << 40];
    assert_eq!(sec(":,:,:").iter(&shape).unwrap_err().kind(), ErrorKind::InvalidRange);
}

#[test]
fn text_round_trip() {
    for spec in ["0:4:2,:,7:7", "*,1:2", ":"] {
        let s: Section = spec.parse().unwrap();
        assert_eq!(s.to_string(), spec);
    }
    assert!("EMPTY,".parse::<Section>().is_err());
    let s: Section = "( 1 , : )".parse().unwrap();
    assert_eq!(s.to_string(), "1:1,:");
}
