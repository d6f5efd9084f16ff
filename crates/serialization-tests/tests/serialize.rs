use ncarray::{Array, DataType, DynArray, Index, Range, Section};

#[test]
fn serial_many_dim_serde() {
    {
        let a = Array::scalar(2.72f32);
        let serial = serde_json::to_string(&a).unwrap();
        println!("Serde encode {:?} => {:?}", a, serial);
        let res = serde_json::from_str::<Array<f32>>(&serial);
        println!("{:?}", res);
        assert_eq!(a, res.unwrap());
    }

    {
        let a = Array::from_vec(&[2, 3], vec![3., 1., 2.2, 3.1, 4., 7.]).unwrap();
        let serial = serde_json::to_string(&a).unwrap();
        println!("Serde encode {:?} => {:?}", a, serial);
        let res = serde_json::from_str::<Array<f32>>(&serial);
        println!("{:?}", res);
        assert_eq!(a, res.unwrap());
        let text = r##"{"v":1,"dtype":"Float","shape":[2,3],"data":[3,1,2.2,3.1,4,7]}"##;
        let b = serde_json::from_str::<Array<f32>>(text);
        assert_eq!(a, b.unwrap());
    }

    {
        // Test a flipped and strided section.
        let a = Array::from_vec(&[2, 2, 2, 4], (0..32).map(|x| x as f32).collect()).unwrap();
        let v = a
            .flip(0)
            .unwrap()
            .section(&[None, None, None, Some(Range::with_stride(0, 3, 2).unwrap())])
            .unwrap();
        let serial = serde_json::to_string(&v).unwrap();
        println!("Encode {:?} => {:?}", v, serial);
        let res = serde_json::from_str::<Array<f32>>(&serial).unwrap();
        assert_eq!(v, res);
        assert!(!res.is_view());
    }
}

#[test]
fn serial_wrong_count_serde() {
    // one element too few
    let text = r##"{"v":1,"dtype":"Float","shape":[2,3],"data":[3,1,2.2,3.1,4]}"##;
    let arr = serde_json::from_str::<Array<f32>>(text);
    println!("{:?}", arr);
    assert!(arr.is_err());

    // future version
    let text = r##"{"v":200,"dtype":"Float","shape":[2,3],"data":[3,1,2.2,3.1,4,7]}"##;
    let arr = serde_json::from_str::<Array<f32>>(text);
    println!("{:?}", arr);
    assert!(arr.is_err());

    // wrong element type
    let text = r##"{"v":1,"dtype":"Int","shape":[2],"data":[3,1]}"##;
    let arr = serde_json::from_str::<Array<f32>>(text);
    assert!(arr.is_err());
}

#[test]
fn serial_many_dim_ron() {
    let a = Array::from_vec(&[2, 1, 2], vec![1i16, -2, 3, -4]).unwrap();
    let serial = ron::ser::to_string(&a).unwrap();
    println!("RON encode {:?} => {:?}", a, serial);
    let res: Array<i16> = ron::de::from_str(&serial).unwrap();
    assert_eq!(a, res);

    let t = a.transpose(0, 2).unwrap();
    let serial = ron::ser::to_string(&t).unwrap();
    let res: Array<i16> = ron::de::from_str(&serial).unwrap();
    assert_eq!(res.to_vec(), vec![1, 3, -2, -4]);
}

#[test]
fn serial_model_types() {
    let s: Section = "0:4:2,:,7".parse().unwrap();
    let serial = serde_json::to_string(&s).unwrap();
    assert_eq!(serde_json::from_str::<Section>(&serial).unwrap(), s);

    let r = Range::named("time", 1, 9, 1).unwrap();
    let serial = serde_json::to_string(&r).unwrap();
    let back: Range = serde_json::from_str(&serial).unwrap();
    assert_eq!(back, r);
    assert_eq!(back.name(), Some("time"));

    let ix = Index::new(&[3, 4]).unwrap().flip(1).unwrap();
    let serial = ron::ser::to_string(&ix).unwrap();
    assert_eq!(ron::de::from_str::<Index>(&serial).unwrap(), ix);

    let serial = serde_json::to_string(&DataType::UShort).unwrap();
    assert_eq!(serde_json::from_str::<DataType>(&serial).unwrap(), DataType::UShort);
}

#[test]
fn serial_dyn_array() {
    let d = DynArray::factory(DataType::Long, &[2, 2]).unwrap();
    d.set_f64(&[1, 0], 9.0).unwrap();
    let serial = serde_json::to_string(&d).unwrap();
    println!("Serde encode {:?} => {:?}", d, serial);
    let back: DynArray = serde_json::from_str(&serial).unwrap();
    assert_eq!(back.data_type(), DataType::Long);
    assert_eq!(back, d);
}
