use crate::assert_panic;
use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

#[test]
fn test_add_with_broadcast() {
    let a = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    let b = Tensor::new(&[10.0, 20.0, 30.0], &[3]);
    let result = a.try_add(&b).unwrap();
    assert_eq!(
        result,
        Tensor::new(&[11.0, 22.0, 33.0, 14.0, 25.0, 36.0], &[2, 3])
    );
    assert_eq!(&a + &b, result);
    assert_eq!(&a + 1.0, Tensor::new(&[2.0, 3.0, 4.0, 5.0, 6.0, 7.0], &[2, 3]));
}

#[test]
fn test_add_with_incompatible_shape() {
    let a = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    let b = Tensor::new(&[1.0, 2.0], &[2]);
    assert_eq!(
        a.try_add(&b),
        Err(TensorError::OperatorError {
            operator: Operator::Add,
            tensor1_shape: vec![2, 3],
            tensor2_shape: vec![2],
        })
    );
    assert_panic!(
        &a + &b,
        "形状不一致，故无法相加：第一个张量的形状为[2, 3]，第二个张量的形状为[2]"
    );
}

#[test]
fn test_div_follows_ieee_semantics() {
    let a = Tensor::new(&[2.0, 0.0], &[2, 1]);
    let b = Tensor::new(&[2.0, 0.0], &[2, 1]);
    let result = a.try_div(&b).unwrap().to_vec();
    assert_eq!(result[0], 1.0);
    assert!(result[1].is_nan());

    let inf = Tensor::new(&[1.0], &[1]).try_div(&Tensor::zeros(&[1])).unwrap();
    assert!(!inf.is_finite());
}

#[test]
fn test_mul_scalar() {
    let a = Tensor::new(&[1.0, -2.0], &[2]);
    assert_eq!(&a * 3.0, Tensor::new(&[3.0, -6.0], &[2]));
    assert_eq!(0.5 * &a, Tensor::new(&[0.5, -1.0], &[2]));
}
