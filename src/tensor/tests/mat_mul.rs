use crate::errors::{Operator, TensorError};
use crate::tensor::Tensor;

#[test]
fn test_mat_mul_matrix_matrix() {
    let a = Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2]);
    let b = Tensor::new(&[5.0, 6.0, 7.0, 8.0, 9.0, 10.0], &[2, 3]);
    let result = a.mat_mul(&b).unwrap();
    let expected = Tensor::new(&[21.0, 24.0, 27.0, 47.0, 54.0, 61.0], &[2, 3]);
    assert_eq!(result, expected);
    // 构造2个，使得结果正好等于第2个张量
    let result = Tensor::eyes(2).mat_mul(&b).unwrap();
    assert_eq!(result, b);
}

#[test]
fn test_mat_mul_error_on_invalid_shape() {
    let a = Tensor::new(&[1.0, 2.0, 3.0], &[1, 3]);
    let b = Tensor::new(&[4.0, 5.0], &[2, 1]);
    assert_eq!(
        a.mat_mul(&b),
        Err(TensorError::OperatorError {
            operator: Operator::MatMul,
            tensor1_shape: vec![1, 3],
            tensor2_shape: vec![2, 1],
        })
    );

    let c = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0], &[2, 2, 2]);
    assert_eq!(
        c.mat_mul(&b),
        Err(TensorError::RankMismatch {
            operator: Operator::MatMul,
            expected: 2,
            got: 3,
        })
    );
}

#[test]
fn test_mat_mul_last_keeps_leading_dims() {
    // [2, 2, 3] @ [3, 2] -> [2, 2, 2]
    let x = Tensor::new(
        &[1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 1.0, 1.0, 1.0],
        &[2, 2, 3],
    );
    let w = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[3, 2]);
    let result = x.mat_mul_last(&w).unwrap();
    assert_eq!(result.shape(), &[2, 2, 2]);
    assert_eq!(
        result.to_vec(),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 9.0, 12.0]
    );

    let bad = Tensor::new(&[1.0, 2.0, 3.0, 4.0], &[2, 2]);
    assert!(bad.mat_mul_last(&w).is_err());
}

#[test]
fn test_batch_mat_mul() {
    // 第1个批元素左乘单位阵，第2个批元素左乘交换阵
    let lhs = Tensor::new(&[1.0, 0.0, 0.0, 1.0, 0.0, 1.0, 1.0, 0.0], &[2, 2, 2]);
    let rhs = Tensor::new(
        &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0, 12.0],
        &[2, 2, 3],
    );
    let result = lhs.batch_mat_mul(&rhs).unwrap();
    assert_eq!(result.shape(), &[2, 2, 3]);
    assert_eq!(
        result.to_vec(),
        vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 10.0, 11.0, 12.0, 7.0, 8.0, 9.0]
    );
}

#[test]
fn test_batch_mat_mul_error_on_mismatched_batch() {
    let lhs = Tensor::zeros(&[2, 3, 3]);
    let rhs = Tensor::zeros(&[3, 3, 4]);
    assert!(matches!(
        lhs.batch_mat_mul(&rhs),
        Err(TensorError::OperatorError {
            operator: Operator::BatchMatMul,
            ..
        })
    ));
    let rhs = Tensor::zeros(&[2, 4, 4]);
    assert!(lhs.batch_mat_mul(&rhs).is_err());
}
