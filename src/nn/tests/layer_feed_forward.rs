use super::seeded_rng;
use crate::assert_err;
use crate::nn::{FeedForward, ForwardMode, ModelError, Module};
use crate::tensor::Tensor;

#[test]
fn test_feed_forward_keeps_shape() {
    let mut rng = seeded_rng(10);
    let ffn = FeedForward::new(8, 2, 0.0, "mlp", &mut rng).unwrap();

    for shape in [vec![8], vec![3, 8], vec![2, 5, 8]] {
        let x = Tensor::normal_with_rng(0.0, 1.0, &shape, &mut rng);
        let y = ffn.forward(&x, ForwardMode::Eval).unwrap();
        assert_eq!(y.shape(), x.shape());
        assert!(y.is_finite());
    }
}

#[test]
fn test_feed_forward_eval_is_deterministic() {
    let mut rng = seeded_rng(11);
    let ffn = FeedForward::new(8, 2, 0.5, "mlp", &mut rng).unwrap();
    let x = Tensor::normal_with_rng(0.0, 1.0, &[2, 5, 8], &mut rng);

    let y1 = ffn.forward(&x, ForwardMode::Eval).unwrap();
    let y2 = ffn.forward(&x, ForwardMode::Eval).unwrap();
    assert_eq!(y1, y2);
}

#[test]
fn test_feed_forward_train_with_dropout_is_stochastic() {
    let mut rng = seeded_rng(12);
    let ffn = FeedForward::new(16, 2, 0.5, "mlp", &mut rng).unwrap();
    let x = Tensor::normal_with_rng(0.0, 1.0, &[4, 10, 16], &mut rng);

    let y1 = ffn.forward(&x, ForwardMode::Train).unwrap();
    let y2 = ffn.forward(&x, ForwardMode::Train).unwrap();
    assert_eq!(y1.shape(), x.shape());
    // 640 个元素、p=0.5，两次掩码完全相同的概率可以忽略
    assert_ne!(y1, y2);
}

#[test]
fn test_feed_forward_zero_drop_rate_train_equals_eval() {
    let mut rng = seeded_rng(13);
    let ffn = FeedForward::new(8, 1, 0.0, "mlp", &mut rng).unwrap();
    let x = Tensor::normal_with_rng(0.0, 1.0, &[2, 3, 8], &mut rng);

    let y_train = ffn.forward(&x, ForwardMode::Train).unwrap();
    let y_eval = ffn.forward(&x, ForwardMode::Eval).unwrap();
    assert_eq!(y_train, y_eval);
}

#[test]
fn test_feed_forward_residual_with_zeroed_projection() {
    let mut rng = seeded_rng(14);
    let mut ffn = FeedForward::new(4, 2, 0.0, "mlp", &mut rng).unwrap();
    // 第二个全连接层的参数全部置零后，块退化为恒等映射（只剩残差）
    for (name, param) in ffn.named_parameters_mut() {
        if name.starts_with("mlp_dense2") {
            param.data_mut().fill(0.0);
        }
    }
    let x = Tensor::new(&[1.0, -2.0, 3.0, 0.5], &[1, 4]);
    assert_eq!(ffn.forward(&x, ForwardMode::Eval).unwrap(), x);
}

#[test]
fn test_feed_forward_parameters() {
    let mut rng = seeded_rng(15);
    let ffn = FeedForward::new(8, 3, 0.0, "mlp", &mut rng).unwrap();
    // LayerNorm(2) + dense1(2) + dense2(2)
    assert_eq!(ffn.num_params(), 6);
    assert_eq!(ffn.num_elements(), 2 * 8 + (8 * 24 + 24) + (24 * 8 + 8));
}

#[test]
fn test_feed_forward_shape_mismatch() {
    let mut rng = seeded_rng(16);
    let ffn = FeedForward::new(8, 1, 0.0, "mlp", &mut rng).unwrap();
    let x = Tensor::ones(&[2, 5, 7]);
    assert_err!(
        ffn.forward(&x, ForwardMode::Eval),
        ModelError::ShapeMismatch { expected, got, .. } if expected == &[2, 5, 8] && got == &[2, 5, 7]
    );
}

#[test]
fn test_feed_forward_invalid_config() {
    let mut rng = seeded_rng(17);
    assert_err!(
        FeedForward::new(0, 1, 0.0, "mlp", &mut rng),
        ModelError::InvalidConfig(_)
    );
    assert_err!(
        FeedForward::new(8, 1, 1.5, "mlp", &mut rng),
        ModelError::InvalidConfig(_)
    );
}
