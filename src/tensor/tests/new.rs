use crate::assert_panic;
use crate::tensor::Tensor;
use rand::SeedableRng;
use rand::rngs::StdRng;

#[test]
fn test_new() {
    let tensor = Tensor::new(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]);
    assert_eq!(tensor.shape(), &[2, 3]);
    assert_eq!(tensor.dimension(), 2);
    assert_eq!(tensor.size(), 6);
    assert_eq!(tensor.to_vec(), vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
}

#[test]
fn test_new_with_mismatched_data() {
    assert!(Tensor::try_new(&[1.0, 2.0, 3.0], &[2, 2]).is_err());
    assert_panic!(
        Tensor::new(&[1.0, 2.0, 3.0], &[2, 2]),
        "数据长度3与形状[2, 2]不匹配"
    );
}

#[test]
fn test_eyes() {
    let eye = Tensor::eyes(3);
    assert_eq!(eye.shape(), &[3, 3]);
    assert_eq!(eye.sum_all(), 3.0);
    assert_panic!(Tensor::eyes(0), "n须≥1");
}

#[test]
fn test_random_with_same_seed_is_reproducible() {
    let mut rng_1 = StdRng::seed_from_u64(42);
    let mut rng_2 = StdRng::seed_from_u64(42);
    let a = Tensor::normal_with_rng(0.0, 1.0, &[4, 5], &mut rng_1);
    let b = Tensor::normal_with_rng(0.0, 1.0, &[4, 5], &mut rng_2);
    assert_eq!(a, b);
    assert!(a.is_finite());

    let u = Tensor::uniform_with_rng(-0.5, 0.5, &[100], &mut rng_1);
    assert!(u.to_vec().iter().all(|&v| (-0.5..0.5).contains(&v)));
}

#[test]
fn test_normal_statistics() {
    let mut rng = StdRng::seed_from_u64(7);
    let t = Tensor::normal_with_rng(1.0, 2.0, &[20000], &mut rng);
    let mean = t.sum_all() / t.size() as f32;
    let var = t.to_vec().iter().map(|v| (v - mean).powi(2)).sum::<f32>() / t.size() as f32;
    assert!((mean - 1.0).abs() < 0.1, "均值偏差过大：{mean}");
    assert!((var.sqrt() - 2.0).abs() < 0.1, "标准差偏差过大：{}", var.sqrt());
}
