use approx::assert_abs_diff_eq;

use super::seeded_rng;
use crate::assert_err;
use crate::nn::{ForwardMode, Lru, ModelError, Module, SequenceTransform};
use crate::tensor::Tensor;

#[test]
fn test_lru_forward_shape() {
    let mut rng = seeded_rng(20);
    let lru = Lru::new(6, 4, 0.0, 1.0, 6.28, "lru", &mut rng).unwrap();
    assert_eq!(lru.state_dim(), 6);
    assert_eq!(lru.output_dim(), 4);

    let x = Tensor::normal_with_rng(0.0, 1.0, &[2, 7, 4], &mut rng);
    let y = lru.transform(&x, ForwardMode::Eval).unwrap();
    assert_eq!(y.shape(), &[2, 7, 4]);
    assert!(y.is_finite());
    // 本层没有随机行为
    assert_eq!(y, lru.transform(&x, ForwardMode::Train).unwrap());
}

#[test]
fn test_lru_eigenvalues_within_bounds() {
    let mut rng = seeded_rng(21);
    let (r_min, r_max, max_phase) = (0.4, 0.9, 3.14);
    let lru = Lru::new(64, 4, r_min, r_max, max_phase, "lru", &mut rng).unwrap();

    for modulus in lru.eigenvalue_moduli() {
        assert!(modulus >= r_min - 1e-5 && modulus <= r_max + 1e-5, "|λ|={modulus}");
    }
    for phase in lru.eigenvalue_phases() {
        assert!(phase > 0.0 && phase <= max_phase + 1e-4, "arg λ={phase}");
    }
}

#[test]
fn test_lru_is_causal() {
    let mut rng = seeded_rng(22);
    let lru = Lru::new(4, 3, 0.0, 1.0, 6.28, "lru", &mut rng).unwrap();

    let x1 = Tensor::normal_with_rng(0.0, 1.0, &[1, 5, 3], &mut rng);
    // 只改动最后一个时间步
    let mut x2 = x1.clone();
    x2.data_mut()[&[0, 4, 0][..]] += 10.0;

    let y1 = lru.transform(&x1, ForwardMode::Eval).unwrap().to_vec();
    let y2 = lru.transform(&x2, ForwardMode::Eval).unwrap().to_vec();
    // 前 4 个时间步的输出不受影响
    for i in 0..4 * 3 {
        assert_abs_diff_eq!(y1[i], y2[i], epsilon = 1e-6);
    }
    assert!((0..3).any(|j| (y1[12 + j] - y2[12 + j]).abs() > 1e-3));
}

#[test]
fn test_lru_first_step_matches_closed_form() {
    let mut rng = seeded_rng(23);
    let mut lru = Lru::new(2, 2, 0.0, 1.0, 6.28, "lru", &mut rng).unwrap();
    // 第一步 h_0 = γ ⊙ (u_0 B)，将 B、C 取实单位阵、D 取零，γ 取 1
    for (name, param) in lru.named_parameters_mut() {
        match name.as_str() {
            "lru_B_re" | "lru_C_re" => *param = Tensor::eyes(2),
            "lru_B_im" | "lru_C_im" => *param = Tensor::zeros(&[2, 2]),
            "lru_D" | "lru_gamma_log" => *param = Tensor::zeros(&[2]),
            _ => {}
        }
    }
    let x = Tensor::new(&[3.0, -1.0], &[1, 1, 2]);
    let y = lru.transform(&x, ForwardMode::Eval).unwrap();
    assert_eq!(y.to_vec(), vec![3.0, -1.0]);
}

#[test]
fn test_lru_parameters() {
    let mut rng = seeded_rng(24);
    let lru = Lru::new(5, 3, 0.0, 1.0, 6.28, "lru", &mut rng).unwrap();
    assert_eq!(lru.num_params(), 8);
    assert_eq!(lru.num_elements(), 3 * 5 + 4 * 3 * 5 + 3);
}

#[test]
fn test_lru_invalid_input() {
    let mut rng = seeded_rng(25);
    let lru = Lru::new(4, 3, 0.0, 1.0, 6.28, "lru", &mut rng).unwrap();
    assert_err!(
        lru.transform(&Tensor::ones(&[5, 3]), ForwardMode::Eval),
        ModelError::DimensionMismatch(3, 2)
    );
    assert_err!(
        lru.transform(&Tensor::ones(&[1, 5, 4]), ForwardMode::Eval),
        ModelError::ShapeMismatch { .. }
    );
}

#[test]
fn test_lru_invalid_bounds() {
    let mut rng = seeded_rng(26);
    assert_err!(
        Lru::new(4, 3, 0.9, 0.5, 6.28, "lru", &mut rng),
        ModelError::InvalidConfig(_)
    );
    assert_err!(
        Lru::new(4, 3, 0.0, 1.5, 6.28, "lru", &mut rng),
        ModelError::InvalidConfig(_)
    );
    assert_err!(
        Lru::new(4, 3, 0.0, 1.0, 0.0, "lru", &mut rng),
        ModelError::InvalidConfig(_)
    );
    assert_err!(
        Lru::new(0, 3, 0.0, 1.0, 6.28, "lru", &mut rng),
        ModelError::InvalidConfig(_)
    );
}
