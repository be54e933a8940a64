/*
 * @Description  : Lru (线性循环单元) 层，对角复数线性递推
 *
 * 公式（⊙ 为逐元素乘，递推沿序列轴逐步进行）:
 *   λ   = exp(-exp(ν_log) + i·exp(θ_log))        # 对角特征值，|λ| ∈ [r_min, r_max]
 *   γ   = exp(γ_log)                              # 输入归一化系数，初始为 √(1 - |λ|²)
 *   h_t = λ ⊙ h_{t-1} + γ ⊙ (u_t @ B)             # h_{-1} = 0，B 为复矩阵 [H, N]
 *   y_t = Re(h_t @ C) + D ⊙ u_t                    # C 为复矩阵 [N, H]，D 为实向量 [H]
 *
 * 输入: [batch, seq_len, H]，输出: [batch, seq_len, H]
 */

use ndarray::{Array1, Array3, Ix3};
use rand::Rng;

use super::expect_last_dim;
use crate::nn::config::validate_recurrence_bounds;
use crate::nn::{ForwardMode, Init, ModelError, Module};
use crate::tensor::Tensor;

/// 序列变换：把`[batch, seq_len, features]`映射为`[batch, seq_len, output_dim]`。
///
/// Gred 层只通过这个 trait 使用循环单元，因此可以替换为其他实现而不改动 Gred。
pub trait SequenceTransform {
    fn transform(&self, x: &Tensor, mode: ForwardMode) -> Result<Tensor, ModelError>;

    /// 输出的最后一维宽度
    fn output_dim(&self) -> usize;
}

/// Lru (线性循环单元) 层
///
/// # 输入/输出形状
/// - 输入：[`batch_size`, `seq_len`, `model_dim`]
/// - 输出：[`batch_size`, `seq_len`, `model_dim`]
#[derive(Debug, Clone)]
pub struct Lru {
    // === 特征值参数 ===
    nu_log: Tensor,    // [state_dim]
    theta_log: Tensor, // [state_dim]
    gamma_log: Tensor, // [state_dim]
    // === 输入/输出投影（复数拆成实部与虚部） ===
    b_re: Tensor, // [model_dim, state_dim]
    b_im: Tensor, // [model_dim, state_dim]
    c_re: Tensor, // [state_dim, model_dim]
    c_im: Tensor, // [state_dim, model_dim]
    d: Tensor,    // [model_dim]
    // === 配置 ===
    state_dim: usize,
    model_dim: usize,
    name: String,
}

impl Lru {
    /// 创建新的 Lru 层
    ///
    /// # 参数
    /// - `state_dim`: 递推状态宽度 N
    /// - `model_dim`: 输入/输出宽度 H
    /// - `r_min`/`r_max`: 特征值模长的采样区间，须满足 0 ≤ r_min < r_max ≤ 1
    /// - `max_phase`: 特征值相位的采样上界，须为正
    /// - `name`: 层名称前缀
    pub fn new<R: Rng + ?Sized>(
        state_dim: usize,
        model_dim: usize,
        r_min: f32,
        r_max: f32,
        max_phase: f32,
        name: &str,
        rng: &mut R,
    ) -> Result<Self, ModelError> {
        if state_dim == 0 || model_dim == 0 {
            return Err(ModelError::InvalidConfig(format!(
                "Lru 的 state_dim、model_dim 均须≥1，实际为 {state_dim}、{model_dim}"
            )));
        }
        validate_recurrence_bounds(r_min, r_max, max_phase)?;

        // 在环形区域 r_min ≤ |λ| ≤ r_max、0 ≤ arg λ ≤ max_phase 上均匀采样特征值
        let mut nu_log = Vec::with_capacity(state_dim);
        let mut theta_log = Vec::with_capacity(state_dim);
        let mut gamma_log = Vec::with_capacity(state_dim);
        for _ in 0..state_dim {
            let u1 = open_unit(rng);
            let u2 = open_unit(rng);
            let nu = -0.5 * (u1 * (r_max * r_max - r_min * r_min) + r_min * r_min).ln();
            let modulus = (-nu).exp();
            nu_log.push(nu.ln());
            theta_log.push((max_phase * u2).ln());
            gamma_log.push((1.0 - modulus * modulus).sqrt().ln());
        }

        let b_init = Init::Normal {
            mean: 0.0,
            std: 1.0 / (2.0 * model_dim as f32).sqrt(),
        };
        let c_init = Init::Normal {
            mean: 0.0,
            std: 1.0 / (state_dim as f32).sqrt(),
        };
        let d_init = Init::Normal {
            mean: 0.0,
            std: 1.0,
        };

        Ok(Self {
            nu_log: Tensor::new(&nu_log, &[state_dim]),
            theta_log: Tensor::new(&theta_log, &[state_dim]),
            gamma_log: Tensor::new(&gamma_log, &[state_dim]),
            b_re: b_init.generate_with_rng(&[model_dim, state_dim], rng),
            b_im: b_init.generate_with_rng(&[model_dim, state_dim], rng),
            c_re: c_init.generate_with_rng(&[state_dim, model_dim], rng),
            c_im: c_init.generate_with_rng(&[state_dim, model_dim], rng),
            d: d_init.generate_with_rng(&[model_dim], rng),
            state_dim,
            model_dim,
            name: name.to_string(),
        })
    }

    pub const fn state_dim(&self) -> usize {
        self.state_dim
    }

    pub const fn model_dim(&self) -> usize {
        self.model_dim
    }

    /// 各状态通道特征值的模长 |λ| = exp(-exp(ν_log))
    pub fn eigenvalue_moduli(&self) -> Vec<f32> {
        self.nu_log.to_vec().iter().map(|nu| (-nu.exp()).exp()).collect()
    }

    /// 各状态通道特征值的相位 arg λ = exp(θ_log)
    pub fn eigenvalue_phases(&self) -> Vec<f32> {
        self.theta_log.to_vec().iter().map(|theta| theta.exp()).collect()
    }

    /// 沿序列轴执行递推，返回所有时间步的复状态（实部, 虚部），形状均为 [batch, seq_len, state_dim]
    fn scan(&self, x: &Tensor) -> Result<(Array3<f32>, Array3<f32>), ModelError> {
        let bu_re = x.mat_mul_last(&self.b_re)?;
        let bu_im = x.mat_mul_last(&self.b_im)?;
        let bu_re = as_ix3(&bu_re)?;
        let bu_im = as_ix3(&bu_im)?;
        let (batch, seq_len, n) = bu_re.dim();

        let moduli = Array1::from(self.eigenvalue_moduli());
        let phases = Array1::from(self.eigenvalue_phases());
        let lambda_re = &moduli * &phases.mapv(f32::cos);
        let lambda_im = &moduli * &phases.mapv(f32::sin);
        let gamma = Array1::from(self.gamma_log.to_vec()).mapv(f32::exp);

        let mut h_re = Array3::<f32>::zeros((batch, seq_len, n));
        let mut h_im = Array3::<f32>::zeros((batch, seq_len, n));
        for b in 0..batch {
            for t in 0..seq_len {
                for k in 0..n {
                    let (prev_re, prev_im) = if t == 0 {
                        (0.0, 0.0)
                    } else {
                        (h_re[[b, t - 1, k]], h_im[[b, t - 1, k]])
                    };
                    h_re[[b, t, k]] = lambda_re[k] * prev_re - lambda_im[k] * prev_im
                        + gamma[k] * bu_re[[b, t, k]];
                    h_im[[b, t, k]] = lambda_re[k] * prev_im
                        + lambda_im[k] * prev_re
                        + gamma[k] * bu_im[[b, t, k]];
                }
            }
        }
        Ok((h_re, h_im))
    }
}

impl SequenceTransform for Lru {
    /// 前向传播
    ///
    /// # 参数
    /// - `x`: 输入张量，形状 [`batch_size`, `seq_len`, `model_dim`]
    /// - `mode`: 本层没有随机行为，两种模式结果相同
    fn transform(&self, x: &Tensor, _mode: ForwardMode) -> Result<Tensor, ModelError> {
        if x.dimension() != 3 {
            return Err(ModelError::DimensionMismatch {
                expected: 3,
                got: x.dimension(),
                message: format!("{}需要 3D 输入 [batch, seq_len, model_dim]", self.name),
            });
        }
        expect_last_dim(x, self.model_dim, &self.name)?;

        let (h_re, h_im) = self.scan(x)?;
        let h_re = Tensor::from_array(h_re.into_dyn());
        let h_im = Tensor::from_array(h_im.into_dyn());

        // Re((h_re + i·h_im) @ (C_re + i·C_im)) = h_re @ C_re - h_im @ C_im
        let y = h_re
            .mat_mul_last(&self.c_re)?
            .try_add(&(-1.0 * &h_im.mat_mul_last(&self.c_im)?))?;
        let skip = x.try_mul(&self.d)?;
        Ok(y.try_add(&skip)?)
    }

    fn output_dim(&self) -> usize {
        self.model_dim
    }
}

impl Module for Lru {
    fn named_parameters(&self) -> Vec<(String, &Tensor)> {
        vec![
            (format!("{}_nu_log", self.name), &self.nu_log),
            (format!("{}_theta_log", self.name), &self.theta_log),
            (format!("{}_gamma_log", self.name), &self.gamma_log),
            (format!("{}_B_re", self.name), &self.b_re),
            (format!("{}_B_im", self.name), &self.b_im),
            (format!("{}_C_re", self.name), &self.c_re),
            (format!("{}_C_im", self.name), &self.c_im),
            (format!("{}_D", self.name), &self.d),
        ]
    }

    fn named_parameters_mut(&mut self) -> Vec<(String, &mut Tensor)> {
        vec![
            (format!("{}_nu_log", self.name), &mut self.nu_log),
            (format!("{}_theta_log", self.name), &mut self.theta_log),
            (format!("{}_gamma_log", self.name), &mut self.gamma_log),
            (format!("{}_B_re", self.name), &mut self.b_re),
            (format!("{}_B_im", self.name), &mut self.b_im),
            (format!("{}_C_re", self.name), &mut self.c_re),
            (format!("{}_C_im", self.name), &mut self.c_im),
            (format!("{}_D", self.name), &mut self.d),
        ]
    }
}

/// 在开区间 (0, 1) 上均匀采样，避免取对数时出现 ±Inf
fn open_unit<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    loop {
        let u: f32 = rng.r#gen();
        if u > 0.0 {
            return u;
        }
    }
}

fn as_ix3(x: &Tensor) -> Result<ndarray::ArrayView3<'_, f32>, ModelError> {
    x.data()
        .view()
        .into_dimensionality::<Ix3>()
        .map_err(|_| ModelError::DimensionMismatch {
            expected: 3,
            got: x.dimension(),
            message: "Lru 内部投影结果须为 3D".to_string(),
        })
}
