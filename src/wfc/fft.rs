//! # 三维傅里叶变换
//!
//! 窄接口 [`SpectralTransform`]，默认由 `rustfft` 实现。数组按 C 顺序存储，
//! 形状为 `[n0, n1, n2]`，最后一个轴连续。
//!
//! 约定（与 numpy 相同）：正变换不归一化，逆变换除以网格总点数。
//!
//! ## 依赖关系
//! - 被 `wfc/realspace.rs` 使用
//! - 使用 `rustfft`, `num-complex`

use num_complex::Complex64;
use rustfft::{FftDirection, FftPlanner};

/// 三维 FFT 接口
pub trait SpectralTransform {
    /// 复数到复数正变换，原地
    fn forward_c2c(&mut self, data: &mut [Complex64], shape: [usize; 3]);

    /// 复数到复数逆变换，原地，结果除以 n0*n1*n2
    fn inverse_c2c(&mut self, data: &mut [Complex64], shape: [usize; 3]);

    /// 半谱复数到实数逆变换
    ///
    /// `half` 的形状为 `[n0, n1, n2/2 + 1]`，缺失的一半由 Hermitian 对称补全；
    /// 返回形状为 `shape` 的实数数组。
    fn inverse_c2r_half(&mut self, half: Vec<Complex64>, shape: [usize; 3]) -> Vec<f64>;
}

/// 基于 rustfft 的实现，缓存已规划的一维变换
pub struct RustFftTransform {
    planner: FftPlanner<f64>,
}

impl RustFftTransform {
    pub fn new() -> Self {
        RustFftTransform {
            planner: FftPlanner::new(),
        }
    }

    /// 沿一个轴对所有一维线做变换
    fn transform_axis(
        &mut self,
        data: &mut [Complex64],
        shape: [usize; 3],
        axis: usize,
        direction: FftDirection,
    ) {
        let n = shape[axis];
        if n <= 1 {
            return;
        }

        let strides = [shape[1] * shape[2], shape[2], 1];
        let (a1, a2) = match axis {
            0 => (1, 2),
            1 => (0, 2),
            _ => (0, 1),
        };

        let fft = self.planner.plan_fft(n, direction);
        let mut line = vec![Complex64::default(); n];
        let mut scratch = vec![Complex64::default(); fft.get_inplace_scratch_len()];

        for p in 0..shape[a1] {
            for q in 0..shape[a2] {
                let base = p * strides[a1] + q * strides[a2];
                for (t, v) in line.iter_mut().enumerate() {
                    *v = data[base + t * strides[axis]];
                }
                fft.process_with_scratch(&mut line, &mut scratch);
                for (t, v) in line.iter().enumerate() {
                    data[base + t * strides[axis]] = *v;
                }
            }
        }
    }
}

impl Default for RustFftTransform {
    fn default() -> Self {
        Self::new()
    }
}

impl SpectralTransform for RustFftTransform {
    fn forward_c2c(&mut self, data: &mut [Complex64], shape: [usize; 3]) {
        for axis in 0..3 {
            self.transform_axis(data, shape, axis, FftDirection::Forward);
        }
    }

    fn inverse_c2c(&mut self, data: &mut [Complex64], shape: [usize; 3]) {
        for axis in 0..3 {
            self.transform_axis(data, shape, axis, FftDirection::Inverse);
        }
        let scale = 1.0 / shape.iter().product::<usize>() as f64;
        for v in data.iter_mut() {
            *v *= scale;
        }
    }

    fn inverse_c2r_half(&mut self, mut half: Vec<Complex64>, shape: [usize; 3]) -> Vec<f64> {
        let [n0, n1, n2] = shape;
        let nh = n2 / 2 + 1;
        let half_shape = [n0, n1, nh];
        debug_assert_eq!(half.len(), n0 * n1 * nh);

        // 先对前两个轴做 c2c 逆变换，每条 z 线仍满足一维 Hermitian 对称
        self.transform_axis(&mut half, half_shape, 0, FftDirection::Inverse);
        self.transform_axis(&mut half, half_shape, 1, FftDirection::Inverse);

        let fft = self.planner.plan_fft(n2, FftDirection::Inverse);
        let mut line = vec![Complex64::default(); n2];
        let mut scratch = vec![Complex64::default(); fft.get_inplace_scratch_len()];
        let scale = 1.0 / (n0 * n1 * n2) as f64;
        let mut out = vec![0.0; n0 * n1 * n2];

        for p in 0..n0 * n1 {
            let src = &half[p * nh..(p + 1) * nh];
            line[..nh].copy_from_slice(src);
            for k in nh..n2 {
                line[k] = src[n2 - k].conj();
            }
            fft.process_with_scratch(&mut line, &mut scratch);
            for (o, v) in out[p * n2..(p + 1) * n2].iter_mut().zip(line.iter()) {
                *o = v.re * scale;
            }
        }

        out
    }
}
