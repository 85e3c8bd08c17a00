//! # Gamma 点半谱约定
//!
//! gamma-only 的 WAVECAR 只保存半空间 ([`in_half_space`]) 的系数，且非零 G 的系数
//! 相对真实傅里叶分量放大了 √2。本模块负责在 c2r 逆变换前恢复完整的 Hermitian 半谱：
//!
//! 1. z = 0 平面上半空间以外的点取其点反演 (-h, -k, 0) 的共轭；
//! 2. 整体乘 1/√2，再把 DC 分量乘回 √2。
//!
//! ## 依赖关系
//! - 被 `wfc/realspace.rs` 使用
//! - 使用 `wfc/gvector.rs`

use crate::wfc::gvector::{fft_frequency, in_half_space, Miller};

use num_complex::Complex64;
use std::f64::consts::SQRT_2;

/// 半谱数组的形状 [n0, n1, n2/2 + 1]
pub fn half_shape(grid: [usize; 3]) -> [usize; 3] {
    [grid[0], grid[1], grid[2] / 2 + 1]
}

/// 补全 z = 0 平面并做 √2 缩放，`buf` 形状为 [`half_shape`]
pub fn symmetrize_half_spectrum(buf: &mut [Complex64], grid: [usize; 3]) {
    let [n0, n1, _] = grid;
    let nh = half_shape(grid)[2];
    let at = |i: usize, j: usize| (i * n1 + j) * nh;

    for i in 0..n0 {
        for j in 0..n1 {
            let fx = fft_frequency(i, n0);
            let fy = fft_frequency(j, n1);
            if in_half_space([fx, fy, 0]) {
                continue;
            }
            let mirror = at((n0 - i) % n0, (n1 - j) % n1);
            buf[at(i, j)] = buf[mirror].conj();
        }
    }

    for v in buf.iter_mut() {
        *v /= SQRT_2;
    }
    buf[0] *= SQRT_2;
}

/// 存储系数到傅里叶分量的比例: DC 为 1，其余为 1/√2
pub fn stored_to_fourier(g: Miller) -> f64 {
    if g == [0, 0, 0] {
        1.0
    } else {
        1.0 / SQRT_2
    }
}
