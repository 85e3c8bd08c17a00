//! # 实空间赝波函数重建
//!
//! 把一维平面波系数按 G 矢量放回三维倒空间网格，再逆傅里叶变换到实空间。
//!
//! - 普通 k 点：完整网格上做 c2c 逆变换；
//! - gamma 半谱：形状 [n0, n1, n2/2+1] 的半谱，经 [`gamma`] 模块补全后做 c2r 逆变换，
//!   得到的场虚部恒为零。
//!
//! [`project`] 是其逆过程，用于从实空间场取回系数。
//!
//! ## 依赖关系
//! - 被 `parsers/wavecar.rs` 使用
//! - 使用 `wfc/fft.rs`, `wfc/gamma.rs`, `wfc/gvector.rs`, `models/field.rs`

use crate::error::{Result, WavecarError};
use crate::models::RealSpaceField;
use crate::wfc::fft::SpectralTransform;
use crate::wfc::gamma::{half_shape, stored_to_fourier, symmetrize_half_spectrum};
use crate::wfc::gvector::{in_half_space, Miller};

use num_complex::Complex64;

/// 重建选项
#[derive(Debug, Clone, Copy, Default)]
pub struct ReconstructOptions {
    /// FFT 网格，缺省为文件头中的最小网格
    pub grid: Option<[usize; 3]>,
    /// 是否先把系数归一化
    pub normalize: bool,
    /// 是否为 gamma-only 半谱存储
    pub gamma_half: bool,
}

/// 确定 FFT 网格，且每个方向都不小于最小网格
pub fn resolve_grid(minimum: [usize; 3], requested: Option<[usize; 3]>) -> Result<[usize; 3]> {
    match requested {
        None => Ok(minimum),
        Some(grid) => {
            if grid.iter().zip(minimum.iter()).any(|(g, m)| g < m) {
                return Err(WavecarError::InsufficientGrid {
                    requested: grid,
                    minimum,
                });
            }
            Ok(grid)
        }
    }
}

/// 由系数和 G 矢量重建实空间场
pub fn reconstruct<T: SpectralTransform + ?Sized>(
    coeffs: &[Complex64],
    gvecs: &[Miller],
    grid: [usize; 3],
    gamma_half: bool,
    transform: &mut T,
) -> Result<RealSpaceField> {
    if coeffs.len() != gvecs.len() {
        return Err(WavecarError::InvalidArgument(format!(
            "{} coefficients for {} G-vectors",
            coeffs.len(),
            gvecs.len()
        )));
    }

    if gamma_half {
        if let Some(g) = gvecs.iter().find(|&&g| !in_half_space(g)) {
            return Err(WavecarError::InvalidArgument(format!(
                "G-vector {:?} lies outside the gamma half-space",
                g
            )));
        }

        let shape = half_shape(grid);
        let mut phi_k = vec![Complex64::default(); shape.iter().product()];
        for (g, c) in gvecs.iter().zip(coeffs) {
            phi_k[flat_index(wrap(*g, grid), shape)] = *c;
        }
        symmetrize_half_spectrum(&mut phi_k, grid);

        let real = transform.inverse_c2r_half(phi_k, grid);
        Ok(RealSpaceField::from_real(grid, real))
    } else {
        let mut phi_k = vec![Complex64::default(); grid.iter().product()];
        for (g, c) in gvecs.iter().zip(coeffs) {
            phi_k[flat_index(wrap(*g, grid), grid)] = *c;
        }
        transform.inverse_c2c(&mut phi_k, grid);
        Ok(RealSpaceField::new(grid, phi_k))
    }
}

/// 实空间场正变换后按 G 矢量取回平面波系数
///
/// gamma 半谱时撤销 √2 缩放，结果与文件中的存储约定一致。
pub fn project<T: SpectralTransform + ?Sized>(
    field: &RealSpaceField,
    gvecs: &[Miller],
    gamma_half: bool,
    transform: &mut T,
) -> Vec<Complex64> {
    let grid = field.shape();
    let mut spectrum = field.data().to_vec();
    transform.forward_c2c(&mut spectrum, grid);

    gvecs
        .iter()
        .map(|&g| {
            let c = spectrum[flat_index(wrap(g, grid), grid)];
            if gamma_half {
                c / stored_to_fourier(g)
            } else {
                c
            }
        })
        .collect()
}

/// G 矢量对网格取模，得到非负下标
fn wrap(g: Miller, grid: [usize; 3]) -> [usize; 3] {
    [
        g[0].rem_euclid(grid[0] as i32) as usize,
        g[1].rem_euclid(grid[1] as i32) as usize,
        g[2].rem_euclid(grid[2] as i32) as usize,
    ]
}

fn flat_index(idx: [usize; 3], shape: [usize; 3]) -> usize {
    (idx[0] * shape[1] + idx[1]) * shape[2] + idx[2]
}
