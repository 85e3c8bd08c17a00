//! # 跃迁偶极矩
//!
//! 动量表象下两个 Bloch 态之间的跃迁偶极矩:
//!
//! ```text
//!                          i·ħ        ___
//! <psi_a| r |psi_b>  =  ---------  ·  ╲   C*_ai · C_bi · G_i
//!                        E_b - E_a    ╱
//!                                     ‾‾‾
//! ```
//!
//! 两个态须在同一个 k 点，共用一套 G 矢量。G = 0 不贡献偶极矩。
//!
//! ## 依赖关系
//! - 被 `parsers/wavecar.rs` 使用
//! - 使用 `constants.rs`, `models/state.rs`

use crate::constants::{AUTDEBYE, AUTOA, RYTOEV};
use crate::error::{Result, WavecarError};
use crate::models::TdmResult;

use num_complex::Complex64;

/// 由两组系数、笛卡尔 G 矢量和能量计算跃迁偶极矩
///
/// `energy_a`/`energy_b` 单位 eV，`gcart` 单位 Å⁻¹，结果单位 Debye。
pub fn transition_dipole(
    phi_a: &[Complex64],
    phi_b: &[Complex64],
    gcart: &[[f64; 3]],
    energy_a: f64,
    energy_b: f64,
    gamma_half: bool,
) -> Result<TdmResult> {
    if phi_a.len() != phi_b.len() || phi_a.len() != gcart.len() {
        return Err(WavecarError::InvalidArgument(format!(
            "coefficient lengths {} and {} do not match {} G-vectors",
            phi_a.len(),
            phi_b.len(),
            gcart.len()
        )));
    }

    let de = energy_b - energy_a;
    if de == 0.0 {
        return Err(WavecarError::DegenerateStates { energy: energy_a });
    }

    let mut overlap = Complex64::default();
    let mut forward = [Complex64::default(); 3];
    let mut backward = [Complex64::default(); 3];

    for ((a, b), g) in phi_a.iter().zip(phi_b).zip(gcart) {
        let t1 = a.conj() * b;
        overlap += t1;
        for d in 0..3 {
            forward[d] += t1 * g[d];
        }
        if gamma_half {
            let t2 = a * b.conj();
            for d in 0..3 {
                backward[d] += t2 * g[d];
            }
        }
    }

    let prefactor = Complex64::new(0.0, 1.0) / (de / (2.0 * RYTOEV)) * AUTOA * AUTDEBYE;
    let dipole = [0usize, 1, 2].map(|d| {
        let raw = if gamma_half {
            (forward[d] - backward[d]) / 2.0
        } else {
            forward[d]
        };
        prefactor * raw
    });

    Ok(TdmResult {
        energy_delta: de,
        overlap,
        dipole,
    })
}
