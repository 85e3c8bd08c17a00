//! # G 矢量生成
//!
//! 在最小 FFT 网格上枚举满足截断条件的倒格矢 (h, k, l):
//!
//! ```text
//! ħ²/2mₑ · |2π (G + k) · B|² < ENCUT
//! ```
//!
//! 枚举顺序与 WAVECAR 中平面波系数的存储顺序一致：第三个轴最外层，第一个轴变化最快。
//! gamma-only 版本 (-DwNGZHalf) 只保存一半倒空间，见 [`in_half_space`]。
//!
//! ## 依赖关系
//! - 被 `parsers/wavecar.rs`, `wfc/realspace.rs`, `wfc/tdm.rs` 使用
//! - 使用 `models/header.rs`, `models/band.rs`

use crate::constants::{HSQDTM, TPI};
use crate::error::{Result, WavecarError};
use crate::models::lattice::{norm, row_times};
use crate::models::{BandTable, FileHeader};

/// 整数倒格矢索引
pub type Miller = [i32; 3];

/// FFT 下标到频率: i < n/2 + 1 时为 i，否则为 i - n
pub fn fft_frequency(i: usize, n: usize) -> i32 {
    if i < n / 2 + 1 {
        i as i32
    } else {
        i as i32 - n as i32
    }
}

/// gamma 半空间: fz > 0，或 fz == 0 且 fy > 0，或 fz == fy == 0 且 fx >= 0
pub fn in_half_space(g: Miller) -> bool {
    let [fx, fy, fz] = g;
    fz > 0 || (fz == 0 && fy > 0) || (fz == 0 && fy == 0 && fx >= 0)
}

/// 枚举 k 点处的 G 矢量，不与存储的平面波数比较
pub fn enumerate(header: &FileHeader, kvec: [f64; 3], gamma_half: bool) -> Vec<Miller> {
    let [n1, n2, n3] = header.ngrid;
    let fx: Vec<i32> = (0..n1).map(|i| fft_frequency(i, n1)).collect();
    let fy: Vec<i32> = (0..n2).map(|j| fft_frequency(j, n2)).collect();
    let fz: Vec<i32> = (0..n3).map(|k| fft_frequency(k, n3)).collect();

    let bcell = scaled_reciprocal(header);
    let mut gvecs = Vec::new();

    for &z in &fz {
        for &y in &fy {
            for &x in &fx {
                let g = [x, y, z];
                if gamma_half && !in_half_space(g) {
                    continue;
                }
                let kg = [
                    x as f64 + kvec[0],
                    y as f64 + kvec[1],
                    z as f64 + kvec[2],
                ];
                let kinetic = HSQDTM * norm(row_times(kg, &bcell)).powi(2);
                if kinetic < header.encut {
                    gvecs.push(g);
                }
            }
        }
    }

    gvecs
}

/// 生成 G 矢量并检查数量与文件中记录的平面波数一致
pub fn generate(
    header: &FileHeader,
    bands: &BandTable,
    kpoint: usize,
    gamma_half: bool,
) -> Result<Vec<Miller>> {
    header.check_kpoint(kpoint)?;

    let kp = bands.kpoint(kpoint);
    let gvecs = enumerate(header, kp.kvec, gamma_half);

    if gvecs.len() != kp.nplw {
        return Err(WavecarError::PlaneWaveCountMismatch {
            kpoint,
            generated: gvecs.len(),
            stored: kp.nplw,
            grid_points: header.grid_points(),
        });
    }

    Ok(gvecs)
}

/// 笛卡尔坐标下的 G 矢量: G · 2πB (Å⁻¹)
pub fn to_cartesian(gvecs: &[Miller], header: &FileHeader) -> Vec<[f64; 3]> {
    let bcell = scaled_reciprocal(header);
    gvecs
        .iter()
        .map(|g| row_times([g[0] as f64, g[1] as f64, g[2] as f64], &bcell))
        .collect()
}

/// 2π·B
fn scaled_reciprocal(header: &FileHeader) -> [[f64; 3]; 3] {
    header.reciprocal.map(|row| row.map(|v| v * TPI))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Lattice, Precision};

    fn header(a: f64, encut: f64) -> FileHeader {
        FileHeader::new(
            4096,
            1,
            Precision::SingleComplex,
            1,
            1,
            encut,
            Lattice::from_vectors([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]]),
        )
        .unwrap()
    }

    fn table(h: &FileHeader, nplw: usize, kvec: [f64; 3]) -> BandTable {
        let record = vec![nplw as f64, kvec[0], kvec[1], kvec[2], 0.0, 0.0, 1.0];
        BandTable::from_records(h, &[record]).unwrap()
    }

    #[test]
    fn test_fft_frequency_odd() {
        let freqs: Vec<i32> = (0..5).map(|i| fft_frequency(i, 5)).collect();
        assert_eq!(freqs, vec![0, 1, 2, -2, -1]);
    }

    #[test]
    fn test_fft_frequency_even() {
        let freqs: Vec<i32> = (0..4).map(|i| fft_frequency(i, 4)).collect();
        assert_eq!(freqs, vec![0, 1, 2, -1]);
    }

    #[test]
    fn test_half_space() {
        assert!(in_half_space([0, 0, 0]));
        assert!(in_half_space([-3, -2, 1]));
        assert!(in_half_space([-1, 1, 0]));
        assert!(in_half_space([2, 0, 0]));
        assert!(!in_half_space([-1, 0, 0]));
        assert!(!in_half_space([3, -1, 0]));
        assert!(!in_half_space([0, 0, -1]));
    }

    #[test]
    fn test_first_vectors_follow_storage_order() {
        let h = header(5.0, 100.0);
        let gvecs = enumerate(&h, [0.0; 3], false);
        // 第一个轴变化最快
        assert_eq!(&gvecs[..3], &[[0, 0, 0], [1, 0, 0], [2, 0, 0]]);
    }

    #[test]
    fn test_full_set_is_inversion_symmetric() {
        let h = header(5.0, 100.0);
        let gvecs = enumerate(&h, [0.0; 3], false);
        for g in &gvecs {
            assert!(gvecs.contains(&[-g[0], -g[1], -g[2]]));
        }
    }

    #[test]
    fn test_gamma_half_count() {
        let h = header(5.0, 100.0);
        let full = enumerate(&h, [0.0; 3], false);
        let half = enumerate(&h, [0.0; 3], true);
        assert_eq!(half.len(), (full.len() + 1) / 2);
        assert!(half.iter().all(|&g| in_half_space(g)));
    }

    #[test]
    fn test_kinetic_energy_cutoff() {
        // |G| = 2π/5 Å⁻¹ 时动能约 6.02 eV
        let h = header(5.0, 6.5);
        let gvecs = enumerate(&h, [0.0; 3], false);
        assert_eq!(gvecs.len(), 7);

        let h = header(5.0, 5.5);
        assert_eq!(enumerate(&h, [0.0; 3], false), vec![[0, 0, 0]]);
    }

    #[test]
    fn test_kpoint_shift() {
        // k = (0.5, 0, 0): (0,0,0) 与 (-1,0,0) 的动能相同
        let h = header(10.0, 1.6);
        assert_eq!(h.ngrid, [3, 3, 3]);
        let gvecs = enumerate(&h, [0.5, 0.0, 0.0], false);
        assert_eq!(gvecs, vec![[0, 0, 0], [-1, 0, 0]]);
    }

    #[test]
    fn test_generate_matches_stored_count() {
        let h = header(5.0, 100.0);
        let n = enumerate(&h, [0.0; 3], false).len();
        let bands = table(&h, n, [0.0; 3]);
        assert_eq!(generate(&h, &bands, 1, false).unwrap().len(), n);
    }

    #[test]
    fn test_generate_count_mismatch_is_fatal() {
        let h = header(5.0, 100.0);
        let n = enumerate(&h, [0.0; 3], false).len();
        let bands = table(&h, n + 1, [0.0; 3]);
        match generate(&h, &bands, 1, false) {
            Err(WavecarError::PlaneWaveCountMismatch {
                generated, stored, ..
            }) => {
                assert_eq!(generated, n);
                assert_eq!(stored, n + 1);
            }
            other => panic!("expected mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_generate_checks_kpoint() {
        let h = header(5.0, 100.0);
        let bands = table(&h, 1, [0.0; 3]);
        assert!(matches!(
            generate(&h, &bands, 2, false),
            Err(WavecarError::IndexOutOfRange { .. })
        ));
    }

    #[test]
    fn test_to_cartesian() {
        let h = header(5.0, 100.0);
        let cart = to_cartesian(&[[1, 0, 0], [0, -2, 1]], &h);
        let unit = TPI / 5.0;
        assert!((cart[0][0] - unit).abs() < 1e-12);
        assert!((cart[1][1] + 2.0 * unit).abs() < 1e-12);
        assert!((cart[1][2] - unit).abs() < 1e-12);
    }
}
