//! # 能带信息数据模型
//!
//! 每个 (spin, k-point) 的本征能量、占据数，以及每个 k 点的平面波数和 k 矢量。
//!
//! ## 记录布局
//! ```text
//! nplw, kx, ky, kz, (energy, imag(energy), occupation) * nbands
//! ```
//!
//! 平面波数和 k 矢量只从第一个自旋读取，假定与自旋无关（不做交叉检查）。
//!
//! ## 依赖关系
//! - 被 `parsers/wavecar.rs`, `wfc/` 使用
//! - 使用 `models/header.rs`

use crate::constants::TPI;
use crate::error::{Result, WavecarError};
use crate::models::header::FileHeader;
use crate::models::lattice::{norm, row_times};
use crate::models::state::StateIndex;

use serde::Serialize;

/// k 点信息
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct KPoint {
    /// 平面波数
    pub nplw: usize,
    /// k 矢量（倒格子分数坐标）
    pub kvec: [f64; 3],
}

/// 能带表
#[derive(Debug, Clone)]
pub struct BandTable {
    nkpts: usize,
    nbands: usize,
    kpoints: Vec<KPoint>,
    /// [spin][kpoint][band] 展平
    energies: Vec<f64>,
    occupations: Vec<f64>,
    kpath: Option<Vec<f64>>,
}

impl BandTable {
    /// 每条能带记录包含的数值个数
    pub fn record_len(nbands: usize) -> usize {
        4 + 3 * nbands
    }

    /// 从按 (spin, kpoint) 顺序排列的原始记录构建
    pub fn from_records(header: &FileHeader, records: &[Vec<f64>]) -> Result<Self> {
        header.check_layout()?;
        let (nspin, nkpts, nbands) = (header.nspin, header.nkpts, header.nbands);

        if records.len() != nspin * nkpts {
            return Err(WavecarError::InvalidHeader(format!(
                "expected {} band records, got {}",
                nspin * nkpts,
                records.len()
            )));
        }

        let mut kpoints = Vec::with_capacity(nkpts);
        let mut energies = Vec::with_capacity(records.len() * nbands);
        let mut occupations = Vec::with_capacity(records.len() * nbands);

        for (idx, dump) in records.iter().enumerate() {
            if dump.len() < Self::record_len(nbands) {
                return Err(WavecarError::InvalidHeader(format!(
                    "band record {} holds {} values, need {}",
                    idx + 1,
                    dump.len(),
                    Self::record_len(nbands)
                )));
            }

            if idx < nkpts {
                let nplw = dump[0];
                if !(nplw >= 0.0) || nplw.fract() != 0.0 {
                    return Err(WavecarError::InvalidHeader(format!(
                        "invalid plane-wave count {} at k-point {}",
                        nplw,
                        idx + 1
                    )));
                }
                let nplw = nplw as usize;
                header.check_plane_waves(nplw, idx + 1)?;
                kpoints.push(KPoint {
                    nplw,
                    kvec: [dump[1], dump[2], dump[3]],
                });
            }

            for triple in dump[4..Self::record_len(nbands)].chunks_exact(3) {
                energies.push(triple[0]);
                occupations.push(triple[2]);
            }
        }

        let kpath = if nkpts > 1 {
            Some(compute_kpath(&kpoints, header))
        } else {
            None
        };

        Ok(BandTable {
            nkpts,
            nbands,
            kpoints,
            energies,
            occupations,
            kpath,
        })
    }

    pub fn nkpts(&self) -> usize {
        self.nkpts
    }

    pub fn nbands(&self) -> usize {
        self.nbands
    }

    /// 第 kpoint 个 k 点 (1-based)
    pub fn kpoint(&self, kpoint: usize) -> &KPoint {
        &self.kpoints[kpoint - 1]
    }

    pub fn plane_wave_count(&self, kpoint: usize) -> usize {
        self.kpoint(kpoint).nplw
    }

    /// 本征能量 (eV)，索引须已检查
    pub fn energy(&self, state: StateIndex) -> f64 {
        self.energies[self.flat(state)]
    }

    pub fn occupation(&self, state: StateIndex) -> f64 {
        self.occupations[self.flat(state)]
    }

    /// 某个 (spin, kpoint) 的全部能量
    pub fn energies_at(&self, spin: usize, kpoint: usize) -> &[f64] {
        let start = self.flat(StateIndex::new(spin, kpoint, 1));
        &self.energies[start..start + self.nbands]
    }

    pub fn occupations_at(&self, spin: usize, kpoint: usize) -> &[f64] {
        let start = self.flat(StateIndex::new(spin, kpoint, 1));
        &self.occupations[start..start + self.nbands]
    }

    /// 累积 k 路径长度 (Å⁻¹)，仅在多个 k 点时存在
    pub fn kpath(&self) -> Option<&[f64]> {
        self.kpath.as_deref()
    }

    fn flat(&self, state: StateIndex) -> usize {
        ((state.spin - 1) * self.nkpts + (state.kpoint - 1)) * self.nbands + (state.band - 1)
    }
}

/// 相邻 k 点差经 2πB 变换后的模长累加，首项为 0
fn compute_kpath(kpoints: &[KPoint], header: &FileHeader) -> Vec<f64> {
    let mut bcell = header.reciprocal;
    for row in bcell.iter_mut() {
        for v in row.iter_mut() {
            *v *= TPI;
        }
    }

    let mut path = Vec::with_capacity(kpoints.len());
    path.push(0.0);
    let mut total = 0.0;
    for pair in kpoints.windows(2) {
        let dk = [
            pair[1].kvec[0] - pair[0].kvec[0],
            pair[1].kvec[1] - pair[0].kvec[1],
            pair[1].kvec[2] - pair[0].kvec[2],
        ];
        total += norm(row_times(dk, &bcell));
        path.push(total);
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::header::Precision;
    use crate::models::lattice::Lattice;

    fn header(nspin: usize, nkpts: usize, nbands: usize) -> FileHeader {
        FileHeader::new(
            4096,
            nspin,
            Precision::SingleComplex,
            nkpts,
            nbands,
            100.0,
            Lattice::from_vectors([[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 10.0]]),
        )
        .unwrap()
    }

    fn record(nplw: f64, kvec: [f64; 3], bands: &[(f64, f64)]) -> Vec<f64> {
        let mut r = vec![nplw, kvec[0], kvec[1], kvec[2]];
        for &(e, occ) in bands {
            r.extend_from_slice(&[e, 0.0, occ]);
        }
        r
    }

    #[test]
    fn test_band_table_two_spins() {
        let h = header(2, 2, 2);
        let records = vec![
            record(100.0, [0.0, 0.0, 0.0], &[(-5.0, 1.0), (1.0, 0.0)]),
            record(104.0, [0.5, 0.0, 0.0], &[(-4.0, 1.0), (2.0, 0.0)]),
            // 第二个自旋的 nplw/kvec 不被使用
            record(999.0, [9.0, 9.0, 9.0], &[(-5.5, 1.0), (1.5, 0.0)]),
            record(999.0, [9.0, 9.0, 9.0], &[(-4.5, 0.5), (2.5, 0.0)]),
        ];
        let table = BandTable::from_records(&h, &records).unwrap();

        assert_eq!(table.plane_wave_count(1), 100);
        assert_eq!(table.plane_wave_count(2), 104);
        assert_eq!(table.kpoint(2).kvec, [0.5, 0.0, 0.0]);
        assert_eq!(table.energy(StateIndex::new(2, 1, 2)), 1.5);
        assert_eq!(table.occupation(StateIndex::new(2, 2, 1)), 0.5);
        assert_eq!(table.energies_at(1, 2), &[-4.0, 2.0]);
        assert_eq!(table.occupations_at(2, 1), &[1.0, 0.0]);
    }

    #[test]
    fn test_kpath() {
        let h = header(1, 3, 1);
        let records = vec![
            record(10.0, [0.0, 0.0, 0.0], &[(0.0, 1.0)]),
            record(10.0, [0.5, 0.0, 0.0], &[(0.0, 1.0)]),
            record(10.0, [0.5, 0.5, 0.0], &[(0.0, 1.0)]),
        ];
        let table = BandTable::from_records(&h, &records).unwrap();
        let kpath = table.kpath().unwrap();

        let step = TPI * 0.5 / 10.0;
        assert_eq!(kpath.len(), 3);
        assert_eq!(kpath[0], 0.0);
        assert!((kpath[1] - step).abs() < 1e-12);
        assert!((kpath[2] - 2.0 * step).abs() < 1e-12);
    }

    #[test]
    fn test_single_kpoint_has_no_kpath() {
        let h = header(1, 1, 1);
        let records = vec![record(10.0, [0.0; 3], &[(0.0, 1.0)])];
        let table = BandTable::from_records(&h, &records).unwrap();
        assert!(table.kpath().is_none());
    }

    #[test]
    fn test_short_record_rejected() {
        let h = header(1, 1, 2);
        let records = vec![record(10.0, [0.0; 3], &[(0.0, 1.0)])];
        assert!(matches!(
            BandTable::from_records(&h, &records),
            Err(WavecarError::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_plane_waves_beyond_record_rejected() {
        // 4096 字节的记录最多容纳 512 个单精度系数
        let h = header(1, 1, 1);
        let fits = vec![record(512.0, [0.0; 3], &[(0.0, 1.0)])];
        assert_eq!(BandTable::from_records(&h, &fits).unwrap().plane_wave_count(1), 512);

        let inflated = vec![record(517.0, [0.0; 3], &[(0.0, 1.0)])];
        assert!(matches!(
            BandTable::from_records(&h, &inflated),
            Err(WavecarError::InvalidHeader(_))
        ));
    }
}
