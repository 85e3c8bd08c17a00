//! # Kohn-Sham 态索引与跃迁偶极结果
//!
//! ## 依赖关系
//! - 被 `models/header.rs`, `parsers/wavecar.rs`, `wfc/tdm.rs` 使用
//! - 无外部模块依赖

use num_complex::Complex64;
use serde::Serialize;

/// 出错的索引类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    Spin,
    Kpoint,
    Band,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Spin => write!(f, "spin"),
            IndexKind::Kpoint => write!(f, "k-point"),
            IndexKind::Band => write!(f, "band"),
        }
    }
}

/// Kohn-Sham 态 (ispin, ikpt, iband)，均从 1 开始
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct StateIndex {
    pub spin: usize,
    pub kpoint: usize,
    pub band: usize,
}

impl StateIndex {
    pub fn new(spin: usize, kpoint: usize, band: usize) -> Self {
        StateIndex { spin, kpoint, band }
    }
}

impl std::fmt::Display for StateIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "(spin {}, k-point {}, band {})",
            self.spin, self.kpoint, self.band
        )
    }
}

/// 跃迁偶极矩计算结果
#[derive(Debug, Clone, Copy)]
pub struct TdmResult {
    /// E_b - E_a (eV)
    pub energy_delta: f64,
    /// <psi_a|psi_b>
    pub overlap: Complex64,
    /// 跃迁偶极矩 (Debye)
    pub dipole: [Complex64; 3],
}

impl TdmResult {
    /// |d|² = Σ |d_i|²
    pub fn dipole_strength(&self) -> f64 {
        self.dipole.iter().map(|d| d.norm_sqr()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dipole_strength() {
        let result = TdmResult {
            energy_delta: 1.0,
            overlap: Complex64::new(0.0, 0.0),
            dipole: [
                Complex64::new(3.0, 4.0),
                Complex64::new(0.0, 1.0),
                Complex64::new(0.0, 0.0),
            ],
        };
        assert!((result.dipole_strength() - 26.0).abs() < 1e-12);
    }

    #[test]
    fn test_state_display() {
        let s = StateIndex::new(1, 30, 17);
        assert_eq!(s.to_string(), "(spin 1, k-point 30, band 17)");
    }
}
