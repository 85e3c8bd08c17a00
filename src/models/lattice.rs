//! # 晶格数据模型
//!
//! 实空间晶格矩阵及其导出量（体积、倒格子、晶格参数）。
//!
//! ## 依赖关系
//! - 被 `models/header.rs`, `parsers/poscar.rs` 使用
//! - 无外部模块依赖

use serde::{Deserialize, Serialize};

/// 3x3 矩阵，行优先
pub type Matrix3 = [[f64; 3]; 3];

/// 晶格参数表示
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    /// 晶格向量矩阵 (3x3)，行向量表示 a, b, c
    /// [[a1, a2, a3], [b1, b2, b3], [c1, c2, c3]]
    pub matrix: Matrix3,
}

impl Lattice {
    /// 从晶格向量矩阵创建
    pub fn from_vectors(matrix: Matrix3) -> Self {
        Lattice { matrix }
    }

    /// 从 9 个行优先的数值创建
    pub fn from_row_major(values: &[f64]) -> Option<Self> {
        if values.len() != 9 {
            return None;
        }
        let mut matrix = [[0.0; 3]; 3];
        for (i, row) in matrix.iter_mut().enumerate() {
            row.copy_from_slice(&values[3 * i..3 * i + 3]);
        }
        Some(Lattice { matrix })
    }

    /// 各晶格向量的长度 |a|, |b|, |c|
    pub fn lengths(&self) -> [f64; 3] {
        self.matrix.map(norm)
    }

    /// 获取晶格参数 (a, b, c, alpha, beta, gamma)
    pub fn parameters(&self) -> (f64, f64, f64, f64, f64, f64) {
        let [a_vec, b_vec, c_vec] = self.matrix;
        let [a, b, c] = self.lengths();

        let alpha = (dot(b_vec, c_vec) / (b * c)).acos().to_degrees();
        let beta = (dot(a_vec, c_vec) / (a * c)).acos().to_degrees();
        let gamma = (dot(a_vec, b_vec) / (a * b)).acos().to_degrees();

        (a, b, c, alpha, beta, gamma)
    }

    /// 计算晶格体积（行列式，保留符号）
    pub fn volume(&self) -> f64 {
        determinant(&self.matrix)
    }

    /// 倒格子矩阵 B = (A^-1)^T，不含 2π 因子
    ///
    /// 行向量 b_i 满足 a_i · b_j = δ_ij。
    pub fn reciprocal(&self) -> Matrix3 {
        let m = &self.matrix;
        let det = determinant(m);

        // 伴随矩阵的转置除以行列式即为 (A^-1)^T
        [
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) / det,
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) / det,
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) / det,
            ],
            [
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) / det,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) / det,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) / det,
            ],
            [
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) / det,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) / det,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) / det,
            ],
        ]
    }

    /// 两个晶格逐元素比较
    pub fn approx_eq(&self, other: &Lattice, tol: f64) -> bool {
        self.matrix
            .iter()
            .flatten()
            .zip(other.matrix.iter().flatten())
            .all(|(a, b)| (a - b).abs() <= tol)
    }
}

/// 行向量乘矩阵: v · M
pub fn row_times(v: [f64; 3], m: &Matrix3) -> [f64; 3] {
    [
        v[0] * m[0][0] + v[1] * m[1][0] + v[2] * m[2][0],
        v[0] * m[0][1] + v[1] * m[1][1] + v[2] * m[2][1],
        v[0] * m[0][2] + v[1] * m[1][2] + v[2] * m[2][2],
    ]
}

pub fn norm(v: [f64; 3]) -> f64 {
    dot(v, v).sqrt()
}

fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

fn determinant(m: &Matrix3) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lattice_volume_cubic() {
        let lattice = Lattice::from_vectors([[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]]);
        assert!((lattice.volume() - 125.0).abs() < 1e-10);
    }

    #[test]
    fn test_lattice_parameters_hexagonal() {
        let s = 3.0_f64.sqrt() / 2.0;
        let lattice =
            Lattice::from_vectors([[3.0, 0.0, 0.0], [-1.5, 3.0 * s, 0.0], [0.0, 0.0, 5.0]]);
        let (a, b, c, alpha, beta, gamma) = lattice.parameters();

        assert!((a - 3.0).abs() < 1e-10);
        assert!((b - 3.0).abs() < 1e-10);
        assert!((c - 5.0).abs() < 1e-10);
        assert!((alpha - 90.0).abs() < 1e-8);
        assert!((beta - 90.0).abs() < 1e-8);
        assert!((gamma - 120.0).abs() < 1e-8);
    }

    #[test]
    fn test_reciprocal_is_inverse_transpose() {
        let lattice =
            Lattice::from_vectors([[4.0, 0.1, 0.0], [0.3, 5.0, 0.2], [0.0, -0.4, 6.0]]);
        let b = lattice.reciprocal();

        // a_i · b_j = δ_ij
        for i in 0..3 {
            for j in 0..3 {
                let d = dot(lattice.matrix[i], b[j]);
                let expected = if i == j { 1.0 } else { 0.0 };
                assert!((d - expected).abs() < 1e-12, "a{} . b{} = {}", i, j, d);
            }
        }
    }

    #[test]
    fn test_from_row_major() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 10.0];
        let lattice = Lattice::from_row_major(&values).unwrap();
        assert_eq!(lattice.matrix[1], [4.0, 5.0, 6.0]);
        assert!(Lattice::from_row_major(&values[..8]).is_none());
    }

    #[test]
    fn test_row_times() {
        let m = [[1.0, 0.0, 0.0], [0.0, 2.0, 0.0], [1.0, 0.0, 3.0]];
        assert_eq!(row_times([1.0, 1.0, 1.0], &m), [2.0, 2.0, 3.0]);
    }
}
