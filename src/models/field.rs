//! # 实空间波函数网格
//!
//! 逆傅里叶变换得到的三维复数场，按 C 顺序存储: index = (i * n1 + j) * n2 + k。
//!
//! ## 依赖关系
//! - 被 `wfc/realspace.rs`, `export/vesta.rs` 使用

use num_complex::Complex64;

/// 实空间赝波函数
#[derive(Debug, Clone)]
pub struct RealSpaceField {
    shape: [usize; 3],
    data: Vec<Complex64>,
}

impl RealSpaceField {
    pub fn new(shape: [usize; 3], data: Vec<Complex64>) -> Self {
        debug_assert_eq!(data.len(), shape.iter().product::<usize>());
        RealSpaceField { shape, data }
    }

    /// 由实数值构建（gamma 点，虚部为零）
    pub fn from_real(shape: [usize; 3], values: Vec<f64>) -> Self {
        let data = values.into_iter().map(|v| Complex64::new(v, 0.0)).collect();
        Self::new(shape, data)
    }

    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    pub fn data(&self) -> &[Complex64] {
        &self.data
    }

    pub fn get(&self, i: usize, j: usize, k: usize) -> Complex64 {
        self.data[(i * self.shape[1] + j) * self.shape[2] + k]
    }

    /// 最大虚部绝对值
    pub fn max_imag(&self) -> f64 {
        self.data.iter().map(|c| c.im.abs()).fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexing_is_c_order() {
        let shape = [2, 3, 4];
        let values: Vec<f64> = (0..24).map(|v| v as f64).collect();
        let field = RealSpaceField::from_real(shape, values);

        assert_eq!(field.get(1, 2, 3).re, 23.0);
        assert_eq!(field.get(0, 1, 0).re, 4.0);
        assert_eq!(field.max_imag(), 0.0);
    }
}
