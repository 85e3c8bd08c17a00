//! # 波函数计算模块
//!
//! 由平面波系数导出物理量。
//!
//! ## 子模块
//! - `gvector`: G 矢量枚举（完整 / gamma 半空间）
//! - `fft`: 三维 FFT 接口与 rustfft 实现
//! - `gamma`: gamma 点半谱补全与缩放
//! - `realspace`: 倒空间 → 实空间重建
//! - `tdm`: 跃迁偶极矩
//!
//! ## 依赖关系
//! - 被 `parsers/wavecar.rs` 使用
//! - 使用 `models/`

pub mod fft;
pub mod gamma;
pub mod gvector;
pub mod realspace;
pub mod tdm;

pub use fft::{RustFftTransform, SpectralTransform};
pub use gvector::Miller;
pub use realspace::ReconstructOptions;
