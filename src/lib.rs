//! # wavecar - VASP WAVECAR 波函数读取库
//!
//! 读取 VASP 输出的 WAVECAR 二进制文件，提供:
//!
//! - 文件头、能带能量与占据数
//! - 每个 k 点的 G 矢量（含 gamma-only 半空间存储）
//! - 平面波系数
//! - 实空间赝波函数（三维 FFT）
//! - 同一 k 点两个态之间的跃迁偶极矩
//!
//! ```no_run
//! use wavecar::{ReconstructOptions, StateIndex, Wavecar};
//!
//! let mut wfc = Wavecar::open("WAVECAR")?;
//! let state = StateIndex::new(1, 1, 1);
//! let field = wfc.real_space(state, &ReconstructOptions::default())?;
//! println!("{:?}", field.shape());
//! # Ok::<(), wavecar::WavecarError>(())
//! ```
//!
//! ## 依赖关系
//! ```text
//! lib.rs
//!   ├── parsers/   (WAVECAR 读取器、记录定位、POSCAR 结构块)
//!   ├── wfc/       (G 矢量、FFT、实空间重建、跃迁偶极矩)
//!   ├── models/    (文件头、能带表、态索引、实空间场)
//!   ├── export/    (VESTA 网格、CSV、能带图)
//!   ├── constants.rs
//!   └── error.rs
//! ```

pub mod constants;
pub mod error;
pub mod export;
pub mod models;
pub mod parsers;
pub mod wfc;

#[cfg(test)]
mod testutil;

pub use error::{Result, WavecarError};
pub use models::{
    BandTable, FileHeader, IndexKind, KPoint, Lattice, Precision, RealSpaceField, StateIndex,
    TdmResult,
};
pub use parsers::Wavecar;
pub use wfc::{Miller, ReconstructOptions, RustFftTransform, SpectralTransform};
