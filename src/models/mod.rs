//! # 数据模型模块
//!
//! 定义 WAVECAR 文件头、能带表、态索引和实空间场等值类型。
//!
//! ## 依赖关系
//! - 被 `parsers/`, `wfc/` 和 `export/` 使用
//! - 子模块: lattice, header, band, state, field

pub mod band;
pub mod field;
pub mod header;
pub mod lattice;
pub mod state;

pub use band::{BandTable, KPoint};
pub use field::RealSpaceField;
pub use header::{FileHeader, Precision};
pub use lattice::Lattice;
pub use state::{IndexKind, StateIndex, TdmResult};
