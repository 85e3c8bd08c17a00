//! # 解析器模块
//!
//! WAVECAR 二进制读取器，以及写体数据时用到的 POSCAR 结构块读取。
//!
//! ## 依赖关系
//! - 被 `commands/` 模块使用
//! - 使用 `models/` 数据模型和 `wfc/` 计算
//! - 子模块: record, wavecar, poscar

pub mod poscar;
pub mod record;
pub mod wavecar;

pub use wavecar::Wavecar;
