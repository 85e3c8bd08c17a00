//! # 物理常数
//!
//! 与 VASP 源码 (`constant.inc`) 保持一致的单位换算常数。

use std::f64::consts::PI;

/// Rydberg → eV
pub const RYTOEV: f64 = 13.605826;

/// Bohr 半径 → Å
pub const AUTOA: f64 = 0.529177249;

/// ħ²/2mₑ (eV·Å²)
pub const HSQDTM: f64 = RYTOEV * AUTOA * AUTOA;

/// e·Bohr → Debye
pub const AUTDEBYE: f64 = 2.541746;

/// 2π
pub const TPI: f64 = 2.0 * PI;
