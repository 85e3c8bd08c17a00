//! # 导出模块
//!
//! 把读取和计算结果写成外部工具可用的文件。
//!
//! ## 子模块
//! - `vesta`: 实空间场 → VESTA/CHGCAR 文本格式
//! - `bands`: 能带表 → CSV
//! - `plot`: 能带图 (PNG/SVG)
//!
//! ## 依赖关系
//! - 被 `commands/` 调用
//! - 使用 `models/`

pub mod bands;
pub mod plot;
pub mod vesta;

pub use bands::{band_rows, BandRow};
pub use plot::{generate_band_plot, PlotOptions};
pub use vesta::{format_sci, save_vesta, Component};
