//! # CLI 模块
//!
//! 使用 `clap` 定义命令行参数和子命令。
//!
//! ## 命令结构
//! - `info`: 文件头、晶格、FFT 网格和各 k 点平面波数
//! - `bands`: 能带能量与占据数，可导出 CSV 和能带图
//! - `wfc`: 实空间赝波函数，写成 VESTA 格式
//! - `tdm`: 两个态之间的跃迁偶极矩
//!
//! WAVECAR 路径是全局选项，依次取 `--wavecar`、环境变量 `WAVECAR`、`./WAVECAR`。
//!
//! ## 依赖关系
//! - 被 `main.rs` 使用
//! - 子模块: info, bands, wfc, tdm

pub mod bands;
pub mod info;
pub mod tdm;
pub mod wfc;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// wavecar - VASP WAVECAR 波函数工具
#[derive(Parser)]
#[command(name = "wavecar")]
#[command(author = "Changjiang Wu")]
#[command(version)]
#[command(about = "Inspect VASP WAVECAR files: bands, real-space wavefunctions and transition dipoles", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to the WAVECAR file
    #[arg(
        short = 'w',
        long,
        global = true,
        env = "WAVECAR",
        default_value = "WAVECAR"
    )]
    pub wavecar: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令
#[derive(Subcommand)]
pub enum Commands {
    /// Show header, lattice, FFT grid and plane-wave counts
    Info(info::InfoArgs),

    /// Print band energies and occupations, optionally export CSV and plot
    Bands(bands::BandsArgs),

    /// Reconstruct real-space pseudo-wavefunctions and write VESTA files
    Wfc(wfc::WfcArgs),

    /// Compute the transition dipole moment between two states
    Tdm(tdm::TdmArgs),
}

/// 解析逗号分隔的三元组 (e.g., '1,1,17' 或 '28,28,252')
pub fn parse_triplet(input: &str) -> Result<[usize; 3], String> {
    let parts: Vec<&str> = input.split(',').map(|s| s.trim()).collect();
    if parts.len() != 3 {
        return Err(format!("expected three comma-separated integers, got '{}'", input));
    }

    let mut values = [0usize; 3];
    for (v, p) in values.iter_mut().zip(parts.iter()) {
        *v = p
            .parse()
            .map_err(|_| format!("'{}' is not a non-negative integer", p))?;
    }
    Ok(values)
}
