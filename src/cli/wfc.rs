//! # wfc 子命令 CLI 定义
//!
//! 实空间赝波函数重建。多个能带可并行处理:
//!
//! ```text
//! wavecar wfc --kpoint 1 --bands 5-8 --grid 28,28,252 --jobs 4
//! ```
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/wfc.rs`

use super::parse_triplet;

use clap::Args;
use std::path::PathBuf;

/// wfc 子命令参数
#[derive(Args, Debug)]
pub struct WfcArgs {
    /// Spin channel (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub spin: usize,

    /// K-point (1-based)
    #[arg(short, long, default_value_t = 1)]
    pub kpoint: usize,

    /// Bands to extract: '5', '5-8' or '1,3,5-7'
    #[arg(short, long, default_value = "1")]
    pub bands: String,

    /// FFT grid 'nx,ny,nz' (defaults to the minimum grid of the file)
    #[arg(long, value_parser = parse_triplet)]
    pub grid: Option<[usize; 3]>,

    /// Normalize the plane-wave coefficients before the transform
    #[arg(long, default_value_t = false)]
    pub norm: bool,

    /// Gamma-only file (half-space storage, real wavefunction)
    #[arg(long, default_value_t = false)]
    pub gamma: bool,

    /// Structure file whose leading block becomes the VESTA header
    #[arg(long, default_value = "POSCAR")]
    pub poscar: PathBuf,

    /// Output file prefix; files are named '{prefix}_s{spin}_k{kpoint}_b{band}_r.vasp'
    #[arg(short, long, default_value = "wfc")]
    pub prefix: String,

    /// Number of parallel jobs (0 = all CPUs)
    #[arg(short, long, default_value_t = 0)]
    pub jobs: usize,

    /// Overwrite existing output files
    #[arg(long, default_value_t = false)]
    pub overwrite: bool,
}
