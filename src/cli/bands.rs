//! # bands 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/bands.rs`

use clap::Args;
use std::path::PathBuf;

/// bands 子命令参数
#[derive(Args, Debug)]
pub struct BandsArgs {
    /// Spin channel to show (all channels when omitted)
    #[arg(short, long)]
    pub spin: Option<usize>,

    /// K-point whose bands are printed as a table
    #[arg(short, long, default_value_t = 1)]
    pub kpoint: usize,

    /// Write all bands of the selected spin channels to this CSV file
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write a band-structure plot to this file (.png or .svg)
    #[arg(long)]
    pub plot: Option<PathBuf>,

    /// Energy zero for the plot (eV), e.g. the Fermi level
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    pub reference: f64,

    /// Plot width in pixels
    #[arg(long, default_value_t = 800)]
    pub width: u32,

    /// Plot height in pixels
    #[arg(long, default_value_t = 600)]
    pub height: u32,
}
