//! # info 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/info.rs`

use clap::Args;

/// info 子命令参数
#[derive(Args, Debug)]
pub struct InfoArgs {
    /// Regenerate G-vectors for every k-point and compare with the stored plane-wave counts
    #[arg(long, default_value_t = false)]
    pub check: bool,

    /// Treat the file as gamma-only (half-space storage) when checking
    #[arg(long, default_value_t = false)]
    pub gamma: bool,
}
