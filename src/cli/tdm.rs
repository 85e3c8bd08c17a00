//! # tdm 子命令 CLI 定义
//!
//! ## 依赖关系
//! - 被 `cli/mod.rs` 使用
//! - 参数传递给 `commands/tdm.rs`

use super::parse_triplet;

use clap::Args;
use wavecar::StateIndex;

/// tdm 子命令参数
#[derive(Args, Debug)]
pub struct TdmArgs {
    /// Initial state 'spin,kpoint,band' (1-based)
    #[arg(short, long, value_parser = parse_state)]
    pub initial: StateIndex,

    /// Final state 'spin,kpoint,band' (1-based)
    #[arg(short, long = "final", value_parser = parse_state)]
    pub final_state: StateIndex,

    /// Normalize both wavefunctions first
    #[arg(long, default_value_t = false)]
    pub norm: bool,

    /// Gamma-only file (half-space storage)
    #[arg(long, default_value_t = false)]
    pub gamma: bool,
}

/// 解析 'spin,kpoint,band'
pub fn parse_state(input: &str) -> Result<StateIndex, String> {
    let [spin, kpoint, band] = parse_triplet(input)?;
    if spin < 1 || kpoint < 1 || band < 1 {
        return Err(format!("indices start at 1, got '{}'", input));
    }
    Ok(StateIndex::new(spin, kpoint, band))
}
