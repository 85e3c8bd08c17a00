//! # 命令执行模块
//!
//! 实现各子命令的业务逻辑。
//!
//! ## 依赖关系
//! - 被 `main.rs` 调用
//! - 使用 `cli/`, `batch/`, `utils/` 以及 `wavecar` 库
//! - 子模块: info, bands, wfc, tdm

pub mod bands;
pub mod info;
pub mod tdm;
pub mod wfc;

use crate::cli::{Cli, Commands};
use crate::utils::output;

use std::path::Path;
use wavecar::error::Result;
use wavecar::Wavecar;

/// 执行命令
pub fn run(cli: Cli) -> Result<()> {
    let path = cli.wavecar;
    match cli.command {
        Commands::Info(args) => info::execute(&path, args),
        Commands::Bands(args) => bands::execute(&path, args),
        Commands::Wfc(args) => wfc::execute(&path, args),
        Commands::Tdm(args) => tdm::execute(&path, args),
    }
}

/// 打开 WAVECAR 并报告基本信息
pub(crate) fn open_wavecar(path: &Path) -> Result<Wavecar> {
    output::print_info(&format!("Reading '{}'", path.display()));
    let wfc = Wavecar::open(path)?;
    let h = wfc.header();
    output::print_info(&format!(
        "{} spin(s), {} k-point(s), {} band(s), ENCUT = {:.2} eV, {}",
        h.nspin, h.nkpts, h.nbands, h.encut, h.precision
    ));
    Ok(wfc)
}
