//! # wavecar - VASP WAVECAR 命令行工具
//!
//! 读取 WAVECAR 并输出能带、实空间赝波函数和跃迁偶极矩。
//!
//! ## 子命令
//! - `info`  - 文件头、晶格、FFT 网格、平面波数
//! - `bands` - 能带能量与占据数，CSV 导出与能带图
//! - `wfc`   - 实空间赝波函数 → VESTA 文件
//! - `tdm`   - 跃迁偶极矩
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     └── wavecar 库 (读取、计算、导出)
//!   ├── batch/      (并行执行)
//!   └── utils/      (工具函数)
//! ```

mod batch;
mod cli;
mod commands;
mod utils;

use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    let cli = Cli::parse();

    if let Err(e) = commands::run(cli) {
        utils::output::print_error(&format!("{}", e));
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            utils::output::print_error(&format!("  caused by: {}", cause));
            source = std::error::Error::source(cause);
        }
        std::process::exit(1);
    }
}
