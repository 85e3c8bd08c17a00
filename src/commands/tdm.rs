//! # tdm 子命令实现
//!
//! 计算同一 k 点两个态之间的跃迁偶极矩，输出 ΔE、重叠积分和偶极矢量。
//!
//! ## 依赖关系
//! - 使用 `cli/tdm.rs` 定义的参数
//! - 使用 `utils/output.rs`

use crate::cli::tdm::TdmArgs;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};
use wavecar::error::Result;

/// 偶极分量行
#[derive(Debug, Clone, Tabled)]
struct DipoleRow {
    #[tabled(rename = "Component")]
    axis: &'static str,
    #[tabled(rename = "Re (Debye)")]
    re: String,
    #[tabled(rename = "Im (Debye)")]
    im: String,
    #[tabled(rename = "|d| (Debye)")]
    abs: String,
}

/// 执行 tdm 命令
pub fn execute(path: &Path, args: TdmArgs) -> Result<()> {
    output::print_header("Transition Dipole Moment");

    let mut wfc = super::open_wavecar(path)?;
    let result = wfc.transition_dipole(args.initial, args.final_state, args.norm, args.gamma)?;

    let e_i = wfc.bands().energy(args.initial);
    let e_f = wfc.bands().energy(args.final_state);

    output::print_field("Initial state", &args.initial.to_string());
    output::print_field("Final state", &args.final_state.to_string());
    output::print_field("E_initial", &format!("{:.6} eV", e_i));
    output::print_field("E_final", &format!("{:.6} eV", e_f));
    output::print_field("ΔE", &format!("{:.6} eV", result.energy_delta));
    output::print_field(
        "Overlap",
        &format!("{:.6e} {:+.6e}i", result.overlap.re, result.overlap.im),
    );

    let rows: Vec<DipoleRow> = ["x", "y", "z"]
        .iter()
        .zip(result.dipole.iter())
        .map(|(&axis, d)| DipoleRow {
            axis,
            re: format!("{:.6e}", d.re),
            im: format!("{:.6e}", d.im),
            abs: format!("{:.6e}", d.norm()),
        })
        .collect();

    println!();
    println!("{}", Table::new(&rows));
    println!();

    output::print_success(&format!("|d|² = {:.6e} Debye²", result.dipole_strength()));

    Ok(())
}
