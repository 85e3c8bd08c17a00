//! # bands 子命令实现
//!
//! 打印一个 k 点的能带能量与占据数，可选导出全部能带为 CSV 并绘制能带图。
//!
//! ## 依赖关系
//! - 使用 `cli/bands.rs` 定义的参数
//! - 使用 `wavecar::export::{bands, plot}`
//! - 使用 `utils/output.rs`

use crate::cli::bands::BandsArgs;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};
use wavecar::error::Result;
use wavecar::export::{self, PlotOptions};
use wavecar::StateIndex;

/// 能带表格行
#[derive(Debug, Clone, Tabled)]
struct BandLine {
    #[tabled(rename = "Spin")]
    spin: usize,
    #[tabled(rename = "Band")]
    band: usize,
    #[tabled(rename = "Energy (eV)")]
    energy: String,
    #[tabled(rename = "Occupation")]
    occupation: String,
}

/// 执行 bands 命令
pub fn execute(path: &Path, args: BandsArgs) -> Result<()> {
    output::print_header("Band Energies");

    let wfc = super::open_wavecar(path)?;
    let header = wfc.header();
    let bands = wfc.bands();

    let spins: Vec<usize> = match args.spin {
        Some(spin) => vec![spin],
        None => (1..=header.nspin).collect(),
    };
    for &spin in &spins {
        header.check_index(StateIndex::new(spin, args.kpoint, 1))?;
    }

    let kp = bands.kpoint(args.kpoint);
    output::print_info(&format!(
        "K-point {}: ({:.6}, {:.6}, {:.6}), {} plane waves",
        args.kpoint, kp.kvec[0], kp.kvec[1], kp.kvec[2], kp.nplw
    ));

    let kpoint = args.kpoint;
    let lines: Vec<BandLine> = spins
        .iter()
        .flat_map(|&spin| {
            (1..=header.nbands).map(move |band| {
                let state = StateIndex::new(spin, kpoint, band);
                BandLine {
                    spin,
                    band,
                    energy: format!("{:.6}", bands.energy(state)),
                    occupation: format!("{:.4}", bands.occupation(state)),
                }
            })
        })
        .collect();
    println!("{}", Table::new(&lines));

    if let Some(ref csv_path) = args.csv {
        let rows = export::band_rows(bands, &spins);
        export::bands::to_csv(&rows, csv_path)?;
        output::print_written(
            &format!("{} rows", rows.len()),
            &csv_path.display().to_string(),
        );
    }

    if let Some(ref plot_path) = args.plot {
        let use_svg = plot_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);
        let options = PlotOptions {
            title: format!("Band structure ({})", wfc.path()),
            width: args.width,
            height: args.height,
            reference: args.reference,
            use_svg,
        };
        if bands.kpath().is_none() {
            output::print_warning("Single k-point: band energies are drawn as points");
        }
        export::generate_band_plot(bands, &spins, plot_path, &options)?;
        output::print_written("band plot", &plot_path.display().to_string());
    }

    Ok(())
}
