//! # info 子命令实现
//!
//! 打印文件头、实空间和倒空间晶格、最小 FFT 网格以及各 k 点的平面波数。
//! `--check` 时为每个 k 点重新生成 G 矢量并与文件中的平面波数比对。
//!
//! ## 依赖关系
//! - 使用 `cli/info.rs` 定义的参数
//! - 使用 `utils/output.rs`

use crate::cli::info::InfoArgs;
use crate::utils::output;

use std::path::Path;
use tabled::{Table, Tabled};
use wavecar::error::Result;
use wavecar::models::lattice::{norm, Matrix3};

/// 晶格矢量行
#[derive(Debug, Clone, Tabled)]
struct VectorRow {
    #[tabled(rename = "Vector")]
    name: String,
    #[tabled(rename = "x")]
    x: String,
    #[tabled(rename = "y")]
    y: String,
    #[tabled(rename = "z")]
    z: String,
    #[tabled(rename = "Length")]
    length: String,
}

/// k 点行
#[derive(Debug, Clone, Tabled)]
struct KpointRow {
    #[tabled(rename = "K-point")]
    index: usize,
    #[tabled(rename = "kx")]
    kx: String,
    #[tabled(rename = "ky")]
    ky: String,
    #[tabled(rename = "kz")]
    kz: String,
    #[tabled(rename = "Plane waves")]
    nplw: usize,
    #[tabled(rename = "Check")]
    check: String,
}

fn vector_rows(matrix: &Matrix3, names: [&str; 3]) -> Vec<VectorRow> {
    matrix
        .iter()
        .zip(names)
        .map(|(v, name)| VectorRow {
            name: name.to_string(),
            x: format!("{:.6}", v[0]),
            y: format!("{:.6}", v[1]),
            z: format!("{:.6}", v[2]),
            length: format!("{:.6}", norm(*v)),
        })
        .collect()
}

/// 执行 info 命令
pub fn execute(path: &Path, args: InfoArgs) -> Result<()> {
    output::print_header("WAVECAR Summary");

    let mut wfc = super::open_wavecar(path)?;
    let h = wfc.header().clone();

    output::print_field("Record length", &format!("{} bytes", h.record_length));
    output::print_field("Precision", &h.precision.to_string());
    output::print_field("Spin channels", &h.nspin.to_string());
    output::print_field("K-points", &h.nkpts.to_string());
    output::print_field("Bands", &h.nbands.to_string());
    output::print_field("ENCUT", &format!("{:.4} eV", h.encut));
    output::print_field("Volume", &format!("{:.6} Å³", h.volume));
    output::print_field(
        "Minimum FFT grid",
        &format!("{} x {} x {}", h.ngrid[0], h.ngrid[1], h.ngrid[2]),
    );

    output::print_header("Lattice (Å)");
    println!("{}", Table::new(vector_rows(&h.lattice.matrix, ["a", "b", "c"])));
    let (a, b, c, alpha, beta, gamma) = h.lattice.parameters();
    output::print_field(
        "Cell parameters",
        &format!(
            "a={:.4} b={:.4} c={:.4} α={:.2}° β={:.2}° γ={:.2}°",
            a, b, c, alpha, beta, gamma
        ),
    );

    output::print_header("Reciprocal Lattice (1/Å, without 2π)");
    println!("{}", Table::new(vector_rows(&h.reciprocal, ["b1", "b2", "b3"])));

    let mut mismatches = 0;
    let mut rows = Vec::with_capacity(h.nkpts);
    for k in 1..=h.nkpts {
        let kp = *wfc.bands().kpoint(k);
        let check = if args.check {
            match wfc.gvectors(k, args.gamma) {
                Ok(_) => "ok".to_string(),
                Err(e) => {
                    mismatches += 1;
                    output::print_warning(&e.to_string());
                    "mismatch".to_string()
                }
            }
        } else {
            "-".to_string()
        };

        rows.push(KpointRow {
            index: k,
            kx: format!("{:.6}", kp.kvec[0]),
            ky: format!("{:.6}", kp.kvec[1]),
            kz: format!("{:.6}", kp.kvec[2]),
            nplw: kp.nplw,
            check,
        });
    }

    output::print_header("K-points (fractional)");
    println!("{}", Table::new(&rows));

    if args.check {
        if mismatches == 0 {
            output::print_success(&format!(
                "G-vectors consistent for all {} k-point(s){}",
                h.nkpts,
                if args.gamma { " (gamma half-space)" } else { "" }
            ));
        } else {
            output::print_warning(&format!(
                "{} k-point(s) inconsistent; try {} --gamma",
                mismatches,
                if args.gamma { "without" } else { "with" }
            ));
        }
    }

    Ok(())
}
