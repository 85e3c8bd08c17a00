//! # wfc 子命令实现
//!
//! 把一个 (spin, k-point) 的若干能带重建到实空间，写成 VESTA 格式。
//!
//! ## 功能
//! - 能带列表解析 ('5', '5-8', '1,3,5-7')
//! - 结构块取自 POSCAR，晶格与 WAVECAR 不一致时给出警告
//! - 多个能带并行处理，每个任务独立打开 WAVECAR
//! - 已存在的输出默认跳过
//!
//! ## 依赖关系
//! - 使用 `cli/wfc.rs` 定义的参数
//! - 使用 `batch/runner.rs` 并行执行
//! - 使用 `wavecar::parsers::poscar`, `wavecar::export::vesta`

use crate::batch::{BatchRunner, ProcessResult};
use crate::cli::wfc::WfcArgs;
use crate::utils::output;

use std::path::{Path, PathBuf};
use wavecar::error::{Result, WavecarError};
use wavecar::export::save_vesta;
use wavecar::parsers::poscar;
use wavecar::wfc::realspace::resolve_grid;
use wavecar::{ReconstructOptions, StateIndex, Wavecar};

/// 单个能带的重建任务
struct BandTask {
    state: StateIndex,
    prefix: String,
}

/// 所有任务共用的设置
struct TaskContext {
    wavecar: PathBuf,
    header: String,
    options: ReconstructOptions,
    overwrite: bool,
}

/// 执行 wfc 命令
pub fn execute(path: &Path, args: WfcArgs) -> Result<()> {
    output::print_header("Real-space Wavefunctions");

    let bands = parse_band_list(&args.bands)?;

    let wfc = super::open_wavecar(path)?;
    let file_header = wfc.header();
    for &band in &bands {
        file_header.check_index(StateIndex::new(args.spin, args.kpoint, band))?;
    }
    let grid = resolve_grid(file_header.ngrid, args.grid)?;

    let header = poscar::read_poscar_header(&args.poscar)?;
    match poscar::parse_poscar_lattice(&header) {
        Ok(lattice) if !lattice.approx_eq(&file_header.lattice, 1e-4) => {
            output::print_warning(&format!(
                "Lattice in '{}' differs from the WAVECAR lattice",
                args.poscar.display()
            ));
        }
        Ok(_) => {}
        Err(e) => output::print_warning(&format!("Cannot check lattice: {}", e)),
    }

    output::print_info(&format!(
        "Spin {}, k-point {}, {} band(s), FFT grid {} x {} x {}{}",
        args.spin,
        args.kpoint,
        bands.len(),
        grid[0],
        grid[1],
        grid[2],
        if args.gamma { ", gamma-only" } else { "" }
    ));
    drop(wfc);

    let context = TaskContext {
        wavecar: path.to_path_buf(),
        header,
        options: ReconstructOptions {
            grid: Some(grid),
            normalize: args.norm,
            gamma_half: args.gamma,
        },
        overwrite: args.overwrite,
    };

    let tasks: Vec<BandTask> = bands
        .iter()
        .map(|&band| {
            let state = StateIndex::new(args.spin, args.kpoint, band);
            BandTask {
                state,
                prefix: output_prefix(&args.prefix, state),
            }
        })
        .collect();

    let runner = BatchRunner::new(args.jobs);
    output::print_info(&format!("Running with {} thread(s)", runner.jobs()));
    let result = runner.run(tasks, |task| process_band(task, &context))?;

    for name in &result.outputs {
        output::print_written("wavefunction", name);
    }
    for (name, err) in &result.failures {
        output::print_error(&format!("{}: {}", name, err));
    }
    if result.skipped > 0 {
        output::print_skip(&format!(
            "{} band(s) already written, use --overwrite to regenerate",
            result.skipped
        ));
    }

    if result.failed > 0 {
        return Err(WavecarError::Other(format!(
            "{} of {} band(s) failed",
            result.failed,
            result.total()
        )));
    }

    output::print_done(&format!("{} band(s) written", result.success));
    Ok(())
}

/// 输出文件前缀: {prefix}_s{spin}_k{kpoint}_b{band}
fn output_prefix(prefix: &str, state: StateIndex) -> String {
    format!(
        "{}_s{}_k{}_b{}",
        prefix, state.spin, state.kpoint, state.band
    )
}

fn process_band(task: &BandTask, context: &TaskContext) -> ProcessResult {
    let real_path = format!("{}_r.vasp", task.prefix);
    if !context.overwrite && Path::new(&real_path).exists() {
        return ProcessResult::Skipped(real_path);
    }

    match write_band(task, context) {
        Ok(written) => ProcessResult::Success(written.join(", ")),
        Err(e) => ProcessResult::Failed(task.state.to_string(), e.to_string()),
    }
}

fn write_band(task: &BandTask, context: &TaskContext) -> Result<Vec<String>> {
    let mut wfc = Wavecar::open(&context.wavecar)?;
    let field = wfc.real_space(task.state, &context.options)?;
    save_vesta(
        &field,
        &context.header,
        &task.prefix,
        context.options.gamma_half,
    )
}

/// 解析能带列表 (e.g., '5', '5-8', '1,3,5-7')，去重并排序
fn parse_band_list(input: &str) -> Result<Vec<usize>> {
    let invalid = || WavecarError::InvalidRange(input.to_string());
    let mut bands = Vec::new();

    for part in input.split(',').map(|s| s.trim()).filter(|s| !s.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let start: usize = start.trim().parse().map_err(|_| invalid())?;
                let end: usize = end.trim().parse().map_err(|_| invalid())?;
                if start < 1 || end < start {
                    return Err(invalid());
                }
                bands.extend(start..=end);
            }
            None => {
                let band: usize = part.parse().map_err(|_| invalid())?;
                if band < 1 {
                    return Err(invalid());
                }
                bands.push(band);
            }
        }
    }

    if bands.is_empty() {
        return Err(invalid());
    }
    bands.sort_unstable();
    bands.dedup();
    Ok(bands)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_band_list() {
        assert_eq!(parse_band_list("5").unwrap(), vec![5]);
        assert_eq!(parse_band_list("5-8").unwrap(), vec![5, 6, 7, 8]);
        assert_eq!(parse_band_list("7,1,3-4,3").unwrap(), vec![1, 3, 4, 7]);
        assert!(matches!(
            parse_band_list("8-5"),
            Err(WavecarError::InvalidRange(_))
        ));
        assert!(parse_band_list("0").is_err());
        assert!(parse_band_list("x").is_err());
        assert!(parse_band_list("").is_err());
    }

    #[test]
    fn test_output_prefix() {
        assert_eq!(
            output_prefix("wfc", StateIndex::new(1, 2, 17)),
            "wfc_s1_k2_b17"
        );
    }

    #[test]
    fn test_existing_output_is_skipped() {
        let dir = std::env::temp_dir().join(format!("wavecar_skip_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let prefix = dir.join("wfc_s1_k1_b1").display().to_string();
        std::fs::write(format!("{}_r.vasp", prefix), "existing").unwrap();

        let task = BandTask {
            state: StateIndex::new(1, 1, 1),
            prefix,
        };
        let context = TaskContext {
            wavecar: dir.join("WAVECAR"),
            header: String::new(),
            options: ReconstructOptions::default(),
            overwrite: false,
        };
        assert!(matches!(
            process_band(&task, &context),
            ProcessResult::Skipped(_)
        ));

        // 覆盖时会尝试读取不存在的 WAVECAR
        let context = TaskContext {
            overwrite: true,
            ..context
        };
        assert!(matches!(
            process_band(&task, &context),
            ProcessResult::Failed(_, _)
        ));

        std::fs::remove_dir_all(&dir).ok();
    }
}
