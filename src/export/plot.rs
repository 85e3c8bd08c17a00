//! # 能带图生成
//!
//! 使用 `plotters` 沿 k 路径画出各能带，支持 PNG 和 SVG 输出。
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs` 调用
//! - 使用 `models/band.rs` 的 BandTable
//! - 使用 `plotters` 渲染图表

use crate::error::{Result, WavecarError};
use crate::models::BandTable;

use plotters::prelude::*;
use std::path::Path;

/// 图表设置
#[derive(Debug, Clone)]
pub struct PlotOptions {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// 能量零点 (eV)，画图时所有能量减去该值
    pub reference: f64,
    pub use_svg: bool,
}

/// 生成能带图
pub fn generate_band_plot(
    bands: &BandTable,
    spins: &[usize],
    output_path: &Path,
    options: &PlotOptions,
) -> Result<()> {
    if options.use_svg {
        let root =
            SVGBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_band_chart(&root, bands, spins, options)?;
        root.present().map_err(|e| WavecarError::Other(e.to_string()))?;
    } else {
        let root =
            BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
        draw_band_chart(&root, bands, spins, options)?;
        root.present().map_err(|e| WavecarError::Other(e.to_string()))?;
    }
    Ok(())
}

/// 横坐标: 有 k 路径时用累计长度，否则用 k 点序号
fn x_axis(bands: &BandTable) -> Vec<f64> {
    match bands.kpath() {
        Some(path) => path.to_vec(),
        None => (0..bands.nkpts()).map(|k| k as f64).collect(),
    }
}

/// 绘制能带图的核心逻辑
fn draw_band_chart<DB: DrawingBackend>(
    root: &DrawingArea<DB, plotters::coord::Shift>,
    bands: &BandTable,
    spins: &[usize],
    options: &PlotOptions,
) -> Result<()>
where
    DB::ErrorType: 'static,
{
    root.fill(&WHITE).map_err(|e| WavecarError::Other(format!("{:?}", e)))?;

    let xs = x_axis(bands);
    let x_min = 0.0;
    let x_max = xs.last().copied().filter(|x| *x > 0.0).unwrap_or(1.0);

    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for &spin in spins {
        for k in 1..=bands.nkpts() {
            for &e in bands.energies_at(spin, k) {
                y_min = y_min.min(e - options.reference);
                y_max = y_max.max(e - options.reference);
            }
        }
    }
    if !y_min.is_finite() || !y_max.is_finite() {
        return Err(WavecarError::InvalidArgument(
            "no band energies to plot".to_string(),
        ));
    }
    let pad = ((y_max - y_min) * 0.05).max(0.5);

    let mut chart = ChartBuilder::on(root)
        .caption(&options.title, ("sans-serif", 28).into_font())
        .margin(30)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, (y_min - pad)..(y_max + pad))
        .map_err(|e| WavecarError::Other(format!("{:?}", e)))?;

    let x_desc = if bands.kpath().is_some() {
        "k-path (1/Å)"
    } else {
        "k-point"
    };
    chart
        .configure_mesh()
        .x_desc(x_desc)
        .y_desc("Energy (eV)")
        .x_label_style(("sans-serif", 16))
        .y_label_style(("sans-serif", 16))
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(|e| WavecarError::Other(format!("{:?}", e)))?;

    let colors = [RGBColor(0, 102, 204), RGBColor(204, 51, 51)];

    for (idx, &spin) in spins.iter().enumerate() {
        let color = colors[idx % colors.len()];
        for band in 1..=bands.nbands() {
            let points: Vec<(f64, f64)> = (1..=bands.nkpts())
                .map(|k| {
                    (
                        xs[k - 1],
                        bands.energies_at(spin, k)[band - 1] - options.reference,
                    )
                })
                .collect();

            if points.len() == 1 {
                chart
                    .draw_series(std::iter::once(Circle::new(points[0], 3, color.filled())))
                    .map_err(|e| WavecarError::Other(format!("{:?}", e)))?;
            } else {
                chart
                    .draw_series(LineSeries::new(points, color.stroke_width(2)))
                    .map_err(|e| WavecarError::Other(format!("{:?}", e)))?;
            }
        }
    }

    Ok(())
}
