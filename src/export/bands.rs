//! # 能带数据导出
//!
//! 把能带表写成 CSV，每个 (spin, kpoint, band) 一行。
//!
//! ## 依赖关系
//! - 被 `commands/bands.rs` 调用
//! - 使用 `models/band.rs` 的 BandTable
//! - 使用 `csv` + `serde` 写入

use crate::error::{Result, WavecarError};
use crate::models::{BandTable, StateIndex};

use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// CSV 中的一行
#[derive(Debug, Clone, Serialize)]
pub struct BandRow {
    pub spin: usize,
    pub kpoint: usize,
    pub kpath: f64,
    pub band: usize,
    pub energy: f64,
    pub occupation: f64,
}

/// 展开能带表；单 k 点时 kpath 记为 0
pub fn band_rows(bands: &BandTable, spins: &[usize]) -> Vec<BandRow> {
    let kpath = bands.kpath();
    let mut rows = Vec::with_capacity(spins.len() * bands.nkpts() * bands.nbands());

    for &spin in spins {
        for kpoint in 1..=bands.nkpts() {
            let x = kpath.map(|p| p[kpoint - 1]).unwrap_or(0.0);
            for band in 1..=bands.nbands() {
                let state = StateIndex::new(spin, kpoint, band);
                rows.push(BandRow {
                    spin,
                    kpoint,
                    kpath: x,
                    band,
                    energy: bands.energy(state),
                    occupation: bands.occupation(state),
                });
            }
        }
    }
    rows
}

/// 把行写到任意输出流，label 用于错误信息
pub fn write_rows<W: Write>(out: W, rows: &[BandRow], label: &str) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush().map_err(|e| WavecarError::FileWriteError {
        path: label.to_string(),
        source: e,
    })?;
    Ok(())
}

/// 导出能带为 CSV 文件
pub fn to_csv(rows: &[BandRow], output_path: &Path) -> Result<()> {
    let path = output_path.display().to_string();
    let file = File::create(output_path).map_err(|e| WavecarError::FileWriteError {
        path: path.clone(),
        source: e,
    })?;
    write_rows(file, rows, &path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsers::Wavecar;
    use crate::testutil::WavecarBuilder;
    use std::io::Cursor;

    fn table() -> BandTable {
        let bytes = WavecarBuilder::cubic(5.0, 100.0)
            .spins(2)
            .bands(2)
            .kpoints(vec![[0.0; 3], [0.5, 0.0, 0.0]])
            .build();
        Wavecar::from_reader(Cursor::new(bytes), "memory")
            .unwrap()
            .bands()
            .clone()
    }

    #[test]
    fn test_rows_ordering() {
        let bands = table();
        let rows = band_rows(&bands, &[1, 2]);
        assert_eq!(rows.len(), 8);
        assert_eq!((rows[0].spin, rows[0].kpoint, rows[0].band), (1, 1, 1));
        assert_eq!((rows[1].spin, rows[1].kpoint, rows[1].band), (1, 1, 2));
        assert_eq!((rows[2].spin, rows[2].kpoint, rows[2].band), (1, 2, 1));
        assert_eq!(rows[4].spin, 2);
        assert_eq!(rows[0].kpath, 0.0);
        // |Δk| = 0.5 · 2π / 5 Å
        let expected = 0.5 * 2.0 * std::f64::consts::PI / 5.0;
        assert!((rows[2].kpath - expected).abs() < 1e-10);
        assert_eq!(rows[0].occupation, 1.0);
        assert_eq!(rows[1].occupation, 0.0);
    }

    #[test]
    fn test_csv_output() {
        let bands = table();
        let rows = band_rows(&bands, &[2]);
        let mut buf = Vec::new();
        write_rows(&mut buf, &rows, "memory").unwrap();
        let text = String::from_utf8(buf).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("spin,kpoint,kpath,band,energy,occupation")
        );
        assert_eq!(lines.count(), 4);
        assert!(text.contains("\n2,1,0.0,1,"));
    }

    #[test]
    fn test_to_csv_file() {
        let path = std::env::temp_dir().join(format!("wavecar_bands_{}.csv", std::process::id()));
        let rows = band_rows(&table(), &[1]);
        to_csv(&rows, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1 + rows.len());
        assert!(text.starts_with("spin,kpoint,kpath,band,energy,occupation\n1,1,0.0,1,"));
        std::fs::remove_file(&path).ok();

        let missing = std::env::temp_dir().join("wavecar_no_such_dir").join("bands.csv");
        assert!(matches!(
            to_csv(&rows, &missing),
            Err(WavecarError::FileWriteError { .. })
        ));
    }
}
