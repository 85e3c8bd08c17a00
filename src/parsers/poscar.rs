//! # VASP POSCAR 头部读取
//!
//! 写 VESTA 格式的体数据时需要把结构块原样放在网格数据之前，
//! 这里只读取结构块，并解析出晶格用于和 WAVECAR 的晶格比对。
//!
//! ## POSCAR 格式说明
//! ```text
//! Comment line (structure name)
//! 1.0                    # scaling factor
//! a1 a2 a3               # lattice vector a
//! b1 b2 b3               # lattice vector b
//! c1 c2 c3               # lattice vector c
//! Element1 Element2 ...  # element symbols (VASP 5+)
//! n1 n2 ...              # number of atoms per element
//! Selective dynamics     # optional
//! Direct/Cartesian       # coordinate type
//! x1 y1 z1               # atom positions
//! ...
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/wfc.rs` 使用
//! - 使用 `models/lattice.rs`

use crate::error::{Result, WavecarError};
use crate::models::Lattice;
use std::fs;
use std::path::Path;

/// 读取 POSCAR 文件的结构块
pub fn read_poscar_header(path: &Path) -> Result<String> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            WavecarError::FileNotFound {
                path: path.display().to_string(),
            }
        } else {
            WavecarError::FileReadError {
                path: path.display().to_string(),
                source: e,
            }
        }
    })?;

    let header = parse_poscar_header(&content);
    if header.trim().is_empty() {
        return Err(WavecarError::ParseError {
            format: "poscar".to_string(),
            path: path.display().to_string(),
            reason: "empty structure block".to_string(),
        });
    }
    Ok(header)
}

/// 结构块: 第一个空行之前的所有行，每行以换行结束
pub fn parse_poscar_header(content: &str) -> String {
    let mut header = String::new();
    for line in content.lines() {
        if line.trim().is_empty() {
            break;
        }
        header.push_str(line.trim_end());
        header.push('\n');
    }
    header
}

/// 从结构块解析晶格（Å）
///
/// 缩放因子为负时表示目标体积。
pub fn parse_poscar_lattice(content: &str) -> Result<Lattice> {
    let lines: Vec<&str> = content.lines().collect();
    let parse_err = |reason: String| WavecarError::ParseError {
        format: "poscar".to_string(),
        path: lines.first().map(|l| l.trim()).unwrap_or("").to_string(),
        reason,
    };

    if lines.len() < 5 {
        return Err(parse_err("File too short".to_string()));
    }

    let scale: f64 = lines[1]
        .split_whitespace()
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| parse_err(format!("Invalid scaling factor: {}", lines[1].trim())))?;

    let mut matrix = [[0.0; 3]; 3];
    for (i, row) in matrix.iter_mut().enumerate() {
        let parts: Vec<f64> = lines[2 + i]
            .split_whitespace()
            .take(3)
            .filter_map(|s| s.parse().ok())
            .collect();
        if parts.len() < 3 {
            return Err(parse_err(format!("Invalid lattice vector at line {}", 3 + i)));
        }
        *row = [parts[0], parts[1], parts[2]];
    }

    let raw = Lattice::from_vectors(matrix);
    let factor = if scale < 0.0 {
        let volume = raw.volume().abs();
        if volume < 1e-10 {
            return Err(parse_err("singular lattice matrix".to_string()));
        }
        (scale.abs() / volume).cbrt()
    } else {
        scale
    };

    Ok(Lattice::from_vectors(
        matrix.map(|row| row.map(|v| v * factor)),
    ))
}
