//! # VESTA 体数据导出
//!
//! 以 CHGCAR 的文本布局写出实空间场的实部或虚部，可直接用 VESTA 打开。
//!
//! ## 文件格式
//! ```text
//! <POSCAR 结构块>
//!
//!    nx   ny   nz
//!  v(1,1,1) v(2,1,1) ...      # %16.8E，每行 10 个，x 最快，其次 y，最后 z
//! ```
//!
//! ## 依赖关系
//! - 被 `commands/wfc.rs` 调用
//! - 使用 `models/field.rs` 的 RealSpaceField

use crate::error::{Result, WavecarError};
use crate::models::RealSpaceField;

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// 写出的分量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Real,
    Imag,
}

impl Component {
    /// 输出文件后缀
    pub fn suffix(&self) -> &'static str {
        match self {
            Component::Real => "r",
            Component::Imag => "i",
        }
    }
}

/// Fortran 风格的 `%16.8E`: 尾数 8 位小数，指数至少两位且带符号
pub fn format_sci(value: f64) -> String {
    if !value.is_finite() {
        return format!("{:>16}", value.to_string().to_uppercase());
    }

    let raw = format!("{:.8E}", value);
    let (mantissa, exponent) = match raw.split_once('E') {
        Some(parts) => parts,
        None => return format!("{:>16}", raw),
    };
    let exp: i32 = exponent.parse().unwrap_or(0);
    let sign = if exp < 0 { '-' } else { '+' };

    format!("{:>16}", format!("{}E{}{:02}", mantissa, sign, exp.abs()))
}

/// 把场的一个分量写到任意输出流
pub fn write_grid<W: Write>(
    out: &mut W,
    header: &str,
    field: &RealSpaceField,
    component: Component,
) -> std::io::Result<()> {
    let [nx, ny, nz] = field.shape();

    out.write_all(header.as_bytes())?;
    write!(out, "\n{:5}{:5}{:5}\n", nx, ny, nz)?;

    let mut nwrite = 0usize;
    for k in 0..nz {
        for j in 0..ny {
            for i in 0..nx {
                let value = field.get(i, j, k);
                let v = match component {
                    Component::Real => value.re,
                    Component::Imag => value.im,
                };
                write!(out, "{} ", format_sci(v))?;
                nwrite += 1;
                if nwrite % 10 == 0 {
                    writeln!(out)?;
                }
            }
        }
    }
    if nwrite % 10 != 0 {
        writeln!(out)?;
    }

    Ok(())
}

/// 写出 `{prefix}_r.vasp`，非 gamma 时再写 `{prefix}_i.vasp`
///
/// 返回写出的文件路径。
pub fn save_vesta(
    field: &RealSpaceField,
    header: &str,
    prefix: &str,
    gamma_half: bool,
) -> Result<Vec<String>> {
    let components: &[Component] = if gamma_half {
        &[Component::Real]
    } else {
        &[Component::Real, Component::Imag]
    };

    let mut written = Vec::with_capacity(components.len());
    for &component in components {
        let path = format!("{}_{}.vasp", prefix, component.suffix());
        write_grid_file(Path::new(&path), header, field, component)?;
        written.push(path);
    }
    Ok(written)
}

fn write_grid_file(
    path: &Path,
    header: &str,
    field: &RealSpaceField,
    component: Component,
) -> Result<()> {
    let write_err = |e| WavecarError::FileWriteError {
        path: path.display().to_string(),
        source: e,
    };

    let file = File::create(path).map_err(write_err)?;
    let mut out = BufWriter::new(file);
    write_grid(&mut out, header, field, component).map_err(write_err)?;
    out.flush().map_err(write_err)?;
    Ok(())
}
