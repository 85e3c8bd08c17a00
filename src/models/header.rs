//! # WAVECAR 文件头数据模型
//!
//! 前两条记录的解码结果以及由其导出的量（倒格子、体积、最小 FFT 网格）。
//!
//! ## 记录布局
//! ```text
//! rec1: recl, nspin, rtag
//! rec2: nkpts, nbands, encut, ((cell(i,j) j=1,3), i=1,3)
//! ```
//!
//! ## 依赖关系
//! - 被 `parsers/wavecar.rs`, `wfc/` 使用
//! - 使用 `models/lattice.rs`, `constants.rs`

use crate::constants::{AUTOA, RYTOEV, TPI};
use crate::error::{Result, WavecarError};
use crate::models::lattice::{Lattice, Matrix3};
use crate::models::state::{IndexKind, StateIndex};

/// 平面波系数的存储精度
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precision {
    /// TAG = 45200: complex(qs)，每个分量 4 字节
    SingleComplex,
    /// TAG = 45210: complex(q)，每个分量 8 字节
    DoubleComplex,
}

impl Precision {
    /// 由精度标签选择解码方式
    pub fn from_tag(tag: i64) -> Result<Self> {
        match tag {
            45200 => Ok(Precision::SingleComplex),
            45210 => Ok(Precision::DoubleComplex),
            53300 => Err(WavecarError::UnsupportedVariant {
                tag,
                description: "VASP5 WAVECAR format",
            }),
            53310 => Err(WavecarError::UnsupportedVariant {
                tag,
                description: "VASP5 WAVECAR format with double precision coefficients",
            }),
            _ => Err(WavecarError::InvalidPrecisionTag(tag)),
        }
    }

    pub fn tag(&self) -> i64 {
        match self {
            Precision::SingleComplex => 45200,
            Precision::DoubleComplex => 45210,
        }
    }

    /// 每个复数系数占用的字节数
    pub fn coefficient_size(&self) -> usize {
        match self {
            Precision::SingleComplex => 8,
            Precision::DoubleComplex => 16,
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precision::SingleComplex => write!(f, "single complex ({})", self.tag()),
            Precision::DoubleComplex => write!(f, "double complex ({})", self.tag()),
        }
    }
}

/// WAVECAR 文件头
#[derive(Debug, Clone)]
pub struct FileHeader {
    /// 记录长度（字节）
    pub record_length: usize,
    /// 自旋数 (1 或 2)
    pub nspin: usize,
    /// 系数精度
    pub precision: Precision,
    /// k 点数
    pub nkpts: usize,
    /// 能带数
    pub nbands: usize,
    /// 截断能 (eV)
    pub encut: f64,
    /// 实空间晶格 (Å)
    pub lattice: Lattice,
    /// 倒格子 (A^-1)^T，不含 2π
    pub reciprocal: Matrix3,
    /// 晶胞体积 (Å³)
    pub volume: f64,
    /// 最小 FFT 网格
    pub ngrid: [usize; 3],
}

impl FileHeader {
    /// 由已解码的字段创建文件头，并计算导出量
    pub fn new(
        record_length: usize,
        nspin: usize,
        precision: Precision,
        nkpts: usize,
        nbands: usize,
        encut: f64,
        lattice: Lattice,
    ) -> Result<Self> {
        if record_length == 0 {
            return Err(WavecarError::InvalidHeader(
                "record length must be positive".to_string(),
            ));
        }
        if nspin != 1 && nspin != 2 {
            return Err(WavecarError::InvalidHeader(format!(
                "spin count must be 1 or 2, got {}",
                nspin
            )));
        }
        if nkpts == 0 || nbands == 0 {
            return Err(WavecarError::InvalidHeader(format!(
                "empty wavefunction: {} k-points, {} bands",
                nkpts, nbands
            )));
        }
        if !(encut > 0.0) {
            return Err(WavecarError::InvalidHeader(format!(
                "energy cutoff must be positive, got {}",
                encut
            )));
        }

        let volume = lattice.volume();
        if volume.abs() < 1e-10 {
            return Err(WavecarError::InvalidHeader(
                "singular lattice matrix".to_string(),
            ));
        }
        let ngrid = minimum_grid(encut, &lattice).ok_or_else(|| {
            WavecarError::InvalidHeader(format!(
                "energy cutoff {} eV gives an FFT grid too large to allocate",
                encut
            ))
        })?;

        Ok(FileHeader {
            record_length,
            nspin,
            precision,
            nkpts,
            nbands,
            encut,
            reciprocal: lattice.reciprocal(),
            volume,
            ngrid,
            lattice,
        })
    }

    /// 第一条记录: recl, nspin, rtag
    ///
    /// 精度标签在此处检查，读取第二条记录前即可失败。
    pub fn decode_first_record(rec: &[f64]) -> Result<(usize, usize, Precision)> {
        if rec.len() < 3 {
            return Err(WavecarError::InvalidHeader(
                "first record holds fewer than 3 values".to_string(),
            ));
        }
        let record_length = to_count(rec[0], "record length")?;
        let nspin = to_count(rec[1], "spin count")?;
        let precision = Precision::from_tag(rec[2] as i64)?;
        Ok((record_length, nspin, precision))
    }

    /// 由两条记录的原始数值解码
    pub fn from_records(rec1: &[f64], rec2: &[f64]) -> Result<Self> {
        let (record_length, nspin, precision) = Self::decode_first_record(rec1)?;

        if rec2.len() < 12 {
            return Err(WavecarError::InvalidHeader(
                "second record holds fewer than 12 values".to_string(),
            ));
        }
        let nkpts = to_count(rec2[0], "k-point count")?;
        let nbands = to_count(rec2[1], "band count")?;
        let encut = rec2[2];
        let lattice = Lattice::from_row_major(&rec2[3..12]).ok_or_else(|| {
            WavecarError::InvalidHeader("lattice needs 9 values".to_string())
        })?;

        Self::new(record_length, nspin, precision, nkpts, nbands, encut, lattice)
    }

    /// 检查记录布局是否自洽
    ///
    /// 前两条记录和每条能带记录都须放进一条 `recl` 字节的记录，
    /// 记录总数与文件总字节数不得溢出。
    pub fn check_layout(&self) -> Result<()> {
        let band_values = self
            .nbands
            .checked_mul(3)
            .and_then(|n| n.checked_add(4))
            .map(|n| n.max(12));
        let fits = band_values
            .and_then(|n| n.checked_mul(8))
            .map_or(false, |bytes| bytes <= self.record_length);
        if !fits {
            return Err(WavecarError::InvalidHeader(format!(
                "{} bands do not fit in a record of {} bytes",
                self.nbands, self.record_length
            )));
        }

        let total_bytes = self
            .nspin
            .checked_mul(self.nkpts)
            .and_then(|n| n.checked_mul(self.nbands + 1))
            .and_then(|n| n.checked_add(2))
            .and_then(|n| (n as u64).checked_mul(self.record_length as u64));
        if total_bytes.is_none() {
            return Err(WavecarError::InvalidHeader(format!(
                "{} spin(s) x {} k-points x {} bands overflow the file size",
                self.nspin, self.nkpts, self.nbands
            )));
        }
        Ok(())
    }

    /// 平面波系数须放进一条记录
    pub fn check_plane_waves(&self, nplw: usize, kpoint: usize) -> Result<()> {
        let fits = nplw
            .checked_mul(self.precision.coefficient_size())
            .map_or(false, |bytes| bytes <= self.record_length);
        if !fits {
            return Err(WavecarError::InvalidHeader(format!(
                "{} plane waves at k-point {} exceed the record length of {} bytes",
                nplw, kpoint, self.record_length
            )));
        }
        Ok(())
    }

    /// 网格总点数
    pub fn grid_points(&self) -> usize {
        self.ngrid.iter().product()
    }

    /// 检查 1-based 的 (spin, kpoint, band) 索引
    pub fn check_index(&self, state: StateIndex) -> Result<()> {
        check_range(IndexKind::Spin, state.spin, self.nspin)?;
        check_range(IndexKind::Kpoint, state.kpoint, self.nkpts)?;
        check_range(IndexKind::Band, state.band, self.nbands)
    }

    pub fn check_kpoint(&self, kpoint: usize) -> Result<()> {
        check_range(IndexKind::Kpoint, kpoint, self.nkpts)
    }
}

/// 复数网格可寻址的最大点数
const MAX_GRID_POINTS: f64 = (isize::MAX as usize / 16) as f64;

/// 最小 FFT 网格: 2 * floor(sqrt(ENCUT/RYTOEV) / (2π / (|a_i| / AUTOA))) + 1
///
/// 网格点数超出可寻址范围时返回 `None`。
pub fn minimum_grid(encut: f64, lattice: &Lattice) -> Option<[usize; 3]> {
    let kmax = (encut / RYTOEV).sqrt();
    let dims = lattice
        .lengths()
        .map(|len| 2.0 * (kmax / (TPI / (len / AUTOA))).floor() + 1.0);
    let points: f64 = dims.iter().product();
    if !points.is_finite() || points > MAX_GRID_POINTS {
        return None;
    }
    Some(dims.map(|n| n as usize))
}

fn check_range(kind: IndexKind, value: usize, max: usize) -> Result<()> {
    if value < 1 || value > max {
        return Err(WavecarError::IndexOutOfRange { kind, value, max });
    }
    Ok(())
}

/// 文件中的计数以浮点数存储
fn to_count(value: f64, what: &str) -> Result<usize> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(WavecarError::InvalidHeader(format!(
            "{} is not a non-negative integer: {}",
            what, value
        )));
    }
    Ok(value as usize)
}
