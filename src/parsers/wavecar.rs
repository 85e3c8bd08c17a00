//! # VASP WAVECAR 读取器
//!
//! 持有文件句柄以及不可变的文件头和能带表。所有读操作都是先 seek 再 read，
//! 因此同一个读取器不能被多个线程同时使用；并行时每个线程各自打开文件。
//!
//! ## WAVECAR 格式说明
//! ```text
//! Record-length #spin components RTAG
//! #k-points #bands ENCUT
//! LatVec-A LatVec-B LatVec-C
//! Loop over spin
//!    Loop over k-points
//!       #plane waves, k vector
//!       Loop over bands
//!          band energy, band occupation
//!       End loop over bands
//!       Loop over bands
//!          Loop over plane waves
//!             Plane-wave coefficient
//!          End loop over plane waves
//!       End loop over bands
//!    End loop over k-points
//! End loop over spin
//! ```
//!
//! ## 依赖关系
//! - 被 CLI 命令和 `batch/` 使用
//! - 使用 `parsers/record.rs`, `models/`, `wfc/`

use crate::error::{Result, WavecarError};
use crate::models::{BandTable, FileHeader, RealSpaceField, StateIndex, TdmResult};
use crate::parsers::record;
use crate::wfc::gvector::{self, Miller};
use crate::wfc::realspace::{self, ReconstructOptions};
use crate::wfc::{tdm, RustFftTransform, SpectralTransform};

use num_complex::Complex64;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;
use std::sync::Arc;

/// WAVECAR 读取器
pub struct Wavecar<R = BufReader<File>> {
    source: R,
    path: String,
    header: FileHeader,
    bands: BandTable,
    gvector_cache: HashMap<(usize, bool), Arc<[Miller]>>,
}

impl Wavecar<BufReader<File>> {
    /// 打开 WAVECAR 文件并读取文件头和能带信息
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
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

        Self::from_reader(BufReader::new(file), path.display().to_string())
    }
}

impl<R: Read + Seek> Wavecar<R> {
    /// 从任意可 seek 的数据源读取；解析失败时数据源随之释放
    pub fn from_reader(mut source: R, path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let io_err = |e| WavecarError::FileReadError {
            path: path.clone(),
            source: e,
        };

        let rec1 = record::read_f64s(&mut source, 0, 3).map_err(io_err)?;
        let (record_length, _, _) = FileHeader::decode_first_record(&rec1)?;
        let rec2 = record::read_f64s(&mut source, record::byte_offset(1, record_length), 12)
            .map_err(io_err)?;
        let header = FileHeader::from_records(&rec1, &rec2)?;
        header.check_layout()?;

        let count = BandTable::record_len(header.nbands);
        let mut records = Vec::new();
        for spin in 1..=header.nspin {
            for kpoint in 1..=header.nkpts {
                let rec = record::band_record_index(&header, spin, kpoint);
                let offset = record::byte_offset(rec, header.record_length);
                records.push(record::read_f64s(&mut source, offset, count).map_err(io_err)?);
            }
        }
        let bands = BandTable::from_records(&header, &records)?;

        Ok(Wavecar {
            source,
            path,
            header,
            bands,
            gvector_cache: HashMap::new(),
        })
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    pub fn bands(&self) -> &BandTable {
        &self.bands
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// 态的系数记录编号
    pub fn record_index(&self, state: StateIndex) -> Result<usize> {
        self.header.check_index(state)?;
        Ok(record::record_index(&self.header, state))
    }

    /// k 点的 G 矢量，按 (kpoint, gamma) 缓存
    pub fn gvectors(&mut self, kpoint: usize, gamma_half: bool) -> Result<Arc<[Miller]>> {
        self.header.check_kpoint(kpoint)?;

        if let Some(cached) = self.gvector_cache.get(&(kpoint, gamma_half)) {
            return Ok(Arc::clone(cached));
        }

        let gvecs: Arc<[Miller]> =
            gvector::generate(&self.header, &self.bands, kpoint, gamma_half)?.into();
        self.gvector_cache.insert((kpoint, gamma_half), Arc::clone(&gvecs));
        Ok(gvecs)
    }

    /// 读取态的平面波系数，可选归一化
    pub fn read_coefficients(
        &mut self,
        state: StateIndex,
        normalize: bool,
    ) -> Result<Vec<Complex64>> {
        self.header.check_index(state)?;

        let rec = record::record_index(&self.header, state);
        let offset = record::byte_offset(rec, self.header.record_length);
        let nplw = self.bands.plane_wave_count(state.kpoint);

        let mut coeffs = record::read_complex(&mut self.source, offset, nplw, self.header.precision)
            .map_err(|e| WavecarError::FileReadError {
                path: self.path.clone(),
                source: e,
            })?;

        if normalize {
            let norm = coeffs.iter().map(|c| c.norm_sqr()).sum::<f64>().sqrt();
            if norm > 0.0 {
                for c in coeffs.iter_mut() {
                    *c /= norm;
                }
            }
        }

        Ok(coeffs)
    }

    /// 实空间赝波函数，使用默认的 rustfft 变换
    pub fn real_space(
        &mut self,
        state: StateIndex,
        options: &ReconstructOptions,
    ) -> Result<RealSpaceField> {
        let mut transform = RustFftTransform::new();
        self.real_space_with(state, options, &mut transform)
    }

    /// 实空间赝波函数，使用给定的 FFT 实现
    pub fn real_space_with<T: SpectralTransform + ?Sized>(
        &mut self,
        state: StateIndex,
        options: &ReconstructOptions,
        transform: &mut T,
    ) -> Result<RealSpaceField> {
        self.header.check_index(state)?;
        let grid = realspace::resolve_grid(self.header.ngrid, options.grid)?;

        let gvecs = self.gvectors(state.kpoint, options.gamma_half)?;
        let coeffs = self.read_coefficients(state, options.normalize)?;

        realspace::reconstruct(&coeffs, &gvecs, grid, options.gamma_half, transform)
    }

    /// 两个态之间的跃迁偶极矩
    pub fn transition_dipole(
        &mut self,
        state_a: StateIndex,
        state_b: StateIndex,
        normalize: bool,
        gamma_half: bool,
    ) -> Result<TdmResult> {
        self.header.check_index(state_a)?;
        self.header.check_index(state_b)?;
        if state_a.kpoint != state_b.kpoint {
            return Err(WavecarError::KpointMismatch {
                first: state_a.kpoint,
                second: state_b.kpoint,
            });
        }

        let gvecs = self.gvectors(state_a.kpoint, gamma_half)?;
        let gcart = gvector::to_cartesian(&gvecs, &self.header);
        let phi_a = self.read_coefficients(state_a, normalize)?;
        let phi_b = self.read_coefficients(state_b, normalize)?;

        tdm::transition_dipole(
            &phi_a,
            &phi_b,
            &gcart,
            self.bands.energy(state_a),
            self.bands.energy(state_b),
            gamma_half,
        )
    }
}
