//! 测试用的 WAVECAR 构造器，生成满足记录布局的内存字节流

use crate::models::{FileHeader, Lattice, Precision, StateIndex};
use crate::wfc::gvector::{enumerate, Miller};

use num_complex::Complex64;

pub struct WavecarBuilder {
    lattice: Lattice,
    encut: f64,
    nspin: usize,
    nbands: usize,
    kvecs: Vec<[f64; 3]>,
    precision: Precision,
    gamma_half: bool,
    energy: fn(StateIndex) -> f64,
    coefficient: fn(StateIndex, Miller) -> Complex64,
}

impl WavecarBuilder {
    /// 立方晶胞，单自旋，单 k 点 (Γ)，单能带
    pub fn cubic(a: f64, encut: f64) -> Self {
        WavecarBuilder {
            lattice: Lattice::from_vectors([[a, 0.0, 0.0], [0.0, a, 0.0], [0.0, 0.0, a]]),
            encut,
            nspin: 1,
            nbands: 1,
            kvecs: vec![[0.0; 3]],
            precision: Precision::SingleComplex,
            gamma_half: false,
            energy: Self::default_energy,
            coefficient: Self::default_coefficient,
        }
    }

    pub fn spins(mut self, nspin: usize) -> Self {
        self.nspin = nspin;
        self
    }

    pub fn bands(mut self, nbands: usize) -> Self {
        self.nbands = nbands;
        self
    }

    pub fn kpoints(mut self, kvecs: Vec<[f64; 3]>) -> Self {
        self.kvecs = kvecs;
        self
    }

    pub fn precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    pub fn gamma_half(mut self, gamma_half: bool) -> Self {
        self.gamma_half = gamma_half;
        self
    }

    pub fn energies(mut self, energy: fn(StateIndex) -> f64) -> Self {
        self.energy = energy;
        self
    }

    pub fn coefficients(mut self, coefficient: fn(StateIndex, Miller) -> Complex64) -> Self {
        self.coefficient = coefficient;
        self
    }

    /// 各态能量互不相同
    pub fn default_energy(state: StateIndex) -> f64 {
        -5.0 + state.band as f64 + 0.1 * state.kpoint as f64 + 0.05 * state.spin as f64
    }

    /// G = 0 处为实数，其余为随 G 变化的复数
    pub fn default_coefficient(state: StateIndex, g: Miller) -> Complex64 {
        let seed = (state.spin + 3 * state.kpoint + 7 * state.band) as f64;
        if g == [0, 0, 0] {
            return Complex64::new(0.5 + 0.1 * seed, 0.0);
        }
        let s = (g[0] + 3 * g[1] + 5 * g[2]) as f64;
        Complex64::new((0.3 * s + seed).cos(), (0.7 * s - seed).sin()) * 0.2
    }

    pub fn build(&self) -> Vec<u8> {
        let nkpts = self.kvecs.len();
        let header = FileHeader::new(
            8,
            self.nspin,
            self.precision,
            nkpts,
            self.nbands,
            self.encut,
            self.lattice,
        )
        .unwrap();

        let gvecs: Vec<Vec<Miller>> = self
            .kvecs
            .iter()
            .map(|k| enumerate(&header, *k, self.gamma_half))
            .collect();

        let max_nplw = gvecs.iter().map(Vec::len).max().unwrap_or(0);
        let recl = [
            12 * 8,
            (4 + 3 * self.nbands) * 8,
            max_nplw * self.precision.coefficient_size(),
        ]
        .into_iter()
        .max()
        .unwrap();

        let mut bytes = Vec::new();
        let mut record = |values: Vec<u8>| {
            assert!(values.len() <= recl);
            bytes.extend_from_slice(&values);
            bytes.resize(bytes.len() + recl - values.len(), 0);
        };
        let f64s = |values: &[f64]| -> Vec<u8> {
            values.iter().flat_map(|v| v.to_le_bytes()).collect()
        };

        record(f64s(&[
            recl as f64,
            self.nspin as f64,
            self.precision.tag() as f64,
        ]));
        let mut rec2 = vec![nkpts as f64, self.nbands as f64, self.encut];
        rec2.extend(self.lattice.matrix.iter().flatten());
        record(f64s(&rec2));

        for spin in 1..=self.nspin {
            for (ik, kvec) in self.kvecs.iter().enumerate() {
                let kpoint = ik + 1;
                let mut band_rec = vec![gvecs[ik].len() as f64, kvec[0], kvec[1], kvec[2]];
                for band in 1..=self.nbands {
                    let state = StateIndex::new(spin, kpoint, band);
                    let occ = if band == 1 { 1.0 } else { 0.0 };
                    band_rec.extend([(self.energy)(state), 0.0, occ]);
                }
                record(f64s(&band_rec));

                for band in 1..=self.nbands {
                    let state = StateIndex::new(spin, kpoint, band);
                    let mut coeffs = Vec::new();
                    for g in &gvecs[ik] {
                        let c = (self.coefficient)(state, *g);
                        match self.precision {
                            Precision::SingleComplex => {
                                coeffs.extend((c.re as f32).to_le_bytes());
                                coeffs.extend((c.im as f32).to_le_bytes());
                            }
                            Precision::DoubleComplex => {
                                coeffs.extend(c.re.to_le_bytes());
                                coeffs.extend(c.im.to_le_bytes());
                            }
                        }
                    }
                    record(coeffs);
                }
            }
        }

        bytes
    }
}
