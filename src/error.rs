//! # 统一错误处理模块
//!
//! 定义 WAVECAR 读取与波函数分析的所有错误类型，使用 `thiserror` 派生。
//!
//! ## 依赖关系
//! - 被所有其他模块使用
//! - 依赖 `models/state.rs` 的 `IndexKind`

use crate::models::IndexKind;
use thiserror::Error;

/// WAVECAR 统一错误类型
#[derive(Error, Debug)]
pub enum WavecarError {
    // ─────────────────────────────────────────────────────────────
    // I/O 错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to read file: {path}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file: {path}")]
    FileWriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ─────────────────────────────────────────────────────────────
    // 格式错误
    // ─────────────────────────────────────────────────────────────
    #[error("Failed to parse {format} file: {path}\nReason: {reason}")]
    ParseError {
        format: String,
        path: String,
        reason: String,
    },

    #[error("Invalid WAVECAR header: {0}")]
    InvalidHeader(String),

    #[error("Unsupported format variant (tag {tag}): {description}")]
    UnsupportedVariant { tag: i64, description: &'static str },

    #[error("Invalid precision tag: {0}")]
    InvalidPrecisionTag(i64),

    // ─────────────────────────────────────────────────────────────
    // 一致性错误
    // ─────────────────────────────────────────────────────────────
    #[error(
        "No. of planewaves not consistent for k-point {kpoint}: generated {generated}, stored {stored} (grid points {grid_points})"
    )]
    PlaneWaveCountMismatch {
        kpoint: usize,
        generated: usize,
        stored: usize,
        grid_points: usize,
    },

    #[error("FFT grid {requested:?} is smaller than the minimum grid {minimum:?}")]
    InsufficientGrid {
        requested: [usize; 3],
        minimum: [usize; 3],
    },

    // ─────────────────────────────────────────────────────────────
    // 索引错误
    // ─────────────────────────────────────────────────────────────
    #[error("Index out of range: {kind} index {value} not in 1..={max}")]
    IndexOutOfRange {
        kind: IndexKind,
        value: usize,
        max: usize,
    },

    #[error("k-point of the two states differ: {first} vs {second}")]
    KpointMismatch { first: usize, second: usize },

    // ─────────────────────────────────────────────────────────────
    // 数值错误
    // ─────────────────────────────────────────────────────────────
    #[error("Degenerate states: both states have energy {energy} eV, transition dipole is undefined")]
    DegenerateStates { energy: f64 },

    // ─────────────────────────────────────────────────────────────
    // 参数错误
    // ─────────────────────────────────────────────────────────────
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid range format: {0}")]
    InvalidRange(String),

    // ─────────────────────────────────────────────────────────────
    // CSV 错误
    // ─────────────────────────────────────────────────────────────
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    // ─────────────────────────────────────────────────────────────
    // 其他
    // ─────────────────────────────────────────────────────────────
    #[error("{0}")]
    Other(String),
}

/// Result 类型别名
pub type Result<T> = std::result::Result<T, WavecarError>;
