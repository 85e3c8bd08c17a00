//! # WAVECAR 记录定位与解码
//!
//! 文件由定长记录组成，每条记录填充到 `recl` 字节。记录 0 和 1 为文件头，
//! 之后每个 (spin, kpoint) 块先是一条能带记录，再跟 `nbands` 条系数记录。
//!
//! ## 依赖关系
//! - 被 `parsers/wavecar.rs` 使用
//! - 使用 `models/header.rs`

use crate::models::{FileHeader, Precision, StateIndex};

use num_complex::Complex64;
use std::io::{self, Read, Seek, SeekFrom};

/// 态 (spin, kpoint, band) 的系数记录编号（从文件起始处计数，记录 0 为第一条）
///
/// 2 + (ispin-1)*nkpts*(nbands+1) + (ikpt-1)*(nbands+1) + iband
pub fn record_index(header: &FileHeader, state: StateIndex) -> usize {
    let block = header.nbands + 1;
    2 + (state.spin - 1) * header.nkpts * block + (state.kpoint - 1) * block + state.band
}

/// (spin, kpoint) 的能带记录编号，位于第一条系数记录之前
pub fn band_record_index(header: &FileHeader, spin: usize, kpoint: usize) -> usize {
    record_index(header, StateIndex::new(spin, kpoint, 1)) - 1
}

/// 记录的字节偏移
pub fn byte_offset(record: usize, record_length: usize) -> u64 {
    record as u64 * record_length as u64
}

/// 在 offset 处读取 count 个小端 f64
pub fn read_f64s<R: Read + Seek>(
    source: &mut R,
    offset: u64,
    count: usize,
) -> io::Result<Vec<f64>> {
    let bytes = read_bytes(source, offset, byte_len(count, 8)?)?;
    Ok(bytes
        .chunks_exact(8)
        .map(|c| f64::from_le_bytes([c[0], c[1], c[2], c[3], c[4], c[5], c[6], c[7]]))
        .collect())
}

/// 在 offset 处读取 count 个复数系数，并转换为双精度
pub fn read_complex<R: Read + Seek>(
    source: &mut R,
    offset: u64,
    count: usize,
    precision: Precision,
) -> io::Result<Vec<Complex64>> {
    let bytes = read_bytes(source, offset, byte_len(count, precision.coefficient_size())?)?;
    let coeffs = match precision {
        Precision::SingleComplex => bytes
            .chunks_exact(8)
            .map(|c| {
                let re = f32::from_le_bytes([c[0], c[1], c[2], c[3]]);
                let im = f32::from_le_bytes([c[4], c[5], c[6], c[7]]);
                Complex64::new(re as f64, im as f64)
            })
            .collect(),
        Precision::DoubleComplex => bytes
            .chunks_exact(16)
            .map(|c| {
                let mut re = [0u8; 8];
                let mut im = [0u8; 8];
                re.copy_from_slice(&c[..8]);
                im.copy_from_slice(&c[8..]);
                Complex64::new(f64::from_le_bytes(re), f64::from_le_bytes(im))
            })
            .collect(),
    };
    Ok(coeffs)
}

fn byte_len(count: usize, size: usize) -> io::Result<usize> {
    count.checked_mul(size).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} values of {} bytes overflow the read size", count, size),
        )
    })
}

/// 读取范围超出数据源末尾时不分配缓冲区
fn read_bytes<R: Read + Seek>(source: &mut R, offset: u64, len: usize) -> io::Result<Vec<u8>> {
    let end = source.seek(SeekFrom::End(0))?;
    if offset.checked_add(len as u64).map_or(true, |stop| stop > end) {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!(
                "{} bytes at offset {} run past the end of the data ({} bytes)",
                len, offset, end
            ),
        ));
    }
    source.seek(SeekFrom::Start(offset))?;
    let mut buf = vec![0u8; len];
    source.read_exact(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Lattice;
    use std::io::Cursor;

    fn header(nspin: usize, nkpts: usize, nbands: usize) -> FileHeader {
        FileHeader::new(
            256,
            nspin,
            Precision::SingleComplex,
            nkpts,
            nbands,
            100.0,
            Lattice::from_vectors([[5.0, 0.0, 0.0], [0.0, 5.0, 0.0], [0.0, 0.0, 5.0]]),
        )
        .unwrap()
    }

    #[test]
    fn test_record_index() {
        let h = header(2, 2, 3);
        assert_eq!(record_index(&h, StateIndex::new(1, 1, 1)), 3);
        assert_eq!(band_record_index(&h, 1, 1), 2);
        assert_eq!(record_index(&h, StateIndex::new(1, 2, 1)), 7);
        assert_eq!(band_record_index(&h, 2, 1), 10);
        assert_eq!(record_index(&h, StateIndex::new(2, 2, 3)), 17);
        assert_eq!(byte_offset(17, h.record_length), 17 * 256);
    }

    #[test]
    fn test_read_f64s() {
        let mut bytes = vec![0u8; 16];
        for v in [1.5f64, -2.25] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let mut cursor = Cursor::new(bytes);
        assert_eq!(read_f64s(&mut cursor, 16, 2).unwrap(), vec![1.5, -2.25]);
    }

    #[test]
    fn test_read_single_complex() {
        let mut bytes = Vec::new();
        for v in [1.0f32, 2.0, -0.5, 0.25] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let mut cursor = Cursor::new(bytes);
        let c = read_complex(&mut cursor, 0, 2, Precision::SingleComplex).unwrap();
        assert_eq!(c, vec![Complex64::new(1.0, 2.0), Complex64::new(-0.5, 0.25)]);
    }

    #[test]
    fn test_read_double_complex() {
        let mut bytes = Vec::new();
        for v in [0.1f64, -0.2] {
            bytes.extend_from_slice(&v.to_le_bytes());
        }
        let mut cursor = Cursor::new(bytes);
        let c = read_complex(&mut cursor, 0, 1, Precision::DoubleComplex).unwrap();
        assert_eq!(c, vec![Complex64::new(0.1, -0.2)]);
    }

    #[test]
    fn test_oversized_count_is_an_error() {
        let mut cursor = Cursor::new(vec![0u8; 64]);
        let err = read_f64s(&mut cursor, 0, usize::MAX / 4).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);

        let err = read_complex(&mut cursor, 8, 1_000_000, Precision::DoubleComplex).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_short_read_fails() {
        let mut cursor = Cursor::new(vec![0u8; 12]);
        let err = read_f64s(&mut cursor, 0, 2).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }
}
