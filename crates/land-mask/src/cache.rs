//! Binary on-disk cache for computed masks.
//!
//! The file layout is a 4-byte magic, a format version byte, the grid
//! resolution as a little-endian u32, then each row bit-packed into
//! `ceil(n / 8)` bytes. Storing the resolution in the header lets a reader
//! detect a mask written for a different grid instead of silently
//! misinterpreting the payload.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tempmap_common::GridSpec;

use crate::error::{MaskError, Result};
use crate::mask::{compute_mask_parallel, LandMask};
use crate::polygon::Polygon;

const MAGIC: &[u8; 4] = b"TMLM";
const FORMAT_VERSION: u8 = 1;
const HEADER_LEN: usize = 9;

/// Serialize a mask into the cache byte layout.
fn encode(mask: &LandMask) -> Vec<u8> {
    let n = mask.resolution();
    let row_bytes = n.div_ceil(8);
    let mut out = Vec::with_capacity(HEADER_LEN + n * row_bytes);
    out.extend_from_slice(MAGIC);
    out.push(FORMAT_VERSION);
    out.extend_from_slice(&(n as u32).to_le_bytes());
    for row in mask.cells().chunks(n) {
        let mut packed = vec![0u8; row_bytes];
        for (col, &cell) in row.iter().enumerate() {
            if cell {
                packed[col / 8] |= 1 << (col % 8);
            }
        }
        out.extend_from_slice(&packed);
    }
    out
}

fn decode(bytes: &[u8]) -> Result<LandMask> {
    if bytes.len() < HEADER_LEN {
        return Err(MaskError::format("file shorter than header"));
    }
    if &bytes[0..4] != MAGIC {
        return Err(MaskError::format("bad magic"));
    }
    if bytes[4] != FORMAT_VERSION {
        return Err(MaskError::format(format!(
            "unsupported format version {}",
            bytes[4]
        )));
    }
    let n = u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]) as usize;
    let row_bytes = n.div_ceil(8);
    let expected = HEADER_LEN + n * row_bytes;
    if bytes.len() != expected {
        return Err(MaskError::format(format!(
            "payload length {} does not match resolution {n}",
            bytes.len() - HEADER_LEN
        )));
    }

    let mut cells = Vec::with_capacity(n * n);
    for row in 0..n {
        let start = HEADER_LEN + row * row_bytes;
        let packed = &bytes[start..start + row_bytes];
        for col in 0..n {
            cells.push(packed[col / 8] & (1 << (col % 8)) != 0);
        }
    }
    Ok(LandMask::from_cells(n, cells))
}

/// Write a mask to `path` atomically (temp file in the same directory,
/// then rename), creating parent directories as needed.
pub fn store_mask(mask: &LandMask, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, encode(mask))?;
    fs::rename(&tmp, path)?;
    tracing::debug!(path = %path.display(), resolution = mask.resolution(), "stored mask cache");
    Ok(())
}

/// Load a mask from `path`, validating it against `grid`.
///
/// A missing file is a [`MaskError::CacheMiss`]; a file written for a
/// different resolution is a [`MaskError::DimensionMismatch`]. Other I/O
/// failures propagate as-is.
pub fn load_mask(path: &Path, grid: &GridSpec) -> Result<LandMask> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(MaskError::CacheMiss(path.to_path_buf()))
        }
        Err(e) => return Err(e.into()),
    };
    let mask = decode(&bytes)?;
    if mask.resolution() != grid.resolution() {
        return Err(MaskError::DimensionMismatch {
            expected: grid.resolution(),
            found: mask.resolution(),
        });
    }
    Ok(mask)
}

/// Cache-or-compute front end for the mask scan.
///
/// Counters expose how often the expensive scan actually ran, which is the
/// observable contract: repeated calls over an unchanged cache file must
/// compute at most once.
pub struct MaskCache {
    path: PathBuf,
    computations: AtomicU64,
    hits: AtomicU64,
}

impl MaskCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            computations: AtomicU64::new(0),
            hits: AtomicU64::new(0),
        }
    }

    /// The cache file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Times the polygon scan ran.
    pub fn computations(&self) -> u64 {
        self.computations.load(Ordering::Relaxed)
    }

    /// Times a stored mask was reused.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Return the cached mask for `grid`, computing and storing it on a
    /// miss. A stale or corrupt cache file is recomputed and overwritten;
    /// genuine I/O errors propagate.
    pub fn get(&self, polygons: &[Polygon], grid: &GridSpec) -> Result<LandMask> {
        match load_mask(&self.path, grid) {
            Ok(mask) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!(path = %self.path.display(), "mask cache hit");
                return Ok(mask);
            }
            Err(MaskError::CacheMiss(_)) => {
                tracing::info!(path = %self.path.display(), "mask cache miss, computing");
            }
            Err(MaskError::DimensionMismatch { expected, found }) => {
                tracing::warn!(expected, found, "stale mask cache, recomputing");
            }
            Err(MaskError::Format(msg)) => {
                tracing::warn!(%msg, "corrupt mask cache, recomputing");
            }
            Err(e) => return Err(e),
        }

        let mask = compute_mask_parallel(polygons, grid);
        self.computations.fetch_add(1, Ordering::Relaxed);
        store_mask(&mask, &self.path)?;
        Ok(mask)
    }
}

/// One-shot convenience over [`MaskCache`].
///
/// With no cache path the scan runs unconditionally and nothing is
/// persisted.
pub fn get_mask(
    polygons: &[Polygon],
    grid: &GridSpec,
    cache_path: Option<&Path>,
) -> Result<LandMask> {
    match cache_path {
        Some(path) => MaskCache::new(path).get(polygons, grid),
        None => Ok(compute_mask_parallel(polygons, grid)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempmap_common::BoundingBox;

    fn grid(resolution: usize) -> GridSpec {
        GridSpec::new(BoundingBox::new(0.0, 0.0, 3.0, 3.0), resolution).unwrap()
    }

    fn checkerboard(n: usize) -> LandMask {
        let cells = (0..n * n).map(|i| (i / n + i % n) % 2 == 0).collect();
        LandMask::from_cells(n, cells)
    }

    #[test]
    fn test_encode_decode_round_trip() {
        for n in [1, 4, 7, 8, 9, 33] {
            let mask = checkerboard(n);
            assert_eq!(decode(&encode(&mask)).unwrap(), mask);
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode(b"no"), Err(MaskError::Format(_))));
        assert!(matches!(
            decode(b"XXXX\x01\x04\x00\x00\x00"),
            Err(MaskError::Format(_))
        ));
        // right magic, truncated payload
        let mut bytes = encode(&checkerboard(8));
        bytes.pop();
        assert!(matches!(decode(&bytes), Err(MaskError::Format(_))));
    }

    #[test]
    fn test_load_missing_is_cache_miss() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.bin");
        assert!(matches!(
            load_mask(&path, &grid(4)),
            Err(MaskError::CacheMiss(_))
        ));
    }

    #[test]
    fn test_load_wrong_resolution_is_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.bin");
        store_mask(&checkerboard(8), &path).unwrap();
        assert!(matches!(
            load_mask(&path, &grid(4)),
            Err(MaskError::DimensionMismatch {
                expected: 4,
                found: 8
            })
        ));
    }

    #[test]
    fn test_get_mask_without_path_computes_and_persists_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let square =
            vec![crate::Polygon::new(vec![[0.5, 0.5], [2.5, 0.5], [2.5, 2.5], [0.5, 2.5]]).unwrap()];
        let g = grid(4);

        let uncached = get_mask(&square, &g, None).unwrap();
        assert_eq!(uncached, crate::compute_mask(&square, &g));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);

        // with a path the same call persists for the next run
        let path = dir.path().join("mask.bin");
        let cached = get_mask(&square, &g, Some(&path)).unwrap();
        assert_eq!(cached, uncached);
        assert!(path.exists());
    }

    #[test]
    fn test_store_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/deeper/mask.bin");
        store_mask(&checkerboard(4), &path).unwrap();
        assert!(path.exists());
    }
}
