//! Reading and writing voxel grids in the [binvox](https://www.patrickmin.com/binvox/binvox.html)
//! format.
//!
//! A binvox file is made of an ASCII header followed by run-length encoded occupancy values:
//!
//! ```text
//! #binvox 1
//! dim 32 32 32
//! translate -0.015625 -0.015625 -0.015625
//! scale 0.033333333333333333
//! data
//! <(value, count) byte pairs>
//! ```
//!
//! Each pair holds a value (`0` or `1`) and the number (`1..=255`) of consecutive voxels sharing
//! it. Voxels are visited with `x` as the outer loop, then `z`, then `y`.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::math::{Point, Real};
use crate::shape::{VoxelGrid, VoxelGridError};

/// The longest run a single `(value, count)` pair can encode.
pub const MAX_RUN_LENGTH: u8 = u8::MAX;

/// Errors raised while reading or writing binvox data.
#[derive(thiserror::Error, Debug)]
pub enum BinvoxError {
    /// An I/O operation failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The header contains an unexpected line.
    #[error("invalid binvox header line: {0:?}")]
    InvalidHeader(String),
    /// The header reached `data` without a `dim` line.
    #[error("the binvox header does not declare the grid dimensions.")]
    MissingDimensions,
    /// The grid is not cubic, which the binvox traversal order requires.
    #[error("binvox grids must be cubic, got the dimensions {dims:?}.")]
    NonCubicGrid {
        /// The grid dimensions.
        dims: [u32; 3],
    },
    /// A run holds a value other than `0` or `1`.
    #[error("invalid binvox run value {0}, expected 0 or 1.")]
    InvalidRunValue(u8),
    /// The payload ended before every voxel was assigned.
    #[error("truncated binvox payload: {found} of {expected} voxels decoded.")]
    TruncatedPayload {
        /// The number of voxels of the grid.
        expected: usize,
        /// The number of voxels decoded before the end of the payload.
        found: usize,
    },
    /// The payload encodes more voxels than the grid holds.
    #[error("the binvox payload encodes more than the {expected} voxels of the grid.")]
    PayloadOverflow {
        /// The number of voxels of the grid.
        expected: usize,
    },
    /// The grid declared by the header could not be allocated.
    #[error(transparent)]
    Grid(#[from] VoxelGridError),
}

/// The voxels of a cubic grid, in binvox order.
fn traversal(dims: [u32; 3]) -> impl Iterator<Item = [u32; 3]> {
    let [dim_x, dim_y, dim_z] = dims;
    (0..dim_x).flat_map(move |x| {
        (0..dim_y).flat_map(move |z| (0..dim_z).map(move |y| [x, y, z]))
    })
}

fn check_cubic(dims: [u32; 3]) -> Result<(), BinvoxError> {
    if dims[0] == dims[1] && dims[1] == dims[2] {
        Ok(())
    } else {
        Err(BinvoxError::NonCubicGrid { dims })
    }
}

struct RunLengthEncoder {
    run: Option<(bool, u8)>,
    bytes: Vec<u8>,
}

impl RunLengthEncoder {
    fn new() -> Self {
        Self {
            run: None,
            bytes: Vec::new(),
        }
    }

    fn push(&mut self, value: bool) {
        match &mut self.run {
            Some((curr, count)) if *curr == value && *count < MAX_RUN_LENGTH => *count += 1,
            _ => {
                self.flush();
                self.run = Some((value, 1));
            }
        }
    }

    fn flush(&mut self) {
        if let Some((value, count)) = self.run.take() {
            self.bytes.push(value as u8);
            self.bytes.push(count);
        }
    }

    fn finish(mut self) -> Vec<u8> {
        self.flush();
        self.bytes
    }
}

/// Writes `grid` in the binvox format.
///
/// A grid with zero voxels produces the header alone.
pub fn write_binvox<W: Write>(grid: &VoxelGrid, out: &mut W) -> Result<(), BinvoxError> {
    let dims = grid.dims();
    check_cubic(dims)?;

    let origin = grid.origin();
    writeln!(out, "#binvox 1")?;
    writeln!(out, "dim {} {} {}", dims[0], dims[1], dims[2])?;
    writeln!(out, "translate {} {} {}", origin.x, origin.y, origin.z)?;
    writeln!(out, "scale {}", grid.spacing())?;
    writeln!(out, "data")?;

    let mut encoder = RunLengthEncoder::new();

    for [x, y, z] in traversal(dims) {
        encoder.push(grid.is_inside(x, y, z));
    }

    out.write_all(&encoder.finish())?;
    Ok(())
}

/// Saves `grid` to a binvox file at `path`, replacing any existing file.
pub fn save_binvox(grid: &VoxelGrid, path: impl AsRef<Path>) -> Result<(), BinvoxError> {
    let mut out = BufWriter::new(File::create(path.as_ref())?);
    write_binvox(grid, &mut out)?;
    out.flush()?;
    log::info!(
        "Saved {} voxels ({} inside) to {}.",
        grid.len(),
        grid.num_inside(),
        path.as_ref().display()
    );
    Ok(())
}

/// Reads a voxel grid in the binvox format.
///
/// The `translate` and `scale` header lines are optional and default to the origin and `1`.
pub fn read_binvox<R: BufRead>(input: &mut R) -> Result<VoxelGrid, BinvoxError> {
    let mut line = String::new();
    let _ = input.read_line(&mut line)?;

    if !line.trim_end().starts_with("#binvox") {
        return Err(BinvoxError::InvalidHeader(line.trim_end().to_string()));
    }

    let mut dims = None;
    let mut origin = Point::origin();
    let mut spacing: Real = 1.0;

    loop {
        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(BinvoxError::InvalidHeader(String::new()));
        }

        let header_line = line.trim_end();
        let mut words = header_line.split_whitespace();
        let invalid = || BinvoxError::InvalidHeader(header_line.to_string());

        match words.next() {
            Some("dim") => dims = Some(parse_triple::<u32>(&mut words).ok_or_else(invalid)?),
            Some("translate") => {
                origin = Point::from(parse_triple::<Real>(&mut words).ok_or_else(invalid)?)
            }
            Some("scale") => {
                spacing = words
                    .next()
                    .and_then(|w| w.parse().ok())
                    .ok_or_else(invalid)?
            }
            Some("data") => break,
            _ => return Err(invalid()),
        }
    }

    let dims = dims.ok_or(BinvoxError::MissingDimensions)?;
    check_cubic(dims)?;

    let mut grid = VoxelGrid::new(origin, dims[0], dims[1], dims[2], spacing)?;
    let mut payload = Vec::new();
    let _ = input.read_to_end(&mut payload)?;

    let expected = grid.len();
    let mut voxels = traversal(dims);
    let mut found = 0;

    for pair in payload.chunks(2) {
        let &[value, count] = pair else {
            return Err(BinvoxError::TruncatedPayload { expected, found });
        };

        let value = match value {
            0 => false,
            1 => true,
            _ => return Err(BinvoxError::InvalidRunValue(value)),
        };

        for _ in 0..count {
            let [x, y, z] = voxels
                .next()
                .ok_or(BinvoxError::PayloadOverflow { expected })?;
            *grid.is_inside_mut(x, y, z) = value;
            found += 1;
        }
    }

    if found != expected {
        return Err(BinvoxError::TruncatedPayload { expected, found });
    }

    Ok(grid)
}

/// Loads a voxel grid from a binvox file.
pub fn load_binvox(path: impl AsRef<Path>) -> Result<VoxelGrid, BinvoxError> {
    let mut input = BufReader::new(File::open(path)?);
    read_binvox(&mut input)
}

fn parse_triple<'a, T: core::str::FromStr>(
    words: &mut impl Iterator<Item = &'a str>,
) -> Option<[T; 3]> {
    let x = words.next()?.parse().ok()?;
    let y = words.next()?.parse().ok()?;
    let z = words.next()?.parse().ok()?;
    Some([x, y, z])
}

#[cfg(test)]
mod test {
    use super::{read_binvox, write_binvox, BinvoxError};
    use crate::math::Point;
    use crate::shape::VoxelGrid;

    fn encode(grid: &VoxelGrid) -> Vec<u8> {
        let mut bytes = Vec::new();
        write_binvox(grid, &mut bytes).unwrap();
        bytes
    }

    fn decode(bytes: &[u8]) -> Result<VoxelGrid, BinvoxError> {
        read_binvox(&mut &bytes[..])
    }

    const HEADER: &[u8] = b"#binvox 1\ndim 2 2 2\ntranslate 0.5 -1 2\nscale 0.25\ndata\n";

    #[test]
    fn binvox_header_bytes() {
        let grid = VoxelGrid::new(Point::new(0.5, -1.0, 2.0), 2, 2, 2, 0.25).unwrap();
        let bytes = encode(&grid);
        assert_eq!(&bytes[..HEADER.len()], HEADER);
        assert_eq!(&bytes[HEADER.len()..], &[0, 8]);
    }

    #[test]
    fn binvox_empty_grid_writes_header_only() {
        let grid = VoxelGrid::new(Point::origin(), 0, 0, 0, 1.0).unwrap();
        assert_eq!(
            encode(&grid),
            b"#binvox 1\ndim 0 0 0\ntranslate 0 0 0\nscale 1\ndata\n"
        );
    }

    #[test]
    fn binvox_splits_long_runs() {
        // 7^3 = 343 = 255 + 88.
        let grid = VoxelGrid::new(Point::origin(), 7, 7, 7, 1.0).unwrap();
        let bytes = encode(&grid);
        assert!(bytes.ends_with(b"data\n\x00\xff\x00\x58"));
    }

    #[test]
    fn binvox_traversal_order() {
        let mut grid = VoxelGrid::new(Point::origin(), 2, 2, 2, 1.0).unwrap();
        // Visited second: x = 0, z = 0, y = 1.
        *grid.is_inside_mut(0, 1, 0) = true;
        assert!(encode(&grid).ends_with(b"data\n\x00\x01\x01\x01\x00\x06"));
    }

    #[test]
    fn binvox_round_trip() {
        let mut grid = VoxelGrid::new(Point::new(-0.1, 0.2, 0.3), 9, 9, 9, 0.125).unwrap();
        for (x, y, z) in [(0, 0, 0), (8, 8, 8), (3, 4, 5), (3, 5, 4), (7, 0, 2)] {
            *grid.is_inside_mut(x, y, z) = true;
        }

        let bytes = encode(&grid);
        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded, grid);
    }

    #[test]
    fn binvox_rejects_non_cubic_grids() {
        let grid = VoxelGrid::new(Point::origin(), 2, 2, 3, 1.0).unwrap();
        let mut bytes = Vec::new();
        assert!(matches!(
            write_binvox(&grid, &mut bytes),
            Err(BinvoxError::NonCubicGrid { dims: [2, 2, 3] })
        ));
    }

    #[test]
    fn binvox_decoding_errors() {
        assert!(matches!(
            decode(b"#notbinvox\n"),
            Err(BinvoxError::InvalidHeader(_))
        ));
        assert!(matches!(
            decode(b"#binvox 1\nscale 1\ndata\n"),
            Err(BinvoxError::MissingDimensions)
        ));
        assert!(matches!(
            decode(b"#binvox 1\ndim 2 2 2\ndata\n\x02\x08"),
            Err(BinvoxError::InvalidRunValue(2))
        ));
        assert!(matches!(
            decode(b"#binvox 1\ndim 2 2 2\ndata\n\x01\x05"),
            Err(BinvoxError::TruncatedPayload {
                expected: 8,
                found: 5
            })
        ));
        assert!(matches!(
            decode(b"#binvox 1\ndim 2 2 2\ndata\n\x01\x05\x00\x04"),
            Err(BinvoxError::PayloadOverflow { expected: 8 })
        ));
        assert!(matches!(
            decode(b"#binvox 1\ndim 2 2 2\ndata\n\x01\x08\x00"),
            Err(BinvoxError::TruncatedPayload {
                expected: 8,
                found: 8
            })
        ));
    }

    #[test]
    fn binvox_header_defaults() {
        let grid = decode(b"#binvox 1\ndim 1 1 1\ndata\n\x01\x01").unwrap();
        assert_eq!(grid.origin(), Point::origin());
        assert_eq!(grid.spacing(), 1.0);
        assert!(grid.is_inside(0, 0, 0));
    }
}
