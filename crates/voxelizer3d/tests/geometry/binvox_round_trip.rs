use voxelizer3d::math::Point;
use voxelizer3d::shape::VoxelGrid;
use voxelizer3d::transformation::binvox::{load_binvox, read_binvox, save_binvox, write_binvox};

/// Decodes a binvox payload without going through the crate reader.
fn reference_decode(bytes: &[u8]) -> (Vec<&str>, Vec<bool>) {
    let marker = b"data\n";
    let data_start = bytes
        .windows(marker.len())
        .position(|w| w == marker)
        .expect("missing data line")
        + marker.len();

    let header = std::str::from_utf8(&bytes[..data_start])
        .unwrap()
        .lines()
        .collect();

    let mut values = Vec::new();
    for pair in bytes[data_start..].chunks(2) {
        assert_eq!(pair.len(), 2, "odd payload length");
        assert!(pair[0] <= 1, "invalid value {}", pair[0]);
        assert!(pair[1] >= 1, "empty run");
        values.extend(std::iter::repeat(pair[0] == 1).take(pair[1] as usize));
    }

    (header, values)
}

fn check_round_trip(grid: &VoxelGrid) {
    let mut bytes = Vec::new();
    write_binvox(grid, &mut bytes).unwrap();

    let (header, values) = reference_decode(&bytes);
    let n = grid.dim_x();
    assert_eq!(header[0], "#binvox 1");
    assert_eq!(header[1], format!("dim {n} {n} {n}"));
    assert_eq!(header[4], "data");
    assert_eq!(values.len(), grid.len());

    let mut values = values.into_iter();
    for x in 0..n {
        for z in 0..n {
            for y in 0..n {
                assert_eq!(values.next(), Some(grid.is_inside(x, y, z)), "voxel {x} {y} {z}");
            }
        }
    }

    let decoded = read_binvox(&mut &bytes[..]).unwrap();
    assert_eq!(&decoded, grid);
}

fn grid(n: u32) -> VoxelGrid {
    VoxelGrid::new(Point::new(-0.0625, -0.0625, -0.0625), n, n, n, 0.125).unwrap()
}

#[test]
fn binvox_all_outside() {
    let grid = grid(6);
    check_round_trip(&grid);

    let mut bytes = Vec::new();
    write_binvox(&grid, &mut bytes).unwrap();
    assert!(bytes.ends_with(b"data\n\x00\xd8"));
}

#[test]
fn binvox_all_inside() {
    let mut grid = grid(6);
    for k in 0..6 {
        for j in 0..6 {
            for i in 0..6 {
                *grid.is_inside_mut(i, j, k) = true;
            }
        }
    }
    assert_eq!(grid.num_inside(), 216);
    check_round_trip(&grid);
}

#[test]
fn binvox_single_corner_voxel() {
    for corner in [[0, 0, 0], [5, 5, 5], [5, 0, 0], [0, 5, 0], [0, 0, 5]] {
        let mut grid = grid(6);
        *grid.is_inside_mut(corner[0], corner[1], corner[2]) = true;
        check_round_trip(&grid);
    }
}

#[test]
fn binvox_runs_longer_than_255() {
    // 10^3 voxels with a single inside voxel in the middle: both surrounding runs are split.
    let mut grid = grid(10);
    *grid.is_inside_mut(5, 5, 5) = true;
    check_round_trip(&grid);

    let mut bytes = Vec::new();
    write_binvox(&grid, &mut bytes).unwrap();
    let (_, values) = reference_decode(&bytes);
    assert_eq!(values.iter().filter(|v| **v).count(), 1);

    let payload_len = bytes.len() - bytes.windows(5).position(|w| w == b"data\n").unwrap() - 5;
    // Position of the inside voxel: x = 5, z = 5, y = 5 => 5 * 100 + 5 * 10 + 5 = 555.
    // 555 = 255 + 255 + 45, then 1, then 444 = 255 + 189.
    assert_eq!(payload_len, 2 * 6);
}

#[test]
fn binvox_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("grid.binvox");

    let mut grid = grid(8);
    *grid.is_inside_mut(1, 2, 3) = true;
    *grid.is_inside_mut(7, 7, 7) = true;

    save_binvox(&grid, &path).unwrap();
    assert_eq!(load_binvox(&path).unwrap(), grid);
}
