mod common;

use bmp_edge::bitmap::{Pixel, PixelGrid};
use bmp_edge::error::BmpError;
use bmp_edge::filter::{COMPASS_KERNELS, ChannelSums, EdgeFilter};
use common::{is_border, random_grid};

/// 滤波前后边框像素逐位不变
#[test]
fn test_border_is_untouched() {
    let original = random_grid(17, 11);
    let mut filtered = original.clone();
    EdgeFilter::default().apply(&mut filtered);

    for y in 0..original.height() {
        for x in 0..original.width() {
            if is_border(&original, x, y) {
                assert_eq!(original.get(x, y), filtered.get(x, y), "border ({x}, {y})");
            }
        }
    }
}

/// 所有内部像素的每个通道都落在 [33, 255]
#[test]
fn test_interior_respects_floor() {
    let mut grid = random_grid(20, 20);
    EdgeFilter::default().apply(&mut grid);

    for y in 1..grid.height() - 1 {
        for x in 1..grid.width() - 1 {
            let p = grid.get(x, y).expect("interior pixel exists");
            for channel in [p.blue, p.red, p.green] {
                assert!(channel >= 33, "({x}, {y}) has channel {channel}");
            }
        }
    }
}

/// 对同一输入的两份独立拷贝滤波，结果完全相同
#[test]
fn test_filter_is_deterministic() {
    let original = random_grid(13, 9);
    let mut first = original.clone();
    let mut second = original.clone();

    let filter = EdgeFilter::default();
    filter.apply(&mut first);
    filter.apply(&mut second);

    assert_eq!(first, second);
}

/// 并行路径与单线程路径的结果逐位一致
#[test]
fn test_parallel_matches_sequential() {
    let original = random_grid(64, 37);
    let mut sequential = original.clone();
    let mut parallel = original.clone();

    let filter = EdgeFilter::default();
    filter.apply(&mut sequential);
    filter.apply_parallel(&mut parallel);

    assert_eq!(sequential, parallel);
}

/// 纯色图像的内部像素全部等于下限 33
#[test]
fn test_flat_field_is_suppressed_to_floor() {
    let mut grid = PixelGrid::filled(8, 6, Pixel::new(200, 17, 90));
    EdgeFilter::default().apply(&mut grid);

    for y in 1..5 {
        for x in 1..7 {
            assert_eq!(grid.get(x, y), Some(Pixel::new(33, 33, 33)));
        }
    }
    assert_eq!(grid.get(0, 0), Some(Pixel::new(200, 17, 90)));
}

/// 下限可调
#[test]
fn test_floor_is_tunable() {
    let mut grid = PixelGrid::filled(4, 4, Pixel::new(9, 9, 9));
    let filter = EdgeFilter::with_floor(0);
    filter.apply(&mut grid);

    assert_eq!(filter.floor(), 0);
    assert_eq!(grid.get(1, 1), Some(Pixel::new(0, 0, 0)));
    assert_eq!(EdgeFilter::default().floor(), 33);
}

/// 水平边缘处的累加幅值明显高于纯色区域
#[test]
fn test_horizontal_edge_response() {
    // 第 0、1 行为颜色 A，第 2 行为颜色 B
    let a = Pixel::new(0, 0, 0);
    let b = Pixel::new(100, 100, 100);
    let mut grid = PixelGrid::filled(5, 3, a);
    for x in 0..5 {
        grid.set(x, 2, b).expect("inside the grid");
    }
    let uniform = PixelGrid::filled(5, 3, a);

    let filter = EdgeFilter::default();
    let edge = filter.accumulate(&grid, 2, 1).expect("interior pixel");
    let flat = filter.accumulate(&uniform, 2, 1).expect("interior pixel");

    assert_eq!(flat, ChannelSums::default());
    // 8 个核底行权重之和的绝对值为 0,3,4,3,0,3,4,3
    assert_eq!(
        edge,
        ChannelSums {
            blue: 2000,
            red: 2000,
            green: 2000
        }
    );
    assert!(edge.blue > flat.blue);

    filter.apply(&mut grid);
    assert_eq!(grid.get(2, 1), Some(Pixel::new(250, 250, 250)));
}

/// 通道之间互不影响
#[test]
fn test_channels_are_independent() {
    let mut grid = PixelGrid::filled(3, 3, Pixel::new(0, 0, 0));
    for y in 0..3 {
        grid.set(2, y, Pixel::new(0, 80, 0))
            .expect("inside the grid");
    }

    let sums = EdgeFilter::default()
        .accumulate(&grid, 1, 1)
        .expect("interior pixel");
    assert_eq!(sums.blue, 0);
    assert_eq!(sums.green, 0);
    // 右列权重之和的绝对值为 4,3,0,3,4,3,0,3
    assert_eq!(sums.red, 20 * 80);
}

/// 强边缘被截断到 255
#[test]
fn test_strong_edge_is_clamped() {
    let mut grid = PixelGrid::filled(3, 3, Pixel::new(0, 0, 0));
    for y in 0..3 {
        grid.set(2, y, Pixel::new(255, 255, 255))
            .expect("inside the grid");
    }

    EdgeFilter::default().apply(&mut grid);
    assert_eq!(grid.get(1, 1), Some(Pixel::new(255, 255, 255)));
}

/// 没有内部像素的网格保持不变
#[test]
fn test_grid_without_interior_is_unchanged() {
    for (width, height) in [(1, 1), (2, 5), (5, 2)] {
        let original = random_grid(width, height);
        let mut grid = original.clone();
        EdgeFilter::default().apply(&mut grid);
        EdgeFilter::default().apply_parallel(&mut grid);
        assert_eq!(original, grid);
    }
}

/// 8 个核两两互为相反方向
#[test]
fn test_kernels_are_opposite_pairs() {
    for i in 0..4 {
        let (k, opposite) = (COMPASS_KERNELS[i], COMPASS_KERNELS[i + 4]);
        for r in 0..3 {
            for c in 0..3 {
                assert_eq!(k[r][c], -opposite[r][c]);
            }
        }
    }
}

/// 边框与越界坐标没有累加值，也不会 panic
#[test]
fn test_accumulate_outside_interior_is_none() {
    let grid = random_grid(5, 4);
    let filter = EdgeFilter::default();

    for (x, y) in [(0, 1), (1, 0), (4, 2), (2, 3), (9, 9)] {
        assert_eq!(filter.accumulate(&grid, x, y), None, "({x}, {y})");
    }
    assert!(filter.accumulate(&grid, 3, 2).is_some());
}

/// 越界写入返回错误且网格保持不变
#[test]
fn test_set_outside_grid_is_error() {
    let mut grid = PixelGrid::filled(3, 2, Pixel::new(1, 2, 3));
    let before = grid.clone();

    let err = grid
        .set(3, 0, Pixel::new(9, 9, 9))
        .expect_err("x is out of range");
    assert!(matches!(
        err,
        BmpError::OutOfBounds {
            x: 3,
            y: 0,
            width: 3,
            height: 2
        }
    ));
    assert!(grid.set(0, 2, Pixel::new(9, 9, 9)).is_err());
    assert_eq!(grid, before);

    grid.set(2, 1, Pixel::new(9, 9, 9))
        .expect("inside the grid");
    assert_eq!(grid.get(2, 1), Some(Pixel::new(9, 9, 9)));
}
