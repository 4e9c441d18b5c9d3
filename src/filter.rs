//! # 边缘检测滤波模块
//!
//! 使用 8 个方向 (每 45° 一个) 的 3×3 Sobel 卷积核计算梯度幅值。
//! 每个通道被当作独立的单通道图像处理，通道之间没有混合。
//!
//! 所有读取都来自滤波前的快照，写入则落在原网格上，
//! 因此结果与像素的处理顺序无关。宽或高为 1 的边框像素保持原样。

use crate::bitmap::{Pixel, PixelGrid};
use crate::constants::{DEFAULT_EDGE_FLOOR, KERNEL_COUNT};
use rayon::prelude::*;
use tracing::debug;

/// 一个 3×3 整数卷积核，按 `[行][列]` 索引。
pub type Kernel = [[i32; 3]; 3];

/// 8 个罗盘方向的 Sobel 卷积核。
/// 第一个和第七个分别是经典的水平与垂直 Sobel 算子的一种符号形式。
pub const COMPASS_KERNELS: [Kernel; KERNEL_COUNT] = [
    [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]],
    [[0, 1, 2], [-1, 0, 1], [-2, -1, 0]],
    [[1, 2, 1], [0, 0, 0], [-1, -2, -1]],
    [[2, 1, 0], [1, 0, -1], [0, -1, -2]],
    [[1, 0, -1], [2, 0, -2], [1, 0, -1]],
    [[0, -1, -2], [1, 0, -1], [2, 1, 0]],
    [[-1, -2, -1], [0, 0, 0], [1, 2, 1]],
    [[-2, -1, 0], [-1, 0, 1], [0, 1, 2]],
];

/// 单个像素在所有方向上累加的响应绝对值 (尚未平均和截断)。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ChannelSums {
    pub blue: i32,
    pub red: i32,
    pub green: i32,
}

/// 多方向梯度幅值滤波器。
///
/// `floor` 是输出通道的下限，默认 33；上限固定为 255。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeFilter {
    floor: u8,
}

impl Default for EdgeFilter {
    fn default() -> Self {
        Self {
            floor: DEFAULT_EDGE_FLOOR,
        }
    }
}

impl EdgeFilter {
    pub fn with_floor(floor: u8) -> Self {
        Self { floor }
    }

    pub fn floor(&self) -> u8 {
        self.floor
    }

    /// 在原网格上应用滤波 (单线程)。
    pub fn apply(&self, grid: &mut PixelGrid) {
        let (width, height) = (grid.width(), grid.height());
        if width < 3 || height < 3 {
            debug!(
                "{}x{} grid has no interior pixels, nothing to filter",
                width, height
            );
            return;
        }

        let snapshot = grid.clone();
        for y in 1..height - 1 {
            let row = &mut grid.pixels_mut()[y * width..(y + 1) * width];
            self.filter_row(&snapshot, y, row);
        }

        debug!(
            "Filtered {} interior pixels with floor {}",
            (width - 2) * (height - 2),
            self.floor
        );
    }

    /// 与 [`EdgeFilter::apply`] 结果完全相同，但按行并行计算。
    ///
    /// 快照在任何工作线程开始前就已完整复制，每个线程只写入自己拥有的行。
    pub fn apply_parallel(&self, grid: &mut PixelGrid) {
        let (width, height) = (grid.width(), grid.height());
        if width < 3 || height < 3 {
            debug!(
                "{}x{} grid has no interior pixels, nothing to filter",
                width, height
            );
            return;
        }

        let snapshot = grid.clone();
        grid.pixels_mut()
            .par_chunks_mut(width)
            .enumerate()
            .filter(|(y, _)| *y > 0 && *y < height - 1)
            .for_each(|(y, row)| self.filter_row(&snapshot, y, row));

        debug!(
            "Filtered {} interior pixels on {} threads with floor {}",
            (width - 2) * (height - 2),
            rayon::current_num_threads(),
            self.floor
        );
    }

    /// 计算内部像素 `(x, y)` 在 8 个方向上响应绝对值之和 (平均与截断之前)。
    ///
    /// `(x, y)` 不是内部像素时返回 `None`。
    pub fn accumulate(&self, grid: &PixelGrid, x: usize, y: usize) -> Option<ChannelSums> {
        let interior = x >= 1 && y >= 1 && x + 1 < grid.width() && y + 1 < grid.height();
        interior.then(|| interior_sums(grid, x, y))
    }

    fn filter_row(&self, snapshot: &PixelGrid, y: usize, out: &mut [Pixel]) {
        let width = snapshot.width();
        for (x, pixel) in out.iter_mut().enumerate().take(width - 1).skip(1) {
            let sums = interior_sums(snapshot, x, y);
            *pixel = Pixel::new(
                self.scale(sums.blue),
                self.scale(sums.red),
                self.scale(sums.green),
            );
        }
    }

    /// 取 8 个方向的平均值并截断到 `[floor, 255]`。
    fn scale(&self, sum: i32) -> u8 {
        (sum / KERNEL_COUNT as i32).clamp(i32::from(self.floor), 255) as u8
    }
}

/// 调用方保证 `(x, y)` 的 3×3 邻域完全位于网格内。
fn interior_sums(grid: &PixelGrid, x: usize, y: usize) -> ChannelSums {
    let mut sums = ChannelSums::default();
    for kernel in &COMPASS_KERNELS {
        let (mut b, mut r, mut g) = (0i32, 0i32, 0i32);
        for (ky, weights) in kernel.iter().enumerate() {
            let row = grid.row(y + ky - 1);
            for (kx, &weight) in weights.iter().enumerate() {
                let p = row[x + kx - 1];
                b += i32::from(p.blue) * weight;
                r += i32::from(p.red) * weight;
                g += i32::from(p.green) * weight;
            }
        }
        sums.blue += b.abs();
        sums.red += r.abs();
        sums.green += g.abs();
    }
    sums
}
