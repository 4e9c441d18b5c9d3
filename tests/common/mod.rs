#![allow(dead_code)]

use bmp_edge::bitmap::{Pixel, PixelGrid};
use rand::RngCore;

/// 按给定像素数据拼出一个完整的 24 位 BMP 文件 (偏移 54，无压缩)。
pub fn bmp_bytes(width: u32, height: u32, payload: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(54 + payload.len());
    bytes.extend_from_slice(b"BM");
    bytes.extend_from_slice(&(54 + payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&0u16.to_le_bytes());
    bytes.extend_from_slice(&54u32.to_le_bytes());

    bytes.extend_from_slice(&40u32.to_le_bytes());
    bytes.extend_from_slice(&width.to_le_bytes());
    bytes.extend_from_slice(&height.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&24u16.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&(payload.len() as u32).to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&2835u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());
    bytes.extend_from_slice(&0u32.to_le_bytes());

    bytes.extend_from_slice(payload);
    bytes
}

/// 随机像素的完整 BMP 文件，每行之后补 `pad` 个零字节。
pub fn random_bmp_bytes(width: u32, height: u32, pad: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    let mut payload = Vec::new();
    for _ in 0..height {
        let mut row = vec![0u8; width as usize * 3];
        rng.fill_bytes(&mut row);
        payload.extend_from_slice(&row);
        payload.extend(std::iter::repeat_n(0u8, pad));
    }
    bmp_bytes(width, height, &payload)
}

/// 随机像素的网格。
pub fn random_grid(width: usize, height: usize) -> PixelGrid {
    let mut raw = vec![0u8; width * height * 3];
    rand::rng().fill_bytes(&mut raw);
    let pixels = raw
        .chunks_exact(3)
        .map(|c| Pixel::new(c[0], c[1], c[2]))
        .collect();
    PixelGrid::from_pixels(width, height, pixels).expect("grid shape matches pixel count")
}

/// 判断 `(x, y)` 是否位于网格的边框上。
pub fn is_border(grid: &PixelGrid, x: usize, y: usize) -> bool {
    x == 0 || y == 0 || x == grid.width() - 1 || y == grid.height() - 1
}
