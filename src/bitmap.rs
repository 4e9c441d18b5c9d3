//! # 位图数据模型模块
//!
//! 定义两个头部结构、像素以及像素网格。
//! 解码时三者一同构造为 [`Bitmap`]，编码时一同被消费；
//! 边缘滤波器只会修改像素网格，不会触碰头部。

use crate::constants::{
    BITS_PER_PIXEL, BMP_HEADER_SIZE, BMP_SIGNATURES, COMPRESSION_NONE, INFO_HEADER_SIZE,
};
use crate::error::{BmpError, Result};
use std::fmt;

/// 14 字节的文件头，字段顺序与磁盘布局一致。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    pub signature: u16,
    pub file_size: u32,
    pub reserved1: u16,
    pub reserved2: u16,
    pub pixel_offset: u32,
}

/// 40 字节的信息头，字段顺序与磁盘布局一致。
///
/// 宽和高按无符号数读取：负高度 (自上而下存储) 在这里表现为一个巨大的值，
/// 解码时会因数据不足而报错，而不是被悄悄翻转。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfoHeader {
    pub header_size: u32,
    pub width: u32,
    pub height: u32,
    pub planes: u16,
    pub bits_per_pixel: u16,
    pub compression: u32,
    pub image_size: u32,
    pub x_pixels_per_meter: u32,
    pub y_pixels_per_meter: u32,
    pub colors_used: u32,
    pub colors_important: u32,
}

/// 一个三通道像素。
///
/// 磁盘上的字节顺序是 蓝、红、绿 (而不是常见的 蓝、绿、红)，
/// 为了和已有文件逐字节兼容，编解码器保持这一映射不变。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub blue: u8,
    pub red: u8,
    pub green: u8,
}

impl Pixel {
    pub const fn new(blue: u8, red: u8, green: u8) -> Self {
        Self { blue, red, green }
    }

    /// 按磁盘顺序 (蓝、红、绿) 返回三个字节。
    pub const fn to_bytes(self) -> [u8; 3] {
        [self.blue, self.red, self.green]
    }

    /// 从磁盘顺序 (蓝、红、绿) 的三个字节构造像素。
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::new(bytes[0], bytes[1], bytes[2])
    }
}

/// 行优先、自上而下 (按存储顺序，不做垂直翻转) 的像素网格。
///
/// 宽高在构造后不可变，像素数量始终等于 `width * height`。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl PixelGrid {
    /// 创建一个所有像素均为 `fill` 的网格。
    pub fn filled(width: usize, height: usize, fill: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width * height],
        }
    }

    /// 用已有的像素序列构造网格。
    ///
    /// # Errors
    ///
    /// 像素数量与 `width * height` 不符时返回 [`BmpError::Inconsistent`]。
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Pixel>) -> Result<Self> {
        let expected = width.checked_mul(height);
        if expected != Some(pixels.len()) {
            return Err(BmpError::Inconsistent(format!(
                "{} pixels do not fill a {}x{} grid",
                pixels.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    /// 可变地访问像素，但不允许改变网格的形状。
    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Pixel> {
        (x < self.width && y < self.height).then(|| self.pixels[y * self.width + x])
    }

    /// 写入一个像素。
    ///
    /// # Errors
    ///
    /// 坐标超出网格时返回 [`BmpError::OutOfBounds`]，网格保持不变。
    pub fn set(&mut self, x: usize, y: usize, pixel: Pixel) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(BmpError::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        self.pixels[y * self.width + x] = pixel;
        Ok(())
    }

    pub fn row(&self, y: usize) -> &[Pixel] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Pixel]> {
        // 宽度为 0 时没有任何像素，chunks_exact(0) 会 panic
        self.pixels.chunks_exact(self.width.max(1))
    }
}

/// 一张完整的位图：两个头部加上像素网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    pub file_header: FileHeader,
    pub info_header: InfoHeader,
    pub pixels: PixelGrid,
}

impl Bitmap {
    /// 严格的一致性检查。
    ///
    /// 默认的编码流程不会调用它；需要时由调用方显式开启 (命令行的 `--strict`)。
    ///
    /// # Errors
    ///
    /// 签名无法识别、位深不是 24、存在压缩、信息头大小不是 40、
    /// 像素偏移不等于 54，或头部宽高与像素网格不符时返回错误。
    pub fn validate(&self) -> Result<()> {
        check_signature(self.file_header.signature)?;
        check_layout(&self.file_header, &self.info_header)?;
        check_format(&self.info_header)?;

        let (width, height) = (
            self.info_header.width as usize,
            self.info_header.height as usize,
        );
        if (width, height) != (self.pixels.width(), self.pixels.height()) {
            return Err(BmpError::Inconsistent(format!(
                "header declares {}x{} but the grid is {}x{}",
                width,
                height,
                self.pixels.width(),
                self.pixels.height()
            )));
        }

        Ok(())
    }
}

pub(crate) fn check_signature(signature: u16) -> Result<()> {
    if BMP_SIGNATURES.contains(&signature) {
        Ok(())
    } else {
        Err(BmpError::InvalidSignature(signature))
    }
}

/// 只支持 40 字节的信息头，且像素数据必须紧跟在 54 字节的头部之后。
pub(crate) fn check_layout(file: &FileHeader, info: &InfoHeader) -> Result<()> {
    if info.header_size as usize != INFO_HEADER_SIZE {
        return Err(BmpError::UnsupportedHeaderSize(info.header_size));
    }
    if file.pixel_offset as usize != BMP_HEADER_SIZE {
        return Err(BmpError::InvalidPixelOffset(file.pixel_offset));
    }
    Ok(())
}

pub(crate) fn check_format(info: &InfoHeader) -> Result<()> {
    if info.bits_per_pixel != BITS_PER_PIXEL {
        return Err(BmpError::UnsupportedBitDepth(info.bits_per_pixel));
    }
    if info.compression != COMPRESSION_NONE {
        return Err(BmpError::UnsupportedCompression(info.compression));
    }
    if info.width == 0 || info.height == 0 {
        return Err(BmpError::InvalidDimensions {
            width: info.width,
            height: info.height,
        });
    }
    Ok(())
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [lo, hi] = self.signature.to_le_bytes();
        writeln!(
            f,
            "\tSignature: {} ({:?})",
            self.signature,
            String::from_utf8_lossy(&[lo, hi])
        )?;
        writeln!(f, "\tFile size in bytes: {}", self.file_size)?;
        writeln!(f, "\tReserved field 1: {}", self.reserved1)?;
        writeln!(f, "\tReserved field 2: {}", self.reserved2)?;
        write!(f, "\tPixel data offset: {}", self.pixel_offset)
    }
}

impl fmt::Display for InfoHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "\tInfo header size: {}", self.header_size)?;
        writeln!(f, "\tWidth in pixels: {}", self.width)?;
        writeln!(f, "\tHeight in pixels: {}", self.height)?;
        writeln!(f, "\tColor planes: {}", self.planes)?;
        writeln!(f, "\tBits per pixel: {}", self.bits_per_pixel)?;
        writeln!(f, "\tCompression method: {}", self.compression)?;
        writeln!(f, "\tImage size in bytes: {}", self.image_size)?;
        writeln!(f, "\tHorizontal resolution: {}", self.x_pixels_per_meter)?;
        writeln!(f, "\tVertical resolution: {}", self.y_pixels_per_meter)?;
        writeln!(f, "\tColors in palette: {}", self.colors_used)?;
        write!(f, "\tImportant colors: {}", self.colors_important)
    }
}
