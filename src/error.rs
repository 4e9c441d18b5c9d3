//! # 错误类型模块
//!
//! 编解码器和滤波器对外暴露的唯一错误类型。
//! I/O 失败 (无法打开、读取被截断、无法写入) 与格式错误被明确区分开。

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BmpError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Unrecognized bitmap signature: {0:#06x}")]
    InvalidSignature(u16),

    #[error("Unsupported bits per pixel: {0} (only 24 is supported)")]
    UnsupportedBitDepth(u16),

    #[error("Unsupported compression method: {0} (only uncompressed images are supported)")]
    UnsupportedCompression(u32),

    #[error("Invalid image dimensions: width={width}, height={height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Unsupported info header size: {0} (only the 40-byte header is supported)")]
    UnsupportedHeaderSize(u32),

    #[error("Pixel data offset {0} does not match the 54-byte header")]
    InvalidPixelOffset(u32),

    #[error("Pixel ({x}, {y}) is outside a {width}x{height} grid")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Inconsistent bitmap: {0}")]
    Inconsistent(String),
}

impl BmpError {
    /// 错误是否来自图像格式本身，而非底层 I/O。
    pub fn is_format_error(&self) -> bool {
        !matches!(self, BmpError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, BmpError>;
