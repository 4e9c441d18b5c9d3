//! # bmp_edge 库
//!
//! 本库包含 BMP 边缘检测工具的核心逻辑：
//! 位图数据模型、编解码器和 8 方向 Sobel 边缘滤波器。

// 声明库包含的所有模块。

pub mod bitmap;
pub mod cli;
pub mod codec;
pub mod constants;
pub mod error;
pub mod filter;
pub mod handler;
pub mod logger;
