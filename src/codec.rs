//! # 位图编解码模块
//!
//! 在磁盘字节布局与 [`Bitmap`] 之间转换：
//! 14 字节文件头 + 40 字节信息头 + 像素数据，所有多字节整数均为小端。
//!
//! 像素按行优先、蓝红绿顺序存储，不做自下而上的翻转。
//! 读取与写入使用两个不同的行填充公式 (见 [`read_padding`] 与 [`write_padding`])，
//! 二者只在行字节数模 4 为 0 或 2 时互为逆操作。

use crate::bitmap::{
    Bitmap, FileHeader, InfoHeader, Pixel, PixelGrid, check_format, check_layout, check_signature,
};
use crate::constants::{BMP_HEADER_SIZE, BYTES_PER_PIXEL};
use crate::error::Result;
use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};
use std::fs::{self, File};
use std::io::{self, BufWriter, Cursor, ErrorKind, Read, Write};
use std::path::Path;
use tracing::debug;

/// 读取时每行之后跳过的字节数：`(width * 3) % 4`。
pub fn read_padding(width: usize) -> usize {
    (width * BYTES_PER_PIXEL) % 4
}

/// 写入时每行之后补充的零字节数：余数非零时为 `4 - (width * 3) % 4`，否则为 0。
pub fn write_padding(width: usize) -> usize {
    match read_padding(width) {
        0 => 0,
        rem => 4 - rem,
    }
}

/// 从完整的文件字节中解码位图。
///
/// # Errors
///
/// * 数据在头部或任何声明的像素读完之前结束时，返回 [`BmpError::Io`](crate::error::BmpError::Io)
///   (`ErrorKind::UnexpectedEof`)。
/// * 签名无法识别、信息头不是 40 字节、像素偏移不等于 54、位深不是 24、存在压缩、
///   宽或高为 0 时返回格式错误。
pub fn decode(bytes: &[u8]) -> Result<Bitmap> {
    let mut cursor = Cursor::new(bytes);
    let file_header = read_file_header(&mut cursor)?;
    let info_header = read_info_header(&mut cursor)?;

    check_signature(file_header.signature)?;
    check_layout(&file_header, &info_header)?;
    check_format(&info_header)?;

    let width = info_header.width as usize;
    let height = info_header.height as usize;
    let skip = read_padding(width);
    let row_bytes = width * BYTES_PER_PIXEL;

    // 最后一行之后的填充允许缺失
    let data = &bytes[BMP_HEADER_SIZE..];
    let required = row_bytes
        .checked_mul(height)
        .and_then(|n| n.checked_add(skip * (height - 1)));
    match required {
        Some(required) if required <= data.len() => {}
        _ => {
            return Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                format!(
                    "Pixel data is truncated: a {}x{} image needs more than the {} bytes available",
                    width,
                    height,
                    data.len()
                ),
            )
            .into());
        }
    }

    let mut pixels = Vec::with_capacity(width * height);
    let stride = row_bytes + skip;
    for y in 0..height {
        let start = y * stride;
        let row = &data[start..start + row_bytes];
        pixels.extend(
            row.chunks_exact(BYTES_PER_PIXEL)
                .map(|b| Pixel::from_bytes([b[0], b[1], b[2]])),
        );
    }

    debug!(
        "Decoded {}x{} bitmap, skipping {} padding byte(s) per row",
        width, height, skip
    );

    Ok(Bitmap {
        file_header,
        info_header,
        pixels: PixelGrid::from_pixels(width, height, pixels)?,
    })
}

/// 将位图编码为完整的文件字节。
///
/// 不做任何一致性检查；像素数据的布局以像素网格的尺寸为准。
pub fn encode(bitmap: &Bitmap) -> Result<Vec<u8>> {
    let grid = &bitmap.pixels;
    let capacity = BMP_HEADER_SIZE
        + grid.height() * (grid.width() * BYTES_PER_PIXEL + write_padding(grid.width()));
    let mut bytes = Vec::with_capacity(capacity);
    write_to(bitmap, &mut bytes)?;
    Ok(bytes)
}

/// 将位图按磁盘布局写入任意 `Write`。
pub fn write_to<W: Write>(bitmap: &Bitmap, writer: &mut W) -> Result<()> {
    write_file_header(writer, &bitmap.file_header)?;
    write_info_header(writer, &bitmap.info_header)?;

    let grid = &bitmap.pixels;
    let fill = [0u8; 3];
    let pad = &fill[..write_padding(grid.width())];
    for row in grid.rows() {
        for pixel in row {
            writer.write_all(&pixel.to_bytes())?;
        }
        writer.write_all(pad)?;
    }

    debug!(
        "Encoded {}x{} bitmap, writing {} padding byte(s) per row",
        grid.width(),
        grid.height(),
        pad.len()
    );

    Ok(())
}

/// 读取并解码一个位图文件。
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Bitmap> {
    let bytes = fs::read(path.as_ref())?;
    debug!(
        "Read {} bytes from {}",
        bytes.len(),
        path.as_ref().display()
    );
    decode(&bytes)
}

/// 编码位图并写入文件 (已存在则覆盖)。
pub fn write_file<P: AsRef<Path>>(path: P, bitmap: &Bitmap) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path.as_ref())?);
    write_to(bitmap, &mut writer)?;
    writer.flush()?;
    Ok(())
}

fn read_file_header<R: Read>(reader: &mut R) -> io::Result<FileHeader> {
    Ok(FileHeader {
        signature: reader.read_u16::<LittleEndian>()?,
        file_size: reader.read_u32::<LittleEndian>()?,
        reserved1: reader.read_u16::<LittleEndian>()?,
        reserved2: reader.read_u16::<LittleEndian>()?,
        pixel_offset: reader.read_u32::<LittleEndian>()?,
    })
}

fn read_info_header<R: Read>(reader: &mut R) -> io::Result<InfoHeader> {
    Ok(InfoHeader {
        header_size: reader.read_u32::<LittleEndian>()?,
        width: reader.read_u32::<LittleEndian>()?,
        height: reader.read_u32::<LittleEndian>()?,
        planes: reader.read_u16::<LittleEndian>()?,
        bits_per_pixel: reader.read_u16::<LittleEndian>()?,
        compression: reader.read_u32::<LittleEndian>()?,
        image_size: reader.read_u32::<LittleEndian>()?,
        x_pixels_per_meter: reader.read_u32::<LittleEndian>()?,
        y_pixels_per_meter: reader.read_u32::<LittleEndian>()?,
        colors_used: reader.read_u32::<LittleEndian>()?,
        colors_important: reader.read_u32::<LittleEndian>()?,
    })
}

fn write_file_header<W: Write>(writer: &mut W, header: &FileHeader) -> io::Result<()> {
    writer.write_u16::<LittleEndian>(header.signature)?;
    writer.write_u32::<LittleEndian>(header.file_size)?;
    writer.write_u16::<LittleEndian>(header.reserved1)?;
    writer.write_u16::<LittleEndian>(header.reserved2)?;
    writer.write_u32::<LittleEndian>(header.pixel_offset)
}

fn write_info_header<W: Write>(writer: &mut W, header: &InfoHeader) -> io::Result<()> {
    writer.write_u32::<LittleEndian>(header.header_size)?;
    writer.write_u32::<LittleEndian>(header.width)?;
    writer.write_u32::<LittleEndian>(header.height)?;
    writer.write_u16::<LittleEndian>(header.planes)?;
    writer.write_u16::<LittleEndian>(header.bits_per_pixel)?;
    writer.write_u32::<LittleEndian>(header.compression)?;
    writer.write_u32::<LittleEndian>(header.image_size)?;
    writer.write_u32::<LittleEndian>(header.x_pixels_per_meter)?;
    writer.write_u32::<LittleEndian>(header.y_pixels_per_meter)?;
    writer.write_u32::<LittleEndian>(header.colors_used)?;
    writer.write_u32::<LittleEndian>(header.colors_important)
}
