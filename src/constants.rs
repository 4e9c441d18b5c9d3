/// BMP 文件头 (BITMAPFILEHEADER) 的大小 (字节)。
pub const FILE_HEADER_SIZE: usize = 14;

/// 信息头 (BITMAPINFOHEADER) 的大小 (字节)。
pub const INFO_HEADER_SIZE: usize = 40;

/// BMP 文件的标准头部大小 (字节)。
/// 像素数据紧跟在这两个头部之后。
pub const BMP_HEADER_SIZE: usize = FILE_HEADER_SIZE + INFO_HEADER_SIZE;

/// 可识别的文件签名，按小端读取后的 `u16` 值：
/// `BM`, `BA`, `CI`, `CP`, `IC`, `PT`。
pub const BMP_SIGNATURES: [u16; 6] = [
    u16::from_le_bytes([b'B', b'M']),
    u16::from_le_bytes([b'B', b'A']),
    u16::from_le_bytes([b'C', b'I']),
    u16::from_le_bytes([b'C', b'P']),
    u16::from_le_bytes([b'I', b'C']),
    u16::from_le_bytes([b'P', b'T']),
];

/// 唯一支持的位深度。
pub const BITS_PER_PIXEL: u16 = 24;

/// 每个像素在磁盘上占用的字节数 (蓝、红、绿)。
pub const BYTES_PER_PIXEL: usize = 3;

/// 压缩方式字段中表示 "不压缩" (BI_RGB) 的值。
pub const COMPRESSION_NONE: u32 = 0;

/// 边缘强度的默认下限。
/// 滤波后内部像素的任何通道都不会低于此值。
pub const DEFAULT_EDGE_FLOOR: u8 = 33;

/// 方向卷积核的数量 (每 45° 一个)。
pub const KERNEL_COUNT: usize = 8;
