//! # 命令行接口模块
//!
//! 使用 `clap` 定义了程序的命令行结构，包括子命令和参数。
//! 所有用户通过命令行与程序交互的入口点都在此模块中定义。

use crate::constants::DEFAULT_EDGE_FLOOR;
use clap::Parser;
use std::path::PathBuf;

/// 一款针对 24 位无压缩 BMP 图像的命令行边缘检测工具，使用 8 方向 Sobel 算子。
#[derive(Parser, Debug)]
#[command(
    version,
    about,
    long_about = "一款针对 24 位无压缩 BMP 图像的命令行边缘检测工具，使用 8 方向 Sobel 算子计算梯度幅值。"
)]
pub struct Cli {
    /// 输出调试日志 (也可通过 RUST_LOG 控制)。
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// 可用的子命令：detect (边缘检测) 和 inspect (查看头部)。
#[derive(Parser, Debug)]
pub enum Commands {
    /// 对 BMP 图像进行边缘检测，并保存为新的 BMP 文件。
    Detect(DetectArgs),

    /// 打印 BMP 图像的文件头与信息头。
    Inspect(InspectArgs),
}

/// 'detect' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct DetectArgs {
    /// 输入 BMP 文件路径。省略时在终端中提示输入。
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// 结果图像的输出路径。省略时默认为输入文件旁的 `edges_<文件名>`；
    /// 若输入路径是交互输入的，则同样提示输入。
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// 输出文件已存在时强制覆盖。
    #[arg(short, long)]
    pub force: bool,

    /// 边缘强度下限，滤波后内部像素的通道值不会低于它。
    #[arg(long, default_value_t = DEFAULT_EDGE_FLOOR)]
    pub floor: u8,

    /// 写入前严格检查头部与像素数据的一致性。
    #[arg(long)]
    pub strict: bool,

    /// 滤波前打印文件头与信息头。
    #[arg(long)]
    pub show_header: bool,

    /// 按行并行执行滤波。
    #[arg(long)]
    pub parallel: bool,
}

/// 'inspect' 命令所需的参数。
#[derive(Parser, Debug)]
pub struct InspectArgs {
    /// 要查看的 BMP 文件路径。
    #[arg(short, long)]
    pub input: PathBuf,
}
