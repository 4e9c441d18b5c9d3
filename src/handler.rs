//! # 命令处理逻辑模块
//!
//! 包含处理 `detect` 和 `inspect` 子命令的高级业务逻辑。
//! 本模块负责协调文件 I/O、调用编解码器与边缘滤波器，以及向用户报告结果。

use crate::bitmap::Bitmap;
use crate::cli::{DetectArgs, InspectArgs};
use crate::codec::{read_file, write_file};
use crate::filter::EdgeFilter;
use anyhow::{Context, Result};
use colored::Colorize;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// 处理 'Detect' 命令的执行逻辑。
///
/// 输入路径缺省时从标准输入读取；随后解码图像、按需打印头部、应用边缘滤波，
/// 最后把结果编码写入输出路径。
///
/// # Arguments
///
/// * `args` - 包含输入/输出路径与滤波选项的 `DetectArgs` 结构体。
///
/// # Errors
///
/// 如果发生以下任一情况，将返回错误：
/// * 无法读取输入文件，或文件不是受支持的 24 位无压缩 BMP。
/// * 输出文件已存在且未指定 `--force`。
/// * 开启 `--strict` 时图像未通过一致性检查。
/// * 无法写入到目标文件。
pub fn handle_detect(args: DetectArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    detect_with_prompt(args, &mut stdin.lock(), &mut stdout)
}

/// 与 [`handle_detect`] 相同，但从给定的读写端提示路径。
pub fn detect_with_prompt<R: BufRead, W: Write>(
    args: DetectArgs,
    reader: &mut R,
    writer: &mut W,
) -> Result<()> {
    let prompted = args.input.is_none();
    let input = match args.input {
        Some(path) => path,
        None => prompt_path(reader, writer, "Enter the input file path: ")?,
    };

    let mut bitmap = read_file(&input).with_context(|| {
        format!(
            "Unable to read image file: {}",
            input.to_string_lossy().red().bold()
        )
    })?;
    info!(
        "Loaded {} ({}x{})",
        input.display(),
        bitmap.pixels.width(),
        bitmap.pixels.height()
    );

    if args.show_header {
        writeln!(writer, "{}", format_headers(&bitmap))?;
    }

    let filter = EdgeFilter::with_floor(args.floor);
    if args.parallel {
        filter.apply_parallel(&mut bitmap.pixels);
    } else {
        filter.apply(&mut bitmap.pixels);
    }

    let output = match args.output {
        Some(path) => path,
        None if prompted => prompt_path(reader, writer, "Enter the output file path: ")?,
        None => default_output_path(&input)?,
    };

    anyhow::ensure!(
        args.force || !output.exists(),
        "Output file already exists: {}\nUse --force to overwrite it.",
        output.to_string_lossy().red().bold()
    );

    if args.strict {
        bitmap.validate().with_context(|| {
            format!(
                "Refusing to write an inconsistent bitmap to {}",
                output.to_string_lossy().red().bold()
            )
        })?;
    }

    write_file(&output, &bitmap).with_context(|| {
        format!(
            "Unable to write to target image file: {}",
            output.to_string_lossy().red().bold()
        )
    })?;
    info!("Wrote {}", output.display());

    writeln!(
        writer,
        "Edge detection finished and saved: {}",
        output.to_string_lossy().green().bold()
    )?;

    Ok(())
}

/// 处理 'Inspect' 命令的执行逻辑。
///
/// 解码图像并打印文件头与信息头的所有字段。
///
/// # Errors
///
/// 无法读取输入文件，或文件不是受支持的 24 位无压缩 BMP 时返回错误。
pub fn handle_inspect(args: InspectArgs) -> Result<()> {
    inspect_to(args, &mut io::stdout())
}

/// 与 [`handle_inspect`] 相同，但把头部写入给定的输出端。
pub fn inspect_to<W: Write>(args: InspectArgs, writer: &mut W) -> Result<()> {
    let bitmap = read_file(&args.input).with_context(|| {
        format!(
            "Unable to read image file: {}",
            args.input.to_string_lossy().red().bold()
        )
    })?;

    writeln!(writer, "{}", format_headers(&bitmap))?;
    Ok(())
}

/// 把两个头部格式化为带标签的多行文本。
pub fn format_headers(bitmap: &Bitmap) -> String {
    format!(
        "\n{}\n{}\n\n{}\n{}",
        "File header:".bold(),
        bitmap.file_header,
        "Info header:".bold(),
        bitmap.info_header
    )
}

/// 生成默认输出路径：与输入同目录，文件名加上 `edges_` 前缀。
fn default_output_path(input: &Path) -> Result<PathBuf> {
    let file_name = input.file_name().with_context(|| {
        format!(
            "Cannot derive an output name from: {}",
            input.to_string_lossy().red().bold()
        )
    })?;
    Ok(input.with_file_name(format!("edges_{}", file_name.to_string_lossy())))
}

fn prompt_path<R: BufRead, W: Write>(
    reader: &mut R,
    writer: &mut W,
    message: &str,
) -> Result<PathBuf> {
    write!(writer, "{}", message)?;
    writer.flush()?;

    let mut line = String::new();
    reader
        .read_line(&mut line)
        .context("Failed to read a path from standard input")?;

    let path = line.trim();
    anyhow::ensure!(!path.is_empty(), "No file path was entered.");
    Ok(PathBuf::from(path))
}
