use clap::Parser;

use bmp_edge::{
    cli::{Cli, Commands},
    handler::{handle_detect, handle_inspect},
    logger,
};

/// 程序的主入口点
///
/// 负责解析命令行参数、初始化日志，并根据指定的子命令（`detect` 或 `inspect`）
/// 将执行分派到相应的处理函数。任何错误都会终止程序并返回非零退出码。
fn main() -> anyhow::Result<()> {
    // 解析命令行参数
    let cli = Cli::parse();
    logger::init(cli.verbose);

    // 根据子命令调用相应的处理函数
    match cli.command {
        Commands::Detect(args) => handle_detect(args),
        Commands::Inspect(args) => handle_inspect(args),
    }
}
