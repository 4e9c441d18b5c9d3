use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};

/// 初始化日志。
///
/// 优先使用 `RUST_LOG`；未设置时默认 `warn`，`verbose` 为真时为 `debug`。
/// 日志写入 stderr，不与 stdout 上的结果输出混在一起。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_timer(fmt::time::uptime())
        .with_writer(std::io::stderr);

    // 测试中可能被多次调用，重复初始化时静默忽略
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init();
}
