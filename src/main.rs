//! # zeoparse - Zeo++ 输出解析与比对工具
//!
//! 命令行入口，解析逻辑在库 crate 中（`zeoparse::parsers`）。
//!
//! ## 子命令
//! - `parse`   - 解析单个输出文件并打印（表格/JSON/CSV）
//! - `compare` - 按容差比较两次运行的输出
//! - `collect` - 并行解析目录下的所有输出，汇总为 CSV
//! - `plot`    - 绘制 .psd_histo 孔径分布图
//!
//! ## 依赖关系
//! ```text
//! main.rs
//!   ├── cli/        (命令行参数定义)
//!   ├── commands/   (命令执行逻辑)
//!   │     ├── zeoparse::parsers (格式解析器)
//!   │     └── zeoparse::compare (容差比较)
//!   ├── batch/      (批量并行处理)
//!   ├── plot.rs     (孔径分布绘图)
//!   └── utils/      (工具函数)
//! ```

mod batch;
mod cli;
mod commands;
mod plot;
mod utils;

use anyhow::Context;
use clap::Parser;
use cli::Cli;

fn main() {
    // Initialize colored output for Windows compatibility
    #[cfg(windows)]
    colored::control::set_virtual_terminal(true).ok();

    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        utils::output::print_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let name = cli.command.name();
    log::debug!("running '{}'", name);
    commands::run(cli.command).with_context(|| format!("{} failed", name))
}
